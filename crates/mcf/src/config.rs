use config::{Config, Environment, File};
use mcf_envelope::capability::{AsymmetricCipher, SymmetricCipher};
use mcf_envelope::{
    AsymmetricEnvelope, EnvelopeError, HybridEnvelope, SecretKey, SymmetricEnvelope,
};
use mcf_format::{ByteEncoding, Format, Mapper};
use mcf_logger::{Logger, LoggerError, LoggingConfig};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

const DEFAULT_CONFIG: &str = "mcf";
const ENV_PREFIX: &str = "MCF";
const ENV_SEPARATOR: &str = "__";

#[mcf_derive::mcf_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Toolkit-wide settings.
///
/// ```toml
/// encoding = "hex"
///
/// [logging]
/// level = "debug"
/// path = "logs"
/// ```
#[derive(Default, Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct McfConfig {
    /// Encoding of byte sections in composed strings. Envelope parameters stay base64.
    pub encoding: ByteEncoding,
    pub logging: LoggingConfig,
}

impl McfConfig {
    /// Positional mapper using the configured byte encoding.
    #[must_use]
    pub fn mapper(&self) -> Mapper {
        Mapper::for_format(match self.encoding {
            ByteEncoding::Base64 => Format::McfBase64,
            ByteEncoding::Hex => Format::McfHex,
        })
    }

    /// # Errors
    /// * [`EnvelopeError::Key`] If `key` does not fit `S`.
    pub fn symmetric<S: SymmetricCipher>(
        &self,
        key: SecretKey,
    ) -> Result<SymmetricEnvelope<S>, EnvelopeError> {
        Ok(SymmetricEnvelope::new(key)?.with_encoding(self.encoding))
    }

    #[must_use]
    pub fn asymmetric<A: AsymmetricCipher>(
        &self,
        public: A::PublicKey,
        private: A::PrivateKey,
    ) -> AsymmetricEnvelope<A> {
        AsymmetricEnvelope::new(public, private).with_encoding(self.encoding)
    }

    #[must_use]
    pub fn hybrid<A: AsymmetricCipher, S: SymmetricCipher>(
        &self,
        public: A::PublicKey,
        private: A::PrivateKey,
    ) -> HybridEnvelope<A, S> {
        HybridEnvelope::new(public, private).with_encoding(self.encoding)
    }

    /// Installs the global tracing subscriber from the `[logging]` section.
    ///
    /// # Errors
    /// Everything [`Logger::from_config`] returns.
    pub fn init_logging(&self) -> Result<Logger, LoggerError> {
        Logger::from_config(&self.logging)
    }
}

/// Loads `T` from a configuration file overlaid with environment variables.
///
/// 1. **Base File**: `path`, or `mcf` in the working directory. The extension may be
///    omitted; `toml`, `yaml` and `json` files are tried.
/// 2. **Environment Overrides**: variables prefixed with `MCF__`, nested with `__`
///    (e.g. `MCF__LOGGING__LEVEL` maps to `logging.level`).
///
/// # Errors
/// * [`ConfigError::Config`] If the file is missing, or the merged values do not
///   deserialize into `T`.
///
/// # Example
/// ```rust,ignore
/// use mcf::{McfConfig, load_config};
///
/// let config: McfConfig = load_config(Some("config/local"))?;
/// let _logger = config.init_logging()?;
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    load_config_from(path, None)
}

/// Same as [`load_config`], reading overrides from `vars` instead of the process
/// environment when given. Keys keep their `MCF__` prefix.
///
/// # Errors
/// * [`ConfigError::Config`] If the file is missing, or the merged values do not
///   deserialize into `T`.
pub fn load_config_from<T>(
    path: Option<impl AsRef<Path>>,
    vars: Option<config::Map<String, String>>,
) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path =
        path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG), |p| p.as_ref().to_path_buf());

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(true))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator(ENV_SEPARATOR)
                .convert_case(config::Case::Snake)
                .source(vars),
        );

    info!("Loading config from {}", effective_path.display());

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
