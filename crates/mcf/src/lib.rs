//! Facade crate for the MCF toolkit.
//! Re-exports the format and envelope layers and wires them to a layered configuration.
//! Keep this crate thin: it composes the infrastructure crates, it does not implement them.
//!
//! ## Usage
//! - Load an [`McfConfig`] with [`load_config`] (file plus `MCF__` environment overrides).
//! - Call [`McfConfig::init_logging`] once at startup and keep the returned handle alive.
//! - Build mappers and envelopes through the config so they share its byte encoding.
//!
//! Models declared outside this workspace point the derive at the facade path:
//! `#[mcf_model(crate = "mcf::format")]`.

mod config;

pub use crate::config::{ConfigError, ConfigErrorExt, McfConfig, load_config, load_config_from};
pub use mcf_envelope as envelope;
pub use mcf_format as format;
pub use mcf_logger as logger;

pub mod prelude {
    pub use crate::{McfConfig, load_config};
    pub use mcf_envelope::prelude::*;
    pub use mcf_format::prelude::*;
    pub use mcf_logger::{Logger, LoggingConfig};
}
