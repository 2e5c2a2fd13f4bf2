use mcf::envelope::algorithms::{AesGcm, RsaOaep};
use mcf::envelope::{Encryptor, RsaPrivateKey, SecretKey};
use mcf::format::ByteEncoding;
use mcf::logger::RotationPolicy;
use mcf::{ConfigError, McfConfig, load_config, load_config_from};
use rand_core::OsRng;
use serial_test::serial;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn is_lower_hex(section: &str) -> bool {
    !section.is_empty() && section.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

const SAMPLE: &str = r#"
encoding = "hex"

[logging]
name = "mcf-test"
level = "debug"
console = false
path = "logs"
json = true
filter = "mcf_format=trace"
rotation = "hourly"
max_files = 4
"#;

fn write_sample(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("mcf.toml");
    fs::write(&path, SAMPLE).expect("write sample config");
    path
}

#[test]
fn file_values_are_loaded() -> Result<(), ConfigError> {
    let dir = tempdir().expect("tempdir");
    let config: McfConfig = load_config(Some(write_sample(dir.path())))?;

    assert_eq!(config.encoding, ByteEncoding::Hex);
    assert_eq!(config.logging.name, "mcf-test");
    assert_eq!(config.logging.level, "debug");
    assert!(!config.logging.console);
    assert!(config.logging.json);
    assert_eq!(config.logging.filter.as_deref(), Some("mcf_format=trace"));
    assert_eq!(config.logging.rotation, RotationPolicy::Hourly);
    assert_eq!(config.logging.max_files, 4);
    Ok(())
}

#[test]
fn environment_overrides_file() -> Result<(), ConfigError> {
    let dir = tempdir().expect("tempdir");
    let vars = [
        ("MCF__ENCODING", "base64"),
        ("MCF__LOGGING__LEVEL", "warn"),
        ("MCF__LOGGING__MAX_FILES", "9"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_owned(), v.to_owned()))
    .collect();

    let config: McfConfig = load_config_from(Some(write_sample(dir.path())), Some(vars))?;

    assert_eq!(config.encoding, ByteEncoding::Base64);
    assert_eq!(config.logging.level, "warn");
    assert_eq!(config.logging.max_files, 9);
    assert_eq!(config.logging.name, "mcf-test");
    Ok(())
}

#[test]
fn omitted_sections_fall_back_to_defaults() -> Result<(), ConfigError> {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("minimal.toml");
    fs::write(&path, "encoding = \"hex\"\n").expect("write config");

    let config: McfConfig = load_config(Some(&path))?;
    assert_eq!(config.logging, McfConfig::default().logging);
    Ok(())
}

#[test]
fn unknown_encoding_is_rejected() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("bad.toml");
    fs::write(&path, "encoding = \"base32\"\n").expect("write config");

    let err = load_config::<McfConfig>(Some(&path)).unwrap_err();
    assert!(err.to_string().contains("Failed to deserialize config"), "{err}");
}

#[test]
#[serial]
fn default_path_is_mcf_in_working_directory() -> Result<(), ConfigError> {
    let dir = tempdir().expect("tempdir");
    write_sample(dir.path());

    let previous = std::env::current_dir().expect("current dir");
    std::env::set_current_dir(dir.path()).expect("enter tempdir");
    let loaded = load_config::<McfConfig>(None::<&str>);
    std::env::set_current_dir(previous).expect("restore working directory");

    assert_eq!(loaded?.encoding, ByteEncoding::Hex);
    Ok(())
}

#[test]
fn configured_encoding_reaches_envelopes() {
    let config = McfConfig { encoding: ByteEncoding::Hex, ..McfConfig::default() };
    let envelope = config.symmetric::<AesGcm>(SecretKey::generate(32).unwrap()).unwrap();

    let sealed = envelope.encrypt(b"configured").unwrap();
    assert!(is_lower_hex(sealed.rsplit('$').next().unwrap()));
    assert!(sealed.contains("$iv="));
    assert_eq!(envelope.decrypt(&sealed).unwrap(), b"configured");
}

#[test]
fn configured_encoding_reaches_rsa_envelopes() {
    let config = McfConfig { encoding: ByteEncoding::Hex, ..McfConfig::default() };
    let private = RsaPrivateKey::new(&mut OsRng, 2048).unwrap();

    let hybrid = config.hybrid::<RsaOaep, AesGcm>(private.to_public_key(), private.clone());
    let sealed = hybrid.encrypt(b"configured").unwrap();
    let sections: Vec<_> = sealed.split('$').collect();
    assert_eq!(sections.len(), 6);
    assert_eq!(sections[1], "RSA-OAEP-SHA256-MGF1+AES-GCM-256");
    assert!(sections[3].starts_with("iv="));
    assert!(sections[4..].iter().all(|section| is_lower_hex(section)));
    assert_eq!(hybrid.decrypt(&sealed).unwrap(), b"configured");

    let asymmetric = config.asymmetric::<RsaOaep>(private.to_public_key(), private);
    let sealed = asymmetric.encrypt(b"configured").unwrap();
    // 2048-bit modulus.
    let ciphertext = sealed.rsplit('$').next().unwrap();
    assert_eq!(ciphertext.len(), 2 * 256);
    assert!(is_lower_hex(ciphertext));
    assert_eq!(asymmetric.decrypt(&sealed).unwrap(), b"configured");
}
