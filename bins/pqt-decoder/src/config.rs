use std::path::{Path, PathBuf};

use clap::Parser;
use codec_avro::GATEWAY_PAYLOAD_SCHEMA;

/// Input file read on every run.
pub const DEFAULT_INPUT_PATH: &str = "~/Downloads/1736944943-b65ee658-19f3-4055-a21f-bcb8bf74fe4b-";

/// Takes no arguments; parsed only so `--help` and `--version` work.
#[derive(Parser)]
#[command(
    name = "pqt-decoder",
    version,
    about = "Print the Avro payloads stored in a Parquet file",
    long_about = "Reads every row of the input Parquet file, decodes its Avro payload \
                  and prints it as indented JSON. Set RUST_LOG to adjust diagnostics."
)]
pub struct Cli {}

// ═══════════════════════════════════════════════════════════════
//  DecoderConfig
// ═══════════════════════════════════════════════════════════════

/// Process-wide settings, built once at startup.
#[derive(Debug, Clone)]
pub struct DecoderConfig {
    pub input_path: PathBuf,
    pub payload_schema: &'static str,
}

impl DecoderConfig {
    pub fn from_defaults() -> Self {
        Self {
            input_path: expand_home(DEFAULT_INPUT_PATH, dirs::home_dir().as_deref()),
            payload_schema: GATEWAY_PAYLOAD_SCHEMA,
        }
    }
}

/// Replace a leading `~` with `home`. Left as written when `home` is unknown.
fn expand_home(raw: &str, home: Option<&Path>) -> PathBuf {
    let rest = match raw.strip_prefix('~') {
        Some("") => "",
        Some(rest) if rest.starts_with('/') => &rest[1..],
        _ => return PathBuf::from(raw),
    };
    match home {
        Some(home) if !home.as_os_str().is_empty() => home.join(rest),
        _ => PathBuf::from(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_expands_against_home() {
        let home = Path::new("/home/ops");
        assert_eq!(expand_home("~/Downloads/data", Some(home)), PathBuf::from("/home/ops/Downloads/data"));
        assert_eq!(expand_home("~", Some(home)), PathBuf::from("/home/ops"));
    }

    #[test]
    fn path_kept_without_home_or_tilde() {
        let home = Path::new("/home/ops");
        assert_eq!(expand_home("~/data", None), PathBuf::from("~/data"));
        assert_eq!(expand_home("~/data", Some(Path::new(""))), PathBuf::from("~/data"));
        assert_eq!(expand_home("/abs/data", Some(home)), PathBuf::from("/abs/data"));
        assert_eq!(expand_home("~other/data", Some(home)), PathBuf::from("~other/data"));
    }

    #[test]
    fn defaults_resolve_against_user_home() {
        let config = DecoderConfig::from_defaults();
        assert!(config.payload_schema.contains("GatewayMetadataAndPayload"));
        assert!(config.input_path.ends_with("1736944943-b65ee658-19f3-4055-a21f-bcb8bf74fe4b-"));

        let home = dirs::home_dir().filter(|h| !h.as_os_str().is_empty());
        if let Some(home) = home {
            assert!(config.input_path.starts_with(&home));
            assert!(!config.input_path.starts_with("~"));
        }
    }

    #[test]
    fn cli_has_no_arguments() {
        assert!(Cli::try_parse_from(["pqt-decoder"]).is_ok());
        assert!(Cli::try_parse_from(["pqt-decoder", "other.parquet"]).is_err());
    }
}
