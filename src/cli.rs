//! Command-line flags
//!
//! Flags take precedence over the config file and environment. Any flag left
//! unset falls through to those layers and then to the built-in defaults.

use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(name = "alloy-configd")]
#[command(version)]
#[command(about = "Serve .alloy configuration documents over HTTP", long_about = None)]
pub struct Cli {
    /// Configuration file, extension optional
    #[arg(short, long, default_value = "config")]
    pub config: String,

    /// Storage backend type (only "file" is supported)
    #[arg(long = "storage-type", value_name = "TYPE")]
    pub storage_type: Option<String>,

    /// Directory holding the .alloy documents [default: /configs]
    #[arg(long = "storage-path", value_name = "DIR")]
    pub storage_path: Option<String>,

    /// HTTP listen address [default: :8080]
    #[arg(long = "http-listen-addr", value_name = "ADDR")]
    pub http_listen_addr: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["alloy-configd"]).unwrap();
        assert_eq!(cli.config, "config");
        assert!(cli.storage_type.is_none());
        assert!(cli.storage_path.is_none());
        assert!(cli.http_listen_addr.is_none());
    }

    #[test]
    fn test_storage_and_listen_flags() {
        let cli = Cli::try_parse_from([
            "alloy-configd",
            "--storage-type",
            "file",
            "--storage-path=/srv/configs",
            "--http-listen-addr",
            "127.0.0.1:9000",
            "-c",
            "/etc/alloy/server",
        ])
        .unwrap();
        assert_eq!(cli.storage_type.as_deref(), Some("file"));
        assert_eq!(cli.storage_path.as_deref(), Some("/srv/configs"));
        assert_eq!(cli.http_listen_addr.as_deref(), Some("127.0.0.1:9000"));
        assert_eq!(cli.config, "/etc/alloy/server");
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(Cli::try_parse_from(["alloy-configd", "--storage-kind", "s3"]).is_err());
    }
}
