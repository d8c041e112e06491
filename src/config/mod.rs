// Configuration module entry point
// Layers defaults, config file, environment and command-line flags

mod state;
mod types;

use std::net::{SocketAddr, ToSocketAddrs};

use crate::cli::Cli;

// Re-export public types
pub use state::AppState;
pub use types::Config;

/// Environment variable prefix, e.g. `ALLOY_STORAGE__PATH`
const ENV_PREFIX: &str = "ALLOY";

impl Config {
    /// Load configuration, lowest to highest precedence:
    /// struct defaults, config file named by `--config`, `ALLOY_*` environment
    /// variables, explicit command-line flags.
    pub fn load_from(cli: &Cli) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(&cli.config).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("storage.type", cli.storage_type.clone())?
            .set_override_option("storage.path", cli.storage_path.clone())?
            .set_override_option("server.http_listen_addr", cli.http_listen_addr.clone())?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        parse_listen_addr(&self.server.http_listen_addr)
    }
}

/// Resolve a listen address. A bare `:port` binds every IPv4 interface.
pub fn parse_listen_addr(addr: &str) -> Result<SocketAddr, String> {
    let full = if addr.starts_with(':') {
        format!("0.0.0.0{addr}")
    } else {
        addr.to_string()
    };

    full.to_socket_addrs()
        .map_err(|e| format!("Invalid address '{addr}': {e}"))?
        .next()
        .ok_or_else(|| format!("Invalid address '{addr}': no socket address resolved"))
}
