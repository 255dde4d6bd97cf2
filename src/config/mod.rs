// Configuration module entry point
// Loads layered configuration and owns the process-wide server state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::ServerState;
pub use types::{Config, LoggingConfig, PerformanceConfig, ServerConfig, StaticConfig};

impl Config {
    /// Load configuration: optional `config.toml`, defaults, then the
    /// `PORT` environment variable on top
    pub fn load() -> Result<Self, config::ConfigError> {
        let mut cfg = Self::load_from("config")?;
        if let Ok(port) = std::env::var("PORT") {
            cfg.apply_port_override(&port)?;
        }
        Ok(cfg)
    }

    /// Load configuration from specified file path (without extension)
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 7860)?
            .set_default("static.root_dir", "dist")?
            .set_default("static.index_file", "index.html")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .build()?;

        settings.try_deserialize()
    }

    /// Override the listen port from a `PORT` environment value.
    ///
    /// A value that does not parse as a port is a startup error; the
    /// process must not come up listening somewhere unexpected.
    pub fn apply_port_override(&mut self, value: &str) -> Result<(), config::ConfigError> {
        let port = value
            .parse::<u16>()
            .map_err(|e| config::ConfigError::Message(format!("invalid PORT '{value}': {e}")))?;
        self.server.port = port;
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_defaults() -> Config {
        // Path that never exists, so only the built-in defaults apply
        Config::load_from("tests-nonexistent-config").expect("defaults should load")
    }

    #[test]
    fn test_defaults() {
        let cfg = load_defaults();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 7860);
        assert_eq!(cfg.server.workers, None);
        assert_eq!(cfg.static_files.root_dir, "dist");
        assert_eq!(cfg.static_files.index_file, "index.html");
        assert!(cfg.logging.access_log);
        assert_eq!(cfg.logging.access_log_format, "combined");
        assert_eq!(cfg.performance.max_connections, None);
    }

    #[test]
    fn test_port_override() {
        let mut cfg = load_defaults();
        cfg.apply_port_override("8042").expect("valid port");
        assert_eq!(cfg.server.port, 8042);
    }

    #[test]
    fn test_port_override_rejects_garbage() {
        let mut cfg = load_defaults();
        assert!(cfg.apply_port_override("not-a-port").is_err());
        assert!(cfg.apply_port_override("70000").is_err());
        assert!(cfg.apply_port_override("").is_err());
    }

    #[test]
    fn test_socket_addr() {
        let mut cfg = load_defaults();
        cfg.server.host = "127.0.0.1".to_string();
        cfg.server.port = 9000;
        let addr = cfg.socket_addr().expect("valid addr");
        assert_eq!(addr.to_string(), "127.0.0.1:9000");
    }
}
