// Server state module
// Immutable per-process state shared across all connections

use std::io;
use std::path::PathBuf;

use super::types::Config;

/// Server state, constructed once at startup and never mutated
pub struct ServerState {
    pub config: Config,
    /// Canonicalized root directory; every served file must resolve under it
    pub root: PathBuf,
}

impl ServerState {
    /// Canonicalize the configured root directory and build the state.
    ///
    /// Fails when the directory is missing or unreadable, so the process
    /// never reaches the accept loop with a root it cannot serve from.
    pub fn new(config: Config) -> io::Result<Self> {
        let root = std::fs::canonicalize(&config.static_files.root_dir).map_err(|e| {
            io::Error::new(
                e.kind(),
                format!(
                    "root directory '{}' is not usable: {e}",
                    config.static_files.root_dir
                ),
            )
        })?;

        if !root.is_dir() {
            return Err(io::Error::other(format!(
                "root path '{}' is not a directory",
                root.display()
            )));
        }

        Ok(Self { config, root })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_root(root_dir: &str) -> Config {
        let mut cfg =
            Config::load_from("tests-nonexistent-config").expect("defaults should load");
        cfg.static_files.root_dir = root_dir.to_string();
        cfg
    }

    #[test]
    fn test_accepts_existing_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let state = ServerState::new(config_with_root(dir.path().to_str().unwrap()))
            .expect("existing directory should be accepted");
        assert!(state.root.is_absolute());
    }

    #[test]
    fn test_rejects_missing_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("no-such-dir");
        assert!(ServerState::new(config_with_root(missing.to_str().unwrap())).is_err());
    }

    #[test]
    fn test_rejects_file_as_root() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = dir.path().join("bundle.js");
        std::fs::write(&file, b"console.log(1)").expect("write");
        assert!(ServerState::new(config_with_root(file.to_str().unwrap())).is_err());
    }
}
