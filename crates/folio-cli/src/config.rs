// crates/folio-cli/src/config.rs
//
// Runtime configuration for the Folio CLI.
// Loaded from a TOML file or populated with sensible defaults.
//
// Example:
//
//   data_dir = "~/.folio/data"
//   log_level = "info"
//
//   [ledger]
//   admins = ["<64 hex chars>"]
//   distribution_period_secs = 86400
//   reward_curve = { kind = "inverse_linear", base = 1000000000 }

use serde::Deserialize;
use std::fs;

use folio_ledger::LedgerConfig;

#[derive(Debug, Clone, Deserialize)]
pub struct FolioConfig {
    /// Directory for local data storage (RocksDB).
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Log level used when RUST_LOG is unset: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Genesis parameters for a new ledger.
    #[serde(default)]
    pub ledger: LedgerConfig,
}

fn default_data_dir() -> String {
    "~/.folio/data".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            ledger: LedgerConfig::default(),
        }
    }
}

impl FolioConfig {
    /// Load configuration from a TOML file at the given path.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(expand_tilde(path))?;
        let config: FolioConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// RocksDB directory for the persisted ledger.
    pub fn ledger_db_path(&self) -> String {
        format!("{}/ledger_rocksdb", expand_tilde(&self.data_dir))
    }
}

/// Expand a leading `~/` to the user's home directory.
pub fn expand_tilde(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return format!("{}/{}", home.display(), rest);
        }
    }
    path.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::principal::Principal;
    use folio_economics::RewardCurve;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: FolioConfig = toml::from_str("").unwrap();
        assert_eq!(config.data_dir, "~/.folio/data");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.ledger, LedgerConfig::default());
    }

    #[test]
    fn test_ledger_table() {
        let admin = Principal([7; 32]);
        let text = format!(
            r#"
data_dir = "/tmp/folio"

[ledger]
admins = ["{}"]
distribution_period_secs = 86400
genesis_time = 1700000000
reward_curve = {{ kind = "halving", base = 1000, half_life = 4 }}
"#,
            admin.to_hex()
        );
        let config: FolioConfig = toml::from_str(&text).unwrap();
        assert_eq!(config.data_dir, "/tmp/folio");
        assert_eq!(config.ledger.admins, vec![admin]);
        assert_eq!(config.ledger.distribution_period_secs, 86_400);
        assert_eq!(config.ledger.genesis_time, 1_700_000_000);
        assert_eq!(
            config.ledger.reward_curve,
            RewardCurve::Halving { base: 1000, half_life: 4 }
        );
        assert_eq!(config.ledger_db_path(), "/tmp/folio/ledger_rocksdb");
    }

    #[test]
    fn test_expand_tilde_leaves_plain_paths() {
        assert_eq!(expand_tilde("/var/lib/folio"), "/var/lib/folio");
        assert_eq!(expand_tilde("relative/dir"), "relative/dir");
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/x"), format!("{}/x", home.display()));
        }
    }
}
