use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SquirrelError};
use crate::vault::{EntryStore, Order, RewriteStrategy};

/// Project-level configuration, loaded from `.squirrel.toml`.
///
/// Every field has a sensible default so Squirrel works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory (relative to project root) holding the store files.
    #[serde(default = "default_store_dir")]
    pub store_dir: String,

    /// File name of the record data file.
    #[serde(default = "default_data_file")]
    pub data_file: String,

    /// File name of the `{last_id, count}` snapshot.
    #[serde(default = "default_state_file")]
    pub state_file: String,

    /// File name of the password verification artifact.
    #[serde(default = "default_verification_file")]
    pub verification_file: String,

    /// How update/delete rebuild the data file (`copy` or `in-memory`).
    #[serde(default)]
    pub rewrite_strategy: RewriteStrategy,

    /// Number of entries `list` shows when no limit is given.
    #[serde(default = "default_list_limit")]
    pub list_limit: usize,

    /// Sort key `list` uses when none is given.
    #[serde(default = "default_list_order")]
    pub list_order: String,

    /// Entry count past which inserts log a size warning.
    #[serde(default = "default_entry_threshold")]
    pub entry_threshold: i64,
}

/// Resolved locations of the three store files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    pub dir: PathBuf,
    pub data: PathBuf,
    pub state: PathBuf,
    pub verification: PathBuf,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_store_dir() -> String {
    ".squirrel".to_string()
}

fn default_data_file() -> String {
    "data.bin".to_string()
}

fn default_state_file() -> String {
    "state.bin".to_string()
}

fn default_verification_file() -> String {
    "enc.bin".to_string()
}

fn default_list_limit() -> usize {
    10
}

fn default_list_order() -> String {
    "title".to_string()
}

fn default_entry_threshold() -> i64 {
    1_000_000
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(),
            data_file: default_data_file(),
            state_file: default_state_file(),
            verification_file: default_verification_file(),
            rewrite_strategy: RewriteStrategy::default(),
            list_limit: default_list_limit(),
            list_order: default_list_order(),
            entry_threshold: default_entry_threshold(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    const FILE_NAME: &'static str = ".squirrel.toml";

    /// Load settings from `<project_dir>/.squirrel.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            SquirrelError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        // Fail early on a bad order name rather than at the first `list`.
        settings.default_order()?;

        Ok(settings)
    }

    /// Resolve the store file paths under `project_dir`.
    ///
    /// Example: `project_dir/.squirrel/data.bin`
    pub fn store_paths(&self, project_dir: &Path) -> StorePaths {
        let dir = project_dir.join(&self.store_dir);
        StorePaths {
            data: dir.join(&self.data_file),
            state: dir.join(&self.state_file),
            verification: dir.join(&self.verification_file),
            dir,
        }
    }

    /// Build an `EntryStore` over the configured data file.
    pub fn entry_store(&self, paths: &StorePaths) -> EntryStore {
        EntryStore::new(&paths.data)
            .with_strategy(self.rewrite_strategy)
            .with_entry_threshold(self.entry_threshold)
    }

    /// Parse `list_order`.
    pub fn default_order(&self) -> Result<Order> {
        self.list_order.parse()
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_settings_are_sensible() {
        let s = Settings::default();
        assert_eq!(s.store_dir, ".squirrel");
        assert_eq!(s.data_file, "data.bin");
        assert_eq!(s.state_file, "state.bin");
        assert_eq!(s.verification_file, "enc.bin");
        assert_eq!(s.rewrite_strategy, RewriteStrategy::CopyRewrite);
        assert_eq!(s.list_limit, 10);
        assert_eq!(s.default_order().unwrap(), Order::ByTitle);
        assert_eq!(s.entry_threshold, 1_000_000);
    }

    #[test]
    fn load_returns_defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.store_dir, ".squirrel");
    }

    #[test]
    fn load_parses_toml_file() {
        let tmp = TempDir::new().unwrap();
        let config = r#"
store_dir = "vault"
data_file = "entries.bin"
rewrite_strategy = "in-memory"
list_limit = 25
list_order = "username"
entry_threshold = 500
"#;
        fs::write(tmp.path().join(".squirrel.toml"), config).unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.store_dir, "vault");
        assert_eq!(settings.data_file, "entries.bin");
        assert_eq!(settings.rewrite_strategy, RewriteStrategy::InMemory);
        assert_eq!(settings.list_limit, 25);
        assert_eq!(settings.default_order().unwrap(), Order::ByUsername);
        assert_eq!(settings.entry_threshold, 500);
        // Unset fields fall back to defaults.
        assert_eq!(settings.state_file, "state.bin");
    }

    #[test]
    fn load_errors_on_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".squirrel.toml"), "not valid {{toml").unwrap();

        let result = Settings::load(tmp.path());
        assert!(matches!(result, Err(SquirrelError::ConfigError(_))));
    }

    #[test]
    fn load_errors_on_unknown_order() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".squirrel.toml"), "list_order = \"notes\"\n").unwrap();

        let result = Settings::load(tmp.path());
        assert!(matches!(result, Err(SquirrelError::UnknownOrder(_))));
    }

    #[test]
    fn store_paths_builds_correct_paths() {
        let s = Settings::default();
        let project = Path::new("/home/user");
        let paths = s.store_paths(project);
        assert_eq!(paths.dir, PathBuf::from("/home/user/.squirrel"));
        assert_eq!(paths.data, PathBuf::from("/home/user/.squirrel/data.bin"));
        assert_eq!(paths.state, PathBuf::from("/home/user/.squirrel/state.bin"));
        assert_eq!(
            paths.verification,
            PathBuf::from("/home/user/.squirrel/enc.bin")
        );
    }

    #[test]
    fn entry_store_uses_configured_strategy() {
        let s = Settings {
            rewrite_strategy: RewriteStrategy::InMemory,
            ..Settings::default()
        };
        let paths = s.store_paths(Path::new("/tmp/p"));
        let store = s.entry_store(&paths);
        assert_eq!(store.strategy(), RewriteStrategy::InMemory);
        assert_eq!(store.path(), Path::new("/tmp/p/.squirrel/data.bin"));
    }
}
