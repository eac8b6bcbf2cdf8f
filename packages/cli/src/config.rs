use serde::{Deserialize, Serialize};
use sitecraft_compiler::CompileOptions;
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "sitecraft.config.json";

/// Sitecraft configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Source directory containing *.site.json files
    #[serde(default = "default_src_dir")]
    pub src_dir: String,

    /// Where bundles are written
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    #[serde(default)]
    pub compiler_options: CompileOptions,
}

fn default_src_dir() -> String {
    "src".to_string()
}

fn default_out_dir() -> String {
    "dist".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Get absolute path to source directory
    pub fn get_src_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.src_dir)
    }

    pub fn get_out_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.out_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            src_dir: default_src_dir(),
            out_dir: default_out_dir(),
            compiler_options: CompileOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "srcDir": "pages",
            "outDir": "public",
            "compilerOptions": { "pretty": false, "titleSuffix": " | Acme" }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.src_dir, "pages");
        assert_eq!(config.out_dir, "public");
        assert!(!config.compiler_options.pretty);
        assert_eq!(config.compiler_options.title_suffix, " | Acme");
        assert_eq!(config.compiler_options.stylesheet, "styles.css");
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.src_dir, "src");
        assert_eq!(config.out_dir, "dist");
        assert_eq!(config.compiler_options, CompileOptions::default());
    }

    #[test]
    fn test_load_missing_config_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load(&temp_dir.path().display().to_string()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_config_from_directory() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join(DEFAULT_CONFIG_NAME),
            r#"{ "srcDir": "site" }"#,
        )
        .unwrap();

        let cwd = temp_dir.path().display().to_string();
        let config = Config::load(&cwd).unwrap();
        assert_eq!(config.src_dir, "site");
        assert_eq!(config.out_dir, "dist");
        assert_eq!(config.get_src_dir(&cwd), temp_dir.path().join("site"));
    }

    #[test]
    fn test_load_invalid_config() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join(DEFAULT_CONFIG_NAME), "{ not json").unwrap();
        assert!(Config::load(&temp_dir.path().display().to_string()).is_err());
    }
}
