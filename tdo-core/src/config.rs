use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::Deserialize;
use std::{fs, path::PathBuf};

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the CSV file holding the todo list. Defaults to `todo.csv`
    /// in the working directory.
    pub todo_file: PathBuf,
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    todo_file: Option<PathBuf>,
}

impl Config {
    /// Public entrypoint: load config from disk (first XDG path, then
    /// native) and apply defaults. A missing or unreadable config file
    /// falls back to defaults.
    pub fn load() -> Result<Self> {
        let file_config = Self::read_file_config().unwrap_or(FileConfig { todo_file: None });
        let todo_file = file_config.todo_file.unwrap_or_else(Self::default_todo_file);
        Ok(Self { todo_file })
    }

    /// The stored file keeps a fixed name in the working directory unless
    /// the config file says otherwise.
    fn default_todo_file() -> PathBuf {
        PathBuf::from("todo.csv")
    }

    fn config_file_paths() -> Vec<PathBuf> {
        let mut v = Vec::new();
        if let Some(b) = BaseDirs::new() {
            let xdg = b.home_dir().join(".config").join("tdo").join("config.toml");
            v.push(xdg);
            let native = b.config_dir().join("tdo").join("config.toml");
            v.push(native);
        }
        v
    }

    /// Read the first existing config file and parse it.
    fn read_file_config() -> Result<FileConfig> {
        for path in Self::config_file_paths() {
            if !path.exists() {
                continue;
            }
            let s =
                fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
            return Self::parse_file(&s).with_context(|| format!("parsing {}", path.display()));
        }
        Ok(FileConfig { todo_file: None })
    }

    /// Parse a TOML string into `FileConfig`.
    fn parse_file(s: &str) -> Result<FileConfig> {
        Ok(toml::from_str::<FileConfig>(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn candidates_prioritize_xdg_then_native() {
        if let Some(b) = BaseDirs::new() {
            let expected_xdg = b.home_dir().join(".config").join("tdo").join("config.toml");
            let expected_native = b.config_dir().join("tdo").join("config.toml");
            let c = Config::config_file_paths();
            assert_eq!(c.first(), Some(&expected_xdg));
            assert_eq!(c.get(1), Some(&expected_native));
        }
    }

    #[test]
    fn parse_file_accepts_todo_file() {
        let toml = r#"
            todo_file = "/tmp/my-todos.csv"
        "#;
        let fc = Config::parse_file(toml).unwrap();
        assert_eq!(fc.todo_file.as_deref(), Some(Path::new("/tmp/my-todos.csv")));
    }

    #[test]
    fn parse_file_defaults_when_absent() {
        let fc = Config::parse_file("").unwrap();
        assert!(fc.todo_file.is_none());
        assert_eq!(Config::default_todo_file(), PathBuf::from("todo.csv"));
    }

    #[test]
    fn parse_file_rejects_invalid_toml() {
        assert!(Config::parse_file("todo_file = ").is_err());
    }
}
