//! Config command implementation.
//!
//! View and manage configuration settings.
//! Config file is located at ~/.config/rf/config.toml.

use std::env;
use std::fs;
use std::path::PathBuf;

use directories::BaseDirs;
use serde::{Deserialize, Serialize};

use super::{CommandContext, CommandError, Result};

/// Current config file version. Increment when making breaking changes to schema.
const CONFIG_VERSION: u32 = 1;

/// Delimiter used when neither the command line nor the config sets one.
pub const DEFAULT_DELIMITER: char = '\t';

/// Default config file contents.
const DEFAULT_CONFIG: &str = r#"# rf - row filter configuration

# Config schema version (do not modify)
version = 1

# Cell delimiter: a single character, or "tab", "comma", "pipe",
# "semicolon", "space"
# delimiter = "tab"

# Treat the first line of a table as the header
# header = true

# Output preferences
[output]
# color = true        # Enable colors
# show_count = true   # Print "N of M rows matched" on stderr
"#;

/// Configuration file structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Config schema version for migrations.
    /// Defaults to current version when not present in file.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Cell delimiter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<String>,

    /// Whether tables start with a header line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<bool>,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Returns the current config version (used by serde default).
fn default_version() -> u32 {
    CONFIG_VERSION
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            delimiter: None,
            header: None,
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Returns the configured delimiter, or the default.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Config`] if the configured value is not a
    /// valid delimiter.
    pub fn delimiter(&self) -> Result<char> {
        self.delimiter
            .as_deref()
            .map_or(Ok(DEFAULT_DELIMITER), parse_delimiter)
    }

    /// Returns whether tables start with a header line.
    pub fn header(&self) -> bool {
        self.header.unwrap_or(true)
    }
}

/// Output configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Enable colors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,

    /// Print the matched row count after filtering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_count: Option<bool>,
}

/// Gets the config directory path.
/// Uses XDG-style paths: ~/.config/rf/ on all platforms.
fn get_config_dir() -> Result<PathBuf> {
    if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg_config).join("rf"));
    }

    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".config").join("rf"))
        .ok_or_else(|| CommandError::Config("Could not determine config directory".to_string()))
}

/// Gets the config file path.
pub fn get_config_path() -> Result<PathBuf> {
    if let Ok(path) = env::var("RF_CONFIG") {
        return Ok(PathBuf::from(path));
    }

    let config_dir = get_config_dir()?;
    Ok(config_dir.join("config.toml"))
}

/// Loads the configuration from disk.
///
/// A missing file yields the default configuration.
pub fn load_config() -> Result<Config> {
    let path = get_config_path()?;

    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path)
        .map_err(|e| CommandError::Config(format!("Failed to read config: {}", e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| CommandError::Config(format!("Failed to parse config: {}", e)))?;

    tracing::debug!(path = %path.display(), "loaded config");
    migrate_config(config)
}

/// Migrates config to current version if needed.
/// Returns the config as-is if already at current version.
fn migrate_config(mut config: Config) -> Result<Config> {
    // Version 1 is the initial schema. Later versions add their upgrade
    // steps here, oldest first.
    config.version = CONFIG_VERSION;
    Ok(config)
}

/// Parses a delimiter name or single character.
pub fn parse_delimiter(s: &str) -> Result<char> {
    match s.to_lowercase().as_str() {
        "tab" | "\\t" => return Ok('\t'),
        "comma" => return Ok(','),
        "pipe" => return Ok('|'),
        "semicolon" => return Ok(';'),
        "space" => return Ok(' '),
        _ => {}
    }

    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c != '\n' && c != '\r' => Ok(c),
        _ => Err(CommandError::Config(format!(
            "Invalid delimiter '{}'. Use a single character or one of: tab, comma, pipe, semicolon, space",
            s.escape_default()
        ))),
    }
}

/// Executes the config show command.
pub fn execute_show(ctx: &CommandContext) -> Result<()> {
    let config = load_config()?;
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
            "config": config,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        use owo_colors::OwoColorize;

        let header = "Configuration";
        if ctx.use_colors {
            println!("{}\n", header.green().bold());
        } else {
            println!("{}\n", header);
        }

        println!("File: {}", path.display());
        println!("Exists: {}\n", path.exists());

        println!("Settings:");
        println!("  delimiter: {}", config.delimiter()?.escape_default());
        println!("  header: {}", config.header());

        println!("\n[output]");
        println!("  color: {}", config.output.color.unwrap_or(true));
        println!("  show_count: {}", config.output.show_count.unwrap_or(true));

        if !path.exists() {
            println!("\n(No config file exists. Run 'rf config init' to create one.)");
        }
    }

    Ok(())
}

/// Executes the config path command.
pub fn execute_path(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", path.display());
    }

    Ok(())
}

/// Executes the config init command.
pub fn execute_init(ctx: &CommandContext, force: bool) -> Result<()> {
    let path = get_config_path()?;

    if path.exists() && !force {
        return Err(CommandError::Config(format!(
            "Config file already exists at {}. Use --force to overwrite",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| CommandError::Config(format!("Failed to create config directory: {}", e)))?;
    }

    fs::write(&path, DEFAULT_CONFIG)
        .map_err(|e| CommandError::Config(format!("Failed to write config: {}", e)))?;

    if ctx.json_output {
        let output = serde_json::json!({
            "status": "success",
            "path": path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        println!("Created config at: {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn quiet_context() -> CommandContext {
        CommandContext {
            json_output: false,
            use_colors: false,
            quiet: true,
            verbose: false,
            trace_parser: false,
        }
    }

    /// Runs `f` with `RF_CONFIG` pointing at `path`, restoring it after.
    fn with_config_env<T>(path: &std::path::Path, f: impl FnOnce() -> T) -> T {
        let original = env::var("RF_CONFIG").ok();
        env::set_var("RF_CONFIG", path);
        let result = f();
        match original {
            Some(val) => env::set_var("RF_CONFIG", val),
            None => env::remove_var("RF_CONFIG"),
        }
        result
    }

    #[test]
    fn test_parse_delimiter_names() {
        assert_eq!(parse_delimiter("tab").unwrap(), '\t');
        assert_eq!(parse_delimiter("TAB").unwrap(), '\t');
        assert_eq!(parse_delimiter("\\t").unwrap(), '\t');
        assert_eq!(parse_delimiter("comma").unwrap(), ',');
        assert_eq!(parse_delimiter("pipe").unwrap(), '|');
        assert_eq!(parse_delimiter("semicolon").unwrap(), ';');
        assert_eq!(parse_delimiter("space").unwrap(), ' ');
    }

    #[test]
    fn test_parse_delimiter_single_char() {
        assert_eq!(parse_delimiter(",").unwrap(), ',');
        assert_eq!(parse_delimiter("\t").unwrap(), '\t');
        assert_eq!(parse_delimiter("│").unwrap(), '│');
    }

    #[test]
    fn test_parse_delimiter_invalid() {
        assert!(parse_delimiter("").is_err());
        assert!(parse_delimiter(",,").is_err());
        assert!(parse_delimiter("\n").is_err());
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(config.delimiter().unwrap(), DEFAULT_DELIMITER);
        assert!(config.header());
        assert!(config.output.color.is_none());
        assert!(config.output.show_count.is_none());
    }

    #[test]
    fn test_default_config_file_parses() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config {
            version: CONFIG_VERSION,
            delimiter: Some("comma".to_string()),
            header: Some(false),
            output: OutputConfig {
                color: Some(true),
                show_count: None,
            },
        };

        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("version = 1"));
        assert!(toml_str.contains(r#"delimiter = "comma""#));
        assert!(toml_str.contains("header = false"));
        assert!(toml_str.contains("[output]"));
        assert!(toml_str.contains("color = true"));
        assert!(!toml_str.contains("show_count"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
version = 1
delimiter = "|"
header = false

[output]
color = false
show_count = false
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.delimiter().unwrap(), '|');
        assert!(!config.header());
        assert_eq!(config.output.color, Some(false));
        assert_eq!(config.output.show_count, Some(false));
    }

    #[test]
    fn test_config_invalid_delimiter() {
        let config: Config = toml::from_str(r#"delimiter = "ab""#).unwrap();
        assert!(matches!(config.delimiter(), Err(CommandError::Config(_))));
    }

    #[test]
    fn test_migrate_config_preserves_data() {
        let config = Config {
            version: 1,
            delimiter: Some(",".to_string()),
            header: Some(true),
            output: OutputConfig {
                color: Some(false),
                show_count: Some(true),
            },
        };

        let migrated = migrate_config(config.clone()).unwrap();
        assert_eq!(migrated, config);
    }

    #[test]
    #[serial]
    fn test_config_path_precedence() {
        let temp_dir = TempDir::new().unwrap();
        let explicit = temp_dir.path().join("custom.toml");
        let saved_config = env::var("RF_CONFIG").ok();
        let saved_xdg = env::var("XDG_CONFIG_HOME").ok();

        env::set_var("XDG_CONFIG_HOME", temp_dir.path());
        env::set_var("RF_CONFIG", &explicit);
        let from_env = get_config_path().unwrap();
        env::remove_var("RF_CONFIG");
        let from_xdg = get_config_path().unwrap();

        match saved_config {
            Some(val) => env::set_var("RF_CONFIG", val),
            None => env::remove_var("RF_CONFIG"),
        }
        match saved_xdg {
            Some(val) => env::set_var("XDG_CONFIG_HOME", val),
            None => env::remove_var("XDG_CONFIG_HOME"),
        }

        assert_eq!(from_env, explicit);
        assert_eq!(from_xdg, temp_dir.path().join("rf").join("config.toml"));
    }

    #[test]
    #[serial]
    fn test_load_config_missing_file_is_default() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nope").join("config.toml");
        let config = with_config_env(&path, load_config).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    #[serial]
    fn test_load_config_from_env_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "delimiter = \"comma\"\n[output]\ncolor = false\n").unwrap();

        let config = with_config_env(&path, load_config).unwrap();
        assert_eq!(config.delimiter().unwrap(), ',');
        assert_eq!(config.output.color, Some(false));
    }

    #[test]
    #[serial]
    fn test_load_config_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "header = maybe").unwrap();

        let result = with_config_env(&path, load_config);
        assert!(matches!(result, Err(CommandError::Config(_))));
    }

    #[test]
    #[serial]
    fn test_init_writes_default_and_refuses_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rf").join("config.toml");
        let ctx = quiet_context();

        with_config_env(&path, || execute_init(&ctx, false)).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);

        let again = with_config_env(&path, || execute_init(&ctx, false));
        assert!(matches!(again, Err(CommandError::Config(_))));

        with_config_env(&path, || execute_init(&ctx, true)).unwrap();
    }
}
