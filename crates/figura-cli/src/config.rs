//! Configuration discovery for the CLI.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use figura::{FiguraError, config::AppConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for FiguraError {
    fn from(err: ConfigError) -> Self {
        FiguraError::Config(err.to_string())
    }
}

/// Loads the first configuration found, in this order: `explicit_path`,
/// `figura/config.toml` in the working directory, `config.toml` in the
/// platform configuration directory. Falls back to the defaults.
///
/// # Errors
///
/// Returns [`FiguraError::Config`] if `explicit_path` does not exist, or if
/// the file found cannot be parsed or holds invalid values.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, FiguraError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path:% = path.display(); "Loading explicit configuration");
        return load_config_file(path);
    }

    let local_config = Path::new("figura/config.toml");
    if local_config.exists() {
        info!(path:% = local_config.display(); "Loading local configuration");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("org", "figura", "figura") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path:% = system_config.display(); "Loading user configuration");
            return load_config_file(system_config);
        }

        debug!(path:% = system_config.display(); "No user configuration");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("Using default configuration");
    Ok(AppConfig::default())
}

/// Load and validate configuration from a TOML file
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, FiguraError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn config_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_explicit_config() {
        let file = config_file("[protocol]\nunit_height = 30.0\n");
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.protocol().unit_height(), 30.0);
    }

    #[test]
    fn test_missing_explicit_config() {
        let err = load_config(Some("/definitely/not/here/figura.toml")).unwrap_err();
        assert!(matches!(err, FiguraError::Config(_)));
        assert!(err.to_string().contains("Missing configuration file"));
    }

    #[test]
    fn test_malformed_config() {
        let file = config_file("[style\nstroke_width = ");
        let err = load_config(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("Failed to parse TOML"), "{err}");
    }

    #[test]
    fn test_invalid_values_rejected() {
        let file = config_file("[style]\nstroke_width = -1.0\n");
        assert!(matches!(
            load_config(Some(file.path())),
            Err(FiguraError::Config(_))
        ));
    }
}
