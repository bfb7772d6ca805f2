use std::path::PathBuf;
use rocket::figment::Figment;
use serde::Deserialize;
use tracing::info;

/// File locations and CORS origin, read from `Rocket.toml` or `ROCKET_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_config_file")]
    pub config_file: PathBuf,
    #[serde(default = "default_logins_file")]
    pub logins_file: PathBuf,
    #[serde(default = "default_votes_file")]
    pub votes_file: PathBuf,
    #[serde(default = "default_archive_dir")]
    pub archive_dir: PathBuf,
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
    /// Origin allowed to call the API cross-site, e.g. a `trunk serve` dev server.
    #[serde(default)]
    pub cors_origin: Option<String>,
}

fn default_config_file() -> PathBuf { "config.json".into() }
fn default_logins_file() -> PathBuf { "logins.json".into() }
fn default_votes_file() -> PathBuf { "votes.csv".into() }
fn default_archive_dir() -> PathBuf { "archive".into() }
fn default_static_dir() -> PathBuf { "static".into() }

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_file: default_config_file(),
            logins_file: default_logins_file(),
            votes_file: default_votes_file(),
            archive_dir: default_archive_dir(),
            static_dir: default_static_dir(),
            cors_origin: None,
        }
    }
}

impl AppConfig {
    pub fn from_figment(figment: &Figment) -> Result<Self, rocket::figment::Error> {
        let config: AppConfig = figment.extract()?;
        info!(
            "📁 config={} logins={} votes={} archive={} static={}",
            config.config_file.display(),
            config.logins_file.display(),
            config.votes_file.display(),
            config.archive_dir.display(),
            config.static_dir.display(),
        );
        Ok(config)
    }

    /// Same layout rooted at `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            config_file: dir.join("config.json"),
            logins_file: dir.join("logins.json"),
            votes_file: dir.join("votes.csv"),
            archive_dir: dir.join("archive"),
            static_dir: dir.join("static"),
            cors_origin: None,
        }
    }
}
