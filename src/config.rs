use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::content::date::{parse_offset, DEFAULT_LOCAL_OFFSET};
use crate::content::schema::SchemaConfig;
use crate::error::ConfigError;
use crate::feed::FeedSettings;
use crate::social::SocialLink;

#[derive(Deserialize)]
pub struct Site {
    pub title: String,
    pub description: String,
    /// Public base url, e.g. `https://example.com`. The rss feed is not available without it.
    pub url: Option<String>,
}

#[derive(Deserialize)]
pub struct Paths {
    pub content_dir: PathBuf,
    pub output_dir: PathBuf,
}

#[derive(Deserialize, Default)]
pub struct Content {
    pub local_offset: Option<String>,
}

#[derive(Deserialize)]
pub struct Server {
    pub address: String,
    pub port: u16,
}

impl Default for Server {
    fn default() -> Self {
        Server {
            address: "0.0.0.0".to_string(),
            port: 4321,
        }
    }
}

#[derive(Deserialize)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone, Debug, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize)]
pub struct Config {
    pub site: Site,
    pub paths: Paths,
    #[serde(default)]
    pub content: Content,
    #[serde(default)]
    pub server: Server,
    pub log: Option<Log>,
    #[serde(default)]
    pub socials: Vec<SocialLink>,
}

impl Config {
    pub fn schema_config(&self) -> Result<SchemaConfig, ConfigError> {
        let offset = self.content.local_offset.as_deref().unwrap_or(DEFAULT_LOCAL_OFFSET);
        match parse_offset(offset) {
            Some(local_offset) => Ok(SchemaConfig { local_offset }),
            None => Err(ConfigError::InvalidOffset(offset.to_string())),
        }
    }

    pub fn feed_settings(&self) -> FeedSettings {
        FeedSettings {
            title: self.site.title.clone(),
            description: self.site.description.clone(),
            site_url: self.site.url.clone(),
        }
    }
}

fn parse_path(path: PathBuf) -> PathBuf {
    let Some(str_path) = path.to_str() else {
        return path;
    };

    if !str_path.starts_with("${exe_dir}") {
        return path;
    }

    let exe_dir = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.to_path_buf()));
    match exe_dir {
        Some(exe_dir) => PathBuf::from(str_path.replace("${exe_dir}", &exe_dir.to_string_lossy())),
        None => path,
    }
}

pub fn parse_config(cfg_content: &str, cfg_path: &Path) -> Result<Config, ConfigError> {
    let mut cfg = toml::from_str::<Config>(cfg_content).map_err(|source| ConfigError::Parse {
        path: cfg_path.to_path_buf(),
        source,
    })?;

    cfg.paths = Paths {
        content_dir: parse_path(cfg.paths.content_dir),
        output_dir: parse_path(cfg.paths.output_dir),
    };
    if let Some(ref mut log) = cfg.log {
        log.location = log.location.take().map(parse_path);
    }

    // Fail on startup rather than on the first request
    cfg.schema_config()?;
    for social in cfg.socials.iter() {
        social.validate()?;
    }

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> Result<Config, ConfigError> {
    let cfg_content = fs::read_to_string(cfg_path).map_err(|source| ConfigError::Io {
        path: cfg_path.to_path_buf(),
        source,
    })?;

    parse_config(&cfg_content, cfg_path)
}
