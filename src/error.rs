use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Date text that could not be turned into a timestamp.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DateError {
    #[error("date '{0}' does not match the YYYY-MM-DD HH:mm pattern")]
    Pattern(String),

    #[error("date '{0}' is not a valid calendar date and time")]
    Calendar(String),

    #[error("date '{0}' has no date part")]
    MissingDate(String),
}

/// Raised while validating a single content file. Any of these fails the whole load.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("{file}: front matter delimited by '+++' is missing")]
    MissingFrontMatter { file: PathBuf },

    #[error("{file}: {message}")]
    Structure { file: PathBuf, message: String },

    #[error("{file}: field '{field}' must not be empty")]
    EmptyField { file: PathBuf, field: &'static str },

    #[error("{file}: field '{field}': {source}")]
    Date {
        file: PathBuf,
        field: &'static str,
        #[source]
        source: DateError,
    },

    #[error("{file}: unknown category '{value}'")]
    UnknownCategory { file: PathBuf, value: String },

    #[error("{file}: field '{field}' is not a valid http(s) url: {value}")]
    InvalidUrl { file: PathBuf, field: &'static str, value: String },

    #[error("{file}: field '{field}' image '{value}' {reason}")]
    InvalidImage { file: PathBuf, field: &'static str, value: String, reason: &'static str },

    #[error("{file}: author '{author}' does not exist in the authors collection")]
    UnknownAuthor { file: PathBuf, author: String },

    #[error("{file}: identifier '{id}' is already used by another entry")]
    DuplicateId { file: PathBuf, id: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not find configuration file {0}")]
    NotFound(String),

    #[error("error opening configuration file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error parsing configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid local offset '{0}', expected +HH:MM or -HH:MM")]
    InvalidOffset(String),

    #[error("social link '{name}' has an invalid href: {href}")]
    InvalidSocialLink { name: String, href: String },
}

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("site url is not defined, check the [site] section of the configuration")]
    MissingSiteUrl,

    #[error("site url '{0}' is not a valid http(s) url")]
    InvalidSiteUrl(String),

    #[error("error writing rss document: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("error writing json document: {0}")]
    Json(#[from] serde_json::Error),
}

impl FeedError {
    /// Errors caused by the site configuration rather than by the content.
    pub fn is_config_error(&self) -> bool {
        matches!(self, FeedError::MissingSiteUrl | FeedError::InvalidSiteUrl(_))
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
