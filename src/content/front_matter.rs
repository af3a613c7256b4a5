use serde::Deserialize;

use crate::content::content_file::ContentFile;
use crate::content::date::DateInput;
use crate::error::ValidationError;

pub const FRONT_MATTER_DELIMITER: &str = "+++";

/// Post front matter as written, typed but not normalized.
///
/// Example of post
/// +++
/// title = "Deploying Astro"
/// description = "From a laptop to a VPS"
/// author = "amruth"
/// pubDate = "2024-03-01 10:00"
/// category = "deploy"
/// tags = ["astro", "vps"]
/// +++
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPost {
    pub title: String,
    pub description: String,
    pub author: String,
    pub purpose: Option<String>,
    pub pub_date: DateInput,
    pub updated_date: Option<DateInput>,
    pub hero_image_dark: Option<String>,
    pub hero_image_light: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Author file (`authors/<id>.toml`) as written.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawAuthor {
    pub name: String,
    pub title: Option<String>,
    pub bio: String,
    pub avatar: Option<String>,
    pub website: Option<String>,
    pub github: Option<String>,
    pub twitter: Option<String>,
    pub portfolio: Option<String>,
}

impl RawPost {
    /// Splits the file and deserializes its front matter. Returns the markdown body as well.
    pub fn from_content(file: &ContentFile) -> Result<(RawPost, &str), ValidationError> {
        let Some((front_matter, body)) = split_front_matter(&file.raw_content) else {
            return Err(ValidationError::MissingFrontMatter { file: file.file_path.clone() });
        };

        let raw = toml::from_str::<RawPost>(front_matter).map_err(|e| ValidationError::Structure {
            file: file.file_path.clone(),
            message: e.message().to_string(),
        })?;

        Ok((raw, body))
    }
}

impl RawAuthor {
    pub fn from_content(file: &ContentFile) -> Result<RawAuthor, ValidationError> {
        toml::from_str::<RawAuthor>(&file.raw_content).map_err(|e| ValidationError::Structure {
            file: file.file_path.clone(),
            message: e.message().to_string(),
        })
    }
}

/// Returns `(front_matter, body)` when the text starts with a `+++` block.
pub fn split_front_matter(raw: &str) -> Option<(&str, &str)> {
    let raw = raw.trim_start_matches('\u{feff}').trim_start();
    let rest = raw.strip_prefix(FRONT_MATTER_DELIMITER)?;
    let rest = rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FRONT_MATTER_DELIMITER {
            let front_matter = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Some((front_matter, body.trim_start_matches(|c| c == '\r' || c == '\n')));
        }
        offset += line.len();
    }

    None
}
