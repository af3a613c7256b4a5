use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use chrono::FixedOffset;
use url::Url;

use crate::content::{Author, AuthorId, ImageRef, Post, PostData, PostId, POSTS_COLLECTION};
use crate::content::category::Category;
use crate::content::content_file::ContentFile;
use crate::content::date::{normalize, parse_offset, DateInput, DEFAULT_LOCAL_OFFSET};
use crate::content::front_matter::{RawAuthor, RawPost};
use crate::error::ValidationError;

const IMAGE_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "webp", "gif", "svg", "avif"];

pub type AuthorSet = HashMap<AuthorId, Arc<Author>>;

#[derive(Debug, Clone)]
pub struct SchemaConfig {
    /// Offset `YYYY-MM-DD HH:mm` dates are written in.
    pub local_offset: FixedOffset,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        SchemaConfig {
            local_offset: parse_offset(DEFAULT_LOCAL_OFFSET).unwrap_or(FixedOffset::east_opt(0).unwrap()),
        }
    }
}

/// Second validation stage: field constraints, date normalization and the author cross reference.
pub struct Schema {
    config: SchemaConfig,
}

impl Default for Schema {
    fn default() -> Self {
        Schema::new(SchemaConfig::default())
    }
}

impl Schema {
    pub fn new(config: SchemaConfig) -> Self {
        Schema { config }
    }

    pub fn validate_post(&self, file: &ContentFile, authors: &AuthorSet) -> Result<Post, ValidationError> {
        let (raw, body) = RawPost::from_content(file)?;
        self.check_post(file, raw, body, authors)
    }

    pub fn validate_author(&self, file: &ContentFile) -> Result<Author, ValidationError> {
        let raw = RawAuthor::from_content(file)?;
        self.check_author(file, raw)
    }

    pub fn check_post(&self, file: &ContentFile, raw: RawPost, body: &str, authors: &AuthorSet) -> Result<Post, ValidationError> {
        let path = &file.file_path;

        let slug = non_empty(path, "slug", file.slug.clone())?;
        let title = non_empty(path, "title", raw.title)?;

        let author = AuthorId(raw.author);
        if !authors.contains_key(&author) {
            return Err(ValidationError::UnknownAuthor { file: path.clone(), author: author.0 });
        }

        let pub_date = self.date(path, "pubDate", &raw.pub_date)?;
        let updated_date = match raw.updated_date {
            Some(ref date) => Some(self.date(path, "updatedDate", date)?),
            None => None,
        };

        let category = match raw.category {
            Some(value) => match Category::from_str(&value) {
                Ok(category) => Some(category),
                Err(_) => return Err(ValidationError::UnknownCategory { file: path.clone(), value }),
            },
            None => None,
        };

        let hero_image_dark = optional_image(file, "heroImageDark", raw.hero_image_dark)?;
        let hero_image_light = optional_image(file, "heroImageLight", raw.hero_image_light)?;

        Ok(Post {
            id: PostId(file.id.clone()),
            slug,
            body: body.to_string(),
            collection: POSTS_COLLECTION,
            data: PostData {
                title,
                description: raw.description,
                author,
                purpose: raw.purpose,
                pub_date,
                updated_date,
                hero_image_dark,
                hero_image_light,
                category,
                tags: raw.tags,
            },
        })
    }

    pub fn check_author(&self, file: &ContentFile, raw: RawAuthor) -> Result<Author, ValidationError> {
        let path = &file.file_path;

        Ok(Author {
            id: AuthorId(non_empty(path, "id", file.slug.clone())?),
            name: non_empty(path, "name", raw.name)?,
            title: raw.title,
            bio: non_empty(path, "bio", raw.bio)?,
            avatar: optional_image(file, "avatar", raw.avatar)?,
            website: optional_url(path, "website", raw.website)?,
            github: optional_url(path, "github", raw.github)?,
            twitter: optional_url(path, "twitter", raw.twitter)?,
            portfolio: optional_url(path, "portfolio", raw.portfolio)?,
        })
    }

    fn date(&self, path: &Path, field: &'static str, input: &DateInput) -> Result<chrono::DateTime<chrono::Utc>, ValidationError> {
        normalize(input, &self.config.local_offset).map_err(|source| ValidationError::Date {
            file: path.to_path_buf(),
            field,
            source,
        })
    }
}

fn non_empty(path: &Path, field: &'static str, value: String) -> Result<String, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField { file: path.to_path_buf(), field });
    }
    Ok(value)
}

fn optional_url(path: &Path, field: &'static str, value: Option<String>) -> Result<Option<String>, ValidationError> {
    let Some(value) = value else {
        return Ok(None);
    };

    if is_http_url(&value) {
        Ok(Some(value))
    } else {
        Err(ValidationError::InvalidUrl { file: path.to_path_buf(), field, value })
    }
}

pub fn is_http_url(value: &str) -> bool {
    match Url::parse(value) {
        Ok(url) => (url.scheme() == "http" || url.scheme() == "https") && url.has_host(),
        Err(_) => false,
    }
}

fn optional_image(file: &ContentFile, field: &'static str, value: Option<String>) -> Result<Option<ImageRef>, ValidationError> {
    let Some(value) = value else {
        return Ok(None);
    };

    let invalid = |reason: &'static str| ValidationError::InvalidImage {
        file: file.file_path.clone(),
        field,
        value: value.clone(),
        reason,
    };

    let relative = PathBuf::from(&value);
    if value.is_empty() || relative.is_absolute() {
        return Err(invalid("must be a path relative to the content file"));
    }

    let is_image = relative.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false);
    if !is_image {
        return Err(invalid("is not a supported image type"));
    }

    if !file.base_dir().join(&relative).is_file() {
        return Err(invalid("does not exist"));
    }

    Ok(Some(ImageRef(value)))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use chrono::DateTime;

    use crate::error::DateError;
    use crate::test_data::{author_set, AUTHOR_DATA, POST_DATA};

    use super::*;

    fn post_file(raw: &str) -> ContentFile {
        ContentFile::from_string(
            Path::new("blog"),
            PathBuf::from("blog/deploying-astro.md"),
            raw.to_string(),
        )
    }

    fn with_field(extra: &str) -> String {
        format!("+++\ntitle = \"t\"\ndescription = \"d\"\nauthor = \"amruth\"\npubDate = \"2024-03-01 10:00\"\n{}\n+++\nbody\n", extra)
    }

    #[test]
    fn test_validate_post() {
        let post = Schema::default().validate_post(&post_file(POST_DATA), &author_set()).unwrap();
        assert_eq!(post.id, PostId("deploying-astro.md".to_string()));
        assert_eq!(post.slug, "deploying-astro");
        assert_eq!(post.collection, "blog");
        assert_eq!(post.data.author, AuthorId("amruth".to_string()));
        assert_eq!(post.data.pub_date, DateTime::parse_from_rfc3339("2024-03-01T10:00:00+05:30").unwrap());
        assert_eq!(post.data.category, Some(Category::Deploy));
        assert_eq!(post.tags(), Some(["astro".to_string(), "vps".to_string()].as_slice()));
    }

    #[test]
    fn test_unknown_author() {
        let raw = POST_DATA.replace("author = \"amruth\"", "author = \"nobody\"");
        match Schema::default().validate_post(&post_file(&raw), &author_set()) {
            Err(ValidationError::UnknownAuthor { author, .. }) => assert_eq!(author, "nobody"),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_empty_author_set() {
        let res = Schema::default().validate_post(&post_file(POST_DATA), &AuthorSet::new());
        assert!(matches!(res, Err(ValidationError::UnknownAuthor { .. })));
    }

    #[test]
    fn test_every_category_is_accepted() {
        let schema = Schema::default();
        for category in Category::ALL {
            let raw = with_field(&format!("category = \"{}\"", category));
            let post = schema.validate_post(&post_file(&raw), &author_set()).unwrap();
            assert_eq!(post.data.category, Some(category));
        }
    }

    #[test]
    fn test_unknown_category() {
        let raw = with_field("category = \"rust\"");
        match Schema::default().validate_post(&post_file(&raw), &author_set()) {
            Err(ValidationError::UnknownCategory { value, .. }) => assert_eq!(value, "rust"),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_empty_title() {
        let raw = POST_DATA.replace("title = \"Deploying Astro on a VPS\"", "title = \"  \"");
        let res = Schema::default().validate_post(&post_file(&raw), &author_set());
        assert!(matches!(res, Err(ValidationError::EmptyField { field: "title", .. })));
    }

    #[test]
    fn test_invalid_pub_date() {
        let raw = POST_DATA.replace("2024-03-01 10:00", "2024-02-30 10:00");
        match Schema::default().validate_post(&post_file(&raw), &author_set()) {
            Err(ValidationError::Date { field, source, .. }) => {
                assert_eq!(field, "pubDate");
                assert_eq!(source, DateError::Calendar("2024-02-30 10:00".to_string()));
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_updated_date() {
        let raw = with_field("updatedDate = 2024-04-01T08:00:00Z");
        let post = Schema::default().validate_post(&post_file(&raw), &author_set()).unwrap();
        assert_eq!(post.data.updated_date.unwrap().to_rfc3339(), "2024-04-01T08:00:00+00:00");

        let raw = with_field("updatedDate = \"yesterday\"");
        let res = Schema::default().validate_post(&post_file(&raw), &author_set());
        assert!(matches!(res, Err(ValidationError::Date { field: "updatedDate", .. })));
    }

    #[test]
    fn test_configured_offset() {
        let schema = Schema::new(SchemaConfig { local_offset: FixedOffset::east_opt(0).unwrap() });
        let post = schema.validate_post(&post_file(POST_DATA), &author_set()).unwrap();
        assert_eq!(post.data.pub_date.to_rfc3339(), "2024-03-01T10:00:00+00:00");
    }

    #[test]
    fn test_missing_hero_image() {
        let raw = with_field("heroImageDark = \"./missing-hero.png\"");
        let res = Schema::default().validate_post(&post_file(&raw), &author_set());
        assert!(matches!(res, Err(ValidationError::InvalidImage { field: "heroImageDark", reason: "does not exist", .. })));

        let raw = with_field("heroImageLight = \"./notes.txt\"");
        let res = Schema::default().validate_post(&post_file(&raw), &author_set());
        assert!(matches!(res, Err(ValidationError::InvalidImage { field: "heroImageLight", .. })));
    }

    #[test]
    fn test_validate_author() {
        let file = ContentFile::from_string(Path::new("authors"), PathBuf::from("authors/amruth.toml"), AUTHOR_DATA.to_string());
        let author = Schema::default().validate_author(&file).unwrap();
        assert_eq!(author.id, AuthorId("amruth".to_string()));
        assert_eq!(author.name, "Amruth");
        assert_eq!(author.github.as_deref(), Some("https://github.com/AmruthLP12"));
        assert!(author.avatar.is_none());
    }

    #[test]
    fn test_author_invalid_url() {
        let raw = AUTHOR_DATA.replace("https://github.com/AmruthLP12", "github.com/AmruthLP12");
        let file = ContentFile::from_string(Path::new("authors"), PathBuf::from("authors/amruth.toml"), raw);
        let res = Schema::default().validate_author(&file);
        assert!(matches!(res, Err(ValidationError::InvalidUrl { field: "github", .. })));
    }

    #[test]
    fn test_author_empty_bio() {
        let file = ContentFile::from_string(Path::new("authors"), PathBuf::from("authors/x.toml"),
                                            "name = \"X\"\nbio = \"\"\n".to_string());
        let res = Schema::default().validate_author(&file);
        assert!(matches!(res, Err(ValidationError::EmptyField { field: "bio", .. })));
    }

    #[test]
    fn test_empty_slug() {
        let file = ContentFile::from_string(Path::new("blog"), PathBuf::from("blog/!!!.md"), POST_DATA.to_string());
        assert_eq!(file.slug, "");
        let res = Schema::default().validate_post(&file, &author_set());
        assert!(matches!(res, Err(ValidationError::EmptyField { field: "slug", .. })));

        let file = ContentFile::from_string(Path::new("authors"), PathBuf::from("authors/???.toml"), AUTHOR_DATA.to_string());
        let res = Schema::default().validate_author(&file);
        assert!(matches!(res, Err(ValidationError::EmptyField { field: "id", .. })));
    }

    #[test]
    fn test_is_http_url() {
        assert!(is_http_url("https://example.com"));
        assert!(is_http_url("http://localhost:4321"));
        assert!(!is_http_url("mailto:someone@example.com"));
        assert!(!is_http_url("example.com"));
        assert!(!is_http_url(""));
    }
}
