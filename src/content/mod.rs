use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use serde::ser::SerializeStruct;

use crate::content::category::Category;

pub mod category;
pub mod content_file;
pub mod date;
pub mod front_matter;
pub mod schema;

pub const POSTS_COLLECTION: &str = "blog";
pub const AUTHORS_COLLECTION: &str = "authors";

/// Path of the post file relative to the posts collection, e.g. `first-post.md`.
#[derive(Debug, Clone, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PostId(pub String);

#[derive(Debug, Clone, Eq, Hash, PartialEq, Ord, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct AuthorId(pub String);

/// Image path as written in the front matter, relative to the content file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ImageRef(pub String);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    pub id: PostId,
    pub slug: String,
    pub body: String,
    pub collection: &'static str,
    pub data: PostData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostData {
    pub title: String,
    pub description: String,
    #[serde(serialize_with = "author_reference")]
    pub author: AuthorId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    pub pub_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_image_dark: Option<ImageRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_image_light: Option<ImageRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Author {
    pub id: AuthorId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub bio: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<ImageRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio: Option<String>,
}

/// Writes the author as `{"id": "...", "collection": "authors"}`, never as an inline copy.
fn author_reference<S>(author: &AuthorId, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
{
    let mut reference = serializer.serialize_struct("AuthorReference", 2)?;
    reference.serialize_field("id", &author.0)?;
    reference.serialize_field("collection", AUTHORS_COLLECTION)?;
    reference.end()
}

impl Post {
    /// Declared tags, `None` when the post has none.
    pub fn tags(&self) -> Option<&[String]> {
        match self.data.tags {
            Some(ref tags) if !tags.is_empty() => Some(tags.as_slice()),
            _ => None,
        }
    }
}
