use std::sync::Arc;

use chrono::{DateTime, Utc};
use spdlog::{debug, error, warn};

use crate::content::Post;
use crate::content::schema::is_http_url;
use crate::content_store::ContentSource;
use crate::error::FeedError;
use crate::view::json_renderer::JsonCollection;
use crate::view::rss_renderer::RssChannel;

/// Channel metadata, fixed for the lifetime of the builder.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedSettings {
    pub title: String,
    pub description: String,
    /// Public base url of the site. Only the rss feed needs it.
    pub site_url: Option<String>,
}

/// `<tags><tag>a</tag><tag>b</tag></tags>`
#[derive(Debug, Clone, PartialEq)]
pub struct TagBlock(pub Vec<String>);

#[derive(Debug, Clone, PartialEq)]
pub struct FeedItem {
    pub title: String,
    pub description: String,
    pub pub_date: DateTime<Utc>,
    /// Site relative, `/blog/{slug}/`
    pub link: String,
    pub categories: Vec<String>,
    pub custom_data: Option<TagBlock>,
    /// Display name of the resolved author.
    pub author: Option<String>,
}

impl FeedItem {
    pub fn from_post(post: &Post, author: Option<String>) -> FeedItem {
        FeedItem {
            title: post.data.title.clone(),
            description: post.data.description.clone(),
            pub_date: post.data.pub_date,
            link: permalink(&post.slug),
            categories: post.data.category.iter().map(|c| c.to_string()).collect(),
            custom_data: post.tags().map(|tags| TagBlock(tags.to_vec())),
            author,
        }
    }
}

pub fn permalink(slug: &str) -> String {
    format!("/blog/{}/", slug)
}

pub struct FeedBuilder {
    settings: FeedSettings,
}

impl FeedBuilder {
    pub fn new(settings: FeedSettings) -> Self {
        FeedBuilder { settings }
    }

    /// One item per post, in the source order. Author lookups run as separate tasks
    /// and are awaited in post order.
    pub async fn build_items<S>(&self, source: Arc<S>) -> Vec<FeedItem>
        where
            S: ContentSource + 'static,
    {
        let lookups: Vec<_> = source.posts().iter()
            .map(|post| {
                let source = source.clone();
                let author_id = post.data.author.clone();
                tokio::spawn(async move {
                    source.author(&author_id).map(|author| author.name.clone())
                })
            })
            .collect();

        let mut items = Vec::with_capacity(lookups.len());
        for (post, lookup) in source.posts().iter().zip(lookups) {
            let author = match lookup.await {
                Ok(author) => author,
                Err(e) => {
                    error!("Author lookup for post {} failed: {}", post.slug, e);
                    None
                }
            };
            if author.is_none() {
                warn!("Author {} of post {} could not be resolved", post.data.author.0, post.slug);
            }
            items.push(FeedItem::from_post(post, author));
        }

        debug!("Built {} feed items", items.len());
        items
    }

    /// Site url, checked before anything is rendered.
    pub fn site_url(&self) -> Result<&str, FeedError> {
        let site_url = match self.settings.site_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => url,
            _ => return Err(FeedError::MissingSiteUrl),
        };

        if !is_http_url(site_url) {
            return Err(FeedError::InvalidSiteUrl(site_url.to_string()));
        }
        Ok(site_url)
    }

    pub fn render_rss(&self, items: &[FeedItem]) -> Result<Vec<u8>, FeedError> {
        let site_url = self.site_url()?;
        let channel = RssChannel {
            ch_title: &self.settings.title,
            ch_link: site_url,
            ch_desc: &self.settings.description,
        };
        Ok(channel.render(items)?)
    }

    /// The rss document. Fails without building items when the site url is unset.
    pub async fn rss<S>(&self, source: Arc<S>) -> Result<Vec<u8>, FeedError>
        where
            S: ContentSource + 'static,
    {
        self.site_url()?;
        let items = self.build_items(source).await;
        self.render_rss(&items)
    }

    /// The raw collection as json, no site url needed.
    pub fn json<S: ContentSource>(&self, source: &S) -> Result<Vec<u8>, FeedError> {
        let collection = JsonCollection { posts: source.posts() };
        Ok(collection.render()?)
    }
}

#[cfg(test)]
mod tests {
    use std::str;

    use crate::content::category::Category;
    use crate::content_store::ContentStore;
    use crate::test_data::{author_set, post, tagged_post};

    use super::*;

    fn settings(site_url: Option<&str>) -> FeedSettings {
        FeedSettings {
            title: "Astro Blog".to_string(),
            description: "Writing about Astro, web dev, and things I learn".to_string(),
            site_url: site_url.map(|s| s.to_string()),
        }
    }

    fn store() -> Arc<ContentStore> {
        let posts = vec![
            tagged_post("deploying-astro", "amruth", "2024-03-01T10:00:00+05:30", Category::Deploy, &["a", "b"]),
            post("hello-world", "amruth", "2024-01-01T10:00:00+05:30"),
        ];
        Arc::new(ContentStore::from_validated(posts, author_set()))
    }

    #[tokio::test]
    async fn test_build_items() {
        let builder = FeedBuilder::new(settings(None));
        let items = builder.build_items(store()).await;

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "title-of-deploying-astro");
        assert_eq!(items[0].link, "/blog/deploying-astro/");
        assert_eq!(items[0].categories, vec!["deploy".to_string()]);
        assert_eq!(items[0].custom_data, Some(TagBlock(vec!["a".to_string(), "b".to_string()])));
        assert_eq!(items[0].author.as_deref(), Some("Amruth"));

        assert_eq!(items[1].link, "/blog/hello-world/");
        assert!(items[1].categories.is_empty());
        assert!(items[1].custom_data.is_none());
    }

    #[tokio::test]
    async fn test_unresolved_author_is_absent() {
        let posts = vec![post("orphan", "nobody", "2024-01-01T10:00:00Z")];
        let store = Arc::new(ContentStore::from_validated(posts, author_set()));
        let items = FeedBuilder::new(settings(None)).build_items(store).await;
        assert_eq!(items.len(), 1);
        assert!(items[0].author.is_none());
    }

    #[test]
    fn test_empty_tags_have_no_block() {
        let mut p = post("no-tags", "amruth", "2024-01-01T10:00:00Z");
        p.data.tags = Some(vec![]);
        assert!(FeedItem::from_post(&p, None).custom_data.is_none());
    }

    #[tokio::test]
    async fn test_rss_requires_site_url() {
        for site_url in [None, Some(""), Some("   ")] {
            let builder = FeedBuilder::new(settings(site_url));
            let res = builder.rss(store()).await;
            assert!(matches!(res, Err(FeedError::MissingSiteUrl)));
            assert!(res.unwrap_err().is_config_error());
        }

        let builder = FeedBuilder::new(settings(Some("localhost:4321")));
        assert!(matches!(builder.rss(store()).await, Err(FeedError::InvalidSiteUrl(_))));
    }

    #[tokio::test]
    async fn test_rss_embeds_site_url() {
        let builder = FeedBuilder::new(settings(Some("https://example.com")));
        let xml = builder.rss(store()).await.unwrap();
        let xml = str::from_utf8(&xml).unwrap();

        assert!(xml.contains("<link>https://example.com</link>"));
        assert!(xml.contains("<link>https://example.com/blog/deploying-astro/</link>"));
        assert!(xml.contains("<tags><tag>a</tag><tag>b</tag></tags>"));
        assert!(xml.contains("<category>deploy</category>"));
        assert!(xml.contains("<author>Amruth</author>"));
        assert!(!xml.contains("<category></category>"));
        assert_eq!(xml.matches("<tags>").count(), 1);
    }

    #[test]
    fn test_json_needs_no_site_url() {
        let builder = FeedBuilder::new(settings(None));
        let store = store();
        let json = builder.json(store.as_ref()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
        let entries = value.as_array().unwrap();

        assert_eq!(entries.len(), store.posts().len());
        assert_eq!(entries[0]["slug"], "deploying-astro");
        assert_eq!(entries[1]["slug"], "hello-world");
    }
}
