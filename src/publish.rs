use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use spdlog::{error, info, warn};

use crate::content_store::ContentStore;
use crate::error::FeedError;
use crate::feed::FeedBuilder;

pub const RSS_FILE_NAME: &str = "rss.xml";
pub const JSON_FILE_NAME: &str = "feed.json";

/// What `publish_feeds` wrote. A failing rss feed does not stop the json one.
pub struct PublishReport {
    pub json_path: PathBuf,
    pub rss: Result<PathBuf, FeedError>,
}

pub async fn publish_feeds(feed: &FeedBuilder, store: Arc<ContentStore>, out_dir: &Path) -> Result<PublishReport> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Error creating output directory {}", out_dir.display()))?;

    let json = feed.json(store.as_ref())?;
    let json_path = out_dir.join(JSON_FILE_NAME);
    fs::write(&json_path, json)
        .with_context(|| format!("Error writing {}", json_path.display()))?;
    info!("Wrote {}", json_path.display());

    let rss = match feed.rss(store).await {
        Ok(xml) => {
            let rss_path = out_dir.join(RSS_FILE_NAME);
            fs::write(&rss_path, xml)
                .with_context(|| format!("Error writing {}", rss_path.display()))?;
            info!("Wrote {}", rss_path.display());
            Ok(rss_path)
        }
        Err(e) if e.is_config_error() => {
            warn!("Skipping {}, the site is not configured for it: {}", RSS_FILE_NAME, e);
            Err(e)
        }
        Err(e) => {
            error!("Error rendering {}: {}", RSS_FILE_NAME, e);
            Err(e)
        }
    };

    Ok(PublishReport { json_path, rss })
}
