use std::sync::Arc;

use crate::content::Post;

/// The posts collection as a json array of `{id, slug, body, collection, data}` entries.
pub struct JsonCollection<'a> {
    pub posts: &'a [Arc<Post>],
}

impl<'a> JsonCollection<'a> {
    pub fn render(&self) -> serde_json::Result<Vec<u8>> {
        let posts: Vec<&Post> = self.posts.iter().map(|p| p.as_ref()).collect();
        serde_json::to_vec(&posts)
    }
}
