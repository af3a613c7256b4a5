use std::{fs, io};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use spdlog::{debug, info, warn};

use crate::content::{Author, AuthorId, Post, AUTHORS_COLLECTION, POSTS_COLLECTION};
use crate::content::content_file::{ContentFile, INDEX_FILE_NAME};
use crate::content::schema::{AuthorSet, Schema};
use crate::error::{StoreError, ValidationError};

/// Read side of the content store, the only thing the feeds need.
pub trait ContentSource: Send + Sync {
    /// Every validated post, in the store order.
    fn posts(&self) -> &[Arc<Post>];

    fn author(&self, id: &AuthorId) -> Option<Arc<Author>>;
}

/// Validated, immutable posts and authors.
pub struct ContentStore {
    posts: Vec<Arc<Post>>,
    authors: AuthorSet,
}

impl ContentSource for ContentStore {
    fn posts(&self) -> &[Arc<Post>] {
        &self.posts
    }

    fn author(&self, id: &AuthorId) -> Option<Arc<Author>> {
        self.authors.get(id).cloned()
    }
}

impl ContentStore {
    /// Loads `<content_dir>/authors` then `<content_dir>/blog`. The first invalid file aborts the load.
    pub fn load(content_dir: &Path, schema: &Schema) -> Result<ContentStore, StoreError> {
        let authors_dir = content_dir.join(AUTHORS_COLLECTION);
        let mut authors = AuthorSet::new();
        for file_path in ContentList::new(&authors_dir).retrieve_files("toml")? {
            let file = read_content(&authors_dir, file_path)?;
            let author = schema.validate_author(&file)?;
            debug!("Author: {:?}", author.id);
            if authors.contains_key(&author.id) {
                return Err(ValidationError::DuplicateId { file: file.file_path, id: author.id.0 }.into());
            }
            authors.insert(author.id.clone(), Arc::new(author));
        }

        let posts_dir = content_dir.join(POSTS_COLLECTION);
        let list = ContentList::new(&posts_dir);
        let mut post_paths = list.retrieve_files("md")?;
        post_paths.extend(list.retrieve_dirs(INDEX_FILE_NAME)?);
        post_paths.sort();

        let mut posts = Vec::with_capacity(post_paths.len());
        let mut slugs: HashMap<String, PathBuf> = HashMap::new();
        for file_path in post_paths {
            let file = read_content(&posts_dir, file_path)?;
            let post = schema.validate_post(&file, &authors)?;
            debug!("Post: {:?}", post.slug);
            if slugs.insert(post.slug.clone(), file.file_path.clone()).is_some() {
                return Err(ValidationError::DuplicateId { file: file.file_path, id: post.slug }.into());
            }
            posts.push(post);
        }

        info!("Loaded {} posts and {} authors from {}", posts.len(), authors.len(), content_dir.display());

        Ok(Self::from_validated(posts, authors))
    }

    /// Builds a store from already validated entries, applying the store order.
    pub fn from_validated(posts: Vec<Post>, authors: AuthorSet) -> ContentStore {
        let mut posts: Vec<Arc<Post>> = posts.into_iter().map(Arc::new).collect();
        sort_posts(&mut posts);
        ContentStore { posts, authors }
    }

    pub fn authors(&self) -> impl Iterator<Item = &Arc<Author>> {
        self.authors.values()
    }
}

/// Newest first, ties by slug so the order never depends on the file system.
pub fn sort_posts(posts: &mut [Arc<Post>]) {
    posts.sort_by(|a, b| {
        b.data.pub_date.cmp(&a.data.pub_date)
            .then_with(|| a.slug.cmp(&b.slug))
    });
}

fn read_content(collection_dir: &Path, file_path: PathBuf) -> Result<ContentFile, StoreError> {
    match ContentFile::from_file(collection_dir, file_path.clone()) {
        Ok(file) => Ok(file),
        Err(source) => Err(StoreError::Io { path: file_path, source }),
    }
}

struct ContentList {
    root_dir: PathBuf,
}

impl ContentList {
    fn new(root_dir: &Path) -> Self {
        ContentList { root_dir: root_dir.to_path_buf() }
    }

    /// Files directly under the collection dir with the given extension. A missing dir is an empty collection.
    fn retrieve_files(&self, extension: &str) -> Result<Vec<PathBuf>, StoreError> {
        let mut files = vec![];
        let Some(entries) = self.read_dir(&self.root_dir)? else {
            return Ok(files);
        };

        for entry in entries {
            let entry = entry.map_err(|source| self.io_error(source))?;
            let file_type = entry.file_type().map_err(|source| self.io_error(source))?;
            if !file_type.is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some(extension) {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }

    /// Per directory, we should have a file called index.md
    fn retrieve_dirs(&self, index_file: &str) -> Result<Vec<PathBuf>, StoreError> {
        let mut files = vec![];
        let Some(entries) = self.read_dir(&self.root_dir)? else {
            return Ok(files);
        };

        for entry in entries {
            let entry = entry.map_err(|source| self.io_error(source))?;
            let file_type = entry.file_type().map_err(|source| self.io_error(source))?;
            if !file_type.is_dir() {
                continue;
            }
            let index_path = entry.path().join(index_file);
            if index_path.is_file() {
                files.push(index_path);
            }
        }

        files.sort();
        Ok(files)
    }

    fn read_dir(&self, dir: &Path) -> Result<Option<fs::ReadDir>, StoreError> {
        match fs::read_dir(dir) {
            Ok(entries) => Ok(Some(entries)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!("Collection directory {} does not exist", dir.display());
                Ok(None)
            }
            Err(source) => Err(self.io_error(source)),
        }
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io { path: self.root_dir.clone(), source }
    }
}
