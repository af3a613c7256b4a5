use std::{fs, io};
use std::path::{Component, Path, PathBuf};

/// Directory posts use to keep their images next to the text.
pub const INDEX_FILE_NAME: &str = "index.md";

/// A file of the content store, read but not validated yet.
pub struct ContentFile {
    /// Path relative to the collection directory, with `/` separators.
    pub id: String,
    pub slug: String,
    pub file_path: PathBuf,
    pub raw_content: String,
}

impl ContentFile {
    pub fn from_file(collection_dir: &Path, file_path: PathBuf) -> io::Result<ContentFile> {
        let raw_content = fs::read_to_string(&file_path)?;
        Ok(Self::from_string(collection_dir, file_path, raw_content))
    }

    pub fn from_string(collection_dir: &Path, file_path: PathBuf, raw_content: String) -> ContentFile {
        let relative = file_path.strip_prefix(collection_dir).unwrap_or(&file_path);
        let id = relative_id(relative);
        let slug = slug_from_path(relative);

        ContentFile {
            id,
            slug,
            file_path,
            raw_content,
        }
    }

    /// Directory relative image references are resolved against.
    pub fn base_dir(&self) -> &Path {
        self.file_path.parent().unwrap_or(Path::new("."))
    }
}

fn relative_id(relative: &Path) -> String {
    relative.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().to_string()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// `2024/My First Post.md` -> `2024/my-first-post`, `my-post/index.md` -> `my-post`.
pub fn slug_from_path(relative: &Path) -> String {
    let mut segments: Vec<String> = relative.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().to_string()),
            _ => None,
        })
        .collect();

    if let Some(last) = segments.pop() {
        let stem = match last.rfind('.') {
            Some(pos) if pos > 0 => last[..pos].to_string(),
            _ => last,
        };
        if stem != "index" || segments.is_empty() {
            segments.push(stem);
        }
    }

    segments.iter()
        .map(|segment| slugify(segment))
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

pub fn slugify(text: &str) -> String {
    let ascii = unidecode::unidecode(text);
    let chars: String = ascii.chars()
        .filter(|&c| c.is_ascii_alphanumeric() || c == ' ' || c == '-' || c == '_')
        .map(|c| if c == ' ' { '-' } else { c.to_ascii_lowercase() })
        .collect();

    let mut slug = String::new();
    let mut prev_char = None;

    for c in chars.chars() {
        if c != '-' || prev_char != Some('-') {
            slug.push(c);
        }
        prev_char = Some(c);
    }

    slug.trim_matches('-').to_string()
}
