use std::fmt::Write as _;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::Utc;
use folio::config::Config;
use folio::content::{AUTHORS_COLLECTION, POSTS_COLLECTION};
use folio::content::content_file::{slugify, INDEX_FILE_NAME};
use folio::content::date::format_local_date_time;
use spdlog::warn;

use crate::PostOutput;

fn toml_string(value: &str) -> String {
    toml::Value::String(value.to_string()).to_string()
}

fn render_post(title: &str, author: &str, pub_date: &str) -> String {
    let mut buf = String::new();

    let _ = writeln!(&mut buf, "+++");
    let _ = writeln!(&mut buf, "title = {}", toml_string(title));
    let _ = writeln!(&mut buf, "description = \"Replace with a short description\"");
    let _ = writeln!(&mut buf, "author = {}", toml_string(author));
    let _ = writeln!(&mut buf, "pubDate = \"{}\"", pub_date);
    let _ = writeln!(&mut buf, "# category = \"misc\"");
    let _ = writeln!(&mut buf, "# tags = []");
    let _ = writeln!(&mut buf, "+++");
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "This is a body example");
    let _ = writeln!(&mut buf, "Please remove it and replace with your content");

    buf
}

fn write_new_file(path: &Path, content: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .with_context(|| format!("Error creating {}", path.display()))?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

pub(crate) fn new_post_cmd(config: &Config, title: &str, author: &str, output: &PostOutput) -> Result<()> {
    let slug = slugify(title);
    if slug.is_empty() {
        bail!("Title '{}' does not produce a valid slug", title);
    }

    let content_dir = &config.paths.content_dir;
    let author_file = content_dir.join(AUTHORS_COLLECTION).join(format!("{}.toml", author));
    if !author_file.is_file() {
        warn!("Author {} does not exist yet, create {} before building", author, author_file.display());
    }

    let local_offset = config.schema_config()?.local_offset;
    let pub_date = format_local_date_time(&Utc::now(), &local_offset);
    let post = render_post(title, author, &pub_date);

    let posts_dir = content_dir.join(POSTS_COLLECTION);
    match output {
        PostOutput::Stdout => print!("{}", post),
        PostOutput::File => {
            fs::create_dir_all(&posts_dir)?;
            let path = posts_dir.join(format!("{}.md", slug));
            write_new_file(&path, &post)?;
            println!("Created {}", path.display());
        }
        PostOutput::Dir => {
            let dir: PathBuf = posts_dir.join(&slug);
            fs::create_dir_all(&dir)?;
            let path = dir.join(INDEX_FILE_NAME);
            write_new_file(&path, &post)?;
            println!("Created {}", path.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use folio::content::content_file::ContentFile;
    use folio::content::front_matter::RawPost;
    use folio::content::date::DateInput;

    use super::*;

    #[test]
    fn test_rendered_post_parses() {
        let post = render_post("Say \"hi\" to Astro", "amruth", "2024-02-27 06:20");
        let file = ContentFile::from_string(Path::new("blog"), PathBuf::from("blog/say-hi-to-astro.md"), post);
        let (raw, body) = RawPost::from_content(&file).unwrap();

        assert_eq!(raw.title, "Say \"hi\" to Astro");
        assert_eq!(raw.author, "amruth");
        assert_eq!(raw.pub_date, DateInput::Text("2024-02-27 06:20".to_string()));
        assert!(raw.category.is_none());
        assert!(body.starts_with("This is a body example"));
    }

    #[test]
    fn test_slug_from_title() {
        assert_eq!(slugify("Post title of mine Ábaco - dir2"), "post-title-of-mine-abaco-dir2");
    }
}
