use std::fs;
use std::io;
use std::path::Path;

const CONFIG_SAMPLE: &str = r#"[site]
title = "Astro Blog"
description = "Writing about Astro, web dev, and things I learn"
# Required by /rss.xml, the json feed works without it
url = "http://localhost:4321"

# For the file locations, If you want it to be relative to the executable directory
# use ${exe_dir}/location
[paths]
content_dir = "src/content"
output_dir = "dist"

# Offset of the "YYYY-MM-DD HH:mm" dates in the posts
[content]
local_offset = "+05:30"

[server]
address = "0.0.0.0"
port = 4321

[log]
level = "Info"
log_to_console = true
# location = "logs/folio.log"

[[socials]]
name = "GitHub"
href = "https://github.com/your-user"
aria = "GitHub"
icon = "github"

[[socials]]
name = "Email"
href = "mailto:you@example.com"
aria = "Email"
icon = "mail"
"#;

pub(crate) fn write_sample_cfg(file_path: &Path) -> io::Result<()> {
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(file_path, CONFIG_SAMPLE)
}
