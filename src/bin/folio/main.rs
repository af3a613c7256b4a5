use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::{Parser, ValueEnum};
use folio::config::Config;
use folio::content::schema::Schema;
use folio::content_store::{ContentSource, ContentStore};
use folio::feed::FeedBuilder;
use folio::logger::configure_logger;
use folio::publish::publish_feeds;
use folio::server::server_run;

use crate::config::{generate_cfg, open_config};
use crate::post::new_post_cmd;

mod config;
mod config_data;
mod post;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
enum Args {
    /// Validate the content and serve the feeds
    Serve(ConfigArgs),
    /// Validate the content and write rss.xml and feed.json
    Build(BuildArgs),
    /// Validate the content only
    Check(ConfigArgs),
    /// Write a sample configuration
    Init(ConfigArgs),
    /// Create a new post
    New(NewPostArgs),
}

#[derive(Parser, Debug)]
struct ConfigArgs {
    /// Configuration file. Defaults to folio.toml next to the executable, in the current dir or in the user config dir
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct BuildArgs {
    #[command(flatten)]
    cfg: ConfigArgs,

    /// Output directory, overrides paths.output_dir
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct NewPostArgs {
    #[command(flatten)]
    cfg: ConfigArgs,

    /// Title of the post
    #[arg(short, long)]
    title: String,

    /// Author identifier, the file name of an entry in the authors collection
    #[arg(short, long)]
    author: String,

    /// Post generation options
    #[arg(short, long, default_value_t = PostOutput::Stdout)]
    output: PostOutput,
}

#[derive(Clone, Debug, ValueEnum)]
enum PostOutput {
    /// Writes the new post content to the stdout
    Stdout,
    /// Writes the new post to <slug>.md in the posts collection
    File,
    /// Writes the new post to <slug>/index.md in the posts collection (posts with images)
    Dir,
}

impl Display for PostOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PostOutput::Stdout => write!(f, "stdout"),
            PostOutput::File => write!(f, "file"),
            PostOutput::Dir => write!(f, "dir"),
        }
    }
}

fn load_store(config: &Config) -> Result<ContentStore> {
    let schema = Schema::new(config.schema_config()?);
    let store = ContentStore::load(&config.paths.content_dir, &schema)?;
    Ok(store)
}

fn setup(args: &ConfigArgs) -> Result<Config> {
    let config = open_config(args.config.clone())?;
    configure_logger(&config)?;
    Ok(config)
}

async fn run(args: Args) -> Result<()> {
    match args {
        Args::Serve(args) => {
            let config = setup(&args)?;
            let store = load_store(&config)?;
            server_run(config, store).await?;
        }
        Args::Build(args) => {
            let config = setup(&args.cfg)?;
            let store = Arc::new(load_store(&config)?);
            let feed = FeedBuilder::new(config.feed_settings());
            let out_dir = args.out.unwrap_or(config.paths.output_dir.clone());

            let report = publish_feeds(&feed, store, &out_dir).await?;
            println!("Wrote {}", report.json_path.display());
            match report.rss {
                Ok(rss_path) => println!("Wrote {}", rss_path.display()),
                Err(e) if e.is_config_error() => {
                    return Err(anyhow!(e).context("rss feed was not written, set [site] url in the configuration"));
                }
                Err(e) => return Err(anyhow!(e).context("rss feed was not written")),
            }
        }
        Args::Check(args) => {
            let config = setup(&args)?;
            let store = load_store(&config)?;
            println!("{} posts and {} authors are valid", store.posts().len(), store.authors().count());
        }
        Args::Init(args) => {
            let path = generate_cfg(&args.config)?;
            println!("Sample configuration written to {}", path.display());
        }
        Args::New(args) => {
            let config = setup(&args.cfg)?;
            new_post_cmd(&config, &args.title, &args.author, &args.output)?;
        }
    }
    Ok(())
}

#[ntex::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        for cause in e.chain().skip(1) {
            eprintln!("Caused by: {}", cause);
        }
        std::process::exit(1);
    }
}
