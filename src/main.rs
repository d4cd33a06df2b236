//! CLI entry point for postmatter

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use postmatter::commands::{self, new::NewPostOptions, render::Output};

#[derive(Parser)]
#[command(name = "postmatter")]
#[command(version)]
#[command(about = "Load and check front-matter Markdown blog posts", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new post collection
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Tag for the post (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Post author
        #[arg(short, long)]
        author: Option<String>,

        /// Mark the post as unpublished
        #[arg(long)]
        draft: bool,

        /// File name for the new post, without extension
        #[arg(short, long)]
        path: Option<String>,
    },

    /// List collection information
    List {
        /// Type of content to list (post, tag)
        #[arg(default_value = "post")]
        r#type: String,

        /// Only list posts carrying this tag
        #[arg(long)]
        tag: Option<String>,
    },

    /// Validate every post
    Check,

    /// Render a post as an HTML preview
    Render {
        /// Post file, or the slug of a post in the collection
        target: String,

        /// Print metadata as JSON instead of HTML
        #[arg(long)]
        json: bool,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "postmatter=debug,info"
    } else {
        "postmatter=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Cannot determine current directory")?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing collection in {:?}", target_dir);
            commands::init::init_site(&target_dir)?;
            println!("Initialized post collection in {:?}", target_dir);
        }

        Commands::New {
            title,
            tags,
            author,
            draft,
            path,
        } => {
            let blog = postmatter::Blog::new(&base_dir)?;
            let options = NewPostOptions {
                tags,
                author,
                draft,
                path,
            };
            let file = blog.new_post(&title, &options)?;
            println!("Created: {:?}", file);
        }

        Commands::List { r#type, tag } => {
            let blog = postmatter::Blog::new(&base_dir)?;
            commands::list::run(&blog, &r#type, tag.as_deref())?;
        }

        Commands::Check => {
            let blog = postmatter::Blog::new(&base_dir)?;
            commands::check::run(&blog)?;
        }

        Commands::Render {
            target,
            json,
            output,
        } => {
            let blog = postmatter::Blog::new(&base_dir)?;
            let format = if json { Output::Json } else { Output::Html };
            commands::render::run(&blog, &target, format, output.as_deref())?;
        }

        Commands::Version => {
            println!("postmatter version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
