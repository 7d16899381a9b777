//! Folio CLI - check, list and index blog posts.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Check, list and index MDX blog posts")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to blog.toml config file
    #[arg(short, long, default_value = "blog.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a blog.toml and a sample post
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },

    /// Validate the frontmatter of every post
    Check,

    /// List published posts, newest first
    List {
        /// Only show posts carrying this tag (repeat for AND)
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Page to show (1-based)
        #[arg(short, long, default_value = "1")]
        page: usize,
    },

    /// List tags with their post counts
    Tags,

    /// Print the table of contents of a post
    Toc {
        /// Post file
        file: PathBuf,
    },

    /// Print the parse result of a post as JSON
    Show {
        /// Post file
        file: PathBuf,
    },

    /// Write a JSON index of published posts
    Export {
        /// Output file (defaults to config or "dist/posts.json")
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(yes).await?;
        }
        Commands::Check => {
            commands::check::run(&cli.config).await?;
        }
        Commands::List { tags, page } => {
            commands::list::run(&cli.config, &tags, page).await?;
        }
        Commands::Tags => {
            commands::tags::run(&cli.config).await?;
        }
        Commands::Toc { file } => {
            commands::toc::run(&file)?;
        }
        Commands::Show { file } => {
            commands::show::run(&file)?;
        }
        Commands::Export { output } => {
            commands::export::run(&cli.config, output).await?;
        }
    }

    Ok(())
}
