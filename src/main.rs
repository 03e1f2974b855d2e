//! CLI entry point for folio

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio::commands::sync::SyncArgs;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(
    about = "Markdown content pipeline and second-brain sync for a portfolio blog",
    long_about = None
)]
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
    /// List site content
    #[command(alias = "ls")]
    List {
        /// Type of content to list (post, tag, source)
        #[arg(default_value = "post")]
        r#type: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show one post by slug or id
    Show {
        /// Slug (or `source:id`) of the post
        slug: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Sync second-brain API posts to markdown files
    Sync {
        /// Print planned changes without writing files
        #[arg(long)]
        dry_run: bool,

        /// Remove managed files missing from the API response
        #[arg(long)]
        prune: bool,

        /// Only sync records for a specific project
        #[arg(long, value_name = "NAME")]
        project: Option<String>,

        /// API base URL
        #[arg(long, value_name = "URL", env = "SBRAIN_API_URL")]
        api_url: Option<String>,

        /// Output directory for managed markdown files
        #[arg(long, value_name = "PATH")]
        out_dir: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug { "folio=debug,info" } else { "folio=info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::List { r#type, json } => {
            let site = folio::Folio::new(&base_dir)?;
            folio::commands::list::run(&site, &r#type, json)?;
        }

        Commands::Show { slug, json } => {
            let site = folio::Folio::new(&base_dir)?;
            folio::commands::show::run(&site, &slug, json)?;
        }

        Commands::Sync {
            dry_run,
            prune,
            project,
            api_url,
            out_dir,
        } => {
            let site = folio::Folio::new(&base_dir)?;
            let args = SyncArgs {
                dry_run,
                prune,
                project,
                api_url,
                out_dir,
            };
            folio::commands::sync::run(&site, args).await?;
        }

        Commands::Version => {
            println!("folio version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_unknown_flag_is_rejected() {
        let err = Cli::try_parse_from(["folio", "sync", "--bogus"]).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
        assert!(err.to_string().contains("--bogus"));
    }

    #[test]
    fn test_help_is_not_an_error() {
        let err = Cli::try_parse_from(["folio", "sync", "--help"]).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert_eq!(err.exit_code(), 0);
    }

    #[test]
    fn test_sync_flags_parse() {
        let cli = Cli::try_parse_from([
            "folio",
            "sync",
            "--dry-run",
            "--prune",
            "--project",
            "folio",
            "--api-url",
            "http://localhost:1",
        ])
        .unwrap();
        match cli.command {
            Commands::Sync {
                dry_run,
                prune,
                project,
                api_url,
                out_dir,
            } => {
                assert!(dry_run && prune);
                assert_eq!(project.as_deref(), Some("folio"));
                assert_eq!(api_url.as_deref(), Some("http://localhost:1"));
                assert!(out_dir.is_none());
            }
            _ => panic!("expected sync command"),
        }
    }
}
