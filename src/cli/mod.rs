//! CLI module for artsy-timeline.
//!
//! Subcommands:
//! - `timeline`: Print the timeline payload for an entity as JSON
//! - `markup`: Render Markdown through the link-rewriting renderer

mod markup;
mod timeline;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::models::EntityKind;

/// artsy-timeline - timelines for Artsy artists, artworks, genes and tags
#[derive(Parser)]
#[command(name = "artsy-timeline")]
#[command(about = "Timeline payloads for Artsy artists, artworks, genes and tags")]
#[command(version)]
pub struct App {
    /// Run in verbose mode
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch an entity and print its timeline payload
    Timeline {
        /// Entity type: artist, artwork, gene or tag
        kind: EntityKind,

        /// Artsy slug, e.g. andy-warhol
        slug: String,

        /// Pretty-print the JSON payload
        #[arg(long)]
        pretty: bool,
    },

    /// Render Markdown to HTML with relative links made absolute
    Markup {
        /// Input file (reads stdin when omitted)
        file: Option<PathBuf>,

        /// Base URL for rewritten links (defaults to the configured site URL)
        #[arg(long)]
        link_base: Option<String>,
    },
}

impl App {
    /// Run the CLI application.
    pub async fn run(self) -> color_eyre::Result<()> {
        match self.command {
            Command::Timeline {
                kind,
                ref slug,
                pretty,
            } => self.run_timeline(kind, slug, pretty).await,
            Command::Markup {
                ref file,
                ref link_base,
            } => self.run_markup(file.as_deref(), link_base.as_deref()),
        }
    }
}
