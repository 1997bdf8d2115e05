//! Timeline command handler.

use color_eyre::eyre::eyre;
use color_eyre::Result;

use crate::config::Config;
use crate::context::Context;
use crate::models::EntityKind;
use crate::services::{TimelineOutcome, NO_DATES_MESSAGE};

use super::App;

impl App {
    /// Fetch an entity and print its timeline payload to stdout.
    pub async fn run_timeline(&self, kind: EntityKind, slug: &str, pretty: bool) -> Result<()> {
        let config = Config::load()?;
        tracing::debug!(base_api_url = %config.artsy.base_api_url, "Loaded configuration");

        let ctx = Context::from_config(config)?;
        let service = ctx.timeline_service();

        tracing::info!(%kind, slug, "Building timeline");
        match service.render_timeline(kind, slug).await? {
            TimelineOutcome::Found(payload) => {
                let json = if pretty {
                    serde_json::to_string_pretty(&payload)?
                } else {
                    serde_json::to_string(&payload)?
                };
                println!("{}", json);
                Ok(())
            }
            TimelineOutcome::NoDates { label, .. } => {
                tracing::warn!(%kind, slug, label = label.as_deref(), "Timeline not found");
                Err(eyre!(NO_DATES_MESSAGE))
            }
        }
    }
}
