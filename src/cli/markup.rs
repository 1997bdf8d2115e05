//! Markup command handler.

use std::io::Read;
use std::path::Path;

use color_eyre::Result;

use crate::config::Config;
use crate::markup::MarkdownRenderer;

use super::App;

impl App {
    /// Render Markdown from a file or stdin and print the HTML.
    pub fn run_markup(&self, file: Option<&Path>, link_base: Option<&str>) -> Result<()> {
        let text = match file {
            Some(path) => std::fs::read_to_string(path)?,
            None => {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            }
        };

        let link_base = match link_base {
            Some(base) => base.to_string(),
            None => Config::load()?.artsy.base_url,
        };

        print!("{}", MarkdownRenderer::new().render_with_links(&text, &link_base));
        Ok(())
    }
}
