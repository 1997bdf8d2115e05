//! Markdown → HTML rendering for blurbs and descriptions.
//!
//! Rendering happens in two separate stages:
//!
//! ```text
//! "Born in [Pittsburgh](/city/pittsburgh)\nsee https://artsy.net"
//!     ↓ MarkdownRenderer::render   (pulldown-cmark, autolink, hard wrap)
//! <p>Born in <a href="/city/pittsburgh">Pittsburgh</a><br />
//! see <a href="https://artsy.net">https://artsy.net</a></p>
//!     ↓ rewrite_relative_links     (link_base = https://artsy.net)
//! <p>Born in <a href="https://artsy.net/city/pittsburgh">Pittsburgh</a><br />
//! see <a href="https://artsy.net">https://artsy.net</a></p>
//! ```
//!
//! Relative links into `/artist`, `/artwork`, `/gene` and `/tag` stay relative
//! because the timeline frontend routes them itself.

use once_cell::sync::Lazy;
use pulldown_cmark::{html, CowStr, Event, LinkType, Options, Parser, Tag, TagEnd};
use regex::{Captures, Regex};

/// First path segments that the frontend routes and that must stay relative.
pub const ENTITY_PATHS: [&str; 4] = ["artist", "artwork", "gene", "tag"];

/// Bare URLs to autolink: scheme URLs and `www.` hosts.
static BARE_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:https?|ftp)://[^\s<>]+|www\.[^\s<>]+").expect("valid bare URL pattern")
});

/// Markdown-style `[text](/path)` left in rendered output.
static BRACKET_LINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\[[^\]]*\])\((/[^)]+)\)").expect("valid bracket link pattern")
});

/// `href="/path"` attributes emitted by the renderer.
static HREF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"href="(/[^"]*)""#).expect("valid href pattern"));

/// Markdown renderer configured for Artsy free text.
///
/// - Bare URLs are autolinked.
/// - ATX headers need a space after the `#` markers (`#Title` is a paragraph).
/// - Single newlines are hard line breaks.
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    options: Options,
    autolink: bool,
    hard_wrap: bool,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self {
            options: Options::empty(),
            autolink: true,
            hard_wrap: true,
        }
    }

    /// Renders Markdown `text` to an HTML fragment.
    pub fn render(&self, text: &str) -> String {
        let events = coalesce_text(Parser::new_ext(text, self.options));

        let mut transformed = Vec::with_capacity(events.len());
        let mut link_depth = 0usize;
        let mut code_depth = 0usize;

        for event in events {
            match event {
                Event::Start(Tag::Link { .. }) | Event::Start(Tag::Image { .. }) => {
                    link_depth += 1;
                    transformed.push(event);
                }
                Event::End(TagEnd::Link) | Event::End(TagEnd::Image) => {
                    link_depth = link_depth.saturating_sub(1);
                    transformed.push(event);
                }
                Event::Start(Tag::CodeBlock(_)) => {
                    code_depth += 1;
                    transformed.push(event);
                }
                Event::End(TagEnd::CodeBlock) => {
                    code_depth = code_depth.saturating_sub(1);
                    transformed.push(event);
                }
                Event::InlineHtml(ref raw) => {
                    match anchor_tag(raw) {
                        Some(AnchorTag::Open) => link_depth += 1,
                        Some(AnchorTag::Close) => link_depth = link_depth.saturating_sub(1),
                        None => {}
                    }
                    transformed.push(event);
                }
                Event::SoftBreak if self.hard_wrap && code_depth == 0 => {
                    transformed.push(Event::HardBreak);
                }
                Event::Text(text) if self.autolink && link_depth == 0 && code_depth == 0 => {
                    autolink_text(text, &mut transformed);
                }
                other => transformed.push(other),
            }
        }

        let mut out = String::with_capacity(text.len() * 3 / 2);
        html::push_html(&mut out, transformed.into_iter());
        out
    }

    /// Renders `text`, then promotes non-entity relative links to `link_base`.
    pub fn render_with_links(&self, text: &str, link_base: &str) -> String {
        rewrite_relative_links(&self.render(text), link_base)
    }
}

/// Prefixes relative link targets with `link_base`.
///
/// Both `[text](/path)` and `href="/path"` forms are rewritten unless the first
/// path segment is one of [`ENTITY_PATHS`]. Absolute and protocol-relative
/// (`//host`) targets are left untouched.
pub fn rewrite_relative_links(html: &str, link_base: &str) -> String {
    let base = link_base.trim_end_matches('/');

    let html = BRACKET_LINK_RE.replace_all(html, |caps: &Captures| {
        let path = &caps[2];
        if is_frontend_route(path) {
            caps[0].to_string()
        } else {
            format!("{}({}{})", &caps[1], base, path)
        }
    });

    HREF_RE
        .replace_all(&html, |caps: &Captures| {
            let path = &caps[1];
            if is_frontend_route(path) {
                caps[0].to_string()
            } else {
                format!("href=\"{}{}\"", base, path)
            }
        })
        .into_owned()
}

/// True when `path` must stay as-is: protocol-relative or an entity route.
fn is_frontend_route(path: &str) -> bool {
    let rest = match path.strip_prefix('/') {
        Some(rest) => rest,
        None => return true,
    };
    if rest.starts_with('/') {
        return true;
    }
    let segment = rest.split(['/', '?', '#']).next().unwrap_or_default();
    ENTITY_PATHS.contains(&segment)
}

enum AnchorTag {
    Open,
    Close,
}

/// Classifies a raw inline HTML fragment as an `<a>` open or close tag.
fn anchor_tag(raw: &str) -> Option<AnchorTag> {
    let tag = raw.trim_start().to_ascii_lowercase();
    let (rest, kind) = match tag.strip_prefix("</a") {
        Some(rest) => (rest, AnchorTag::Close),
        None => (tag.strip_prefix("<a")?, AnchorTag::Open),
    };
    match rest.chars().next() {
        Some(c) if c == '>' || c.is_whitespace() => Some(kind),
        _ => None,
    }
}

/// True when the URL starting at byte `start` is not glued to a preceding word.
fn has_left_boundary(source: &str, start: usize) -> bool {
    match source[..start].chars().next_back() {
        None => true,
        Some(c) => c.is_whitespace() || (c.is_ascii_punctuation() && c != '@'),
    }
}

/// Merges adjacent text events so URLs are not split across events.
fn coalesce_text<'a>(parser: Parser<'a>) -> Vec<Event<'a>> {
    let mut events: Vec<Event<'a>> = Vec::new();
    for event in parser {
        if let Event::Text(next) = &event {
            if let Some(Event::Text(prev)) = events.last_mut() {
                let merged = format!("{}{}", prev, next);
                *prev = CowStr::from(merged);
                continue;
            }
        }
        events.push(event);
    }
    events
}

/// Splits a text event around bare URLs, wrapping each URL in a link.
fn autolink_text<'a>(text: CowStr<'a>, out: &mut Vec<Event<'a>>) {
    let source: &str = &text;
    let mut pieces: Vec<Event<'a>> = Vec::new();
    let mut last = 0;

    for m in BARE_URL_RE.find_iter(source) {
        let url = m
            .as_str()
            .trim_end_matches(['.', ',', ':', ';', '!', '?', ')', '\'', '"']);
        if url.is_empty() || !has_left_boundary(source, m.start()) {
            continue;
        }

        if m.start() > last {
            pieces.push(Event::Text(CowStr::from(source[last..m.start()].to_string())));
        }

        let href = if url.starts_with("www.") {
            format!("http://{}", url)
        } else {
            url.to_string()
        };
        pieces.push(Event::Start(Tag::Link {
            link_type: LinkType::Autolink,
            dest_url: CowStr::from(href),
            title: CowStr::from(""),
            id: CowStr::from(""),
        }));
        pieces.push(Event::Text(CowStr::from(url.to_string())));
        pieces.push(Event::End(TagEnd::Link));

        last = m.start() + url.len();
    }

    if pieces.is_empty() {
        out.push(Event::Text(text));
        return;
    }
    if last < source.len() {
        pieces.push(Event::Text(CowStr::from(source[last..].to_string())));
    }
    out.extend(pieces);
}

/// Escapes text for inclusion in HTML element content.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
