//! Artsy API client.
//!
//! The client issues authenticated `GET` requests, parses the JSON bodies and
//! wraps them in typed entities. It is cheap to clone: clones share the
//! transport, credentials and the lazily-built Markdown renderer, so one
//! instance can serve many concurrent requests.
//!
//! # Example
//!
//! ```ignore
//! let client = Client::connect(&config.artsy)?;
//! let artist = client.find_artist("andy-warhol").await?;
//! if artist.valid_for_timeline().await? {
//!     let payload = artist.to_timeline().await?;
//! }
//! ```

use std::sync::Arc;

use once_cell::sync::OnceCell;
use serde_json::{Map, Value};

use crate::config::ArtsyConfig;
use crate::error::AppError;
use crate::markup::MarkdownRenderer;
use crate::models::{Artist, Artwork, Entity, EntityKind, Gene, Tag};
use crate::transport::{HttpTransport, Transport};

/// Request header carrying the application token.
pub const XAPP_TOKEN_HEADER: &str = "X-Xapp-Token";

/// Page size of the "artists for gene" listing.
pub const GENE_ARTISTS_PAGE_SIZE: usize = 20;

/// Shared handle to the Artsy API.
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    xapp_token: String,
    base_api_url: String,
    base_url: String,
    transport: Arc<dyn Transport>,
    markdown: OnceCell<MarkdownRenderer>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_api_url", &self.inner.base_api_url)
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a client over the given transport.
    ///
    /// # Errors
    ///
    /// [`AppError::MissingToken`] if `xapp_token` is absent or blank. No
    /// request is made in that case.
    pub fn new(config: &ArtsyConfig, transport: Arc<dyn Transport>) -> Result<Self, AppError> {
        let xapp_token = config
            .xapp_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AppError::MissingToken)?
            .to_string();

        Ok(Self {
            inner: Arc::new(ClientInner {
                xapp_token,
                base_api_url: config.base_api_url.clone(),
                base_url: config.base_url.clone(),
                transport,
                markdown: OnceCell::new(),
            }),
        })
    }

    /// Creates a client talking HTTPS through `reqwest`.
    pub fn connect(config: &ArtsyConfig) -> Result<Self, AppError> {
        // Validate the token before building a connection pool.
        if config.xapp_token.as_deref().map_or(true, |t| t.trim().is_empty()) {
            return Err(AppError::MissingToken);
        }
        Self::new(config, Arc::new(HttpTransport::new()?))
    }

    pub fn xapp_token(&self) -> &str {
        &self.inner.xapp_token
    }

    pub fn base_api_url(&self) -> &str {
        &self.inner.base_api_url
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Public search endpoint used by the site's autocomplete.
    pub fn match_url(&self) -> String {
        format!("{}match?visible_to_public=true", self.inner.base_api_url)
    }

    // ------------------------------------------------------------------------
    // Singular lookups
    // ------------------------------------------------------------------------

    pub async fn find_artist(&self, slug: &str) -> Result<Artist, AppError> {
        let fields = self.get_object(&format!("artist/{}", slug)).await?;
        Ok(Artist::new(fields, self.clone()))
    }

    pub async fn find_gene(&self, slug: &str) -> Result<Gene, AppError> {
        let fields = self.get_object(&format!("gene/{}", slug)).await?;
        Ok(Gene::new(fields, self.clone()))
    }

    pub async fn find_tag(&self, slug: &str) -> Result<Tag, AppError> {
        let fields = self.get_object(&format!("tag/{}", slug)).await?;
        Ok(Tag::new(fields, self.clone()))
    }

    pub async fn find_artwork(&self, slug: &str) -> Result<Artwork, AppError> {
        let fields = self.get_object(&format!("artwork/{}", slug)).await?;
        Ok(Artwork::new(fields, self.clone()))
    }

    /// Looks up any entity by route kind.
    pub async fn find(&self, kind: EntityKind, slug: &str) -> Result<Entity, AppError> {
        Ok(match kind {
            EntityKind::Artist => self.find_artist(slug).await?.into(),
            EntityKind::Artwork => self.find_artwork(slug).await?.into(),
            EntityKind::Gene => self.find_gene(slug).await?.into(),
            EntityKind::Tag => self.find_tag(slug).await?.into(),
        })
    }

    // ------------------------------------------------------------------------
    // Listings
    // ------------------------------------------------------------------------

    pub async fn find_artworks_for_artist(&self, slug: &str) -> Result<Vec<Artwork>, AppError> {
        self.find_artworks(&format!("artist/{}/artworks", slug)).await
    }

    pub async fn find_artworks_for_gene(&self, slug: &str) -> Result<Vec<Artwork>, AppError> {
        self.find_artworks(&format!("gene/{}/artworks", slug)).await
    }

    pub async fn find_artworks_for_tag(&self, slug: &str) -> Result<Vec<Artwork>, AppError> {
        self.find_artworks(&format!("tag/{}/artworks", slug)).await
    }

    /// First page of a gene's artists.
    pub async fn find_artists_for_gene(&self, slug: &str) -> Result<Vec<Artist>, AppError> {
        let path = format!("gene/{}/artists?size={}", slug, GENE_ARTISTS_PAGE_SIZE);
        Ok(self
            .get_array(&path)
            .await?
            .into_iter()
            .map(|fields| Artist::new(fields, self.clone()))
            .collect())
    }

    pub async fn find_related_artworks_for_artwork(
        &self,
        slug: &str,
    ) -> Result<Vec<Artwork>, AppError> {
        let path = format!(
            "related/layer/synthetic/main/artworks?artwork%5B%5D={}",
            urlencoding::encode(slug)
        );
        self.find_artworks(&path).await
    }

    async fn find_artworks(&self, path: &str) -> Result<Vec<Artwork>, AppError> {
        Ok(self
            .get_array(path)
            .await?
            .into_iter()
            .map(|fields| Artwork::new(fields, self.clone()))
            .collect())
    }

    // ------------------------------------------------------------------------
    // Markup
    // ------------------------------------------------------------------------

    /// The renderer shared by every entity built from this client.
    pub fn markdown_renderer(&self) -> &MarkdownRenderer {
        self.inner.markdown.get_or_init(MarkdownRenderer::new)
    }

    /// Renders Markdown and promotes non-entity relative links to absolute.
    ///
    /// `link_base` defaults to the public site [`base_url`](Self::base_url).
    pub fn render_markup_with_links(&self, text: &str, link_base: Option<&str>) -> String {
        let link_base = link_base.unwrap_or(&self.inner.base_url);
        self.markdown_renderer().render_with_links(text, link_base)
    }

    // ------------------------------------------------------------------------
    // Transport
    // ------------------------------------------------------------------------

    async fn get(&self, path: &str) -> Result<Value, AppError> {
        let url = format!("{}{}", self.inner.base_api_url, path);
        tracing::debug!(url = %url, "GET");

        let response = self
            .inner
            .transport
            .get(&url, &[(XAPP_TOKEN_HEADER, self.inner.xapp_token.as_str())])
            .await?;

        if !response.is_success() {
            tracing::warn!(url = %url, status = response.status, "Artsy API request failed");
            return Err(AppError::HttpStatus {
                status: response.status,
                url,
            });
        }

        Ok(serde_json::from_str(&response.body)?)
    }

    async fn get_object(&self, path: &str) -> Result<Map<String, Value>, AppError> {
        match self.get(path).await? {
            Value::Object(map) => Ok(map),
            _ => Err(self.unexpected(path, "a JSON object")),
        }
    }

    async fn get_array(&self, path: &str) -> Result<Vec<Map<String, Value>>, AppError> {
        let items = match self.get(path).await? {
            Value::Array(items) => items,
            _ => return Err(self.unexpected(path, "a JSON array")),
        };

        items
            .into_iter()
            .map(|item| match item {
                Value::Object(map) => Ok(map),
                _ => Err(self.unexpected(path, "an array of JSON objects")),
            })
            .collect()
    }

    fn unexpected(&self, path: &str, expected: &'static str) -> AppError {
        AppError::UnexpectedResponse {
            url: format!("{}{}", self.inner.base_api_url, path),
            expected,
        }
    }
}
