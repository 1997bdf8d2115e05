//! End-to-end timeline assembly against canned Artsy API responses.
//!
//! Every test drives the public API through `MemoryTransport`, so no network
//! access is needed.

use std::sync::Arc;

use artsy_timeline::config::{ArtsyConfig, Config};
use artsy_timeline::context::Context;
use artsy_timeline::models::{EntityKind, TimelineEntity};
use artsy_timeline::services::{TimelineOutcome, NO_DATES_MESSAGE};
use artsy_timeline::transport::MemoryTransport;
use artsy_timeline::{AppError, Client};
use serde_json::json;

const API: &str = "https://api.test/";

fn config(token: Option<&str>) -> ArtsyConfig {
    ArtsyConfig {
        xapp_token: token.map(str::to_string),
        base_api_url: API.to_string(),
        base_url: "https://artsy.test".to_string(),
    }
}

fn client(transport: &Arc<MemoryTransport>) -> Client {
    Client::new(&config(Some("T")), transport.clone()).expect("client")
}

fn url(path: &str) -> String {
    format!("{}{}", API, path)
}

fn artwork_json(id: &str, title: &str, date: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "display": format!("{} ({})", title, date),
        "date": date,
        "medium": "Oil on canvas",
        "images": [{
            "is_default": true,
            "image_url": format!("https://stagic.artsy.test/{}/:version.jpg", id),
            "image_versions": ["large", "small"]
        }]
    })
}

mod artwork_tests {
    use super::*;

    const MONA_LISA: &str = r#"{"id":"mona-lisa","display":"Mona Lisa","date":"c. 1503","images":[{"is_default":true,"image_url":":version_image.jpg","image_versions":["large","small"]}]}"#;

    fn related_url() -> String {
        url("related/layer/synthetic/main/artworks?artwork%5B%5D=mona-lisa")
    }

    #[tokio::test]
    async fn test_mona_lisa_round_trip() {
        let transport = Arc::new(
            MemoryTransport::new()
                .with_json(url("artwork/mona-lisa"), MONA_LISA)
                .with_json(related_url(), "[]"),
        );
        let client = client(&transport);

        let artwork = client.find_artwork("mona-lisa").await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].url, "https://api.test/artwork/mona-lisa");
        assert_eq!(requests[0].header("X-Xapp-Token"), Some("T"));

        assert_eq!(artwork.year().unwrap(), Some("1503"));
        assert!(artwork.valid_for_timeline().await.unwrap());

        let payload = artwork.to_timeline().await.unwrap();
        assert_eq!(
            payload.timeline.asset.media.as_deref(),
            Some("large_image.jpg")
        );
        assert_eq!(payload.timeline.headline, "Mona Lisa");
        assert_eq!(payload.timeline.kind, "default");
        assert_eq!(payload.timeline.era, Some(vec![]));

        let own = &payload.timeline.date[0];
        assert_eq!(own.classname.as_deref(), Some("selected-item"));
        assert_eq!(own.start_date, "1503");
        assert_eq!(own.asset.thumbnail.as_deref(), Some("small_image.jpg"));
    }

    #[tokio::test]
    async fn test_related_artworks_follow_own_entry() {
        let related = json!([
            artwork_json("a", "Undated", "n.d."),
            artwork_json("b", "Second", "1510"),
            artwork_json("c", "Third", "ca. 1490"),
        ]);
        let transport = Arc::new(
            MemoryTransport::new()
                .with_json(url("artwork/mona-lisa"), MONA_LISA)
                .with_json(related_url(), related.to_string()),
        );

        let artwork = client(&transport).find_artwork("mona-lisa").await.unwrap();
        let payload = artwork.to_timeline().await.unwrap();

        let years: Vec<_> = payload
            .timeline
            .date
            .iter()
            .map(|d| d.start_date.as_str())
            .collect();
        assert_eq!(years, vec!["1503", "1510", "1490"]);
        assert_eq!(payload.timeline.date[1].classname, None);
        assert_eq!(
            payload.timeline.date[1].asset.media.as_deref(),
            Some("https://static.artsy.test/b/large.jpg")
        );
    }

    // Two revisions differ here; the richer one, with the artist link in the text, is asserted.
    #[tokio::test]
    async fn test_embedded_artist_contributes_era_and_link() {
        let body = json!({
            "id": "mona-lisa",
            "title": "Mona Lisa",
            "date": "1503",
            "images": [],
            "artist": { "id": "leonardo", "name": "Leonardo da Vinci", "years": "1452-1519" }
        });
        let transport = Arc::new(
            MemoryTransport::new()
                .with_json(url("artwork/mona-lisa"), body.to_string())
                .with_json(related_url(), "[]"),
        );

        let artwork = client(&transport).find_artwork("mona-lisa").await.unwrap();
        let payload = artwork.to_timeline().await.unwrap();

        let era = payload.timeline.era.unwrap();
        assert_eq!(era.len(), 1);
        assert_eq!(era[0].start_date, "1452");
        assert_eq!(era[0].end_date, "1519");
        assert_eq!(era[0].headline, "Leonardo da Vinci");

        assert!(payload
            .timeline
            .text
            .unwrap()
            .contains("<a href='/artist/leonardo'>Artist Timeline</a>"));
        // The embedded artist is not fetched separately.
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_undated_artwork_is_ineligible() {
        let body = json!({ "id": "x", "title": "X", "date": "Late period", "images": [] });
        let transport =
            Arc::new(MemoryTransport::new().with_json(url("artwork/x"), body.to_string()));

        let artwork = client(&transport).find_artwork("x").await.unwrap();
        assert!(!artwork.valid_for_timeline().await.unwrap());
    }
}

mod artist_tests {
    use super::*;

    fn warhol() -> String {
        json!({
            "id": "andy-warhol",
            "name": "Andy Warhol",
            "years": "1928-1987",
            "blurb": "Pop artist. See [the museum](/museum/warhol) and [Basquiat](/artist/basquiat).",
            "image_url": "https://d.artsy.test/warhol/:version.jpg",
            "image_versions": ["square"]
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_artist_timeline() {
        let artworks = json!([
            artwork_json("soup", "Campbell's Soup Cans", "1962"),
            artwork_json("untitled", "Untitled", "undated"),
            artwork_json("marilyn", "Marilyn Diptych", "1962"),
        ]);
        let transport = Arc::new(
            MemoryTransport::new()
                .with_json(url("artist/andy-warhol"), warhol())
                .with_json(url("artist/andy-warhol/artworks"), artworks.to_string()),
        );

        let artist = client(&transport).find_artist("andy-warhol").await.unwrap();
        assert!(artist.valid_for_timeline().await.unwrap());

        let payload = artist.to_timeline().await.unwrap();
        let timeline = &payload.timeline;

        assert_eq!(timeline.headline, "Andy Warhol (1928-1987)");
        assert_eq!(
            timeline.asset.media.as_deref(),
            Some("https://d.artsy.test/warhol/square.jpg")
        );

        let text = timeline.text.as_deref().unwrap();
        assert!(text.contains("href=\"https://artsy.test/museum/warhol\""));
        assert!(text.contains("href=\"/artist/basquiat\""));

        let headlines: Vec<_> = timeline.date.iter().map(|d| d.headline.as_str()).collect();
        assert_eq!(headlines, vec!["Campbell's Soup Cans", "Marilyn Diptych"]);
        assert_eq!(timeline.date[0].text, "<p><p>Oil on canvas</p>\n</p>");

        let era = timeline.era.as_ref().unwrap();
        assert_eq!(era.len(), 1);
        assert_eq!(era[0].start_date, "1928");
        assert_eq!(era[0].end_date, "1987");
    }

    #[tokio::test]
    async fn test_artworks_are_fetched_once() {
        let artworks = json!([artwork_json("soup", "Soup", "1962")]);
        let transport = Arc::new(
            MemoryTransport::new()
                .with_json(url("artist/andy-warhol"), warhol())
                .with_json(url("artist/andy-warhol/artworks"), artworks.to_string()),
        );

        let artist = client(&transport).find_artist("andy-warhol").await.unwrap();
        artist.valid_for_timeline().await.unwrap();
        artist.valid_for_timeline().await.unwrap();
        artist.to_timeline().await.unwrap();

        assert_eq!(
            transport.requested_urls(),
            vec![url("artist/andy-warhol"), url("artist/andy-warhol/artworks")]
        );
    }

    #[tokio::test]
    async fn test_artist_without_artworks_is_ineligible() {
        let transport = Arc::new(
            MemoryTransport::new()
                .with_json(url("artist/andy-warhol"), warhol())
                .with_json(url("artist/andy-warhol/artworks"), "[]"),
        );

        let artist = client(&transport).find_artist("andy-warhol").await.unwrap();
        assert!(!artist.valid_for_timeline().await.unwrap());
    }

    #[tokio::test]
    async fn test_artist_with_only_undated_artworks_is_ineligible() {
        let artworks = json!([artwork_json("a", "A", "unknown")]);
        let transport = Arc::new(
            MemoryTransport::new()
                .with_json(url("artist/andy-warhol"), warhol())
                .with_json(url("artist/andy-warhol/artworks"), artworks.to_string()),
        );

        let artist = client(&transport).find_artist("andy-warhol").await.unwrap();
        assert!(!artist.valid_for_timeline().await.unwrap());
    }
}

mod gene_tests {
    use super::*;

    #[tokio::test]
    async fn test_gene_timeline_orders_eras_by_listing() {
        let gene = json!({
            "id": "pop-art",
            "name": "Pop Art",
            "description": "Art of *mass culture*.",
            "image_url": "https://d.artsy.test/pop/:version.jpg",
            "image_versions": ["square", "thumb"]
        });
        let artworks = json!([
            artwork_json("soup", "Soup", "1962"),
            artwork_json("blam", "Blam", "n.d."),
        ]);
        let artists = json!([
            { "id": "warhol", "name": "Andy Warhol", "years": "1928-1987" },
            { "id": "anon", "name": "Anonymous", "years": "" },
            { "id": "lichtenstein", "name": "Roy Lichtenstein", "years": "1923-1997" },
            { "id": "hockney", "name": "David Hockney", "years": "born 1937" },
        ]);
        let transport = Arc::new(
            MemoryTransport::new()
                .with_json(url("gene/pop-art"), gene.to_string())
                .with_json(url("gene/pop-art/artworks"), artworks.to_string())
                .with_json(url("gene/pop-art/artists?size=20"), artists.to_string()),
        );

        let gene = client(&transport).find_gene("pop-art").await.unwrap();
        assert!(gene.valid_for_timeline().await.unwrap());

        let payload = gene.to_timeline().await.unwrap();
        let timeline = &payload.timeline;

        assert_eq!(timeline.headline, "Pop Art");
        assert_eq!(
            timeline.text.as_deref(),
            Some("<p>Art of <em>mass culture</em>.</p>\n")
        );
        assert_eq!(
            timeline.asset.media.as_deref(),
            Some("https://d.artsy.test/pop/square.jpg")
        );
        assert_eq!(timeline.date.len(), 1);

        let era = timeline.era.as_ref().unwrap();
        let names: Vec<_> = era.iter().map(|e| e.headline.as_str()).collect();
        assert_eq!(names, vec!["Andy Warhol", "Roy Lichtenstein", "David Hockney"]);
        assert_eq!(era[2].start_date, "1937");
        assert_eq!(era[2].end_date, chrono::Local::now().format("%Y").to_string());
    }

    #[tokio::test]
    async fn test_gene_without_dated_artworks_is_ineligible() {
        let transport = Arc::new(
            MemoryTransport::new()
                .with_json(url("gene/empty"), r#"{"id":"empty","name":"Empty"}"#)
                .with_json(url("gene/empty/artworks"), "[]"),
        );

        let gene = client(&transport).find_gene("empty").await.unwrap();
        assert!(!gene.valid_for_timeline().await.unwrap());
        // Eligibility never needs the artist listing.
        assert!(!transport
            .requested_urls()
            .contains(&url("gene/empty/artists?size=20")));
    }
}

mod tag_tests {
    use super::*;

    #[tokio::test]
    async fn test_tag_timeline_has_no_text_or_era() {
        let tag = json!({
            "id": "cats",
            "name": "Cats",
            "image_url": "https://d.artsy.test/cats/:version.jpg"
        });
        let artworks = json!([artwork_json("cat", "Cat", "1890")]);
        let transport = Arc::new(
            MemoryTransport::new()
                .with_json(url("tag/cats"), tag.to_string())
                .with_json(url("tag/cats/artworks"), artworks.to_string()),
        );

        let tag = client(&transport).find_tag("cats").await.unwrap();
        let payload = tag.to_timeline().await.unwrap();
        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(
            value["timeline"]["asset"]["media"],
            "https://d.artsy.test/cats/thumb.jpg"
        );
        assert_eq!(value["timeline"]["type"], "default");
        assert!(value["timeline"].get("text").is_none());
        assert!(value["timeline"].get("era").is_none());
        assert_eq!(value["timeline"]["date"][0]["startDate"], "1890");
        assert_eq!(value["timeline"]["date"][0]["endDate"], "1890");
    }
}

mod service_tests {
    use super::*;

    fn context(transport: &Arc<MemoryTransport>) -> Context {
        let config = Config {
            artsy: config(Some("T")),
        };
        Context::with_transport(config, transport.clone()).unwrap()
    }

    #[tokio::test]
    async fn test_found() {
        let transport = Arc::new(
            MemoryTransport::new()
                .with_json(
                    url("tag/cats"),
                    r#"{"id":"cats","name":"Cats","image_url":null}"#,
                )
                .with_json(
                    url("tag/cats/artworks"),
                    json!([artwork_json("cat", "Cat", "1890")]).to_string(),
                ),
        );

        let outcome = context(&transport)
            .timeline_service()
            .render_route("tag", "cats")
            .await
            .unwrap();

        let payload = outcome.into_payload().expect("timeline found");
        assert_eq!(payload.timeline.headline, "Cats");
        assert_eq!(payload.timeline.asset.media, None);
    }

    #[tokio::test]
    async fn test_no_dates_is_not_an_error() {
        let transport = Arc::new(
            MemoryTransport::new()
                .with_json(url("tag/empty"), r#"{"id":"empty","name":"Empty"}"#)
                .with_json(url("tag/empty/artworks"), "[]"),
        );

        let outcome = context(&transport)
            .timeline_service()
            .render_timeline(EntityKind::Tag, "empty")
            .await
            .unwrap();

        assert_eq!(
            outcome,
            TimelineOutcome::NoDates {
                kind: EntityKind::Tag,
                slug: "empty".to_string(),
                label: Some("Empty".to_string()),
            }
        );
        assert!(NO_DATES_MESSAGE.contains("couldn't find any dates"));
    }

    #[tokio::test]
    async fn test_remote_absence_is_an_error() {
        let transport = Arc::new(MemoryTransport::new());

        let err = context(&transport)
            .timeline_service()
            .render_timeline(EntityKind::Artist, "nobody")
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert!(err.is_remote());
    }

    #[tokio::test]
    async fn test_unknown_route_kind() {
        let transport = Arc::new(MemoryTransport::new());

        let err = context(&transport)
            .timeline_service()
            .render_route("show", "x")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::UnknownEntityType(_)));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_missing_token_fails_before_any_request() {
        let transport = Arc::new(MemoryTransport::new());
        let config = Config {
            artsy: config(None),
        };

        let result = Context::with_transport(config, transport.clone());

        assert!(matches!(result, Err(AppError::MissingToken)));
        assert!(transport.requests().is_empty());
    }
}
