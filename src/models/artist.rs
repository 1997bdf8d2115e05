//! Artist entity.

use async_trait::async_trait;
use chrono::Datelike;
use once_cell::sync::OnceCell;
use serde_json::{Map, Value};

use super::artwork::with_dates;
use super::entity::TimelineEntity;
use super::fields::Fields;
use super::image::{image_version_url, ImageVersion};
use super::kind::EntityKind;
use super::timeline::{
    Asset, DateOptions, Timeline, TimelineEra, TimelinePayload, TIMELINE_TYPE,
};
use super::years::all_years;
use super::Artwork;
use crate::client::Client;
use crate::error::AppError;

/// An artist, fetched directly, listed on a gene, or embedded in an artwork.
#[derive(Debug)]
pub struct Artist {
    fields: Fields,
    client: Client,
    years_list: OnceCell<Vec<u32>>,
    artworks: tokio::sync::OnceCell<Vec<Artwork>>,
}

impl Artist {
    pub fn new(fields: Map<String, Value>, client: Client) -> Self {
        Self {
            fields: Fields::new("Artist", fields),
            client,
            years_list: OnceCell::new(),
            artworks: tokio::sync::OnceCell::new(),
        }
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn id(&self) -> Result<&str, AppError> {
        self.fields.id()
    }

    pub fn name(&self) -> Result<&str, AppError> {
        self.fields.str("name")
    }

    /// Free-text life span, e.g. `"American, 1928-1987"`.
    pub fn years(&self) -> Result<Option<&str>, AppError> {
        self.fields.nullable_str("years")
    }

    fn years_list(&self) -> Result<&[u32], AppError> {
        self.years_list
            .get_or_try_init(|| {
                let years = self.years()?.unwrap_or_default();
                Ok::<_, AppError>(
                    all_years(years)
                        .into_iter()
                        .filter_map(|y| y.parse().ok())
                        .collect(),
                )
            })
            .map(Vec::as_slice)
    }

    /// First 4-digit year in `years`.
    pub fn birth_year(&self) -> Result<Option<u32>, AppError> {
        Ok(self.years_list()?.first().copied())
    }

    /// Second 4-digit year in `years`.
    pub fn death_year(&self) -> Result<Option<u32>, AppError> {
        Ok(self.years_list()?.get(1).copied())
    }

    pub fn headline(&self) -> Result<String, AppError> {
        Ok(format!(
            "{} ({})",
            self.name()?,
            self.years()?.unwrap_or_default()
        ))
    }

    /// The artist's artworks, fetched once.
    pub async fn artworks(&self) -> Result<&[Artwork], AppError> {
        self.artworks
            .get_or_try_init(|| async {
                let id = self.id()?;
                self.client.find_artworks_for_artist(id).await
            })
            .await
            .map(Vec::as_slice)
    }

    /// Artworks that have a year, in listing order.
    pub async fn artworks_with_dates(&self) -> Result<Vec<&Artwork>, AppError> {
        with_dates(self.artworks().await?)
    }

    /// True when the artist can mark an era on a gene's timeline.
    ///
    /// Independent of whether any of the artist's artworks are dated.
    pub fn valid_for_timeline_era(&self) -> Result<bool, AppError> {
        Ok(self.birth_year()?.is_some() || self.death_year()?.is_some())
    }

    /// The artist's life as a date range.
    ///
    /// A living artist's era runs to the current year. With neither year
    /// known both ends are empty.
    pub fn to_timeline_era(&self) -> Result<TimelineEra, AppError> {
        let birth = self.birth_year()?;
        let death = self.death_year()?;

        let (start_date, end_date) = match (birth, death) {
            (None, None) => (String::new(), String::new()),
            (birth, death) => (
                birth.map(|y| y.to_string()).unwrap_or_default(),
                death
                    .map(|y| y.to_string())
                    .unwrap_or_else(|| chrono::Local::now().year().to_string()),
            ),
        };

        Ok(TimelineEra {
            start_date,
            end_date,
            headline: self.name()?.to_string(),
        })
    }
}

#[async_trait]
impl TimelineEntity for Artist {
    fn kind(&self) -> EntityKind {
        EntityKind::Artist
    }

    fn label(&self) -> Result<&str, AppError> {
        self.name()
    }

    async fn valid_for_timeline(&self) -> Result<bool, AppError> {
        Ok(!self.artworks_with_dates().await?.is_empty())
    }

    async fn to_timeline(&self) -> Result<TimelinePayload, AppError> {
        let blurb = self.fields.nullable_str("blurb")?.unwrap_or_default();

        let mut date = Vec::new();
        for artwork in self.artworks_with_dates().await? {
            let options = DateOptions::new()
                .headline(artwork.title()?)
                .text(format!("<p>{}</p>", artwork.description_html()?));
            date.push(artwork.to_timeline_date(&options)?);
        }

        Ok(Timeline {
            headline: self.headline()?,
            kind: TIMELINE_TYPE,
            text: Some(self.client.render_markup_with_links(blurb, None)),
            asset: Asset {
                media: image_version_url(self.fields.as_map(), ImageVersion::Square, false),
            },
            date,
            era: Some(vec![self.to_timeline_era()?]),
        }
        .into_payload())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::test_client;
    use serde_json::json;

    fn artist(value: Value) -> Artist {
        Artist::new(value.as_object().cloned().unwrap(), test_client())
    }

    #[test]
    fn test_birth_and_death_years() {
        let a = artist(json!({ "name": "Andy Warhol", "years": "American, 1928-1987" }));
        assert_eq!(a.birth_year().unwrap(), Some(1928));
        assert_eq!(a.death_year().unwrap(), Some(1987));
        assert!(a.valid_for_timeline_era().unwrap());
    }

    #[test]
    fn test_era_with_both_years() {
        let era = artist(json!({ "name": "A", "years": "1920-1990" }))
            .to_timeline_era()
            .unwrap();

        assert_eq!(era.start_date, "1920");
        assert_eq!(era.end_date, "1990");
        assert_eq!(era.headline, "A");
    }

    #[test]
    fn test_era_without_death_year_runs_to_now() {
        let era = artist(json!({ "name": "A", "years": "1920" }))
            .to_timeline_era()
            .unwrap();

        assert_eq!(era.start_date, "1920");
        assert_eq!(era.end_date, chrono::Local::now().year().to_string());
    }

    #[test]
    fn test_era_without_years_is_empty() {
        let a = artist(json!({ "name": "A", "years": "" }));
        assert!(!a.valid_for_timeline_era().unwrap());

        let era = a.to_timeline_era().unwrap();
        assert_eq!(era.start_date, "");
        assert_eq!(era.end_date, "");
    }

    #[test]
    fn test_null_years() {
        let a = artist(json!({ "name": "A", "years": null }));
        assert_eq!(a.birth_year().unwrap(), None);
        assert_eq!(a.headline().unwrap(), "A ()");
    }

    #[test]
    fn test_headline() {
        let a = artist(json!({ "name": "Andy Warhol", "years": "1928-1987" }));
        assert_eq!(a.headline().unwrap(), "Andy Warhol (1928-1987)");
        assert_eq!(a.label().unwrap(), "Andy Warhol");
    }
}
