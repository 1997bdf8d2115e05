//! Entity type names as they appear in routes and API paths.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// The four entity types a timeline can be built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Artist,
    Artwork,
    Gene,
    Tag,
}

impl EntityKind {
    /// Returns all kinds in route order.
    pub fn all() -> &'static [EntityKind] {
        &[
            EntityKind::Artist,
            EntityKind::Artwork,
            EntityKind::Gene,
            EntityKind::Tag,
        ]
    }

    /// Path segment used by both the API and the frontend router.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Artist => "artist",
            EntityKind::Artwork => "artwork",
            EntityKind::Gene => "gene",
            EntityKind::Tag => "tag",
        }
    }

    /// Parses a route segment, reporting failure as an [`AppError`].
    pub fn from_route(segment: &str) -> Result<Self, AppError> {
        segment
            .parse()
            .map_err(|_| AppError::UnknownEntityType(segment.to_string()))
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityKind::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "Invalid entity type '{}'. Valid values: artist, artwork, gene, tag",
                    s
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_display() {
        for kind in EntityKind::all() {
            assert_eq!(kind.to_string().parse::<EntityKind>().unwrap(), *kind);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Gene".parse::<EntityKind>().unwrap(), EntityKind::Gene);
    }

    #[test]
    fn test_unknown_route_segment() {
        let err = EntityKind::from_route("show").unwrap_err();
        assert!(matches!(err, AppError::UnknownEntityType(ref s) if s == "show"));
    }
}
