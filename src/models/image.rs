//! Image variant URLs.

use serde_json::{Map, Value};

/// Named size/crop presets an Artsy image may have been generated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageVersion {
    Large,
    Small,
    Square,
    Thumb,
}

impl ImageVersion {
    /// The token used in `image_versions` and substituted for `:version`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageVersion::Large => "large",
            ImageVersion::Small => "small",
            ImageVersion::Square => "square",
            ImageVersion::Thumb => "thumb",
        }
    }
}

impl std::fmt::Display for ImageVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds the URL of one variant of `image`.
///
/// `image` is any object carrying `image_url` (a template containing
/// `:version`) and optionally `image_versions`. Returns `None` unless
/// `ignore_versions` is set or `version` is listed in `image_versions`.
/// The upstream `stagic` host typo is corrected to `static`.
pub fn image_version_url(
    image: &Map<String, Value>,
    version: ImageVersion,
    ignore_versions: bool,
) -> Option<String> {
    if !ignore_versions && !declares_version(image, version) {
        return None;
    }

    let template = image.get("image_url")?.as_str()?;
    Some(
        template
            .replace(":version", version.as_str())
            .replace("stagic", "static"),
    )
}

fn declares_version(image: &Map<String, Value>, version: ImageVersion) -> bool {
    image
        .get("image_versions")
        .and_then(Value::as_array)
        .map(|versions| {
            versions
                .iter()
                .any(|v| v.as_str() == Some(version.as_str()))
        })
        .unwrap_or(false)
}
