//! Chart rendering port
//!
//! Defines the interface for turning a weather report into an image.

use std::path::Path;

use domain::{LocationQuery, WeatherReport};
#[cfg(test)]
use mockall::automock;
use uuid::Uuid;

use crate::error::ApplicationError;

/// A rendered PNG chart, owned by a single command invocation
///
/// Each image carries its own request id, so concurrent commands never
/// share a file or buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct ChartImage {
    request_id: Uuid,
    png: Vec<u8>,
}

impl ChartImage {
    /// MIME type of every rendered chart
    pub const MIME_TYPE: &'static str = "image/png";

    /// Wrap freshly rendered PNG bytes under a new request id
    #[must_use]
    pub fn new(png: Vec<u8>) -> Self {
        Self::with_request_id(Uuid::new_v4(), png)
    }

    /// Wrap PNG bytes under a known request id
    #[must_use]
    pub const fn with_request_id(request_id: Uuid, png: Vec<u8>) -> Self {
        Self { request_id, png }
    }

    /// Request id the image was rendered for
    #[must_use]
    pub const fn request_id(&self) -> Uuid {
        self.request_id
    }

    /// Encoded PNG bytes
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.png
    }

    /// Consume the image, returning the PNG bytes
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.png
    }

    /// Per-invocation upload file name
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("weather-{}.png", self.request_id)
    }

    /// Write the PNG to `path`, replacing any previous content
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        std::fs::write(path, &self.png)
    }
}

impl std::fmt::Debug for ChartImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartImage")
            .field("request_id", &self.request_id)
            .field("bytes", &self.png.len())
            .finish()
    }
}

/// Port for chart rendering
///
/// Rendering is CPU-bound and synchronous; callers run it off the async
/// executor.
#[cfg_attr(test, automock)]
pub trait ChartPort: Send + Sync {
    /// Render a two-bar temperature/humidity chart titled with the location
    fn render(
        &self,
        location: &LocationQuery,
        report: &WeatherReport,
    ) -> Result<ChartImage, ApplicationError>;
}
