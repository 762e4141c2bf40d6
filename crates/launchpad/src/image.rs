//! Token image handling
//!
//! `ImageEncoder` turns an attachment picked in the form into the string kept
//! in `Token::image_ref`. `ImageLoader` tracks display of a remote image across
//! an ordered list of mirrors.

use std::path::Path;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use gaspad_types::*;
use tracing::{debug, warn};

// ============================================================================
// Encoding
// ============================================================================

/// Converts an attachment into a storable image reference
#[async_trait]
pub trait ImageEncoder: Send + Sync {
    async fn encode(&self, image: &ImageAttachment) -> GasPadResult<String>;
}

/// Encodes attachments as `data:<mime>;base64,<payload>` URIs
#[derive(Debug, Clone, Copy, Default)]
pub struct DataUriEncoder;

#[async_trait]
impl ImageEncoder for DataUriEncoder {
    async fn encode(&self, image: &ImageAttachment) -> GasPadResult<String> {
        if image.bytes.is_empty() {
            return Err(GasPadError::image_processing(&format!("'{}' is empty", image.file_name)));
        }

        let mime = image.mime_type.trim().to_ascii_lowercase();
        if !mime.starts_with("image/") || mime.len() == "image/".len() {
            return Err(GasPadError::image_processing(&format!(
                "'{}' has unsupported type '{}'",
                image.file_name, image.mime_type
            )));
        }

        debug!("Encoding {} ({} bytes) as data URI", image.file_name, image.bytes.len());
        Ok(format!("data:{};base64,{}", mime, STANDARD.encode(&image.bytes)))
    }
}

/// Guess an image MIME type from a file extension
pub fn mime_from_path(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

// ============================================================================
// Display Fallback
// ============================================================================

/// Display state of a remote image
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageLoadState {
    Loading { source: String },
    Loaded { source: String },
    /// Every source failed
    Errored,
}

/// Walks an ordered mirror list until one source loads
#[derive(Debug, Clone)]
pub struct ImageLoader {
    sources: Vec<String>,
    index: usize,
    state: ImageLoadState,
}

impl ImageLoader {
    /// Start loading the first of `sources`; no sources settles in Errored
    pub fn new(sources: Vec<String>) -> Self {
        let state = match sources.first() {
            Some(source) => ImageLoadState::Loading { source: source.clone() },
            None => ImageLoadState::Errored,
        };
        Self { sources, index: 0, state }
    }

    pub fn single(source: &str) -> Self {
        Self::new(vec![source.to_string()])
    }

    /// The mascot image with its mirror
    pub fn mascot() -> Self {
        Self::new(vec![MASCOT_URL.to_string(), MASCOT_MIRROR_URL.to_string()])
    }

    pub fn state(&self) -> &ImageLoadState {
        &self.state
    }

    /// Source currently being shown or attempted
    pub fn current_source(&self) -> Option<&str> {
        match &self.state {
            ImageLoadState::Loading { source } | ImageLoadState::Loaded { source } => Some(source),
            ImageLoadState::Errored => None,
        }
    }

    /// The current source finished loading
    pub fn on_load(&mut self) {
        if let ImageLoadState::Loading { source } = &self.state {
            self.state = ImageLoadState::Loaded { source: source.clone() };
        }
    }

    /// The current source failed; move to the next mirror
    pub fn on_error(&mut self) {
        if self.state == ImageLoadState::Errored {
            return;
        }

        self.index += 1;
        self.state = match self.sources.get(self.index) {
            Some(source) => {
                debug!("Image source failed, trying mirror {}", source);
                ImageLoadState::Loading { source: source.clone() }
            }
            None => {
                warn!("All {} image sources failed", self.sources.len());
                ImageLoadState::Errored
            }
        };
    }

    /// Restart from the primary source
    pub fn retry(&mut self) {
        *self = Self::new(std::mem::take(&mut self.sources));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_data_uri_encoding() {
        let image = ImageAttachment::new("gas.png", "image/png", b"hello".to_vec());
        let encoded = DataUriEncoder.encode(&image).await.unwrap();
        assert_eq!(encoded, "data:image/png;base64,aGVsbG8=");
    }

    #[tokio::test]
    async fn test_encoding_rejects_empty_and_non_images() {
        let empty = ImageAttachment::new("gas.png", "image/png", Vec::new());
        assert!(matches!(
            DataUriEncoder.encode(&empty).await,
            Err(GasPadError::ImageProcessing { .. })
        ));

        let text = ImageAttachment::new("notes.txt", "text/plain", b"hi".to_vec());
        assert!(matches!(
            DataUriEncoder.encode(&text).await,
            Err(GasPadError::ImageProcessing { .. })
        ));
    }

    #[test]
    fn test_mime_from_path() {
        assert_eq!(mime_from_path(Path::new("logo.PNG")), Some("image/png"));
        assert_eq!(mime_from_path(Path::new("a/b/c.jpeg")), Some("image/jpeg"));
        assert_eq!(mime_from_path(Path::new("readme.md")), None);
        assert_eq!(mime_from_path(Path::new("no_extension")), None);
    }

    #[test]
    fn test_loader_falls_back_to_mirror() {
        let mut loader = ImageLoader::mascot();
        assert_eq!(loader.current_source(), Some(MASCOT_URL));

        loader.on_error();
        assert_eq!(
            loader.state(),
            &ImageLoadState::Loading { source: MASCOT_MIRROR_URL.to_string() }
        );

        loader.on_load();
        assert_eq!(
            loader.state(),
            &ImageLoadState::Loaded { source: MASCOT_MIRROR_URL.to_string() }
        );
    }

    #[test]
    fn test_loader_errors_then_retries() {
        let mut loader = ImageLoader::single("https://cdn.example/token.png");
        loader.on_error();
        assert_eq!(loader.state(), &ImageLoadState::Errored);
        assert_eq!(loader.current_source(), None);

        loader.on_error();
        assert_eq!(loader.state(), &ImageLoadState::Errored);

        loader.retry();
        assert_eq!(
            loader.state(),
            &ImageLoadState::Loading { source: "https://cdn.example/token.png".to_string() }
        );
    }

    #[test]
    fn test_loader_without_sources() {
        let loader = ImageLoader::new(Vec::new());
        assert_eq!(loader.state(), &ImageLoadState::Errored);
    }
}
