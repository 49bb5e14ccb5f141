//! Project media preparation: WebP conversion, storage upload and
//! YouTube link rows.

use tracing::{info, warn};

use crate::backend::Storage;
use crate::error::{Error, Result};
use crate::model::NewProjectMedia;

pub const WEBP_CONTENT_TYPE: &str = "image/webp";

/// Lossy encoder quality, 0 to 100.
pub const WEBP_QUALITY: f32 = 90.0;

/// An image file as received from the admin form.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

pub use crate::model::UploadFailure;

/// Replace everything outside `[A-Za-z0-9._-]` with `_`.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Sanitised name with its extension swapped for `.webp`.
pub fn webp_file_name(name: &str) -> String {
    let safe = sanitize_file_name(name);
    let stem = match safe.rsplit_once('.') {
        Some((stem, ext))
            if !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') =>
        {
            stem
        }
        _ => safe.as_str(),
    };
    format!("{stem}.webp")
}

/// `<project_id>/image_<unix_ms>_<name>.webp`
pub fn storage_path(project_id: &str, file_name: &str, unix_ms: i64) -> String {
    format!("{project_id}/image_{unix_ms}_{}", webp_file_name(file_name))
}

/// Decode any supported raster format and re-encode it as lossy WebP at
/// [`WEBP_QUALITY`].
pub fn convert_to_webp(bytes: &[u8]) -> Result<Vec<u8>> {
    let decoded = image::load_from_memory(bytes).map_err(|e| Error::Image(e.to_string()))?;
    let rgba = decoded.to_rgba8();
    let encoded = webp::Encoder::from_rgba(rgba.as_raw(), rgba.width(), rgba.height())
        .encode_simple(false, WEBP_QUALITY)
        .map_err(|e| Error::Image(format!("webp encoding failed: {e:?}")))?;
    Ok(encoded.to_vec())
}

async fn convert_blocking(bytes: Vec<u8>) -> Result<Vec<u8>> {
    tokio::task::spawn_blocking(move || convert_to_webp(&bytes))
        .await
        .map_err(|e| Error::Image(format!("conversion task failed: {e}")))?
}

/// Result of pushing a batch of images to storage.
#[derive(Debug, Default)]
pub struct UploadOutcome {
    pub media: Vec<NewProjectMedia>,
    pub failures: Vec<UploadFailure>,
}

/// Convert and upload images one at a time, in order.
///
/// A failing image is logged and reported, never fatal: the remaining
/// images are still processed.
pub async fn upload_images(
    storage: &dyn Storage,
    bucket: &str,
    project_id: &str,
    images: Vec<ImageUpload>,
) -> UploadOutcome {
    let mut outcome = UploadOutcome::default();

    for ImageUpload { file_name, bytes } in images {
        let path = storage_path(project_id, &file_name, chrono::Utc::now().timestamp_millis());
        let result = match convert_blocking(bytes).await {
            Ok(webp) => storage.upload(bucket, &path, webp, WEBP_CONTENT_TYPE).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                info!("Uploaded {file_name} as {path}");
                outcome
                    .media
                    .push(NewProjectMedia::image(storage.public_url(bucket, &path)));
            }
            Err(e) => {
                warn!("Skipping image {file_name}: {e}");
                outcome.failures.push(UploadFailure {
                    file_name,
                    reason: e.to_string(),
                });
            }
        }
    }

    outcome
}

/// One `youtube` row per non-blank link, trimmed, in input order.
pub fn youtube_media(links: &[String]) -> Vec<NewProjectMedia> {
    links
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .map(NewProjectMedia::youtube)
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use std::io::Cursor;

    use image::DynamicImage;

    use super::*;
    use crate::memory::MemoryBackend;
    use crate::model::MediaKind;

    pub(crate) fn png_bytes() -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(3, 2, image::Rgba([200, 30, 30, 255]));
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut buf, image::ImageFormat::Png)
            .unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_file_names() {
        assert_eq!(sanitize_file_name("صورة 1.PNG"), "_____1.PNG");
        assert_eq!(webp_file_name("my photo.jpeg"), "my_photo.webp");
        assert_eq!(webp_file_name("noext"), "noext.webp");
        assert_eq!(
            storage_path("p1", "a.png", 1_700_000_000_000),
            "p1/image_1700000000000_a.webp"
        );
    }

    #[test]
    fn test_convert_to_webp() {
        let webp = convert_to_webp(&png_bytes()).unwrap();
        assert_eq!(&webp[0..4], b"RIFF");
        assert_eq!(&webp[8..12], b"WEBP");
        let back = image::load_from_memory(&webp).unwrap();
        assert_eq!((back.width(), back.height()), (3, 2));
    }

    #[test]
    fn test_convert_to_webp_is_lossy() {
        let webp = convert_to_webp(&png_bytes()).unwrap();
        let has_chunk = |fourcc: &[u8]| webp.windows(4).any(|w| w == fourcc);
        assert!(has_chunk(b"VP8 "));
        assert!(!has_chunk(b"VP8L"));
    }

    #[test]
    fn test_convert_rejects_garbage() {
        assert!(matches!(convert_to_webp(b"not an image"), Err(Error::Image(_))));
    }

    #[tokio::test]
    async fn test_upload_skips_failures() {
        let storage = MemoryBackend::new();
        storage.fail_uploads_matching("broken");
        let images = vec![
            ImageUpload {
                file_name: "one.png".into(),
                bytes: png_bytes(),
            },
            ImageUpload {
                file_name: "broken.png".into(),
                bytes: png_bytes(),
            },
            ImageUpload {
                file_name: "junk.png".into(),
                bytes: b"junk".to_vec(),
            },
        ];
        let outcome = upload_images(&storage, "uploads", "p1", images).await;
        assert_eq!(outcome.media.len(), 1);
        assert_eq!(outcome.media[0].kind, MediaKind::Image);
        assert!(outcome.media[0].url.contains("/uploads/p1/image_"));
        assert_eq!(
            outcome
                .failures
                .iter()
                .map(|f| f.file_name.as_str())
                .collect::<Vec<_>>(),
            ["broken.png", "junk.png"]
        );
        assert_eq!(storage.object_count(), 1);
    }

    #[test]
    fn test_youtube_media_skips_blank_links() {
        let links = vec![
            " https://youtu.be/a ".to_string(),
            "".to_string(),
            "   ".to_string(),
            "https://www.youtube.com/watch?v=b".to_string(),
        ];
        let rows = youtube_media(&links);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].url, "https://youtu.be/a");
        assert!(rows.iter().all(|r| r.kind == MediaKind::Youtube));
    }
}
