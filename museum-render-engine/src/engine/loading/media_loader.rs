use bevy::asset::RenderAssetUsages;
use bevy::image::{CompressedImageFormats, ImageSampler, ImageType, TextureError};
use bevy::prelude::*;
use bevy::tasks::Task;
use thiserror::Error;
use url::Url;

use super::http::{FetchError, MediaBytes, fetch_bytes, spawn_request};

#[derive(Debug, Error)]
pub enum MediaError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("cannot tell image format of {0}")]
    UnknownFormat(String),

    #[error("could not decode image: {0}")]
    Decode(#[from] TextureError),

    #[error("video unavailable: {0}")]
    Video(String),
}

/// Format hint for a downloaded image: the declared content type when it is
/// an image type, otherwise the URL's file extension.
pub fn image_type_hint<'a>(content_type: Option<&'a str>, url: &'a Url) -> Option<ImageType<'a>> {
    let mime = content_type
        .map(|value| value.split(';').next().unwrap_or(value).trim())
        .filter(|value| value.starts_with("image/"));
    if let Some(mime) = mime {
        return Some(ImageType::MimeType(mime));
    }

    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .and_then(|file| file.rsplit_once('.'))
        .map(|(_, extension)| extension)
        .filter(|extension| !extension.is_empty())
        .map(ImageType::Extension)
}

/// Decode downloaded bytes into an sRGB texture that lives only on the GPU.
pub fn decode_image(media: &MediaBytes, url: &Url) -> Result<Image, MediaError> {
    let image_type = image_type_hint(media.content_type.as_deref(), url)
        .ok_or_else(|| MediaError::UnknownFormat(url.to_string()))?;

    Ok(Image::from_buffer(
        &media.bytes,
        image_type,
        CompressedImageFormats::NONE,
        true,
        ImageSampler::linear(),
        RenderAssetUsages::RENDER_WORLD,
    )?)
}

/// Download and decode an image off the main thread.
pub fn spawn_image_load(url: String) -> Task<Result<Image, MediaError>> {
    spawn_request(async move {
        let url = Url::parse(&url).map_err(FetchError::from)?;
        let media = fetch_bytes(url.clone()).await?;
        decode_image(&media, &url)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(value: &str) -> Url {
        Url::parse(value).unwrap()
    }

    #[test]
    fn content_type_wins_over_extension() {
        let target = url("https://cdn.example/media/clip.webp");
        match image_type_hint(Some("image/jpeg; charset=binary"), &target) {
            Some(ImageType::MimeType(mime)) => assert_eq!(mime, "image/jpeg"),
            _ => panic!("expected mime type hint"),
        }
    }

    #[test]
    fn extension_used_for_generic_content_type() {
        let target = url("https://cdn.example/media/still.png?w=512");
        match image_type_hint(Some("application/octet-stream"), &target) {
            Some(ImageType::Extension(extension)) => assert_eq!(extension, "png"),
            _ => panic!("expected extension hint"),
        }
    }

    #[test]
    fn no_hint_without_type_or_extension() {
        let target = url("https://cdn.example/media/still");
        assert!(image_type_hint(None, &target).is_none());

        let media = MediaBytes {
            bytes: vec![0, 1, 2],
            content_type: None,
        };
        assert!(matches!(
            decode_image(&media, &target),
            Err(MediaError::UnknownFormat(_))
        ));
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let media = MediaBytes {
            bytes: vec![0xde, 0xad, 0xbe, 0xef],
            content_type: Some("image/png".into()),
        };
        assert!(matches!(
            decode_image(&media, &url("https://cdn.example/x.png")),
            Err(MediaError::Decode(_))
        ));
    }
}
