/// Image asset loader
///
/// Reads an image's bytes from the asset source and probes its pixel size,
/// which the cards and the viewer need to place it. Decoding for display is
/// left to the renderer.

use iced::widget::image::Handle;
use std::io::Cursor;
use std::sync::Arc;
use tokio::sync::Semaphore;

use super::source::AssetSource;
use crate::error::Result;

/// Card assets fetched at once; the rest wait for a permit
pub const CARD_FETCH_LIMIT: usize = 8;

/// An image ready to draw
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub handle: Handle,
    pub width: u32,
    pub height: u32,
}

/// Load the image at `rel` under `source`
pub async fn load_image(
    client: reqwest::Client,
    source: AssetSource,
    rel: String,
) -> Result<LoadedImage> {
    let bytes = source.fetch(&client, &rel).await?;

    // Header parsing is cheap but still CPU work; keep it off the UI thread
    let (bytes, (width, height)) = tokio::task::spawn_blocking(move || {
        let size = probe_size(&bytes)?;
        Ok::<_, crate::error::GalleryError>((bytes, size))
    })
    .await??;

    tracing::debug!(asset = %rel, width, height, "image loaded");

    Ok(LoadedImage {
        handle: Handle::from_bytes(bytes),
        width,
        height,
    })
}

/// Load the image at `rel` once a permit from `permits` is free
pub async fn load_image_bounded(
    permits: Arc<Semaphore>,
    client: reqwest::Client,
    source: AssetSource,
    rel: String,
) -> Result<LoadedImage> {
    // The semaphore is never closed, so acquiring cannot fail
    let _permit = permits.acquire_owned().await.ok();
    load_image(client, source, rel).await
}

/// Pixel dimensions from encoded image bytes
pub fn probe_size(bytes: &[u8]) -> Result<(u32, u32)> {
    let reader = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(image::ImageError::IoError)?;
    Ok(reader.into_dimensions()?)
}
