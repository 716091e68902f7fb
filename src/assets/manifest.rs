/// Manifest loading
///
/// The manifest is fetched once when the gallery starts. The gallery holds a
/// `FetchGuard`; when the gallery goes away the guard is dropped and any
/// fetch still in flight finishes as a silent no-op instead of delivering
/// its result.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::source::AssetSource;
use crate::error::Result;
use crate::state::data::{parse_manifest, Manifest};

/// Fetch and parse the manifest at `path` under `source`
pub async fn fetch_manifest(
    client: &reqwest::Client,
    source: &AssetSource,
    path: &str,
) -> Result<Manifest> {
    let bytes = source.fetch(client, path).await?;
    let manifest = parse_manifest(&bytes)?;
    tracing::info!(
        entries = manifest.len(),
        from = %source.locate(path),
        "📋 Manifest loaded"
    );
    Ok(manifest)
}

/// Like `fetch_manifest`, but yields `None` when `token` was cancelled
/// before the fetch completed. Errors are flattened to their message.
pub async fn fetch_manifest_guarded(
    client: reqwest::Client,
    source: AssetSource,
    path: String,
    token: FetchToken,
) -> Option<std::result::Result<Manifest, String>> {
    let result = fetch_manifest(&client, &source, &path).await;
    if token.is_cancelled() {
        tracing::debug!("gallery torn down, discarding manifest result");
        return None;
    }
    Some(result.map_err(|e| e.to_string()))
}

/// Owned by the consumer of a fetch; cancels it when dropped
#[derive(Debug, Default)]
pub struct FetchGuard {
    cancelled: Arc<AtomicBool>,
}

impl FetchGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token to hand to the in-flight fetch
    pub fn token(&self) -> FetchToken {
        FetchToken {
            cancelled: Arc::clone(&self.cancelled),
        }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}

impl Drop for FetchGuard {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Read side of a `FetchGuard`
#[derive(Debug, Clone)]
pub struct FetchToken {
    cancelled: Arc<AtomicBool>,
}

impl FetchToken {
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GalleryError;

    const MANIFEST: &str = r#"{
        "101": { "file": "101.webp", "corners": { "tl": [0, 0], "tr": [10, 0], "br": [10, 10], "bl": [0, 10] } }
    }"#;

    fn local_source(contents: &str) -> (tempfile::TempDir, AssetSource) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("whiteboards.json"), contents).unwrap();
        let source = AssetSource::Local(dir.path().to_path_buf());
        (dir, source)
    }

    #[tokio::test]
    async fn test_fetch_manifest() {
        let (_dir, source) = local_source(MANIFEST);
        let client = reqwest::Client::new();
        let manifest = fetch_manifest(&client, &source, "whiteboards.json")
            .await
            .unwrap();
        assert_eq!(manifest["101"].file, "101.webp");
    }

    #[tokio::test]
    async fn test_fetch_manifest_parse_error() {
        let (_dir, source) = local_source("{ not json");
        let client = reqwest::Client::new();
        let result = fetch_manifest(&client, &source, "whiteboards.json").await;
        assert!(matches!(result, Err(GalleryError::Manifest(_))));
    }

    #[tokio::test]
    async fn test_guarded_fetch_delivers_while_alive() {
        let (_dir, source) = local_source(MANIFEST);
        let guard = FetchGuard::new();
        let result = fetch_manifest_guarded(
            reqwest::Client::new(),
            source,
            "whiteboards.json".to_string(),
            guard.token(),
        )
        .await;
        assert_eq!(result.unwrap().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_guarded_fetch_discards_after_teardown() {
        let (_dir, source) = local_source(MANIFEST);
        let guard = FetchGuard::new();
        let token = guard.token();
        drop(guard);

        let result = fetch_manifest_guarded(
            reqwest::Client::new(),
            source,
            "whiteboards.json".to_string(),
            token,
        )
        .await;
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_guarded_fetch_discards_errors_after_teardown() {
        let (_dir, source) = local_source(MANIFEST);
        let guard = FetchGuard::new();
        let token = guard.token();
        guard.cancel();

        let result = fetch_manifest_guarded(
            reqwest::Client::new(),
            source,
            "missing.json".to_string(),
            token,
        )
        .await;
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_guarded_fetch_reports_error_message() {
        let (_dir, source) = local_source(MANIFEST);
        let guard = FetchGuard::new();
        let result = fetch_manifest_guarded(
            reqwest::Client::new(),
            source,
            "missing.json".to_string(),
            guard.token(),
        )
        .await;
        let message = result.unwrap().unwrap_err();
        assert!(message.contains("missing.json"));
    }
}
