/// Where gallery files come from
///
/// The manifest and both image sets live under one base: either an
/// http(s) URL or a local directory. Remote fetches always bypass caches so
/// the latest manifest is shown.

use reqwest::header::{CACHE_CONTROL, PRAGMA};
use reqwest::Url;
use std::path::PathBuf;

use crate::error::{GalleryError, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum AssetSource {
    Remote(Url),
    Local(PathBuf),
}

impl AssetSource {
    /// Interpret `base` as a URL when it has an http(s) scheme,
    /// otherwise as a directory
    pub fn parse(base: &str) -> Result<Self> {
        if base.starts_with("http://") || base.starts_with("https://") {
            let mut url =
                Url::parse(base).map_err(|e| GalleryError::Url(format!("{}: {}", base, e)))?;
            // Url::join replaces the last segment unless the base ends with '/'
            if !url.path().ends_with('/') {
                let path = format!("{}/", url.path());
                url.set_path(&path);
            }
            Ok(AssetSource::Remote(url))
        } else {
            Ok(AssetSource::Local(PathBuf::from(base)))
        }
    }

    /// Human-readable location of `rel`, for logs
    pub fn locate(&self, rel: &str) -> String {
        match self {
            AssetSource::Remote(base) => base
                .join(rel)
                .map(|u| u.to_string())
                .unwrap_or_else(|_| format!("{}{}", base, rel)),
            AssetSource::Local(root) => root.join(rel).display().to_string(),
        }
    }

    /// Read the bytes of `rel`
    pub async fn fetch(&self, client: &reqwest::Client, rel: &str) -> Result<Vec<u8>> {
        match self {
            AssetSource::Remote(base) => {
                let url = base
                    .join(rel)
                    .map_err(|e| GalleryError::Url(format!("{}: {}", rel, e)))?;

                let response = client
                    .get(url)
                    .header(CACHE_CONTROL, "no-store")
                    .header(PRAGMA, "no-cache")
                    .send()
                    .await?;

                let status = response.status();
                if !status.is_success() {
                    return Err(GalleryError::Status {
                        resource: rel.to_string(),
                        status: status.as_u16(),
                    });
                }

                Ok(response.bytes().await?.to_vec())
            }
            AssetSource::Local(root) => {
                let path = root.join(rel);
                tokio::fs::read(&path)
                    .await
                    .map_err(|e| GalleryError::io(path.display().to_string(), e))
            }
        }
    }
}

/// Join an asset directory and a file name with exactly one '/'
pub fn asset_path(dir: &str, file: &str) -> String {
    let dir = dir.trim_end_matches('/');
    let file = file.trim_start_matches('/');
    if dir.is_empty() {
        file.to_string()
    } else {
        format!("{}/{}", dir, file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_remote_adds_trailing_slash() {
        let source = AssetSource::parse("https://example.org/gallery").unwrap();
        assert_eq!(
            source.locate("whiteboards.json"),
            "https://example.org/gallery/whiteboards.json"
        );

        let source = AssetSource::parse("http://localhost:8080/").unwrap();
        assert_eq!(
            source.locate("images/whiteboards/a.webp"),
            "http://localhost:8080/images/whiteboards/a.webp"
        );
    }

    #[test]
    fn test_parse_local() {
        let source = AssetSource::parse("public").unwrap();
        assert_eq!(source, AssetSource::Local(PathBuf::from("public")));
    }

    #[test]
    fn test_parse_rejects_bad_url() {
        assert!(matches!(
            AssetSource::parse("http://"),
            Err(GalleryError::Url(_))
        ));
    }

    #[test]
    fn test_asset_path() {
        assert_eq!(asset_path("images/whiteboards", "a.webp"), "images/whiteboards/a.webp");
        assert_eq!(asset_path("images/whiteboards/", "/a.webp"), "images/whiteboards/a.webp");
        assert_eq!(asset_path("", "a.webp"), "a.webp");
    }

    #[tokio::test]
    async fn test_fetch_local() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("whiteboards.json"), b"{}").unwrap();

        let source = AssetSource::Local(dir.path().to_path_buf());
        let client = reqwest::Client::new();

        let bytes = source.fetch(&client, "whiteboards.json").await.unwrap();
        assert_eq!(bytes, b"{}");

        let missing = source.fetch(&client, "missing.json").await;
        assert!(matches!(missing, Err(GalleryError::Io { .. })));
    }
}
