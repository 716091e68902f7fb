/// Small asset generation
///
/// Cards display a pre-shrunk copy of every photo. This module produces that
/// set: every `.webp` file directly inside the input directory is resized to
/// `1/divisor` of its width and height and written under the same name to
/// the output directory. Work runs on blocking threads, a bounded number at
/// a time.

use image::imageops::FilterType;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use walkdir::WalkDir;

use crate::error::{GalleryError, Result};

/// Extension of the photos the gallery serves
const SOURCE_EXTENSION: &str = "webp";

/// Default number of images processed at once
pub const DEFAULT_WORKERS: usize = 40;

#[derive(Debug, Clone)]
pub struct ShrinkOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub divisor: u32,
    pub workers: usize,
}

/// Outcome of a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShrinkReport {
    pub succeeded: usize,
    pub failed: usize,
}

/// Source photos directly inside `input`, in name order
pub fn find_sources(input: &Path) -> Vec<PathBuf> {
    let mut sources: Vec<PathBuf> = WalkDir::new(input)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| {
            p.extension()
                .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(SOURCE_EXTENSION))
                .unwrap_or(false)
        })
        .collect();
    sources.sort();
    sources
}

/// Resize one photo into `output_dir`, returning the written path
pub fn shrink_image(src: &Path, output_dir: &Path, divisor: u32) -> Result<PathBuf> {
    let name = src.file_name().ok_or_else(|| {
        GalleryError::io(
            src.display().to_string(),
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a file"),
        )
    })?;

    let img = image::ImageReader::open(src)
        .map_err(|e| GalleryError::io(src.display().to_string(), e))?
        .with_guessed_format()
        .map_err(|e| GalleryError::io(src.display().to_string(), e))?
        .decode()?;

    let divisor = divisor.max(1);
    let width = (img.width() / divisor).max(1);
    let height = (img.height() / divisor).max(1);
    let resized = img.resize_exact(width, height, FilterType::Lanczos3);

    let dst = output_dir.join(name);
    resized.save(&dst)?;
    Ok(dst)
}

/// Shrink every source photo, logging progress as each one finishes
pub async fn shrink_all(options: &ShrinkOptions) -> Result<ShrinkReport> {
    tokio::fs::create_dir_all(&options.output)
        .await
        .map_err(|e| GalleryError::io(options.output.display().to_string(), e))?;

    let sources = find_sources(&options.input);
    let total = sources.len();
    tracing::info!(
        "Converting {} images with {} workers...",
        total,
        options.workers
    );

    let permits = Arc::new(Semaphore::new(options.workers.max(1)));
    let mut tasks = JoinSet::new();

    for src in sources {
        let permits = Arc::clone(&permits);
        let output = options.output.clone();
        let divisor = options.divisor;

        tasks.spawn(async move {
            // The semaphore is never closed, so acquiring cannot fail
            let _permit = permits.acquire_owned().await.ok();
            let name = src
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            let result = tokio::task::spawn_blocking(move || shrink_image(&src, &output, divisor))
                .await
                .map_err(GalleryError::from)
                .and_then(|r| r);
            (name, result)
        });
    }

    let mut report = ShrinkReport::default();
    let mut done = 0;
    while let Some(joined) = tasks.join_next().await {
        let (name, result) = joined?;
        done += 1;
        match result {
            Ok(_) => {
                report.succeeded += 1;
                tracing::info!("[{}/{}] {}", done, total, name);
            }
            Err(e) => {
                report.failed += 1;
                tracing::warn!("[{}/{}] FAILED {}: {}", done, total, name, e);
            }
        }
    }

    tracing::info!(
        "Done! {} succeeded, {} failed.",
        report.succeeded,
        report.failed
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn write_photo(path: &Path, width: u32, height: u32) {
        RgbImage::from_pixel(width, height, Rgb([200, 200, 190]))
            .save(path)
            .unwrap();
    }

    #[test]
    fn test_find_sources_filters_extension() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.webp"), b"x").unwrap();
        std::fs::write(dir.path().join("a.WEBP"), b"x").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        std::fs::create_dir(dir.path().join("nested.webp")).unwrap();

        let names: Vec<String> = find_sources(dir.path())
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.WEBP", "b.webp"]);
    }

    #[test]
    fn test_shrink_image_divides_dimensions() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let src = input.path().join("101.webp");
        write_photo(&src, 90, 61);

        let dst = shrink_image(&src, output.path(), 3).unwrap();
        assert_eq!(dst, output.path().join("101.webp"));
        assert_eq!(image::image_dimensions(&dst).unwrap(), (30, 20));
    }

    #[test]
    fn test_shrink_never_collapses_to_zero() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let src = input.path().join("tiny.webp");
        write_photo(&src, 2, 2);

        let dst = shrink_image(&src, output.path(), 3).unwrap();
        assert_eq!(image::image_dimensions(&dst).unwrap(), (1, 1));
    }

    #[tokio::test]
    async fn test_shrink_all_reports_failures() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        write_photo(&input.path().join("101.webp"), 30, 30);
        write_photo(&input.path().join("102.webp"), 60, 30);
        std::fs::write(input.path().join("broken.webp"), b"garbage").unwrap();

        let options = ShrinkOptions {
            input: input.path().to_path_buf(),
            output: output.path().join("small"),
            divisor: 3,
            workers: 2,
        };
        let report = shrink_all(&options).await.unwrap();

        assert_eq!(report, ShrinkReport { succeeded: 2, failed: 1 });
        assert_eq!(
            image::image_dimensions(options.output.join("102.webp")).unwrap(),
            (20, 10)
        );
        assert!(!options.output.join("broken.webp").exists());
    }
}
