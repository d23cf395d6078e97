//! Random image selection.

use std::io;
use std::path::{Path, PathBuf};

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, warn};

/// Extensions (case-insensitive) accepted as announcement images.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];

/// Kind of media an asset is sent as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Photo,
}

/// A single image on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    pub path: PathBuf,
    pub kind: MediaKind,
}

impl ImageAsset {
    pub fn photo(path: PathBuf) -> Self {
        Self {
            path,
            kind: MediaKind::Photo,
        }
    }
}

/// Diagnostic view of the image folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageListing {
    /// File names (without directory), sorted.
    pub names: Vec<String>,
    pub folder_exists: bool,
    pub max_images: usize,
}

/// Picks a random batch of images from a folder.
#[derive(Debug, Clone)]
pub struct ImageSelector {
    folder: PathBuf,
    max_images: usize,
}

impl ImageSelector {
    pub fn new(folder: impl Into<PathBuf>, max_images: usize) -> Self {
        Self {
            folder: folder.into(),
            max_images,
        }
    }

    pub fn max_images(&self) -> usize {
        self.max_images
    }

    /// List every supported image in the folder, sorted by path.
    ///
    /// Returns the raw I/O error (including `NotFound`) so callers decide
    /// how to treat a missing folder.
    pub async fn scan(&self) -> io::Result<Vec<PathBuf>> {
        let mut entries = tokio::fs::read_dir(&self.folder).await?;
        let mut files = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if !is_supported_image(&path) {
                continue;
            }
            // Follows symlinks; directories named like images are skipped.
            match tokio::fs::metadata(&path).await {
                Ok(meta) if meta.is_file() => files.push(path),
                Ok(_) => {}
                Err(e) => debug!("Skipping {}: {}", path.display(), e),
            }
        }

        files.sort();
        Ok(files)
    }

    /// Pick up to `max_images` distinct images in random order.
    ///
    /// A missing or unreadable folder yields an empty batch.
    pub async fn select(&self) -> Vec<ImageAsset> {
        let available = self.available().await;
        let selected = sample(available, self.max_images, &mut rand::thread_rng());
        debug!("Selected {} image(s) from {}", selected.len(), self.folder.display());
        selected
    }

    /// Names of every image currently in the folder (not a random subset).
    pub async fn list_names(&self) -> ImageListing {
        let (files, folder_exists) = match self.scan().await {
            Ok(files) => (files, true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => (Vec::new(), false),
            Err(e) => {
                warn!("Failed to read image folder {}: {}", self.folder.display(), e);
                (Vec::new(), true)
            }
        };

        let names = files
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();

        ImageListing {
            names,
            folder_exists,
            max_images: self.max_images,
        }
    }

    async fn available(&self) -> Vec<PathBuf> {
        match self.scan().await {
            Ok(files) if files.is_empty() => {
                warn!("No image files found in {}", self.folder.display());
                files
            }
            Ok(files) => files,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!("Image folder {} does not exist", self.folder.display());
                Vec::new()
            }
            Err(e) => {
                warn!("Failed to read image folder {}: {}", self.folder.display(), e);
                Vec::new()
            }
        }
    }
}

/// Uniform sample without replacement, in random order.
pub fn sample<R: Rng + ?Sized>(mut files: Vec<PathBuf>, max: usize, rng: &mut R) -> Vec<ImageAsset> {
    files.shuffle(rng);
    files.truncate(max);
    files.into_iter().map(ImageAsset::photo).collect()
}

fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.iter().any(|s| s.eq_ignore_ascii_case(ext)))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::fs;

    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tempfile::TempDir;

    use super::*;

    fn folder_with(names: &[&str]) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        for name in names {
            fs::write(dir.path().join(name), b"img").unwrap();
        }
        dir
    }

    fn numbered(count: usize) -> TempDir {
        let names: Vec<String> = (0..count).map(|i| format!("img{i:02}.jpg")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        folder_with(&refs)
    }

    #[tokio::test]
    async fn test_scan_filters_extensions_case_insensitively() {
        let dir = folder_with(&["a.jpg", "B.PNG", "c.Gif", "d.jpeg", "notes.txt", "noext", "e.webp"]);
        fs::create_dir(dir.path().join("album.jpg")).unwrap();

        let selector = ImageSelector::new(dir.path(), 10);
        let files = selector.scan().await.unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["B.PNG", "a.jpg", "c.Gif", "d.jpeg"]);
    }

    #[tokio::test]
    async fn test_select_returns_all_when_under_limit() {
        let dir = numbered(3);
        let selector = ImageSelector::new(dir.path(), 10);

        let selected = selector.select().await;
        assert_eq!(selected.len(), 3);

        let unique: HashSet<_> = selected.iter().map(|a| a.path.clone()).collect();
        assert_eq!(unique.len(), 3);
        assert!(selected.iter().all(|a| a.kind == MediaKind::Photo));
    }

    #[tokio::test]
    async fn test_select_caps_at_max_without_duplicates() {
        let dir = numbered(15);
        let selector = ImageSelector::new(dir.path(), 10);

        for _ in 0..5 {
            let selected = selector.select().await;
            assert_eq!(selected.len(), 10);
            let unique: HashSet<_> = selected.iter().map(|a| a.path.clone()).collect();
            assert_eq!(unique.len(), 10);
        }
    }

    #[tokio::test]
    async fn test_select_missing_folder_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let selector = ImageSelector::new(dir.path().join("missing"), 10);
        assert!(selector.select().await.is_empty());
    }

    #[tokio::test]
    async fn test_select_empty_folder_is_empty() {
        let dir = folder_with(&["readme.md"]);
        let selector = ImageSelector::new(dir.path(), 10);
        assert!(selector.select().await.is_empty());
    }

    #[tokio::test]
    async fn test_zero_max_selects_nothing() {
        let dir = numbered(4);
        let selector = ImageSelector::new(dir.path(), 0);
        assert!(selector.select().await.is_empty());
    }

    #[tokio::test]
    async fn test_rescans_between_calls() {
        let dir = numbered(1);
        let selector = ImageSelector::new(dir.path(), 10);
        assert_eq!(selector.select().await.len(), 1);

        fs::write(dir.path().join("late.png"), b"img").unwrap();
        assert_eq!(selector.select().await.len(), 2);
    }

    #[tokio::test]
    async fn test_list_names() {
        let dir = folder_with(&["b.png", "a.jpg", "skip.txt"]);
        let listing = ImageSelector::new(dir.path(), 7).list_names().await;
        assert!(listing.folder_exists);
        assert_eq!(listing.names, vec!["a.jpg", "b.png"]);
        assert_eq!(listing.max_images, 7);

        let missing = ImageSelector::new(dir.path().join("nope"), 7).list_names().await;
        assert!(!missing.folder_exists);
        assert!(missing.names.is_empty());
    }

    #[test]
    fn test_sample_covers_every_file_eventually() {
        let files: Vec<PathBuf> = (0..6).map(|i| PathBuf::from(format!("{i}.jpg"))).collect();
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = HashSet::new();

        for _ in 0..200 {
            for asset in sample(files.clone(), 2, &mut rng) {
                seen.insert(asset.path);
            }
        }
        assert_eq!(seen.len(), files.len());
    }
}
