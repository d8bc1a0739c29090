//! Directory scanning: pair thumbnails with their full-size images.
//!
//! Each entry's `full` is the URL the widget shows when that thumbnail is
//! clicked, so a rendered page and the live widget agree on every full-size
//! URL. With the `suffix` strategy that is the click-time suffix rule applied
//! to the whole thumbnail URL, whether or not the result exists on disk:
//!
//! ```text
//! photos/
//! ├── 010-cat-thumb.jpg   ─┐ entry: thumb=010-cat-thumb.jpg
//! ├── 010-cat-lg.jpg      ─┘        full=010-cat-lg.jpg, caption="cat"
//! ├── 020-dog-thumb.jpg      entry: full=020-dog-lg.jpg (missing, logged)
//! └── travel/
//!     └── boat.png           entry: no marker, the image is its own full size
//! ```
//!
//! With `anchor-href` the widget follows the link, so the scanner is free to
//! pick the link target: the `-lg` partner of the file name when it exists,
//! otherwise the thumbnail itself.
//!
//! Entries are ordered by path. Hidden files and non-images are skipped.
//! URLs are relative to the scanned root and always use `/`.

use crate::config::{GalleryConfig, Strategy};
use crate::derive::large_src;
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "avif", "gif"];

/// One thumbnail and what clicking it shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub thumb: String,
    pub full: String,
    pub caption: String,
}

pub fn scan(root: &Path, config: &GalleryConfig) -> Result<Vec<Entry>, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    let mut images = Vec::new();
    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'))
    {
        let entry = entry?;
        if entry.file_type().is_file() && is_image(entry.path()) {
            images.push(relative_url(root, entry.path()));
        }
    }

    let available: HashSet<&str> = images.iter().map(String::as_str).collect();
    let thumb_suffix = config.thumb_suffix.as_str();
    let large_suffix = config.large_suffix.as_str();

    let full_of = |url: &str| -> String {
        match config.strategy {
            Strategy::Suffix => large_src(url, thumb_suffix, large_suffix),
            Strategy::AnchorHref if has_marker(file_name(url), thumb_suffix) => {
                let partner = partner_url(url, thumb_suffix, large_suffix);
                if available.contains(partner.as_str()) {
                    partner
                } else {
                    url.to_string()
                }
            }
            Strategy::AnchorHref => url.to_string(),
        }
    };

    // Full-size partners found on disk are not entries of their own.
    let fulls: Vec<String> = images.iter().map(|url| full_of(url.as_str())).collect();
    let partners: HashSet<&str> = images
        .iter()
        .zip(&fulls)
        .filter(|(url, full)| url != full && available.contains(full.as_str()))
        .map(|(_, full)| full.as_str())
        .collect();

    let entries = images
        .iter()
        .zip(&fulls)
        .filter(|(url, _)| !partners.contains(url.as_str()))
        .map(|(url, full)| {
            if !available.contains(full.as_str()) {
                warn!(thumb = %url, full = %full, "full-size image not found");
            }
            Entry {
                caption: caption_from_name(file_name(url), thumb_suffix),
                thumb: url.clone(),
                full: full.clone(),
            }
        })
        .collect();
    Ok(entries)
}

fn is_image(path: &Path) -> bool {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}

fn relative_url(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn file_name(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}

fn has_marker(name: &str, thumb_suffix: &str) -> bool {
    !thumb_suffix.is_empty() && name.contains(thumb_suffix)
}

/// Apply the suffix rule to the file name only, so directory names that
/// happen to contain the marker are left alone. Only used for `anchor-href`,
/// where the scanner chooses the link target.
fn partner_url(url: &str, thumb_suffix: &str, large_suffix: &str) -> String {
    let name = file_name(url);
    let dir = &url[..url.len() - name.len()];
    format!("{dir}{}", large_src(name, thumb_suffix, large_suffix))
}

/// `010-My-Cat-thumb.jpg` → `My Cat`
fn caption_from_name(name: &str, thumb_suffix: &str) -> String {
    let stem = Path::new(name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = if thumb_suffix.is_empty() {
        stem
    } else {
        stem.replacen(thumb_suffix, "", 1)
    };
    let name = match stem.split_once('-') {
        Some((prefix, rest)) if prefix.parse::<u32>().is_ok() => rest,
        _ => stem.as_str(),
    };
    name.replace(['-', '_'], " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    fn fixture(files: &[&str]) -> TempDir {
        let tmp = TempDir::new().unwrap();
        for f in files {
            touch(tmp.path(), f);
        }
        tmp
    }

    #[test]
    fn pairs_thumbnail_with_large_partner() {
        let tmp = fixture(&["010-cat-thumb.jpg", "010-cat-lg.jpg"]);
        let entries = scan(tmp.path(), &GalleryConfig::default()).unwrap();
        assert_eq!(
            entries,
            vec![Entry {
                thumb: "010-cat-thumb.jpg".into(),
                full: "010-cat-lg.jpg".into(),
                caption: "cat".into(),
            }]
        );
    }

    fn anchor_href() -> GalleryConfig {
        GalleryConfig {
            strategy: Strategy::AnchorHref,
            ..GalleryConfig::default()
        }
    }

    #[test]
    fn suffix_strategy_keeps_derived_url_without_partner() {
        let tmp = fixture(&["dog-thumb.png"]);
        let entries = scan(tmp.path(), &GalleryConfig::default()).unwrap();
        assert_eq!(entries[0].full, "dog-lg.png");
    }

    #[test]
    fn anchor_strategy_falls_back_to_thumbnail_without_partner() {
        let tmp = fixture(&["dog-thumb.png"]);
        let entries = scan(tmp.path(), &anchor_href()).unwrap();
        assert_eq!(entries[0].full, "dog-thumb.png");
    }

    #[test]
    fn unmarked_image_is_its_own_full_size() {
        let tmp = fixture(&["travel/boat.png"]);
        let entries = scan(tmp.path(), &GalleryConfig::default()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].thumb, "travel/boat.png");
        assert_eq!(entries[0].full, "travel/boat.png");
        assert_eq!(entries[0].caption, "boat");
    }

    #[test]
    fn skips_hidden_and_non_images() {
        let tmp = fixture(&[".hidden-thumb.jpg", ".cache/x.jpg", "notes.txt", "a.jpg"]);
        let entries = scan(tmp.path(), &GalleryConfig::default()).unwrap();
        let thumbs: Vec<&str> = entries.iter().map(|e| e.thumb.as_str()).collect();
        assert_eq!(thumbs, vec!["a.jpg"]);
    }

    #[test]
    fn entries_are_sorted_by_path() {
        let tmp = fixture(&["020-b-thumb.jpg", "010-a-thumb.jpg", "030-c.jpg"]);
        let entries = scan(tmp.path(), &GalleryConfig::default()).unwrap();
        let captions: Vec<&str> = entries.iter().map(|e| e.caption.as_str()).collect();
        assert_eq!(captions, vec!["a", "b", "c"]);
    }

    #[test]
    fn custom_suffixes() {
        let tmp = fixture(&["cat_t.jpg", "cat_full.jpg"]);
        let config = GalleryConfig {
            thumb_suffix: "_t".into(),
            large_suffix: "_full".into(),
            ..GalleryConfig::default()
        };
        let entries = scan(tmp.path(), &config).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].full, "cat_full.jpg");
    }

    #[test]
    fn anchor_strategy_ignores_marker_in_directory_name() {
        let tmp = fixture(&["x-thumb/cat-thumb.jpg", "x-thumb/cat-lg.jpg"]);
        let entries = scan(tmp.path(), &anchor_href()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].full, "x-thumb/cat-lg.jpg");
    }

    #[test]
    fn suffix_strategy_replaces_first_marker_in_whole_url() {
        let tmp = fixture(&["x-thumb/cat-thumb.jpg"]);
        let entries = scan(tmp.path(), &GalleryConfig::default()).unwrap();
        assert_eq!(entries[0].full, "x-lg/cat-thumb.jpg");
    }

    #[test]
    fn missing_root_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = scan(&tmp.path().join("nope"), &GalleryConfig::default());
        assert!(matches!(result, Err(ScanError::NotADirectory(_))));
    }

    #[test]
    fn caption_from_name_strips_prefix_and_marker() {
        assert_eq!(caption_from_name("010-My-Cat-thumb.jpg", "-thumb"), "My Cat");
        assert_eq!(caption_from_name("sunset_over_sea.png", "-thumb"), "sunset over sea");
        assert_eq!(caption_from_name("2024-trip.jpg", ""), "trip");
    }
}
