//! Full-size URL and caption derivation.
//!
//! Both strategies are pure functions of the markup around a thumbnail; no
//! fetch is needed to work out which image to show.
//!
//! | Strategy | Full-size URL | Caption |
//! |---|---|---|
//! | [`FullSizeStrategy::SuffixSubstitution`] | thumbnail `src` with the thumb marker swapped | parent `title` |
//! | [`FullSizeStrategy::AnchorHref`] | parent `href` | parent `title` |

use crate::config::{GalleryConfig, Strategy};
use crate::dom::Host;
use serde::Serialize;

/// What the viewer shows for one thumbnail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FullSize {
    pub url: String,
    pub caption: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FullSizeStrategy {
    SuffixSubstitution {
        thumb_suffix: String,
        large_suffix: String,
    },
    AnchorHref,
}

impl FullSizeStrategy {
    pub fn from_config(config: &GalleryConfig) -> Self {
        match config.strategy {
            Strategy::Suffix => Self::SuffixSubstitution {
                thumb_suffix: config.thumb_suffix.clone(),
                large_suffix: config.large_suffix.clone(),
            },
            Strategy::AnchorHref => Self::AnchorHref,
        }
    }

    /// Derive the full-size image for `thumb`.
    ///
    /// Returns `None` when the markup carries no URL to derive from: a
    /// thumbnail without `src`, or (anchor strategy) a parent without `href`.
    pub fn resolve<H: Host>(&self, host: &H, thumb: H::Node) -> Option<FullSize> {
        let url = match self {
            Self::SuffixSubstitution {
                thumb_suffix,
                large_suffix,
            } => large_src(&host.attribute(thumb, "src")?, thumb_suffix, large_suffix),
            Self::AnchorHref => host.attribute(host.parent(thumb)?, "href")?,
        };
        Some(FullSize {
            url,
            caption: caption(host, thumb),
        })
    }
}

/// Swap the first `thumb_suffix` in `thumb_src` for `large_suffix`.
///
/// A source without the marker is returned unchanged: the thumbnail doubles
/// as its own full-size image.
pub fn large_src(thumb_src: &str, thumb_suffix: &str, large_suffix: &str) -> String {
    if thumb_suffix.is_empty() {
        return thumb_src.to_string();
    }
    thumb_src.replacen(thumb_suffix, large_suffix, 1)
}

/// The `title` of the thumbnail's parent, or an empty string.
pub fn caption<H: Host>(host: &H, thumb: H::Node) -> String {
    host.parent(thumb)
        .and_then(|parent| host.attribute(parent, "title"))
        .unwrap_or_default()
}
