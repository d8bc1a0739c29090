//! Deterministic click replay against an in-memory page.
//!
//! The page is [mounted](crate::markup::mount) into a [`Document`], a
//! [`Gallery`] is bound to it, and the scripted clicks are delivered on the
//! virtual clock. A [`Frame`] is recorded after every click and every timer
//! that fires, which is exactly the set of moments the viewer can change.

use crate::config::GalleryConfig;
use crate::dom::Host;
use crate::dom::memory::Document;
use crate::gallery::{Gallery, GalleryError, Phase};
use crate::markup::{self, MarkupError};
use crate::scan::Entry;
use serde::Serialize;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum SimulateError {
    #[error(transparent)]
    Gallery(#[from] GalleryError),
    #[error(transparent)]
    Markup(#[from] MarkupError),
    #[error("click on thumbnail {index}, but the gallery has {count}")]
    NoSuchThumbnail { index: usize, count: usize },
}

/// A scripted click: thumbnail `index` (0-based) at `at` milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Click {
    pub index: usize,
    pub at: u64,
}

impl FromStr for Click {
    type Err = String;

    /// `INDEX@MS`, e.g. `2@150`. A bare `INDEX` clicks at time 0.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (index, at) = match s.split_once('@') {
            Some((i, t)) => (i, t),
            None => (s, "0"),
        };
        let index = index
            .trim()
            .parse()
            .map_err(|_| format!("invalid thumbnail index in `{s}`"))?;
        let at = at
            .trim()
            .parse()
            .map_err(|_| format!("invalid click time in `{s}`"))?;
        Ok(Self { index, at })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Cause {
    Click,
    Timer,
}

/// Viewer state at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frame {
    pub at: u64,
    pub cause: Cause,
    /// Thumbnail clicked, for click frames.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<usize>,
    pub src: Option<String>,
    pub alt: Option<String>,
    pub hidden: bool,
    pub transitioning: bool,
}

#[derive(Debug, Serialize)]
pub struct Timeline {
    /// Number of images placed in the preload container.
    pub preloaded: usize,
    pub frames: Vec<Frame>,
}

pub fn simulate(
    entries: &[Entry],
    config: &GalleryConfig,
    clicks: &[Click],
) -> Result<Timeline, SimulateError> {
    let mut doc = Document::new();
    let container = markup::mount(&mut doc, entries, config)?;
    let gallery = Gallery::new(&mut doc, container, config.clone())?;

    let count = gallery.thumbnails().len();
    if let Some(bad) = clicks.iter().find(|c| c.index >= count) {
        return Err(SimulateError::NoSuchThumbnail {
            index: bad.index,
            count,
        });
    }

    let preloaded = gallery
        .preload_container()
        .map_or(0, |p| doc.children(p).len());

    let mut script = clicks.to_vec();
    script.sort_by_key(|c| c.at);
    let mut script = script.into_iter().peekable();
    let mut frames = Vec::new();

    loop {
        let next_click = script.peek().map(|c| c.at);
        let next_timer = doc.next_timer_due();
        let click_first = match (next_click, next_timer) {
            (None, None) => break,
            (Some(c), Some(t)) => c < t,
            (Some(_), None) => true,
            (None, Some(_)) => false,
        };

        if click_first {
            let Some(click) = script.next() else { break };
            doc.advance_to(click.at);
            debug!(index = click.index, at = click.at, "simulated click");
            doc.click(gallery.thumbnails()[click.index]);
            frames.push(frame(&doc, &gallery, Cause::Click, Some(click.index)));
        } else if let Some(due) = next_timer {
            doc.advance_to(due);
            frames.push(frame(&doc, &gallery, Cause::Timer, None));
        }
    }

    Ok(Timeline { preloaded, frames })
}

fn frame(doc: &Document, gallery: &Gallery<Document>, cause: Cause, thumbnail: Option<usize>) -> Frame {
    let viewer = gallery.viewer();
    Frame {
        at: doc.now(),
        cause,
        thumbnail,
        src: doc.attribute(viewer, "src"),
        alt: doc.attribute(viewer, "alt"),
        hidden: doc.has_class(viewer, &gallery.config().hidden_class),
        transitioning: matches!(gallery.phase(), Phase::Transitioning { .. }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<Entry> {
        ["cat", "dog"]
            .iter()
            .map(|name| Entry {
                thumb: format!("{name}-thumb.jpg"),
                full: format!("{name}-lg.jpg"),
                caption: name.to_string(),
            })
            .collect()
    }

    #[test]
    fn parse_click() {
        assert_eq!("2@150".parse::<Click>(), Ok(Click { index: 2, at: 150 }));
        assert_eq!("1".parse::<Click>(), Ok(Click { index: 1, at: 0 }));
        assert!("x@1".parse::<Click>().is_err());
        assert!("1@soon".parse::<Click>().is_err());
    }

    #[test]
    fn single_click_timeline() {
        let timeline = simulate(&entries(), &GalleryConfig::default(), &[Click { index: 1, at: 10 }]).unwrap();
        assert_eq!(timeline.preloaded, 2);
        assert_eq!(timeline.frames.len(), 2);

        let click = &timeline.frames[0];
        assert_eq!((click.at, click.cause, click.hidden), (10, Cause::Click, true));
        assert_eq!(click.src, None);

        let done = &timeline.frames[1];
        assert_eq!((done.at, done.cause, done.hidden), (210, Cause::Timer, false));
        assert_eq!(done.src.as_deref(), Some("dog-lg.jpg"));
        assert_eq!(done.alt.as_deref(), Some("dog"));
        assert!(!done.transitioning);
    }

    #[test]
    fn overlapping_clicks_end_on_latest() {
        let clicks = [Click { index: 1, at: 50 }, Click { index: 0, at: 0 }];
        let timeline = simulate(&entries(), &GalleryConfig::default(), &clicks).unwrap();
        let causes: Vec<Cause> = timeline.frames.iter().map(|f| f.cause).collect();
        assert_eq!(causes, vec![Cause::Click, Cause::Click, Cause::Timer]);
        let last = timeline.frames.last().unwrap();
        assert_eq!(last.at, 250);
        assert_eq!(last.src.as_deref(), Some("dog-lg.jpg"));
    }

    #[test]
    fn click_at_timer_due_time_runs_timer_first() {
        let clicks = [Click { index: 0, at: 0 }, Click { index: 1, at: 200 }];
        let timeline = simulate(&entries(), &GalleryConfig::default(), &clicks).unwrap();
        let causes: Vec<Cause> = timeline.frames.iter().map(|f| f.cause).collect();
        assert_eq!(causes, vec![Cause::Click, Cause::Timer, Cause::Click, Cause::Timer]);
        assert_eq!(timeline.frames[1].src.as_deref(), Some("cat-lg.jpg"));
    }

    #[test]
    fn out_of_range_click_is_error() {
        let result = simulate(&entries(), &GalleryConfig::default(), &[Click { index: 5, at: 0 }]);
        assert!(matches!(
            result,
            Err(SimulateError::NoSuchThumbnail { index: 5, count: 2 })
        ));
    }

    #[test]
    fn empty_gallery_fails_construction() {
        let result = simulate(&[], &GalleryConfig::default(), &[]);
        assert!(matches!(
            result,
            Err(SimulateError::Gallery(GalleryError::NoImages(_)))
        ));
    }

    #[test]
    fn click_at_end_of_clock_settles() {
        let click = "0@18446744073709551615".parse::<Click>().unwrap();
        assert_eq!(click.at, u64::MAX);
        let timeline = simulate(&entries(), &GalleryConfig::default(), &[click]).unwrap();
        let causes: Vec<Cause> = timeline.frames.iter().map(|f| f.cause).collect();
        assert_eq!(causes, vec![Cause::Click, Cause::Timer]);
        let done = &timeline.frames[1];
        assert_eq!(done.at, u64::MAX);
        assert_eq!(done.src.as_deref(), Some("cat-lg.jpg"));
        assert!(!done.hidden);
    }

    #[test]
    fn viewer_selector_without_id_is_error() {
        let config = GalleryConfig {
            gallery_element_selector: "img.big".into(),
            ..GalleryConfig::default()
        };
        let result = simulate(&entries(), &config, &[]);
        assert!(matches!(
            result,
            Err(SimulateError::Markup(MarkupError::ViewerSelector(_)))
        ));
    }

    #[test]
    fn preload_disabled_reports_zero() {
        let config = GalleryConfig {
            preload: false,
            ..GalleryConfig::default()
        };
        let timeline = simulate(&entries(), &config, &[]).unwrap();
        assert_eq!(timeline.preloaded, 0);
        assert!(timeline.frames.is_empty());
    }
}
