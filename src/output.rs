//! CLI output formatting.
//!
//! Each command has a `format_*` function returning lines (pure, testable) and
//! a `print_*` wrapper that writes them to stdout.
//!
//! ## Scan
//!
//! ```text
//! 001 cat
//!     Thumb: 010-cat-thumb.jpg
//!     Full:  010-cat-lg.jpg
//! 002 dog
//!     Thumb: dog.jpg
//!
//! 2 thumbnails
//! ```
//!
//! ## Simulate
//!
//! ```text
//! Preloaded 2 images
//!     0ms  click #1   hidden   src=-
//!   200ms  swap       visible  src=dog-lg.jpg  alt="dog"
//! ```

use crate::scan::Entry;
use crate::simulate::{Cause, Frame, Timeline};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

pub fn format_scan_output(entries: &[Entry]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, entry) in entries.iter().enumerate() {
        let title = if entry.caption.is_empty() {
            format!("({})", entry.thumb)
        } else {
            entry.caption.clone()
        };
        lines.push(format!("{} {}", format_index(i + 1), title));
        lines.push(format!("{}Thumb: {}", indent(1), entry.thumb));
        if entry.full != entry.thumb {
            lines.push(format!("{}Full:  {}", indent(1), entry.full));
        }
    }
    if !lines.is_empty() {
        lines.push(String::new());
    }
    let noun = if entries.len() == 1 { "thumbnail" } else { "thumbnails" };
    lines.push(format!("{} {}", entries.len(), noun));
    lines
}

pub fn print_scan_output(entries: &[Entry]) {
    for line in format_scan_output(entries) {
        println!("{}", line);
    }
}

fn format_frame(frame: &Frame) -> String {
    let event = match (frame.cause, frame.thumbnail) {
        (Cause::Click, Some(i)) => format!("click #{i}"),
        (Cause::Click, None) => "click".to_string(),
        (Cause::Timer, _) => "swap".to_string(),
    };
    let visibility = if frame.hidden { "hidden" } else { "visible" };
    let mut line = format!(
        "{:>5}ms  {:<9}  {:<7}  src={}",
        frame.at,
        event,
        visibility,
        frame.src.as_deref().unwrap_or("-")
    );
    if let Some(alt) = frame.alt.as_deref() {
        line.push_str(&format!("  alt={:?}", alt));
    }
    line
}

pub fn format_timeline(timeline: &Timeline) -> Vec<String> {
    let mut lines = vec![format!("Preloaded {} images", timeline.preloaded)];
    lines.extend(timeline.frames.iter().map(format_frame));
    lines
}

pub fn print_timeline(timeline: &Timeline) {
    for line in format_timeline(timeline) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(thumb: &str, full: &str, caption: &str) -> Entry {
        Entry {
            thumb: thumb.into(),
            full: full.into(),
            caption: caption.into(),
        }
    }

    #[test]
    fn scan_output_lists_entries() {
        let lines = format_scan_output(&[
            entry("010-cat-thumb.jpg", "010-cat-lg.jpg", "cat"),
            entry("dog.jpg", "dog.jpg", ""),
        ]);
        assert_eq!(
            lines,
            vec![
                "001 cat",
                "    Thumb: 010-cat-thumb.jpg",
                "    Full:  010-cat-lg.jpg",
                "002 (dog.jpg)",
                "    Thumb: dog.jpg",
                "",
                "2 thumbnails",
            ]
        );
    }

    #[test]
    fn scan_output_empty() {
        assert_eq!(format_scan_output(&[]), vec!["0 thumbnails"]);
    }

    #[test]
    fn timeline_lines() {
        let timeline = Timeline {
            preloaded: 2,
            frames: vec![
                Frame {
                    at: 0,
                    cause: Cause::Click,
                    thumbnail: Some(1),
                    src: None,
                    alt: None,
                    hidden: true,
                    transitioning: true,
                },
                Frame {
                    at: 200,
                    cause: Cause::Timer,
                    thumbnail: None,
                    src: Some("dog-lg.jpg".into()),
                    alt: Some("dog".into()),
                    hidden: false,
                    transitioning: false,
                },
            ],
        };
        let lines = format_timeline(&timeline);
        assert_eq!(lines[0], "Preloaded 2 images");
        assert_eq!(lines[1], "    0ms  click #1   hidden   src=-");
        assert_eq!(lines[2], "  200ms  swap       visible  src=dog-lg.jpg  alt=\"dog\"");
    }
}
