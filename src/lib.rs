//! # lightgal
//!
//! A thumbnail gallery widget. A container of thumbnails is bound to a single
//! "large image" viewer: clicking a thumbnail fades the viewer out, swaps its
//! source and caption for the thumbnail's full-size image, and fades it back
//! in. Full-size images can be preloaded when the widget is bound.
//!
//! # Architecture
//!
//! The widget never talks to a browser directly. It runs against
//! [`dom::Host`], a small capability set (query, attributes, classes, click
//! listeners, timers). A browser binding would implement it over the real DOM;
//! [`dom::memory::Document`] implements it in-process with a virtual clock,
//! which is what the tests and the `simulate` command use.
//!
//! ```text
//!   GalleryConfig ──┐
//!                   ▼
//!   container ─▶ Gallery::new ─▶ preload (hidden div of full-size imgs)
//!                   │
//!                   └─▶ click listener ─▶ Idle ⇄ Transitioning ─▶ viewer src/alt
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`gallery`] | The widget: construction, preload, click state machine |
//! | [`derive`] | Full-size URL and caption derivation (suffix or anchor-href) |
//! | [`config`] | Option defaults, TOML overlay merge, validation, stock config |
//! | [`selector`] | The CSS selector subset accepted by the options |
//! | [`dom`] | The `Host` capability trait and the in-memory `Document` |
//! | [`scan`] | Pair thumbnail files with full-size files in a directory |
//! | [`markup`] | Render the gallery page with Maud, or mount it into a `Document` |
//! | [`simulate`] | Replay scripted clicks on the virtual clock |
//! | [`output`] | CLI output formatting |
//!
//! # Example
//!
//! ```
//! use lightgal::config::GalleryConfig;
//! use lightgal::dom::Host;
//! use lightgal::dom::memory::Document;
//! use lightgal::gallery::Gallery;
//!
//! let mut doc = Document::new();
//! let body = doc.body();
//! let container = doc.element("div", &[]);
//! let link = doc.element("a", &[("href", "/cat.jpg"), ("title", "A cat")]);
//! let thumb = doc.element("img", &[("src", "/cat-thumb.jpg")]);
//! let viewer = doc.element("img", &[("id", "largeImg")]);
//! doc.append(body, container);
//! doc.append(container, link);
//! doc.append(link, thumb);
//! doc.append(body, viewer);
//!
//! let gallery = Gallery::new(&mut doc, container, GalleryConfig::default()).unwrap();
//! doc.click(thumb);
//! assert!(doc.has_class(viewer, "hidden"));
//! doc.advance(200);
//! assert_eq!(doc.attribute(viewer, "src").as_deref(), Some("/cat-lg.jpg"));
//! assert_eq!(doc.attribute(viewer, "alt").as_deref(), Some("A cat"));
//! assert_eq!(gallery.thumbnails(), &[thumb]);
//! ```
//!
//! # Design Decisions
//!
//! ## Last Click Wins
//!
//! A click during a pending transition cancels the pending swap and starts a
//! new one. Without the cancel, two quick clicks each schedule a swap and the
//! viewer can end on the earlier image.
//!
//! ## Misses Are No-ops
//!
//! A click inside the container that does not land on (or above) an image, or
//! on an image with nothing to derive a URL from, leaves the viewer alone.
//!
//! ## Fire-and-Forget Preload
//!
//! Preloading only creates the hidden images; the host fetches them. Load
//! completion and failures are not tracked.

pub mod config;
pub mod derive;
pub mod dom;
pub mod gallery;
pub mod markup;
pub mod output;
pub mod scan;
pub mod selector;
pub mod simulate;

#[cfg(test)]
pub(crate) mod test_helpers;
