//! Shared test utilities: in-memory gallery pages and viewer inspection.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let (mut doc, container) = gallery_document(&CAT_DOG);
//! let gallery = Gallery::new(&mut doc, container, GalleryConfig::default()).unwrap();
//! doc.click(gallery.thumbnails()[0]);
//! doc.advance(200);
//! assert_eq!(viewer_state(&doc, gallery.viewer()).0.as_deref(), Some("/img/cat-lg.jpg"));
//! ```

use crate::dom::Host;
use crate::dom::memory::{Document, NodeId};

/// `(thumbnail src, anchor href, anchor title)`
pub type Thumb<'a> = (&'a str, &'a str, &'a str);

/// One thumbnail carrying the `-thumb` marker, one without it.
pub const CAT_DOG: [Thumb<'static>; 2] = [
    ("/img/cat-thumb.jpg", "/full/cat.jpg", "A cat"),
    ("/img/dog.jpg", "/full/dog.jpg", "A dog"),
];

/// Build the page the widget expects and return it with the container:
///
/// ```text
/// body
/// ├── div.thumbnails
/// │   └── a[href][title] > img[src]   (one per thumb)
/// └── img#largeImg
/// ```
pub fn gallery_document(thumbs: &[Thumb<'_>]) -> (Document, NodeId) {
    let mut doc = Document::new();
    let body = doc.body();
    let container = doc.element("div", &[("class", "thumbnails")]);
    doc.append(body, container);
    for &(src, href, title) in thumbs {
        let a = doc.element("a", &[("href", href), ("title", title)]);
        let img = doc.element("img", &[("src", src)]);
        doc.append(container, a);
        doc.append(a, img);
    }
    let viewer = doc.element("img", &[("id", "largeImg")]);
    doc.append(body, viewer);
    (doc, container)
}

/// `src` attributes of `nodes`, missing ones as empty strings.
pub fn srcs(doc: &Document, nodes: &[NodeId]) -> Vec<String> {
    nodes
        .iter()
        .map(|&n| doc.attribute(n, "src").unwrap_or_default())
        .collect()
}

/// `(src, alt, hidden)` of the viewer.
pub fn viewer_state(doc: &Document, viewer: NodeId) -> (Option<String>, Option<String>, bool) {
    (
        doc.attribute(viewer, "src"),
        doc.attribute(viewer, "alt"),
        doc.has_class(viewer, "hidden"),
    )
}
