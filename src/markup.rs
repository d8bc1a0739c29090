//! Gallery page markup.
//!
//! [`render_page`] writes a static HTML page satisfying the widget's runtime
//! contract, and [`mount`] builds the same element tree inside an in-memory
//! [`Document`]. Both produce:
//!
//! ```text
//! div.thumbnails
//! └── a[href=full][title=caption] > img[src=thumb][alt=caption]   (per entry)
//! img#<viewer id>
//! ```
//!
//! Every thumbnail link points at its full-size image, so the page still
//! works as a plain list of links where no widget is bound.
//!
//! The viewer is generated from `galleryElementSelector`, which therefore has
//! to be a bare `#id` here. Hand-written pages may use any supported selector.

use crate::config::GalleryConfig;
use crate::dom::Host;
use crate::dom::memory::{Document, NodeId};
use crate::scan::Entry;
use crate::selector::Selector;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarkupError {
    #[error("galleryElementSelector `{0}` must be a bare `#id` to generate the viewer")]
    ViewerSelector(String),
}

/// Class of the thumbnail container in generated markup.
pub const CONTAINER_CLASS: &str = "thumbnails";

/// The viewer id to emit, taken from `galleryElementSelector`. Anything other
/// than a bare `#id` is rejected, since generated markup could not match it.
pub fn viewer_id(config: &GalleryConfig) -> Result<String, MarkupError> {
    Selector::parse(&config.gallery_element_selector)
        .ok()
        .and_then(|s| s.simple_id().map(str::to_string))
        .ok_or_else(|| MarkupError::ViewerSelector(config.gallery_element_selector.clone()))
}

/// Stylesheet for the viewer fade, driven by the transition options.
pub fn gallery_css(config: &GalleryConfig, viewer_id: &str) -> String {
    format!(
        "#{id} {{ display: block; max-width: 100%; transition: opacity {ms}ms ease-in-out; }}\n\
         #{id}.{hidden} {{ opacity: 0; }}\n\
         .{container} {{ display: flex; flex-wrap: wrap; gap: 0.5rem; }}\n\
         .{container} img {{ display: block; height: 6rem; }}\n",
        id = viewer_id,
        ms = config.transition_time,
        hidden = config.hidden_class,
        container = CONTAINER_CLASS,
    )
}

pub fn render_thumbnails(entries: &[Entry]) -> Markup {
    html! {
        div class=(CONTAINER_CLASS) {
            @for entry in entries {
                a href=(entry.full) title=(entry.caption) {
                    img src=(entry.thumb) alt=(entry.caption);
                }
            }
        }
    }
}

/// Render a complete page. The viewer starts on the first entry.
pub fn render_page(
    title: &str,
    entries: &[Entry],
    config: &GalleryConfig,
) -> Result<Markup, MarkupError> {
    let id = viewer_id(config)?;
    let first = entries.first();
    Ok(html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(gallery_css(config, &id))) }
            }
            body {
                h1 { (title) }
                img id=(id)
                    src=[first.map(|e| e.full.as_str())]
                    alt=[first.map(|e| e.caption.as_str())];
                (render_thumbnails(entries))
            }
        }
    })
}

/// Build the page structure in `doc` and return the thumbnail container.
/// The viewer starts empty.
pub fn mount(
    doc: &mut Document,
    entries: &[Entry],
    config: &GalleryConfig,
) -> Result<NodeId, MarkupError> {
    let id = viewer_id(config)?;
    let body = doc.body();
    let viewer = doc.element("img", &[("id", id.as_str())]);
    doc.append(body, viewer);

    let container = doc.element("div", &[("class", CONTAINER_CLASS)]);
    doc.append(body, container);
    for entry in entries {
        let a = doc.element(
            "a",
            &[("href", entry.full.as_str()), ("title", entry.caption.as_str())],
        );
        let img = doc.element(
            "img",
            &[("src", entry.thumb.as_str()), ("alt", entry.caption.as_str())],
        );
        doc.append(container, a);
        doc.append(a, img);
    }
    Ok(container)
}

/// The thumbnail images under a mounted container, in order.
pub fn mounted_thumbnails(doc: &Document, container: NodeId) -> Vec<NodeId> {
    doc.query_selector_all(Some(container), &Selector::tag("img"))
}
