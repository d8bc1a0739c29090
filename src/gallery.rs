//! The gallery widget.
//!
//! A [`Gallery`] binds to a thumbnail container. Clicking a thumbnail hides
//! the viewer element, waits `transitionTime` milliseconds, then swaps the
//! viewer's `src`/`alt` for the thumbnail's full-size image and shows it again.
//!
//! ```text
//!            click (thumbnail resolved)
//!   Idle ──────────────────────────────▶ Transitioning { timer, target }
//!    ▲                                      │        │
//!    │        timer fires: swap src/alt,    │        │ click: cancel timer,
//!    └──────── remove hidden class ─────────┘        │ reschedule with the
//!                                                    ▼ new target
//! ```
//!
//! A click landing while a transition is pending cancels the pending swap, so
//! the viewer always ends on the most recently clicked thumbnail. A click that
//! does not resolve to a derivable thumbnail changes nothing.

use crate::config::{ConfigError, GalleryConfig};
use crate::derive::{FullSize, FullSizeStrategy};
use crate::dom::{ClickEvent, ClickListener, Host, TimerCallback, TimerId};
use crate::selector::Selector;
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("no images match `{0}` inside the thumbnail container")]
    NoImages(String),
    #[error("no viewer element matches `{0}`")]
    NoViewer(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// Viewer hidden; `target` is applied when `timer` fires.
    Transitioning { timer: TimerId, target: FullSize },
}

/// State shared between the gallery handle, its click listener and any
/// pending timer callback.
struct Shared<N> {
    viewer: N,
    hidden_class: String,
    transition_time: u64,
    strategy: FullSizeStrategy,
    phase: RefCell<Phase>,
}

pub struct Gallery<H: Host> {
    config: GalleryConfig,
    container: H::Node,
    thumbnails: Vec<H::Node>,
    preload_container: Option<H::Node>,
    shared: Rc<Shared<H::Node>>,
}

impl<H: Host> Gallery<H> {
    /// Bind a gallery to `container`.
    ///
    /// Fails before touching the host if the options are invalid, no
    /// thumbnail matches `imagesSelector`, or no viewer matches
    /// `galleryElementSelector`. On success the full-size images have been
    /// preloaded (when enabled) and one click listener sits on the container.
    pub fn new(host: &mut H, container: H::Node, config: GalleryConfig) -> Result<Self, GalleryError> {
        config.validate()?;
        let (images, viewer_selector) = config.selectors()?;

        let thumbnails = host.query_selector_all(Some(container), &images);
        if thumbnails.is_empty() {
            return Err(GalleryError::NoImages(config.images_selector.clone()));
        }
        let viewer = host
            .query_selector(None, &viewer_selector)
            .ok_or_else(|| GalleryError::NoViewer(config.gallery_element_selector.clone()))?;

        let strategy = FullSizeStrategy::from_config(&config);
        let preload_container = config
            .preload
            .then(|| preload(host, &thumbnails, &strategy));

        let shared = Rc::new(Shared {
            viewer,
            hidden_class: config.hidden_class.clone(),
            transition_time: config.transition_time,
            strategy,
            phase: RefCell::new(Phase::Idle),
        });

        let handler = Rc::clone(&shared);
        let listener: ClickListener<H> =
            Rc::new(move |host: &mut H, event: &mut ClickEvent<H::Node>| handler.on_click(host, event));
        host.add_click_listener(container, listener);

        info!(
            thumbnails = thumbnails.len(),
            preload = config.preload,
            "gallery bound to {:?}",
            container
        );

        Ok(Self {
            config,
            container,
            thumbnails,
            preload_container,
            shared,
        })
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    pub fn container(&self) -> H::Node {
        self.container
    }

    /// Thumbnails found at construction, in document order.
    pub fn thumbnails(&self) -> &[H::Node] {
        &self.thumbnails
    }

    pub fn viewer(&self) -> H::Node {
        self.shared.viewer
    }

    /// The hidden element holding preloaded images, if preload ran.
    pub fn preload_container(&self) -> Option<H::Node> {
        self.preload_container
    }

    pub fn phase(&self) -> Phase {
        self.shared.phase.borrow().clone()
    }
}

impl<N: Copy + Eq + std::fmt::Debug + 'static> Shared<N> {
    fn on_click<H: Host<Node = N>>(self: &Rc<Self>, host: &mut H, event: &mut ClickEvent<N>) {
        event.prevent_default();

        let Some(thumb) = resolve_thumbnail(host, event.target) else {
            debug!("click on {:?} has no thumbnail beneath it", event.target);
            return;
        };
        let Some(target) = self.strategy.resolve(host, thumb) else {
            debug!("thumbnail {:?} has nothing to derive a full-size URL from", thumb);
            return;
        };

        let pending = match &*self.phase.borrow() {
            Phase::Transitioning { timer, .. } => Some(*timer),
            Phase::Idle => None,
        };
        if let Some(timer) = pending {
            debug!("superseding pending transition {:?}", timer);
            host.clear_timeout(timer);
        }

        host.add_class(self.viewer, &self.hidden_class);
        let shared = Rc::clone(self);
        let callback: TimerCallback<H> = Box::new(move |host: &mut H| shared.finish(host));
        let timer = host.set_timeout(self.transition_time, callback);
        debug!(url = %target.url, "transition started");
        *self.phase.borrow_mut() = Phase::Transitioning { timer, target };
    }

    fn finish<H: Host<Node = N>>(&self, host: &mut H) {
        let Phase::Transitioning { target, .. } = self.phase.replace(Phase::Idle) else {
            return;
        };
        host.set_attribute(self.viewer, "src", &target.url);
        host.set_attribute(self.viewer, "alt", &target.caption);
        host.remove_class(self.viewer, &self.hidden_class);
        debug!(url = %target.url, "transition finished");
    }
}

/// The clicked element if it is an image, else its first image descendant.
fn resolve_thumbnail<H: Host>(host: &H, target: H::Node) -> Option<H::Node> {
    if host.tag_name(target).eq_ignore_ascii_case("img") {
        return Some(target);
    }
    host.query_selector(Some(target), &Selector::tag("img"))
}

/// Fill a hidden container with one full-size image per thumbnail and attach
/// it to the body. Loading is left to the host; nothing is tracked.
fn preload<H: Host>(host: &mut H, thumbnails: &[H::Node], strategy: &FullSizeStrategy) -> H::Node {
    let container = host.create_element("div");
    host.set_style(container, "visibility", "hidden");
    for &thumb in thumbnails {
        match strategy.resolve(host, thumb) {
            Some(full) => {
                let img = host.create_element("img");
                host.set_attribute(img, "src", &full.url);
                host.append_child(container, img);
            }
            None => warn!("skipping preload for {:?}: no full-size URL", thumb),
        }
    }
    let body = host.body();
    host.append_child(body, container);
    container
}
