//! Composition root: one navigator per document.

use crate::catalog::{Category, SelectorCatalog};
use crate::highlight::{Highlighter, SCROLL_OPTIONS};
use crate::host::NavigationHost;
use crate::input::{KeyAction, KeyEvent, decode_key, is_text_entry_tag};
use crate::scanner::{ScannedNode, scan};
use crate::traversal::{Direction, find_node};
use anyhow::Error;
use log::{debug, error, info, warn};
use tracing::info_span;

/// Why a key produced no navigation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The event targeted a text-entry control.
    TextEntryTarget,
    UnrecognizedKey,
}

/// Result of handling one key.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NavOutcome<E> {
    Ignored(IgnoreReason),
    DirectionChanged(Direction),
    /// `element` is now current and highlighted.
    Highlighted {
        element: E,
        category: Category,
        wrapped: bool,
    },
    /// The document has nothing of this category; state is unchanged.
    NoMatch(Category),
}

/// Receives keydown events from the host's event loop.
pub trait KeyListener<E> {
    fn on_key_down(&mut self, event: &KeyEvent<E>);
}

/// Per-document navigation state and the pipeline that drives it.
pub struct Navigator<H: NavigationHost> {
    host: H,
    catalog: SelectorCatalog,
    direction: Direction,
    current: Option<H::Element>,
    highlighter: Highlighter<H::Element>,
}

impl<H: NavigationHost> Navigator<H> {
    /// Start navigating `host`: direction forward, nothing current.
    pub fn new(host: H) -> Self {
        info!(target: "page_nav", "navigator installed");
        Self {
            host,
            catalog: SelectorCatalog::new(),
            direction: Direction::default(),
            current: None,
            highlighter: Highlighter::new(),
        }
    }

    pub const fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access for document changes between key presses.
    pub const fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub const fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        debug!(target: "page_nav", "direction set to {direction:?}");
        self.direction = direction;
    }

    /// The element the last successful navigation landed on.
    pub const fn current(&self) -> Option<H::Element> {
        self.current
    }

    pub fn highlighted(&self) -> Option<H::Element> {
        self.highlighter.highlighted()
    }

    pub const fn catalog(&self) -> &SelectorCatalog {
        &self.catalog
    }

    /// Navigable elements as they are in the document right now.
    pub fn scan(&self) -> Vec<ScannedNode<H::Element>> {
        scan(&self.host, &self.catalog)
    }

    /// Decode and act on one keydown.
    pub fn handle_key(
        &mut self,
        event: &KeyEvent<H::Element>,
    ) -> Result<NavOutcome<H::Element>, Error> {
        if let Some(target) = event.target {
            let tag = self.host.element_tag(target).unwrap_or_default();
            if is_text_entry_tag(tag) {
                debug!(target: "page_nav", "key {:?} left to <{tag}>", event.code);
                return Ok(NavOutcome::Ignored(IgnoreReason::TextEntryTarget));
            }
        }
        match decode_key(event) {
            None => Ok(NavOutcome::Ignored(IgnoreReason::UnrecognizedKey)),
            Some(KeyAction::SetDirection(direction)) => {
                self.set_direction(direction);
                Ok(NavOutcome::DirectionChanged(direction))
            }
            Some(KeyAction::Navigate(category)) => self.navigate(category),
        }
    }

    /// Move to the next element of `category` in the current direction.
    ///
    /// Order of effects: restore the previous highlight, highlight the
    /// target, scroll it into view, then make it current. When the document
    /// has no element of `category` nothing changes, except that a current
    /// element no longer in the document is forgotten.
    pub fn navigate(&mut self, category: Category) -> Result<NavOutcome<H::Element>, Error> {
        let _span =
            info_span!("page_nav.navigate", %category, direction = ?self.direction).entered();

        let nodes = self.scan();
        if let Some(stale) = self
            .current
            .filter(|current| !nodes.iter().any(|node| node.element == *current))
        {
            info!(
                target: "page_nav",
                "current element {stale:?} left the document; position reset"
            );
            self.current = None;
        }
        let Some(hit) = find_node(self.direction, category, &nodes, self.current) else {
            debug!(target: "page_nav", "no {category} in document");
            return Ok(NavOutcome::NoMatch(category));
        };
        let target = hit.node.element;

        if let Some(previous) = self.highlighter.highlighted() {
            if let Err(err) = self.highlighter.restore_prev(&mut self.host, previous) {
                warn!(target: "page_nav", "could not restore previous highlight: {err:#}");
            }
        }
        self.highlighter.set_highlight(&mut self.host, target)?;
        if let Err(err) = self.host.bring_into_view(target, SCROLL_OPTIONS) {
            warn!(target: "page_nav", "scroll into view failed: {err:#}");
        }
        self.current = Some(target);

        debug!(
            target: "page_nav",
            "{category} -> {}{}",
            self.host.describe_element(target),
            if hit.wrapped { " (wrapped)" } else { "" }
        );
        Ok(NavOutcome::Highlighted {
            element: target,
            category,
            wrapped: hit.wrapped,
        })
    }
}

impl<H: NavigationHost> KeyListener<H::Element> for Navigator<H> {
    fn on_key_down(&mut self, event: &KeyEvent<H::Element>) {
        if let Err(err) = self.handle_key(event) {
            error!(target: "page_nav", "key handling failed: {err:#}");
        }
    }
}
