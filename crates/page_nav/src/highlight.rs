//! Visual emphasis of the current element, with exact restoration.

use crate::host::StyleAccess;
use anyhow::{Error, anyhow};
use html::{ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};
use log::{debug, warn};

/// Inline values applied to the highlighted element.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HighlightStyle {
    pub outline: &'static str,
    pub background_color: &'static str,
    pub color: &'static str,
}

pub const HIGHLIGHT_STYLE: HighlightStyle = HighlightStyle {
    outline: "4px dashed #000",
    background_color: "#fff",
    color: "#000",
};

/// How a newly highlighted element is brought on screen.
pub const SCROLL_OPTIONS: ScrollIntoViewOptions = ScrollIntoViewOptions {
    behavior: ScrollBehavior::Smooth,
    block: ScrollLogicalPosition::End,
    inline: ScrollLogicalPosition::Nearest,
};

const OUTLINE: &str = "outline";
const BACKGROUND_COLOR: &str = "background-color";
const COLOR: &str = "color";

/// The inline values an element had before it was highlighted.
/// Empty strings mean the property was not set inline.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SavedStyle {
    pub outline: String,
    pub background_color: String,
    pub color: String,
}

#[derive(Clone, Debug)]
struct HighlightRecord<E> {
    element: E,
    saved: SavedStyle,
}

/// Owns the single highlight record.
///
/// At most one element carries the highlight; its pre-highlight values are
/// kept here, off the element, until it is restored.
#[derive(Clone, Debug)]
pub struct Highlighter<E> {
    record: Option<HighlightRecord<E>>,
}

impl<E> Default for Highlighter<E> {
    fn default() -> Self {
        Self { record: None }
    }
}

impl<E: Copy + Eq> Highlighter<E> {
    pub const fn new() -> Self {
        Self { record: None }
    }

    /// The element currently carrying the highlight.
    pub fn highlighted(&self) -> Option<E> {
        self.record.as_ref().map(|record| record.element)
    }

    pub fn saved_style(&self) -> Option<&SavedStyle> {
        self.record.as_ref().map(|record| &record.saved)
    }

    /// Save `element`'s current inline values, then apply the highlight.
    ///
    /// Any other element still highlighted is restored first. Re-highlighting
    /// the element that already holds the highlight keeps the original
    /// saved values.
    pub fn set_highlight<H>(&mut self, host: &mut H, element: E) -> Result<(), Error>
    where
        H: StyleAccess<Element = E>,
    {
        if let Some(previous) = self.highlighted() {
            if let Err(err) = self.restore_prev(host, previous) {
                warn!(target: "page_nav", "restoring previous highlight failed: {err:#}");
            }
        }
        let saved = SavedStyle {
            outline: host.read_style(element, OUTLINE)?,
            background_color: host.read_style(element, BACKGROUND_COLOR)?,
            color: host.read_style(element, COLOR)?,
        };
        debug!(
            target: "page_nav",
            "highlighting {} (saved {saved:?})",
            host.describe_element(element)
        );
        self.record = Some(HighlightRecord { element, saved });
        host.write_style(element, OUTLINE, HIGHLIGHT_STYLE.outline)?;
        host.write_style(element, BACKGROUND_COLOR, HIGHLIGHT_STYLE.background_color)?;
        host.write_style(element, COLOR, HIGHLIGHT_STYLE.color)?;
        Ok(())
    }

    /// Put back the values saved for `element` and drop the record.
    ///
    /// The record is dropped even when writing fails, e.g. because the
    /// element has since been removed. Asking to restore an element that
    /// does not hold the highlight is an error and changes nothing.
    pub fn restore_prev<H>(&mut self, host: &mut H, element: E) -> Result<(), Error>
    where
        H: StyleAccess<Element = E>,
    {
        match &self.record {
            Some(record) if record.element == element => {}
            Some(_) => {
                return Err(anyhow!(
                    "{} does not hold the highlight",
                    host.describe_element(element)
                ));
            }
            None => return Err(anyhow!("no element is highlighted")),
        }
        let Some(HighlightRecord { element, saved }) = self.record.take() else {
            return Ok(());
        };
        debug!(target: "page_nav", "restoring {}", host.describe_element(element));
        host.write_style(element, OUTLINE, &saved.outline)?;
        host.write_style(element, BACKGROUND_COLOR, &saved.background_color)?;
        host.write_style(element, COLOR, &saved.color)?;
        Ok(())
    }
}
