#![allow(dead_code, reason = "each test binary uses a different subset")]

use anyhow::{Error, anyhow};
use css_selectors::SelectorList;
use html::{Document, NodeId, ScrollIntoViewOptions, parse_html};
use page_nav::{ElementQuery, KeyEvent, NavOutcome, NavigationHost, Navigator, StyleAccess, ViewScroller};
use std::fs;
use std::path::PathBuf;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Returns the directory containing HTML fixtures for integration tests.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

pub fn load_fixture(name: &str) -> Result<Document, Error> {
    let path = fixtures_dir().join(name);
    let source = fs::read_to_string(&path)
        .map_err(|err| anyhow!("Failed to read fixture {}: {err}", path.display()))?;
    Ok(parse_html(&source))
}

pub fn element(doc: &Document, element_id: &str) -> Result<NodeId, Error> {
    doc.get_element_by_id(element_id)
        .ok_or_else(|| anyhow!("no element with id={element_id}"))
}

pub fn press<H: NavigationHost>(
    nav: &mut Navigator<H>,
    code: &str,
) -> Result<NavOutcome<H::Element>, Error> {
    nav.handle_key(&KeyEvent::from_code(code))
}

/// Press `code` `times` times and collect the ids of the elements landed on.
pub fn press_ids(nav: &mut Navigator<Document>, code: &str, times: usize) -> Result<Vec<String>, Error> {
    let mut ids = Vec::with_capacity(times);
    for _ in 0..times {
        match press(nav, code)? {
            NavOutcome::Highlighted { element, .. } => {
                let element_id = nav.host().attribute(element, "id").unwrap_or_default();
                ids.push(element_id.to_owned());
            }
            other => return Err(anyhow!("expected a highlight, got {other:?}")),
        }
    }
    Ok(ids)
}

/// A host side effect, in the order it happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    Style {
        element: NodeId,
        property: String,
        value: String,
    },
    Scroll {
        element: NodeId,
        options: ScrollIntoViewOptions,
    },
}

/// Wraps a parsed document and records every write made through it.
pub struct RecordingHost {
    pub doc: Document,
    pub effects: Vec<Effect>,
    pub fail_scroll: bool,
}

impl RecordingHost {
    pub const fn new(doc: Document) -> Self {
        Self {
            doc,
            effects: Vec::new(),
            fail_scroll: false,
        }
    }

    pub fn styled_elements(&self) -> Vec<NodeId> {
        let mut seen: Vec<NodeId> = Vec::new();
        for effect in &self.effects {
            if let Effect::Style { element, .. } = effect {
                if !seen.contains(element) {
                    seen.push(*element);
                }
            }
        }
        seen
    }
}

impl ElementQuery for RecordingHost {
    type Element = NodeId;

    fn query_all(&self, list: &SelectorList) -> Vec<NodeId> {
        self.doc.query_all(list)
    }

    fn matches_any(&self, element: NodeId, list: &SelectorList) -> bool {
        self.doc.matches_any(element, list)
    }

    fn element_tag(&self, element: NodeId) -> Option<&str> {
        self.doc.element_tag(element)
    }
}

impl StyleAccess for RecordingHost {
    fn read_style(&self, element: NodeId, property: &str) -> Result<String, Error> {
        self.doc.read_style(element, property)
    }

    fn write_style(&mut self, element: NodeId, property: &str, value: &str) -> Result<(), Error> {
        self.doc.write_style(element, property, value)?;
        self.effects.push(Effect::Style {
            element,
            property: property.to_owned(),
            value: value.to_owned(),
        });
        Ok(())
    }
}

impl ViewScroller for RecordingHost {
    fn bring_into_view(
        &mut self,
        element: NodeId,
        options: ScrollIntoViewOptions,
    ) -> Result<(), Error> {
        if self.fail_scroll {
            return Err(anyhow!("scrolling is unavailable"));
        }
        self.effects.push(Effect::Scroll { element, options });
        Ok(())
    }
}
