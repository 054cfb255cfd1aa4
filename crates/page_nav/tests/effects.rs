#![cfg(test)]

use anyhow::Error;
use html::NodeId;
use page_nav::{Category, Direction, NavOutcome, Navigator, SCROLL_OPTIONS};

mod common;
use common::{Effect, RecordingHost, element, init_logging, load_fixture, press};

fn style(element: NodeId, property: &str, value: &str) -> Effect {
    Effect::Style {
        element,
        property: property.to_owned(),
        value: value.to_owned(),
    }
}

#[test]
fn restore_then_highlight_then_scroll() -> Result<(), Error> {
    init_logging();
    let doc = load_fixture("landmarks.html")?;
    let title = element(&doc, "title")?;
    let first = element(&doc, "first")?;
    let mut nav = Navigator::new(RecordingHost::new(doc));

    press(&mut nav, "KeyH")?;
    nav.host_mut().effects.clear();
    press(&mut nav, "KeyH")?;

    assert_eq!(
        nav.host().effects,
        [
            style(title, "outline", ""),
            style(title, "background-color", ""),
            style(title, "color", "red"),
            style(first, "outline", "4px dashed #000"),
            style(first, "background-color", "#fff"),
            style(first, "color", "#000"),
            Effect::Scroll {
                element: first,
                options: SCROLL_OPTIONS,
            },
        ]
    );
    Ok(())
}

#[test]
fn no_match_touches_nothing() -> Result<(), Error> {
    init_logging();
    let mut nav = Navigator::new(RecordingHost::new(load_fixture("plain.html")?));
    press(&mut nav, "KeyL")?;
    nav.host_mut().effects.clear();

    assert_eq!(press(&mut nav, "KeyH")?, NavOutcome::NoMatch(Category::Heading));
    assert_eq!(press(&mut nav, "ArrowUp")?, NavOutcome::DirectionChanged(Direction::Backward));
    assert!(nav.host().effects.is_empty());
    Ok(())
}

#[test]
fn only_navigated_elements_are_styled() -> Result<(), Error> {
    init_logging();
    let doc = load_fixture("landmarks.html")?;
    let banner = element(&doc, "banner")?;
    let menu = element(&doc, "menu")?;
    let mut nav = Navigator::new(RecordingHost::new(doc));
    press(&mut nav, "KeyM")?;
    press(&mut nav, "KeyM")?;
    assert_eq!(nav.host().styled_elements(), [banner, menu]);
    Ok(())
}

#[test]
fn scroll_failure_still_moves_the_highlight() -> Result<(), Error> {
    init_logging();
    let doc = load_fixture("landmarks.html")?;
    let title = element(&doc, "title")?;
    let mut host = RecordingHost::new(doc);
    host.fail_scroll = true;
    let mut nav = Navigator::new(host);

    let outcome = press(&mut nav, "KeyH")?;
    assert!(matches!(outcome, NavOutcome::Highlighted { element, .. } if element == title));
    assert_eq!(nav.current(), Some(title));
    assert!(
        nav.host()
            .effects
            .iter()
            .all(|effect| matches!(effect, Effect::Style { .. }))
    );
    Ok(())
}
