#![cfg(test)]

use anyhow::{Error, anyhow};
use html::{Document, parse_html};
use page_nav::{KeyEvent, NavOutcome, Navigator};
use pagenav::{PagenavConfig, parse_script, replay};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

const SCRIPT: &str = "
# two headings, then back up
h
h
up
h
@name:h
76
KeyZ
m
m
";

fn article() -> Result<Document, Error> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("article.html");
    let source = fs::read_to_string(&path)
        .map_err(|err| anyhow!("Failed to read fixture {}: {err}", path.display()))?;
    Ok(parse_html(&source))
}

#[test]
fn replay_reports_every_step() -> Result<(), Error> {
    let _ = env_logger::builder().is_test(true).try_init();
    let keys = parse_script(SCRIPT)?;
    let (doc, reports) = replay(article()?, &keys)?;

    let summary: Vec<(&str, Option<&str>, bool)> = reports
        .iter()
        .map(|report| (report.outcome, report.id.as_deref(), report.wrapped))
        .collect();
    assert_eq!(
        summary,
        [
            ("highlighted", Some("headline"), false),
            ("highlighted", Some("details"), false),
            ("direction", None, false),
            ("highlighted", Some("headline"), false),
            ("ignored-text-entry", None, false),
            ("highlighted", Some("home"), false),
            ("ignored", None, false),
            ("highlighted", Some("top-nav"), false),
            ("highlighted", Some("comment"), true),
        ]
    );
    assert_eq!(
        reports[3].to_line(),
        r#"4 KeyH highlighted heading <h1 id="headline"> "Headline""#
    );
    assert_eq!(reports[4].key, "@name:KeyH");
    assert_eq!(reports[8].direction, "backward");

    let details = doc
        .get_element_by_id("details")
        .ok_or_else(|| anyhow!("missing #details"))?;
    assert_eq!(doc.attribute(details, "style"), Some("color: navy"));
    Ok(())
}

#[test]
fn replay_matches_driving_the_library_directly() -> Result<(), Error> {
    let _ = env_logger::builder().is_test(true).try_init();
    let codes = ["KeyH", "KeyH", "KeyL", "ArrowUp", "KeyM", "KeyM", "KeyH"];
    let (_, reports) = replay(article()?, &parse_script(&codes.join("\n"))?)?;

    let mut nav = Navigator::new(article()?);
    for (code, report) in codes.iter().zip(&reports) {
        let outcome = nav.handle_key(&KeyEvent::from_code(code))?;
        let landed = match outcome {
            NavOutcome::Highlighted { element, .. } => nav.host().attribute(element, "id"),
            _ => None,
        };
        assert_eq!(landed, report.id.as_deref(), "step {}", report.step);
    }
    Ok(())
}

#[test]
fn json_lines_carry_the_outcome() -> Result<(), Error> {
    let keys = parse_script("m\nKeyQ")?;
    let (_, reports) = replay(article()?, &keys)?;
    let first: Value = serde_json::from_str(&reports[0].to_json()?)?;
    assert_eq!(first["outcome"], "highlighted");
    assert_eq!(first["category"], "landmark");
    assert_eq!(first["id"], "top-nav");
    let second: Value = serde_json::from_str(&reports[1].to_json()?)?;
    assert_eq!(second["outcome"], "ignored");
    assert!(second.get("element").is_none());
    Ok(())
}

#[test]
fn unknown_target_id_is_an_error() -> Result<(), Error> {
    let keys = parse_script("@nowhere:h")?;
    assert!(replay(article()?, &keys).is_err());
    Ok(())
}

#[test]
fn config_constructor_keeps_flags() {
    let config = PagenavConfig::new(true, false);
    assert!(config.json_output);
    assert!(!config.dump_dom);
    assert_eq!(PagenavConfig::default(), PagenavConfig::new(false, false));
}
