use crate::script::{KeySpec, ScriptKey};
use anyhow::{Error, anyhow};
use html::{Document, NodeId};
use log::debug;
use page_nav::{Direction, IgnoreReason, KeyEvent, NavOutcome, Navigator};
use serde::Serialize;

/// What one scripted key did, in a printable form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub step: usize,
    pub key: String,
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub wrapped: bool,
    pub direction: &'static str,
}

impl StepReport {
    /// Text form: `3 KeyH highlighted heading <h2 id="first"> "First" [wrapped]`.
    pub fn to_line(&self) -> String {
        let mut line = format!("{} {} {}", self.step, self.key, self.outcome);
        if let Some(category) = self.category {
            line.push(' ');
            line.push_str(category);
        }
        if let Some(element) = &self.element {
            line.push(' ');
            line.push_str(element);
        }
        if self.wrapped {
            line.push_str(" [wrapped]");
        }
        line
    }

    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string(self).map_err(|err| anyhow!("cannot encode step {}: {err}", self.step))
    }
}

const fn direction_label(direction: Direction) -> &'static str {
    match direction {
        Direction::Forward => "forward",
        Direction::Backward => "backward",
    }
}

fn to_event(doc: &Document, key: &ScriptKey) -> Result<KeyEvent<NodeId>, Error> {
    let event = match &key.key {
        KeySpec::Code(code) => KeyEvent::from_code(code),
        KeySpec::Legacy(key_code) => KeyEvent::from_key_code(*key_code),
    };
    let Some(from_id) = &key.from_id else {
        return Ok(event);
    };
    let target = doc
        .get_element_by_id(from_id)
        .ok_or_else(|| anyhow!("no element with id {from_id:?} for key {key}"))?;
    Ok(event.with_target(target))
}

/// Feed `keys` to a navigator over `doc`, one report per key.
pub fn replay(doc: Document, keys: &[ScriptKey]) -> Result<(Document, Vec<StepReport>), Error> {
    let mut nav = Navigator::new(doc);
    let mut reports = Vec::with_capacity(keys.len());
    for (index, key) in keys.iter().enumerate() {
        let event = to_event(nav.host(), key)?;
        let outcome = nav.handle_key(&event)?;
        let report = describe_outcome(&nav, index + 1, key, outcome);
        debug!(target: "page_nav", "{}", report.to_line());
        reports.push(report);
    }
    Ok((nav.into_host(), reports))
}

fn describe_outcome(
    nav: &Navigator<Document>,
    step: usize,
    key: &ScriptKey,
    outcome: NavOutcome<NodeId>,
) -> StepReport {
    let mut report = StepReport {
        step,
        key: key.to_string(),
        outcome: "",
        category: None,
        element: None,
        id: None,
        wrapped: false,
        direction: direction_label(nav.direction()),
    };
    match outcome {
        NavOutcome::Ignored(IgnoreReason::TextEntryTarget) => report.outcome = "ignored-text-entry",
        NavOutcome::Ignored(IgnoreReason::UnrecognizedKey) => report.outcome = "ignored",
        NavOutcome::DirectionChanged(_) => report.outcome = "direction",
        NavOutcome::NoMatch(category) => {
            report.outcome = "no-match";
            report.category = Some(category.label());
        }
        NavOutcome::Highlighted {
            element,
            category,
            wrapped,
        } => {
            let doc = nav.host();
            report.outcome = "highlighted";
            report.category = Some(category.label());
            report.element = Some(doc.describe(element));
            report.id = doc.attribute(element, "id").map(str::to_owned);
            report.wrapped = wrapped;
        }
    }
    report
}
