//! Inline style declarations (the `style` attribute).
//!
//! Only what scripts can observe through `element.style` is modelled:
//! an ordered list of `property: value` pairs. Values are kept verbatim.

use smallvec::SmallVec;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineStyle {
    declarations: SmallVec<(String, String), 4>,
}

impl InlineStyle {
    /// Parse `style` attribute text. Malformed declarations (no colon, empty
    /// name or empty value) are dropped; a later duplicate wins.
    pub fn parse(css_text: &str) -> Self {
        let mut style = Self::default();
        for declaration in css_text.split(';') {
            let Some((name, value)) = declaration.split_once(':') else {
                continue;
            };
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            style.set(name, value.trim());
        }
        style
    }

    /// Value of `property`, or `""` if it is not declared.
    pub fn get(&self, property: &str) -> &str {
        self.declarations
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(property))
            .map_or("", |(_, value)| value.as_str())
    }

    /// Declare `property`, replacing an existing declaration in place.
    /// An empty value removes it, as `style.setProperty(name, "")` does.
    pub fn set(&mut self, property: &str, value: &str) {
        if value.is_empty() {
            self.declarations
                .retain(|entry| !entry.0.eq_ignore_ascii_case(property));
            return;
        }
        if let Some(slot) = self
            .declarations
            .iter_mut()
            .find(|(name, _)| name.eq_ignore_ascii_case(property))
        {
            value.clone_into(&mut slot.1);
        } else {
            self.declarations
                .push((property.to_ascii_lowercase(), value.to_owned()));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Serialise back to attribute text: `a: 1; b: 2`.
    pub fn to_css_text(&self) -> String {
        self.declarations
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}
