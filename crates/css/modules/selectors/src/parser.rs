//! CSS selector parsing.
//! Selectors Level 3: <https://www.w3.org/TR/selectors-3/>

use crate::{Combinator, ComplexSelector, CompoundSelector, SelectorList, SimpleSelector};
use core::mem::take;
use log::debug;

#[derive(Clone, Debug, PartialEq, Eq)]
/// Internal tokenizer token kinds.
pub enum Tok {
    /// A combinator token like child/adjacent/general sibling.
    Combinator(Combinator),
    /// Whitespace that implies a descendant combinator.
    DescendantWS,
    /// A simple selector token (type, class, id, attribute, pseudo-class, universal).
    Simple(SimpleSelector),
}

/// Attribute matching operators understood inside `[...]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AttrOperator {
    Equals,
    Includes,
}

/// Tokenizer over a selector string.
pub struct SelectorTokenizer {
    /// Underlying owned bytes for the selector.
    input_bytes: Vec<u8>,
    /// Current cursor index into `input_bytes`.
    index: usize,
    /// Whether we should emit a descendant whitespace token on `next()` call.
    pending_whitespace: bool,
}

impl SelectorTokenizer {
    /// Construct a tokenizer from input.
    #[inline]
    pub(crate) fn new(input: &str) -> Self {
        Self {
            input_bytes: input.as_bytes().to_vec(),
            index: 0,
            pending_whitespace: false,
        }
    }

    /// Return the next selector token, if any.
    #[inline]
    pub(crate) fn next(&mut self) -> Option<Tok> {
        self.skip_whitespace_descendant();
        if self.pending_whitespace && self.index >= self.input_bytes.len() {
            // Trailing whitespace never forms a combinator.
            self.pending_whitespace = false;
            return None;
        }
        if self.pending_whitespace {
            self.pending_whitespace = false;
            return Some(Tok::DescendantWS);
        }
        let &current = self.input_bytes.get(self.index)?;
        let token = match current {
            b'*' => {
                self.bump();
                Tok::Simple(SimpleSelector::Universal)
            }
            b'.' => self.consume_class(),
            b'#' => self.consume_id(),
            b'[' => self.consume_attr(),
            b':' => self.consume_pseudo(),
            b'>' => {
                self.bump();
                Tok::Combinator(Combinator::Child)
            }
            b'+' => {
                self.bump();
                Tok::Combinator(Combinator::AdjacentSibling)
            }
            b'~' => {
                self.bump();
                Tok::Combinator(Combinator::GeneralSibling)
            }
            _ => self.consume_type(),
        };
        Some(token)
    }

    /// Advance past one byte.
    #[inline]
    fn bump(&mut self) {
        self.index = self.index.saturating_add(1);
    }

    /// Peek the byte under the cursor.
    #[inline]
    fn peek(&self) -> Option<u8> {
        self.input_bytes.get(self.index).copied()
    }

    /// Skip whitespace and mark that a descendant combinator should be emitted next.
    #[inline]
    fn skip_whitespace_descendant(&mut self) {
        let mut saw = false;
        while self.peek().is_some_and(|byte| byte.is_ascii_whitespace()) {
            saw = true;
            self.bump();
        }
        if saw {
            self.pending_whitespace = true;
        }
    }

    /// Consume an identifier consisting of ASCII alphanumerics, '-' and '_', lowercased.
    #[inline]
    fn consume_ident(&mut self) -> String {
        let start = self.index;
        while self
            .peek()
            .is_some_and(|byte| byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_')
        {
            self.bump();
        }
        let slice = self.input_bytes.get(start..self.index).unwrap_or(&[]);
        String::from_utf8_lossy(slice).to_ascii_lowercase()
    }

    /// Parse a type selector identifier into a `SimpleSelector::Type`.
    #[inline]
    fn consume_type(&mut self) -> Tok {
        let ident = self.consume_ident();
        if ident.is_empty() {
            // Not a selector character: consume it so tokenizing always advances,
            // and poison the compound so it can never match.
            let start = self.index;
            self.bump();
            let slice = self.input_bytes.get(start..self.index).unwrap_or(&[]);
            let junk = String::from_utf8_lossy(slice).to_string();
            debug!(target: "css_selectors", "unexpected selector character {junk:?}");
            return Tok::Simple(SimpleSelector::UnsupportedPseudo(junk));
        }
        Tok::Simple(SimpleSelector::Type(ident))
    }

    /// Parse a class selector following '.' into `SimpleSelector::Class`.
    #[inline]
    fn consume_class(&mut self) -> Tok {
        // skip '.'
        self.bump();
        let ident = self.consume_ident();
        Tok::Simple(SimpleSelector::Class(ident))
    }

    /// Parse an id selector following '#' into `SimpleSelector::IdSelector`.
    #[inline]
    fn consume_id(&mut self) -> Tok {
        // skip '#'
        self.bump();
        let ident = self.consume_ident();
        Tok::Simple(SimpleSelector::IdSelector(ident))
    }

    /// Parse an attribute selector: `[name]`, `[name=value]` or `[name~=value]`,
    /// with the value quoted or unquoted. Values keep their case.
    #[inline]
    fn consume_attr(&mut self) -> Tok {
        // skip '['
        self.bump();
        self.skip_spaces();
        let name = self.consume_ident();
        self.skip_spaces();
        let operator = match self.peek() {
            Some(b'=') => {
                self.bump();
                Some(AttrOperator::Equals)
            }
            Some(b'~') if self.input_bytes.get(self.index.saturating_add(1)) == Some(&b'=') => {
                self.index = self.index.saturating_add(2);
                Some(AttrOperator::Includes)
            }
            _ => None,
        };
        let value = operator.map(|_| {
            self.skip_spaces();
            match self.peek() {
                Some(quote @ (b'"' | b'\'')) => {
                    self.bump();
                    self.consume_quoted_attr_value(quote)
                }
                _ => self.consume_unquoted_attr_value(),
            }
        });
        self.skip_spaces();
        if self.peek() == Some(b']') {
            self.bump();
        }
        let simple = match (operator, value) {
            (Some(AttrOperator::Equals), Some(value)) => SimpleSelector::AttrEquals { name, value },
            (Some(AttrOperator::Includes), Some(value)) => {
                SimpleSelector::AttrIncludes { name, value }
            }
            _ => SimpleSelector::AttrExists { name },
        };
        Tok::Simple(simple)
    }

    /// Consume an unquoted attribute value until whitespace or a closing bracket.
    #[inline]
    fn consume_unquoted_attr_value(&mut self) -> String {
        let start = self.index;
        while self
            .peek()
            .is_some_and(|byte| !byte.is_ascii_whitespace() && byte != b']')
        {
            self.bump();
        }
        let slice = self.input_bytes.get(start..self.index).unwrap_or(&[]);
        String::from_utf8_lossy(slice).to_string()
    }

    /// Consume a quoted attribute value until the matching quote byte.
    #[inline]
    fn consume_quoted_attr_value(&mut self, quote: u8) -> String {
        let start = self.index;
        while self.peek().is_some_and(|byte| byte != quote) {
            self.bump();
        }
        let slice = self.input_bytes.get(start..self.index).unwrap_or(&[]);
        let out = String::from_utf8_lossy(slice).to_string();
        if self.peek().is_some() {
            self.bump();
        }
        out
    }

    /// Parse a pseudo-class following ':'. Only `:not(<compound>)` is evaluated;
    /// anything else becomes `SimpleSelector::UnsupportedPseudo`.
    /// Selectors 3 §6.6: Pseudo-classes
    #[inline]
    fn consume_pseudo(&mut self) -> Tok {
        // skip ':' (and a second one for pseudo-elements)
        self.bump();
        if self.peek() == Some(b':') {
            self.bump();
        }
        let name = self.consume_ident();
        let argument = if self.peek() == Some(b'(') {
            self.bump();
            Some(self.consume_parenthesized())
        } else {
            None
        };
        if name == "not" {
            let parsed = parse_complex_selector(argument.as_deref().unwrap_or_default().trim());
            if parsed.rest.is_empty() && !parsed.first.simples.is_empty() {
                return Tok::Simple(SimpleSelector::Negation(Box::new(parsed.first)));
            }
        }
        debug!(target: "css_selectors", "pseudo-class :{name} is not supported");
        Tok::Simple(SimpleSelector::UnsupportedPseudo(name))
    }

    /// Consume text up to the `)` closing an already-opened parenthesis.
    #[inline]
    fn consume_parenthesized(&mut self) -> String {
        let start = self.index;
        let mut depth = 1_usize;
        while let Some(byte) = self.peek() {
            match byte {
                b'(' => depth = depth.saturating_add(1),
                b')' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
            self.bump();
        }
        let slice = self.input_bytes.get(start..self.index).unwrap_or(&[]);
        let out = String::from_utf8_lossy(slice).to_string();
        if self.peek().is_some() {
            self.bump();
        }
        out
    }

    /// Skip ASCII whitespace.
    #[inline]
    fn skip_spaces(&mut self) {
        while self.peek().is_some_and(|byte| byte.is_ascii_whitespace()) {
            self.bump();
        }
    }
}

/// Parse a selector list from CSS text.
/// Selectors 3 §3, 4, 5–8, 11
pub fn parse_selector_list(input: &str) -> SelectorList {
    let mut list = SelectorList::default();
    for part in split_top_level_commas(input) {
        let sel = parse_complex_selector(part.trim());
        if !sel.first.simples.is_empty() || !sel.rest.is_empty() {
            list.selectors.push(sel);
        }
    }
    list
}

/// Split on commas that are not nested inside brackets, parentheses or quotes.
fn split_top_level_commas(input: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0_usize;
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (offset, character) in input.char_indices() {
        match (quote, character) {
            (Some(open), close) if open == close => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(character),
            (None, '[' | '(') => depth = depth.saturating_add(1),
            (None, ']' | ')') => depth = depth.saturating_sub(1),
            (None, ',') if depth == 0 => {
                parts.push(&input[start..offset]);
                start = offset + 1;
            }
            _ => {}
        }
    }
    parts.push(&input[start..]);
    parts
}

/// Parse one complex selector (very permissive, minimal error handling).
/// Selectors 3 §5-8, §11
pub fn parse_complex_selector(input: &str) -> ComplexSelector {
    let mut tokens = SelectorTokenizer::new(input);
    let mut current = CompoundSelector::default();
    let mut first = None;
    let mut rest: Vec<(Combinator, CompoundSelector)> = Vec::new();
    let mut pending_combinator: Option<Combinator> = None;

    while let Some(token) = tokens.next() {
        match token {
            Tok::Combinator(comb) => {
                if !current.simples.is_empty() {
                    if first.is_none() {
                        first = Some(take(&mut current));
                    } else {
                        rest.push((
                            pending_combinator.unwrap_or(Combinator::Descendant),
                            take(&mut current),
                        ));
                    }
                }
                pending_combinator = Some(comb);
            }
            Tok::DescendantWS => {
                if !current.simples.is_empty() {
                    if first.is_none() {
                        first = Some(take(&mut current));
                    } else {
                        rest.push((
                            pending_combinator.unwrap_or(Combinator::Descendant),
                            take(&mut current),
                        ));
                    }
                    pending_combinator = Some(Combinator::Descendant);
                }
            }
            Tok::Simple(simple) => current.simples.push(simple),
        }
    }

    match first {
        None => ComplexSelector {
            first: current,
            rest,
        },
        Some(first_compound) => {
            if !current.simples.is_empty() {
                rest.push((
                    pending_combinator.unwrap_or(Combinator::Descendant),
                    current,
                ));
            }
            ComplexSelector {
                first: first_compound,
                rest,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr_includes(name: &str, value: &str) -> SimpleSelector {
        SimpleSelector::AttrIncludes {
            name: name.to_owned(),
            value: value.to_owned(),
        }
    }

    #[test]
    fn parses_attribute_operators() {
        let sel = parse_complex_selector(r#"[role~="REGION"][aria-labelledby]"#);
        assert!(sel.rest.is_empty());
        assert_eq!(
            sel.first.simples,
            vec![
                attr_includes("role", "REGION"),
                SimpleSelector::AttrExists {
                    name: "aria-labelledby".to_owned()
                },
            ]
        );

        let sel = parse_complex_selector(r#"[role="link"]"#);
        assert_eq!(
            sel.first.simples,
            vec![SimpleSelector::AttrEquals {
                name: "role".to_owned(),
                value: "link".to_owned()
            }]
        );
    }

    #[test]
    fn parses_negation() {
        let sel = parse_complex_selector("aside:not([role])");
        let inner = CompoundSelector {
            simples: vec![SimpleSelector::AttrExists {
                name: "role".to_owned(),
            }],
        };
        assert_eq!(
            sel.first.simples,
            vec![
                SimpleSelector::Type("aside".to_owned()),
                SimpleSelector::Negation(Box::new(inner)),
            ]
        );
    }

    #[test]
    fn parses_combinators_with_and_without_spaces() {
        let spaced = parse_complex_selector("nav > ul  a");
        let tight = parse_complex_selector("nav>ul a");
        assert_eq!(spaced, tight);
        assert_eq!(spaced.rest.len(), 2);
        assert_eq!(spaced.rest[0].0, Combinator::Child);
        assert_eq!(spaced.rest[1].0, Combinator::Descendant);
    }

    #[test]
    fn list_split_ignores_commas_inside_brackets() {
        let list = parse_selector_list(r#"h1, [title="a,b"], :not(a, b) ,h2 "#);
        assert_eq!(list.len(), 4);
        assert_eq!(
            list.selectors[1].first.simples,
            vec![SimpleSelector::AttrEquals {
                name: "title".to_owned(),
                value: "a,b".to_owned()
            }]
        );
    }

    #[test]
    fn junk_characters_terminate_and_never_match() {
        let sel = parse_complex_selector("h1!");
        assert_eq!(sel.first.simples.len(), 2);
        assert!(matches!(
            sel.first.simples[1],
            SimpleSelector::UnsupportedPseudo(_)
        ));
    }
}
