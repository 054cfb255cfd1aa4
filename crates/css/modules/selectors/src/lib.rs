//! Selector parsing and matching over any element tree.
//!
//! Covers the part of Selectors Level 3 (<https://www.w3.org/TR/selectors-3/>)
//! that role and landmark queries rely on: type, class, id and attribute
//! selectors (`[a]`, `[a=v]`, `[a~=v]`), `:not()` over one compound, the four
//! combinators, and comma-separated lists. Other pseudo-classes parse but
//! never match.

mod matcher;
mod parser;

pub use matcher::{matches_complex, matches_compound, matches_selector_list};
pub use parser::{parse_complex_selector, parse_selector_list};

/// Read-only view of a document tree, as seen by the matcher.
pub trait ElementAdapter {
    type Handle: Copy + Eq;

    /// Parent element; `None` at the top of the element tree.
    fn parent(&self, element: Self::Handle) -> Option<Self::Handle>;

    /// Nearest preceding sibling that is an element.
    fn previous_sibling_element(&self, element: Self::Handle) -> Option<Self::Handle>;

    /// ASCII-lowercase tag name.
    fn tag_name(&self, element: Self::Handle) -> &str;

    fn attr(&self, element: Self::Handle, name: &str) -> Option<&str>;

    fn element_id(&self, element: Self::Handle) -> Option<&str> {
        self.attr(element, "id")
    }

    /// Whether the `class` attribute contains `class` as a whitespace token.
    fn has_class(&self, element: Self::Handle, class: &str) -> bool {
        self.attr(element, "class")
            .is_some_and(|classes| classes.split_ascii_whitespace().any(|token| token == class))
    }
}

/// One condition on a single element (Selectors 3 §5 to §8, §6.6.7).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SimpleSelector {
    Type(String),
    Class(String),
    IdSelector(String),
    /// `[name]`
    AttrExists { name: String },
    /// `[name=value]`, exact and case-sensitive
    AttrEquals { name: String, value: String },
    /// `[name~=value]`: `value` is one of the whitespace-separated tokens
    AttrIncludes { name: String, value: String },
    /// `:not(compound)`
    Negation(Box<CompoundSelector>),
    /// A pseudo-class (or stray character) that is kept but never matches.
    UnsupportedPseudo(String),
    /// `*`
    Universal,
}

/// Simple selectors that must all hold for the same element.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct CompoundSelector {
    pub simples: Vec<SimpleSelector>,
}

/// Tree relationship between two compounds (Selectors 3 §11).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Combinator {
    /// whitespace
    Descendant,
    /// `>`
    Child,
    /// `+`
    AdjacentSibling,
    /// `~`
    GeneralSibling,
}

/// Compounds joined by combinators, written left to right.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ComplexSelector {
    pub first: CompoundSelector,
    pub rest: Vec<(Combinator, CompoundSelector)>,
}

/// A comma-separated group; matches when any member does.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SelectorList {
    pub selectors: Vec<ComplexSelector>,
}

impl SelectorList {
    /// Concatenate several lists into one group, preserving order.
    pub fn union<'list, I>(lists: I) -> Self
    where
        I: IntoIterator<Item = &'list Self>,
    {
        let selectors = lists
            .into_iter()
            .flat_map(|list| list.selectors.iter().cloned())
            .collect();
        Self { selectors }
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selectors.len()
    }
}
