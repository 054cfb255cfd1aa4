//! Which elements count as navigable, per category.

use crate::host::ElementQuery;
use core::fmt;
use css_selectors::{SelectorList, parse_selector_list};

/// The kinds of navigable elements.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Heading,
    Link,
    Landmark,
}

const HEADING_PATTERNS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

const LINK_PATTERNS: &[&str] = &["a", r#"[role="link"]"#];

// Role tokens match case-sensitively, hence the upper-case twins.
const LANDMARK_PATTERNS: &[&str] = &[
    "aside:not([role])",
    r#"[role~="complementary"]"#,
    r#"[role~="COMPLEMENTARY"]"#,
    "form[aria-labelledby]",
    "form[aria-label]",
    "form[title]",
    r#"[role~="form"]"#,
    "footer",
    r#"[role~="contentinfo"]"#,
    r#"[role~="CONTENTINFO"]"#,
    r#"[role~="application"]"#,
    r#"[role~="APPLICATION"]"#,
    "nav",
    r#"[role~="navigation"]"#,
    r#"[role~="NAVIGATION"]"#,
    r#"[role~="region"][aria-labelledby]"#,
    r#"[role~="REGION"][aria-labelledby]"#,
    r#"[role~="region"][aria-label]"#,
    r#"[role~="REGION"][aria-label]"#,
    "section[aria-labelledby]",
    "section[aria-label]",
    "header",
    r#"[role~="banner"]"#,
    r#"[role~="BANNER"]"#,
    r#"[role~="search"]"#,
    r#"[role~="SEARCH"]"#,
    "main",
    r#"[role~="main"]"#,
    r#"[role~="MAIN"]"#,
];

impl Category {
    /// Every category, in classification precedence order.
    pub const ALL: [Self; 3] = [Self::Heading, Self::Link, Self::Landmark];

    /// The selector patterns identifying this category.
    pub const fn patterns(self) -> &'static [&'static str] {
        match self {
            Self::Heading => HEADING_PATTERNS,
            Self::Link => LINK_PATTERNS,
            Self::Landmark => LANDMARK_PATTERNS,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Heading => "heading",
            Self::Link => "link",
            Self::Landmark => "landmark",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Heading => 0,
            Self::Link => 1,
            Self::Landmark => 2,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(self.label())
    }
}

/// Parsed selector lists for every category plus their union.
///
/// Built once; patterns are static so parsing cannot fail, though a pattern
/// the selector engine does not understand would simply never match.
#[derive(Clone, Debug)]
pub struct SelectorCatalog {
    by_category: [SelectorList; 3],
    union: SelectorList,
}

impl Default for SelectorCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectorCatalog {
    pub fn new() -> Self {
        let by_category = Category::ALL.map(|category| {
            parse_selector_list(&category.patterns().join(", "))
        });
        let union = SelectorList::union(&by_category);
        Self { by_category, union }
    }

    /// Selectors for one category.
    pub fn selectors(&self, category: Category) -> &SelectorList {
        &self.by_category[category.index()]
    }

    /// The union of every category's selectors.
    pub const fn union(&self) -> &SelectorList {
        &self.union
    }

    /// First category (in precedence order) whose selectors match `element`.
    pub fn classify<H: ElementQuery>(&self, host: &H, element: H::Element) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|category| host.matches_any(element, self.selectors(*category)))
    }
}
