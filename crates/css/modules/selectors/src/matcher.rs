//! CSS selector matching engine.
//! Selectors Level 3: <https://www.w3.org/TR/selectors-3/>

use crate::{
    Combinator, ComplexSelector, CompoundSelector, ElementAdapter, SelectorList, SimpleSelector,
};

/// Match a selector list against an element.
/// Selectors 3 §3, 4
pub fn matches_selector_list<A: ElementAdapter>(
    adapter: &A,
    element: A::Handle,
    list: &SelectorList,
) -> bool {
    list.selectors
        .iter()
        .any(|selector_item| matches_complex(adapter, element, selector_item))
}

/// Match a complex selector against an element.
/// Selectors 3 §3, 11: Right-to-left matching strategy
pub fn matches_complex<A: ElementAdapter>(
    adapter: &A,
    element: A::Handle,
    sel: &ComplexSelector,
) -> bool {
    let rightmost = sel.rest.last().map_or(&sel.first, |pair| &pair.1);
    if !matches_compound(adapter, element, rightmost) {
        return false;
    }

    // Walk the remaining compounds right-to-left. `rest[index].0` joins the
    // compound on its left (`rest[index - 1].1`, or `first`) to `rest[index].1`.
    let mut target = element;
    for index in (0..sel.rest.len()).rev() {
        let combinator = sel.rest[index].0;
        let left = if index == 0 {
            &sel.first
        } else {
            &sel.rest[index - 1].1
        };
        match match_combinator_find(adapter, combinator, left, target) {
            Some(next_target) => target = next_target,
            None => return false,
        }
    }
    true
}

/// Match a compound selector against a single element.
/// Selectors 3 §5–8, 6.6.7
pub fn matches_compound<A: ElementAdapter>(
    adapter: &A,
    element: A::Handle,
    compound: &CompoundSelector,
) -> bool {
    compound
        .simples
        .iter()
        .all(|simple| matches_simple(adapter, element, simple))
}

/// Match one simple selector.
/// Selectors 3 §5–8, 6.6.7
fn matches_simple<A: ElementAdapter>(
    adapter: &A,
    element: A::Handle,
    simple: &SimpleSelector,
) -> bool {
    match simple {
        SimpleSelector::Universal => true,
        SimpleSelector::Type(type_name) => {
            adapter.tag_name(element) == type_name.as_str()
        }
        SimpleSelector::Class(class_name) => adapter.has_class(element, class_name),
        SimpleSelector::IdSelector(id_value) => adapter
            .element_id(element)
            .is_some_and(|value| value == id_value.as_str()),
        SimpleSelector::AttrExists { name } => adapter.attr(element, name).is_some(),
        SimpleSelector::AttrEquals { name, value } => adapter
            .attr(element, name)
            .is_some_and(|attr_value| attr_value == value.as_str()),
        SimpleSelector::AttrIncludes { name, value } => {
            // Selectors 3 §8.1: an empty or whitespace-bearing value never matches.
            if value.is_empty() || value.contains(char::is_whitespace) {
                return false;
            }
            adapter.attr(element, name).is_some_and(|attr_value| {
                attr_value
                    .split_ascii_whitespace()
                    .any(|token| token == value.as_str())
            })
        }
        SimpleSelector::Negation(inner) => !matches_compound(adapter, element, inner),
        SimpleSelector::UnsupportedPseudo(_) => false,
    }
}

/// Helper: Evaluate a combinator between two compounds, looking for a match and returning the matched left element.
/// Selectors 3 §11: Combinators
fn match_combinator_find<A: ElementAdapter>(
    adapter: &A,
    comb: Combinator,
    left_comp: &CompoundSelector,
    right_element: A::Handle,
) -> Option<A::Handle> {
    match comb {
        Combinator::Descendant => {
            let mut current_parent = adapter.parent(right_element);
            while let Some(ancestor_element) = current_parent {
                if matches_compound(adapter, ancestor_element, left_comp) {
                    return Some(ancestor_element);
                }
                current_parent = adapter.parent(ancestor_element);
            }
            None
        }
        Combinator::Child => adapter
            .parent(right_element)
            .filter(|parent_el| matches_compound(adapter, *parent_el, left_comp)),
        Combinator::AdjacentSibling => adapter
            .previous_sibling_element(right_element)
            .filter(|prev_el| matches_compound(adapter, *prev_el, left_comp)),
        Combinator::GeneralSibling => {
            let mut current_sibling = adapter.previous_sibling_element(right_element);
            while let Some(sibling_element) = current_sibling {
                if matches_compound(adapter, sibling_element, left_comp) {
                    return Some(sibling_element);
                }
                current_sibling = adapter.previous_sibling_element(sibling_element);
            }
            None
        }
    }
}
