//! Wrap-around search over a scanned element list.
//!
//! Pure functions of the list and the current position: no host access.

use crate::catalog::Category;
use crate::scanner::ScannedNode;
use log::debug;

/// Which way category keys move through the document.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    /// Document order.
    #[default]
    Forward,
    /// Reverse document order.
    Backward,
}

/// The element a search landed on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TraversalHit<E> {
    pub node: ScannedNode<E>,
    /// The search passed the end of the list and resumed from the start.
    pub wrapped: bool,
    /// The current element was no longer in the list, so the search began
    /// from the start.
    pub restarted: bool,
}

/// First element of `category` after `current`, wrapping around once.
///
/// The wrap pass includes `current` itself, so a lone match re-selects
/// itself. When `current` is absent from `nodes` the search starts at the
/// beginning and does not wrap.
pub fn find_next<E: Copy + Eq>(
    category: Category,
    nodes: &[ScannedNode<E>],
    current: Option<E>,
) -> Option<TraversalHit<E>> {
    let position = current.and_then(|cur| nodes.iter().position(|node| node.element == cur));
    let restarted = current.is_some() && position.is_none();
    if restarted {
        debug!(target: "page_nav", "current element left the document; searching from the start");
    }
    let is_match = |node: &&ScannedNode<E>| node.category == category;

    let first_pass = position.map_or(0, |index| index + 1);
    if let Some(node) = nodes.iter().skip(first_pass).find(is_match) {
        return Some(TraversalHit {
            node: *node,
            wrapped: false,
            restarted,
        });
    }
    let index = position?;
    nodes
        .iter()
        .take(index + 1)
        .find(is_match)
        .map(|node| TraversalHit {
            node: *node,
            wrapped: true,
            restarted,
        })
}

/// Mirror of [`find_next`] over the list in reverse order.
pub fn find_prev<E: Copy + Eq>(
    category: Category,
    nodes: &[ScannedNode<E>],
    current: Option<E>,
) -> Option<TraversalHit<E>> {
    let reversed: Vec<ScannedNode<E>> = nodes.iter().rev().copied().collect();
    find_next(category, &reversed, current)
}

pub fn find_node<E: Copy + Eq>(
    direction: Direction,
    category: Category,
    nodes: &[ScannedNode<E>],
    current: Option<E>,
) -> Option<TraversalHit<E>> {
    match direction {
        Direction::Forward => find_next(category, nodes, current),
        Direction::Backward => find_prev(category, nodes, current),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn node(element: u32, category: Category) -> ScannedNode<u32> {
        ScannedNode { element, category }
    }

    fn headings_between_links() -> Vec<ScannedNode<u32>> {
        vec![
            node(1, Category::Heading),
            node(2, Category::Link),
            node(3, Category::Heading),
            node(4, Category::Landmark),
            node(5, Category::Heading),
        ]
    }

    fn walk(direction: Direction, nodes: &[ScannedNode<u32>], steps: usize) -> Vec<(u32, bool)> {
        let mut current = None;
        let mut seen = Vec::new();
        for _ in 0..steps {
            let Some(hit) = find_node(direction, Category::Heading, nodes, current) else {
                break;
            };
            current = Some(hit.node.element);
            seen.push((hit.node.element, hit.wrapped));
        }
        seen
    }

    #[test]
    fn forward_cycles_and_flags_the_wrap() {
        let nodes = headings_between_links();
        assert_eq!(
            walk(Direction::Forward, &nodes, 4),
            vec![(1, false), (3, false), (5, false), (1, true)]
        );
    }

    #[test]
    fn backward_starts_from_the_end() {
        let nodes = headings_between_links();
        assert_eq!(
            walk(Direction::Backward, &nodes, 4),
            vec![(5, false), (3, false), (1, false), (5, true)]
        );
    }

    #[test]
    fn switching_direction_mid_cycle() {
        let nodes = headings_between_links();
        let hit = find_prev(Category::Heading, &nodes, Some(5));
        assert_eq!(hit.map(|hit| hit.node.element), Some(3));
    }

    #[test]
    fn current_of_another_category_is_a_valid_anchor() {
        let nodes = headings_between_links();
        let hit = find_next(Category::Heading, &nodes, Some(4));
        assert_eq!(hit.map(|hit| (hit.node.element, hit.wrapped)), Some((5, false)));
        let hit = find_next(Category::Link, &nodes, Some(4));
        assert_eq!(hit.map(|hit| (hit.node.element, hit.wrapped)), Some((2, true)));
    }

    #[test]
    fn stale_current_restarts_without_wrapping() {
        let nodes = headings_between_links();
        let hit = find_next(Category::Heading, &nodes, Some(99));
        assert_eq!(
            hit,
            Some(TraversalHit {
                node: node(1, Category::Heading),
                wrapped: false,
                restarted: true,
            })
        );
        let hit = find_prev(Category::Landmark, &nodes, Some(99));
        assert_eq!(hit.map(|hit| hit.node.element), Some(4));
    }

    #[test]
    fn lone_match_selects_itself_again() {
        let nodes = headings_between_links();
        let hit = find_next(Category::Landmark, &nodes, Some(4));
        assert_eq!(hit.map(|hit| (hit.node.element, hit.wrapped)), Some((4, true)));
    }

    #[test]
    fn no_candidates_means_no_hit() {
        let nodes = headings_between_links();
        assert_eq!(find_next::<u32>(Category::Heading, &[], None), None);
        let links_only = vec![node(2, Category::Link)];
        assert_eq!(find_next(Category::Heading, &links_only, Some(2)), None);
        assert_eq!(find_prev(Category::Heading, &links_only, None), None);
        assert!(find_next(Category::Heading, &nodes, None).is_some());
    }
}
