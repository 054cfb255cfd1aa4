use crate::catalog::{Category, SelectorCatalog};
use crate::host::ElementQuery;
use log::{trace, warn};

/// A navigable element and the category it was classified into.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScannedNode<E> {
    pub element: E,
    pub category: Category,
}

/// Collect every navigable element in document order, each tagged with
/// exactly one category. Rebuilt on every call; nothing is cached.
pub fn scan<H: ElementQuery>(host: &H, catalog: &SelectorCatalog) -> Vec<ScannedNode<H::Element>> {
    let candidates = host.query_all(catalog.union());
    let mut nodes = Vec::with_capacity(candidates.len());
    for element in candidates {
        let Some(category) = catalog.classify(host, element) else {
            warn!(
                target: "page_nav",
                "{} matched the catalog but no category; skipping",
                host.describe_element(element)
            );
            continue;
        };
        nodes.push(ScannedNode { element, category });
    }
    trace!(target: "page_nav", "scanned {} navigable element(s)", nodes.len());
    nodes
}
