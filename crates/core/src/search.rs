//! Bounded-depth tree search
//!
//! Searches walk the element tree pre-order, depth-first, visiting children
//! in the order the remote side reports them. The root is depth 0 and no
//! node deeper than `max_depth` is visited. A node whose children cannot be
//! read (stale handle, no children attribute) is treated as a leaf.

use axbridge_domain::constants::{roles, DEFAULT_SEARCH_MAX_DEPTH};
use axbridge_domain::{AxError, AxResult, SearchConfig};
use tracing::{trace, warn};

use crate::attribute::keys;
use crate::element::Element;

/// Search settings carried by a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Depth budget in edges from the search root.
    pub max_depth: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self { max_depth: DEFAULT_SEARCH_MAX_DEPTH }
    }
}

impl From<&SearchConfig> for SearchOptions {
    fn from(config: &SearchConfig) -> Self {
        Self { max_depth: config.max_depth }
    }
}

type Predicate<'a> = &'a dyn Fn(&Element) -> bool;

impl Element {
    /// First element matching `predicate`, searching up to the session's
    /// default depth.
    pub fn find_first(&self, predicate: impl Fn(&Element) -> bool) -> AxResult<Element> {
        self.find_first_within(self.session().search_options().max_depth, predicate)
    }

    pub fn find_first_within(
        &self,
        max_depth: usize,
        predicate: impl Fn(&Element) -> bool,
    ) -> AxResult<Element> {
        self.session().ensure_granted()?;
        first_match(self, &predicate, max_depth).ok_or_else(|| {
            AxError::element_not_found(format!(
                "no element matching predicate within depth {max_depth}"
            ))
        })
    }

    /// Every element matching `predicate` in pre-order, searching up to the
    /// session's default depth. Empty when nothing matches.
    pub fn find_all(&self, predicate: impl Fn(&Element) -> bool) -> Vec<Element> {
        self.find_all_within(self.session().search_options().max_depth, predicate)
    }

    pub fn find_all_within(
        &self,
        max_depth: usize,
        predicate: impl Fn(&Element) -> bool,
    ) -> Vec<Element> {
        if self.session().ensure_granted().is_err() {
            return Vec::new();
        }
        let mut found = Vec::new();
        collect_matches(self, &predicate, max_depth, &mut found);
        found
    }

    pub fn find_first_by_role(&self, role: &str) -> AxResult<Element> {
        self.find_first(|e| e.role().as_deref() == Some(role))
            .map_err(|err| describe(err, || format!("role={role}")))
    }

    pub fn find_first_by_role_and_identifier(
        &self,
        role: &str,
        identifier: &str,
    ) -> AxResult<Element> {
        self.find_first(|e| {
            let (r, id) = e.attributes((keys::ROLE, keys::IDENTIFIER));
            r.as_deref() == Some(role) && id.as_deref() == Some(identifier)
        })
        .map_err(|err| describe(err, || format!("role={role}, identifier={identifier}")))
    }

    pub fn find_first_by_role_and_title(&self, role: &str, title: &str) -> AxResult<Element> {
        self.find_first(|e| {
            let (r, t) = e.attributes((keys::ROLE, keys::TITLE));
            r.as_deref() == Some(role) && t.as_deref() == Some(title)
        })
        .map_err(|err| describe(err, || format!("role={role}, title={title}")))
    }

    pub fn find_all_by_role(&self, role: &str) -> Vec<Element> {
        self.find_all(|e| e.role().as_deref() == Some(role))
    }

    pub fn find_button(&self, title: &str) -> AxResult<Element> {
        self.find_first_by_role_and_title(roles::BUTTON, title)
    }

    /// First text field, optionally restricted to one identifier.
    pub fn find_text_field(&self, identifier: Option<&str>) -> AxResult<Element> {
        match identifier {
            Some(identifier) => self.find_first_by_role_and_identifier(roles::TEXT_FIELD, identifier),
            None => self.find_first_by_role(roles::TEXT_FIELD),
        }
    }

    /// Children for traversal; unreadable children end the branch.
    fn search_children(&self) -> Vec<Element> {
        match self.get(&keys::CHILDREN) {
            Ok(children) => children,
            Err(err) if err.is_stale_reference() => {
                trace!(element = ?self.raw(), "skipping stale subtree");
                Vec::new()
            }
            Err(err) => {
                if !err.is_absence() && err != AxError::AttributeUnsupported {
                    warn!(error = %err, "children unreadable; treating node as leaf");
                }
                Vec::new()
            }
        }
    }
}

fn first_match(node: &Element, predicate: Predicate<'_>, remaining: usize) -> Option<Element> {
    if predicate(node) {
        return Some(node.clone());
    }
    if remaining == 0 {
        return None;
    }
    node.search_children()
        .iter()
        .find_map(|child| first_match(child, predicate, remaining - 1))
}

fn collect_matches(
    node: &Element,
    predicate: Predicate<'_>,
    remaining: usize,
    found: &mut Vec<Element>,
) {
    if predicate(node) {
        found.push(node.clone());
    }
    if remaining == 0 {
        return;
    }
    for child in node.search_children() {
        collect_matches(&child, predicate, remaining - 1, found);
    }
}

/// Replace the generic not-found description with the search criteria.
fn describe(err: AxError, criteria: impl FnOnce() -> String) -> AxError {
    match err {
        AxError::ElementNotFound { .. } => AxError::element_not_found(criteria()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_depth() {
        assert_eq!(SearchOptions::default().max_depth, 10);
        assert_eq!(SearchOptions::from(&SearchConfig { max_depth: 2 }).max_depth, 2);
    }

    #[test]
    fn test_describe_keeps_other_errors() {
        let err = describe(AxError::AccessibilityDisabled, || "role=AXButton".to_string());
        assert_eq!(err, AxError::AccessibilityDisabled);

        let err = describe(AxError::element_not_found("x"), || "role=AXButton".to_string());
        assert_eq!(err, AxError::element_not_found("role=AXButton"));
    }
}
