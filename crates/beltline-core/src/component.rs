//! The vocabulary of component types a line is configured with.
//!
//! Symbols are user-facing strings (`"A"`, `"B"`, ...). Inside the engine
//! every component is a dense [`ComponentId`], so per-type state (worker
//! hands, missed counters) is a plain `Vec` indexed by id.

use std::collections::HashSet;

use crate::id::{ComponentId, MAX_COMPONENTS};
use serde::{Deserialize, Serialize};

/// An ordered, duplicate-free set of component symbols.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentSet {
    symbols: Vec<String>,
}

impl ComponentSet {
    /// Build a set from symbols, dropping later duplicates.
    ///
    /// The order of first occurrence is kept, which makes ids (and thus
    /// reports) deterministic for a given input. At most
    /// [`MAX_COMPONENTS`] distinct symbols are supported; symbols past the
    /// cap never get an id.
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut unique: Vec<String> = Vec::new();
        for symbol in symbols {
            let symbol = symbol.into();
            if seen.insert(symbol.clone()) {
                unique.push(symbol);
            }
        }
        debug_assert!(
            unique.len() <= MAX_COMPONENTS,
            "{} component types exceed the cap of {MAX_COMPONENTS}",
            unique.len()
        );
        Self { symbols: unique }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Look up the id for a symbol.
    pub fn id(&self, symbol: &str) -> Option<ComponentId> {
        self.symbols
            .iter()
            .position(|s| s == symbol)
            .and_then(ComponentId::from_index)
    }

    /// The symbol for an id. Ids outside the set render as `"?"`.
    pub fn symbol(&self, id: ComponentId) -> &str {
        self.symbols.get(id.index()).map(String::as_str).unwrap_or("?")
    }

    /// All ids in configured order.
    pub fn ids(&self) -> impl Iterator<Item = ComponentId> + '_ {
        (0..self.symbols.len()).map_while(ComponentId::from_index)
    }

    /// All symbols in configured order.
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_follow_first_occurrence() {
        let set = ComponentSet::new(["B", "A", "B"]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.id("B"), Some(ComponentId(0)));
        assert_eq!(set.id("A"), Some(ComponentId(1)));
        assert_eq!(set.id("C"), None);
    }

    #[test]
    fn symbol_round_trips_through_id() {
        let set = ComponentSet::new(["bolt", "plate", "gear"]);
        for id in set.ids() {
            assert_eq!(set.id(set.symbol(id)), Some(id));
        }
    }

    #[test]
    fn unknown_id_renders_placeholder() {
        let set = ComponentSet::new(["A"]);
        assert_eq!(set.symbol(ComponentId(3)), "?");
    }

    #[test]
    fn largest_set_ends_at_the_last_id() {
        let set = ComponentSet::new((0..MAX_COMPONENTS).map(|i| format!("c{i}")));
        assert_eq!(set.ids().count(), MAX_COMPONENTS);
        assert_eq!(set.ids().last(), Some(ComponentId(u16::MAX)));
        assert_eq!(set.id("c65535"), Some(ComponentId(u16::MAX)));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "exceed the cap")]
    fn oversized_set_is_rejected() {
        ComponentSet::new((0..=MAX_COMPONENTS).map(|i| format!("c{i}")));
    }

    #[test]
    fn empty_set() {
        let set = ComponentSet::new(Vec::<String>::new());
        assert!(set.is_empty());
        assert_eq!(set.ids().count(), 0);
    }
}
