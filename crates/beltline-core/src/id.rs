use serde::{Deserialize, Serialize};

/// Identifies a component type within a [`ComponentSet`](crate::component::ComponentSet).
///
/// A dense index: the first configured symbol is `ComponentId(0)`, the next
/// `ComponentId(1)`, and so on. Cheap to copy and compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ComponentId(pub u16);

/// Most component types a line can be configured with.
pub const MAX_COMPONENTS: usize = u16::MAX as usize + 1;

impl ComponentId {
    /// The id at position `index`, or `None` past [`MAX_COMPONENTS`].
    #[inline]
    pub fn from_index(index: usize) -> Option<Self> {
        u16::try_from(index).ok().map(Self)
    }

    /// Position of this component in per-type tables.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_id_equality() {
        let a = ComponentId(0);
        let b = ComponentId(0);
        let c = ComponentId(1);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn from_index_stops_at_the_cap() {
        assert_eq!(ComponentId::from_index(3), Some(ComponentId(3)));
        assert_eq!(
            ComponentId::from_index(MAX_COMPONENTS - 1),
            Some(ComponentId(u16::MAX))
        );
        assert_eq!(ComponentId::from_index(MAX_COMPONENTS), None);
    }

    #[test]
    fn component_id_orders_by_index() {
        assert!(ComponentId(0) < ComponentId(1));
        assert_eq!(ComponentId(7).index(), 7);
    }
}
