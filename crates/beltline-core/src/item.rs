use crate::component::ComponentSet;
use crate::id::ComponentId;
use serde::{Deserialize, Serialize};

/// The value a station's slot holds at any instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    #[default]
    Empty,
    Component(ComponentId),
    FinishedProduct,
}

impl Slot {
    pub fn is_empty(self) -> bool {
        matches!(self, Slot::Empty)
    }

    /// The component carried by this slot, if any.
    pub fn component(self) -> Option<ComponentId> {
        match self {
            Slot::Component(id) => Some(id),
            _ => None,
        }
    }

    /// Render this slot the way the debug trace shows it: a blank for an
    /// empty slot, `P` for a product, the symbol for a component.
    pub fn render(self, components: &ComponentSet) -> &str {
        match self {
            Slot::Empty => " ",
            Slot::FinishedProduct => "P",
            Slot::Component(id) => components.symbol(id),
        }
    }
}

/// What enters the line at the entry station on one tick.
///
/// Narrower than [`Slot`]: a finished product can never arrive
/// from outside the line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Arrival {
    #[default]
    Nothing,
    Component(ComponentId),
}

impl Arrival {
    pub fn component(self) -> Option<ComponentId> {
        match self {
            Arrival::Component(id) => Some(id),
            Arrival::Nothing => None,
        }
    }
}

impl From<Arrival> for Slot {
    fn from(arrival: Arrival) -> Self {
        match arrival {
            Arrival::Nothing => Slot::Empty,
            Arrival::Component(id) => Slot::Component(id),
        }
    }
}

impl From<ComponentId> for Arrival {
    fn from(id: ComponentId) -> Self {
        Arrival::Component(id)
    }
}
