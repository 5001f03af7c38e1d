use crate::core::format::FitFormat;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An item fitted to a low, mid or high slot, optionally loaded with a charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    pub name: String,
    pub charge: Option<String>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            charge: None,
        }
    }

    pub fn with_charge(name: impl Into<String>, charge: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            charge: Some(charge.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rig {
    pub name: String,
}

impl Rig {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Which of the two modular-component collections a [`Component`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// Ship subsystem (strategic cruisers).
    Subsystem,
    /// Structure service module.
    ServiceSlot,
}

/// A subsystem or service module. Both share one record shape; `kind` keeps
/// them apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub kind: ComponentKind,
    pub name: String,
}

impl Component {
    pub fn subsystem(name: impl Into<String>) -> Self {
        Self {
            kind: ComponentKind::Subsystem,
            name: name.into(),
        }
    }

    pub fn service_slot(name: impl Into<String>) -> Self {
        Self {
            kind: ComponentKind::ServiceSlot,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeployableKind {
    Drone,
    Fighter,
}

/// A drone or fighter stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployable {
    pub kind: DeployableKind,
    pub name: String,
    pub quantity: u32,
}

impl Deployable {
    pub fn drone(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            kind: DeployableKind::Drone,
            name: name.into(),
            quantity,
        }
    }

    pub fn fighter(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            kind: DeployableKind::Fighter,
            name: name.into(),
            quantity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cargo {
    pub name: String,
    pub quantity: u32,
}

impl Cargo {
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotRack {
    Low,
    Mid,
    High,
}

/// One parsed line, tagged with where it goes in a [`Fit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FitItem {
    Module(SlotRack, Module),
    Rig(Rig),
    Component(Component),
    Deployable(Deployable),
    Cargo(Cargo),
}

/// A complete loadout: hull, label and every fitted or carried item, in
/// input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fit {
    pub ship: String,
    pub name: String,
    pub low_slots: Vec<Module>,
    pub mid_slots: Vec<Module>,
    pub high_slots: Vec<Module>,
    pub rigs: Vec<Rig>,
    pub subsystems: Vec<Component>,
    pub service_slots: Vec<Component>,
    pub drones: Vec<Deployable>,
    pub fighters: Vec<Deployable>,
    pub cargo: Vec<Cargo>,
    pub is_structure: bool,
}

impl Fit {
    pub fn new(ship: impl Into<String>, name: impl Into<String>, is_structure: bool) -> Self {
        Self {
            ship: ship.into(),
            name: name.into(),
            is_structure,
            ..Self::default()
        }
    }

    /// Appends an item to the collection its tag selects.
    pub fn push(&mut self, item: FitItem) {
        match item {
            FitItem::Module(SlotRack::Low, module) => self.low_slots.push(module),
            FitItem::Module(SlotRack::Mid, module) => self.mid_slots.push(module),
            FitItem::Module(SlotRack::High, module) => self.high_slots.push(module),
            FitItem::Rig(rig) => self.rigs.push(rig),
            FitItem::Component(component) => match component.kind {
                ComponentKind::Subsystem => self.subsystems.push(component),
                ComponentKind::ServiceSlot => self.service_slots.push(component),
            },
            FitItem::Deployable(deployable) => match deployable.kind {
                DeployableKind::Drone => self.drones.push(deployable),
                DeployableKind::Fighter => self.fighters.push(deployable),
            },
            FitItem::Cargo(cargo) => self.cargo.push(cargo),
        }
    }

    pub fn modules(&self, rack: SlotRack) -> &[Module] {
        match rack {
            SlotRack::Low => &self.low_slots,
            SlotRack::Mid => &self.mid_slots,
            SlotRack::High => &self.high_slots,
        }
    }

    /// Service slots for structures, subsystems for ships.
    pub fn components(&self) -> &[Component] {
        if self.is_structure {
            &self.service_slots
        } else {
            &self.subsystems
        }
    }

    pub fn item_count(&self) -> usize {
        self.low_slots.len()
            + self.mid_slots.len()
            + self.high_slots.len()
            + self.rigs.len()
            + self.subsystems.len()
            + self.service_slots.len()
            + self.drones.len()
            + self.fighters.len()
            + self.cargo.len()
    }
}

/// Category identifier from the item catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub u32);

impl CategoryId {
    pub const DRONE: CategoryId = CategoryId(18);
    pub const SUBSYSTEM: CategoryId = CategoryId(32);
    pub const STRUCTURE: CategoryId = CategoryId(65);
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The only distinctions the parser draws between catalog categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemCategory {
    Structure,
    Drone,
    Subsystem,
    /// Any other code, or no catalog entry at all.
    Other,
}

impl ItemCategory {
    pub fn of(code: Option<CategoryId>) -> Self {
        match code {
            Some(CategoryId::STRUCTURE) => ItemCategory::Structure,
            Some(CategoryId::DRONE) => ItemCategory::Drone,
            Some(CategoryId::SUBSYSTEM) => ItemCategory::Subsystem,
            _ => ItemCategory::Other,
        }
    }
}

/// A fit rendered into its target format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub format: FitFormat,
    pub text: String,
}
