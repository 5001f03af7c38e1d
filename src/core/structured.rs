use crate::domain::model::{Cargo, Component, ComponentKind, Deployable, DeployableKind, Fit, Module, Rig};
use crate::utils::error::{FitError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleEntry {
    pub name: String,
    #[serde(default)]
    pub charge: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameEntry {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityEntry {
    pub name: String,
    pub quantity: u32,
}

/// The structured form shared by the JSON and YAML serializers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitDocument {
    pub ship: String,
    pub name: String,
    #[serde(default)]
    pub low_slots: Vec<ModuleEntry>,
    #[serde(default)]
    pub mid_slots: Vec<ModuleEntry>,
    #[serde(default)]
    pub high_slots: Vec<ModuleEntry>,
    #[serde(default)]
    pub rigs: Vec<NameEntry>,
    #[serde(default)]
    pub subsystems: Vec<NameEntry>,
    #[serde(default)]
    pub service_slots: Vec<NameEntry>,
    #[serde(default)]
    pub drones: Vec<QuantityEntry>,
    #[serde(default)]
    pub fighters: Vec<QuantityEntry>,
    #[serde(default)]
    pub cargo: Vec<QuantityEntry>,
    #[serde(default)]
    pub is_structure: bool,
}

fn module_entries(modules: &[Module]) -> Vec<ModuleEntry> {
    modules
        .iter()
        .map(|m| ModuleEntry {
            name: m.name.clone(),
            charge: m.charge.clone(),
        })
        .collect()
}

fn component_entries(components: &[Component]) -> Vec<NameEntry> {
    components
        .iter()
        .map(|c| NameEntry { name: c.name.clone() })
        .collect()
}

fn deployable_entries(deployables: &[Deployable]) -> Vec<QuantityEntry> {
    deployables
        .iter()
        .map(|d| QuantityEntry {
            name: d.name.clone(),
            quantity: d.quantity,
        })
        .collect()
}

fn checked_quantity(field: &str, entry: &QuantityEntry) -> Result<u32> {
    if entry.quantity == 0 {
        return Err(FitError::ValidationError {
            message: format!("{} entry {:?} has a quantity of 0", field, entry.name),
        });
    }
    Ok(entry.quantity)
}

fn deployables(field: &str, entries: Vec<QuantityEntry>, kind: DeployableKind) -> Result<Vec<Deployable>> {
    entries
        .into_iter()
        .map(|entry| {
            let quantity = checked_quantity(field, &entry)?;
            Ok(Deployable {
                kind,
                name: entry.name,
                quantity,
            })
        })
        .collect()
}

fn components(entries: Vec<NameEntry>, kind: ComponentKind) -> Vec<Component> {
    entries
        .into_iter()
        .map(|entry| Component { kind, name: entry.name })
        .collect()
}

fn modules(entries: Vec<ModuleEntry>) -> Vec<Module> {
    entries
        .into_iter()
        .map(|entry| Module {
            name: entry.name,
            charge: entry.charge,
        })
        .collect()
}

impl From<&Fit> for FitDocument {
    fn from(fit: &Fit) -> Self {
        Self {
            ship: fit.ship.clone(),
            name: fit.name.clone(),
            low_slots: module_entries(&fit.low_slots),
            mid_slots: module_entries(&fit.mid_slots),
            high_slots: module_entries(&fit.high_slots),
            rigs: fit
                .rigs
                .iter()
                .map(|r| NameEntry { name: r.name.clone() })
                .collect(),
            subsystems: component_entries(&fit.subsystems),
            service_slots: component_entries(&fit.service_slots),
            drones: deployable_entries(&fit.drones),
            fighters: deployable_entries(&fit.fighters),
            cargo: fit
                .cargo
                .iter()
                .map(|c| QuantityEntry {
                    name: c.name.clone(),
                    quantity: c.quantity,
                })
                .collect(),
            is_structure: fit.is_structure,
        }
    }
}

impl TryFrom<FitDocument> for Fit {
    type Error = FitError;

    fn try_from(doc: FitDocument) -> Result<Self> {
        let cargo = doc
            .cargo
            .into_iter()
            .map(|entry| {
                let quantity = checked_quantity("cargo", &entry)?;
                Ok(Cargo::new(entry.name, quantity))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Fit {
            ship: doc.ship,
            name: doc.name,
            low_slots: modules(doc.low_slots),
            mid_slots: modules(doc.mid_slots),
            high_slots: modules(doc.high_slots),
            rigs: doc.rigs.into_iter().map(|entry| Rig::new(entry.name)).collect(),
            subsystems: components(doc.subsystems, ComponentKind::Subsystem),
            service_slots: components(doc.service_slots, ComponentKind::ServiceSlot),
            drones: deployables("drones", doc.drones, DeployableKind::Drone)?,
            fighters: deployables("fighters", doc.fighters, DeployableKind::Fighter)?,
            cargo,
            is_structure: doc.is_structure,
        })
    }
}

impl Fit {
    pub fn to_document(&self) -> FitDocument {
        FitDocument::from(self)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_document())?)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.to_document())?)
    }

    pub fn from_json(data: &str) -> Result<Fit> {
        let doc: FitDocument = serde_json::from_str(data)?;
        Fit::try_from(doc)
    }

    pub fn from_yaml(data: &str) -> Result<Fit> {
        let doc: FitDocument = serde_yaml::from_str(data)?;
        Fit::try_from(doc)
    }
}
