use crate::core::dialect::Dialect;
use crate::domain::model::{
    Cargo, Component, ComponentKind, Deployable, DeployableKind, FitItem, ItemCategory, Module,
    Rig,
};
use crate::domain::ports::CategoryLookup;
use crate::utils::error::{FitError, Result};

/// `name[,charge]`: splits on the first comma only.
pub fn parse_module(line: &str) -> Module {
    match line.split_once(',') {
        Some((name, charge)) => Module::with_charge(name.trim(), charge.trim()),
        None => Module::new(line.trim()),
    }
}

pub fn parse_rig(line: &str) -> Rig {
    Rig::new(line.trim())
}

pub fn parse_component(line: &str, kind: ComponentKind) -> Component {
    Component {
        kind,
        name: line.trim().to_string(),
    }
}

pub fn has_quantity(line: &str, dialect: Dialect) -> bool {
    line.contains(dialect.quantity_delimiter())
}

/// `name[<delimiter>count]`: splits on the last delimiter. No delimiter means
/// a count of one.
pub fn parse_quantity(line: &str, dialect: Dialect) -> Result<(String, u32)> {
    let Some((name, count)) = line.rsplit_once(dialect.quantity_delimiter()) else {
        return Ok((line.trim().to_string(), 1));
    };

    let count = count.trim();
    match count.parse::<u32>() {
        Ok(quantity) if quantity > 0 => Ok((name.trim().to_string(), quantity)),
        _ => Err(FitError::MalformedQuantityError {
            line: line.trim().to_string(),
            quantity: count.to_string(),
        }),
    }
}

pub fn parse_deployable(line: &str, kind: DeployableKind, dialect: Dialect) -> Result<Deployable> {
    let (name, quantity) = parse_quantity(line, dialect)?;
    Ok(Deployable {
        kind,
        name,
        quantity,
    })
}

pub fn parse_cargo(line: &str, dialect: Dialect) -> Result<Cargo> {
    let (name, quantity) = parse_quantity(line, dialect)?;
    Ok(Cargo::new(name, quantity))
}

/// Resolves a line from the EFT section that may hold subsystems, service
/// modules, overflow drones or cargo.
///
/// A quantity delimiter means a cargo-shaped line, otherwise it is read like a
/// module (any charge is dropped). The catalog category then picks subsystem,
/// drone or cargo. On structures the item is also recorded as a service slot,
/// ahead of the category route.
pub fn classify_ambiguous<L>(line: &str, lookup: &L, is_structure: bool) -> Result<Vec<FitItem>>
where
    L: CategoryLookup + ?Sized,
{
    let (name, quantity) = if has_quantity(line, Dialect::Eft) {
        parse_quantity(line, Dialect::Eft)?
    } else {
        (parse_module(line).name, 1)
    };

    let category = ItemCategory::of(lookup.category_of(&name));
    tracing::trace!(name = %name, ?category, is_structure, "classifying ambiguous line");

    let mut items = Vec::with_capacity(2);
    if is_structure {
        items.push(FitItem::Component(Component::service_slot(name.clone())));
    }
    items.push(match category {
        ItemCategory::Subsystem => FitItem::Component(Component::subsystem(name)),
        ItemCategory::Drone => FitItem::Deployable(Deployable::drone(name, quantity)),
        ItemCategory::Structure | ItemCategory::Other => FitItem::Cargo(Cargo::new(name, quantity)),
    });

    Ok(items)
}
