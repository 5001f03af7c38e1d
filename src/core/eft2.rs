use crate::core::classify::{parse_cargo, parse_component, parse_deployable, parse_module, parse_rig};
use crate::core::dialect::{open_fit, Dialect};
use crate::core::section::{Heading, HeadingTracker, Section};
use crate::core::FitParser;
use crate::domain::model::{ComponentKind, DeployableKind, Fit, FitItem, SlotRack};
use crate::domain::ports::CategoryLookup;
use crate::utils::error::Result;

/// Parser for the heading-based EFT2 dialect. Every section is named, so
/// the catalog is only consulted for the hull.
pub struct Eft2Parser<'a, L: CategoryLookup + ?Sized> {
    lookup: &'a L,
}

impl<'a, L: CategoryLookup + ?Sized> Eft2Parser<'a, L> {
    pub fn new(lookup: &'a L) -> Self {
        Self { lookup }
    }
}

impl<L: CategoryLookup + ?Sized> FitParser for Eft2Parser<'_, L> {
    fn dialect(&self) -> Dialect {
        Dialect::Eft2
    }

    fn parse(&self, text: &str) -> Result<Fit> {
        let (mut fit, lines) = open_fit(Dialect::Eft2, text, self.lookup)?;
        let mut tracker = HeadingTracker::new();

        for line in lines {
            let Some((heading, item)) = tracker.feed(line) else {
                continue;
            };

            let parsed = match heading {
                Heading::Section(Section::LowSlots) => FitItem::Module(SlotRack::Low, parse_module(item)),
                Heading::Section(Section::MidSlots) => FitItem::Module(SlotRack::Mid, parse_module(item)),
                Heading::Section(Section::HighSlots) => FitItem::Module(SlotRack::High, parse_module(item)),
                Heading::Section(Section::Rigs) => FitItem::Rig(parse_rig(item)),
                Heading::Section(Section::Subsystems) => {
                    FitItem::Component(parse_component(item, ComponentKind::Subsystem))
                }
                Heading::ServiceSlots => FitItem::Component(parse_component(item, ComponentKind::ServiceSlot)),
                Heading::Section(Section::Drones) => {
                    FitItem::Deployable(parse_deployable(item, DeployableKind::Drone, Dialect::Eft2)?)
                }
                Heading::Section(Section::Cargo) => FitItem::Cargo(parse_cargo(item, Dialect::Eft2)?),
                Heading::Section(Section::Fighters) => {
                    FitItem::Deployable(parse_deployable(item, DeployableKind::Fighter, Dialect::Eft2)?)
                }
            };
            fit.push(parsed);
        }

        tracing::debug!(items = fit.item_count(), "EFT2 fit parsed");
        Ok(fit)
    }
}
