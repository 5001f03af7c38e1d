use crate::core::classify::{
    classify_ambiguous, parse_cargo, parse_deployable, parse_module, parse_rig,
};
use crate::core::dialect::{open_fit, Dialect};
use crate::core::section::{Section, SectionTracker};
use crate::core::FitParser;
use crate::domain::model::{DeployableKind, Fit, FitItem, SlotRack};
use crate::domain::ports::CategoryLookup;
use crate::utils::error::Result;

/// Parser for the line-positional EFT dialect.
pub struct EftParser<'a, L: CategoryLookup + ?Sized> {
    lookup: &'a L,
}

impl<'a, L: CategoryLookup + ?Sized> EftParser<'a, L> {
    pub fn new(lookup: &'a L) -> Self {
        Self { lookup }
    }
}

impl<L: CategoryLookup + ?Sized> FitParser for EftParser<'_, L> {
    fn dialect(&self) -> Dialect {
        Dialect::Eft
    }

    fn parse(&self, text: &str) -> Result<Fit> {
        let (mut fit, lines) = open_fit(Dialect::Eft, text, self.lookup)?;
        let mut tracker = SectionTracker::new();
        // Set once the ambiguous section has yielded a drone; the drone
        // section that follows then holds cargo.
        let mut drone_bay_filled = false;

        for line in lines {
            let Some(item) = tracker.feed(line) else {
                continue;
            };

            match tracker.section() {
                Section::LowSlots => fit.push(FitItem::Module(SlotRack::Low, parse_module(item))),
                Section::MidSlots => fit.push(FitItem::Module(SlotRack::Mid, parse_module(item))),
                Section::HighSlots => fit.push(FitItem::Module(SlotRack::High, parse_module(item))),
                Section::Rigs => fit.push(FitItem::Rig(parse_rig(item))),
                Section::Subsystems => {
                    for routed in classify_ambiguous(item, self.lookup, fit.is_structure)? {
                        if matches!(routed, FitItem::Deployable(_)) {
                            drone_bay_filled = true;
                        }
                        fit.push(routed);
                    }
                }
                Section::Drones if drone_bay_filled => {
                    fit.push(FitItem::Cargo(parse_cargo(item, Dialect::Eft)?))
                }
                Section::Drones => fit.push(FitItem::Deployable(parse_deployable(
                    item,
                    DeployableKind::Drone,
                    Dialect::Eft,
                )?)),
                Section::Cargo => fit.push(FitItem::Cargo(parse_cargo(item, Dialect::Eft)?)),
                Section::Fighters => fit.push(FitItem::Deployable(parse_deployable(
                    item,
                    DeployableKind::Fighter,
                    Dialect::Eft,
                )?)),
            }
        }

        tracing::debug!(items = fit.item_count(), "EFT fit parsed");
        Ok(fit)
    }
}
