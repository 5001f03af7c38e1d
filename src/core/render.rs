use crate::core::section::{blank_run_between, Section};
use crate::domain::model::{Fit, Module, SlotRack};

fn module_line(module: &Module) -> String {
    match &module.charge {
        Some(charge) => format!("{}, {}", module.name, charge),
        None => module.name.clone(),
    }
}

/// Lines EFT and EFT2 share for a section, minus the quantity formatting.
fn section_lines(fit: &Fit, section: Section, quantity_delimiter: &str) -> Vec<String> {
    let with_quantity = |name: &str, quantity: u32| format!("{}{}{}", name, quantity_delimiter, quantity);

    match section {
        Section::LowSlots => fit.modules(SlotRack::Low).iter().map(module_line).collect(),
        Section::MidSlots => fit.modules(SlotRack::Mid).iter().map(module_line).collect(),
        Section::HighSlots => fit.modules(SlotRack::High).iter().map(module_line).collect(),
        Section::Rigs => fit.rigs.iter().map(|rig| rig.name.clone()).collect(),
        Section::Subsystems => fit.components().iter().map(|c| c.name.clone()).collect(),
        Section::Drones => fit
            .drones
            .iter()
            .map(|d| with_quantity(&d.name, d.quantity))
            .collect(),
        Section::Cargo => fit
            .cargo
            .iter()
            .map(|c| with_quantity(&c.name, c.quantity))
            .collect(),
        Section::Fighters => fit
            .fighters
            .iter()
            .map(|f| with_quantity(&f.name, f.quantity))
            .collect(),
    }
}

/// Takes the first entry not yet taken that satisfies `matches`.
fn claim<T>(items: &[T], taken: &mut [bool], matches: impl Fn(&T) -> bool) -> Option<usize> {
    let index = (0..items.len()).find(|&i| !taken[i] && matches(&items[i]))?;
    taken[index] = true;
    Some(index)
}

fn eft_quantity_line(name: &str, quantity: u32) -> String {
    format!("{} x{}", name, quantity)
}

/// EFT lines for every section, in section order.
///
/// Parsing a structure turns each line of the subsystem section into a
/// service slot plus a subsystem, drone or cargo entry of the same name. Those
/// pairs are written back as one line carrying the partner's quantity, and the
/// partner is left out of its own section.
fn eft_sections(fit: &Fit) -> Vec<(Section, Vec<String>)> {
    let mut subsystem_taken = vec![false; fit.subsystems.len()];
    let mut drone_taken = vec![false; fit.drones.len()];
    let mut cargo_taken = vec![false; fit.cargo.len()];

    let mut service_lines = Vec::with_capacity(fit.service_slots.len());
    if fit.is_structure {
        for slot in &fit.service_slots {
            let same_name = |name: &str| name == slot.name;
            let quantity = if claim(&fit.subsystems, &mut subsystem_taken, |c| same_name(&c.name)).is_some() {
                1
            } else if let Some(i) = claim(&fit.drones, &mut drone_taken, |d| same_name(&d.name)) {
                fit.drones[i].quantity
            } else if let Some(i) = claim(&fit.cargo, &mut cargo_taken, |c| same_name(&c.name)) {
                fit.cargo[i].quantity
            } else {
                1
            };

            service_lines.push(match quantity {
                1 => slot.name.clone(),
                n => eft_quantity_line(&slot.name, n),
            });
        }
    }

    Section::ALL
        .into_iter()
        .map(|section| {
            let lines = match section {
                Section::Subsystems if fit.is_structure => service_lines.clone(),
                Section::Drones => fit
                    .drones
                    .iter()
                    .zip(&drone_taken)
                    .filter(|(_, taken)| !**taken)
                    .map(|(d, _)| eft_quantity_line(&d.name, d.quantity))
                    .collect(),
                Section::Cargo => fit
                    .cargo
                    .iter()
                    .zip(&cargo_taken)
                    .filter(|(_, taken)| !**taken)
                    .map(|(c, _)| eft_quantity_line(&c.name, c.quantity))
                    .collect(),
                other => section_lines(fit, other, " x"),
            };
            (section, lines)
        })
        .collect()
}

impl Fit {
    /// Renders the fit as EFT.
    ///
    /// Separators between sections are worked out by running the EFT section
    /// tracker over the lines each section will hold, so skipped (empty)
    /// sections and keyword escapes re-parse into the right place. Where no
    /// blank run can reach a section, its lines go to the furthest section
    /// that can be reached.
    ///
    /// On structures a service slot with no same-named subsystem, drone or
    /// cargo entry comes back from a re-parse with an extra cargo entry.
    pub fn to_eft(&self) -> String {
        let mut lines = vec![format!("[{}, {}]", self.ship, self.name)];
        let mut at = Section::LowSlots;
        let mut placed_any = false;

        for (section, items) in eft_sections(self) {
            if items.is_empty() {
                continue;
            }

            if placed_any || section != at {
                let (target, run) = (at.index() + 1..=section.index())
                    .rev()
                    .map(|index| Section::ALL[index])
                    .find_map(|target| {
                        blank_run_between(at, target, items.as_slice()).map(|run| (target, run))
                    })
                    .unwrap_or((at.next(), 1));

                if target != section {
                    tracing::debug!(
                        %section,
                        %target,
                        "section not reachable in EFT layout, placing lines earlier"
                    );
                }
                lines.extend(std::iter::repeat(String::new()).take(run));
                at = target;
            }

            lines.extend(items);
            placed_any = true;
        }

        lines.join("\n") + "\n"
    }

    /// Renders the fit as EFT2. Every standard heading is written, even when
    /// empty; `## Fighters` only when there are fighters.
    pub fn to_eft2(&self) -> String {
        let mut lines = vec![format!("# {}, {}", self.ship, self.name)];

        for section in Section::ALL {
            let items = section_lines(self, section, " ,");
            let heading = match section {
                Section::Fighters if items.is_empty() => continue,
                Section::Subsystems if self.is_structure => "Service Slots",
                _ => section.heading(),
            };

            if lines.len() > 1 {
                lines.push(String::new());
            }
            lines.push(format!("## {}", heading));
            lines.extend(items);
        }

        lines.join("\n") + "\n"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Cargo, Component, Deployable, FitItem, Rig};

    fn sample_fit() -> Fit {
        let mut fit = Fit::new("Legion", "Covert", false);
        fit.push(FitItem::Module(SlotRack::Low, Module::new("Damage Control II")));
        fit.push(FitItem::Module(SlotRack::Mid, Module::new("10MN Afterburner II")));
        fit.push(FitItem::Module(
            SlotRack::High,
            Module::with_charge("Heavy Pulse Laser II", "Scorch M"),
        ));
        fit.push(FitItem::Rig(Rig::new("Medium Energy Locus Coordinator I")));
        fit.push(FitItem::Component(Component::subsystem("Legion Core - Dissolution Sequencer")));
        fit.push(FitItem::Deployable(Deployable::drone("Hobgoblin II", 3)));
        fit.push(FitItem::Cargo(Cargo::new("Nanite Repair Paste", 50)));
        fit
    }

    #[test]
    fn test_to_eft_full_fit_uses_single_blanks() {
        let expected = "[Legion, Covert]
Damage Control II

10MN Afterburner II

Heavy Pulse Laser II, Scorch M

Medium Energy Locus Coordinator I

Legion Core - Dissolution Sequencer

Hobgoblin II x3

Nanite Repair Paste x50
";
        assert_eq!(sample_fit().to_eft(), expected);
    }

    #[test]
    fn test_to_eft_pads_empty_slot_racks() {
        let mut fit = Fit::new("Venture", "Mining", false);
        fit.push(FitItem::Module(SlotRack::Low, Module::new("Mining Laser Upgrade II")));
        fit.push(FitItem::Module(SlotRack::High, Module::new("Mining Laser II")));
        fit.push(FitItem::Rig(Rig::new("Small Core Defense Field Extender I")));

        let expected = "[Venture, Mining]
Mining Laser Upgrade II


Mining Laser II

Small Core Defense Field Extender I
";
        assert_eq!(fit.to_eft(), expected);
    }

    #[test]
    fn test_to_eft_rigs_only() {
        let mut fit = Fit::new("Venture", "Rigs", false);
        fit.push(FitItem::Rig(Rig::new("Small Core Defense Field Extender I")));
        assert_eq!(
            fit.to_eft(),
            "[Venture, Rigs]\n\n\n\n\nSmall Core Defense Field Extender I\n"
        );
    }

    #[test]
    fn test_to_eft_header_only() {
        assert_eq!(Fit::new("Venture", "Empty", false).to_eft(), "[Venture, Empty]\n");
    }

    #[test]
    fn test_to_eft_writes_structure_service_pairs_once() {
        let mut fit = Fit::new("Astrahus", "Home", true);
        fit.push(FitItem::Component(Component::service_slot("Standup Cloning Center I")));
        fit.push(FitItem::Component(Component::service_slot("Standup Market Hub I")));
        fit.push(FitItem::Cargo(Cargo::new("Standup Cloning Center I", 1)));
        fit.push(FitItem::Cargo(Cargo::new("Standup Market Hub I", 2)));
        fit.push(FitItem::Cargo(Cargo::new("Standup Heavy Missile", 500)));

        let expected = "[Astrahus, Home]






Standup Cloning Center I
Standup Market Hub I x2

Standup Heavy Missile x500
";
        assert_eq!(fit.to_eft(), expected);
    }

    #[test]
    fn test_to_eft_places_ammo_cargo_through_mid_escape() {
        let mut fit = Fit::new("Thanatos", "Carrier", false);
        fit.push(FitItem::Module(SlotRack::Low, Module::new("Damage Control II")));
        fit.push(FitItem::Cargo(Cargo::new("Scourge Heavy Missile", 100)));
        fit.push(FitItem::Deployable(Deployable::fighter("Templar I", 9)));

        assert_eq!(
            fit.to_eft(),
            "[Thanatos, Carrier]\nDamage Control II\n\nScourge Heavy Missile x100\n\nTemplar I x9\n"
        );
    }

    #[test]
    fn test_to_eft2() {
        let expected = "# Legion, Covert
## Low Slots
Damage Control II

## Mid Slots
10MN Afterburner II

## High Slots
Heavy Pulse Laser II, Scorch M

## Rigs
Medium Energy Locus Coordinator I

## Subsystems
Legion Core - Dissolution Sequencer

## Drones
Hobgoblin II ,3

## Cargo
Nanite Repair Paste ,50
";
        assert_eq!(sample_fit().to_eft2(), expected);
    }

    #[test]
    fn test_to_eft2_structure_uses_service_heading() {
        let mut fit = Fit::new("Astrahus", "Home", true);
        fit.push(FitItem::Component(Component::service_slot("Standup Cloning Center I")));
        fit.push(FitItem::Deployable(Deployable::fighter("Standup Einherji I", 3)));

        let text = fit.to_eft2();
        assert!(text.contains("## Service Slots\nStandup Cloning Center I\n"));
        assert!(!text.contains("## Subsystems"));
        assert!(text.ends_with("## Fighters\nStandup Einherji I ,3\n"));
    }
}
