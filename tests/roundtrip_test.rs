use fitconv::domain::model::{Cargo, CategoryId, Component, Deployable, FitItem, Module, Rig, SlotRack};
use fitconv::{fit_from_eft, parse_fit, render_fit, Fit, FitFormat, InMemoryLookup};
use pretty_assertions::assert_eq;

fn catalog() -> InMemoryLookup {
    InMemoryLookup::from_pairs([
        ("Hobgoblin II", CategoryId::DRONE),
        ("Legion Core - Dissolution Sequencer", CategoryId::SUBSYSTEM),
        ("Legion Offensive - Liquid Crystal Magnifiers", CategoryId::SUBSYSTEM),
        ("Mining Drone I", CategoryId::DRONE),
        ("Astrahus", CategoryId::STRUCTURE),
        ("Standup Cloning Center I", CategoryId(66)),
        ("Standup Heavy Missile", CategoryId(8)),
    ])
}

/// Parses `document`, renders it back to EFT and checks the re-parse matches.
fn assert_eft_document_round_trips(document: &str) -> Fit {
    let first = fit_from_eft(document, &catalog()).unwrap();
    let rendered = first.to_eft();
    let second = fit_from_eft(&rendered, &catalog()).unwrap();
    assert_eq!(second, first, "rendered as:\n{}", rendered);
    first
}

fn legion() -> Fit {
    let mut fit = Fit::new("Legion", "Brawler", false);
    fit.push(FitItem::Module(SlotRack::Low, Module::new("Damage Control II")));
    fit.push(FitItem::Module(SlotRack::Low, Module::new("Heat Sink II")));
    fit.push(FitItem::Module(SlotRack::Mid, Module::new("10MN Afterburner II")));
    fit.push(FitItem::Module(
        SlotRack::High,
        Module::with_charge("Heavy Pulse Laser II", "Scorch M"),
    ));
    fit.push(FitItem::Rig(Rig::new("Medium Energy Locus Coordinator I")));
    fit.push(FitItem::Component(Component::subsystem("Legion Core - Dissolution Sequencer")));
    fit.push(FitItem::Component(Component::subsystem(
        "Legion Offensive - Liquid Crystal Magnifiers",
    )));
    fit.push(FitItem::Deployable(Deployable::drone("Hobgoblin II", 3)));
    fit.push(FitItem::Cargo(Cargo::new("Nanite Repair Paste", 50)));
    fit
}

fn round_trip(fit: &Fit, format: FitFormat) -> Fit {
    let text = render_fit(fit, format).unwrap();
    parse_fit(format, &text, &catalog()).unwrap()
}

#[test]
fn test_eft_round_trip() {
    let fit = legion();
    assert_eq!(round_trip(&fit, FitFormat::Eft), fit);
}

#[test]
fn test_eft_round_trip_with_empty_sections() {
    let mut fit = Fit::new("Vexor", "Drone Boat", false);
    fit.push(FitItem::Module(SlotRack::Low, Module::new("Drone Damage Amplifier II")));
    fit.push(FitItem::Module(SlotRack::High, Module::new("Drone Link Augmentor I")));
    fit.push(FitItem::Deployable(Deployable::drone("Hobgoblin II", 5)));
    fit.push(FitItem::Cargo(Cargo::new("Nanite Repair Paste", 20)));

    assert_eq!(round_trip(&fit, FitFormat::Eft), fit);
}

#[test]
fn test_eft2_round_trip() {
    let fit = legion();
    assert_eq!(round_trip(&fit, FitFormat::Eft2), fit);
}

#[test]
fn test_structured_round_trips() {
    let fit = legion();
    assert_eq!(round_trip(&fit, FitFormat::Json), fit);
    assert_eq!(round_trip(&fit, FitFormat::Yaml), fit);
}

#[test]
fn test_eft_to_eft2_to_json_keeps_everything() {
    let eft = render_fit(&legion(), FitFormat::Eft).unwrap();
    let fit = parse_fit(FitFormat::Eft, &eft, &catalog()).unwrap();
    let eft2 = render_fit(&fit, FitFormat::Eft2).unwrap();
    let fit = parse_fit(FitFormat::Eft2, &eft2, &catalog()).unwrap();
    let json = render_fit(&fit, FitFormat::Json).unwrap();

    assert_eq!(parse_fit(FitFormat::Json, &json, &catalog()).unwrap(), legion());
}

#[test]
fn test_sniffed_format_matches_rendered_format() {
    let fit = legion();
    for format in [FitFormat::Eft, FitFormat::Eft2, FitFormat::Json] {
        let text = render_fit(&fit, format).unwrap();
        assert_eq!(FitFormat::sniff(&text), format);
    }
}

#[test]
fn test_venture_document_round_trip() {
    let fit = assert_eft_document_round_trips(
        "[Venture, Venture - Mining]
Mining Laser Upgrade II
Mining Laser Upgrade II



Mining Laser II
Mining Laser II

Small Core Defense Field Extender I
Small Core Defense Field Extender I



Mining Drone I x5
",
    );
    assert_eq!(fit.drones.len(), 1);
}

#[test]
fn test_structure_document_round_trip() {
    let fit = assert_eft_document_round_trips(
        "[Astrahus, Home]
Standup Ballistic Control System I



Standup Multirole Missile Launcher I, Standup Heavy Missile

Standup M-Set Missile Precision I

Standup Cloning Center I
Standup Market Hub I



Standup Heavy Missile x500
",
    );
    assert!(fit.is_structure);
    assert_eq!(fit.service_slots.len(), 2);
    assert_eq!(fit.cargo.len(), 3);
}

#[test]
fn test_structure_cargo_after_low_slots_round_trip() {
    let fit = assert_eft_document_round_trips(
        "[Astrahus, Home]
Standup Ballistic Control System I

Standup Heavy Missile x100
",
    );
    assert!(fit.service_slots.is_empty());
    assert_eq!(fit.cargo, vec![Cargo::new("Standup Heavy Missile", 100)]);
}

#[test]
fn test_mid_slot_ammo_escape_round_trip() {
    let document = "[Thanatos, Carrier]
Damage Control II

Scourge Heavy Missile x100

Templar I x9
";
    let fit = assert_eft_document_round_trips(document);
    assert_eq!(fit.cargo, vec![Cargo::new("Scourge Heavy Missile", 100)]);
    assert_eq!(fit.fighters, vec![Deployable::fighter("Templar I", 9)]);
    assert_eq!(fit.to_eft(), document);
}

#[test]
fn test_drone_bay_overflow_round_trip() {
    let fit = assert_eft_document_round_trips(
        "[Venture, Test Fit]
Mining Laser Upgrade II



Mining Laser II

Small Core Defense Field Extender I



Mining Drone I x2

Nanite Repair Paste x100
Cap Booster 150 x50
",
    );
    assert_eq!(fit.drones, vec![Deployable::drone("Mining Drone I", 2)]);
    assert_eq!(fit.cargo.len(), 2);
}

#[test]
fn test_fighters_document_round_trip() {
    let fit = assert_eft_document_round_trips(
        "[Thanatos, Fighters]
Damage Control II

Capital Flex Shield Hardener I

Networked Sensor Array

Capital Core Defense Field Extender I

Nanite Repair Paste x100

Hobgoblin II x5

Scourge Heavy Missile x100

Templar I x9
Dragonfly I x6
",
    );
    assert_eq!(fit.drones, vec![Deployable::drone("Hobgoblin II", 5)]);
    assert_eq!(fit.cargo.len(), 2);
    assert_eq!(
        fit.fighters,
        vec![Deployable::fighter("Templar I", 9), Deployable::fighter("Dragonfly I", 6)]
    );
}
