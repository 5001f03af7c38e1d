//! Section tracking for both text dialects.
//!
//! EFT has no section markers: a section ends after a run of blank lines, and
//! the number of blanks needed differs per section because EFT exports pad
//! empty sections inconsistently. [`SectionTracker`] keeps those thresholds
//! as data on [`Section`] so each one can be checked on its own.
//!
//! EFT2 names every section with a `## ` heading, so [`HeadingTracker`] only
//! needs to remember the last heading it saw.

use std::fmt;

/// Ammunition-like words that mark a quantity line as cargo.
pub const AMMO_KEYWORDS: &[&str] = &["Missile", "Torpedo", "Bomb", "Charge", "Ammo"];

/// [`AMMO_KEYWORDS`] plus the extra cargo words recognized in the drone bay.
pub const DRONE_BAY_CARGO_KEYWORDS: &[&str] = &[
    "Missile", "Torpedo", "Bomb", "Charge", "Ammo", "Fuel", "Script",
];

/// Quantity marker the keyword escape looks for.
const QUANTITY_MARKER: &str = " x";

/// Longest blank run [`blank_run_between`] will consider.
const MAX_SEPARATOR_RUN: usize = 8;

/// EFT sections in document order. The tracker only ever moves forward
/// through this list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Section {
    LowSlots,
    MidSlots,
    HighSlots,
    Rigs,
    /// Subsystems for ships, service modules for structures, plus overflow
    /// drones and cargo.
    Subsystems,
    Drones,
    Cargo,
    Fighters,
}

impl Section {
    pub const ALL: [Section; 8] = [
        Section::LowSlots,
        Section::MidSlots,
        Section::HighSlots,
        Section::Rigs,
        Section::Subsystems,
        Section::Drones,
        Section::Cargo,
        Section::Fighters,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// The following section; Fighters is terminal.
    pub fn next(self) -> Section {
        Section::ALL
            .get(self.index() + 1)
            .copied()
            .unwrap_or(Section::Fighters)
    }

    pub fn heading(self) -> &'static str {
        match self {
            Section::LowSlots => "Low Slots",
            Section::MidSlots => "Mid Slots",
            Section::HighSlots => "High Slots",
            Section::Rigs => "Rigs",
            Section::Subsystems => "Subsystems",
            Section::Drones => "Drones",
            Section::Cargo => "Cargo",
            Section::Fighters => "Fighters",
        }
    }

    /// Consecutive blank lines that close this section on their own, or
    /// `None` when only the next item line does.
    pub fn blank_threshold(self) -> Option<usize> {
        match self {
            Section::LowSlots | Section::MidSlots | Section::HighSlots => Some(2),
            Section::Subsystems => Some(3),
            Section::Rigs | Section::Drones | Section::Cargo | Section::Fighters => None,
        }
    }

    /// Keywords that send a quantity line straight to cargo from this section.
    pub fn cargo_keywords(self) -> &'static [&'static str] {
        match self {
            Section::MidSlots => AMMO_KEYWORDS,
            Section::Drones => DRONE_BAY_CARGO_KEYWORDS,
            _ => &[],
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.heading())
    }
}

/// Forward-only EFT section state machine.
#[derive(Debug, Clone)]
pub struct SectionTracker {
    section: Section,
    blank_run: usize,
    in_blank_run: bool,
}

impl SectionTracker {
    pub fn new() -> Self {
        Self::starting_at(Section::LowSlots)
    }

    pub fn starting_at(section: Section) -> Self {
        Self {
            section,
            blank_run: 0,
            in_blank_run: false,
        }
    }

    pub fn section(&self) -> Section {
        self.section
    }

    /// Feeds one raw line. Returns the trimmed line when it carries an item,
    /// after the tracker has moved to the section that item belongs to.
    pub fn feed<'a>(&mut self, line: &'a str) -> Option<&'a str> {
        let line = line.trim();

        if line.is_empty() {
            self.blank_run += 1;
            self.in_blank_run = true;
            if let Some(threshold) = self.section.blank_threshold() {
                if self.blank_run >= threshold {
                    self.advance();
                    self.blank_run = 0;
                }
            }
            return None;
        }

        // The first item after a blank run always opens a new section, even
        // if the run already closed one by counting.
        if self.in_blank_run {
            self.advance();
            self.in_blank_run = false;
            self.blank_run = 0;
        }

        let keywords = self.section.cargo_keywords();
        if line.contains(QUANTITY_MARKER) && keywords.iter().any(|word| line.contains(word)) {
            tracing::debug!(from = %self.section, line, "cargo-like line, jumping to cargo");
            self.section = Section::Cargo;
        }

        Some(line)
    }

    fn advance(&mut self) {
        let next = self.section.next();
        if next != self.section {
            tracing::trace!(from = %self.section, to = %next, "section advanced");
        }
        self.section = next;
    }
}

impl Default for SectionTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Shortest blank run that moves a tracker sitting in `from` so that every
/// one of `lines` lands in `to`. The lines themselves are fed, so keyword
/// escapes count. `None` when no run of blanks can do it.
pub fn blank_run_between<S: AsRef<str>>(from: Section, to: Section, lines: &[S]) -> Option<usize> {
    (1..=MAX_SEPARATOR_RUN).find(|&run| {
        let mut tracker = SectionTracker::starting_at(from);
        for _ in 0..run {
            tracker.feed("");
        }
        lines.iter().all(|line| {
            tracker.feed(line.as_ref());
            tracker.section() == to
        })
    })
}

/// A recognized EFT2 heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    Section(Section),
    /// `## Service Slots`, the structure spelling of the subsystem section.
    ServiceSlots,
}

impl Heading {
    pub const MARKER: &'static str = "## ";

    pub fn parse(title: &str) -> Option<Heading> {
        let title = title.trim();
        if title.eq_ignore_ascii_case("Service Slots") {
            return Some(Heading::ServiceSlots);
        }
        Section::ALL
            .into_iter()
            .find(|section| title.eq_ignore_ascii_case(section.heading()))
            .map(Heading::Section)
    }
}

/// Where the EFT2 parser currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingState {
    /// No heading seen yet.
    Preamble,
    Known(Heading),
    /// Under a heading this parser does not recognize.
    Unrecognized,
}

/// EFT2 heading state machine.
#[derive(Debug, Clone)]
pub struct HeadingTracker {
    state: HeadingState,
}

impl HeadingTracker {
    pub fn new() -> Self {
        Self {
            state: HeadingState::Preamble,
        }
    }

    pub fn state(&self) -> HeadingState {
        self.state
    }

    /// Feeds one raw line. Returns the active heading and the trimmed line
    /// when the line carries an item.
    pub fn feed<'a>(&mut self, line: &'a str) -> Option<(Heading, &'a str)> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        if let Some(title) = line.strip_prefix(Heading::MARKER) {
            let title = title.trim_matches(|c: char| c == '#' || c.is_whitespace());
            self.state = match Heading::parse(title) {
                Some(heading) => HeadingState::Known(heading),
                None => {
                    tracing::debug!(title, "unrecognized EFT2 heading, skipping its lines");
                    HeadingState::Unrecognized
                }
            };
            return None;
        }

        match self.state {
            HeadingState::Known(heading) => Some((heading, line)),
            HeadingState::Preamble | HeadingState::Unrecognized => None,
        }
    }
}

impl Default for HeadingTracker {
    fn default() -> Self {
        Self::new()
    }
}
