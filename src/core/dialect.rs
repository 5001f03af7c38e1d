use crate::domain::model::{Fit, ItemCategory};
use crate::domain::ports::CategoryLookup;
use crate::utils::error::{FitError, Result};
use std::fmt;
use std::str::Lines;

/// The two plain-text fitting dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// Line-positional EFT: sections separated by blank-line runs.
    Eft,
    /// Heading-based EFT2: markdown `##` headings name each section.
    Eft2,
}

impl Dialect {
    pub fn header_marker(self) -> char {
        match self {
            Dialect::Eft => '[',
            Dialect::Eft2 => '#',
        }
    }

    /// Separator between an item name and its count, split on its last occurrence.
    pub fn quantity_delimiter(self) -> &'static str {
        match self {
            Dialect::Eft => " x",
            Dialect::Eft2 => " ,",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Eft => write!(f, "EFT"),
            Dialect::Eft2 => write!(f, "EFT2"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub ship: String,
    pub name: String,
}

/// Splits a header line into hull and fit name.
pub fn parse_header(dialect: Dialect, line: &str) -> Result<Header> {
    let line = line.trim();
    let malformed = |reason: &str| FitError::MalformedHeaderError {
        dialect,
        line: line.to_string(),
        reason: reason.to_string(),
    };

    if line.is_empty() {
        return Err(malformed("input is empty"));
    }
    if !line.starts_with(dialect.header_marker()) {
        return Err(malformed(&format!(
            "missing leading '{}'",
            dialect.header_marker()
        )));
    }

    let body = match dialect {
        Dialect::Eft => line.trim_matches(|c| c == '[' || c == ']'),
        Dialect::Eft2 => line.trim_matches(|c: char| c == '#' || c.is_whitespace()),
    };

    let (ship, name) = body
        .split_once(',')
        .ok_or_else(|| malformed("missing ',' between hull and fit name"))?;
    let ship = ship.trim();
    if ship.is_empty() {
        return Err(malformed("hull name is empty"));
    }

    Ok(Header {
        ship: ship.to_string(),
        name: name.trim().to_string(),
    })
}

/// Reads the header of a text fit and resolves the structure flag. Returns
/// the empty fit and the remaining item lines.
pub fn open_fit<'t, L>(dialect: Dialect, text: &'t str, lookup: &L) -> Result<(Fit, Lines<'t>)>
where
    L: CategoryLookup + ?Sized,
{
    let mut lines = text.trim().lines();
    let header = parse_header(dialect, lines.next().unwrap_or_default())?;

    let is_structure = ItemCategory::of(lookup.category_of(&header.ship)) == ItemCategory::Structure;
    tracing::debug!(
        %dialect,
        ship = %header.ship,
        name = %header.name,
        is_structure,
        "parsing fit"
    );

    Ok((Fit::new(header.ship, header.name, is_structure), lines))
}
