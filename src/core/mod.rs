pub mod classify;
pub mod dialect;
pub mod eft;
pub mod eft2;
pub mod engine;
pub mod format;
pub mod pipeline;
pub mod render;
pub mod section;
pub mod structured;

pub use crate::domain::model::{Fit, Rendered};
pub use crate::domain::ports::{CategoryLookup, ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;

use crate::core::dialect::Dialect;
use crate::core::eft::EftParser;
use crate::core::eft2::Eft2Parser;
use crate::core::format::FitFormat;

/// A text-dialect parser. Parsing is a single forward pass; a fatal error
/// yields no fit at all.
pub trait FitParser {
    fn dialect(&self) -> Dialect;
    fn parse(&self, text: &str) -> Result<Fit>;
}

fn parse_text<P: FitParser>(parser: &P, text: &str) -> Result<Fit> {
    tracing::debug!(dialect = %parser.dialect(), bytes = text.len(), "parsing text fit");
    parser.parse(text)
}

pub fn fit_from_eft<L: CategoryLookup + ?Sized>(text: &str, lookup: &L) -> Result<Fit> {
    parse_text(&EftParser::new(lookup), text)
}

pub fn fit_from_eft2<L: CategoryLookup + ?Sized>(text: &str, lookup: &L) -> Result<Fit> {
    parse_text(&Eft2Parser::new(lookup), text)
}

pub fn fit_from_json(data: &str) -> Result<Fit> {
    Fit::from_json(data)
}

pub fn fit_from_yaml(data: &str) -> Result<Fit> {
    Fit::from_yaml(data)
}

/// Reads a fit in any supported format.
pub fn parse_fit<L: CategoryLookup + ?Sized>(format: FitFormat, text: &str, lookup: &L) -> Result<Fit> {
    match format {
        FitFormat::Eft => fit_from_eft(text, lookup),
        FitFormat::Eft2 => fit_from_eft2(text, lookup),
        FitFormat::Json => fit_from_json(text),
        FitFormat::Yaml => fit_from_yaml(text),
    }
}

pub fn render_fit(fit: &Fit, format: FitFormat) -> Result<String> {
    match format {
        FitFormat::Eft => Ok(fit.to_eft()),
        FitFormat::Eft2 => Ok(fit.to_eft2()),
        FitFormat::Json => fit.to_json(),
        FitFormat::Yaml => fit.to_yaml(),
    }
}
