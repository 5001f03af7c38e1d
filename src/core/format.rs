use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Every representation a fit can be read from or written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum FitFormat {
    Eft,
    Eft2,
    Json,
    Yaml,
}

impl FitFormat {
    pub fn extension(self) -> &'static str {
        match self {
            FitFormat::Eft => "eft",
            FitFormat::Eft2 => "md",
            FitFormat::Json => "json",
            FitFormat::Yaml => "yaml",
        }
    }

    pub fn from_extension(path: &str) -> Option<Self> {
        let extension = Path::new(path).extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "eft" | "txt" => Some(FitFormat::Eft),
            "eft2" | "md" => Some(FitFormat::Eft2),
            "json" => Some(FitFormat::Json),
            "yaml" | "yml" => Some(FitFormat::Yaml),
            _ => None,
        }
    }

    /// Guesses the format from the first non-whitespace character.
    pub fn sniff(text: &str) -> Self {
        match text.trim_start().chars().next() {
            Some('[') => FitFormat::Eft,
            Some('#') => FitFormat::Eft2,
            Some('{') => FitFormat::Json,
            _ => FitFormat::Yaml,
        }
    }
}

impl fmt::Display for FitFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FitFormat::Eft => "eft",
            FitFormat::Eft2 => "eft2",
            FitFormat::Json => "json",
            FitFormat::Yaml => "yaml",
        };
        write!(f, "{}", label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(FitFormat::from_extension("fits/venture.eft"), Some(FitFormat::Eft));
        assert_eq!(FitFormat::from_extension("venture.MD"), Some(FitFormat::Eft2));
        assert_eq!(FitFormat::from_extension("venture.yml"), Some(FitFormat::Yaml));
        assert_eq!(FitFormat::from_extension("venture.json"), Some(FitFormat::Json));
        assert_eq!(FitFormat::from_extension("venture"), None);
        assert_eq!(FitFormat::from_extension("venture.csv"), None);
    }

    #[test]
    fn test_sniff() {
        assert_eq!(FitFormat::sniff("\n[Venture, Mining]"), FitFormat::Eft);
        assert_eq!(FitFormat::sniff("# Venture, Mining"), FitFormat::Eft2);
        assert_eq!(FitFormat::sniff("  {\"ship\": \"Venture\"}"), FitFormat::Json);
        assert_eq!(FitFormat::sniff("ship: Venture"), FitFormat::Yaml);
    }

    #[test]
    fn test_serde_names() {
        let format: FitFormat = serde_json::from_str("\"eft2\"").unwrap();
        assert_eq!(format, FitFormat::Eft2);
        assert_eq!(FitFormat::Yaml.to_string(), "yaml");
    }
}
