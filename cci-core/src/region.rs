use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A (country, province) pair identifying a single case time series.
///
/// The province is `None` for country-level-only series. Source data
/// represents a missing province in three ways (null, empty string, the
/// literal text "nan"); all three normalize to `None` here so that lookups
/// and the store's NULL-aware join see a single canonical absent value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    pub country: String,
    pub province: Option<String>,
}

impl Region {
    /// Build a region, normalizing the province component.
    pub fn new(country: &str, province: Option<&str>) -> Self {
        Self {
            country: country.trim().to_string(),
            province: normalize_province(province),
        }
    }

    /// A country-level region with no province.
    pub fn country_only(country: &str) -> Self {
        Self::new(country, None)
    }

    /// Human-readable label: "Country - Province", or just "Country" when
    /// the province is absent or repeats the country name.
    pub fn label(&self) -> String {
        match &self.province {
            Some(p) if p != &self.country => format!("{} - {}", self.country, p),
            _ => self.country.clone(),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Region {
    type Err = anyhow::Error;

    /// Parse the CLI form "Country" or "Country:Province".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            anyhow::bail!("empty region");
        }
        match s.split_once(':') {
            Some((country, province)) => {
                if country.trim().is_empty() {
                    anyhow::bail!("region '{}' has an empty country component", s);
                }
                Ok(Region::new(country, Some(province)))
            }
            None => Ok(Region::country_only(s)),
        }
    }
}

/// Normalize the three source representations of a missing province
/// (null, empty/whitespace, the sentinel text "nan") to `None`.
pub fn normalize_province(province: Option<&str>) -> Option<String> {
    match province {
        None => None,
        Some(p) => {
            let trimmed = p.trim();
            if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
    }
}
