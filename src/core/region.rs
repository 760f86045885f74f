use crate::core::error::PricingError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Country a price is quoted for.
///
/// Parsing accepts the kebab-case key (`"south-africa"`) or the display
/// name, case-insensitively. Anything else is an [`PricingError::UnknownCountry`].
///
/// # Examples
///
/// ```
/// use fuel_pricing::core::region::Country;
///
/// assert_eq!("zimbabwe".parse::<Country>().unwrap(), Country::Zimbabwe);
/// assert!("atlantis".parse::<Country>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Country {
    SouthAfrica,
    Zimbabwe,
    Botswana,
    Namibia,
    Zambia,
    Mozambique,
}

impl Country {
    pub const ALL: [Country; 6] = [
        Country::SouthAfrica,
        Country::Zimbabwe,
        Country::Botswana,
        Country::Namibia,
        Country::Zambia,
        Country::Mozambique,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Country::SouthAfrica => "south-africa",
            Country::Zimbabwe => "zimbabwe",
            Country::Botswana => "botswana",
            Country::Namibia => "namibia",
            Country::Zambia => "zambia",
            Country::Mozambique => "mozambique",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Country::SouthAfrica => "South Africa",
            Country::Zimbabwe => "Zimbabwe",
            Country::Botswana => "Botswana",
            Country::Namibia => "Namibia",
            Country::Zambia => "Zambia",
            Country::Mozambique => "Mozambique",
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Country {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Country::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(wanted) || c.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PricingError::UnknownCountry {
                key: wanted.to_string(),
            })
    }
}

/// Delivery context of a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GridLocation {
    Coastal,
    Urban,
    Suburban,
    Inland,
    Remote,
}

impl GridLocation {
    pub const ALL: [GridLocation; 5] = [
        GridLocation::Coastal,
        GridLocation::Urban,
        GridLocation::Suburban,
        GridLocation::Inland,
        GridLocation::Remote,
    ];

    pub fn key(self) -> &'static str {
        match self {
            GridLocation::Coastal => "coastal",
            GridLocation::Urban => "urban",
            GridLocation::Suburban => "suburban",
            GridLocation::Inland => "inland",
            GridLocation::Remote => "remote",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GridLocation::Coastal => "Coastal/Port",
            GridLocation::Urban => "Urban/Major City",
            GridLocation::Suburban => "Suburban",
            GridLocation::Inland => "Rural/Inland",
            GridLocation::Remote => "Remote/Border",
        }
    }
}

impl fmt::Display for GridLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for GridLocation {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        GridLocation::ALL
            .into_iter()
            .find(|g| g.key().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PricingError::UnknownGridLocation {
                key: wanted.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_parse() {
        assert_eq!("south-africa".parse::<Country>().unwrap(), Country::SouthAfrica);
        assert_eq!("South Africa".parse::<Country>().unwrap(), Country::SouthAfrica);
        assert_eq!(" MOZAMBIQUE ".parse::<Country>().unwrap(), Country::Mozambique);
    }

    #[test]
    fn test_unknown_country() {
        assert_eq!(
            "atlantis".parse::<Country>(),
            Err(PricingError::UnknownCountry {
                key: "atlantis".to_string()
            })
        );
    }

    #[test]
    fn test_grid_location_parse() {
        assert_eq!("inland".parse::<GridLocation>().unwrap(), GridLocation::Inland);
        assert!(matches!(
            "orbit".parse::<GridLocation>(),
            Err(PricingError::UnknownGridLocation { .. })
        ));
    }

    #[test]
    fn test_serde_keys_match_display() {
        for country in Country::ALL {
            let json = serde_json::to_string(&country).unwrap();
            assert_eq!(json, format!("\"{}\"", country));
        }
        for location in GridLocation::ALL {
            let json = serde_json::to_string(&location).unwrap();
            assert_eq!(json, format!("\"{}\"", location));
        }
    }
}
