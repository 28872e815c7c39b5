use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Unit system understood by the weather provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    Metric,
    #[default]
    Imperial,
    Standard,
}

impl Units {
    pub const ALL: [Units; 3] = [Units::Metric, Units::Imperial, Units::Standard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
            Units::Standard => "standard",
        }
    }
}

impl Display for Units {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Units {
    type Err = CoreError;

    /// Parses the exact lower-case wire form; anything else is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Units::ALL
            .into_iter()
            .find(|units| units.as_str() == s)
            .ok_or_else(|| CoreError::InvalidUnits(s.to_string()))
    }
}
