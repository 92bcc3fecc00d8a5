use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Period {
    pub const ALL: [Period; 4] = [Self::Daily, Self::Weekly, Self::Monthly, Self::Yearly];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    /// Maps a dashboard tab to the period the engine aggregates over.
    /// The `overview` tab shows the monthly figures.
    pub fn from_tab(tab: &str) -> Result<Self, ClientError> {
        if tab == "overview" {
            return Ok(Self::Monthly);
        }
        tab.parse()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = ClientError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            other => Err(ClientError::invalid_argument(&format!(
                "Unknown period `{other}`. Use one of: daily, weekly, monthly, yearly."
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesTargets {
    pub daily: i64,
    pub weekly: i64,
    pub monthly: i64,
    pub yearly: i64,
}

impl SalesTargets {
    pub const fn for_period(&self, period: Period) -> i64 {
        match period {
            Period::Daily => self.daily,
            Period::Weekly => self.weekly,
            Period::Monthly => self.monthly,
            Period::Yearly => self.yearly,
        }
    }
}

impl Default for SalesTargets {
    fn default() -> Self {
        Self {
            daily: 30_000,
            weekly: 150_000,
            monthly: 700_000,
            yearly: 8_400_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Period, SalesTargets};

    #[test]
    fn parses_every_period_name() {
        for period in Period::ALL {
            let parsed = period.as_str().parse::<Period>();
            assert!(parsed.is_ok());
            if let Ok(value) = parsed {
                assert_eq!(value, period);
            }
        }
    }

    #[test]
    fn unknown_period_is_an_invalid_argument() {
        let parsed = "quarterly".parse::<Period>();
        assert!(parsed.is_err());
        if let Err(error) = parsed {
            assert_eq!(error.code, "invalid_argument");
            assert!(error.message.contains("quarterly"));
        }
    }

    #[test]
    fn overview_tab_maps_to_monthly() {
        let parsed = Period::from_tab("overview");
        assert!(matches!(parsed, Ok(Period::Monthly)));
        assert!(Period::from_tab("overall").is_err());
    }

    #[test]
    fn targets_lookup_matches_period() {
        let targets = SalesTargets {
            daily: 1,
            weekly: 2,
            monthly: 3,
            yearly: 4,
        };
        assert_eq!(targets.for_period(Period::Daily), 1);
        assert_eq!(targets.for_period(Period::Weekly), 2);
        assert_eq!(targets.for_period(Period::Monthly), 3);
        assert_eq!(targets.for_period(Period::Yearly), 4);
        assert_eq!(SalesTargets::default().monthly, 700_000);
    }
}
