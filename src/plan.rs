use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Billing cadence/tier reported by the account service. The wire value is an
/// open string set; anything beyond the known tiers is carried verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanPeriod {
    Free,
    Yearly,
    Lifetime,
    Other(String),
}

impl PlanPeriod {
    pub fn from_str(s: &str) -> Self {
        match s {
            "free" => PlanPeriod::Free,
            "yearly" => PlanPeriod::Yearly,
            "lifetime" => PlanPeriod::Lifetime,
            other => PlanPeriod::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PlanPeriod::Free => "free",
            PlanPeriod::Yearly => "yearly",
            PlanPeriod::Lifetime => "lifetime",
            PlanPeriod::Other(s) => s,
        }
    }

    pub fn is_free(&self) -> bool {
        matches!(self, PlanPeriod::Free)
    }

    /// Plan-indicator button text: "No Plan" for the free tier, otherwise the
    /// wire value followed by " Plan" (rendered verbatim, no recasing).
    pub fn button_label(&self) -> String {
        if self.is_free() {
            "No Plan".to_string()
        } else {
            format!("{} Plan", self.as_str())
        }
    }

    /// Dropdown plan text: "Staging (free)" for the free tier, otherwise the
    /// bare wire value.
    pub fn dropdown_label(&self) -> String {
        if self.is_free() {
            "Staging (free)".to_string()
        } else {
            self.as_str().to_string()
        }
    }
}

impl fmt::Display for PlanPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PlanPeriod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PlanPeriod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(PlanPeriod::from_str(&s))
    }
}

/// Tier identifier carried by a buy control's `plan-type` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
    Free,
    Yearly,
    Lifetime,
}

impl PlanType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "free" => Some(PlanType::Free),
            "yearly" => Some(PlanType::Yearly),
            "lifetime" => Some(PlanType::Lifetime),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanType::Free => "free",
            PlanType::Yearly => "yearly",
            PlanType::Lifetime => "lifetime",
        }
    }
}
