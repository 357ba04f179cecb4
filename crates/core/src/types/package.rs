//! Fixed package tiers offered for custom design and embroidery work.

use serde::{Deserialize, Serialize};

use super::price::Price;

/// A service package the customer can pick on request pages.
///
/// Selection is plain local state attached to the outgoing request; the
/// backend validates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PackageTier {
    #[default]
    Basic,
    Premium,
    Enterprise,
}

impl PackageTier {
    /// Every tier, cheapest first.
    pub const ALL: [Self; 3] = [Self::Basic, Self::Premium, Self::Enterprise];

    /// Wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Premium => "premium",
            Self::Enterprise => "enterprise",
        }
    }

    /// Display name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Premium => "Premium",
            Self::Enterprise => "Enterprise",
        }
    }

    /// Package price.
    #[must_use]
    pub fn price(self) -> Price {
        match self {
            Self::Basic => Price::from_dollars(299),
            Self::Premium => Price::from_dollars(599),
            Self::Enterprise => Price::from_dollars(999),
        }
    }

    /// Promised turnaround in days.
    #[must_use]
    pub const fn delivery_days(self) -> u32 {
        match self {
            Self::Basic => 7,
            Self::Premium => 5,
            Self::Enterprise => 3,
        }
    }

    /// Included revision rounds; `None` means unlimited.
    #[must_use]
    pub const fn revisions(self) -> Option<u32> {
        match self {
            Self::Basic => Some(2),
            Self::Premium => Some(5),
            Self::Enterprise => None,
        }
    }
}

impl std::fmt::Display for PackageTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for PackageTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("invalid package: {s}"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_higher_tiers_cost_more_and_ship_faster() {
        let [basic, premium, enterprise] = PackageTier::ALL;
        assert!(basic.price() < premium.price());
        assert!(premium.price() < enterprise.price());
        assert!(basic.delivery_days() > enterprise.delivery_days());
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Premium".parse::<PackageTier>().unwrap(), PackageTier::Premium);
        assert!("gold".parse::<PackageTier>().is_err());
    }
}
