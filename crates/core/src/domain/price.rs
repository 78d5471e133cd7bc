use std::fmt;

use serde::{Deserialize, Serialize};

/// Which precedence step produced an [`EffectivePrice`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceSource {
    Override,
    Campaign,
    Tier,
    Base,
}

impl PriceSource {
    pub const PRECEDENCE: [PriceSource; 4] =
        [Self::Override, Self::Campaign, Self::Tier, Self::Base];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Override => "override",
            Self::Campaign => "campaign",
            Self::Tier => "tier",
            Self::Base => "base",
        }
    }
}

impl fmt::Display for PriceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The unit price that will actually be charged, in minor currency units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectivePrice {
    pub amount: i64,
    pub source: PriceSource,
}

impl EffectivePrice {
    pub fn new(amount: i64, source: PriceSource) -> Self {
        Self { amount, source }
    }
}
