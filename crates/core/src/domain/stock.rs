use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::price_class::PriceClass;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StockId(pub String);

/// Per-class tier prices in minor currency units. A class with no entry has no tier.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierPrices(BTreeMap<PriceClass, i64>);

impl TierPrices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, class: PriceClass, amount: i64) -> Self {
        self.set(class, amount);
        self
    }

    pub fn set(&mut self, class: PriceClass, amount: i64) {
        self.0.insert(class, amount);
    }

    pub fn get(&self, class: PriceClass) -> Option<i64> {
        self.0.get(&class).copied()
    }
}

impl FromIterator<(PriceClass, i64)> for TierPrices {
    fn from_iter<I: IntoIterator<Item = (PriceClass, i64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One stock item's pricing surface within a company catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockPriceRecord {
    pub base_price: i64,
    #[serde(default)]
    pub tier_prices: TierPrices,
    #[serde(default)]
    pub campaign_price: Option<i64>,
    #[serde(default)]
    pub campaign_active: bool,
}

impl StockPriceRecord {
    pub fn new(base_price: i64) -> Self {
        Self {
            base_price,
            tier_prices: TierPrices::new(),
            campaign_price: None,
            campaign_active: false,
        }
    }

    pub fn with_tiers(mut self, tier_prices: TierPrices) -> Self {
        self.tier_prices = tier_prices;
        self
    }

    pub fn with_campaign(mut self, campaign_price: Option<i64>, campaign_active: bool) -> Self {
        self.campaign_price = campaign_price;
        self.campaign_active = campaign_active;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{StockPriceRecord, TierPrices};
    use crate::domain::price_class::PriceClass;

    #[test]
    fn undefined_tiers_read_as_none() {
        let tiers = TierPrices::new().with(PriceClass::A, 120).with(PriceClass::Hrc, 80);

        assert_eq!(tiers.get(PriceClass::A), Some(120));
        assert_eq!(tiers.get(PriceClass::Hrc), Some(80));
        assert_eq!(tiers.get(PriceClass::B), None);
    }

    #[test]
    fn record_deserializes_with_optional_fields_missing() {
        let record: StockPriceRecord =
            serde_json::from_str(r#"{"base_price": 200, "tier_prices": {"C": 95}}"#)
                .expect("deserialize");

        assert_eq!(record.base_price, 200);
        assert_eq!(record.tier_prices.get(PriceClass::C), Some(95));
        assert_eq!(record.campaign_price, None);
        assert!(!record.campaign_active);
    }
}
