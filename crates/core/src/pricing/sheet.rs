use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::domain::{
    customer::CustomerOverride,
    price::{EffectivePrice, PriceSource},
    price_class::{classify_label, PriceClass},
    stock::{StockId, StockPriceRecord},
};
use crate::errors::PricingError;
use crate::pricing::{PriceResolver, PricingInputs};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideRow {
    pub stock_id: StockId,
    pub customers_price: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetItem {
    pub stock_id: StockId,
    pub pricing: Option<StockPriceRecord>,
}

/// One customer's prices for a list of stock items. The customer's price class
/// is looked up once and applies to every item. It is read like the
/// `customer_price_class` column: any letter case, unknown labels mean no class.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSheetRequest {
    #[serde(default)]
    pub customer_price_class: Option<String>,
    #[serde(default)]
    pub overrides: Vec<OverrideRow>,
    #[serde(default)]
    pub items: Vec<SheetItem>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SheetLine {
    pub stock_id: StockId,
    pub outcome: Result<EffectivePrice, PricingError>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SheetSummary {
    pub by_source: BTreeMap<PriceSource, usize>,
    pub failed: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PriceSheet {
    pub price_class: Option<PriceClass>,
    pub unrecognised_price_class: Option<String>,
    pub lines: Vec<SheetLine>,
}

impl PriceSheet {
    pub fn summary(&self) -> SheetSummary {
        let mut summary = SheetSummary::default();
        for line in &self.lines {
            match &line.outcome {
                Ok(price) => *summary.by_source.entry(price.source).or_default() += 1,
                Err(_) => summary.failed += 1,
            }
        }
        summary
    }
}

pub fn price_sheet<R>(request: &PriceSheetRequest, resolver: &R) -> PriceSheet
where
    R: PriceResolver + ?Sized,
{
    let (price_class, unrecognised_price_class) =
        classify_label(request.customer_price_class.as_deref());

    let mut overrides_by_stock: HashMap<&StockId, Vec<CustomerOverride>> = HashMap::new();
    for row in &request.overrides {
        overrides_by_stock
            .entry(&row.stock_id)
            .or_default()
            .push(CustomerOverride { override_price: row.customers_price });
    }

    let lines = request
        .items
        .iter()
        .map(|item| {
            let inputs = PricingInputs {
                stock: item.pricing.clone(),
                overrides: overrides_by_stock.get(&item.stock_id).cloned().unwrap_or_default(),
                price_class,
                unrecognised_price_class: None,
            };
            SheetLine { stock_id: item.stock_id.clone(), outcome: resolver.resolve(&inputs) }
        })
        .collect();

    PriceSheet { price_class, unrecognised_price_class, lines }
}

#[cfg(test)]
mod tests {
    use super::{price_sheet, OverrideRow, PriceSheetRequest, SheetItem};
    use crate::domain::{
        price::{EffectivePrice, PriceSource},
        price_class::PriceClass,
        stock::{StockId, StockPriceRecord, TierPrices},
    };
    use crate::errors::PricingError;
    use crate::pricing::DeterministicPriceResolver;

    fn stock_id(value: &str) -> StockId {
        StockId(value.to_string())
    }

    fn item(id: &str, pricing: Option<StockPriceRecord>) -> SheetItem {
        SheetItem { stock_id: stock_id(id), pricing }
    }

    #[test]
    fn prices_each_item_in_input_order() {
        let request = PriceSheetRequest {
            customer_price_class: Some("A".to_string()),
            overrides: vec![OverrideRow { stock_id: stock_id("bolt"), customers_price: Some(40) }],
            items: vec![
                item("bolt", Some(StockPriceRecord::new(60))),
                item(
                    "nut",
                    Some(
                        StockPriceRecord::new(20)
                            .with_tiers(TierPrices::new().with(PriceClass::A, 15)),
                    ),
                ),
                item("washer", Some(StockPriceRecord::new(5).with_campaign(Some(3), true))),
                item("screw", Some(StockPriceRecord::new(9))),
            ],
        };

        let sheet = price_sheet(&request, &DeterministicPriceResolver);

        let ids: Vec<&str> = sheet.lines.iter().map(|line| line.stock_id.0.as_str()).collect();
        assert_eq!(ids, vec!["bolt", "nut", "washer", "screw"]);
        let outcomes: Vec<_> = sheet.lines.iter().map(|line| line.outcome.clone()).collect();
        assert_eq!(
            outcomes,
            vec![
                Ok(EffectivePrice::new(40, PriceSource::Override)),
                Ok(EffectivePrice::new(15, PriceSource::Tier)),
                Ok(EffectivePrice::new(3, PriceSource::Campaign)),
                Ok(EffectivePrice::new(9, PriceSource::Base)),
            ]
        );
    }

    #[test]
    fn failing_lines_do_not_affect_their_neighbours() {
        let request = PriceSheetRequest {
            customer_price_class: None,
            overrides: vec![
                OverrideRow { stock_id: stock_id("dup"), customers_price: Some(1) },
                OverrideRow { stock_id: stock_id("dup"), customers_price: Some(2) },
            ],
            items: vec![
                item("dup", Some(StockPriceRecord::new(10))),
                item("gone", None),
                item("fine", Some(StockPriceRecord::new(30))),
            ],
        };

        let sheet = price_sheet(&request, &DeterministicPriceResolver);

        assert_eq!(
            sheet.lines.first().map(|line| line.outcome.clone()),
            Some(Err(PricingError::AmbiguousOverride { rows: 2 }))
        );
        assert_eq!(
            sheet.lines.get(1).map(|line| line.outcome.clone()),
            Some(Err(PricingError::MissingPricingData))
        );
        assert_eq!(
            sheet.lines.get(2).map(|line| line.outcome.clone()),
            Some(Ok(EffectivePrice::new(30, PriceSource::Base)))
        );

        let summary = sheet.summary();
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.by_source.get(&PriceSource::Base), Some(&1));
        assert_eq!(summary.by_source.get(&PriceSource::Override), None);
    }

    #[test]
    fn request_deserializes_from_json() {
        let request: PriceSheetRequest = serde_json::from_str(
            r#"{
                "customer_price_class": "HRA",
                "overrides": [{"stock_id": "S-1", "customers_price": null}],
                "items": [{
                    "stock_id": "S-1",
                    "pricing": {"base_price": 500, "tier_prices": {"HRA": 450}}
                }]
            }"#,
        )
        .expect("deserialize");

        let sheet = price_sheet(&request, &DeterministicPriceResolver);

        assert_eq!(
            sheet.lines.first().map(|line| line.outcome.clone()),
            Some(Ok(EffectivePrice::new(450, PriceSource::Tier)))
        );
    }

    #[test]
    fn lowercase_class_label_selects_the_tier() {
        let request = PriceSheetRequest {
            customer_price_class: Some("hrb".to_string()),
            overrides: Vec::new(),
            items: vec![item(
                "S-1",
                Some(
                    StockPriceRecord::new(300)
                        .with_tiers(TierPrices::new().with(PriceClass::Hrb, 250)),
                ),
            )],
        };

        let sheet = price_sheet(&request, &DeterministicPriceResolver);

        assert_eq!(sheet.price_class, Some(PriceClass::Hrb));
        assert_eq!(
            sheet.lines.first().map(|line| line.outcome.clone()),
            Some(Ok(EffectivePrice::new(250, PriceSource::Tier)))
        );
    }

    #[test]
    fn unknown_class_label_prices_every_line_from_base() {
        let request: PriceSheetRequest = serde_json::from_str(
            r#"{
                "customer_price_class": "VIP",
                "items": [
                    {"stock_id": "S-1", "pricing": {"base_price": 300, "tier_prices": {"A": 10}}},
                    {"stock_id": "S-2", "pricing": {"base_price": 40}}
                ]
            }"#,
        )
        .expect("unknown labels still deserialize");

        let sheet = price_sheet(&request, &DeterministicPriceResolver);

        assert_eq!(sheet.price_class, None);
        assert_eq!(sheet.unrecognised_price_class.as_deref(), Some("VIP"));
        let outcomes: Vec<_> = sheet.lines.iter().map(|line| line.outcome.clone()).collect();
        assert_eq!(
            outcomes,
            vec![
                Ok(EffectivePrice::new(300, PriceSource::Base)),
                Ok(EffectivePrice::new(40, PriceSource::Base)),
            ]
        );
    }
}
