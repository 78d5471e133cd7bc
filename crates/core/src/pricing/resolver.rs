use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{
    customer::CustomerOverride,
    price::{EffectivePrice, PriceSource},
    price_class::PriceClass,
    stock::StockPriceRecord,
};
use crate::errors::PricingError;

/// Why a precedence stage did not produce the price.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    NoOverride,
    CampaignInactive,
    CampaignPriceMissing,
    NoPriceClass,
    TierUndefined { class: PriceClass },
    TierNegative { class: PriceClass, amount: i64 },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoOverride => f.write_str("no customer override price"),
            Self::CampaignInactive => f.write_str("campaign is not active"),
            Self::CampaignPriceMissing => f.write_str("campaign is active but has no price"),
            Self::NoPriceClass => f.write_str("customer has no price class"),
            Self::TierUndefined { class } => write!(f, "no tier price for class {class}"),
            Self::TierNegative { class, amount } => {
                write!(f, "tier price {amount} for class {class} is negative")
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StepOutcome {
    Matched { amount: i64 },
    Skipped(SkipReason),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionStep {
    pub stage: PriceSource,
    #[serde(flatten)]
    pub outcome: StepOutcome,
}

/// Stages evaluated during one resolution, in precedence order. The last step
/// is always the match.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionTrace {
    pub steps: Vec<ResolutionStep>,
}

impl ResolutionTrace {
    fn skip(&mut self, stage: PriceSource, reason: SkipReason) {
        self.steps.push(ResolutionStep { stage, outcome: StepOutcome::Skipped(reason) });
    }

    fn finish(mut self, price: EffectivePrice) -> TracedPrice {
        self.steps.push(ResolutionStep {
            stage: price.source,
            outcome: StepOutcome::Matched { amount: price.amount },
        });
        TracedPrice { price, trace: self }
    }

    pub fn skipped(&self) -> impl Iterator<Item = (PriceSource, SkipReason)> + '_ {
        self.steps.iter().filter_map(|step| match step.outcome {
            StepOutcome::Skipped(reason) => Some((step.stage, reason)),
            StepOutcome::Matched { .. } => None,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TracedPrice {
    pub price: EffectivePrice,
    pub trace: ResolutionTrace,
}

pub fn resolve_price(
    stock: Option<&StockPriceRecord>,
    overrides: &[CustomerOverride],
    price_class: Option<PriceClass>,
) -> Result<EffectivePrice, PricingError> {
    resolve_price_with_trace(stock, overrides, price_class).map(|traced| traced.price)
}

/// Resolves the effective unit price, first match wins:
/// override, active campaign, price-class tier, base price.
pub fn resolve_price_with_trace(
    stock: Option<&StockPriceRecord>,
    overrides: &[CustomerOverride],
    price_class: Option<PriceClass>,
) -> Result<TracedPrice, PricingError> {
    let stock = stock.ok_or(PricingError::MissingPricingData)?;
    let override_price = single_override(overrides)?;
    let mut trace = ResolutionTrace::default();

    if let Some(amount) = override_price {
        return Ok(trace.finish(EffectivePrice::new(amount, PriceSource::Override)));
    }
    trace.skip(PriceSource::Override, SkipReason::NoOverride);

    match (stock.campaign_active, stock.campaign_price) {
        (true, Some(amount)) => {
            return Ok(trace.finish(EffectivePrice::new(amount, PriceSource::Campaign)));
        }
        (true, None) => trace.skip(PriceSource::Campaign, SkipReason::CampaignPriceMissing),
        (false, _) => trace.skip(PriceSource::Campaign, SkipReason::CampaignInactive),
    }

    match price_class {
        None => trace.skip(PriceSource::Tier, SkipReason::NoPriceClass),
        Some(class) => match stock.tier_prices.get(class) {
            Some(amount) if amount >= 0 => {
                return Ok(trace.finish(EffectivePrice::new(amount, PriceSource::Tier)));
            }
            Some(amount) => {
                trace.skip(PriceSource::Tier, SkipReason::TierNegative { class, amount })
            }
            None => trace.skip(PriceSource::Tier, SkipReason::TierUndefined { class }),
        },
    }

    Ok(trace.finish(EffectivePrice::new(stock.base_price, PriceSource::Base)))
}

fn single_override(overrides: &[CustomerOverride]) -> Result<Option<i64>, PricingError> {
    match overrides {
        [] => Ok(None),
        [only] => Ok(only.override_price),
        rows => Err(PricingError::AmbiguousOverride { rows: rows.len() }),
    }
}
