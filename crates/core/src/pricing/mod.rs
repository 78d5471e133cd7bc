pub mod resolver;
pub mod sheet;

use serde::{Deserialize, Serialize};

use crate::domain::{
    customer::CustomerOverride, price::EffectivePrice, price_class::PriceClass,
    stock::StockPriceRecord,
};
use crate::errors::PricingError;

use self::resolver::{resolve_price, resolve_price_with_trace, TracedPrice};

/// Everything the resolver needs for one (company, customer, stock) triple.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingInputs {
    pub stock: Option<StockPriceRecord>,
    #[serde(default)]
    pub overrides: Vec<CustomerOverride>,
    #[serde(default)]
    pub price_class: Option<PriceClass>,
    /// A class label from the source row that matched no known class. Not
    /// consulted by the resolver.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unrecognised_price_class: Option<String>,
}

pub trait PriceResolver: Send + Sync {
    fn resolve(&self, inputs: &PricingInputs) -> Result<EffectivePrice, PricingError>;

    fn resolve_with_trace(&self, inputs: &PricingInputs) -> Result<TracedPrice, PricingError>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DeterministicPriceResolver;

impl PriceResolver for DeterministicPriceResolver {
    fn resolve(&self, inputs: &PricingInputs) -> Result<EffectivePrice, PricingError> {
        resolve_price(inputs.stock.as_ref(), &inputs.overrides, inputs.price_class)
    }

    fn resolve_with_trace(&self, inputs: &PricingInputs) -> Result<TracedPrice, PricingError> {
        resolve_price_with_trace(inputs.stock.as_ref(), &inputs.overrides, inputs.price_class)
    }
}
