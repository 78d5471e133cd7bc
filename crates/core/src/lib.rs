pub mod config;
pub mod domain;
pub mod errors;
pub mod graphql;
pub mod pricing;

pub use domain::customer::{CompanyId, CustomerId, CustomerOverride};
pub use domain::price::{EffectivePrice, PriceSource};
pub use domain::price_class::{PriceClass, UnknownPriceClass};
pub use domain::stock::{StockId, StockPriceRecord, TierPrices};
pub use errors::{ApplicationError, InterfaceError, PricingError, QueryShapeError};
pub use pricing::resolver::{
    resolve_price, resolve_price_with_trace, ResolutionStep, ResolutionTrace, SkipReason,
    StepOutcome, TracedPrice,
};
pub use pricing::sheet::{price_sheet, PriceSheet, PriceSheetRequest, SheetLine, SheetSummary};
pub use pricing::{DeterministicPriceResolver, PriceResolver, PricingInputs};
