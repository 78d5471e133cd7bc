use serde::{Deserialize, Serialize};

use crate::domain::{
    customer::{CompanyId, CustomerId, CustomerOverride},
    price_class::{classify_label, PriceClass},
    stock::{StockId, StockPriceRecord, TierPrices},
};
use crate::errors::QueryShapeError;
use crate::pricing::PricingInputs;

pub const OPERATION_NAME: &str = "GetProductPricesQuery";

pub const QUERY: &str = r#"
query GetProductPricesQuery($company_id: String!, $customer_id: String!, $stock_id: String!) {
  stock(where: {company_id: {_eq: $company_id}, stock_id: {_eq: $stock_id}}) {
    stock_price
    stock_price_a
    stock_price_b
    stock_price_c
    stock_price_d
    stock_price_s
    stock_price_hra
    stock_price_hrb
    stock_price_hrc
    stock_price_hrd
    stock_price_z
    campaign_price
    is_campaign_active
  }
  customer_price_list(
    where: {
      company_id: {_eq: $company_id}
      customer_id: {_eq: $customer_id}
      stock_id: {_eq: $stock_id}
    }
  ) {
    customers_price
  }
  customers(where: {company_id: {_eq: $company_id}, customer_id: {_eq: $customer_id}}) {
    customer_price_class
  }
}"#;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variables {
    pub company_id: CompanyId,
    pub customer_id: CustomerId,
    pub stock_id: StockId,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRow {
    pub stock_price: Option<i64>,
    pub stock_price_a: Option<i64>,
    pub stock_price_b: Option<i64>,
    pub stock_price_c: Option<i64>,
    pub stock_price_d: Option<i64>,
    pub stock_price_s: Option<i64>,
    pub stock_price_hra: Option<i64>,
    pub stock_price_hrb: Option<i64>,
    pub stock_price_hrc: Option<i64>,
    pub stock_price_hrd: Option<i64>,
    pub stock_price_z: Option<i64>,
    pub campaign_price: Option<i64>,
    pub is_campaign_active: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerPriceListRow {
    pub customers_price: Option<i64>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRow {
    pub customer_price_class: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseData {
    #[serde(default)]
    pub stock: Vec<StockRow>,
    #[serde(default)]
    pub customer_price_list: Vec<CustomerPriceListRow>,
    #[serde(default)]
    pub customers: Vec<CustomerRow>,
}

impl StockRow {
    fn tier(&self, class: PriceClass) -> Option<i64> {
        match class {
            PriceClass::A => self.stock_price_a,
            PriceClass::B => self.stock_price_b,
            PriceClass::C => self.stock_price_c,
            PriceClass::D => self.stock_price_d,
            PriceClass::S => self.stock_price_s,
            PriceClass::Hra => self.stock_price_hra,
            PriceClass::Hrb => self.stock_price_hrb,
            PriceClass::Hrc => self.stock_price_hrc,
            PriceClass::Hrd => self.stock_price_hrd,
            PriceClass::Z => self.stock_price_z,
        }
    }

    pub fn into_record(self) -> Result<StockPriceRecord, QueryShapeError> {
        let base_price = self.stock_price.ok_or(QueryShapeError::MissingColumn("stock_price"))?;
        let tier_prices: TierPrices = PriceClass::ALL
            .into_iter()
            .filter_map(|class| self.tier(class).map(|amount| (class, amount)))
            .collect();

        Ok(StockPriceRecord {
            base_price,
            tier_prices,
            campaign_price: self.campaign_price,
            campaign_active: self.is_campaign_active.unwrap_or(false),
        })
    }
}

impl ResponseData {
    /// Accepts either a full `{data, errors}` envelope or the bare `data` object.
    pub fn from_json(raw: &str) -> Result<Self, QueryShapeError> {
        let value: serde_json::Value =
            serde_json::from_str(raw).map_err(|error| QueryShapeError::Decode(error.to_string()))?;

        let is_envelope = value
            .as_object()
            .map(|object| object.contains_key("data") || object.contains_key("errors"))
            .unwrap_or(false);

        if is_envelope {
            let response: super::GraphqlResponse<ResponseData> = serde_json::from_value(value)
                .map_err(|error| QueryShapeError::Decode(error.to_string()))?;
            return response.into_data();
        }

        serde_json::from_value(value).map_err(|error| QueryShapeError::Decode(error.to_string()))
    }

    pub fn into_inputs(self) -> Result<PricingInputs, QueryShapeError> {
        let stock = single_row(self.stock, |rows| QueryShapeError::AmbiguousStock { rows })?
            .map(StockRow::into_record)
            .transpose()?;

        let customer =
            single_row(self.customers, |rows| QueryShapeError::AmbiguousCustomer { rows })?;
        let (price_class, unrecognised_price_class) =
            classify_label(customer.and_then(|row| row.customer_price_class).as_deref());

        let overrides = self
            .customer_price_list
            .into_iter()
            .map(|row| CustomerOverride { override_price: row.customers_price })
            .collect();

        Ok(PricingInputs { stock, overrides, price_class, unrecognised_price_class })
    }
}

fn single_row<T>(
    rows: Vec<T>,
    ambiguous: impl FnOnce(usize) -> QueryShapeError,
) -> Result<Option<T>, QueryShapeError> {
    if rows.len() > 1 {
        return Err(ambiguous(rows.len()));
    }
    Ok(rows.into_iter().next())
}
