use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomerId(pub String);

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompanyId(pub String);

/// A negotiated price for one (company, customer, stock) triple.
///
/// A row whose `override_price` is `None` carries no negotiated price and is
/// treated exactly like the absence of a row.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerOverride {
    pub override_price: Option<i64>,
}

impl CustomerOverride {
    pub fn priced(amount: i64) -> Self {
        Self { override_price: Some(amount) }
    }
}
