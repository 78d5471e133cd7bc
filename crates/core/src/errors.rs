use thiserror::Error;

/// Resolver failures. Both indicate an upstream data problem and are never retried.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    #[error("no pricing data for this stock item in the company catalog")]
    MissingPricingData,
    #[error("expected at most one customer override row, found {rows}")]
    AmbiguousOverride { rows: usize },
}

impl PricingError {
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::MissingPricingData => "missing_pricing_data",
            Self::AmbiguousOverride { .. } => "ambiguous_override",
        }
    }
}

/// A `GetProductPrices` result that cannot be turned into resolver inputs.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum QueryShapeError {
    #[error("graphql response carried errors: {}", .0.join("; "))]
    Graphql(Vec<String>),
    #[error("graphql response carried no data")]
    MissingData,
    #[error("expected at most one stock row, found {rows}")]
    AmbiguousStock { rows: usize },
    #[error("expected at most one customer row, found {rows}")]
    AmbiguousCustomer { rows: usize },
    #[error("required column `{0}` was null")]
    MissingColumn(&'static str),
    #[error("could not decode query result: {0}")]
    Decode(String),
}

impl QueryShapeError {
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::Graphql(_) => "graphql_errors",
            Self::MissingData => "missing_data",
            Self::AmbiguousStock { .. } => "ambiguous_stock",
            Self::AmbiguousCustomer { .. } => "ambiguous_customer",
            Self::MissingColumn(_) => "missing_column",
            Self::Decode(_) => "decode",
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Pricing(#[from] PricingError),
    #[error(transparent)]
    QueryShape(#[from] QueryShapeError),
    #[error("input failure: {0}")]
    Input(String),
    #[error("configuration failure: {0}")]
    Configuration(String),
}

impl ApplicationError {
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::Pricing(error) => error.error_class(),
            Self::QueryShape(error) => error.error_class(),
            Self::Input(_) => "input",
            Self::Configuration(_) => "config_validation",
        }
    }

    /// Pricing and query shape failures persist until the upstream rows change.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Input(_))
    }

    pub fn into_interface(self, correlation_id: impl Into<String>) -> InterfaceError {
        let correlation_id = correlation_id.into();
        let mut mapped = InterfaceError::from(self);
        match &mut mapped {
            InterfaceError::BadRequest { correlation_id: id, .. }
            | InterfaceError::NotFound { correlation_id: id, .. }
            | InterfaceError::Conflict { correlation_id: id, .. }
            | InterfaceError::Internal { correlation_id: id, .. } => *id = correlation_id,
        }
        mapped
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("bad request: {message}")]
    BadRequest { message: String, correlation_id: String },
    #[error("not found: {message}")]
    NotFound { message: String, correlation_id: String },
    #[error("conflict: {message}")]
    Conflict { message: String, correlation_id: String },
    #[error("internal error: {message}")]
    Internal { message: String, correlation_id: String },
}

impl InterfaceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::BadRequest { .. } => "bad_request",
            Self::NotFound { .. } => "not_found",
            Self::Conflict { .. } => "conflict",
            Self::Internal { .. } => "internal",
        }
    }

    pub fn correlation_id(&self) -> &str {
        match self {
            Self::BadRequest { correlation_id, .. }
            | Self::NotFound { correlation_id, .. }
            | Self::Conflict { correlation_id, .. }
            | Self::Internal { correlation_id, .. } => correlation_id,
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            Self::BadRequest { .. } => {
                "The request could not be processed. Check inputs and try again."
            }
            Self::NotFound { .. } => "This item is not available in this company's catalog.",
            Self::Conflict { .. } => {
                "Pricing data for this item is inconsistent. Contact an administrator."
            }
            Self::Internal { .. } => "An unexpected internal error occurred.",
        }
    }
}

impl From<ApplicationError> for InterfaceError {
    fn from(value: ApplicationError) -> Self {
        let message = value.to_string();
        let correlation_id = "unassigned".to_owned();
        match value {
            ApplicationError::Pricing(PricingError::MissingPricingData) => {
                Self::NotFound { message, correlation_id }
            }
            ApplicationError::Pricing(PricingError::AmbiguousOverride { .. })
            | ApplicationError::QueryShape(QueryShapeError::AmbiguousStock { .. })
            | ApplicationError::QueryShape(QueryShapeError::AmbiguousCustomer { .. }) => {
                Self::Conflict { message, correlation_id }
            }
            ApplicationError::QueryShape(_) | ApplicationError::Input(_) => {
                Self::BadRequest { message, correlation_id }
            }
            ApplicationError::Configuration(_) => Self::Internal { message, correlation_id },
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::{ApplicationError, InterfaceError, PricingError, QueryShapeError};

    #[test]
    fn missing_pricing_data_maps_to_not_found() {
        let interface =
            ApplicationError::from(PricingError::MissingPricingData).into_interface("req-1");

        assert!(matches!(
            interface,
            InterfaceError::NotFound {
                ref correlation_id,
                ..
            } if correlation_id == "req-1"
        ));
        assert_eq!(
            interface.user_message(),
            "This item is not available in this company's catalog."
        );
    }

    #[test]
    fn ambiguous_rows_map_to_conflict() {
        let override_conflict =
            ApplicationError::from(PricingError::AmbiguousOverride { rows: 2 }).into_interface("a");
        let stock_conflict =
            ApplicationError::from(QueryShapeError::AmbiguousStock { rows: 3 }).into_interface("b");

        assert!(matches!(override_conflict, InterfaceError::Conflict { .. }));
        assert!(matches!(stock_conflict, InterfaceError::Conflict { .. }));
        assert_eq!(override_conflict.kind(), "conflict");
        assert_eq!(stock_conflict.correlation_id(), "b");
    }

    #[test]
    fn pricing_failures_are_not_retryable() {
        assert!(!ApplicationError::from(PricingError::MissingPricingData).is_retryable());
        assert!(
            !ApplicationError::from(PricingError::AmbiguousOverride { rows: 2 }).is_retryable()
        );
        assert!(!ApplicationError::from(QueryShapeError::MissingData).is_retryable());
        assert!(ApplicationError::Input("file vanished".to_owned()).is_retryable());
    }

    #[test]
    fn error_classes_are_stable_labels() {
        assert_eq!(
            ApplicationError::from(PricingError::AmbiguousOverride { rows: 2 }).error_class(),
            "ambiguous_override"
        );
        assert_eq!(
            ApplicationError::from(QueryShapeError::MissingColumn("stock_price")).error_class(),
            "missing_column"
        );
        assert_eq!(
            ApplicationError::Configuration("bad currency".to_owned()).error_class(),
            "config_validation"
        );
    }

    #[test]
    fn graphql_error_message_joins_upstream_messages() {
        let error = QueryShapeError::Graphql(vec!["denied".to_owned(), "timeout".to_owned()]);
        assert_eq!(error.to_string(), "graphql response carried errors: denied; timeout");
    }
}
