//! Response shapes for the Hasura queries feeding the resolver.
//!
//! Transport, authentication and issuing the query belong to the caller; this
//! module only decodes what came back and adapts it into resolver inputs.

pub mod get_product_prices;

use serde::{Deserialize, Serialize};

use crate::errors::QueryShapeError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphqlError {
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphqlResponse<T> {
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

impl<T> GraphqlResponse<T> {
    pub fn into_data(self) -> Result<T, QueryShapeError> {
        if !self.errors.is_empty() {
            return Err(QueryShapeError::Graphql(
                self.errors.into_iter().map(|error| error.message).collect(),
            ));
        }
        self.data.ok_or(QueryShapeError::MissingData)
    }
}

#[cfg(test)]
mod tests {
    use super::GraphqlResponse;
    use crate::errors::QueryShapeError;

    #[test]
    fn errors_win_over_partial_data() {
        let response: GraphqlResponse<serde_json::Value> = serde_json::from_str(
            r#"{"data": {"stock": []}, "errors": [{"message": "field not found"}]}"#,
        )
        .expect("deserialize");

        assert_eq!(
            response.into_data(),
            Err(QueryShapeError::Graphql(vec!["field not found".to_string()]))
        );
    }

    #[test]
    fn null_data_is_missing_data() {
        let response: GraphqlResponse<serde_json::Value> =
            serde_json::from_str(r#"{"data": null}"#).expect("deserialize");

        assert_eq!(response.into_data(), Err(QueryShapeError::MissingData));
    }
}
