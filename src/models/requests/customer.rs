use mongodb::bson;
use serde::Deserialize;
use serde_json::{Map, Value};
use validator_derive::Validate;

use crate::errors::Errors;
use crate::models::customer::Customer;

pub const DEFAULT_LIMIT: u32 = 10;

#[derive(Deserialize, Validate, Debug)]
pub struct RequestCreateCustomer {
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 100))]
    pub customer_type: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub state: Option<String>,
    #[validate(range(min = 0, max = 150, message = "must be between 0 and 150"))]
    pub age: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RequestCreateCustomer {
    /// Deserializes and validates one element of a create request body.
    pub fn parse(value: Value) -> Result<Customer, Errors> {
        let request: RequestCreateCustomer =
            serde_json::from_value(value).map_err(|err| Errors::Invalid(err.to_string()))?;

        validator::Validate::validate(&request)?;

        request.into_customer()
    }

    pub fn into_customer(mut self) -> Result<Customer, Errors> {
        // identifiers are always assigned by the database
        self.extra.remove("_id");

        let extra = bson::to_document(&self.extra)
            .map_err(|err| Errors::Invalid(err.to_string()))?;

        Ok(Customer {
            id: None,
            first_name: self.first_name,
            last_name: self.last_name,
            customer_type: self.customer_type,
            state: self.state,
            age: self.age,
            extra,
        })
    }
}

#[derive(Debug, Default)]
pub struct RequestGetCustomers {
    pub limit: Option<String>,
}

impl RequestGetCustomers {
    /// Builds the request from raw query pairs. A repeated `limit` is
    /// ambiguous and counts as missing.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut limits = pairs
            .into_iter()
            .filter(|(key, _)| key == "limit")
            .map(|(_, value)| value);

        let limit = match (limits.next(), limits.next()) {
            (Some(limit), None) => Some(limit),
            _ => None,
        };

        Self { limit }
    }

    /// Missing, non-numeric or non-positive limits fall back to
    /// [`DEFAULT_LIMIT`].
    pub fn limit(&self) -> u32 {
        self.limit
            .as_deref()
            .and_then(|limit| limit.trim().parse::<u32>().ok())
            .filter(|limit| *limit > 0)
            .unwrap_or(DEFAULT_LIMIT)
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct RequestSearchCustomers {
    pub keyword: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;
    use serde_json::json;

    fn limit_of(limit: Option<&str>) -> u32 {
        RequestGetCustomers {
            limit: limit.map(str::to_string),
        }
        .limit()
    }

    #[test]
    fn limit_defaults_to_ten() {
        assert_eq!(limit_of(None), 10);
        assert_eq!(limit_of(Some("abc")), 10);
        assert_eq!(limit_of(Some("0")), 10);
        assert_eq!(limit_of(Some("-3")), 10);
        assert_eq!(limit_of(Some("")), 10);
    }

    #[test]
    fn numeric_limit_is_used() {
        assert_eq!(limit_of(Some("3")), 3);
        assert_eq!(limit_of(Some(" 25 ")), 25);
    }

    #[test]
    fn limit_is_read_from_query_pairs() {
        let pairs = vec![
            ("keyword".to_string(), "an".to_string()),
            ("limit".to_string(), "3".to_string()),
        ];

        assert_eq!(RequestGetCustomers::from_pairs(pairs).limit(), 3);
        assert_eq!(RequestGetCustomers::from_pairs(Vec::new()).limit(), 10);
    }

    #[test]
    fn repeated_limit_falls_back_to_default() {
        let pairs = vec![
            ("limit".to_string(), "1".to_string()),
            ("limit".to_string(), "2".to_string()),
        ];

        let request = RequestGetCustomers::from_pairs(pairs);

        assert_eq!(request.limit, None);
        assert_eq!(request.limit(), 10);
    }

    #[test]
    fn parse_keeps_unknown_fields() {
        let customer = RequestCreateCustomer::parse(json!({
            "first_name": "Anna",
            "type": "vip",
            "state": "CA",
            "age": 30,
            "email": "anna@example.com",
        }))
        .unwrap();

        assert_eq!(customer.id, None);
        assert_eq!(customer.first_name.as_deref(), Some("Anna"));
        assert_eq!(customer.customer_type.as_deref(), Some("vip"));
        assert_eq!(customer.age, Some(30));
        assert_eq!(customer.extra, doc! { "email": "anna@example.com" });
    }

    #[test]
    fn parse_drops_client_supplied_id() {
        let customer = RequestCreateCustomer::parse(json!({
            "_id": "not-an-object-id",
            "first_name": "Anna",
        }))
        .unwrap();

        assert!(customer.extra.is_empty());
    }

    #[test]
    fn parse_rejects_out_of_range_age() {
        let err = RequestCreateCustomer::parse(json!({ "first_name": "Old", "age": 200 }))
            .unwrap_err();

        assert_eq!(err.to_string(), "age: must be between 0 and 150");
    }

    #[test]
    fn parse_rejects_empty_names() {
        let err = RequestCreateCustomer::parse(json!({ "first_name": "" })).unwrap_err();

        assert!(err.to_string().starts_with("first_name"));
    }

    #[test]
    fn parse_rejects_non_numeric_age() {
        let err = RequestCreateCustomer::parse(json!({ "age": "thirty" })).unwrap_err();

        assert!(matches!(err, Errors::Invalid(_)));
    }
}
