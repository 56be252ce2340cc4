use mongodb::bson::Document;
use serde::Serialize;
use serde_json::{json, Value};

use crate::models::customer::Customer;

#[derive(Serialize, Debug)]
pub struct DefaultResponse {
    pub success: bool,
    pub message: String,
}

impl DefaultResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }

    pub fn into_json(self) -> axum::Json<Value> {
        axum::Json(json!(self))
    }
}

/// A customer as rendered to clients, with `_id` as a hex string.
#[derive(Serialize, Debug)]
pub struct CustomerResponse {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub customer_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i64>,
    #[serde(flatten)]
    pub extra: Document,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id.map(|id| id.to_hex()),
            first_name: customer.first_name,
            last_name: customer.last_name,
            customer_type: customer.customer_type,
            state: customer.state,
            age: customer.age,
            extra: customer.extra,
        }
    }
}

impl CustomerResponse {
    pub fn from_many(customers: Vec<Customer>) -> Vec<CustomerResponse> {
        customers.into_iter().map(CustomerResponse::from).collect()
    }
}
