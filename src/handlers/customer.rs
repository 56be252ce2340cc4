use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;

use crate::errors::Errors;
use crate::models::filter::CustomerFilter;
use crate::models::requests::customer::{
    RequestCreateCustomer, RequestGetCustomers, RequestSearchCustomers,
};
use crate::models::responses::CustomerResponse;
use crate::state::AppState;

type CustomersResult = Result<Json<Vec<CustomerResponse>>, Errors>;

/// Accepts one customer object or an array of them and echoes what was
/// stored. A batch is inserted only if every element is valid.
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, Errors> {
    let Json(body) = body?;

    match body {
        Value::Array(items) => {
            let customers = items
                .into_iter()
                .map(RequestCreateCustomer::parse)
                .collect::<Result<Vec<_>, _>>()?;

            let customers = state.customers.create_many(customers).await?;

            Ok((
                StatusCode::CREATED,
                Json(CustomerResponse::from_many(customers)),
            )
                .into_response())
        }
        Value::Object(_) => {
            let customer = RequestCreateCustomer::parse(body)?;
            let customer = state.customers.create(customer).await?;

            Ok((StatusCode::CREATED, Json(CustomerResponse::from(customer))).into_response())
        }
        _ => Err(Errors::new(&[(
            "body",
            "must be a customer object or an array of customer objects",
        )])),
    }
}

pub async fn get_all(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> CustomersResult {
    let Query(pairs) = query?;
    let query = RequestGetCustomers::from_pairs(pairs);

    let customers = state.customers.get_all(query.limit()).await?;

    Ok(Json(CustomerResponse::from_many(customers)))
}

pub async fn search(
    State(state): State<AppState>,
    query: Result<Query<RequestSearchCustomers>, QueryRejection>,
) -> CustomersResult {
    let Query(query) = query?;
    let filter = CustomerFilter::by_keyword(query.keyword.as_deref());

    let customers = state.customers.get_by_name(&filter).await?;

    Ok(Json(CustomerResponse::from_many(customers)))
}

pub async fn get_by_type(
    State(state): State<AppState>,
    customer_type: Result<Path<String>, PathRejection>,
) -> CustomersResult {
    let Path(customer_type) = customer_type?;
    let customers = state.customers.get_by_type(&customer_type).await?;

    Ok(Json(CustomerResponse::from_many(customers)))
}

pub async fn get_by_state(
    State(state): State<AppState>,
    customer_state: Result<Path<String>, PathRejection>,
) -> CustomersResult {
    let Path(customer_state) = customer_state?;
    let customers = state.customers.get_by_state(&customer_state).await?;

    Ok(Json(CustomerResponse::from_many(customers)))
}

pub async fn get_by_age(
    State(state): State<AppState>,
    age: Result<Path<String>, PathRejection>,
) -> CustomersResult {
    let Path(age) = age?;
    let filter = CustomerFilter::by_age(&age)?;

    let customers = state.customers.get_by_age(&filter).await?;

    Ok(Json(CustomerResponse::from_many(customers)))
}
