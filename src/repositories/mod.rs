//! Persistence for customers.
//!
//! Handlers only see [`CustomerRepository`]; the MongoDB and in-memory
//! backends implement the same four primitives and inherit the query
//! helpers.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::customer::Customer;
use crate::models::filter::CustomerFilter;

mod customer;
mod memory;

pub use customer::MongoCustomerRepository;
pub use memory::MemoryCustomerRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("{0}")]
    Database(#[from] mongodb::error::Error),

    #[error("{0}")]
    Unavailable(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[async_trait]
pub trait CustomerRepository: Send + Sync + 'static {
    /// Inserts one customer and returns it with its assigned identifier.
    async fn create(&self, customer: Customer) -> RepositoryResult<Customer>;

    /// Inserts customers in order. Returns them with identifiers, in the
    /// same order.
    async fn create_many(&self, customers: Vec<Customer>) -> RepositoryResult<Vec<Customer>>;

    /// Customers matching `filter`, capped at `limit` when given. No
    /// ordering is guaranteed.
    async fn find(
        &self,
        filter: &CustomerFilter,
        limit: Option<u32>,
    ) -> RepositoryResult<Vec<Customer>>;

    /// Checks that the backing store answers.
    async fn ping(&self) -> RepositoryResult<()>;

    async fn get_all(&self, limit: u32) -> RepositoryResult<Vec<Customer>> {
        self.find(&CustomerFilter::All, Some(limit)).await
    }

    async fn get_by_name(&self, filter: &CustomerFilter) -> RepositoryResult<Vec<Customer>> {
        self.find(filter, None).await
    }

    async fn get_by_type(&self, customer_type: &str) -> RepositoryResult<Vec<Customer>> {
        self.find(&CustomerFilter::TypeIs(customer_type.to_string()), None)
            .await
    }

    async fn get_by_state(&self, state: &str) -> RepositoryResult<Vec<Customer>> {
        self.find(&CustomerFilter::StateIs(state.to_string()), None)
            .await
    }

    async fn get_by_age(&self, filter: &CustomerFilter) -> RepositoryResult<Vec<Customer>> {
        self.find(filter, None).await
    }
}
