use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use crate::models::customer::Customer;
use crate::models::filter::CustomerFilter;
use crate::repositories::{CustomerRepository, RepositoryError, RepositoryResult};

/// In-process customer store used by the test suites.
///
/// Keeps insertion order. A repository built with [`failing`] rejects
/// every call, standing in for an unreachable database.
///
/// [`failing`]: MemoryCustomerRepository::failing
#[derive(Debug, Default)]
pub struct MemoryCustomerRepository {
    customers: RwLock<Vec<Customer>>,
    failure: Option<String>,
}

impl MemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            customers: RwLock::default(),
            failure: Some(message.into()),
        }
    }

    pub async fn len(&self) -> usize {
        self.customers.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.customers.read().await.is_empty()
    }

    fn check(&self) -> RepositoryResult<()> {
        match &self.failure {
            Some(message) => Err(RepositoryError::Unavailable(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CustomerRepository for MemoryCustomerRepository {
    async fn create(&self, mut customer: Customer) -> RepositoryResult<Customer> {
        self.check()?;

        customer.id = Some(ObjectId::new());
        self.customers.write().await.push(customer.clone());

        Ok(customer)
    }

    async fn create_many(&self, mut customers: Vec<Customer>) -> RepositoryResult<Vec<Customer>> {
        self.check()?;

        for customer in customers.iter_mut() {
            customer.id = Some(ObjectId::new());
        }
        self.customers
            .write()
            .await
            .extend(customers.iter().cloned());

        Ok(customers)
    }

    async fn find(
        &self,
        filter: &CustomerFilter,
        limit: Option<u32>,
    ) -> RepositoryResult<Vec<Customer>> {
        self.check()?;

        let limit = limit.map(|limit| limit as usize).unwrap_or(usize::MAX);
        let customers = self
            .customers
            .read()
            .await
            .iter()
            .filter(|customer| filter.matches(customer))
            .take(limit)
            .cloned()
            .collect();

        Ok(customers)
    }

    async fn ping(&self) -> RepositoryResult<()> {
        self.check()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(first_name: &str) -> Customer {
        Customer {
            first_name: Some(first_name.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_assigns_distinct_ids() {
        let repository = MemoryCustomerRepository::new();

        let anna = repository.create(named("Anna")).await.unwrap();
        let bob = repository.create(named("Bob")).await.unwrap();

        assert!(anna.id.is_some());
        assert_ne!(anna.id, bob.id);
        assert_eq!(repository.len().await, 2);
    }

    #[tokio::test]
    async fn create_many_keeps_order() {
        let repository = MemoryCustomerRepository::new();

        let created = repository
            .create_many(vec![named("A"), named("B"), named("C")])
            .await
            .unwrap();

        let names: Vec<_> = created
            .iter()
            .map(|customer| customer.first_name.clone().unwrap())
            .collect();
        assert_eq!(names, ["A", "B", "C"]);
        assert!(created.iter().all(|customer| customer.id.is_some()));
    }

    #[tokio::test]
    async fn get_all_respects_limit() {
        let repository = MemoryCustomerRepository::new();
        repository
            .create_many((0..5).map(|i| named(&format!("c{}", i))).collect())
            .await
            .unwrap();

        assert_eq!(repository.get_all(3).await.unwrap().len(), 3);
        assert_eq!(repository.get_all(10).await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn failing_repository_rejects_everything() {
        let repository = MemoryCustomerRepository::failing("connection refused");

        assert!(repository.create(named("Anna")).await.is_err());
        assert!(repository.get_all(10).await.is_err());
        assert!(repository.get_by_type("vip").await.is_err());

        let err = repository.ping().await.unwrap_err();
        assert_eq!(err.to_string(), "connection refused");
        assert!(repository.is_empty().await);
    }
}
