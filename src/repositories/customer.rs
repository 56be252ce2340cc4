use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::doc;
use mongodb::options::FindOptions;
use mongodb::{Collection, Database};

use crate::models::customer::Customer;
use crate::models::filter::CustomerFilter;
use crate::repositories::{CustomerRepository, RepositoryResult};

pub const COLLECTION: &str = "customers";

/// `customers` collection of an open database.
#[derive(Clone, Debug)]
pub struct MongoCustomerRepository {
    database: Database,
    collection: Collection<Customer>,
}

impl MongoCustomerRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            database: database.clone(),
            collection: database.collection::<Customer>(COLLECTION),
        }
    }
}

#[async_trait]
impl CustomerRepository for MongoCustomerRepository {
    async fn create(&self, mut customer: Customer) -> RepositoryResult<Customer> {
        customer.id = None;

        let result = self.collection.insert_one(&customer, None).await?;
        customer.id = result.inserted_id.as_object_id();

        tracing::debug!(id = ?customer.id, "customer inserted");

        Ok(customer)
    }

    async fn create_many(&self, mut customers: Vec<Customer>) -> RepositoryResult<Vec<Customer>> {
        if customers.is_empty() {
            return Ok(customers);
        }

        for customer in customers.iter_mut() {
            customer.id = None;
        }

        let result = self.collection.insert_many(&customers, None).await?;

        for (index, id) in result.inserted_ids {
            if let Some(customer) = customers.get_mut(index) {
                customer.id = id.as_object_id();
            }
        }

        tracing::debug!(count = customers.len(), "customers inserted");

        Ok(customers)
    }

    async fn find(
        &self,
        filter: &CustomerFilter,
        limit: Option<u32>,
    ) -> RepositoryResult<Vec<Customer>> {
        let options = FindOptions::builder()
            .limit(limit.map(i64::from))
            .build();

        let cursor = self.collection.find(filter.to_document(), options).await?;
        let customers: Vec<Customer> = cursor.try_collect().await?;

        tracing::debug!(?filter, count = customers.len(), "customers fetched");

        Ok(customers)
    }

    async fn ping(&self) -> RepositoryResult<()> {
        self.database.run_command(doc! { "ping": 1 }, None).await?;

        Ok(())
    }
}
