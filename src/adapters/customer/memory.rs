use crate::{
    domain::{Customer, CustomerId},
    ports::customer::{CustomerPort, Error},
};
use std::{fs::File, io::BufReader, io::Read, path::Path, sync::Arc};

use super::fixture::sample_customers;

/// Immutable, in-memory set of customers
///
/// The customers are loaded once and shared between clones; nothing mutates them afterwards,
/// so no lock is needed.
#[derive(Clone, Debug)]
pub struct MemoryCustomers {
    customers: Arc<Vec<Customer>>,
}

impl MemoryCustomers {
    pub fn new(customers: Vec<Customer>) -> Self {
        Self {
            customers: Arc::new(customers),
        }
    }

    /// Load customers from a JSON array
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, Error> {
        let customers: Vec<Customer> =
            serde_json::from_reader(reader).map_err(|err| Error::Adapter(Box::new(err)))?;
        Ok(Self::new(customers))
    }

    /// Load customers from a JSON file containing an array of customers
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let file = File::open(path).map_err(|err| Error::Adapter(Box::new(err)))?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }
}

#[async_trait::async_trait]
impl CustomerPort for MemoryCustomers {
    async fn list_customers(&self) -> Result<Vec<Customer>, Error> {
        Ok(self.customers.as_ref().clone())
    }

    async fn get_customer(&self, customer_id: CustomerId) -> Result<Customer, Error> {
        self.customers
            .iter()
            .find(|customer| customer.id == customer_id)
            .cloned()
            .ok_or(Error::CustomerDoesNotExist(customer_id))
    }
}

/// Sample customers
impl Default for MemoryCustomers {
    fn default() -> Self {
        Self::new(sample_customers())
    }
}
