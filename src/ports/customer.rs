use crate::domain::{Customer, CustomerId};

/// Read-only access to customers and their purchase history
#[mockall::automock]
#[async_trait::async_trait]
pub trait CustomerPort: Send + Sync {
    async fn list_customers(&self) -> Result<Vec<Customer>, Error>;
    async fn get_customer(&self, customer_id: CustomerId) -> Result<Customer, Error>;
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Domain-level error when a customer does not exist
    #[error("customer {0} does not exist")]
    CustomerDoesNotExist(CustomerId),

    /// Concrete adapter errors
    ///
    /// This could represent any errors from a concrete adapter that is not part of the domain
    /// model, such as I/O, decoding, or connectivity errors.
    #[error("adapter error: {0}")]
    Adapter(Box<dyn std::error::Error + Send + Sync>),
}
