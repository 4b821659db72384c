use std::{borrow::Cow, sync::Arc};

use crate::{domain::CustomerId, ports::customer};

pub mod all_rewards;
pub mod monthly_reward;

pub struct DomainLogic<C> {
    customers: Arc<C>,
}

impl<C> DomainLogic<C> {
    pub fn new(customers: C) -> Self {
        Self {
            customers: Arc::new(customers),
        }
    }
}

// Not derived: that would require `C: Clone`.
impl<C> Clone for DomainLogic<C> {
    fn clone(&self) -> Self {
        Self {
            customers: self.customers.clone(),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request is malformed, e.g. a month that is not `YYYY-MM`
    #[error("{0}")]
    InvalidInput(Cow<'static, str>),
    #[error("Customer not found with ID: {0}")]
    NotFound(CustomerId),
    #[error("No customer data available.")]
    NoData,

    #[error("customer port error: {0}")]
    Customer(customer::Error),
}

impl Error {
    /// Whether the caller is at fault, as opposed to the service
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidInput(_) | Error::NotFound(_) | Error::NoData
        )
    }
}

/// A missing customer is a domain outcome, everything else stays an adapter failure.
impl From<customer::Error> for Error {
    fn from(err: customer::Error) -> Self {
        match err {
            customer::Error::CustomerDoesNotExist(customer_id) => Error::NotFound(customer_id),
            err => Error::Customer(err),
        }
    }
}
