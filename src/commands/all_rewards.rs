use std::{
    collections::BTreeMap,
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use serde::Serialize;
use tower::Service;

use crate::{
    domain::{Customer, CustomerId, YearMonth},
    ports::customer::CustomerPort,
};

use super::{DomainLogic, Error};

/// Reward summary for every known customer
#[derive(Debug, Default, Clone, Copy)]
pub struct AllRewardsRequest;

/// Rewards keyed by customer ID
///
/// Customer names are not unique, so they are only carried inside each entry.
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AllRewardsResponse {
    pub customers: BTreeMap<CustomerId, CustomerRewards>,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRewards {
    pub customer_id: CustomerId,
    pub customer_name: String,
    /// Points per month, only for months with at least one transaction
    pub monthly_points: BTreeMap<YearMonth, u64>,
    /// Sum of all `monthly_points`
    pub total_points: u64,
}

impl From<Customer> for CustomerRewards {
    fn from(customer: Customer) -> Self {
        let monthly_points = customer.monthly_points();
        let total_points = monthly_points
            .values()
            .copied()
            .fold(0, u64::saturating_add);

        Self {
            customer_id: customer.id,
            customer_name: customer.name,
            monthly_points,
            total_points,
        }
    }
}

impl<C> Service<AllRewardsRequest> for DomainLogic<C>
where
    C: CustomerPort + 'static,
{
    type Response = AllRewardsResponse;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, _req: AllRewardsRequest) -> Self::Future {
        let customers = self.customers.clone();
        Box::pin(async move {
            let customers = customers.list_customers().await?;
            if customers.is_empty() {
                return Err(Error::NoData);
            }

            let customers = customers
                .into_iter()
                .map(|customer| (customer.id, CustomerRewards::from(customer)))
                .collect();

            Ok(AllRewardsResponse { customers })
        })
    }
}
