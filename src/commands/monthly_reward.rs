use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use serde::Serialize;
use tower::Service;

use crate::{
    domain::{CustomerId, YearMonth},
    ports::customer::CustomerPort,
};

use super::{DomainLogic, Error};

#[derive(Debug, Clone)]
pub struct MonthlyRewardRequest {
    pub customer_id: CustomerId,
    /// Target month as `YYYY-MM`
    ///
    /// Kept as the raw token so validation happens in the command.
    pub month: String,
}

impl MonthlyRewardRequest {
    pub fn new(customer_id: CustomerId, month: impl Into<String>) -> Self {
        Self {
            customer_id,
            month: month.into(),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRewardResponse {
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub month: YearMonth,
    /// Points earned within `month`
    pub reward_points: u64,
}

impl<C> Service<MonthlyRewardRequest> for DomainLogic<C>
where
    C: CustomerPort + 'static,
{
    type Response = MonthlyRewardResponse;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: MonthlyRewardRequest) -> Self::Future {
        let customers = self.customers.clone();
        Box::pin(async move {
            // Validate the month before touching the data source
            let month: YearMonth = req
                .month
                .parse()
                .map_err(|_| Error::InvalidInput("Invalid month format. Use yyyy-MM.".into()))?;

            let customer = customers.get_customer(req.customer_id).await?;

            Ok(MonthlyRewardResponse {
                customer_id: customer.id,
                reward_points: customer.points_in(month),
                customer_name: customer.name,
                month,
            })
        })
    }
}
