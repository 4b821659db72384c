use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tower::ServiceExt;
use tower_http::trace::TraceLayer;
use crate::{
    commands::{
        all_rewards::{AllRewardsRequest, AllRewardsResponse},
        monthly_reward::{MonthlyRewardRequest, MonthlyRewardResponse},
        DomainLogic, Error,
    },
    domain::CustomerId,
    ports::customer::CustomerPort,
};

mod error;

pub fn router<C>(domain: DomainLogic<C>) -> Router
where
    C: CustomerPort + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/rewards/allCustomers", get(get_all_rewards::<C>))
        .route(
            "/rewards/:customer_id/transactions/:month",
            get(get_monthly_reward::<C>),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(domain)
}

/// GET /health
async fn health() -> &'static str {
    "OK"
}

/// GET /rewards/:customer_id/transactions/:month
///
/// Points earned by one customer during one calendar month, e.g. `/rewards/1/transactions/2025-04`.
#[tracing::instrument(skip(domain))]
async fn get_monthly_reward<C>(
    State(domain): State<DomainLogic<C>>,
    Path((customer_id, month)): Path<(CustomerId, String)>,
) -> Result<Json<MonthlyRewardResponse>, Error>
where
    C: CustomerPort + 'static,
{
    let response = domain
        .oneshot(MonthlyRewardRequest::new(customer_id, month))
        .await?;
    Ok(Json(response))
}

/// GET /rewards/allCustomers
#[tracing::instrument(skip(domain))]
async fn get_all_rewards<C>(
    State(domain): State<DomainLogic<C>>,
) -> Result<Json<AllRewardsResponse>, Error>
where
    C: CustomerPort + 'static,
{
    let response = domain.oneshot(AllRewardsRequest).await?;
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adapters::customer::memory::MemoryCustomers,
        ports::customer::{self, MockCustomerPort},
    };
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use rstest::*;
    use serde_json::{json, Value};
    use speculoos::prelude::*;
    use std::{
        fmt::{self, Write},
        sync::{Arc, Mutex},
    };
    use tracing::{
        field::{Field, Visit},
        span, Subscriber,
    };
    use tracing_subscriber::{layer::Context, prelude::*, Layer};

    /// Name and fields of every span opened while it is installed
    #[derive(Clone, Default)]
    struct SpanRecorder(Arc<Mutex<Vec<(String, String)>>>);

    #[derive(Default)]
    struct FieldRecorder(String);

    impl Visit for FieldRecorder {
        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            let _ = write!(self.0, "{}={:?} ", field.name(), value);
        }
    }

    impl<S: Subscriber> Layer<S> for SpanRecorder {
        fn on_new_span(&self, attrs: &span::Attributes<'_>, _id: &span::Id, _ctx: Context<'_, S>) {
            let mut fields = FieldRecorder::default();
            attrs.record(&mut fields);
            self.0
                .lock()
                .unwrap()
                .push((attrs.metadata().name().to_string(), fields.0));
        }
    }

    impl SpanRecorder {
        fn fields_of(&self, name: &str) -> Option<String> {
            self.0
                .lock()
                .unwrap()
                .iter()
                .find(|(span_name, _)| span_name == name)
                .map(|(_, fields)| fields.clone())
        }
    }

    async fn send_get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let res = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = res.status();
        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    #[fixture]
    fn app() -> Router {
        router(DomainLogic::new(MemoryCustomers::default()))
    }

    #[rstest]
    #[tokio::test]
    async fn test_health(app: Router) {
        let (status, body) = send_get(app, "/health").await;

        assert_that!(status).is_equal_to(StatusCode::OK);
        assert_that!(body).is_equal_to(b"OK".to_vec());
    }

    #[rstest]
    #[tokio::test]
    async fn test_monthly_reward(app: Router) {
        let (status, body) = send_get(app, "/rewards/1/transactions/2025-04").await;

        assert_that!(status).is_equal_to(StatusCode::OK);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_that!(body).is_equal_to(json!({
            "customerId": 1,
            "customerName": "Ashok",
            "month": "2025-04",
            "rewardPoints": 25
        }));
    }

    #[rstest]
    #[case("/rewards/1/transactions/April-2025", "Invalid month format. Use yyyy-MM.")]
    #[case("/rewards/1/transactions/2025-13", "Invalid month format. Use yyyy-MM.")]
    #[case("/rewards/42/transactions/2025-04", "Customer not found with ID: 42")]
    #[tokio::test]
    async fn test_monthly_reward_client_error(
        app: Router,
        #[case] uri: &str,
        #[case] message: &str,
    ) {
        let (status, body) = send_get(app, uri).await;

        assert_that!(status).is_equal_to(StatusCode::BAD_REQUEST);
        assert_that!(String::from_utf8(body).unwrap()).is_equal_to(message.to_string());
    }

    #[rstest]
    #[case("/rewards/abc/transactions/2025-04")]
    #[case("/rewards/-1/transactions/2025-04")]
    #[tokio::test]
    async fn test_monthly_reward_bad_customer_id(app: Router, #[case] uri: &str) {
        let (status, _) = send_get(app, uri).await;

        assert_that!(status).is_equal_to(StatusCode::BAD_REQUEST);
    }

    #[rstest]
    #[tokio::test]
    async fn test_all_rewards(app: Router) {
        let (status, body) = send_get(app, "/rewards/allCustomers").await;

        assert_that!(status).is_equal_to(StatusCode::OK);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_that!(body["1"]).is_equal_to(json!({
            "customerId": 1,
            "customerName": "Ashok",
            "monthlyPoints": {
                "2024-03": 90,
                "2025-03": 290,
                "2025-04": 25,
                "2025-05": 250
            },
            "totalPoints": 655
        }));
        assert_that!(body["2"]["totalPoints"]).is_equal_to(json!(350));
    }

    #[rstest]
    #[tokio::test]
    async fn test_handler_spans(app: Router) {
        // GIVEN a subscriber recording spans on this thread
        let spans = SpanRecorder::default();
        let _guard = tracing_subscriber::registry()
            .with(spans.clone())
            .set_default();

        // WHEN calling both reward endpoints
        send_get(app.clone(), "/rewards/1/transactions/2025-04").await;
        send_get(app, "/rewards/allCustomers").await;

        // THEN
        // * each handler opens its own span
        // * the monthly span carries the request parameters but not the domain logic
        assert_that!(spans.fields_of("get_monthly_reward"))
            .is_some()
            .matches(|fields| {
                fields.contains("customer_id=1")
                    && fields.contains("month=")
                    && fields.contains("2025-04")
                    && !fields.contains("domain")
            });
        assert_that!(spans.fields_of("get_all_rewards")).is_some();
    }

    #[tokio::test]
    async fn test_all_rewards_no_data() {
        let app = router(DomainLogic::new(MemoryCustomers::new(Vec::new())));

        let (status, body) = send_get(app, "/rewards/allCustomers").await;

        assert_that!(status).is_equal_to(StatusCode::BAD_REQUEST);
        assert_that!(String::from_utf8(body).unwrap())
            .is_equal_to("No customer data available.".to_string());
    }

    #[tokio::test]
    async fn test_all_rewards_server_error() {
        let mut customers = MockCustomerPort::new();
        customers
            .expect_list_customers()
            .returning(|| Err(customer::Error::Adapter("database unreachable".into())));
        let app = router(DomainLogic::new(customers));

        let (status, body) = send_get(app, "/rewards/allCustomers").await;

        assert_that!(status).is_equal_to(StatusCode::INTERNAL_SERVER_ERROR);
        assert_that!(String::from_utf8(body).unwrap()).starts_with("Something went wrong:");
    }
}
