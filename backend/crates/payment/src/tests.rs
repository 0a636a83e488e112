//! Tests for the payment crate: the `/payment` route against a recording
//! gateway, and the Stripe client against a local stand-in processor.

#[cfg(test)]
mod http_tests {
    use std::sync::{Arc, Mutex};

    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use axum::Extension;
    use kernel::extract::AuthenticatedUser;
    use kernel::id::UserId;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::application::config::PaymentConfig;
    use crate::domain::entities::{ChargeReceipt, ChargeRequest};
    use crate::domain::gateway::PaymentGateway;
    use crate::error::{PaymentError, PaymentResult};
    use crate::presentation::router::payment_router;

    /// Records every charge; fails when `fail` is set
    #[derive(Clone, Default)]
    struct RecordingGateway {
        charges: Arc<Mutex<Vec<ChargeRequest>>>,
        fail: bool,
    }

    impl PaymentGateway for RecordingGateway {
        async fn charge(&self, request: ChargeRequest) -> PaymentResult<ChargeReceipt> {
            if self.fail {
                return Err(PaymentError::Upstream {
                    status: 402,
                    message: "Your card was declined.".to_string(),
                });
            }
            self.charges.lock().unwrap().push(request);
            Ok(ChargeReceipt {
                charge_id: "ch_123".to_string(),
                status: "succeeded".to_string(),
            })
        }
    }

    fn app(gateway: RecordingGateway, caller: Option<UserId>) -> Router {
        let router = payment_router(gateway, Arc::new(PaymentConfig::default()));
        match caller {
            Some(user_id) => router.layer(Extension(AuthenticatedUser { user_id })),
            None => router,
        }
    }

    async fn pay(app: Router, body: Value) -> (StatusCode, Value) {
        let req = Request::builder()
            .method("POST")
            .uri("/payment")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_payment_returns_charge_id() {
        let gateway = RecordingGateway::default();
        let user_id = UserId::new();

        let (status, body) = pay(
            app(gateway.clone(), Some(user_id)),
            json!({"token": "tok_visa", "amount": 2500}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true, "data": "ch_123"}));

        let charges = gateway.charges.lock().unwrap();
        assert_eq!(charges.len(), 1);
        assert_eq!(charges[0].amount.cents(), 2500);
        assert_eq!(charges[0].currency.as_str(), "usd");
        assert_eq!(charges[0].source.as_str(), "tok_visa");
        assert_eq!(charges[0].user_id, user_id);
    }

    #[tokio::test]
    async fn test_payment_currency_override() {
        let gateway = RecordingGateway::default();

        let (status, _) = pay(
            app(gateway.clone(), Some(UserId::new())),
            json!({"token": "tok_visa", "amount": 100, "currency": "EUR"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(gateway.charges.lock().unwrap()[0].currency.as_str(), "eur");
    }

    #[tokio::test]
    async fn test_payment_validation() {
        let cases = [
            (json!({"amount": 100}), "Payment token is required"),
            (json!({"token": "  ", "amount": 100}), "Payment token is required"),
            (json!({"token": "tok_visa"}), "Amount must be a positive integer in the smallest currency unit"),
            (json!({"token": "tok_visa", "amount": 0}), "Amount must be a positive integer in the smallest currency unit"),
            (json!({"token": "tok_visa", "amount": -5}), "Amount must be a positive integer in the smallest currency unit"),
            (json!({"token": "tok_visa", "amount": 100, "currency": "dollars"}), "Currency must be a three-letter ISO 4217 code"),
        ];

        for (body, message) in cases {
            let gateway = RecordingGateway::default();
            let (status, response) = pay(app(gateway.clone(), Some(UserId::new())), body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(response["success"], false);
            assert_eq!(response["message"], message);
            assert!(gateway.charges.lock().unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_payment_amount_wrong_type() {
        let (status, body) = pay(
            app(RecordingGateway::default(), Some(UserId::new())),
            json!({"token": "tok_visa", "amount": "12.50"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_processor_failure_is_generic_500() {
        let gateway = RecordingGateway {
            fail: true,
            ..Default::default()
        };

        let (status, body) = pay(
            app(gateway, Some(UserId::new())),
            json!({"token": "tok_visa", "amount": 100}),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert!(!body["message"].as_str().unwrap().contains("declined"));
    }

    #[tokio::test]
    async fn test_payment_requires_identity() {
        let gateway = RecordingGateway::default();

        let (status, _) = pay(
            app(gateway.clone(), None),
            json!({"token": "tok_visa", "amount": 100}),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(gateway.charges.lock().unwrap().is_empty());
    }
}

#[cfg(test)]
mod stripe_tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use axum::extract::State;
    use axum::http::{HeaderMap, StatusCode, header};
    use axum::routing::post;
    use axum::{Form, Json, Router};
    use kernel::id::UserId;
    use secrecy::SecretString;
    use serde_json::{Value, json};

    use crate::domain::entities::ChargeRequest;
    use crate::domain::gateway::PaymentGateway;
    use crate::domain::value_objects::{Amount, Currency, SourceToken};
    use crate::error::PaymentError;
    use crate::infra::stripe::{StripeConfig, StripeGateway};

    const API_KEY: &str = "sk_test_123";

    type Captured = Arc<Mutex<Vec<HashMap<String, String>>>>;

    /// Minimal `/v1/charges`: checks the key, records the form, and answers
    /// like the processor would for the given source token
    async fn charges(
        State(captured): State<Captured>,
        headers: HeaderMap,
        Form(form): Form<HashMap<String, String>>,
    ) -> (StatusCode, Json<Value>) {
        let authorized = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            == Some("Bearer sk_test_123");
        if !authorized {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": {"message": "Invalid API Key provided"}})),
            );
        }

        let source = form.get("source").cloned().unwrap_or_default();
        captured.lock().unwrap().push(form);

        match source.as_str() {
            "tok_chargeDeclined" => (
                StatusCode::PAYMENT_REQUIRED,
                Json(json!({"error": {"type": "card_error", "message": "Your card was declined."}})),
            ),
            "tok_broken" => (StatusCode::OK, Json(json!({"unexpected": true}))),
            _ => (
                StatusCode::OK,
                Json(json!({"id": "ch_test_1", "object": "charge", "status": "succeeded"})),
            ),
        }
    }

    async fn spawn_processor() -> (String, Captured) {
        let captured: Captured = Arc::default();
        let app = Router::new()
            .route("/v1/charges", post(charges))
            .with_state(captured.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{addr}/"), captured)
    }

    fn gateway(base_url: &str, key: &str) -> StripeGateway {
        StripeGateway::new(
            StripeConfig::new(SecretString::from(key.to_string()))
                .with_base_url(base_url)
                .with_timeout(Duration::from_secs(5)),
        )
        .unwrap()
    }

    fn charge_request(source: &str) -> ChargeRequest {
        ChargeRequest {
            source: SourceToken::new(source).unwrap(),
            amount: Amount::new(2500).unwrap(),
            currency: Currency::parse("usd").unwrap(),
            description: "Storefront order".to_string(),
            user_id: UserId::new(),
        }
    }

    #[tokio::test]
    async fn test_successful_charge() {
        let (base_url, captured) = spawn_processor().await;
        let request = charge_request("tok_visa");
        let user_id = request.user_id;

        let receipt = gateway(&base_url, API_KEY).charge(request).await.unwrap();

        assert_eq!(receipt.charge_id, "ch_test_1");
        assert_eq!(receipt.status, "succeeded");

        let forms = captured.lock().unwrap();
        assert_eq!(forms.len(), 1);
        assert_eq!(forms[0]["amount"], "2500");
        assert_eq!(forms[0]["currency"], "usd");
        assert_eq!(forms[0]["source"], "tok_visa");
        assert_eq!(forms[0]["metadata[user_id]"], user_id.to_string());
    }

    #[tokio::test]
    async fn test_declined_charge_is_upstream_error() {
        let (base_url, _) = spawn_processor().await;

        let err = gateway(&base_url, API_KEY)
            .charge(charge_request("tok_chargeDeclined"))
            .await
            .unwrap_err();

        match err {
            PaymentError::Upstream { status, message } => {
                assert_eq!(status, 402);
                assert_eq!(message, "Your card was declined.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_wrong_api_key_is_upstream_error() {
        let (base_url, captured) = spawn_processor().await;

        let err = gateway(&base_url, "sk_test_wrong")
            .charge(charge_request("tok_visa"))
            .await
            .unwrap_err();

        assert!(matches!(err, PaymentError::Upstream { status: 401, .. }));
        assert!(captured.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unreadable_body_is_transport_error() {
        let (base_url, _) = spawn_processor().await;

        let err = gateway(&base_url, API_KEY)
            .charge(charge_request("tok_broken"))
            .await
            .unwrap_err();

        assert!(matches!(err, PaymentError::Transport(_)));
        assert_eq!(err.into_app_error().status_code(), 500);
    }

    #[tokio::test]
    async fn test_unreachable_processor_is_transport_error() {
        // Bind then drop to get a port nothing listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = gateway(&format!("http://{addr}"), API_KEY)
            .charge(charge_request("tok_visa"))
            .await
            .unwrap_err();

        assert!(matches!(err, PaymentError::Transport(_)));
    }

    #[test]
    fn test_config_debug_redacts_key() {
        let config = StripeConfig::new(SecretString::from(API_KEY.to_string()));
        assert!(!format!("{config:?}").contains(API_KEY));
    }
}

#[cfg(test)]
mod error_tests {
    use crate::error::PaymentError;

    #[test]
    fn test_status_codes() {
        for err in [
            PaymentError::MissingSource,
            PaymentError::InvalidAmount,
            PaymentError::InvalidCurrency,
        ] {
            assert_eq!(err.into_app_error().status_code(), 400);
        }

        let upstream = PaymentError::Upstream {
            status: 402,
            message: "Your card was declined".into(),
        }
        .into_app_error();
        assert_eq!(upstream.status_code(), 500);
        assert!(!upstream.public_message().contains("declined"));

        assert_eq!(
            PaymentError::Internal("no client".into()).into_app_error().status_code(),
            500
        );
    }
}
