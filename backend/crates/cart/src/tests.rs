//! HTTP-level tests for the cart crate, driven through the routers with the
//! in-memory repository.

#[cfg(test)]
mod http_tests {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::extract::Request as AxumRequest;
    use axum::http::{Request, StatusCode, header};
    use axum::middleware::{self, Next};
    use axum::response::Response;
    use kernel::extract::AuthenticatedUser;
    use kernel::id::{ProductId, UserId};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::application::config::CartConfig;
    use crate::domain::entities::Product;
    use crate::infra::memory::InMemoryCartRepository;
    use crate::presentation::router::{cart_router, catalog_router};

    const TEST_USER_HEADER: &str = "x-test-user";

    /// Stand-in for the bearer middleware: the caller id comes from a header
    async fn test_identity(mut req: AxumRequest, next: Next) -> Response {
        let user_id = req
            .headers()
            .get(TEST_USER_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<UserId>().ok());
        if let Some(user_id) = user_id {
            req.extensions_mut().insert(AuthenticatedUser { user_id });
        }
        next.run(req).await
    }

    struct Fixture {
        app: Router,
        repo: InMemoryCartRepository,
        mug: ProductId,
        pen: ProductId,
    }

    fn fixture() -> Fixture {
        let repo = InMemoryCartRepository::new();

        let mug = Product::new("Mug", 1250, "usd");
        let pen = Product::new("Pen", 199, "usd");
        let (mug_id, pen_id) = (mug.product_id, pen.product_id);
        repo.insert_product(mug).unwrap();
        repo.insert_product(pen).unwrap();

        let config = Arc::new(CartConfig::default());
        let app = catalog_router(repo.clone(), config.clone()).merge(
            cart_router(repo.clone(), config).layer(middleware::from_fn(test_identity)),
        );

        Fixture {
            app,
            repo,
            mug: mug_id,
            pen: pen_id,
        }
    }

    fn user(repo: &InMemoryCartRepository) -> UserId {
        let user_id = UserId::new();
        repo.insert_owner(user_id).unwrap();
        user_id
    }

    fn request(method: &str, uri: &str, user: Option<UserId>, body: Option<Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(user) = user {
            builder = builder.header(TEST_USER_HEADER, user.to_string());
        }
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    async fn add(app: &Router, user: UserId, product: ProductId, quantity: u32) -> (StatusCode, Value) {
        send(
            app,
            request(
                "POST",
                "/cart/items",
                Some(user),
                Some(json!({"productId": product, "quantity": quantity})),
            ),
        )
        .await
    }

    #[tokio::test]
    async fn test_empty_cart() {
        let f = fixture();
        let alice = user(&f.repo);

        let (status, body) = send(&f.app, request("GET", "/cart", Some(alice), None)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["items"], json!([]));
        assert_eq!(body["data"]["totalCents"], 0);
        assert_eq!(body["data"]["itemCount"], 0);
    }

    #[tokio::test]
    async fn test_repeated_add_increments_single_line() {
        let f = fixture();
        let alice = user(&f.repo);

        let (status, body) = add(&f.app, alice, f.mug, 2).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["quantity"], 2);

        let (status, body) = add(&f.app, alice, f.mug, 3).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["productId"], f.mug.to_string());
        assert_eq!(body["data"]["quantity"], 5);

        let (_, body) = send(&f.app, request("GET", "/cart", Some(alice), None)).await;
        let items = body["data"]["items"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["quantity"], 5);
        assert_eq!(items[0]["lineTotalCents"], 6250);
        assert_eq!(items[0]["product"]["name"], "Mug");
        assert_eq!(body["data"]["totalCents"], 6250);
    }

    #[tokio::test]
    async fn test_add_defaults_to_one() {
        let f = fixture();
        let alice = user(&f.repo);

        let (status, body) = send(
            &f.app,
            request("POST", "/cart/items", Some(alice), Some(json!({"productId": f.pen}))),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["quantity"], 1);
    }

    #[tokio::test]
    async fn test_cart_totals_across_lines() {
        let f = fixture();
        let alice = user(&f.repo);

        add(&f.app, alice, f.mug, 1).await;
        add(&f.app, alice, f.pen, 3).await;

        let (_, body) = send(&f.app, request("GET", "/cart", Some(alice), None)).await;
        assert_eq!(body["data"]["items"].as_array().unwrap().len(), 2);
        assert_eq!(body["data"]["items"][0]["product"]["id"], f.mug.to_string());
        assert_eq!(body["data"]["totalCents"], 1250 + 3 * 199);
        assert_eq!(body["data"]["itemCount"], 4);
    }

    #[tokio::test]
    async fn test_carts_are_isolated_between_users() {
        let f = fixture();
        let alice = user(&f.repo);
        let bob = user(&f.repo);

        add(&f.app, alice, f.mug, 2).await;
        add(&f.app, bob, f.pen, 1).await;

        // Bob cannot touch Alice's line
        let uri = format!("/cart/items/{}", f.mug);
        let (status, _) = send(&f.app, request("DELETE", &uri, Some(bob), None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(
            &f.app,
            request("PATCH", &uri, Some(bob), Some(json!({"quantity": 7}))),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        // Clearing Bob's cart leaves Alice's alone
        let (status, _) = send(&f.app, request("DELETE", "/cart", Some(bob), None)).await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(&f.app, request("GET", "/cart", Some(alice), None)).await;
        let items = body["data"]["items"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["product"]["id"], f.mug.to_string());
        assert_eq!(items[0]["quantity"], 2);

        let (_, body) = send(&f.app, request("GET", "/cart", Some(bob), None)).await;
        assert_eq!(body["data"]["items"], json!([]));
    }

    #[tokio::test]
    async fn test_update_and_remove_line() {
        let f = fixture();
        let alice = user(&f.repo);
        add(&f.app, alice, f.mug, 2).await;

        let uri = format!("/cart/items/{}", f.mug);
        let (status, body) = send(
            &f.app,
            request("PATCH", &uri, Some(alice), Some(json!({"quantity": 9}))),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["quantity"], 9);

        let (status, body) = send(&f.app, request("DELETE", &uri, Some(alice), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let (status, body) = send(&f.app, request("DELETE", &uri, Some(alice), None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Item not found in cart");
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let f = fixture();
        let alice = user(&f.repo);
        add(&f.app, alice, f.mug, 1).await;

        for _ in 0..2 {
            let (status, body) = send(&f.app, request("DELETE", "/cart", Some(alice), None)).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["message"], "Cart cleared");
        }
    }

    #[tokio::test]
    async fn test_unknown_product_is_not_found() {
        let f = fixture();
        let alice = user(&f.repo);

        let (status, body) = add(&f.app, alice, ProductId::new(), 1).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Product not found");
    }

    #[tokio::test]
    async fn test_invalid_quantities_are_rejected() {
        let f = fixture();
        let alice = user(&f.repo);

        let (status, _) = add(&f.app, alice, f.mug, 0).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = add(&f.app, alice, f.mug, 1000).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        // Increment past the per-line maximum leaves the line unchanged
        add(&f.app, alice, f.mug, 990).await;
        let (status, body) = add(&f.app, alice, f.mug, 10).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "BAD_REQUEST");

        let (_, body) = send(&f.app, request("GET", "/cart", Some(alice), None)).await;
        assert_eq!(body["data"]["items"][0]["quantity"], 990);

        let (status, _) = send(
            &f.app,
            request(
                "POST",
                "/cart/items",
                Some(alice),
                Some(json!({"productId": f.mug, "quantity": -1})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_product_id() {
        let f = fixture();
        let alice = user(&f.repo);

        let (status, body) = send(
            &f.app,
            request("DELETE", "/cart/items/not-a-uuid", Some(alice), None),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid identifier format");

        let (status, _) = send(
            &f.app,
            request(
                "POST",
                "/cart/items",
                Some(alice),
                Some(json!({"productId": "nope"})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_owner_is_not_found() {
        let f = fixture();
        let ghost = UserId::new();

        let (status, body) = send(&f.app, request("GET", "/cart", Some(ghost), None)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "User not found");
    }

    #[tokio::test]
    async fn test_add_for_missing_owner_is_not_found() {
        let f = fixture();
        let ghost = UserId::new();

        let (status, body) = send(
            &f.app,
            request("POST", "/cart/items", Some(ghost), Some(json!({"productId": f.mug, "quantity": 1}))),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "User not found");

        f.repo.insert_owner(ghost).unwrap();
        let (status, body) = send(&f.app, request("GET", "/cart", Some(ghost), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["itemCount"], 0);
    }

    #[tokio::test]
    async fn test_cart_without_identity_is_unauthorized() {
        let f = fixture();

        let (status, body) = send(&f.app, request("GET", "/cart", None, None)).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_catalog_listing_and_pagination() {
        let f = fixture();

        let (status, body) = send(&f.app, request("GET", "/products", None, None)).await;
        assert_eq!(status, StatusCode::OK);
        let names: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Mug", "Pen"]);
        assert_eq!(body["data"][0]["priceCents"], 1250);

        let (_, body) = send(&f.app, request("GET", "/products?limit=1&offset=1", None, None)).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"][0]["name"], "Pen");

        let (status, _) = send(&f.app, request("GET", "/products?limit=0", None, None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = send(&f.app, request("GET", "/products?limit=101", None, None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = send(&f.app, request("GET", "/products?limit=abc", None, None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_product() {
        let f = fixture();

        let (status, body) = send(&f.app, request("GET", &format!("/products/{}", f.pen), None, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["name"], "Pen");
        assert_eq!(body["data"]["currency"], "usd");

        let uri = format!("/products/{}", ProductId::new());
        let (status, _) = send(&f.app, request("GET", &uri, None, None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

#[cfg(test)]
mod concurrency_tests {
    use kernel::id::UserId;

    use crate::domain::entities::Product;
    use crate::domain::repository::CartRepository;
    use crate::domain::value_objects::Quantity;
    use crate::infra::memory::InMemoryCartRepository;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_adds_are_not_lost() {
        let repo = InMemoryCartRepository::new();
        let product = Product::new("Mug", 1250, "usd");
        let product_id = product.product_id;
        repo.insert_product(product).unwrap();
        let user_id = UserId::new();
        repo.insert_owner(user_id).unwrap();

        let handles: Vec<_> = (0..20)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.add_item(&user_id, &product_id, Quantity::ONE).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let items = repo.items(&user_id).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity.get(), 20);
    }
}

#[cfg(test)]
mod error_tests {
    use crate::error::CartError;
    use kernel::error::app_error::AppError;

    #[test]
    fn test_status_codes() {
        assert_eq!(CartError::ProductNotFound.into_app_error().status_code(), 404);
        assert_eq!(CartError::LineNotFound.into_app_error().status_code(), 404);
        assert_eq!(CartError::OwnerNotFound.into_app_error().status_code(), 404);
        assert_eq!(
            CartError::InvalidQuantity { min: 1, max: 999 }
                .into_app_error()
                .status_code(),
            400
        );
        assert_eq!(
            CartError::Internal("boom".into()).into_app_error().status_code(),
            500
        );
        assert_eq!(
            CartError::from(AppError::bad_request("bad")).into_app_error().status_code(),
            400
        );
    }

    #[test]
    fn test_quantity_exceeded_carries_action() {
        let err = CartError::QuantityExceeded { max: 999 }.into_app_error();
        assert_eq!(err.status_code(), 400);
        assert!(err.action().is_some());
        assert_eq!(err.message(), "Quantity cannot exceed 999 per item");
    }
}
