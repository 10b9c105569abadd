//! App Router

use std::sync::Arc;

use salvo::{
    affix_state::inject,
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    prelude::*,
    trailing_slash::remove_slash,
};

use crate::{auth, carts, healthcheck, observability, orders, products, state::State, users};

/// Every route, with state injection, request logging and API docs.
pub(crate) fn router(state: Arc<State>) -> Router {
    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(observability::request_logging)
        .hoop(remove_slash())
        .hoop(inject(state))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(observability::metrics_handler))
        .push(app_router());

    let doc = OpenApi::new("Till API", env!("CARGO_PKG_VERSION"))
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&router);

    router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"))
}

/// Authenticated routes.
fn app_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(Router::with_path("me").get(users::handlers::me::handler))
        .push(
            Router::with_path("products")
                .get(products::handlers::index::handler)
                .push(
                    Router::with_path("{product}")
                        .get(products::handlers::get::handler)
                        .put(products::handlers::update::handler),
                ),
        )
        .push(
            Router::with_path("stores/{store}")
                .push(
                    Router::with_path("cart")
                        .get(carts::handlers::index::handler)
                        .post(carts::handlers::create::handler),
                )
                .push(Router::with_path("orders").post(orders::handlers::create::handler)),
        )
        .push(
            Router::with_path("cart/{line}")
                .put(carts::handlers::update::handler)
                .delete(carts::handlers::delete::handler),
        )
        .push(Router::with_path("orders/{order}").get(orders::handlers::get::handler))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use till_app::auth::MockAuthService;

    use crate::test_helpers::state_with_auth;

    use super::*;

    fn make_service() -> Service {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer().never();

        Service::new(router(state_with_auth(auth)))
    }

    #[tokio::test]
    async fn test_healthcheck_is_public() -> TestResult {
        let res = TestClient::get("http://example.com/healthcheck")
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_app_routes_require_a_token() -> TestResult {
        let service = make_service();

        for res in [
            TestClient::get("http://example.com/me").send(&service).await,
            TestClient::get("http://example.com/products")
                .send(&service)
                .await,
            TestClient::get("http://example.com/products/1")
                .send(&service)
                .await,
            TestClient::put("http://example.com/products/1")
                .send(&service)
                .await,
            TestClient::get("http://example.com/stores/1/cart")
                .send(&service)
                .await,
            TestClient::post("http://example.com/stores/1/cart")
                .send(&service)
                .await,
            TestClient::put("http://example.com/cart/1").send(&service).await,
            TestClient::delete("http://example.com/cart/1")
                .send(&service)
                .await,
            TestClient::post("http://example.com/stores/1/orders")
                .send(&service)
                .await,
            TestClient::get("http://example.com/orders/1")
                .send(&service)
                .await,
        ] {
            assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_openapi_document_lists_checkout() -> TestResult {
        let body = TestClient::get("http://example.com/api-doc/openapi.json")
            .send(&make_service())
            .await
            .take_string()
            .await?;

        assert!(
            body.contains("/stores/{store}/orders"),
            "checkout route should be documented"
        );

        Ok(())
    }
}
