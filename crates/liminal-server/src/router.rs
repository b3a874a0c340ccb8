//! Catch-all responder - every method on every path gets the same treatment
//!
//! A request is logged, held for a randomly sampled delay, then answered with
//! a randomly sampled status code and a JSON body echoing the request. The
//! delay is a tokio timer, so concurrent requests wait independently; a
//! client that disconnects mid-delay just drops the pending future.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, HeaderName, Method, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use uuid::Uuid;

use liminal_core::{LiminalResponse, RequestEcho};

use crate::AppState;

/// Cap on echoed request bodies. Larger bodies are treated like any other
/// unparseable body: logged and echoed as an empty object.
const BODY_LIMIT: usize = 1024 * 1024;

/// Create the responder router. Every method and path maps to the same
/// handler; when CORS is enabled the permissive layer is attached here.
pub fn create_router(state: &Arc<AppState>) -> Router<Arc<AppState>> {
    let router = Router::new()
        .route("/", any(handle_liminal_request))
        .route("/{*path}", any(handle_liminal_request));

    if state.config.cors_enabled {
        router.layer(cors_layer())
    } else {
        router
    }
}

/// Permissive CORS for the responder: any origin, the usual methods, and
/// the headers browsers send with JSON requests.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ORIGIN,
            HeaderName::from_static("x-requested-with"),
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::AUTHORIZATION,
        ])
}

/// Handle one inbound request: receipt, delay, sampled status, echo.
async fn handle_liminal_request(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
) -> Response {
    let method = request.method().clone();
    let url = request.uri().to_string();
    let request_id = Uuid::new_v4().to_string();

    // OPTIONS skips the liminal treatment entirely when CORS is on; the
    // layer decorates the response with the allow headers.
    if state.config.cors_enabled && method == Method::OPTIONS {
        tracing::debug!(request_id = %request_id, path = %url, "Answering OPTIONS immediately");
        return StatusCode::OK.into_response();
    }

    tracing::info!(
        request_id = %request_id,
        method = %method,
        path = %url,
        "Received request"
    );

    let headers = flatten_headers(request.headers());

    let body = match axum::body::to_bytes(request.into_body(), BODY_LIMIT).await {
        Ok(bytes) if bytes.is_empty() => RequestEcho::empty_body(),
        Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
            tracing::debug!(request_id = %request_id, "Request body is not valid JSON: {}", e);
            RequestEcho::empty_body()
        }),
        Err(e) => {
            tracing::debug!(request_id = %request_id, "Failed to read request body: {}", e);
            RequestEcho::empty_body()
        }
    };

    let delay = state.sampler.sample_delay(&state.delay);
    tracing::info!(
        request_id = %request_id,
        delay_ms = delay.as_millis() as u64,
        "Introducing a delay of {:.1} seconds",
        delay.as_secs_f64()
    );

    tokio::time::sleep(delay).await;

    let entry = state.sampler.sample_status(&state.table);
    tracing::info!(
        request_id = %request_id,
        status = entry.code,
        "Responding with status code {}: {}",
        entry.code,
        entry.name
    );

    let payload = LiminalResponse::new(
        entry,
        RequestEcho {
            method: method.to_string(),
            url,
            headers,
            body,
        },
    );

    // Fictional codes like 452 or 513 are still valid status lines; only a
    // code outside 100-999 would fail here.
    match StatusCode::from_u16(payload.status) {
        Ok(status) => (status, Json(payload)).into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Failed to build response").into_response(),
    }
}

/// Flatten the header map into string pairs, joining repeated names with
/// a comma the way proxies collapse duplicate headers.
fn flatten_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut flat: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let value = value.to_str().unwrap_or("").to_string();
        flat.entry(name.to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
    }
    flat
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use liminal_core::{Sampler, StatusTable, TableVariant};
    use tower::ServiceExt;

    fn test_config() -> AppConfig {
        AppConfig {
            port: 0,
            delay_min_ms: 0,
            delay_max_ms: 5,
            variant: TableVariant::Canonical,
            cors_enabled: false,
            rng_seed: Some(7),
        }
    }

    fn test_app(config: AppConfig) -> Router {
        let delay = config.delay_range().unwrap();
        let table = StatusTable::new(config.variant);
        let sampler = Sampler::with_seed(config.rng_seed.unwrap_or(0));
        let state = Arc::new(AppState {
            config,
            delay,
            table,
            sampler,
        });
        create_router(&state).with_state(state)
    }

    async fn parse_body(response: Response) -> LiminalResponse {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_catch_all_echoes_method_and_url() {
        let app = test_app(test_config());

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::GET)
                    .uri("/anything")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = parse_body(response).await;

        assert_eq!(body.status, status.as_u16());
        assert_eq!(body.request.method, "GET");
        assert_eq!(body.request.url, "/anything");
    }

    #[tokio::test]
    async fn test_status_is_drawn_from_the_table() {
        let config = test_config();
        let table = StatusTable::new(config.variant);
        let app = test_app(config);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = parse_body(response).await;
        assert!(table.contains_code(body.status), "code {} not in table", body.status);
        assert!(!body.name.is_empty());
        assert!(!body.message.is_empty());
    }

    #[tokio::test]
    async fn test_every_method_gets_exactly_one_response() {
        let app = test_app(test_config());

        for method in [
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ] {
            let response = app
                .clone()
                .oneshot(
                    Request::builder()
                        .method(method.clone())
                        .uri("/deep/nested/path")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();

            let body = parse_body(response).await;
            assert_eq!(body.request.method, method.as_str());
        }
    }

    #[tokio::test]
    async fn test_query_string_is_part_of_the_echoed_url() {
        let app = test_app(test_config());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/search?q=liminal&page=2")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = parse_body(response).await;
        assert_eq!(body.request.url, "/search?q=liminal&page=2");
    }

    #[tokio::test]
    async fn test_json_body_is_echoed() {
        let app = test_app(test_config());

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/x")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"a":1}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = parse_body(response).await;
        assert_eq!(body.request.body, serde_json::json!({"a": 1}));
    }

    #[tokio::test]
    async fn test_malformed_body_is_echoed_as_empty_object() {
        let app = test_app(test_config());

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/x")
                    .body(Body::from("not-json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = parse_body(response).await;
        assert_eq!(body.request.body, serde_json::json!({}));
    }

    #[tokio::test]
    async fn test_repeated_headers_are_flattened() {
        let app = test_app(test_config());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header("x-tag", "one")
                    .header("x-tag", "two")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = parse_body(response).await;
        assert_eq!(body.request.headers.get("x-tag").map(String::as_str), Some("one, two"));
    }

    #[tokio::test]
    async fn test_timestamp_is_rfc3339_utc() {
        let app = test_app(test_config());

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let body = parse_body(response).await;
        assert!(body.timestamp.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&body.timestamp).is_ok());
    }

    #[tokio::test]
    async fn test_liminal_variant_serves_errors_only() {
        let config = AppConfig {
            variant: TableVariant::Liminal,
            ..test_config()
        };
        let table = StatusTable::new(config.variant);
        let app = test_app(config);

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status().as_u16();
        assert!((400..=599).contains(&status));
        assert!(table.contains_code(status));
    }

    #[tokio::test]
    async fn test_options_is_answered_immediately_when_cors_enabled() {
        let config = AppConfig {
            cors_enabled: true,
            // A long fixed delay so an accidental trip through the delay
            // path would show up as a slow test.
            delay_min_ms: 30_000,
            delay_max_ms: 30_000,
            ..test_config()
        };
        let app = test_app(config);

        let start = std::time::Instant::now();
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/x")
                    .header(header::ORIGIN, "http://example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(start.elapsed() < std::time::Duration::from_secs(5));
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .map(|v| v.to_str().unwrap()),
            Some("*")
        );
    }

    #[tokio::test]
    async fn test_preflight_advertises_allowed_methods() {
        let config = AppConfig {
            cors_enabled: true,
            ..test_config()
        };
        let app = test_app(config);

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/x")
                    .header(header::ORIGIN, "http://example.com")
                    .header("access-control-request-method", "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let methods = response
            .headers()
            .get("access-control-allow-methods")
            .map(|v| v.to_str().unwrap().to_string())
            .unwrap_or_default();
        assert!(methods.contains("GET"), "allow-methods was {:?}", methods);
        assert!(methods.contains("OPTIONS"), "allow-methods was {:?}", methods);
    }

    #[tokio::test]
    async fn test_non_options_requests_carry_cors_headers() {
        let config = AppConfig {
            cors_enabled: true,
            ..test_config()
        };
        let app = test_app(config);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/x")
                    .header(header::ORIGIN, "http://example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .map(|v| v.to_str().unwrap()),
            Some("*")
        );
        // Still the normal flow: the body is a full liminal response.
        let body = parse_body(response).await;
        assert_eq!(body.request.url, "/x");
    }

    #[tokio::test]
    async fn test_no_cors_headers_by_default() {
        let app = test_app(test_config());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(header::ORIGIN, "http://example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.headers().get("access-control-allow-origin").is_none());
    }

    #[tokio::test]
    async fn test_options_goes_through_normal_flow_without_cors() {
        let app = test_app(test_config());

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/x")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        // Without the CORS build there is no preflight shortcut; OPTIONS is
        // just another method and gets the full liminal treatment.
        let body = parse_body(response).await;
        assert_eq!(body.request.method, "OPTIONS");
    }
}
