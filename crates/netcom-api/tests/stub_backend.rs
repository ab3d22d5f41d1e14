//! Client behaviour against an in-process axum backend.

use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use netcom_api::{
    ApiError, LineOverview, Operation, PartnerClient, PartnerToken, PlanDetails, StorefrontClient,
    StorefrontToken, CONNECTION_MESSAGE,
};
use netcom_core::{LoginRequest, Money, PaymentStatus};
use secrecy::SecretString;
use serde_json::{json, Value};
use url::Url;

const STOREFRONT_TOKEN: &str = "sf-end-user";
const PARTNER_TOKEN: &str = "partner-s2s";

async fn spawn(router: Router) -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    Url::parse(&format!("http://{addr}/v1/")).unwrap()
}

fn storefront(base: Url) -> StorefrontClient {
    StorefrontClient::new(
        base,
        &StorefrontToken::new(SecretString::from(STOREFRONT_TOKEN.to_string())),
    )
    .unwrap()
}

fn partner(base: Url) -> PartnerClient {
    PartnerClient::new(
        base,
        &PartnerToken::new(SecretString::from(PARTNER_TOKEN.to_string())),
    )
    .unwrap()
}

fn bearer(headers: &HeaderMap) -> String {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

fn product() -> Value {
    json!({
        "id": "p-1",
        "title": "Netcom 20GB",
        "subtitle": "Ligações ilimitadas",
        "price": 49.9,
        "cicle": 30,
        "status": "ACTIVE"
    })
}

fn plan_page() -> Value {
    json!({
        "items": [{
            "id": "pi-1",
            "recurring": true,
            "startDate": "2026-10-01T00:00:00Z",
            "endDate": null,
            "status": "ACTIVE",
            "paymentMethod": "CREDIT_CARD",
            "lineId": "ln-1",
            "product": product()
        }],
        "count": 1
    })
}

fn customer() -> Value {
    json!({
        "id": "c-1",
        "name": "Maria Silva",
        "email": "maria@example.com",
        "cpf": "11144477735",
        "status": "ACTIVE",
        "lines": [
            {"id": "ln-1", "iccid": "8955010000000000001", "msisdn": "11987654321", "status": "ACTIVE"}
        ]
    })
}

fn user() -> Value {
    json!({
        "id": "u-1",
        "name": "Maria Silva",
        "email": "maria@example.com",
        "cpf": "11144477735",
        "status": "ACTIVE"
    })
}

// =============================================================================
// Storefront
// =============================================================================

#[tokio::test]
async fn test_lines_decodes_customer_lines_with_storefront_token() {
    let router = Router::new().route(
        "/v1/customer/{id}",
        get(|Path(id): Path<String>, headers: HeaderMap| async move {
            if bearer(&headers) != format!("Bearer {STOREFRONT_TOKEN}") || id != "c-1" {
                return (StatusCode::UNAUTHORIZED, Json(json!({"error": "Não autorizado"})))
                    .into_response();
            }
            Json(customer()).into_response()
        }),
    );
    let client = storefront(spawn(router).await);

    let lines = client.lines("c-1").await.unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].msisdn, "11987654321");
}

#[tokio::test]
async fn test_structured_error_message_is_surfaced() {
    let router = Router::new().route(
        "/v1/line/{id}/plan",
        get(|| async { (StatusCode::NOT_FOUND, Json(json!({"error": "X"}))) }),
    );
    let client = storefront(spawn(router).await);

    let err = client.line_plan("ln-1").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "X");
}

#[tokio::test]
async fn test_error_without_message_uses_operation_fallback() {
    let router = Router::new().route(
        "/v1/customer/{id}",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let client = storefront(spawn(router).await);

    let err = client.lines("c-1").await.unwrap_err();
    assert_eq!(err.to_string(), Operation::Customer.fallback_message());
}

#[tokio::test]
async fn test_connection_refused_is_connection_error() {
    let client = storefront(Url::parse("http://127.0.0.1:1/v1/").unwrap());

    let err = client.products().await.unwrap_err();
    assert!(err.is_connection());
    assert_eq!(err.to_string(), CONNECTION_MESSAGE);
}

#[tokio::test]
async fn test_blank_id_is_refused_before_sending() {
    // Nothing listens here; a sent request would be a Connection error.
    let client = storefront(Url::parse("http://127.0.0.1:1/v1/").unwrap());

    let err = client.line_usage("   ").await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidRequest(_)));
}

#[tokio::test]
async fn test_active_products_filters_catalog() {
    let router = Router::new().route(
        "/v1/product",
        get(|| async {
            let mut inactive = product();
            inactive["id"] = json!("p-2");
            inactive["status"] = json!("INACTIVE");
            Json(json!({"items": [product(), inactive], "count": 2}))
        }),
    );
    let client = storefront(spawn(router).await);

    let products = client.active_products().await.unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].price, Money::from_centavos(4990));
}

#[tokio::test]
async fn test_malformed_success_body_is_invalid_response() {
    let router = Router::new().route(
        "/v1/line/{id}/usage",
        get(|| async { Json(json!({"remaining": "a lot"})) }),
    );
    let client = storefront(spawn(router).await);

    let err = client.line_usage("ln-1").await.unwrap_err();
    assert!(matches!(
        err,
        ApiError::InvalidResponse {
            operation: Operation::LineUsage,
            ..
        }
    ));
}

// =============================================================================
// Concurrent views
// =============================================================================

#[tokio::test]
async fn test_line_overview_joins_plan_and_usage() {
    let router = Router::new()
        .route("/v1/line/{id}/plan", get(|| async { Json(plan_page()) }))
        .route(
            "/v1/line/{id}/usage",
            get(|| async {
                Json(json!({"remaining": 5_368_709_120u64, "total": 21_474_836_480u64}))
            }),
        );
    let client = storefront(spawn(router).await);

    let overview = LineOverview::fetch(&client, "ln-1").await.unwrap();
    assert_eq!(overview.current_plan().unwrap().product.title, "Netcom 20GB");
    assert_eq!(overview.usage.used(), 16_106_127_360);
}

#[tokio::test]
async fn test_plan_details_fails_when_one_call_fails() {
    let router = Router::new()
        .route("/v1/line/{id}/plan", get(|| async { Json(plan_page()) }))
        .route(
            "/v1/line/{id}/payment",
            get(|| async {
                (
                    StatusCode::BAD_GATEWAY,
                    Json(json!({"message": "Pagamentos indisponíveis"})),
                )
            }),
        );
    let client = storefront(spawn(router).await);

    let err = PlanDetails::fetch(&client, "ln-1").await.unwrap_err();
    assert_eq!(err.to_string(), "Pagamentos indisponíveis");
}

#[tokio::test]
async fn test_plan_details_decodes_payments() {
    let router = Router::new()
        .route("/v1/line/{id}/plan", get(|| async { Json(plan_page()) }))
        .route(
            "/v1/line/{id}/payment",
            get(|| async {
                Json(json!({
                    "items": [{
                        "id": "pay-1",
                        "amount": 49.9,
                        "status": "CAPTURED",
                        "payedAt": "2026-10-05T13:00:00Z"
                    }],
                    "count": 1
                }))
            }),
        );
    let client = storefront(spawn(router).await);

    let details = PlanDetails::fetch(&client, "ln-1").await.unwrap();
    assert_eq!(details.payments.items.len(), 1);
    assert_eq!(details.payments.items[0].status, PaymentStatus::Captured);
}

// =============================================================================
// Partner
// =============================================================================

#[tokio::test]
async fn test_login_uses_partner_token_and_decodes_session() {
    let router = Router::new().route(
        "/v1/user/login",
        post(|headers: HeaderMap, Json(body): Json<Value>| async move {
            if bearer(&headers) != format!("Bearer {PARTNER_TOKEN}") {
                return (StatusCode::UNAUTHORIZED, Json(json!({"message": "wrong token"})))
                    .into_response();
            }
            if body["password"] != "segredo1" {
                return (StatusCode::BAD_REQUEST, Json(json!({"message": "Senha incorreta"})))
                    .into_response();
            }
            Json(json!({"message": "ok", "user": user(), "token": "session-1"})).into_response()
        }),
    );
    let client = partner(spawn(router).await);

    let response = client
        .login(&LoginRequest {
            cpf: "11144477735".to_string(),
            password: "segredo1".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(response.token, "session-1");
    assert_eq!(response.user.id, "u-1");

    let err = client
        .login(&LoginRequest {
            cpf: "11144477735".to_string(),
            password: "errada".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Senha incorreta");
}

#[tokio::test]
async fn test_login_with_empty_token_is_invalid_response() {
    let router = Router::new().route(
        "/v1/user/login",
        post(|| async { Json(json!({"user": user(), "token": ""})) }),
    );
    let client = partner(spawn(router).await);

    let err = client
        .login(&LoginRequest {
            cpf: "11144477735".to_string(),
            password: "segredo1".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ApiError::InvalidResponse {
            operation: Operation::Login,
            ..
        }
    ));
}
