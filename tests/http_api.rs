use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderValue, Request, StatusCode},
    response::Response,
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use secure_greeting::{app, config::Config, state::AppState};
use serde_json::{json, Value};
use tower::util::ServiceExt; // for `oneshot`

fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        database_max_connections: 1,
        greeting_delay_ms: 0,
        ..Config::default()
    }
}

async fn router_with(config: Config) -> Router {
    let state = AppState::new(&config).await.expect("app state");
    app::router(state)
}

async fn router() -> Router {
    router_with(test_config()).await
}

async fn send(router: &Router, request: Request<Body>) -> Response {
    router.clone().oneshot(request).await.unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn text_body(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

fn login_request(form: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

/// `SESSION=<id>` from the response's Set-Cookie headers, if any
fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("SESSION="))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

async fn login(router: &Router) -> String {
    let response = send(router, login_request("username=user&password=password")).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    session_cookie(&response).expect("session cookie after login")
}

#[tokio::test]
async fn health_endpoint_works() {
    let router = router().await;
    let response = send(&router, get("/health")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "healthy");
}

#[tokio::test]
async fn root_without_session_is_unauthorized() {
    let router = router().await;
    let response = send(&router, get("/")).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "Basic realm=\"Realm\""
    );
}

#[tokio::test]
async fn login_then_root_returns_greeting() {
    let router = router().await;

    let response = send(&router, login_request("username=user&password=password")).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/");
    let cookie = session_cookie(&response).expect("session cookie");

    let response = send(&router, get_with_cookie("/", &cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "message": "hi!" }));

    let response = send(&router, get_with_cookie("/session", &cookie)).await;
    let info = json_body(response).await;
    assert_eq!(info["authenticated"], true);
    assert_eq!(info["username"], "user");
    assert_eq!(info["roles"], json!(["USER"]));
}

#[tokio::test]
async fn invalid_login_redirects_back_without_session() {
    let router = router().await;

    let response = send(&router, login_request("username=invalid&password=invalid")).await;
    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/login?error");
    assert!(session_cookie(&response).is_none());

    let response = send(&router, get("/session")).await;
    assert_eq!(json_body(response).await, json!({ "authenticated": false }));
}

#[tokio::test]
async fn incomplete_login_form_is_a_failed_login() {
    let router = router().await;

    let response = send(&router, login_request("username=user")).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/login?error");
}

#[tokio::test]
async fn credentials_are_case_sensitive() {
    let router = router().await;

    let response = send(&router, login_request("username=USER&password=password")).await;
    assert_eq!(location(&response), "/login?error");
}

#[tokio::test]
async fn header_is_echoed_for_authenticated_caller() {
    let router = router().await;
    let cookie = login(&router).await;

    let request = Request::builder()
        .uri("/header")
        .header(header::COOKIE, &cookie)
        .header("x-header", "foo")
        .body(Body::empty())
        .unwrap();
    let response = send(&router, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "message": "foo" }));
}

#[tokio::test]
async fn non_ascii_header_is_echoed_verbatim() {
    let router = router_with(Config {
        protect_greetings: false,
        ..test_config()
    })
    .await;

    let request = Request::builder()
        .uri("/header")
        .header("x-header", HeaderValue::from_bytes("héllo wörld".as_bytes()).unwrap())
        .body(Body::empty())
        .unwrap();
    let response = send(&router, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "message": "héllo wörld" }));

    let request = Request::builder()
        .uri("/header")
        .header("x-header", HeaderValue::from_bytes(&[0x66, 0xff, 0x6f]).unwrap())
        .body(Body::empty())
        .unwrap();
    let response = send(&router, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_echo_header_is_a_client_error() {
    let router = router().await;
    let cookie = login(&router).await;

    let response = send(&router, get_with_cookie("/header", &cookie)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("x-header"));
}

#[tokio::test]
async fn basic_credentials_authorize_a_single_request() {
    let router = router().await;

    let token = STANDARD.encode("user:password");
    let request = Request::builder()
        .uri("/")
        .header(header::AUTHORIZATION, format!("Basic {token}"))
        .body(Body::empty())
        .unwrap();
    let response = send(&router, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(session_cookie(&response).is_none());
    assert_eq!(json_body(response).await, json!({ "message": "hi!" }));

    let token = STANDARD.encode("user:wrong");
    let request = Request::builder()
        .uri("/")
        .header(header::AUTHORIZATION, format!("Basic {token}"))
        .body(Body::empty())
        .unwrap();
    let response = send(&router, request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_session_cookie_is_unauthorized() {
    let router = router().await;
    let response = send(&router, get_with_cookie("/", "SESSION=not-a-real-session")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_ends_the_session() {
    let router = router().await;
    let cookie = login(&router).await;

    let request = Request::builder()
        .method("POST")
        .uri("/logout")
        .header(header::COOKIE, &cookie)
        .body(Body::empty())
        .unwrap();
    let response = send(&router, request).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/login?logout");

    let response = send(&router, get_with_cookie("/", &cookie)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn reservations_are_public_and_stable() {
    let router = router().await;

    let first = json_body(send(&router, get("/reservations")).await).await;
    let second = json_body(send(&router, get("/reservations")).await).await;
    assert_eq!(first, second);

    let items = first.as_array().unwrap();
    assert_eq!(items.len(), 8);
    assert_eq!(items[0]["name"], "Madhura");
    assert!(items[0]["id"].is_i64());
    assert_eq!(items[7]["name"], "Dr. Syer");
}

#[tokio::test]
async fn greetings_are_open_when_unprotected() {
    let router = router_with(Config {
        protect_greetings: false,
        ..test_config()
    })
    .await;

    let response = send(&router, get("/")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "message": "hi!" }));

    let request = Request::builder()
        .uri("/header")
        .header("x-header", "bar")
        .body(Body::empty())
        .unwrap();
    let response = send(&router, request).await;
    assert_eq!(json_body(response).await, json!({ "message": "bar" }));

    let response = send(&router, get("/header")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_page_reports_outcome() {
    let router = router().await;

    let page = text_body(send(&router, get("/login")).await).await;
    assert!(page.contains(r#"action="/login""#));
    assert!(!page.contains("Invalid username and password."));

    let page = text_body(send(&router, get("/login?error")).await).await;
    assert!(page.contains("Invalid username and password."));

    let page = text_body(send(&router, get("/login?logout")).await).await;
    assert!(page.contains("You have been signed out."));
}

#[tokio::test]
async fn out_of_range_idle_timeout_is_rejected_at_startup() {
    for minutes in [0, -1, i64::MAX] {
        let config = Config {
            session_idle_minutes: Some(minutes),
            ..test_config()
        };
        let err = AppState::new(&config).await.err().expect("startup error");
        assert!(err.to_string().contains("SESSION_IDLE_MINUTES"));
    }
}
