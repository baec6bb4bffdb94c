use counsel_api::endpoints::lawyers::Lawyer;
use counsel_api::endpoints::uploads::{AVATAR_PATH, UploadFile, UploadedFile};
use counsel_api::{
    ApiError, CallOptions, CancellationToken, Client, ClientConfig, EmptyResponse, Request,
    RequestContext, SessionHandle,
};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;
use wiremock::matchers::{header, header_regex, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn lawyer_json(id: u128, name: &str) -> serde_json::Value {
    json!({
        "id": Uuid::from_u128(id),
        "fullName": name,
        "specialties": ["Criminal"],
        "city": "Hanoi",
        "rating": 4.8,
        "reviewCount": 12,
        "yearsOfExperience": 9,
        "hourlyRate": 800000,
        "isVip": true,
        "vipRank": 1,
        "avatarUrl": null,
        "bio": null
    })
}

fn client_for(server: &MockServer) -> Client {
    Client::new(&server.uri()).unwrap()
}

fn authed(token: &str) -> RequestContext {
    RequestContext::new(SessionHandle::new()).with_token(token)
}

#[tokio::test]
async fn public_call_decodes_paginated_lawyers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/lawyers"))
        .and(query_param("city", "Hanoi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [lawyer_json(1, "Le Van A")],
            "total": 1,
            "page": 1,
            "limit": 20
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client_for(&server)
        .public_call(Request::lawyers().list().city("Hanoi"), CallOptions::new())
        .await
        .unwrap();

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].full_name, "Le Van A");
    assert!(!page.has_more());
}

#[tokio::test]
async fn authenticated_call_sends_bearer_token() {
    let server = MockServer::start().await;
    let id = Uuid::from_u128(42);
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": id,
            "email": "client@example.com",
            "fullName": "Pham Thi B",
            "role": "client",
            "avatarUrl": null,
            "phone": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let user = client_for(&server)
        .authenticated_call(&authed("secret-token"), Request::auth().me(), CallOptions::new())
        .await
        .unwrap();
    assert_eq!(user.id, id);
}

#[tokio::test]
async fn missing_token_fails_without_network_call() {
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let context = RequestContext::new(SessionHandle::new());
    let error = client_for(&server)
        .authenticated_call(&context, Request::consultations().mine(), CallOptions::new())
        .await
        .unwrap_err();

    assert_eq!(error, ApiError::unauthenticated());
    assert_eq!(error.code(), 401);
    assert!(!context.session().is_expired());
}

#[tokio::test]
async fn validation_errors_are_joined() {
    let server = MockServer::start().await;
    let payload = json!({
        "statusCode": 422,
        "message": ["a", "b"],
        "error": "Unprocessable Entity"
    });
    Mock::given(method("POST"))
        .and(path("/questions"))
        .respond_with(ResponseTemplate::new(422).set_body_json(payload.clone()))
        .mount(&server)
        .await;

    let error = client_for(&server)
        .authenticated_call(&authed("t"), Request::questions().ask("", ""), CallOptions::new())
        .await
        .unwrap_err();

    assert_eq!(error.code(), 422);
    assert_eq!(error.message(), "a, b");
    assert_eq!(error.details(), Some(&payload));
}

#[tokio::test]
async fn unauthorized_response_expires_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/consultations/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "statusCode": 401,
            "message": "Unauthorized"
        })))
        .mount(&server)
        .await;

    let context = authed("stale");
    let notified = Arc::new(AtomicUsize::new(0));
    let counter = notified.clone();
    context.session().add_listener(move |error: &ApiError| {
        assert_eq!(error.code(), 401);
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let client = client_for(&server);
    for _ in 0..2 {
        let error = client
            .authenticated_call(&context, Request::consultations().mine(), CallOptions::new())
            .await
            .unwrap_err();
        assert_eq!(error.message(), "Unauthorized");
    }

    assert!(context.session().is_expired());
    assert_eq!(notified.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn forbidden_response_expires_session() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let context = authed("t");
    let error = client_for(&server)
        .authenticated_call(
            &context,
            Request::services().delete(Uuid::from_u128(1)),
            CallOptions::new(),
        )
        .await
        .unwrap_err();

    assert_eq!(error.code(), 403);
    assert_eq!(error.message(), "Forbidden");
    assert!(context.session().is_expired());
}

#[tokio::test]
async fn not_found_does_not_expire_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "statusCode": 404,
            "message": "Lawyer not found"
        })))
        .mount(&server)
        .await;

    let context = authed("t");
    let error = client_for(&server)
        .authenticated_call(&context, Request::auth().me(), CallOptions::new())
        .await
        .unwrap_err();

    assert_eq!(error.code(), 404);
    assert!(!context.session().is_expired());
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let client = Client::new("http://127.0.0.1:1").unwrap();

    let error = client
        .public_call(Request::lawyers().list(), CallOptions::new())
        .await
        .unwrap_err();
    assert_eq!(error.code(), 1001);
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let error = client_for(&server)
        .public_call(
            Request::lawyers().get(Uuid::from_u128(1)),
            CallOptions::new().timeout(Duration::from_millis(50)),
        )
        .await
        .unwrap_err();
    assert_eq!(error.code(), 1002);
}

#[tokio::test]
async fn timed_out_get_is_not_retried_by_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/questions"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(300)))
        .expect(1)
        .mount(&server)
        .await;

    let error = client_for(&server)
        .public_call(
            Request::questions().list(),
            CallOptions::new().timeout(Duration::from_millis(50)),
        )
        .await
        .unwrap_err();
    assert_eq!(error.code(), 1002);
}

fn retrying_client_for(server: &MockServer) -> Client {
    Client::with_config(ClientConfig {
        base_url: server.uri(),
        retries: 1,
        ..ClientConfig::default()
    })
    .unwrap()
}

#[tokio::test]
async fn get_is_retried_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/questions"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(300)))
        .expect(2)
        .mount(&server)
        .await;

    let error = retrying_client_for(&server)
        .public_call(
            Request::questions().list(),
            CallOptions::new().timeout(Duration::from_millis(50)),
        )
        .await
        .unwrap_err();
    assert_eq!(error.code(), 1002);
}

#[tokio::test]
async fn post_is_never_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/consultations"))
        .respond_with(ResponseTemplate::new(201).set_delay(Duration::from_millis(300)))
        .expect(1)
        .mount(&server)
        .await;

    let error = retrying_client_for(&server)
        .authenticated_call(
            &authed("t"),
            Request::consultations().request(Uuid::from_u128(1), "Land dispute"),
            CallOptions::new().timeout(Duration::from_millis(50)),
        )
        .await
        .unwrap_err();
    assert_eq!(error.code(), 1002);
}

#[tokio::test]
async fn cancelled_call_reports_cancellation() {
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    cancel.cancel();

    let error = client_for(&server)
        .public_call(Request::lawyers().list(), CallOptions::new().cancel_on(cancel))
        .await
        .unwrap_err();
    assert_eq!(error.code(), 1005);
    assert_eq!(error.message(), "The request was cancelled");
}

#[tokio::test]
async fn malformed_body_is_a_bad_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;

    let error = client_for(&server)
        .public_call(Request::lawyers().get(Uuid::from_u128(1)), CallOptions::new())
        .await
        .unwrap_err();
    assert_eq!(error.code(), 1004);
}

#[tokio::test]
async fn delete_accepts_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(format!("/schedule/slots/{}", Uuid::from_u128(9))))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .authenticated_call(
            &authed("t"),
            Request::schedule().delete_slot(Uuid::from_u128(9)),
            CallOptions::new(),
        )
        .await
        .unwrap();
    assert_eq!(response, EmptyResponse);
}

#[tokio::test]
async fn upload_sends_multipart_with_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(AVATAR_PATH))
        .and(header("authorization", "Bearer t"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "url": "https://cdn.example.com/avatar.png",
            "fileName": "avatar.png",
            "size": 3
        })))
        .expect(1)
        .mount(&server)
        .await;

    let uploaded: UploadedFile = client_for(&server)
        .upload(
            &authed("t"),
            AVATAR_PATH,
            UploadFile::new("avatar.png", vec![1, 2, 3]).mime_type("image/png"),
            CallOptions::new(),
        )
        .await
        .unwrap();
    assert_eq!(uploaded.url, "https://cdn.example.com/avatar.png");
}

#[tokio::test]
async fn upload_without_token_is_rejected() {
    let server = MockServer::start().await;
    let result: Result<UploadedFile, ApiError> = client_for(&server)
        .upload(
            &RequestContext::new(SessionHandle::new()),
            AVATAR_PATH,
            UploadFile::new("a.pdf", vec![0]),
            CallOptions::new(),
        )
        .await;
    assert_eq!(result.unwrap_err().code(), 401);
}

#[tokio::test]
async fn get_lawyer_by_id() {
    let server = MockServer::start().await;
    let id = Uuid::from_u128(5);
    Mock::given(method("GET"))
        .and(path(format!("/lawyers/{}", id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(lawyer_json(5, "Hoang C")))
        .mount(&server)
        .await;

    let lawyer: Lawyer = client_for(&server)
        .public_call(Request::lawyers().get(id), CallOptions::new())
        .await
        .unwrap();
    assert_eq!(lawyer.id, id);
    assert!(lawyer.is_vip);
}
