use chrono::FixedOffset;
use counsel::cli::Command;
use counsel::App;
use counsel_api::{ApiError, Client};
use counsel_auth::{AuthManager, Credentials, TokenStore};
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_app(server: &MockServer, dir: &tempfile::TempDir) -> App {
    let client = Client::new(&server.uri()).unwrap();
    let store = TokenStore::at(dir.path().join("token.json")).unwrap();
    App::new(AuthManager::new(client, Credentials::new(store)))
        .with_offset(FixedOffset::east_opt(0).unwrap())
}

async fn run(app: &App, command: Command) -> anyhow::Result<String> {
    let mut out = Vec::new();
    app.run(command, &mut out).await?;
    Ok(String::from_utf8(out).unwrap())
}

fn lawyer(id: u128, name: &str, vip: bool, rank: Option<u32>) -> serde_json::Value {
    json!({
        "id": Uuid::from_u128(id),
        "fullName": name,
        "specialties": ["Family"],
        "city": "Hanoi",
        "rating": 4.5,
        "reviewCount": 10,
        "yearsOfExperience": 3,
        "hourlyRate": 1500000,
        "isVip": vip,
        "vipRank": rank,
        "avatarUrl": null,
        "bio": null
    })
}

async fn login(server: &MockServer, app: &App) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "accessToken": "tok",
            "user": {
                "id": Uuid::from_u128(100),
                "email": "client@example.com",
                "fullName": "Vo Thi E",
                "role": "client",
                "avatarUrl": null,
                "phone": null
            }
        })))
        .mount(server)
        .await;

    let output = run(
        app,
        Command::Login {
            email: "client@example.com".to_string(),
            password: "pw".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(output, "Logged in as Vo Thi E (client)\n");
}

#[tokio::test]
async fn vip_listing_is_in_featured_order() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    Mock::given(method("GET"))
        .and(path("/lawyers"))
        .and(query_param("vipOnly", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                lawyer(1, "Second", true, Some(2)),
                lawyer(2, "Regular", false, None),
                lawyer(3, "First", true, Some(1))
            ],
            "total": 3,
            "page": 1,
            "limit": 20
        })))
        .mount(&server)
        .await;

    let app = test_app(&server, &dir);
    let output = run(
        &app,
        Command::Lawyers {
            city: None,
            specialty: None,
            search: None,
            vip: true,
            page: 1,
            limit: 20,
        },
    )
    .await
    .unwrap();

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("First [VIP]"));
    assert!(lines[1].contains("Second [VIP]"));
    assert!(lines[0].contains("1,500,000/h"));
    assert_eq!(lines[2], "Page 1 (2 of 3 lawyers)");
}

#[tokio::test]
async fn schedule_is_grouped_by_day() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let lawyer_id = Uuid::from_u128(7);
    Mock::given(method("GET"))
        .and(path(format!("/lawyers/{}/schedule", lawyer_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": Uuid::from_u128(2),
                "lawyerId": lawyer_id,
                "startAt": "2024-05-02T09:00:00Z",
                "endAt": "2024-05-02T10:00:00Z",
                "isBooked": false
            },
            {
                "id": Uuid::from_u128(1),
                "lawyerId": lawyer_id,
                "startAt": "2024-05-01T14:00:00Z",
                "endAt": "2024-05-01T15:00:00Z",
                "isBooked": true
            }
        ])))
        .mount(&server)
        .await;

    let app = test_app(&server, &dir);
    let output = run(
        &app,
        Command::Schedule {
            lawyer_id,
            available: false,
        },
    )
    .await
    .unwrap();

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[0], "Wed 01 May 2024");
    assert!(lines[1].starts_with("  14:00-15:00  booked"));
    assert_eq!(lines[2], "Thu 02 May 2024");
    assert!(lines[3].starts_with("  09:00-10:00  free"));

    let output = run(
        &app,
        Command::Schedule {
            lawyer_id,
            available: true,
        },
    )
    .await
    .unwrap();
    assert!(!output.contains("booked"));
}

#[tokio::test]
async fn whoami_requires_login() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&server, &dir);

    let err = run(&app, Command::Whoami).await.unwrap_err();
    let api = err.downcast_ref::<ApiError>().unwrap();
    assert_eq!(api.code(), 401);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn consult_after_login_uses_token() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&server, &dir);
    login(&server, &app).await;

    let consultation_id = Uuid::from_u128(55);
    Mock::given(method("POST"))
        .and(path("/consultations"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": consultation_id,
            "lawyerId": Uuid::from_u128(3),
            "clientId": Uuid::from_u128(100),
            "slotId": null,
            "serviceId": null,
            "topic": "Inheritance",
            "description": null,
            "status": "pending",
            "createdAt": "2024-05-01T08:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let output = run(
        &app,
        Command::Consult {
            lawyer_id: Uuid::from_u128(3),
            topic: "Inheritance".to_string(),
            slot: None,
            service: None,
            description: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(
        output,
        format!("Requested {}  pending  2024-05-01  Inheritance\n", consultation_id)
    );
}

#[tokio::test]
async fn rejected_token_logs_the_user_out() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&server, &dir);
    login(&server, &app).await;

    Mock::given(method("GET"))
        .and(path("/consultations/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "statusCode": 401,
            "message": "jwt expired"
        })))
        .mount(&server)
        .await;

    let err = run(&app, Command::Consultations { status: None })
        .await
        .unwrap_err();
    assert_eq!(err.downcast_ref::<ApiError>().unwrap().message(), "jwt expired");
    assert!(app.auth().session().is_expired());
    assert!(!app.auth().is_logged_in());
}

#[tokio::test]
async fn add_slot_rejects_inverted_range() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&server, &dir);

    let err = run(
        &app,
        Command::AddSlot {
            start: "2024-05-01T10:00:00Z".parse().unwrap(),
            end: "2024-05-01T09:00:00Z".parse().unwrap(),
        },
    )
    .await
    .unwrap_err();
    assert!(err.to_string().contains("end after it starts"));
}
