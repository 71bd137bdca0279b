//! Integration tests for the party ledger backend.

use reqwest::Client;
use serde_json::{json, Value};
use tempfile::TempDir;

use crate::config::Config;
use crate::db::Database;
use crate::{create_router, AppState};

/// Test fixture for integration tests.
struct TestFixture {
    client: Client,
    base_url: String,
    db: Database,
    _temp_dir: TempDir,
}

impl TestFixture {
    async fn new() -> Self {
        Self::with_zero_amounts(false).await
    }

    async fn with_zero_amounts(allow_zero_amounts: bool) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let database_url = format!("sqlite:{}", temp_dir.path().join("test.sqlite").display());

        let db = Database::connect(&database_url)
            .await
            .expect("Failed to init DB");

        let config = Config {
            database_url,
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
            log_level: "warn".to_string(),
            allow_zero_amounts,
        };

        let app = create_router(AppState::new(db.clone(), &config));

        // Bind to random port
        let listener = tokio::net::TcpListener::bind(config.bind_addr())
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");
        let base_url = format!("http://{}", addr);

        // Spawn server
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait for server to start
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        TestFixture {
            client: Client::new(),
            base_url,
            db,
            _temp_dir: temp_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post(&self, path: &str, body: Value) -> (u16, Value) {
        let resp = self
            .client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = resp.status().as_u16();
        (status, resp.json().await.unwrap())
    }

    async fn get(&self, path: &str) -> (u16, Value) {
        let resp = self.client.get(self.url(path)).send().await.unwrap();
        let status = resp.status().as_u16();
        (status, resp.json().await.unwrap())
    }

    async fn create_party(&self, id: &str, email: &str) -> (u16, Value) {
        self.post(
            "/api/parties",
            json!({
                "partyName": "A",
                "email": email,
                "phoneNumber": "111",
                "id": id,
                "password": "pw"
            }),
        )
        .await
    }
}

fn entry_body(quantity: Value, price: Value) -> Value {
    json!({
        "partyId": "P1",
        "subPartyId": "sub-1",
        "vendorId": "vendor-1",
        "date": "2024-01-01",
        "name": "Seed",
        "quantity": quantity,
        "price": price
    })
}

#[tokio::test]
async fn test_health_check() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_health_check_reports_closed_database() {
    let fixture = TestFixture::new().await;
    fixture.db.close().await;

    let resp = fixture
        .client
        .get(fixture.url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 503);
}

#[tokio::test]
async fn test_create_party_then_login() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture.create_party("P1", "a@x.com").await;
    assert_eq!(status, 201);
    assert_eq!(body["message"], "Party created successfully");
    assert_eq!(body["party"]["partyId"], "P1");
    assert_eq!(body["party"]["email"], "a@x.com");
    assert!(body["party"]["_id"].is_string());
    assert!(body["party"]["createdAt"].is_string());

    let (status, body) = fixture
        .post("/api/login", json!({ "id": "P1", "password": "pw" }))
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["party"]["partyId"], "P1");
    assert_eq!(body["party"]["email"], "a@x.com");
    assert_eq!(body["party"]["phoneNumber"], "111");
}

#[tokio::test]
async fn test_create_party_missing_fields() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture
        .post(
            "/api/parties",
            json!({ "partyName": "A", "email": "a@x.com", "id": "P1" }),
        )
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["message"], "All fields are required");
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["missingFields"]["phoneNumber"], true);
    assert_eq!(body["missingFields"]["password"], true);
    assert_eq!(body["missingFields"]["email"], false);
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let fixture = TestFixture::new().await;

    let (status, _) = fixture.create_party("P1", "a@x.com").await;
    assert_eq!(status, 201);

    let (status, body) = fixture.create_party("P2", "a@x.com").await;
    assert_eq!(status, 400);
    assert_eq!(body["code"], "CONFLICT");
    assert_eq!(
        body["message"],
        "A party with this email or ID already exists"
    );

    let (status, _) = fixture.create_party("P1", "other@x.com").await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn test_list_parties_projection() {
    let fixture = TestFixture::new().await;
    fixture.create_party("P1", "a@x.com").await;
    fixture.create_party("P2", "b@x.com").await;

    let (status, body) = fixture.get("/api/parties").await;
    assert_eq!(status, 200);

    let parties = body.as_array().unwrap();
    assert_eq!(parties.len(), 2);
    assert_eq!(
        parties[0],
        json!({
            "partyName": "A",
            "email": "a@x.com",
            "phoneNumber": "111",
            "partyId": "P1",
            "password": "pw"
        })
    );
    assert!(parties[1].get("_id").is_none());
}

#[tokio::test]
async fn test_login_failures() {
    let fixture = TestFixture::new().await;
    fixture.create_party("P1", "a@x.com").await;

    let (status, body) = fixture
        .post("/api/login", json!({ "id": "P1", "password": "wrong" }))
        .await;
    assert_eq!(status, 401);
    assert_eq!(body["message"], "Invalid credentials");

    let (status, body) = fixture
        .post("/api/login", json!({ "id": "nobody", "password": "pw" }))
        .await;
    assert_eq!(status, 404);
    assert_eq!(body["message"], "Party not found");

    let (status, body) = fixture.post("/api/login", json!({ "id": "P1" })).await;
    assert_eq!(status, 400);
    assert_eq!(body["message"], "ID and Password are required");
}

#[tokio::test]
async fn test_sub_party_unknown_parent() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture
        .post(
            "/api/parties/add",
            json!({
                "partyName": "F1",
                "farm": "North",
                "phoneNumber": "222",
                "parentPartyId": "ghost"
            }),
        )
        .await;
    assert_eq!(status, 404);
    assert_eq!(body["message"], "Parent party not found");
    assert_eq!(body["parentPartyId"], "ghost");

    let (status, body) = fixture.get("/api/parties/ghost").await;
    assert_eq!(status, 200);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_sub_party_missing_fields() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture
        .post(
            "/api/parties/add",
            json!({ "partyName": "F1", "farm": "", "parentPartyId": "P1" }),
        )
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["missingFields"]["farm"], true);
    assert_eq!(body["missingFields"]["phoneNumber"], true);
    assert_eq!(body["missingFields"]["partyName"], false);
    assert_eq!(body["missingFields"]["parentPartyId"], false);
}

#[tokio::test]
async fn test_list_sub_parties_for_parent_without_children() {
    let fixture = TestFixture::new().await;
    fixture.create_party("P1", "a@x.com").await;

    let (status, body) = fixture.get("/api/parties/P1").await;
    assert_eq!(status, 200);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_vendor_missing_phone_number() {
    let fixture = TestFixture::new().await;
    fixture.create_party("P1", "a@x.com").await;

    let (status, body) = fixture
        .post(
            "/api/vendors",
            json!({ "vendorName": "V1", "farm": "North", "partyId": "P1" }),
        )
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["missingFields"]["phoneNumber"], true);
    assert_eq!(body["missingFields"]["vendorName"], false);

    let (status, body) = fixture.get("/api/vendors/P1").await;
    assert_eq!(status, 200);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_vendor_unknown_party() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture
        .post(
            "/api/vendors",
            json!({
                "vendorName": "V1",
                "farm": "North",
                "phoneNumber": "333",
                "partyId": "ghost"
            }),
        )
        .await;
    assert_eq!(status, 404);
    assert_eq!(body["message"], "Party not found");
    assert_eq!(body["partyId"], "ghost");
}

#[tokio::test]
async fn test_entry_zero_quantity_rejected_by_default() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture
        .post("/api/party-vendor-entries", entry_body(json!(0), json!(5)))
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["missingFields"]["quantity"], true);
    assert_eq!(body["missingFields"]["price"], false);
}

#[tokio::test]
async fn test_entry_zero_quantity_accepted_when_allowed() {
    let fixture = TestFixture::with_zero_amounts(true).await;

    let (status, body) = fixture
        .post("/api/party-vendor-entries", entry_body(json!(0), json!(0)))
        .await;
    assert_eq!(status, 201);
    assert_eq!(body["entry"]["quantity"], 0.0);
    assert_eq!(body["entry"]["price"], 0.0);
}

#[tokio::test]
async fn test_entry_invalid_date() {
    let fixture = TestFixture::new().await;

    let mut body = entry_body(json!(1), json!(1));
    body["date"] = json!("someday");
    let (status, body) = fixture.post("/api/party-vendor-entries", body).await;
    assert_eq!(status, 400);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["message"], "Invalid date");
}

#[tokio::test]
async fn test_numeric_text_fields_are_stored_as_strings() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture
        .post(
            "/api/parties",
            json!({
                "partyName": "A",
                "email": "a@x.com",
                "phoneNumber": 1112223333u64,
                "id": 42,
                "password": "pw"
            }),
        )
        .await;
    assert_eq!(status, 201);
    assert_eq!(body["party"]["phoneNumber"], "1112223333");
    assert_eq!(body["party"]["partyId"], "42");

    let (status, body) = fixture
        .post("/api/login", json!({ "id": 42, "password": "pw" }))
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["party"]["partyId"], "42");

    let (status, body) = fixture
        .post(
            "/api/vendors",
            json!({
                "vendorName": "V1",
                "farm": "North",
                "phoneNumber": 333,
                "partyId": 42
            }),
        )
        .await;
    assert_eq!(status, 201);
    assert_eq!(body["vendor"]["phoneNumber"], "333");
    assert_eq!(body["vendor"]["partyId"], "42");
}

#[tokio::test]
async fn test_numeric_string_amounts_are_accepted() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture
        .post(
            "/api/party-vendor-entries",
            entry_body(json!("10"), json!("2.5")),
        )
        .await;
    assert_eq!(status, 201);
    assert_eq!(body["entry"]["quantity"].as_i64(), Some(10));
    assert_eq!(body["entry"]["price"], 2.5);

    let (status, body) = fixture
        .post(
            "/api/party-vendor-entries",
            entry_body(json!("0"), json!("5")),
        )
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["missingFields"]["quantity"], true);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_duplicate_creates_yield_one_party() {
    let fixture = TestFixture::new().await;

    let mut tasks = tokio::task::JoinSet::new();
    for n in 0..8 {
        let client = fixture.client.clone();
        let url = fixture.url("/api/parties");
        tasks.spawn(async move {
            let resp = client
                .post(url)
                .json(&json!({
                    "partyName": "A",
                    "email": format!("racer{}@x.com", n),
                    "phoneNumber": "111",
                    "id": "P1",
                    "password": "pw"
                }))
                .send()
                .await
                .unwrap();
            let status = resp.status().as_u16();
            let body: Value = resp.json().await.unwrap();
            (status, body)
        });
    }

    let mut created = 0;
    while let Some(result) = tasks.join_next().await {
        let (status, body) = result.unwrap();
        match status {
            201 => created += 1,
            400 => assert_eq!(body["code"], "CONFLICT"),
            other => panic!("unexpected status {other}: {body}"),
        }
    }
    assert_eq!(created, 1);

    let (status, body) = fixture.get("/api/parties").await;
    assert_eq!(status, 200);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_get_parties_add_is_not_a_parent_lookup() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/api/parties/add"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 405);
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/parties"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], "BAD_REQUEST");

    let (status, body) = fixture
        .post("/api/party-vendor-entries", entry_body(json!("ten"), json!(5)))
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_store_failure_is_internal_error() {
    let fixture = TestFixture::new().await;
    fixture.db.close().await;

    let (status, body) = fixture.get("/api/vendors/P1").await;
    assert_eq!(status, 500);
    assert_eq!(body["code"], "INTERNAL_ERROR");
    assert_eq!(body["message"], "Error fetching vendors");
    assert!(body["error"].is_string());

    let (status, body) = fixture.create_party("P1", "a@x.com").await;
    assert_eq!(status, 500);
    assert_eq!(body["message"], "Error creating party");
}

#[tokio::test]
async fn test_end_to_end_flow() {
    let fixture = TestFixture::new().await;

    let (status, _) = fixture.create_party("P1", "a@x.com").await;
    assert_eq!(status, 201);

    let (status, body) = fixture
        .post(
            "/api/parties/add",
            json!({
                "parentPartyId": "P1",
                "partyName": "F1",
                "farm": "North",
                "phoneNumber": "222"
            }),
        )
        .await;
    assert_eq!(status, 201);
    assert_eq!(body["message"], "Party information added successfully");
    let sub_party_id = body["party"]["_id"].as_str().unwrap().to_string();

    let (status, body) = fixture.get("/api/parties/P1").await;
    assert_eq!(status, 200);
    let sub_parties = body.as_array().unwrap();
    assert_eq!(sub_parties.len(), 1);
    assert_eq!(sub_parties[0]["_id"], sub_party_id.as_str());
    assert_eq!(sub_parties[0]["partyName"], "F1");
    assert_eq!(sub_parties[0]["parentPartyId"], "P1");

    let (status, body) = fixture
        .post(
            "/api/vendors",
            json!({
                "partyId": "P1",
                "vendorName": "V1",
                "farm": "North",
                "phoneNumber": "333"
            }),
        )
        .await;
    assert_eq!(status, 201);
    assert_eq!(body["message"], "Vendor created successfully");
    let vendor_id = body["vendor"]["_id"].as_str().unwrap().to_string();

    let (status, body) = fixture.get("/api/vendors/P1").await;
    assert_eq!(status, 200);
    assert_eq!(body[0]["vendorName"], "V1");

    let (status, body) = fixture
        .post(
            "/api/party-vendor-entries",
            json!({
                "partyId": "P1",
                "subPartyId": sub_party_id,
                "vendorId": vendor_id,
                "date": "2024-01-01",
                "name": "Seed",
                "quantity": 10,
                "price": 5
            }),
        )
        .await;
    assert_eq!(status, 201);
    assert_eq!(body["message"], "Entry saved successfully");
    assert_eq!(body["entry"]["subPartyId"], sub_party_id.as_str());
    assert_eq!(body["entry"]["vendorId"], vendor_id.as_str());
    assert_eq!(body["entry"]["date"], "2024-01-01T00:00:00.000Z");
    assert_eq!(body["entry"]["quantity"], 10.0);
    assert_eq!(body["entry"]["price"], 5.0);
    assert_eq!(body["entry"]["quantity"].as_i64(), Some(10));
    assert_eq!(body["entry"]["price"].as_i64(), Some(5));
}
