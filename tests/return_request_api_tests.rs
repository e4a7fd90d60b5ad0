//! Listing, completing and cancelling return requests over the HTTP API.

mod common;

use assetdesk::api::VALID_ASSIGNMENT_EXISTS;
use assetdesk::constants::seed::{ADMIN_ROLE_ID, HN_LOCATION_ID};
use assetdesk::db::NewAssignment;
use assetdesk::entities::enums::{AssetStatus, AssignmentState, Gender, ReturnStatus, UserStatus};
use assetdesk::entities::users;
use axum::http::StatusCode;
use chrono::{Local, NaiveDate};
use sea_orm::Set;
use common::{ADMIN_KEY, TestApp, data_field, spawn_app};
use serde_json::json;
use uuid::Uuid;

const LIST: &str = "/api/request-for-returning";

/// Three accepted assignments, each with an open return request.
struct Fixture {
    admin_id: Uuid,
    alice_id: Uuid,
    john_key: String,
    alice_key: String,
    category_id: serde_json::Value,
    assets: Vec<Uuid>,
    assignments: Vec<Uuid>,
    requests: Vec<Uuid>,
}

fn uuid_of(value: &serde_json::Value) -> Uuid {
    value.as_str().unwrap().parse().unwrap()
}

async fn user_id(app: &TestApp, username: &str) -> Uuid {
    app.store
        .get_user_by_username(username)
        .await
        .unwrap()
        .unwrap()
        .id
}

async fn create_asset(
    app: &TestApp,
    admin_key: &str,
    category_id: &serde_json::Value,
    code: &str,
    name: &str,
) -> Uuid {
    let (status, body) = app
        .post(
            "/api/assets",
            admin_key,
            json!({
                "assetCode": code,
                "assetName": name,
                "categoryId": category_id,
                "installDate": "2024-01-02",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    uuid_of(&body["data"]["id"])
}

/// Assigns `asset_id` to `holder`, accepts it as the holder and opens a
/// return request. Returns the assignment and request ids.
async fn assign_and_request_return(
    app: &TestApp,
    admin_key: &str,
    asset_id: Uuid,
    holder: Uuid,
    holder_key: &str,
) -> (Uuid, Uuid) {
    let (status, body) = app
        .post(
            "/api/assignments",
            admin_key,
            json!({
                "assetId": asset_id,
                "assignedTo": holder,
                "assignedDate": "2024-06-17",
                "note": null,
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let assignment_id = uuid_of(&body["data"]["id"]);

    let (status, body) = app
        .send(
            "PUT",
            &format!("/api/assignments/{assignment_id}/accept"),
            Some(holder_key),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["state"], "Accepted");

    let (status, body) = app
        .post(LIST, holder_key, json!({"assignmentId": assignment_id}))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["message"], "Create return request successfully");
    assert_eq!(body["data"]["state"], "Requested");

    (assignment_id, uuid_of(&body["data"]["id"]))
}

async fn seed(app: &TestApp) -> Fixture {
    let john = app.register_staff("John", "Doe").await;
    let alice = app.register_staff("Alice", "Smith").await;
    let john_key = app.api_key_of(&john).await;
    let alice_key = app.api_key_of(&alice).await;
    let john_id = user_id(app, &john).await;
    let alice_id = user_id(app, &alice).await;
    let admin_id = user_id(app, "admin").await;

    let (status, body) = app
        .post(
            "/api/categories",
            ADMIN_KEY,
            json!({"name": "Laptop", "code": "la"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["code"], "LA");
    let category_id = body["data"]["id"].clone();

    let mut assets = Vec::new();
    for (code, name) in [
        ("LA000001", "Macbook Pro"),
        ("LA000002", "Dell XPS"),
        ("LA000003", "Zenbook"),
    ] {
        assets.push(create_asset(app, ADMIN_KEY, &category_id, code, name).await);
    }

    let holders = [
        (john_id, john_key.as_str()),
        (alice_id, alice_key.as_str()),
        (john_id, john_key.as_str()),
    ];

    let mut assignments = Vec::new();
    let mut requests = Vec::new();
    for (asset_id, (holder, key)) in assets.iter().zip(holders) {
        let (assignment_id, request_id) =
            assign_and_request_return(app, ADMIN_KEY, *asset_id, holder, key).await;
        assignments.push(assignment_id);
        requests.push(request_id);
    }

    Fixture {
        admin_id,
        alice_id,
        john_key,
        alice_key,
        category_id,
        assets,
        assignments,
        requests,
    }
}

fn complete_uri(id: Uuid) -> String {
    format!("{LIST}/CompleteRequest/{id}")
}

fn cancel_uri(id: Uuid) -> String {
    format!("{LIST}/CancelRequest/{id}")
}

#[tokio::test]
async fn listing_sorts_and_filters() {
    let app = spawn_app("returns-list").await;
    seed(&app).await;

    let (status, body) = app.get(LIST, ADMIN_KEY).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Get return requests successfully");
    assert_eq!(body["totalCount"], 3);
    assert_eq!(
        data_field(&body, "assetCode"),
        vec!["LA000001", "LA000002", "LA000003"]
    );
    assert_eq!(data_field(&body, "requestedBy"), vec!["jdoe", "asmith", "jdoe"]);
    assert_eq!(data_field(&body, "state"), vec!["Requested"; 3]);
    assert!(body["data"][0]["acceptedBy"].is_null());

    let (_, body) = app
        .get(&format!("{LIST}?sortBy=AssetName&sortOrder=desc"), ADMIN_KEY)
        .await;
    assert_eq!(
        data_field(&body, "assetName"),
        vec!["Zenbook", "Macbook Pro", "Dell XPS"]
    );

    let (_, body) = app
        .get(&format!("{LIST}?sortBy=Nonsense&sortOrder=desc"), ADMIN_KEY)
        .await;
    assert_eq!(
        data_field(&body, "assetCode"),
        vec!["LA000003", "LA000002", "LA000001"]
    );

    let (_, body) = app.get(&format!("{LIST}?searchTerm=dell"), ADMIN_KEY).await;
    assert_eq!(body["totalCount"], 1);
    assert_eq!(data_field(&body, "assetCode"), vec!["LA000002"]);

    let (_, body) = app.get(&format!("{LIST}?searchTerm=jdoe"), ADMIN_KEY).await;
    assert_eq!(data_field(&body, "assetCode"), vec!["LA000001", "LA000003"]);

    let (_, body) = app.get(&format!("{LIST}?status=2"), ADMIN_KEY).await;
    assert_eq!(body["totalCount"], 0);
    assert_eq!(body["data"], json!([]));

    let (_, body) = app.get(&format!("{LIST}?status=0"), ADMIN_KEY).await;
    assert_eq!(body["totalCount"], 3);

    let (_, body) = app.get(&format!("{LIST}?pageNumber=2"), ADMIN_KEY).await;
    assert_eq!(body["totalCount"], 3);
    assert_eq!(body["data"], json!([]));

    let (status, _) = app.get(&format!("{LIST}?status=abc"), ADMIN_KEY).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn completing_returns_the_asset_to_stock() {
    let app = spawn_app("returns-complete").await;
    let fixture = seed(&app).await;

    let (status, body) = app
        .send("PUT", &complete_uri(fixture.requests[0]), Some(ADMIN_KEY), None)
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Complete return requests successfully");

    let request = app
        .store
        .get_return_request(fixture.requests[0])
        .await
        .unwrap()
        .unwrap();
    assert_eq!(request.return_status, ReturnStatus::Completed);
    assert_eq!(request.accepted_by, Some(fixture.admin_id));
    assert!(request.return_date.is_some());

    let assignment = app
        .store
        .get_assignment(fixture.assignments[0])
        .await
        .unwrap()
        .unwrap();
    assert_eq!(assignment.state, AssignmentState::Returned);

    let asset = app.store.get_asset(fixture.assets[0]).await.unwrap().unwrap();
    assert_eq!(asset.status, AssetStatus::Available);

    let (_, body) = app.get(&format!("{LIST}?status=2"), ADMIN_KEY).await;
    assert_eq!(body["totalCount"], 1);
    assert_eq!(body["data"][0]["acceptedBy"], "admin");
    assert_eq!(body["data"][0]["state"], "Completed");
    assert!(body["data"][0]["returnedDate"].is_string());

    let (status, body) = app
        .send("PUT", &complete_uri(fixture.requests[0]), Some(ADMIN_KEY), None)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn cancelling_puts_the_assignment_back() {
    let app = spawn_app("returns-cancel").await;
    let fixture = seed(&app).await;

    let (status, body) = app
        .send("DELETE", &cancel_uri(fixture.requests[1]), Some(ADMIN_KEY), None)
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["message"], "Request cancel successfully.");

    let request = app
        .store
        .get_return_request(fixture.requests[1])
        .await
        .unwrap()
        .unwrap();
    assert_eq!(request.return_status, ReturnStatus::Cancelled);

    let assignment = app
        .store
        .get_assignment(fixture.assignments[1])
        .await
        .unwrap()
        .unwrap();
    assert_eq!(assignment.state, AssignmentState::Accepted);

    // The holder may ask again once the first request is gone.
    let (status, _) = app
        .post(LIST, &fixture.alice_key, json!({"assignmentId": fixture.assignments[1]}))
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn cancelling_is_refused_while_another_assignment_is_active() {
    let app = spawn_app("returns-cancel-blocked").await;
    let fixture = seed(&app).await;

    app.store
        .create_assignment(NewAssignment {
            asset_id: fixture.assets[2],
            assigned_to: fixture.alice_id,
            assigned_by: fixture.admin_id,
            assigned_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            note: None,
        })
        .await
        .unwrap();

    let (status, body) = app
        .send("DELETE", &cancel_uri(fixture.requests[2]), Some(ADMIN_KEY), None)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], VALID_ASSIGNMENT_EXISTS);

    let request = app
        .store
        .get_return_request(fixture.requests[2])
        .await
        .unwrap()
        .unwrap();
    assert_eq!(request.return_status, ReturnStatus::Requested);
}

#[tokio::test]
async fn processing_requires_an_admin_and_a_known_request() {
    let app = spawn_app("returns-guards").await;
    let fixture = seed(&app).await;

    let (status, _) = app
        .send("PUT", &complete_uri(fixture.requests[0]), Some(&fixture.john_key), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send("DELETE", &cancel_uri(fixture.requests[0]), Some(&fixture.john_key), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send("PUT", &complete_uri(fixture.requests[0]), None, None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app
        .send("PUT", &complete_uri(Uuid::new_v4()), Some(ADMIN_KEY), None)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Return request not found");

    let (status, body) = app
        .send("DELETE", &cancel_uri(Uuid::new_v4()), Some(ADMIN_KEY), None)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Return request not found");

    let (status, _) = app
        .send("PUT", &format!("{LIST}/CompleteRequest/not-a-uuid"), Some(ADMIN_KEY), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn requests_are_opened_by_the_holder_once() {
    let app = spawn_app("returns-create").await;
    let fixture = seed(&app).await;

    // Alice does not hold the first assignment.
    let (status, _) = app
        .post(LIST, &fixture.alice_key, json!({"assignmentId": fixture.assignments[0]}))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .post(LIST, &fixture.john_key, json!({"assignmentId": fixture.assignments[0]}))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);

    let (status, body) = app
        .post(LIST, ADMIN_KEY, json!({"assignmentId": Uuid::new_v4()}))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Assignment not found");
}

#[tokio::test]
async fn listing_filters_by_return_date() {
    let app = spawn_app("returns-date").await;
    let fixture = seed(&app).await;

    let (status, _) = app
        .send("PUT", &complete_uri(fixture.requests[1]), Some(ADMIN_KEY), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let today = Local::now().date_naive();
    let (_, body) = app
        .get(&format!("{LIST}?returnDate={today}"), ADMIN_KEY)
        .await;
    assert_eq!(body["totalCount"], 1);
    assert_eq!(data_field(&body, "assetCode"), vec!["LA000002"]);
    assert_eq!(data_field(&body, "returnedDate"), vec![today.to_string()]);

    let (_, body) = app
        .get(&format!("{LIST}?returnDate=2001-01-01"), ADMIN_KEY)
        .await;
    assert_eq!(body["totalCount"], 0);

    let (status, _) = app
        .get(&format!("{LIST}?returnDate=yesterday"), ADMIN_KEY)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

/// Inserts an admin working in Ha Noi and returns their api key.
async fn insert_hanoi_admin(app: &TestApp) -> String {
    let api_key = "hanoi-admin-key".to_string();
    app.store
        .insert_user(users::ActiveModel {
            id: Set(Uuid::new_v4()),
            staff_code: Set("SD0900".to_string()),
            username: Set("hnadmin".to_string()),
            first_name: Set("Ha Noi".to_string()),
            last_name: Set("Admin".to_string()),
            gender: Set(Gender::Female),
            password_hash: Set("unused".to_string()),
            password_salt: Set("unused".to_string()),
            api_key: Set(api_key.clone()),
            role_id: Set(ADMIN_ROLE_ID),
            location_id: Set(HN_LOCATION_ID),
            status: Set(UserStatus::Active),
            date_of_birth: Set(NaiveDate::from_ymd_opt(1988, 3, 9).unwrap()),
            date_joined: Set(NaiveDate::from_ymd_opt(2020, 3, 2).unwrap()),
            is_first_login: Set(false),
            created_by: Set(None),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
        })
        .await
        .unwrap();
    api_key
}

#[tokio::test]
async fn listing_is_scoped_to_the_assigning_admins_location() {
    let app = spawn_app("returns-location").await;
    let fixture = seed(&app).await;

    let hanoi_key = insert_hanoi_admin(&app).await;
    let (status, body) = app
        .post(
            "/api/users",
            &hanoi_key,
            json!({
                "firstName": "Minh",
                "lastName": "Tran",
                "dateOfBirth": "1994-02-11",
                "dateJoined": "2024-06-17",
                "gender": "Male",
                "roleId": assetdesk::constants::seed::STAFF_ROLE_ID,
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let minh = body["data"]["username"].as_str().unwrap().to_string();
    let minh_key = app.api_key_of(&minh).await;
    let minh_id = user_id(&app, &minh).await;

    let asset = create_asset(
        &app,
        &hanoi_key,
        &fixture.category_id,
        "LA000004",
        "Thinkpad",
    )
    .await;
    let (_, hanoi_request) =
        assign_and_request_return(&app, &hanoi_key, asset, minh_id, &minh_key).await;

    let (_, body) = app.get(LIST, ADMIN_KEY).await;
    assert_eq!(body["totalCount"], 3);
    assert!(!data_field(&body, "assetCode").contains(&"LA000004"));

    let (_, body) = app.get(LIST, &hanoi_key).await;
    assert_eq!(body["totalCount"], 1);
    assert_eq!(data_field(&body, "id"), vec![hanoi_request.to_string()]);
    assert_eq!(data_field(&body, "requestedBy"), vec![minh.as_str()]);
}

#[tokio::test]
async fn huge_page_numbers_return_an_empty_page() {
    let app = spawn_app("returns-huge-page").await;
    seed(&app).await;

    let (status, body) = app
        .get(&format!("{LIST}?pageNumber={}", u64::MAX), ADMIN_KEY)
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["totalCount"], 3);
    assert_eq!(body["data"], json!([]));

    let (status, body) = app
        .get(
            &format!("/api/assets?pageNumber={}&pageSize=100", u64::MAX),
            ADMIN_KEY,
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["totalCount"], 3);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn accepting_an_unknown_assignment_is_not_found() {
    let app = spawn_app("returns-accept-unknown").await;
    let fixture = seed(&app).await;

    let (status, body) = app
        .send(
            "PUT",
            &format!("/api/assignments/{}/accept", Uuid::new_v4()),
            Some(&fixture.john_key),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Assignment not found");
}
