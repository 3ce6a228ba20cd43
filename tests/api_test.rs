use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, NaiveDate, Utc};
use serde_json::json;
use std::sync::Arc;
use study_room_booking::adapters::memory::{BookingLedger, RoomDirectory};
use study_room_booking::api::handlers::AppState;
use study_room_booking::api::router::create_router;
use study_room_booking::api::types::*;
use study_room_booking::application::booking::ServiceDependencies;
use study_room_booking::domain::{BookingCode, Room, RoomId};
use tower::ServiceExt;

// ============================================================================
// テスト用のヘルパー関数
// ============================================================================

/// インメモリのアダプターでルーターを組み立てる
fn setup_app(rooms: Vec<Room>) -> (axum::Router, Arc<BookingLedger>) {
    let ledger = Arc::new(BookingLedger::new());
    let service_deps =
        ServiceDependencies::new(Arc::new(RoomDirectory::with_rooms(rooms)), ledger.clone());

    let app_state = Arc::new(AppState { service_deps });

    (create_router(app_state), ledger)
}

fn michigan() -> Room {
    Room::new(RoomId::new(10), "Michigan", "A202")
}

fn future_date() -> NaiveDate {
    Utc::now().date_naive() + Duration::days(30)
}

fn post_booking(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/bookings")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn read_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn booking_body(first_name: &str, date: NaiveDate) -> serde_json::Value {
    json!({
        "first_name": first_name,
        "last_name": "Spark",
        "email": "ben@gmail.com",
        "date": date,
    })
}

// ============================================================================
// POST /bookings
// ============================================================================

#[tokio::test]
async fn test_create_booking_success_returns_created() {
    let (app, ledger) = setup_app(vec![michigan()]);
    let date = future_date();

    let response = app
        .oneshot(post_booking(booking_body("Ben", date)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let result: BookingResultResponse = read_json(response).await;
    assert_eq!(result.code, BookingCode::Success);
    assert_eq!(result.message, BOOKING_CONFIRMED_MESSAGE);
    assert_eq!(result.booking_id, Some(1));
    assert_eq!(result.first_name, "Ben");
    assert_eq!(result.last_name, "Spark");
    assert_eq!(result.email, "ben@gmail.com");
    assert_eq!(result.date, date);
    assert_eq!(ledger.len(), 1);
}

#[tokio::test]
async fn test_create_booking_when_full_returns_conflict() {
    let (app, ledger) = setup_app(vec![michigan()]);
    let date = future_date();

    let first = app
        .clone()
        .oneshot(post_booking(booking_body("Ben", date)))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .oneshot(post_booking(booking_body("Ann", date)))
        .await
        .unwrap();

    assert_eq!(second.status(), StatusCode::CONFLICT);
    let result: BookingResultResponse = read_json(second).await;
    assert_eq!(result.code, BookingCode::NoRoomAvailable);
    assert_eq!(result.message, NO_ROOM_AVAILABLE_MESSAGE);
    assert_eq!(result.booking_id, None);
    assert_eq!(result.first_name, "Ann");
    assert_eq!(ledger.len(), 1);
}

#[tokio::test]
async fn test_create_booking_with_null_body_returns_bad_request() {
    let (app, ledger) = setup_app(vec![michigan()]);

    let response = app.oneshot(post_booking(json!(null))).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.error, "INVALID_ARGUMENT");
    assert!(error.message.contains("'request'"));
    assert!(ledger.is_empty());
}

#[tokio::test]
async fn test_create_booking_with_past_date_is_rejected() {
    let (app, ledger) = setup_app(vec![michigan()]);
    let yesterday = Utc::now().date_naive() - Duration::days(1);

    let response = app
        .oneshot(post_booking(booking_body("Ben", yesterday)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.error, "VALIDATION_FAILED");
    assert_eq!(error.details.len(), 1);
    assert_eq!(error.details[0].field, "date");
    assert_eq!(error.details[0].message, "Date must be in the future");
    assert!(ledger.is_empty());
}

#[tokio::test]
async fn test_create_booking_reports_every_invalid_field() {
    let (app, ledger) = setup_app(vec![michigan()]);

    let response = app
        .oneshot(post_booking(json!({
            "first_name": "",
            "last_name": "Spark",
            "email": "not-an-email",
            "date": future_date(),
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let error: ErrorResponse = read_json(response).await;
    let fields: Vec<&str> = error.details.iter().map(|d| d.field.as_str()).collect();
    assert_eq!(fields, vec!["first_name", "email"]);
    assert!(ledger.is_empty());
}

// ============================================================================
// GET /bookings, GET /rooms
// ============================================================================

#[tokio::test]
async fn test_list_bookings_with_and_without_date_filter() {
    let (app, _ledger) = setup_app(vec![michigan(), Room::new(RoomId::new(11), "Oregon", "A203")]);
    let first_day = future_date();
    let second_day = first_day + Duration::days(1);

    for (name, date) in [("Ben", first_day), ("Ann", first_day), ("Joe", second_day)] {
        let response = app
            .clone()
            .oneshot(post_booking(booking_body(name, date)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app.clone().oneshot(get("/bookings")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let all: Vec<BookingResponse> = read_json(response).await;
    assert_eq!(all.len(), 3);

    let response = app
        .oneshot(get(&format!("/bookings?date={first_day}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let filtered: Vec<BookingResponse> = read_json(response).await;
    assert_eq!(filtered.len(), 2);
    assert!(filtered.iter().all(|b| b.date == first_day));
    let rooms: Vec<i32> = filtered.iter().map(|b| b.study_room_id).collect();
    assert_eq!(rooms, vec![10, 11]);
}

#[tokio::test]
async fn test_list_rooms_returns_directory() {
    let (app, _ledger) = setup_app(vec![michigan()]);

    let response = app.oneshot(get("/rooms")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let rooms: Vec<RoomResponse> = read_json(response).await;
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0].id, 10);
    assert_eq!(rooms[0].room_name, "Michigan");
    assert_eq!(rooms[0].room_number, "A202");
}

#[tokio::test]
async fn test_health_check() {
    let (app, _ledger) = setup_app(Vec::new());

    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
