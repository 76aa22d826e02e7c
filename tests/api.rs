use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use capstone_events::auth::USER_EMAIL_HEADER;
use capstone_events::config::Config;
use capstone_events::models::{Individual, Organization};
use capstone_events::routes::create_routes;
use capstone_events::store::{Repository, Stores};
use capstone_events::AppState;

const ORGANIZER: &str = "org@x.com";
const ATTENDEE: &str = "ann@x.com";

async fn app() -> Router {
    let stores = Stores::memory();
    stores
        .organizations
        .save(Organization::new(ORGANIZER, "Parks Club"))
        .await
        .unwrap();
    stores
        .individuals
        .save(Individual::new(ATTENDEE, "Ann", "Lee"))
        .await
        .unwrap();
    create_routes(AppState::new(&stores), &Config::default())
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_form(uri: &str, user: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(email) = user {
        builder = builder.header(USER_EMAIL_HEADER, email);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

const PICNIC: &str = "eventTitle=Picnic&eventDateTime=2020-06-01T10%3A00\
    &eventDescription=Lunch+in+the+park&eventLatitude=45.0&eventLongitude=-73.0&event-id=";

async fn create_picnic(app: &Router) -> i64 {
    let (status, body) = send(app, post_form("/save-event", Some(ORGANIZER), PICNIC)).await;
    assert_eq!(status, StatusCode::OK);
    body["data"]["datastoreId"].as_i64().unwrap()
}

#[tokio::test]
async fn health_check_responds() {
    let app = app().await;
    let (status, body) = send(&app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ok");
}

#[tokio::test]
async fn save_event_creates_owned_event() {
    let app = app().await;

    let (status, body) = send(&app, post_form("/save-event", Some(ORGANIZER), PICNIC)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let event = &body["data"];
    assert_eq!(event["eventTitle"], "Picnic");
    assert_eq!(event["eventDateTime"], "2020-06-01T10:00");
    assert_eq!(event["organizationName"], "Parks Club");
    assert_eq!(event["foodAvailable"], false);
    assert_eq!(event["requiredFee"], false);

    let (_, all) = send(&app, get("/get-all-events")).await;
    assert_eq!(all["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn save_event_updates_in_place() {
    let app = app().await;
    let id = create_picnic(&app).await;

    let update = format!(
        "eventTitle=Picnic+moved&eventDateTime=2020-06-02T10%3A00&eventDescription=Rain+date\
         &eventLatitude=46.0&eventLongitude=-72.0&foodAvailable=on&requiredFee=true&event-id={id}"
    );
    let (status, body) = send(&app, post_form("/save-event", Some(ORGANIZER), &update)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["datastoreId"], id);
    assert_eq!(body["data"]["eventTitle"], "Picnic moved");
    assert_eq!(body["data"]["foodAvailable"], false);
    assert_eq!(body["data"]["requiredFee"], false);

    let (_, all) = send(&app, get("/get-all-events")).await;
    assert_eq!(all["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn save_event_rejects_bad_latitude() {
    let app = app().await;
    let body = PICNIC.replace("eventLatitude=45.0", "eventLatitude=north");

    let (status, response) = send(&app, post_form("/save-event", Some(ORGANIZER), &body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"]["code"], "VALIDATION_ERROR");
    let (_, all) = send(&app, get("/get-all-events")).await;
    assert!(all["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn save_event_requires_identity_and_organization() {
    let app = app().await;

    let (status, body) = send(&app, post_form("/save-event", None, PICNIC)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "AUTH_ERROR");

    let (status, body) = send(&app, post_form("/save-event", Some(ATTENDEE), PICNIC)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "FORBIDDEN");
}

#[tokio::test]
async fn save_event_rejects_missing_fields() {
    let app = app().await;

    let (status, body) = send(&app, post_form("/save-event", Some(ORGANIZER), "eventTitle=x")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn get_event_distinguishes_missing_from_malformed() {
    let app = app().await;
    let id = create_picnic(&app).await;

    let (status, body) = send(&app, get(&format!("/get-event?event-id={id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["eventTitle"], "Picnic");

    let (status, _) = send(&app, get("/get-event?event-id=999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, get("/get-event?event-id=abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, get("/get-event")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn new_review_returns_full_list() {
    let app = app().await;
    let id = create_picnic(&app).await;

    let form = format!("text=Lovely&eventId={id}");
    send(&app, post_form("/new-review", Some(ATTENDEE), &form)).await;
    let form = format!("text=Great%21&eventId={id}");
    let (status, body) = send(&app, post_form("/new-review", Some(ATTENDEE), &form)).await;

    assert_eq!(status, StatusCode::OK);
    let reviews = body["data"].as_array().unwrap();
    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews[0]["text"], "Lovely");
    assert_eq!(reviews[1]["individualName"], "Ann Lee");
    assert_eq!(reviews[1]["individualEmail"], ATTENDEE);
    assert_eq!(reviews[1]["text"], "Great!");
}

#[tokio::test]
async fn new_review_errors() {
    let app = app().await;
    let id = create_picnic(&app).await;

    let (status, _) = send(
        &app,
        post_form("/new-review", Some(ATTENDEE), "text=Hi&eventId=999"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        post_form("/new-review", Some(ATTENDEE), "text=Hi&eventId=abc"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let form = format!("text=Hi&eventId={id}");
    let (status, _) = send(&app, post_form("/new-review", Some("ghost@x.com"), &form)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, get(&format!("/get-event?event-id={id}"))).await;
    assert!(body["data"]["reviews"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn responses_carry_security_and_request_id_headers() {
    let app = app().await;
    let response = app.oneshot(get("/health")).await.unwrap();

    let headers = response.headers();
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert!(headers.contains_key("x-request-id"));
}
