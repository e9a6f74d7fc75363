//! End-to-end checks of the callback endpoint wired to in-memory adapters.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use purchase_recorder::Trace;
use purchase_recorder::domain::PurchaseRecorder;
use purchase_recorder::inbound::http::callback::record_purchase;
use purchase_recorder::inbound::http::health::{HealthState, live, ready};
use purchase_recorder::inbound::http::state::HttpState;
use purchase_recorder::inbound::http::validation::SessionParam;
use purchase_recorder::outbound::catalogue::InMemoryCatalogue;
use purchase_recorder::outbound::session::InMemorySessionStore;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

#[fixture]
fn sessions() -> Arc<InMemorySessionStore> {
    Arc::new(InMemorySessionStore::new(true))
}

fn state(sessions: Arc<InMemorySessionStore>, param: SessionParam) -> web::Data<HttpState> {
    let catalogue = InMemoryCatalogue::from_json_str(r#"[{"id": 3}, {"id": 7}]"#)
        .expect("catalogue fixture parses");
    let recorder = PurchaseRecorder::new(sessions, Arc::new(catalogue));
    web::Data::new(HttpState::new(Arc::new(recorder), param))
}

fn stored(sessions: &InMemorySessionStore, id: &str) -> Value {
    let raw = sessions.raw(id).expect("session stored");
    serde_json::from_str(&raw).expect("stored session is JSON")
}

#[rstest]
#[actix_web::test]
async fn configured_session_parameter_is_honoured(sessions: Arc<InMemorySessionStore>) {
    let param = SessionParam::new("PHPSESSID").expect("valid parameter name");
    let app = test::init_service(
        App::new()
            .app_data(state(sessions.clone(), param))
            .wrap(Trace)
            .service(record_purchase),
    )
    .await;

    let ok = test::TestRequest::get()
        .uri("/callback?PHPSESSID=s1&items=7,3")
        .to_request();
    assert_eq!(test::call_service(&app, ok).await.status(), StatusCode::OK);
    assert_eq!(stored(&sessions, "s1"), json!({"purchased": [7, 3]}));

    let wrong_name = test::TestRequest::get()
        .uri("/callback?sessionId=s2&items=7")
        .to_request();
    assert_eq!(
        test::call_service(&app, wrong_name).await.status(),
        StatusCode::BAD_REQUEST
    );
    assert!(sessions.raw("s2").is_none());
}

#[rstest]
#[actix_web::test]
async fn sessions_are_isolated_by_identifier(sessions: Arc<InMemorySessionStore>) {
    sessions.insert_raw("a", r#"{"purchased":[3]}"#);
    let app = test::init_service(
        App::new()
            .app_data(state(sessions.clone(), SessionParam::default()))
            .service(record_purchase),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/callback?sessionId=b&items=7")
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    assert_eq!(stored(&sessions, "a"), json!({"purchased": [3]}));
    assert_eq!(stored(&sessions, "b"), json!({"purchased": [7]}));
}

#[rstest]
#[actix_web::test]
async fn percent_encoded_identifiers_are_decoded(sessions: Arc<InMemorySessionStore>) {
    let app = test::init_service(
        App::new()
            .app_data(state(sessions.clone(), SessionParam::default()))
            .service(record_purchase),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/callback?sessionId=a%2Fb&items=3%2C7")
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    assert_eq!(stored(&sessions, "a/b"), json!({"purchased": [3, 7]}));
}

#[actix_web::test]
async fn health_probes_follow_readiness() {
    let health = web::Data::new(HealthState::new());
    let app = test::init_service(
        App::new()
            .app_data(health.clone())
            .service(ready)
            .service(live),
    )
    .await;

    let get = |uri: &'static str| test::TestRequest::get().uri(uri).to_request();
    assert_eq!(
        test::call_service(&app, get("/health/ready")).await.status(),
        StatusCode::SERVICE_UNAVAILABLE
    );
    health.mark_ready();
    assert_eq!(
        test::call_service(&app, get("/health/ready")).await.status(),
        StatusCode::OK
    );
    assert_eq!(
        test::call_service(&app, get("/health/live")).await.status(),
        StatusCode::OK
    );
}
