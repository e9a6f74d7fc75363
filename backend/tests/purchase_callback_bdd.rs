//! Behaviour tests for the purchase callback endpoint.
//!
//! Each scenario drives the real handler, service and in-memory adapters
//! through Actix's test service and inspects the stored session documents.

use std::cell::RefCell;
use std::sync::Arc;

use actix_web::test as actix_test;
use actix_web::{App, web};
use purchase_recorder::Trace;
use purchase_recorder::domain::{PurchaseRecorder, TRACE_ID_HEADER};
use purchase_recorder::inbound::http::callback::record_purchase;
use purchase_recorder::inbound::http::state::HttpState;
use purchase_recorder::inbound::http::validation::SessionParam;
use purchase_recorder::outbound::catalogue::InMemoryCatalogue;
use purchase_recorder::outbound::session::InMemorySessionStore;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::Value;

struct CallbackResponse {
    status: u16,
    body: Vec<u8>,
    trace_id: Option<String>,
}

struct PurchaseWorld {
    runtime: actix_rt::Runtime,
    catalogue: RefCell<InMemoryCatalogue>,
    sessions: RefCell<Arc<InMemorySessionStore>>,
    last_response: RefCell<Option<CallbackResponse>>,
}

impl PurchaseWorld {
    fn new() -> Self {
        Self {
            runtime: actix_rt::Runtime::new().expect("actix runtime should initialise"),
            catalogue: RefCell::new(InMemoryCatalogue::default()),
            sessions: RefCell::new(Arc::new(InMemorySessionStore::new(true))),
            last_response: RefCell::new(None),
        }
    }

    fn sessions(&self) -> Arc<InMemorySessionStore> {
        self.sessions.borrow().clone()
    }

    fn call(&self, query: &str) {
        let recorder = PurchaseRecorder::new(
            self.sessions(),
            Arc::new(self.catalogue.borrow().clone()),
        );
        let state = HttpState::new(Arc::new(recorder), SessionParam::default());
        let uri = format!("/callback?{query}");

        let response = self.runtime.block_on(async move {
            let app = actix_test::init_service(
                App::new()
                    .app_data(web::Data::new(state))
                    .wrap(Trace)
                    .service(record_purchase),
            )
            .await;
            let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri(&uri).to_request())
                .await;
            let status = res.status().as_u16();
            let trace_id = res
                .headers()
                .get(TRACE_ID_HEADER)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned);
            let body = actix_test::read_body(res).await.to_vec();
            CallbackResponse {
                status,
                body,
                trace_id,
            }
        });
        *self.last_response.borrow_mut() = Some(response);
    }

    fn with_response<F>(&self, f: F)
    where
        F: FnOnce(&CallbackResponse),
    {
        let response = self.last_response.borrow();
        f(response.as_ref().expect("a callback should have been made"));
    }

    fn stored(&self, id: &str) -> Option<String> {
        self.sessions().raw(id)
    }
}

fn parse_ids(raw: &str) -> Vec<u64> {
    raw.split(',')
        .map(|id| id.trim().parse().expect("step ids are integers"))
        .collect()
}

#[fixture]
fn world() -> PurchaseWorld {
    PurchaseWorld::new()
}

#[given("the catalogue contains items {ids}")]
fn the_catalogue_contains_items(world: &PurchaseWorld, ids: String) {
    *world.catalogue.borrow_mut() = InMemoryCatalogue::from_ids(parse_ids(&ids));
}

#[given("an empty stored session {id}")]
fn an_empty_stored_session(world: &PurchaseWorld, id: String) {
    world.sessions().insert_raw(id, "{}");
}

#[given("a stored session {id} with document {document}")]
fn a_stored_session_with_document(world: &PurchaseWorld, id: String, document: String) {
    world.sessions().insert_raw(id, document);
}

#[given("sessions are not created on demand")]
fn sessions_are_not_created_on_demand(world: &PurchaseWorld) {
    *world.sessions.borrow_mut() = Arc::new(InMemorySessionStore::new(false));
}

#[when("the provider calls back with \"{query}\"")]
fn the_provider_calls_back(world: &PurchaseWorld, query: String) {
    world.call(&query);
}

#[then("the response status is {status}")]
fn the_response_status_is(world: &PurchaseWorld, status: u16) {
    world.with_response(|response| {
        assert_eq!(response.status, status);
        assert!(response.trace_id.is_some(), "every response carries a trace id");
    });
}

#[then("the response has no body")]
fn the_response_has_no_body(world: &PurchaseWorld) {
    world.with_response(|response| assert!(response.body.is_empty()));
}

#[then("session {id} has purchased {ids}")]
fn session_has_purchased(world: &PurchaseWorld, id: String, ids: String) {
    let raw = world.stored(&id).expect("session should be stored");
    let document: Value = serde_json::from_str(&raw).expect("stored session is JSON");
    let purchased: Vec<u64> = document
        .get("purchased")
        .and_then(Value::as_array)
        .expect("purchased list")
        .iter()
        .filter_map(Value::as_u64)
        .collect();
    assert_eq!(purchased, parse_ids(&ids));
}

#[then("session {id} is stored as {document}")]
fn session_is_stored_as(world: &PurchaseWorld, id: String, document: String) {
    let raw = world.stored(&id).expect("session should be stored");
    match (
        serde_json::from_str::<Value>(&raw),
        serde_json::from_str::<Value>(&document),
    ) {
        (Ok(actual), Ok(expected)) => assert_eq!(actual, expected),
        _ => assert_eq!(raw, document),
    }
}

#[then("no session {id} is stored")]
fn no_session_is_stored(world: &PurchaseWorld, id: String) {
    assert!(world.stored(&id).is_none());
}

#[scenario(path = "tests/features/purchase_callback.feature")]
fn purchase_callback_scenarios(world: PurchaseWorld) {
    drop(world);
}
