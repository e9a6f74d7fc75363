//! Purchase callback handler.
//!
//! ```text
//! GET /callback?<session-param>=<id>&items=3,7,99
//! ```
//!
//! Invoked out-of-band by the payment provider. Responses never carry a
//! body: 200 on success, 400 for a malformed query, 500 when the session
//! cannot be resumed or saved.

use actix_web::{HttpRequest, HttpResponse, get, web};
use tracing::info;

use crate::domain::ports::RecordPurchaseRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{CallbackQuery, parse_callback_query};

/// Record the items a client paid for in the session named by the query.
#[utoipa::path(
    get,
    path = "/callback",
    params(
        ("sessionId" = String, Query, description = "Session to resume; the parameter name is configurable"),
        ("items" = String, Query, description = "Comma-separated item ids matching ^(?:\\d+,)*\\d+$")
    ),
    responses(
        (status = 200, description = "Items recorded; unknown ids are ignored"),
        (status = 400, description = "Missing or malformed session id or items"),
        (status = 500, description = "Session could not be resumed or saved")
    ),
    tags = ["purchases"],
    operation_id = "recordPurchase",
    security([])
)]
#[get("/callback")]
pub async fn record_purchase(
    state: web::Data<HttpState>,
    request: HttpRequest,
) -> ApiResult<HttpResponse> {
    let CallbackQuery { session_id, items } =
        parse_callback_query(request.query_string(), &state.session_param)?;
    let requested = items.len();

    let response = state
        .purchases
        .record_purchase(RecordPurchaseRequest { session_id, items })
        .await?;

    info!(
        requested,
        accepted = response.accepted.len(),
        ignored = response.ignored,
        "purchase recorded"
    );
    Ok(HttpResponse::Ok().finish())
}

#[cfg(test)]
#[path = "callback_tests.rs"]
mod tests;
