use std::sync::Arc;

use axum::extract::rejection::{FormRejection, JsonRejection, QueryRejection};
use axum::extract::{Form, Path, Query, RawQuery, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::error::ApiError;
use crate::dto::{AccountResponse, CreateAccountRequest, TransferParams};
use crate::Engine;

pub type ApiResult<T> = Result<T, ApiError>;

/// POST /v1/accounts
pub async fn create_account(
    State(engine): State<Arc<Engine>>,
    payload: Result<Json<CreateAccountRequest>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!("account creation rejected: {}", rejection.body_text());
        ApiError::validation(rejection.body_text())
    })?;
    tracing::info!(id = %request.id, balance = %request.balance, "Creating account");
    if request.id.is_empty() {
        return Err(ApiError::validation("Account id must not be empty"));
    }

    engine.create_account(request.into()).map_err(|err| {
        tracing::warn!("account creation rejected: {}", err);
        ApiError::from(err)
    })?;
    Ok(StatusCode::CREATED)
}

/// GET /v1/accounts/{id}
///
/// An unknown id yields `200` with an empty body.
pub async fn get_account(
    State(engine): State<Arc<Engine>>,
    Path(account_id): Path<String>,
) -> Response {
    tracing::info!(id = %account_id, "Retrieving account");
    match engine.get_account(&account_id) {
        Some(account) => Json(AccountResponse::from(account)).into_response(),
        None => StatusCode::OK.into_response(),
    }
}

/// POST /v1/accounts/transfers
///
/// Parameters come from the query string, or from a form body if the query
/// string is empty.
pub async fn transfer_money(
    State(engine): State<Arc<Engine>>,
    RawQuery(raw_query): RawQuery,
    query: Result<Query<TransferParams>, QueryRejection>,
    form: Result<Form<TransferParams>, FormRejection>,
) -> ApiResult<StatusCode> {
    let params = match (query, raw_query.filter(|raw| !raw.is_empty())) {
        (Ok(Query(params)), _) => params,
        (Err(rejection), Some(_)) => return Err(ApiError::validation(rejection.body_text())),
        (Err(_), None) => match form {
            Ok(Form(params)) => params,
            Err(FormRejection::InvalidFormContentType(_)) => {
                return Err(ApiError::validation(
                    "accountFrom, accountTo and amount are required",
                ))
            }
            Err(rejection) => return Err(ApiError::validation(rejection.body_text())),
        },
    };
    tracing::info!(
        from = %params.account_from,
        to = %params.account_to,
        amount = %params.amount,
        "Transferring money"
    );

    let amount = params.amount()?;
    engine.transfer_money(&params.account_from, &params.account_to, amount)?;
    Ok(StatusCode::OK)
}

/// GET /health
pub async fn health() -> &'static str {
    "ok"
}
