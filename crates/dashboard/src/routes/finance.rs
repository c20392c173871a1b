//! Credit score, microloans and mobile-money payment methods.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};
use tracing::instrument;

use crate::{
    error::AppError,
    middleware::RequireSession,
    models::{CreditScore, LoanRequest, MicroloanApplication, NewPaymentMethod, PaymentMethod},
    services::FinanceService,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/finance/credit-score", get(credit_score))
        .route("/api/finance/loans", get(list_loans).post(apply_for_loan))
        .route(
            "/api/finance/payment-methods",
            get(list_payment_methods).post(connect_payment_method),
        )
}

/// Current business credit score.
#[instrument(skip_all)]
pub async fn credit_score(
    RequireSession(_user): RequireSession,
    State(state): State<AppState>,
) -> Json<CreditScore> {
    Json(FinanceService::new(state.store()).credit_score().await)
}

/// Past microloan applications.
///
/// # Errors
///
/// Returns 500 if applications cannot be read.
#[instrument(skip_all)]
pub async fn list_loans(
    RequireSession(_user): RequireSession,
    State(state): State<AppState>,
) -> Result<Json<Vec<MicroloanApplication>>, AppError> {
    Ok(Json(state.store().microloans().list().await?))
}

/// Apply for a microloan. A rejected application is still recorded.
///
/// # Errors
///
/// Returns 400 if the request fails validation.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn apply_for_loan(
    RequireSession(user): RequireSession,
    State(state): State<AppState>,
    Json(request): Json<LoanRequest>,
) -> Result<(StatusCode, Json<MicroloanApplication>), AppError> {
    let application = FinanceService::new(state.store())
        .apply_for_loan(request)
        .await?;
    Ok((StatusCode::CREATED, Json(application)))
}

/// Connected payment methods.
///
/// # Errors
///
/// Returns 500 if payment methods cannot be read.
#[instrument(skip_all)]
pub async fn list_payment_methods(
    RequireSession(_user): RequireSession,
    State(state): State<AppState>,
) -> Result<Json<Vec<PaymentMethod>>, AppError> {
    Ok(Json(state.store().payment_methods().list().await?))
}

/// Connect an M-Pesa or Airtel Money account.
///
/// # Errors
///
/// Returns 400 if the phone number or account name is blank.
#[instrument(skip_all)]
pub async fn connect_payment_method(
    RequireSession(_user): RequireSession,
    State(state): State<AppState>,
    Json(body): Json<NewPaymentMethod>,
) -> Result<(StatusCode, Json<PaymentMethod>), AppError> {
    let method = state.store().payment_methods().connect(body).await?;
    Ok((StatusCode::CREATED, Json(method)))
}
