//! User registration handlers

use axum::{extract::State, Json};
use chatstream_service::dto::{RegisterRequest, RegistrationPendingResponse, UserResponse, VerifyRequest};
use chatstream_service::RegistrationService;

use crate::extractors::ValidatedJson;
use crate::response::{Accepted, ApiResult, Created};
use crate::state::AppState;

/// Start a registration; the verification link is mailed
///
/// POST /api/users/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Accepted<Json<RegistrationPendingResponse>>> {
    let service = RegistrationService::new(state.service_context());
    let response = service.register(request).await?;
    Ok(Accepted(Json(response)))
}

/// Redeem a verification token
///
/// POST /api/users/verify
pub async fn verify(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<VerifyRequest>,
) -> ApiResult<Created<Json<UserResponse>>> {
    let service = RegistrationService::new(state.service_context());
    let response = service.verify(request).await?;
    Ok(Created(Json(response)))
}
