//! Request body extractor with validation.

use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// Like [`Json`], but also runs [`Validate::validate`] and maps every
/// failure onto [`AppError`]: malformed bodies become `BAD_REQUEST`, rule
/// violations become `VALIDATION_ERROR`.
///
/// ```ignore
/// async fn create(ValidJson(input): ValidJson<CreateClient>) -> AppResult<...>
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        value.validate()?;
        Ok(ValidJson(value))
    }
}
