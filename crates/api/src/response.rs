//! `AppError` already implements `IntoResponse`, rendering `{error,
//! message}` JSON at the status code from `status_code()`. Handlers return
//! `Result<Json<T>, AppError>` directly; this module only carries the
//! alias so call sites read the same as the teacher's `ApiError`.

use boxoffice_types::AppError;

pub type ApiError = AppError;
