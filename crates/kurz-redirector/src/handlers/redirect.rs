use crate::error::{RedirectError, Result};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use kurz_core::ShortCode;
use tracing::{info, warn};

/// Redirects `GET /<key>` to the stored URL and counts the hit.
///
/// Keys are looked up as-is so that hand-edited store entries stay reachable.
pub async fn redirect_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
) -> Result<Response> {
    let code = ShortCode::new_unchecked(key);

    let Some(record) = state.mapping().lookup_and_touch(&code).await? else {
        warn!(code = %code, "short code not found");
        return Err(RedirectError::NotFound);
    };

    let location = HeaderValue::try_from(record.url.as_str())
        .map_err(|_| RedirectError::InvalidLocation(code.to_string()))?;

    info!(code = %code, url = %record.url, used = record.used, "redirecting");
    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response())
}

pub async fn not_found_handler() -> RedirectError {
    RedirectError::NotFound
}
