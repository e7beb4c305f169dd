use axum::response::{IntoResponse, Redirect, Response};
use classlog_api_types::FlashLevel;

/// 303 redirect to the listing view carrying a transient status message on
/// the query string.
pub fn redirect_with_flash(level: FlashLevel, message: &str) -> Response {
    let target = format!(
        "/?flash={}&flash_level={}",
        urlencoding::encode(message),
        level.as_str()
    );
    Redirect::to(&target).into_response()
}

/// 303 redirect to the listing view with no message.
pub fn redirect_home() -> Response {
    Redirect::to("/").into_response()
}
