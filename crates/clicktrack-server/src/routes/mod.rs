pub mod api;
pub mod campaigns;
pub mod docs;
pub mod emails_sent;
pub mod event;
pub mod health;
pub mod offers;

use axum::{
    extract::{
        rejection::{FormRejection, PathRejection},
        Path,
    },
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Redirect, Response},
};

use crate::error::AppError;

/// Unwrap an integer path id, turning a malformed segment into a 422.
pub(crate) fn path_id(
    path: Result<Path<i64>, PathRejection>,
    field: &'static str,
) -> Result<i64, AppError> {
    path.map(|Path(id)| id)
        .map_err(|e| AppError::validation(field, e.body_text()))
}

/// A form body that is missing fields or is not urlencoded.
pub(crate) fn form_error(e: FormRejection) -> AppError {
    AppError::Validation {
        message: e.body_text(),
        field: None,
    }
}

/// Answer a successful form post.
///
/// htmx requests get an empty 200 with `HX-Redirect`, plain browser posts a
/// `303 See Other`.
pub(crate) fn redirect_after_post(headers: &HeaderMap, target: &str) -> Response {
    if headers.contains_key("hx-request") {
        match HeaderValue::from_str(target) {
            Ok(value) => (StatusCode::OK, [("hx-redirect", value)]).into_response(),
            Err(_) => Redirect::to(target).into_response(),
        }
    } else {
        Redirect::to(target).into_response()
    }
}

/// `None` for absent or whitespace-only form/query values.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse a required offer selector value.
///
/// Blank means nothing was selected (400); a non-integer is malformed (422).
pub(crate) fn parse_offer_id(value: Option<String>) -> Result<i64, AppError> {
    let raw = non_blank(value).ok_or_else(|| AppError::BadRequest("Offer is required".to_string()))?;
    raw.parse::<i64>()
        .map_err(|_| AppError::validation("offer_id", format!("offer_id must be an integer, got {raw:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirect_uses_hx_header_for_htmx() {
        let mut headers = HeaderMap::new();
        headers.insert("HX-Request", HeaderValue::from_static("true"));
        let response = redirect_after_post(&headers, "/campaign/3");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["hx-redirect"], "/campaign/3");

        let response = redirect_after_post(&HeaderMap::new(), "/campaign/3");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()["location"], "/campaign/3");
    }

    #[test]
    fn offer_id_parsing() {
        assert!(matches!(parse_offer_id(None), Err(AppError::BadRequest(_))));
        assert!(matches!(
            parse_offer_id(Some("  ".into())),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            parse_offer_id(Some("abc".into())),
            Err(AppError::Validation { .. })
        ));
        assert_eq!(parse_offer_id(Some("7".into())).ok(), Some(7));
    }
}
