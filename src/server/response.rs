use axum::{
    http::{
        HeaderMap, HeaderValue, StatusCode,
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE, X_CONTENT_TYPE_OPTIONS,
        },
    },
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::warn;

/// Reflects any non-empty `Origin`; there is no allow-list.
pub(crate) fn apply_cors(headers: &mut HeaderMap, origin: Option<&HeaderValue>) {
    if let Some(origin) = origin.filter(|value| !value.is_empty()) {
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin.clone());
    }
    headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static("POST"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
}

/// JSON body terminated by a newline. An encoding failure still sends the
/// status line, with an empty body.
pub(crate) fn json<T>(origin: Option<&HeaderValue>, status: StatusCode, data: &T) -> Response
where
    T: Serialize,
{
    let body = match serde_json::to_vec(data) {
        Ok(mut bytes) => {
            bytes.push(b'\n');
            bytes
        }
        Err(err) => {
            warn!(error = %err, "failed to encode response body");
            Vec::new()
        }
    };

    let mut response = (status, body).into_response();
    let headers = response.headers_mut();
    apply_cors(headers, origin);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}

pub(crate) fn plain_error(
    origin: Option<&HeaderValue>,
    status: StatusCode,
    message: &str,
) -> Response {
    let mut response = (status, format!("{message}\n")).into_response();
    let headers = response.headers_mut();
    apply_cors(headers, origin);
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cors_echoes_origin() {
        let mut headers = HeaderMap::new();
        let origin = HeaderValue::from_static("https://app.example.com");
        apply_cors(&mut headers, Some(&origin));
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "https://app.example.com");
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_METHODS], "POST");
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
    }

    #[test]
    fn cors_skips_missing_or_empty_origin() {
        let mut headers = HeaderMap::new();
        apply_cors(&mut headers, None);
        assert!(!headers.contains_key(ACCESS_CONTROL_ALLOW_ORIGIN));

        let empty = HeaderValue::from_static("");
        apply_cors(&mut headers, Some(&empty));
        assert!(!headers.contains_key(ACCESS_CONTROL_ALLOW_ORIGIN));
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_METHODS], "POST");
    }

    #[test]
    fn json_response_sets_content_type_and_status() {
        let response = json(None, StatusCode::OK, &serde_json::json!({"ok": true}));
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn plain_error_is_text() {
        let response = plain_error(None, StatusCode::BAD_REQUEST, "Domain is required");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()[CONTENT_TYPE], "text/plain; charset=utf-8");
        assert_eq!(response.headers()[X_CONTENT_TYPE_OPTIONS], "nosniff");
    }
}
