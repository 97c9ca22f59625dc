use axum::{
    body::Bytes,
    extract::State,
    http::{
        HeaderMap, Method, StatusCode, Uri,
        header::{CONTENT_TYPE, ORIGIN},
    },
    response::Response,
};
use tracing::{Span, debug, field, info, instrument};
use url::form_urlencoded;

use super::{AppState, response};
use crate::verify::{self, DnsLookup};

pub(crate) const DOMAIN_FIELD: &str = "domain";
const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

#[instrument(name = "verify_domain", skip_all, fields(method = %method, domain = field::Empty))]
pub(crate) async fn verify_domain<R>(
    State(state): State<AppState<R>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response
where
    R: DnsLookup + 'static,
{
    let origin = headers.get(ORIGIN);

    if method != Method::POST {
        debug!("rejected: method not allowed");
        return response::plain_error(
            origin,
            StatusCode::METHOD_NOT_ALLOWED,
            "Invalid request method",
        );
    }

    let raw = form_value(uri.query(), &headers, &body, DOMAIN_FIELD).unwrap_or_default();
    let domain = raw.trim();
    if domain.is_empty() {
        debug!("rejected: empty domain");
        return response::plain_error(origin, StatusCode::BAD_REQUEST, "Domain is required");
    }
    Span::current().record("domain", domain);

    let result = verify::verify_domain(state.resolver(), domain).await;
    info!(
        has_mx = result.has_mx,
        has_spf = result.has_spf,
        has_dmarc = result.has_dmarc,
        complete = result.is_complete(),
        "domain verified"
    );

    response::json(origin, StatusCode::OK, &result)
}

/// Value of `key` as a form lookup sees it: fields of a form-encoded body
/// first, then the URL query. First occurrence wins.
pub(crate) fn form_value(
    query: Option<&str>,
    headers: &HeaderMap,
    body: &[u8],
    key: &str,
) -> Option<String> {
    if is_form_urlencoded(headers) {
        if let Some(value) = first_value(body, key) {
            return Some(value);
        }
    }
    query.and_then(|query| first_value(query.as_bytes(), key))
}

fn first_value(input: &[u8], key: &str) -> Option<String> {
    form_urlencoded::parse(input)
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.into_owned())
}

fn is_form_urlencoded(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| mime.trim().eq_ignore_ascii_case(FORM_URLENCODED))
        .unwrap_or(false)
}
