use axum::http::HeaderMap;

use backend_domain::RuntimeConfig;

/// Read routes are open unless an `api_token` is configured.
pub fn authorize(config: &RuntimeConfig, headers: &HeaderMap) -> bool {
    match &config.api_token {
        Some(api_token) => bearer_matches(headers, api_token),
        None => true,
    }
}

/// Destructive routes stay closed until an `api_token` is configured.
pub fn authorize_admin(config: &RuntimeConfig, headers: &HeaderMap) -> bool {
    config
        .api_token
        .as_deref()
        .map(|api_token| bearer_matches(headers, api_token))
        .unwrap_or(false)
}

fn bearer_matches(headers: &HeaderMap, api_token: &str) -> bool {
    extract_bearer(headers)
        .map(|token| token == api_token)
        .unwrap_or(false)
}

fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    let value = headers.get("Authorization")?.to_str().ok()?.trim();
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}
