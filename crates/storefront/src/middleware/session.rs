use crate::{abstract_trait::session::DynSessionStore, domain::response::session::Session};
use axum::{
    Extension,
    body::Body,
    http::{HeaderMap, HeaderValue, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use shared::errors::HttpError;
use tracing::{debug, error};

pub const SESSION_COOKIE: &str = "session_id";
pub const SESSION_HEADER: &str = "x-session-id";

/// Token presented by the client, cookie first, then the `X-Session-Id` header.
pub fn session_token(jar: &CookieJar, headers: &HeaderMap) -> Option<String> {
    jar.get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .or_else(|| {
            headers
                .get(SESSION_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        })
        .filter(|token| !token.is_empty())
}

pub fn session_cookie(session_id: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, session_id))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

async fn resolve(
    store: &DynSessionStore,
    jar: &CookieJar,
    headers: &HeaderMap,
) -> Result<Option<Session>, HttpError> {
    match session_token(jar, headers) {
        Some(token) => Ok(store.get_session(&token).await?),
        None => Ok(None),
    }
}

/// Attaches the caller's session, creating one (and setting the cookie) when absent.
pub async fn issue_session(
    Extension(store): Extension<DynSessionStore>,
    jar: CookieJar,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, HttpError> {
    let (session, created) = match resolve(&store, &jar, req.headers()).await? {
        Some(session) => (session, false),
        None => (store.create_session(None).await?, true),
    };

    let session_id = session.session_id.clone();
    req.extensions_mut().insert(session);

    let response = next.run(req).await;

    if !created {
        return Ok(response);
    }

    debug!("Issued new session cookie");

    let mut response = (jar.add(session_cookie(session_id.clone())), response).into_response();
    match HeaderValue::from_str(&session_id) {
        Ok(value) => {
            response.headers_mut().insert(SESSION_HEADER, value);
        }
        Err(e) => error!("Session id is not a valid header value: {e}"),
    }

    Ok(response)
}

/// Rejects the request with 404 `Session not found` unless a live session is presented.
pub async fn require_session(
    Extension(store): Extension<DynSessionStore>,
    jar: CookieJar,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, HttpError> {
    let session = resolve(&store, &jar, req.headers())
        .await?
        .ok_or_else(|| HttpError::NotFound("Session not found".into()))?;

    req.extensions_mut().insert(session);

    Ok(next.run(req).await)
}
