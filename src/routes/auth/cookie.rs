use crate::middleware::authentication::ACCESS_TOKEN_COOKIE;
use crate::models::Session;
use actix_web::cookie::{time::Duration, Cookie, SameSite};

pub(super) fn session_cookie(session: &Session) -> Cookie<'static> {
    Cookie::build(ACCESS_TOKEN_COOKIE, session.access_token.clone())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(session.expires_in()))
        .finish()
}

pub(super) fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(ACCESS_TOKEN_COOKIE, "")
        .path("/")
        .http_only(true)
        .finish();
    cookie.make_removal();
    cookie
}
