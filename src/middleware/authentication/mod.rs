//! Request authentication. Every request leaves the middleware with a
//! `GateState` extension; signed-in requests also carry `Arc<SessionUser>`
//! and their `AccessToken`.

mod getheader;
mod manager;
mod manager_middleware;
mod method;
mod token_cache;

pub use getheader::*;
pub use manager::*;
pub use manager_middleware::*;
pub use token_cache::*;

use std::fmt;

/// Cookie set by `POST /auth/signin` and read back on later requests.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// The caller's bearer token, kept so handlers can act on the user's behalf.
#[derive(Clone)]
pub struct AccessToken(pub String);

impl AccessToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}
