use crate::middleware::authentication::get_header;
use actix_web::dev::ServiceRequest;

fn try_extract_token(authentication: String) -> Result<String, String> {
    let mut authentication_parts = authentication.splitn(2, ' ');
    match authentication_parts.next() {
        Some(scheme) if scheme.eq_ignore_ascii_case("bearer") => {}
        _ => return Err("Bearer missing scheme".to_string()),
    }

    match authentication_parts.next().map(str::trim) {
        Some(token) if !token.is_empty() => Ok(token.to_string()),
        _ => {
            tracing::error!("Bearer token is missing");
            Err("Authentication required".to_string())
        }
    }
}

#[tracing::instrument(name = "Authenticate with bearer token", skip(req))]
pub async fn try_oauth(req: &mut ServiceRequest) -> Result<bool, String> {
    let authentication = match get_header::<String>(req, "authorization")? {
        Some(value) => value,
        None => return Ok(false),
    };

    let token = try_extract_token(authentication)?;
    super::authenticate(req, token).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(try_extract_token("Bearer abc".to_string()), Ok("abc".to_string()));
        assert_eq!(try_extract_token("bearer abc".to_string()), Ok("abc".to_string()));
    }

    #[test]
    fn rejects_other_schemes_and_empty_tokens() {
        assert!(try_extract_token("Basic dXNlcjpwYXNz".to_string()).is_err());
        assert!(try_extract_token("Bearer ".to_string()).is_err());
        assert!(try_extract_token("Bearer".to_string()).is_err());
    }
}
