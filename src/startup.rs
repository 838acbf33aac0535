use crate::configuration::Settings;
use crate::connectors::{self, Backend};
use crate::helpers::JsonResponse;
use crate::middleware;
use crate::routes;
use actix_cors::Cors;
use actix_web::{dev::Server, error, web, App, HttpServer};
use std::net::TcpListener;
use std::time::Duration;
use tracing_actix_web::TracingLogger;

/// Start the server with connectors built from `settings.backend`.
pub async fn run(listener: TcpListener, settings: Settings) -> Result<Server, std::io::Error> {
    let backend = connectors::init_backend(&settings.backend)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))?;

    run_with_backend(listener, settings, backend).await
}

pub async fn run_with_backend(
    listener: TcpListener,
    settings: Settings,
    backend: Backend,
) -> Result<Server, std::io::Error> {
    let token_cache = web::Data::new(middleware::authentication::TokenCache::new(
        Duration::from_secs(settings.auth_cache_ttl_secs),
    ));
    let auth_connector = web::Data::new(backend.auth);
    let feedback_store = web::Data::new(backend.store);

    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let msg = match &err {
            error::JsonPayloadError::Deserialize(err) => format!(
                "Malformed JSON at line {}, column {}: {}",
                err.line(),
                err.column(),
                err
            ),
            other => other.to_string(),
        };
        tracing::debug!("Rejected request body: {}", msg);
        JsonResponse::<()>::build().bad_request(msg)
    });

    let server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::authentication::Manager::new())
            .wrap(Cors::permissive())
            .wrap(TracingLogger::default())
            .service(web::scope("/health_check").service(routes::health_check))
            .service(web::scope("/feedback").service(routes::feedback::add_handler))
            .service(web::scope("/dashboard").service(routes::dashboard::get_handler))
            .service(
                web::scope("/auth")
                    .service(routes::auth::signup_handler)
                    .service(routes::auth::signin_handler)
                    .service(routes::auth::signout_handler)
                    .service(routes::auth::session_handler),
            )
            .app_data(json_config.clone())
            .app_data(token_cache.clone())
            .app_data(auth_connector.clone())
            .app_data(feedback_store.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
