//! CORS configuration for the relay server.

use actix_cors::Cors;
use actix_web::http::header;

/// Build the CORS middleware from the configured origin allowlist.
///
/// Origins are matched exactly; requests without an Origin header (curl,
/// mobile clients) bypass CORS entirely at the browser level, so no special
/// case is needed here. Credentialed requests are supported because the
/// storefront sends cookies along with order calls.
pub fn build_cors(allowed_origins: &[String]) -> Cors {
    let allowed = allowed_origins.to_vec();
    Cors::default()
        .allowed_origin_fn(move |origin, _req_head| {
            origin
                .to_str()
                .map(|o| allowed.iter().any(|a| a == o))
                .unwrap_or(false)
        })
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()
        .max_age(3600)
}
