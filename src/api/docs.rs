use axum::{
    body::Body,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "docs"]
struct Docs;

fn serve(path: &str) -> Response {
    match Docs::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            (
                [(header::CONTENT_TYPE, mime.as_ref())],
                Body::from(content.data),
            )
                .into_response()
        }
        None => (StatusCode::NOT_FOUND, "404 Not Found").into_response(),
    }
}

/// GET /docs
pub async fn serve_docs() -> Response {
    serve("index.html")
}

/// GET /swagger.yaml
pub async fn serve_swagger() -> Response {
    serve("swagger.yaml")
}
