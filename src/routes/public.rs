use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, HeaderValue, Request, StatusCode},
    response::{IntoResponse, Response},
};
use embeddy::Embedded;
use std::{
    convert::Infallible,
    future::{ready, Ready},
    task::{Context, Poll},
};
use tower::Service;

/// Static assets embedded from the public resources folder: the
/// podium shield artwork, the page stylesheet and the branding
/// images. Served under the /assets route prefix.
#[derive(Clone, Embedded)]
#[folder = "src/resources/public"]
pub struct PublicContent;

impl<T> Service<Request<T>> for PublicContent {
    type Response = Response;
    type Error = Infallible;
    type Future = Ready<Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<T>) -> Self::Future {
        let path = req.uri().path();

        // Strip the leading slash in order to match paths correctly
        let path = path.strip_prefix('/').unwrap_or(path);

        // Create the response message
        let response = match Self::get(path) {
            // File exists, serve it with a type from its extension
            Some(file) => {
                let mime_type: &'static str = match path.rsplit_once('.').map(|(_, ext)| ext) {
                    Some("svg") => "image/svg+xml",
                    Some("css") => "text/css",
                    Some("png") => "image/png",
                    Some("webp") => "image/webp",
                    _ => "text/plain",
                };

                // Create byte response from the embedded file
                let mut response = Body::from(file).into_response();
                response
                    .headers_mut()
                    .insert(CONTENT_TYPE, HeaderValue::from_static(mime_type));
                response
            }
            // File not found 404
            None => StatusCode::NOT_FOUND.into_response(),
        };

        ready(Ok(response))
    }
}
