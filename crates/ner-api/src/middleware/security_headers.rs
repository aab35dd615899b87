//! Security headers middleware
//!
//! The API only serves JSON, so responses forbid sniffing, framing,
//! caching of extracted text, and loading of any sub-resources.
//!
//! Author: hephaex@gmail.com

use axum::{
    extract::Request,
    http::{header, HeaderValue},
    middleware::Next,
    response::Response,
};

pub async fn security_headers_middleware(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'"),
    );
    headers.insert(header::REFERRER_POLICY, HeaderValue::from_static("no-referrer"));

    // Request text may contain personal data
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        middleware,
        response::IntoResponse,
        routing::get,
        Router,
    };
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_headers_on_success_and_error() {
        async fn ok_handler() -> impl IntoResponse {
            (StatusCode::OK, "ok")
        }
        async fn error_handler() -> impl IntoResponse {
            (StatusCode::INTERNAL_SERVER_ERROR, "error")
        }

        let app = Router::new()
            .route("/ok", get(ok_handler))
            .route("/error", get(error_handler))
            .layer(middleware::from_fn(security_headers_middleware));

        for (uri, status) in [
            ("/ok", StatusCode::OK),
            ("/error", StatusCode::INTERNAL_SERVER_ERROR),
        ] {
            let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
            let response = app.clone().oneshot(request).await.unwrap();

            assert_eq!(response.status(), status);
            let headers = response.headers();
            assert_eq!(headers.get(header::X_CONTENT_TYPE_OPTIONS).unwrap(), "nosniff");
            assert_eq!(headers.get(header::X_FRAME_OPTIONS).unwrap(), "DENY");
            assert_eq!(headers.get(header::CACHE_CONTROL).unwrap(), "no-store");
        }
    }
}
