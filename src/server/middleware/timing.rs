use std::time::Instant;

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};

pub static PROCESS_TIME_HEADER: HeaderName = HeaderName::from_static("x-process-time");

/// Adds an `X-Process-Time` header holding the handler duration in seconds.
pub async fn process_time_middleware(request: Request, next: Next) -> Response {
    let started = Instant::now();
    let mut response = next.run(request).await;

    let elapsed = started.elapsed().as_secs_f64();
    if let Ok(value) = HeaderValue::from_str(&format!("{:.6}", elapsed)) {
        response
            .headers_mut()
            .insert(PROCESS_TIME_HEADER.clone(), value);
    }

    response
}
