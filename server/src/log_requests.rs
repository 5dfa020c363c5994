use axum::{extract::Request, middleware::Next};

pub async fn log_request_middleware(request: Request, next: Next) -> axum::response::Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    log::debug!("Incoming request: {method} {uri}");
    let response = next.run(request).await;
    log::info!("{} {} -> {}", method, uri, response.status());
    response
}
