use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
};
use std::time::{Duration, Instant};

/// Per-request access log, level follows the response status class
pub async fn log_request(
    req: Request,
    next: Next,
) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let start = Instant::now();
    
    let response = next.run(req).await;
    
    let duration_ms = elapsed_millis(start.elapsed());
    let status = response.status();
    
    if status.is_server_error() {
        tracing::error!(%method, %path, status = status.as_u16(), duration_ms, "Request failed");
    } else if status.is_client_error() {
        tracing::warn!(%method, %path, status = status.as_u16(), duration_ms, "Request rejected");
    } else {
        tracing::info!(%method, %path, status = status.as_u16(), duration_ms, "Request processed");
    }
    
    response
}

/// Milliseconds for the log field, saturating instead of wrapping
fn elapsed_millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    
    #[test]
    fn test_elapsed_millis_saturates() {
        assert_eq!(elapsed_millis(Duration::from_millis(42)), 42);
        assert_eq!(elapsed_millis(Duration::MAX), u64::MAX);
    }
}
