use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

/// Fixed one-second window limiter for the public endpoints. Process-wide,
/// not per-client: the job board and submission form are anonymous, so there
/// is no stable key to bucket on.
#[derive(Clone, Debug)]
pub struct PublicRateLimit {
    max_per_second: u32,
    window: Arc<Mutex<(Instant, u32)>>,
}

impl PublicRateLimit {
    pub fn per_second(max_per_second: u32) -> Self {
        Self {
            max_per_second: max_per_second.max(1),
            window: Arc::new(Mutex::new((Instant::now(), 0))),
        }
    }

    fn try_acquire(&self) -> bool {
        let mut window = self.window.lock().expect("rate limit window poisoned");
        let (started, count) = *window;
        if started.elapsed() >= Duration::from_secs(1) {
            *window = (Instant::now(), 1);
            return true;
        }
        if count < self.max_per_second {
            window.1 = count + 1;
            return true;
        }
        false
    }
}

pub async fn public_rate_limit(
    State(limit): State<PublicRateLimit>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if !limit.try_acquire() {
        return (StatusCode::TOO_MANY_REQUESTS, "rate_limit_exceeded").into_response();
    }
    next.run(req).await
}
