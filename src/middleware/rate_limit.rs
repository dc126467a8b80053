//! Per-client rate limiting using the token bucket algorithm.

use axum::Router;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor},
};

use crate::state::AppState;

/// Token bucket parameters.
#[derive(Debug, Clone, Copy)]
pub struct Quota {
    pub per_second: u64,
    pub burst_size: u32,
}

/// Public pages (login): 2 requests per second, burst of 100.
pub const PUBLIC: Quota = Quota {
    per_second: 2,
    burst_size: 100,
};

/// Authenticated pages: 1 request per second, burst of 10.
pub const SECURE: Quota = Quota {
    per_second: 1,
    burst_size: 10,
};

/// Wraps `router` in a rate limiter keyed by client IP.
///
/// With `behind_proxy`, the client IP is read from `X-Forwarded-For` /
/// `X-Real-IP` / `Forwarded`; otherwise from the peer socket address, which
/// requires serving with `into_make_service_with_connect_info`.
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
pub fn apply(router: Router<AppState>, quota: Quota, behind_proxy: bool) -> Router<AppState> {
    let mut builder = GovernorConfigBuilder::default();
    builder
        .per_second(quota.per_second)
        .burst_size(quota.burst_size);

    if behind_proxy {
        let config = builder
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .expect("rate limit quota must be non-zero");
        router.layer(GovernorLayer::new(Arc::new(config)))
    } else {
        let config = builder
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .expect("rate limit quota must be non-zero");
        router.layer(GovernorLayer::new(Arc::new(config)))
    }
}
