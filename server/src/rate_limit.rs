use std::sync::Arc;
use std::time::Duration;

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use tower_governor::{
    governor::{GovernorConfig, GovernorConfigBuilder},
    key_extractor::PeerIpKeyExtractor,
    GovernorLayer,
};

type PeerIpConfig = GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>>;

/// Quota of `requests_per_second` per peer IP, with a burst of twice that.
/// Returns `None` when the rate is zero or the burst does not fit in a `u32`.
fn governor_config(requests_per_second: u64) -> Option<PeerIpConfig> {
    if requests_per_second == 0 {
        return None;
    }
    // The builder takes the interval between refills, not a rate.
    let refill_period = Duration::from_nanos((1_000_000_000 / requests_per_second).max(1));
    let burst_size = u32::try_from(requests_per_second.saturating_mul(2)).ok()?;

    GovernorConfigBuilder::default()
        .period(refill_period)
        .burst_size(burst_size)
        .finish()
}

pub fn create_rate_limiter(
    requests_per_second: u64,
) -> Option<GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>>> {
    let governor_conf = governor_config(requests_per_second)?;

    Some(GovernorLayer {
        config: Arc::new(governor_conf),
    })
}
