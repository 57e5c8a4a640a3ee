//! PEI Observability
//!
//! - [`logging`]: tracing subscriber setup and the per-request logging middleware
//! - [`metrics`]: Prometheus recorder, HTTP metrics middleware, and business counters
//!
//! Observability is on by default and can be switched off at runtime with
//! `OBSERVABILITY_ENABLED=false`, which keeps console logging but skips the
//! JSON log file and every metric.
//!
//! ```no_run
//! use pei_observability::{init_metrics, init_tracing};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     init_tracing()?;
//!     let _handle = init_metrics()?;
//!     Ok(())
//! }
//! ```

pub mod logging;
pub mod metrics;

use std::sync::OnceLock;

pub use logging::{init_tracing, logging_middleware};
pub use metrics::{
    init_metrics, metrics_middleware, track_jwt_issued, track_login_failure, track_login_success,
    track_permission_check, track_user_created,
};
pub use metrics_exporter_prometheus::PrometheusHandle;

static OBSERVABILITY_ENABLED: OnceLock<bool> = OnceLock::new();

/// Reads `OBSERVABILITY_ENABLED` once. Anything but `false`/`0` enables it.
pub fn is_observability_enabled() -> bool {
    *OBSERVABILITY_ENABLED.get_or_init(|| {
        std::env::var("OBSERVABILITY_ENABLED")
            .map(|v| parse_flag(&v))
            .unwrap_or(true)
    })
}

fn parse_flag(value: &str) -> bool {
    let value = value.trim();
    !(value.eq_ignore_ascii_case("false") || value == "0")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag("1"));
        assert!(parse_flag(""));
        assert!(!parse_flag("false"));
        assert!(!parse_flag("FALSE"));
        assert!(!parse_flag(" 0 "));
    }
}
