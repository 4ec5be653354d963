//! Subscriber setup for the validation engines.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::LOG_ENV_VAR;

static INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "fdml=info";

/// Install a compact stderr subscriber filtered by `FDML_LOG`.
///
/// Engine events are emitted under the `fdml_analysis::geometry`,
/// `fdml_analysis::timing`, `fdml_analysis::scanner` and
/// `fdml_analysis::check` targets: per-file issue counts at `debug`,
/// unreadable documents at `warn`, per-rule results and skipped progress
/// deltas at `trace`. An unset or unparsable `FDML_LOG` means `fdml=info`,
/// which keeps only the batch summary and warnings.
///
/// Safe to call more than once; an already installed global subscriber wins.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .with(filter)
            .try_init();
    });
}
