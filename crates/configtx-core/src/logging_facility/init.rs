//! Subscriber installation

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Crates whose operation events are enabled by the default filters
const LOGGED_CRATES: [&str; 2] = ["configtx_core", "configtx_profile"];

/// Which subscriber [`init`] installs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable lines at debug level
    Development,
    /// One JSON object per event at info level
    Production,
    /// Bare registry; events are observed through `init_test_capture()`
    Test,
}

impl Profile {
    /// Filter used when `RUST_LOG` is unset, e.g.
    /// `configtx_core=info,configtx_profile=info`
    pub fn default_directives(self) -> String {
        let level = match self {
            Profile::Development => "debug",
            Profile::Production | Profile::Test => "info",
        };
        LOGGED_CRATES
            .iter()
            .map(|krate| format!("{}={}", krate, level))
            .collect::<Vec<_>>()
            .join(",")
    }

    fn filter(self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.default_directives()))
    }
}

static INIT_ONCE: Once = Once::new();

/// Install the global subscriber for `profile`.
///
/// Only the first call in a process has any effect. Output goes to stderr.
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| match profile {
        Profile::Development => {
            tracing_subscriber::fmt()
                .with_env_filter(profile.filter())
                .with_writer(std::io::stderr)
                .init();
        }
        Profile::Production => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(profile.filter())
                .with_writer(std::io::stderr)
                .init();
        }
        Profile::Test => {
            tracing_subscriber::registry().init();
        }
    });
}
