use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with the given default directive.
///
/// `RUST_LOG` still applies; an already-installed subscriber is left in place.
pub fn init_tracing(default_directive: &str) {
    TRACING_INIT.call_once(|| {
        let mut filter = EnvFilter::from_default_env();
        match default_directive.parse() {
            Ok(directive) => filter = filter.add_directive(directive),
            Err(err) => eprintln!("ignoring invalid log filter `{default_directive}`: {err}"),
        }

        let _ = fmt().with_env_filter(filter).try_init();
    });
}
