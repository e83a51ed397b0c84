//! Church - an interactive shell for the untyped lambda calculus.
//!
//! - [`cli`]: command-line options of the `church` binary
//! - [`repl`]: the line-oriented shell (`let`, `eval`, `show`, ...)

pub mod cli;
pub mod repl;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=church_eval=debug` or `RUST_LOG=trace`. Output goes
/// to stderr so the shell's own output is unaffected.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
