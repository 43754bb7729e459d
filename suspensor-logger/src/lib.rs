//! Logging helper
//!
//! Used by all binaries, so they log consistently.
//!
//! On native targets, the filter is read from `RUST_LOG` (defaulting to `info`),
//! and colors may be disabled by setting `RUST_LOG_COLOR` to anything other than
//! `1`, `yes` or `true`.

// Imports
use {anyhow::Context, tracing_subscriber::prelude::*};

/// Initializes logging.
///
/// Fails if a global subscriber was already set.
pub fn init() -> Result<(), anyhow::Error> {
	// Create the registry
	let registry = tracing_subscriber::registry();

	// Add all the layers
	#[cfg(not(target_family = "wasm"))]
	let registry = {
		use {std::env, tracing::level_filters::LevelFilter};

		// Check if we should use colors
		let log_use_color = env::var("RUST_LOG_COLOR").map_or(true, |value| self::is_truthy(&value));

		let filter = tracing_subscriber::EnvFilter::builder()
			.with_default_directive(LevelFilter::INFO.into())
			.from_env_lossy();
		let layer = tracing_subscriber::fmt::layer()
			.with_ansi(log_use_color)
			.with_filter(filter);

		registry.with(layer)
	};

	#[cfg(target_family = "wasm")]
	let registry = {
		let layer = tracing_subscriber::fmt::layer()
			.with_ansi(false)
			.without_time()
			.with_level(false)
			.with_writer(tracing_web::MakeWebConsoleWriter::new().with_pretty_level());
		registry.with(layer)
	};

	// Finally initialize it
	registry.try_init().context("Unable to initialize logger")
}

/// Returns whether an environment variable value is truthy
#[cfg_attr(target_family = "wasm", expect(dead_code, reason = "Environment variables aren't read on wasm"))]
fn is_truthy(value: &str) -> bool {
	matches!(value.trim().to_uppercase().as_str(), "1" | "YES" | "TRUE")
}
