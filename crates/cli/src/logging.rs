use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Installs the global log subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence over `verbose`, which raises the default level from WARN.
pub fn init(verbose: u8) {
	let level = match verbose {
		0 => LevelFilter::WARN,
		1 => LevelFilter::INFO,
		2 => LevelFilter::DEBUG,
		_ => LevelFilter::TRACE,
	};

	let env_filter = EnvFilter::builder()
		.with_default_directive(level.into())
		.from_env_lossy();

	tracing_subscriber::fmt()
		.with_env_filter(env_filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.compact()
		.init();
}
