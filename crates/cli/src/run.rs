use ipaota::Config;

/// A runnable subcommand.
pub trait Run {
	/// Runs the subcommand using the given `config`.
	fn run(&self, config: &Config) -> eyre::Result<()>;
}
