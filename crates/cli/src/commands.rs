mod generate;
mod inspect;

pub use generate::GenerateCommand;
pub use inspect::InspectCommand;

use ipaota::Config;

use crate::run::Run;

#[derive(clap::Subcommand)]
pub enum Commands {
	/// Generate over-the-air manifests for up to 10 packages
	#[command(long_about = generate::GUIDE)]
	Generate(GenerateCommand),

	/// Show a package's bundle metadata
	Inspect(InspectCommand),
}

impl Run for Commands {
	fn run(&self, config: &Config) -> eyre::Result<()> {
		match self {
			Self::Generate(cmd) => cmd.run(config),
			Self::Inspect(cmd) => cmd.run(config),
		}
	}
}
