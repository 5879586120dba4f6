mod commands;
mod logging;
mod progress;
mod run;
mod util;

use std::path::PathBuf;

use clap::Parser;

use commands::Commands;
use run::Run;

#[derive(clap::Parser)]
#[command(version, about)]
#[command(propagate_version = true)]
struct Args {
	#[command(subcommand)]
	command: Commands,

	/// Specify a configuration file (defaults to ~/.ipaota.json, if it exists)
	#[arg(short, long, global = true)]
	config: Option<PathBuf>,

	/// Show more log output. May be repeated
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	verbose: u8,
}

fn main() -> eyre::Result<()> {
	color_eyre::install()?;

	let args = Args::parse();

	logging::init(args.verbose);

	let config = ipaota::Config::load(args.config.as_deref())?;

	// Delegate to sub-commands.
	args.command.run(&config)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parse_generate() {
		let args = Args::try_parse_from([
			"ipaota",
			"-vv",
			"generate",
			"A.ipa",
			"B.ipa",
			"--url",
			"https://x.com/app",
			"--output",
			"out",
		])
		.unwrap();

		assert_eq!(args.verbose, 2);
		assert!(args.config.is_none());

		let Commands::Generate(cmd) = args.command else {
			panic!("expected the generate command");
		};

		assert_eq!(cmd.packages, [PathBuf::from("A.ipa"), PathBuf::from("B.ipa")]);
		assert_eq!(cmd.url.as_deref(), Some("https://x.com/app"));
		assert_eq!(cmd.output, Some(PathBuf::from("out")));
	}

	#[test]
	fn parse_inspect() {
		let args = Args::try_parse_from(["ipaota", "inspect", "A.ipa", "--config", "c.json"]).unwrap();

		assert_eq!(args.config, Some(PathBuf::from("c.json")));
		assert!(matches!(args.command, Commands::Inspect(_)));

		assert!(Args::try_parse_from(["ipaota", "inspect"]).is_err());
	}
}
