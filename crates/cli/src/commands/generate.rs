use std::path::PathBuf;

use ipaota::batch::Outcome;
use ipaota::BatchJob;
use ipaota::Config;
use ipaota::Report;
use owo_colors::OwoColorize;

use crate::progress;
use crate::run::Run;
use crate::util;

pub const GUIDE: &str = "\
Generate over-the-air manifests for up to 10 packages.

Each package's Info.plist is read for its name, version and bundle identifier, and a manifest \
named `manifest<package>.plist` is written into the output directory.

The URL is where the packages will be hosted, e.g. https://www.mywebsite.com/apps. \
Do NOT include the package file name in the URL: it is added automatically, so the package \
`MyApp.ipa` is expected at https://www.mywebsite.com/apps/MyApp.ipa.

Install a package on iOS by linking to \
itms-services://?action=download-manifest&url=<URL of its manifest>.";

#[derive(tabled::Tabled)]
#[tabled(rename_all = "pascal")]
struct OutcomeRow {
	slot: usize,
	package: String,
	title: String,
	version: String,
	result: String,
}

impl From<&Outcome> for OutcomeRow {
	fn from(outcome: &Outcome) -> Self {
		let package = util::file_name(&outcome.package);

		match &outcome.result {
			Ok(generated) => Self {
				slot: outcome.slot + 1,
				package,
				title: generated.metadata.name.clone(),
				version: generated.metadata.version.clone(),
				result: util::file_name(&generated.path),
			},
			Err(skip) => Self {
				slot: outcome.slot + 1,
				package,
				title: String::new(),
				version: String::new(),
				result: format!("skipped: {skip}"),
			},
		}
	}
}

#[derive(clap::Args)]
pub struct GenerateCommand {
	/// The packages (.ipa) to generate manifests for
	pub packages: Vec<PathBuf>,

	/// The URL the packages will be hosted at, without the package file name
	#[arg(short, long)]
	pub url: Option<String>,

	/// The directory to write manifests into
	#[arg(short, long)]
	pub output: Option<PathBuf>,
}

impl GenerateCommand {
	fn job(&self, config: &Config) -> ipaota::Result<BatchJob> {
		let base_url = self
			.url
			.clone()
			.or_else(|| config.base_url.clone())
			.unwrap_or_default();

		let output_dir = self.output.clone().unwrap_or_else(|| config.output_dir());

		let job = BatchJob::with_packages(base_url, output_dir, &self.packages)?;
		job.validate()?;

		Ok(job)
	}

	/// Runs the batch and returns its report, without printing it.
	pub fn generate(&self, config: &Config) -> eyre::Result<Report> {
		let job = self.job(config)?;

		let bar = progress::Bar::new(job.packages().count())?;
		let report = job.run_with(&bar)?;
		bar.finish();

		Ok(report)
	}
}

impl Run for GenerateCommand {
	fn run(&self, config: &Config) -> eyre::Result<()> {
		let report = self.generate(config)?;
		let output_dir = self.output.clone().unwrap_or_else(|| config.output_dir());

		let rows = report.outcomes.iter().map(OutcomeRow::from);
		println!("\n{}\n", util::tableify(rows));

		let succeeded = format!("{} manifest(s)", report.succeeded());
		let skipped = format!("{} skipped", report.skipped());

		println!(
			"{} saved to {}, {}.",
			succeeded.green(),
			output_dir.display(),
			if report.skipped() > 0 {
				skipped.yellow().to_string()
			} else {
				skipped
			}
		);

		Ok(())
	}
}
