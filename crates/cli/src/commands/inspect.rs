use std::iter;
use std::path::Path;
use std::path::PathBuf;

use eyre::WrapErr;
use ipaota::archive::Info;
use ipaota::Config;
use ipaota::Package;

use crate::run::Run;
use crate::util;

#[derive(tabled::Tabled, Debug)]
#[tabled(rename_all = "pascal")]
struct InfoRow {
	name: String,
	version: String,
	identifier: String,
	#[tabled(rename = "Info.plist")]
	entry: String,
}

impl From<Info> for InfoRow {
	fn from(info: Info) -> Self {
		Self {
			name: info.metadata.name,
			version: info.metadata.version,
			identifier: info.metadata.bundle_identifier,
			entry: info.entry,
		}
	}
}

fn info(package: &Path) -> ipaota::Result<Info> {
	let info = Package::open(package)?.info()?;

	Ok(info)
}

#[derive(clap::Args)]
pub struct InspectCommand {
	/// The package (.ipa) to inspect
	pub package: PathBuf,
}

impl Run for InspectCommand {
	fn run(&self, _config: &Config) -> eyre::Result<()> {
		let info = info(&self.package)
			.wrap_err_with(|| format!("Failed to inspect {}", self.package.display()))?;

		let table = util::tableify(iter::once(InfoRow::from(info)));

		println!("\n{table}\n");

		Ok(())
	}
}
