use std::path::Path;
use std::path::PathBuf;

use crate::archive;
use crate::bundle::BundleMetadata;
use crate::manifest;
use crate::manifest::Manifest;

/// The maximum number of packages in a batch.
pub const SLOTS: usize = 10;

/// A batch validation error.
/// When returned, no package has been opened and nothing has been written.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
	/// No packages were selected.
	#[error("No packages selected. Select at least one package.")]
	NoPackages,

	/// The base URL is missing or blank.
	#[error("Missing base URL. Enter the URL the packages will be hosted at.")]
	MissingUrl,

	/// More packages were given than there are slots.
	#[error("Too many packages: got {0}, but at most {max} can be processed at once", max = SLOTS)]
	TooManyPackages(usize),

	/// A slot index is out of range.
	#[error("Slot {0} is out of range (there are {max} slots)", max = SLOTS)]
	InvalidSlot(usize),
}

/// A batch result.
pub type Result<T> = std::result::Result<T, Error>;

/// Returns the base file name of a package, i.e., its file name without the extension.
#[must_use]
pub fn base_name(package: &Path) -> String {
	package
		.file_stem()
		.unwrap_or_default()
		.to_string_lossy()
		.into_owned()
}

/// Returns the URL a package will be downloaded from.
///
/// A slash is always inserted between the base URL and the package name,
/// even if the base URL already ends with one.
#[must_use]
pub fn download_url(base_url: &str, base_name: &str) -> String {
	format!("{base_url}/{base_name}.ipa")
}

/// Returns the path a package's manifest is written to.
#[must_use]
pub fn manifest_path(output_dir: &Path, base_name: &str) -> PathBuf {
	output_dir.join(format!("manifest{base_name}.plist"))
}

/// The reason a package was skipped.
#[derive(Debug, thiserror::Error)]
pub enum Skip {
	/// Metadata could not be extracted from the package.
	#[error(transparent)]
	Extract(#[from] archive::Error),

	/// The manifest could not be written.
	#[error(transparent)]
	Write(#[from] manifest::Error),
}

/// A manifest generated for a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
	/// The package's bundle metadata.
	pub metadata: BundleMetadata,

	/// The URL the package is expected to be downloaded from.
	pub url: String,

	/// The path to the written manifest.
	pub path: PathBuf,
}

/// The outcome of processing a single package.
#[derive(Debug)]
pub struct Outcome {
	/// The slot the package was in (0-based).
	pub slot: usize,

	/// The path to the package.
	pub package: PathBuf,

	/// The generated manifest, or why the package was skipped.
	pub result: std::result::Result<Generated, Skip>,
}

impl Outcome {
	/// Checks if a manifest was generated.
	#[must_use]
	pub fn is_ok(&self) -> bool {
		self.result.is_ok()
	}
}

/// The result of a batch run.
#[derive(Debug, Default)]
pub struct Report {
	/// The outcome of each populated slot, in slot order.
	pub outcomes: Vec<Outcome>,
}

impl Report {
	/// Returns the number of manifests generated.
	#[must_use]
	pub fn succeeded(&self) -> usize {
		self.outcomes.iter().filter(|o| o.is_ok()).count()
	}

	/// Returns the number of packages skipped.
	#[must_use]
	pub fn skipped(&self) -> usize {
		self.outcomes.len() - self.succeeded()
	}
}

/// A batch progress callback.
///
/// After each package is processed, the [`update`] method is called.
///
/// [`update`]: crate::batch::Progress::update
pub trait Progress {
	/// Updates the progress of the batch.
	///
	/// # Arguments
	///
	/// * `outcome` - The outcome of the package just processed.
	/// * `current` - The number of packages processed so far.
	/// * `total` - The number of packages in the batch.
	fn update(&self, outcome: &Outcome, current: usize, total: usize);
}

impl<F> Progress for F
where
	F: Fn(&Outcome, usize, usize),
{
	fn update(&self, outcome: &Outcome, current: usize, total: usize) {
		self(outcome, current, total);
	}
}

impl Progress for () {
	fn update(&self, _outcome: &Outcome, _current: usize, _total: usize) {}
}

/// A batch of up to [`SLOTS`] packages that share a base URL and output directory.
#[derive(Debug, Clone)]
pub struct BatchJob {
	slots: [Option<PathBuf>; SLOTS],
	base_url: String,
	output_dir: PathBuf,
}

impl BatchJob {
	/// Creates a new batch with all slots empty.
	///
	/// # Arguments
	///
	/// * `base_url` - The URL the packages will be hosted at, without the package file name.
	/// * `output_dir` - The directory to write manifests into.
	pub fn new<S, P>(base_url: S, output_dir: P) -> Self
	where
		S: Into<String>,
		P: AsRef<Path>,
	{
		Self {
			slots: Default::default(),
			base_url: base_url.into(),
			output_dir: output_dir.as_ref().to_owned(),
		}
	}

	/// Creates a new batch with packages filling the slots in order.
	///
	/// # Errors
	///
	/// If there are more than [`SLOTS`] packages, [`Error::TooManyPackages`] is returned.
	pub fn with_packages<S, P, I>(base_url: S, output_dir: P, packages: I) -> Result<Self>
	where
		S: Into<String>,
		P: AsRef<Path>,
		I: IntoIterator,
		I::Item: Into<PathBuf>,
	{
		let packages: Vec<PathBuf> = packages.into_iter().map(Into::into).collect();

		if packages.len() > SLOTS {
			return Err(Error::TooManyPackages(packages.len()));
		}

		let mut job = Self::new(base_url, output_dir);

		for (slot, package) in job.slots.iter_mut().zip(packages) {
			*slot = Some(package);
		}

		Ok(job)
	}

	/// Sets (or clears, if `package` is None) the package in a slot.
	///
	/// # Errors
	///
	/// If `slot` is not less than [`SLOTS`], [`Error::InvalidSlot`] is returned.
	pub fn set(&mut self, slot: usize, package: Option<PathBuf>) -> Result<&mut Self> {
		let entry = self.slots.get_mut(slot).ok_or(Error::InvalidSlot(slot))?;
		*entry = package;

		Ok(self)
	}

	/// Returns the slots.
	#[must_use]
	pub fn slots(&self) -> &[Option<PathBuf>] {
		&self.slots
	}

	/// Returns the base URL with surrounding whitespace removed.
	#[must_use]
	pub fn base_url(&self) -> &str {
		self.base_url.trim()
	}

	/// Returns the output directory.
	#[must_use]
	pub fn output_dir(&self) -> &Path {
		&self.output_dir
	}

	/// Yields (slot, package) for each populated slot.
	pub fn packages(&self) -> impl Iterator<Item = (usize, &Path)> {
		self.slots
			.iter()
			.enumerate()
			.filter_map(|(slot, package)| package.as_deref().map(|p| (slot, p)))
	}

	/// Checks that the batch can be run.
	///
	/// # Errors
	///
	/// If every slot is empty, [`Error::NoPackages`] is returned.
	///
	/// If the base URL is blank, [`Error::MissingUrl`] is returned.
	pub fn validate(&self) -> Result<()> {
		if self.packages().next().is_none() {
			return Err(Error::NoPackages);
		}

		if self.base_url().is_empty() {
			return Err(Error::MissingUrl);
		}

		Ok(())
	}

	/// Generates a manifest for each package in the batch. See [`run_with`].
	///
	/// [`run_with`]: crate::batch::BatchJob::run_with
	///
	/// # Errors
	///
	/// See [`validate`].
	///
	/// [`validate`]: crate::batch::BatchJob::validate
	pub fn run(&self) -> Result<Report> {
		self.run_with(&())
	}

	/// Generates a manifest for each package in the batch, reporting progress after each package.
	///
	/// Packages are processed one at a time in slot order.
	/// A package that fails is skipped, and the reason is recorded in the report.
	///
	/// # Arguments
	///
	/// * `progress` - The progress callback. Refer to [`Progress`] for details.
	///
	/// # Errors
	///
	/// See [`validate`]. Failures of individual packages are never returned as errors.
	///
	/// [`validate`]: crate::batch::BatchJob::validate
	#[tracing::instrument(level = "info", skip_all, fields(base_url = self.base_url(), output_dir = %self.output_dir.display()))]
	pub fn run_with<P: Progress>(&self, progress: &P) -> Result<Report> {
		self.validate()?;

		let total = self.packages().count();
		let mut report = Report::default();

		for (slot, package) in self.packages() {
			let result = self.process(package);

			match &result {
				Ok(generated) => tracing::info!(
					"Wrote manifest for {} to {}",
					package.display(),
					generated.path.display()
				),
				Err(skip) => tracing::warn!("Skipped {}: {skip}", package.display()),
			}

			report.outcomes.push(Outcome {
				slot,
				package: package.to_owned(),
				result,
			});

			if let Some(outcome) = report.outcomes.last() {
				progress.update(outcome, report.outcomes.len(), total);
			}
		}

		Ok(report)
	}

	fn process(&self, package: &Path) -> std::result::Result<Generated, Skip> {
		let base_name = base_name(package);

		let metadata = archive::extract(package)?;

		let url = download_url(self.base_url(), &base_name);
		let path = manifest_path(&self.output_dir, &base_name);

		Manifest::new(&url, &metadata).write(&path)?;

		Ok(Generated {
			metadata,
			url,
			path,
		})
	}
}

#[cfg(test)]
mod tests {
	use std::fs;

	use super::*;
	use crate::test;

	fn files(dir: &Path) -> Vec<String> {
		let mut names: Vec<_> = fs::read_dir(dir)
			.unwrap()
			.map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
			.collect();
		names.sort();

		names
	}

	#[test]
	fn urls_and_paths() {
		let name = base_name(Path::new("/tmp/MyApp.ipa"));

		assert_eq!(name, "MyApp");
		assert_eq!(base_name(Path::new("/tmp/My.App.ipa")), "My.App");
		assert_eq!(
			download_url("https://x.com/app", &name),
			"https://x.com/app/MyApp.ipa"
		);
		assert_eq!(
			download_url("https://x.com/app/", &name),
			"https://x.com/app//MyApp.ipa"
		);
		assert_eq!(
			manifest_path(Path::new("/out"), &name),
			Path::new("/out/manifestMyApp.plist")
		);
	}

	#[test]
	fn validation() {
		let dir = tempfile::tempdir().unwrap();

		assert_eq!(
			BatchJob::new("https://x.com", &dir).run().unwrap_err(),
			Error::NoPackages
		);

		let package = test::simple_package(&dir, "App.ipa", "App");

		for url in ["", "   \t"] {
			let job = BatchJob::with_packages(url, &dir, [&package]).unwrap();

			assert_eq!(job.run().unwrap_err(), Error::MissingUrl);
		}

		// Nothing besides the package should be written.
		assert_eq!(files(dir.path()), ["App.ipa"]);

		let too_many = vec![package.clone(); SLOTS + 1];
		assert_eq!(
			BatchJob::with_packages("https://x.com", &dir, too_many).unwrap_err(),
			Error::TooManyPackages(SLOTS + 1)
		);

		let mut job = BatchJob::new("https://x.com", &dir);
		assert_eq!(
			job.set(SLOTS, Some(package)).unwrap_err(),
			Error::InvalidSlot(SLOTS)
		);
	}

	#[test]
	fn partial_failure() {
		let input = tempfile::tempdir().unwrap();
		let output = tempfile::tempdir().unwrap();

		let first = test::simple_package(&input, "First.ipa", "First");
		let bad = input.path().join("Bad.ipa");
		fs::write(&bad, "not a zip").unwrap();
		let third = test::simple_package(&input, "Third.ipa", "Third");

		let mut job = BatchJob::new("  https://x.com/app ", &output);
		job.set(0, Some(first))
			.unwrap()
			.set(4, Some(bad))
			.unwrap()
			.set(9, Some(third))
			.unwrap();

		let report = job.run().unwrap();

		assert_eq!(report.succeeded(), 2);
		assert_eq!(report.skipped(), 1);

		let slots: Vec<_> = report.outcomes.iter().map(|o| o.slot).collect();
		assert_eq!(slots, [0, 4, 9]);
		assert!(matches!(
			report.outcomes[1].result,
			Err(Skip::Extract(archive::Error::Archive(_)))
		));

		let generated = report.outcomes[2].result.as_ref().unwrap();
		assert_eq!(generated.url, "https://x.com/app/Third.ipa");
		assert_eq!(generated.metadata.name, "Third");

		assert_eq!(
			files(output.path()),
			["manifestFirst.plist", "manifestThird.plist"]
		);

		let bytes = fs::read(output.path().join("manifestFirst.plist")).unwrap();
		let manifest = Manifest::from_bytes(&bytes).unwrap();
		assert_eq!(manifest.items[0].assets[0].url, "https://x.com/app/First.ipa");
		assert_eq!(manifest.items[0].metadata.title, "First");
	}

	#[test]
	fn skips_missing_info_plist() {
		let input = tempfile::tempdir().unwrap();
		let output = tempfile::tempdir().unwrap();

		let empty = test::package(&input, "Empty.ipa", &[("README", b"hello")]);

		let report = BatchJob::with_packages("https://x.com", &output, [empty])
			.unwrap()
			.run()
			.unwrap();

		assert_eq!(report.succeeded(), 0);
		assert!(matches!(
			report.outcomes[0].result,
			Err(Skip::Extract(archive::Error::NotFound))
		));
		assert!(files(output.path()).is_empty());
	}

	#[test]
	fn skips_write_error() {
		let input = tempfile::tempdir().unwrap();
		let output = input.path().join("does-not-exist");

		let package = test::simple_package(&input, "App.ipa", "App");

		let report = BatchJob::with_packages("https://x.com", &output, [package])
			.unwrap()
			.run()
			.unwrap();

		assert_eq!(report.skipped(), 1);
		assert!(matches!(
			report.outcomes[0].result,
			Err(Skip::Write(manifest::Error::Io(_)))
		));
	}

	#[test]
	fn idempotent() {
		let input = tempfile::tempdir().unwrap();
		let package = test::simple_package(&input, "App.ipa", "App");

		let run = || {
			let output = tempfile::tempdir().unwrap();

			BatchJob::with_packages("https://x.com", &output, [&package])
				.unwrap()
				.run()
				.unwrap();

			fs::read(output.path().join("manifestApp.plist")).unwrap()
		};

		assert_eq!(run(), run());
	}

	#[test]
	fn progress() {
		let input = tempfile::tempdir().unwrap();
		let output = tempfile::tempdir().unwrap();

		let packages = [
			test::simple_package(&input, "A.ipa", "A"),
			test::simple_package(&input, "B.ipa", "B"),
		];

		let updates = std::cell::RefCell::new(Vec::new());

		BatchJob::with_packages("https://x.com", &output, packages)
			.unwrap()
			.run_with(&|outcome: &Outcome, current: usize, total: usize| {
				updates.borrow_mut().push((outcome.slot, current, total));
			})
			.unwrap();

		assert_eq!(updates.into_inner(), [(0, 1, 2), (1, 2, 2)]);
	}
}
