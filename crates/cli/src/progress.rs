use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use ipaota::batch;

use crate::util;

const TEMPLATE: &str = "{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}";

/// A progress bar over the packages in a batch.
pub struct Bar {
	inner: ProgressBar,
}

impl Bar {
	/// Creates a progress bar for `total` packages.
	pub fn new(total: usize) -> eyre::Result<Self> {
		let style = ProgressStyle::with_template(TEMPLATE)?.progress_chars("=> ");

		let inner = ProgressBar::new(to_u64(total)).with_style(style);

		Ok(Self { inner })
	}

	/// Clears the progress bar from the terminal.
	pub fn finish(&self) {
		self.inner.finish_and_clear();
	}
}

impl batch::Progress for Bar {
	fn update(&self, outcome: &batch::Outcome, current: usize, _total: usize) {
		self.inner.set_message(util::file_name(&outcome.package));
		self.inner.set_position(to_u64(current));
	}
}

fn to_u64(n: usize) -> u64 {
	u64::try_from(n).unwrap_or(u64::MAX)
}
