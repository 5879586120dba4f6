use std::path::Path;

use tabled::settings::object::Rows;
use tabled::settings::themes::Colorization;
use tabled::settings::Color;
use tabled::settings::Style;
use tabled::Table;
use tabled::Tabled;

pub fn tableify<I, T>(iter: I) -> Table
where
	I: IntoIterator<Item = T>,
	T: Tabled,
{
	let mut table = Table::new(iter);

	table
		.with(Style::empty())
		.with(Colorization::exact([Color::FG_GREEN], Rows::first()));

	table
}

/// Returns the file name of a path, or the whole path if it has none.
pub fn file_name(path: &Path) -> String {
	path.file_name()
		.map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
}
