use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Reads a whole text file into memory.
///
/// - Content must be valid UTF-8
/// - Line endings are kept as-is (the tokenizer treats them as whitespace)
pub(crate) fn read_source<P: AsRef<Path>>(filename: P) -> io::Result<String> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents)
}

/// Extracts the base filename without extension.
///
/// Examples:
/// - `"./data/cage.txt"` → `"cage"`
/// - `"cage.txt"` → `"cage"`
pub(crate) fn get_filename<P: AsRef<Path>>(input_path: P) -> io::Result<String> {
	let stem = input_path
		.as_ref()
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Path has no filename"))?;

	Ok(stem.to_string_lossy().to_string())
}
