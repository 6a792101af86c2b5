use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::{fs, io};

/// Reads a whole text file into a `String`.
pub(crate) fn read_file<P: AsRef<Path>>(filename: P) -> io::Result<String> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents)
}

/// Reads a text file and returns all its lines as a `Vec<String>`.
///
/// - Reads the entire file into memory
/// - Invalid UTF-8 sequences are replaced (dictionary files are often Latin-1)
/// - Splits on `\n` / `\r\n`
pub(crate) fn read_lines<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	let bytes = fs::read(filename)?;
	Ok(String::from_utf8_lossy(&bytes).lines().map(str::to_owned).collect())
}

/// Builds an output path based on an input path and a new extension.
///
/// Example:
/// `data/cmudict.dict` + `"bin"` → `data/cmudict.bin`
pub(crate) fn build_output_path<P: AsRef<Path>>(
	input_path: P,
	output_extension: &str,
) -> io::Result<PathBuf> {
	let input_path = input_path.as_ref();

	let parent = input_path.parent().unwrap_or_else(|| Path::new("."));
	let file_stem = input_path
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Input path has no filename"))?;

	let mut output = PathBuf::from(parent);
	output.push(file_stem);
	output.set_extension(output_extension);

	Ok(output)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn output_path_swaps_extension() {
		let path = build_output_path("data/cmudict.dict", "bin").unwrap();
		assert_eq!(path, PathBuf::from("data/cmudict.bin"));
	}

	#[test]
	fn output_path_without_parent_stays_relative() {
		let path = build_output_path("cmudict", "bin").unwrap();
		assert_eq!(path, PathBuf::from("cmudict.bin"));
	}

	#[test]
	fn read_lines_tolerates_latin1() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("latin1.txt");
		std::fs::write(&path, b"caf\xe9  K AE0 F EY1\n").unwrap();
		let lines = read_lines(&path).unwrap();
		assert_eq!(lines.len(), 1);
		assert!(lines[0].ends_with("K AE0 F EY1"));
	}

	#[test]
	fn read_lines_splits_crlf() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("lines.txt");
		std::fs::write(&path, "first\r\nsecond\nthird").unwrap();
		assert_eq!(read_lines(&path).unwrap(), vec!["first", "second", "third"]);
	}
}
