use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::{CharLmError, Result};

/// Opens a corpus file for streaming.
///
/// The file is never read whole: callers pull characters through
/// [`CorpusChars`].
///
/// # Errors
/// Returns [`CharLmError::Io`] carrying the path if the file cannot be opened.
pub fn open_corpus<P: AsRef<Path>>(path: P) -> Result<BufReader<File>> {
	let path = path.as_ref();
	let file = File::open(path).map_err(|e| CharLmError::io(e, Some(path.to_path_buf())))?;
	Ok(BufReader::new(file))
}

/// Iterator over the characters of a UTF-8 text source, front to back.
///
/// Text is pulled one line at a time, line terminators included, so memory
/// use is bounded by the longest line rather than the whole corpus.
///
/// # Notes
/// - Invalid UTF-8 surfaces as an `InvalidData` error.
/// - After an error the iterator is exhausted.
pub struct CorpusChars<R> {
	reader: R,
	line: String,
	position: usize,
	done: bool,
}

impl<R: BufRead> CorpusChars<R> {
	/// Wraps `reader`; nothing is read until the first call to `next`.
	pub fn new(reader: R) -> Self {
		Self {
			reader,
			line: String::new(),
			position: 0,
			done: false,
		}
	}

	fn refill(&mut self) -> io::Result<bool> {
		self.line.clear();
		self.position = 0;
		Ok(self.reader.read_line(&mut self.line)? > 0)
	}
}

impl<R: BufRead> Iterator for CorpusChars<R> {
	type Item = io::Result<char>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.done {
			return None;
		}

		loop {
			if let Some(c) = self.line[self.position..].chars().next() {
				self.position += c.len_utf8();
				return Some(Ok(c));
			}

			match self.refill() {
				Ok(true) => continue,
				Ok(false) => {
					self.done = true;
					return None;
				}
				Err(e) => {
					self.done = true;
					return Some(Err(e));
				}
			}
		}
	}
}
