//! Line based matching of file contents.

use regex::Regex;
use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{CriterionError, Result};

/// Read a text file line by line, without line terminators.
///
/// `\n`, `\r\n` and a lone `\r` all end a line. Lines that are not valid
/// UTF-8 are reported as I/O errors.
pub fn read_lines(file: &Path) -> Result<impl Iterator<Item = Result<String>>> {
    let handle = File::open(file).map_err(|e| CriterionError::io(file, e))?;
    Ok(TextLines {
        reader: BufReader::new(handle),
        path: file.to_path_buf(),
        pending: VecDeque::new(),
    })
}

struct TextLines<R> {
    reader: R,
    path: PathBuf,
    pending: VecDeque<Vec<u8>>,
}

impl<R: BufRead> TextLines<R> {
    fn fill(&mut self) -> io::Result<bool> {
        let mut chunk = Vec::new();
        if self.reader.read_until(b'\n', &mut chunk)? == 0 {
            return Ok(false);
        }
        if chunk.last() == Some(&b'\n') {
            chunk.pop();
            if chunk.last() == Some(&b'\r') {
                chunk.pop();
            }
        } else if chunk.last() == Some(&b'\r') {
            chunk.pop();
        }
        self.pending.extend(chunk.split(|b| *b == b'\r').map(<[u8]>::to_vec));
        Ok(true)
    }
}

impl<R: BufRead> Iterator for TextLines<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pending.is_empty() {
            match self.fill() {
                Ok(true) => {}
                Ok(false) => return None,
                Err(e) => return Some(Err(CriterionError::io(&self.path, e))),
            }
        }
        let bytes = self.pending.pop_front()?;
        Some(String::from_utf8(bytes).map_err(|e| {
            CriterionError::io(&self.path, io::Error::new(io::ErrorKind::InvalidData, e))
        }))
    }
}

/// Matches at least one line of a file.
///
/// With `fixed` the line must equal `contents` exactly, otherwise `contents`
/// is a regular expression searched anywhere in the line.
#[derive(Debug, Clone)]
pub struct ContentMatcher {
    contents: String,
    fixed: bool,
    max_lines: Option<usize>,
    regex: Option<Regex>,
}

impl ContentMatcher {
    /// Create a matcher. `max_lines` limits the lines searched, `None` is
    /// unlimited and `Some(0)` never matches.
    pub fn new(contents: impl Into<String>, max_lines: Option<usize>, fixed: bool) -> Result<Self> {
        let contents = contents.into();
        let regex = if fixed {
            None
        } else {
            Some(Regex::new(&contents)?)
        };
        Ok(Self {
            contents,
            fixed,
            max_lines,
            regex,
        })
    }

    /// Check the lines of `file`.
    ///
    /// With a limit of zero lines the file is never opened, so its read
    /// permission is not checked.
    pub fn matches_file(&self, file: &Path) -> Result<bool> {
        let limit = match self.max_lines {
            Some(0) => return Ok(false),
            Some(n) => n,
            None => usize::MAX,
        };

        for line in read_lines(file)?.take(limit) {
            if self.matches_line(&line?) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn matches_line(&self, line: &str) -> bool {
        match &self.regex {
            Some(regex) => regex.is_match(line),
            None => line == self.contents,
        }
    }

    pub fn describe(&self) -> String {
        let mut description = String::from("file contains ");
        if self.fixed {
            description.push_str(&format!("a line with the contents `{}`", self.contents));
        } else {
            description.push_str(&format!(
                "a line matching the regular expression `{}`",
                self.contents
            ));
        }
        if let Some(n) = self.max_lines {
            description.push_str(&format!(" in the first {} line/s", n));
        }
        description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_read_lines_strips_newline() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("my_file");
        fs::write(&file, "a\nb\r\nc\nd\n").unwrap();

        let lines: Vec<String> = read_lines(&file).unwrap().map(|l| l.unwrap()).collect();
        assert_eq!(lines, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_read_lines_lone_carriage_returns() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("old_mac");
        fs::write(&file, "a\r\rb\r\nc\r").unwrap();

        let lines: Vec<String> = read_lines(&file).unwrap().map(|l| l.unwrap()).collect();
        assert_eq!(lines, vec!["a", "", "b", "c"]);
    }

    #[test]
    fn test_fixed_match_in_crlf_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("DESCRIPTION");
        fs::write(&file, "Package: x\r\nVersion: 1\r\n").unwrap();

        let matcher = ContentMatcher::new("Package: x", None, true).unwrap();
        assert!(matcher.matches_file(&file).unwrap());
        let matcher = ContentMatcher::new("Version: 1", Some(1), true).unwrap();
        assert!(!matcher.matches_file(&file).unwrap());
        let matcher = ContentMatcher::new("^Version: \\d$", None, false).unwrap();
        assert!(matcher.matches_file(&file).unwrap());
    }

    #[test]
    fn test_read_lines_missing_file_is_error() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            read_lines(&dir.path().join("missing")),
            Err(CriterionError::Io { .. })
        ));
    }

    #[test]
    fn test_invalid_regex_fails_at_construction() {
        assert!(matches!(
            ContentMatcher::new("[unclosed", None, false),
            Err(CriterionError::InvalidRegex(_))
        ));
        assert!(ContentMatcher::new("[unclosed", None, true).is_ok());
    }

    #[test]
    fn test_zero_lines_never_opens_file() {
        let dir = tempdir().unwrap();
        let matcher = ContentMatcher::new("a", Some(0), true).unwrap();
        assert!(!matcher.matches_file(&dir.path().join("missing")).unwrap());
    }
}
