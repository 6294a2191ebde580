//! Candidate file names and day-bucket directories.

use chrono::{Datelike, NaiveDate};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// A source file name split for disambiguation.
///
/// The extension is the final dotted suffix only, so `clip.tar.gz` keeps
/// `clip.tar` as its stem. Names without an extension keep none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateName {
    stem: OsString,
    extension: Option<OsString>,
}

impl CandidateName {
    /// Split the final component of `path`
    pub fn from_path(path: &Path) -> Self {
        let stem = path
            .file_stem()
            .or_else(|| path.file_name())
            .unwrap_or_else(|| OsStr::new(""))
            .to_os_string();

        Self {
            stem,
            extension: path.extension().map(OsStr::to_os_string),
        }
    }

    pub fn stem(&self) -> &OsStr {
        &self.stem
    }

    pub fn extension(&self) -> Option<&OsStr> {
        self.extension.as_deref()
    }

    /// File name for a probe attempt.
    ///
    /// Attempt 0 is the bare name, attempt `n` inserts `-n` before the
    /// extension.
    pub fn file_name(&self, attempt: usize) -> OsString {
        let mut name = self.stem.clone();
        if attempt > 0 {
            name.push(format!("-{}", attempt));
        }
        if let Some(ref ext) = self.extension {
            name.push(".");
            name.push(ext);
        }
        name
    }
}

/// Relative `YYYY/MM/DD` directory for a capture date
pub fn day_bucket(date: NaiveDate) -> PathBuf {
    let mut bucket = PathBuf::from(format!("{:04}", date.year()));
    bucket.push(format!("{:02}", date.month()));
    bucket.push(format!("{:02}", date.day()));
    bucket
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(path: &str, attempts: &[usize]) -> Vec<String> {
        let candidate = CandidateName::from_path(Path::new(path));
        attempts
            .iter()
            .map(|&n| candidate.file_name(n).to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn attempt_zero_is_the_bare_name() {
        assert_eq!(names("/src/IMG_0001.JPG", &[0]), vec!["IMG_0001.JPG"]);
    }

    #[test]
    fn later_attempts_insert_a_suffix_before_the_extension() {
        assert_eq!(
            names("/src/IMG_0001.JPG", &[1, 2, 98]),
            vec!["IMG_0001-1.JPG", "IMG_0001-2.JPG", "IMG_0001-98.JPG"]
        );
    }

    #[test]
    fn only_the_final_suffix_is_the_extension() {
        let candidate = CandidateName::from_path(Path::new("clip.tar.gz"));
        assert_eq!(candidate.stem(), "clip.tar");
        assert_eq!(candidate.extension(), Some(OsStr::new("gz")));
        assert_eq!(candidate.file_name(3), OsString::from("clip.tar-3.gz"));
    }

    #[test]
    fn names_without_extension_stay_without() {
        assert_eq!(names("notes/README", &[0, 1]), vec!["README", "README-1"]);
    }

    #[test]
    fn dot_files_have_no_extension() {
        assert_eq!(names(".hidden", &[0, 1]), vec![".hidden", ".hidden-1"]);
    }

    #[test]
    fn day_bucket_is_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2021, 6, 5).unwrap();
        assert_eq!(day_bucket(date), Path::new("2021").join("06").join("05"));
    }

    #[test]
    fn day_bucket_pads_early_years() {
        let date = NaiveDate::from_ymd_opt(987, 12, 25).unwrap();
        assert_eq!(day_bucket(date), Path::new("0987").join("12").join("25"));
    }
}
