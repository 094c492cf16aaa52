use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use crate::error::RecorderError;

const HEADER: &str = "Sensor Data Pairs\n=================\n\n";
const SENTINEL: &str = "END OF DATA";

/// Append-only measurement log. The file is created with a header on first
/// append and every batch is terminated by a sentinel line; the sentinel is
/// what [`MeasurementLog::verify`] checks for.
#[derive(Debug, Clone)]
pub struct MeasurementLog {
    path: PathBuf,
}

impl MeasurementLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one batch of reading pairs. The batch is formatted in memory
    /// and written with a single call, so an interrupt never tears a line.
    pub fn append(&self, pairs: &[(u16, u16)]) -> Result<(), RecorderError> {
        let new_file = !self.path.is_file();
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;

        let mut batch = String::new();
        if new_file {
            batch.push_str(HEADER);
        }
        for (index, (first, second)) in pairs.iter().enumerate() {
            batch.push_str(&format!("Pair {}: {:>6}, {:>6}\n", index + 1, first, second));
        }
        batch.push_str(&format!("\n{SENTINEL}\n"));

        file.write_all(batch.as_bytes())?;
        Ok(())
    }

    /// Cheap truncation check: the last line of the file must be the
    /// sentinel. Only meaningful right after an append in the same run.
    pub fn verify(&self) -> bool {
        match fs::read_to_string(&self.path) {
            Ok(contents) => contents.lines().last().map(str::trim) == Some(SENTINEL),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_in(dir: &tempfile::TempDir) -> MeasurementLog {
        MeasurementLog::new(dir.path().join("results.txt"))
    }

    #[test]
    fn append_then_verify_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let log = log_in(&dir);
        log.append(&[(1, 2), (3, 4)]).unwrap();
        assert!(log.verify());
    }

    #[test]
    fn verify_on_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!log_in(&dir).verify());
    }

    #[test]
    fn first_append_writes_header_and_exact_format() {
        let dir = tempfile::tempdir().unwrap();
        let log = log_in(&dir);
        log.append(&[(1, 2), (4464, 65535)]).unwrap();

        let contents = fs::read_to_string(log.path()).unwrap();
        assert_eq!(
            contents,
            "Sensor Data Pairs\n=================\n\n\
             Pair 1:      1,      2\n\
             Pair 2:   4464,  65535\n\
             \nEND OF DATA\n"
        );
    }

    #[test]
    fn appends_are_additive_and_ordered() {
        let dir = tempfile::tempdir().unwrap();
        let log = log_in(&dir);
        log.append(&[(1, 2)]).unwrap();
        log.append(&[(3, 4)]).unwrap();

        let contents = fs::read_to_string(log.path()).unwrap();
        let first_sentinel = contents.find(SENTINEL).unwrap();
        let second_sentinel = contents.rfind(SENTINEL).unwrap();
        assert!(first_sentinel < second_sentinel);
        assert!(contents.find("Pair 1:      1").unwrap() < first_sentinel);
        assert!(contents.find("Pair 1:      3").unwrap() > first_sentinel);
        // header only once
        assert_eq!(contents.matches("Sensor Data Pairs").count(), 1);
        assert!(log.verify());
    }

    #[test]
    fn truncated_log_fails_verification() {
        let dir = tempfile::tempdir().unwrap();
        let log = log_in(&dir);
        log.append(&[(1, 2)]).unwrap();

        let contents = fs::read_to_string(log.path()).unwrap();
        fs::write(log.path(), &contents[..contents.len() - 6]).unwrap();
        assert!(!log.verify());
    }
}
