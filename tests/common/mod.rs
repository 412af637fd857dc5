//! Shared fixtures for the integration tests.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use tempfile::TempDir;

pub const SAMPLE_CSV: &str = "\
name,brand,price,rating
iphone,apple,999,4.9
galaxy,samsung,1199,4.8
redmi,xiaomi,199,4.6
poco,xiaomi,299,4.4
";

/// A scratch directory holding one file; the directory lives as long as
/// the fixture.
pub struct Fixture {
    _dir: TempDir,
    pub path: PathBuf,
}

impl Fixture {
    pub fn new(name: &str, contents: &[u8]) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temporary directory");
        let path = dir.path().join(name);
        let mut file = File::create(&path).expect("Failed to create fixture file");
        file.write_all(contents).expect("Failed to write fixture file");
        Fixture { _dir: dir, path }
    }

    /// The four-phone catalogue used throughout the tests.
    pub fn sample_csv() -> Self {
        Self::new("test.csv", SAMPLE_CSV.as_bytes())
    }
}
