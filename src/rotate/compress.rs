//! Gzip compression of rotated backups.

use crate::Error;
use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

#[must_use]
pub(super) fn gz_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".gz");
    PathBuf::from(name)
}

/// Writes `<path>.gz` and removes `path`. Returns the bytes saved.
/// A partially written archive is removed again on failure.
pub(super) fn compress_file(path: &Path) -> Result<u64, Error> {
    let input = File::open(path)?;
    let original_size = input.metadata()?.len();
    let mut reader = BufReader::new(input);

    let gz_path = gz_path(path);
    let result = (|| -> Result<(), Error> {
        let output = File::create(&gz_path)?;
        let mut encoder = GzEncoder::new(BufWriter::new(output), Compression::default());
        io::copy(&mut reader, &mut encoder)?;
        encoder.finish()?.flush()?;
        Ok(())
    })();
    if let Err(e) = result {
        let _ = fs::remove_file(&gz_path);
        return Err(e);
    }

    let compressed_size = fs::metadata(&gz_path)?.len();
    fs::remove_file(path)?;

    Ok(original_size.saturating_sub(compressed_size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;
    use tempfile::tempdir;

    #[test]
    fn replaces_file_with_archive() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("debug-2024-01-01T00-00-00.000.log");
        fs::write(&path, "line\n".repeat(200)).unwrap();

        let saved = compress_file(&path).unwrap();
        assert!(saved > 0);
        assert!(!path.exists());

        let mut decoded = String::new();
        GzDecoder::new(File::open(gz_path(&path)).unwrap())
            .read_to_string(&mut decoded)
            .unwrap();
        assert_eq!(decoded, "line\n".repeat(200));
    }

    #[test]
    fn missing_source_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gone.log");
        assert!(compress_file(&path).is_err());
        assert!(!gz_path(&path).exists());
    }
}
