use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::Path;

use crate::error::FetchError;
use crate::Piece;

/// Write pieces as a pretty-printed (2-space) JSON array. Non-ASCII text is
/// written as-is.
pub fn save_json(path: impl AsRef<Path>, pieces: &[Piece]) -> Result<(), FetchError> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(pieces)?;
    let write_err = |source| FetchError::Write {
        path: path.display().to_string(),
        source,
    };

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(write_err)?;
    }

    let mut file = File::create(path).map_err(write_err)?;
    file.write_all(json.as_bytes()).map_err(write_err)?;
    file.flush().map_err(write_err)?;
    Ok(())
}

pub fn load_json(path: impl AsRef<Path>) -> std::io::Result<Vec<Piece>> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}
