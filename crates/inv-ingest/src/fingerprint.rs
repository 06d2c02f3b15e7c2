use std::fs::File;
use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::{IngestError, Result};

/// SHA-256 of a file's bytes, hex encoded.
pub fn file_fingerprint(path: &Path) -> Result<String> {
    let mut file = File::open(path).map_err(|source| IngestError::io(path, source))?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];
    loop {
        let read = file
            .read(&mut buffer)
            .map_err(|source| IngestError::io(path, source))?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }
    Ok(hex::encode(hasher.finalize()))
}
