//! Flat-text bitstream persistence.
//!
//! A bitstream is stored as one run of `0`/`1` characters so it round-trips
//! exactly and stays readable by external tooling (NIST STS, shell one-liners).

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Write bits to `path` as a flat text blob of `0`/`1` characters.
///
/// Values other than 0 and 1 are rejected with [`Error::InvalidBitstream`],
/// matching what [`load_bits`] accepts. Nothing is written on rejection.
pub fn save_bits(path: &Path, bits: &[u8]) -> Result<()> {
    let mut text = String::with_capacity(bits.len());
    for (position, &bit) in bits.iter().enumerate() {
        match bit {
            0 => text.push('0'),
            1 => text.push('1'),
            byte => return Err(Error::InvalidBitstream { position, byte }),
        }
    }
    fs::write(path, text)?;
    Ok(())
}

/// Read a bitstream previously written by [`save_bits`].
///
/// A trailing newline is tolerated; any other byte is rejected with
/// [`Error::InvalidBitstream`] — corrupted input must not silently become
/// bits.
pub fn load_bits(path: &Path) -> Result<Vec<u8>> {
    let raw = fs::read(path)?;
    let end = raw
        .iter()
        .rposition(|&b| b != b'\n' && b != b'\r')
        .map_or(0, |i| i + 1);
    let mut bits = Vec::with_capacity(end);
    for (position, &byte) in raw[..end].iter().enumerate() {
        match byte {
            b'0' => bits.push(0),
            b'1' => bits.push(1),
            _ => return Err(Error::InvalidBitstream { position, byte }),
        }
    }
    Ok(bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_is_exact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bits.txt");
        let bits = vec![0, 1, 1, 0, 1, 0, 0, 0, 1, 1];
        save_bits(&path, &bits).unwrap();
        assert_eq!(load_bits(&path).unwrap(), bits);
    }

    #[test]
    fn saved_file_is_plain_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bits.txt");
        save_bits(&path, &[1, 0, 1]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "101");
    }

    #[test]
    fn empty_stream_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        save_bits(&path, &[]).unwrap();
        assert!(load_bits(&path).unwrap().is_empty());
    }

    #[test]
    fn trailing_newline_is_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("newline.txt");
        fs::write(&path, "0110\n").unwrap();
        assert_eq!(load_bits(&path).unwrap(), vec![0, 1, 1, 0]);
    }

    #[test]
    fn foreign_bytes_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        fs::write(&path, "01x1").unwrap();
        match load_bits(&path) {
            Err(Error::InvalidBitstream { position, byte }) => {
                assert_eq!(position, 2);
                assert_eq!(byte, b'x');
            }
            other => panic!("expected InvalidBitstream, got {other:?}"),
        }
    }

    #[test]
    fn non_bit_values_are_not_saved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        match save_bits(&path, &[0, 1, 2, 1]) {
            Err(Error::InvalidBitstream { position, byte }) => {
                assert_eq!(position, 2);
                assert_eq!(byte, 2);
            }
            other => panic!("expected InvalidBitstream, got {other:?}"),
        }
        assert!(!path.exists());
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.txt");
        assert!(matches!(load_bits(&path), Err(Error::Io(_))));
    }
}
