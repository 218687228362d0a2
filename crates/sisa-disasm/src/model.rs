use anyhow::Result;
use std::path::Path;

/// Instruction words as written by `sisa --bin`: 4 bytes each, big-endian.
#[derive(Debug, Clone)]
pub struct Image {
    pub words: Vec<u32>,
}

/// Decode the `len` bytes (or all remaining) after `skip` as big-endian words.
pub fn words_from_bytes(bytes: &[u8], skip: usize, len: Option<usize>) -> Result<Image> {
    let window = bytes
        .get(skip..)
        .and_then(|rest| match len {
            Some(n) => rest.get(..n),
            None => Some(rest),
        })
        .ok_or_else(|| anyhow::anyhow!("window {skip}+{len:?} lies outside {} bytes", bytes.len()))?;
    anyhow::ensure!(
        window.len() % 4 == 0,
        "image length {} is not a multiple of 4 bytes",
        window.len()
    );
    let words = window
        .chunks_exact(4)
        .map(|c| u32::from_be_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    Ok(Image { words })
}

pub fn load_words(path: &Path, skip: usize, len: Option<usize>) -> Result<Image> {
    words_from_bytes(&std::fs::read(path)?, skip, len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loader_honours_skip_and_len() {
        let path = std::env::temp_dir().join("_sisa_disasm_test.bin");
        std::fs::write(&path, [0xFFu8, 0xFF, 0x40, 0x20, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]).unwrap();
        let img = load_words(&path, 2, Some(4)).unwrap();
        assert_eq!(img.words, vec![0x4020_0000]);
        assert!(load_words(&path, 2, Some(5)).is_err());
        assert!(load_words(&path, 11, None).is_err());
        assert!(load_words(&path, 2, Some(9)).is_err());
        let _ = std::fs::remove_file(&path);
    }
}
