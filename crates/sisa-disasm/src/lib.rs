pub mod model;

pub use model::{load_words, words_from_bytes, Image};

use serde::Serialize;
use sisa_rs::decoder::decode;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Line {
    pub index: usize,
    pub word: u32,
    /// `None` when the opcode bits match no instruction.
    pub text: Option<String>,
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.text {
            Some(t) => write!(f, "{:>4}: {:08x}  {}", self.index, self.word, t),
            None => write!(f, "{:>4}: {:08x}  .word {:#010x}", self.index, self.word, self.word),
        }
    }
}

pub fn disassemble(img: &Image) -> Vec<Line> {
    img.words
        .iter()
        .enumerate()
        .map(|(index, &word)| Line {
            index,
            word,
            text: decode(word).map(|i| i.raw_text),
        })
        .collect()
}
