use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::opcodes::{self, Op, OpcodeDesc, Shape};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
    #[error("unknown mnemonic `{mnemonic}`")]
    UnknownMnemonic { mnemonic: String },
    #[error("malformed operands for {mnemonic} `{operands}`: {reason}")]
    MalformedOperands {
        mnemonic: &'static str,
        operands: String,
        reason: &'static str,
    },
}

/// An [`AsmError`] tagged with the 1-based source line it came from.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {source}")]
pub struct LineError {
    pub line: usize,
    #[source]
    pub source: AsmError,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    pub op: Op,
    /// Operand values as written, before any field truncation.
    pub operands: Vec<i64>,
    /// Normalized source text (`MNEMONIC operands`), kept for listings.
    pub raw_text: String,
}

impl Instruction {
    pub fn desc(&self) -> &'static OpcodeDesc {
        self.op.desc()
    }

    /// Operand `i` as stored in its field: truncated, then sign- or zero-extended.
    pub fn field_value(&self, i: usize) -> i64 {
        let field = self.desc().fields[i];
        field.reduce(self.operands[i])
    }

    pub fn reg(&self, i: usize) -> usize {
        self.field_value(i) as usize
    }

    pub fn imm(&self, i: usize) -> i32 {
        self.field_value(i) as i32
    }
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&crate::disasm::fmt_instruction(self))
    }
}

/// Parse one line of assembly.
pub fn parse_line(line: &str) -> Result<Instruction, AsmError> {
    let upper = line.to_uppercase();
    let mut tokens = upper.split_whitespace();
    let mnemonic = tokens.next().unwrap_or_default();
    let desc = opcodes::lookup(mnemonic)?;
    let text: String = tokens.collect();
    let operands = match_shape(desc, &text)?;
    let raw_text = if text.is_empty() {
        desc.mnemonic.to_string()
    } else {
        format!("{} {}", desc.mnemonic, text)
    };
    debug!(op = ?desc.op, ?operands, "parsed `{}`", raw_text);
    Ok(Instruction { op: desc.op, operands, raw_text })
}

/// Parse a whole program, one instruction per non-blank line. Stops at the first error.
pub fn parse_program(source: &str) -> Result<Vec<Instruction>, LineError> {
    source
        .lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty())
        .map(|(i, l)| parse_line(l).map_err(|source| LineError { line: i + 1, source }))
        .collect()
}

fn match_shape(desc: &'static OpcodeDesc, text: &str) -> Result<Vec<i64>, AsmError> {
    let bad = |reason: &'static str| AsmError::MalformedOperands {
        mnemonic: desc.mnemonic,
        operands: text.to_string(),
        reason,
    };
    match desc.shape {
        Shape::None => {
            if text.is_empty() {
                Ok(Vec::new())
            } else {
                Err(bad("expected no operands"))
            }
        }
        Shape::RegTriple => {
            let [d, a, b] = split_commas(text).ok_or_else(|| bad("expected Rd,Ra,Rb"))?;
            Ok(vec![
                register(d).map_err(bad)?,
                register(a).map_err(bad)?,
                register(b).map_err(bad)?,
            ])
        }
        Shape::RegRegImm => {
            let [d, a, imm] = split_commas(text).ok_or_else(|| bad("expected Rd,Ra,#imm"))?;
            Ok(vec![
                register(d).map_err(bad)?,
                register(a).map_err(bad)?,
                immediate(imm).map_err(bad)?,
            ])
        }
        Shape::Offset => Ok(vec![number(text).map_err(bad)?]),
        Shape::RegMem => {
            let (d, mem) = text.split_once(',').ok_or_else(|| bad("expected Rd,[Ra,Rb]"))?;
            let inner = mem
                .strip_prefix('[')
                .and_then(|m| m.strip_suffix(']'))
                .ok_or_else(|| bad("expected [Ra,Rb] memory operand"))?;
            let (a, b) = inner
                .split_once(['+', ','])
                .ok_or_else(|| bad("expected [Ra,Rb] memory operand"))?;
            Ok(vec![
                register(d).map_err(bad)?,
                register(a).map_err(bad)?,
                register(b).map_err(bad)?,
            ])
        }
    }
}

fn split_commas<const N: usize>(text: &str) -> Option<[&str; N]> {
    let mut parts = text.split(',');
    let mut out = [""; N];
    for slot in &mut out {
        *slot = parts.next()?;
    }
    parts.next().is_none().then_some(out)
}

/// Decimal digits folded with wrapping arithmetic; the low bits stay exact,
/// which is all a field ever keeps.
fn decimal(s: &str) -> Result<i64, &'static str> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err("expected a decimal number");
    }
    Ok(s.bytes()
        .fold(0i64, |acc, b| acc.wrapping_mul(10).wrapping_add((b - b'0') as i64)))
}

fn register(tok: &str) -> Result<i64, &'static str> {
    let n = tok.strip_prefix('R').ok_or("expected a register")?;
    decimal(n)
}

fn number(tok: &str) -> Result<i64, &'static str> {
    let (negative, body) = match tok.as_bytes().first() {
        Some(b'-') => (true, &tok[1..]),
        Some(b'+') => (false, &tok[1..]),
        _ => (false, tok),
    };
    let v = decimal(body)?;
    Ok(if negative { v.wrapping_neg() } else { v })
}

fn immediate(tok: &str) -> Result<i64, &'static str> {
    let n = tok.strip_prefix('#').ok_or("expected #immediate")?;
    number(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_exact_operand_counts() {
        assert_eq!(split_commas::<3>("A,B,C"), Some(["A", "B", "C"]));
        assert_eq!(split_commas::<3>("A,B"), None);
        assert_eq!(split_commas::<3>("A,B,C,D"), None);
    }

    #[test]
    fn numbers_take_optional_sign() {
        assert_eq!(number("+12"), Ok(12));
        assert_eq!(number("-12"), Ok(-12));
        assert!(number("1X").is_err());
        assert!(number("-").is_err());
    }

    #[test]
    fn oversized_literals_keep_their_low_bits() {
        // 2^64 + 5
        assert_eq!(number("18446744073709551621"), Ok(5));
        assert_eq!(number("-18446744073709551621"), Ok(-5));
        assert_eq!(register("R40"), Ok(40));
    }
}
