//! Word model for NC programs
//!
//! A program is an ordered list of blocks, a block an ordered list of words.
//! Everything here is immutable: rewrites build a new `Program` and leave the
//! template untouched.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Literal a template uses for a value that still has to be resolved.
pub const PLACEHOLDER: &str = "*";

/// Machining step a program is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProgramRole {
    CenterDrilling,
    Drilling,
    Chamfering,
    Reaming,
    Tapping,
}

impl std::fmt::Display for ProgramRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProgramRole::CenterDrilling => write!(f, "center drilling"),
            ProgramRole::Drilling => write!(f, "drilling"),
            ProgramRole::Chamfering => write!(f, "chamfering"),
            ProgramRole::Reaming => write!(f, "reaming"),
            ProgramRole::Tapping => write!(f, "tapping"),
        }
    }
}

/// Word address letter (`S`, `F`, `Z`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address(char);

impl Address {
    pub const SPIN: Address = Address('S');
    pub const FEED: Address = Address('F');
    pub const DEPTH: Address = Address('Z');
    /// Peck depth of a G83 cycle
    pub const CUT_DEPTH: Address = Address('Q');
    pub const SUB_PROGRAM: Address = Address('P');
    /// Miscellaneous function, carries the stop codes
    pub const MISC: Address = Address('M');

    pub fn new(letter: char) -> Self {
        Address(letter.to_ascii_uppercase())
    }

    pub fn letter(self) -> char {
        self.0
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How the controller reads a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueKind {
    /// Written as-is (spin, feed, program numbers, M codes)
    Numeric,
    /// Coordinates: without a decimal point the controller divides by 1000
    Coordinate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Value {
    kind: ValueKind,
    literal: String,
    placeholder: bool,
}

impl Value {
    pub fn numeric(literal: impl Into<String>) -> Self {
        Self::concrete(ValueKind::Numeric, literal.into())
    }

    /// Coordinate value taken verbatim, e.g. from a parsed template.
    pub fn coordinate(literal: impl Into<String>) -> Self {
        Self::concrete(ValueKind::Coordinate, literal.into())
    }

    pub fn placeholder(kind: ValueKind) -> Self {
        Self {
            kind,
            literal: PLACEHOLDER.to_string(),
            placeholder: true,
        }
    }

    fn concrete(kind: ValueKind, literal: String) -> Self {
        Self {
            kind,
            literal,
            placeholder: false,
        }
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn literal(&self) -> &str {
        &self.literal
    }

    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }

    /// Numeric reading of the literal. `None` for placeholders.
    pub fn number(&self) -> Option<Decimal> {
        if self.placeholder {
            return None;
        }
        let trimmed = self.literal.strip_suffix('.').unwrap_or(&self.literal);
        Decimal::from_str(trimmed).ok()
    }

    /// Resolved copy of this value. Coordinates always get a decimal point.
    pub fn resolve(&self, number: Decimal) -> Self {
        self.resolve_literal(number.to_string())
    }

    /// Resolved copy carrying `literal` verbatim (coordinates still get
    /// their decimal point).
    pub fn resolve_literal(&self, literal: impl Into<String>) -> Self {
        let literal = literal.into();
        let literal = match self.kind {
            ValueKind::Numeric => literal,
            ValueKind::Coordinate => add_decimal_point(&literal),
        };
        Self::concrete(self.kind, literal)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.literal)
    }
}

/// The parameter lists omit the decimal point on whole numbers; append one so
/// the controller doesn't scale the coordinate by 1/1000.
pub fn add_decimal_point(literal: &str) -> String {
    if literal.contains('.') {
        literal.to_string()
    } else {
        format!("{}.", literal)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueWord {
    pub address: Address,
    pub value: Value,
}

impl ValueWord {
    pub fn new(address: Address, value: Value) -> Self {
        Self { address, value }
    }

    pub fn with_value(&self, value: Value) -> Self {
        Self {
            address: self.address,
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Word {
    Comment(String),
    Value(ValueWord),
}

impl Word {
    pub fn comment(text: impl Into<String>) -> Self {
        Word::Comment(text.into())
    }

    pub fn value(address: char, value: Value) -> Self {
        Word::Value(ValueWord::new(Address::new(address), value))
    }

    pub fn numeric(address: char, literal: impl Into<String>) -> Self {
        Self::value(address, Value::numeric(literal))
    }

    pub fn coordinate(address: char, literal: impl Into<String>) -> Self {
        Self::value(address, Value::coordinate(literal))
    }
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Word::Comment(text) => write!(f, "({})", text),
            Word::Value(word) => write!(f, "{}{}", word.address, word.value),
        }
    }
}

/// One line of a program. A block without words is a blank line.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Block {
    words: Vec<Word>,
    skippable: bool,
}

impl Block {
    pub fn new(words: Vec<Word>) -> Self {
        Self {
            words,
            skippable: false,
        }
    }

    /// Block behind a `/` optional skip
    pub fn skippable(words: Vec<Word>) -> Self {
        Self {
            words,
            skippable: true,
        }
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn is_skippable(&self) -> bool {
        self.skippable
    }

    /// Same block, skip flag kept, with `words` swapped in.
    pub fn with_words(&self, words: Vec<Word>) -> Self {
        Self {
            words,
            skippable: self.skippable,
        }
    }

    pub fn map_words(&self, f: impl FnMut(&Word) -> Word) -> Self {
        self.with_words(self.words.iter().map(f).collect())
    }
}

impl std::fmt::Display for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.skippable {
            write!(f, "/")?;
        }
        for word in &self.words {
            write!(f, "{}", word)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    name: String,
    role: ProgramRole,
    blocks: Vec<Block>,
}

impl Program {
    pub fn new(name: impl Into<String>, role: ProgramRole, blocks: Vec<Block>) -> Self {
        Self {
            name: name.into(),
            role,
            blocks,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> ProgramRole {
        self.role
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Same program with `blocks` swapped in.
    pub fn with_blocks(&self, blocks: Vec<Block>) -> Self {
        Self {
            name: self.name.clone(),
            role: self.role,
            blocks,
        }
    }

    /// Rewrite every word in order, skippable blocks excluded.
    pub fn map_words(&self, mut f: impl FnMut(&Word) -> Word) -> Self {
        let blocks = self
            .blocks
            .iter()
            .map(|block| {
                if block.is_skippable() {
                    block.clone()
                } else {
                    block.map_words(&mut f)
                }
            })
            .collect();
        self.with_blocks(blocks)
    }

    /// Value words in program order
    pub fn value_words(&self) -> impl Iterator<Item = &ValueWord> {
        self.blocks
            .iter()
            .flat_map(|block| block.words())
            .filter_map(|word| match word {
                Word::Value(value_word) => Some(value_word),
                Word::Comment(_) => None,
            })
    }

    pub fn first_value(&self, address: Address) -> Option<&Value> {
        self.value_words()
            .find(|word| word.address == address)
            .map(|word| &word.value)
    }

    pub fn comments(&self) -> impl Iterator<Item = &str> {
        self.blocks
            .iter()
            .flat_map(|block| block.words())
            .filter_map(|word| match word {
                Word::Comment(text) => Some(text.as_str()),
                Word::Value(_) => None,
            })
    }

    pub fn has_placeholders(&self) -> bool {
        self.value_words().any(|word| word.value.is_placeholder())
    }
}

impl std::fmt::Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lines: Vec<String> = self.blocks.iter().map(|b| b.to_string()).collect();
        write!(f, "{}", lines.join("\n"))
    }
}
