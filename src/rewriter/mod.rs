//! Per-step word rewriters
//!
//! Each machining step has its own module that works out the values for its
//! placeholders (spin, feed, depth, ...) and hands them to [`apply`]. Only
//! placeholder words are touched; concrete words and addresses a step does not
//! know pass through unchanged.

use rust_decimal::Decimal;

use crate::program::{Address, Program, Value, ValueKind, ValueWord, Word};

pub mod center_drilling;
pub mod chamfering;
pub mod drilling;
pub mod reaming;
pub mod tapping;

pub use center_drilling::CenterDrillingArgs;
pub use chamfering::ChamferingArgs;
pub use drilling::DrillingArgs;
pub use reaming::ReamingArgs;
pub use tapping::TappingArgs;

/// Comment that receives the drill diameter, e.g. `(DR)` becomes `(DR 11.1)`.
pub const DRILL_DIAMETER_LABEL: &str = "DR";

/// Values one step writes into its template.
#[derive(Debug, Clone, PartialEq)]
pub struct StepValues<'a> {
    pub spin: Decimal,
    pub feed: Decimal,
    /// Z as written, sign included
    pub depth: Decimal,
    /// Q; `None` leaves `Q*` for whoever owns it
    pub cut_depth: Option<Decimal>,
    pub sub_program_number: &'a str,
    /// Appended to the `DR` comment when set
    pub drill_diameter: Option<Decimal>,
}

/// Rewrite every placeholder of `template` the step knows about.
pub fn apply(template: &Program, values: &StepValues<'_>) -> Program {
    template.map_words(|word| rewrite_word(word, values))
}

fn rewrite_word(word: &Word, values: &StepValues<'_>) -> Word {
    match word {
        Word::Comment(text) => match values.drill_diameter {
            Some(diameter) if text == DRILL_DIAMETER_LABEL => {
                Word::Comment(format!("{} {}", text, diameter))
            }
            _ => word.clone(),
        },
        Word::Value(value_word) if value_word.value.is_placeholder() => {
            rewrite_placeholder(value_word, values)
                .map(Word::Value)
                .unwrap_or_else(|| word.clone())
        }
        Word::Value(_) => word.clone(),
    }
}

/// The address decides how a value is written, whatever the template's
/// placeholder was tagged with.
fn rewrite_placeholder(word: &ValueWord, values: &StepValues<'_>) -> Option<ValueWord> {
    let value = match word.address {
        Address::SPIN => resolved(ValueKind::Numeric, values.spin),
        Address::FEED => resolved(ValueKind::Numeric, values.feed),
        Address::DEPTH => resolved(ValueKind::Coordinate, values.depth),
        Address::CUT_DEPTH => resolved(ValueKind::Coordinate, values.cut_depth?),
        Address::SUB_PROGRAM => {
            Value::placeholder(ValueKind::Numeric).resolve_literal(values.sub_program_number)
        }
        _ => return None,
    };
    Some(word.with_value(value))
}

fn resolved(kind: ValueKind, number: Decimal) -> Value {
    Value::placeholder(kind).resolve(number)
}
