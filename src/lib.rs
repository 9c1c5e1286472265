//! NC program sequence rewriting
//!
//! Takes tool-agnostic template programs (center drilling, drilling,
//! chamfering, tapping, reaming) and specializes them for one material,
//! stock thickness, tool diameter and drilling method. Placeholder words
//! (`S*`, `F*`, `Z*`, `Q*`, `P*`) are resolved from the parameter tables and
//! the programs come back in machining order.
//!
//! Parsing raw program text and loading the parameter tables are the
//! caller's business; this crate only works on the structured word model.

pub mod conditions;
pub mod error;
pub mod lookup;
pub mod parameters;
pub mod program;
pub mod rewriter;
pub mod sequence;

#[cfg(test)]
mod fixtures;

pub use conditions::{CuttingCondition, MachiningConditions, SpinFeed};
pub use error::{ConfigError, FitPurpose, RewriteError, ToolKind};
pub use parameters::{
    DrillTipLength, DrillingParameter, MainProgramParameter, ReamingParameter, TappingParameter,
};
pub use program::{Address, Block, Program, ProgramRole, Value, ValueKind, Word};
pub use sequence::{
    DrillingMethod, DrillingSequenceBuilder, Material, ParameterTables, ReamerFamily,
    ReamingSequenceBuilder, RewriteRequest, SequenceBuilder, SequenceStep,
    TappingSequenceBuilder, ToolFamily,
};

pub type Result<T> = std::result::Result<T, RewriteError>;
