//! Failure taxonomy shared by lookups, rewriters and sequence builders

use rust_decimal::Decimal;
use thiserror::Error;

use crate::program::ProgramRole;
use crate::sequence::SequenceStep;

/// Catalogue a diameter was looked up in, used to word the error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Drill,
    Tap,
    Reamer,
}

impl std::fmt::Display for ToolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToolKind::Drill => write!(f, "drill"),
            ToolKind::Tap => write!(f, "tap"),
            ToolKind::Reamer => write!(f, "reamer"),
        }
    }
}

/// What a best-fit drill lookup was trying to satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitPurpose {
    /// The drill for the requested hole of a drilling-only job
    Drill,
    /// A pilot hole ahead of tapping or reaming
    PilotHole,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RewriteError {
    #[error("material is undefined")]
    InvalidMaterial,

    #[error("no {tool} parameter list for diameter {diameter}")]
    DiameterNotCatalogued { tool: ToolKind, diameter: Decimal },

    #[error("{}", no_fit_message(.purpose, .diameter))]
    NoFittingDiameter { purpose: FitPurpose, diameter: Decimal },

    #[error("no drill parameter list for drill diameter {requested}: exceeds the list maximum ({maximum})")]
    DiameterOutOfRange { requested: Decimal, maximum: Decimal },

    #[error("no chamfering depth in the {tool} parameter list for diameter {diameter}")]
    MissingChamferingDepth { tool: ToolKind, diameter: Decimal },

    #[error("end-of-program patch expects a {expected} program, got {actual}")]
    StructuralPrecondition {
        expected: ProgramRole,
        actual: ProgramRole,
    },

    #[error("no rewriter registered for step {0}")]
    UnhandledStep(SequenceStep),

    #[error("no template program for {0}")]
    MissingTemplate(ProgramRole),

    #[error("cannot read the {tool} diameter from key {key:?}, check its format")]
    InvalidDiameterKey { tool: ToolKind, key: String },
}

fn no_fit_message(purpose: &FitPurpose, diameter: &Decimal) -> String {
    match purpose {
        FitPurpose::Drill => format!("no drill parameter list for drill diameter {}", diameter),
        FitPurpose::PilotHole => {
            format!("no drill in the list fits pilot hole diameter {}", diameter)
        }
    }
}

/// Errors raised while loading cutting-condition overrides.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("malformed machining conditions: {0}")]
    Json(#[from] serde_json::Error),
}
