//! Sequence builders
//!
//! One builder per tool family. A builder resolves the catalogue records for
//! the request, drives the step rewriters over the templates in machining
//! order and returns the finished programs. Any failure aborts the whole
//! sequence; there is no partial result.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::conditions::MachiningConditions;
use crate::error::{FitPurpose, RewriteError};
use crate::lookup;
use crate::parameters::{DrillingParameter, ReamingParameter, TappingParameter};
use crate::program::{Program, ProgramRole};

pub mod drilling;
pub mod reaming;
pub mod tapping;

pub use crate::conditions::{Material, ReamerFamily};
pub use drilling::{patch_program_end, DrillingSequenceBuilder};
pub use reaming::ReamingSequenceBuilder;
pub use tapping::TappingSequenceBuilder;

/// Step of a machining sequence. `PilotDrilling` runs off the drilling
/// template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceStep {
    CenterDrilling,
    Drilling,
    PilotDrilling,
    Chamfering,
    Tapping,
    Reaming,
}

impl SequenceStep {
    pub fn role(self) -> ProgramRole {
        match self {
            SequenceStep::CenterDrilling => ProgramRole::CenterDrilling,
            SequenceStep::Drilling | SequenceStep::PilotDrilling => ProgramRole::Drilling,
            SequenceStep::Chamfering => ProgramRole::Chamfering,
            SequenceStep::Tapping => ProgramRole::Tapping,
            SequenceStep::Reaming => ProgramRole::Reaming,
        }
    }
}

impl std::fmt::Display for SequenceStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SequenceStep::CenterDrilling => write!(f, "center drilling"),
            SequenceStep::Drilling => write!(f, "drilling"),
            SequenceStep::PilotDrilling => write!(f, "pilot drilling"),
            SequenceStep::Chamfering => write!(f, "chamfering"),
            SequenceStep::Tapping => write!(f, "tapping"),
            SequenceStep::Reaming => write!(f, "reaming"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrillingMethod {
    ThroughHole,
    /// Fixed depths for a hole that stops inside the stock
    BlindHole {
        pilot_hole_depth: Decimal,
        hole_depth: Decimal,
    },
}

impl DrillingMethod {
    /// Depth of a pilot hole; `through` is what a through hole would need.
    pub fn pilot_depth(&self, through: Decimal) -> Decimal {
        match self {
            DrillingMethod::ThroughHole => through,
            DrillingMethod::BlindHole {
                pilot_hole_depth, ..
            } => *pilot_hole_depth,
        }
    }

    /// Depth of the finished hole; `through` is what a through hole would need.
    pub fn hole_depth(&self, through: Decimal) -> Decimal {
        match self {
            DrillingMethod::ThroughHole => through,
            DrillingMethod::BlindHole { hole_depth, .. } => *hole_depth,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterTables {
    pub drilling: Vec<DrillingParameter>,
    pub tapping: Vec<TappingParameter>,
    pub crystal_reaming: Vec<ReamingParameter>,
    pub skill_reaming: Vec<ReamingParameter>,
}

impl ParameterTables {
    pub fn reaming(&self, family: ReamerFamily) -> &[ReamingParameter] {
        match family {
            ReamerFamily::Crystal => &self.crystal_reaming,
            ReamerFamily::Skill => &self.skill_reaming,
        }
    }
}

/// Everything one rewrite needs.
#[derive(Debug, Clone, PartialEq)]
pub struct RewriteRequest {
    /// One template per program role
    pub templates: Vec<Program>,
    pub material: Material,
    pub thickness: Decimal,
    /// Substituted verbatim into `P*`
    pub sub_program_number: String,
    /// Tool diameter the job asks for
    pub tool_diameter: Decimal,
    pub drilling_method: DrillingMethod,
    pub tables: ParameterTables,
}

impl RewriteRequest {
    /// First template tagged with `role`.
    pub fn template(&self, role: ProgramRole) -> crate::Result<&Program> {
        self.templates
            .iter()
            .find(|program| program.role() == role)
            .ok_or(RewriteError::MissingTemplate(role))
    }
}

/// Entry point of a tool family.
pub trait SequenceBuilder: Send + Sync {
    fn name(&self) -> &str;

    /// Rewritten programs in machining order.
    fn rewrite_by_tool(&self, request: &RewriteRequest) -> crate::Result<Vec<Program>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolFamily {
    Drilling,
    Tapping,
    CrystalReaming,
    SkillReaming,
}

impl ToolFamily {
    pub fn builder(self, conditions: MachiningConditions) -> Box<dyn SequenceBuilder> {
        match self {
            ToolFamily::Drilling => Box::new(DrillingSequenceBuilder::new(conditions)),
            ToolFamily::Tapping => Box::new(TappingSequenceBuilder::new(conditions)),
            ToolFamily::CrystalReaming => {
                Box::new(ReamingSequenceBuilder::new(ReamerFamily::Crystal, conditions))
            }
            ToolFamily::SkillReaming => {
                Box::new(ReamingSequenceBuilder::new(ReamerFamily::Skill, conditions))
            }
        }
    }
}

fn ensure_material(material: Material) -> crate::Result<()> {
    if material == Material::Undefined {
        warn!("rejecting request with undefined material");
        return Err(RewriteError::InvalidMaterial);
    }
    Ok(())
}

/// Best-fit drill for a pilot hole.
fn pilot_drill(drills: &[DrillingParameter], diameter: Decimal) -> crate::Result<&DrillingParameter> {
    lookup::find_best_fit(drills, diameter).ok_or_else(|| {
        warn!(%diameter, "no drill fits pilot hole");
        RewriteError::NoFittingDiameter {
            purpose: FitPurpose::PilotHole,
            diameter,
        }
    })
}
