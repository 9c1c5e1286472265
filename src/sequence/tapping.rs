//! Tapping jobs: center drill, pilot drill, chamfer, tap.

use rust_decimal::Decimal;
use tracing::{debug, instrument, warn};

use super::{ensure_material, pilot_drill, RewriteRequest, SequenceBuilder, SequenceStep};
use crate::conditions::MachiningConditions;
use crate::error::{RewriteError, ToolKind};
use crate::lookup;
use crate::parameters::{DrillingParameter, MainProgramParameter, TappingParameter};
use crate::program::Program;
use crate::rewriter::{self, CenterDrillingArgs, ChamferingArgs, DrillingArgs, TappingArgs};

const STEPS: [SequenceStep; 4] = [
    SequenceStep::CenterDrilling,
    SequenceStep::PilotDrilling,
    SequenceStep::Chamfering,
    SequenceStep::Tapping,
];

#[derive(Debug, Clone, Default)]
pub struct TappingSequenceBuilder {
    conditions: MachiningConditions,
}

/// Records one tapping job runs on.
#[derive(Clone, Copy)]
struct Tooling<'a> {
    tap: &'a TappingParameter,
    pilot: &'a DrillingParameter,
}

impl TappingSequenceBuilder {
    pub fn new(conditions: MachiningConditions) -> Self {
        Self { conditions }
    }

    fn select_tooling<'a>(&self, request: &'a RewriteRequest) -> crate::Result<Tooling<'a>> {
        let diameter = request.tool_diameter;
        let tap = lookup::find_exact(&request.tables.tapping, diameter).ok_or_else(|| {
            warn!(%diameter, "tap not catalogued");
            RewriteError::DiameterNotCatalogued {
                tool: ToolKind::Tap,
                diameter,
            }
        })?;
        let pilot = pilot_drill(&request.tables.drilling, tap.pilot_hole_diameter)?;
        debug!(tap = tap.diameter_key.label(), pilot = %pilot.target_diameter(), "selected tooling");
        Ok(Tooling { tap, pilot })
    }

    fn rewrite_step(
        &self,
        step: SequenceStep,
        request: &RewriteRequest,
        tooling: Tooling<'_>,
    ) -> crate::Result<Program> {
        let Tooling { tap, pilot } = tooling;
        let template = request.template(step.role())?;

        match step {
            SequenceStep::CenterDrilling => rewriter::center_drilling::rewrite(CenterDrillingArgs {
                template,
                material: request.material,
                center_drill_depth: tap.center_drill_depth(),
                sub_program_number: &request.sub_program_number,
                condition: &self.conditions.center_drilling,
            }),

            SequenceStep::PilotDrilling => rewriter::drilling::rewrite(DrillingArgs {
                template,
                material: request.material,
                depth: request
                    .drilling_method
                    .pilot_depth(request.thickness + pilot.drill_tip_length()),
                drill: pilot,
                sub_program_number: &request.sub_program_number,
                hole_diameter: tap.pilot_hole_diameter,
            }),

            SequenceStep::Chamfering => rewriter::chamfering::rewrite(ChamferingArgs {
                template,
                material: request.material,
                chamfering_depth: chamfering_depth(tap)?,
                sub_program_number: &request.sub_program_number,
                condition: &self.conditions.chamfering,
            }),

            SequenceStep::Tapping => rewriter::tapping::rewrite(TappingArgs {
                template,
                material: request.material,
                depth: request
                    .drilling_method
                    .hole_depth(request.thickness + self.conditions.through_hole_overrun),
                tap,
                sub_program_number: &request.sub_program_number,
            }),

            other => Err(RewriteError::UnhandledStep(other)),
        }
    }
}

/// Every tapped hole is chamfered, so the record must carry a depth.
fn chamfering_depth(tap: &TappingParameter) -> crate::Result<Decimal> {
    tap.chamfering_depth().ok_or_else(|| {
        warn!(tap = tap.diameter_key.label(), "tap record has no chamfering depth");
        RewriteError::MissingChamferingDepth {
            tool: ToolKind::Tap,
            diameter: tap.target_diameter(),
        }
    })
}

impl SequenceBuilder for TappingSequenceBuilder {
    fn name(&self) -> &str {
        "tapping"
    }

    #[instrument(skip_all, fields(diameter = %request.tool_diameter, material = %request.material))]
    fn rewrite_by_tool(&self, request: &RewriteRequest) -> crate::Result<Vec<Program>> {
        ensure_material(request.material)?;
        let tooling = self.select_tooling(request)?;

        STEPS
            .iter()
            .map(|&step| self.rewrite_step(step, request, tooling))
            .collect()
    }
}
