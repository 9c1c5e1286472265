//! Drilling-only jobs: center drill, drill, chamfer.
//!
//! The chamfer is the last thing the machine does on such a job, so its
//! closing `M1` (return to the calling program) becomes `M30`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, instrument, warn};

use super::{ensure_material, RewriteRequest, SequenceBuilder, SequenceStep};
use crate::conditions::MachiningConditions;
use crate::error::{FitPurpose, RewriteError};
use crate::lookup;
use crate::parameters::{DrillingParameter, MainProgramParameter};
use crate::program::{Address, Program, ProgramRole, Word};
use crate::rewriter::{self, CenterDrillingArgs, ChamferingArgs, DrillingArgs};

/// How far a request may exceed the largest catalogued drill.
pub const DIAMETER_TOLERANCE: Decimal = dec!(0.5);

/// `M1`: optional stop closing each step's program
const SUB_PROGRAM_RETURN: Decimal = dec!(1);
/// `M30`: end of program and rewind
const PROGRAM_END: &str = "30";

const STEPS: [SequenceStep; 3] = [
    SequenceStep::CenterDrilling,
    SequenceStep::Drilling,
    SequenceStep::Chamfering,
];

#[derive(Debug, Clone, Default)]
pub struct DrillingSequenceBuilder {
    conditions: MachiningConditions,
}

impl DrillingSequenceBuilder {
    pub fn new(conditions: MachiningConditions) -> Self {
        Self { conditions }
    }

    fn select_drill<'a>(&self, request: &'a RewriteRequest) -> crate::Result<&'a DrillingParameter> {
        let drills = &request.tables.drilling;
        let requested = request.tool_diameter;

        if let Some(maximum) = lookup::max_diameter(drills) {
            if maximum + DIAMETER_TOLERANCE < requested {
                warn!(%requested, %maximum, "drill diameter beyond catalogue");
                return Err(RewriteError::DiameterOutOfRange { requested, maximum });
            }
        }

        let drill = lookup::find_best_fit(drills, requested).ok_or_else(|| {
            warn!(%requested, "no drill fits requested diameter");
            RewriteError::NoFittingDiameter {
                purpose: FitPurpose::Drill,
                diameter: requested,
            }
        })?;
        debug!(drill = %drill.target_diameter(), "selected drill");
        Ok(drill)
    }

    fn rewrite_step(
        &self,
        step: SequenceStep,
        request: &RewriteRequest,
        drill: &DrillingParameter,
    ) -> crate::Result<Program> {
        let template = request.template(step.role())?;

        match step {
            SequenceStep::CenterDrilling => rewriter::center_drilling::rewrite(CenterDrillingArgs {
                template,
                material: request.material,
                center_drill_depth: drill.center_drill_depth,
                sub_program_number: &request.sub_program_number,
                condition: &self.conditions.center_drilling,
            }),

            SequenceStep::Drilling => rewriter::drilling::rewrite(DrillingArgs {
                template,
                material: request.material,
                depth: request
                    .drilling_method
                    .hole_depth(request.thickness + drill.drill_tip_length()),
                drill,
                sub_program_number: &request.sub_program_number,
                hole_diameter: request.tool_diameter,
            }),

            SequenceStep::Chamfering => {
                let chamfered = rewriter::chamfering::rewrite(ChamferingArgs {
                    template,
                    material: request.material,
                    chamfering_depth: drill.chamfer_depth(),
                    sub_program_number: &request.sub_program_number,
                    condition: &self.conditions.chamfering,
                })?;
                patch_program_end(&chamfered)
            }

            other => Err(RewriteError::UnhandledStep(other)),
        }
    }
}

impl SequenceBuilder for DrillingSequenceBuilder {
    fn name(&self) -> &str {
        "drilling"
    }

    #[instrument(skip_all, fields(diameter = %request.tool_diameter, material = %request.material))]
    fn rewrite_by_tool(&self, request: &RewriteRequest) -> crate::Result<Vec<Program>> {
        ensure_material(request.material)?;
        let drill = self.select_drill(request)?;

        STEPS
            .iter()
            .map(|&step| self.rewrite_step(step, request, drill))
            .collect()
    }
}

/// Turn the last `M1` of a chamfering program into `M30`.
///
/// Blocks are scanned from the end, words from the end of each block; only
/// the first `M1` found changes. Skippable blocks are left alone. A program
/// without `M1` comes back unchanged.
pub fn patch_program_end(program: &Program) -> crate::Result<Program> {
    if program.role() != ProgramRole::Chamfering {
        return Err(RewriteError::StructuralPrecondition {
            expected: ProgramRole::Chamfering,
            actual: program.role(),
        });
    }

    let position = program
        .blocks()
        .iter()
        .enumerate()
        .rev()
        .filter(|(_, block)| !block.is_skippable())
        .find_map(|(block_index, block)| {
            block
                .words()
                .iter()
                .rposition(is_sub_program_return)
                .map(|word_index| (block_index, word_index))
        });

    let Some((block_index, word_index)) = position else {
        debug!(program = program.name(), "no M1 to patch");
        return Ok(program.clone());
    };

    let blocks = program
        .blocks()
        .iter()
        .enumerate()
        .map(|(index, block)| {
            if index != block_index {
                return block.clone();
            }
            let words = block
                .words()
                .iter()
                .enumerate()
                .map(|(index, word)| match word {
                    Word::Value(stop) if index == word_index => {
                        Word::Value(stop.with_value(stop.value.resolve_literal(PROGRAM_END)))
                    }
                    _ => word.clone(),
                })
                .collect();
            block.with_words(words)
        })
        .collect();

    Ok(program.with_blocks(blocks))
}

fn is_sub_program_return(word: &Word) -> bool {
    match word {
        Word::Value(w) => w.address == Address::MISC && w.value.number() == Some(SUB_PROGRAM_RETURN),
        Word::Comment(_) => false,
    }
}
