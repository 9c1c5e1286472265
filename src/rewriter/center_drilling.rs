//! Center drilling: spot the hole at the catalogued center-drill depth.

use rust_decimal::Decimal;
use tracing::instrument;

use super::{apply, StepValues};
use crate::conditions::{CuttingCondition, Material};
use crate::program::Program;

#[derive(Debug, Clone, Copy)]
pub struct CenterDrillingArgs<'a> {
    pub template: &'a Program,
    pub material: Material,
    /// Catalogued depth, written as-is
    pub center_drill_depth: Decimal,
    pub sub_program_number: &'a str,
    pub condition: &'a CuttingCondition,
}

#[instrument(skip_all, fields(program = args.template.name(), depth = %args.center_drill_depth))]
pub fn rewrite(args: CenterDrillingArgs<'_>) -> crate::Result<Program> {
    let spin_feed = args.condition.for_material(args.material)?;

    Ok(apply(
        args.template,
        &StepValues {
            spin: spin_feed.spin,
            feed: spin_feed.feed,
            depth: args.center_drill_depth,
            cut_depth: None,
            sub_program_number: args.sub_program_number,
            drill_diameter: None,
        },
    ))
}
