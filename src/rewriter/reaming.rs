//! Reaming: finish the hole with the reamer family's conditions.

use rust_decimal::Decimal;
use tracing::instrument;

use super::{apply, StepValues};
use crate::conditions::{CuttingCondition, Material};
use crate::program::Program;

#[derive(Debug, Clone, Copy)]
pub struct ReamingArgs<'a> {
    pub template: &'a Program,
    pub material: Material,
    /// Reaming depth below the datum, positive
    pub depth: Decimal,
    pub sub_program_number: &'a str,
    pub condition: &'a CuttingCondition,
}

#[instrument(skip_all, fields(program = args.template.name(), depth = %args.depth))]
pub fn rewrite(args: ReamingArgs<'_>) -> crate::Result<Program> {
    let spin_feed = args.condition.for_material(args.material)?;

    Ok(apply(
        args.template,
        &StepValues {
            spin: spin_feed.spin,
            feed: spin_feed.feed,
            depth: -args.depth,
            cut_depth: None,
            sub_program_number: args.sub_program_number,
            drill_diameter: None,
        },
    ))
}
