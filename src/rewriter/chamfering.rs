//! Chamfering: break the hole edge at the catalogued chamfer depth.

use rust_decimal::Decimal;
use tracing::instrument;

use super::{apply, StepValues};
use crate::conditions::{CuttingCondition, Material};
use crate::program::Program;

#[derive(Debug, Clone, Copy)]
pub struct ChamferingArgs<'a> {
    pub template: &'a Program,
    pub material: Material,
    /// Written as-is, sign included
    pub chamfering_depth: Decimal,
    pub sub_program_number: &'a str,
    pub condition: &'a CuttingCondition,
}

#[instrument(skip_all, fields(program = args.template.name(), depth = %args.chamfering_depth))]
pub fn rewrite(args: ChamferingArgs<'_>) -> crate::Result<Program> {
    let spin_feed = args.condition.for_material(args.material)?;

    Ok(apply(
        args.template,
        &StepValues {
            spin: spin_feed.spin,
            feed: spin_feed.feed,
            depth: args.chamfering_depth,
            cut_depth: None,
            sub_program_number: args.sub_program_number,
            drill_diameter: None,
        },
    ))
}
