//! Tapping: cut the thread with the tap's own spin and feed.

use rust_decimal::Decimal;
use tracing::instrument;

use super::{apply, StepValues};
use crate::conditions::Material;
use crate::parameters::TappingParameter;
use crate::program::Program;

#[derive(Debug, Clone, Copy)]
pub struct TappingArgs<'a> {
    pub template: &'a Program,
    pub material: Material,
    /// Thread depth below the datum, positive
    pub depth: Decimal,
    pub tap: &'a TappingParameter,
    pub sub_program_number: &'a str,
}

#[instrument(skip_all, fields(program = args.template.name(), tap = args.tap.diameter_key.label(), depth = %args.depth))]
pub fn rewrite(args: TappingArgs<'_>) -> crate::Result<Program> {
    let spin_feed = args.tap.cutting.for_material(args.material)?;

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
