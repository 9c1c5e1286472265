//! Drilling and pilot drilling: peck the hole with the drill picked from the
//! catalogue.

use rust_decimal::Decimal;
use tracing::instrument;

use super::{apply, StepValues};
use crate::conditions::Material;
use crate::parameters::DrillingParameter;
use crate::program::Program;

#[derive(Debug, Clone, Copy)]
pub struct DrillingArgs<'a> {
    pub template: &'a Program,
    pub material: Material,
    /// Hole depth below the datum, positive
    pub depth: Decimal,
    pub drill: &'a DrillingParameter,
    pub sub_program_number: &'a str,
    /// Hole diameter this drilling is for, shown in the `DR` comment
    pub hole_diameter: Decimal,
}

#[instrument(skip_all, fields(program = args.template.name(), hole = %args.hole_diameter, depth = %args.depth))]
pub fn rewrite(args: DrillingArgs<'_>) -> crate::Result<Program> {
    let spin_feed = args.drill.cutting.for_material(args.material)?;

    Ok(apply(
        args.template,
        &StepValues {
            spin: spin_feed.spin,
            feed: spin_feed.feed,
            depth: -args.depth,
            cut_depth: Some(args.drill.cut_depth),
            sub_program_number: args.sub_program_number,
            drill_diameter: Some(args.hole_diameter),
        },
    ))
}
