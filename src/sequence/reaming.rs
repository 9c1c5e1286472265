//! Reaming jobs: center drill, two pilot holes, optional chamfer, ream.
//!
//! Crystal and skill reamers sequence the same way; the family only picks the
//! catalogue and the reamer's cutting condition.

use rust_decimal::Decimal;
use tracing::{debug, instrument, warn};

use super::{ensure_material, pilot_drill, RewriteRequest, SequenceBuilder, SequenceStep};
use crate::conditions::{MachiningConditions, ReamerFamily};
use crate::error::{RewriteError, ToolKind};
use crate::lookup;
use crate::parameters::{DrillingParameter, MainProgramParameter, ReamingParameter};
use crate::program::Program;
use crate::rewriter::{self, CenterDrillingArgs, ChamferingArgs, DrillingArgs, ReamingArgs};

#[derive(Debug, Clone)]
pub struct ReamingSequenceBuilder {
    family: ReamerFamily,
    name: String,
    conditions: MachiningConditions,
}

#[derive(Clone, Copy)]
struct PilotHole<'a> {
    diameter: Decimal,
    drill: &'a DrillingParameter,
}

impl ReamingSequenceBuilder {
    pub fn new(family: ReamerFamily, conditions: MachiningConditions) -> Self {
        Self {
            family,
            name: format!("{} reaming", family),
            conditions,
        }
    }

    pub fn family(&self) -> ReamerFamily {
        self.family
    }

    fn select_reamer<'a>(&self, request: &'a RewriteRequest) -> crate::Result<&'a ReamingParameter> {
        let diameter = request.tool_diameter;
        lookup::find_exact(request.tables.reaming(self.family), diameter).ok_or_else(|| {
            warn!(%diameter, family = %self.family, "reamer not catalogued");
            RewriteError::DiameterNotCatalogued {
                tool: ToolKind::Reamer,
                diameter,
            }
        })
    }

    /// Both pilot holes in drilling order.
    fn select_pilots<'a>(
        &self,
        request: &'a RewriteRequest,
        reamer: &ReamingParameter,
    ) -> crate::Result<[PilotHole<'a>; 2]> {
        let pilot = |diameter: Decimal| -> crate::Result<PilotHole<'a>> {
            let drill = pilot_drill(&request.tables.drilling, diameter)?;
            debug!(pilot = %diameter, drill = %drill.target_diameter(), "selected pilot drill");
            Ok(PilotHole { diameter, drill })
        };
        Ok([
            pilot(reamer.pilot_hole_diameter)?,
            pilot(reamer.second_pilot_hole_diameter)?,
        ])
    }

    fn rewrite_pilot(&self, request: &RewriteRequest, pilot: PilotHole<'_>) -> crate::Result<Program> {
        rewriter::drilling::rewrite(DrillingArgs {
            template: request.template(SequenceStep::PilotDrilling.role())?,
            material: request.material,
            depth: request
                .drilling_method
                .pilot_depth(request.thickness + pilot.drill.drill_tip_length()),
            drill: pilot.drill,
            sub_program_number: &request.sub_program_number,
            hole_diameter: pilot.diameter,
        })
    }
}

impl SequenceBuilder for ReamingSequenceBuilder {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(skip_all, fields(family = %self.family, diameter = %request.tool_diameter, material = %request.material))]
    fn rewrite_by_tool(&self, request: &RewriteRequest) -> crate::Result<Vec<Program>> {
        ensure_material(request.material)?;
        let reamer = self.select_reamer(request)?;
        let [first, second] = self.select_pilots(request, reamer)?;

        let mut programs = Vec::with_capacity(5);

        programs.push(rewriter::center_drilling::rewrite(CenterDrillingArgs {
            template: request.template(SequenceStep::CenterDrilling.role())?,
            material: request.material,
            center_drill_depth: reamer.center_drill_depth(),
            sub_program_number: &request.sub_program_number,
            condition: &self.conditions.center_drilling,
        })?);

        programs.push(self.rewrite_pilot(request, first)?);
        programs.push(self.rewrite_pilot(request, second)?);

        if let Some(chamfering_depth) = reamer.chamfering_depth() {
            programs.push(rewriter::chamfering::rewrite(ChamferingArgs {
                template: request.template(SequenceStep::Chamfering.role())?,
                material: request.material,
                chamfering_depth,
                sub_program_number: &request.sub_program_number,
                condition: &self.conditions.chamfering,
            })?);
        }

        programs.push(rewriter::reaming::rewrite(ReamingArgs {
            template: request.template(SequenceStep::Reaming.role())?,
            material: request.material,
            depth: request
                .drilling_method
                .hole_depth(request.thickness + self.conditions.through_hole_overrun),
            sub_program_number: &request.sub_program_number,
            condition: self.conditions.reamer(self.family),
        })?);

        Ok(programs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditions::Material;
    use crate::error::FitPurpose;
    use crate::fixtures;
    use crate::program::{Address, ProgramRole};
    use crate::sequence::DrillingMethod;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn skill() -> ReamingSequenceBuilder {
        ReamingSequenceBuilder::new(ReamerFamily::Skill, MachiningConditions::default())
    }

    fn crystal() -> ReamingSequenceBuilder {
        ReamingSequenceBuilder::new(ReamerFamily::Crystal, MachiningConditions::default())
    }

    fn roles(programs: &[Program]) -> Vec<ProgramRole> {
        programs.iter().map(|p| p.role()).collect()
    }

    #[test]
    fn test_reaming_sequence_with_chamfer() {
        let request = fixtures::request(Material::Aluminum, dec!(12.3));
        let programs = skill().rewrite_by_tool(&request).unwrap();

        assert_eq!(
            roles(&programs),
            vec![
                ProgramRole::CenterDrilling,
                ProgramRole::Drilling,
                ProgramRole::Drilling,
                ProgramRole::Chamfering,
                ProgramRole::Reaming
            ]
        );
        assert!(programs.iter().all(|p| !p.has_placeholders()));
    }

    #[test]
    fn test_no_chamfer_depth_skips_chamfering() {
        let mut request = fixtures::request(Material::Aluminum, dec!(12.3));
        request.tables.skill_reaming[0].chamfering_depth = None;
        let programs = skill().rewrite_by_tool(&request).unwrap();

        assert_eq!(programs.len(), 4);
        assert!(!roles(&programs).contains(&ProgramRole::Chamfering));
    }

    #[test]
    fn test_pilot_holes_in_order() {
        let request = fixtures::request(Material::Aluminum, dec!(12.3));
        let programs = skill().rewrite_by_tool(&request).unwrap();
        let (first, second) = (&programs[1], &programs[2]);

        assert_eq!(first.comments().next(), Some("DR 9.1"));
        assert_eq!(fixtures::number(first, Address::SPIN), Some(dec!(1100)));
        // 12.3 + 2.7 tip
        assert_eq!(fixtures::literal(first, Address::DEPTH), Some("-15.0"));

        assert_eq!(second.comments().next(), Some("DR 11.1"));
        assert_eq!(fixtures::number(second, Address::SPIN), Some(dec!(870)));
        assert_eq!(fixtures::literal(second, Address::DEPTH), Some("-15.6"));
    }

    #[test]
    fn test_reaming_depth_and_conditions() {
        let request = fixtures::request(Material::Aluminum, dec!(12.3));
        let skill_programs = skill().rewrite_by_tool(&request).unwrap();
        let crystal_programs = crystal().rewrite_by_tool(&request).unwrap();

        let reamed = skill_programs.last().unwrap();
        assert_eq!(fixtures::literal(reamed, Address::DEPTH), Some("-17.3"));
        assert_eq!(fixtures::number(reamed, Address::SPIN), Some(dec!(1130)));
        assert_eq!(fixtures::number(reamed, Address::FEED), Some(dec!(140)));

        let reamed = crystal_programs.last().unwrap();
        assert_eq!(fixtures::number(reamed, Address::SPIN), Some(dec!(1500)));
        assert_eq!(fixtures::number(reamed, Address::FEED), Some(dec!(150)));
    }

    #[test]
    fn test_iron_conditions() {
        let request = fixtures::request(Material::Iron, dec!(12.3));
        let programs = skill().rewrite_by_tool(&request).unwrap();

        assert_eq!(fixtures::number(&programs[0], Address::SPIN), Some(dec!(1500)));
        assert_eq!(fixtures::literal(&programs[0], Address::DEPTH), Some("-2.0"));
        assert_eq!(fixtures::literal(&programs[3], Address::DEPTH), Some("-1.7"));
        assert_eq!(fixtures::number(&programs[4], Address::SPIN), Some(dec!(360)));
        assert_eq!(fixtures::number(&programs[4], Address::FEED), Some(dec!(40)));
    }

    #[test]
    fn test_blind_hole() {
        let mut request = fixtures::request(Material::Aluminum, dec!(12.3));
        request.drilling_method = DrillingMethod::BlindHole {
            pilot_hole_depth: dec!(18),
            hole_depth: dec!(16),
        };
        let programs = skill().rewrite_by_tool(&request).unwrap();

        assert_eq!(fixtures::literal(&programs[1], Address::DEPTH), Some("-18."));
        assert_eq!(fixtures::literal(&programs[2], Address::DEPTH), Some("-18."));
        assert_eq!(fixtures::literal(&programs[4], Address::DEPTH), Some("-16."));
    }

    #[test]
    fn test_reamer_must_match_exactly() {
        let request = fixtures::request(Material::Aluminum, dec!(12.4));
        let err = crystal().rewrite_by_tool(&request).unwrap_err();

        assert_eq!(err.to_string(), "no reamer parameter list for diameter 12.4");
    }

    #[test]
    fn test_first_pilot_without_drill() {
        let mut request = fixtures::request(Material::Aluminum, dec!(12.3));
        request.tables.skill_reaming[0].pilot_hole_diameter = dec!(8.8);
        let err = skill().rewrite_by_tool(&request).unwrap_err();

        assert_eq!(
            err,
            RewriteError::NoFittingDiameter {
                purpose: FitPurpose::PilotHole,
                diameter: dec!(8.8)
            }
        );
    }

    #[test]
    fn test_second_pilot_without_drill() {
        let mut request = fixtures::request(Material::Aluminum, dec!(12.3));
        request.tables.drilling.retain(|d| d.target_diameter() != dec!(9.1));
        request.tables.skill_reaming[0].pilot_hole_diameter = dec!(11.1);
        request.tables.skill_reaming[0].second_pilot_hole_diameter = dec!(8.8);
        let err = skill().rewrite_by_tool(&request).unwrap_err();

        assert_eq!(
            err,
            RewriteError::NoFittingDiameter {
                purpose: FitPurpose::PilotHole,
                diameter: dec!(8.8)
            }
        );
        assert_eq!(
            err.to_string(),
            "no drill in the list fits pilot hole diameter 8.8"
        );
    }

    #[test]
    fn test_undefined_material() {
        let request = fixtures::request(Material::Undefined, dec!(12.3));
        assert_eq!(
            skill().rewrite_by_tool(&request),
            Err(RewriteError::InvalidMaterial)
        );
    }

    #[test]
    fn test_name_follows_family() {
        assert_eq!(skill().name(), "skill reaming");
        assert_eq!(crystal().name(), "crystal reaming");
        assert_eq!(crystal().family(), ReamerFamily::Crystal);
    }
}
