//! Shared test data: template programs, a small drill catalogue and a
//! request wired to both.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::conditions::{CuttingCondition, Material, SpinFeed};
use crate::parameters::{
    DiameterKey, DrillingParameter, ReamerKey, ReamingParameter, TapSizeKey, TappingParameter,
};
use crate::program::{Address, Block, Program, ProgramRole, Value, ValueKind, Word};
use crate::sequence::{DrillingMethod, ParameterTables, RewriteRequest};

fn numeric_slot(address: char) -> Word {
    Word::value(address, Value::placeholder(ValueKind::Numeric))
}

fn coordinate_slot(address: char) -> Word {
    Word::value(address, Value::placeholder(ValueKind::Coordinate))
}

fn spindle_start() -> Block {
    Block::new(vec![numeric_slot('S'), Word::numeric('M', "3")])
}

fn sub_program_call() -> Block {
    Block::new(vec![Word::numeric('M', "98"), numeric_slot('P')])
}

/// Canned cycle block: `G98G<cycle>R3.Z*[Q*]F*`
fn cycle(code: &str, peck: bool) -> Block {
    let mut words = vec![
        Word::numeric('G', "98"),
        Word::numeric('G', code),
        Word::coordinate('R', "3."),
        coordinate_slot('Z'),
    ];
    if peck {
        words.push(coordinate_slot('Q'));
    }
    words.push(numeric_slot('F'));
    Block::new(words)
}

fn cancel_cycle() -> Block {
    Block::new(vec![Word::numeric('G', "80"), Word::numeric('M', "5")])
}

fn optional_stop() -> Block {
    Block::new(vec![Word::numeric('M', "1")])
}

/// Template program for `role`, placeholders unresolved.
pub fn template(role: ProgramRole) -> Program {
    let blocks = match role {
        ProgramRole::CenterDrilling => vec![
            Block::new(vec![Word::comment("C/D")]),
            spindle_start(),
            cycle("82", false),
            sub_program_call(),
            cancel_cycle(),
            optional_stop(),
        ],
        ProgramRole::Drilling => vec![
            Block::new(vec![Word::comment("DR")]),
            spindle_start(),
            cycle("83", true),
            sub_program_call(),
            cancel_cycle(),
            optional_stop(),
        ],
        ProgramRole::Chamfering => vec![
            Block::new(vec![Word::comment("CHAMFER")]),
            spindle_start(),
            cycle("82", false),
            sub_program_call(),
            optional_stop(),
            cancel_cycle(),
            optional_stop(),
            Block::skippable(vec![Word::numeric('M', "1")]),
        ],
        ProgramRole::Tapping => vec![
            Block::new(vec![Word::comment("TAP")]),
            spindle_start(),
            cycle("84", false),
            sub_program_call(),
            cancel_cycle(),
            optional_stop(),
        ],
        ProgramRole::Reaming => vec![
            Block::new(vec![Word::comment("REAMER")]),
            spindle_start(),
            cycle("85", false),
            sub_program_call(),
            cancel_cycle(),
            optional_stop(),
        ],
    };
    let name = match role {
        ProgramRole::CenterDrilling => "O1000",
        ProgramRole::Drilling => "O2000",
        ProgramRole::Chamfering => "O3000",
        ProgramRole::Tapping => "O4000",
        ProgramRole::Reaming => "O5000",
    };
    Program::new(name, role, blocks)
}

fn cutting(aluminum: (Decimal, Decimal), iron: (Decimal, Decimal)) -> CuttingCondition {
    CuttingCondition::new(
        SpinFeed::new(aluminum.0, aluminum.1),
        SpinFeed::new(iron.0, iron.1),
    )
}

/// Drill record with placeholder cutting conditions.
pub fn drill(key: &str, center_drill_depth: Decimal, cut_depth: Decimal) -> DrillingParameter {
    DrillingParameter {
        diameter_key: DiameterKey::parse(key).unwrap(),
        center_drill_depth,
        cut_depth,
        cutting: cutting((dec!(1000), dec!(100)), (dec!(500), dec!(50))),
    }
}

fn catalogued_drill(
    key: &str,
    cut_depth: Decimal,
    aluminum: (Decimal, Decimal),
    iron: (Decimal, Decimal),
) -> DrillingParameter {
    DrillingParameter {
        cutting: cutting(aluminum, iron),
        ..drill(key, dec!(-1.5), cut_depth)
    }
}

/// 9.1, 11.1, 13.3 and 15.3.
pub fn drill_table() -> Vec<DrillingParameter> {
    vec![
        catalogued_drill("9.1", dec!(2.5), (dec!(1100), dec!(130)), (dec!(710), dec!(100))),
        catalogued_drill("11.1", dec!(3), (dec!(870), dec!(110)), (dec!(580), dec!(80))),
        catalogued_drill("13.3", dec!(3), (dec!(800), dec!(105)), (dec!(530), dec!(75))),
        catalogued_drill("15.3", dec!(3.5), (dec!(740), dec!(100)), (dec!(490), dec!(70))),
    ]
}

pub fn reamer(
    key: &str,
    pilot_hole_diameter: Decimal,
    second_pilot_hole_diameter: Decimal,
    chamfering_depth: Option<Decimal>,
) -> ReamingParameter {
    ReamingParameter {
        diameter_key: ReamerKey::parse(key).unwrap(),
        pilot_hole_diameter,
        second_pilot_hole_diameter,
        center_drill_depth: dec!(-2.0),
        chamfering_depth,
    }
}

pub fn tap(key: &str, pilot_hole_diameter: Decimal) -> TappingParameter {
    TappingParameter {
        diameter_key: TapSizeKey::parse(key).unwrap(),
        pilot_hole_diameter,
        center_drill_depth: dec!(-2.5),
        chamfering_depth: Some(dec!(-1.2)),
        cutting: cutting((dec!(700), dec!(1225)), (dec!(300), dec!(525))),
    }
}

/// Through hole in 12.3 stock, every template and table populated.
pub fn request(material: Material, tool_diameter: Decimal) -> RewriteRequest {
    let templates = [
        ProgramRole::CenterDrilling,
        ProgramRole::Drilling,
        ProgramRole::Chamfering,
        ProgramRole::Tapping,
        ProgramRole::Reaming,
    ]
    .into_iter()
    .map(template)
    .collect();

    RewriteRequest {
        templates,
        material,
        thickness: dec!(12.3),
        sub_program_number: "1000".to_string(),
        tool_diameter,
        drilling_method: DrillingMethod::ThroughHole,
        tables: ParameterTables {
            drilling: drill_table(),
            tapping: vec![tap("M12", dec!(10.2))],
            crystal_reaming: vec![reamer("12.3", dec!(9.1), dec!(11.1), Some(dec!(-1.7)))],
            skill_reaming: vec![reamer("12.3", dec!(9.1), dec!(11.1), Some(dec!(-1.7)))],
        },
    }
}

/// Numeric reading of the first word at `address`.
pub fn number(program: &Program, address: Address) -> Option<Decimal> {
    program.first_value(address).and_then(|value| value.number())
}

/// Literal of the first word at `address`.
pub fn literal(program: &Program, address: Address) -> Option<&str> {
    program.first_value(address).map(|value| value.literal())
}
