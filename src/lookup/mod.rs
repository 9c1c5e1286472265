//! Diameter lookups over the parameter tables
//!
//! Both policies return `Option`; the sequence builders turn a miss into the
//! error that names the diameter they were after.

use rust_decimal::Decimal;

use crate::parameters::MainProgramParameter;

/// First record whose target diameter equals `diameter`.
pub fn find_exact<P: MainProgramParameter>(table: &[P], diameter: Decimal) -> Option<&P> {
    table.iter().find(|p| p.target_diameter() == diameter)
}

/// Record with the greatest target diameter not exceeding `diameter`.
/// The boundary is inclusive; on equal diameters the earlier record wins.
pub fn find_best_fit<P: MainProgramParameter>(table: &[P], diameter: Decimal) -> Option<&P> {
    let mut best: Option<&P> = None;
    for candidate in table {
        let candidate_diameter = candidate.target_diameter();
        if candidate_diameter > diameter {
            continue;
        }
        match best {
            Some(current) if current.target_diameter() >= candidate_diameter => {}
            _ => best = Some(candidate),
        }
    }
    best
}

/// Largest catalogued diameter, `None` for an empty table.
pub fn max_diameter<P: MainProgramParameter>(table: &[P]) -> Option<Decimal> {
    table.iter().map(|p| p.target_diameter()).max()
}
