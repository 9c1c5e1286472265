//! Shop cutting conditions
//!
//! Spin and feed for the steps whose conditions are not carried by the
//! parameter tables: center drilling, chamfering and the two reamer families.
//! Defaults cover the shop's standard tooling; a JSON document can override
//! any of them.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, RewriteError};

/// Workpiece material class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Material {
    /// Nothing selected yet; always rejected
    #[default]
    Undefined,
    Aluminum,
    /// Mild steel (SS400)
    Iron,
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Material::Undefined => write!(f, "undefined"),
            Material::Aluminum => write!(f, "aluminum"),
            Material::Iron => write!(f, "iron"),
        }
    }
}

/// Reamer catalogues. Same sequencing, independent tables and conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReamerFamily {
    Crystal,
    Skill,
}

impl std::fmt::Display for ReamerFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReamerFamily::Crystal => write!(f, "crystal"),
            ReamerFamily::Skill => write!(f, "skill"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinFeed {
    pub spin: Decimal,
    pub feed: Decimal,
}

impl SpinFeed {
    pub fn new(spin: Decimal, feed: Decimal) -> Self {
        Self { spin, feed }
    }
}

/// Spin/feed pair per material class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CuttingCondition {
    pub aluminum: SpinFeed,
    pub iron: SpinFeed,
}

impl CuttingCondition {
    pub fn new(aluminum: SpinFeed, iron: SpinFeed) -> Self {
        Self { aluminum, iron }
    }

    pub fn for_material(&self, material: Material) -> Result<SpinFeed, RewriteError> {
        match material {
            Material::Aluminum => Ok(self.aluminum),
            Material::Iron => Ok(self.iron),
            Material::Undefined => Err(RewriteError::InvalidMaterial),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachiningConditions {
    pub center_drilling: CuttingCondition,
    pub chamfering: CuttingCondition,
    pub crystal_reamer: CuttingCondition,
    pub skill_reamer: CuttingCondition,
    /// How far taps and reamers run past the stock on a through hole
    pub through_hole_overrun: Decimal,
}

impl Default for MachiningConditions {
    fn default() -> Self {
        Self {
            center_drilling: CuttingCondition::new(
                SpinFeed::new(dec!(2000), dec!(150)),
                SpinFeed::new(dec!(1500), dec!(100)),
            ),
            chamfering: CuttingCondition::new(
                SpinFeed::new(dec!(1400), dec!(150)),
                SpinFeed::new(dec!(1100), dec!(100)),
            ),
            crystal_reamer: CuttingCondition::new(
                SpinFeed::new(dec!(1500), dec!(150)),
                SpinFeed::new(dec!(500), dec!(50)),
            ),
            skill_reamer: CuttingCondition::new(
                SpinFeed::new(dec!(1130), dec!(140)),
                SpinFeed::new(dec!(360), dec!(40)),
            ),
            through_hole_overrun: dec!(5),
        }
    }
}

impl MachiningConditions {
    /// Parse overrides; fields left out keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let conditions: MachiningConditions = serde_json::from_str(json)?;
        Ok(conditions)
    }

    pub fn reamer(&self, family: ReamerFamily) -> &CuttingCondition {
        match family {
            ReamerFamily::Crystal => &self.crystal_reamer,
            ReamerFamily::Skill => &self.skill_reamer,
        }
    }
}
