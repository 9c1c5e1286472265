//! Parameter aggregates
//!
//! One record per catalogued tool diameter. Each record's target diameter
//! comes from its key, so looking a record up by nominal diameter and reading
//! the diameter back can never disagree.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::conditions::CuttingCondition;
use crate::error::{RewriteError, ToolKind};

static TAP_SIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"M(\d+(?:\.\d+)?)").expect("tap size pattern"));

/// Catalogue key holding a plain diameter such as `"9.1"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DiameterKey {
    label: String,
    diameter: Decimal,
}

impl DiameterKey {
    pub fn parse(label: impl Into<String>) -> Result<Self, RewriteError> {
        Self::parse_for(ToolKind::Drill, label)
    }

    /// `tool` only words the error.
    pub fn parse_for(tool: ToolKind, label: impl Into<String>) -> Result<Self, RewriteError> {
        let label = label.into();
        let diameter = Decimal::from_str(label.trim()).map_err(|_| {
            RewriteError::InvalidDiameterKey {
                tool,
                key: label.clone(),
            }
        })?;
        Ok(Self { label, diameter })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn diameter(&self) -> Decimal {
        self.diameter
    }
}

impl TryFrom<String> for DiameterKey {
    type Error = RewriteError;

    fn try_from(label: String) -> Result<Self, Self::Error> {
        Self::parse(label)
    }
}

impl From<DiameterKey> for String {
    fn from(key: DiameterKey) -> Self {
        key.label
    }
}

/// Reamer catalogue key, a plain diameter like [`DiameterKey`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReamerKey(DiameterKey);

impl ReamerKey {
    pub fn parse(label: impl Into<String>) -> Result<Self, RewriteError> {
        DiameterKey::parse_for(ToolKind::Reamer, label).map(Self)
    }

    pub fn label(&self) -> &str {
        self.0.label()
    }

    pub fn diameter(&self) -> Decimal {
        self.0.diameter()
    }
}

impl TryFrom<String> for ReamerKey {
    type Error = RewriteError;

    fn try_from(label: String) -> Result<Self, Self::Error> {
        Self::parse(label)
    }
}

impl From<ReamerKey> for String {
    fn from(key: ReamerKey) -> Self {
        key.0.label
    }
}

/// Catalogue key holding a thread label such as `"M12"` or `"M12x1.25"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TapSizeKey {
    label: String,
    diameter: Decimal,
}

impl TapSizeKey {
    /// The nominal diameter is the number right after `M`.
    pub fn parse(label: impl Into<String>) -> Result<Self, RewriteError> {
        let label = label.into();
        let diameter = TAP_SIZE
            .captures(&label)
            .and_then(|caps| caps.get(1))
            .and_then(|m| Decimal::from_str(m.as_str()).ok())
            .ok_or_else(|| RewriteError::InvalidDiameterKey {
                tool: ToolKind::Tap,
                key: label.clone(),
            })?;
        Ok(Self { label, diameter })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn diameter(&self) -> Decimal {
        self.diameter
    }
}

impl TryFrom<String> for TapSizeKey {
    type Error = RewriteError;

    fn try_from(label: String) -> Result<Self, Self::Error> {
        Self::parse(label)
    }
}

impl From<TapSizeKey> for String {
    fn from(key: TapSizeKey) -> Self {
        key.label
    }
}

/// Axial length of a drill point (118° included angle), rounded to 0.1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DrillTipLength(Decimal);

impl DrillTipLength {
    pub fn new(diameter: Decimal) -> Self {
        let length = (diameter * dec!(0.3))
            .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
        Self(length)
    }

    pub fn value(self) -> Decimal {
        self.0
    }
}

/// What every catalogue record offers the sequence builders.
pub trait MainProgramParameter {
    const TOOL: ToolKind;

    fn target_diameter(&self) -> Decimal;

    fn center_drill_depth(&self) -> Decimal;

    /// `None` when the diameter gets no chamfering step
    fn chamfering_depth(&self) -> Option<Decimal>;
}

/// Reamer catalogue row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReamingParameter {
    pub diameter_key: ReamerKey,
    /// First pilot hole
    pub pilot_hole_diameter: Decimal,
    /// Second pilot hole, drilled after the first
    pub second_pilot_hole_diameter: Decimal,
    pub center_drill_depth: Decimal,
    pub chamfering_depth: Option<Decimal>,
}

impl ReamingParameter {
    pub fn first_pilot_tip_length(&self) -> DrillTipLength {
        DrillTipLength::new(self.pilot_hole_diameter)
    }

    pub fn second_pilot_tip_length(&self) -> DrillTipLength {
        DrillTipLength::new(self.second_pilot_hole_diameter)
    }
}

impl MainProgramParameter for ReamingParameter {
    const TOOL: ToolKind = ToolKind::Reamer;

    fn target_diameter(&self) -> Decimal {
        self.diameter_key.diameter()
    }

    fn center_drill_depth(&self) -> Decimal {
        self.center_drill_depth
    }

    fn chamfering_depth(&self) -> Option<Decimal> {
        self.chamfering_depth
    }
}

/// Tap catalogue row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TappingParameter {
    pub diameter_key: TapSizeKey,
    pub pilot_hole_diameter: Decimal,
    pub center_drill_depth: Decimal,
    pub chamfering_depth: Option<Decimal>,
    pub cutting: CuttingCondition,
}

impl TappingParameter {
    pub fn pilot_tip_length(&self) -> DrillTipLength {
        DrillTipLength::new(self.pilot_hole_diameter)
    }
}

impl MainProgramParameter for TappingParameter {
    const TOOL: ToolKind = ToolKind::Tap;

    fn target_diameter(&self) -> Decimal {
        self.diameter_key.diameter()
    }

    fn center_drill_depth(&self) -> Decimal {
        self.center_drill_depth
    }

    fn chamfering_depth(&self) -> Option<Decimal> {
        self.chamfering_depth
    }
}

/// Drill catalogue row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrillingParameter {
    pub diameter_key: DiameterKey,
    pub center_drill_depth: Decimal,
    /// Peck depth (Q of G83)
    pub cut_depth: Decimal,
    pub cutting: CuttingCondition,
}

impl DrillingParameter {
    pub fn drill_tip_length(&self) -> Decimal {
        DrillTipLength::new(self.target_diameter()).value()
    }

    /// Chamfer a drilled hole 0.2 past its radius.
    pub fn chamfer_depth(&self) -> Decimal {
        (-(self.target_diameter() / dec!(2) + dec!(0.2))).normalize()
    }
}

impl MainProgramParameter for DrillingParameter {
    const TOOL: ToolKind = ToolKind::Drill;

    fn target_diameter(&self) -> Decimal {
        self.diameter_key.diameter()
    }

    fn center_drill_depth(&self) -> Decimal {
        self.center_drill_depth
    }

    fn chamfering_depth(&self) -> Option<Decimal> {
        Some(self.chamfer_depth())
    }
}
