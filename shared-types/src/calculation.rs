use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CalculationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Conversion factors used by the production calculators.
///
/// Every section can be overridden from the `[factors]` table of the API
/// config; missing keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct ConversionFactors {
    pub brix: BrixFactors,
    pub acidity: AcidityFactors,
    pub production: ProductionFactors,
    pub solids: SolidsFactors,
}

impl Default for ConversionFactors {
    fn default() -> Self {
        Self {
            brix: BrixFactors::default(),
            acidity: AcidityFactors::default(),
            production: ProductionFactors::default(),
            solids: SolidsFactors::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct BrixFactors {
    pub reference_temperature: f64,
    pub correction: BTreeMap<String, f64>,
}

impl Default for BrixFactors {
    fn default() -> Self {
        Self {
            reference_temperature: 20.0,
            correction: [
                ("standard", 1.0),
                ("citrus", 0.98),
                ("nectars", 1.02),
                ("concentrate", 0.95),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct AcidityFactors {
    pub citric: f64,
    pub malic: f64,
    pub tartaric: f64,
}

impl Default for AcidityFactors {
    fn default() -> Self {
        Self {
            citric: 0.064,
            malic: 0.067,
            tartaric: 0.075,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct ProductionFactors {
    /// Accepted deviation from the specified net weight, in percent
    pub default_tolerance: f64,
    pub mean_density: BTreeMap<String, f64>,
}

impl Default for ProductionFactors {
    fn default() -> Self {
        Self {
            default_tolerance: 2.5,
            mean_density: [("juice", 1.045), ("nectar", 1.050), ("refresco", 1.030)]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct SolidsFactors {
    pub conversion: f64,
}

impl Default for SolidsFactors {
    fn default() -> Self {
        Self { conversion: 1.33 }
    }
}

/// Single-number result shared by the simple calculators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CalculationResult {
    pub value: f64,
    pub unit: String,
    pub formula: String,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct RatioRequest {
    pub brix: f64,
    pub acidity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum RatioClass {
    Acid,
    Balanced,
    Sweet,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RatioResult {
    pub ratio: f64,
    pub brix: f64,
    pub acidity: f64,
    pub classification: RatioClass,
    pub formula: String,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct AcidityRequest {
    pub sample_volume: f64,
    pub titration_factor: f64,
    pub naoh_volume: f64,
}

/// Acid a titration result is expressed as
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum AcidType {
    #[default]
    Citric,
    Malic,
    Tartaric,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct AcidTitrationRequest {
    /// Titrant volume in mL
    pub titrant_volume: f64,
    pub normality: f64,
    /// Sample volume in mL
    pub sample_volume: f64,
    #[serde(default)]
    pub acid: AcidType,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct DensityRequest {
    pub mass: f64,
    pub volume: f64,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct ProductionLitersRequest {
    pub total_weight: f64,
    pub density: f64,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct NetWeightRequest {
    pub gross_weight: f64,
    pub tare: f64,
    pub specified_weight: Option<f64>,
    pub tolerance: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum WeightStatus {
    BelowTolerance,
    WithinTolerance,
    AboveTolerance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NetWeightResult {
    pub net_weight: f64,
    pub status: WeightStatus,
    pub deviation_percent: f64,
    pub tolerance_min: f64,
    pub tolerance_max: f64,
    pub absolute_difference: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum TankAdjustment {
    Dilution,
    Concentration,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct TankFinalizationRequest {
    pub current_brix: f64,
    pub target_brix: f64,
    pub current_volume: f64,
    pub adjustment: TankAdjustment,
    /// Brix of the concentrate used for `concentration`, defaults to 65
    pub concentrate_brix: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TankFinalizationResult {
    pub adjustment: TankAdjustment,
    pub possible: bool,
    pub message: Option<String>,
    /// Water (dilution) or concentrate (concentration) to add, in liters
    pub added_volume: Option<f64>,
    pub final_volume: Option<f64>,
    pub brix_change: Option<f64>,
    pub formula: String,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
pub struct BlendPart {
    pub volume: f64,
    pub brix: f64,
    pub acidity: f64,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct BlendRequest {
    pub parts: Vec<BlendPart>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BlendResult {
    pub total_volume: f64,
    pub brix: f64,
    pub acidity: f64,
    pub formula: String,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct BrixCorrectionRequest {
    pub measured_brix: f64,
    pub temperature: f64,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct SugarDosingRequest {
    pub current_brix: f64,
    pub target_brix: f64,
    pub volume: f64,
    pub density: f64,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct SodaDosingRequest {
    pub volume: f64,
    pub current_acidity: f64,
    pub soda_concentration: f64,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct BaseLossRequest {
    pub initial_volume: f64,
    pub final_volume: f64,
}
