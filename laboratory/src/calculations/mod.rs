//! Production chemistry calculators used on the lab bench.
//!
//! All formulas are pure; [`ProductionCalculator`] only carries the
//! conversion factors that some of them need.

mod brix;
mod production;

pub use brix::{
    blend_forecast, brix_temperature_correction, ratio, sugar_to_add, tank_finalization,
    DEFAULT_CONCENTRATE_BRIX,
};
pub use production::{
    base_loss_percent, density, production_liters, soda_dosage, titratable_acidity,
};

use shared_types::{
    AcidTitrationRequest, AcidType, CalculationError, CalculationResult, ConversionFactors,
    NetWeightRequest, NetWeightResult, WeightStatus,
};

/// Default specified net weight of a 200 g package
pub const DEFAULT_SPECIFIED_WEIGHT: f64 = 200.0;

pub(crate) fn require_positive(name: &str, value: f64) -> Result<(), CalculationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CalculationError::InvalidInput(format!(
            "{} must be positive, got {}",
            name, value
        )));
    }
    Ok(())
}

pub(crate) fn require_non_negative(name: &str, value: f64) -> Result<(), CalculationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(CalculationError::InvalidInput(format!(
            "{} must not be negative, got {}",
            name, value
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Default)]
pub struct ProductionCalculator {
    factors: ConversionFactors,
}

impl ProductionCalculator {
    pub fn new(factors: ConversionFactors) -> Self {
        Self { factors }
    }

    pub fn factors(&self) -> &ConversionFactors {
        &self.factors
    }

    /// Check a package's net weight against its specification.
    ///
    /// Falls back to a 200 g specification and the configured production
    /// tolerance when the request leaves them out.
    pub fn net_weight_check(
        &self,
        request: &NetWeightRequest,
    ) -> Result<NetWeightResult, CalculationError> {
        require_positive("gross_weight", request.gross_weight)?;
        require_positive("tare", request.tare)?;

        let specified = request.specified_weight.unwrap_or(DEFAULT_SPECIFIED_WEIGHT);
        let tolerance = request
            .tolerance
            .unwrap_or(self.factors.production.default_tolerance);
        require_positive("specified_weight", specified)?;
        require_non_negative("tolerance", tolerance)?;

        let net_weight = request.gross_weight - request.tare;
        let tolerance_min = specified * (1.0 - tolerance / 100.0);
        let tolerance_max = specified * (1.0 + tolerance / 100.0);

        let status = if net_weight < tolerance_min {
            WeightStatus::BelowTolerance
        } else if net_weight > tolerance_max {
            WeightStatus::AboveTolerance
        } else {
            WeightStatus::WithinTolerance
        };

        Ok(NetWeightResult {
            net_weight,
            status,
            deviation_percent: (net_weight - specified) / specified * 100.0,
            tolerance_min,
            tolerance_max,
            absolute_difference: net_weight - specified,
        })
    }

    /// Titratable acidity expressed as the chosen acid, using its
    /// configured milliequivalent factor
    pub fn acid_titration(
        &self,
        request: &AcidTitrationRequest,
    ) -> Result<CalculationResult, CalculationError> {
        require_non_negative("titrant_volume", request.titrant_volume)?;
        require_positive("normality", request.normality)?;
        require_positive("sample_volume", request.sample_volume)?;

        let (acid, factor) = match request.acid {
            AcidType::Citric => ("citric", self.factors.acidity.citric),
            AcidType::Malic => ("malic", self.factors.acidity.malic),
            AcidType::Tartaric => ("tartaric", self.factors.acidity.tartaric),
        };
        let acidity = request.titrant_volume * request.normality * factor / request.sample_volume;

        Ok(CalculationResult {
            value: acidity,
            unit: "%".to_string(),
            formula: format!(
                "Acidity ({}) = ({} × {} × {}) ÷ {} = {:.4}%",
                acid,
                request.titrant_volume,
                request.normality,
                factor,
                request.sample_volume,
                acidity
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(gross: f64, tare: f64) -> NetWeightRequest {
        NetWeightRequest {
            gross_weight: gross,
            tare,
            specified_weight: None,
            tolerance: None,
        }
    }

    #[test]
    fn test_net_weight_within_tolerance() {
        let calculator = ProductionCalculator::default();
        let result = calculator.net_weight_check(&request(215.0, 14.0)).unwrap();

        assert_eq!(result.net_weight, 201.0);
        assert_eq!(result.status, WeightStatus::WithinTolerance);
        assert!((result.tolerance_min - 195.0).abs() < 1e-9);
        assert!((result.tolerance_max - 205.0).abs() < 1e-9);
        assert!((result.deviation_percent - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_net_weight_out_of_tolerance() {
        let calculator = ProductionCalculator::default();

        let below = calculator.net_weight_check(&request(200.0, 10.0)).unwrap();
        assert_eq!(below.status, WeightStatus::BelowTolerance);

        let above = calculator.net_weight_check(&request(230.0, 10.0)).unwrap();
        assert_eq!(above.status, WeightStatus::AboveTolerance);
        assert_eq!(above.absolute_difference, 20.0);
    }

    #[test]
    fn test_net_weight_rejects_non_positive_weights() {
        let calculator = ProductionCalculator::default();
        assert!(calculator.net_weight_check(&request(0.0, 10.0)).is_err());
        assert!(calculator.net_weight_check(&request(210.0, -1.0)).is_err());
    }

    #[test]
    fn test_configured_tolerance() {
        let mut factors = ConversionFactors::default();
        factors.production.default_tolerance = 10.0;
        let calculator = ProductionCalculator::new(factors);

        let result = calculator.net_weight_check(&request(228.0, 10.0)).unwrap();
        assert_eq!(result.status, WeightStatus::WithinTolerance);
    }

    fn titration(titrant: f64, normality: f64, sample: f64, acid: AcidType) -> AcidTitrationRequest {
        AcidTitrationRequest {
            titrant_volume: titrant,
            normality,
            sample_volume: sample,
            acid,
        }
    }

    #[test]
    fn test_acid_titration() {
        let calculator = ProductionCalculator::default();

        let citric = calculator
            .acid_titration(&titration(10.0, 0.1, 10.0, AcidType::Citric))
            .unwrap();
        assert!((citric.value - 0.0064).abs() < 1e-12);
        assert_eq!(citric.unit, "%");
        assert!(citric.formula.starts_with("Acidity (citric)"));

        let malic = calculator
            .acid_titration(&titration(10.0, 0.1, 10.0, AcidType::Malic))
            .unwrap();
        assert!((malic.value - 0.0067).abs() < 1e-12);

        let tartaric = calculator
            .acid_titration(&titration(5.0, 0.1, 10.0, AcidType::Tartaric))
            .unwrap();
        assert!((tartaric.value - 0.00375).abs() < 1e-12);
    }

    #[test]
    fn test_acid_titration_uses_configured_factor() {
        let mut factors = ConversionFactors::default();
        factors.acidity.citric = 0.07;
        let calculator = ProductionCalculator::new(factors);

        let result = calculator
            .acid_titration(&titration(10.0, 0.1, 10.0, AcidType::Citric))
            .unwrap();
        assert!((result.value - 0.007).abs() < 1e-12);
    }

    #[test]
    fn test_acid_titration_rejects_invalid_volumes() {
        let calculator = ProductionCalculator::default();
        assert!(calculator
            .acid_titration(&titration(10.0, 0.1, 0.0, AcidType::Citric))
            .is_err());
        assert!(calculator
            .acid_titration(&titration(-1.0, 0.1, 10.0, AcidType::Citric))
            .is_err());
        assert!(calculator
            .acid_titration(&titration(10.0, 0.0, 10.0, AcidType::Citric))
            .is_err());
    }
}
