use super::{require_non_negative, require_positive};
use shared_types::{
    BlendPart, BlendResult, CalculationError, CalculationResult, RatioClass, RatioResult,
    TankAdjustment, TankFinalizationRequest, TankFinalizationResult,
};

/// Brix of the concentrate when a concentration request does not name one
pub const DEFAULT_CONCENTRATE_BRIX: f64 = 65.0;

/// Brix change per degree Celsius away from the reference temperature
const TEMPERATURE_COEFFICIENT: f64 = 0.002;

/// Brix / acidity ratio with its sweetness class
pub fn ratio(brix: f64, acidity: f64) -> Result<RatioResult, CalculationError> {
    require_positive("brix", brix)?;
    require_positive("acidity", acidity)?;

    let ratio = brix / acidity;
    let classification = if ratio < 12.0 {
        RatioClass::Acid
    } else if ratio < 16.0 {
        RatioClass::Balanced
    } else {
        RatioClass::Sweet
    };

    Ok(RatioResult {
        ratio,
        brix,
        acidity,
        classification,
        formula: format!("Ratio = {} ÷ {} = {:.2}", brix, acidity, ratio),
    })
}

pub fn brix_temperature_correction(
    measured_brix: f64,
    temperature: f64,
    reference_temperature: f64,
) -> Result<CalculationResult, CalculationError> {
    require_non_negative("measured_brix", measured_brix)?;

    let correction = TEMPERATURE_COEFFICIENT * (temperature - reference_temperature);
    let corrected = measured_brix + correction;

    Ok(CalculationResult {
        value: corrected,
        unit: "°Brix".to_string(),
        formula: format!(
            "Brix = {} + {} × ({} - {}) = {:.3}",
            measured_brix, TEMPERATURE_COEFFICIENT, temperature, reference_temperature, corrected
        ),
    })
}

/// Sugar in kg needed to lift a batch from `current_brix` to `target_brix`
pub fn sugar_to_add(
    current_brix: f64,
    target_brix: f64,
    volume: f64,
    density: f64,
) -> Result<CalculationResult, CalculationError> {
    require_non_negative("current_brix", current_brix)?;
    require_positive("target_brix", target_brix)?;
    require_positive("volume", volume)?;
    require_positive("density", density)?;
    if target_brix <= current_brix {
        return Err(CalculationError::InvalidInput(format!(
            "target_brix ({}) must be above current_brix ({})",
            target_brix, current_brix
        )));
    }

    let sugar = (target_brix - current_brix) * volume * density / 100.0;

    Ok(CalculationResult {
        value: sugar,
        unit: "kg".to_string(),
        formula: format!(
            "Sugar = ({} - {}) × {} × {} ÷ 100 = {:.2} kg",
            target_brix, current_brix, volume, density, sugar
        ),
    })
}

/// Water (dilution) or concentrate (concentration) needed to finish a tank
pub fn tank_finalization(
    request: &TankFinalizationRequest,
) -> Result<TankFinalizationResult, CalculationError> {
    let current = request.current_brix;
    let target = request.target_brix;
    let volume = request.current_volume;
    require_positive("current_brix", current)?;
    require_positive("target_brix", target)?;
    require_positive("current_volume", volume)?;

    let not_possible = |message: &str| TankFinalizationResult {
        adjustment: request.adjustment,
        possible: false,
        message: Some(message.to_string()),
        added_volume: None,
        final_volume: None,
        brix_change: None,
        formula: "Not applicable".to_string(),
    };

    match request.adjustment {
        TankAdjustment::Dilution => {
            if current <= target {
                return Ok(not_possible(
                    "Current Brix is already at or below the target; dilution is not possible",
                ));
            }

            let water = volume * (current / target - 1.0);
            Ok(TankFinalizationResult {
                adjustment: request.adjustment,
                possible: true,
                message: None,
                added_volume: Some(water),
                final_volume: Some(volume + water),
                brix_change: Some(target - current),
                formula: format!(
                    "V2 = {} × ({} / {} - 1) = {:.2} L",
                    volume, current, target, water
                ),
            })
        }
        TankAdjustment::Concentration => {
            let concentrate_brix = request
                .concentrate_brix
                .unwrap_or(DEFAULT_CONCENTRATE_BRIX);
            require_positive("concentrate_brix", concentrate_brix)?;

            if current >= target {
                return Ok(not_possible(
                    "Current Brix is already at or above the target; no concentrate is needed",
                ));
            }
            if concentrate_brix <= target {
                return Ok(not_possible(
                    "Concentrate Brix must be higher than the target Brix",
                ));
            }

            let concentrate = volume * (target - current) / (concentrate_brix - target);
            Ok(TankFinalizationResult {
                adjustment: request.adjustment,
                possible: true,
                message: None,
                added_volume: Some(concentrate),
                final_volume: Some(volume + concentrate),
                brix_change: Some(target - current),
                formula: format!(
                    "V2 = {} × ({} - {}) / ({} - {}) = {:.2} L",
                    volume, target, current, concentrate_brix, target, concentrate
                ),
            })
        }
    }
}

/// Volume-weighted Brix and acidity of a blend of batches
pub fn blend_forecast(parts: &[BlendPart]) -> Result<BlendResult, CalculationError> {
    if parts.is_empty() {
        return Err(CalculationError::InvalidInput(
            "at least one batch is required".to_string(),
        ));
    }
    for part in parts {
        require_positive("volume", part.volume)?;
        require_non_negative("brix", part.brix)?;
        require_non_negative("acidity", part.acidity)?;
    }

    let total_volume: f64 = parts.iter().map(|p| p.volume).sum();
    let brix = parts.iter().map(|p| p.brix * p.volume).sum::<f64>() / total_volume;
    let acidity = parts.iter().map(|p| p.acidity * p.volume).sum::<f64>() / total_volume;

    let terms: Vec<String> = parts
        .iter()
        .map(|p| format!("{} × {}", p.brix, p.volume))
        .collect();

    Ok(BlendResult {
        total_volume,
        brix,
        acidity,
        formula: format!(
            "Brix = ({}) ÷ {} = {:.2}",
            terms.join(" + "),
            total_volume,
            brix
        ),
    })
}
