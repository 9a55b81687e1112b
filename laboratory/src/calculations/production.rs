use super::{require_non_negative, require_positive};
use shared_types::{CalculationError, CalculationResult};

/// Titratable acidity in percent from an NaOH titration
pub fn titratable_acidity(
    sample_volume: f64,
    titration_factor: f64,
    naoh_volume: f64,
) -> Result<CalculationResult, CalculationError> {
    require_positive("sample_volume", sample_volume)?;
    require_positive("titration_factor", titration_factor)?;
    require_non_negative("naoh_volume", naoh_volume)?;

    let acidity = naoh_volume * titration_factor * 100.0 / sample_volume;

    Ok(CalculationResult {
        value: acidity,
        unit: "%".to_string(),
        formula: format!(
            "Acidity (%) = ({} × {} × 100) ÷ {} = {:.4}%",
            naoh_volume, titration_factor, sample_volume, acidity
        ),
    })
}

pub fn density(mass: f64, volume: f64) -> Result<CalculationResult, CalculationError> {
    require_positive("mass", mass)?;
    require_positive("volume", volume)?;

    let density = mass / volume;

    Ok(CalculationResult {
        value: density,
        unit: "g/mL".to_string(),
        formula: format!("Density = {} ÷ {} = {:.4} g/mL", mass, volume, density),
    })
}

/// Liters produced from the total weight of a batch
pub fn production_liters(
    total_weight: f64,
    density: f64,
) -> Result<CalculationResult, CalculationError> {
    require_positive("total_weight", total_weight)?;
    require_positive("density", density)?;

    let volume = total_weight / density;

    Ok(CalculationResult {
        value: volume,
        unit: "L".to_string(),
        formula: format!("Volume = {} ÷ {} = {:.2} L", total_weight, density, volume),
    })
}

/// Caustic soda volume needed to neutralise a batch
pub fn soda_dosage(
    volume: f64,
    current_acidity: f64,
    soda_concentration: f64,
) -> Result<CalculationResult, CalculationError> {
    require_positive("volume", volume)?;
    require_non_negative("current_acidity", current_acidity)?;
    require_positive("soda_concentration", soda_concentration)?;

    let soda = volume * current_acidity / (soda_concentration * 100.0);

    Ok(CalculationResult {
        value: soda,
        unit: "L".to_string(),
        formula: format!(
            "Soda = {} × {} ÷ ({} × 100) = {:.3} L",
            volume, current_acidity, soda_concentration, soda
        ),
    })
}

/// Share of base lost between two volume readings
pub fn base_loss_percent(
    initial_volume: f64,
    final_volume: f64,
) -> Result<CalculationResult, CalculationError> {
    require_positive("initial_volume", initial_volume)?;
    require_non_negative("final_volume", final_volume)?;

    let loss = (initial_volume - final_volume) / initial_volume * 100.0;

    Ok(CalculationResult {
        value: loss,
        unit: "%".to_string(),
        formula: format!(
            "Loss = ({} - {}) ÷ {} × 100 = {:.2}%",
            initial_volume, final_volume, initial_volume, loss
        ),
    })
}
