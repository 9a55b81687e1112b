use shared_types::*;
use std::fs;
use std::path::Path;
use ts_rs::TS;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Generate TypeScript definitions for API types
    let mut types = Vec::new();

    // Calendar types
    types.push(clean_type(MonthContext::export_to_string()?));
    types.push(clean_type(ShiftAssignment::export_to_string()?));
    types.push(clean_type(DayActivities::export_to_string()?));
    types.push(clean_type(RotationPolicy::export_to_string()?));
    types.push(clean_type(MonthCalendar::export_to_string()?));
    types.push(clean_type(MonthSummary::export_to_string()?));
    types.push(clean_type(YearCalendar::export_to_string()?));
    types.push(clean_type(CalendarQuery::export_to_string()?));

    // Document types
    types.push(clean_type(DocumentFormat::export_to_string()?));
    types.push(clean_type(FieldType::export_to_string()?));
    types.push(clean_type(FieldLocator::export_to_string()?));
    types.push(clean_type(ExtractedField::export_to_string()?));
    types.push(clean_type(HeaderCell::export_to_string()?));
    types.push(clean_type(SheetInfo::export_to_string()?));
    types.push(clean_type(ParagraphInfo::export_to_string()?));
    types.push(clean_type(TableCellInfo::export_to_string()?));
    types.push(clean_type(TableInfo::export_to_string()?));
    types.push(clean_type(PageInfo::export_to_string()?));
    types.push(clean_type(DocumentStructure::export_to_string()?));
    types.push(clean_type(InspectDocumentRequest::export_to_string()?));

    // Calculation types
    types.push(clean_type(ConversionFactors::export_to_string()?));
    types.push(clean_type(BrixFactors::export_to_string()?));
    types.push(clean_type(AcidityFactors::export_to_string()?));
    types.push(clean_type(ProductionFactors::export_to_string()?));
    types.push(clean_type(SolidsFactors::export_to_string()?));
    types.push(clean_type(CalculationResult::export_to_string()?));
    types.push(clean_type(RatioRequest::export_to_string()?));
    types.push(clean_type(RatioClass::export_to_string()?));
    types.push(clean_type(RatioResult::export_to_string()?));
    types.push(clean_type(AcidityRequest::export_to_string()?));
    types.push(clean_type(AcidType::export_to_string()?));
    types.push(clean_type(AcidTitrationRequest::export_to_string()?));
    types.push(clean_type(DensityRequest::export_to_string()?));
    types.push(clean_type(ProductionLitersRequest::export_to_string()?));
    types.push(clean_type(NetWeightRequest::export_to_string()?));
    types.push(clean_type(WeightStatus::export_to_string()?));
    types.push(clean_type(NetWeightResult::export_to_string()?));
    types.push(clean_type(TankAdjustment::export_to_string()?));
    types.push(clean_type(TankFinalizationRequest::export_to_string()?));
    types.push(clean_type(TankFinalizationResult::export_to_string()?));
    types.push(clean_type(BlendPart::export_to_string()?));
    types.push(clean_type(BlendRequest::export_to_string()?));
    types.push(clean_type(BlendResult::export_to_string()?));
    types.push(clean_type(BrixCorrectionRequest::export_to_string()?));
    types.push(clean_type(SugarDosingRequest::export_to_string()?));
    types.push(clean_type(SodaDosingRequest::export_to_string()?));
    types.push(clean_type(BaseLossRequest::export_to_string()?));

    types.push(clean_type(ErrorResponse::export_to_string()?));

    let output_dir = Path::new("../web/src/api-types");
    fs::create_dir_all(output_dir)?;

    let output_path = output_dir.join("types.ts");
    let output = types.join("\n\n");

    fs::write(&output_path, output)?;
    println!("Generated TypeScript types in {}", output_path.display());

    Ok(())
}

fn clean_type(mut type_def: String) -> String {
    type_def.retain(|c| c != '\r');

    // Check if the type definition includes imports (like ExtractedField which imports FieldLocator)
    let lines: Vec<&str> = type_def.lines().collect();
    let has_import = lines
        .iter()
        .any(|line| line.trim().starts_with("import type"));

    let filtered: Vec<&str> = lines
        .iter()
        .filter(|line| {
            let trimmed = line.trim();
            // Keep import lines only for definitions that reference other exported types
            if trimmed.starts_with("import type") {
                return has_import;
            }
            // Filter out the generated comment line
            !trimmed.starts_with("// This file was generated")
                && !trimmed.starts_with("/* This file was generated")
        })
        .cloned()
        .collect();

    let result = filtered.join("\n").trim().to_string();
    if result.is_empty() {
        result
    } else {
        format!("{}\n", result)
    }
}
