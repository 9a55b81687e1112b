use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub mod calculation;
pub mod calendar;
pub mod document;
pub mod extraction;

pub use calculation::{
    AcidTitrationRequest, AcidType, AcidityFactors, AcidityRequest, BaseLossRequest, BlendPart, BlendRequest, BlendResult,
    BrixCorrectionRequest, BrixFactors, CalculationError, CalculationResult, ConversionFactors,
    DensityRequest, NetWeightRequest, NetWeightResult, ProductionFactors,
    ProductionLitersRequest, RatioClass, RatioRequest, RatioResult, SodaDosingRequest,
    SolidsFactors, SugarDosingRequest, TankAdjustment, TankFinalizationRequest,
    TankFinalizationResult, WeightStatus,
};
pub use calendar::{
    CalendarError, CalendarQuery, DayActivities, MonthCalendar, MonthContext, MonthSummary,
    RotationPolicy, ShiftAssignment, YearCalendar, SHIFT_COUNT,
};
pub use document::{
    DocumentFormat, DocumentStructure, ExtractedField, FieldLocator, FieldType, HeaderCell,
    InspectDocumentRequest, PageInfo, ParagraphInfo, SheetInfo, TableCellInfo, TableInfo,
};

// Re-export extraction types
pub use extraction::*;

/// Error response for API endpoints
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ErrorResponse {
    pub error: String,
}
