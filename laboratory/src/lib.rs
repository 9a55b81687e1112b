//! Laboratory Crate
//!
//! Rule-based helpers for the juice laboratory:
//!
//! - **calendar**: monthly and annual activity schedules across the three
//!   work shifts, including the rotating shelf-life check
//! - **calculations**: Brix, acidity, density and dosing formulas used during
//!   production
//!
//! # Example
//!
//! ```rust
//! use laboratory::calendar::ActivityGenerator;
//!
//! let generator = ActivityGenerator::with_defaults();
//! let activities = generator.generate(2025, 5).unwrap();
//! assert_eq!(activities.len(), 31);
//! ```

pub mod calculations;
pub mod calendar;

pub use calculations::ProductionCalculator;
pub use calendar::ActivityGenerator;
