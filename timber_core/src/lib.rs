//! # timber_core - Log House Quantity and Quote Engine
//!
//! `timber_core` turns a handful of building parameters (footprint, wall
//! height, roof pitch, roof type, log dimensions) and a price list into
//! material quantities, labor time and a customer quote. All inputs and
//! outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: the engines are pure functions, rerun in full on every change
//! - **Total**: numeric degeneracies clamp or default, they never error
//! - **JSON-First**: all types implement Serialize/Deserialize
//! - **Rich Errors**: structured error types around the engines (files, parsing)
//!
//! ## Quick Start
//!
//! ```rust
//! use timber_core::building::BuildingInputs;
//! use timber_core::calculations::estimate;
//! use timber_core::price_list::default_price_list;
//!
//! let result = estimate(&BuildingInputs::default(), default_price_list());
//! println!("Offert inkl. moms: {:.0} kr", result.totals.quote_inc_vat);
//! ```
//!
//! ## Modules
//!
//! - [`building`] - Building parameters and their ranges
//! - [`calculations`] - Geometry, line items, totals and override merge
//! - [`rules`] - Per-article quantity rule registry
//! - [`price_list`] - Price-list entries, spreadsheet parsing, built-in list
//! - [`format`] - Swedish number, currency and time formatting
//! - [`project`] - Project container and recalculation
//! - [`file_io`] - Atomic saves, locking, input loading
//! - [`pdf`] - Customer quote as PDF
//! - [`errors`] - Structured error types

pub mod building;
pub mod calculations;
pub mod errors;
#[cfg(not(target_arch = "wasm32"))]
pub mod file_io;
pub mod format;
pub mod pdf;
pub mod price_list;
pub mod project;
pub mod rules;

// Re-export commonly used types at crate root for convenience
pub use building::BuildingInputs;
pub use calculations::{estimate, CalculatedValues, Estimate, LineItem, QuoteTotals};
pub use errors::{CalcError, CalcResult};
#[cfg(not(target_arch = "wasm32"))]
pub use file_io::{load_project, save_project, FileLock};
pub use price_list::{PriceListEntry, PriceListSource};
pub use project::{Project, ProjectMetadata};
