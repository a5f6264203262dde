//! Scan data: sampling a region along a family of parallel lines.
//!
//! ## Pipeline
//!
//! ```text
//! RegionOutline[] ──▶ ScanLines::generate ──▶ positive intervals per line
//!                                                  │
//!                  record text ──▶ parse ──────────┤
//!                                                  ▼
//!                                       derive negatives (complement)
//!                                                  │
//!                                                  ▼
//!                                              ScanData
//! ```
//!
//! Once built, a [`ScanData`] is an immutable value: geometric transforms
//! return new scans.

mod conflict;
mod data;
mod lines;
mod negatives;
mod raster;
mod records;

pub use conflict::ConflictCount;
pub use data::ScanData;
pub use lines::ScanLines;
