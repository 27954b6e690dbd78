//! Hub inclusion report model
//!
//! This crate provides the types the hub hands us when a device is paired or
//! re-discovered: the InclusionReport for the physical device, its Services,
//! their command/report Interfaces and the loosely typed property bag.
//!
//! Parsing lives here as well. It is the only fallible step before
//! translation: anything that is not a well-formed report is rejected at this
//! boundary and never reaches the discovery engine.

mod error;
mod props;
mod report;

pub use error::{ReportError, ReportResult};
pub use props::{keys, PropValue, Props};
pub use report::{
    parse_report, parse_reports, InclusionReport, Interface, InterfaceType, Service,
    INCLUSION_REPORT_EVENT,
};
