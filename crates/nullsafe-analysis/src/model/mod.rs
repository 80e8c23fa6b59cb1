//! Candidate, region and error value types.

pub mod error;
pub mod fix;
pub mod location;
pub mod names;
pub mod region;

pub use error::ReportedError;
pub use fix::Fix;
pub use location::Location;
pub use region::{Region, RegionKind};
