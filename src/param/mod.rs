//! Parameter domains and constraint state (spec §3, §4.4).

mod domain;
mod parameter;

pub use domain::Domain;
pub use parameter::Parameter;
