//! Command implementations

pub mod run;
pub mod vehicles;
