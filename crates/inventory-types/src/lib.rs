//! inventory-types: domain records and store ports shared by every inventory crate

pub mod domain;
pub mod ports;
