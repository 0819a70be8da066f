//! Employee records and their synthetic generator

pub mod generator;
pub mod models;
pub mod names;

pub use generator::EmployeeGenerator;
pub use models::{CHICAGO_BOUNDS, ContactInfo, EmployeeRecord, GeoBounds, GeoPoint};
