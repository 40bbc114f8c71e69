//! Configuration model for the admission loop.

pub mod admission;

pub use admission::AdmissionConfig;
