//! APRI and FIB-4 liver fibrosis scores with disease- and age-specific interpretation.

pub mod config;
pub mod output;
pub mod scoring;
