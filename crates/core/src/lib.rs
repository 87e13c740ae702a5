//! Core business logic for Renum.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `fiscal` - Fiscal year and period domain types
//! - `sequence` - Reference number sequence generation
//! - `renumber` - Posted-move renumber planning

pub mod fiscal;
pub mod renumber;
pub mod sequence;
