//! Test helpers shared across the cfgsynth workspace.
//!
//! - [`env`] serialises process-environment mutation behind RAII guards.
//! - [`project`] lays out throwaway Cargo projects for generator tests.

pub mod env;
pub mod project;
