//! Two configuration packages served through generated adapters.
//!
//! `server` and `database` each declare a `Config` trait. The build script
//! generates their adapters; `gconfig` hosts the `server` output and the
//! `database` module includes its own. [`register_all`] wires both into one
//! [`Registry`] so a [`cfgsynth::GlobalConfig`] can hand them out.

pub mod database;
pub mod gconfig;
pub mod server;

use cfgsynth::Registry;

/// Registers every package of the demo. Returns how many were newly added.
#[must_use = "the count reports how many packages this call registered"]
pub fn register_all(registry: &Registry) -> usize {
    [gconfig::register_server(registry), database::register_db(registry)]
        .into_iter()
        .filter(|added| *added)
        .count()
}
