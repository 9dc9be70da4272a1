//! Database connection settings.

/// Settings for the primary database.
pub trait Config {
    /// Database host.
    fn host(&self, default: String) -> (String, bool);
    /// Database port.
    fn port(&self, default: i64) -> (i64, bool);
    /// Login role.
    fn user(&self, default: String) -> (String, bool);
}

include!(concat!(env!("OUT_DIR"), "/db.gen.rs"));
