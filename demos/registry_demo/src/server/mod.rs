//! HTTP server settings.

use cfgsynth::ElementCodec;
use serde::Deserialize;

/// Settings the server reads at start-up.
pub trait Config {
    /// Interface to bind.
    fn host(&self, default: String) -> (String, bool);
    /// Listen port.
    fn port(&self, default: i64) -> (i64, bool);
    /// Authentication realms served on extra ports.
    fn realms(&self, default: Vec<RealmInfo>) -> (Vec<RealmInfo>, bool);
}

/// One authentication realm.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealmInfo {
    /// Realm name.
    pub id: String,
    /// Port clients connect to.
    pub client_port: i64,
    /// Regions the realm serves.
    #[serde(default)]
    pub regions: Vec<String>,
}

impl ElementCodec for RealmInfo {}
