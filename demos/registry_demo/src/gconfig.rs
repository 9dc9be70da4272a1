//! Generated adapters for packages whose traits live elsewhere.

include!(concat!(env!("OUT_DIR"), "/server.gen.rs"));
