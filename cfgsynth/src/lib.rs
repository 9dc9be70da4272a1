//! Runtime support for adapters produced by `cfgsynth_codegen`.
//!
//! Generated adapters implement a user-declared configuration trait whose
//! methods look like `fn host(&self, default: String) -> (String, bool)`.
//! Every method answers with the value it found plus a flag telling the
//! caller whether the value came from a real source or is the default it was
//! handed. This crate holds the pieces those adapters share:
//!
//! - [`Value`] and [`Document`]: a YAML document parsed once into a tagged
//!   value tree, with the coercion rules adapters rely on.
//! - [`env`]: ordered environment-variable lookups through a [`KeyMapper`].
//! - [`ElementCodec`]: per-type decoding of struct slices.
//! - [`first_found`]: the ordered fallback used by composite adapters.
//! - [`Registry`] and [`GlobalConfig`]: an explicit, lock-protected provider
//!   map and the facade that hands out composite adapters per package.
//!
//! ```rust
//! use cfgsynth::Document;
//!
//! # fn main() -> Result<(), cfgsynth::CfgsynthError> {
//! let document = Document::parse(b"db:\n  port: 5.0\n  ratio: 5.5\n")?;
//! assert_eq!(document.get_int(&["db"], &["port"]), Some(5));
//! assert_eq!(document.get_int(&["db"], &["ratio"]), None);
//! # Ok(())
//! # }
//! ```

mod codec;
mod composite;
mod document;
pub mod env;
mod error;
mod global;
mod mapper;
mod registry;
mod value;

pub use codec::ElementCodec;
pub use composite::first_found;
pub use document::{Document, Section};
pub use error::{CfgsynthError, CfgsynthResult};
pub use global::{GlobalConfig, GlobalSource};
pub use mapper::KeyMapper;
pub use registry::{Provider, Registry};
pub use value::Value;
