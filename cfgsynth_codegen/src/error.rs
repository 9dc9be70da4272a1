//! Errors raised while generating adapters.
//!
//! Every variant is fatal: generation stops at the first problem and never
//! emits a partially synthesised contract.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Why a trait method cannot back a configuration lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SignatureIssue {
    /// The method is `const`, `async`, `unsafe` or has an explicit ABI.
    #[error("configuration methods must be plain `fn` items")]
    Qualified,
    /// The method declares generic parameters or a `where` clause.
    #[error("configuration methods cannot be generic")]
    Generic,
    /// The method provides a default body.
    #[error("configuration methods cannot have a default body")]
    DefaultBody,
    /// The receiver is missing or is not `&self`.
    #[error("configuration methods must take `&self`")]
    Receiver,
    /// The method does not take exactly one default-value parameter.
    #[error("expected exactly one default-value parameter, found {0}")]
    ParameterCount(usize),
    /// The method does not return exactly a value and an existence flag.
    #[error("expected a `(value, bool)` result, found {0} result value(s)")]
    ResultArity(usize),
    /// The second result is not `bool`.
    #[error("the second result must be `bool`, found `{0}`")]
    ExistenceFlag(String),
    /// The value type is not supported.
    #[error("unsupported value type `{0}`; expected `String`, `i64` or `Vec<Struct>`")]
    UnsupportedType(String),
    /// The parameter type differs from the result value type.
    #[error("parameter type `{parameter}` does not match result type `{result}`")]
    TypeMismatch {
        /// Declared parameter type.
        parameter: String,
        /// Declared result value type.
        result: String,
    },
}

/// Errors raised by [`crate::generate`] and the functions it composes.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerateError {
    /// The interface source could not be read.
    #[error("failed to read interface source '{path}': {source}")]
    ReadSource {
        /// File that could not be read.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The interface source is not valid Rust.
    #[error("failed to parse interface source '{path}': {source}")]
    ParseSource {
        /// File that failed to parse.
        path: Utf8PathBuf,
        /// Parser diagnostic.
        #[source]
        source: syn::Error,
    },

    /// No trait with the requested name exists in the source.
    #[error("trait `{interface}` not found in '{path}'")]
    InterfaceNotFound {
        /// Requested trait name.
        interface: String,
        /// File that was searched.
        path: Utf8PathBuf,
    },

    /// The trait exists but declares no methods.
    #[error("trait `{interface}` declares no configuration methods")]
    NoMethods {
        /// Trait name.
        interface: String,
    },

    /// The trait itself has a shape generated adapters cannot implement.
    #[error("trait `{interface}` cannot be implemented by generated adapters: {reason}")]
    UnsupportedInterface {
        /// Trait name.
        interface: String,
        /// What is wrong with the trait.
        reason: String,
    },

    /// A method signature is invalid.
    #[error("trait `{interface}` method `{method}`: {issue}")]
    InvalidSignature {
        /// Trait name.
        interface: String,
        /// Method name.
        method: String,
        /// What is wrong with the signature.
        issue: SignatureIssue,
    },

    /// No `Cargo.toml` exists above the source file.
    #[error("no Cargo.toml found above '{path}'; cannot locate the project root")]
    ProjectRootNotFound {
        /// Source file whose ancestors were searched.
        path: Utf8PathBuf,
    },

    /// The source file does not live under the project or crate root.
    #[error("'{path}' is not inside '{root}'")]
    OutsideRoot {
        /// Source file.
        path: Utf8PathBuf,
        /// Root it was expected under.
        root: Utf8PathBuf,
    },

    /// A manifest could not be read.
    #[error("failed to read manifest '{path}': {source}")]
    ReadManifest {
        /// Manifest path.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A manifest is not valid TOML.
    #[error("manifest '{path}' is not valid TOML: {message}")]
    ParseManifest {
        /// Manifest path.
        path: Utf8PathBuf,
        /// Message reported by the TOML parser.
        message: String,
    },

    /// The package identifier cannot name generated items.
    #[error("package identifier `{id}` is not a valid Rust identifier; pass an explicit name")]
    InvalidPackageId {
        /// Offending identifier.
        id: String,
    },

    /// A generated file could not be written.
    #[error("failed to write '{path}': {source}")]
    WriteOutput {
        /// Destination path.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Another generated file in the output directory defines items with
    /// the same names, typically because the two package identifiers differ
    /// only in case or underscores.
    #[error(
        "package `{id}` generates the same item names as package `{existing}` in '{path}'; pass a distinct name"
    )]
    NameClash {
        /// Identifier being written.
        id: String,
        /// Identifier recorded in the existing file.
        existing: String,
        /// File holding the clashing package.
        path: Utf8PathBuf,
    },

    /// A user-supplied Rust path is malformed.
    #[error("invalid {what} path `{path}`: {source}")]
    InvalidPath {
        /// Which setting held the path.
        what: &'static str,
        /// Offending text.
        path: String,
        /// Parser diagnostic.
        #[source]
        source: syn::Error,
    },
}

/// Convenient result alias for generation.
pub type GenerateResult<T> = Result<T, GenerateError>;
