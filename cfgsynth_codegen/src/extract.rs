//! Locates a configuration trait in Rust source and validates its methods.
//!
//! A configuration method has the shape
//! `fn name(&self, default: T) -> (T, bool)` where `T` is `String`, `i64` or
//! `Vec<S>` for a named struct `S`. Anything else stops generation with a
//! diagnostic naming the trait and the method.

use std::fmt;

use camino::Utf8Path;
use proc_macro2::Ident;
use quote::ToTokens;
use syn::ext::IdentExt;
use syn::{
    Attribute, Expr, ExprLit, FnArg, GenericArgument, Item, ItemTrait, Lit, Meta, PathArguments,
    ReturnType, TraitItem, TraitItemFn, Type, TypeParamBound,
};
use tracing::debug;

use crate::error::{GenerateError, GenerateResult, SignatureIssue};

/// Final path segments that never name a user struct.
const NON_STRUCT_TYPES: &[&str] = &[
    "String", "str", "bool", "char", "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16",
    "u32", "u64", "u128", "usize", "f32", "f64", "Vec", "Option", "Box", "Arc", "Rc",
];

/// Marker supertraits every generated adapter satisfies automatically.
const AUTO_SUPERTRAITS: &[&str] = &["Send", "Sync"];

/// Semantic type of a configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueKind {
    /// `String`.
    String,
    /// `i64`.
    Integer,
    /// `Vec<S>`; holds the path of `S` as written in the trait.
    StructSlice(syn::Path),
}

impl ValueKind {
    /// Classifies `ty`, or returns `None` when it is not a supported value
    /// type.
    ///
    /// Only the final path segment is inspected, so `std::string::String`
    /// and `String` are equivalent.
    #[must_use]
    pub fn classify(ty: &Type) -> Option<Self> {
        let Type::Path(type_path) = ungroup(ty) else {
            return None;
        };
        if type_path.qself.is_some() {
            return None;
        }
        let last = type_path.path.segments.last()?;
        let is_bare = matches!(last.arguments, PathArguments::None);
        if last.ident == "String" && is_bare {
            Some(Self::String)
        } else if last.ident == "i64" && is_bare {
            Some(Self::Integer)
        } else if last.ident == "Vec" {
            struct_element(&last.arguments).map(Self::StructSlice)
        } else {
            None
        }
    }

    /// The element struct path for [`ValueKind::StructSlice`].
    #[must_use]
    pub const fn element(&self) -> Option<&syn::Path> {
        match self {
            Self::StructSlice(path) => Some(path),
            Self::String | Self::Integer => None,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("String"),
            Self::Integer => f.write_str("i64"),
            Self::StructSlice(path) => write!(f, "Vec<{}>", compact(path)),
        }
    }
}

/// One validated configuration method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    /// Method identifier as written, raw prefix included.
    pub ident: Ident,
    /// Method name without any raw prefix; the input to key derivation.
    pub name: String,
    /// Parameter and result value type.
    pub kind: ValueKind,
    /// First non-empty line of the method's doc comment.
    pub doc: Option<String>,
}

/// A validated configuration trait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interface {
    /// Trait identifier.
    pub ident: Ident,
    /// Inline modules enclosing the trait within its file, outermost first.
    pub nesting: Vec<String>,
    /// Methods in declaration order.
    pub methods: Vec<MethodDescriptor>,
}

impl Interface {
    /// Trait name.
    #[must_use]
    pub fn name(&self) -> String {
        self.ident.unraw().to_string()
    }

    /// Looks up a method by name.
    #[must_use]
    pub fn method(&self, name: &str) -> Option<&MethodDescriptor> {
        self.methods.iter().find(|method| method.name == name)
    }
}

/// Reads `path` and extracts the trait named `interface`.
///
/// # Errors
///
/// Returns [`GenerateError::ReadSource`] when the file cannot be read, and
/// any error [`extract_from_source`] reports.
pub fn extract_from_path(path: &Utf8Path, interface: &str) -> GenerateResult<Interface> {
    let source = std::fs::read_to_string(path).map_err(|source| GenerateError::ReadSource {
        path: path.to_path_buf(),
        source,
    })?;
    extract_from_source(path, &source, interface)
}

/// Extracts the trait named `interface` from Rust `source`.
///
/// `origin` only labels diagnostics. The trait is searched among the file's
/// top-level items first and then inside inline `mod` blocks.
///
/// # Errors
///
/// Fails when the source does not parse, the trait is missing, generic or
/// empty, or any method has an invalid signature.
pub fn extract_from_source(
    origin: &Utf8Path,
    source: &str,
    interface: &str,
) -> GenerateResult<Interface> {
    let file = syn::parse_file(source).map_err(|source| GenerateError::ParseSource {
        path: origin.to_path_buf(),
        source,
    })?;
    let mut nesting = Vec::new();
    let item = find_trait(&file.items, interface, &mut nesting).ok_or_else(|| {
        GenerateError::InterfaceNotFound {
            interface: interface.to_owned(),
            path: origin.to_path_buf(),
        }
    })?;
    let extracted = describe_trait(item, nesting)?;
    debug!(
        interface,
        methods = extracted.methods.len(),
        "extracted configuration trait"
    );
    Ok(extracted)
}

fn find_trait<'a>(items: &'a [Item], name: &str, nesting: &mut Vec<String>) -> Option<&'a ItemTrait> {
    let direct = items.iter().find_map(|item| match item {
        Item::Trait(item_trait) if item_trait.ident.unraw() == name => Some(item_trait),
        _ => None,
    });
    if direct.is_some() {
        return direct;
    }
    items.iter().find_map(|item| {
        let Item::Mod(module) = item else {
            return None;
        };
        let (_, nested) = module.content.as_ref()?;
        nesting.push(module.ident.unraw().to_string());
        let found = find_trait(nested, name, nesting);
        if found.is_none() {
            nesting.pop();
        }
        found
    })
}

fn describe_trait(item: &ItemTrait, nesting: Vec<String>) -> GenerateResult<Interface> {
    let interface = item.ident.unraw().to_string();
    let unsupported = |reason: String| GenerateError::UnsupportedInterface {
        interface: interface.clone(),
        reason,
    };

    if !item.generics.params.is_empty() || item.generics.where_clause.is_some() {
        return Err(unsupported(String::from("generic traits are not supported")));
    }
    if item.unsafety.is_some() {
        return Err(unsupported(String::from("unsafe traits are not supported")));
    }
    if let Some(bound) = item.supertraits.iter().find(|bound| !is_auto_supertrait(bound)) {
        return Err(unsupported(format!(
            "supertrait `{}` would need an implementation on every adapter",
            compact(bound)
        )));
    }

    let mut methods = Vec::with_capacity(item.items.len());
    for trait_item in &item.items {
        let TraitItem::Fn(method) = trait_item else {
            return Err(unsupported(format!(
                "only methods are supported, found `{}`",
                compact(trait_item)
            )));
        };
        let name = method.sig.ident.unraw().to_string();
        let kind = describe_method(method).map_err(|issue| GenerateError::InvalidSignature {
            interface: interface.clone(),
            method: name.clone(),
            issue,
        })?;
        methods.push(MethodDescriptor {
            ident: method.sig.ident.clone(),
            name,
            kind,
            doc: leading_doc_line(&method.attrs),
        });
    }

    if methods.is_empty() {
        return Err(GenerateError::NoMethods { interface });
    }
    Ok(Interface {
        ident: item.ident.clone(),
        nesting,
        methods,
    })
}

fn is_auto_supertrait(bound: &TypeParamBound) -> bool {
    match bound {
        TypeParamBound::Trait(trait_bound) => trait_bound
            .path
            .segments
            .last()
            .is_some_and(|segment| AUTO_SUPERTRAITS.iter().any(|name| segment.ident == name)),
        TypeParamBound::Lifetime(lifetime) => lifetime.ident == "static",
        _ => false,
    }
}

fn describe_method(method: &TraitItemFn) -> Result<ValueKind, SignatureIssue> {
    let sig = &method.sig;
    if sig.constness.is_some() || sig.asyncness.is_some() || sig.unsafety.is_some() || sig.abi.is_some()
    {
        return Err(SignatureIssue::Qualified);
    }
    if !sig.generics.params.is_empty() || sig.generics.where_clause.is_some() {
        return Err(SignatureIssue::Generic);
    }
    if method.default.is_some() {
        return Err(SignatureIssue::DefaultBody);
    }

    let mut inputs = sig.inputs.iter();
    match inputs.next() {
        Some(FnArg::Receiver(receiver))
            if matches!(&*receiver.ty, Type::Reference(reference) if reference.mutability.is_none()) => {}
        _ => return Err(SignatureIssue::Receiver),
    }
    let parameters = inputs
        .map(|input| match input {
            FnArg::Typed(typed) => Ok(&*typed.ty),
            FnArg::Receiver(_) => Err(SignatureIssue::Receiver),
        })
        .collect::<Result<Vec<_>, _>>()?;
    let extra = usize::from(sig.variadic.is_some());
    let ([parameter], 0) = (parameters.as_slice(), extra) else {
        return Err(SignatureIssue::ParameterCount(parameters.len() + extra));
    };

    let results = result_types(&sig.output);
    let [value, flag] = results.as_slice() else {
        return Err(SignatureIssue::ResultArity(results.len()));
    };
    if !is_bool(flag) {
        return Err(SignatureIssue::ExistenceFlag(compact(*flag)));
    }
    let kind = ValueKind::classify(value).ok_or_else(|| SignatureIssue::UnsupportedType(compact(*value)))?;
    if ValueKind::classify(parameter).as_ref() != Some(&kind) {
        return Err(SignatureIssue::TypeMismatch {
            parameter: compact(*parameter),
            result: compact(*value),
        });
    }
    Ok(kind)
}

fn result_types(output: &ReturnType) -> Vec<&Type> {
    match output {
        ReturnType::Default => Vec::new(),
        ReturnType::Type(_, ty) => match ungroup(ty) {
            Type::Tuple(tuple) => tuple.elems.iter().collect(),
            other => vec![other],
        },
    }
}

fn is_bool(ty: &Type) -> bool {
    matches!(ungroup(ty), Type::Path(path) if path.qself.is_none() && path.path.is_ident("bool"))
}

fn struct_element(arguments: &PathArguments) -> Option<syn::Path> {
    let PathArguments::AngleBracketed(angle) = arguments else {
        return None;
    };
    let mut args = angle.args.iter();
    let (Some(GenericArgument::Type(inner)), None) = (args.next(), args.next()) else {
        return None;
    };
    let Type::Path(inner) = ungroup(inner) else {
        return None;
    };
    if inner.qself.is_some() {
        return None;
    }
    let last = inner.path.segments.last()?;
    let is_struct_name = matches!(last.arguments, PathArguments::None)
        && !NON_STRUCT_TYPES.iter().any(|name| last.ident == name);
    is_struct_name.then(|| inner.path.clone())
}

fn ungroup(ty: &Type) -> &Type {
    match ty {
        Type::Paren(paren) => ungroup(&paren.elem),
        Type::Group(group) => ungroup(&group.elem),
        other => other,
    }
}

fn leading_doc_line(attrs: &[Attribute]) -> Option<String> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(name_value) => match &name_value.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(text),
                    ..
                }) => Some(text.value()),
                _ => None,
            },
            _ => None,
        })
        .find_map(|text| {
            text.lines()
                .map(|line| line.trim().trim_start_matches('*').trim())
                .find(|line| !line.is_empty())
                .map(str::to_owned)
        })
}

/// Token text without the spaces `proc_macro2` inserts between tokens.
fn compact(tokens: &impl ToTokens) -> String {
    tokens.to_token_stream().to_string().replace(' ', "")
}
