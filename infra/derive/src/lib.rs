#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by every crate of the workspace.
//!
//! * [`macro@main`] boots the tuned Tokio runtime from `keel-runtime`.
//! * [`macro@keel_error`] turns an enum into a `thiserror` error with context support.
//! * [`macro@keel_slice`] turns a struct into a registrable feature slice handle.
//! * [`macro@api_model`] / [`macro@api_handler`] wire DTOs and handlers into `utoipa`.
//!
//! The examples are `ignore`d because they need the consuming crates in scope.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, ItemStruct, parse_macro_input};

/// Attribute macro to bootstrap the specialized Tokio runtime.
///
/// Transforms an `async fn main` into a plain `fn main` that builds a runtime
/// from one of the `keel_runtime::RuntimeConfig` presets.
///
/// # Arguments
///
/// * `high_performance` - Optimized for high-throughput server environments.
/// * `memory_efficient` - Optimized for low-footprint environments.
/// * `default` - Worker threads auto-detected from available parallelism.
///
/// # Examples
///
/// ```rust,ignore
/// #[keel_runtime::main(high_performance)]
/// async fn main() -> anyhow::Result<()> {
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn main(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::runtime::expand_main(args.into(), input).into()
}

/// Attribute macro to define an API data model (request or response DTO).
///
/// # Injected Behaviors
///
/// * **Derives**: `Debug`, `Serialize`, `Deserialize` and `utoipa::ToSchema` when missing.
/// * **Serde Policy**:
///     * `rename_all = "camelCase"` by default (can be overridden).
///     * `deny_unknown_fields` by default (can be disabled).
///
/// # Example
///
/// ```rust,ignore
/// use keel_derive::api_model;
///
/// #[api_model(rename_all = "snake_case", deny_unknown_fields = false)]
/// pub struct ItemResponse {
///     pub id: u64,
///     pub created_at: String,
/// }
/// ```
#[proc_macro_attribute]
pub fn api_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::api::expand_api_model(attr.into(), input).into()
}

/// Attribute macro to bridge Axum handlers with `OpenAPI` documentation.
///
/// Accepts the standard `utoipa::path` arguments (`get`, `path = "..."`, `responses(...)`,
/// `tag = ...`) and forwards them, so the handler can be mounted with `utoipa_axum::routes!`.
///
/// # Example
///
/// ```rust,ignore
/// use keel_derive::api_handler;
///
/// #[api_handler(
///     get,
///     path = "/health",
///     responses((status = OK, body = HealthResponse)),
///     tag = "System"
/// )]
/// pub async fn health_handler() -> Json<HealthResponse> {
///     // ...
/// }
/// ```
#[proc_macro_attribute]
pub fn api_handler(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::api::expand_api_handler(args.into(), input).into()
}

/// Attribute macro for domain-specific error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]`.
/// * **Context Support**: Generates a companion `...Ext` trait that adds `.context()`
///   to any `Result` that can be converted into this error type, plus an inherent
///   `context_message()` accessor.
/// * **Standard Conversions**: Implements `From<T>` for variants containing a `source`
///   field (or a field marked `#[source]`/`#[from]`), enabling the `?` operator.
/// * **Internal Fallback**: `From<&'static str>` and `From<String>` when an `Internal`
///   variant is present.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum** with named-field variants.
/// 2. Variants that support context include `context: Option<Cow<'static, str>>`.
/// 3. Variants with a source must also carry a context field.
/// 4. One error enum per module: a private `format_context` helper is emitted next to it.
///
/// # Example
///
/// ```rust,ignore
/// use keel_derive::keel_error;
/// use std::borrow::Cow;
///
/// #[keel_error]
/// pub enum StorageError {
///     #[error("I/O failure{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn read() -> Result<Vec<u8>, StorageError> {
///     std::fs::read("data.bin").context("Reading data file")
/// }
/// ```
#[proc_macro_attribute]
pub fn keel_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}

/// Attribute macro to define a feature slice handle.
///
/// Transforms a struct into the slice pattern:
/// 1. The declared fields move to a `<Name>Inner` struct.
/// 2. `<Name>` becomes a cheap-to-clone `Arc` wrapper with `Deref` to the inner state.
/// 3. `<Name>` implements `keel_domain::registry::FeatureSlice` (named in snake case).
///
/// # Example
/// ```rust,ignore
/// #[keel_derive::keel_slice]
/// pub struct Items {
///     pub store: ItemStore,
/// }
///
/// fn init() -> Items {
///     Items::new(ItemsInner { store: ItemStore::default() })
/// }
/// ```
#[proc_macro_attribute]
pub fn keel_slice(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(item as ItemStruct);
    macros::slice::expand_slice(input).into()
}
