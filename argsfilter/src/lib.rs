//! Argument filtering for job log lines.
//!
//! For each job entering a logging pipeline this crate decides whether and
//! how its arguments appear in the log line. It runs three stages:
//!
//! 1. **Shape detection**: direct arguments, or a delegated dispatch whose
//!    payload is nested under `args`.
//! 2. **Settings resolution**: process defaults, then the per-type override,
//!    then a per-call override found in the arguments themselves.
//! 3. **Strategy application**: `show`, `hide`, or `filter` sensitive fields.
//!
//! What this crate does:
//! - model job arguments as a closed [`Value`] type
//! - hold the process-wide defaults in an injectable [`ConfigStore`]
//! - produce one [`ArgsFragment`] per job, via [`ArgsFilter`] or [`ArgsLogHook`]
//! - provide sink integrations for `tracing` and, behind a feature flag, `slog`
//!
//! What it does not do:
//! - perform I/O or logging
//! - persist configuration
//! - validate what the arguments mean
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use argsfilter::{ArgsFilter, ConfigStore, OverrideRegistry, Strategy, Value};
//!
//! let store = Arc::new(ConfigStore::default());
//! store.configure(|config| {
//!     config.set_strategy(Strategy::Filter);
//!     config.set_sensitive_hints(["password"]);
//! });
//! let filter = ArgsFilter::new(store, Arc::new(OverrideRegistry::new()));
//!
//! let args = [Value::mapping([
//!     ("login", Value::from("a")),
//!     ("password", Value::from("b")),
//! ])];
//! let fragment = filter.filter("SignupJob", &args).unwrap();
//! assert_eq!(
//!     fragment.to_string(),
//!     r#" WITH ARGS: {login: "a", password: "[FILTERED]"}"#
//! );
//! ```

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

mod config;
mod error;
mod hook;
mod pipeline;
mod redaction;
#[cfg(feature = "slog")]
mod slog;
pub mod tracing;
mod value;

pub use config::{
    ConfigStore, DEFAULT_SENSITIVE_HINTS, DEFAULT_SETTINGS_KEY, EffectiveSettings, FilterConfig,
    FilterOptions, OverrideProvider, OverrideRegistry, SettingsOverride, Strategy,
};
pub use error::{FilterError, Result};
pub use hook::{ArgsLogHook, Job, JobDescriptor, LogHook};
pub use pipeline::{
    ArgsFilter, ArgsFragment, DISPATCH_ARGS_KEY, HIDDEN_MARKER, SettingsResolver, Shape,
    StrategyEngine, WRONG_FORMAT_MARKER, extract_payload,
};
pub use redaction::{
    FILTERED_PLACEHOLDER, MASK_CHAR, PARAMETER_FILTER, ParameterFilter, RedactError, Redactor,
    Replacement,
};
pub use value::{Mapping, OpaqueRef, Scalar, Value};
