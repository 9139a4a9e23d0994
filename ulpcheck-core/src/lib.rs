#![warn(missing_docs)]
//! ulpcheck Core - Test Model
//!
//! This crate provides what a test run is made of:
//! - `TestDef` / `TypedTestDef` statics registered via `#[ulpcheck::unittest]`
//! - `Registry` of runnable `Descriptor`s in registration order
//! - `TestContext`, the mutable run state every test body receives
//! - `Signal`, the control values a test body returns early with

mod context;
mod descriptor;
mod registry;
mod signal;
mod typename;

pub use context::TestContext;
pub use descriptor::{Descriptor, ExpectedError, TestDef, TestFn, TypeInstance, TypedTestDef};
pub use registry::{Registry, RegistryError};
pub use signal::{FailureKind, RaisedError, Signal, TestResult, skip};
pub use typename::{render_type_name, type_name_of};

// Collect all registered tests
inventory::collect!(TestDef);
inventory::collect!(TypedTestDef);

/// Anchor to prevent LTO from stripping inventory entries
#[used]
#[doc(hidden)]
pub static REGISTRY_ANCHOR: fn() = || {
    for _ in inventory::iter::<TestDef> {}
    for _ in inventory::iter::<TypedTestDef> {}
};
