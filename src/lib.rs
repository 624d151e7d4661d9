//! Core library for the Lemon evaluation runtime.
//! Provides dynamically-typed values, a global scope with a stack of nested
//! frames, arithmetic operators, thunk-based control flow and a registry of
//! host-defined functions, all owned by an explicit [`Runtime`].

pub mod control;
pub mod diagnostics;
pub mod environment;
pub mod operators;
pub mod registry;
pub mod repl;
pub mod runtime;
pub mod stdlib;
pub mod value;

pub use diagnostics::{Diagnostic, DiagnosticKind, LemonError, Result};
pub use operators::BinaryOp;
pub use registry::FunctionMetadata;
pub use repl::Repl;
pub use runtime::{ExecutionContext, Runtime};
pub use value::{Value, ValueKind};
