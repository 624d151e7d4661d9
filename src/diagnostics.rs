use std::fmt;

use thiserror::Error;

use crate::operators::BinaryOp;

/// Classification of a diagnostic event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    Runtime,
    Console,
}

/// Free-form failure raised by function implementations and the host console.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            notes: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)?;
        for note in &self.notes {
            write!(f, "\n  note: {note}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostic {}

/// Unified error type for the Lemon runtime.
#[derive(Debug, Error)]
pub enum LemonError {
    #[error("invalid operand kinds for `{op}`: {left} and {right}")]
    InvalidOperandKind {
        op: BinaryOp,
        left: &'static str,
        right: &'static str,
    },
    #[error("division by zero")]
    DivisionByZero,
    #[error("function `{0}` not found")]
    FunctionNotFound(String),
    #[error("function `{name}` expected {expected} arguments but received {received}")]
    ArityMismatch {
        name: String,
        expected: usize,
        received: usize,
    },
    #[error("error executing function `{name}`: {source}")]
    FunctionExecution {
        name: String,
        #[source]
        source: Box<LemonError>,
    },
    #[error("line {line}: {source}")]
    Script {
        line: usize,
        #[source]
        source: Box<LemonError>,
    },
    #[error("{0}")]
    Diagnostic(#[from] Diagnostic),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LemonError {
    /// Innermost cause, looking through `FunctionExecution` and `Script`
    /// wrappers.
    pub fn root_cause(&self) -> &LemonError {
        match self {
            LemonError::FunctionExecution { source, .. } | LemonError::Script { source, .. } => {
                source.root_cause()
            }
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, LemonError>;
