use std::{fmt, rc::Rc};

use indexmap::IndexMap;

use crate::{diagnostics::Result, runtime::Runtime, value::Value};

/// Host callback backing a registered function. It receives the runtime so it
/// can read its bound parameters and call other functions.
pub type NativeImpl = Rc<dyn Fn(&mut Runtime, &[Value]) -> Result<Value>>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionMetadata {
    pub name: String,
    pub parameter_names: Vec<String>,
    pub return_type: String,
    pub documentation: String,
}

impl FunctionMetadata {
    pub fn new(name: impl Into<String>, parameter_names: &[&str]) -> Self {
        Self {
            name: name.into(),
            parameter_names: parameter_names.iter().map(|p| p.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn with_return_type(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = return_type.into();
        self
    }

    pub fn with_documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = documentation.into();
        self
    }

    pub fn arity(&self) -> usize {
        self.parameter_names.len()
    }
}

#[derive(Clone)]
pub struct FunctionRecord {
    pub metadata: FunctionMetadata,
    pub implementation: NativeImpl,
}

impl fmt::Debug for FunctionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionRecord")
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

/// Named functions, kept in registration order.
#[derive(Debug, Default)]
pub struct FunctionRegistry {
    functions: IndexMap<String, FunctionRecord>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-registering a name replaces the previous record.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        metadata: FunctionMetadata,
        implementation: NativeImpl,
    ) {
        let name = name.into();
        tracing::debug!(name = %name, arity = metadata.arity(), "register_function");
        self.functions.insert(
            name,
            FunctionRecord {
                metadata,
                implementation,
            },
        );
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&FunctionRecord> {
        self.functions.get(name)
    }

    pub fn metadata(&self, name: &str) -> Option<&FunctionMetadata> {
        self.functions.get(name).map(|record| &record.metadata)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
