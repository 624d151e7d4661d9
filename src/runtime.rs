use std::rc::Rc;

use crate::{
    control::{self, Thunk},
    diagnostics::{LemonError, Result},
    environment::{Binding, Environment},
    operators::{self, BinaryOp},
    registry::{FunctionMetadata, FunctionRegistry},
    value::Value,
};

#[derive(Debug, Clone)]
pub struct ExecutionContext {
    /// Label attached to log output of this runtime.
    pub name: Option<String>,
    /// Type tag recorded on parameter bindings.
    pub parameter_type: String,
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self {
            name: None,
            parameter_type: "auto".into(),
        }
    }
}

/// One independent evaluation context: a scope store, a function registry
/// and the configuration they run under.
#[derive(Debug, Default)]
pub struct Runtime {
    env: Environment,
    functions: FunctionRegistry,
    context: ExecutionContext,
}

impl Runtime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_context(context: ExecutionContext) -> Self {
        Self {
            context,
            ..Self::default()
        }
    }

    pub fn context(&self) -> &ExecutionContext {
        &self.context
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn registry(&self) -> &FunctionRegistry {
        &self.functions
    }

    pub fn push_scope(&mut self) {
        self.env.push_scope();
    }

    pub fn pop_scope(&mut self) {
        self.env.pop_scope();
    }

    pub fn scope_depth(&self) -> usize {
        self.env.depth()
    }

    pub fn set_variable(
        &mut self,
        name: &str,
        value: Value,
        type_tag: &str,
        is_const: bool,
    ) -> bool {
        self.env.set_variable(name, value, type_tag, is_const)
    }

    pub fn get_variable(&self, name: &str) -> Option<Value> {
        self.env.get_variable(name)
    }

    pub fn get_binding(&self, name: &str) -> Option<&Binding> {
        self.env.get_binding(name)
    }

    pub fn binary(&self, op: BinaryOp, left: &Value, right: &Value) -> Result<Value> {
        operators::apply(op, left, right)
    }

    pub fn execute_if(
        &mut self,
        condition: &Value,
        then_branch: Thunk<'_, Self>,
        else_branch: Option<Thunk<'_, Self>>,
    ) -> Result<Value> {
        control::execute_if(self, condition, then_branch, else_branch)
    }

    pub fn execute_while(
        &mut self,
        condition: Thunk<'_, Self>,
        body: Thunk<'_, Self>,
    ) -> Result<Value> {
        control::execute_while(self, condition, body)
    }

    pub fn execute_for(
        &mut self,
        init: Thunk<'_, Self>,
        condition: Thunk<'_, Self>,
        increment: Thunk<'_, Self>,
        body: Thunk<'_, Self>,
    ) -> Result<Value> {
        control::execute_for(self, init, condition, increment, body)
    }

    pub fn register_function<F>(
        &mut self,
        name: impl Into<String>,
        metadata: FunctionMetadata,
        implementation: F,
    ) where
        F: Fn(&mut Runtime, &[Value]) -> Result<Value> + 'static,
    {
        self.functions.register(name, metadata, Rc::new(implementation));
    }

    pub fn has_function(&self, name: &str) -> bool {
        self.functions.contains(name)
    }

    pub fn get_metadata(&self, name: &str) -> Option<&FunctionMetadata> {
        self.functions.metadata(name)
    }

    /// Calls a registered function inside a fresh scope frame holding its
    /// parameters.
    ///
    /// Lookup and arity are checked before any frame is pushed. The frame is
    /// removed again whether the implementation succeeds or fails, along with
    /// any frames the implementation pushed and left behind.
    #[tracing::instrument(
        level = "debug",
        skip(self, args),
        fields(runtime = self.context.name.as_deref(), arity = args.len())
    )]
    pub fn execute_function(&mut self, name: &str, args: &[Value]) -> Result<Value> {
        let (parameter_names, implementation) = match self.functions.get(name) {
            Some(record) => (
                record.metadata.parameter_names.clone(),
                Rc::clone(&record.implementation),
            ),
            None => return Err(LemonError::FunctionNotFound(name.to_string())),
        };
        if args.len() != parameter_names.len() {
            return Err(LemonError::ArityMismatch {
                name: name.to_string(),
                expected: parameter_names.len(),
                received: args.len(),
            });
        }

        let depth = self.env.depth();
        self.env.push_scope();
        let parameter_type = self.context.parameter_type.clone();
        for (param, arg) in parameter_names.iter().zip(args) {
            self.env.set_variable(param, arg.clone(), &parameter_type, false);
        }
        let result = implementation(self, args);
        self.env.unwind_to(depth);

        result.map_err(|err| {
            tracing::debug!(error = %err, "function failed");
            LemonError::FunctionExecution {
                name: name.to_string(),
                source: Box::new(err),
            }
        })
    }
}
