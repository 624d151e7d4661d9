use indexmap::IndexMap;

use crate::value::Value;

pub type Scope = IndexMap<String, Binding>;

#[derive(Debug, Clone)]
pub struct Binding {
    pub value: Value,
    pub type_tag: String,
    pub is_const: bool,
}

/// Global bindings plus a stack of nested frames.
///
/// Lookups consult only the top frame and then the global scope; frames
/// below the top are invisible. Writes go to the top frame, or to the global
/// scope while the stack is empty.
#[derive(Debug, Default)]
pub struct Environment {
    global: Scope,
    stack: Vec<Scope>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_scope(&mut self) {
        self.stack.push(Scope::new());
        tracing::trace!(depth = self.stack.len(), "push_scope");
    }

    /// Popping an empty stack is a no-op.
    pub fn pop_scope(&mut self) {
        if self.stack.pop().is_some() {
            tracing::trace!(depth = self.stack.len(), "pop_scope");
        }
    }

    /// Pops frames until at most `depth` remain.
    pub fn unwind_to(&mut self, depth: usize) {
        while self.stack.len() > depth {
            self.pop_scope();
        }
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Returns `false`, leaving every binding untouched, when the target scope
    /// already holds a const binding for `name`.
    pub fn set_variable(
        &mut self,
        name: &str,
        value: Value,
        type_tag: &str,
        is_const: bool,
    ) -> bool {
        let scope = match self.stack.last_mut() {
            Some(frame) => frame,
            None => &mut self.global,
        };
        if scope.get(name).is_some_and(|binding| binding.is_const) {
            tracing::debug!(name, "rejected write to const binding");
            return false;
        }
        scope.insert(
            name.to_string(),
            Binding {
                value,
                type_tag: type_tag.to_string(),
                is_const,
            },
        );
        true
    }

    pub fn get_variable(&self, name: &str) -> Option<Value> {
        self.get_binding(name).map(|binding| binding.value.clone())
    }

    pub fn get_binding(&self, name: &str) -> Option<&Binding> {
        self.stack
            .last()
            .and_then(|frame| frame.get(name))
            .or_else(|| self.global.get(name))
    }
}
