use std::collections::HashMap;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{SymbolType, Value},
    },
};

/// A named, typed, optionally initialized variable binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// The declared type. Every value stored in the symbol must have it.
    pub ty:    SymbolType,
    /// `None` until the variable is initialized or assigned.
    pub value: Option<Value>,
}

/// Mapping from variable name to [`Symbol`] for a single frame.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: HashMap<String, Symbol>,
}

impl SymbolTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `name` with type `ty` and no value.
    ///
    /// Fails with [`RuntimeError::AlreadyDeclared`] if the name is already
    /// present in this table.
    pub fn declare(&mut self, name: &str, ty: SymbolType, line: usize) -> EvalResult<()> {
        if self.symbols.contains_key(name) {
            return Err(RuntimeError::AlreadyDeclared { name: name.to_string(),
                                                       line });
        }
        self.symbols.insert(name.to_string(), Symbol { ty, value: None });
        Ok(())
    }

    /// Looks up `name`, failing with [`RuntimeError::UndeclaredVariable`] if it
    /// is absent.
    pub fn get(&self, name: &str, line: usize) -> EvalResult<&Symbol> {
        self.symbols
            .get(name)
            .ok_or_else(|| RuntimeError::UndeclaredVariable { name: name.to_string(),
                                                              line })
    }

    /// Replaces the symbol bound to `name`.
    ///
    /// Fails if the name is absent or if `symbol.ty` differs from the declared
    /// type.
    pub fn set(&mut self, name: &str, symbol: Symbol, line: usize) -> EvalResult<()> {
        let declared = self.get(name, line)?.ty;
        if declared != symbol.ty {
            return Err(RuntimeError::AssignmentTypeMismatch { name: name.to_string(),
                                                              expected: declared,
                                                              found: symbol.ty,
                                                              line });
        }
        self.symbols.insert(name.to_string(), symbol);
        Ok(())
    }

    /// Whether `name` is bound in this table.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    fn insert(&mut self, name: &str, symbol: Symbol) {
        self.symbols.insert(name.to_string(), symbol);
    }
}

/// Stack of symbol tables making up the variables visible to the evaluator.
///
/// The bottom frame is the program scope. Form loops push an isolated frame:
/// reads fall through to the frames below it, while declarations and writes
/// land in the isolated frame and vanish when it is popped. A variable that
/// drives a form loop is therefore left unchanged in the enclosing scope once
/// the loop ends.
#[derive(Debug, Clone)]
pub struct Scopes {
    frames: Vec<SymbolTable>,
}

impl Default for Scopes {
    fn default() -> Self {
        Self::new()
    }
}

impl Scopes {
    /// Creates a stack holding only the program scope.
    #[must_use]
    pub fn new() -> Self {
        Self { frames: vec![SymbolTable::new()] }
    }

    /// Number of frames, including the program scope.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Pushes an isolated child frame.
    pub fn push_isolated(&mut self) {
        self.frames.push(SymbolTable::new());
    }

    /// Pops the innermost child frame, discarding everything written to it.
    /// The program scope is never popped.
    pub fn pop(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    fn top_mut(&mut self) -> &mut SymbolTable {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    fn find(&self, name: &str) -> Option<&Symbol> {
        self.frames.iter().rev().find_map(|frame| frame.lookup(name))
    }

    /// Declares `name` in the innermost frame.
    ///
    /// A name visible from any enclosing frame counts as already declared.
    pub fn declare(&mut self, name: &str, ty: SymbolType, line: usize) -> EvalResult<()> {
        if self.find(name).is_some() {
            return Err(RuntimeError::AlreadyDeclared { name: name.to_string(),
                                                       line });
        }
        self.top_mut().declare(name, ty, line)
    }

    /// Returns the innermost symbol bound to `name`.
    pub fn get(&self, name: &str, line: usize) -> EvalResult<&Symbol> {
        self.find(name)
            .ok_or_else(|| RuntimeError::UndeclaredVariable { name: name.to_string(),
                                                              line })
    }

    /// Reads the value of an initialized variable.
    pub fn value(&self, name: &str, line: usize) -> EvalResult<&Value> {
        self.get(name, line)?
            .value
            .as_ref()
            .ok_or_else(|| RuntimeError::Uninitialized { name: name.to_string(),
                                                         line })
    }

    /// Stores `value` into `name`, checking it against the declared type.
    ///
    /// The write goes to the innermost frame. When the symbol lives in an
    /// enclosing frame it is shadowed there with the same declared type.
    pub fn assign(&mut self, name: &str, value: Value, line: usize) -> EvalResult<()> {
        let declared = self.get(name, line)?.ty;
        let symbol = Symbol { ty:    value.ty(),
                              value: Some(value), };
        let top = self.top_mut();
        if !top.contains(name) {
            top.insert(name, Symbol { ty:    declared,
                                      value: None, });
        }
        top.set(name, symbol, line)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn declare_twice_is_a_name_error() {
        let mut table = SymbolTable::new();
        table.declare("x", SymbolType::Int, 1).unwrap();
        let err = table.declare("x", SymbolType::Int, 2).unwrap_err();
        assert_eq!(err,
                   RuntimeError::AlreadyDeclared { name: "x".to_string(),
                                                   line: 2, });
    }

    #[test]
    fn set_rejects_a_different_type() {
        let mut table = SymbolTable::new();
        table.declare("x", SymbolType::Int, 1).unwrap();
        let symbol = Symbol { ty:    SymbolType::String,
                              value: Some(Value::from("no")), };
        assert!(matches!(table.set("x", symbol, 1),
                         Err(RuntimeError::AssignmentTypeMismatch { .. })));
    }

    #[test]
    fn reading_an_uninitialized_variable_fails() {
        let mut scopes = Scopes::new();
        scopes.declare("x", SymbolType::Bool, 1).unwrap();
        assert!(matches!(scopes.value("x", 4),
                         Err(RuntimeError::Uninitialized { line: 4, .. })));
        assert!(matches!(scopes.value("y", 4),
                         Err(RuntimeError::UndeclaredVariable { .. })));
    }

    #[test]
    fn isolated_frame_buffers_writes() {
        let mut scopes = Scopes::new();
        scopes.declare("counter", SymbolType::Int, 1).unwrap();
        scopes.assign("counter", Value::Int(0), 1).unwrap();

        scopes.push_isolated();
        scopes.assign("counter", Value::Int(5), 2).unwrap();
        assert_eq!(scopes.value("counter", 2).unwrap(), &Value::Int(5));
        scopes.declare("inner", SymbolType::String, 3).unwrap();
        scopes.pop();

        assert_eq!(scopes.value("counter", 4).unwrap(), &Value::Int(0));
        assert!(scopes.get("inner", 4).is_err());
        assert_eq!(scopes.depth(), 1);
    }

    #[test]
    fn isolated_frame_still_type_checks() {
        let mut scopes = Scopes::new();
        scopes.declare("name", SymbolType::String, 1).unwrap();
        scopes.push_isolated();
        assert!(scopes.assign("name", Value::Int(1), 2).is_err());
        assert!(scopes.declare("name", SymbolType::Int, 3).is_err());
    }
}
