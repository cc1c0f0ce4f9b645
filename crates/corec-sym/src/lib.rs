//! Symbol table (spec.md §4.2): a stack of scopes enforcing *exactly
//! two-level* lexical shadowing — the current scope, then the global scope
//! (index 0). Intermediate enclosing scopes are never searched, since the
//! language only nests one level deep (global vs. local/procedure).

mod types;

pub use types::{Direction, Identifier, Location, Owner, Parameter, Type};

use std::collections::HashMap;

use thiserror::Error;

/// Failure modes from spec.md §4.2, one per contract violation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SymbolError {
    #[error("'{0}' is already declared in this scope")]
    AlreadyDeclared(String),
    #[error("'{0}' is not declared")]
    NotDeclared(String),
    #[error("global declarations are only permitted in the program body")]
    GlobalOutsideProgramBody,
    #[error("'{0}' is not a parameter of the current procedure")]
    NotParam(String),
}

struct Scope {
    owner: Owner,
    symbols: HashMap<String, Identifier>,
}

/// Owns every live scope for one compilation. Scope 0 (global) is pushed
/// by [`SymbolTable::new`] and is never popped.
pub struct SymbolTable {
    scopes: Vec<Scope>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope {
                owner: Owner::Global,
                symbols: HashMap::new(),
            }],
        }
    }

    /// Appends a new empty scope owned by `owner`.
    pub fn push_scope(&mut self, owner: Owner) {
        self.scopes.push(Scope {
            owner,
            symbols: HashMap::new(),
        });
    }

    /// Removes the top scope. Never valid against the global scope — a
    /// caller bug, not a recoverable compilation error.
    pub fn pop_scope(&mut self) {
        assert!(self.scopes.len() > 1, "cannot pop the global scope");
        self.scopes.pop();
    }

    /// Installs `id` in the current scope, or in the global scope when
    /// `is_global` is set. Globals may only be introduced while exactly one
    /// scope sits below global (the program body) — spec.md §4.2.
    pub fn add(&mut self, id: Identifier, is_global: bool) -> Result<(), SymbolError> {
        if is_global && self.scopes.len() > 2 {
            return Err(SymbolError::GlobalOutsideProgramBody);
        }

        let target = if is_global { 0 } else { self.scopes.len() - 1 };
        let scope = &mut self.scopes[target];
        if scope.symbols.contains_key(&id.name) {
            return Err(SymbolError::AlreadyDeclared(id.name));
        }
        scope.symbols.insert(id.name.clone(), id);
        Ok(())
    }

    /// Resolves `name` via the current scope, then the global scope.
    pub fn find(&self, name: &str) -> Result<&Identifier, SymbolError> {
        let current = self.scopes.last().expect("global scope always present");
        if let Some(id) = current.symbols.get(name) {
            return Ok(id);
        }
        if let Some(id) = self.scopes[0].symbols.get(name) {
            return Ok(id);
        }
        Err(SymbolError::NotDeclared(name.to_string()))
    }

    /// Classifies a resolved name as `global`, `param`, or `local`.
    pub fn id_location(&self, name: &str) -> Result<Location, SymbolError> {
        let current = self.scopes.last().expect("global scope always present");
        if current.symbols.contains_key(name) {
            if self.is_param_of_current(name) {
                return Ok(Location::Param);
            }
            return Ok(Location::Local);
        }
        if self.scopes[0].symbols.contains_key(name) {
            return Ok(Location::Global);
        }
        Err(SymbolError::NotDeclared(name.to_string()))
    }

    /// Only defined when `id_location(name) == Param`.
    pub fn param_direction(&self, name: &str) -> Result<Direction, SymbolError> {
        let current = self.scopes.last().expect("global scope always present");
        if let Owner::Proc(owner) = &current.owner {
            if let Some(params) = &owner.params {
                if let Some(param) = params.iter().find(|p| p.name == name) {
                    return Ok(param.direction);
                }
            }
        }
        Err(SymbolError::NotParam(name.to_string()))
    }

    fn is_param_of_current(&self, name: &str) -> bool {
        let current = self.scopes.last().expect("global scope always present");
        match &current.owner {
            Owner::Proc(owner) => owner
                .params
                .as_ref()
                .is_some_and(|params| params.iter().any(|p| p.name == name)),
            Owner::Global => false,
        }
    }

    /// The owner of the scope currently on top of the stack.
    pub fn current_owner(&self) -> &Owner {
        &self.scopes.last().expect("global scope always present").owner
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Names declared in the global scope, for `--emit-symbols` dumps.
    pub fn global_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.scopes[0].symbols.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str, ty: Type) -> Identifier {
        Identifier::variable(name, ty, None, 0)
    }

    #[test]
    fn duplicate_in_same_scope_fails() {
        let mut table = SymbolTable::new();
        table.push_scope(Owner::Global);
        table.add(var("x", Type::Integer), false).unwrap();
        let err = table.add(var("x", Type::Integer), false).unwrap_err();
        assert_eq!(err, SymbolError::AlreadyDeclared("x".to_string()));
    }

    #[test]
    fn exactly_two_level_shadowing() {
        let mut table = SymbolTable::new();
        table.add(var("x", Type::Integer), true).unwrap(); // global x
        table.push_scope(Owner::Global); // program body
        table.add(var("x", Type::Float), false).unwrap(); // local x shadows global
        assert_eq!(table.find("x").unwrap().ty, Type::Float);
        assert_eq!(table.id_location("x").unwrap(), Location::Local);
    }

    #[test]
    fn global_declaration_only_allowed_in_program_body() {
        let mut table = SymbolTable::new();
        table.push_scope(Owner::Global); // program body, depth 2: ok
        table.push_scope(Owner::Global); // nested further, depth 3: not ok
        let err = table.add(var("x", Type::Integer), true).unwrap_err();
        assert_eq!(err, SymbolError::GlobalOutsideProgramBody);
    }

    #[test]
    fn not_declared_is_an_error() {
        let table = SymbolTable::new();
        assert_eq!(
            table.find("missing").unwrap_err(),
            SymbolError::NotDeclared("missing".to_string())
        );
    }

    #[test]
    fn param_location_and_direction() {
        let mut table = SymbolTable::new();
        let proc = Identifier::procedure(
            "q",
            vec![Parameter::new("n", Type::Integer, None, Direction::Out)],
            1,
        );
        table.push_scope(Owner::Proc(proc));
        table.add(var("n", Type::Integer), false).unwrap();
        assert_eq!(table.id_location("n").unwrap(), Location::Param);
        assert_eq!(table.param_direction("n").unwrap(), Direction::Out);
    }

    #[test]
    fn pop_scope_restores_visibility() {
        let mut table = SymbolTable::new();
        table.push_scope(Owner::Global);
        table.add(var("x", Type::Integer), false).unwrap();
        table.pop_scope();
        assert_eq!(
            table.find("x").unwrap_err(),
            SymbolError::NotDeclared("x".to_string())
        );
    }
}
