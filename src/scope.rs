//! Lexical scope: a stack of frames holding typed variables.
//!
//! The statement generator pushes and pops frames as it enters and leaves
//! blocks; the expression generator only reads. A variable matches a lookup
//! when its declared type is structurally equal to the requested type
//! (`TypeInfo` equality is structural, including enum value sets).

use rand::{Rng, RngCore};

use crate::ir::TypeInfo;

/// A variable visible in the current scope.
#[derive(Debug, Clone, PartialEq)]
pub struct VarInfo {
    pub name: String,
    pub type_info: TypeInfo,
}

/// Stack of variable frames.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    frames: Vec<Vec<VarInfo>>,
}

impl Scope {
    /// An empty scope with a single root frame.
    pub fn new() -> Self {
        Self {
            frames: vec![Vec::new()],
        }
    }

    /// Enter a nested frame.
    pub fn enter(&mut self) {
        self.frames.push(Vec::new());
    }

    /// Leave the innermost frame, dropping its variables.
    ///
    /// # Panics
    ///
    /// Panics when called with no frame to leave; enter/leave calls must
    /// pair up.
    pub fn leave(&mut self) {
        self.frames.pop().expect("leave() without matching enter()");
    }

    /// Register a variable in the innermost frame.
    ///
    /// # Panics
    ///
    /// Panics when the scope has no frames.
    pub fn add_var(&mut self, name: impl Into<String>, type_info: TypeInfo) {
        let frame = self.frames.last_mut().expect("add_var() on empty scope");
        frame.push(VarInfo {
            name: name.into(),
            type_info,
        });
    }

    /// All in-scope variables whose type structurally equals `ty`.
    pub fn vars_of_type(&self, ty: &TypeInfo) -> Vec<&VarInfo> {
        self.frames
            .iter()
            .flatten()
            .filter(|v| v.type_info == *ty)
            .collect()
    }

    /// Pick a uniformly random in-scope variable of the given type.
    ///
    /// Returns `None` when no variable of that type is visible; the caller
    /// falls back to a literal.
    pub fn find_var_of_type(&self, ty: &TypeInfo, rng: &mut dyn RngCore) -> Option<&VarInfo> {
        let matches = self.vars_of_type(ty);
        if matches.is_empty() {
            return None;
        }
        Some(matches[rng.gen_range(0..matches.len())])
    }

    /// Iterate over every visible variable, outermost frame first.
    pub fn iter(&self) -> impl Iterator<Item = &VarInfo> {
        self.frames.iter().flatten()
    }
}
