//! Catalogue of callable PHP intrinsics, bucketed by result kind.
//!
//! The expression generator asks for "some function returning int" and gets
//! a uniform pick from the matching bucket. Only total, trap-free intrinsics
//! are listed: nothing that can raise, divide by zero, or emit conversion
//! notices for the argument types we generate.

use rand::{Rng, RngCore};

use crate::ir::{ScalarKind, TypeInfo};

/// A parameter of a callable intrinsic.
///
/// `strict` forces a cast at the call site. PHP silently widens overflowing
/// integer arithmetic to float, so an "int" expression is not guaranteed to
/// carry an int at runtime; the cast pins it down.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    pub param_type: TypeInfo,
    pub strict: bool,
}

/// Signature of a callable intrinsic.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncInfo {
    pub name: String,
    pub params: Vec<ParamSpec>,
    /// Trailing parameters beyond this count may be omitted at call sites.
    pub min_args: usize,
    pub result: TypeInfo,
    /// Wrap call results in a cast to `result` (for intrinsics whose PHP
    /// return type is looser than the bucket, e.g. `abs`, `array_sum`).
    pub need_cast: bool,
}

impl FuncInfo {
    pub fn new(
        name: impl Into<String>,
        params: Vec<ParamSpec>,
        min_args: usize,
        result: TypeInfo,
        need_cast: bool,
    ) -> Self {
        let name = name.into();
        debug_assert!(min_args <= params.len(), "bad min_args for {name}");
        Self {
            name,
            params,
            min_args,
            result,
            need_cast,
        }
    }
}

fn param(param_type: TypeInfo) -> ParamSpec {
    ParamSpec {
        param_type,
        strict: false,
    }
}

fn strict_param(param_type: TypeInfo) -> ParamSpec {
    ParamSpec {
        param_type,
        strict: true,
    }
}

// ---------------------------------------------------------------------------
// SymbolTable
// ---------------------------------------------------------------------------

/// Immutable catalogue of intrinsics, one bucket per scalar result kind.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    bool_funcs: Vec<FuncInfo>,
    int_funcs: Vec<FuncInfo>,
    float_funcs: Vec<FuncInfo>,
    string_funcs: Vec<FuncInfo>,
}

impl SymbolTable {
    /// An empty table (useful for targeted tests).
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a function in the bucket matching its result kind.
    ///
    /// # Panics
    ///
    /// Panics when the result type is not a concrete scalar; only scalar
    /// results are callable through the typed channels.
    pub fn add(&mut self, func: FuncInfo) {
        let bucket = match func.result.scalar_kind() {
            Some(ScalarKind::Bool) => &mut self.bool_funcs,
            Some(ScalarKind::Int) => &mut self.int_funcs,
            Some(ScalarKind::Float) => &mut self.float_funcs,
            Some(ScalarKind::String) => &mut self.string_funcs,
            other => panic!("function {} has unbucketable result {:?}", func.name, other),
        };
        bucket.push(func);
    }

    /// All functions returning the given scalar kind.
    pub fn funcs_of(&self, kind: ScalarKind) -> &[FuncInfo] {
        match kind {
            ScalarKind::Bool => &self.bool_funcs,
            ScalarKind::Int => &self.int_funcs,
            ScalarKind::Float => &self.float_funcs,
            ScalarKind::String => &self.string_funcs,
            ScalarKind::Mixed => &[],
        }
    }

    /// Uniform pick from the bucket for `kind`; `None` when it is empty.
    pub fn pick_func(&self, kind: ScalarKind, rng: &mut dyn RngCore) -> Option<&FuncInfo> {
        let bucket = self.funcs_of(kind);
        if bucket.is_empty() {
            return None;
        }
        Some(&bucket[rng.gen_range(0..bucket.len())])
    }

    /// The full built-in catalogue.
    pub fn builtin() -> Self {
        let mut table = Self::new();

        // bool-returning
        for name in ["is_int", "is_string", "is_bool", "is_float", "boolval"] {
            table.add(FuncInfo::new(
                name,
                vec![param(TypeInfo::MIXED)],
                1,
                TypeInfo::BOOL,
                false,
            ));
        }
        table.add(FuncInfo::new(
            "str_contains",
            vec![param(TypeInfo::STRING), param(TypeInfo::STRING)],
            2,
            TypeInfo::BOOL,
            false,
        ));

        // int-returning
        table.add(FuncInfo::new(
            "strlen",
            vec![param(TypeInfo::STRING)],
            1,
            TypeInfo::INT,
            false,
        ));
        table.add(FuncInfo::new(
            "ord",
            vec![param(TypeInfo::STRING)],
            1,
            TypeInfo::INT,
            false,
        ));
        table.add(FuncInfo::new(
            "intval",
            vec![param(TypeInfo::MIXED)],
            1,
            TypeInfo::INT,
            false,
        ));
        // abs(PHP_INT_MIN) comes back as float
        table.add(FuncInfo::new(
            "abs",
            vec![strict_param(TypeInfo::INT)],
            1,
            TypeInfo::INT,
            true,
        ));
        table.add(FuncInfo::new(
            "max",
            vec![strict_param(TypeInfo::INT), strict_param(TypeInfo::INT)],
            2,
            TypeInfo::INT,
            false,
        ));
        table.add(FuncInfo::new(
            "min",
            vec![strict_param(TypeInfo::INT), strict_param(TypeInfo::INT)],
            2,
            TypeInfo::INT,
            false,
        ));
        table.add(FuncInfo::new(
            "count",
            vec![param(TypeInfo::Array(Box::new(TypeInfo::MIXED)))],
            1,
            TypeInfo::INT,
            false,
        ));
        // int|float depending on element magnitudes
        table.add(FuncInfo::new(
            "array_sum",
            vec![param(TypeInfo::Array(Box::new(TypeInfo::INT)))],
            1,
            TypeInfo::INT,
            true,
        ));

        // float-returning
        table.add(FuncInfo::new(
            "floatval",
            vec![param(TypeInfo::MIXED)],
            1,
            TypeInfo::FLOAT,
            false,
        ));
        for name in ["sqrt", "round", "floor", "ceil"] {
            table.add(FuncInfo::new(
                name,
                vec![strict_param(TypeInfo::FLOAT)],
                1,
                TypeInfo::FLOAT,
                false,
            ));
        }
        // fdiv is the division intrinsic that is total by definition
        table.add(FuncInfo::new(
            "fdiv",
            vec![strict_param(TypeInfo::FLOAT), strict_param(TypeInfo::FLOAT)],
            2,
            TypeInfo::FLOAT,
            false,
        ));
        table.add(FuncInfo::new("pi", vec![], 0, TypeInfo::FLOAT, false));

        // string-returning
        for name in ["strrev", "strtoupper", "strtolower", "trim", "bin2hex"] {
            table.add(FuncInfo::new(
                name,
                vec![param(TypeInfo::STRING)],
                1,
                TypeInfo::STRING,
                false,
            ));
        }
        table.add(FuncInfo::new(
            "dechex",
            vec![strict_param(TypeInfo::INT)],
            1,
            TypeInfo::STRING,
            false,
        ));
        table.add(FuncInfo::new(
            "substr",
            vec![
                param(TypeInfo::STRING),
                strict_param(TypeInfo::INT),
                strict_param(TypeInfo::INT),
            ],
            2,
            TypeInfo::STRING,
            false,
        ));
        table.add(FuncInfo::new(
            "str_pad",
            vec![
                param(TypeInfo::STRING),
                strict_param(TypeInfo::INT),
                param(TypeInfo::STRING),
            ],
            2,
            TypeInfo::STRING,
            false,
        ));
        table.add(FuncInfo::new(
            "implode",
            vec![
                param(TypeInfo::STRING),
                param(TypeInfo::Array(Box::new(TypeInfo::STRING))),
            ],
            2,
            TypeInfo::STRING,
            false,
        ));

        table
    }
}
