//! Typed, depth-bounded expression synthesis.
//!
//! Each scalar kind has a weighted channel of productions; a draw that
//! cannot satisfy its precondition (no matching variable in scope, empty
//! intrinsic bucket) falls back or is redrawn. The generator owns the RNG
//! exclusively (type-erased to avoid generic explosion); everything else
//! borrows randomness through it.
//!
//! Two rewrites keep the output trap-free: float operands never meet `==`
//! family operators directly (the float-specific opcodes print as helper
//! calls), and `/` / `%` nodes always carry a numeric type hint so the
//! printer can emit the safe div/mod helpers.

use rand::{Rng, RngCore};

use crate::choice::{Choice, ChoiceList};
use crate::ir::{is_simple_node, EnumInfo, EnumValue, Node, Op, ScalarKind, TypeInfo};
use crate::scope::Scope;
use crate::symbols::{FuncInfo, SymbolTable};
use crate::value;


/// Hard cap on recursive expression synthesis. Any draw at a deeper level
/// is replaced by the channel's terminal fallback.
const MAX_EXPR_DEPTH: usize = 10;

/// Cap on recursive type construction in [`ExprGenerator::pick_type`].
const MAX_TYPE_DEPTH: usize = 5;

/// A channel production. `None` means the precondition failed and the
/// selection loop should retry.
type GenFn = fn(&mut ExprGenerator<'_>, &Scope) -> Option<Node>;

/// The five typed channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Channel {
    Cond,
    Bool,
    Int,
    Float,
    String,
}

// ---------------------------------------------------------------------------
// ExprGenerator
// ---------------------------------------------------------------------------

/// Generates type-correct expression trees against a scope and an
/// intrinsic catalogue.
pub struct ExprGenerator<'a> {
    /// The random number generator (type-erased; sole source of
    /// randomness for the whole generation session).
    rng: &'a mut dyn RngCore,
    symtab: &'a SymbolTable,
    /// Current expression nesting depth.
    expr_depth: usize,
    cond_choices: ChoiceList<GenFn>,
    bool_choices: ChoiceList<GenFn>,
    int_choices: ChoiceList<GenFn>,
    float_choices: ChoiceList<GenFn>,
    string_choices: ChoiceList<GenFn>,
}

impl<'a> ExprGenerator<'a> {
    pub fn new(rng: &'a mut dyn RngCore, symtab: &'a SymbolTable) -> Self {
        let cond_choices = ChoiceList::new(
            gen_bool_lit as GenFn,
            vec![
                Choice::new(3, gen_eq2 as GenFn),
                Choice::new(3, gen_eq3),
                Choice::new(4, gen_bool_and),
                Choice::new(4, gen_bool_or),
                Choice::new(4, gen_not),
                Choice::with_fallback(5, gen_bool_var, gen_bool_lit),
                Choice::new(6, gen_bool_call),
                Choice::new(1, gen_bool_lit),
            ],
        );

        let bool_choices = ChoiceList::new(
            gen_bool_lit as GenFn,
            vec![
                Choice::new(1, gen_eq2 as GenFn),
                Choice::new(1, gen_eq3),
                Choice::new(3, gen_bool_and),
                Choice::new(3, gen_bool_or),
                Choice::new(4, gen_not),
                Choice::with_fallback(6, gen_bool_var, gen_bool_lit),
                Choice::new(3, gen_bool_lit),
                Choice::new(4, gen_bool_call),
            ],
        );

        let int_choices = ChoiceList::new(
            gen_int_lit as GenFn,
            vec![
                Choice::new(1, gen_int_ternary as GenFn),
                Choice::new(2, gen_int_add),
                Choice::new(2, gen_int_sub),
                Choice::new(1, gen_int_mul),
                Choice::new(1, gen_int_bitand),
                Choice::new(1, gen_int_bitor),
                Choice::new(1, gen_int_bitxor),
                Choice::new(1, gen_int_exp),
                Choice::new(1, gen_int_div),
                Choice::new(1, gen_int_mod),
                Choice::new(2, gen_int_negation),
                Choice::new(2, gen_int_cast),
                Choice::new(7, gen_int_call),
                Choice::new(4, gen_int_lit),
                Choice::with_fallback(6, gen_int_var, gen_int_lit),
            ],
        );

        let float_choices = ChoiceList::new(
            gen_float_lit as GenFn,
            vec![
                Choice::new(1, gen_float_ternary as GenFn),
                Choice::new(2, gen_float_add),
                Choice::new(2, gen_float_sub),
                Choice::new(1, gen_float_div),
                Choice::new(1, gen_float_mul),
                Choice::new(5, gen_float_call),
                Choice::with_fallback(6, gen_float_var, gen_float_lit),
                Choice::new(5, gen_float_lit),
            ],
        );

        let string_choices = ChoiceList::new(
            gen_string_lit as GenFn,
            vec![
                Choice::new(2, gen_string_cast as GenFn),
                Choice::new(5, gen_string_call),
                Choice::new(4, gen_concat),
                Choice::new(5, gen_string_lit),
                Choice::new(5, gen_interp_string),
                Choice::with_fallback(6, gen_string_var, gen_string_lit),
                Choice::with_fallback(2, gen_string_index, gen_interp_string),
            ],
        );

        Self {
            rng,
            symtab,
            expr_depth: 0,
            cond_choices,
            bool_choices,
            int_choices,
            float_choices,
            string_choices,
        }
    }
}

// ---------------------------------------------------------------------------
// Randomness helpers (shared with the statement generator)
// ---------------------------------------------------------------------------

impl ExprGenerator<'_> {
    /// Borrow the underlying RNG.
    pub fn rng_mut(&mut self) -> &mut dyn RngCore {
        self.rng
    }

    /// Coin flip with the given probability of `true`.
    pub fn gen_bool(&mut self, prob: f64) -> bool {
        self.rng.gen_bool(prob)
    }

    /// Uniform draw from an inclusive range.
    pub fn random_in(&mut self, min: usize, max: usize) -> usize {
        self.rng.gen_range(min..=max)
    }
}

// ---------------------------------------------------------------------------
// Type picking
// ---------------------------------------------------------------------------

impl ExprGenerator<'_> {
    /// Depth-biased random type: mostly scalars, with arrays, tuples, and
    /// enums thinning out as nesting grows.
    pub fn pick_type(&mut self) -> TypeInfo {
        self.pick_type_at(0)
    }

    fn pick_type_at(&mut self, depth: usize) -> TypeInfo {
        if depth >= MAX_TYPE_DEPTH {
            return self.pick_scalar_type();
        }
        match self.rng.gen_range(0..8 + depth * 3) {
            0 => TypeInfo::Array(Box::new(self.pick_type_at(depth + 1))),
            1 => self.pick_tuple_type(depth + 2),
            2 => self.pick_enum_type(),
            _ => self.pick_scalar_type(),
        }
    }

    fn pick_tuple_type(&mut self, depth: usize) -> TypeInfo {
        let num_elems = self.random_in(1, 12);
        let mut elems = Vec::with_capacity(num_elems);
        for _ in 0..num_elems {
            elems.push(self.pick_type_at(depth));
        }
        TypeInfo::Tuple(elems)
    }

    /// An enum over 2..=30 ints, 2..=16 floats, or 2..=20 strings, with
    /// pairwise-distinct values.
    pub fn pick_enum_type(&mut self) -> TypeInfo {
        let value_kind = match self.pick_scalar_type_no_bool() {
            TypeInfo::Scalar(kind) => kind,
            other => panic!("non-scalar from pick_scalar_type_no_bool: {other:?}"),
        };
        let values = match value_kind {
            ScalarKind::Int => {
                let n = self.random_in(2, 30);
                generate_unique(n, || EnumValue::Int(value::int_value(self.rng)))
            }
            ScalarKind::Float => {
                let n = self.random_in(2, 16);
                generate_unique(n, || EnumValue::Float(value::float_value(self.rng)))
            }
            ScalarKind::String => {
                let n = self.random_in(2, 20);
                generate_unique(n, || EnumValue::Str(value::string_value(self.rng)))
            }
            other => panic!("unexpected {other:?} enum value kind"),
        };
        TypeInfo::Enum(EnumInfo { value_kind, values })
    }

    /// Uniform over bool, int, float, string.
    pub fn pick_scalar_type(&mut self) -> TypeInfo {
        SCALAR_TYPES[self.rng.gen_range(0..SCALAR_TYPES.len())].clone()
    }

    /// Uniform over int, float, string.
    pub fn pick_scalar_type_no_bool(&mut self) -> TypeInfo {
        SCALAR_TYPES_NO_BOOL[self.rng.gen_range(0..SCALAR_TYPES_NO_BOOL.len())].clone()
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

impl ExprGenerator<'_> {
    /// Generate an expression of the requested type.
    ///
    /// # Panics
    ///
    /// Panics when asked for an enum with an empty value set; enum types
    /// built by [`pick_enum_type`](Self::pick_enum_type) always have one.
    pub fn generate_value_of_type(&mut self, scope: &Scope, ty: &TypeInfo) -> Node {
        match ty {
            TypeInfo::Scalar(kind) => match kind {
                ScalarKind::Bool => self.bool_value(scope),
                ScalarKind::Int => self.int_value(scope),
                ScalarKind::Float => self.float_value(scope),
                ScalarKind::String => self.string_value(scope),
                ScalarKind::Mixed => self.mixed_value(scope, true),
            },
            TypeInfo::Enum(info) => {
                if self.rng.gen_bool(0.6) {
                    if let Some(v) = self.var_of_type(scope, ty) {
                        return v;
                    }
                }
                assert!(!info.values.is_empty(), "enum type with no values");
                info.values[self.rng.gen_range(0..info.values.len())].literal()
            }
            TypeInfo::Array(elem) => self.array_value(scope, elem),
            TypeInfo::Tuple(elems) => self.tuple_value(scope, elems),
        }
    }

    /// A condition expression (the `cond` channel: comparison-heavy).
    pub fn condition(&mut self, scope: &Scope) -> Node {
        self.cond_value(scope)
    }

    /// A standalone (in)equality comparison, with the float-safety rewrite
    /// applied as in the channels.
    pub fn equality(&mut self, scope: &Scope) -> Node {
        let op = match self.random_in(0, 3) {
            0 => Op::Equal2,
            1 => Op::Equal3,
            2 => Op::NotEqual2,
            _ => Op::NotEqual3,
        };
        self.cmp_op(scope, op)
    }
}

// ---------------------------------------------------------------------------
// Channel selection
// ---------------------------------------------------------------------------

impl ExprGenerator<'_> {
    fn pick_from(&mut self, channel: Channel) -> Choice<GenFn> {
        match channel {
            Channel::Cond => self.cond_choices.pick(&mut *self.rng),
            Channel::Bool => self.bool_choices.pick(&mut *self.rng),
            Channel::Int => self.int_choices.pick(&mut *self.rng),
            Channel::Float => self.float_choices.pick(&mut *self.rng),
            Channel::String => self.string_choices.pick(&mut *self.rng),
        }
    }

    fn channel_fallback(&self, channel: Channel) -> GenFn {
        match channel {
            Channel::Cond => self.cond_choices.fallback(),
            Channel::Bool => self.bool_choices.fallback(),
            Channel::Int => self.int_choices.fallback(),
            Channel::Float => self.float_choices.fallback(),
            Channel::String => self.string_choices.fallback(),
        }
    }

    /// Draw productions from a channel until one succeeds.
    ///
    /// At the depth cap the channel's terminal fallback is used instead of
    /// drawing; with probability 0.4 the result gains a redundant pair of
    /// parentheses (deliberate noise for precedence parsing downstream).
    fn choose_expr(&mut self, scope: &Scope, channel: Channel) -> Node {
        if self.expr_depth > MAX_EXPR_DEPTH {
            let fallback = self.channel_fallback(channel);
            return fallback(self, scope).expect("channel fallback is a total producer");
        }
        self.expr_depth += 1;
        let mut node = loop {
            let choice = self.pick_from(channel);
            let mut produced = (choice.generate)(self, scope);
            if produced.is_none() {
                if let Some(fallback) = choice.fallback {
                    produced = fallback(self, scope);
                }
            }
            if let Some(n) = produced {
                break n;
            }
        };
        if self.rng.gen_range(0..10) <= 3 {
            node = Node::parens(node);
        }
        self.expr_depth -= 1;
        node
    }

    fn cond_value(&mut self, scope: &Scope) -> Node {
        self.choose_expr(scope, Channel::Cond)
    }

    fn bool_value(&mut self, scope: &Scope) -> Node {
        self.choose_expr(scope, Channel::Bool)
    }

    fn int_value(&mut self, scope: &Scope) -> Node {
        self.choose_expr(scope, Channel::Int)
    }

    fn float_value(&mut self, scope: &Scope) -> Node {
        self.choose_expr(scope, Channel::Float)
    }

    fn string_value(&mut self, scope: &Scope) -> Node {
        self.choose_expr(scope, Channel::String)
    }

    fn mixed_value(&mut self, scope: &Scope, permit_array: bool) -> Node {
        let max_roll = if self.expr_depth >= MAX_EXPR_DEPTH || !permit_array {
            3
        } else {
            4
        };
        match self.random_in(0, max_roll) {
            0 => self.bool_value(scope),
            1 => self.int_value(scope),
            2 => self.float_value(scope),
            3 => self.string_value(scope),
            _ => {
                let elem = self.pick_scalar_type();
                self.array_value(scope, &elem)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Productions
// ---------------------------------------------------------------------------

impl ExprGenerator<'_> {
    /// Comparison over two operands of one random scalar type. Float
    /// operands rewrite the opcode to its float-specific variant, which the
    /// printer emits as a helper call instead of a raw operator.
    fn cmp_op(&mut self, scope: &Scope, op: Op) -> Node {
        let ty = self.pick_scalar_type();
        let x = self.generate_value_of_type(scope, &ty);
        let y = self.generate_value_of_type(scope, &ty);
        let op = if ty.is_float() { float_cmp_op(op) } else { op };
        Node::binary(op, maybe_add_parens(x), maybe_add_parens(y))
    }

    fn binary_of(&mut self, scope: &Scope, op: Op, channel: Channel, hint: Option<TypeInfo>) -> Node {
        let x = self.choose_expr(scope, channel);
        let y = self.choose_expr(scope, channel);
        let (x, y) = (maybe_add_parens(x), maybe_add_parens(y));
        match hint {
            Some(ty) => Node::binary_typed(op, x, y, ty),
            None => Node::binary(op, x, y),
        }
    }

    /// Int binary wrapped in a cast back to int (overflow widens to float
    /// in PHP; the cast keeps the channel honest).
    fn int_binary_cast(&mut self, scope: &Scope, op: Op) -> Node {
        let inner = self.binary_of(scope, op, Channel::Int, Some(TypeInfo::INT));
        Node::cast(TypeInfo::INT, maybe_add_parens(inner))
    }

    fn int_binary(&mut self, scope: &Scope, op: Op) -> Node {
        self.binary_of(scope, op, Channel::Int, Some(TypeInfo::INT))
    }

    fn float_binary(&mut self, scope: &Scope, op: Op) -> Node {
        self.binary_of(scope, op, Channel::Float, Some(TypeInfo::FLOAT))
    }

    /// Ternary with independently coin-flipped redundant parens on both
    /// branches; the whole ternary is always parenthesized.
    fn new_ternary(&mut self, cond: Node, mut x: Node, mut y: Node) -> Node {
        if self.rng.gen_bool(0.5) {
            x = Node::parens(x);
        }
        if self.rng.gen_bool(0.5) {
            y = Node::parens(y);
        }
        Node::parens(Node::ternary(cond, x, y))
    }

    fn var_of_type(&mut self, scope: &Scope, ty: &TypeInfo) -> Option<Node> {
        let var = scope.find_var_of_type(ty, &mut *self.rng)?;
        Some(Node::var(var.name.clone(), var.type_info.clone()))
    }

    /// Cast of a mixed value (arrays excluded: casting an array to string
    /// trips a conversion notice).
    fn cast_to_type(&mut self, scope: &Scope, ty: TypeInfo) -> Node {
        let arg = self.mixed_value(scope, false);
        Node::cast(ty, maybe_add_parens(arg))
    }

    fn call_of_kind(&mut self, scope: &Scope, kind: ScalarKind) -> Option<Node> {
        let func = self.symtab.pick_func(kind, &mut *self.rng)?.clone();
        Some(self.call_func(scope, &func))
    }

    /// Emit a call to `func` with a random arity in `[min_args, arity]`,
    /// casting strict arguments and the result when the signature asks.
    fn call_func(&mut self, scope: &Scope, func: &FuncInfo) -> Node {
        self.expr_depth += 1;
        let num_args = self.random_in(func.min_args, func.params.len());
        let mut args = Vec::with_capacity(num_args);
        for param in &func.params[..num_args] {
            let mut arg = self.generate_value_of_type(scope, &param.param_type);
            if param.strict {
                arg = Node::cast(param.param_type.clone(), maybe_add_parens(arg));
            }
            args.push(arg);
        }
        let mut result = Node::call(Node::name(func.name.clone()), args);
        if func.need_cast {
            result = Node::cast(func.result.clone(), result);
        }
        self.expr_depth -= 1;
        result
    }

    fn array_value(&mut self, scope: &Scope, elem: &TypeInfo) -> Node {
        self.expr_depth += 1;
        let max_elems = if self.expr_depth >= MAX_EXPR_DEPTH { 2 } else { 4 };
        let num_elems = self.random_in(1, max_elems);
        let mut elems = Vec::with_capacity(num_elems);
        for _ in 0..num_elems {
            elems.push(self.generate_value_of_type(scope, elem));
        }
        self.expr_depth -= 1;
        Node::array_lit(elems)
    }

    fn tuple_value(&mut self, scope: &Scope, elem_types: &[TypeInfo]) -> Node {
        self.expr_depth += 1;
        let mut elems = Vec::with_capacity(elem_types.len());
        for ty in elem_types {
            elems.push(self.generate_value_of_type(scope, ty));
        }
        self.expr_depth -= 1;
        Node::call(Node::name("tuple"), elems)
    }

    /// `(string)$s[key]` over an in-scope string variable; `None` without
    /// one. The key is usually an int expression, occasionally the
    /// out-of-range literal `-1`.
    fn string_index(&mut self, scope: &Scope) -> Option<Node> {
        let lvalue = self.var_of_type(scope, &TypeInfo::STRING)?;
        let object = maybe_add_parens(lvalue);
        let key = if self.random_in(0, 10) > 2 {
            self.int_value(scope)
        } else {
            Node::int_lit(-1)
        };
        Some(Node::cast(TypeInfo::STRING, Node::index(object, key)))
    }

    /// Double-quoted string of 3..=8 parts; each part is an in-scope
    /// variable of a random scalar type when one exists, else a literal.
    fn interpolated_string(&mut self, scope: &Scope) -> Node {
        let num_parts = self.random_in(3, 8);
        let mut parts = Vec::with_capacity(num_parts);
        for _ in 0..num_parts {
            let part = if self.rng.gen_bool(0.5) {
                let ty = self.pick_scalar_type();
                match self.var_of_type(scope, &ty) {
                    Some(v) => v,
                    None => self.string_lit_node(),
                }
            } else {
                self.string_lit_node()
            };
            parts.push(part);
        }
        Node::interpolated_string(parts)
    }

    fn bool_lit_node(&mut self) -> Node {
        Node::bool_lit(value::bool_value(self.rng))
    }

    fn int_lit_node(&mut self) -> Node {
        Node::int_lit(value::int_value(self.rng))
    }

    fn float_lit_node(&mut self) -> Node {
        Node::float_lit(value::float_value(self.rng))
    }

    fn string_lit_node(&mut self) -> Node {
        Node::string_lit(value::string_value(self.rng))
    }
}

/// Wrap a node in parentheses unless its printed form never needs them.
fn maybe_add_parens(n: Node) -> Node {
    if is_simple_node(&n) {
        n
    } else {
        Node::parens(n)
    }
}

/// Map an equality opcode to its float-specific variant.
fn float_cmp_op(op: Op) -> Op {
    match op {
        Op::Equal2 => Op::FloatEqual2,
        Op::Equal3 => Op::FloatEqual3,
        Op::NotEqual2 => Op::NotFloatEqual2,
        Op::NotEqual3 => Op::NotFloatEqual3,
        other => other,
    }
}

/// Collect `n` pairwise-distinct values, giving up on an individual slot
/// after a bounded number of redraws (the value pools are large enough
/// that this stays theoretical).
fn generate_unique<T: PartialEq>(n: usize, mut gen: impl FnMut() -> T) -> Vec<T> {
    let mut out = Vec::with_capacity(n);
    for _ in 0..n {
        for _attempt in 0..32 {
            let v = gen();
            if !out.contains(&v) {
                out.push(v);
                break;
            }
        }
    }
    out
}

const SCALAR_TYPES: &[TypeInfo] = &[
    TypeInfo::BOOL,
    TypeInfo::INT,
    TypeInfo::FLOAT,
    TypeInfo::STRING,
];

const SCALAR_TYPES_NO_BOOL: &[TypeInfo] = &[TypeInfo::INT, TypeInfo::FLOAT, TypeInfo::STRING];

// ---------------------------------------------------------------------------
// Channel production table
// ---------------------------------------------------------------------------
// Free functions so the weighted lists can hold plain `fn` pointers.

fn gen_eq2(g: &mut ExprGenerator, scope: &Scope) -> Option<Node> {
    Some(g.cmp_op(scope, Op::Equal2))
}

fn gen_eq3(g: &mut ExprGenerator, scope: &Scope) -> Option<Node> {
    Some(g.cmp_op(scope, Op::Equal3))
}

fn gen_bool_and(g: &mut ExprGenerator, scope: &Scope) -> Option<Node> {
    Some(g.binary_of(scope, Op::And, Channel::Bool, None))
}

fn gen_bool_or(g: &mut ExprGenerator, scope: &Scope) -> Option<Node> {
    Some(g.binary_of(scope, Op::Or, Channel::Bool, None))
}

fn gen_not(g: &mut ExprGenerator, scope: &Scope) -> Option<Node> {
    let operand = g.cond_value(scope);
    Some(Node::unary(Op::Not, maybe_add_parens(operand)))
}

fn gen_bool_var(g: &mut ExprGenerator, scope: &Scope) -> Option<Node> {
    g.var_of_type(scope, &TypeInfo::BOOL)
}

fn gen_bool_lit(g: &mut ExprGenerator, _scope: &Scope) -> Option<Node> {
    Some(g.bool_lit_node())
}

fn gen_bool_call(g: &mut ExprGenerator, scope: &Scope) -> Option<Node> {
    g.call_of_kind(scope, ScalarKind::Bool)
}

fn gen_int_ternary(g: &mut ExprGenerator, scope: &Scope) -> Option<Node> {
    let cond = g.cond_value(scope);
    let x = g.int_value(scope);
    let y = g.int_value(scope);
    Some(g.new_ternary(cond, x, y))
}

fn gen_int_add(g: &mut ExprGenerator, scope: &Scope) -> Option<Node> {
    Some(g.int_binary_cast(scope, Op::Add))
}

fn gen_int_sub(g: &mut ExprGenerator, scope: &Scope) -> Option<Node> {
    Some(g.int_binary(scope, Op::Sub))
}

fn gen_int_mul(g: &mut ExprGenerator, scope: &Scope) -> Option<Node> {
    Some(g.int_binary_cast(scope, Op::Mul))
}

fn gen_int_bitand(g: &mut ExprGenerator, scope: &Scope) -> Option<Node> {
    Some(g.int_binary(scope, Op::BitAnd))
}

fn gen_int_bitor(g: &mut ExprGenerator, scope: &Scope) -> Option<Node> {
    Some(g.int_binary(scope, Op::BitOr))
}

fn gen_int_bitxor(g: &mut ExprGenerator, scope: &Scope) -> Option<Node> {
    Some(g.int_binary(scope, Op::BitXor))
}

fn gen_int_exp(g: &mut ExprGenerator, scope: &Scope) -> Option<Node> {
    Some(g.int_binary_cast(scope, Op::Exp))
}

fn gen_int_div(g: &mut ExprGenerator, scope: &Scope) -> Option<Node> {
    Some(g.int_binary_cast(scope, Op::Div))
}

fn gen_int_mod(g: &mut ExprGenerator, scope: &Scope) -> Option<Node> {
    Some(g.int_binary_cast(scope, Op::Mod))
}

fn gen_int_negation(g: &mut ExprGenerator, scope: &Scope) -> Option<Node> {
    let operand = g.int_value(scope);
    Some(Node::negation(maybe_add_parens(operand)))
}

fn gen_int_cast(g: &mut ExprGenerator, scope: &Scope) -> Option<Node> {
    Some(g.cast_to_type(scope, TypeInfo::INT))
}

fn gen_int_call(g: &mut ExprGenerator, scope: &Scope) -> Option<Node> {
    g.call_of_kind(scope, ScalarKind::Int)
}

fn gen_int_lit(g: &mut ExprGenerator, _scope: &Scope) -> Option<Node> {
    Some(g.int_lit_node())
}

fn gen_int_var(g: &mut ExprGenerator, scope: &Scope) -> Option<Node> {
    g.var_of_type(scope, &TypeInfo::INT)
}

fn gen_float_ternary(g: &mut ExprGenerator, scope: &Scope) -> Option<Node> {
    let cond = g.cond_value(scope);
    let x = g.float_value(scope);
    let y = g.float_value(scope);
    Some(g.new_ternary(cond, x, y))
}

fn gen_float_add(g: &mut ExprGenerator, scope: &Scope) -> Option<Node> {
    Some(g.float_binary(scope, Op::Add))
}

fn gen_float_sub(g: &mut ExprGenerator, scope: &Scope) -> Option<Node> {
    Some(g.float_binary(scope, Op::Sub))
}

fn gen_float_div(g: &mut ExprGenerator, scope: &Scope) -> Option<Node> {
    Some(g.float_binary(scope, Op::Div))
}

fn gen_float_mul(g: &mut ExprGenerator, scope: &Scope) -> Option<Node> {
    Some(g.float_binary(scope, Op::Mul))
}

fn gen_float_call(g: &mut ExprGenerator, scope: &Scope) -> Option<Node> {
    g.call_of_kind(scope, ScalarKind::Float)
}

fn gen_float_var(g: &mut ExprGenerator, scope: &Scope) -> Option<Node> {
    g.var_of_type(scope, &TypeInfo::FLOAT)
}

fn gen_float_lit(g: &mut ExprGenerator, _scope: &Scope) -> Option<Node> {
    Some(g.float_lit_node())
}

fn gen_string_cast(g: &mut ExprGenerator, scope: &Scope) -> Option<Node> {
    Some(g.cast_to_type(scope, TypeInfo::STRING))
}

fn gen_string_call(g: &mut ExprGenerator, scope: &Scope) -> Option<Node> {
    g.call_of_kind(scope, ScalarKind::String)
}

fn gen_concat(g: &mut ExprGenerator, scope: &Scope) -> Option<Node> {
    Some(g.binary_of(scope, Op::Concat, Channel::String, Some(TypeInfo::STRING)))
}

fn gen_string_lit(g: &mut ExprGenerator, _scope: &Scope) -> Option<Node> {
    Some(g.string_lit_node())
}

fn gen_interp_string(g: &mut ExprGenerator, scope: &Scope) -> Option<Node> {
    Some(g.interpolated_string(scope))
}

fn gen_string_var(g: &mut ExprGenerator, scope: &Scope) -> Option<Node> {
    g.var_of_type(scope, &TypeInfo::STRING)
}

fn gen_string_index(g: &mut ExprGenerator, scope: &Scope) -> Option<Node> {
    g.string_index(scope)
}
