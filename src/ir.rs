//! Intermediate representation for generated PHP programs.
//!
//! Every expression and statement is a [`Node`]: a uniform tagged record
//! carrying an opcode, child nodes, an optional literal payload, and an
//! optional type annotation. Keeping the IR flat (one struct, one opcode
//! enum) lets both the generator and the printer dispatch with a single
//! exhaustive `match` instead of a trait hierarchy.

use std::fmt;

// ---------------------------------------------------------------------------
// Opcodes
// ---------------------------------------------------------------------------

/// The closed opcode set. Arity is fixed per opcode: binary operators take
/// exactly two args, `Ternary` takes three, `Block` holds statements,
/// `Switch` holds the discriminant followed by `Case`/`Default` arms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Block,
    Echo,
    Return,
    ReturnVoid,
    Continue,
    Break,
    BoolLit,
    IntLit,
    FloatLit,
    StringLit,
    InterpolatedString,
    Index,
    Var,
    Name,
    Assign,
    AssignModify,
    Add,
    Sub,
    Concat,
    NullCoalesce,
    BitShiftRight,
    BitShiftLeft,
    BitNot,
    BitXor,
    BitOr,
    BitAnd,
    Negation,
    UnaryPlus,
    Exp,
    Mod,
    Div,
    Mul,
    NotEqual2,
    NotEqual3,
    NotFloatEqual2,
    NotFloatEqual3,
    Spaceship,
    And,
    AndWord,
    Or,
    OrWord,
    XorWord,
    Equal2,
    Equal3,
    FloatEqual2,
    FloatEqual3,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
    PreInc,
    PreDec,
    PostInc,
    PostDec,
    Not,
    Parens,
    Ternary,
    ArrayLit,
    Call,
    Cast,
    Switch,
    Case,
    Default,
    While,
    If,
}

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

/// Literal payload attached to a [`Node`].
///
/// `Int` doubles as the break/continue depth. `Op` is the inner operator of
/// a compound assignment. `Tag` is a rendered `@var` doc annotation that the
/// printer prepends to an assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Op(Op),
    Tag(String),
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Scalar kinds of the conservative PHP type model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    Int,
    Float,
    String,
    Mixed,
}

impl ScalarKind {
    /// The PHP spelling of this scalar, as used in casts and doc tags.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarKind::Bool => "bool",
            ScalarKind::Int => "int",
            ScalarKind::Float => "float",
            ScalarKind::String => "string",
            ScalarKind::Mixed => "mixed",
        }
    }
}

/// A literal value belonging to an enum type's value set.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumValue {
    Int(i64),
    Float(f64),
    Str(String),
}

impl EnumValue {
    /// Build the literal node for this enum value.
    pub fn literal(&self) -> Node {
        match self {
            EnumValue::Int(v) => Node::int_lit(*v),
            EnumValue::Float(v) => Node::float_lit(*v),
            EnumValue::Str(s) => Node::string_lit(s.clone()),
        }
    }
}

/// An enum type: a scalar value kind plus a non-empty set of distinct
/// literal values of that kind.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumInfo {
    pub value_kind: ScalarKind,
    pub values: Vec<EnumValue>,
}

/// Type information for generating type-correct expressions.
///
/// Equality is structural, which is exactly the matching rule scope lookup
/// uses. Callable signatures live in [`crate::symbols::FuncInfo`]; only the
/// symbol table carries them, so they are not part of this sum.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeInfo {
    Scalar(ScalarKind),
    /// Array with a homogeneous element type.
    Array(Box<TypeInfo>),
    /// Fixed-shape heterogeneous tuple, emitted as a `tuple(...)` call.
    Tuple(Vec<TypeInfo>),
    Enum(EnumInfo),
}

impl TypeInfo {
    pub const BOOL: TypeInfo = TypeInfo::Scalar(ScalarKind::Bool);
    pub const INT: TypeInfo = TypeInfo::Scalar(ScalarKind::Int);
    pub const FLOAT: TypeInfo = TypeInfo::Scalar(ScalarKind::Float);
    pub const STRING: TypeInfo = TypeInfo::Scalar(ScalarKind::String);
    pub const MIXED: TypeInfo = TypeInfo::Scalar(ScalarKind::Mixed);

    /// The scalar kind, when this is a scalar type.
    pub fn scalar_kind(&self) -> Option<ScalarKind> {
        match self {
            TypeInfo::Scalar(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Whether this is the Float scalar type.
    pub fn is_float(&self) -> bool {
        matches!(self, TypeInfo::Scalar(ScalarKind::Float))
    }

    /// The PHP spelling used when this type appears as a cast target.
    pub fn cast_name(&self) -> &'static str {
        match self {
            TypeInfo::Scalar(kind) => kind.as_str(),
            TypeInfo::Array(_) | TypeInfo::Tuple(_) => "array",
            TypeInfo::Enum(info) => info.value_kind.as_str(),
        }
    }

    /// Render this type the way it appears in `@var` / `@param` doc tags.
    pub fn doc_string(&self) -> String {
        match self {
            TypeInfo::Scalar(kind) => kind.as_str().to_string(),
            TypeInfo::Array(elem) => format!("{}[]", elem.doc_string()),
            TypeInfo::Tuple(elems) => {
                let parts: Vec<String> = elems.iter().map(|e| e.doc_string()).collect();
                format!("tuple({})", parts.join(", "))
            }
            TypeInfo::Enum(info) => info.value_kind.as_str().to_string(),
        }
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.doc_string())
    }
}

// ---------------------------------------------------------------------------
// Nodes
// ---------------------------------------------------------------------------

/// A single IR node. See the module docs for the shape contract.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub op: Op,
    pub args: Vec<Node>,
    pub value: Payload,
    pub ty: Option<TypeInfo>,
}

impl Node {
    fn new(op: Op, args: Vec<Node>) -> Self {
        Self {
            op,
            args,
            value: Payload::None,
            ty: None,
        }
    }

    pub fn bool_lit(v: bool) -> Self {
        Self {
            value: Payload::Bool(v),
            ..Self::new(Op::BoolLit, Vec::new())
        }
    }

    pub fn int_lit(v: i64) -> Self {
        Self {
            value: Payload::Int(v),
            ..Self::new(Op::IntLit, Vec::new())
        }
    }

    pub fn float_lit(v: f64) -> Self {
        Self {
            value: Payload::Float(v),
            ..Self::new(Op::FloatLit, Vec::new())
        }
    }

    pub fn string_lit(s: impl Into<String>) -> Self {
        Self {
            value: Payload::Str(s.into()),
            ..Self::new(Op::StringLit, Vec::new())
        }
    }

    /// A `$name` variable reference carrying its declared type.
    pub fn var(name: impl Into<String>, ty: TypeInfo) -> Self {
        Self {
            value: Payload::Str(name.into()),
            ty: Some(ty),
            ..Self::new(Op::Var, Vec::new())
        }
    }

    /// A bare identifier (function name, constant).
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            value: Payload::Str(name.into()),
            ..Self::new(Op::Name, Vec::new())
        }
    }

    pub fn call(callee: Node, args: Vec<Node>) -> Self {
        let mut all = Vec::with_capacity(args.len() + 1);
        all.push(callee);
        all.extend(args);
        Self::new(Op::Call, all)
    }

    pub fn parens(inner: Node) -> Self {
        Self::new(Op::Parens, vec![inner])
    }

    pub fn ternary(cond: Node, then: Node, alt: Node) -> Self {
        Self::new(Op::Ternary, vec![cond, then, alt])
    }

    pub fn index(object: Node, key: Node) -> Self {
        Self::new(Op::Index, vec![object, key])
    }

    pub fn negation(arg: Node) -> Self {
        Self::new(Op::Negation, vec![arg])
    }

    pub fn cast(ty: TypeInfo, arg: Node) -> Self {
        Self {
            ty: Some(ty),
            ..Self::new(Op::Cast, vec![arg])
        }
    }

    pub fn binary(op: Op, lhs: Node, rhs: Node) -> Self {
        Self::new(op, vec![lhs, rhs])
    }

    /// A binary node with a type hint, used by the printer to pick the
    /// int or float form of the safe div/mod helpers.
    pub fn binary_typed(op: Op, lhs: Node, rhs: Node, ty: TypeInfo) -> Self {
        Self {
            ty: Some(ty),
            ..Self::new(op, vec![lhs, rhs])
        }
    }

    pub fn unary(op: Op, arg: Node) -> Self {
        Self::new(op, vec![arg])
    }

    pub fn interpolated_string(parts: Vec<Node>) -> Self {
        Self::new(Op::InterpolatedString, parts)
    }

    pub fn array_lit(elems: Vec<Node>) -> Self {
        Self::new(Op::ArrayLit, elems)
    }

    pub fn assign(target: Node, value: Node) -> Self {
        Self::new(Op::Assign, vec![target, value])
    }

    /// An assignment preceded by a `/** @var ... */` annotation.
    pub fn assign_tagged(target: Node, value: Node, tag: impl Into<String>) -> Self {
        Self {
            value: Payload::Tag(tag.into()),
            ..Self::new(Op::Assign, vec![target, value])
        }
    }

    /// A compound assignment; `op` is the inner operator (`Add` for `+=`).
    pub fn assign_modify(op: Op, target: Node, value: Node) -> Self {
        Self {
            value: Payload::Op(op),
            ..Self::new(Op::AssignModify, vec![target, value])
        }
    }

    pub fn echo(args: Vec<Node>) -> Self {
        Self::new(Op::Echo, args)
    }

    pub fn block(stmts: Vec<Node>) -> Self {
        Self::new(Op::Block, stmts)
    }

    pub fn ret(expr: Node) -> Self {
        Self::new(Op::Return, vec![expr])
    }

    pub fn ret_void() -> Self {
        Self::new(Op::ReturnVoid, Vec::new())
    }

    /// `break;` when depth is 0, `break N;` otherwise.
    pub fn brk(depth: i64) -> Self {
        Self {
            value: Payload::Int(depth),
            ..Self::new(Op::Break, Vec::new())
        }
    }

    /// `continue;` when depth is 0, `continue N;` otherwise.
    pub fn cont(depth: i64) -> Self {
        Self {
            value: Payload::Int(depth),
            ..Self::new(Op::Continue, Vec::new())
        }
    }

    /// A switch statement: discriminant followed by `Case`/`Default` arms.
    pub fn switch(discriminant: Node, arms: Vec<Node>) -> Self {
        let mut args = Vec::with_capacity(arms.len() + 1);
        args.push(discriminant);
        args.extend(arms);
        Self::new(Op::Switch, args)
    }

    /// A `case value:` arm; `stmts` is the arm body.
    pub fn case(value: Node, stmts: Vec<Node>) -> Self {
        let mut args = Vec::with_capacity(stmts.len() + 1);
        args.push(value);
        args.extend(stmts);
        Self::new(Op::Case, args)
    }

    /// A `default:` arm.
    pub fn default_case(stmts: Vec<Node>) -> Self {
        Self::new(Op::Default, stmts)
    }

    pub fn while_loop(cond: Node, body: Node) -> Self {
        Self::new(Op::While, vec![cond, body])
    }

    pub fn if_stmt(cond: Node, body: Node) -> Self {
        Self::new(Op::If, vec![cond, body])
    }

    pub fn post_inc(target: Node) -> Self {
        Self::new(Op::PostInc, vec![target])
    }
}

// ---------------------------------------------------------------------------
// Payload accessors
// ---------------------------------------------------------------------------

impl Node {
    /// The string payload of a `Var`, `Name`, or `StringLit` node.
    ///
    /// # Panics
    ///
    /// Panics when the payload is not a string; that is a constructor bug.
    pub fn str_value(&self) -> &str {
        match &self.value {
            Payload::Str(s) => s,
            other => panic!("{:?} node carries {:?}, expected Str", self.op, other),
        }
    }

    /// The integer payload (literal value or break/continue depth).
    ///
    /// # Panics
    ///
    /// Panics when the payload is not an integer.
    pub fn int_value(&self) -> i64 {
        match self.value {
            Payload::Int(v) => v,
            ref other => panic!("{:?} node carries {:?}, expected Int", self.op, other),
        }
    }
}

/// Whether a node's printed form never needs surrounding parentheses.
///
/// Literals, variables, names, calls, index expressions, and nodes that are
/// already parenthesized are "simple"; all other composites are not.
pub fn is_simple_node(n: &Node) -> bool {
    matches!(
        n.op,
        Op::BoolLit
            | Op::IntLit
            | Op::FloatLit
            | Op::StringLit
            | Op::InterpolatedString
            | Op::Var
            | Op::Name
            | Op::Call
            | Op::Parens
            | Op::Index
    )
}

// ---------------------------------------------------------------------------
// Root nodes
// ---------------------------------------------------------------------------

/// A `@name value` line inside a function's doc comment.
#[derive(Debug, Clone, PartialEq)]
pub struct DocTag {
    pub name: String,
    pub value: String,
}

impl DocTag {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A declared function parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncParam {
    pub name: String,
    pub param_type: TypeInfo,
}

/// A top-level function declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    pub tags: Vec<DocTag>,
    pub name: String,
    pub params: Vec<FuncParam>,
    pub body: Node,
}

/// A top-level item of a generated program file.
#[derive(Debug, Clone, PartialEq)]
pub enum RootNode {
    FuncDecl(FuncDecl),
    /// `require_once __DIR__ . '/<path>';`
    Require { path: String },
    /// Any expression emitted as a top-level statement.
    Stmt(Node),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_constructors_carry_payload() {
        assert_eq!(Node::int_lit(42).value, Payload::Int(42));
        assert_eq!(Node::bool_lit(true).value, Payload::Bool(true));
        assert_eq!(
            Node::string_lit("hi").value,
            Payload::Str("hi".to_string())
        );
        let v = Node::var("x", TypeInfo::INT);
        assert_eq!(v.str_value(), "x");
        assert_eq!(v.ty, Some(TypeInfo::INT));
    }

    #[test]
    fn call_puts_callee_first() {
        let call = Node::call(Node::name("f"), vec![Node::int_lit(1), Node::int_lit(2)]);
        assert_eq!(call.args.len(), 3);
        assert_eq!(call.args[0].op, Op::Name);
    }

    #[test]
    fn cast_carries_type() {
        let cast = Node::cast(TypeInfo::INT, Node::int_lit(1));
        assert_eq!(cast.ty, Some(TypeInfo::INT));
    }

    #[test]
    fn simple_nodes() {
        assert!(is_simple_node(&Node::int_lit(1)));
        assert!(is_simple_node(&Node::var("x", TypeInfo::INT)));
        assert!(is_simple_node(&Node::parens(Node::int_lit(1))));
        assert!(is_simple_node(&Node::call(Node::name("f"), vec![])));
        assert!(is_simple_node(&Node::index(
            Node::var("s", TypeInfo::STRING),
            Node::int_lit(0)
        )));
        assert!(!is_simple_node(&Node::binary(
            Op::Add,
            Node::int_lit(1),
            Node::int_lit(2)
        )));
        assert!(!is_simple_node(&Node::ternary(
            Node::bool_lit(true),
            Node::int_lit(1),
            Node::int_lit(2)
        )));
    }

    #[test]
    fn doc_strings() {
        assert_eq!(TypeInfo::INT.doc_string(), "int");
        assert_eq!(
            TypeInfo::Array(Box::new(TypeInfo::STRING)).doc_string(),
            "string[]"
        );
        assert_eq!(
            TypeInfo::Array(Box::new(TypeInfo::Array(Box::new(TypeInfo::INT)))).doc_string(),
            "int[][]"
        );
        assert_eq!(
            TypeInfo::Tuple(vec![TypeInfo::INT, TypeInfo::FLOAT]).doc_string(),
            "tuple(int, float)"
        );
    }

    #[test]
    fn enum_values_round_trip_to_literals() {
        assert_eq!(EnumValue::Int(3).literal(), Node::int_lit(3));
        assert_eq!(
            EnumValue::Str("a".to_string()).literal(),
            Node::string_lit("a")
        );
    }

    #[test]
    fn structural_type_equality() {
        let a = TypeInfo::Enum(EnumInfo {
            value_kind: ScalarKind::Int,
            values: vec![EnumValue::Int(1), EnumValue::Int(2)],
        });
        let b = a.clone();
        assert_eq!(a, b);
        let c = TypeInfo::Enum(EnumInfo {
            value_kind: ScalarKind::Int,
            values: vec![EnumValue::Int(1), EnumValue::Int(3)],
        });
        assert_ne!(a, c);
    }
}
