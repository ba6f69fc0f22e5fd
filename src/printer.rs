//! PHP source emitter for the IR.
//!
//! Serialization is deterministic: one printing rule per opcode, two-space
//! indentation, `;`-terminated simple statements. Division, modulus, and
//! float equality never appear as raw operators; they print as calls to the
//! safe helpers the runtime library defines.

use std::fmt::Write;

use crate::ir::{FuncDecl, Node, Op, Payload, RootNode, TypeInfo};

#[cfg(test)]
mod tests;

/// Serialize a top-level node (with statement punctuation) into `out`.
pub fn print_root_node(out: &mut String, root: &RootNode) {
    Printer { out, depth: 0 }.write_root(root);
}

/// Serialize a bare node (no trailing punctuation) into `out`.
pub fn print_node(out: &mut String, node: &Node) {
    Printer { out, depth: 0 }.write_node(node);
}

/// Serialize a bare node to a fresh string.
pub fn sprint_node(node: &Node) -> String {
    let mut out = String::new();
    print_node(&mut out, node);
    out
}

// ---------------------------------------------------------------------------
// Statement punctuation
// ---------------------------------------------------------------------------

/// What a statement-position node still needs after its own text.
/// Compound statements (blocks, switches) terminate themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PrintFlags {
    semicolon: bool,
    newline: bool,
}

impl PrintFlags {
    const NONE: PrintFlags = PrintFlags {
        semicolon: false,
        newline: false,
    };
    const STMT: PrintFlags = PrintFlags {
        semicolon: true,
        newline: true,
    };
}

// ---------------------------------------------------------------------------
// Printer
// ---------------------------------------------------------------------------

struct Printer<'a> {
    out: &'a mut String,
    /// Current indentation in spaces (two per nesting level).
    depth: usize,
}

impl Printer<'_> {
    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.out.push(' ');
        }
    }

    fn write_root(&mut self, root: &RootNode) {
        match root {
            RootNode::FuncDecl(decl) => self.write_func_decl(decl),
            RootNode::Require { path } => {
                let _ = writeln!(self.out, "require_once __DIR__ . '/{path}';");
            }
            RootNode::Stmt(node) => {
                let flags = self.write_node(node);
                if flags.semicolon {
                    self.out.push(';');
                }
                if flags.newline {
                    self.out.push('\n');
                }
            }
        }
    }

    fn write_func_decl(&mut self, decl: &FuncDecl) {
        if !decl.tags.is_empty() {
            self.out.push_str("/**\n");
            for tag in &decl.tags {
                let _ = writeln!(self.out, " * @{} {}", tag.name, tag.value);
            }
            self.out.push_str(" */\n");
        }

        let _ = write!(self.out, "function {}(", decl.name);
        for (i, param) in decl.params.iter().enumerate() {
            if i != 0 {
                self.out.push_str(", ");
            }
            let _ = write!(self.out, "${}", param.name);
        }
        self.out.push_str(") ");
        self.write_node(&decl.body);
        self.out.push('\n');
    }

    fn write_seq(&mut self, stmts: &[Node]) {
        for stmt in stmts {
            self.indent();
            let flags = self.write_node(stmt);
            if flags.semicolon {
                self.out.push(';');
            }
            if flags.newline {
                self.out.push('\n');
            }
        }
    }

    fn write_node(&mut self, n: &Node) -> PrintFlags {
        match n.op {
            Op::Block => {
                self.depth += 2;
                self.out.push_str("{\n");
                self.write_seq(&n.args);
                self.depth -= 2;
                self.indent();
                self.out.push_str("}\n");
                return PrintFlags::NONE;
            }

            Op::Echo => {
                self.out.push_str("echo ");
                self.write_nodes(&n.args, ", ");
            }

            Op::Return => {
                self.out.push_str("return ");
                self.write_node(&n.args[0]);
            }
            Op::ReturnVoid => self.out.push_str("return"),

            Op::Continue => {
                if n.int_value() == 0 {
                    self.out.push_str("continue");
                } else {
                    let _ = write!(self.out, "continue {}", n.int_value());
                }
            }
            Op::Break => {
                if n.int_value() == 0 {
                    self.out.push_str("break");
                } else {
                    let _ = write!(self.out, "break {}", n.int_value());
                }
            }

            Op::BoolLit => match n.value {
                Payload::Bool(true) => self.out.push_str("true"),
                Payload::Bool(false) => self.out.push_str("false"),
                ref other => panic!("BoolLit carries {other:?}"),
            },
            Op::IntLit => {
                let _ = write!(self.out, "{}", n.int_value());
            }
            Op::FloatLit => match n.value {
                Payload::Float(v) => self.write_float(v),
                ref other => panic!("FloatLit carries {other:?}"),
            },
            Op::StringLit => {
                self.out.push('"');
                self.write_escaped(n.str_value());
                self.out.push('"');
            }

            Op::InterpolatedString => {
                self.out.push('"');
                for part in &n.args {
                    if part.op == Op::Var {
                        let _ = write!(self.out, "{{${}}}", part.str_value());
                    } else {
                        self.write_escaped(part.str_value());
                    }
                }
                self.out.push('"');
            }

            Op::Index => {
                self.write_node(&n.args[0]);
                self.out.push('[');
                self.write_node(&n.args[1]);
                self.out.push(']');
            }

            Op::Var => {
                let _ = write!(self.out, "${}", n.str_value());
            }
            Op::Name => self.out.push_str(n.str_value()),

            Op::Assign => {
                if let Payload::Tag(tag) = &n.value {
                    let _ = write!(self.out, "/** @var {tag} */ ");
                }
                self.write_binary(n, "=");
            }
            Op::AssignModify => {
                let inner = match n.value {
                    Payload::Op(op) => op,
                    ref other => panic!("AssignModify carries {other:?}"),
                };
                let spelling = format!("{}=", modify_op_lexeme(inner));
                self.write_binary(n, &spelling);
            }

            Op::Add => self.write_binary(n, "+"),
            Op::Sub => self.write_binary(n, "-"),
            Op::Concat => self.write_binary(n, "."),

            Op::NullCoalesce => self.write_binary(n, "??"),
            Op::BitShiftRight => self.write_binary(n, ">>"),
            Op::BitShiftLeft => self.write_binary(n, "<<"),
            Op::BitNot => self.write_unary_prefix(n, "~"),
            Op::BitXor => self.write_binary(n, "^"),
            Op::BitOr => self.write_binary(n, "|"),
            Op::BitAnd => self.write_binary(n, "&"),
            Op::Negation => self.write_unary_prefix(n, "-"),
            Op::UnaryPlus => self.write_unary_prefix(n, "+"),
            Op::Exp => self.write_binary(n, "**"),

            Op::Mod => {
                if n.ty == Some(TypeInfo::FLOAT) {
                    self.write_simple_call("_safe_float_mod", &n.args);
                } else {
                    self.write_simple_call("_safe_int_mod", &n.args);
                }
            }
            Op::Div => {
                if n.ty == Some(TypeInfo::FLOAT) {
                    self.write_simple_call("_safe_float_div", &n.args);
                } else {
                    self.write_simple_call("_safe_int_div", &n.args);
                }
            }
            Op::Mul => self.write_binary(n, "*"),

            Op::NotEqual2 => self.write_binary(n, "!="),
            Op::NotFloatEqual2 => self.write_simple_call("float_neq2", &n.args),
            Op::NotEqual3 => self.write_binary(n, "!=="),
            Op::NotFloatEqual3 => self.write_simple_call("float_neq3", &n.args),
            Op::Spaceship => self.write_binary(n, "<=>"),
            Op::AndWord => self.write_binary(n, "and"),
            Op::And => self.write_binary(n, "&&"),
            Op::XorWord => self.write_binary(n, "xor"),
            Op::OrWord => self.write_binary(n, "or"),
            Op::Or => self.write_binary(n, "||"),

            Op::Equal2 => self.write_binary(n, "=="),
            Op::FloatEqual2 => self.write_simple_call("float_eq2", &n.args),
            Op::Equal3 => self.write_binary(n, "==="),
            Op::FloatEqual3 => self.write_simple_call("float_eq3", &n.args),
            Op::Less => self.write_binary(n, "<"),
            Op::LessOrEqual => self.write_binary(n, "<="),
            Op::Greater => self.write_binary(n, ">"),
            Op::GreaterOrEqual => self.write_binary(n, ">="),

            Op::PreInc => self.write_unary_prefix(n, "++"),
            Op::PreDec => self.write_unary_prefix(n, "--"),
            Op::PostInc => self.write_unary_postfix(n, "++"),
            Op::PostDec => self.write_unary_postfix(n, "--"),

            Op::Not => self.write_unary_prefix(n, "!"),

            Op::Parens => {
                self.out.push('(');
                self.write_node(&n.args[0]);
                self.out.push(')');
            }

            Op::Ternary => {
                self.write_node(&n.args[0]);
                self.out.push_str(" ? ");
                self.write_node(&n.args[1]);
                self.out.push_str(" : ");
                self.write_node(&n.args[2]);
            }

            Op::ArrayLit => {
                if n.args.is_empty() {
                    self.out.push_str("array()");
                } else {
                    self.out.push_str("array(\n");
                    self.depth += 2;
                    for elem in &n.args {
                        self.indent();
                        self.write_node(elem);
                        self.out.push_str(",\n");
                    }
                    self.depth -= 2;
                    self.indent();
                    self.out.push(')');
                }
            }

            Op::Call => self.write_call(&n.args[0], &n.args[1..]),

            Op::Cast => {
                let ty = n.ty.as_ref().expect("Cast node without a target type");
                self.out.push('(');
                self.out.push_str(ty.cast_name());
                self.out.push(')');
                self.write_node(&n.args[0]);
            }

            Op::Switch => {
                self.out.push_str("switch (");
                self.write_node(&n.args[0]);
                self.out.push_str(") {\n");
                self.depth += 2;
                for arm in &n.args[1..] {
                    self.indent();
                    self.depth += 2;
                    let body = match arm.op {
                        Op::Case => {
                            self.out.push_str("case ");
                            self.write_node(&arm.args[0]);
                            self.out.push_str(":\n");
                            &arm.args[1..]
                        }
                        Op::Default => {
                            self.out.push_str("default:\n");
                            &arm.args[..]
                        }
                        other => panic!("{other:?} node as switch arm"),
                    };
                    self.write_seq(body);
                    self.depth -= 2;
                }
                self.depth -= 2;
                self.indent();
                self.out.push_str("}\n");
                return PrintFlags::NONE;
            }

            // Arms are printed by their enclosing Switch.
            Op::Case | Op::Default => unreachable!("case arm outside switch"),

            Op::While => {
                self.out.push_str("while (");
                self.write_node(&n.args[0]);
                self.out.push_str(") ");
                return self.write_node(&n.args[1]);
            }

            Op::If => {
                self.out.push_str("if (");
                self.write_node(&n.args[0]);
                self.out.push_str(") ");
                return self.write_node(&n.args[1]);
            }
        }

        PrintFlags::STMT
    }

    fn write_simple_call(&mut self, name: &str, args: &[Node]) {
        self.out.push_str(name);
        self.write_args(args);
    }

    fn write_call(&mut self, callee: &Node, args: &[Node]) {
        self.write_node(callee);
        self.write_args(args);
    }

    fn write_args(&mut self, args: &[Node]) {
        self.out.push('(');
        self.write_nodes(args, ", ");
        self.out.push(')');
    }

    fn write_unary_prefix(&mut self, n: &Node, op: &str) {
        self.out.push_str(op);
        self.write_node(&n.args[0]);
    }

    fn write_unary_postfix(&mut self, n: &Node, op: &str) {
        self.write_node(&n.args[0]);
        self.out.push_str(op);
    }

    fn write_binary(&mut self, n: &Node, op: &str) {
        self.write_node(&n.args[0]);
        self.out.push(' ');
        self.out.push_str(op);
        self.out.push(' ');
        self.write_node(&n.args[1]);
    }

    fn write_nodes(&mut self, nodes: &[Node], sep: &str) {
        for (i, node) in nodes.iter().enumerate() {
            if i != 0 {
                self.out.push_str(sep);
            }
            self.write_node(node);
        }
    }

    /// Floats must re-parse to the same value. PHP has no literal form for
    /// the IEEE specials, so helper calls stand in for them.
    fn write_float(&mut self, v: f64) {
        if v == 0.0 {
            self.out.push_str("0.0");
        } else if v.is_nan() {
            self.out.push_str("make_nan()");
        } else if v == f64::INFINITY {
            self.out.push_str("make_positive_inf()");
        } else if v == f64::NEG_INFINITY {
            self.out.push_str("make_negative_inf()");
        } else {
            let _ = write!(self.out, "{v:?}");
        }
    }

    /// Escape a string for a double-quoted PHP literal. Control bytes get
    /// short escapes where one exists, three-digit octal otherwise; bytes
    /// outside ASCII pass through untouched.
    fn write_escaped(&mut self, s: &str) {
        for ch in s.chars() {
            match ch {
                '\r' => self.out.push_str("\\r"),
                '\n' => self.out.push_str("\\n"),
                '"' => self.out.push_str("\\\""),
                '\\' => self.out.push_str("\\\\"),
                '\0' => self.out.push_str("\\000"),
                '\u{7}' => self.out.push_str("\\a"),
                '\u{8}' => self.out.push_str("\\b"),
                '\u{c}' => self.out.push_str("\\f"),
                '\t' => self.out.push_str("\\t"),
                '\u{b}' => self.out.push_str("\\v"),
                _ => {
                    if (ch as u32) < 32 {
                        let code = ch as u32;
                        self.out.push_str("\\0");
                        self.out.push(char::from(b'0' + (code / 8) as u8));
                        self.out.push(char::from(b'0' + (code % 8) as u8));
                    } else {
                        self.out.push(ch);
                    }
                }
            }
        }
    }
}

/// Spelling of the inner operator of a compound assignment.
fn modify_op_lexeme(op: Op) -> &'static str {
    match op {
        Op::Add => "+",
        Op::Concat => ".",
        Op::Sub => "-",
        Op::Div => "/",
        Op::Mul => "*",
        Op::Exp => "**",
        Op::Mod => "%",
        Op::BitAnd => "&",
        Op::BitOr => "|",
        Op::BitXor => "^",
        Op::BitNot => "~",
        Op::BitShiftLeft => "<<",
        Op::BitShiftRight => ">>",
        Op::NullCoalesce => "??",
        other => panic!("{other:?} is not a compound-assignment operator"),
    }
}
