//! Statement and whole-program assembly.
//!
//! Builds on the expression core: function bodies are blocks of variable
//! bindings, echoes, and control statements, followed by a trailing echo of
//! every still-live scalar so behavior stays observable. Every generated
//! `while` loop is counter-bounded (the increment comes first in the body,
//! so a generated `continue` cannot starve it) and every generated program
//! terminates.

use rand::RngCore;

use crate::expr::ExprGenerator;
use crate::ir::{DocTag, EnumValue, FuncDecl, FuncParam, Node, Op, RootNode, ScalarKind, TypeInfo};
use crate::scope::Scope;
use crate::symbols::SymbolTable;
use crate::value;

/// Knobs for program shape. Profiles construct these.
#[derive(Debug, Clone)]
pub struct GenConfig {
    /// Inclusive range of function declarations per program.
    pub functions: (usize, usize),
    /// Inclusive range of parameters per function.
    pub params_per_function: (usize, usize),
    /// Inclusive range of statements per block.
    pub statements_per_block: (usize, usize),
    /// Nesting depth at which only flat statements are generated.
    pub max_block_depth: usize,
    pub if_probability: f64,
    pub while_probability: f64,
    pub switch_probability: f64,
    /// Probability of mutating an existing scalar variable instead of
    /// binding a new one.
    pub modify_probability: f64,
    pub echo_probability: f64,
    /// Probability of a `break`/`continue` statement inside a loop body.
    pub break_continue_probability: f64,
}

// ---------------------------------------------------------------------------
// ProgramGenerator
// ---------------------------------------------------------------------------

/// Assembles whole program files. Owns the scope and, through the
/// expression generator, the RNG.
pub struct ProgramGenerator<'a> {
    exprs: ExprGenerator<'a>,
    config: &'a GenConfig,
    scope: Scope,
    var_counter: usize,
    in_loop: bool,
}

impl<'a> ProgramGenerator<'a> {
    pub fn new(rng: &'a mut dyn RngCore, symtab: &'a SymbolTable, config: &'a GenConfig) -> Self {
        Self {
            exprs: ExprGenerator::new(rng, symtab),
            config,
            scope: Scope::new(),
            var_counter: 0,
            in_loop: false,
        }
    }

    /// Generate one program file: the runtime require, function
    /// declarations, and one top-level call per function.
    pub fn generate_program(&mut self) -> Vec<RootNode> {
        let mut roots = vec![RootNode::Require {
            path: crate::runtime::RUNTIME_LIB_FILE.to_string(),
        }];

        let num_funcs = self
            .exprs
            .random_in(self.config.functions.0, self.config.functions.1);
        let mut decls = Vec::with_capacity(num_funcs);
        for i in 0..num_funcs {
            decls.push(self.function_decl(format!("func{i}")));
        }

        let mut calls = Vec::with_capacity(decls.len());
        let top_scope = Scope::new();
        for decl in &decls {
            let mut args = Vec::with_capacity(decl.params.len());
            for param in &decl.params {
                args.push(
                    self.exprs
                        .generate_value_of_type(&top_scope, &param.param_type),
                );
            }
            let call = Node::call(Node::name(decl.name.clone()), args);
            // Echo the result of value-returning functions; void functions
            // already echo from inside.
            let returns_value = matches!(decl.body.args.last(), Some(n) if n.op == Op::Return);
            let stmt = if returns_value {
                Node::echo(vec![call])
            } else {
                call
            };
            calls.push(RootNode::Stmt(stmt));
        }

        roots.extend(decls.into_iter().map(RootNode::FuncDecl));
        roots.extend(calls);
        roots
    }

    fn function_decl(&mut self, name: String) -> FuncDecl {
        self.var_counter = 0;
        self.scope = Scope::new();
        self.in_loop = false;

        let num_params = self.exprs.random_in(
            self.config.params_per_function.0,
            self.config.params_per_function.1,
        );
        let mut params = Vec::with_capacity(num_params);
        let mut tags = Vec::with_capacity(num_params);
        for i in 0..num_params {
            let param_type = self.exprs.pick_scalar_type();
            let param_name = format!("p{i}");
            tags.push(DocTag::new(
                "param",
                format!("{} ${}", param_type.doc_string(), param_name),
            ));
            self.scope.add_var(param_name.clone(), param_type.clone());
            params.push(FuncParam {
                name: param_name,
                param_type,
            });
        }

        let return_type = if self.exprs.gen_bool(0.5) {
            let ty = self.exprs.pick_scalar_type();
            tags.push(DocTag::new("return", ty.doc_string()));
            Some(ty)
        } else {
            None
        };

        let mut stmts = Vec::new();
        let num_stmts = self.exprs.random_in(
            self.config.statements_per_block.0,
            self.config.statements_per_block.1,
        );
        for _ in 0..num_stmts {
            self.statement(&mut stmts, 0);
        }

        // Echo everything observable so implementations can be diffed.
        for var in echoable_vars(&self.scope) {
            stmts.push(Node::echo(vec![var]));
        }

        if let Some(ty) = return_type {
            let result = self.exprs.generate_value_of_type(&self.scope, &ty);
            stmts.push(Node::ret(result));
        }

        FuncDecl {
            tags,
            name,
            params,
            body: Node::block(stmts),
        }
    }
}

/// Variables worth echoing at the end of a function body: scalars and
/// enums. Arrays and tuples would stringify as `Array` with a notice.
fn echoable_vars(scope: &Scope) -> Vec<Node> {
    scope
        .iter()
        .filter(|v| match &v.type_info {
            TypeInfo::Scalar(kind) => *kind != ScalarKind::Mixed,
            TypeInfo::Enum(_) => true,
            _ => false,
        })
        .map(|v| Node::var(v.name.clone(), v.type_info.clone()))
        .collect()
}

// ---------------------------------------------------------------------------
// Statements
// ---------------------------------------------------------------------------

impl ProgramGenerator<'_> {
    /// Append one statement (occasionally more, for loop scaffolding).
    fn statement(&mut self, out: &mut Vec<Node>, depth: usize) {
        if self.in_loop && self.exprs.gen_bool(self.config.break_continue_probability) {
            let node = if self.exprs.gen_bool(0.5) {
                Node::brk(0)
            } else {
                Node::cont(0)
            };
            out.push(node);
            return;
        }

        // Occasional early exit from a nested block.
        if depth > 0 && !self.in_loop && self.exprs.gen_bool(0.05) {
            out.push(Node::ret_void());
            return;
        }

        let nested_allowed = depth < self.config.max_block_depth;
        if nested_allowed && self.exprs.gen_bool(self.config.if_probability) {
            out.push(self.if_stmt(depth));
        } else if nested_allowed && self.exprs.gen_bool(self.config.while_probability) {
            self.while_stmt(out, depth);
        } else if nested_allowed && self.exprs.gen_bool(self.config.switch_probability) {
            out.push(self.switch_stmt());
        } else if self.exprs.gen_bool(self.config.modify_probability) {
            match self.modify_stmt() {
                Some(node) => out.push(node),
                None => out.push(self.assign_stmt()),
            }
        } else if self.exprs.gen_bool(self.config.echo_probability) {
            out.push(self.echo_stmt());
        } else {
            out.push(self.assign_stmt());
        }
    }

    /// Bind a fresh variable to a value of a random type. Non-scalar
    /// bindings get a `/** @var ... */` annotation.
    fn assign_stmt(&mut self) -> Node {
        let ty = self.exprs.pick_type();
        let init = self.exprs.generate_value_of_type(&self.scope, &ty);
        let name = self.fresh_var();
        let target = Node::var(name.clone(), ty.clone());
        let node = if matches!(ty, TypeInfo::Scalar(_)) {
            Node::assign(target, init)
        } else {
            let tag = format!("{} ${}", ty.doc_string(), name);
            Node::assign_tagged(target, init, tag)
        };
        self.scope.add_var(name, ty);
        node
    }

    /// Mutate an existing scalar variable: compound assignment matched to
    /// its kind, or a postfix increment for ints.
    fn modify_stmt(&mut self) -> Option<Node> {
        let candidates: Vec<(String, TypeInfo)> = self
            .scope
            .iter()
            .filter(|v| {
                matches!(
                    v.type_info.scalar_kind(),
                    Some(ScalarKind::Int | ScalarKind::Float | ScalarKind::String)
                )
            })
            .map(|v| (v.name.clone(), v.type_info.clone()))
            .collect();
        if candidates.is_empty() {
            return None;
        }
        let (name, ty) = candidates[self.exprs.random_in(0, candidates.len() - 1)].clone();
        let target = Node::var(name, ty.clone());

        let op = match ty.scalar_kind() {
            Some(ScalarKind::Int) => {
                if self.exprs.gen_bool(0.3) {
                    let incdec = match self.exprs.random_in(0, 3) {
                        0 => Node::post_inc(target),
                        1 => Node::unary(Op::PostDec, target),
                        2 => Node::unary(Op::PreInc, target),
                        _ => Node::unary(Op::PreDec, target),
                    };
                    return Some(incdec);
                }
                match self.exprs.random_in(0, 5) {
                    0 => Op::Add,
                    1 => Op::Sub,
                    2 => Op::BitAnd,
                    3 => Op::BitXor,
                    4 => {
                        // Shift by a small literal; expression-sized shift
                        // counts can go negative and raise.
                        let shift = if self.exprs.gen_bool(0.5) {
                            Op::BitShiftLeft
                        } else {
                            Op::BitShiftRight
                        };
                        let count = self.exprs.random_in(0, 8) as i64;
                        return Some(Node::assign_modify(shift, target, Node::int_lit(count)));
                    }
                    _ => {
                        let flipped = Node::unary(Op::BitNot, target.clone());
                        return Some(Node::assign(target, flipped));
                    }
                }
            }
            Some(ScalarKind::Float) => match self.exprs.random_in(0, 2) {
                0 => Op::Add,
                1 => Op::Sub,
                _ => Op::Mul,
            },
            _ => Op::Concat,
        };
        let value = self.exprs.generate_value_of_type(&self.scope, &ty);
        Some(Node::assign_modify(op, target, value))
    }

    fn echo_stmt(&mut self) -> Node {
        // Sometimes probe an array slot through ?? (the index is usually
        // out of range, which is the point).
        if self.exprs.gen_bool(0.2) {
            if let Some(probe) = self.array_probe() {
                return Node::echo(vec![probe]);
            }
        }
        let num_args = self.exprs.random_in(1, 2);
        let mut args = Vec::with_capacity(num_args);
        for _ in 0..num_args {
            let ty = self.exprs.pick_scalar_type();
            args.push(self.exprs.generate_value_of_type(&self.scope, &ty));
        }
        Node::echo(args)
    }

    /// `($arr[k] ?? default)` over an in-scope array of scalars.
    fn array_probe(&mut self) -> Option<Node> {
        let arrays: Vec<(String, TypeInfo, TypeInfo)> = self
            .scope
            .iter()
            .filter_map(|v| match &v.type_info {
                TypeInfo::Array(elem) if matches!(**elem, TypeInfo::Scalar(_)) => {
                    Some((v.name.clone(), v.type_info.clone(), (**elem).clone()))
                }
                _ => None,
            })
            .collect();
        if arrays.is_empty() {
            return None;
        }
        let (name, arr_ty, elem_ty) = arrays[self.exprs.random_in(0, arrays.len() - 1)].clone();
        let index = Node::int_lit(self.exprs.random_in(0, 64) as i64);
        let slot = Node::index(Node::var(name, arr_ty), index);
        let default = self.exprs.generate_value_of_type(&self.scope, &elem_ty);
        Some(Node::parens(Node::binary(Op::NullCoalesce, slot, default)))
    }

    fn if_stmt(&mut self, depth: usize) -> Node {
        let cond = self.if_condition();
        let body = self.block(depth + 1, Vec::new());
        Node::if_stmt(cond, body)
    }

    /// Condition for an `if`: usually the cond channel, sometimes an int
    /// relational comparison, a word-operator combination, or a bare
    /// (in)equality.
    fn if_condition(&mut self) -> Node {
        match self.exprs.random_in(0, 9) {
            0..=2 => {
                let op = match self.exprs.random_in(0, 3) {
                    0 => Op::Less,
                    1 => Op::LessOrEqual,
                    2 => Op::Greater,
                    _ => Op::GreaterOrEqual,
                };
                let mut lhs = self.exprs.generate_value_of_type(&self.scope, &TypeInfo::INT);
                let rhs = self.exprs.generate_value_of_type(&self.scope, &TypeInfo::INT);
                if self.exprs.gen_bool(0.15) {
                    lhs = Node::unary(Op::UnaryPlus, Node::parens(lhs));
                }
                Node::binary(op, lhs, rhs)
            }
            3 | 4 => {
                let op = match self.exprs.random_in(0, 2) {
                    0 => Op::AndWord,
                    1 => Op::OrWord,
                    _ => Op::XorWord,
                };
                let lhs = self.exprs.condition(&self.scope);
                let rhs = self.exprs.condition(&self.scope);
                Node::parens(Node::binary(op, lhs, rhs))
            }
            5 => self.exprs.equality(&self.scope),
            _ => self.exprs.condition(&self.scope),
        }
    }

    /// A counter-bounded loop:
    /// `$vN = 0; while ($vN < k) { $vN += 1; ... }`.
    /// The increment leads the body, so `continue` cannot skip it.
    fn while_stmt(&mut self, out: &mut Vec<Node>, depth: usize) {
        let counter = self.fresh_var();
        self.scope.add_var(counter.clone(), TypeInfo::INT);
        out.push(Node::assign(
            Node::var(counter.clone(), TypeInfo::INT),
            Node::int_lit(0),
        ));

        let bound = self.exprs.random_in(1, 8) as i64;
        let cond = Node::binary(
            Op::Less,
            Node::var(counter.clone(), TypeInfo::INT),
            Node::int_lit(bound),
        );

        let increment = if self.exprs.gen_bool(0.5) {
            Node::post_inc(Node::var(counter.clone(), TypeInfo::INT))
        } else {
            Node::assign_modify(
                Op::Add,
                Node::var(counter, TypeInfo::INT),
                Node::int_lit(1),
            )
        };

        let prev_in_loop = self.in_loop;
        self.in_loop = true;
        let body = self.block(depth + 1, vec![increment]);
        self.in_loop = prev_in_loop;

        out.push(Node::while_loop(cond, body));
    }

    /// A switch over an enum variable when one is in scope, otherwise over
    /// an int expression. Every arm ends in `break`.
    fn switch_stmt(&mut self) -> Node {
        let enum_var = {
            let enums: Vec<(String, TypeInfo)> = self
                .scope
                .iter()
                .filter(|v| matches!(v.type_info, TypeInfo::Enum(_)))
                .map(|v| (v.name.clone(), v.type_info.clone()))
                .collect();
            if enums.is_empty() {
                None
            } else {
                Some(enums[self.exprs.random_in(0, enums.len() - 1)].clone())
            }
        };

        let (discriminant, case_values) = match enum_var {
            Some((name, ty)) => {
                let TypeInfo::Enum(ref info) = ty else {
                    unreachable!("non-enum in enum candidates");
                };
                let num_cases = self.exprs.random_in(1, info.values.len().min(3));
                let values: Vec<Node> = info.values[..num_cases]
                    .iter()
                    .map(EnumValue::literal)
                    .collect();
                (Node::var(name, ty.clone()), values)
            }
            None => {
                if self.exprs.gen_bool(0.3) {
                    // <=> yields -1/0/1, which makes for a closed case set.
                    let lhs = self.exprs.generate_value_of_type(&self.scope, &TypeInfo::INT);
                    let rhs = self.exprs.generate_value_of_type(&self.scope, &TypeInfo::INT);
                    let disc = Node::parens(Node::binary(Op::Spaceship, lhs, rhs));
                    let num_cases = self.exprs.random_in(1, 3);
                    let values: Vec<Node> = [-1, 0, 1][..num_cases]
                        .iter()
                        .map(|&v| Node::int_lit(v))
                        .collect();
                    (disc, values)
                } else {
                    let disc = self.exprs.generate_value_of_type(&self.scope, &TypeInfo::INT);
                    let num_cases = self.exprs.random_in(1, 3);
                    let mut values: Vec<i64> = Vec::with_capacity(num_cases);
                    while values.len() < num_cases {
                        let v = value::int_value(self.exprs.rng_mut());
                        if !values.contains(&v) {
                            values.push(v);
                        }
                    }
                    (disc, values.into_iter().map(Node::int_lit).collect())
                }
            }
        };

        let mut arms = Vec::with_capacity(case_values.len() + 1);
        for case_value in case_values {
            let body = self.arm_body();
            arms.push(Node::case(case_value, body));
        }
        arms.push(Node::default_case(self.arm_body()));
        Node::switch(discriminant, arms)
    }

    /// A switch-arm body: one echo statement plus the mandatory `break`.
    /// Arms never bind variables (conditional definition is a trap for
    /// later uses outside the switch).
    fn arm_body(&mut self) -> Vec<Node> {
        vec![self.echo_stmt(), Node::brk(0)]
    }

    fn block(&mut self, depth: usize, mut preamble: Vec<Node>) -> Node {
        self.scope.enter();
        let num_stmts = self.exprs.random_in(
            self.config.statements_per_block.0,
            self.config.statements_per_block.1,
        );
        for _ in 0..num_stmts {
            self.statement(&mut preamble, depth);
        }
        self.scope.leave();
        Node::block(preamble)
    }

    fn fresh_var(&mut self) -> String {
        let name = format!("v{}", self.var_counter);
        self.var_counter += 1;
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printer::print_root_node;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn test_config() -> GenConfig {
        GenConfig {
            functions: (2, 4),
            params_per_function: (0, 3),
            statements_per_block: (3, 6),
            max_block_depth: 2,
            if_probability: 0.25,
            while_probability: 0.2,
            switch_probability: 0.15,
            modify_probability: 0.25,
            echo_probability: 0.3,
            break_continue_probability: 0.1,
        }
    }

    fn generate(seed: u64) -> Vec<RootNode> {
        let table = SymbolTable::builtin();
        let config = test_config();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut gen = ProgramGenerator::new(&mut rng, &table, &config);
        gen.generate_program()
    }

    fn render(roots: &[RootNode]) -> String {
        let mut out = String::new();
        for root in roots {
            print_root_node(&mut out, root);
        }
        out
    }

    fn for_each_node(n: &Node, f: &mut impl FnMut(&Node)) {
        f(n);
        for arg in &n.args {
            for_each_node(arg, f);
        }
    }

    fn program_nodes(roots: &[RootNode]) -> Vec<&Node> {
        roots
            .iter()
            .filter_map(|r| match r {
                RootNode::FuncDecl(decl) => Some(&decl.body),
                RootNode::Stmt(node) => Some(node),
                RootNode::Require { .. } => None,
            })
            .collect()
    }

    #[test]
    fn programs_are_deterministic_per_seed() {
        for seed in 0..10 {
            assert_eq!(render(&generate(seed)), render(&generate(seed)));
        }
        assert_ne!(render(&generate(1)), render(&generate(2)));
    }

    #[test]
    fn program_shape_is_require_funcs_calls() {
        let roots = generate(42);
        assert!(matches!(
            &roots[0],
            RootNode::Require { path } if path == "lib.php"
        ));

        let funcs: Vec<&FuncDecl> = roots
            .iter()
            .filter_map(|r| match r {
                RootNode::FuncDecl(d) => Some(d),
                _ => None,
            })
            .collect();
        let calls: Vec<&Node> = roots
            .iter()
            .filter_map(|r| match r {
                RootNode::Stmt(n) => Some(n),
                _ => None,
            })
            .collect();

        assert!(!funcs.is_empty());
        assert_eq!(funcs.len(), calls.len());
        for (i, decl) in funcs.iter().enumerate() {
            assert_eq!(decl.name, format!("func{i}"));
            for (j, param) in decl.params.iter().enumerate() {
                assert_eq!(param.name, format!("p{j}"));
                assert_eq!(decl.tags[j].name, "param");
            }
            assert!(decl.tags.len() >= decl.params.len());
        }
        for (decl, stmt) in funcs.iter().zip(&calls) {
            // Value-returning functions are called under an echo.
            let call = if stmt.op == Op::Echo {
                &stmt.args[0]
            } else {
                stmt
            };
            assert_eq!(call.op, Op::Call);
            assert_eq!(call.args[0].str_value(), decl.name);
            assert_eq!(call.args.len() - 1, decl.params.len());
        }
    }

    #[test]
    fn while_loops_are_counter_bounded() {
        let mut checked = 0;
        for seed in 0..30 {
            for node in program_nodes(&generate(seed)) {
                for_each_node(node, &mut |n| {
                    if n.op != Op::While {
                        return;
                    }
                    checked += 1;
                    let cond = &n.args[0];
                    assert_eq!(cond.op, Op::Less, "loop condition is not a bound check");
                    assert_eq!(cond.args[1].op, Op::IntLit);
                    assert!(cond.args[1].int_value() >= 1);

                    let body = &n.args[1];
                    assert_eq!(body.op, Op::Block);
                    let first = &body.args[0];
                    assert!(
                        matches!(first.op, Op::PostInc | Op::AssignModify),
                        "loop body does not lead with the increment"
                    );
                });
            }
        }
        assert!(checked > 0, "no while loops generated in 30 seeds");
    }

    #[test]
    fn break_continue_only_appear_in_valid_contexts() {
        fn check(n: &Node, in_loop: bool, in_arm: bool) {
            match n.op {
                Op::Continue => assert!(in_loop, "continue outside loop"),
                Op::Break => assert!(in_loop || in_arm, "break outside loop/switch"),
                Op::While => {
                    check(&n.args[0], in_loop, false);
                    check(&n.args[1], true, false);
                }
                Op::Switch => {
                    check(&n.args[0], in_loop, false);
                    for arm in &n.args[1..] {
                        for stmt in &arm.args {
                            check(stmt, in_loop, true);
                        }
                    }
                }
                _ => {
                    for arg in &n.args {
                        check(arg, in_loop, in_arm);
                    }
                }
            }
        }

        for seed in 0..30 {
            for node in program_nodes(&generate(seed)) {
                check(node, false, false);
            }
        }
    }

    #[test]
    fn switch_arms_are_well_formed() {
        let mut checked = 0;
        for seed in 0..40 {
            for node in program_nodes(&generate(seed)) {
                for_each_node(node, &mut |n| {
                    if n.op != Op::Switch {
                        return;
                    }
                    checked += 1;
                    let arms = &n.args[1..];
                    assert!(!arms.is_empty());
                    let defaults = arms.iter().filter(|a| a.op == Op::Default).count();
                    assert_eq!(defaults, 1, "expected exactly one default arm");
                    assert_eq!(arms.last().unwrap().op, Op::Default);
                    for arm in arms {
                        assert!(matches!(arm.op, Op::Case | Op::Default));
                        let body = match arm.op {
                            Op::Case => &arm.args[1..],
                            _ => &arm.args[..],
                        };
                        let last = body.last().expect("empty switch arm");
                        assert_eq!(last.op, Op::Break, "arm does not end in break");
                    }
                });
            }
        }
        assert!(checked > 0, "no switches generated in 40 seeds");
    }

    #[test]
    fn composite_bindings_carry_var_tags() {
        let mut found_tag = false;
        for seed in 0..40 {
            for node in program_nodes(&generate(seed)) {
                for_each_node(node, &mut |n| {
                    if n.op == Op::Assign {
                        if let crate::ir::Payload::Tag(tag) = &n.value {
                            found_tag = true;
                            assert!(tag.contains(" $"), "malformed tag: {tag}");
                        }
                    }
                });
            }
        }
        assert!(found_tag, "no @var tag generated in 40 seeds");
    }

    #[test]
    fn functions_echo_their_observable_state() {
        let mut found_echo = false;
        for seed in 0..10 {
            for node in program_nodes(&generate(seed)) {
                for_each_node(node, &mut |n| {
                    if n.op == Op::Echo {
                        found_echo = true;
                    }
                });
            }
        }
        assert!(found_echo, "programs never echo anything");
    }

    #[test]
    fn rendered_programs_end_with_newline() {
        for seed in 0..10 {
            let rendered = render(&generate(seed));
            assert!(rendered.ends_with('\n'));
            assert!(rendered.starts_with("require_once __DIR__ . '/lib.php';\n"));
        }
    }
}
