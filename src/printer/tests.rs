use super::*;
use crate::ir::{DocTag, FuncParam, Payload};
use crate::value;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn sprint_root(root: &RootNode) -> String {
    let mut out = String::new();
    print_root_node(&mut out, root);
    out
}

fn stmt(node: Node) -> String {
    sprint_root(&RootNode::Stmt(node))
}

/// Inverse of the printer's escape rules, for round-trip checks.
fn unescape(escaped: &str) -> String {
    let mut out = String::new();
    let mut chars = escaped.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next().expect("dangling backslash") {
            'r' => out.push('\r'),
            'n' => out.push('\n'),
            '"' => out.push('"'),
            '\\' => out.push('\\'),
            'a' => out.push('\u{7}'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            't' => out.push('\t'),
            'v' => out.push('\u{b}'),
            '0' => {
                let hi = chars.next().expect("octal high digit") as u32 - '0' as u32;
                let lo = chars.next().expect("octal low digit") as u32 - '0' as u32;
                out.push(char::from_u32(hi * 8 + lo).expect("octal escape"));
            }
            other => panic!("unexpected escape \\{other}"),
        }
    }
    out
}

#[test]
fn require_spells_out_the_dir_prefix() {
    let root = RootNode::Require {
        path: "lib.php".to_string(),
    };
    assert_eq!(sprint_root(&root), "require_once __DIR__ . '/lib.php';\n");
}

#[test]
fn nan_assignment_uses_the_helper() {
    let node = Node::assign(Node::var("a", TypeInfo::FLOAT), Node::float_lit(f64::NAN));
    assert_eq!(stmt(node), "$a = make_nan();\n");
}

#[test]
fn div_and_mod_print_as_safe_helpers() {
    let div = Node::binary_typed(Op::Div, Node::int_lit(5), Node::int_lit(2), TypeInfo::INT);
    assert_eq!(sprint_node(&div), "_safe_int_div(5, 2)");

    let mod_node = Node::binary_typed(Op::Mod, Node::int_lit(7), Node::int_lit(3), TypeInfo::INT);
    assert_eq!(sprint_node(&mod_node), "_safe_int_mod(7, 3)");

    let fdiv = Node::binary_typed(
        Op::Div,
        Node::float_lit(1.5),
        Node::float_lit(0.0),
        TypeInfo::FLOAT,
    );
    assert_eq!(sprint_node(&fdiv), "_safe_float_div(1.5, 0.0)");

    let fmod = Node::binary_typed(
        Op::Mod,
        Node::var("x", TypeInfo::FLOAT),
        Node::float_lit(2.25),
        TypeInfo::FLOAT,
    );
    assert_eq!(sprint_node(&fmod), "_safe_float_mod($x, 2.25)");
}

#[test]
fn string_escapes() {
    let node = Node::string_lit("a\nb\0c\"");
    assert_eq!(sprint_node(&node), "\"a\\nb\\000c\\\"\"");

    let controls = Node::string_lit("\u{7}\u{8}\u{c}\t\u{b}\r\\\u{1}\u{1f}");
    assert_eq!(
        sprint_node(&controls),
        "\"\\a\\b\\f\\t\\v\\r\\\\\\001\\037\""
    );

    // Non-ASCII passes through untouched.
    let multibyte = Node::string_lit("héllo こんにちは");
    assert_eq!(sprint_node(&multibyte), "\"héllo こんにちは\"");
}

#[test]
fn switch_statement_layout() {
    let node = Node::switch(
        Node::var("v", TypeInfo::INT),
        vec![
            Node::case(
                Node::int_lit(1),
                vec![Node::echo(vec![Node::string_lit("one")])],
            ),
            Node::default_case(vec![Node::echo(vec![Node::string_lit("?")])]),
        ],
    );
    let expected = "switch ($v) {\n  case 1:\n    echo \"one\";\n  default:\n    echo \"?\";\n}\n";
    assert_eq!(stmt(node), expected);
}

#[test]
fn float_equality_prints_as_helpers() {
    let x = Node::var("x", TypeInfo::FLOAT);
    let y = Node::var("y", TypeInfo::FLOAT);
    assert_eq!(
        sprint_node(&Node::binary(Op::FloatEqual2, x.clone(), y.clone())),
        "float_eq2($x, $y)"
    );
    assert_eq!(
        sprint_node(&Node::binary(Op::FloatEqual3, x.clone(), y.clone())),
        "float_eq3($x, $y)"
    );
    assert_eq!(
        sprint_node(&Node::binary(Op::NotFloatEqual2, x.clone(), y.clone())),
        "float_neq2($x, $y)"
    );
    assert_eq!(
        sprint_node(&Node::binary(Op::NotFloatEqual3, x, y)),
        "float_neq3($x, $y)"
    );
}

#[test]
fn float_literal_forms() {
    assert_eq!(sprint_node(&Node::float_lit(0.0)), "0.0");
    assert_eq!(sprint_node(&Node::float_lit(-0.0)), "0.0");
    assert_eq!(sprint_node(&Node::float_lit(1.5)), "1.5");
    assert_eq!(sprint_node(&Node::float_lit(2.0)), "2.0");
    assert_eq!(sprint_node(&Node::float_lit(-1.0)), "-1.0");
    assert_eq!(sprint_node(&Node::float_lit(f64::INFINITY)), "make_positive_inf()");
    assert_eq!(
        sprint_node(&Node::float_lit(f64::NEG_INFINITY)),
        "make_negative_inf()"
    );

    // Finite literals must re-parse to the same value.
    for v in [1.5, -2.25, 0.001, 1e10, f64::MAX, f64::MIN_POSITIVE] {
        let printed = sprint_node(&Node::float_lit(v));
        let reparsed: f64 = printed.parse().expect("float literal should parse");
        assert_eq!(reparsed.to_bits(), v.to_bits(), "round-trip of {printed}");
    }
}

#[test]
fn bool_and_int_literals() {
    assert_eq!(sprint_node(&Node::bool_lit(true)), "true");
    assert_eq!(sprint_node(&Node::bool_lit(false)), "false");
    assert_eq!(sprint_node(&Node::int_lit(-42)), "-42");
    assert_eq!(
        sprint_node(&Node::int_lit(i64::MIN)),
        "-9223372036854775808"
    );
}

#[test]
fn if_and_while_take_no_trailing_semicolon() {
    let body = Node::block(vec![Node::echo(vec![Node::string_lit("x")])]);
    let if_stmt = Node::if_stmt(Node::bool_lit(true), body.clone());
    assert_eq!(stmt(if_stmt), "if (true) {\n  echo \"x\";\n}\n");

    let cond = Node::binary(Op::Less, Node::var("i", TypeInfo::INT), Node::int_lit(3));
    let while_stmt = Node::while_loop(cond, body);
    assert_eq!(stmt(while_stmt), "while ($i < 3) {\n  echo \"x\";\n}\n");
}

#[test]
fn nested_blocks_indent_by_two() {
    let inner = Node::if_stmt(
        Node::bool_lit(false),
        Node::block(vec![Node::echo(vec![Node::string_lit("y")])]),
    );
    let outer = Node::if_stmt(Node::bool_lit(true), Node::block(vec![inner]));
    assert_eq!(
        stmt(outer),
        "if (true) {\n  if (false) {\n    echo \"y\";\n  }\n}\n"
    );
}

#[test]
fn compound_assignment_spellings() {
    let concat = Node::assign_modify(
        Op::Concat,
        Node::var("s", TypeInfo::STRING),
        Node::string_lit("x"),
    );
    assert_eq!(stmt(concat), "$s .= \"x\";\n");

    let shift = Node::assign_modify(
        Op::BitShiftLeft,
        Node::var("i", TypeInfo::INT),
        Node::int_lit(2),
    );
    assert_eq!(stmt(shift), "$i <<= 2;\n");

    let add = Node::assign_modify(Op::Add, Node::var("i", TypeInfo::INT), Node::int_lit(1));
    assert_eq!(stmt(add), "$i += 1;\n");
}

#[test]
fn tagged_assignment_prepends_var_doc() {
    let ty = TypeInfo::Array(Box::new(TypeInfo::INT));
    let node = Node::assign_tagged(
        Node::var("v0", ty.clone()),
        Node::array_lit(vec![Node::int_lit(1)]),
        "int[] $v0",
    );
    assert_eq!(
        stmt(node),
        "/** @var int[] $v0 */ $v0 = array(\n  1,\n);\n"
    );
}

#[test]
fn array_literals() {
    assert_eq!(sprint_node(&Node::array_lit(vec![])), "array()");
    assert_eq!(
        sprint_node(&Node::array_lit(vec![Node::int_lit(1), Node::int_lit(2)])),
        "array(\n  1,\n  2,\n)"
    );
}

#[test]
fn interpolated_string_parts() {
    let node = Node::interpolated_string(vec![
        Node::var("x", TypeInfo::INT),
        Node::string_lit("a\n"),
        Node::var("s", TypeInfo::STRING),
    ]);
    assert_eq!(sprint_node(&node), "\"{$x}a\\n{$s}\"");
}

#[test]
fn operator_spellings() {
    let a = || Node::var("a", TypeInfo::INT);
    let b = || Node::var("b", TypeInfo::INT);
    let cases: Vec<(Node, &str)> = vec![
        (Node::binary(Op::Add, a(), b()), "$a + $b"),
        (Node::binary(Op::Sub, a(), b()), "$a - $b"),
        (Node::binary(Op::Mul, a(), b()), "$a * $b"),
        (Node::binary(Op::Exp, a(), b()), "$a ** $b"),
        (Node::binary(Op::Concat, a(), b()), "$a . $b"),
        (Node::binary(Op::BitAnd, a(), b()), "$a & $b"),
        (Node::binary(Op::BitOr, a(), b()), "$a | $b"),
        (Node::binary(Op::BitXor, a(), b()), "$a ^ $b"),
        (Node::binary(Op::BitShiftLeft, a(), b()), "$a << $b"),
        (Node::binary(Op::BitShiftRight, a(), b()), "$a >> $b"),
        (Node::binary(Op::NullCoalesce, a(), b()), "$a ?? $b"),
        (Node::binary(Op::And, a(), b()), "$a && $b"),
        (Node::binary(Op::Or, a(), b()), "$a || $b"),
        (Node::binary(Op::AndWord, a(), b()), "$a and $b"),
        (Node::binary(Op::OrWord, a(), b()), "$a or $b"),
        (Node::binary(Op::XorWord, a(), b()), "$a xor $b"),
        (Node::binary(Op::Equal2, a(), b()), "$a == $b"),
        (Node::binary(Op::Equal3, a(), b()), "$a === $b"),
        (Node::binary(Op::NotEqual2, a(), b()), "$a != $b"),
        (Node::binary(Op::NotEqual3, a(), b()), "$a !== $b"),
        (Node::binary(Op::Spaceship, a(), b()), "$a <=> $b"),
        (Node::binary(Op::Less, a(), b()), "$a < $b"),
        (Node::binary(Op::LessOrEqual, a(), b()), "$a <= $b"),
        (Node::binary(Op::Greater, a(), b()), "$a > $b"),
        (Node::binary(Op::GreaterOrEqual, a(), b()), "$a >= $b"),
        (Node::unary(Op::Not, a()), "!$a"),
        (Node::unary(Op::BitNot, a()), "~$a"),
        (Node::negation(a()), "-$a"),
        (Node::unary(Op::UnaryPlus, a()), "+$a"),
        (Node::unary(Op::PreInc, a()), "++$a"),
        (Node::unary(Op::PreDec, a()), "--$a"),
        (Node::post_inc(a()), "$a++"),
        (Node::unary(Op::PostDec, a()), "$a--"),
    ];
    for (node, expected) in cases {
        assert_eq!(sprint_node(&node), expected);
    }
}

#[test]
fn ternary_cast_parens_and_index() {
    let ternary = Node::ternary(
        Node::bool_lit(true),
        Node::int_lit(1),
        Node::parens(Node::int_lit(2)),
    );
    assert_eq!(sprint_node(&ternary), "true ? 1 : (2)");

    let cast = Node::cast(
        TypeInfo::INT,
        Node::parens(Node::binary(
            Op::Add,
            Node::var("x", TypeInfo::INT),
            Node::var("y", TypeInfo::INT),
        )),
    );
    assert_eq!(sprint_node(&cast), "(int)($x + $y)");

    let index = Node::index(Node::var("s", TypeInfo::STRING), Node::int_lit(0));
    assert_eq!(sprint_node(&index), "$s[0]");

    let array_cast = Node::cast(
        TypeInfo::Array(Box::new(TypeInfo::INT)),
        Node::var("x", TypeInfo::INT),
    );
    assert_eq!(sprint_node(&array_cast), "(array)$x");
}

#[test]
fn return_break_continue() {
    assert_eq!(stmt(Node::ret(Node::int_lit(3))), "return 3;\n");
    assert_eq!(stmt(Node::ret_void()), "return;\n");
    assert_eq!(stmt(Node::brk(0)), "break;\n");
    assert_eq!(stmt(Node::brk(2)), "break 2;\n");
    assert_eq!(stmt(Node::cont(0)), "continue;\n");
    assert_eq!(stmt(Node::cont(1)), "continue 1;\n");
}

#[test]
fn echo_joins_arguments() {
    let node = Node::echo(vec![
        Node::var("a", TypeInfo::INT),
        Node::var("b", TypeInfo::STRING),
    ]);
    assert_eq!(stmt(node), "echo $a, $b;\n");
}

#[test]
fn function_declaration_layout() {
    let decl = FuncDecl {
        tags: vec![DocTag::new("param", "int $p0")],
        name: "main0".to_string(),
        params: vec![FuncParam {
            name: "p0".to_string(),
            param_type: TypeInfo::INT,
        }],
        body: Node::block(vec![Node::echo(vec![Node::var("p0", TypeInfo::INT)])]),
    };
    let expected =
        "/**\n * @param int $p0\n */\nfunction main0($p0) {\n  echo $p0;\n}\n\n";
    assert_eq!(sprint_root(&RootNode::FuncDecl(decl)), expected);
}

#[test]
fn untagged_function_skips_doc_block() {
    let decl = FuncDecl {
        tags: Vec::new(),
        name: "f".to_string(),
        params: Vec::new(),
        body: Node::block(Vec::new()),
    };
    assert_eq!(sprint_root(&RootNode::FuncDecl(decl)), "function f() {\n}\n\n");
}

#[test]
fn calls_and_names() {
    let call = Node::call(
        Node::name("strlen"),
        vec![Node::var("s", TypeInfo::STRING)],
    );
    assert_eq!(sprint_node(&call), "strlen($s)");
    assert_eq!(sprint_node(&Node::call(Node::name("pi"), vec![])), "pi()");
}

#[test]
fn escapes_round_trip() {
    let mut samples: Vec<String> = vec![
        String::new(),
        "\0".to_string(),
        "a\0b".to_string(),
        "line1\nline2\r\n".to_string(),
        "quote\"and\\slash".to_string(),
        "\u{1}\u{2}\u{3}\u{1f}".to_string(),
        "こんにちは".to_string(),
    ];
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..500 {
        samples.push(value::string_value(&mut rng));
    }

    for sample in samples {
        let printed = sprint_node(&Node::string_lit(sample.clone()));
        let inner = printed
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .expect("quoted literal");
        assert_eq!(unescape(inner), sample, "round-trip of {printed:?}");
    }
}

#[test]
fn printing_is_deterministic() {
    let node = Node::ternary(
        Node::binary(Op::Less, Node::var("i", TypeInfo::INT), Node::int_lit(10)),
        Node::string_lit("small"),
        Node::string_lit("big"),
    );
    assert_eq!(sprint_node(&node), sprint_node(&node.clone()));
}

#[test]
fn modify_op_lexemes_cover_the_compound_set() {
    let cases = [
        (Op::Add, "+"),
        (Op::Sub, "-"),
        (Op::Concat, "."),
        (Op::Div, "/"),
        (Op::Mul, "*"),
        (Op::Exp, "**"),
        (Op::Mod, "%"),
        (Op::BitAnd, "&"),
        (Op::BitOr, "|"),
        (Op::BitXor, "^"),
        (Op::BitNot, "~"),
        (Op::BitShiftLeft, "<<"),
        (Op::BitShiftRight, ">>"),
        (Op::NullCoalesce, "??"),
    ];
    for (op, lexeme) in cases {
        assert_eq!(modify_op_lexeme(op), lexeme);
    }
}

#[test]
#[should_panic(expected = "Cast node without a target type")]
fn cast_without_type_is_a_bug() {
    let mut cast = Node::cast(TypeInfo::INT, Node::int_lit(1));
    cast.ty = None;
    sprint_node(&cast);
}

#[test]
fn var_payload_mismatch_is_a_bug() {
    let mut var = Node::var("x", TypeInfo::INT);
    var.value = Payload::Int(3);
    let result = std::panic::catch_unwind(|| sprint_node(&var));
    assert!(result.is_err());
}
