/// End-to-end integration tests
/// Exercises: Lexer → Parser → Evaluator through the public API
use script_engine::{
    lex, parse, ArithmeticMode, Engine, EngineConfig, EngineError, EvalErrorKind, Evaluator,
    NodeKind, Stage, TokenKind, Value,
};

#[test]
fn test_e2e_staged_pipeline() {
    let source = "1 + 2 * 3";

    // Lex
    let tokens = lex(source).unwrap();
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Value,
            TokenKind::Punct,
            TokenKind::Value,
            TokenKind::Punct,
            TokenKind::Value,
        ]
    );
    assert_eq!(tokens[0].value(), Some(&Value::Int(1)));
    assert_eq!(tokens[1].text(), "+");
    assert_eq!(tokens[3].text(), "*");

    // Parse
    let ast = parse(&tokens).unwrap();
    let root = ast.root();
    assert_eq!(root.kind(), NodeKind::Add);
    assert_eq!(ast.value(root.lhs().unwrap()), Some(&Value::Int(1)));
    let mul = root.rhs().unwrap();
    assert_eq!(mul.kind(), NodeKind::Mul);
    assert_eq!(ast.value(mul.lhs().unwrap()), Some(&Value::Int(2)));
    assert_eq!(ast.value(mul.rhs().unwrap()), Some(&Value::Int(3)));

    // Evaluate
    let result = Evaluator::new().eval(&ast).unwrap();
    assert_eq!(result, Value::Int(7));
}

#[test]
fn test_e2e_evaluation_leaves_tokens_untouched() {
    let tokens = lex("5 * 5").unwrap();
    let before = tokens.clone();
    let ast = parse(&tokens).unwrap();

    let evaluator = Evaluator::new();
    assert_eq!(evaluator.eval(&ast).unwrap(), Value::Int(25));
    assert_eq!(evaluator.eval(&ast).unwrap(), Value::Int(25));
    assert_eq!(tokens, before);
}

#[test]
fn test_e2e_arithmetic() {
    let engine = Engine::new();
    let cases = [
        ("2 * 3 * 4", 24),
        ("1 + 2 + 3 + 4", 10),
        ("10 - 2 * 3", 4),
        ("7 / 2", 3),
        ("20 / 2 / 5", 2),
        ("1 * 2 + 3 * 4", 14),
        ("0", 0),
        ("  42\n", 42),
    ];

    for (source, expected) in cases {
        assert_eq!(
            engine.run(source).unwrap(),
            Value::Int(expected),
            "source: {}",
            source
        );
    }
}

#[test]
fn test_e2e_wrapping_literal() {
    let result = Engine::new().run("2147483647 + 1").unwrap();
    assert_eq!(result, Value::Int(i32::MIN));

    let result = Engine::new().run("4294967296").unwrap();
    assert_eq!(result, Value::Int(0));
}

#[test]
fn test_e2e_lex_error() {
    let err = Engine::new().run("3 * x").unwrap_err();
    assert_eq!(err.stage(), Stage::Lex);
    assert_eq!(err.position(), Some(4));
    assert!(err.to_string().contains("invalid token"));
}

#[test]
fn test_e2e_parse_errors() {
    let engine = Engine::new();

    let err = engine.run("1 + 2 *").unwrap_err();
    assert_eq!(err.stage(), Stage::Parse);
    match err {
        EngineError::Parse(e) => {
            assert_eq!(e.position, 7);
            assert_eq!(e.found, "end of input");
        }
        other => panic!("expected parse error, got {:?}", other),
    }

    let err = engine.run("(1 + 2)").unwrap_err();
    assert_eq!(err.stage(), Stage::Parse);
    assert_eq!(err.position(), Some(0));

    let err = engine.run("1 == 2").unwrap_err();
    assert_eq!(err.stage(), Stage::Parse);
    assert_eq!(err.position(), Some(2));

    let err = engine.run("").unwrap_err();
    assert_eq!(err.stage(), Stage::Parse);
}

#[test]
fn test_e2e_eval_errors() {
    let err = Engine::new().run("1 + 2 / 0").unwrap_err();
    assert_eq!(err.stage(), Stage::Eval);
    assert_eq!(err.position(), Some(6));
    match err {
        EngineError::Eval(e) => {
            assert_eq!(e.kind, EvalErrorKind::DivisionByZero);
            assert_eq!(e.node, NodeKind::Div);
        }
        other => panic!("expected eval error, got {:?}", other),
    }
}

#[test]
fn test_e2e_legacy_mode() {
    let config = EngineConfig::from_json(r#"{"arithmetic": "legacy"}"#).unwrap();
    let engine = Engine::with_config(config);
    assert_eq!(engine.config().arithmetic, ArithmeticMode::Legacy);

    assert_eq!(engine.run("1 + 2 * 3").unwrap(), Value::Int(7));

    let err = engine.run("8 / 2").unwrap_err();
    match err {
        EngineError::Eval(e) => assert_eq!(e.kind, EvalErrorKind::Unimplemented),
        other => panic!("expected eval error, got {:?}", other),
    }
}

#[test]
fn test_e2e_result_rendering() {
    let value = Engine::new().run("6 * 7").unwrap();
    assert_eq!(value.int_projection(), Some(42));
    assert_eq!(value.to_string(), "42");
}

#[test]
fn test_e2e_long_operator_chains() {
    let engine = Engine::new();

    let source = format!("1{}", "+1".repeat(100_000));
    assert_eq!(engine.run(&source).unwrap(), Value::Int(100_001));

    let source = format!("3{}", " * 1 - 1 + 1".repeat(60_000));
    assert_eq!(engine.run(&source).unwrap(), Value::Int(3));

    let source = format!("1{}", "*2".repeat(150_000));
    assert_eq!(engine.run(&source).unwrap(), Value::Int(0));
}

#[test]
fn test_e2e_long_chain_errors_are_returned() {
    let engine = Engine::new();

    let source = format!("1{} / 0", "+1".repeat(100_000));
    let err = engine.run(&source).unwrap_err();
    assert_eq!(err.stage(), Stage::Eval);
    assert_eq!(err.position(), Some(source.len() - 3));

    let source = format!("1{} +", "+1".repeat(100_000));
    let err = engine.run(&source).unwrap_err();
    assert_eq!(err.stage(), Stage::Parse);
    assert_eq!(err.position(), Some(source.len()));
}

#[test]
fn test_e2e_long_chain_staged() {
    let source = format!("2{}", "*1".repeat(100_000));
    let tokens = lex(&source).unwrap();
    assert_eq!(tokens.len(), 200_001);

    let ast = parse(&tokens).unwrap();
    let rendered = ast.to_string();
    assert!(rendered.starts_with("(* (* "));
    assert_eq!(rendered.len(), 1 + 100_000 * "(*  1)".len());

    let copy = ast.root().clone();
    assert_eq!(&copy, ast.root());
    assert_eq!(Evaluator::new().eval(&ast).unwrap(), Value::Int(2));
}
