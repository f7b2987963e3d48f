use evalon::{
    ast::{CallSite, Expr, Position, Statement},
    config::Config,
    error::{Error, ParseError, RuntimeError},
    interpreter::{
        compile,
        evaluator::core::Context,
        value::{core::Value, object::ObjectKind},
    },
    run,
};
use pretty_assertions::assert_eq;

fn eval_ok(source: &str) -> Value {
    run(source, &Config::default()).unwrap_or_else(|e| panic!("{source:?} failed: {e}"))
}

fn eval_err(source: &str) -> RuntimeError {
    match run(source, &Config::default()) {
        Err(Error::Runtime(e)) => e,
        Err(Error::Parse(e)) => panic!("{source:?} did not compile: {e}"),
        Ok(value) => panic!("{source:?} succeeded with {value}"),
    }
}

fn first_call_site(source: &str) -> CallSite {
    let program = compile(source).unwrap();
    match &program.statements[0] {
        Statement::Expression { expr: Expr::Call { call_site, .. },
                                .. } => *call_site,
        other => panic!("expected a call statement, got {other:?}"),
    }
}

#[test]
fn evaluates_an_expression() {
    assert_eq!(eval_ok("eval('1 + 2')"), Value::Number(3.0));
}

#[test]
fn completion_value_is_last_value_producing_statement() {
    assert_eq!(eval_ok("eval('')"), Value::Undefined);
    assert_eq!(eval_ok("eval('1;;;;;')"), Value::Number(1.0));
    assert_eq!(eval_ok("eval('1;{}')"), Value::Number(1.0));
    assert_eq!(eval_ok("eval('1;var a;')"), Value::Number(1.0));
    assert_eq!(eval_ok("eval('var a = 2;')"), Value::Undefined);
    assert_eq!(eval_ok("eval('function f() {}')"), Value::Undefined);
    assert_eq!(eval_ok("eval('1; if (true) {}')"), Value::Undefined);
}

#[test]
fn unterminated_block_is_a_positioned_syntax_error() {
    let err = eval_err("eval('{')");
    let RuntimeError::Syntax(parse) = &err else {
        panic!("expected a syntax error, got {err}");
    };
    assert_eq!(parse.line(), 1);
    assert_eq!(parse.column(), 2);
    assert_eq!(err.message(),
               "Unexpected token Eof. Expected CurlyClose (line: 1, column: 2)");
    assert_eq!(err.to_string(),
               "SyntaxError: Unexpected token Eof. Expected CurlyClose (line: 1, column: 2)");
}

#[test]
fn syntax_error_on_first_token_is_at_start_of_input() {
    let err = compile(")").unwrap_err();
    assert_eq!(err,
               ParseError::UnexpectedToken { found:    "ParenClose",
                                             expected: "primary expression".to_string(),
                                             position: Position::START, });
}

#[test]
fn direct_eval_mutates_caller_locals() {
    let source = "function foo(a) { var x = 5; eval('x += a'); return x }\nfoo(7)";
    assert_eq!(eval_ok(source), Value::Number(12.0));
}

#[test]
fn non_string_argument_is_returned_unchanged() {
    let value = eval_ok("var s = new String('1 + 2'); eval(s)");
    let Value::Object(object) = &value else {
        panic!("expected the wrapper object, got {value}");
    };
    assert!(matches!(object.kind(), ObjectKind::StringWrapper(_)));

    assert_eq!(eval_ok("var s = new String('1 + 2'); eval(s) === s"), Value::Bool(true));
    assert_eq!(eval_ok("eval(true)"), Value::Bool(true));
    assert_eq!(eval_ok("eval()"), Value::Undefined);
}

#[test]
fn indirect_eval_sees_only_globals() {
    let source = r#"
        var value = "outer"
        function f() {
            var value = "inner"
            return global.eval("value")
        }
        f()
    "#;
    assert_eq!(eval_ok(source), Value::from("outer"));
}

#[test]
fn reassigned_eval_is_an_ordinary_call() {
    let source = r#"
        function f() {
            var value = "inner"
            var eval = () => { return "wat" }
            return eval("value")
        }
        f()
    "#;
    assert_eq!(eval_ok(source), Value::from("wat"));
}

#[test]
fn local_eval_bound_to_the_primitive_is_direct() {
    let source = r#"
        var value = "outer"
        function f() {
            var value = "inner"
            var eval = global.eval
            return eval("value")
        }
        f()
    "#;
    assert_eq!(eval_ok(source), Value::from("inner"));
}

#[test]
fn alias_of_eval_is_indirect() {
    let source = r#"
        var value = "outer"
        function f() {
            var value = "inner"
            var eval1 = global.eval
            return eval1("value")
        }
        f()
    "#;
    assert_eq!(eval_ok(source), Value::from("outer"));
}

#[test]
fn every_argument_is_evaluated_once() {
    let source = r#"
        var value = "outer"
        var i = 0
        var result = eval("value", i++, i++, i++)
        result + ":" + i
    "#;
    assert_eq!(eval_ok(source), Value::from("outer:3"));
}

#[test]
fn throwing_argument_stops_evaluation() {
    let mut context = Context::new(Config::default());
    let err = context.run("var i = 0\neval('i = 100', i++, i++, j, i++)")
                     .unwrap_err();
    assert_eq!(err.to_string(), "ReferenceError: 'j' is not defined");
    assert_eq!(context.run("i").unwrap(), Value::Number(2.0));
}

#[test]
fn calling_a_non_function_through_eval_name_is_a_type_error() {
    let err = eval_err("function f() { var eval = 1; return eval('1') }\nf()");
    assert_eq!(err.to_string(), "TypeError: eval is not a function");
}

#[test]
fn parser_records_call_site_shape() {
    assert_eq!(first_call_site("eval('1')"), CallSite::EvalReference);
    assert_eq!(first_call_site("global.eval('1')"), CallSite::Ordinary);
    assert_eq!(first_call_site("(eval)('1')"), CallSite::Ordinary);
    assert_eq!(first_call_site("eval1('1')"), CallSite::Ordinary);
}

#[test]
fn runtime_errors_in_sub_program_propagate_unchanged() {
    let err = eval_err("eval('missing')");
    assert!(matches!(err, RuntimeError::UnknownVariable { ref name, .. } if name == "missing"));

    let err = eval_err("eval(\"throw 'boom'\")");
    assert!(matches!(err, RuntimeError::Thrown(Value::String(ref s)) if &**s == "boom"));
}

#[test]
fn nesting_is_bounded_by_call_depth() {
    let config = Config { max_call_depth: 16,
                          ..Config::default() };
    let err = match run("var s = 'eval(s)'; eval(s)", &config) {
        Err(Error::Runtime(e)) => e,
        other => panic!("expected a runtime error, got {other:?}"),
    };
    assert!(matches!(err, RuntimeError::CallStackExceeded { .. }));
    assert_eq!(err.to_string(), "RangeError: Maximum call stack size exceeded");

    let caught = run("function r() { return r() }\ntry { r() } catch (e) { e.name }", &config);
    assert_eq!(caught.unwrap(), Value::from("RangeError"));
}

#[test]
fn default_depth_limit_is_catchable_on_a_small_thread() {
    let sources = ["var s = 'eval(s)'; try { eval(s) } catch (e) { e.name }",
                   "function r(n) { return r(n + 1) }\ntry { r(0) } catch (e) { e.name }",
                   "var s = 'global.eval(s)'; try { eval(s) } catch (e) { e.name }"];

    let handle = std::thread::Builder::new().stack_size(2 * 1024 * 1024)
                                            .spawn(move || {
                                                sources.map(|source| {
                                                           run(source, &Config::default())
                                                               .map(|value| value.to_display_string())
                                                               .map_err(|e| e.to_string())
                                                       })
                                            })
                                            .unwrap();

    for result in handle.join().unwrap() {
        assert_eq!(result, Ok("RangeError".to_string()));
    }
}

#[test]
fn bindings_persist_across_runs_of_one_context() {
    let mut context = Context::new(Config::default());
    context.run("eval('var fromEval = 1')").unwrap();
    assert_eq!(context.run("fromEval + 1").unwrap(), Value::Number(2.0));
    assert_eq!(context.global_object().get("fromEval"), Value::Number(1.0));
}

#[test]
fn only_var_declarations_reach_the_caller_record() {
    let mut context = Context::new(Config::default());
    context.run("eval('var leaked = 1; let hidden = 2; const fixed = 3; function made() {}')")
           .unwrap();

    let global = context.global().borrow();
    assert!(global.has_own("leaked"));
    assert!(global.has_own("made"));
    assert!(!global.has_own("hidden"));
    assert!(!global.has_own("fixed"));
}

#[test]
fn unrecognised_input_is_an_invalid_token() {
    let err = compile("var a = @").unwrap_err();
    assert_eq!(err,
               ParseError::InvalidToken { text:     "@".to_string(),
                                          position: Position::new(1, 9), });
    assert_eq!(err.to_string(), "Invalid token '@' (line: 1, column: 9)");

    let err = eval_err("eval('1 +\\n #')");
    assert_eq!(err.to_string(), "SyntaxError: Invalid token '#' (line: 2, column: 2)");
}
