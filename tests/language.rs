use std::fs;

use evalon::get_result;
use walkdir::WalkDir;

#[test]
fn script_corpus_runs() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/scripts").into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| e.path().extension().is_some_and(|ext| ext == "js"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;
        if let Err(e) = get_result(&content, false) {
            panic!("Script {path:?} failed:\nError: {e}");
        }
    }

    assert!(count > 0, "No scripts found in tests/scripts");
}

fn assert_success(src: &str) {
    if let Err(e) = get_result(src, false) {
        panic!("Script failed: {e}");
    }
}

fn assert_failure(src: &str) {
    if get_result(src, false).is_ok() {
        panic!("Script succeeded but was expected to fail")
    }
}

#[test]
fn declarations_and_basic_arithmetic() {
    assert_success("var x = 1 + 2\nassert(x === 3)");
    assert_success("let x = 7 * 9\nassert(x === 63)");
    assert_success("const x = 8 - 5\nassert(x === 3)");
    assert_success("var x = 10 / 4\nassert(x === 2.5)");
    assert_success("var x = 10 % 4\nassert(x === 2)");
}

#[test]
fn compound_assignments() {
    assert_success("var x = 2\nx += 3\nassert(x === 5)");
    assert_success("var x = 7\nx -= 2\nassert(x === 5)");
    assert_success("var x = 4\nx *= 2\nassert(x === 8)");
    assert_success("var x = 9\nx /= 3\nassert(x === 3)");
    assert_success("var s = 'a'\ns += 1\nassert(s === 'a1')");
}

#[test]
fn update_operators() {
    assert_success("var i = 0\nvar a = i++\nassert(a === 0 && i === 1)");
    assert_success("var i = 0\nvar a = ++i\nassert(a === 1 && i === 1)");
    assert_success("var o = { n: 1 }\no.n--\nassert(o.n === 0)");
}

#[test]
fn functions_and_closures() {
    assert_success("function square(x) { return x * x }\nassert(square(3) === 9)");
    assert_success("var add = function (a, b) { return a + b }\nassert(add(2, 5) === 7)");
    assert_success("var inc = x => x + 1\nassert(inc(1) === 2)");
    assert_success("assert(hoisted() === 1)\nfunction hoisted() { return 1 }");
    assert_success("function f(a, b) { return b }\nassert(f(1) === undefined)");
    assert_success(r#"
        function outer() {
            var secret = 41
            return function () { return secret + 1 }
        }
        assert(outer()() === 42)
    "#);
}

#[test]
fn logical_and_comparisons() {
    assert_success("assert(2 < 3)");
    assert_success("assert(3 > 2)");
    assert_success("assert(2 <= 2)");
    assert_success("assert(3 >= 3)");
    assert_success("assert(2 != 3)");
    assert_success("assert('a' < 'b')");
    assert_success("assert(!false)");
    assert_success("assert((0 || 'x') === 'x')");
    assert_success("assert((0 && 'x') === 0)");
}

#[test]
fn blocks_and_conditionals() {
    assert_success("var x = 2 < 3 ? 7 : 11\nassert(x === 7)");
    assert_success(r#"
        var y
        {
            let a = 1
            let b = 2
            y = a + b
        }
        assert(y === 3)
        assert(typeof a === "undefined")
    "#);
    assert_success("if (false) { assert(false) } else { var reached = true }\nassert(reached)");
}

#[test]
fn loops() {
    assert_success("var sum = 0\nfor (let x = 1; x < 5; x++) { sum += x }\nassert(sum === 10)");
    assert_success("var n = 0\nwhile (n < 3) n++\nassert(n === 3)");
    assert_success("var n = 0\nfor (;;) { if (++n === 4) break }\nassert(n === 4)");
}

#[test]
fn exceptions() {
    assert_success("try { throw 1 } catch (e) { assert(e === 1) }");
    assert_success("var r = 0\ntry { r = 1 } finally { r += 1 }\nassert(r === 2)");
    assert_success("try { missing } catch (e) { assert(e.name === 'ReferenceError') }");
    assert_success("try { throw new Error('x') } catch { }");
}

#[test]
fn eval_in_scripts() {
    assert_success("assert(eval('1 + 2') === 3)");
    assert_success("function f(a) { var x = 5; eval('x += a'); return x }\nassert(f(7) === 12)");
    assert_success("var s = new String('1')\nassert(eval(s) === s)");
}

#[test]
fn comments() {
    assert_success("var x = /* a **/ 1\nassert(x === 1)");
    assert_success("var y = 2 /***/\nassert(y === 2)");
    assert_success("/* spans\n * lines **/ var z = 3 // trailing\nassert(z === 3)");
    assert_failure("/* never closed");
}

#[test]
fn unknown_variable_is_error() {
    assert_failure("assert(foo === 1)");
}

#[test]
fn failed_assertion_is_error() {
    assert_failure("assert(1 === 2)");
}

#[test]
fn calling_a_non_function_is_error() {
    assert_failure("var x = 1\nx()");
}

#[test]
fn syntax_errors_are_errors() {
    assert_failure("{");
    assert_failure("var = 1");
    assert_failure("1 = 2");
    assert_failure("return 1");
    assert_failure("break");
    assert_failure("a b");
}

#[test]
fn eval_syntax_error_is_error() {
    assert_failure("eval('{')");
}

#[test]
fn uncaught_throw_is_error() {
    assert_failure("throw 'boom'");
}
