use std::fs;

use luna::{Value, evaluate};
use walkdir::WalkDir;

fn eval_ok(src: &str) -> Value {
    match evaluate(src) {
        Ok(value) => value,
        Err(e) => panic!("script failed: {e}\n{src}"),
    }
}

fn eval_number(src: &str) -> f64 {
    match eval_ok(src) {
        Value::Number(n) => n,
        other => panic!("expected a number, got {other:?}\n{src}"),
    }
}

fn assert_success(src: &str) {
    eval_ok(src);
}

fn assert_failure(src: &str) {
    if evaluate(src).is_ok() {
        panic!("script succeeded but was expected to fail:\n{src}")
    }
}

#[test]
fn fixture_scripts_work() {
    let mut count = 0;

    for entry in WalkDir::new("tests/scripts").into_iter()
                                              .filter_map(Result::ok)
                                              .filter(|e| {
                                                  e.path().extension().is_some_and(|ext| ext == "lua")
                                              })
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("failed to read {path:?}: {e}"));
        if let Err(e) = evaluate(&source) {
            panic!("fixture {path:?} failed: {e}");
        }
        count += 1;
    }

    assert!(count > 0, "no fixture scripts found in tests/scripts");
}

#[test]
fn arithmetic_and_precedence() {
    assert_eq!(eval_number("return 2 + 3 * 4 ^ 2"), 50.0);
    assert_eq!(eval_number("return 2 + 3 * 4"), 14.0);
    assert_eq!(eval_number("return (2 + 3) * 4"), 20.0);
    assert_eq!(eval_number("return 2 ^ 3 ^ 2"), 512.0);
    assert_eq!(eval_number("return -2 ^ 2"), -4.0);
    assert_eq!(eval_number("return 7 // 2"), 3.0);
    assert_eq!(eval_number("return -7 // 2"), -4.0);
    assert_eq!(eval_number("return 7 % 3"), 1.0);
    assert_eq!(eval_number("return -1 % 3"), 2.0);
}

#[test]
fn numeric_literals_evaluate_to_themselves() {
    assert_eq!(eval_number("return 42"), 42.0);
    assert_eq!(eval_number("return 1.5"), 1.5);
    assert_eq!(eval_number("return .5"), 0.5);
    assert_eq!(eval_number("return 0x10"), 16.0);
    assert_eq!(eval_number("return 0xFF"), 255.0);
}

#[test]
fn float_division_follows_ieee() {
    assert!(eval_number("return 1 / 0").is_infinite());
    assert!(eval_number("return -1 / 0").is_infinite());
    assert!(eval_number("return 0 / 0").is_nan());
    // A variable divisor exercises the evaluator rather than the folder.
    assert!(eval_number("local z = 0 return 1 / z").is_infinite());
}

#[test]
fn floor_division_and_modulo_by_zero_fail() {
    assert_failure("return 5 // 0");
    assert_failure("return 5 % 0");
    assert_failure("local z = 0 return 5 // z");
    assert_failure("local z = 0 return 5 % z");
}

#[test]
fn folding_matches_evaluation() {
    // Each pair computes the same expression with literal operands (folded
    // while parsing) and with variable operands (evaluated at runtime).
    let cases = [("return 2 + 3 * 4 ^ 2", "local a, b, c = 2, 3, 4 return a + b * c ^ 2"),
                 ("return 7 // 2", "local a, b = 7, 2 return a // b"),
                 ("return -7 % 3", "local a, b = -7, 3 return a % b"),
                 ("return 5 & 3", "local a, b = 5, 3 return a & b"),
                 ("return 5 | 3", "local a, b = 5, 3 return a | b"),
                 ("return 5 ~ 3", "local a, b = 5, 3 return a ~ b"),
                 ("return 1 << 10", "local a, b = 1, 10 return a << b"),
                 ("return 1024 >> 3", "local a, b = 1024, 3 return a >> b"),
                 ("return 1 << -2", "local a, b = 1, -2 return a << b"),
                 ("return ~7", "local a = 7 return ~a"),
                 ("return -(4)", "local a = 4 return -a"),
                 ("return not nil", "local a = nil return not a"),
                 ("return 1 and 2", "local a, b = 1, 2 return a and b"),
                 ("return nil or 5", "local a = nil return a or 5")];
    for (folded, unfolded) in cases {
        assert_eq!(eval_ok(folded), eval_ok(unfolded), "{folded} vs {unfolded}");
    }
}

#[test]
fn short_circuit_operators_return_operands() {
    assert_eq!(eval_number("return nil or 5"), 5.0);
    assert_eq!(eval_number("return 1 and 2"), 2.0);
    assert_eq!(eval_ok("return false and 3"), Value::Bool(false));
    assert_eq!(eval_ok("local t = nil return t and t.x"), Value::Nil);
    // The right operand must not run when the left decides the result.
    assert_success("local t = nil assert((t and t.missing.field) == nil)");
    assert_success("local f = false assert((f or 7) == 7)");
}

#[test]
fn string_operations() {
    assert_eq!(eval_ok("return \"a\" .. \"b\""), Value::string("ab"));
    assert_eq!(eval_ok("return 'x' .. 'y' .. 'z'"), Value::string("xyz"));
    assert_eq!(eval_number("return #\"hello\""), 5.0);
    assert_success("assert(\"abc\" < \"abd\")");
    assert_success("assert(\"b\" > \"a\")");
    // No implicit number-to-string coercion.
    assert_failure("return \"x\" .. 1");
    assert_failure("return 1 .. 2");
}

#[test]
fn equality_semantics() {
    assert_success("assert(1 == 1.0)");
    assert_success("assert(-0.0 == 0.0)");
    assert_success("assert(1 ~= \"1\")");
    assert_success("assert(nil ~= false)");
    assert_success("local t = {} local u = t assert(t == u)");
    assert_success("assert({} ~= {})");
    assert_success("local f = function() end assert(f == f)");
}

#[test]
fn comparisons_of_mixed_types_fail() {
    assert_failure("return 1 < \"a\"");
    assert_failure("return {} < {}");
    assert_failure("return true < false");
}

#[test]
fn bitwise_operators() {
    assert_eq!(eval_number("local a, b = 12, 10 return a & b"), 8.0);
    assert_eq!(eval_number("local a, b = 12, 10 return a | b"), 14.0);
    assert_eq!(eval_number("local a, b = 12, 10 return a ~ b"), 6.0);
    assert_eq!(eval_number("local a = 0 return ~a"), -1.0);
    assert_eq!(eval_number("local a = 1 return a << 4"), 16.0);
    assert_eq!(eval_number("local a = 256 return a >> 4"), 16.0);
    assert_eq!(eval_number("local a = 1 return a << -2"), 0.0);
    assert_eq!(eval_number("local a = 8 return a >> -2"), 32.0);
    assert_failure("local a = 1.5 return a & 1");
    assert_failure("local a = 1.5 return ~a");
}

#[test]
fn lexical_scoping() {
    assert_eq!(eval_number("local x = 1 do local x = 2 end return x"), 1.0);
    assert_eq!(eval_number("local x = 1 do x = 2 end return x"), 2.0);
    assert_eq!(eval_number("x = 1 local function f() x = 5 end f() return x"),
               5.0);
}

#[test]
fn closures_capture_their_defining_scope() {
    assert_eq!(eval_number("local x = 1 \
                            local function get() return x end \
                            x = 2 \
                            return get()"),
               2.0);
    assert_eq!(eval_number("local function counter() \
                              local n = 0 \
                              return function() n = n + 1 return n end \
                            end \
                            local c = counter() \
                            c() c() \
                            return c()"),
               3.0);
    assert_eq!(eval_number("local function pair() \
                              local n = 0 \
                              local function inc() n = n + 1 end \
                              local function get() return n end \
                              return inc, get \
                            end \
                            local inc, get = pair() \
                            inc() inc() \
                            return get()"),
               2.0);
}

#[test]
fn multi_value_adjustment() {
    assert_eq!(eval_ok("local function f() return 1, 2, 3 end \
                        local a, b = f(), 10 \
                        return a, b").into_values(),
               vec![Value::Number(1.0), Value::Number(10.0)]);
    assert_eq!(eval_ok("local function f() return 1, 2, 3 end \
                        local a, b, c = f() \
                        return a, b, c").into_values(),
               vec![Value::Number(1.0), Value::Number(2.0), Value::Number(3.0)]);
    assert_eq!(eval_number("local function f() return 1, 2, 3 end \
                            local t = {f()} \
                            return #t"),
               3.0);
    assert_eq!(eval_number("local function f() return 1, 2, 3 end \
                            local t = {f(), 10} \
                            return #t"),
               2.0);
    assert_eq!(eval_ok("local a, b, c = 1 return b, c").into_values(),
               vec![Value::Nil, Value::Nil]);
}

#[test]
fn varargs() {
    assert_eq!(eval_number("local function f(...) \
                              local a, b = ... \
                              return a + b \
                            end \
                            return f(3, 4)"),
               7.0);
    assert_eq!(eval_number("local function f(first, ...) \
                              local rest = {...} \
                              return first + #rest \
                            end \
                            return f(1, 10, 20, 30)"),
               4.0);
    assert_eq!(eval_number("local function f(...) return ... end \
                            local t = {f(5, 6, 7)} \
                            return #t"),
               3.0);
    assert_failure("return ...");
    assert_failure("local function f() return ... end return f()");
}

#[test]
fn tables_and_keys() {
    assert_eq!(eval_number("local t = {10, x = 20, [5] = 30, 40} \
                            return t[1] + t.x + t[5] + t[2]"),
               100.0);
    assert_eq!(eval_number("return #{1, 2, 3}"), 3.0);
    // Integer-looking floats and their plain form are the same key.
    assert_eq!(eval_ok("local t = {} t[1] = \"a\" return t[1.0]"),
               Value::string("a"));
    assert_eq!(eval_ok("local t = {} t[true] = \"yes\" return t[true]"),
               Value::string("yes"));
    assert_eq!(eval_ok("local t = {} return t.missing"), Value::Nil);
    assert_failure("local t = {} t[nil] = 1");
    assert_failure("local t = {} t[0 / 0] = 1");
    // Separators: both ',' and ';', with an optional trailing one.
    assert_eq!(eval_number("local t = {1; 2, 3;} return #t"), 3.0);
}

#[test]
fn assignment_forms() {
    assert_eq!(eval_number("local t = {} t.a, t.b = 1, 2 return t.a + t.b"),
               3.0);
    assert_eq!(eval_number("local t = {} t[1], t[2] = 10, 20 \
                            return t[1] + t[2]"),
               30.0);
    assert_eq!(eval_ok("local a, b = 1, 2 a, b = b, a return a, b").into_values(),
               vec![Value::Number(2.0), Value::Number(1.0)]);
    assert_eq!(eval_ok("local a = 1 a = nil return a"), Value::Nil);
    assert_failure("f() = 1");
    assert_failure("1 = 2");
}

#[test]
fn function_declarations() {
    assert_eq!(eval_number("function fact(n) \
                              if n <= 1 then return 1 \
                              else return n * fact(n - 1) end \
                            end \
                            return fact(5)"),
               120.0);
    assert_eq!(eval_number("local function fib(n) \
                              if n < 2 then return n end \
                              return fib(n - 1) + fib(n - 2) \
                            end \
                            return fib(10)"),
               55.0);
    assert_eq!(eval_number("local t = {} \
                            t.inner = {} \
                            function t.inner.f() return 7 end \
                            return t.inner.f()"),
               7.0);
    assert_eq!(eval_number("local obj = {value = 2} \
                            function obj.double(x) return x * 2 end \
                            return obj.double(obj.value)"),
               4.0);
    assert_failure("function missing.f() end");
}

#[test]
fn method_calls() {
    assert_eq!(eval_number("local t = {} \
                            function t:add(x) return self.x + x end \
                            t.x = 10 \
                            return t:add(5)"),
               15.0);
    assert_failure("local t = {} return t:missing()");
    assert_failure("local n = 5 return n:anything()");
}

#[test]
fn call_argument_forms() {
    assert_eq!(eval_number("local function g(t) return t.x end return g{x = 9}"),
               9.0);
    assert_eq!(eval_number("local function h(s) return #s end return h \"hello\""),
               5.0);
    assert_success("print \"hi\"");
    assert_success("print(1, \"a\", nil, true, {}, print)");
}

#[test]
fn while_loops_and_break() {
    assert_eq!(eval_number("local s = 0 \
                            local i = 0 \
                            while true do \
                              i = i + 1 \
                              if i > 4 then break end \
                              s = s + i \
                            end \
                            return s"),
               10.0);
    assert_eq!(eval_number("while true do while true do break end return 1 end"),
               1.0);
    assert_failure("break");
}

#[test]
fn repeat_condition_sees_body_locals() {
    assert_eq!(eval_number("local i = 0 \
                            repeat \
                              i = i + 1 \
                              local done = i == 3 \
                            until done \
                            return i"),
               3.0);
}

#[test]
fn numeric_for_loops() {
    assert_eq!(eval_number("local s = 0 for i = 1, 10 do s = s + i end return s"),
               55.0);
    assert_eq!(eval_number("local s = 0 for i = 10, 1, -3 do s = s + i end return s"),
               22.0);
    assert_eq!(eval_number("local s = 0 for i = 3, 1 do s = s + 1 end return s"),
               0.0);
    // The induction variable is per-iteration and does not leak.
    assert_eq!(eval_ok("for i = 1, 3 do end return i"), Value::Nil);
    assert_failure("for i = 1, 10, 0 do end");
    assert_failure("for i = \"a\", 10 do end");
}

#[test]
fn generic_for_follows_the_iterator_protocol() {
    assert_eq!(eval_number("local function range(n) \
                              local function iter(state, control) \
                                if control < state then return control + 1 end \
                              end \
                              return iter, n, 0 \
                            end \
                            local s = 0 \
                            for i in range(4) do s = s + i end \
                            return s"),
               10.0);
    assert_eq!(eval_ok("local function iter(state, control) \
                          if control < 3 then \
                            return control + 1, (control + 1) * 10 \
                          end \
                        end \
                        local ks, vs = 0, 0 \
                        for k, v in iter, 3, 0 do \
                          ks = ks + k \
                          vs = vs + v \
                        end \
                        return ks, vs").into_values(),
               vec![Value::Number(6.0), Value::Number(60.0)]);
    assert_failure("for x in 5 do end");
}

#[test]
fn goto_and_labels() {
    assert_eq!(eval_number("local i = 0 \
                            ::top:: \
                            i = i + 1 \
                            if i < 3 then goto top end \
                            return i"),
               3.0);
    assert_eq!(eval_ok("local t = {} \
                        for i = 1, 3 do \
                          if i == 2 then goto skip end \
                          t[i] = i \
                          ::skip:: \
                        end \
                        return t[1], t[2], t[3]").into_values(),
               vec![Value::Number(1.0), Value::Nil, Value::Number(3.0)]);
    assert_failure("goto nowhere");
    assert_failure("do goto out end");
}

#[test]
fn returns_terminate_evaluation() {
    assert_eq!(eval_number("do return 1 end return 2"), 1.0);
    assert_eq!(eval_ok("return"), Value::Multi(Vec::new().into()));
    assert_eq!(eval_ok("local x = 1"), Value::Nil);
}

#[test]
fn assert_builtin() {
    assert_eq!(eval_number("return assert(42)"), 42.0);
    assert_success("assert(0)");
    assert_success("assert(\"\")");
    assert_failure("assert(false)");
    assert_failure("assert(nil, \"custom message\")");
    assert_failure("assert(1 == 2)");
}

#[test]
fn type_errors() {
    assert_failure("return {} + 1");
    assert_failure("return #5");
    assert_failure("return -{}");
    assert_failure("local t = {} return t.x.y");
    assert_failure("local x return x()");
    assert_failure("local n = 5 return n[1]");
}

#[test]
fn parse_errors() {
    assert_failure("return 1 +");
    assert_failure("while true do");
    assert_failure("local = 5");
    assert_failure("if x then end end");
    assert_failure("return 1.2.3");
    assert_failure("local t = {1, 2");
    assert_failure("function () end");
}
