//! Example combinators, predicates and transforms
//!
//! These are the functions the demo diagrams are drawn with, plus a small name
//! registry so scenario files can refer to them as strings (`"f"`, `"even"`,
//! `"times:3"`).

use crate::operators::{Combinator, Predicate, Transform};
use crate::types::{EngineError, Result, Value};
use std::sync::Arc;

/// Combinator that renders its arguments symbolically, e.g. `f(a,x)`
pub fn generic(name: &str, sep: &str) -> Combinator {
    let name = name.to_string();
    let sep = sep.to_string();
    Arc::new(move |args: &[Value]| {
        let parts: Vec<String> = args.iter().map(|v| v.to_string()).collect();
        Value::Text(format!("{}({})", name, parts.join(&sep)))
    })
}

pub fn f() -> Combinator {
    generic("f", ",")
}

pub fn g() -> Combinator {
    generic("g", ",")
}

pub fn h() -> Combinator {
    generic("h", ",")
}

/// Numeric sum; stays integral while every argument is an integer
pub fn sum(values: &[Value]) -> Value {
    let all_integers = values.iter().all(|v| matches!(v, Value::Integer(_)));
    if all_integers {
        let total = values
            .iter()
            .filter_map(Value::as_i64)
            .try_fold(0i64, |acc, v| acc.checked_add(v));
        if let Some(total) = total {
            return Value::Integer(total);
        }
    }
    Value::Float(values.iter().map(Value::as_f64).sum())
}

/// Arithmetic mean; NaN for an empty list or non-numeric values
pub fn average(values: &[Value]) -> Value {
    let total: f64 = values.iter().map(Value::as_f64).sum();
    Value::Float(total / values.len() as f64)
}

/// Concatenation of the displayed values
pub fn concat(values: &[Value]) -> Value {
    Value::Text(values.iter().map(|v| v.to_string()).collect())
}

/// `n % 2 == 1`
pub fn odd(value: &Value) -> bool {
    value.as_f64() % 2.0 == 1.0
}

/// `n % 2 == 0`
pub fn even(value: &Value) -> bool {
    value.as_f64() % 2.0 == 0.0
}

pub fn identity(value: &Value) -> Value {
    value.clone()
}

/// Transform multiplying by `c`
///
/// Integers stay integers while the product fits in `i64`.
pub fn times(c: f64) -> Transform {
    // i64::MAX as f64 rounds up to 2^63, hence the strict bound
    let factor = (c.fract() == 0.0 && c >= i64::MIN as f64 && c < i64::MAX as f64).then_some(c as i64);
    Arc::new(move |value: &Value| match (value, factor) {
        (Value::Integer(v), Some(k)) => v
            .checked_mul(k)
            .map(Value::Integer)
            .unwrap_or_else(|| Value::Float(c * *v as f64)),
        (other, _) => Value::Float(c * other.as_f64()),
    })
}

/// Use a combinator as a single-argument transform (`f` maps `a` to `f(a)`)
pub fn unary(combinator: Combinator) -> Transform {
    Arc::new(move |value: &Value| combinator(std::slice::from_ref(value)))
}

/// Look up a combinator by name
pub fn combinator(name: &str) -> Result<Combinator> {
    match name {
        "f" => Ok(f()),
        "g" => Ok(g()),
        "h" => Ok(h()),
        "sum" => Ok(Arc::new(sum)),
        "average" => Ok(Arc::new(average)),
        "concat" => Ok(Arc::new(concat)),
        _ => Err(EngineError::UnknownFunction(name.to_string())),
    }
}

/// Look up a predicate by name
pub fn predicate(name: &str) -> Result<Predicate> {
    match name {
        "odd" => Ok(Arc::new(odd)),
        "even" => Ok(Arc::new(even)),
        "always" | "true" => Ok(Arc::new(|_: &Value| true)),
        "never" | "false" => Ok(Arc::new(|_: &Value| false)),
        _ => Err(EngineError::UnknownFunction(name.to_string())),
    }
}

/// Look up a transform by name
///
/// Accepts `identity`, `times:<factor>`, or any combinator name applied to a
/// single argument.
pub fn transform(name: &str) -> Result<Transform> {
    if name == "identity" {
        return Ok(Arc::new(identity));
    }
    if let Some(factor) = name.strip_prefix("times:") {
        let c: f64 = factor
            .trim()
            .parse()
            .map_err(|_| EngineError::UnknownFunction(name.to_string()))?;
        return Ok(times(c));
    }
    combinator(name).map(unary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic() {
        let f = f();
        assert_eq!(f(&[Value::from("a"), Value::from("x")]), Value::from("f(a,x)"));
        assert_eq!(f(&[Value::from("a")]), Value::from("f(a)"));

        let pipe = generic("k", " | ");
        assert_eq!(pipe(&[Value::from(1), Value::from(2)]), Value::from("k(1 | 2)"));
    }

    #[test]
    fn test_sum_and_average() {
        let ints = [Value::from(20), Value::from(30), Value::from(70)];
        assert_eq!(sum(&ints), Value::Integer(120));
        assert_eq!(average(&ints), Value::Float(40.0));

        assert_eq!(sum(&[Value::from(1), Value::from(0.5)]), Value::Float(1.5));
        assert!(average(&[]).as_f64().is_nan());
        assert!(average(&[Value::from("a")]).as_f64().is_nan());
    }

    #[test]
    fn test_concat() {
        assert_eq!(concat(&[Value::from("a"), Value::from(1)]), Value::from("a1"));
    }

    #[test]
    fn test_parity() {
        assert!(even(&Value::from(4)));
        assert!(!even(&Value::from(3)));
        assert!(odd(&Value::from(3)));
        assert!(!odd(&Value::from(-3)));
        assert!(!odd(&Value::from("3")));
    }

    #[test]
    fn test_times() {
        let triple = times(3.0);
        assert_eq!(triple(&Value::from(2)), Value::Integer(6));
        assert_eq!(triple(&Value::from(0.5)), Value::Float(1.5));

        let half = times(0.5);
        assert_eq!(half(&Value::from(3)), Value::Float(1.5));
    }

    #[test]
    fn test_times_overflow_falls_back_to_float() {
        let huge = transform("times:1e18").unwrap();
        assert_eq!(huge(&Value::from(2)), Value::Integer(2_000_000_000_000_000_000));
        assert_eq!(huge(&Value::from(100)), Value::Float(1e20));

        // Factor itself does not fit in i64
        let beyond = times(1e19);
        assert_eq!(beyond(&Value::from(1)), Value::Float(1e19));
        assert_eq!(times(-1.0)(&Value::from(i64::MIN)), Value::Float(-(i64::MIN as f64)));
    }

    #[test]
    fn test_registry() {
        assert!(combinator("f").is_ok());
        assert!(predicate("even").is_ok());
        assert!(transform("identity").is_ok());

        let triple = transform("times:3").unwrap();
        assert_eq!(triple(&Value::from(5)), Value::Integer(15));

        let f_of = transform("f").unwrap();
        assert_eq!(f_of(&Value::from("b")), Value::from("f(b)"));

        assert_eq!(
            combinator("nope").err(),
            Some(EngineError::UnknownFunction("nope".to_string()))
        );
        assert!(transform("times:x").is_err());
    }
}
