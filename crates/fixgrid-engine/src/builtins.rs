//! Built-in spreadsheet functions and the call dispatcher.
//!
//! Conventions:
//! - Function names are matched case-insensitively (`SUM(...)` == `sum(...)`).
//! - Every built-in takes the call's numeric argument list and returns a
//!   [`Value`]; the result is written back into the formula as text.
//! - If you add a new built-in, append it to `BUILTINS`; the dispatcher picks
//!   it up from there.

use rand::Rng;
use regex::Regex;
use std::sync::OnceLock;
use tracing::trace;

use crate::engine::format::{format_bool, format_list, format_number};
use crate::engine::parse_number;
use crate::error::{EngineError, Result};

/// Upper bound on the number of members `range` will produce.
pub const MAX_RANGE_LEN: usize = 10_000;

/// Result of a built-in call.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Number(f64),
    Bool(bool),
    List(Vec<f64>),
}

impl Value {
    /// Text substituted into the formula in place of the call.
    pub fn render(&self) -> String {
        match self {
            Value::Number(n) => format_number(*n),
            Value::Bool(b) => format_bool(*b),
            Value::List(items) => format!("[{}]", format_list(items)),
        }
    }
}

pub type BuiltinFn = fn(&[f64]) -> Result<Value>;

pub struct Builtin {
    pub name: &'static str,
    pub description: &'static str,
    pub func: BuiltinFn,
}

pub const BUILTINS: &[Builtin] = &[
    Builtin {
        name: "",
        description: "Parenthesized list, returned unchanged",
        func: identity,
    },
    Builtin {
        name: "sum",
        description: "Sum of the arguments",
        func: sum,
    },
    Builtin {
        name: "average",
        description: "Arithmetic mean of the arguments",
        func: average,
    },
    Builtin {
        name: "median",
        description: "Middle value, or the mean of the two middle values",
        func: median,
    },
    Builtin {
        name: "even",
        description: "Only the even arguments",
        func: even,
    },
    Builtin {
        name: "someeven",
        description: "Whether any argument is even",
        func: some_even,
    },
    Builtin {
        name: "everyeven",
        description: "Whether every argument is even",
        func: every_even,
    },
    Builtin {
        name: "firsttwo",
        description: "The first two arguments",
        func: first_two,
    },
    Builtin {
        name: "lasttwo",
        description: "The last two arguments",
        func: last_two,
    },
    Builtin {
        name: "has2",
        description: "Whether the arguments contain 2",
        func: has_two,
    },
    Builtin {
        name: "increment",
        description: "Each argument plus one",
        func: increment,
    },
    Builtin {
        name: "random",
        description: "Random integer in [x, x+y) for arguments x, y",
        func: random,
    },
    Builtin {
        name: "range",
        description: "Ascending integer sequence between the first two arguments",
        func: range,
    },
    Builtin {
        name: "nodupes",
        description: "Arguments with duplicates removed, first occurrences kept",
        func: no_dupes,
    },
];

/// Look up a built-in by name, ignoring case.
pub fn lookup(name: &str) -> Option<&'static Builtin> {
    BUILTINS.iter().find(|b| b.name.eq_ignore_ascii_case(name))
}

fn is_even(n: f64) -> bool {
    n % 2.0 == 0.0
}

fn identity(ns: &[f64]) -> Result<Value> {
    Ok(Value::List(ns.to_vec()))
}

fn sum(ns: &[f64]) -> Result<Value> {
    Ok(Value::Number(ns.iter().sum()))
}

fn average(ns: &[f64]) -> Result<Value> {
    if ns.is_empty() {
        return Ok(Value::Number(0.0));
    }
    Ok(Value::Number(ns.iter().sum::<f64>() / ns.len() as f64))
}

fn median(ns: &[f64]) -> Result<Value> {
    if ns.is_empty() {
        return Ok(Value::Number(0.0));
    }
    let mut sorted = ns.to_vec();
    sorted.sort_by(f64::total_cmp);
    let middle = sorted.len() / 2;
    let value = if sorted.len() % 2 == 0 {
        (sorted[middle - 1] + sorted[middle]) / 2.0
    } else {
        sorted[middle]
    };
    Ok(Value::Number(value))
}

fn even(ns: &[f64]) -> Result<Value> {
    Ok(Value::List(ns.iter().copied().filter(|n| is_even(*n)).collect()))
}

fn some_even(ns: &[f64]) -> Result<Value> {
    Ok(Value::Bool(ns.iter().any(|n| is_even(*n))))
}

fn every_even(ns: &[f64]) -> Result<Value> {
    Ok(Value::Bool(ns.iter().all(|n| is_even(*n))))
}

fn first_two(ns: &[f64]) -> Result<Value> {
    Ok(Value::List(ns.iter().take(2).copied().collect()))
}

fn last_two(ns: &[f64]) -> Result<Value> {
    Ok(Value::List(ns[ns.len().saturating_sub(2)..].to_vec()))
}

fn has_two(ns: &[f64]) -> Result<Value> {
    Ok(Value::Bool(ns.contains(&2.0)))
}

fn increment(ns: &[f64]) -> Result<Value> {
    Ok(Value::List(ns.iter().map(|n| n + 1.0).collect()))
}

fn random(ns: &[f64]) -> Result<Value> {
    let [x, y] = match ns {
        [x, y, ..] => [*x, *y],
        _ => return Ok(Value::Number(f64::NAN)),
    };
    let r: f64 = rand::thread_rng().r#gen();
    Ok(Value::Number((r * y + x).floor()))
}

fn range(ns: &[f64]) -> Result<Value> {
    let invalid = |message: String| EngineError::InvalidArguments {
        function: "range",
        message,
    };
    let [start, end] = match ns {
        [start, end, ..] => [*start, *end],
        _ => return Err(invalid(format!("expected 2 arguments, got {}", ns.len()))),
    };
    if !start.is_finite() || !end.is_finite() {
        return Err(invalid("bounds must be finite".to_string()));
    }
    if start.fract() != 0.0 || end.fract() != 0.0 {
        return Err(invalid(format!("bounds must be integers, got {} and {}", start, end)));
    }

    let (lo, hi) = if start > end { (end, start) } else { (start, end) };
    let span = (hi - lo).floor();
    if span >= MAX_RANGE_LEN as f64 {
        return Err(invalid(format!(
            "range of {} members exceeds {}",
            span + 1.0,
            MAX_RANGE_LEN
        )));
    }

    let members = (0..=span as usize).map(|i| lo + i as f64).collect();
    Ok(Value::List(members))
}

fn no_dupes(ns: &[f64]) -> Result<Value> {
    let mut seen: Vec<f64> = Vec::with_capacity(ns.len());
    for n in ns {
        if !seen.contains(n) {
            seen.push(*n);
        }
    }
    Ok(Value::List(seen))
}

/// Regex that matches a call with a flat argument list, like `sum(1, 2.5)`.
///
/// Captures:
/// - group 1: function name (letters/digits, may be empty)
/// - group 2: argument text
fn call_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"([A-Za-z0-9]*)\(([0-9., \-]*)\)").expect("call regex must compile")
    })
}

/// Split call arguments on commas, dropping entries that are not numbers.
pub fn parse_args(args: &str) -> Vec<f64> {
    args.split(',').filter_map(|a| parse_number(a.trim())).collect()
}

/// Resolve the last flat call, provided no `(` follows it.
///
/// A call to an unknown name is left as it is, and then nothing is resolved
/// by this invocation. At most one call is resolved per invocation.
pub fn dispatch_call(formula: &str) -> Result<String> {
    let Some(caps) = call_re().captures_iter(formula).last() else {
        return Ok(formula.to_string());
    };
    let Some(whole) = caps.get(0) else {
        return Ok(formula.to_string());
    };
    if formula[whole.end()..].contains('(') {
        return Ok(formula.to_string());
    }
    let Some(builtin) = lookup(&caps[1]) else {
        return Ok(formula.to_string());
    };

    let value = (builtin.func)(&parse_args(&caps[2]))?;
    trace!(call = whole.as_str(), result = ?value, "resolved call");

    let mut out = String::with_capacity(formula.len());
    out.push_str(&formula[..whole.start()]);
    out.push_str(&value.render());
    out.push_str(&formula[whole.end()..]);
    Ok(out)
}
