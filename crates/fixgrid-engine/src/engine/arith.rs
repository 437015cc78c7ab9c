//! Infix arithmetic by repeated leftmost-pair reduction.
//!
//! `*` and `/` are reduced before `+` and `-`. Within a tier the leftmost
//! `number operator number` triple is replaced by its value and the search
//! starts again, which gives left-to-right association. There are no grouping
//! parentheses; those belong to function calls.

use regex::{Captures, Regex};
use std::sync::OnceLock;

use super::format::format_number;

/// Operand pattern. A leading `-` is only taken as a sign when the character
/// before it is not part of a number or name (see the `lead` group).
const OPERAND: &str = r"-?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)";

fn tier_re(ops: &str) -> Regex {
    Regex::new(&format!(
        r"(?<lead>^|[^0-9A-Za-z.])(?<lhs>{OPERAND})(?<op>[{ops}])(?<rhs>{OPERAND})"
    ))
    .expect("arithmetic regex must compile")
}

fn high_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| tier_re(r"*/"))
}

fn low_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| tier_re(r"+\-"))
}

fn apply(lhs: f64, op: &str, rhs: f64) -> f64 {
    match op {
        "+" => lhs + rhs,
        "-" => lhs - rhs,
        "*" => lhs * rhs,
        _ => lhs / rhs,
    }
}

/// Replace the leftmost triple matched by `re`. Returns None when nothing matched.
fn reduce_once(text: &str, re: &Regex) -> Option<String> {
    let caps = re.captures(text)?;
    let (Ok(lhs), Ok(rhs)) = (caps["lhs"].parse::<f64>(), caps["rhs"].parse::<f64>()) else {
        return None;
    };
    let value = apply(lhs, &caps["op"], rhs);
    let replaced = re.replacen(text, 1, |c: &Captures| {
        format!("{}{}", &c["lead"], format_number(value))
    });
    Some(replaced.into_owned())
}

fn reduce_tier(text: &str, re: &Regex) -> String {
    let mut current = text.to_string();
    while let Some(next) = reduce_once(&current, re) {
        current = next;
    }
    current
}

/// Reduce every `*` and `/` pair, leftmost first.
pub fn reduce_high(text: &str) -> String {
    reduce_tier(text, high_re())
}

/// Reduce every `+` and `-` pair, leftmost first.
pub fn reduce_low(text: &str) -> String {
    reduce_tier(text, low_re())
}

/// Reduce all arithmetic: the high-precedence tier, then the low one.
pub fn reduce_arithmetic(text: &str) -> String {
    reduce_low(&reduce_high(text))
}
