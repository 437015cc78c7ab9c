//! Formula evaluation by rewriting to a fixed point.
//!
//! A single pass runs every stage once, in this order:
//!
//! 1. expand ranges (`A1:B2` → `[1,2,3,4]`)
//! 2. resolve single references (`B7` → `4`)
//! 3. unwrap lists (`[1,2]` → `1,2`)
//! 4. reduce arithmetic (`*`/`/`, then `+`/`-`)
//! 5. resolve one function call
//!
//! Passes repeat until one leaves the text unchanged. Text that no stage can
//! simplify (an unknown function, a stray name) is returned as the result.

use tracing::{debug, trace};

use super::Snapshot;
use super::arith::reduce_arithmetic;
use super::refs::{expand_ranges, resolve_references, unwrap_lists};
use crate::builtins::dispatch_call;
use crate::error::{EngineError, Result};

/// Default cap on the number of passes before evaluation gives up.
pub const DEFAULT_MAX_PASSES: usize = 10_000;

/// Text shown in place of a result when evaluation fails outright.
pub const ERROR_MARKER: &str = "#ERROR!";

/// Knobs for [`try_evaluate_with`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalOptions {
    pub max_passes: usize,
}

impl Default for EvalOptions {
    fn default() -> Self {
        EvalOptions {
            max_passes: DEFAULT_MAX_PASSES,
        }
    }
}

/// Run every stage once over `formula`.
pub fn eval_pass(formula: &str, snapshot: &Snapshot) -> Result<String> {
    let text = expand_ranges(formula, snapshot);
    let text = resolve_references(&text, snapshot);
    let text = unwrap_lists(&text);
    let text = reduce_arithmetic(&text);
    let text = dispatch_call(&text)?;
    if text != formula {
        trace!(from = formula, to = text.as_str(), "pass rewrote formula");
    }
    Ok(text)
}

/// Evaluate a formula (without its leading `=`) with default options.
pub fn try_evaluate(formula: &str, snapshot: &Snapshot) -> Result<String> {
    try_evaluate_with(formula, snapshot, &EvalOptions::default())
}

/// Evaluate a formula, failing when it has not settled after `max_passes`
/// passes or a built-in rejects its arguments.
pub fn try_evaluate_with(
    formula: &str,
    snapshot: &Snapshot,
    options: &EvalOptions,
) -> Result<String> {
    let mut current = formula.to_string();
    for pass in 1..=options.max_passes {
        let next = eval_pass(&current, snapshot)?;
        if next == current {
            debug!(formula, result = next.as_str(), passes = pass, "formula settled");
            return Ok(next);
        }
        current = next;
    }
    Err(EngineError::Diverged {
        passes: options.max_passes,
    })
}

/// Evaluate a formula with default options, returning [`ERROR_MARKER`] on a
/// hard failure.
pub fn evaluate(formula: &str, snapshot: &Snapshot) -> String {
    evaluate_or(formula, snapshot, &EvalOptions::default(), ERROR_MARKER)
}

/// Evaluate a formula, returning `error_marker` on a hard failure.
pub fn evaluate_or(
    formula: &str,
    snapshot: &Snapshot,
    options: &EvalOptions,
    error_marker: &str,
) -> String {
    match try_evaluate_with(formula, snapshot, options) {
        Ok(result) => result,
        Err(e) => {
            debug!(formula, error = %e, "formula failed");
            error_marker.to_string()
        }
    }
}
