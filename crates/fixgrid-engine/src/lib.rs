//! fixgrid_engine - Spreadsheet formula engine.
//!
//! Formulas are evaluated by rewriting their text until it stops changing:
//! ranges and references become numbers, lists are unwrapped, arithmetic is
//! reduced and built-in calls are replaced by their results.

pub mod builtins;
pub mod engine;
pub mod error;

pub use error::{EngineError, Result};

#[cfg(test)]
mod tests {
    use crate::engine::*;
    use proptest::prelude::*;

    fn sample_snapshot() -> Snapshot {
        [("A1", "2"), ("B1", "3"), ("A2", "text"), ("C3", "-1.5"), ("J99", "")]
            .into_iter()
            .map(|(id, value)| Cell::new(CellRef::from_str(id).unwrap(), value))
            .collect()
    }

    #[test]
    fn test_end_to_end_sum_times_two() {
        assert_eq!(evaluate("sum(A1:B1)*2", &sample_snapshot()), "10");
    }

    #[test]
    fn test_mixed_references_and_functions() {
        let snap = sample_snapshot();
        assert_eq!(evaluate("A1*B1+C3", &snap), "4.5");
        assert_eq!(evaluate("increment(A1:C3)", &snap), "3,4,-0.5");
        assert_eq!(evaluate("median(A1:J99)+A2", &snap), "2");
    }

    #[test]
    fn test_case_insensitive_names_and_refs() {
        assert_eq!(evaluate("SUM(a1:b1)", &sample_snapshot()), "5");
    }

    proptest! {
        #[test]
        fn prop_evaluation_is_idempotent(formula in "[0-9A-Ja-j+*/:(),.-]{0,16}") {
            let snap = sample_snapshot();
            let once = evaluate(&formula, &snap);
            prop_assert_eq!(evaluate(&once, &snap), once);
        }

        #[test]
        fn prop_multiplication_binds_tighter(a in 0i64..1000, b in 0i64..1000, c in 0i64..1000) {
            let snap = Snapshot::new();
            prop_assert_eq!(evaluate(&format!("{a}+{b}*{c}"), &snap), (a + b * c).to_string());
            prop_assert_eq!(evaluate(&format!("{a}-{b}*{c}"), &snap), (a - b * c).to_string());
        }
    }
}
