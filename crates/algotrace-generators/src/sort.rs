//! Bubble sort.

use algotrace_core::{ArrayMark, ArraySnapshot, StepKind, Trace, TraceRecorder};

/// Classic bubble sort with every pass run to completion.
///
/// Each adjacent pair gets a compare step, followed by a swap step when the
/// pair is out of order. A sorted step closes each pass and marks the index
/// that pass settled. Only strictly greater left values are swapped, so equal
/// values keep their order.
pub fn bubble_sort(values: &[i64]) -> Trace<ArraySnapshot> {
    let n = values.len();
    let mut rec = TraceRecorder::start(ArraySnapshot::new(values), format!("Bubble sort {} values", n));
    let mut working = values.to_vec();

    for pass in 0..n.saturating_sub(1) {
        let last = n - 1 - pass;
        for j in 0..last {
            let (a, b) = (working[j], working[j + 1]);
            rec.emit_with(
                StepKind::Compare,
                format!("Compare arr[{}] = {} with arr[{}] = {}", j, a, j + 1, b),
                |s| {
                    s.clear_transient();
                    s.marks[j] = ArrayMark::Comparing;
                    s.marks[j + 1] = ArrayMark::Comparing;
                    s.probe = Some(j);
                    s.comparisons += 1;
                },
            );
            if a > b {
                working.swap(j, j + 1);
                rec.emit_with(
                    StepKind::Swap,
                    format!("{} > {}: swap", a, b),
                    |s| {
                        s.values.swap(j, j + 1);
                        s.marks[j] = ArrayMark::Swapping;
                        s.marks[j + 1] = ArrayMark::Swapping;
                        s.swaps += 1;
                    },
                );
            }
        }
        rec.emit_with(
            StepKind::Sorted,
            format!("Pass {} settles index {}", pass + 1, last),
            |s| {
                s.clear_transient();
                s.marks[last] = ArrayMark::Sorted;
                s.probe = None;
            },
        );
    }

    rec.emit_with(StepKind::Terminal, "Array sorted", |s| {
        s.clear_transient();
        s.marks.iter_mut().for_each(|m| *m = ArrayMark::Sorted);
        s.probe = None;
    });

    let trace = rec.finish();
    tracing::debug!(steps = trace.len(), "bubble sort trace generated");
    trace
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_and_counts_every_pair() {
        let trace = bubble_sort(&[5, 1, 4, 2, 8]);
        let last = trace.last().payload();
        assert_eq!(last.values, vec![1, 2, 4, 5, 8]);
        // n(n-1)/2 comparisons, no early exit
        assert_eq!(trace.count(StepKind::Compare), 10);
        assert_eq!(last.comparisons, 10);
        assert_eq!(trace.count(StepKind::Sorted), 4);
    }

    #[test]
    fn swap_count_equals_inversions() {
        let trace = bubble_sort(&[3, 2, 1]);
        assert_eq!(trace.count(StepKind::Swap), 3);
        assert_eq!(trace.last().payload().swaps, 3);
    }

    #[test]
    fn sorted_input_still_runs_every_pass() {
        let trace = bubble_sort(&[1, 2, 3, 4]);
        assert_eq!(trace.count(StepKind::Compare), 6);
        assert_eq!(trace.count(StepKind::Swap), 0);
    }

    #[test]
    fn equal_values_are_never_swapped() {
        let trace = bubble_sort(&[2, 2, 2]);
        assert_eq!(trace.count(StepKind::Swap), 0);
    }

    #[test]
    fn pass_marks_rightmost_settled_index() {
        let trace = bubble_sort(&[4, 3, 2, 1]);
        let settled: Vec<_> = trace
            .iter()
            .filter(|s| s.kind() == StepKind::Sorted)
            .map(|s| s.payload().marked(ArrayMark::Sorted))
            .collect();
        assert_eq!(settled, vec![vec![3], vec![2, 3], vec![1, 2, 3]]);
    }

    #[test]
    fn single_value_is_trivially_sorted() {
        let trace = bubble_sort(&[7]);
        assert_eq!(trace.len(), 2);
        assert_eq!(trace.last().payload().marks, vec![ArrayMark::Sorted]);
    }
}
