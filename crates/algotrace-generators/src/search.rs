//! Linear and binary search over a row of integers.

use algotrace_core::{ArrayMark, ArraySnapshot, Result, StepKind, Trace, TraceError, TraceRecorder};

/// Parse a user-typed search target.
pub fn parse_target(input: &str) -> Result<i64> {
    input
        .trim()
        .parse()
        .map_err(|_| TraceError::InvalidTarget(input.to_string()))
}

/// Scan left to right, one compare step per index, stopping at the first match.
pub fn linear_search(values: &[i64], target: i64) -> Trace<ArraySnapshot> {
    let mut rec = TraceRecorder::start(
        ArraySnapshot::with_target(values, target),
        format!("Search {} values for {}", values.len(), target),
    );

    let mut found = None;
    for (i, &value) in values.iter().enumerate() {
        let hit = value == target;
        let description = if hit {
            format!("arr[{}] = {} equals {}: found", i, value, target)
        } else {
            format!("arr[{}] = {} is not {}", i, value, target)
        };
        rec.emit_with(StepKind::Compare, description, |s| {
            for mark in &mut s.marks {
                if *mark == ArrayMark::Comparing {
                    *mark = ArrayMark::Eliminated;
                }
            }
            s.probe = Some(i);
            s.comparisons += 1;
            if hit {
                s.marks[i] = ArrayMark::Found;
                s.found = Some(i);
            } else {
                s.marks[i] = ArrayMark::Comparing;
            }
        });
        if hit {
            found = Some(i);
            break;
        }
    }

    let description = match found {
        Some(i) => format!("Found {} at index {}", target, i),
        None => format!("{} is not in the array", target),
    };
    rec.emit_with(StepKind::Terminal, description, |s| {
        s.probe = None;
        for mark in &mut s.marks {
            if *mark == ArrayMark::Comparing {
                *mark = ArrayMark::Eliminated;
            }
        }
    });

    let trace = rec.finish();
    tracing::debug!(steps = trace.len(), ?found, "linear search trace generated");
    trace
}

/// Halve a sorted bracket until the target is found or the bracket is empty.
///
/// The midpoint is `floor((left + right) / 2)`. Values must be sorted ascending.
pub fn binary_search(values: &[i64], target: i64) -> Result<Trace<ArraySnapshot>> {
    if let Some(i) = values.windows(2).position(|w| w[0] > w[1]) {
        return Err(TraceError::UnsortedInput { index: i + 1 });
    }

    let mut initial = ArraySnapshot::with_target(values, target);
    initial.bracket = (!values.is_empty()).then(|| (0, values.len() - 1));
    let mut rec = TraceRecorder::start(
        initial,
        format!("Binary search {} sorted values for {}", values.len(), target),
    );

    // Half-open [left, end) internally; snapshots show the inclusive bracket.
    let mut left = 0usize;
    let mut end = values.len();
    let mut found = None;

    while left < end {
        let right = end - 1;
        let mid = (left + right) / 2;
        let value = values[mid];
        let hit = value == target;

        let description = if hit {
            format!("Probe mid {} in [{}, {}]: {} found", mid, left, right, value)
        } else {
            format!("Probe mid {} in [{}, {}]: {} vs {}", mid, left, right, value, target)
        };
        rec.emit_with(StepKind::Probe, description, |s| {
            s.clear_transient();
            s.bracket = Some((left, right));
            s.probe = Some(mid);
            s.comparisons += 1;
            s.marks[mid] = if hit { ArrayMark::Found } else { ArrayMark::Comparing };
            if hit {
                s.found = Some(mid);
            }
        });

        if hit {
            found = Some(mid);
            break;
        }

        let (dropped, description) = if value < target {
            let dropped = left..mid + 1;
            left = mid + 1;
            (dropped, format!("{} < {}: discard left half", value, target))
        } else {
            let dropped = mid..end;
            end = mid;
            (dropped, format!("{} > {}: discard right half", value, target))
        };
        rec.emit_with(StepKind::Narrow, description, |s| {
            for i in dropped {
                s.marks[i] = ArrayMark::Eliminated;
            }
            s.bracket = (left < end).then(|| (left, end - 1));
            s.probe = None;
        });
    }

    let description = match found {
        Some(i) => format!("Found {} at index {}", target, i),
        None => format!("{} is not in the array", target),
    };
    rec.emit_with(StepKind::Terminal, description, |s| s.probe = None);

    let trace = rec.finish();
    tracing::debug!(steps = trace.len(), ?found, "binary search trace generated");
    Ok(trace)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probes(trace: &Trace<ArraySnapshot>) -> Vec<usize> {
        trace
            .iter()
            .filter(|s| s.kind() == StepKind::Probe)
            .filter_map(|s| s.payload().probe)
            .collect()
    }

    #[test]
    fn linear_search_stops_at_first_match() {
        let trace = linear_search(&[5, 3, 8, 1, 9], 8);
        assert_eq!(trace.len(), 5);
        assert_eq!(trace.count(StepKind::Compare), 3);

        let third = &trace[3];
        assert_eq!(third.kind(), StepKind::Compare);
        assert_eq!(third.payload().probe, Some(2));
        assert_eq!(third.payload().marks[2], ArrayMark::Found);
        assert_eq!(trace.last().payload().found, Some(2));
    }

    #[test]
    fn linear_search_miss_scans_everything() {
        let trace = linear_search(&[1, 2, 3], 7);
        assert_eq!(trace.count(StepKind::Compare), 3);
        assert_eq!(trace.last().payload().found, None);
        assert_eq!(trace.last().payload().marked(ArrayMark::Eliminated), vec![0, 1, 2]);
    }

    #[test]
    fn linear_search_empty_input_has_initial_and_terminal() {
        let trace = linear_search(&[], 1);
        assert_eq!(trace.len(), 2);
        assert_eq!(trace.last().kind(), StepKind::Terminal);
    }

    #[test]
    fn binary_search_probe_order() {
        let trace = binary_search(&[1, 3, 5, 8, 9, 12, 20], 9).unwrap();
        assert_eq!(probes(&trace), vec![3, 5, 4]);
        assert_eq!(trace.last().payload().found, Some(4));
    }

    #[test]
    fn binary_search_reports_brackets() {
        let trace = binary_search(&[1, 3, 5, 8, 9, 12, 20], 9).unwrap();
        let brackets: Vec<_> = trace
            .iter()
            .filter(|s| s.kind() == StepKind::Probe)
            .map(|s| s.payload().bracket)
            .collect();
        assert_eq!(brackets, vec![Some((0, 6)), Some((4, 6)), Some((4, 4))]);
    }

    #[test]
    fn binary_search_miss_ends_with_empty_bracket() {
        let trace = binary_search(&[1, 3, 5], 4).unwrap();
        assert_eq!(trace.last().payload().found, None);
        assert_eq!(trace.last().payload().bracket, None);
    }

    #[test]
    fn binary_search_rejects_unsorted_values() {
        let err = binary_search(&[1, 5, 3], 3).unwrap_err();
        assert_eq!(err, TraceError::UnsortedInput { index: 2 });
    }

    #[test]
    fn parse_target_rejects_non_numeric_input() {
        assert_eq!(parse_target(" 42 "), Ok(42));
        assert_eq!(
            parse_target("forty"),
            Err(TraceError::InvalidTarget("forty".into()))
        );
    }
}
