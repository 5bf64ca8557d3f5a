//! Array payload for search and sort traces.

/// Visual mark on one array slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ArrayMark {
    #[default]
    Default,
    Comparing,
    Swapping,
    Sorted,
    Found,
    /// Ruled out by a search
    Eliminated,
}

/// State of a row of integers at one step.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArraySnapshot {
    pub values: Vec<i64>,
    pub marks: Vec<ArrayMark>,
    /// Inclusive `[left, right]` search bracket
    pub bracket: Option<(usize, usize)>,
    /// Index currently being examined
    pub probe: Option<usize>,
    pub target: Option<i64>,
    pub found: Option<usize>,
    pub comparisons: usize,
    pub swaps: usize,
}

impl ArraySnapshot {
    /// Unmarked snapshot of `values`.
    pub fn new(values: &[i64]) -> Self {
        Self {
            values: values.to_vec(),
            marks: vec![ArrayMark::Default; values.len()],
            ..Self::default()
        }
    }

    /// Snapshot of `values` searched for `target`.
    pub fn with_target(values: &[i64], target: i64) -> Self {
        Self {
            target: Some(target),
            ..Self::new(values)
        }
    }

    /// Return comparing/swapping marks to default. Settled marks stay.
    pub fn clear_transient(&mut self) {
        for mark in &mut self.marks {
            if matches!(mark, ArrayMark::Comparing | ArrayMark::Swapping) {
                *mark = ArrayMark::Default;
            }
        }
    }

    /// Indices carrying a given mark.
    pub fn marked(&self, mark: ArrayMark) -> Vec<usize> {
        self.marks
            .iter()
            .enumerate()
            .filter(|(_, m)| **m == mark)
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_transient_keeps_settled_marks() {
        let mut snap = ArraySnapshot::new(&[1, 2, 3]);
        snap.marks = vec![ArrayMark::Comparing, ArrayMark::Sorted, ArrayMark::Swapping];
        snap.clear_transient();
        assert_eq!(
            snap.marks,
            vec![ArrayMark::Default, ArrayMark::Sorted, ArrayMark::Default]
        );
        assert_eq!(snap.marked(ArrayMark::Sorted), vec![1]);
    }
}
