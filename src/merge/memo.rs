/// One stretch of consecutive merged positions, all served by one source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    /// Input position of the sub-collection.
    pub source: usize,
    /// Number of consecutive merged positions it contributed.
    pub len: usize,
}

/// Run-length memo of an incremental merge (the "skip list").
///
/// Records, for every merged position resolved so far, which sub-collection
/// it came from. Consecutive positions from the same source collapse into a
/// single run:
///
/// ```text
/// merged:  a0 a1 b0 a2 c0 c1 c2 b1
/// runs:    (A,2) (B,1) (A,1) (C,3) (B,1)
/// ```
///
/// Invariants:
///   - the run lengths sum to `resolved()`
///   - replaying the runs in order yields exactly the sources the merge
///     picked, so the local offset of a position is the number of earlier
///     positions with the same source
///   - no run is empty, and neighbouring runs never share a source
#[derive(Debug, Default, Clone)]
pub struct RunMemo {
    runs: Vec<Run>,
    resolved: usize,
}

impl RunMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of merged positions covered.
    pub fn resolved(&self) -> usize {
        self.resolved
    }

    /// The runs, in merge order.
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Record that the next merged position came from `source`.
    pub fn push(&mut self, source: usize) {
        match self.runs.last_mut() {
            Some(last) if last.source == source => last.len += 1,
            _ => self.runs.push(Run { source, len: 1 }),
        }
        self.resolved += 1;
    }

    /// Map a merged position to `(source, local offset)`.
    /// Returns None if `index` is not covered yet.
    pub fn locate(&self, index: usize) -> Option<(usize, usize)> {
        let (run_index, run_start) = self.find(index)?;
        let run = self.runs[run_index];
        let before: usize = self.runs[..run_index]
            .iter()
            .filter(|earlier| earlier.source == run.source)
            .map(|earlier| earlier.len)
            .sum();
        Some((run.source, before + (index - run_start)))
    }

    /// Map `(source, local offset)` back to a merged position.
    /// Returns None if that local offset has not been merged yet.
    pub fn global_index(&self, source: usize, local: usize) -> Option<usize> {
        let mut remaining = local;
        let mut skipped = 0;
        for run in &self.runs {
            if run.source == source {
                if remaining < run.len {
                    return Some(skipped + remaining);
                }
                remaining -= run.len;
            }
            skipped += run.len;
        }
        None
    }

    /// Account for the removal of the item at merged position `index`.
    ///
    /// Deleting an item never changes the relative order of the others, so
    /// only the run covering `index` shrinks. Returns the source of that run,
    /// or None if `index` is not covered.
    pub fn shrink_at(&mut self, index: usize) -> Option<usize> {
        let (run_index, _) = self.find(index)?;
        let source = self.runs[run_index].source;
        self.runs[run_index].len -= 1;
        self.resolved -= 1;

        if self.runs[run_index].len == 0 {
            self.runs.remove(run_index);
            // (A,2) (B,0) (A,1) collapses to (A,3)
            if run_index > 0
                && run_index < self.runs.len()
                && self.runs[run_index - 1].source == self.runs[run_index].source
            {
                let next = self.runs.remove(run_index);
                self.runs[run_index - 1].len += next.len;
            }
        }
        Some(source)
    }

    pub fn clear(&mut self) {
        self.runs.clear();
        self.resolved = 0;
    }

    /// Find the run covering `index`: (run position, first merged index of the run).
    fn find(&self, index: usize) -> Option<(usize, usize)> {
        let mut skipped = 0;
        for (i, run) in self.runs.iter().enumerate() {
            if index < skipped + run.len {
                return Some((i, skipped));
            }
            skipped += run.len;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memo_of(sources: &[usize]) -> RunMemo {
        let mut memo = RunMemo::new();
        for &source in sources {
            memo.push(source);
        }
        memo
    }

    #[test]
    fn push_collapses_consecutive_sources() {
        let memo = memo_of(&[0, 0, 1, 0, 2, 2, 2, 1]);
        assert_eq!(
            memo.runs(),
            &[
                Run { source: 0, len: 2 },
                Run { source: 1, len: 1 },
                Run { source: 0, len: 1 },
                Run { source: 2, len: 3 },
                Run { source: 1, len: 1 },
            ]
        );
        assert_eq!(memo.resolved(), 8);
    }

    #[test]
    fn locate_counts_earlier_runs_of_same_source() {
        let memo = memo_of(&[0, 0, 1, 0, 2, 2, 2, 1]);
        assert_eq!(memo.locate(0), Some((0, 0)));
        assert_eq!(memo.locate(3), Some((0, 2)));
        assert_eq!(memo.locate(6), Some((2, 2)));
        assert_eq!(memo.locate(7), Some((1, 1)));
        assert_eq!(memo.locate(8), None);
    }

    #[test]
    fn global_index_inverts_locate() {
        let memo = memo_of(&[0, 0, 1, 0, 2, 2, 2, 1]);
        for index in 0..memo.resolved() {
            let (source, local) = memo.locate(index).unwrap();
            assert_eq!(memo.global_index(source, local), Some(index));
        }
        assert_eq!(memo.global_index(1, 2), None);
        assert_eq!(memo.global_index(3, 0), None);
    }

    #[test]
    fn shrink_drops_empty_run_and_coalesces() {
        let mut memo = memo_of(&[0, 0, 1, 0]);
        assert_eq!(memo.shrink_at(2), Some(1));
        assert_eq!(memo.runs(), &[Run { source: 0, len: 3 }]);
        assert_eq!(memo.resolved(), 3);
    }

    #[test]
    fn shrink_past_end_is_none() {
        let mut memo = memo_of(&[0, 1]);
        assert_eq!(memo.shrink_at(2), None);
        assert_eq!(memo.resolved(), 2);
    }
}
