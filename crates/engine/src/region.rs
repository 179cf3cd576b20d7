// Chunk: docs/chunks/run_region - Run-length map of checked and unchecked text

//! Run-length map of validity over a document's offset space.
//!
//! The document is covered by maximal runs, each either [`RunState::Checked`]
//! or [`RunState::Unchecked`]. Two invariants always hold:
//!
//! - the run lengths sum to [`RunRegion::len`]
//! - adjacent runs never share a state, and no run is empty
//!
//! Locating an offset walks the runs, so every operation costs
//! O(number of runs), independent of the document length.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Highlighting may be stale or missing.
    Unchecked,
    /// Highlighting is up to date with the text.
    Checked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    len: usize,
    state: RunState,
}

/// A contiguous span of one state, as reported by [`RunRegion::runs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSpan {
    pub offset: usize,
    pub len: usize,
    pub state: RunState,
}

impl RunSpan {
    pub fn end(&self) -> usize {
        self.offset + self.len
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunRegion {
    runs: Vec<Run>,
    len: usize,
}

impl RunRegion {
    pub fn new() -> Self {
        Self::default()
    }

    /// A region of `len` units in a single run of `state`.
    pub fn with_run(len: usize, state: RunState) -> Self {
        let mut region = Self::new();
        region.insert(0, len, state);
        region
    }

    /// Total tracked length.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    pub fn clear(&mut self) {
        self.runs.clear();
        self.len = 0;
    }

    /// Iterates runs in offset order.
    pub fn runs(&self) -> impl Iterator<Item = RunSpan> + '_ {
        let mut offset = 0;
        self.runs.iter().map(move |run| {
            let span = RunSpan {
                offset,
                len: run.len,
                state: run.state,
            };
            offset += run.len;
            span
        })
    }

    /// State of the unit at `offset`, or `None` past the end.
    pub fn state_at(&self, offset: usize) -> Option<RunState> {
        self.runs()
            .find(|span| offset < span.end())
            .map(|span| span.state)
    }

    pub fn is_all_checked(&self) -> bool {
        self.runs.iter().all(|run| run.state == RunState::Checked)
    }

    /// Splices `length` units of `state` in at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset > len()`.
    pub fn insert(&mut self, offset: usize, length: usize, state: RunState) {
        assert!(
            offset <= self.len,
            "insert offset {offset} past region end {}",
            self.len
        );
        if length == 0 {
            return;
        }

        let idx = self.split_at(offset);
        self.runs.insert(idx, Run { len: length, state });
        self.len += length;
        self.coalesce(idx);
    }

    /// Deletes `length` units starting at `offset`.
    ///
    /// A `length` running past the end is clamped; an `offset` at or past the
    /// end is a no-op.
    pub fn remove(&mut self, offset: usize, length: usize) {
        if offset >= self.len {
            return;
        }
        let length = length.min(self.len - offset);
        if length == 0 {
            return;
        }

        let first = self.split_at(offset);
        let last = self.split_at(offset + length);
        self.runs.drain(first..last);
        self.len -= length;
        self.coalesce(first);
    }

    /// Overwrites the state of `length` units starting at `offset`.
    ///
    /// Clamps like [`remove`](Self::remove).
    pub fn replace(&mut self, offset: usize, length: usize, state: RunState) {
        if offset >= self.len {
            return;
        }
        let length = length.min(self.len - offset);
        if length == 0 {
            return;
        }

        self.remove(offset, length);
        self.insert(offset, length, state);
    }

    /// Returns the first maximal unchecked interval intersecting
    /// `[start, len)`, clipped to begin no earlier than `start`.
    pub fn next_unchecked(&self, start: usize) -> Option<(usize, usize)> {
        self.runs()
            .find(|span| span.state == RunState::Unchecked && span.end() > start)
            .map(|span| (span.offset.max(start), span.end()))
    }

    /// Ensures a run boundary at `offset` and returns the index of the run
    /// starting there (`runs.len()` when `offset == len`).
    fn split_at(&mut self, offset: usize) -> usize {
        let mut pos = 0;
        for idx in 0..self.runs.len() {
            let run = self.runs[idx];
            if offset == pos {
                return idx;
            }
            if offset < pos + run.len {
                let head = offset - pos;
                self.runs[idx].len = head;
                self.runs.insert(
                    idx + 1,
                    Run {
                        len: run.len - head,
                        state: run.state,
                    },
                );
                return idx + 1;
            }
            pos += run.len;
        }
        self.runs.len()
    }

    /// Merges the run at `idx` with equal-state neighbours.
    fn coalesce(&mut self, idx: usize) {
        if idx + 1 < self.runs.len() && self.runs[idx].state == self.runs[idx + 1].state {
            self.runs[idx].len += self.runs[idx + 1].len;
            self.runs.remove(idx + 1);
        }
        if idx > 0 && idx < self.runs.len() && self.runs[idx - 1].state == self.runs[idx].state {
            self.runs[idx - 1].len += self.runs[idx].len;
            self.runs.remove(idx);
        }
    }
}

impl fmt::Display for RunRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, span) in self.runs().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            let tag = match span.state {
                RunState::Checked => "C",
                RunState::Unchecked => "U",
            };
            write!(f, "{}:{}", tag, span.len)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use RunState::{Checked, Unchecked};

    fn states(region: &RunRegion) -> Vec<(usize, RunState)> {
        region.runs().map(|s| (s.len, s.state)).collect()
    }

    fn assert_invariants(region: &RunRegion) {
        let total: usize = region.runs().map(|s| s.len).sum();
        assert_eq!(total, region.len(), "run lengths must sum to len in {region}");
        let spans: Vec<RunSpan> = region.runs().collect();
        for pair in spans.windows(2) {
            assert_ne!(pair[0].state, pair[1].state, "adjacent equal runs in {region}");
        }
        assert!(spans.iter().all(|s| s.len > 0), "empty run in {region}");
    }

    // ==================== Insert ====================

    #[test]
    fn test_insert_into_empty() {
        let mut region = RunRegion::new();
        region.insert(0, 11, Unchecked);
        assert_eq!(states(&region), vec![(11, Unchecked)]);
    }

    #[test]
    fn test_insert_zero_length_is_noop() {
        let mut region = RunRegion::with_run(5, Checked);
        region.insert(2, 0, Unchecked);
        assert_eq!(states(&region), vec![(5, Checked)]);
    }

    #[test]
    fn test_insert_splits_run() {
        let mut region = RunRegion::with_run(10, Checked);
        region.insert(4, 3, Unchecked);
        assert_eq!(states(&region), vec![(4, Checked), (3, Unchecked), (6, Checked)]);
        assert_eq!(region.len(), 13);
        assert_invariants(&region);
    }

    #[test]
    fn test_insert_same_state_merges() {
        let mut region = RunRegion::with_run(10, Checked);
        region.insert(4, 3, Checked);
        assert_eq!(states(&region), vec![(13, Checked)]);
    }

    #[test]
    fn test_insert_at_boundary_merges_with_neighbour() {
        let mut region = RunRegion::with_run(4, Checked);
        region.insert(4, 2, Unchecked);
        region.insert(4, 1, Unchecked);
        region.insert(0, 1, Checked);
        assert_eq!(states(&region), vec![(5, Checked), (3, Unchecked)]);
    }

    #[test]
    #[should_panic(expected = "past region end")]
    fn test_insert_past_end_panics() {
        let mut region = RunRegion::with_run(3, Checked);
        region.insert(4, 1, Checked);
    }

    // ==================== Remove ====================

    #[test]
    fn test_remove_middle_rejoins_neighbours() {
        let mut region = RunRegion::with_run(4, Checked);
        region.insert(4, 3, Unchecked);
        region.insert(7, 4, Checked);
        region.remove(3, 5);
        assert_eq!(states(&region), vec![(6, Checked)]);
        assert_invariants(&region);
    }

    #[test]
    fn test_remove_clamps_tail() {
        let mut region = RunRegion::with_run(10, Unchecked);
        region.remove(7, 100);
        assert_eq!(region.len(), 7);
        region.remove(7, 1);
        region.remove(50, 1);
        assert_eq!(region.len(), 7);
    }

    #[test]
    fn test_remove_everything() {
        let mut region = RunRegion::with_run(10, Unchecked);
        region.replace(2, 3, Checked);
        region.remove(0, 10);
        assert!(region.is_empty());
        assert_eq!(region.run_count(), 0);
    }

    // ==================== Replace ====================

    #[test]
    fn test_replace_checks_prefix() {
        let mut region = RunRegion::with_run(11, Unchecked);
        region.replace(0, 5, Checked);
        assert_eq!(states(&region), vec![(5, Checked), (6, Unchecked)]);
        region.replace(5, 6, Checked);
        assert_eq!(states(&region), vec![(11, Checked)]);
    }

    #[test]
    fn test_replace_clamps_and_ignores_out_of_range() {
        let mut region = RunRegion::with_run(5, Checked);
        region.replace(3, 10, Unchecked);
        assert_eq!(states(&region), vec![(3, Checked), (2, Unchecked)]);
        region.replace(5, 1, Unchecked);
        assert_eq!(region.len(), 5);
    }

    // ==================== Queries ====================

    #[test]
    fn test_next_unchecked() {
        let mut region = RunRegion::with_run(20, Checked);
        region.replace(3, 4, Unchecked);
        region.replace(12, 2, Unchecked);

        assert_eq!(region.next_unchecked(0), Some((3, 7)));
        assert_eq!(region.next_unchecked(5), Some((5, 7)));
        assert_eq!(region.next_unchecked(7), Some((12, 14)));
        assert_eq!(region.next_unchecked(14), None);
    }

    #[test]
    fn test_next_unchecked_empty_region() {
        assert_eq!(RunRegion::new().next_unchecked(0), None);
    }

    #[test]
    fn test_state_at() {
        let mut region = RunRegion::with_run(6, Checked);
        region.replace(2, 2, Unchecked);
        assert_eq!(region.state_at(1), Some(Checked));
        assert_eq!(region.state_at(2), Some(Unchecked));
        assert_eq!(region.state_at(4), Some(Checked));
        assert_eq!(region.state_at(6), None);
    }

    #[test]
    fn test_display() {
        let mut region = RunRegion::with_run(6, Checked);
        region.replace(2, 2, Unchecked);
        assert_eq!(region.to_string(), "[C:2, U:2, C:2]");
    }
}
