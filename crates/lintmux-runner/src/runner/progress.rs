//! Per-run progress state.
//!
//! One slot per analyzer, advanced by a companion ticker thread for
//! cosmetic effect and completed by the worker when results arrive.
//! Progress is advisory: every operation here is infallible and a poisoned
//! lock is simply ignored, so progress can never affect the correctness of
//! returned results.

use std::sync::Mutex;

/// Ticker advancement saturates here; only result arrival reaches 100.
const TICK_CEILING: u8 = 95;

/// A point-in-time view of one analyzer's progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolProgress {
    pub tool_id: String,
    /// 0–100.
    pub percent: u8,
    pub done: bool,
}

/// Progress slots for one run, one per analyzer. Owned by the run context
/// and shared by reference with the workers and tickers — never global.
#[derive(Debug)]
pub struct ProgressBoard {
    slots: Mutex<Vec<ToolProgress>>,
}

impl ProgressBoard {
    pub fn for_tools<I, S>(tool_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let slots = tool_ids
            .into_iter()
            .map(|id| ToolProgress {
                tool_id: id.into(),
                percent: 0,
                done: false,
            })
            .collect();
        Self {
            slots: Mutex::new(slots),
        }
    }

    /// Advance one analyzer's slot by a tick, saturating below 100.
    pub fn advance(&self, index: usize) {
        let Ok(mut slots) = self.slots.lock() else {
            return;
        };
        if let Some(slot) = slots.get_mut(index) {
            if !slot.done && slot.percent < TICK_CEILING {
                slot.percent += 1;
            }
        }
    }

    /// Complete one analyzer's slot to 100%.
    pub fn complete(&self, index: usize) {
        let Ok(mut slots) = self.slots.lock() else {
            return;
        };
        if let Some(slot) = slots.get_mut(index) {
            slot.percent = 100;
            slot.done = true;
        }
    }

    /// Snapshot of every slot, in analyzer order.
    pub fn snapshot(&self) -> Vec<ToolProgress> {
        self.slots
            .lock()
            .map(|slots| slots.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.slots.lock().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_saturates_below_complete() {
        let board = ProgressBoard::for_tools(["toolx"]);
        for _ in 0..500 {
            board.advance(0);
        }
        let snap = board.snapshot();
        assert_eq!(snap[0].percent, TICK_CEILING);
        assert!(!snap[0].done);
    }

    #[test]
    fn complete_wins_over_later_ticks() {
        let board = ProgressBoard::for_tools(["toolx"]);
        board.complete(0);
        board.advance(0);
        let snap = board.snapshot();
        assert_eq!(snap[0].percent, 100);
        assert!(snap[0].done);
    }

    #[test]
    fn out_of_range_index_is_ignored() {
        let board = ProgressBoard::for_tools(["toolx"]);
        board.advance(5);
        board.complete(5);
        assert_eq!(board.snapshot().len(), 1);
    }
}
