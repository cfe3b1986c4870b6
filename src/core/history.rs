//! Rolling latency history shared by the sampler and the chart

use std::collections::VecDeque;

pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// One successful probe, tagged with the tick it was taken on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryEntry {
    pub index: u64,
    pub latency_ms: f64,
}

/// Bounded FIFO of successful latency measurements.
///
/// Every tick advances the index counter, whether or not the probe succeeded,
/// so gaps in [`indices`](Self::indices) mark ticks where the probe failed.
#[derive(Debug, Clone)]
pub struct LatencyHistory {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
    last_index: u64,
}

impl Default for LatencyHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl LatencyHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            last_index: 0,
        }
    }

    /// Account for one tick. Returns the index assigned to it.
    pub fn record(&mut self, latency_ms: Option<f64>) -> u64 {
        self.last_index += 1;
        let index = self.last_index;

        if let Some(latency_ms) = latency_ms {
            if self.entries.len() == self.capacity {
                self.entries.pop_front();
            }
            self.entries.push_back(HistoryEntry { index, latency_ms });
        }

        index
    }

    pub fn append(&mut self, latency_ms: f64) -> u64 {
        self.record(Some(latency_ms))
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> + '_ {
        self.entries.iter()
    }

    pub fn values(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.latency_ms).collect()
    }

    pub fn indices(&self) -> Vec<u64> {
        self.entries.iter().map(|e| e.index).collect()
    }

    /// Most recent successful probe.
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    pub fn max_latency(&self) -> Option<f64> {
        self.entries
            .iter()
            .map(|e| e.latency_ms)
            .fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.max(v))))
    }

    /// Index handed out by the most recent tick, 0 before the first one.
    pub fn last_index(&self) -> u64 {
        self.last_index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn keeps_only_the_last_ten_of_fifteen() {
        let mut history = LatencyHistory::default();
        for i in 1..=15 {
            history.append(i as f64);
        }

        assert_eq!(history.len(), 10);
        assert_eq!(history.indices(), (6..=15).collect::<Vec<u64>>());
        assert_eq!(
            history.values(),
            (6..=15).map(|i| i as f64).collect::<Vec<f64>>()
        );
    }

    #[test]
    fn never_exceeds_capacity() {
        let mut history = LatencyHistory::new(3);
        for i in 0..50 {
            let sample = if i % 4 == 0 { None } else { Some(i as f64) };
            history.record(sample);
            assert!(history.len() <= 3);
        }
    }

    #[test]
    fn failed_ticks_leave_gaps_in_indices() {
        let mut history = LatencyHistory::default();
        history.record(Some(10.0));
        history.record(None);
        history.record(None);
        history.record(Some(12.0));

        assert_eq!(history.indices(), vec![1, 4]);
        assert_eq!(history.last_index(), 4);
    }

    #[test]
    fn latest_is_the_newest_success() {
        let mut history = LatencyHistory::new(2);
        assert_eq!(history.latest(), None);

        history.record(Some(8.0));
        history.record(Some(9.5));
        history.record(None);

        assert_eq!(
            history.latest(),
            Some(&HistoryEntry {
                index: 2,
                latency_ms: 9.5
            })
        );
    }

    #[test]
    fn indices_strictly_increase() {
        let mut history = LatencyHistory::new(5);
        let mut previous = 0;
        for i in 0..30 {
            let sample = if i % 3 == 1 { None } else { Some(1.5) };
            let index = history.record(sample);
            assert!(index > previous);
            previous = index;
        }

        let indices = history.indices();
        assert!(indices.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn zero_latency_is_recorded() {
        let mut history = LatencyHistory::default();
        history.append(0.0);

        assert_eq!(history.len(), 1);
        assert_eq!(history.max_latency(), Some(0.0));
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let mut history = LatencyHistory::new(0);
        history.append(1.0);
        history.append(2.0);

        assert_eq!(history.capacity(), 1);
        assert_eq!(history.values(), vec![2.0]);
    }

    #[test]
    fn max_latency_of_empty_history_is_none() {
        let history = LatencyHistory::default();
        assert_eq!(history.max_latency(), None);
        assert!(history.values().is_empty());
    }
}
