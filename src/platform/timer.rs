//! One-shot timers on a virtual clock

/// Timers ordered by due time, then by scheduling order
#[derive(Debug)]
pub struct TimerQueue<T> {
    entries: Vec<(f64, u64, T)>,
    next_seq: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_seq: 0,
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `value` once the clock reaches `due_ms`
    pub fn schedule(&mut self, due_ms: f64, value: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        let at = self
            .entries
            .iter()
            .position(|(due, s, _)| (*due, *s) > (due_ms, seq))
            .unwrap_or(self.entries.len());
        self.entries.insert(at, (due_ms, seq, value));
    }

    /// Remove and return every timer due at `now_ms`, earliest first
    pub fn pop_due(&mut self, now_ms: f64) -> Vec<T> {
        let split = self
            .entries
            .iter()
            .position(|(due, _, _)| *due > now_ms)
            .unwrap_or(self.entries.len());
        self.entries.drain(..split).map(|(_, _, v)| v).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
