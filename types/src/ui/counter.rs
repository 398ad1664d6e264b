/// Demo counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counter {
    count: i64,
}

impl Counter {
    #[must_use]
    pub const fn count(self) -> i64 {
        self.count
    }

    pub fn increment(&mut self) {
        self.count = self.count.saturating_add(1);
    }

    pub fn decrement(&mut self) {
        self.count = self.count.saturating_sub(1);
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::Counter;

    #[test]
    fn counts_up_down_and_resets() {
        let mut counter = Counter::default();
        counter.increment();
        counter.increment();
        counter.decrement();
        assert_eq!(counter.count(), 1);
        counter.decrement();
        counter.decrement();
        assert_eq!(counter.count(), -1);
        counter.reset();
        assert_eq!(counter.count(), 0);
    }
}
