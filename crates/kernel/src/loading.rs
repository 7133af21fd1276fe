use std::time::Duration;

/// How long the loading cover stays up after start.
pub const DEFAULT_LOADING_DELAY: Duration = Duration::from_secs(3);

/// One-shot timer that hides the loading cover after a fixed delay.
#[derive(Debug, Clone)]
pub struct LoadingGate {
    delay: Duration,
    loading: bool,
}

impl Default for LoadingGate {
    fn default() -> Self {
        Self::new(DEFAULT_LOADING_DELAY)
    }
}

impl LoadingGate {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            loading: true,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Check the gate against the time since start.
    ///
    /// Returns true only on the call that opens the gate.
    pub fn update(&mut self, elapsed: Duration) -> bool {
        if self.loading && elapsed >= self.delay {
            self.loading = false;
            tracing::info!(delay_ms = self.delay.as_millis() as u64, "loading finished");
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stays_closed_before_delay() {
        let mut gate = LoadingGate::default();
        assert!(!gate.update(Duration::from_millis(2999)));
        assert!(gate.is_loading());
    }

    #[test]
    fn opens_exactly_once() {
        let mut gate = LoadingGate::new(Duration::from_millis(100));
        assert!(gate.update(Duration::from_millis(100)));
        assert!(!gate.is_loading());
        assert!(!gate.update(Duration::from_millis(200)));
        assert!(!gate.update(Duration::from_secs(10)));
    }

    #[test]
    fn zero_delay_opens_on_first_update() {
        let mut gate = LoadingGate::new(Duration::ZERO);
        assert!(gate.is_loading());
        assert!(gate.update(Duration::ZERO));
    }

    #[test]
    fn does_not_reclose_when_time_goes_backwards() {
        let mut gate = LoadingGate::new(Duration::from_secs(1));
        gate.update(Duration::from_secs(2));
        gate.update(Duration::ZERO);
        assert!(!gate.is_loading());
    }
}
