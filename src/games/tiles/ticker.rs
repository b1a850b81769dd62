//! Frame scheduling handle for the falling-tile loop.
//!
//! The host asks the ticker for a token once per frame and hands the token
//! back when the frame fires. Tokens carry the generation they were issued
//! under; `cancel` and `start` both advance the generation, so a frame that
//! was requested before either call can never run against the new state.

/// Proof that a frame was scheduled under a particular generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameToken {
    generation: u64,
}

/// Owned per-game frame scheduler.
#[derive(Debug, Clone, Default)]
pub struct FrameTicker {
    generation: u64,
    running: bool,
}

impl FrameTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the ticker under a fresh generation.
    pub fn start(&mut self) {
        self.generation += 1;
        self.running = true;
    }

    /// Stop issuing frames. Safe to call any number of times.
    pub fn cancel(&mut self) {
        if self.running {
            self.running = false;
            self.generation += 1;
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Schedule the next frame, or `None` once cancelled.
    pub fn request_frame(&self) -> Option<FrameToken> {
        self.running.then_some(FrameToken {
            generation: self.generation,
        })
    }

    /// Whether a frame scheduled with `token` may still run.
    pub fn accepts(&self, token: FrameToken) -> bool {
        self.running && token.generation == self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_ticker_issues_nothing() {
        let ticker = FrameTicker::new();
        assert!(!ticker.is_running());
        assert!(ticker.request_frame().is_none());
    }

    #[test]
    fn test_started_ticker_accepts_own_tokens() {
        let mut ticker = FrameTicker::new();
        ticker.start();
        let token = ticker.request_frame().expect("running ticker issues frames");
        assert!(ticker.accepts(token));
    }

    #[test]
    fn test_cancel_rejects_in_flight_token() {
        let mut ticker = FrameTicker::new();
        ticker.start();
        let token = ticker.request_frame().unwrap();

        ticker.cancel();

        assert!(!ticker.accepts(token));
        assert!(ticker.request_frame().is_none());
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut ticker = FrameTicker::new();
        ticker.start();
        ticker.cancel();
        let generation = ticker.generation();

        ticker.cancel();
        ticker.cancel();

        assert_eq!(ticker.generation(), generation);
        assert!(!ticker.is_running());
    }

    #[test]
    fn test_restart_rejects_previous_session_token() {
        let mut ticker = FrameTicker::new();
        ticker.start();
        let old = ticker.request_frame().unwrap();
        ticker.cancel();

        ticker.start();

        assert!(!ticker.accepts(old));
        let fresh = ticker.request_frame().unwrap();
        assert!(ticker.accepts(fresh));
        assert_ne!(old, fresh);
    }

    #[test]
    fn test_start_while_running_invalidates_tokens() {
        let mut ticker = FrameTicker::new();
        ticker.start();
        let old = ticker.request_frame().unwrap();

        ticker.start();

        assert!(!ticker.accepts(old));
    }
}
