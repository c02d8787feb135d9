use std::time::{Duration, Instant};

/// Key code of the side trigger button on the handy terminal.
pub const TRIGGER_KEY_CODE: i32 = 501;

/// How long the software trigger stays pressed waiting for a decode.
pub const WAIT_FOR_DECODE: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Down { repeat: u32 },
    Up,
}

/// What the caller should do with the scanner's software trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerCommand {
    Press,
    Release,
}

/// Wait-for-decode window driven by the trigger key.
///
/// Key down (first, non-repeated) opens a window and presses the software
/// trigger. Key up, a successful decode or the window timing out release it.
#[derive(Debug)]
pub struct TriggerControl {
    timeout: Duration,
    key_down: bool,
    deadline: Option<Instant>,
}

impl Default for TriggerControl {
    fn default() -> Self {
        Self::new(WAIT_FOR_DECODE)
    }
}

impl TriggerControl {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            key_down: false,
            deadline: None,
        }
    }

    pub fn is_waiting(&self) -> bool {
        self.deadline.is_some()
    }

    /// Handles a key event. Returns `None` for keys other than the trigger
    /// (not consumed), `Some(None)` when consumed without trigger change.
    pub fn on_key(&mut self, key_code: i32, action: KeyAction, now: Instant) -> Option<Option<TriggerCommand>> {
        if key_code != TRIGGER_KEY_CODE {
            return None;
        }

        let command = match action {
            KeyAction::Down { repeat } if repeat > 0 => None,
            KeyAction::Down { .. } => {
                if self.key_down {
                    None
                } else {
                    self.key_down = true;
                    self.start(now)
                }
            }
            KeyAction::Up => {
                self.key_down = false;
                self.deadline = None;
                Some(TriggerCommand::Release)
            }
        };
        Some(command)
    }

    /// A barcode arrived; closes an open window.
    pub fn on_decoded(&mut self) -> Option<TriggerCommand> {
        self.deadline.take().map(|_| TriggerCommand::Release)
    }

    /// Closes the window once its deadline has passed.
    pub fn poll_timeout(&mut self, now: Instant) -> Option<TriggerCommand> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                #[cfg(feature = "tracing")]
                tracing::debug!(timeout_ms = self.timeout.as_millis() as u64, "wait for decode timed out");
                Some(TriggerCommand::Release)
            }
            _ => None,
        }
    }

    fn start(&mut self, now: Instant) -> Option<TriggerCommand> {
        if self.deadline.is_some() {
            return None;
        }
        self.deadline = Some(now + self.timeout);
        Some(TriggerCommand::Press)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_down_presses_once() {
        let mut t = TriggerControl::default();
        let now = Instant::now();
        assert_eq!(
            t.on_key(TRIGGER_KEY_CODE, KeyAction::Down { repeat: 0 }, now),
            Some(Some(TriggerCommand::Press))
        );
        assert!(t.is_waiting());
        assert_eq!(t.on_key(TRIGGER_KEY_CODE, KeyAction::Down { repeat: 1 }, now), Some(None));
        assert_eq!(t.on_key(TRIGGER_KEY_CODE, KeyAction::Down { repeat: 0 }, now), Some(None));
    }

    #[test]
    fn other_keys_are_not_consumed() {
        let mut t = TriggerControl::default();
        assert_eq!(t.on_key(66, KeyAction::Down { repeat: 0 }, Instant::now()), None);
        assert!(!t.is_waiting());
    }

    #[test]
    fn key_up_and_decode_release() {
        let mut t = TriggerControl::default();
        let now = Instant::now();
        t.on_key(TRIGGER_KEY_CODE, KeyAction::Down { repeat: 0 }, now);
        assert_eq!(t.on_decoded(), Some(TriggerCommand::Release));
        assert_eq!(t.on_decoded(), None);
        assert_eq!(
            t.on_key(TRIGGER_KEY_CODE, KeyAction::Up, now),
            Some(Some(TriggerCommand::Release))
        );
        assert_eq!(
            t.on_key(TRIGGER_KEY_CODE, KeyAction::Down { repeat: 0 }, now),
            Some(Some(TriggerCommand::Press))
        );
    }

    #[test]
    fn window_times_out() {
        let mut t = TriggerControl::new(Duration::from_millis(100));
        let now = Instant::now();
        t.on_key(TRIGGER_KEY_CODE, KeyAction::Down { repeat: 0 }, now);
        assert_eq!(t.poll_timeout(now + Duration::from_millis(50)), None);
        assert_eq!(
            t.poll_timeout(now + Duration::from_millis(100)),
            Some(TriggerCommand::Release)
        );
        assert!(!t.is_waiting());
    }
}
