use std::time::{Duration, Instant};

/// Paces a loop to a fixed interval, sleeping only for whatever time the loop body left over.
pub struct Sleeper {
    pub target_delta_time: Duration,
    pub last_instant: Option<Instant>,
}

impl Sleeper {
    pub fn new(target_delta_time: Duration) -> Self {
        Self {
            target_delta_time,
            last_instant: None,
        }
    }

    pub fn sleep(&mut self) -> bool {
        let slept = match self.remaining() {
            Some(remaining) => {
                spin_sleep::sleep(remaining);
                true
            }
            None => false,
        };

        self.last_instant = Some(Instant::now());
        slept
    }

    /// Time left until the target interval has passed since the last sleep.
    /// `None` if we're late, or have never slept yet.
    pub fn remaining(&self) -> Option<Duration> {
        let last_instant = self.last_instant?;
        self.target_delta_time
            .checked_sub(last_instant.elapsed())
            .filter(|remaining| !remaining.is_zero())
    }
}
