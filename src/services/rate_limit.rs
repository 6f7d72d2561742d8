//! Daily API-call budget for the market data provider.

use chrono::{DateTime, NaiveDate, Utc};
use std::sync::{Mutex, PoisonError};

type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Caps outbound provider calls per UTC day. One unit is consumed per HTTP
/// attempt, retries included; the counter resets when the day rolls over.
///
/// The clock is injectable so tests can drive the rollover.
pub struct CallBudget {
    limit: u32,
    clock: Clock,
    state: Mutex<Window>,
}

struct Window {
    day: NaiveDate,
    used: u32,
}

impl CallBudget {
    pub fn new(limit: u32) -> Self {
        Self::with_clock(limit, Box::new(Utc::now))
    }

    pub fn with_clock(limit: u32, clock: Clock) -> Self {
        let day = clock().date_naive();
        Self {
            limit,
            clock,
            state: Mutex::new(Window { day, used: 0 }),
        }
    }

    /// Consume one call if the day's budget allows it.
    pub fn try_acquire(&self) -> bool {
        let today = (self.clock)().date_naive();
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        if state.day != today {
            state.day = today;
            state.used = 0;
        }

        if state.used >= self.limit {
            return false;
        }

        state.used += 1;
        true
    }

    /// Calls still available today.
    pub fn remaining(&self) -> u32 {
        let today = (self.clock)().date_naive();
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.day != today {
            self.limit
        } else {
            self.limit.saturating_sub(state.used)
        }
    }
}
