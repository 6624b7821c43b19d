use super::mark::Mark;
use serde::{Deserialize, Serialize};

/// A clock-in paired with the clock-out that closed it, if any.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub clock_in: Mark,
    pub clock_out: Option<Mark>,
    pub hours_worked: f64,
}

impl Session {
    pub fn open(clock_in: Mark) -> Self {
        Self {
            clock_in,
            clock_out: None,
            hours_worked: 0.0,
        }
    }

    pub fn is_open(&self) -> bool {
        self.clock_out.is_none()
    }
}
