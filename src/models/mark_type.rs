use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MarkType {
    ClockIn,
    ClockOut,
}

impl MarkType {
    /// Convert enum → wire string
    pub fn as_wire_str(&self) -> &'static str {
        match self {
            MarkType::ClockIn => "clock_in",
            MarkType::ClockOut => "clock_out",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MarkType::ClockIn => "Clock In",
            MarkType::ClockOut => "Clock Out",
        }
    }

    pub fn is_in(&self) -> bool {
        matches!(self, MarkType::ClockIn)
    }
}

impl fmt::Display for MarkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire_str())
    }
}
