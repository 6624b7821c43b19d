pub mod calculator;
pub mod clock;
pub mod logic;
pub mod marks;
