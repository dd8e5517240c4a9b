use crate::domain::ports::YearSource;
use chrono::{Datelike, Local};

/// Calendar year from the local system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemYear;

impl YearSource for SystemYear {
    fn current_year(&self) -> i32 {
        Local::now().year()
    }
}

/// Pinned year, for reproducible runs and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedYear(pub i32);

impl YearSource for FixedYear {
    fn current_year(&self) -> i32 {
        self.0
    }
}
