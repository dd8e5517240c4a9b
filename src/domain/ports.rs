/// Source of the calendar year used for the age feature.
pub trait YearSource: Send + Sync {
    fn current_year(&self) -> i32;
}
