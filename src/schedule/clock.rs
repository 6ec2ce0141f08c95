use chrono::{Local, NaiveTime};

/// Source of the current wall-clock time of day.
pub trait Clock: Send {
    fn time_of_day(&self) -> NaiveTime;
}

/// The system clock in the local timezone.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn time_of_day(&self) -> NaiveTime {
        Local::now().time()
    }
}
