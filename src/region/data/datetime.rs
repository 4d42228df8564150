use core::fmt::{Display, Formatter, Result};

use bitfield::bitfield;
#[cfg(feature = "chrono")]
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use derive_more::{From, Into};

bitfield! {
    #[derive(Copy, Clone, Default, From, Into, PartialEq, Eq)]
    pub struct Date(u16);
    impl Debug;
    year_offset, _: 15, 9;
    pub month, _: 8, 5;
    pub day, _: 4, 0;
}

impl Date {
    pub fn year(&self) -> u16 {
        self.year_offset() + 1980
    }
}

impl Display for Date {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{:04}-{:02}-{:02}", self.year(), self.month(), self.day())
    }
}

bitfield! {
    #[derive(Copy, Clone, Default, From, Into, PartialEq, Eq)]
    pub struct Time(u16);
    impl Debug;
    pub hour, _: 15, 11;
    pub minute, _: 10, 5;
    double_second, _: 4, 0;
}

impl Time {
    pub fn second(&self) -> u16 {
        self.double_second() * 2
    }
}

impl Display for Time {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour(), self.minute(), self.second())
    }
}

#[cfg(feature = "chrono")]
impl Date {
    /// `None` when the stored fields are not a calendar date, e.g. an all-zero field
    pub fn to_naive(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year() as i32, self.month() as u32, self.day() as u32)
    }
}

#[cfg(feature = "chrono")]
impl Time {
    pub fn to_naive(&self) -> Option<NaiveTime> {
        let (hour, minute, second) = (self.hour(), self.minute(), self.second());
        NaiveTime::from_hms_opt(hour as u32, minute as u32, second as u32)
    }
}

#[cfg(feature = "chrono")]
pub fn to_naive(date: Date, time: Time) -> Option<NaiveDateTime> {
    Some(NaiveDateTime::new(date.to_naive()?, time.to_naive()?))
}
