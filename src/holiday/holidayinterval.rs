use std::fmt;

use chrono::{
    Days,
    NaiveDate
};
use serde::{
    Deserialize,
    Serialize
};

/// 快取檔中的原始格式：`["2020-10-01", "2020-10-08", false]`
#[derive(Serialize, Deserialize)]
struct HolidayIntervalJsonProp(NaiveDate, NaiveDate, bool);

#[derive(Debug)]
pub struct InvertedIntervalError {
    start_date: NaiveDate,
    end_date: NaiveDate
}

impl fmt::Display for InvertedIntervalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "interval starts at {} after its end {}", self.start_date, self.end_date)
    }
}

impl std::error::Error for InvertedIntervalError {}

/// 公告中的一段日期區間（含頭尾）。
///
/// - `is_workday == false`：放假
/// - `is_workday == true`：調休上班（通常為單日的週末）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HolidayIntervalJsonProp", into = "HolidayIntervalJsonProp")]
pub struct HolidayInterval {
    start_date: NaiveDate,
    end_date: NaiveDate,
    is_workday: bool
}

impl HolidayInterval {
    pub fn new(start_date: NaiveDate,
               end_date: NaiveDate,
               is_workday: bool) -> Result<HolidayInterval, InvertedIntervalError> {
        if start_date > end_date {
            return Err(InvertedIntervalError { start_date, end_date });
        }
        Ok(HolidayInterval { start_date, end_date, is_workday })
    }

    pub fn suspension(start_date: NaiveDate, end_date: NaiveDate) -> Result<HolidayInterval, InvertedIntervalError> {
        HolidayInterval::new(start_date, end_date, false)
    }

    pub fn workday(d: NaiveDate) -> HolidayInterval {
        HolidayInterval { start_date: d, end_date: d, is_workday: true }
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn is_workday(&self) -> bool {
        self.is_workday
    }

    pub fn len(&self) -> usize {
        ((self.end_date - self.start_date).num_days() + 1) as usize
    }

    pub fn contain(&self, d: NaiveDate) -> bool {
        (d >= self.start_date) && (d <= self.end_date)
    }

    pub fn iter(&self) -> HolidayIntervalIterator<'_> {
        HolidayIntervalIterator {
            interval: self,
            index: 0,
        }
    }
}

impl TryFrom<HolidayIntervalJsonProp> for HolidayInterval {
    type Error = InvertedIntervalError;

    fn try_from(json_prop: HolidayIntervalJsonProp) -> Result<Self, Self::Error> {
        HolidayInterval::new(json_prop.0, json_prop.1, json_prop.2)
    }
}

impl From<HolidayInterval> for HolidayIntervalJsonProp {
    fn from(interval: HolidayInterval) -> Self {
        HolidayIntervalJsonProp(interval.start_date, interval.end_date, interval.is_workday)
    }
}

pub struct HolidayIntervalIterator<'a> {
    interval: &'a HolidayInterval,
    index: usize,
}

impl<'a> Iterator for HolidayIntervalIterator<'a> {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index < self.interval.len() {
            let result = self.interval.start_date() + Days::new(self.index as u64);
            self.index += 1;
            Some(result)
        } else {
            None
        }
    }
}
