use std::collections::BTreeMap;

use serde::{
    Deserialize,
    Serialize
};

use crate::holiday::holidayinterval::HolidayInterval;

pub type YearRecord = Vec<HolidayInterval>;

/// 整個快取檔的內容：四位數年份字串 → 該年的區間列表。
///
/// ```json
/// {
///   "2020": [
///     ["2020-01-01", "2020-01-01", false],
///     ["2020-01-19", "2020-01-19", true]
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HolidayStore {
    years: BTreeMap<String, YearRecord>
}

impl HolidayStore {
    pub fn new() -> HolidayStore {
        HolidayStore::default()
    }

    pub fn get_year(&self, year: i32) -> Option<&[HolidayInterval]> {
        self.years.get(&year.to_string()).map(|record| record.as_slice())
    }

    pub fn insert_year(&mut self, year: i32, record: YearRecord) {
        self.years.insert(year.to_string(), record);
    }

    pub fn years(&self) -> impl Iterator<Item = (&String, &YearRecord)> {
        self.years.iter()
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}
