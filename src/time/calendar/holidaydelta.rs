use std::fmt;

use chrono::NaiveDate;

use crate::cache::holidaystore::HolidayStore;
use crate::time::utility::is_weekend;

/// 公告與一般週末規則不一致的日期，用於檢查公告資料。
///
/// - `false` 組：放假但原本是平日
/// - `true` 組：上班但原本是週末
#[derive(Debug, Default, PartialEq, Eq)]
pub struct HolidayDelta {
    weekday_holidays: Vec<NaiveDate>,
    weekend_workdays: Vec<NaiveDate>
}

impl HolidayDelta {
    pub fn weekday_holidays(&self) -> &[NaiveDate] {
        &self.weekday_holidays
    }

    pub fn weekend_workdays(&self) -> &[NaiveDate] {
        &self.weekend_workdays
    }

    pub fn bucket(&self, is_workday: bool) -> &[NaiveDate] {
        if is_workday {
            &self.weekend_workdays
        } else {
            &self.weekday_holidays
        }
    }
}

pub fn holiday_delta(store: &HolidayStore) -> HolidayDelta {
    let mut delta = HolidayDelta::default();
    for (_, record) in store.years() {
        for interval in record {
            for d in interval.iter() {
                match (interval.is_workday(), is_weekend(d)) {
                    (false, false) => delta.weekday_holidays.push(d),
                    (true, true) => delta.weekend_workdays.push(d),
                    _ => {}
                }
            }
        }
    }
    delta
}

fn write_dates(f: &mut fmt::Formatter<'_>, dates: &[NaiveDate]) -> fmt::Result {
    for (i, d) in dates.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", d)?;
    }
    Ok(())
}

impl fmt::Display for HolidayDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "false ({} weekday holidays): ", self.weekday_holidays.len())?;
        write_dates(f, &self.weekday_holidays)?;
        writeln!(f)?;
        write!(f, "true ({} weekend workdays): ", self.weekend_workdays.len())?;
        write_dates(f, &self.weekend_workdays)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::holiday::holidayinterval::HolidayInterval;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_delta_buckets() {
        let mut store = HolidayStore::new();
        store.insert_year(2020, vec![
            // 10/1 四 ~ 10/8 四，其中 10/3、10/4 為週末
            HolidayInterval::suspension(ymd(2020, 10, 1), ymd(2020, 10, 8)).unwrap(),
            HolidayInterval::workday(ymd(2020, 9, 27)),
            HolidayInterval::workday(ymd(2020, 10, 10)),
        ]);

        let delta = holiday_delta(&store);
        assert_eq!(delta.bucket(false), &[
            ymd(2020, 10, 1), ymd(2020, 10, 2), ymd(2020, 10, 5),
            ymd(2020, 10, 6), ymd(2020, 10, 7), ymd(2020, 10, 8),
        ]);
        assert_eq!(delta.bucket(true), &[ymd(2020, 9, 27), ymd(2020, 10, 10)]);
    }

    #[test]
    fn test_delta_ignores_weekday_workday() {
        let mut store = HolidayStore::new();
        store.insert_year(2020, vec![HolidayInterval::workday(ymd(2020, 1, 20))]);
        assert_eq!(holiday_delta(&store), HolidayDelta::default());
    }

    #[test]
    fn test_display() {
        let mut store = HolidayStore::new();
        store.insert_year(2020, vec![HolidayInterval::workday(ymd(2020, 1, 19))]);
        let text = holiday_delta(&store).to_string();
        assert_eq!(text, "false (0 weekday holidays): \ntrue (1 weekend workdays): 2020-01-19");
    }
}
