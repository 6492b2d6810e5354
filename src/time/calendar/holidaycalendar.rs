use chrono::{Days, NaiveDate};

use crate::holiday::holidayerror::HolidayError;

const ONE_DAY: Days = Days::new(1);

pub const DEFAULT_MAX_LOOKBACK_DAYS: u32 = 3650;

/// 假日曆介面。查詢可能需要抓取公告，所以回傳 `Result`。
pub trait HolidayCalendar {
    fn is_holiday(&self, d: NaiveDate) -> Result<bool, HolidayError>;

    /// `latest_business_day` 最多往回找幾天
    fn max_lookback_days(&self) -> u32 {
        DEFAULT_MAX_LOOKBACK_DAYS
    }

    fn is_business_day(&self, d: NaiveDate) -> Result<bool, HolidayError> {
        Ok(!self.is_holiday(d)?)
    }

    /// 從 `from`（含）往前找最近的工作日。
    fn latest_business_day(&self, from: NaiveDate) -> Result<NaiveDate, HolidayError> {
        let max_days = self.max_lookback_days();
        let mut d = from;
        for _ in 0..=max_days {
            if self.is_business_day(d)? {
                return Ok(d);
            }
            d = match d.checked_sub_days(ONE_DAY) {
                Some(prev) => prev,
                None => break,
            };
        }
        Err(HolidayError::NoWorkdayFound { from, max_days })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Datelike;

    use super::*;
    use crate::time::utility::is_weekend;

    struct WeekendOnly;

    impl HolidayCalendar for WeekendOnly {
        fn is_holiday(&self, d: NaiveDate) -> Result<bool, HolidayError> {
            Ok(is_weekend(d))
        }
    }

    struct AlwaysHoliday;

    impl HolidayCalendar for AlwaysHoliday {
        fn is_holiday(&self, _: NaiveDate) -> Result<bool, HolidayError> {
            Ok(true)
        }

        fn max_lookback_days(&self) -> u32 {
            10
        }
    }

    #[test]
    fn test_latest_business_day_skips_weekend() {
        // 2020-01-19 星期日 → 2020-01-17 星期五
        let sunday = NaiveDate::from_ymd_opt(2020, 1, 19).unwrap();
        let friday = WeekendOnly.latest_business_day(sunday).unwrap();
        assert_eq!(friday, NaiveDate::from_ymd_opt(2020, 1, 17).unwrap());
        assert_eq!(friday.weekday(), chrono::Weekday::Fri);
    }

    #[test]
    fn test_latest_business_day_inclusive() {
        let monday = NaiveDate::from_ymd_opt(2020, 1, 20).unwrap();
        assert_eq!(WeekendOnly.latest_business_day(monday).unwrap(), monday);
    }

    #[test]
    fn test_latest_business_day_capped() {
        let d = NaiveDate::from_ymd_opt(2020, 1, 20).unwrap();
        assert!(matches!(
            AlwaysHoliday.latest_business_day(d),
            Err(HolidayError::NoWorkdayFound { max_days: 10, .. })
        ));
    }
}
