use chrono::{Datelike, NaiveDate};
use log::{info, warn};

use crate::cache::holidaystore::{HolidayStore, YearRecord};
use crate::cache::storagebackend::{JsonFileBackend, StorageBackend};
use crate::configuration::Configuration;
use crate::holiday::holidayerror::{HolidayError, ParseError};
use crate::holiday::holidayinterval::HolidayInterval;
use crate::notice::noticeparser::parse_notice;
use crate::notice::noticesource::{GovNoticeSource, NoticeSource};
use crate::time::calendar::holidaycalendar::{HolidayCalendar, DEFAULT_MAX_LOOKBACK_DAYS};
use crate::time::calendar::holidaydelta::{holiday_delta, HolidayDelta};
use crate::time::utility::{is_weekend, parse_iso_date};

/// 依區間順序找第一個包含 `d` 的區間；都不包含時以週末判斷。
pub fn classify(intervals: &[HolidayInterval], d: NaiveDate) -> bool {
    intervals
        .iter()
        .find(|interval| interval.contain(d))
        .map_or_else(|| is_weekend(d), |interval| !interval.is_workday())
}

/// 中國大陸假日曆，資料來自國務院每年的節假日安排通知。
///
/// 每次查詢都重新讀取快取；缺少該年度資料時才抓取並解析公告，成功後寫回快取。
pub struct ChinaHolidayCalendar<S, N> {
    storage: S,
    source: N,
    max_lookback_days: u32
}

impl ChinaHolidayCalendar<JsonFileBackend, GovNoticeSource> {
    pub fn from_configuration(config: &Configuration) -> Result<Self, HolidayError> {
        let calendar = ChinaHolidayCalendar::new(
            JsonFileBackend::new(config.cache_path()),
            GovNoticeSource::new(config)?
        );
        Ok(calendar.with_max_lookback_days(config.max_lookback_days()))
    }
}

impl<S, N> ChinaHolidayCalendar<S, N>
where
    S: StorageBackend,
    N: NoticeSource,
{
    pub fn new(storage: S, source: N) -> Self {
        ChinaHolidayCalendar {
            storage,
            source,
            max_lookback_days: DEFAULT_MAX_LOOKBACK_DAYS
        }
    }

    pub fn with_max_lookback_days(mut self, max_lookback_days: u32) -> Self {
        self.max_lookback_days = max_lookback_days;
        self
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// 取得某年的區間列表，快取沒有、記錄為空或 `force_refresh` 時重新抓取公告。
    pub fn holiday_data(&self, year: i32, force_refresh: bool) -> Result<YearRecord, HolidayError> {
        let mut store = self.storage.load();
        if !force_refresh {
            // 空的年度記錄視為沒有快取，重新抓取公告
            if let Some(record) = store.get_year(year).filter(|record| !record.is_empty()) {
                return Ok(record.to_vec());
            }
        }

        let record = self.fetch_year(year)?;
        store.insert_year(year, record.clone());
        self.storage.save(&store)?;
        Ok(record)
    }

    fn fetch_year(&self, year: i32) -> Result<YearRecord, HolidayError> {
        let url = self.source
            .locate(year)
            .ok_or(HolidayError::LocatorNotFound { year })?;
        info!("parsing holiday notice of {} from {}", year, url);

        let text = self.source.fetch(&url)?;
        let (parsed_year, intervals) = parse_notice(&text)?;
        if parsed_year != year {
            return Err(HolidayError::YearMismatch { requested: year, parsed: parsed_year });
        }
        if intervals.is_empty() {
            return Err(ParseError::NoIntervals(year).into());
        }
        info!("{} interval(s) parsed for {}", intervals.len(), year);
        Ok(intervals)
    }

    /// 逐年重新抓取公告，最後一次寫回快取。無法取得的年份記錄後略過。
    pub fn refresh_years(&self, years: impl IntoIterator<Item = i32>) -> Result<HolidayStore, HolidayError> {
        let mut store = self.storage.load();
        for year in years {
            match self.fetch_year(year) {
                Ok(record) => store.insert_year(year, record),
                Err(error) => warn!("skip {}: {}", year, error),
            }
        }
        self.storage.save(&store)?;
        Ok(store)
    }

    /// 日期格式：`YYYY-MM-DD`
    pub fn is_holiday_str(&self, date: &str) -> Result<bool, HolidayError> {
        self.is_holiday(parse_iso_date(date)?)
    }

    pub fn latest_workday(&self, from: NaiveDate) -> Result<NaiveDate, HolidayError> {
        self.latest_business_day(from)
    }

    pub fn delta(&self) -> HolidayDelta {
        holiday_delta(&self.storage.load())
    }
}

impl<S, N> HolidayCalendar for ChinaHolidayCalendar<S, N>
where
    S: StorageBackend,
    N: NoticeSource,
{
    fn is_holiday(&self, d: NaiveDate) -> Result<bool, HolidayError> {
        let intervals = self.holiday_data(d.year(), false)?;
        Ok(classify(&intervals, d))
    }

    fn max_lookback_days(&self) -> u32 {
        self.max_lookback_days
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_classify_first_match_wins() {
        let d = ymd(2020, 10, 3);
        let intervals = vec![
            HolidayInterval::suspension(ymd(2020, 10, 1), ymd(2020, 10, 8)).unwrap(),
            HolidayInterval::workday(d),
        ];
        assert!(classify(&intervals, d));
        assert!(!classify(&intervals[1..], d));
    }

    #[test]
    fn test_classify_weekend_fallback() {
        assert!(classify(&[], ymd(2020, 1, 18)));
        assert!(!classify(&[], ymd(2020, 1, 17)));
    }
}
