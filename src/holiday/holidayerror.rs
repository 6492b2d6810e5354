use chrono::NaiveDate;
use thiserror::Error;

/// 公告內容不符合預期時的錯誤。
///
/// 任何一種都代表該年份的資料不可信，呼叫端必須中止更新，不可寫入快取。
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("text does not start with a holiday notice title")]
    NotANotice,
    #[error("invalid date '{0}' in notice")]
    InvalidDate(String),
    #[error("no holiday interval or workday found in notice of {0}")]
    NoIntervals(i32),
}

#[derive(Debug, Error)]
pub enum HolidayError {
    #[error("holiday notice of {year} not found")]
    LocatorNotFound { year: i32 },
    #[error("invalid content selector '{0}'")]
    InvalidSelector(String),
    #[error("notice page {url} has no content element")]
    ContentNotFound { url: String },
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("requested holidays of {requested} but notice is for {parsed}")]
    YearMismatch { requested: i32, parsed: i32 },
    #[error("no workday within {max_days} days before {from}")]
    NoWorkdayFound { from: NaiveDate, max_days: u32 },
    #[error("invalid date: {0}")]
    InvalidDate(#[from] chrono::ParseError),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
