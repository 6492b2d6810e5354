//! 國務院節假日安排通知的文字解析。
//!
//! 公告去除 HTML 標籤後以空白切成多行，每行獨立比對：
//!
//! ```text
//! 二、春节：1月24日至30日放假调休，共7天。1月19日（星期日）、2月1日（星期六）上班。
//!           └── 放假區間 ──────┘            └── 調休上班日 ─────────────────┘
//! ```
//!
//! 區間不會跨行比對。

use chrono::{Datelike, NaiveDate};
use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::holiday::holidayerror::ParseError;
use crate::holiday::holidayinterval::HolidayInterval;
use crate::time::utility::parse_chinese_date;

static REG_NOTICE_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^国务院办公厅关于([0-9]{4})年").expect("notice year regex")
});

static REG_LINE_FIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[(（][^)）]+.").expect("line fix regex")
});

static REG_HOLIDAY_OCCUR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
        (?:(?P<sy>[0-9]{4})年)?(?P<sm>[0-9]{1,2})月(?P<sd>[0-9]{1,2})日
        (?:至(?:(?P<ey>[0-9]{4})年)?(?:(?P<em>[0-9]{1,2})月)?(?P<ed>[0-9]{1,2})日)?
        放假",
    )
    .expect("holiday regex")
});

static REG_WORKDAY_OCCUR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"((?:(?:(?:[0-9]{4}年)?[0-9]{1,2}月)?[0-9]{1,2}日、?)+)上班").expect("workday regex")
});

static REG_WORKDAY_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?P<sep>、)?(?:(?P<y>[0-9]{4})年)?(?:(?P<m>[0-9]{1,2})月)?(?P<d>[0-9]{1,2})日").expect("workday token regex")
});

/// 公告的標題年份，例如 `国务院办公厅关于2020年部分节假日安排的通知`
pub fn notice_title(year: i32) -> String {
    format!("国务院办公厅关于{}年部分节假日安排的通知", year)
}

/// 解析公告全文，回傳公告年份與所有放假、上班區間。
pub fn parse_notice(text: &str) -> Result<(i32, Vec<HolidayInterval>), ParseError> {
    let lines: Vec<&str> = text.split_whitespace().collect();
    let year = notice_year(&lines.concat())?;

    let mut intervals = Vec::new();
    for line in lines {
        let line = fix_line(line);
        let suspensions = parse_suspensions(&line, year)?;
        let workdays = parse_workdays(&line, year)?;
        if !suspensions.is_empty() || !workdays.is_empty() {
            debug!("{} -> {} suspension(s), {} workday(s)", line, suspensions.len(), workdays.len());
        }
        intervals.extend(suspensions);
        intervals.extend(workdays);
    }

    if intervals.is_empty() {
        return Err(ParseError::NoIntervals(year));
    }
    Ok((year, intervals))
}

fn notice_year(text: &str) -> Result<i32, ParseError> {
    REG_NOTICE_YEAR
        .captures(text)
        .and_then(|caps| caps[1].parse().ok())
        .ok_or(ParseError::NotANotice)
}

/// 移除括號註解，例如 `1月19日（星期日）` → `1月19日`
pub fn fix_line(line: &str) -> String {
    REG_LINE_FIX.replace_all(line, "").into_owned()
}

fn capture_number<T: std::str::FromStr>(caps: &Captures, name: &str) -> Option<T> {
    caps.name(name).and_then(|m| m.as_str().parse().ok())
}

fn date_or_invalid(year: i32, month: u32, day: u32) -> Result<NaiveDate, ParseError> {
    parse_chinese_date(year, month, day)
        .ok_or_else(|| ParseError::InvalidDate(format!("{}年{}月{}日", year, month, day)))
}

/// 擷取一行中所有 `X月X日(至X月X日)?放假` 的區間。
///
/// 結束日省略的年、月沿用開始日；只省略年份且早於開始日時視為跨年，
/// 沿用開始日月份後早於開始日則是無效區間。
pub fn parse_suspensions(line: &str, notice_year: i32) -> Result<Vec<HolidayInterval>, ParseError> {
    let mut result = Vec::new();
    for caps in REG_HOLIDAY_OCCUR.captures_iter(line) {
        let start_year = capture_number(&caps, "sy").unwrap_or(notice_year);
        let start_month: u32 = capture_number(&caps, "sm").unwrap_or_default();
        let start_day: u32 = capture_number(&caps, "sd").unwrap_or_default();
        let start = date_or_invalid(start_year, start_month, start_day)?;

        let end = match capture_number::<u32>(&caps, "ed") {
            None => start,
            Some(end_day) => {
                let explicit_year: Option<i32> = capture_number(&caps, "ey");
                let explicit_month: Option<u32> = capture_number(&caps, "em");
                let end_month = explicit_month.unwrap_or(start.month());
                let end = date_or_invalid(explicit_year.unwrap_or(start.year()), end_month, end_day)?;
                // 只有寫出月份時才可能跨年，例如 12月31日至1月2日
                if end < start && explicit_year.is_none() && explicit_month.is_some() {
                    date_or_invalid(start.year() + 1, end_month, end_day)?
                } else {
                    end
                }
            }
        };

        let interval = HolidayInterval::suspension(start, end)
            .map_err(|_| ParseError::InvalidDate(caps[0].to_owned()))?;
        trace!("suspension {} ~ {}", interval.start_date(), interval.end_date());
        result.push(interval);
    }
    Ok(result)
}

/// 上班日序列中目前已知的年、月。
#[derive(Clone, Copy)]
struct LastKnownMonth {
    year: i32,
    month: u32,
}

/// 擷取一行中所有 `X月X日、X日上班` 的調休日。
///
/// 同一序列由左至右折疊：緊接在 `、` 之後缺月份的日期沿用前一個日期的年、月，
/// 缺年份時使用公告年份。
pub fn parse_workdays(line: &str, notice_year: i32) -> Result<Vec<HolidayInterval>, ParseError> {
    let mut result = Vec::new();
    for occur in REG_WORKDAY_OCCUR.captures_iter(line) {
        let run = &occur[1];
        let (_, days) = REG_WORKDAY_TOKEN.captures_iter(run).try_fold(
            (None, Vec::new()),
            |(last, mut days): (Option<LastKnownMonth>, Vec<NaiveDate>), caps| {
                let day: u32 = capture_number(&caps, "d").unwrap_or_default();
                let known = match capture_number::<u32>(&caps, "m") {
                    Some(month) => LastKnownMonth {
                        year: capture_number(&caps, "y").unwrap_or(notice_year),
                        month,
                    },
                    None => match last.filter(|_| caps.name("sep").is_some()) {
                        Some(last) => last,
                        None => {
                            debug!("skip workday '{}' without month in '{}'", &caps[0], run);
                            return Ok((last, days));
                        }
                    },
                };
                days.push(date_or_invalid(known.year, known.month, day)?);
                Ok::<_, ParseError>((Some(known), days))
            },
        )?;
        result.extend(days.into_iter().map(HolidayInterval::workday));
    }
    Ok(result)
}
