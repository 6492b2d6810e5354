use chrono::{
    Datelike,
    NaiveDate,
    Weekday
};

pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// 公告中日期的標準寫法，例如 `2020年10月1日`
pub const CHINESE_DATE_FORMAT: &str = "%Y年%m月%d日";

#[inline]
pub fn is_weekend(d: NaiveDate) -> bool {
    matches!(d.weekday(), Weekday::Sat | Weekday::Sun)
}

pub fn parse_iso_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(s, ISO_DATE_FORMAT)
}

/// 補齊年、月後以 `{year}年{month}月{day}日` 解析，日期不存在時回傳 `None`。
pub fn parse_chinese_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let text = format!("{}年{}月{}日", year, month, day);
    NaiveDate::parse_from_str(&text, CHINESE_DATE_FORMAT).ok()
}
