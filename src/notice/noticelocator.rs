use log::{debug, warn};
use reqwest::blocking::Client;
use serde::{
    Deserialize,
    Serialize
};

use crate::configuration::Configuration;
use crate::holiday::holidayerror::HolidayError;
use crate::notice::noticeparser::notice_title;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CustomFilter {
    operator: &'static str,
    properties: Vec<serde_json::Value>
}

/// gov.cn 站內搜尋的請求內容，只依標題搜尋。
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequest<'a> {
    code: &'a str,
    history_search_words: Vec<String>,
    data_type_id: &'static str,
    order_by: &'static str,
    search_by: &'static str,
    appendix_type: &'static str,
    granularity: &'static str,
    track_total_hits: bool,
    begin_date_time: &'static str,
    end_date_time: &'static str,
    is_search_forced: u8,
    filters: Vec<serde_json::Value>,
    page_no: u32,
    page_size: u32,
    custom_filter: CustomFilter,
    search_word: &'a str
}

impl<'a> SearchRequest<'a> {
    fn by_title(code: &'a str, title: &'a str) -> SearchRequest<'a> {
        SearchRequest {
            code,
            history_search_words: Vec::new(),
            data_type_id: "15",
            order_by: "time",
            search_by: "title",
            appendix_type: "",
            granularity: "CUSTOM",
            track_total_hits: true,
            begin_date_time: "",
            end_date_time: "",
            is_search_forced: 0,
            filters: Vec::new(),
            page_no: 1,
            page_size: 10,
            custom_filter: CustomFilter { operator: "and", properties: Vec::new() },
            search_word: title
        }
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    result: SearchResult
}

#[derive(Deserialize)]
struct SearchResult {
    data: SearchData
}

#[derive(Deserialize)]
struct SearchData {
    middle: SearchMiddle
}

#[derive(Deserialize)]
struct SearchMiddle {
    #[serde(default)]
    list: Vec<SearchItem>
}

#[derive(Deserialize)]
struct SearchItem {
    #[serde(default)]
    title_no_tag: String,
    #[serde(default)]
    url: String
}

/// 透過 gov.cn 搜尋服務找出某年度節假日安排通知的網址。
pub struct NoticeLocator {
    client: Client,
    search_url: String,
    search_code: String,
    app_key: String,
    app_name: String
}

impl NoticeLocator {
    pub fn new(client: Client, config: &Configuration) -> NoticeLocator {
        NoticeLocator {
            client,
            search_url: config.search_url().to_owned(),
            search_code: config.search_code().to_owned(),
            app_key: config.app_key().to_owned(),
            app_name: config.app_name().to_owned()
        }
    }

    /// 回傳標題完全相符的第一筆結果；查無結果或請求失敗都回傳 `None`。
    pub fn locate(&self, year: i32) -> Option<String> {
        let title = notice_title(year);
        match self.search(&title) {
            Ok(Some(url)) => {
                debug!("located notice of {}: {}", year, url);
                Some(url)
            },
            Ok(None) => {
                warn!("no search result titled '{}'", title);
                None
            },
            Err(error) => {
                warn!("search for '{}' failed: {}", title, error);
                None
            }
        }
    }

    fn search(&self, title: &str) -> Result<Option<String>, HolidayError> {
        let body = self.client
            .post(&self.search_url)
            .header("Athenaappkey", &self.app_key)
            .header("Athenaappname", &self.app_name)
            .json(&SearchRequest::by_title(&self.search_code, title))
            .send()?
            .error_for_status()?
            .text()?;
        find_notice_url(&body, title)
    }
}

fn find_notice_url(body: &str, title: &str) -> Result<Option<String>, HolidayError> {
    let response: SearchResponse = serde_json::from_str(body)?;
    Ok(response.result.data.middle.list
        .into_iter()
        .find(|item| item.title_no_tag == title && !item.url.is_empty())
        .map(|item| item.url))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = r#"{
        "resultCode": {"code": 200},
        "result": {"data": {"middle": {"list": [
            {"title_no_tag": "国务院办公厅关于2020年部分节假日安排的通知的解读", "url": "https://www.gov.cn/a.htm"},
            {"title_no_tag": "国务院办公厅关于2020年部分节假日安排的通知", "url": "https://www.gov.cn/b.htm"},
            {"title_no_tag": "国务院办公厅关于2020年部分节假日安排的通知", "url": "https://www.gov.cn/c.htm"}
        ]}}}
    }"#;

    #[test]
    fn test_exact_title_first_match() {
        let url = find_notice_url(RESPONSE, &notice_title(2020)).unwrap();
        assert_eq!(url.as_deref(), Some("https://www.gov.cn/b.htm"));
    }

    #[test]
    fn test_no_exact_title() {
        assert_eq!(find_notice_url(RESPONSE, &notice_title(2021)).unwrap(), None);
    }

    #[test]
    fn test_matching_item_without_url() {
        let body = r#"{"result": {"data": {"middle": {"list": [
            {"title_no_tag": "国务院办公厅关于2020年部分节假日安排的通知"}
        ]}}}}"#;
        assert_eq!(find_notice_url(body, &notice_title(2020)).unwrap(), None);
    }

    #[test]
    fn test_unexpected_shape() {
        assert!(find_notice_url(r#"{"result": null}"#, &notice_title(2020)).is_err());
    }

    #[test]
    fn test_request_body_shape() {
        let title = notice_title(2020);
        let json = serde_json::to_value(SearchRequest::by_title("17da70961a7", &title)).unwrap();
        assert_eq!(json["searchWord"], title.as_str());
        assert_eq!(json["dataTypeId"], "15");
        assert_eq!(json["isSearchForced"], 0);
        assert_eq!(json["trackTotalHits"], true);
        assert_eq!(json["customFilter"]["operator"], "and");
    }
}
