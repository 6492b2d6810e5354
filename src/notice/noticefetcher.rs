use encoding_rs::{
    Encoding,
    GB18030,
    UTF_8
};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use scraper::{
    Html,
    Selector
};

use crate::holiday::holidayerror::HolidayError;

static REG_META_CHARSET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([A-Za-z0-9_\-]+)"#).expect("meta charset regex")
});

/// 下載公告頁面，回傳內容容器中的純文字。
pub struct NoticeFetcher {
    client: Client,
    content_selector: Selector
}

impl NoticeFetcher {
    pub fn new(client: Client, content_element_id: &str) -> Result<NoticeFetcher, HolidayError> {
        let selector_text = format!("#{}", content_element_id);
        let content_selector = Selector::parse(&selector_text)
            .map_err(|_| HolidayError::InvalidSelector(selector_text.clone()))?;
        Ok(NoticeFetcher { client, content_selector })
    }

    pub fn fetch_text(&self, url: &str) -> Result<String, HolidayError> {
        let response = self.client.get(url).send()?.error_for_status()?;
        let header_charset = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(charset_from_content_type);
        let bytes = response.bytes()?;
        let html = decode_page(&bytes, header_charset.as_deref());
        extract_content_text(&html, &self.content_selector)
            .ok_or_else(|| HolidayError::ContentNotFound { url: url.to_owned() })
    }
}

fn charset_from_content_type(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .filter_map(|part| part.trim().split_once('='))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("charset"))
        .map(|(_, value)| value.trim().trim_matches('"').to_owned())
}

/// 依序採用：回應標頭的 charset（ISO-8859-1 視為未指定）、頁面 `<meta>` 宣告的 charset，
/// 最後以 UTF-8 解碼，出現非法字元時改用 GB18030。
pub fn decode_page(bytes: &[u8], header_charset: Option<&str>) -> String {
    let declared = header_charset
        .filter(|label| !label.eq_ignore_ascii_case("iso-8859-1"))
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .or_else(|| {
            let head = String::from_utf8_lossy(&bytes[..bytes.len().min(4096)]);
            REG_META_CHARSET
                .captures(&head)
                .and_then(|caps| Encoding::for_label(caps[1].as_bytes()))
        });

    if let Some(encoding) = declared {
        debug!("decode notice page as {}", encoding.name());
        let (text, _, _) = encoding.decode(bytes);
        return text.into_owned();
    }

    let (text, _, had_errors) = UTF_8.decode(bytes);
    if had_errors {
        debug!("notice page is not valid UTF-8, decode as {}", GB18030.name());
        let (text, _, _) = GB18030.decode(bytes);
        return text.into_owned();
    }
    text.into_owned()
}

pub fn extract_content_text(html: &str, content_selector: &Selector) -> Option<String> {
    let document = Html::parse_document(html);
    document
        .select(content_selector)
        .next()
        .map(|element| element.text().collect::<String>())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><head><meta charset="utf-8"><title>通知</title></head>
<body><div class="nav">首页</div>
<div id="UCAP-CONTENT"><p>国务院办公厅关于2020年部分节假日安排的通知</p>
<p>一、元旦：2020年1月1日放假，共1天。</p></div></body></html>"#;

    #[test]
    fn test_extract_content_text() {
        let selector = Selector::parse("#UCAP-CONTENT").unwrap();
        let text = extract_content_text(PAGE, &selector).unwrap();
        assert!(text.starts_with("国务院办公厅关于2020年"));
        assert!(text.contains("1月1日放假"));
        assert!(!text.contains("首页"));
    }

    #[test]
    fn test_missing_content() {
        let selector = Selector::parse("#UCAP-CONTENT").unwrap();
        assert!(extract_content_text("<html><body></body></html>", &selector).is_none());
    }

    #[test]
    fn test_charset_from_content_type() {
        assert_eq!(charset_from_content_type("text/html; charset=GBK").as_deref(), Some("GBK"));
        assert_eq!(charset_from_content_type("text/html"), None);
    }

    #[test]
    fn test_decode_gbk_from_meta() {
        let html = "<meta http-equiv=\"Content-Type\" content=\"text/html; charset=gbk\"><p>放假</p>";
        let (bytes, _, _) = GB18030.encode(html);
        let text = decode_page(&bytes, Some("ISO-8859-1"));
        assert!(text.contains("放假"));
    }

    #[test]
    fn test_decode_falls_back_to_gb18030() {
        let (bytes, _, _) = GB18030.encode("<p>上班</p>");
        assert!(decode_page(&bytes, None).contains("上班"));
        assert!(decode_page("<p>上班</p>".as_bytes(), None).contains("上班"));
    }
}
