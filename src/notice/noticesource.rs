use std::time::Duration;

use reqwest::blocking::Client;

use crate::configuration::Configuration;
use crate::holiday::holidayerror::HolidayError;
use crate::notice::noticefetcher::NoticeFetcher;
use crate::notice::noticelocator::NoticeLocator;

/// 公告來源：找出某年的公告網址，並取得公告純文字。
pub trait NoticeSource {
    fn locate(&self, year: i32) -> Option<String>;

    fn fetch(&self, url: &str) -> Result<String, HolidayError>;
}

/// 從 www.gov.cn 搜尋並下載公告。
pub struct GovNoticeSource {
    locator: NoticeLocator,
    fetcher: NoticeFetcher
}

impl GovNoticeSource {
    pub fn new(config: &Configuration) -> Result<GovNoticeSource, HolidayError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs() {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;
        Ok(GovNoticeSource {
            locator: NoticeLocator::new(client.clone(), config),
            fetcher: NoticeFetcher::new(client, config.content_element_id())?
        })
    }
}

impl NoticeSource for GovNoticeSource {
    fn locate(&self, year: i32) -> Option<String> {
        self.locator.locate(year)
    }

    fn fetch(&self, url: &str) -> Result<String, HolidayError> {
        self.fetcher.fetch_text(url)
    }
}
