use std::fs::File;
use std::io::BufReader;
use std::path::{
    Path,
    PathBuf
};

use serde::Deserialize;

use crate::holiday::holidayerror::HolidayError;

const DEFAULT_SEARCH_URL: &str =
    "https://sousuoht.www.gov.cn/athena/forward/2B22E8E39E850E17F95A016A74FCB6B673336FA8B6FEC0E2955907EF9AEE06BE";
const DEFAULT_SEARCH_CODE: &str = "17da70961a7";
const DEFAULT_APP_KEY: &str = "dHb0Wd5a0SFiUGDAfJ74cjx9bhGY2bNS3thUj8%2FXn4LLllTj3EviO5eoqvqj2XOOsir9AI61gTIYF63ljt%2FeVnJrAhr9bi0iPfXvVAQfndmTTb8fTrw%2F243wTSz9XIXO3WJmNbdTuU%2Bd%2Bk7b4wOV5F7CRJgqRfI3u4AKhukLPMM%3D";
// 「国网搜索」
const DEFAULT_APP_NAME: &str = "%E5%9B%BD%E7%BD%91%E6%90%9C%E7%B4%A2";

/// 執行設定，從 JSON 載入；缺少的欄位使用預設值。
///
/// ```json
/// {
///     "cache_path": "holiday.json",
///     "refresh_start_year": 2010,
///     "refresh_end_year": 2024
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Configuration {
    cache_path: PathBuf,
    search_url: String,
    search_code: String,
    app_key: String,
    app_name: String,
    content_element_id: String,
    refresh_start_year: i32,
    refresh_end_year: i32,
    max_lookback_days: u32,
    request_timeout_secs: Option<u64>
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            cache_path: PathBuf::from("holiday.json"),
            search_url: DEFAULT_SEARCH_URL.to_owned(),
            search_code: DEFAULT_SEARCH_CODE.to_owned(),
            app_key: DEFAULT_APP_KEY.to_owned(),
            app_name: DEFAULT_APP_NAME.to_owned(),
            content_element_id: "UCAP-CONTENT".to_owned(),
            refresh_start_year: 2010,
            refresh_end_year: 2024,
            max_lookback_days: 3650,
            request_timeout_secs: None
        }
    }
}

impl Configuration {
    pub fn new() -> Configuration {
        Configuration::default()
    }

    pub fn from_reader(file_path: impl AsRef<Path>) -> Result<Configuration, HolidayError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let config: Configuration = serde_json::from_reader(reader)?;
        Ok(config)
    }

    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }

    pub fn search_url(&self) -> &str {
        &self.search_url
    }

    pub fn search_code(&self) -> &str {
        &self.search_code
    }

    pub fn app_key(&self) -> &str {
        &self.app_key
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn content_element_id(&self) -> &str {
        &self.content_element_id
    }

    pub fn refresh_years(&self) -> std::ops::RangeInclusive<i32> {
        self.refresh_start_year..=self.refresh_end_year
    }

    pub fn max_lookback_days(&self) -> u32 {
        self.max_lookback_days
    }

    pub fn request_timeout_secs(&self) -> Option<u64> {
        self.request_timeout_secs
    }
}
