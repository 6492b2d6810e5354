use std::cell::{
    Cell,
    RefCell
};
use std::ffi::OsString;
use std::fs::{
    self,
    File
};
use std::io::{
    BufReader,
    BufWriter,
    Write
};
use std::path::{
    Path,
    PathBuf
};

use log::{debug, warn};

use crate::cache::holidaystore::HolidayStore;
use crate::holiday::holidayerror::HolidayError;

/// 節假日快取的儲存介面。
///
/// `load` 不會失敗：檔案不存在或內容損毀都視為空快取（冷啟動）。
/// `save` 則整份覆寫，單一行程、單一寫入者，不做鎖定。
pub trait StorageBackend {
    fn load(&self) -> HolidayStore;

    fn save(&self, store: &HolidayStore) -> Result<(), HolidayError>;
}

// ── 檔案版：JSON ─────────────────────────────────────────────────────────────

pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name: OsString = self.path.file_name().map(|n| n.to_owned()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl StorageBackend for JsonFileBackend {
    fn load(&self) -> HolidayStore {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(error) => {
                debug!("holiday cache {} not readable ({}), start empty", self.path.display(), error);
                return HolidayStore::new();
            }
        };
        match serde_json::from_reader(BufReader::new(file)) {
            Ok(store) => store,
            Err(error) => {
                warn!("holiday cache {} is corrupt ({}), start empty", self.path.display(), error);
                HolidayStore::new()
            }
        }
    }

    fn save(&self, store: &HolidayStore) -> Result<(), HolidayError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        // 先寫暫存檔再 rename，避免寫到一半留下殘缺的快取
        let temp_path = self.temp_path();
        let mut writer = BufWriter::new(File::create(&temp_path)?);
        serde_json::to_writer_pretty(&mut writer, store)?;
        writer.flush()?;
        drop(writer);

        fs::rename(&temp_path, &self.path)?;
        debug!("saved {} year(s) to {}", store.len(), self.path.display());
        Ok(())
    }
}

// ── 記憶體版：RefCell ────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MemoryBackend {
    store: RefCell<HolidayStore>,
    save_count: Cell<usize>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store(store: HolidayStore) -> Self {
        Self {
            store: RefCell::new(store),
            save_count: Cell::new(0),
        }
    }

    /// `save` 被呼叫的次數
    pub fn save_count(&self) -> usize {
        self.save_count.get()
    }
}

impl StorageBackend for MemoryBackend {
    fn load(&self) -> HolidayStore {
        self.store.borrow().clone()
    }

    fn save(&self, store: &HolidayStore) -> Result<(), HolidayError> {
        *self.store.borrow_mut() = store.clone();
        self.save_count.set(self.save_count.get() + 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::holiday::holidayinterval::HolidayInterval;

    fn sample_store() -> HolidayStore {
        let mut store = HolidayStore::new();
        store.insert_year(2020, vec![
            HolidayInterval::suspension(
                NaiveDate::from_ymd_opt(2020, 10, 1).unwrap(),
                NaiveDate::from_ymd_opt(2020, 10, 8).unwrap()
            ).unwrap(),
            HolidayInterval::workday(NaiveDate::from_ymd_opt(2020, 1, 19).unwrap()),
        ]);
        store.insert_year(2021, vec![
            HolidayInterval::workday(NaiveDate::from_ymd_opt(2021, 2, 7).unwrap()),
        ]);
        store
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path().join("holiday.json"));
        let store = sample_store();
        backend.save(&store).unwrap();
        assert_eq!(backend.load(), store);
        assert!(!backend.temp_path().exists());
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path().join("missing.json"));
        assert!(backend.load().is_empty());
    }

    #[test]
    fn test_corrupt_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("holiday.json");

        fs::write(&path, "{ not json").unwrap();
        assert!(JsonFileBackend::new(&path).load().is_empty());

        fs::write(&path, r#"["2020", "2021"]"#).unwrap();
        assert!(JsonFileBackend::new(&path).load().is_empty());
    }

    #[test]
    fn test_file_is_pretty_printed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("holiday.json");
        let backend = JsonFileBackend::new(&path);
        backend.save(&sample_store()).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("{\n  \"2020\": [\n"));
        assert!(text.contains("\"2020-10-01\""));
    }

    #[test]
    fn test_memory_backend_counts_saves() {
        let backend = MemoryBackend::new();
        assert!(backend.load().is_empty());
        backend.save(&sample_store()).unwrap();
        assert_eq!(backend.save_count(), 1);
        assert_eq!(backend.load(), sample_store());
    }
}
