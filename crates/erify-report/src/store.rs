use crate::kind::ReportKind;
use crate::render::ReportError;
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// 报表文件仓库
///
/// 所有报表写入固定目录，文件名 `<kind>_report_<YYYYMMDD>.<ext>`。
pub struct ReportStore {
    dir: PathBuf,
}

impl ReportStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// 报表文件名
    pub fn filename(kind: ReportKind, date: NaiveDate, ext: &str) -> String {
        format!("{}_report_{}.{}", kind, date.format("%Y%m%d"), ext)
    }

    /// 写入报表，返回完整路径
    pub fn save(
        &self,
        content: &str,
        kind: ReportKind,
        date: NaiveDate,
        ext: &str,
    ) -> Result<PathBuf, ReportError> {
        fs::create_dir_all(&self.dir)?;

        let path = self.dir.join(Self::filename(kind, date, ext));
        fs::write(&path, content)?;

        info!("Report saved: {:?}", path);
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_filename_format() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert_eq!(
            ReportStore::filename(ReportKind::Daily, date, "html"),
            "daily_report_20250301.html"
        );
        assert_eq!(
            ReportStore::filename(ReportKind::Monthly, date, "json"),
            "monthly_report_20250301.json"
        );
    }

    #[test]
    fn test_save_creates_directory_and_file() {
        let temp_dir = tempdir().unwrap();
        let store = ReportStore::new(temp_dir.path().join("reports"));
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();

        let path = store
            .save("<html></html>", ReportKind::Weekly, date, "html")
            .unwrap();

        assert!(path.ends_with("weekly_report_20250301.html"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "<html></html>");
    }

    #[test]
    fn test_save_overwrites_same_day_report() {
        let temp_dir = tempdir().unwrap();
        let store = ReportStore::new(temp_dir.path());
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();

        store.save("first", ReportKind::Daily, date, "json").unwrap();
        let path = store.save("second", ReportKind::Daily, date, "json").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }
}
