//! gig-storage-json
//!
//! Records persisted as a single JSON document:
//! `{ "earnings": [...], "expenses": [...] }`.

use std::{
    collections::BTreeSet,
    ffi::OsString,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use gig_core::{record_warnings, scoped, CoreError, RecordSource};
use gig_domain::{DateRange, EarningRecord, ExpenseRecord};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

const TMP_SUFFIX: &str = "tmp";

/// On-disk layout of a records file. Either list may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RecordDocument {
    #[serde(default)]
    pub earnings: Vec<EarningRecord>,
    #[serde(default)]
    pub expenses: Vec<ExpenseRecord>,
}

impl RecordDocument {
    /// Distinct owners across both lists, sorted.
    pub fn users(&self) -> BTreeSet<Uuid> {
        self.earnings
            .iter()
            .map(|record| record.user_id)
            .chain(self.expenses.iter().map(|record| record.user_id))
            .collect()
    }

    pub fn warnings(&self) -> Vec<String> {
        record_warnings(&self.earnings, &self.expenses)
    }
}

/// A records file loaded into memory, served through [`RecordSource`].
#[derive(Debug, Clone)]
pub struct JsonRecordSource {
    path: PathBuf,
    document: RecordDocument,
}

impl JsonRecordSource {
    /// Loads `path`, logging every anomaly found in the records.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let path = path.into();
        let document = load_document(&path)?;
        info!(
            path = %path.display(),
            earnings = document.earnings.len(),
            expenses = document.expenses.len(),
            "loaded records"
        );
        for warning in document.warnings() {
            warn!(path = %path.display(), "{warning}");
        }
        Ok(Self { path, document })
    }

    /// Like [`Self::open`], but a missing file starts an empty document.
    pub fn open_or_default(path: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let path = path.into();
        if path.exists() {
            Self::open(path)
        } else {
            Ok(Self::with_document(path, RecordDocument::default()))
        }
    }

    pub fn with_document(path: impl Into<PathBuf>, document: RecordDocument) -> Self {
        Self {
            path: path.into(),
            document,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> &RecordDocument {
        &self.document
    }

    pub fn push_earning(&mut self, record: EarningRecord) {
        self.document.earnings.push(record);
    }

    pub fn push_expense(&mut self, record: ExpenseRecord) {
        self.document.expenses.push(record);
    }

    pub fn save(&self) -> Result<(), CoreError> {
        save_document(&self.document, &self.path)
    }
}

impl RecordSource for JsonRecordSource {
    fn earnings(
        &self,
        user: Uuid,
        range: Option<&DateRange>,
    ) -> Result<Vec<EarningRecord>, CoreError> {
        Ok(scoped(&self.document.earnings, user, range))
    }

    fn expenses(
        &self,
        user: Uuid,
        range: Option<&DateRange>,
    ) -> Result<Vec<ExpenseRecord>, CoreError> {
        Ok(scoped(&self.document.expenses, user, range))
    }
}

/// Reads a records document from disk.
pub fn load_document(path: &Path) -> Result<RecordDocument, CoreError> {
    if !path.exists() {
        return Err(CoreError::Storage(format!(
            "records file `{}` not found",
            path.display()
        )));
    }
    let data = fs::read_to_string(path)?;
    serde_json::from_str(&data)
        .map_err(|err| CoreError::Serde(format!("{}: {err}", path.display())))
}

/// Writes `document` beside `path` first, then renames it into place.
pub fn save_document(document: &RecordDocument, path: &Path) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json =
        serde_json::to_string_pretty(document).map_err(|err| CoreError::Serde(err.to_string()))?;
    let tmp = staging_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// `<file name>.tmp` beside `path`, renamed over it once fully written.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".");
    name.push(TMP_SUFFIX);
    path.with_file_name(name)
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
