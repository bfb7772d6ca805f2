use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use serde::{de::DeserializeOwned, Serialize};
use time::OffsetDateTime;
use tracing::{debug, info};
use shared::{models::*, validation::validate_config};
use crate::error::StoreError;

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let raw = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    serde_json::from_str(&raw).map_err(|e| StoreError::json(path, e))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let raw = serde_json::to_string_pretty(value).map_err(|e| StoreError::json(path, e))?;
    fs::write(path, raw).map_err(|e| StoreError::io(path, e))
}

#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> Result<Config, StoreError> {
        let config: Config = read_json(&self.path)?;
        validate_config(&config)?;
        debug!("Loaded config from {}", self.path.display());
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<(), StoreError> {
        validate_config(config)?;
        write_json(&self.path, config)
    }
}

#[derive(Debug, Clone)]
pub struct LoginStore {
    path: PathBuf,
}

impl LoginStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Writes the config's logins on first run, then reads the file back.
    pub fn load_or_seed(&self, config: &Config) -> Result<Logins, StoreError> {
        if !self.path.exists() {
            let mut logins = config.logins.clone();
            logins.insert(RESULTS_ONLY_CODE.to_string(), LoginEntry::results_viewer());
            self.save(&logins)?;
            info!("🌱 Seeded {} logins into {}", logins.len(), self.path.display());
        }
        self.load()
    }

    pub fn load(&self) -> Result<Logins, StoreError> {
        let mut logins: Logins = read_json(&self.path)?;
        logins.entry(RESULTS_ONLY_CODE.to_string())
            .or_insert_with(LoginEntry::results_viewer);
        Ok(logins)
    }

    pub fn save(&self, logins: &Logins) -> Result<(), StoreError> {
        write_json(&self.path, logins)
    }
}

/// One completed vote: points per project, in project order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteRecord {
    pub projects: Vec<String>,
    pub points: Vec<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerContents {
    pub header: Vec<String>,
    pub rows: Vec<Vec<u32>>,
}

#[derive(Debug, Clone)]
pub struct VoteLedger {
    path: PathBuf,
}

impl VoteLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `None` when no vote has been recorded yet.
    pub fn read(&self) -> Result<Option<LedgerContents>, StoreError> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        let mut reader = csv::Reader::from_reader(file);
        let header: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if header.is_empty() {
            return Ok(None);
        }

        let mut rows = Vec::new();
        for (idx, record) in reader.records().enumerate() {
            let record = record?;
            let row = record.iter()
                .map(|field| field.trim().parse::<u32>().map_err(|_| StoreError::BadLedgerValue {
                    row: idx + 1,
                    value: field.to_string(),
                }))
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(row);
        }
        Ok(Some(LedgerContents { header, rows }))
    }

    /// Rewrites the whole ledger with the new row appended. Returns the row count.
    pub fn append(&self, record: &VoteRecord) -> Result<usize, StoreError> {
        let mut rows = match self.read()? {
            Some(existing) if existing.header != record.projects => {
                return Err(StoreError::HeaderMismatch {
                    expected: record.projects.clone(),
                    found: existing.header,
                });
            }
            Some(existing) => existing.rows,
            None => Vec::new(),
        };
        rows.push(record.points.clone());
        self.write(&record.projects, &rows)?;
        Ok(rows.len())
    }

    fn write(&self, header: &[String], rows: &[Vec<u32>]) -> Result<(), StoreError> {
        let mut writer = csv::Writer::from_path(&self.path)?;
        writer.write_record(header)?;
        for row in rows {
            writer.write_record(row.iter().map(u32::to_string))?;
        }
        writer.flush().map_err(|e| StoreError::io(&self.path, e))
    }

    /// Copies the ledger verbatim into `archive_dir`, then removes it.
    pub fn archive_and_clear(&self, archive_dir: &Path) -> Result<Option<PathBuf>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }

        fs::create_dir_all(archive_dir).map_err(|e| StoreError::io(archive_dir, e))?;
        let stamp = OffsetDateTime::now_utc().unix_timestamp_nanos();
        let target = archive_dir.join(format!("votes_archive_{}.csv", stamp));
        fs::copy(&self.path, &target).map_err(|e| StoreError::io(&target, e))?;
        fs::remove_file(&self.path).map_err(|e| StoreError::io(&self.path, e))?;
        Ok(Some(target))
    }
}
