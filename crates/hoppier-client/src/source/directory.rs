use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::records::{Merchant, RecordKind, Transaction, User};
use crate::source::parse::{RawRow, SourceFormat, parse_records};
use crate::source::validate::{merchants_from_rows, transactions_from_rows, users_from_rows};
use crate::source::{DataSource, SourceBatch};
use crate::{ClientError, ClientResult};

/// Reads `users`, `merchants`, and `transactions` exports from one directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn locate(&self, kind: RecordKind) -> ClientResult<(PathBuf, SourceFormat)> {
        let candidates = [SourceFormat::Json, SourceFormat::Csv]
            .into_iter()
            .map(|format| {
                let path = self
                    .dir
                    .join(format!("{}.{}", kind.file_stem(), format.extension()));
                (path, format)
            })
            .filter(|(path, _)| path.is_file())
            .collect::<Vec<(PathBuf, SourceFormat)>>();

        match candidates.as_slice() {
            [] => Err(ClientError::source_not_found(&self.dir, kind)),
            [single] => Ok(single.clone()),
            _ => Err(ClientError::source_conflict(&self.dir, kind)),
        }
    }

    fn read_rows(&self, kind: RecordKind) -> ClientResult<Vec<RawRow>> {
        let (path, format) = self.locate(kind)?;
        debug!(record_set = kind.as_str(), path = %path.display(), "reading source file");
        let content = fs::read_to_string(&path)
            .map_err(|error| ClientError::fetch_failed(kind, &error.to_string()))?;
        parse_records(&content, format, kind, &path)
    }
}

impl DataSource for DirectorySource {
    fn users(&self) -> ClientResult<SourceBatch<User>> {
        self.read_rows(RecordKind::User).map(users_from_rows)
    }

    fn merchants(&self) -> ClientResult<SourceBatch<Merchant>> {
        self.read_rows(RecordKind::Merchant).map(merchants_from_rows)
    }

    fn transactions(&self) -> ClientResult<SourceBatch<Transaction>> {
        self.read_rows(RecordKind::Transaction)
            .map(transactions_from_rows)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::DirectorySource;
    use crate::records::RecordKind;
    use crate::source::DataSource;
    use crate::source::parse::SourceFormat;

    #[test]
    fn locate_prefers_the_single_existing_format() {
        let dir = tempdir();
        assert!(dir.is_ok());
        if let Ok(dir) = dir {
            let write = fs::write(dir.path().join("users.csv"), "cardId,firstName,lastName\n");
            assert!(write.is_ok());

            let source = DirectorySource::new(dir.path());
            let located = source.locate(RecordKind::User);
            assert!(located.is_ok());
            if let Ok((path, format)) = located {
                assert!(path.ends_with("users.csv"));
                assert_eq!(format, SourceFormat::Csv);
            }
        }
    }

    #[test]
    fn locate_rejects_ambiguous_and_missing_sources() {
        let dir = tempdir();
        assert!(dir.is_ok());
        if let Ok(dir) = dir {
            assert!(fs::write(dir.path().join("merchants.csv"), "networkId,name\n").is_ok());
            assert!(fs::write(dir.path().join("merchants.json"), "[]").is_ok());

            let source = DirectorySource::new(dir.path());
            let conflict = source.locate(RecordKind::Merchant);
            assert!(conflict.is_err());
            if let Err(error) = conflict {
                assert_eq!(error.code, "source_conflict");
            }

            let missing = source.transactions();
            assert!(missing.is_err());
            if let Err(error) = missing {
                assert_eq!(error.code, "source_not_found");
            }
        }
    }
}
