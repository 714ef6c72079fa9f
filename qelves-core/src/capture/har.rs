//! HAR file loading

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tokio::fs;

use super::transaction::Transaction;
use crate::error::CaptureError;

/// An HTTP Archive document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Har {
    pub log: HarLog,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HarLog {
    #[serde(default)]
    pub entries: Vec<Transaction>,
}

impl Har {
    /// Read and parse a HAR file
    pub async fn load(path: &Path) -> Result<Self, CaptureError> {
        let contents = fs::read_to_string(path)
            .await
            .map_err(|source| CaptureError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        contents.parse()
    }

    /// Captured transactions in capture order
    pub fn entries(&self) -> &[Transaction] {
        &self.log.entries
    }
}

impl FromStr for Har {
    type Err = CaptureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(serde_json::from_str(s)?)
    }
}
