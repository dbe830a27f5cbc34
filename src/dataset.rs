//! Where the transaction records come from.
//!
//! The dataset is fetched in full for every request. Nothing is cached, so a
//! change upstream is visible on the next request.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use reqwest::Client;

use crate::{Error, record::TransactionRecord};

/// The public dataset the dashboard was built for.
pub const DEFAULT_DATASET_URL: &str =
    "https://s3.amazonaws.com/roxiler.com/product_transaction.json";

/// A source of the full list of transaction records.
#[derive(Debug, Clone)]
pub enum DatasetSource {
    /// A JSON array served over HTTP(S).
    Remote {
        /// The client used for every fetch.
        client: Client,
        /// The URL of the JSON array.
        url: String,
    },
    /// A JSON array stored in a local file, read on every request.
    File(PathBuf),
    /// A fixed, in-memory snapshot.
    Static(Arc<[TransactionRecord]>),
}

impl DatasetSource {
    /// Create a source that fetches the dataset from `url`.
    pub fn remote(url: impl Into<String>) -> Self {
        Self::Remote {
            client: Client::new(),
            url: url.into(),
        }
    }

    /// Create a source that always returns `records`.
    pub fn from_records(records: Vec<TransactionRecord>) -> Self {
        Self::Static(records.into())
    }

    /// Fetch a fresh snapshot of every record.
    ///
    /// # Errors
    /// Returns an error if the dataset cannot be retrieved or is not a JSON
    /// array of records.
    pub async fn fetch(&self) -> Result<Vec<TransactionRecord>, Error> {
        match self {
            DatasetSource::Remote { client, url } => fetch_remote(client, url).await,
            DatasetSource::File(path) => read_file(path).await,
            DatasetSource::Static(records) => Ok(records.to_vec()),
        }
    }

    /// A short human readable description of the source for logging.
    pub fn describe(&self) -> String {
        match self {
            DatasetSource::Remote { url, .. } => url.clone(),
            DatasetSource::File(path) => path.display().to_string(),
            DatasetSource::Static(records) => format!("{} in-memory records", records.len()),
        }
    }
}

async fn fetch_remote(client: &Client, url: &str) -> Result<Vec<TransactionRecord>, Error> {
    tracing::debug!("fetching dataset from {url}");

    let records: Vec<TransactionRecord> = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    tracing::debug!("fetched {} records from {url}", records.len());

    Ok(records)
}

async fn read_file(path: &Path) -> Result<Vec<TransactionRecord>, Error> {
    let bytes = tokio::fs::read(path).await.map_err(|error| {
        Error::DatasetRead(format!("could not read {}: {error}", path.display()))
    })?;

    serde_json::from_slice(&bytes).map_err(|error| Error::DatasetDecode(error.to_string()))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use serde_json::json;

    use crate::{Error, record::TransactionRecord};

    use super::DatasetSource;

    fn temp_file_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("{name}-{}.json", std::process::id()))
    }

    #[tokio::test]
    async fn static_source_returns_a_copy_of_its_records() {
        let records = vec![TransactionRecord {
            title: Some(json!("Backpack")),
            ..Default::default()
        }];
        let source = DatasetSource::from_records(records.clone());

        assert_eq!(source.fetch().await.unwrap(), records);
        assert_eq!(source.fetch().await.unwrap(), records);
    }

    #[tokio::test]
    async fn file_source_reads_json_array() {
        let path = temp_file_path("dataset-source-valid");
        let content = json!([{"id": 1, "price": 10}, {"id": 2}]).to_string();
        tokio::fs::write(&path, content).await.unwrap();

        let records = DatasetSource::File(path.clone()).fetch().await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].price_amount(), Some(10.0));
    }

    #[tokio::test]
    async fn file_source_rejects_non_array_payload() {
        let path = temp_file_path("dataset-source-invalid");
        tokio::fs::write(&path, r#"{"not": "an array"}"#).await.unwrap();

        let result = DatasetSource::File(path.clone()).fetch().await;
        tokio::fs::remove_file(&path).await.unwrap();

        assert!(matches!(result, Err(Error::DatasetDecode(_))));
    }

    #[tokio::test]
    async fn missing_file_is_a_read_error() {
        let path = temp_file_path("dataset-source-missing");

        let result = DatasetSource::File(path).fetch().await;

        assert!(matches!(result, Err(Error::DatasetRead(_))));
    }
}
