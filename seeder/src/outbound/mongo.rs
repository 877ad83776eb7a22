//! MongoDB adapter for the subscriber store port.
//!
//! free5GC and Open5GS both keep subscribers in MongoDB. Each record is
//! serialized to a BSON document and inserted individually so the store's
//! unique IMSI index reports duplicates per subscriber.

use std::time::Duration;

use async_trait::async_trait;
use mongodb::bson::{self, Document, doc};
use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use subscriber_data::{Imsi, SubscriberRecord};
use tracing::info;

use crate::domain::ports::{DeleteOutcome, SubscriberStore, SubscriberStoreError};

/// Server error code for unique index violations.
const DUPLICATE_KEY_CODE: i32 = 11000;

const APP_NAME: &str = "subscriber-seeder";

/// Connection settings for [`MongoSubscriberStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MongoStoreConfig {
    /// Connection string, for example `mongodb://localhost:27017`.
    pub uri: String,
    /// Database holding the subscriber collection.
    pub database: String,
    /// Subscriber collection name.
    pub collection: String,
    /// Bound on each insert or delete, also used for connection and server
    /// selection timeouts.
    pub operation_timeout: Duration,
}

/// Subscriber store backed by a MongoDB collection.
#[derive(Clone)]
pub struct MongoSubscriberStore {
    collection: Collection<Document>,
    operation_timeout: Duration,
}

impl MongoSubscriberStore {
    /// Build a client for `config`.
    ///
    /// The driver connects lazily, so an unreachable server surfaces on the
    /// first operation as [`SubscriberStoreError::Connectivity`].
    ///
    /// # Errors
    ///
    /// Returns an error when the connection string cannot be parsed.
    pub async fn connect(config: &MongoStoreConfig) -> Result<Self, SubscriberStoreError> {
        let mut options = ClientOptions::parse(&config.uri)
            .await
            .map_err(|error| SubscriberStoreError::connectivity(error.to_string()))?;
        options.app_name = Some(APP_NAME.to_owned());
        options.connect_timeout = Some(config.operation_timeout);
        options.server_selection_timeout = Some(config.operation_timeout);

        let client = Client::with_options(options)
            .map_err(|error| SubscriberStoreError::connectivity(error.to_string()))?;
        let collection = client
            .database(&config.database)
            .collection::<Document>(&config.collection);

        info!(
            database = %config.database,
            collection = %config.collection,
            "subscriber store configured"
        );
        Ok(Self {
            collection,
            operation_timeout: config.operation_timeout,
        })
    }

    fn timed_out(&self, operation: &str) -> SubscriberStoreError {
        SubscriberStoreError::connectivity(format!(
            "{operation} timed out after {}ms",
            self.operation_timeout.as_millis()
        ))
    }
}

#[async_trait]
impl SubscriberStore for MongoSubscriberStore {
    async fn insert_one(&self, record: &SubscriberRecord) -> Result<(), SubscriberStoreError> {
        let document = subscriber_document(record)?;
        tokio::time::timeout(self.operation_timeout, self.collection.insert_one(document))
            .await
            .map_err(|_| self.timed_out("insert"))?
            .map(|_| ())
            .map_err(|error| classify_error(&error, record.imsi()))
    }

    async fn delete_one(&self, imsi: Imsi) -> Result<DeleteOutcome, SubscriberStoreError> {
        let identifier = imsi.to_string();
        let result = tokio::time::timeout(
            self.operation_timeout,
            self.collection.delete_one(doc! { "imsi": identifier.as_str() }),
        )
        .await
        .map_err(|_| self.timed_out("delete"))?
        .map_err(|error| classify_error(&error, &identifier))?;

        Ok(if result.deleted_count == 0 {
            DeleteOutcome::NotFound
        } else {
            DeleteOutcome::Deleted
        })
    }
}

/// Serialize a record into the BSON document written to the collection.
pub(crate) fn subscriber_document(
    record: &SubscriberRecord,
) -> Result<Document, SubscriberStoreError> {
    bson::to_document(record).map_err(|error| {
        SubscriberStoreError::rejected(format!(
            "subscriber {} could not be encoded: {error}",
            record.imsi()
        ))
    })
}

fn classify_error(error: &MongoError, imsi: &str) -> SubscriberStoreError {
    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write)) if write.code == DUPLICATE_KEY_CODE => {
            SubscriberStoreError::duplicate_identifier(imsi)
        }
        ErrorKind::Io(_)
        | ErrorKind::ServerSelection { .. }
        | ErrorKind::DnsResolve { .. }
        | ErrorKind::ConnectionPoolCleared { .. } => {
            SubscriberStoreError::connectivity(error.to_string())
        }
        _ => SubscriberStoreError::rejected(error.to_string()),
    }
}
