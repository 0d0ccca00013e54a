use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_sdk_dynamodb as ddb;
use lambda_runtime::Error;
use std::env;
use tokio::sync::OnceCell;
use tracing::info;

use crate::visitor::Item;
use crate::REGION;

const DYNAMODB_ENDPOINT: &str = "DYNAMODB_ENDPOINT";

static SHARED_STORE: OnceCell<DynamoStore> = OnceCell::const_new();

/// Destination for visitor records.
#[async_trait]
pub trait VisitorStore: Send + Sync {
    /// Unconditional put: creates the item or replaces the one with the same key.
    async fn put_item(&self, table_name: &str, item: Item) -> Result<(), Error>;
}

pub struct DynamoStore {
    client: ddb::Client,
}

impl DynamoStore {
    pub fn new(client: ddb::Client) -> Self {
        Self { client }
    }

    pub async fn from_env() -> Self {
        let region_provider = RegionProviderChain::first_try(REGION);
        let config = aws_config::from_env().region(region_provider).load().await;
        let ddb_config = match env::var(DYNAMODB_ENDPOINT) {
            Ok(endpoint) => {
                info!("using DynamoDB endpoint {}", endpoint);
                ddb::config::Builder::from(&config).endpoint_url(endpoint).build()
            }
            _ => ddb::config::Builder::from(&config).build(),
        };
        Self::new(ddb::Client::from_conf(ddb_config))
    }

    /// The store for this execution environment. Built on first use and kept
    /// until the process exits.
    pub async fn shared() -> &'static DynamoStore {
        SHARED_STORE.get_or_init(DynamoStore::from_env).await
    }
}

#[async_trait]
impl VisitorStore for DynamoStore {
    async fn put_item(&self, table_name: &str, item: Item) -> Result<(), Error> {
        self.client
            .put_item()
            .table_name(table_name)
            .set_item(Some(item))
            .send()
            .await?;
        Ok(())
    }
}
