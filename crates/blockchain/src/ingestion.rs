use async_trait::async_trait;
use shared::models::TokenData;
use shared::Result;
use tracing::{error, info};

use crate::explorer::{endpoints, ExplorerClient};
use crate::normalize::format_token_data;

/// Source of normalized token snapshots.
///
/// Implementations never fail: problems are reported through
/// [`TokenData::error`] on an otherwise empty snapshot.
#[async_trait]
pub trait TokenDataSource: Send + Sync {
    async fn get_token_info(&self, contract_id: &str) -> TokenData;
}

/// Fetches token info, holders and transactions from the explorer
pub struct TokenDataService {
    explorer: ExplorerClient,
}

impl TokenDataService {
    pub fn new(explorer: ExplorerClient) -> Self {
        Self { explorer }
    }

    async fn fetch_token_data(&self, contract_id: &str) -> Result<TokenData> {
        let token_endpoint = endpoints::token(contract_id)?;
        let holders_endpoint = endpoints::holders(contract_id)?;
        let txns_endpoint = endpoints::transactions(contract_id)?;

        let (token_info, holders, txns) = tokio::try_join!(
            self.explorer.fetch_resource(&token_endpoint),
            self.explorer.fetch_resource(&holders_endpoint),
            self.explorer.fetch_resource(&txns_endpoint),
        )?;

        Ok(format_token_data(&token_info, &holders, &txns))
    }
}

#[async_trait]
impl TokenDataSource for TokenDataService {
    async fn get_token_info(&self, contract_id: &str) -> TokenData {
        info!("Starting token info fetch for: {}", contract_id);

        match self.fetch_token_data(contract_id).await {
            Ok(data) => {
                info!(
                    "Token data prepared for {}: {} holders, {} transactions",
                    contract_id,
                    data.holders.len(),
                    data.transactions.len()
                );
                data
            }
            Err(e) => {
                error!("Error fetching token info for {}: {}", contract_id, e);
                TokenData::failed(e.to_string())
            }
        }
    }
}
