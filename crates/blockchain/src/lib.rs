pub mod explorer;
pub mod ingestion;
pub mod normalize;
pub mod retry;

pub use explorer::ExplorerClient;
pub use ingestion::{TokenDataService, TokenDataSource};
pub use normalize::format_token_data;
pub use retry::{retry_with_delay, RetryConfig, Retryable};
