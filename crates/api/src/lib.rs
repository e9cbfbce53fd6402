pub mod error;
pub mod handlers;
pub mod logging;
pub mod routes;

pub use error::{ApiError, ApiResult, ErrorResponse};

use ai_service::NarrativeAnalyzer;
use blockchain::TokenDataSource;
use risk::RiskEngine;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub token_data: Arc<dyn TokenDataSource>,
    pub risk_engine: Arc<RiskEngine>,
    pub narrative: Option<Arc<dyn NarrativeAnalyzer>>,
}

impl AppState {
    pub fn new(
        token_data: Arc<dyn TokenDataSource>,
        risk_engine: Arc<RiskEngine>,
        narrative: Option<Arc<dyn NarrativeAnalyzer>>,
    ) -> Self {
        Self {
            token_data,
            risk_engine,
            narrative,
        }
    }
}
