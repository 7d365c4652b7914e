mod cost;
mod page;

use async_trait::async_trait;
use serde_json::Value;

use crate::{AdminClient, Result};

pub use cost::{CostParams, CostQuery};
pub use page::{CostAmount, CostBucket, CostResult, CostsPage};

/// Anything that can answer an organization costs query.
#[async_trait]
pub trait CostsApi: Send + Sync {
    fn provider(&self) -> &str;

    async fn fetch_costs(&self, query: &CostQuery) -> Result<Value>;
}

#[async_trait]
impl CostsApi for AdminClient {
    fn provider(&self) -> &str {
        "openai"
    }

    async fn fetch_costs(&self, query: &CostQuery) -> Result<Value> {
        query.get(self).await
    }
}
