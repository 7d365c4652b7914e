mod client;
mod error;
mod profile;

pub mod usage;
pub mod utils;

pub use client::{AdminClient, DEFAULT_API_VERSION, DEFAULT_BASE_URL};
pub use error::{Result, UsageError};
pub use profile::{
    AdminAuth, DEFAULT_ADMIN_KEYS, Env, UsageConfig, parse_dotenv, resolve_admin_key,
    resolve_admin_key_with_default_keys,
};
pub use usage::{CostAmount, CostBucket, CostParams, CostQuery, CostResult, CostsApi, CostsPage};
