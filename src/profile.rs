mod auth;
mod config;
mod env;
mod http;

pub use auth::{DEFAULT_ADMIN_KEYS, resolve_admin_key, resolve_admin_key_with_default_keys};
pub use config::{AdminAuth, UsageConfig};
pub use env::{Env, parse_dotenv};

pub(crate) use auth::HttpAuth;
pub(crate) use http::{apply_http_query_params, build_http_client};

#[cfg(test)]
mod tests;
