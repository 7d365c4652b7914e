use std::collections::BTreeMap;
use std::path::Path;

use crate::Result;

/// Where admin credentials are looked up: a dotenv file first, then the
/// process environment.
#[derive(Clone, Default)]
pub struct Env {
    pub dotenv: BTreeMap<String, String>,
}

impl std::fmt::Debug for Env {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let keys: Vec<&str> = self.dotenv.keys().map(String::as_str).collect();
        f.debug_struct("Env").field("dotenv_keys", &keys).finish()
    }
}

impl Env {
    pub fn parse_dotenv(contents: &str) -> Self {
        Self {
            dotenv: parse_dotenv(contents),
        }
    }

    pub async fn load_dotenv(path: impl AsRef<Path>) -> Result<Self> {
        let contents = tokio::fs::read_to_string(path.as_ref()).await?;
        Ok(Self::parse_dotenv(&contents))
    }

    /// Trimmed value of `key`. A blank dotenv entry does not hide the
    /// process env, and blank values are never returned.
    pub fn get(&self, key: &str) -> Option<String> {
        let from_dotenv = self.dotenv.get(key).map(|value| value.trim().to_string());
        from_dotenv
            .filter(|value| !value.is_empty())
            .or_else(|| {
                let value = std::env::var(key).ok()?;
                Some(value.trim().to_string())
            })
            .filter(|value| !value.is_empty())
    }

    /// First non-blank value among `keys`, in order.
    pub fn first_of<'a, I>(&self, keys: I) -> Option<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        keys.into_iter().find_map(|key| self.get(key))
    }
}

/// Parses `KEY=value` lines. Comments, `export` prefixes and one level of
/// matching quotes are handled; blank values are kept and filtered by
/// [`Env::get`].
pub fn parse_dotenv(contents: &str) -> BTreeMap<String, String> {
    contents.lines().filter_map(dotenv_entry).collect()
}

fn dotenv_entry(line: &str) -> Option<(String, String)> {
    let line = line.trim();
    if line.starts_with('#') {
        return None;
    }
    let line = line.strip_prefix("export ").unwrap_or(line);
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key.to_string(), unquote(value.trim()).to_string()))
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}
