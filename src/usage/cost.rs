use reqwest::header::ACCEPT;
use serde_json::{Map, Value};

use crate::utils::http::send_checked_json;
use crate::{AdminClient, Result, UsageError};

const COSTS_PATH: &str = "organization/costs";

const KNOWN_PARAMS: &[&str] = &[
    "start_time",
    "end_time",
    "bucket_width",
    "project_ids",
    "group_by",
    "limit",
    "page",
];

/// Named inputs for [`CostQuery::build`].
///
/// Times are unix seconds. `limit`, `page` and `bucket_width` are forwarded
/// as given; the endpoint decides what it accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostParams {
    pub start_time: i64,
    pub end_time: Option<i64>,
    pub bucket_width: Option<String>,
    pub project_ids: Option<Vec<String>>,
    pub group_by: Option<Vec<String>>,
    pub limit: Option<i64>,
    pub page: Option<i64>,
}

impl CostParams {
    pub fn new(start_time: i64) -> Self {
        Self {
            start_time,
            end_time: None,
            bucket_width: None,
            project_ids: None,
            group_by: None,
            limit: None,
            page: None,
        }
    }
}

/// A validated query against `GET /{version}/organization/costs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostQuery {
    start_time: i64,
    end_time: Option<i64>,
    bucket_width: Option<String>,
    project_ids: Option<Vec<String>>,
    group_by: Option<Vec<String>>,
    limit: Option<i64>,
    page: Option<i64>,
}

impl CostQuery {
    pub fn build(params: CostParams) -> Result<Self> {
        let CostParams {
            start_time,
            end_time,
            bucket_width,
            project_ids,
            group_by,
            limit,
            page,
        } = params;
        Ok(Self {
            start_time,
            end_time,
            bucket_width,
            project_ids,
            group_by,
            limit,
            page,
        })
    }

    /// Builds a query from loosely-typed JSON, e.g. parameters read from a
    /// file or forwarded by another service. `null` counts as absent.
    pub fn from_value(value: &Value) -> Result<Self> {
        let Some(obj) = value.as_object() else {
            let msg = "cost query must be a JSON object".to_string();
            return Err(UsageError::InvalidArgument(msg));
        };

        if let Some(unknown) = obj.keys().find(|key| !is_known_param(key)) {
            let msg = format!("unknown parameter: {unknown}");
            return Err(UsageError::InvalidArgument(msg));
        }

        let start_time = integer_param(obj, "start_time")?
            .ok_or_else(|| UsageError::InvalidArgument("start_time is required".to_string()))?;

        Self::build(CostParams {
            start_time,
            end_time: integer_param(obj, "end_time")?,
            bucket_width: string_param(obj, "bucket_width")?,
            project_ids: string_list_param(obj, "project_ids")?,
            group_by: string_list_param(obj, "group_by")?,
            limit: integer_param(obj, "limit")?,
            page: integer_param(obj, "page")?,
        })
    }

    pub fn start_time(&self) -> i64 {
        self.start_time
    }

    pub fn end_time(&self) -> Option<i64> {
        self.end_time
    }

    pub fn bucket_width(&self) -> Option<&str> {
        self.bucket_width.as_deref()
    }

    pub fn project_ids(&self) -> Option<&[String]> {
        self.project_ids.as_deref()
    }

    pub fn group_by(&self) -> Option<&[String]> {
        self.group_by.as_deref()
    }

    pub fn limit(&self) -> Option<i64> {
        self.limit
    }

    pub fn page(&self) -> Option<i64> {
        self.page
    }

    /// Query-string parameters for the request. Only fields that are set
    /// appear; list fields are comma-joined.
    pub fn request_params(&self) -> Map<String, Value> {
        let mut params = Map::<String, Value>::new();
        params.insert("start_time".to_string(), Value::from(self.start_time));
        if let Some(end_time) = self.end_time {
            params.insert("end_time".to_string(), Value::from(end_time));
        }
        if let Some(bucket_width) = self.bucket_width.as_ref() {
            params.insert(
                "bucket_width".to_string(),
                Value::String(bucket_width.clone()),
            );
        }
        if let Some(project_ids) = self.project_ids.as_ref() {
            params.insert(
                "project_ids".to_string(),
                Value::String(project_ids.join(",")),
            );
        }
        if let Some(group_by) = self.group_by.as_ref() {
            params.insert("group_by".to_string(), Value::String(group_by.join(",")));
        }
        if let Some(limit) = self.limit {
            params.insert("limit".to_string(), Value::from(limit));
        }
        if let Some(page) = self.page {
            params.insert("page".to_string(), Value::from(page));
        }
        params
    }

    /// Issues a single GET and returns the JSON body as-is. Non-2xx responses
    /// become [`UsageError::Api`]; nothing is retried.
    pub async fn get(&self, client: &AdminClient) -> Result<Value> {
        let url = client.endpoint(COSTS_PATH);
        let params = self.request_params();
        tracing::debug!(
            url = %url,
            params = ?params.keys().collect::<Vec<_>>(),
            "fetching organization costs"
        );

        let req = client
            .apply_auth(client.http.get(url))
            .header(ACCEPT, "application/json")
            .query(&params);
        send_checked_json::<Value>(req).await
    }

    pub async fn fetch(client: &AdminClient, params: CostParams) -> Result<Value> {
        Self::build(params)?.get(client).await
    }

    pub async fn fetch_value(client: &AdminClient, params: &Value) -> Result<Value> {
        Self::from_value(params)?.get(client).await
    }
}

fn is_known_param(name: &str) -> bool {
    KNOWN_PARAMS.contains(&name)
}

fn present<'a>(obj: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    obj.get(name).filter(|value| !value.is_null())
}

fn integer_param(obj: &Map<String, Value>, name: &str) -> Result<Option<i64>> {
    let Some(value) = present(obj, name) else {
        return Ok(None);
    };
    value
        .as_i64()
        .map(Some)
        .ok_or_else(|| UsageError::InvalidArgument(format!("{name} must be an integer")))
}

fn string_param(obj: &Map<String, Value>, name: &str) -> Result<Option<String>> {
    let Some(value) = present(obj, name) else {
        return Ok(None);
    };
    value
        .as_str()
        .map(|s| Some(s.to_string()))
        .ok_or_else(|| UsageError::InvalidArgument(format!("{name} must be a string")))
}

fn string_list_param(obj: &Map<String, Value>, name: &str) -> Result<Option<Vec<String>>> {
    let Some(value) = present(obj, name) else {
        return Ok(None);
    };
    let Some(items) = value.as_array() else {
        let msg = format!("{name} must be an array");
        return Err(UsageError::InvalidArgument(msg));
    };
    items
        .iter()
        .map(|item| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                UsageError::InvalidArgument(format!("{name} must contain only strings"))
            })
        })
        .collect::<Result<Vec<_>>>()
        .map(Some)
}
