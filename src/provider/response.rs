//! Shapes backend replies into the front-end's response envelope.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::clients::HttpResponse;
use crate::provider::Params;

/// The envelope returned to the front-end.
///
/// `total` is only present for paginated actions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProviderResponse {
    pub data: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

impl ProviderResponse {
    /// Creates an envelope without a total.
    #[must_use]
    pub const fn new(data: Value) -> Self {
        Self { data, total: None }
    }
}

/// Shapes a single reply for the action of `params`.
///
/// - list actions read `data` and `total` from the reply
/// - create merges the submitted record with the id the backend assigned;
///   any other field of the reply is discarded
/// - every other action returns the reply body as is
#[must_use]
pub fn convert_response(response: &HttpResponse, params: &Params) -> ProviderResponse {
    match params {
        Params::GetList(_) | Params::GetManyReference(_) => ProviderResponse {
            data: response.json.get("data").cloned().unwrap_or(Value::Null),
            total: response.json.get("total").and_then(Value::as_u64),
        },
        Params::Create(p) => {
            let id = response.json.get("id").cloned().unwrap_or(Value::Null);
            let mut record = match &p.data {
                Value::Object(map) => map.clone(),
                _ => Map::new(),
            };
            record.insert("id".to_string(), id);
            ProviderResponse::new(Value::Object(record))
        }
        Params::GetOne(_)
        | Params::GetMany(_)
        | Params::Update(_)
        | Params::UpdateMany(_)
        | Params::Delete(_)
        | Params::DeleteMany(_) => ProviderResponse::new(response.json.clone()),
    }
}

/// Collects fan-out replies into one envelope, keeping their order.
#[must_use]
pub fn aggregate_responses(responses: Vec<HttpResponse>) -> ProviderResponse {
    ProviderResponse::new(Value::Array(
        responses.into_iter().map(|response| response.json).collect(),
    ))
}
