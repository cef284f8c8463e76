//! Integration tests for the data provider against a recording transport.
//!
//! These tests pin down the requests each action produces and how replies
//! are shaped, without touching the network.

use crud_rest_provider::clients::{HttpError, HttpMethod, HttpRequest, HttpResponse};
use crud_rest_provider::provider::{
    DeleteManyParams, GetOneParams, IntegratedParams, ResourceRef, UpdateManyParams,
};
use crud_rest_provider::query::JoinSpec;
use crud_rest_provider::{
    encode_params_in_resource, ApiUrl, DataProvider, HttpResponseError, Params, ProviderConfig,
    ProviderError, RequestIntent,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Requests = Arc<Mutex<Vec<HttpRequest>>>;

fn test_config() -> ProviderConfig {
    ProviderConfig::builder()
        .api_url(ApiUrl::new("https://test.test/api").unwrap())
        .build()
        .unwrap()
}

/// Creates a provider whose transport records every request and answers
/// with `reply(request)`.
fn recording_provider<R>(
    config: ProviderConfig,
    reply: R,
) -> (
    DataProvider<impl crud_rest_provider::Transport>,
    Requests,
)
where
    R: Fn(&HttpRequest) -> Result<HttpResponse, HttpError> + Send + Sync + 'static,
{
    let requests: Requests = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&requests);
    let reply = Arc::new(reply);

    let transport = move |request: HttpRequest| {
        let log = Arc::clone(&log);
        let reply = Arc::clone(&reply);
        async move {
            let result = reply(&request);
            log.lock().unwrap().push(request);
            result
        }
    };

    (DataProvider::new(config, transport), requests)
}

fn decoded(url: &str) -> String {
    urlencoding::decode(url).unwrap().into_owned()
}

// ============================================================================
// Request shapes
// ============================================================================

#[tokio::test]
async fn test_get_one_issues_get_without_body() {
    let (provider, requests) =
        recording_provider(test_config(), |_| Ok(HttpResponse::from_json(json!({ "id": "5" }))));

    let response = provider
        .call("GET_ONE", "books", json!({ "id": "5" }))
        .await
        .unwrap();

    assert_eq!(response.data, json!({ "id": "5" }));
    let requests = requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, HttpMethod::Get);
    assert_eq!(requests[0].url, "https://test.test/api/books/5");
    assert!(requests[0].body.is_none());
}

#[tokio::test]
async fn test_get_list_query_and_envelope() {
    let (provider, requests) = recording_provider(test_config(), |_| {
        Ok(HttpResponse::from_json(json!({
            "data": [{ "id": 1, "year": 1965 }],
            "total": 1
        })))
    });

    let response = provider
        .call(
            "GET_LIST",
            "books",
            json!({
                "pagination": { "page": 1, "perPage": 10 },
                "sort": { "field": "year", "order": "ASC" },
                "filter": { "year": 5 }
            }),
        )
        .await
        .unwrap();

    assert_eq!(response.data, json!([{ "id": 1, "year": 1965 }]));
    assert_eq!(response.total, Some(1));

    let requests = requests.lock().unwrap();
    let url = decoded(&requests[0].url);
    assert!(url.starts_with("https://test.test/api/books?"));
    assert!(url.contains("filter[0]=year||$cont||5"));
    assert!(url.contains("limit=10"));
    assert!(url.contains("offset=0"));
    assert!(url.contains("sort[0]=year,ASC"));
}

#[tokio::test]
async fn test_get_list_unescapes_reserved_field() {
    let (provider, requests) = recording_provider(test_config(), |_| {
        Ok(HttpResponse::from_json(json!({ "data": [], "total": 0 })))
    });

    provider
        .call(
            "getList",
            "users",
            json!({
                "pagination": { "page": 2, "perPage": 25 },
                "filter": { "_address.city": "Paris" }
            }),
        )
        .await
        .unwrap();

    let url = decoded(&requests.lock().unwrap()[0].url);
    assert!(url.contains("filter[0]=address.city||$cont||Paris"));
    assert!(url.contains("offset=25"));
}

#[tokio::test]
async fn test_get_one_with_encoded_join_and_fields() {
    let (provider, requests) =
        recording_provider(test_config(), |_| Ok(HttpResponse::from_json(json!({ "id": 1 }))));

    let resource = encode_params_in_resource(
        "books",
        &IntegratedParams::new()
            .join(JoinSpec::new("author").select(["name", "born"]))
            .fields(["id", "title"]),
    );

    provider
        .call("GET_ONE", &resource, json!({ "id": 1 }))
        .await
        .unwrap();

    let url = decoded(&requests.lock().unwrap()[0].url);
    assert_eq!(
        url,
        "https://test.test/api/books/1?join[0]=author||name,born&fields=id,title"
    );
}

#[tokio::test]
async fn test_malformed_resource_payload_is_ignored() {
    let (provider, requests) =
        recording_provider(test_config(), |_| Ok(HttpResponse::from_json(json!({ "id": 1 }))));

    provider
        .call("GET_ONE", "books_._._._{oops", json!({ "id": 1 }))
        .await
        .unwrap();

    assert_eq!(
        requests.lock().unwrap()[0].url,
        "https://test.test/api/books/1"
    );
}

#[tokio::test]
async fn test_get_many_reference_adds_target_condition() {
    let (provider, requests) = recording_provider(test_config(), |_| {
        Ok(HttpResponse::from_json(json!({ "data": [{ "id": 3 }], "total": 12 })))
    });

    let response = provider
        .call(
            "GET_MANY_REFERENCE",
            "comments",
            json!({
                "target": "postId",
                "id": 42,
                "pagination": { "page": 1, "perPage": 5 },
                "sort": { "field": "createdAt", "order": "DESC" },
                "filter": {}
            }),
        )
        .await
        .unwrap();

    assert_eq!(response.total, Some(12));
    let url = decoded(&requests.lock().unwrap()[0].url);
    assert_eq!(
        url,
        "https://test.test/api/comments?filter[0]=postId||$eq||42&sort[0]=createdAt,DESC&limit=5&offset=0"
    );
}

// ============================================================================
// Writes
// ============================================================================

#[tokio::test]
async fn test_create_merges_server_id() {
    let (provider, requests) =
        recording_provider(test_config(), |_| Ok(HttpResponse::from_json(json!({ "id": 1 }))));

    let response = provider
        .call("CREATE", "books", json!({ "data": { "name": "x" } }))
        .await
        .unwrap();

    assert_eq!(response.data, json!({ "name": "x", "id": 1 }));
    assert!(response.total.is_none());

    let requests = requests.lock().unwrap();
    assert_eq!(requests[0].method, HttpMethod::Post);
    assert_eq!(requests[0].url, "https://test.test/api/books");
    assert_eq!(requests[0].body.as_deref(), Some(r#"{"name":"x"}"#));
}

#[tokio::test]
async fn test_update_many_issues_one_put_per_id() {
    let (provider, requests) = recording_provider(test_config(), |request| {
        let id = request.url.rsplit('/').next().unwrap_or_default().to_string();
        Ok(HttpResponse::from_json(json!({ "id": id })))
    });

    let response = provider
        .call(
            "UPDATE_MANY",
            "books",
            json!({ "ids": [1, 2], "data": { "x": 1 } }),
        )
        .await
        .unwrap();

    assert_eq!(response.data, json!([{ "id": "1" }, { "id": "2" }]));

    let requests = requests.lock().unwrap();
    assert_eq!(requests.len(), 2);
    let mut urls: Vec<&str> = requests.iter().map(|r| r.url.as_str()).collect();
    urls.sort_unstable();
    assert_eq!(
        urls,
        ["https://test.test/api/books/1", "https://test.test/api/books/2"]
    );
    for request in requests.iter() {
        assert_eq!(request.method, HttpMethod::Put);
        assert_eq!(request.body.as_deref(), Some(r#"{"x":1}"#));
    }
}

#[tokio::test]
async fn test_bulk_result_order_follows_ids_not_completion() {
    let config = test_config();
    let transport = |request: HttpRequest| async move {
        let id: u64 = request
            .url
            .rsplit('/')
            .next()
            .and_then(|id| id.parse().ok())
            .unwrap_or_default();
        // Earlier ids settle later.
        tokio::time::sleep(Duration::from_millis(30 - id * 10)).await;
        Ok::<_, HttpError>(HttpResponse::from_json(json!({ "id": id })))
    };
    let provider = DataProvider::new(config, transport);

    let response = provider
        .execute(
            "books",
            Params::DeleteMany(DeleteManyParams {
                ids: vec![1.into(), 2.into(), 3.into()],
            }),
        )
        .await
        .unwrap();

    assert_eq!(response.data, json!([{ "id": 1 }, { "id": 2 }, { "id": 3 }]));
}

#[tokio::test]
async fn test_bulk_failure_rejects_whole_call() {
    let (provider, _) = recording_provider(test_config(), |request| {
        if request.url.ends_with("/2") {
            Err(HttpError::Response(HttpResponseError {
                code: 404,
                message: "Book 2 not found".to_string(),
                body: json!({ "message": "Book 2 not found" }),
            }))
        } else {
            Ok(HttpResponse::from_json(json!({ "id": 1 })))
        }
    });

    let result = provider
        .execute(
            "books",
            Params::UpdateMany(UpdateManyParams {
                ids: vec![1.into(), 2.into()],
                data: json!({ "x": 1 }),
            }),
        )
        .await;

    match result {
        Err(ProviderError::Http(HttpError::Response(e))) => {
            assert_eq!(e.code, 404);
            assert_eq!(e.message, "Book 2 not found");
        }
        other => panic!("expected the transport error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_delete_returns_reply_body() {
    let (provider, requests) = recording_provider(test_config(), |_| {
        Ok(HttpResponse::from_json(json!({ "id": 7, "title": "gone" })))
    });

    let response = provider
        .call("DELETE", "books", json!({ "id": 7, "previousData": { "id": 7 } }))
        .await
        .unwrap();

    assert_eq!(response.data, json!({ "id": 7, "title": "gone" }));
    let requests = requests.lock().unwrap();
    assert_eq!(requests[0].method, HttpMethod::Delete);
    assert_eq!(requests[0].url, "https://test.test/api/books/7");
}

// ============================================================================
// Hooks and errors
// ============================================================================

#[tokio::test]
async fn test_request_mutator_runs_for_bulk_actions() {
    let config = ProviderConfig::builder()
        .api_url(ApiUrl::new("https://test.test/api").unwrap())
        .request_mutator(|intent: RequestIntent| match intent.params {
            Params::DeleteMany(mut params) => {
                params.ids.retain(|id| id.to_string() != "2");
                RequestIntent::new(intent.resource, Params::DeleteMany(params))
            }
            params => RequestIntent::new(intent.resource, params),
        })
        .build()
        .unwrap();
    let (provider, requests) =
        recording_provider(config, |_| Ok(HttpResponse::from_json(Value::Null)));

    let response = provider
        .call("DELETE_MANY", "books", json!({ "ids": [1, 2, 3] }))
        .await
        .unwrap();

    assert_eq!(response.data, json!([null, null]));
    assert_eq!(requests.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_request_mutator_can_change_the_action() {
    let config = ProviderConfig::builder()
        .api_url(ApiUrl::new("https://test.test/api").unwrap())
        .request_mutator(|intent: RequestIntent| {
            RequestIntent::new(
                intent.resource,
                Params::GetOne(GetOneParams { id: "me".into() }),
            )
        })
        .build()
        .unwrap();
    let (provider, requests) =
        recording_provider(config, |_| Ok(HttpResponse::from_json(json!({ "id": "me" }))));

    let response = provider
        .call("DELETE", "profiles", json!({ "id": 1 }))
        .await
        .unwrap();

    assert_eq!(response.data, json!({ "id": "me" }));
    let requests = requests.lock().unwrap();
    assert_eq!(requests[0].method, HttpMethod::Get);
    assert_eq!(requests[0].url, "https://test.test/api/profiles/me");
}

#[tokio::test]
async fn test_unknown_action_issues_no_request() {
    let (provider, requests) =
        recording_provider(test_config(), |_| Ok(HttpResponse::from_json(Value::Null)));

    let err = provider
        .call("GET_EVERYTHING", "books", json!({}))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("GET_EVERYTHING"));
    assert!(requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_filter_operator_issues_no_request() {
    let (provider, requests) =
        recording_provider(test_config(), |_| Ok(HttpResponse::from_json(Value::Null)));

    let err = provider
        .call(
            "GET_LIST",
            "books",
            json!({
                "pagination": { "page": 1, "perPage": 10 },
                "filter": { "title||$like": "dune" }
            }),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Query(_)));
    assert!(requests.lock().unwrap().is_empty());
}

// ============================================================================
// Resource codec
// ============================================================================

#[test]
fn test_resource_codec_round_trip() {
    let params = IntegratedParams::new()
        .join(JoinSpec::new("author"))
        .join(JoinSpec::new("author.publisher").select(["name"]))
        .fields(["id"]);

    let decoded = ResourceRef::parse(&encode_params_in_resource("books", &params));

    assert_eq!(decoded.real_resource, "books");
    assert_eq!(decoded.integrated_params, Some(params));
}

#[test]
fn test_resource_without_separator_decodes_unchanged() {
    let decoded = ResourceRef::parse("books");
    assert_eq!(decoded.real_resource, "books");
    assert!(decoded.integrated_params.is_none());
}
