//! Maps an action and its parameters to concrete HTTP requests.
//!
//! | Action | Method | URL | Query |
//! |---|---|---|---|
//! | get list | GET | `{api}/{resource}` | filter, limit, page, sort, offset, join, fields |
//! | get one | GET | `{api}/{resource}/{id}` | join, fields |
//! | get many | GET | `{api}/{resource}` | `id $in ids`, join, fields |
//! | get many reference | GET | `{api}/{resource}` | filter, `target $eq id`, sort, limit, offset |
//! | create | POST | `{api}/{resource}` | |
//! | update | PATCH | `{api}/{resource}/{id}` | |
//! | delete | DELETE | `{api}/{resource}/{id}` | |
//! | update many | PUT per id | `{api}/{resource}/{id}` | |
//! | delete many | DELETE per id | `{api}/{resource}/{id}` | |

use serde_json::Value;

use crate::clients::{HttpError, HttpMethod, HttpRequest};
use crate::config::ApiUrl;
use crate::provider::filter::compose_filter;
use crate::provider::resource::ResourceRef;
use crate::provider::{Params, ProviderError, RecordId};
use crate::query::{CondOperator, QueryBuilder, QueryFilter, QuerySort, LIST_DELIMITER};

/// The requests an action turns into.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// One request whose reply is shaped by [`convert_response`](crate::provider::convert_response).
    Single(HttpRequest),
    /// One request per id, in id order.
    FanOut(Vec<HttpRequest>),
}

/// Builds the request(s) for `params` against `raw_resource`.
///
/// `raw_resource` may carry encoded join and field parameters; they are
/// decoded here.
///
/// # Errors
///
/// Returns [`ProviderError::Query`] if a filter key names an unknown
/// operator.
///
/// # Example
///
/// ```rust
/// use crud_rest_provider::ApiUrl;
/// use crud_rest_provider::clients::HttpMethod;
/// use crud_rest_provider::provider::{convert_request, Dispatch, GetOneParams, Params};
///
/// let api_url = ApiUrl::new("https://test.test/api").unwrap();
/// let params = Params::GetOne(GetOneParams { id: "5".into() });
///
/// let Dispatch::Single(request) = convert_request(&api_url, "books", &params).unwrap() else {
///     unreachable!();
/// };
/// assert_eq!(request.method, HttpMethod::Get);
/// assert_eq!(request.url, "https://test.test/api/books/5");
/// assert!(request.body.is_none());
/// ```
pub fn convert_request(
    api_url: &ApiUrl,
    raw_resource: &str,
    params: &Params,
) -> Result<Dispatch, ProviderError> {
    let resource = ResourceRef::parse(raw_resource);
    let name = resource.real_resource.as_str();

    let dispatch = match params {
        Params::GetList(p) => {
            let query = QueryBuilder::new()
                .set_filters(compose_filter(&p.filter)?)
                .set_limit(p.pagination.per_page)
                .set_page(p.pagination.page);
            let query = with_sort(query, p.sort.as_ref()).set_offset(p.pagination.offset());
            let query = with_integrated_params(query, &resource);
            Dispatch::Single(HttpRequest::get(with_query(api_url.resource_url(name), &query)))
        }
        Params::GetOne(p) => {
            let query = with_integrated_params(QueryBuilder::new(), &resource);
            Dispatch::Single(HttpRequest::get(with_query(
                api_url.record_url(name, &p.id),
                &query,
            )))
        }
        Params::GetMany(p) => {
            let query = QueryBuilder::new().set_filter(QueryFilter::new(
                "id",
                CondOperator::In,
                Value::String(join_ids(&p.ids)),
            ));
            let query = with_integrated_params(query, &resource);
            Dispatch::Single(HttpRequest::get(with_query(api_url.resource_url(name), &query)))
        }
        Params::GetManyReference(p) => {
            let mut filters = compose_filter(&p.filter)?;
            filters.push(QueryFilter::new(
                p.target.clone(),
                CondOperator::Equals,
                p.id.to_value(),
            ));
            let query = with_sort(QueryBuilder::new().set_filters(filters), p.sort.as_ref())
                .set_limit(p.pagination.per_page)
                .set_offset(p.pagination.offset());
            Dispatch::Single(HttpRequest::get(with_query(api_url.resource_url(name), &query)))
        }
        Params::Create(p) => Dispatch::Single(
            HttpRequest::builder(HttpMethod::Post, api_url.resource_url(name))
                .json_body(&p.data)
                .build()
                .map_err(HttpError::from)?,
        ),
        Params::Update(p) => Dispatch::Single(
            HttpRequest::builder(HttpMethod::Patch, api_url.record_url(name, &p.id))
                .json_body(&p.data)
                .build()
                .map_err(HttpError::from)?,
        ),
        Params::Delete(p) => Dispatch::Single(
            HttpRequest::builder(HttpMethod::Delete, api_url.record_url(name, &p.id))
                .build()
                .map_err(HttpError::from)?,
        ),
        Params::UpdateMany(p) => Dispatch::FanOut(
            p.ids
                .iter()
                .map(|id| {
                    HttpRequest::builder(HttpMethod::Put, api_url.record_url(name, id))
                        .json_body(&p.data)
                        .build()
                })
                .collect::<Result<Vec<_>, _>>()
                .map_err(HttpError::from)?,
        ),
        Params::DeleteMany(p) => Dispatch::FanOut(
            p.ids
                .iter()
                .map(|id| {
                    HttpRequest::builder(HttpMethod::Delete, api_url.record_url(name, id)).build()
                })
                .collect::<Result<Vec<_>, _>>()
                .map_err(HttpError::from)?,
        ),
    };

    Ok(dispatch)
}

fn with_sort(query: QueryBuilder, sort: Option<&QuerySort>) -> QueryBuilder {
    match sort {
        Some(sort) if !sort.field.is_empty() => query.sort_by(sort),
        _ => query,
    }
}

fn with_integrated_params(query: QueryBuilder, resource: &ResourceRef) -> QueryBuilder {
    resource
        .joins()
        .iter()
        .fold(query, QueryBuilder::set_join)
        .select(resource.fields())
}

fn with_query(url: String, query: &QueryBuilder) -> String {
    if query.is_empty() {
        url
    } else {
        format!("{url}?{}", query.query())
    }
}

fn join_ids(ids: &[RecordId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(LIST_DELIMITER)
}
