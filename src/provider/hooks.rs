//! Request and response mutation hooks.
//!
//! Both hooks are optional strategies fixed at construction time through
//! [`ProviderConfigBuilder`](crate::ProviderConfigBuilder). A missing hook
//! behaves as the identity. Hooks are trusted: a panicking hook unwinds
//! through the call.

use crate::clients::HttpResponse;
use crate::provider::{Action, Params};

/// What the provider is about to do: a resource and the action's parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestIntent {
    /// The resource name, without any encoded join or field parameters.
    pub resource: String,
    pub params: Params,
}

impl RequestIntent {
    /// Creates a new intent.
    #[must_use]
    pub fn new(resource: impl Into<String>, params: Params) -> Self {
        Self {
            resource: resource.into(),
            params,
        }
    }

    /// Returns the action of the intent's parameters.
    #[must_use]
    pub const fn action(&self) -> Action {
        self.params.action()
    }
}

/// Rewrites an intent before it is turned into requests.
///
/// Runs before every dispatch, bulk actions included. Any
/// `Fn(RequestIntent) -> RequestIntent` closure implements it.
pub trait RequestMutator: Send + Sync {
    fn mutate_request(&self, intent: RequestIntent) -> RequestIntent;
}

impl<F> RequestMutator for F
where
    F: Fn(RequestIntent) -> RequestIntent + Send + Sync,
{
    fn mutate_request(&self, intent: RequestIntent) -> RequestIntent {
        self(intent)
    }
}

/// Rewrites the intent used to shape a reply, after the transport settled.
///
/// The reply itself is read-only. Not applied to bulk actions. Any
/// `Fn(&HttpResponse, RequestIntent) -> RequestIntent` closure implements it.
pub trait ResponseMutator: Send + Sync {
    fn mutate_response(&self, response: &HttpResponse, intent: RequestIntent) -> RequestIntent;
}

impl<F> ResponseMutator for F
where
    F: Fn(&HttpResponse, RequestIntent) -> RequestIntent + Send + Sync,
{
    fn mutate_response(&self, response: &HttpResponse, intent: RequestIntent) -> RequestIntent {
        self(response, intent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{DeleteParams, GetOneParams, RecordId};
    use serde_json::json;

    fn get_one(id: i64) -> RequestIntent {
        RequestIntent::new("books", Params::GetOne(GetOneParams { id: RecordId::from(id) }))
    }

    #[test]
    fn test_intent_action_follows_params() {
        let intent = get_one(1);
        assert_eq!(intent.action(), Action::GetOne);

        let intent = RequestIntent {
            params: Params::Delete(DeleteParams { id: RecordId::from(1) }),
            ..intent
        };
        assert_eq!(intent.action(), Action::Delete);
    }

    #[test]
    fn test_closure_request_mutator() {
        let mutator = |mut intent: RequestIntent| {
            intent.resource = format!("v2/{}", intent.resource);
            intent
        };

        let intent = mutator.mutate_request(get_one(3));
        assert_eq!(intent.resource, "v2/books");
        assert_eq!(intent.params, get_one(3).params);
    }

    #[test]
    fn test_closure_response_mutator_sees_reply() {
        let mutator = |response: &HttpResponse, mut intent: RequestIntent| {
            if response.json["archived"] == json!(true) {
                intent.resource = "archive".to_string();
            }
            intent
        };

        let reply = HttpResponse::from_json(json!({ "archived": true }));
        assert_eq!(mutator.mutate_response(&reply, get_one(1)).resource, "archive");

        let reply = HttpResponse::from_json(json!({}));
        assert_eq!(mutator.mutate_response(&reply, get_one(1)).resource, "books");
    }

    #[test]
    fn test_hooks_are_object_safe() {
        let request: Box<dyn RequestMutator> = Box::new(|intent: RequestIntent| intent);
        let response: Box<dyn ResponseMutator> =
            Box::new(|_: &HttpResponse, intent: RequestIntent| intent);

        let intent = request.mutate_request(get_one(2));
        let intent = response.mutate_response(&HttpResponse::from_json(json!(null)), intent);
        assert_eq!(intent, get_one(2));
    }
}
