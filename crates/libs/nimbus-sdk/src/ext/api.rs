use nimbus_bridge::{pending, subscription, PendingCall, SubscriptionOperation};

use crate::error::ApiError;
use crate::traits::ApiCategory;
use crate::types::{GraphQlRequest, GraphQlResponse, RestMethod, RestOptions, RestResponse};

/// A live GraphQL subscription: response events plus connection state.
///
/// Response events are conflated by default: a subscriber that attaches or
/// polls late sees only the newest event. Configure
/// [`ReplayPolicy::Window`](nimbus_bridge::ReplayPolicy::Window) or
/// [`ReplayPolicy::Full`](nimbus_bridge::ReplayPolicy::Full) through
/// [`BridgeConfig::with_event_replay`](nimbus_bridge::BridgeConfig::with_event_replay)
/// when every event matters. Connection states are always kept in full.
pub type GraphQlSubscription = SubscriptionOperation<GraphQlResponse, ApiError>;

fn rest<C>(
    api: &C,
    operation: &'static str,
    method: RestMethod,
    api_name: Option<&str>,
    options: RestOptions,
) -> PendingCall<RestResponse, ApiError>
where
    C: ApiCategory + ?Sized,
{
    pending::single(operation, &api.bridge_config(), |on_success, on_failure| {
        api.dispatch_rest(method, api_name, options, on_success, on_failure)
    })
}

/// Awaitable GraphQL and REST calls. Dropping an unresolved call cancels the
/// underlying request.
pub trait ApiCategoryExt: ApiCategory {
    fn query(&self, request: GraphQlRequest) -> PendingCall<GraphQlResponse, ApiError> {
        pending::single("api.query", &self.bridge_config(), |on_success, on_failure| {
            self.dispatch_query(None, request, on_success, on_failure)
        })
    }

    fn query_on(
        &self,
        api_name: &str,
        request: GraphQlRequest,
    ) -> PendingCall<GraphQlResponse, ApiError> {
        pending::single("api.query", &self.bridge_config(), |on_success, on_failure| {
            self.dispatch_query(Some(api_name), request, on_success, on_failure)
        })
    }

    fn mutate(&self, request: GraphQlRequest) -> PendingCall<GraphQlResponse, ApiError> {
        pending::single("api.mutate", &self.bridge_config(), |on_success, on_failure| {
            self.dispatch_mutate(None, request, on_success, on_failure)
        })
    }

    fn mutate_on(
        &self,
        api_name: &str,
        request: GraphQlRequest,
    ) -> PendingCall<GraphQlResponse, ApiError> {
        pending::single("api.mutate", &self.bridge_config(), |on_success, on_failure| {
            self.dispatch_mutate(Some(api_name), request, on_success, on_failure)
        })
    }

    /// Opens a subscription. The connection state starts at `Connecting`.
    ///
    /// Events are conflated to the newest one under the default
    /// [`BridgeConfig`](nimbus_bridge::BridgeConfig); see
    /// [`GraphQlSubscription`] for keeping more.
    fn subscribe(&self, request: GraphQlRequest) -> GraphQlSubscription {
        subscription::subscribe("api.subscribe", &self.bridge_config(), |callbacks| {
            self.dispatch_subscribe(None, request, callbacks)
        })
    }

    /// [`subscribe`](Self::subscribe) against a named API.
    fn subscribe_on(&self, api_name: &str, request: GraphQlRequest) -> GraphQlSubscription {
        subscription::subscribe("api.subscribe", &self.bridge_config(), |callbacks| {
            self.dispatch_subscribe(Some(api_name), request, callbacks)
        })
    }

    fn get(&self, options: RestOptions) -> PendingCall<RestResponse, ApiError> {
        rest(self, "api.get", RestMethod::Get, None, options)
    }

    fn get_on(&self, api_name: &str, options: RestOptions) -> PendingCall<RestResponse, ApiError> {
        rest(self, "api.get", RestMethod::Get, Some(api_name), options)
    }

    fn put(&self, options: RestOptions) -> PendingCall<RestResponse, ApiError> {
        rest(self, "api.put", RestMethod::Put, None, options)
    }

    fn put_on(&self, api_name: &str, options: RestOptions) -> PendingCall<RestResponse, ApiError> {
        rest(self, "api.put", RestMethod::Put, Some(api_name), options)
    }

    fn post(&self, options: RestOptions) -> PendingCall<RestResponse, ApiError> {
        rest(self, "api.post", RestMethod::Post, None, options)
    }

    fn post_on(&self, api_name: &str, options: RestOptions) -> PendingCall<RestResponse, ApiError> {
        rest(self, "api.post", RestMethod::Post, Some(api_name), options)
    }

    fn delete(&self, options: RestOptions) -> PendingCall<RestResponse, ApiError> {
        rest(self, "api.delete", RestMethod::Delete, None, options)
    }

    fn delete_on(
        &self,
        api_name: &str,
        options: RestOptions,
    ) -> PendingCall<RestResponse, ApiError> {
        rest(
            self,
            "api.delete",
            RestMethod::Delete,
            Some(api_name),
            options,
        )
    }

    fn head(&self, options: RestOptions) -> PendingCall<RestResponse, ApiError> {
        rest(self, "api.head", RestMethod::Head, None, options)
    }

    fn head_on(&self, api_name: &str, options: RestOptions) -> PendingCall<RestResponse, ApiError> {
        rest(self, "api.head", RestMethod::Head, Some(api_name), options)
    }

    fn patch(&self, options: RestOptions) -> PendingCall<RestResponse, ApiError> {
        rest(self, "api.patch", RestMethod::Patch, None, options)
    }

    fn patch_on(
        &self,
        api_name: &str,
        options: RestOptions,
    ) -> PendingCall<RestResponse, ApiError> {
        rest(
            self,
            "api.patch",
            RestMethod::Patch,
            Some(api_name),
            options,
        )
    }
}

impl<C: ApiCategory + ?Sized> ApiCategoryExt for C {}
