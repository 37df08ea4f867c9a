use nimbus_bridge::{CancelHandle, Consumer, SubscriptionCallbacks};

use super::Collaborator;
use crate::error::ApiError;
use crate::types::*;

/// GraphQL and REST endpoints. `api_name` selects a configured endpoint;
/// `None` means the only one configured.
pub trait ApiCategory: Collaborator {
    fn dispatch_query(
        &self,
        api_name: Option<&str>,
        request: GraphQlRequest,
        on_success: Consumer<GraphQlResponse>,
        on_failure: Consumer<ApiError>,
    ) -> Option<CancelHandle>;

    fn dispatch_mutate(
        &self,
        api_name: Option<&str>,
        request: GraphQlRequest,
        on_success: Consumer<GraphQlResponse>,
        on_failure: Consumer<ApiError>,
    ) -> Option<CancelHandle>;

    /// Opens a GraphQL subscription. The returned handle tears it down.
    fn dispatch_subscribe(
        &self,
        api_name: Option<&str>,
        request: GraphQlRequest,
        callbacks: SubscriptionCallbacks<GraphQlResponse, ApiError>,
    ) -> CancelHandle;

    fn dispatch_rest(
        &self,
        method: RestMethod,
        api_name: Option<&str>,
        options: RestOptions,
        on_success: Consumer<RestResponse>,
        on_failure: Consumer<ApiError>,
    ) -> Option<CancelHandle>;
}
