use std::path::Path;

use nimbus_bridge::{noop_handle, BatchSink, CancelHandle, Consumer, SubscriptionCallbacks};

use crate::error::{ApiError, AuthError, DataStoreError, PredictionsError, StorageError};
use crate::traits::*;
use crate::types::*;

/// An SDK whose every operation fails with `NotImplemented`.
///
/// Failures are delivered synchronously through the failure callback, so the
/// async forms resolve immediately. Wire it in first, then replace categories
/// one at a time.
pub struct StubSdk;

impl Collaborator for StubSdk {}

impl ApiCategory for StubSdk {
    fn dispatch_query(
        &self,
        _api_name: Option<&str>,
        _request: GraphQlRequest,
        _on_success: Consumer<GraphQlResponse>,
        on_failure: Consumer<ApiError>,
    ) -> Option<CancelHandle> {
        on_failure(ApiError::not_implemented("api.query"));
        None
    }

    fn dispatch_mutate(
        &self,
        _api_name: Option<&str>,
        _request: GraphQlRequest,
        _on_success: Consumer<GraphQlResponse>,
        on_failure: Consumer<ApiError>,
    ) -> Option<CancelHandle> {
        on_failure(ApiError::not_implemented("api.mutate"));
        None
    }

    fn dispatch_subscribe(
        &self,
        _api_name: Option<&str>,
        _request: GraphQlRequest,
        callbacks: SubscriptionCallbacks<GraphQlResponse, ApiError>,
    ) -> CancelHandle {
        (callbacks.on_failure)(ApiError::not_implemented("api.subscribe"));
        noop_handle()
    }

    fn dispatch_rest(
        &self,
        method: RestMethod,
        _api_name: Option<&str>,
        _options: RestOptions,
        _on_success: Consumer<RestResponse>,
        on_failure: Consumer<ApiError>,
    ) -> Option<CancelHandle> {
        let method = format!("api.rest.{}", method.as_str());
        on_failure(ApiError::not_implemented(method));
        None
    }
}

impl AuthCategory for StubSdk {
    fn dispatch_sign_up(
        &self,
        _username: &str,
        _password: &str,
        _options: AuthSignUpOptions,
        _on_success: Consumer<AuthSignUpResult>,
        on_failure: Consumer<AuthError>,
    ) {
        on_failure(AuthError::not_implemented("auth.sign_up"));
    }

    fn dispatch_confirm_sign_up(
        &self,
        _username: &str,
        _confirmation_code: &str,
        _on_success: Consumer<AuthSignUpResult>,
        on_failure: Consumer<AuthError>,
    ) {
        on_failure(AuthError::not_implemented("auth.confirm_sign_up"));
    }

    fn dispatch_resend_sign_up_code(
        &self,
        _username: &str,
        _on_success: Consumer<AuthSignUpResult>,
        on_failure: Consumer<AuthError>,
    ) {
        on_failure(AuthError::not_implemented("auth.resend_sign_up_code"));
    }

    fn dispatch_sign_in(
        &self,
        _username: Option<&str>,
        _password: Option<&str>,
        _options: AuthSignInOptions,
        _on_success: Consumer<AuthSignInResult>,
        on_failure: Consumer<AuthError>,
    ) {
        on_failure(AuthError::not_implemented("auth.sign_in"));
    }

    fn dispatch_confirm_sign_in(
        &self,
        _confirmation_code: &str,
        _on_success: Consumer<AuthSignInResult>,
        on_failure: Consumer<AuthError>,
    ) {
        on_failure(AuthError::not_implemented("auth.confirm_sign_in"));
    }

    fn dispatch_sign_in_with_social_web_ui(
        &self,
        _provider: AuthProvider,
        _options: AuthWebUiSignInOptions,
        _on_success: Consumer<AuthSignInResult>,
        on_failure: Consumer<AuthError>,
    ) {
        on_failure(AuthError::not_implemented(
            "auth.sign_in_with_social_web_ui",
        ));
    }

    fn dispatch_sign_in_with_web_ui(
        &self,
        _options: AuthWebUiSignInOptions,
        _on_success: Consumer<AuthSignInResult>,
        on_failure: Consumer<AuthError>,
    ) {
        on_failure(AuthError::not_implemented("auth.sign_in_with_web_ui"));
    }

    fn dispatch_fetch_auth_session(
        &self,
        _on_success: Consumer<AuthSession>,
        on_failure: Consumer<AuthError>,
    ) {
        on_failure(AuthError::not_implemented("auth.fetch_auth_session"));
    }

    fn dispatch_remember_device(&self, _on_success: Consumer<()>, on_failure: Consumer<AuthError>) {
        on_failure(AuthError::not_implemented("auth.remember_device"));
    }

    fn dispatch_forget_device(
        &self,
        _device: Option<AuthDevice>,
        _on_success: Consumer<()>,
        on_failure: Consumer<AuthError>,
    ) {
        on_failure(AuthError::not_implemented("auth.forget_device"));
    }

    fn dispatch_fetch_devices(
        &self,
        _on_success: Consumer<Vec<AuthDevice>>,
        on_failure: Consumer<AuthError>,
    ) {
        on_failure(AuthError::not_implemented("auth.fetch_devices"));
    }

    fn dispatch_reset_password(
        &self,
        _username: &str,
        _on_success: Consumer<AuthResetPasswordResult>,
        on_failure: Consumer<AuthError>,
    ) {
        on_failure(AuthError::not_implemented("auth.reset_password"));
    }

    fn dispatch_confirm_reset_password(
        &self,
        _new_password: &str,
        _confirmation_code: &str,
        _on_success: Consumer<()>,
        on_failure: Consumer<AuthError>,
    ) {
        on_failure(AuthError::not_implemented("auth.confirm_reset_password"));
    }

    fn dispatch_update_password(
        &self,
        _old_password: &str,
        _new_password: &str,
        _on_success: Consumer<()>,
        on_failure: Consumer<AuthError>,
    ) {
        on_failure(AuthError::not_implemented("auth.update_password"));
    }

    fn dispatch_fetch_user_attributes(
        &self,
        _on_success: Consumer<Vec<AuthUserAttribute>>,
        on_failure: Consumer<AuthError>,
    ) {
        on_failure(AuthError::not_implemented("auth.fetch_user_attributes"));
    }

    fn dispatch_update_user_attribute(
        &self,
        _attribute: AuthUserAttribute,
        _on_success: Consumer<AuthUpdateAttributeResult>,
        on_failure: Consumer<AuthError>,
    ) {
        on_failure(AuthError::not_implemented("auth.update_user_attribute"));
    }

    fn dispatch_update_user_attributes(
        &self,
        _attributes: Vec<AuthUserAttribute>,
        _on_success: Consumer<AttributeUpdates>,
        on_failure: Consumer<AuthError>,
    ) {
        on_failure(AuthError::not_implemented("auth.update_user_attributes"));
    }

    fn dispatch_resend_user_attribute_confirmation_code(
        &self,
        _attribute_key: AuthUserAttributeKey,
        _on_success: Consumer<AuthCodeDeliveryDetails>,
        on_failure: Consumer<AuthError>,
    ) {
        on_failure(AuthError::not_implemented(
            "auth.resend_user_attribute_confirmation_code",
        ));
    }

    fn dispatch_confirm_user_attribute(
        &self,
        _attribute_key: AuthUserAttributeKey,
        _confirmation_code: &str,
        _on_success: Consumer<()>,
        on_failure: Consumer<AuthError>,
    ) {
        on_failure(AuthError::not_implemented("auth.confirm_user_attribute"));
    }

    fn dispatch_sign_out(
        &self,
        _options: AuthSignOutOptions,
        _on_success: Consumer<()>,
        on_failure: Consumer<AuthError>,
    ) {
        on_failure(AuthError::not_implemented("auth.sign_out"));
    }
}

impl DataStoreCategory for StubSdk {
    fn dispatch_save(
        &self,
        _item: ModelRecord,
        _predicate: QueryPredicate,
        _on_success: Consumer<()>,
        on_failure: Consumer<DataStoreError>,
    ) {
        on_failure(DataStoreError::not_implemented("datastore.save"));
    }

    fn dispatch_delete(
        &self,
        _item: ModelRecord,
        _predicate: QueryPredicate,
        _on_success: Consumer<()>,
        on_failure: Consumer<DataStoreError>,
    ) {
        on_failure(DataStoreError::not_implemented("datastore.delete"));
    }

    fn dispatch_query(
        &self,
        _model: &str,
        _options: QueryOptions,
        sink: BatchSink<ModelRecord, DataStoreError>,
    ) {
        sink.fail(DataStoreError::not_implemented("datastore.query"));
    }

    fn dispatch_observe(
        &self,
        _selector: ObserveSelector,
        on_start: Consumer<CancelHandle>,
        sink: BatchSink<ItemChange, DataStoreError>,
    ) {
        on_start(noop_handle());
        sink.fail(DataStoreError::not_implemented("datastore.observe"));
    }

    fn dispatch_start(&self, _on_success: Consumer<()>, on_failure: Consumer<DataStoreError>) {
        on_failure(DataStoreError::not_implemented("datastore.start"));
    }

    fn dispatch_stop(&self, _on_success: Consumer<()>, on_failure: Consumer<DataStoreError>) {
        on_failure(DataStoreError::not_implemented("datastore.stop"));
    }

    fn dispatch_clear(&self, _on_success: Consumer<()>, on_failure: Consumer<DataStoreError>) {
        on_failure(DataStoreError::not_implemented("datastore.clear"));
    }
}

impl PredictionsCategory for StubSdk {
    fn dispatch_convert_text_to_speech(
        &self,
        _text: &str,
        _options: TextToSpeechOptions,
        _on_success: Consumer<TextToSpeechResult>,
        on_failure: Consumer<PredictionsError>,
    ) {
        on_failure(PredictionsError::not_implemented(
            "predictions.convert_text_to_speech",
        ));
    }

    fn dispatch_translate_text(
        &self,
        _text: &str,
        _languages: Option<(LanguageType, LanguageType)>,
        _options: TranslateTextOptions,
        _on_success: Consumer<TranslateTextResult>,
        on_failure: Consumer<PredictionsError>,
    ) {
        on_failure(PredictionsError::not_implemented(
            "predictions.translate_text",
        ));
    }

    fn dispatch_identify(
        &self,
        _action: IdentifyAction,
        _image: Vec<u8>,
        _options: IdentifyOptions,
        _on_success: Consumer<IdentifyResult>,
        on_failure: Consumer<PredictionsError>,
    ) {
        on_failure(PredictionsError::not_implemented("predictions.identify"));
    }

    fn dispatch_interpret(
        &self,
        _text: &str,
        _options: InterpretOptions,
        _on_success: Consumer<InterpretResult>,
        on_failure: Consumer<PredictionsError>,
    ) {
        on_failure(PredictionsError::not_implemented("predictions.interpret"));
    }
}

impl StorageCategory for StubSdk {
    fn dispatch_get_url(
        &self,
        _key: &str,
        _options: StorageGetUrlOptions,
        _on_success: Consumer<StorageGetUrlResult>,
        on_failure: Consumer<StorageError>,
    ) {
        on_failure(StorageError::not_implemented("storage.get_url"));
    }

    fn dispatch_download_file(
        &self,
        _key: &str,
        _local: &Path,
        _options: StorageDownloadFileOptions,
        callbacks: DownloadCallbacks,
    ) -> CancelHandle {
        (callbacks.on_failure)(StorageError::not_implemented("storage.download_file"));
        noop_handle()
    }

    fn dispatch_upload_file(
        &self,
        _key: &str,
        _local: &Path,
        _options: StorageUploadFileOptions,
        callbacks: UploadFileCallbacks,
    ) -> CancelHandle {
        (callbacks.on_failure)(StorageError::not_implemented("storage.upload_file"));
        noop_handle()
    }

    fn dispatch_upload_input_stream(
        &self,
        _key: &str,
        _local: InputStream,
        _options: StorageUploadInputStreamOptions,
        callbacks: UploadInputStreamCallbacks,
    ) -> CancelHandle {
        (callbacks.on_failure)(StorageError::not_implemented("storage.upload_input_stream"));
        noop_handle()
    }

    fn dispatch_remove(
        &self,
        _key: &str,
        _options: StorageRemoveOptions,
        _on_success: Consumer<StorageRemoveResult>,
        on_failure: Consumer<StorageError>,
    ) {
        on_failure(StorageError::not_implemented("storage.remove"));
    }

    fn dispatch_list(
        &self,
        _path: &str,
        _options: StorageListOptions,
        _on_success: Consumer<StorageListResult>,
        on_failure: Consumer<StorageError>,
    ) {
        on_failure(StorageError::not_implemented("storage.list"));
    }
}
