mod api;
mod auth;
mod datastore;
mod predictions;
mod storage;

pub use api::{
    GraphQlError, GraphQlRequest, GraphQlResponse, JsonValue, RestMethod, RestOptions, RestResponse,
};
pub use auth::{
    AttributeUpdates, AuthCodeDeliveryDetails, AuthDevice, AuthProvider, AuthResetPasswordResult,
    AuthSession, AuthSignInOptions, AuthSignInResult, AuthSignOutOptions, AuthSignUpOptions,
    AuthSignUpResult, AuthUpdateAttributeResult, AuthUserAttribute, AuthUserAttributeKey,
    AuthWebUiSignInOptions, DeliveryMedium, ResetPasswordStep, SignInStep, SignUpStep,
    UpdateAttributeStep,
};
pub use datastore::{
    ChangeInitiator, ChangeKind, ItemChange, ModelRecord, ObserveSelector, QueryOperator,
    QueryOptions, QueryPage, QueryPredicate, QuerySort, SortOrder,
};
pub use predictions::{
    Identification, IdentifyAction, IdentifyOptions, IdentifyResult, InterpretOptions,
    InterpretResult, LanguageType, Sentiment, TextToSpeechOptions, TextToSpeechResult,
    TranslateTextOptions, TranslateTextResult,
};
pub use storage::{
    InputStream, StorageAccessLevel, StorageDownloadFileOptions, StorageDownloadFileResult,
    StorageGetUrlOptions, StorageGetUrlResult, StorageItem, StorageListOptions, StorageListResult,
    StorageRemoveOptions, StorageRemoveResult, StorageUploadFileOptions, StorageUploadFileResult,
    StorageUploadInputStreamOptions, StorageUploadInputStreamResult, TransferProgress,
};
