use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum AuthUserAttributeKey {
    Email,
    EmailVerified,
    PhoneNumber,
    PhoneNumberVerified,
    Name,
    GivenName,
    FamilyName,
    PreferredUsername,
    Locale,
    Custom(String),
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthUserAttribute {
    pub key: AuthUserAttributeKey,
    pub value: String,
}

impl AuthUserAttribute {
    pub fn new(key: AuthUserAttributeKey, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMedium {
    Email,
    Sms,
    Phone,
    Unknown,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthCodeDeliveryDetails {
    pub destination: String,
    pub delivery_medium: DeliveryMedium,
    pub attribute_name: Option<String>,
}

// ── Sign up ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthSignUpOptions {
    pub user_attributes: Vec<AuthUserAttribute>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SignUpStep {
    ConfirmSignUp,
    Done,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthSignUpResult {
    pub is_sign_up_complete: bool,
    pub next_step: SignUpStep,
    pub code_delivery_details: Option<AuthCodeDeliveryDetails>,
    pub user_id: Option<String>,
}

// ── Sign in ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthSignInOptions {
    pub metadata: BTreeMap<String, String>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SignInStep {
    ConfirmSignInWithSmsMfaCode,
    ConfirmSignInWithCustomChallenge,
    ConfirmSignInWithNewPassword,
    ResetPassword,
    ConfirmSignUp,
    Done,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthSignInResult {
    pub is_signed_in: bool,
    pub next_step: SignInStep,
    pub code_delivery_details: Option<AuthCodeDeliveryDetails>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AuthProvider {
    Amazon,
    Apple,
    Facebook,
    Google,
    Custom(String),
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthWebUiSignInOptions {
    pub scopes: Vec<String>,
    pub idp_identifier: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthSession {
    pub is_signed_in: bool,
    pub identity_id: Option<String>,
    pub user_sub: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthSignOutOptions {
    pub global_sign_out: bool,
}

// ── Devices ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthDevice {
    pub device_id: String,
    pub device_name: Option<String>,
}

// ── Passwords and attributes ──────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ResetPasswordStep {
    ConfirmResetPasswordWithCode,
    Done,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthResetPasswordResult {
    pub is_password_reset: bool,
    pub next_step: ResetPasswordStep,
    pub code_delivery_details: Option<AuthCodeDeliveryDetails>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UpdateAttributeStep {
    ConfirmAttributeWithCode,
    Done,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthUpdateAttributeResult {
    pub is_updated: bool,
    pub next_step: UpdateAttributeStep,
    pub code_delivery_details: Option<AuthCodeDeliveryDetails>,
}

pub type AttributeUpdates = BTreeMap<AuthUserAttributeKey, AuthUpdateAttributeResult>;
