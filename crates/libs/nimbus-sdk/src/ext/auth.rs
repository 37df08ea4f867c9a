use nimbus_bridge::{pending, PendingCall};

use crate::error::AuthError;
use crate::traits::AuthCategory;
use crate::types::*;

type AuthCall<T> = PendingCall<T, AuthError>;

/// Awaitable account operations.
///
/// Auth operations cannot be interrupted: dropping a call stops waiting for
/// it but the collaborator still completes the request.
pub trait AuthCategoryExt: AuthCategory {
    fn sign_up(
        &self,
        username: &str,
        password: &str,
        options: AuthSignUpOptions,
    ) -> AuthCall<AuthSignUpResult> {
        pending::single("auth.sign_up", &self.bridge_config(), |ok, err| {
            self.dispatch_sign_up(username, password, options, ok, err);
            None
        })
    }

    fn confirm_sign_up(
        &self,
        username: &str,
        confirmation_code: &str,
    ) -> AuthCall<AuthSignUpResult> {
        pending::single("auth.confirm_sign_up", &self.bridge_config(), |ok, err| {
            self.dispatch_confirm_sign_up(username, confirmation_code, ok, err);
            None
        })
    }

    fn resend_sign_up_code(&self, username: &str) -> AuthCall<AuthSignUpResult> {
        pending::single("auth.resend_sign_up_code", &self.bridge_config(), |ok, err| {
            self.dispatch_resend_sign_up_code(username, ok, err);
            None
        })
    }

    fn sign_in(
        &self,
        username: Option<&str>,
        password: Option<&str>,
    ) -> AuthCall<AuthSignInResult> {
        self.sign_in_with_options(username, password, AuthSignInOptions::default())
    }

    fn sign_in_with_options(
        &self,
        username: Option<&str>,
        password: Option<&str>,
        options: AuthSignInOptions,
    ) -> AuthCall<AuthSignInResult> {
        pending::single("auth.sign_in", &self.bridge_config(), |ok, err| {
            self.dispatch_sign_in(username, password, options, ok, err);
            None
        })
    }

    fn confirm_sign_in(&self, confirmation_code: &str) -> AuthCall<AuthSignInResult> {
        pending::single("auth.confirm_sign_in", &self.bridge_config(), |ok, err| {
            self.dispatch_confirm_sign_in(confirmation_code, ok, err);
            None
        })
    }

    fn sign_in_with_social_web_ui(&self, provider: AuthProvider) -> AuthCall<AuthSignInResult> {
        self.sign_in_with_social_web_ui_options(provider, AuthWebUiSignInOptions::default())
    }

    fn sign_in_with_social_web_ui_options(
        &self,
        provider: AuthProvider,
        options: AuthWebUiSignInOptions,
    ) -> AuthCall<AuthSignInResult> {
        pending::single("auth.sign_in_with_social_web_ui", &self.bridge_config(), |ok, err| {
            self.dispatch_sign_in_with_social_web_ui(provider, options, ok, err);
            None
        })
    }

    fn sign_in_with_web_ui(&self) -> AuthCall<AuthSignInResult> {
        self.sign_in_with_web_ui_options(AuthWebUiSignInOptions::default())
    }

    fn sign_in_with_web_ui_options(
        &self,
        options: AuthWebUiSignInOptions,
    ) -> AuthCall<AuthSignInResult> {
        pending::single("auth.sign_in_with_web_ui", &self.bridge_config(), |ok, err| {
            self.dispatch_sign_in_with_web_ui(options, ok, err);
            None
        })
    }

    fn fetch_auth_session(&self) -> AuthCall<AuthSession> {
        pending::single("auth.fetch_auth_session", &self.bridge_config(), |ok, err| {
            self.dispatch_fetch_auth_session(ok, err);
            None
        })
    }

    fn remember_device(&self) -> AuthCall<()> {
        pending::single("auth.remember_device", &self.bridge_config(), |ok, err| {
            self.dispatch_remember_device(ok, err);
            None
        })
    }

    /// Forgets the current device.
    fn forget_device(&self) -> AuthCall<()> {
        pending::single("auth.forget_device", &self.bridge_config(), |ok, err| {
            self.dispatch_forget_device(None, ok, err);
            None
        })
    }

    fn forget_remembered_device(&self, device: AuthDevice) -> AuthCall<()> {
        pending::single("auth.forget_device", &self.bridge_config(), |ok, err| {
            self.dispatch_forget_device(Some(device), ok, err);
            None
        })
    }

    fn fetch_devices(&self) -> AuthCall<Vec<AuthDevice>> {
        pending::single("auth.fetch_devices", &self.bridge_config(), |ok, err| {
            self.dispatch_fetch_devices(ok, err);
            None
        })
    }

    fn reset_password(&self, username: &str) -> AuthCall<AuthResetPasswordResult> {
        pending::single("auth.reset_password", &self.bridge_config(), |ok, err| {
            self.dispatch_reset_password(username, ok, err);
            None
        })
    }

    fn confirm_reset_password(&self, new_password: &str, confirmation_code: &str) -> AuthCall<()> {
        pending::single("auth.confirm_reset_password", &self.bridge_config(), |ok, err| {
            self.dispatch_confirm_reset_password(new_password, confirmation_code, ok, err);
            None
        })
    }

    fn update_password(&self, old_password: &str, new_password: &str) -> AuthCall<()> {
        pending::single("auth.update_password", &self.bridge_config(), |ok, err| {
            self.dispatch_update_password(old_password, new_password, ok, err);
            None
        })
    }

    fn fetch_user_attributes(&self) -> AuthCall<Vec<AuthUserAttribute>> {
        pending::single("auth.fetch_user_attributes", &self.bridge_config(), |ok, err| {
            self.dispatch_fetch_user_attributes(ok, err);
            None
        })
    }

    fn update_user_attribute(
        &self,
        attribute: AuthUserAttribute,
    ) -> AuthCall<AuthUpdateAttributeResult> {
        pending::single("auth.update_user_attribute", &self.bridge_config(), |ok, err| {
            self.dispatch_update_user_attribute(attribute, ok, err);
            None
        })
    }

    fn update_user_attributes(
        &self,
        attributes: Vec<AuthUserAttribute>,
    ) -> AuthCall<AttributeUpdates> {
        pending::single("auth.update_user_attributes", &self.bridge_config(), |ok, err| {
            self.dispatch_update_user_attributes(attributes, ok, err);
            None
        })
    }

    fn resend_user_attribute_confirmation_code(
        &self,
        attribute_key: AuthUserAttributeKey,
    ) -> AuthCall<AuthCodeDeliveryDetails> {
        pending::single(
            "auth.resend_user_attribute_confirmation_code",
            &self.bridge_config(),
            |ok, err| {
                self.dispatch_resend_user_attribute_confirmation_code(attribute_key, ok, err);
                None
            },
        )
    }

    fn confirm_user_attribute(
        &self,
        attribute_key: AuthUserAttributeKey,
        confirmation_code: &str,
    ) -> AuthCall<()> {
        pending::single("auth.confirm_user_attribute", &self.bridge_config(), |ok, err| {
            self.dispatch_confirm_user_attribute(attribute_key, confirmation_code, ok, err);
            None
        })
    }

    fn sign_out(&self) -> AuthCall<()> {
        self.sign_out_with_options(AuthSignOutOptions::default())
    }

    fn sign_out_with_options(&self, options: AuthSignOutOptions) -> AuthCall<()> {
        pending::single("auth.sign_out", &self.bridge_config(), |ok, err| {
            self.dispatch_sign_out(options, ok, err);
            None
        })
    }
}

impl<C: AuthCategory + ?Sized> AuthCategoryExt for C {}
