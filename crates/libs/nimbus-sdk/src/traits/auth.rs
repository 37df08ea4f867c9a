use nimbus_bridge::Consumer;

use super::Collaborator;
use crate::error::AuthError;
use crate::types::*;

/// Account lifecycle. None of these operations can be interrupted once
/// dispatched.
pub trait AuthCategory: Collaborator {
    fn dispatch_sign_up(
        &self,
        username: &str,
        password: &str,
        options: AuthSignUpOptions,
        on_success: Consumer<AuthSignUpResult>,
        on_failure: Consumer<AuthError>,
    );

    fn dispatch_confirm_sign_up(
        &self,
        username: &str,
        confirmation_code: &str,
        on_success: Consumer<AuthSignUpResult>,
        on_failure: Consumer<AuthError>,
    );

    fn dispatch_resend_sign_up_code(
        &self,
        username: &str,
        on_success: Consumer<AuthSignUpResult>,
        on_failure: Consumer<AuthError>,
    );

    /// Credentials may be absent for custom or passwordless flows.
    fn dispatch_sign_in(
        &self,
        username: Option<&str>,
        password: Option<&str>,
        options: AuthSignInOptions,
        on_success: Consumer<AuthSignInResult>,
        on_failure: Consumer<AuthError>,
    );

    fn dispatch_confirm_sign_in(
        &self,
        confirmation_code: &str,
        on_success: Consumer<AuthSignInResult>,
        on_failure: Consumer<AuthError>,
    );

    fn dispatch_sign_in_with_social_web_ui(
        &self,
        provider: AuthProvider,
        options: AuthWebUiSignInOptions,
        on_success: Consumer<AuthSignInResult>,
        on_failure: Consumer<AuthError>,
    );

    fn dispatch_sign_in_with_web_ui(
        &self,
        options: AuthWebUiSignInOptions,
        on_success: Consumer<AuthSignInResult>,
        on_failure: Consumer<AuthError>,
    );

    fn dispatch_fetch_auth_session(
        &self,
        on_success: Consumer<AuthSession>,
        on_failure: Consumer<AuthError>,
    );

    fn dispatch_remember_device(&self, on_success: Consumer<()>, on_failure: Consumer<AuthError>);

    /// Forgets `device`, or the current device when `None`.
    fn dispatch_forget_device(
        &self,
        device: Option<AuthDevice>,
        on_success: Consumer<()>,
        on_failure: Consumer<AuthError>,
    );

    fn dispatch_fetch_devices(
        &self,
        on_success: Consumer<Vec<AuthDevice>>,
        on_failure: Consumer<AuthError>,
    );

    fn dispatch_reset_password(
        &self,
        username: &str,
        on_success: Consumer<AuthResetPasswordResult>,
        on_failure: Consumer<AuthError>,
    );

    fn dispatch_confirm_reset_password(
        &self,
        new_password: &str,
        confirmation_code: &str,
        on_success: Consumer<()>,
        on_failure: Consumer<AuthError>,
    );

    fn dispatch_update_password(
        &self,
        old_password: &str,
        new_password: &str,
        on_success: Consumer<()>,
        on_failure: Consumer<AuthError>,
    );

    fn dispatch_fetch_user_attributes(
        &self,
        on_success: Consumer<Vec<AuthUserAttribute>>,
        on_failure: Consumer<AuthError>,
    );

    fn dispatch_update_user_attribute(
        &self,
        attribute: AuthUserAttribute,
        on_success: Consumer<AuthUpdateAttributeResult>,
        on_failure: Consumer<AuthError>,
    );

    fn dispatch_update_user_attributes(
        &self,
        attributes: Vec<AuthUserAttribute>,
        on_success: Consumer<AttributeUpdates>,
        on_failure: Consumer<AuthError>,
    );

    fn dispatch_resend_user_attribute_confirmation_code(
        &self,
        attribute_key: AuthUserAttributeKey,
        on_success: Consumer<AuthCodeDeliveryDetails>,
        on_failure: Consumer<AuthError>,
    );

    fn dispatch_confirm_user_attribute(
        &self,
        attribute_key: AuthUserAttributeKey,
        confirmation_code: &str,
        on_success: Consumer<()>,
        on_failure: Consumer<AuthError>,
    );

    fn dispatch_sign_out(
        &self,
        options: AuthSignOutOptions,
        on_success: Consumer<()>,
        on_failure: Consumer<AuthError>,
    );
}
