//! Code-to-message lookups for the sign-in, sign-up and account pages.

use crate::backend::auth::AuthErrorCode;

pub const DEFAULT_MESSAGE: &str = "An error occurred. Please try again.";
const NETWORK_MESSAGE: &str = "A network error occurred. Please check your connection.";
const INVALID_EMAIL_MESSAGE: &str = "The email you entered is invalid.";
const WRONG_CREDENTIALS_MESSAGE: &str = "Wrong email or password.";

pub const RESET_EMAIL_REQUIRED: &str = "Please enter your email to reset your password.";
pub const RESET_EMAIL_SENT: &str = "Password reset email sent. Check your inbox.";
pub const RESET_EMAIL_FAILED: &str = "Failed to send password reset email. Please try again.";
pub const NO_CURRENT_USER: &str = "No authenticated user found.";

pub fn sign_in_message(code: &AuthErrorCode) -> &'static str {
    match code {
        AuthErrorCode::InvalidCredential => WRONG_CREDENTIALS_MESSAGE,
        AuthErrorCode::InvalidEmail => INVALID_EMAIL_MESSAGE,
        AuthErrorCode::UserNotFound => "This email is not registered.",
        AuthErrorCode::WrongPassword => WRONG_CREDENTIALS_MESSAGE,
        AuthErrorCode::MissingPassword => "Please enter the password.",
        AuthErrorCode::TooManyRequests => "Too many login attempts. Please try again later.",
        AuthErrorCode::NetworkRequestFailed => NETWORK_MESSAGE,
        _ => DEFAULT_MESSAGE,
    }
}

pub fn sign_up_message(code: &AuthErrorCode) -> &'static str {
    match code {
        AuthErrorCode::EmailAlreadyInUse => "This email is already in use.",
        AuthErrorCode::InvalidEmail => INVALID_EMAIL_MESSAGE,
        AuthErrorCode::WeakPassword => "The password is too weak.",
        AuthErrorCode::NetworkRequestFailed => NETWORK_MESSAGE,
        _ => DEFAULT_MESSAGE,
    }
}

pub fn account_message(code: &AuthErrorCode) -> &'static str {
    match code {
        AuthErrorCode::NoCurrentUser => NO_CURRENT_USER,
        AuthErrorCode::WeakPassword => "The password is too weak.",
        AuthErrorCode::MissingPassword => "Please enter the password.",
        AuthErrorCode::InvalidActionCode => "The code is invalid or has already been used.",
        AuthErrorCode::NetworkRequestFailed => NETWORK_MESSAGE,
        _ => DEFAULT_MESSAGE,
    }
}
