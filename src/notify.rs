//! User-facing notification funnel.
//!
//! Presentation is a host concern (toast, snackbar, console); this module
//! only decides the message and the channel.

use crate::i18n::Translator;
use crate::save::SaveError;
use crate::services::ServiceError;

/// Sink for user-visible notifications.
pub trait Notifier {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Pick the message for a failed save.
///
/// Preference order: the server-provided message (the backend knows why it
/// rejected the request), then the transport error's own message, then the
/// translated fallback, which only knows which action failed.
pub fn error_message(err: &SaveError, default_key: &str, translator: &dyn Translator) -> String {
    match err {
        SaveError::Validation { message } => message.clone(),
        SaveError::Service(service_err) => match service_err {
            ServiceError::Status {
                message: Some(message),
                ..
            } => message.clone(),
            ServiceError::Transport(message) => message.clone(),
            _ => translator.t(default_key),
        },
    }
}

/// Report a failed save through the notifier.
pub fn present_error(
    err: &SaveError,
    default_key: &str,
    translator: &dyn Translator,
    notifier: &dyn Notifier,
) {
    let message = error_message(err, default_key, translator);
    log::error!("{err}");
    notifier.error(&message);
}

/// Keys used by [`with_notification`].
pub struct NotificationKeys<'a> {
    pub success: &'a str,
    pub error: &'a str,
}

/// Run an action and report its outcome, then run `cleanup` regardless.
///
/// The result is passed through so callers can still branch on it.
pub fn with_notification<T>(
    action: impl FnOnce() -> Result<T, SaveError>,
    keys: NotificationKeys<'_>,
    translator: &dyn Translator,
    notifier: &dyn Notifier,
    cleanup: impl FnOnce(),
) -> Result<T, SaveError> {
    let result = action();
    match &result {
        Ok(_) => notifier.success(&translator.t(keys.success)),
        Err(err) => present_error(err, keys.error, translator, notifier),
    }
    cleanup();
    result
}
