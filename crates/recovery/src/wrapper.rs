use crate::attempter::RecoveryAttempter;
use async_trait::async_trait;
use errbridge_core::{keys, Classify, ErrorClass, PlatformError, UserInfo};
use futures::future::BoxFuture;
use std::fmt;
use tracing::debug;

/// An error that offers recovery options to the user
#[async_trait]
pub trait RecoverableError: Classify {
    /// Ordered labels of the recovery options
    fn recovery_options(&self) -> &[String];

    /// Try the option at `option_index`, returning whether recovery succeeded
    fn attempt_recovery(&self, option_index: usize) -> bool;

    /// Try the option at `option_index` and report the outcome to `completion`.
    ///
    /// `completion` is called exactly once, possibly on another thread.
    fn attempt_recovery_with(&self, option_index: usize, completion: Box<dyn FnOnce(bool) + Send>);

    async fn attempt_recovery_async(&self, option_index: usize) -> bool;
}

/// Any [`PlatformError`] with recovery options and attempters attached.
///
/// Classification, description and code pass through to the wrapped error. A
/// cancelled error never recovers, whatever the attempter says.
#[derive(Debug, Clone)]
pub struct RecoverableErrorWrapper {
    underlying: PlatformError,
    recovery_options: Vec<String>,
    attempter: RecoveryAttempter,
}

impl RecoverableErrorWrapper {
    pub fn new<I, S>(underlying: PlatformError, recovery_options: I, attempter: RecoveryAttempter) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            underlying,
            recovery_options: recovery_options.into_iter().map(Into::into).collect(),
            attempter,
        }
    }

    /// Continue/cancel wrapper: recovery succeeds only for the continue button
    pub fn with_buttons(
        underlying: PlatformError,
        continue_title: impl Into<String>,
        cancel_title: impl Into<String>,
        continue_is_default: bool,
    ) -> Self {
        let continue_title = continue_title.into();
        let cancel_title = cancel_title.into();

        if continue_is_default {
            Self::new(
                underlying,
                [continue_title, cancel_title],
                RecoveryAttempter::sync(|index| index == 0),
            )
        } else {
            Self::new(
                underlying,
                [cancel_title, continue_title],
                RecoveryAttempter::sync(|index| index == 1),
            )
        }
    }

    /// The wrapper behind a [`PlatformError`] built from one, e.g. after `?`
    pub fn downcast(err: &PlatformError) -> Option<&Self> {
        err.downcast_ref::<Self>()
    }

    pub fn underlying(&self) -> &PlatformError {
        &self.underlying
    }

    pub fn attempter(&self) -> &RecoveryAttempter {
        &self.attempter
    }

    fn vetoed(&self, option_index: usize) -> bool {
        let vetoed = self.underlying.is_cancelled_error();
        if vetoed {
            debug!(option_index, "Recovery refused for cancelled error");
        }
        vetoed
    }
}

fn spawn_completion(future: BoxFuture<'static, bool>, completion: Box<dyn FnOnce(bool) + Send>) {
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            handle.spawn(async move {
                completion(future.await);
            });
        }
        Err(_) => {
            debug!("No Tokio runtime, running recovery on a dedicated thread");
            std::thread::spawn(move || completion(futures::executor::block_on(future)));
        }
    }
}

#[async_trait]
impl RecoverableError for RecoverableErrorWrapper {
    fn recovery_options(&self) -> &[String] {
        &self.recovery_options
    }

    fn attempt_recovery(&self, option_index: usize) -> bool {
        if self.vetoed(option_index) {
            return false;
        }
        self.attempter.attempt(option_index)
    }

    fn attempt_recovery_with(&self, option_index: usize, completion: Box<dyn FnOnce(bool) + Send>) {
        if self.vetoed(option_index) {
            completion(false);
            return;
        }

        match self.attempter.async_attempter() {
            Some(asynchronous) => spawn_completion(asynchronous(option_index), completion),
            None => completion(self.attempter.attempt(option_index)),
        }
    }

    async fn attempt_recovery_async(&self, option_index: usize) -> bool {
        if self.vetoed(option_index) {
            return false;
        }
        self.attempter.attempt_async(option_index).await
    }
}

impl fmt::Display for RecoverableErrorWrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.underlying, f)
    }
}

impl std::error::Error for RecoverableErrorWrapper {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.underlying)
    }
}

impl Classify for RecoverableErrorWrapper {
    fn matches(&self, class: ErrorClass) -> bool {
        self.underlying.matches(class)
    }

    fn underlying_error(&self) -> Option<&PlatformError> {
        Some(&self.underlying)
    }

    fn domain(&self) -> &str {
        self.underlying.domain()
    }

    fn code(&self) -> i64 {
        self.underlying.code()
    }

    fn user_info(&self) -> UserInfo {
        let mut info = self.underlying.user_info();
        info.insert(keys::RECOVERY_OPTIONS, self.recovery_options.clone());
        info
    }
}

impl From<RecoverableErrorWrapper> for PlatformError {
    fn from(wrapper: RecoverableErrorWrapper) -> Self {
        PlatformError::extension(wrapper)
    }
}

/// Attach recovery options to any error
pub trait MakeRecoverable: Into<PlatformError> + Sized {
    fn make_recoverable<I, S>(self, recovery_options: I, attempter: RecoveryAttempter) -> RecoverableErrorWrapper
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RecoverableErrorWrapper::new(self.into(), recovery_options, attempter)
    }

    fn make_recoverable_with_buttons(
        self,
        continue_title: impl Into<String>,
        cancel_title: impl Into<String>,
        continue_is_default: bool,
    ) -> RecoverableErrorWrapper {
        RecoverableErrorWrapper::with_buttons(self.into(), continue_title, cancel_title, continue_is_default)
    }
}

impl<E: Into<PlatformError>> MakeRecoverable for E {}
