use crate::options::CallOptions;
use errbridge_core::codes::{CORE_FOUNDATION_UNKNOWN_ERR, NO_ERR};
use errbridge_core::{status_error, PlatformError, Result};
use tracing::debug;

fn status_failure(options: &CallOptions, status: i32) -> PlatformError {
    debug!(
        status,
        description = options.description(),
        location = options.location().map(ToString::to_string),
        "Status API call failed"
    );

    status_error(
        status,
        options.metadata(),
        options.is_write(),
        options.config(),
    )
}

/// Call an API that reports success as `NO_ERR`
pub fn call_status_api<F>(options: &CallOptions, call: F) -> Result<()>
where
    F: FnOnce() -> i32,
{
    match call() {
        NO_ERR => Ok(()),
        status => Err(status_failure(options, status)),
    }
}

/// Call an API that fills in an out-parameter and reports a status code
pub fn call_status_api_out<T, F>(options: &CallOptions, call: F) -> Result<T>
where
    T: Default,
    F: FnOnce(&mut T) -> i32,
{
    let mut value = T::default();

    match call(&mut value) {
        NO_ERR => Ok(value),
        status => Err(status_failure(options, status)),
    }
}

/// Call an API whose out-parameter may be left empty.
///
/// A success status without a value is reported as
/// `CORE_FOUNDATION_UNKNOWN_ERR`.
pub fn call_status_api_optional<T, F>(options: &CallOptions, call: F) -> Result<T>
where
    F: FnOnce(&mut Option<T>) -> i32,
{
    let mut value = None;

    match call(&mut value) {
        NO_ERR => value.ok_or_else(|| status_failure(options, CORE_FOUNDATION_UNKNOWN_ERR)),
        status => Err(status_failure(options, status)),
    }
}
