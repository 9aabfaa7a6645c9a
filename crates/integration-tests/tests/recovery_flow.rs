//! Recovery options attached to errors from real calls
//!
//! A failed open is wrapped with recovery options whose attempter fixes the
//! problem, after which the call is retried.

use integration_tests::common::*;
use integration_tests::*;
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;

#[test]
fn test_recover_missing_file_then_retry() {
    let dir = scratch_dir();
    let path = dir.path().join("settings.conf");
    let options = options_for(&path);

    let err = open_fd(&path, libc::O_RDONLY, &options).unwrap_err();
    assert!(err.is_file_not_found_error());

    let create_path = path.clone();
    let recoverable = err.make_recoverable(
        ["Create Default", "Cancel"],
        RecoveryAttempter::sync(move |index| index == 0 && fs::write(&create_path, b"").is_ok()),
    );

    // Classification passes through the wrapper
    assert!(recoverable.is_file_not_found_error());
    assert_eq!(recoverable.recovery_options(), ["Create Default", "Cancel"]);

    assert!(!recoverable.attempt_recovery(1));
    assert!(open_fd(&path, libc::O_RDONLY, &options).is_err());

    assert!(recoverable.attempt_recovery(0));
    let fd = open_fd(&path, libc::O_RDONLY, &options).unwrap();
    close_fd(fd, &options).unwrap();
}

#[tokio::test]
async fn test_async_recovery_creates_file() {
    let dir = scratch_dir();
    let path = dir.path().join("cache.db");
    let options = options_for(&path);

    let err = open_fd(&path, libc::O_RDONLY, &options).unwrap_err();

    let create_path = path.clone();
    let attempter = RecoveryAttempter::sync(|_| false).with_async(move |index| {
        let create_path = create_path.clone();
        async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            index == 0 && tokio::fs::write(&create_path, b"").await.is_ok()
        }
    });
    let recoverable = err.make_recoverable(["Create", "Cancel"], attempter);

    assert!(recoverable.attempt_recovery_async(0).await);
    let fd = open_fd(&path, libc::O_RDONLY, &options).unwrap();
    close_fd(fd, &options).unwrap();
}

#[test]
fn test_completion_runs_without_runtime() {
    let err = close_fd(-1, &CallOptions::new()).unwrap_err();
    let recoverable = err.make_recoverable_with_buttons("Try Again", "Cancel", true);

    let (tx, rx) = mpsc::channel();
    recoverable.attempt_recovery_with(0, Box::new(move |recovered| {
        tx.send(recovered).unwrap();
    }));

    assert!(rx.recv_timeout(Duration::from_secs(5)).unwrap());
}

#[test]
fn test_cancelled_status_never_recovers() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    let err = call_status_api(&CallOptions::new(), || codes::USER_CANCELED_ERR).unwrap_err();
    let recoverable = err.make_recoverable(
        ["Retry"],
        RecoveryAttempter::sync(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            true
        }),
    );

    assert!(!recoverable.attempt_recovery(0));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_wrapper_converts_back_to_platform_error() {
    let dir = scratch_dir();
    let path = dir.path().join("missing");

    let err = open_fd(&path, libc::O_RDONLY, &options_for(&path)).unwrap_err();
    let recoverable = err
        .clone()
        .make_recoverable_with_buttons("Retry", "Cancel", false);
    let platform: PlatformError = recoverable.into();

    assert!(matches!(platform, PlatformError::Extension(_)));
    assert_eq!(platform.domain(), err.domain());
    assert_eq!(platform.code(), err.code());
    assert!(platform.is_file_not_found_error());

    let user_info = platform.user_info();
    assert_eq!(
        user_info
            .get(keys::RECOVERY_OPTIONS)
            .and_then(UserInfoValue::as_strings),
        Some(&["Cancel".to_string(), "Retry".to_string()][..])
    );
}

fn load_settings(path: &std::path::Path) -> errbridge_core::Result<std::os::unix::io::RawFd> {
    let options = options_for(path);
    let fd = open_fd(path, libc::O_RDONLY, &options).map_err(|err| {
        let create_path = path.to_path_buf();
        err.make_recoverable(
            ["Create", "Cancel"],
            RecoveryAttempter::sync(move |index| index == 0 && fs::write(&create_path, b"").is_ok()),
        )
    })?;
    Ok(fd)
}

#[test]
fn test_recover_after_propagation() {
    let dir = scratch_dir();
    let path = dir.path().join("settings.conf");

    let err = load_settings(&path).unwrap_err();
    assert!(err.is_file_not_found_error());

    let recoverable = RecoverableErrorWrapper::downcast(&err).expect("Recovery options lost");
    assert!(recoverable.attempt_recovery(0));

    let fd = load_settings(&path).unwrap();
    close_fd(fd, &options_for(&path)).unwrap();
}
