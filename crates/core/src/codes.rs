//! Numeric status codes used by the classification predicates.
//!
//! Status codes are signed 32-bit values. A contiguous block above
//! [`POSIX_ERROR_BASE`] embeds POSIX `errno` values in the status-code space.

/// Base of the range that embeds POSIX codes in the status-code space
pub const POSIX_ERROR_BASE: i32 = 100_000;

/// Width of the embedding range above [`POSIX_ERROR_BASE`]
const POSIX_EMBEDDING_SPAN: i32 = 1000;

/// Success
pub const NO_ERR: i32 = 0;
pub const UNIMP_ERR: i32 = -4;
pub const IO_ERR: i32 = -36;
pub const EOF_ERR: i32 = -39;
pub const FNF_ERR: i32 = -43;
pub const USER_CANCELED_ERR: i32 = -128;
pub const ERR_AE_WAIT_CANCELED: i32 = -1711;
pub const KERNEL_CANCELED_ERR: i32 = -2402;
pub const OT_CANCELED_ERR: i32 = -3180;
pub const EPERM_ERR: i32 = -3200;
pub const ENOENT_ERR: i32 = -3201;
pub const EACCES_ERR: i32 = -3212;
pub const EINVAL_ERR: i32 = -3221;
pub const ECANCEL_ERR: i32 = -3273;
/// Reported when a call succeeded but produced no value
pub const CORE_FOUNDATION_UNKNOWN_ERR: i32 = -4960;
pub const AFP_ACCESS_DENIED: i32 = -5000;
pub const ERR_IA_CANCELED: i32 = -5385;
pub const RA_CONNECTION_CANCELED: i32 = -7109;
pub const TXN_USER_CANCELED_OPERATION_ERR: i32 = -22004;
pub const FBC_INDEXING_CANCELED: i32 = -30520;
pub const FBC_ACCESS_CANCELED: i32 = -30521;
pub const FBC_SUMMARIZATION_CANCELED: i32 = -30529;

/// Status codes meaning "file not found"
pub const FILE_NOT_FOUND_CODES: &[i32] = &[FNF_ERR, ENOENT_ERR];

/// Status codes meaning "permission denied"
pub const PERMISSION_CODES: &[i32] = &[AFP_ACCESS_DENIED, EPERM_ERR, EACCES_ERR];

/// Status codes meaning "cancelled by the user"
pub const CANCEL_CODES: &[i32] = &[
    USER_CANCELED_ERR,
    ERR_AE_WAIT_CANCELED,
    KERNEL_CANCELED_ERR,
    OT_CANCELED_ERR,
    ECANCEL_ERR,
    ERR_IA_CANCELED,
    RA_CONNECTION_CANCELED,
    TXN_USER_CANCELED_OPERATION_ERR,
    FBC_INDEXING_CANCELED,
    FBC_ACCESS_CANCELED,
    FBC_SUMMARIZATION_CANCELED,
];

/// Recover the POSIX code embedded in a status code.
///
/// Only codes strictly between `POSIX_ERROR_BASE` and `POSIX_ERROR_BASE + 1000`
/// qualify; `POSIX_ERROR_BASE` itself is not an embedded code.
pub fn embedded_posix_code(status: i32) -> Option<i32> {
    if status > POSIX_ERROR_BASE && status < POSIX_ERROR_BASE + POSIX_EMBEDDING_SPAN {
        Some(status - POSIX_ERROR_BASE)
    } else {
        None
    }
}

/// Embed a POSIX code in the status-code space, if it fits the range
pub fn embed_posix_code(code: i32) -> Option<i32> {
    if code > 0 && code < POSIX_EMBEDDING_SPAN {
        Some(POSIX_ERROR_BASE + code)
    } else {
        None
    }
}

/// Built-in human-readable text for the named status codes
pub(crate) fn builtin_reason(status: i32) -> Option<&'static str> {
    let reason = match status {
        UNIMP_ERR => "Unimplemented routine",
        IO_ERR => "I/O error",
        EOF_ERR => "End of file",
        FNF_ERR => "File not found",
        USER_CANCELED_ERR => "User canceled",
        ERR_AE_WAIT_CANCELED => "Wait was canceled",
        KERNEL_CANCELED_ERR => "Kernel operation was canceled",
        OT_CANCELED_ERR => "Operation was canceled",
        EPERM_ERR => "Operation not permitted",
        ENOENT_ERR => "No such file or directory",
        EACCES_ERR => "Permission denied",
        EINVAL_ERR => "Invalid argument",
        ECANCEL_ERR => "Operation canceled",
        CORE_FOUNDATION_UNKNOWN_ERR => "Unknown error",
        AFP_ACCESS_DENIED => "Insufficient access privileges for operation",
        ERR_IA_CANCELED => "Image capture was canceled",
        RA_CONNECTION_CANCELED => "Remote access connection was canceled",
        TXN_USER_CANCELED_OPERATION_ERR => "User canceled the text operation",
        FBC_INDEXING_CANCELED => "Indexing was canceled",
        FBC_ACCESS_CANCELED => "Index access was canceled",
        FBC_SUMMARIZATION_CANCELED => "Summarization was canceled",
        _ => return None,
    };

    Some(reason)
}
