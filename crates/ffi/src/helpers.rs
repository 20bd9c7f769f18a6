use crate::error::{with_last_error_mut, TexgenError, TexgenErrorCode};
use std::ffi::CString;

/// Set the thread-local error message and code.
/// Accepts any type implementing `TexgenError` trait.
pub(crate) fn set_last_error(error: &impl TexgenError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Track an error by setting it in thread-local storage and returning its code.
#[inline]
pub(crate) fn track_error(error: &impl TexgenError) -> TexgenErrorCode {
    set_last_error(error);
    error.code()
}

/// Clear the thread-local error message and code.
/// Called at the end of every successful operation.
pub(crate) fn clear_last_error() -> TexgenErrorCode {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = TexgenErrorCode::Ok;
    });
    TexgenErrorCode::Ok
}

/// Record the outcome of a fallible operation and return its code.
pub(crate) fn track_result<T, E>(result: Result<T, E>) -> Result<T, TexgenErrorCode>
where
    E: TexgenError,
{
    match result {
        Ok(value) => {
            clear_last_error();
            Ok(value)
        }
        Err(error) => Err(track_error(&error)),
    }
}
