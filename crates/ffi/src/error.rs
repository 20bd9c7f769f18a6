use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

use texgen_core::TextureError;

/// Common interface for FFI error types.
///
/// - `code()` - Returns the error code to be passed across FFI boundary
/// - `msg()` - Returns the error message for diagnostic purposes
pub(crate) trait TexgenError {
    /// Returns the error code to be returned across the FFI boundary.
    fn code(&self) -> TexgenErrorCode;

    /// Returns the human-readable error message.
    fn msg(&self) -> &str;
}

/// Default implementation of `TexgenError` for FFI error scenarios.
///
/// Wraps a `TexgenErrorCode` with a message and provides constructors for
/// each failure the FFI layer can report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultTexgenError {
    code: TexgenErrorCode,
    msg: String,
}

impl DefaultTexgenError {
    /// Create error for null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"out_texture"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: TexgenErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Create error for a caller buffer that cannot hold the output.
    ///
    /// # Arguments
    /// * `required` - Bytes needed
    /// * `provided` - Bytes the caller supplied
    pub fn buffer_too_small(required: usize, provided: usize) -> Self {
        Self {
            code: TexgenErrorCode::BufferTooSmall,
            msg: format!("Output buffer holds {provided} bytes, {required} required"),
        }
    }

    /// Create error for invalid parameter.
    ///
    /// # Arguments
    /// * `message` - Description of the error
    pub fn invalid_parameter(message: String) -> Self {
        Self {
            code: TexgenErrorCode::InvalidParameter,
            msg: message,
        }
    }
}

impl From<TextureError> for DefaultTexgenError {
    fn from(error: TextureError) -> Self {
        let code = match error {
            TextureError::CollapsedResolution { .. } => TexgenErrorCode::CollapsedResolution,
            TextureError::InvalidParameter { .. }
            | TextureError::ExtentOverflow { .. }
            | TextureError::UnsupportedBitDepth(_) => TexgenErrorCode::InvalidParameter,
            TextureError::DataLength { .. }
            | TextureError::ExtentMismatch { .. }
            | TextureError::ChannelMismatch { .. }
            | TextureError::ChannelOutOfRange { .. } => TexgenErrorCode::LayoutMismatch,
        };
        Self {
            code,
            msg: error.to_string(),
        }
    }
}

impl TexgenError for DefaultTexgenError {
    fn code(&self) -> TexgenErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

/// FFI error codes returned by texture functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TexgenErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Invalid pointer: null pointer passed where non-null required.
    NullPointer = 1,

    /// Invalid parameter passed to function (non-finite ratio, bad bit depth).
    InvalidParameter = 2,

    /// Octave ratios shrink a noise level to zero texels.
    CollapsedResolution = 3,

    /// Texture extents or channel counts do not fit the operation.
    LayoutMismatch = 4,

    /// Caller-provided output buffer is too small.
    BufferTooSmall = 5,
}

impl From<DefaultTexgenError> for TexgenErrorCode {
    fn from(error: DefaultTexgenError) -> Self {
        error.code
    }
}

thread_local! {
    /// Thread-local storage for the most recent FFI error (C string, error code).
    /// The `CString` is stored so the pointer handed out stays valid until the next call.
    static LAST_ERROR: RefCell<(Option<CString>, TexgenErrorCode)> = const { RefCell::new((None, TexgenErrorCode::Ok)) };
}

/// Internal helper to read `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, TexgenErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

/// Internal helper to mutate `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, TexgenErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns:
/// - A borrowed pointer to the error message if the last call on this thread failed.
/// - `null` if the last call succeeded.
///
/// # Lifetime
/// The returned pointer is valid until the next FFI call on this thread.
///
/// **DO NOT FREE THIS POINTER** - it is managed internally.
///
/// Example:
/// ```cpp
/// TexgenTexture* clouds = nullptr;
/// TexgenErrorCode err = texgen_generate_2d(&params, &clouds);
/// if (err != TexgenErrorCode::Ok) {
///     const char* error = texgen_get_last_error();
///     if (error) {
///         printf("Noise generation failed: %s\n", error);
///     }
/// }
/// ```
#[no_mangle]
pub extern "C" fn texgen_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code.
///
/// Returns `TexgenErrorCode::Ok` (0) if the last call on this thread succeeded.
#[no_mangle]
pub extern "C" fn texgen_get_last_error_code() -> TexgenErrorCode {
    with_last_error(|(_cstring, code)| *code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use texgen_core::Extent;

    #[test]
    fn test_texture_error_codes() {
        let collapsed: DefaultTexgenError = TextureError::CollapsedResolution {
            level: 3,
            extent: Extent::new_2d(0, 0),
        }
        .into();
        assert_eq!(collapsed.code(), TexgenErrorCode::CollapsedResolution);
        assert!(collapsed.msg().contains("level 3"));

        let channels: DefaultTexgenError = TextureError::ChannelMismatch {
            expected: 1,
            found: 4,
        }
        .into();
        assert_eq!(channels.code(), TexgenErrorCode::LayoutMismatch);

        let depth: DefaultTexgenError = TextureError::UnsupportedBitDepth(12).into();
        assert_eq!(TexgenErrorCode::from(depth), TexgenErrorCode::InvalidParameter);
    }
}
