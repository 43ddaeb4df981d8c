//! The result envelope returned by every client operation.

use std::fmt;

use crate::error::{Error, ErrorKind};

/// Outcome of a client operation.
///
/// Exactly one of the payload or the error is present. Failures never
/// escape as panics from the client; they are carried here and classified
/// by [`kind`](Self::kind).
///
/// [`result_data`](Self::result_data) and [`into_data`](Self::into_data)
/// treat access on a failed envelope as a programmer error and panic with
/// the error message. Use [`data`](Self::data) or
/// [`into_result`](Self::into_result) to branch instead.
#[must_use = "a SuiRpcResult may carry an error that should be handled"]
pub struct SuiRpcResult<T> {
    inner: Result<T, Error>,
}

impl<T> SuiRpcResult<T> {
    /// A successful envelope.
    pub fn ok(data: T) -> Self {
        Self { inner: Ok(data) }
    }

    /// A failed envelope.
    pub fn err(error: impl Into<Error>) -> Self {
        Self {
            inner: Err(error.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.inner.is_ok()
    }

    pub fn is_err(&self) -> bool {
        self.inner.is_err()
    }

    /// The payload, if successful.
    pub fn data(&self) -> Option<&T> {
        self.inner.as_ref().ok()
    }

    /// The error, if failed.
    pub fn error(&self) -> Option<&Error> {
        self.inner.as_ref().err()
    }

    /// Classification of the failure, `None` on success.
    pub fn kind(&self) -> Option<ErrorKind> {
        self.error().map(Error::kind)
    }

    /// Borrow the payload.
    ///
    /// # Panics
    ///
    /// Panics with the error message if the envelope is a failure.
    #[track_caller]
    pub fn result_data(&self) -> &T {
        match &self.inner {
            Ok(data) => data,
            Err(e) => panic!("result_data() called on a failed SuiRpcResult: {e}"),
        }
    }

    /// Take the payload.
    ///
    /// # Panics
    ///
    /// Panics with the error message if the envelope is a failure.
    #[track_caller]
    pub fn into_data(self) -> T {
        match self.inner {
            Ok(data) => data,
            Err(e) => panic!("into_data() called on a failed SuiRpcResult: {e}"),
        }
    }

    pub fn into_result(self) -> Result<T, Error> {
        self.inner
    }

    /// Transform the payload of a successful envelope.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> SuiRpcResult<U> {
        SuiRpcResult {
            inner: self.inner.map(f),
        }
    }

    /// Chain a fallible step onto a successful envelope.
    pub fn and_then<U>(self, f: impl FnOnce(T) -> Result<U, Error>) -> SuiRpcResult<U> {
        SuiRpcResult {
            inner: self.inner.and_then(f),
        }
    }
}

impl<T, E: Into<Error>> From<Result<T, E>> for SuiRpcResult<T> {
    fn from(r: Result<T, E>) -> Self {
        Self {
            inner: r.map_err(Into::into),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for SuiRpcResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            Ok(data) => f.debug_tuple("SuiRpcResult::Ok").field(data).finish(),
            Err(e) => f.debug_tuple("SuiRpcResult::Err").field(e).finish(),
        }
    }
}
