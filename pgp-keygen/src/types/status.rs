use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::descriptions;

/// Error taxonomy used by the key generation daemon.
///
/// Codes the client doesn't act on are kept verbatim in [`StatusCode::Other`]
/// so they can be reported back unchanged.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum StatusCode {
    Ok,
    InputError,
    Generic,
    Canceled,
    InputCanceled,
    Other(i32),
}

impl From<i32> for StatusCode {
    fn from(code: i32) -> Self {
        match code {
            0 => Self::Ok,
            100 => Self::InputError,
            218 => Self::Generic,
            237 => Self::Canceled,
            239 => Self::InputCanceled,
            other => Self::Other(other),
        }
    }
}

impl From<StatusCode> for i32 {
    fn from(code: StatusCode) -> Self {
        match code {
            StatusCode::Ok => 0,
            StatusCode::InputError => 100,
            StatusCode::Generic => 218,
            StatusCode::Canceled => 237,
            StatusCode::InputCanceled => 239,
            StatusCode::Other(other) => other,
        }
    }
}

/// Error carried by an RPC reply or by the terminal response of a call.
#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize, Deserialize)]
#[error("{desc} (code {code:?})")]
pub struct RpcError {
    pub code: StatusCode,
    pub desc: String,
}

impl RpcError {
    pub fn new(code: StatusCode, desc: impl Into<String>) -> Self {
        Self {
            code,
            desc: desc.into(),
        }
    }

    /// The error a client sends when the user backed out of an operation.
    pub fn input_canceled() -> Self {
        Self::new(StatusCode::InputCanceled, descriptions::INPUT_CANCELED)
    }

    pub fn is_input_canceled(&self) -> bool {
        self.code == StatusCode::InputCanceled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_convert_both_ways() {
        for code in [
            StatusCode::Ok,
            StatusCode::InputError,
            StatusCode::Generic,
            StatusCode::Canceled,
            StatusCode::InputCanceled,
        ] {
            assert_eq!(StatusCode::from(i32::from(code)), code);
        }
        assert_eq!(i32::from(StatusCode::InputCanceled), 239);
    }

    #[test]
    fn unknown_codes_are_preserved() {
        assert_eq!(StatusCode::from(1501), StatusCode::Other(1501));
        assert_eq!(i32::from(StatusCode::Other(1501)), 1501);
    }

    #[test]
    fn status_codes_serialize_as_integers() {
        let error = RpcError::input_canceled();
        let json = serde_json::to_string(&error).unwrap();
        assert_eq!(json, r#"{"code":239,"desc":"Input canceled"}"#);

        let parsed: RpcError = serde_json::from_str(r#"{"code":0,"desc":""}"#).unwrap();
        assert_eq!(parsed.code, StatusCode::Ok);
    }

    #[test]
    fn only_input_canceled_counts_as_cancellation() {
        assert!(RpcError::input_canceled().is_input_canceled());
        assert!(!RpcError::new(StatusCode::Canceled, "canceled").is_input_canceled());
        assert!(!RpcError::new(StatusCode::Generic, "boom").is_input_canceled());
    }
}
