//! JSON method-call codec for platform channels.
//!
//! Calls travel as `{"method": name, "args": value}` documents. Replies use
//! positional envelopes: a one-element array `[result]` for success, a
//! three-element array `[code, message, details]` for errors, and a reply
//! with no bytes at all to signal that the method is not implemented.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

/// A method invocation, decoded from or destined for the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    pub method: String,
    #[serde(default)]
    pub args: Value,
}

impl MethodCall {
    /// Create a call with the given method name and arguments.
    pub fn new(method: impl Into<String>, args: Value) -> Self {
        Self {
            method: method.into(),
            args,
        }
    }
}

/// A failure reported back to the caller of a channel method.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MethodError {
    /// The caller passed malformed or missing arguments.
    #[error("{0}")]
    BadArguments(String),
    /// The caller violated the ordering the protocol requires.
    #[error("{0}")]
    InternalConsistency(String),
}

impl MethodError {
    /// Wire code identifying the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            MethodError::BadArguments(_) => "Bad Arguments",
            MethodError::InternalConsistency(_) => "Internal Consistency Error",
        }
    }
}

/// Outcome of handling a method call.
#[derive(Debug, Clone, PartialEq)]
pub enum MethodReply {
    /// The call succeeded; the payload may be `Value::Null`.
    Success(Value),
    Error(MethodError),
    /// The receiver does not handle this method.
    NotImplemented,
}

impl MethodReply {
    /// A success reply with no payload.
    pub fn success() -> Self {
        MethodReply::Success(Value::Null)
    }

    /// A bad-arguments error reply.
    pub fn bad_arguments(message: impl Into<String>) -> Self {
        MethodReply::Error(MethodError::BadArguments(message.into()))
    }

    /// An internal-consistency error reply.
    pub fn internal_error(message: impl Into<String>) -> Self {
        MethodReply::Error(MethodError::InternalConsistency(message.into()))
    }
}

/// Failure to turn bytes into a method call or a reply into bytes.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("invalid channel document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decode an incoming method call.
pub fn decode_method_call(message: &[u8]) -> Result<MethodCall, CodecError> {
    Ok(serde_json::from_slice(message)?)
}

/// Encode an outgoing method call.
pub fn encode_method_call(call: &MethodCall) -> Result<Vec<u8>, CodecError> {
    Ok(serde_json::to_vec(call)?)
}

/// Encode a reply envelope. Not-implemented replies carry no bytes.
pub fn encode_reply(reply: &MethodReply) -> Result<Vec<u8>, CodecError> {
    let envelope = match reply {
        MethodReply::Success(result) => json!([result]),
        MethodReply::Error(error) => json!([error.code(), error.to_string(), Value::Null]),
        MethodReply::NotImplemented => return Ok(Vec::new()),
    };
    Ok(serde_json::to_vec(&envelope)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_with_args() {
        let call = decode_method_call(br#"{"method":"TextInput.show","args":[1,2]}"#).unwrap();
        assert_eq!(call.method, "TextInput.show");
        assert_eq!(call.args, json!([1, 2]));
    }

    #[test]
    fn test_decode_without_args() {
        let call = decode_method_call(br#"{"method":"TextInput.hide"}"#).unwrap();
        assert_eq!(call.method, "TextInput.hide");
        assert!(call.args.is_null());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_method_call(b"not json").is_err());
        assert!(decode_method_call(b"[1,2,3]").is_err());
        assert!(decode_method_call(br#"{"args":[]}"#).is_err());
        assert!(decode_method_call(b"").is_err());
    }

    #[test]
    fn test_encode_method_call_round_trips() {
        let call = MethodCall::new("TextInputClient.performAction", json!([7, "done"]));
        let bytes = encode_method_call(&call).unwrap();
        assert_eq!(decode_method_call(&bytes).unwrap(), call);
    }

    #[test]
    fn test_success_envelope() {
        let bytes = encode_reply(&MethodReply::success()).unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value, json!([null]));
    }

    #[test]
    fn test_error_envelope() {
        let reply = MethodReply::bad_arguments("Method invoked without args");
        let bytes = encode_reply(&reply).unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            value,
            json!(["Bad Arguments", "Method invoked without args", null])
        );
    }

    #[test]
    fn test_internal_error_code() {
        let reply = MethodReply::internal_error("no client is set");
        let bytes = encode_reply(&reply).unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            value,
            json!(["Internal Consistency Error", "no client is set", null])
        );
    }

    #[test]
    fn test_not_implemented_is_empty() {
        let bytes = encode_reply(&MethodReply::NotImplemented).unwrap();
        assert!(bytes.is_empty());
    }
}
