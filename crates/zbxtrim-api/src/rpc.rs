//! JSON-RPC 2.0 envelopes

use crate::error::RpcError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize)]
pub(crate) struct Request<'a> {
    jsonrpc: &'static str,
    method: &'a str,
    params: Value,
    id: u64,
    /// Token in the body, for servers without bearer support
    #[serde(skip_serializing_if = "Option::is_none")]
    auth: Option<&'a str>,
}

impl<'a> Request<'a> {
    pub(crate) fn new(method: &'a str, params: Value, id: u64) -> Self {
        Self {
            jsonrpc: "2.0",
            method,
            params,
            id,
            auth: None,
        }
    }

    pub(crate) fn with_auth(mut self, token: &'a str) -> Self {
        self.auth = Some(token);
        self
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct Response {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RemoteError>,
}

#[derive(Debug, Deserialize)]
struct RemoteError {
    code: i64,
    message: String,
    #[serde(default)]
    data: String,
}

impl Response {
    pub(crate) fn into_result<R: DeserializeOwned>(self) -> Result<R, RpcError> {
        if let Some(error) = self.error {
            return Err(RpcError::Remote {
                code: error.code,
                message: error.message,
                data: error.data,
            });
        }
        let result = self
            .result
            .ok_or_else(|| RpcError::Decode("response has neither result nor error".into()))?;
        serde_json::from_value(result).map_err(|e| RpcError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_shape() {
        let request = Request::new("apiinfo.version", json!({}), 1);
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            json!({"jsonrpc": "2.0", "method": "apiinfo.version", "params": {}, "id": 1})
        );
    }

    #[test]
    fn test_body_auth_field() {
        let request = Request::new("item.get", json!({}), 2).with_auth("abc");
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["auth"], "abc");
    }

    #[test]
    fn test_error_takes_precedence() {
        let response: Response = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "error": {"code": -32500, "message": "Application error.", "data": "No permissions."},
            "id": 3
        }))
        .unwrap();
        let err = response.into_result::<Value>().unwrap_err();
        assert!(matches!(err, RpcError::Remote { code: -32500, .. }));
    }

    #[test]
    fn test_result_type_mismatch_is_decode_error() {
        let response: Response =
            serde_json::from_value(json!({"jsonrpc": "2.0", "result": 7, "id": 1})).unwrap();
        assert!(matches!(
            response.into_result::<Vec<String>>(),
            Err(RpcError::Decode(_))
        ));
    }
}
