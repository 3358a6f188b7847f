//! The `{status, msg, data}` response envelope

use crate::error::{ApiResult, invalid_response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use spinovo_core::AppError;

/// Every backend response, successful or not
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub msg: String,
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Payload, or an `ApiError` carrying `msg` when the backend sent none
    pub fn into_data(self) -> ApiResult<T> {
        match self.data {
            Some(data) => Ok(data),
            None if self.msg.is_empty() => Err(AppError::api("Response contained no data", 200)),
            None => Err(AppError::api(self.msg, 200)),
        }
    }

    /// Borrow the payload
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }
}

/// Envelope with the payload left undecoded
pub(crate) type RawEnvelope = ApiEnvelope<Value>;

impl RawEnvelope {
    /// Parse a response body into a raw envelope
    pub(crate) fn parse(body: &[u8], status: u16) -> ApiResult<Self> {
        serde_json::from_slice(body).map_err(|e| invalid_response(e, status))
    }

    /// Decode the payload into `T`
    ///
    /// `null` and a missing payload both become `None`.
    pub(crate) fn decode<T: DeserializeOwned>(self, status: u16) -> ApiResult<ApiEnvelope<T>> {
        let data = match self.data {
            None | Some(Value::Null) => None,
            Some(value) => Some(serde_json::from_value(value).map_err(|e| invalid_response(e, status))?),
        };

        Ok(ApiEnvelope {
            status: self.status,
            msg: self.msg,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spinovo_core::error::codes;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Count {
        count: u32,
    }

    #[test]
    fn test_decode_payload() {
        let raw = RawEnvelope::parse(br#"{"status":true,"msg":"ok","data":{"count":4}}"#, 200).unwrap();
        let env: ApiEnvelope<Count> = raw.decode(200).unwrap();
        assert!(env.status);
        assert_eq!(env.into_data().unwrap(), Count { count: 4 });
    }

    #[test]
    fn test_missing_and_null_data() {
        let raw = RawEnvelope::parse(br#"{"status":false,"msg":"nope"}"#, 200).unwrap();
        let env: ApiEnvelope<Count> = raw.decode(200).unwrap();
        assert!(env.data().is_none());
        assert_eq!(env.into_data().unwrap_err().message(), "nope");

        let raw = RawEnvelope::parse(br#"{"status":true,"msg":"","data":null}"#, 200).unwrap();
        let env: ApiEnvelope<Count> = raw.decode(200).unwrap();
        assert_eq!(env.into_data().unwrap_err().message(), "Response contained no data");
    }

    #[test]
    fn test_undecodable_body() {
        let err = RawEnvelope::parse(b"<html>", 200).unwrap_err();
        assert_eq!(err.code(), codes::INVALID_RESPONSE);

        let raw = RawEnvelope::parse(br#"{"status":true,"msg":"","data":{"count":"x"}}"#, 200).unwrap();
        let err = raw.decode::<Count>(200).unwrap_err();
        assert_eq!(err.code(), codes::INVALID_RESPONSE);
    }
}
