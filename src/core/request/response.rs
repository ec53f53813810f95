//! Decoding sub-responses into caller types

use crate::core::batch::SubResponse;
use crate::utils::error::{BatchError, GraphErrorEnvelope, Result};
use serde::de::DeserializeOwned;

impl SubResponse {
    /// Fail with the per-call error this sub-response represents, if any
    pub fn error_for_status(&self) -> Result<()> {
        if self.is_missing() {
            return Err(BatchError::MissingResponse);
        }
        if self.is_success() {
            return Ok(());
        }

        let envelope: GraphErrorEnvelope = serde_json::from_str(self.body_str()).map_err(|e| {
            BatchError::Decode(format!("status {} without error envelope: {}", self.code, e))
        })?;
        Err(BatchError::Api(envelope.error))
    }

    /// Decode the JSON body into `T`
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        self.error_for_status()?;
        Ok(serde_json::from_str(self.body_str())?)
    }

    /// Check the status and ignore the body
    pub fn decode_discard(&self) -> Result<()> {
        self.error_for_status()
    }
}
