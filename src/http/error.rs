// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2026 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Error structures and enumerations for the IG HTTP integration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Represents the JSON structure of an error response returned by the IG API.
///
/// Failed calls carry a dotted error code such as
/// `error.sprintmarket.create-position.market-closed`; collaborators branch on it to
/// render a message.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IgErrorResponse {
    /// Dotted error code identifying the failure.
    #[serde(default)]
    pub error_code: Option<String>,
}

/// A typed error enumeration for the IG HTTP client.
#[derive(Debug, Clone, Error)]
pub enum IgHttpError {
    /// An operation needing a session was invoked before authentication or resumption.
    #[error("Authentication required: call authenticate or set_authentication_data first")]
    AuthenticationRequired,
    /// A path template placeholder had no supplied value.
    #[error("Unresolved template placeholder: {{{placeholder}}}")]
    UnresolvedTemplate { placeholder: String },
    /// Failure during JSON serialization/deserialization.
    #[error("JSON error: {0}")]
    JsonError(String),
    /// The request timed out before a response arrived.
    #[error("Request timed out: {0}")]
    Timeout(String),
    /// Generic network error (connect failure, broken transfer, invalid header).
    #[error("Network error: {0}")]
    NetworkError(String),
    /// Any non-2xx HTTP status returned by IG, with the upstream error code when present.
    #[error("Unexpected HTTP status code {status}: {body}")]
    UnexpectedStatus {
        status: u16,
        body: String,
        error_code: Option<String>,
    },
}

impl IgHttpError {
    /// Returns the upstream error code carried by this error, if any.
    #[must_use]
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Self::UnexpectedStatus { error_code, .. } => error_code.as_deref(),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for IgHttpError {
    fn from(error: serde_json::Error) -> Self {
        Self::JsonError(error.to_string())
    }
}

impl From<reqwest::Error> for IgHttpError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout(error.to_string())
        } else {
            Self::NetworkError(error.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_unresolved_template_display() {
        let error = IgHttpError::UnresolvedTemplate {
            placeholder: "nodeId".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Unresolved template placeholder: {nodeId}"
        );
    }

    #[rstest]
    fn test_error_code_extraction() {
        let error = IgHttpError::UnexpectedStatus {
            status: 404,
            body: "{\"errorCode\":\"error.sprintmarket.create-position.market-closed\"}"
                .to_string(),
            error_code: Some("error.sprintmarket.create-position.market-closed".to_string()),
        };
        assert_eq!(
            error.error_code(),
            Some("error.sprintmarket.create-position.market-closed")
        );

        assert!(IgHttpError::AuthenticationRequired.error_code().is_none());
    }

    #[rstest]
    fn test_error_response_deserialization() {
        let response: IgErrorResponse = serde_json::from_str(
            "{\"errorCode\":\"error.public-api.exceeded-account-historical-data-allowance\"}",
        )
        .unwrap();
        assert_eq!(
            response.error_code.as_deref(),
            Some("error.public-api.exceeded-account-historical-data-allowance")
        );

        let empty: IgErrorResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.error_code.is_none());
    }

    #[rstest]
    fn test_http_error_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json")
            .expect_err("Should fail to parse");
        let http_err = IgHttpError::from(json_err);

        assert!(matches!(http_err, IgHttpError::JsonError(_)));
    }
}
