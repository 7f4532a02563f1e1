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

//! IG API key storage for the `X-IG-API-KEY` request header.

use core::fmt::Debug;

use zeroize::ZeroizeOnDrop;

/// The vendor/application key identifying the calling application to the IG API.
///
/// The key is captured from the first authenticate payload (or injected when resuming a
/// session) and travels only as the `X-IG-API-KEY` header, never in a request body.
#[derive(Clone, ZeroizeOnDrop)]
pub struct Credential {
    api_key: Box<str>,
}

impl Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(stringify!(Credential))
            .field("api_key", &self.masked_api_key())
            .finish()
    }
}

impl Credential {
    /// Creates a new [`Credential`] instance from the API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into().into_boxed_str(),
        }
    }

    /// Returns the API key associated with this credential.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Returns a masked version of the API key for logging purposes.
    ///
    /// Shows first 4 and last 4 characters with ellipsis in between.
    /// For keys shorter than 8 characters, shows asterisks only.
    #[must_use]
    pub fn masked_api_key(&self) -> String {
        let key = self.api_key.as_ref();
        let len = key.len();

        if len <= 8 {
            "*".repeat(len)
        } else {
            format!("{}...{}", &key[..4], &key[len - 4..])
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    const API_KEY: &str = "vendor_key_12345";

    #[rstest]
    fn test_credential_creation() {
        let credential = Credential::new(API_KEY);

        assert_eq!(credential.api_key(), API_KEY);
    }

    #[rstest]
    fn test_masked_api_key() {
        let credential = Credential::new(API_KEY);
        let masked = credential.masked_api_key();

        assert_eq!(masked, "vend...2345");
    }

    #[rstest]
    fn test_masked_api_key_short() {
        let credential = Credential::new("short");
        let masked = credential.masked_api_key();

        assert_eq!(masked, "*****");
    }

    #[rstest]
    fn test_debug_does_not_leak_key() {
        let credential = Credential::new(API_KEY);
        let debug_string = format!("{credential:?}");

        assert!(!debug_string.contains(API_KEY));
        assert!(debug_string.contains("vend..."));
    }
}
