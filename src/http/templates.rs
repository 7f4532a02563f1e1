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

//! Path template resolution for parameterised REST endpoints.

use super::error::IgHttpError;

/// Replaces each `{name}` placeholder in `template` with the matching value.
///
/// Multiple occurrences of the same placeholder all receive the same value. A placeholder
/// left unresolved after substitution is a caller programming error: sending a request
/// with a literal `{name}` in its path is never valid, so it is reported as a typed
/// failure instead of reaching the network.
///
/// # Errors
///
/// Returns [`IgHttpError::UnresolvedTemplate`] naming the first remaining placeholder.
pub fn resolve_template(template: &str, values: &[(&str, &str)]) -> Result<String, IgHttpError> {
    let mut resolved = template.to_string();
    for (name, value) in values {
        resolved = resolved.replace(&format!("{{{name}}}"), value);
    }

    if let Some(start) = resolved.find('{') {
        let rest = &resolved[start + 1..];
        let placeholder = match rest.find('}') {
            Some(end) => rest[..end].to_string(),
            None => rest.to_string(),
        };
        return Err(IgHttpError::UnresolvedTemplate { placeholder });
    }

    Ok(resolved)
}
