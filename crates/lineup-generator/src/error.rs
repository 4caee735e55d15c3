// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use lineup_model::error::ConfigurationError;
use thiserror::Error;

/// A generation run was rejected before any search started.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeneratorError {
    #[error("invalid generation request: {0}")]
    InvalidRequest(String),

    #[error("invalid contest configuration: {0}")]
    Configuration(#[from] ConfigurationError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use lineup_model::index::SlotIndex;

    #[test]
    fn test_display_messages() {
        let err = GeneratorError::InvalidRequest("num_lineups must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "invalid generation request: num_lineups must be positive"
        );

        let err: GeneratorError = ConfigurationError::NoEligiblePlayers {
            slot: SlotIndex::new(1),
            label: "QB".to_string(),
        }
        .into();
        assert!(matches!(err, GeneratorError::Configuration(_)));
        assert!(err.to_string().starts_with("invalid contest configuration: "));
    }
}
