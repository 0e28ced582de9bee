// Copyright 2026 the Range Bar Authors
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

/// Errors raised when a range bar component is constructed or reconfigured.
///
/// Geometry queries never fail: positions outside the bar are clamped onto it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeBarError {
    /// The requested configuration can't describe a usable bar.
    ///
    /// This covers fewer than two ticks, inverted or non-finite bounds,
    /// a non-positive tick interval, and thumb indices outside the tick range.
    #[error("invalid range bar configuration: {0}")]
    InvalidConfiguration(String),
    /// Pins are enabled, but the host didn't resolve an icon to draw them with.
    ///
    /// This indicates a packaging error in the host rather than a runtime condition.
    #[error("pins are enabled but no pin icon was provided")]
    MissingIcon,
}

impl RangeBarError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }
}

/// Result type for fallible range bar operations.
pub type Result<T, E = RangeBarError> = std::result::Result<T, E>;
