//! Small value types shared by signing parameters and postbacks.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::FormatError;

/// How the ad was presented to the user.
///
/// Serialized as the integer `0` or `1`, which is also its canonical form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum FidelityType {
    /// Custom presentation by the ad network (view-through).
    ViewThrough = 0,
    /// App Store product page rendered by StoreKit.
    StoreKitRendered = 1,
}

impl FidelityType {
    /// Convert to the wire integer.
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// Try to parse from the wire integer.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::ViewThrough),
            1 => Some(Self::StoreKitRendered),
            _ => None,
        }
    }
}

impl fmt::Display for FidelityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_u8())
    }
}

impl From<FidelityType> for u8 {
    fn from(value: FidelityType) -> Self {
        value.to_u8()
    }
}

impl TryFrom<u8> for FidelityType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_u8(value).ok_or_else(|| format!("invalid fidelity-type: {value}"))
    }
}

/// A 6-bit conversion value reported by the installed app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ConversionValue(u8);

impl ConversionValue {
    /// Largest representable value.
    pub const MAX: u8 = 63;

    /// Create a conversion value, rejecting anything wider than 6 bits.
    pub fn new(value: u8) -> Result<Self, FormatError> {
        if value > Self::MAX {
            return Err(FormatError::ConversionValueOutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Get the raw value.
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for ConversionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ConversionValue> for u8 {
    fn from(value: ConversionValue) -> Self {
        value.0
    }
}

impl TryFrom<u8> for ConversionValue {
    type Error = FormatError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
