//! Protocol versions and the layout features each one carries.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A protocol version with a defined canonical layout.
///
/// Versions before 2.0 used a different curve and are not represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProtocolVersion {
    /// 2.0, also used for the bare (untagged) signing form.
    V2_0,
    /// 2.1: earliest postback layout, with the redownload flag.
    V2_1,
    /// 2.2: adds the fidelity type.
    V2_2,
    /// 3.0: adds the did-win flag to postbacks.
    V3_0,
}

impl ProtocolVersion {
    /// The canonical tag for this version.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::V2_0 => "2.0",
            Self::V2_1 => "2.1",
            Self::V2_2 => "2.2",
            Self::V3_0 => "3.0",
        }
    }

    /// Whether the layout includes the fidelity-type item.
    pub fn carries_fidelity(self) -> bool {
        matches!(self, Self::V2_2 | Self::V3_0)
    }

    /// Whether the postback layout includes the did-win item.
    pub fn carries_did_win(self) -> bool {
        matches!(self, Self::V3_0)
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
