//! Install-validation postbacks received from the attribution authority.

use serde::{Deserialize, Serialize};

use crate::types::{ConversionValue, FidelityType};

/// A postback as delivered by the attribution authority.
///
/// The record is untrusted input. Optional fields are `None` when the
/// authority omitted them, which is distinct from any present value
/// (a conversion value of 0 is present).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PostbackRecord {
    /// Version tag, e.g. "3.0".
    #[serde(default)]
    pub version: String,

    /// The ad network the install is attributed to.
    pub ad_network_id: String,

    /// Unique per validation; use to deduplicate.
    pub transaction_id: String,

    /// Campaign identifier from the signed impression.
    pub campaign_id: u64,

    /// Item identifier of the advertised product.
    pub app_id: u64,

    /// Base64 DER ECDSA signature over the canonical postback message.
    #[serde(default)]
    pub attribution_signature: String,

    /// Whether the install was a redownload. Required from 2.1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redownload: Option<bool>,

    /// Only present when the privacy threshold was met.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_app_id: Option<u64>,

    /// How the winning ad was shown. Required from 2.2.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fidelity_type: Option<FidelityType>,

    /// Not part of the signed message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversion_value: Option<ConversionValue>,

    /// 3.0 and later.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub did_win: Option<bool>,
}
