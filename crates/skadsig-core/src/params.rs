//! Impression signing parameters.
//!
//! An ad network signs one parameter set per ad impression. The set is
//! immutable once built; a second impression needs a new set with a fresh
//! nonce.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::FidelityType;

/// The fields an ad network signs for a single impression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SigningParameters {
    #[serde(default)]
    version: String,
    ad_network_id: String,
    campaign_id: u64,
    itunes_item_id: u64,
    nonce: Uuid,
    source_app_store_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fidelity_type: Option<FidelityType>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    timestamp: DateTime<Utc>,
}

impl SigningParameters {
    /// Start building a parameter set.
    pub fn builder(
        version: impl Into<String>,
        ad_network_id: impl Into<String>,
        campaign_id: u64,
        itunes_item_id: u64,
    ) -> SigningParametersBuilder {
        SigningParametersBuilder::new(version, ad_network_id, campaign_id, itunes_item_id)
    }

    /// The version tag, exactly as supplied. May be empty for the bare form.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The signing ad network's identifier, used verbatim.
    pub fn ad_network_id(&self) -> &str {
        &self.ad_network_id
    }

    /// Campaign identifier chosen by the ad network.
    pub fn campaign_id(&self) -> u64 {
        self.campaign_id
    }

    /// App Store ID of the advertised product.
    pub fn itunes_item_id(&self) -> u64 {
        self.itunes_item_id
    }

    /// Single-use nonce, rendered lowercase and hyphenated.
    pub fn nonce(&self) -> &Uuid {
        &self.nonce
    }

    /// App Store ID of the app displaying the ad (0 for development builds).
    pub fn source_app_store_id(&self) -> u64 {
        self.source_app_store_id
    }

    /// How the ad was shown. Required by 2.2 and 3.0, ignored before that.
    pub fn fidelity_type(&self) -> Option<FidelityType> {
        self.fidelity_type
    }

    /// Impression time, signed as Unix milliseconds.
    pub fn timestamp(&self) -> &DateTime<Utc> {
        &self.timestamp
    }
}

/// Builder for [`SigningParameters`].
///
/// Unless set explicitly, the nonce is a fresh random UUID and the
/// timestamp is the current time.
pub struct SigningParametersBuilder {
    version: String,
    ad_network_id: String,
    campaign_id: u64,
    itunes_item_id: u64,
    nonce: Option<Uuid>,
    source_app_store_id: u64,
    fidelity_type: Option<FidelityType>,
    timestamp: Option<DateTime<Utc>>,
}

impl SigningParametersBuilder {
    /// Start building a parameter set.
    pub fn new(
        version: impl Into<String>,
        ad_network_id: impl Into<String>,
        campaign_id: u64,
        itunes_item_id: u64,
    ) -> Self {
        Self {
            version: version.into(),
            ad_network_id: ad_network_id.into(),
            campaign_id,
            itunes_item_id,
            nonce: None,
            source_app_store_id: 0,
            fidelity_type: None,
            timestamp: None,
        }
    }

    /// Set the impression nonce.
    pub fn nonce(mut self, nonce: Uuid) -> Self {
        self.nonce = Some(nonce);
        self
    }

    /// Set the source app's App Store ID.
    pub fn source_app_store_id(mut self, id: u64) -> Self {
        self.source_app_store_id = id;
        self
    }

    /// Set the fidelity type (required for 2.2 and later).
    pub fn fidelity_type(mut self, fidelity: FidelityType) -> Self {
        self.fidelity_type = Some(fidelity);
        self
    }

    /// Set the impression timestamp.
    pub fn timestamp(mut self, ts: DateTime<Utc>) -> Self {
        self.timestamp = Some(ts);
        self
    }

    /// Finish the parameter set.
    pub fn build(self) -> SigningParameters {
        SigningParameters {
            version: self.version,
            ad_network_id: self.ad_network_id,
            campaign_id: self.campaign_id,
            itunes_item_id: self.itunes_item_id,
            nonce: self.nonce.unwrap_or_else(Uuid::new_v4),
            source_app_store_id: self.source_app_store_id,
            fidelity_type: self.fidelity_type,
            timestamp: self.timestamp.unwrap_or_else(Utc::now),
        }
    }
}
