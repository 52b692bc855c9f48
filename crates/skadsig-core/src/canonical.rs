//! Canonical messages for signing and verification.
//!
//! A canonical message is an ordered list of UTF-8 items joined by
//! U+2063 (INVISIBLE SEPARATOR). Item order is fixed per protocol version:
//!
//! - Impression parameters: version, ad-network-id, campaign-id,
//!   itunes-item-id, nonce, source-app-store-id, [fidelity-type], timestamp
//! - Postbacks: version, ad-network-id, campaign-id, app-id, transaction-id,
//!   redownload, [source-app-id], [fidelity-type], [did-win]
//!
//! Absent optional items are omitted, never replaced with a placeholder.
//! The message is the exact byte sequence hashed, so a verifier must rebuild
//! it byte-for-byte.

use crate::dispatch;
use crate::error::{Error, Result};
use crate::params::SigningParameters;
use crate::postback::PostbackRecord;
use crate::version::ProtocolVersion;

/// Separator placed between canonical items.
pub const SEPARATOR: char = '\u{2063}';

/// Canonical items for a parameter set, using the rule for its version tag.
pub fn canonical_parameter_items(params: &SigningParameters) -> Result<Vec<String>> {
    let rule = dispatch::parameter_rule(params.version())?;
    (rule.build)(params)
}

/// Canonical message for a parameter set.
pub fn canonical_parameter_message(params: &SigningParameters) -> Result<String> {
    join_items(&canonical_parameter_items(params)?)
}

/// Canonical message for checking a signature over a parameter set.
///
/// Only 2.1, 2.2 and 3.0 are accepted; the bare and 2.0 forms are
/// signable but not verifiable.
pub fn canonical_verifiable_parameter_message(params: &SigningParameters) -> Result<String> {
    let rule = dispatch::verifiable_parameter_rule(params.version())?;
    join_items(&(rule.build)(params)?)
}

/// Canonical items for a postback, using the rule for its version tag.
pub fn canonical_postback_items(record: &PostbackRecord) -> Result<Vec<String>> {
    let rule = dispatch::postback_rule(&record.version)?;
    (rule.build)(record)
}

/// Canonical message for a postback.
pub fn canonical_postback_message(record: &PostbackRecord) -> Result<String> {
    join_items(&canonical_postback_items(record)?)
}

/// Join items with [`SEPARATOR`].
pub fn join_items<S: AsRef<str>>(items: &[S]) -> Result<String> {
    if items.is_empty() {
        return Err(Error::EmptyMessage);
    }

    let len = items.iter().map(|i| i.as_ref().len()).sum::<usize>()
        + (items.len() - 1) * SEPARATOR.len_utf8();
    let mut message = String::with_capacity(len);
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            message.push(SEPARATOR);
        }
        message.push_str(item.as_ref());
    }
    Ok(message)
}

// ─────────────────────────────────────────────────────────────────────────────
// Parameter rules
// ─────────────────────────────────────────────────────────────────────────────

pub(crate) fn parameters_v2_0(params: &SigningParameters) -> Result<Vec<String>> {
    parameter_items(params, ProtocolVersion::V2_0)
}

pub(crate) fn parameters_v2_1(params: &SigningParameters) -> Result<Vec<String>> {
    parameter_items(params, ProtocolVersion::V2_1)
}

pub(crate) fn parameters_v2_2(params: &SigningParameters) -> Result<Vec<String>> {
    parameter_items(params, ProtocolVersion::V2_2)
}

pub(crate) fn parameters_v3_0(params: &SigningParameters) -> Result<Vec<String>> {
    parameter_items(params, ProtocolVersion::V3_0)
}

fn parameter_items(params: &SigningParameters, version: ProtocolVersion) -> Result<Vec<String>> {
    let mut items = Vec::with_capacity(8);

    items.push(params.version().to_owned());
    items.push(params.ad_network_id().to_owned());
    items.push(params.campaign_id().to_string());
    items.push(params.itunes_item_id().to_string());
    // Uuid's Display is the lowercase hyphenated form.
    items.push(params.nonce().to_string());
    items.push(params.source_app_store_id().to_string());

    if version.carries_fidelity() {
        let fidelity = params.fidelity_type().ok_or(Error::MissingRequiredField {
            field: "fidelity-type",
            version,
        })?;
        items.push(fidelity.to_string());
    }

    items.push(params.timestamp().timestamp_millis().to_string());

    Ok(items)
}

// ─────────────────────────────────────────────────────────────────────────────
// Postback rules
// ─────────────────────────────────────────────────────────────────────────────

pub(crate) fn postback_v2_1(record: &PostbackRecord) -> Result<Vec<String>> {
    postback_items(record, ProtocolVersion::V2_1)
}

pub(crate) fn postback_v2_2(record: &PostbackRecord) -> Result<Vec<String>> {
    postback_items(record, ProtocolVersion::V2_2)
}

pub(crate) fn postback_v3_0(record: &PostbackRecord) -> Result<Vec<String>> {
    postback_items(record, ProtocolVersion::V3_0)
}

fn postback_items(record: &PostbackRecord, version: ProtocolVersion) -> Result<Vec<String>> {
    let missing = |field: &'static str| Error::MissingRequiredField { field, version };

    let redownload = record.redownload.ok_or_else(|| missing("redownload"))?;

    let mut items = Vec::with_capacity(9);
    items.push(record.version.clone());
    items.push(record.ad_network_id.clone());
    items.push(record.campaign_id.to_string());
    items.push(record.app_id.to_string());
    items.push(record.transaction_id.clone());
    items.push(redownload.to_string());

    if let Some(source_app_id) = record.source_app_id {
        items.push(source_app_id.to_string());
    }

    if version.carries_fidelity() {
        let fidelity = record.fidelity_type.ok_or_else(|| missing("fidelity-type"))?;
        items.push(fidelity.to_string());
    }

    if version.carries_did_win() {
        let did_win = record.did_win.ok_or_else(|| missing("did-win"))?;
        items.push(did_win.to_string());
    }

    Ok(items)
}
