//! Proptest generators for property-based testing.

use chrono::{DateTime, Utc};
use proptest::prelude::*;
use skadsig::{ConversionValue, FidelityType, PostbackRecord, SigningParameters};
use uuid::Uuid;

/// Generate a FidelityType.
pub fn fidelity_type() -> impl Strategy<Value = FidelityType> {
    prop_oneof![
        Just(FidelityType::ViewThrough),
        Just(FidelityType::StoreKitRendered),
    ]
}

/// Generate a version tag accepted for signing.
pub fn signing_tag() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just(""), Just("2.0"), Just("2.1"), Just("2.2"), Just("3.0")]
}

/// Generate a version tag accepted by every verification path.
pub fn verifiable_tag() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("2.1"), Just("2.2"), Just("3.0")]
}

/// Generate a version tag accepted for signing but not for verification.
pub fn signing_only_tag() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just(""), Just("2.0")]
}

/// Generate a version tag accepted for postback verification.
pub fn postback_tag() -> impl Strategy<Value = &'static str> {
    verifiable_tag()
}

/// Generate a version tag that no rule accepts.
pub fn unsupported_tag() -> impl Strategy<Value = String> {
    "[0-9]\\.[0-9]{1,2}".prop_filter("must be unsupported", |tag| {
        !matches!(tag.as_str(), "2.0" | "2.1" | "2.2" | "3.0")
    })
}

/// Generate an ad network identifier.
pub fn ad_network_id() -> impl Strategy<Value = String> {
    "[a-z0-9]{1,16}\\.skadnetwork".prop_map(String::from)
}

/// Generate a nonce.
pub fn nonce() -> impl Strategy<Value = Uuid> {
    any::<u128>().prop_map(Uuid::from_u128)
}

/// Generate a timestamp between the epoch and 2100.
pub fn timestamp() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..=4_102_444_800_000i64)
        .prop_filter_map("representable", DateTime::<Utc>::from_timestamp_millis)
}

/// Generate a conversion value.
pub fn conversion_value() -> impl Strategy<Value = ConversionValue> {
    (0u8..=ConversionValue::MAX).prop_filter_map("6-bit", |v| ConversionValue::new(v).ok())
}

/// Generate a complete parameter set for any signing version.
pub fn signing_parameters() -> impl Strategy<Value = SigningParameters> {
    parameters_with_tag(signing_tag())
}

/// Generate a complete parameter set whose signature can be verified.
pub fn verifiable_parameters() -> impl Strategy<Value = SigningParameters> {
    parameters_with_tag(verifiable_tag())
}

/// Generate a complete parameter set for a signing-only version.
pub fn signing_only_parameters() -> impl Strategy<Value = SigningParameters> {
    parameters_with_tag(signing_only_tag())
}

fn parameters_with_tag(
    tag: impl Strategy<Value = &'static str>,
) -> impl Strategy<Value = SigningParameters> {
    (
        tag,
        ad_network_id(),
        any::<u64>(),
        any::<u64>(),
        nonce(),
        any::<u64>(),
        fidelity_type(),
        timestamp(),
    )
        .prop_map(
            |(tag, network, campaign, item, nonce, source, fidelity, ts)| {
                SigningParameters::builder(tag, network, campaign, item)
                    .nonce(nonce)
                    .source_app_store_id(source)
                    .fidelity_type(fidelity)
                    .timestamp(ts)
                    .build()
            },
        )
}

/// Generate an unsigned postback carrying every field its version requires.
pub fn postback_record() -> impl Strategy<Value = PostbackRecord> {
    (
        postback_tag(),
        ad_network_id(),
        nonce(),
        any::<u64>(),
        any::<u64>(),
        any::<bool>(),
        proptest::option::of(any::<u64>()),
        fidelity_type(),
        proptest::option::of(conversion_value()),
        any::<bool>(),
    )
        .prop_map(
            |(tag, network, txn, campaign, app, redownload, source, fidelity, cv, did_win)| {
                PostbackRecord {
                    version: tag.to_string(),
                    ad_network_id: network,
                    transaction_id: txn.to_string(),
                    campaign_id: campaign,
                    app_id: app,
                    attribution_signature: String::new(),
                    redownload: Some(redownload),
                    source_app_id: source,
                    fidelity_type: Some(fidelity),
                    conversion_value: cv,
                    did_win: Some(did_win),
                }
            },
        )
}
