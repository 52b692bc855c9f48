//! Golden vectors.
//!
//! Every implementation must produce identical canonical messages, and the
//! authority's published postbacks must verify against its published key.

use skadsig::core::{canonical_parameter_items, canonical_parameter_message, canonical_postback_items};
use skadsig::{verify_parameters, verify_postback, Error, Signer};
use skadsig_testkit::{
    all_parameter_vectors, all_postback_vectors, parameters_from_vector, postback_from_vector,
    test_key_pair, TEST_KEY_PEM,
};

#[test]
fn authority_postbacks_verify() {
    for vector in all_postback_vectors() {
        let record = postback_from_vector(&vector);
        assert!(
            verify_postback(&record).unwrap(),
            "vector '{}' did not verify",
            vector.name
        );
    }
}

#[test]
fn authority_postback_items_match() {
    for vector in all_postback_vectors() {
        let record = postback_from_vector(&vector);
        assert_eq!(
            canonical_postback_items(&record).unwrap(),
            vector.expected_items,
            "vector '{}'",
            vector.name
        );
    }
}

#[test]
fn losing_postback_without_source_has_eight_items() {
    let vector = all_postback_vectors()
        .into_iter()
        .find(|v| v.name.contains("losing"))
        .unwrap();
    let record = postback_from_vector(&vector);
    let items = canonical_postback_items(&record).unwrap();

    assert_eq!(items.len(), 8);
    assert_eq!(&items[6..], ["1", "false"]);
}

#[test]
fn conversion_value_is_not_signed() {
    let vector = &all_postback_vectors()[0];
    let mut record = postback_from_vector(vector);
    record.conversion_value = None;
    assert!(verify_postback(&record).unwrap());
}

#[test]
fn altered_authority_postback_rejected() {
    for vector in all_postback_vectors() {
        let mut record = postback_from_vector(&vector);
        record.campaign_id += 1;
        assert!(!verify_postback(&record).unwrap(), "vector '{}'", vector.name);
    }
}

#[test]
fn parameter_items_match() {
    for vector in all_parameter_vectors() {
        let params = parameters_from_vector(&vector);
        assert_eq!(
            canonical_parameter_items(&params).unwrap(),
            vector.expected_items,
            "vector '{}'",
            vector.name
        );
    }
}

#[test]
fn parameter_message_uses_invisible_separator() {
    let vector = &all_parameter_vectors()[0];
    let message = canonical_parameter_message(&parameters_from_vector(vector)).unwrap();
    assert_eq!(
        message,
        "2.2\u{2063}example123.skadnetwork\u{2063}42\u{2063}525463029\u{2063}\
         68483ef6-0ada-40df-ab6b-3d19a66330fa\u{2063}1234567891\u{2063}1\u{2063}1651831200000"
    );
}

#[test]
fn pinned_parameter_signatures_verify() {
    let key_pair = test_key_pair();
    for vector in all_parameter_vectors() {
        let Some(signature) = vector.signature else {
            continue;
        };
        let params = parameters_from_vector(&vector);
        assert!(
            verify_parameters(key_pair.public_key(), &params, signature).unwrap(),
            "vector '{}'",
            vector.name
        );
    }
}

#[test]
fn parameter_vectors_round_trip_with_test_key() {
    let signer = Signer::from_pem(TEST_KEY_PEM).unwrap();
    for vector in all_parameter_vectors() {
        let params = parameters_from_vector(&vector);
        let signature = signer.sign(&params).unwrap();
        let verified = signer.verify(&params, &signature);
        if vector.version.is_empty() {
            assert!(matches!(verified, Err(Error::UnsupportedVersion(_))), "vector '{}'", vector.name);
        } else {
            assert!(verified.unwrap(), "vector '{}'", vector.name);
        }
    }
}

#[test]
fn fidelity_required_for_newer_parameter_versions() {
    let signer = Signer::from_pem(TEST_KEY_PEM).unwrap();
    let vector = all_parameter_vectors()
        .into_iter()
        .find(|v| v.fidelity_type.is_none())
        .unwrap();

    for version in ["2.2", "3.0"] {
        let mut v = vector.clone();
        v.version = version;
        let params = parameters_from_vector(&v);
        assert!(matches!(
            signer.sign(&params),
            Err(Error::MissingRequiredField { field: "fidelity-type", .. })
        ));
    }
}
