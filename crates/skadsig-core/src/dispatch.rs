//! Version tag dispatch.
//!
//! A pure lookup from the version tag carried by a record to the rule that
//! canonicalizes it. Every verification path accepts 2.1, 2.2 and 3.0 only.
//! Signing impression parameters additionally accepts "2.0" and the bare
//! (empty) tag, both with 2.0 layout.

use crate::canonical;
use crate::error::{Error, Result};
use crate::params::SigningParameters;
use crate::postback::PostbackRecord;
use crate::version::ProtocolVersion;

/// A pure function from a record to its ordered canonical items.
pub type VersionRule<T> = fn(&T) -> Result<Vec<String>>;

/// A resolved rule for one version tag.
pub struct Rule<T: 'static> {
    /// The tag exactly as carried by a record.
    pub tag: &'static str,
    /// Layout the tag selects.
    pub version: ProtocolVersion,
    /// Builds the ordered canonical items.
    pub build: VersionRule<T>,
}

static PARAMETER_RULES: [Rule<SigningParameters>; 5] = [
    Rule {
        tag: "",
        version: ProtocolVersion::V2_0,
        build: canonical::parameters_v2_0,
    },
    Rule {
        tag: "2.0",
        version: ProtocolVersion::V2_0,
        build: canonical::parameters_v2_0,
    },
    Rule {
        tag: "2.1",
        version: ProtocolVersion::V2_1,
        build: canonical::parameters_v2_1,
    },
    Rule {
        tag: "2.2",
        version: ProtocolVersion::V2_2,
        build: canonical::parameters_v2_2,
    },
    Rule {
        tag: "3.0",
        version: ProtocolVersion::V3_0,
        build: canonical::parameters_v3_0,
    },
];

static VERIFIABLE_PARAMETER_RULES: [Rule<SigningParameters>; 3] = [
    Rule {
        tag: "2.1",
        version: ProtocolVersion::V2_1,
        build: canonical::parameters_v2_1,
    },
    Rule {
        tag: "2.2",
        version: ProtocolVersion::V2_2,
        build: canonical::parameters_v2_2,
    },
    Rule {
        tag: "3.0",
        version: ProtocolVersion::V3_0,
        build: canonical::parameters_v3_0,
    },
];

static POSTBACK_RULES: [Rule<PostbackRecord>; 3] = [
    Rule {
        tag: "2.1",
        version: ProtocolVersion::V2_1,
        build: canonical::postback_v2_1,
    },
    Rule {
        tag: "2.2",
        version: ProtocolVersion::V2_2,
        build: canonical::postback_v2_2,
    },
    Rule {
        tag: "3.0",
        version: ProtocolVersion::V3_0,
        build: canonical::postback_v3_0,
    },
];

/// Select the rule for signing a parameter set.
pub fn parameter_rule(tag: &str) -> Result<&'static Rule<SigningParameters>> {
    lookup(&PARAMETER_RULES, tag)
}

/// Select the rule for verifying a signature over a parameter set.
pub fn verifiable_parameter_rule(tag: &str) -> Result<&'static Rule<SigningParameters>> {
    lookup(&VERIFIABLE_PARAMETER_RULES, tag)
}

/// Select the postback rule for a version tag.
pub fn postback_rule(tag: &str) -> Result<&'static Rule<PostbackRecord>> {
    lookup(&POSTBACK_RULES, tag)
}

fn lookup<T: 'static>(rules: &'static [Rule<T>], tag: &str) -> Result<&'static Rule<T>> {
    rules
        .iter()
        .find(|rule| rule.tag == tag)
        .ok_or_else(|| Error::UnsupportedVersion(tag.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postback_tags() {
        assert_eq!(postback_rule("2.1").unwrap().version, ProtocolVersion::V2_1);
        assert_eq!(postback_rule("2.2").unwrap().version, ProtocolVersion::V2_2);
        assert_eq!(postback_rule("3.0").unwrap().version, ProtocolVersion::V3_0);

        for tag in ["", "1.0", "2.0", "3", "3.00", "4.0"] {
            match postback_rule(tag) {
                Err(Error::UnsupportedVersion(t)) => assert_eq!(t, tag),
                _ => panic!("tag {tag:?} should be unsupported"),
            }
        }
    }

    #[test]
    fn test_parameter_tags() {
        assert_eq!(parameter_rule("").unwrap().version, ProtocolVersion::V2_0);
        assert_eq!(parameter_rule("2.0").unwrap().version, ProtocolVersion::V2_0);
        assert_eq!(parameter_rule("3.0").unwrap().version, ProtocolVersion::V3_0);
        assert!(matches!(parameter_rule("1.0"), Err(Error::UnsupportedVersion(_))));
    }

    #[test]
    fn test_verifiable_parameter_tags() {
        assert_eq!(verifiable_parameter_rule("2.1").unwrap().version, ProtocolVersion::V2_1);
        assert_eq!(verifiable_parameter_rule("2.2").unwrap().version, ProtocolVersion::V2_2);
        assert_eq!(verifiable_parameter_rule("3.0").unwrap().version, ProtocolVersion::V3_0);

        for tag in ["", "2.0", "1.0", "4.0"] {
            match verifiable_parameter_rule(tag) {
                Err(Error::UnsupportedVersion(t)) => assert_eq!(t, tag),
                _ => panic!("tag {tag:?} should not be verifiable"),
            }
        }
    }

    #[test]
    fn test_verifiable_rules_match_signing_rules() {
        for rule in &VERIFIABLE_PARAMETER_RULES {
            let params = SigningParameters::builder(rule.tag, "example123.skadnetwork", 42, 525463029)
                .fidelity_type(crate::types::FidelityType::StoreKitRendered)
                .build();
            let signing = parameter_rule(rule.tag).unwrap();
            assert_eq!(signing.version, rule.version);
            assert_eq!((signing.build)(&params).unwrap(), (rule.build)(&params).unwrap());
        }
    }
}
