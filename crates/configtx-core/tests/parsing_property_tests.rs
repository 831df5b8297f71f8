#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::time::Duration;

use configtx_core::duration::{format_duration, parse_duration};
use configtx_core::errors::ConfigError;
use configtx_core::policy::{ImplicitMetaRule, validate_rule};
use configtx_core::{implicit_meta_from_string, parse_address, PolicyType};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_batch_timeout_text_survives_reparse(millis in 1u64..10_000_000) {
        let duration = Duration::from_millis(millis);
        prop_assert_eq!(parse_duration(&format_duration(duration)).unwrap(), duration);
    }

    #[test]
    fn prop_address_display_reparses(host in "[a-z][a-z0-9.-]{0,20}", port in any::<u16>()) {
        let parsed = parse_address(&format!("{}:{}", host, port)).unwrap();
        prop_assert_eq!(&parsed.host, &host);
        prop_assert_eq!(parsed.port, port);
    }

    #[test]
    fn prop_implicit_meta_rejects_wrong_token_count(words in prop::collection::vec("[A-Z]{1,6}", 3..6)) {
        let input = words.join(" ");
        let is_token_count_error = matches!(
            implicit_meta_from_string(&input),
            Err(ConfigError::ImplicitMetaTokenCount { .. })
        );
        prop_assert!(is_token_count_error);
    }
}

#[test]
fn test_implicit_meta_quantifiers() {
    let cases = [
        ("ANY Readers", ImplicitMetaRule::Any, "Readers"),
        ("ALL Writers", ImplicitMetaRule::All, "Writers"),
        ("MAJORITY Admins", ImplicitMetaRule::Majority, "Admins"),
    ];
    for (input, rule, sub_policy) in cases {
        let parsed = implicit_meta_from_string(input).unwrap();
        assert_eq!(parsed.rule, rule, "wrong quantifier for {}", input);
        assert_eq!(parsed.sub_policy, sub_policy);
        assert_eq!(parsed.to_string(), input);
    }
}

#[test]
fn test_implicit_meta_rejects_lowercase_quantifier() {
    assert!(matches!(
        implicit_meta_from_string("any Readers"),
        Err(ConfigError::UnknownImplicitMetaRule { .. })
    ));
}

#[test]
fn test_address_edge_cases() {
    assert!(matches!(
        parse_address("a:b:c"),
        Err(ConfigError::InvalidAddress { .. })
    ));
    assert!(matches!(
        parse_address("host:70000"),
        Err(ConfigError::InvalidPort { .. })
    ));
    assert!(matches!(
        parse_address(":7050"),
        Err(ConfigError::InvalidAddress { .. })
    ));
}

#[test]
fn test_signature_rules() {
    let valid = [
        "OR('Org1MSP.member')",
        "AND('Org1MSP.admin', 'Org2MSP.admin')",
        "OutOf(2, 'Org1MSP.peer', 'Org2MSP.peer', 'Org3MSP.peer')",
        "OutOf(0)",
    ];
    for rule in valid {
        assert!(validate_rule(PolicyType::Signature, rule).is_ok(), "{}", rule);
    }

    let invalid = [
        "OR('Org1MSP.member'",
        "XOR('Org1MSP.member')",
        "OR('Org1MSP')",
        "OutOf(3, 'Org1MSP.peer')",
    ];
    for rule in invalid {
        assert!(validate_rule(PolicyType::Signature, rule).is_err(), "{}", rule);
    }
}
