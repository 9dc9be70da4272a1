//! Ordered environment lookups as generated environment adapters use them.

use anyhow::{Result, ensure};
use cfgsynth::{ElementCodec, KeyMapper, env};
use rstest::rstest;
use serde::Deserialize;
use serial_test::serial;
use test_helpers::env as test_env;

#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct Realm {
    id: String,
    client_port: i64,
}

impl ElementCodec for Realm {}

const HOST_KEYS: &[&str] = &["SERVER_ADDRESS_ALIASE", "DB_HOST"];

#[rstest]
#[serial]
fn canonical_key_is_read_when_no_alias_is_set() -> Result<()> {
    let _env = test_env::overlay([("DB_HOST", Some("foo")), ("SERVER_ADDRESS_ALIASE", None)]);
    let host = env::lookup_string(&KeyMapper::identity(), HOST_KEYS);
    ensure!(host.as_deref() == Some("foo"), "unexpected host {host:?}");
    Ok(())
}

#[rstest]
#[serial]
fn alias_wins_over_canonical_key() -> Result<()> {
    let _env = test_env::overlay([
        ("DB_HOST", Some("canonical")),
        ("SERVER_ADDRESS_ALIASE", Some("alias")),
    ]);
    let host = env::lookup_string(&KeyMapper::identity(), HOST_KEYS);
    ensure!(host.as_deref() == Some("alias"), "unexpected host {host:?}");
    Ok(())
}

#[rstest]
#[case::empty_alias(Some(""), Some("canonical"), Some("canonical"))]
#[case::both_empty(Some(""), Some(""), None)]
#[case::both_unset(None, None, None)]
#[serial]
fn empty_values_count_as_absent(
    #[case] alias: Option<&str>,
    #[case] canonical: Option<&str>,
    #[case] expected: Option<&str>,
) -> Result<()> {
    let _env = test_env::overlay([("SERVER_ADDRESS_ALIASE", alias), ("DB_HOST", canonical)]);
    let host = env::lookup_string(&KeyMapper::identity(), HOST_KEYS);
    ensure!(host.as_deref() == expected, "expected {expected:?}, got {host:?}");
    Ok(())
}

#[rstest]
#[case::valid_alias("7000", "8080", Some(7000))]
#[case::malformed_alias("seven", "8080", Some(8080))]
#[case::both_malformed("seven", "eight", None)]
#[case::float_is_not_int("70.0", "8080", Some(8080))]
#[case::negative("-1", "8080", Some(-1))]
#[serial]
fn integer_lookup_moves_past_malformed_values(
    #[case] alias: &str,
    #[case] canonical: &str,
    #[case] expected: Option<i64>,
) -> Result<()> {
    let _env = test_env::overlay([("PORT_ALIAS", Some(alias)), ("DB_PORT", Some(canonical))]);
    let port = env::lookup_int(&KeyMapper::identity(), &["PORT_ALIAS", "DB_PORT"]);
    ensure!(port == expected, "expected {expected:?}, got {port:?}");
    Ok(())
}

#[rstest]
#[serial]
fn mapper_rewrites_every_candidate() -> Result<()> {
    let _env = test_env::overlay([("STAGING_DB_HOST", Some("staging")), ("DB_HOST", Some("prod"))]);
    let host = env::lookup_string(&KeyMapper::prefixed("STAGING_"), &["DB_HOST"]);
    ensure!(host.as_deref() == Some("staging"), "unexpected host {host:?}");
    Ok(())
}

#[rstest]
#[serial]
fn struct_slices_decode_from_json_blobs() -> Result<()> {
    let _env = test_env::overlay([
        ("REALMS_ALIAS", Some("not json")),
        ("SERVER_REALMS", Some(r#"[{"id":"eu","clientPort":8085}]"#)),
    ]);
    let realms: Option<Vec<Realm>> =
        env::lookup_slice(&KeyMapper::identity(), &["REALMS_ALIAS", "SERVER_REALMS"]);
    let expected = vec![Realm {
        id: String::from("eu"),
        client_port: 8085,
    }];
    ensure!(realms.as_ref() == Some(&expected), "unexpected realms {realms:?}");
    Ok(())
}
