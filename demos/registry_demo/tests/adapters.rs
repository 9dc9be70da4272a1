//! Generated adapters compiled into the demo, exercised one by one.

use std::sync::Arc;

use anyhow::{Result, ensure};
use cfgsynth::KeyMapper;
use registry_demo::database::{
    Config as _, DbAllConfig, DbEnvConfig, DbMockConfig, DbSource, DbYamlConfig,
};
use registry_demo::gconfig::{ServerEnvConfig, ServerYamlConfig};
use registry_demo::server::{Config as _, RealmInfo};
use rstest::rstest;
use serial_test::serial;
use test_helpers::env as test_env;

const DB_KEYS: [&str; 4] = ["DB_HOST", "SERVER_ADDRESS_ALIASE", "DB_PORT", "DB_USER"];

fn realm(id: &str, client_port: i64) -> RealmInfo {
    RealmInfo {
        id: id.to_owned(),
        client_port,
        regions: Vec::new(),
    }
}

#[rstest]
#[serial]
fn env_adapter_reads_canonical_key() {
    let mut env = test_env::cleared(DB_KEYS);
    env.set("DB_HOST", "foo");
    assert_eq!(DbEnvConfig::new().host(String::from("def")), (String::from("foo"), true));
}

#[rstest]
#[serial]
fn env_alias_is_tried_before_canonical_key() {
    let mut env = test_env::cleared(DB_KEYS);
    env.set("DB_HOST", "canonical");
    env.set("SERVER_ADDRESS_ALIASE", "alias");
    assert_eq!(DbEnvConfig::new().host(String::new()), (String::from("alias"), true));
}

#[rstest]
#[serial]
#[case::unset(None)]
#[case::empty(Some(""))]
#[case::not_a_number(Some("eighty"))]
fn env_misses_return_the_default(#[case] raw: Option<&str>) {
    let _env = test_env::overlay([("DB_PORT", raw)]);
    assert_eq!(DbEnvConfig::new().port(5432), (5432, false));
}

#[rstest]
#[serial]
fn env_mapper_rewrites_every_candidate() {
    let mut env = test_env::cleared(DB_KEYS);
    env.set("STAGING_DB_USER", "reporting");
    let adapter = DbEnvConfig::with_mapper(KeyMapper::prefixed("STAGING_"));
    assert_eq!(adapter.user(String::from("app")), (String::from("reporting"), true));
    assert_eq!(DbEnvConfig::new().user(String::from("app")), (String::from("app"), false));
}

#[rstest]
#[serial]
fn env_struct_slices_decode_json() {
    let _env = test_env::set_var("SERVER_REALMS", r#"[{"id":"eu","clientPort":8085}]"#);
    let (realms, found) = ServerEnvConfig::new().realms(Vec::new());
    assert!(found);
    assert_eq!(realms, vec![realm("eu", 8085)]);
}

#[rstest]
#[case::integral("5.0", (5, true))]
#[case::fractional("5.5", (7, false))]
#[case::native("6", (6, true))]
#[case::quoted("\"6\"", (7, false))]
fn document_integers_accept_only_whole_numbers(
    #[case] raw: &str,
    #[case] expected: (i64, bool),
) -> Result<()> {
    let adapter = DbYamlConfig::from_bytes(format!("db:\n  port: {raw}\n").as_bytes())?;
    ensure!(adapter.port(7) == expected, "port {raw} gave {:?}", adapter.port(7));
    Ok(())
}

#[rstest]
fn document_adapter_reads_its_own_section() -> Result<()> {
    let adapter = DbYamlConfig::from_bytes(b"db:\n  host: db.local\nserver:\n  host: web.local\n")?;
    ensure!(adapter.host(String::new()) == (String::from("db.local"), true), "host");
    ensure!(adapter.user(String::from("app")) == (String::from("app"), false), "user default");
    Ok(())
}

#[rstest]
#[case::tilde("~", (String::from("def"), false))]
#[case::word("null", (String::from("def"), false))]
#[case::title("Null", (String::from("def"), false))]
#[case::empty("", (String::from("def"), false))]
#[case::double_quoted("\"null\"", (String::from("null"), true))]
#[case::single_quoted("'~'", (String::from("~"), true))]
fn document_nulls_return_the_default(
    #[case] raw: &str,
    #[case] expected: (String, bool),
) -> Result<()> {
    let adapter = DbYamlConfig::from_bytes(format!("db:\n  host: {raw}\n  port: {raw}\n").as_bytes())?;
    let host = adapter.host(String::from("def"));
    ensure!(host == expected, "host {raw:?} gave {host:?}");
    ensure!(adapter.port(7) == (7, false), "port {raw:?} gave {:?}", adapter.port(7));
    Ok(())
}

#[rstest]
fn null_document_value_defers_to_later_sources() -> Result<()> {
    let nulls = DbYamlConfig::from_bytes(b"db:\n  host: ~\n  user: null\n")?;
    let filled = DbYamlConfig::from_bytes(b"db:\n  host: db.local\n  user: reporting\n")?;
    let sources: Vec<DbSource> = vec![Arc::new(nulls), Arc::new(filled)];
    let composite = DbAllConfig::new(sources);
    ensure!(
        composite.host(String::new()) == (String::from("db.local"), true),
        "null host must not shadow the next source"
    );
    ensure!(
        composite.user(String::new()) == (String::from("reporting"), true),
        "null user must not shadow the next source"
    );
    Ok(())
}

#[rstest]
fn null_slices_and_null_item_fields() -> Result<()> {
    let yaml = "\
server:
  realms:
    - id: eu
      clientPort: 8085
      regions: ~
";
    let (realms, found) = ServerYamlConfig::from_bytes(yaml.as_bytes())?.realms(Vec::new());
    ensure!(found, "item with a null field should decode");
    ensure!(realms == vec![realm("eu", 8085)], "realms {realms:?}");

    let (realms, found) = ServerYamlConfig::from_bytes(b"server:\n  realms: ~\n")?.realms(Vec::new());
    ensure!(!found && realms.is_empty(), "null slice gave {realms:?}");
    Ok(())
}

#[rstest]
fn document_struct_slices_decode_items() -> Result<()> {
    let yaml = "\
server:
  realms:
    - id: eu
      clientPort: 8085
      regions: [fr, de]
    - id: us
      clientPort: 9090
";
    let adapter = ServerYamlConfig::from_bytes(yaml.as_bytes())?;
    let (realms, found) = adapter.realms(Vec::new());
    ensure!(found, "realms should be found");
    ensure!(realms.len() == 2, "realms {realms:?}");
    ensure!(
        realms.first().map(|first| first.regions.len()) == Some(2),
        "regions {realms:?}"
    );
    Ok(())
}

#[rstest]
fn malformed_document_fails_construction() {
    assert!(DbYamlConfig::from_bytes(b"db: [unterminated\n").is_err());
    assert!(DbYamlConfig::from_bytes(b"- just\n- a list\n").is_err());
}

#[rstest]
fn mock_adapter_always_defaults() {
    let mock = DbMockConfig::new();
    assert_eq!(mock.host(String::from("h")), (String::from("h"), false));
    assert_eq!(mock.port(1), (1, false));
}

#[rstest]
#[serial]
fn composite_prefers_earlier_sources() -> Result<()> {
    let mut env = test_env::cleared(DB_KEYS);
    env.set("DB_HOST", "from-env");
    let document = DbYamlConfig::from_bytes(b"db:\n  host: from-yaml\n  port: 6000\n")?;
    let sources: Vec<DbSource> = vec![Arc::new(DbEnvConfig::new()), Arc::new(document)];
    let composite = DbAllConfig::new(sources);

    ensure!(composite.len() == 2, "two sources");
    ensure!(
        composite.host(String::new()) == (String::from("from-env"), true),
        "environment wins"
    );
    ensure!(composite.port(1) == (6000, true), "document fills the gap");
    ensure!(
        composite.user(String::from("app")) == (String::from("app"), false),
        "default when no source has a value"
    );
    Ok(())
}

#[rstest]
fn empty_composite_returns_defaults() {
    let composite = DbAllConfig::default();
    assert!(composite.is_empty());
    assert_eq!(composite.port(3), (3, false));
}

#[rstest]
fn composite_sources_nest() {
    let mut inner = DbAllConfig::default();
    inner.push(Arc::new(DbMockConfig::new()));
    let outer = DbAllConfig::new(vec![Arc::new(inner), Arc::new(DbMockConfig::new())]);
    assert_eq!(outer.port(9), (9, false));
}
