//! Registry and global facade wiring for both demo packages.

use std::sync::Arc;

use anyhow::{Context, Result, ensure};
use cfgsynth::{CfgsynthError, GlobalConfig, GlobalSource, KeyMapper, Registry};
use registry_demo::database::{Config as _, DB_PACKAGE, DbAllConfig, DbGlobal, register_db};
use registry_demo::gconfig::{SERVER_PACKAGE, ServerGlobal};
use registry_demo::server::Config as _;
use registry_demo::register_all;
use rstest::{fixture, rstest};
use serial_test::serial;
use tempfile::TempDir;
use test_helpers::env as test_env;

const DOCUMENT: &str = "\
db:
  host: db.internal
  port: 5433
server:
  host: 0.0.0.0
  port: 8080
";

const ENV_KEYS: [&str; 5] = [
    "DB_HOST",
    "DB_PORT",
    "SERVER_ADDRESS_ALIASE",
    "SERVER_HOST",
    "SERVER_PORT",
];

struct Fixture {
    _dir: TempDir,
    path: std::path::PathBuf,
    registry: Arc<Registry>,
}

#[fixture]
fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap_or_else(|err| panic!("temporary directory: {err}"));
    let path = dir.path().join("app.yaml");
    std::fs::write(&path, DOCUMENT).unwrap_or_else(|err| panic!("write document: {err}"));
    let registry = Arc::new(Registry::new());
    assert_eq!(register_all(&registry), 2);
    Fixture {
        _dir: dir,
        path,
        registry,
    }
}

#[rstest]
fn package_ids_are_distinct_and_registered(fixture: Fixture) {
    assert_eq!(DB_PACKAGE, "db");
    assert_eq!(SERVER_PACKAGE, "server");
    assert_eq!(fixture.registry.package_ids(), vec!["db", "server"]);
}

#[rstest]
fn registration_is_idempotent(fixture: Fixture) {
    assert!(!register_db(&fixture.registry));
    assert_eq!(register_all(&fixture.registry), 0);
    assert_eq!(fixture.registry.len(), 2);
}

#[rstest]
#[serial]
fn facade_serves_document_values(fixture: Fixture) -> Result<()> {
    let _env = test_env::cleared(ENV_KEYS);
    let global = GlobalConfig::new(
        Arc::clone(&fixture.registry),
        [GlobalSource::raw_env(), GlobalSource::yaml(&fixture.path)],
    )?;

    let db = global.get_db().context("db is registered")?;
    let server = global.get_server().context("server is registered")?;
    ensure!(db.host(String::new()) == (String::from("db.internal"), true), "db host");
    ensure!(db.port(0) == (5433, true), "db port");
    ensure!(server.port(0) == (8080, true), "server port");
    ensure!(server.realms(Vec::new()) == (Vec::new(), false), "realms default");
    Ok(())
}

#[rstest]
#[serial]
fn environment_overrides_document(fixture: Fixture) -> Result<()> {
    let mut env = test_env::cleared(ENV_KEYS);
    env.set("SERVER_ADDRESS_ALIASE", "alias.internal");
    env.set("SERVER_PORT", "9000");
    let global = GlobalConfig::new(
        Arc::clone(&fixture.registry),
        [GlobalSource::raw_env(), GlobalSource::yaml(&fixture.path)],
    )?;

    let db = global.get_db().context("db is registered")?;
    let server = global.get_server().context("server is registered")?;
    ensure!(db.host(String::new()) == (String::from("alias.internal"), true), "db alias");
    ensure!(server.port(0) == (9000, true), "server env port");
    ensure!(
        server.host(String::new()) == (String::from("0.0.0.0"), true),
        "server host from document"
    );
    Ok(())
}

#[rstest]
#[serial]
fn facade_mapper_reaches_every_package(fixture: Fixture) -> Result<()> {
    let mut env = test_env::cleared(ENV_KEYS);
    env.set("CANARY_DB_PORT", "7000");
    let global = GlobalConfig::new(
        Arc::clone(&fixture.registry),
        [GlobalSource::env(KeyMapper::prefixed("CANARY_"))],
    )?;

    let db: DbAllConfig = global.get_db().context("db is registered")?;
    ensure!(db.port(0) == (7000, true), "mapped port");
    ensure!(db.host(String::from("d")) == (String::from("d"), false), "no document");
    Ok(())
}

#[rstest]
fn unregistered_packages_are_absent() -> Result<()> {
    let global = GlobalConfig::new(Arc::new(Registry::new()), [GlobalSource::raw_env()])?;
    ensure!(global.get_db().is_none(), "db was never registered");
    ensure!(global.get_server().is_none(), "server was never registered");
    Ok(())
}

#[rstest]
fn unreadable_document_fails_construction(fixture: Fixture) {
    let missing = fixture.path.with_file_name("absent.yaml");
    let result = GlobalConfig::new(Arc::clone(&fixture.registry), [GlobalSource::yaml(missing)]);
    assert!(matches!(result, Err(CfgsynthError::Read { .. })));
}
