//! Construction of the global facade and per-package lookups through it.

use std::io::Write;
use std::sync::Arc;

use anyhow::{Result, ensure};
use cfgsynth::{CfgsynthError, Document, GlobalConfig, GlobalSource, KeyMapper, Registry};
use rstest::{fixture, rstest};
use serial_test::serial;
use tempfile::NamedTempFile;
use test_helpers::env as test_env;

/// Stand-in for a generated composite adapter: reads one key from the
/// document first and the environment second.
#[derive(Debug)]
struct HostLookup {
    document: Arc<Document>,
    mapper: KeyMapper,
}

impl HostLookup {
    fn host(&self, default: &str) -> (String, bool) {
        if let Some(host) = self.document.get_string(&["db"], &["host"]) {
            return (host, true);
        }
        cfgsynth::env::lookup_string(&self.mapper, &["DB_HOST"])
            .map_or_else(|| (default.to_owned(), false), |host| (host, true))
    }
}

#[fixture]
fn registry() -> Arc<Registry> {
    let registry = Arc::new(Registry::new());
    registry.register("db", |document: &Arc<Document>, mapper: &KeyMapper| HostLookup {
        document: Arc::clone(document),
        mapper: mapper.clone(),
    });
    registry
}

fn yaml_file(contents: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(contents.as_bytes())?;
    Ok(file)
}

#[rstest]
#[serial]
fn document_values_reach_registered_adapters(registry: Arc<Registry>) -> Result<()> {
    let _env = test_env::cleared(["DB_HOST"]);
    let file = yaml_file("db:\n  host: from-yaml\n")?;
    let global = GlobalConfig::new(registry, [GlobalSource::raw_env(), GlobalSource::yaml(file.path())])?;

    let lookup: Option<HostLookup> = global.get("db");
    let host = lookup.map(|adapter| adapter.host("fallback"));
    ensure!(
        host == Some((String::from("from-yaml"), true)),
        "unexpected host {host:?}"
    );
    Ok(())
}

#[rstest]
#[serial]
fn environment_mapper_reaches_registered_adapters(registry: Arc<Registry>) -> Result<()> {
    let _env = test_env::overlay([("APP_DB_HOST", Some("mapped")), ("DB_HOST", None)]);
    let global = GlobalConfig::new(registry, [GlobalSource::env(KeyMapper::prefixed("APP_"))])?;

    let host = global.get::<HostLookup>("db").map(|adapter| adapter.host("fallback"));
    ensure!(host == Some((String::from("mapped"), true)), "unexpected host {host:?}");
    Ok(())
}

#[rstest]
fn unknown_package_is_none(registry: Arc<Registry>) -> Result<()> {
    let global = GlobalConfig::new(registry, [GlobalSource::raw_env()])?;
    ensure!(global.get::<HostLookup>("cache").is_none(), "cache is not registered");
    Ok(())
}

#[rstest]
fn wrong_adapter_type_is_none(registry: Arc<Registry>) -> Result<()> {
    let global = GlobalConfig::new(registry, [GlobalSource::raw_env()])?;
    ensure!(global.get::<String>("db").is_none(), "downcast to the wrong type must fail");
    Ok(())
}

#[rstest]
fn empty_yaml_path_means_no_document(registry: Arc<Registry>) -> Result<()> {
    let global = GlobalConfig::new(registry, [GlobalSource::yaml("")])?;
    ensure!(global.document().is_empty(), "no document should be loaded");
    Ok(())
}

#[rstest]
fn missing_document_fails_construction(registry: Arc<Registry>) -> Result<()> {
    let dir = tempfile::tempdir()?;
    let missing = dir.path().join("absent.yaml");
    let result = GlobalConfig::new(registry, [GlobalSource::yaml(&missing)]);
    ensure!(
        matches!(result, Err(CfgsynthError::Read { .. })),
        "unexpected result: {result:?}"
    );
    Ok(())
}

#[rstest]
fn unparseable_document_fails_construction(registry: Arc<Registry>) -> Result<()> {
    let file = yaml_file("db: [unterminated\n")?;
    let result = GlobalConfig::new(registry, [GlobalSource::yaml(file.path())]);
    ensure!(
        matches!(result, Err(CfgsynthError::Parse { .. })),
        "unexpected result: {result:?}"
    );
    Ok(())
}

#[rstest]
fn last_document_source_wins(registry: Arc<Registry>) -> Result<()> {
    let first = yaml_file("db:\n  host: first\n")?;
    let second = yaml_file("db:\n  host: second\n")?;
    let global = GlobalConfig::new(
        registry,
        [GlobalSource::yaml(first.path()), GlobalSource::yaml(second.path())],
    )?;
    let host = global.document().get_string(&["db"], &["host"]);
    ensure!(host.as_deref() == Some("second"), "unexpected host {host:?}");
    Ok(())
}
