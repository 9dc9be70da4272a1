//! Generates the demo's configuration adapters into `OUT_DIR`.
//!
//! `server` is generated for inclusion in `gconfig`, away from its trait;
//! `db` is included next to its trait and reads `SERVER_ADDRESS_ALIASE`
//! before `DB_HOST`.
#![expect(clippy::print_stdout, reason = "cargo reads build directives from stdout")]

use camino::Utf8PathBuf;
use cfgsynth_codegen::{AliasTable, GenerateRequest, Placement, generate, output};

const SOURCES: [&str; 2] = ["src/server/mod.rs", "src/database/mod.rs"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let manifest_dir = Utf8PathBuf::from(std::env::var("CARGO_MANIFEST_DIR")?);
    let out_dir = Utf8PathBuf::from(std::env::var("OUT_DIR")?);

    let [server_source, database_source] = SOURCES;
    let server = GenerateRequest::new(manifest_dir.join(server_source), "Config")
        .with_package_id("server")
        .with_registry(true)
        .with_placement(Placement::External {
            source_module: None,
        });
    let database = GenerateRequest::new(manifest_dir.join(database_source), "Config")
        .with_package_id("db")
        .with_registry(true)
        .with_aliases(AliasTable::parse(["env.host=SERVER_ADDRESS_ALIASE"]));

    for request in [server, database] {
        let unit = generate(&request)?;
        output::write_source(&unit, &out_dir)?;
    }
    for source in SOURCES {
        println!("cargo:rerun-if-changed={source}");
    }
    Ok(())
}
