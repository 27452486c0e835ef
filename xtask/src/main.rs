//! Developer tasks (schema generation, fixture checks).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use cspconf_settings::{Overrides, parse_config_toml, resolve_config};
use schemars::schema_for;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the project root (parent of xtask directory).
fn project_root() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or(manifest_dir)
}

fn schemas_dir() -> PathBuf {
    project_root().join("schemas")
}

fn fixtures_dir() -> PathBuf {
    project_root().join("tests").join("fixtures")
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

/// Generate the CspConfigV1 schema.
fn generate_config_schema() -> schemars::Schema {
    schema_for!(cspconf_settings::CspConfigV1)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![SchemaSpec {
        filename: "cspconf.config.v1.json",
        generate: generate_config_schema,
    }]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

/// Emit schemas to the schemas/ directory.
fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);

        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;

        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Compare a committed schema with the generated one, ignoring formatting.
fn schema_is_current(spec: &SchemaSpec, path: &Path) -> anyhow::Result<bool> {
    let actual = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let actual: serde_json::Value = serde_json::from_str(&actual)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    let expected = serde_json::to_value((spec.generate)()).context("Failed to serialize schema")?;
    Ok(actual == expected)
}

/// Validate that schemas in the repo match what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);

        if !path.exists() {
            missing.push(spec.filename);
            continue;
        }

        if !schema_is_current(&spec, &path)? {
            mismatched.push(spec.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }

    if !missing.is_empty() {
        eprintln!("Missing schemas:");
        for name in &missing {
            eprintln!("  - {}", name);
        }
    }
    if !mismatched.is_empty() {
        eprintln!("Schemas out of date:");
        for name in &mismatched {
            eprintln!("  - {}", name);
        }
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

/// Load every fixture config and report whether it resolves.
///
/// Fixtures whose name starts with `cycle` or `missing_parent` are expected to fail.
fn check_fixtures() -> anyhow::Result<()> {
    let dir = fixtures_dir();
    let mut paths: Vec<PathBuf> = fs::read_dir(&dir)
        .with_context(|| format!("Failed to read {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    paths.sort();

    let mut errors = Vec::new();
    for path in &paths {
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let expect_failure = name.starts_with("cycle") || name.starts_with("missing_parent");

        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let result = parse_config_toml(&text).and_then(|cfg| resolve_config(cfg, Overrides::default()));

        match (result, expect_failure) {
            (Ok(_), false) => println!("ok       {name}"),
            (Err(err), true) => println!("rejected {name}: {err:#}"),
            (Ok(_), true) => errors.push(format!("{name}: expected a load error")),
            (Err(err), false) => errors.push(format!("{name}: {err:#}")),
        }
    }

    if errors.is_empty() {
        println!("\n{} fixtures checked.", paths.len());
        Ok(())
    } else {
        for e in &errors {
            eprintln!("  - {e}");
        }
        bail!("Fixture check failed with {} errors", errors.len())
    }
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  check-fixtures    Load every tests/fixtures/*.toml config");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "check-fixtures" => check_fixtures(),
        "print-schema-ids" => {
            for spec in schema_specs() {
                println!("{}", spec.filename.trim_end_matches(".json"));
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_schema_requires_policies() {
        let value = serde_json::to_value(generate_config_schema()).unwrap();
        assert!(value["properties"]["policies"].is_object());
        let required = value["required"].as_array().unwrap();
        assert!(required.iter().any(|r| r == "policies"));
    }

    #[test]
    fn committed_schemas_are_current() {
        for spec in schema_specs() {
            let path = schemas_dir().join(spec.filename);
            assert!(path.exists(), "missing {}", path.display());
            assert!(
                schema_is_current(&spec, &path).unwrap(),
                "{} is out of date; run `cargo xtask emit-schemas`",
                spec.filename
            );
        }
    }

    #[test]
    fn serialized_schema_ends_with_newline() {
        let json = serialize_schema(&generate_config_schema()).unwrap();
        assert!(json.ends_with("}\n"));
    }
}
