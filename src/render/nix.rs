//! Nix expression renderer.
//!
//! Produces the three files of a pypi2nix project:
//!
//! - `<name>_generated.nix`: one `python.mkDerivation` per package, as a
//!   function of `self` so dependencies can refer to their siblings lazily
//! - `<name>_override.nix`: an empty `self: super:` overlay for hand edits
//! - `<name>.nix`: the entry point tying both together into an interpreter

use super::escape::{
    escape_nix_string, is_nix_attr_path, is_nix_identifier, is_nix_path_segment, sanitize_comment,
};
use super::{DocumentRenderer, RenderedDocuments};
use crate::error::{Pypi2NixError, RenderErrorKind, Result};
use crate::model::{NormalizedPackageRecord, ResolvedLicense, RunParameters};
use std::fmt::Write;

const GENERATED_SIGNATURE: &str =
    "{ pkgs, python, commonBuildInputs ? [], commonDoCheck ? false }:\n";

const OVERRIDES_DOCUMENT: &str = "{ pkgs, python }:

self: super: {

}
";

const ENTRY_POINT_PRELUDE: &str = "{ pkgs ? import <nixpkgs> {}
}:

let

  inherit (pkgs.stdenv.lib) fix' extends inNixShell;

";

const ENTRY_POINT_BUILD_ENV: &str = r#"  buildEnv = { pkgs ? {}, modules ? {} }:
    let
      interpreter = pythonPackages.python.buildEnv.override {
        extraLibs = (builtins.attrValues pkgs) ++ (builtins.attrValues modules);
      };
    in {
      mkDerivation = pythonPackages.buildPythonPackage;
      interpreter = if inNixShell then interpreter.env else interpreter;
      overrideDerivation = drv: f: pythonPackages.buildPythonPackage (drv.drvAttrs // f drv.drvAttrs);
      pkgs_top_level = builtins.filter (x: !(builtins.hasAttr "top_level" x.passthru)) (
          builtins.attrValues (builtins.removeAttrs pkgs ["__unfix__"]));
      inherit buildEnv pkgs modules;
    };

"#;

const ENTRY_POINT_FIXPOINT: &str = "  python = buildEnv {
    pkgs = fix' (extends overrides generated);
  };

in python
";

/// Renders package records into pypi2nix's Nix expression layout.
#[derive(Debug, Clone, Default)]
pub struct NixRenderer;

impl NixRenderer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl DocumentRenderer for NixRenderer {
    fn render(
        &self,
        records: &[NormalizedPackageRecord],
        params: &RunParameters,
    ) -> Result<RenderedDocuments> {
        check_run_parameters(params)?;

        Ok(RenderedDocuments {
            generated: render_generated(records, params)?,
            overrides: OVERRIDES_DOCUMENT.to_string(),
            entry_point: render_entry_point(params)?,
        })
    }
}

fn check_run_parameters(params: &RunParameters) -> Result<()> {
    if !is_nix_identifier(&params.python_version) {
        return Err(invalid_attribute("python version", &params.python_version));
    }
    if let Some(input) = params
        .extra_build_inputs
        .iter()
        .find(|input| !is_nix_attr_path(input))
    {
        return Err(invalid_attribute("extra build input", input));
    }
    for file_name in [&params.generated_file_name, &params.overrides_file_name] {
        if !is_nix_path_segment(file_name) {
            return Err(Pypi2NixError::render(
                "run parameters",
                RenderErrorKind::InvalidFileName(file_name.clone()),
            ));
        }
    }
    Ok(())
}

fn invalid_attribute(field: &str, value: &str) -> Pypi2NixError {
    Pypi2NixError::render(
        "run parameters",
        RenderErrorKind::InvalidAttribute {
            field: field.to_string(),
            value: value.to_string(),
        },
    )
}

fn write_provenance(out: &mut String, params: &RunParameters, with_homepage: bool) -> Result<()> {
    writeln!(
        out,
        "# generated using pypi2nix tool (version: {})",
        sanitize_comment(params.tool_version.trim())
    )?;
    if with_homepage {
        out.push_str("# See more at: https://github.com/garbas/pypi2nix\n");
    }
    out.push_str("#\n# COMMAND:\n");
    writeln!(
        out,
        "#   pypi2nix {}",
        sanitize_comment(&params.command_arguments)
    )?;
    out.push_str("#\n\n");
    Ok(())
}

/// Render the generated package set.
pub fn render_generated(
    records: &[NormalizedPackageRecord],
    params: &RunParameters,
) -> Result<String> {
    let mut out = String::new();
    write_provenance(&mut out, params, false)?;
    out.push_str(GENERATED_SIGNATURE);
    out.push_str("\nself: {\n");

    for (position, record) in records.iter().enumerate() {
        if position > 0 {
            out.push('\n');
        }
        write_package(&mut out, record)?;
    }

    out.push_str("}\n");
    Ok(out)
}

/// Render one `"name" = python.mkDerivation { ... };` entry.
fn write_package(out: &mut String, record: &NormalizedPackageRecord) -> Result<()> {
    let meta = &record.metadata;
    if !is_nix_identifier(&meta.hash_type) {
        return Err(Pypi2NixError::render(
            format!("package `{}`", meta.name),
            RenderErrorKind::InvalidHashType(meta.hash_type.clone()),
        ));
    }

    writeln!(
        out,
        "  \"{}\" = python.mkDerivation {{",
        escape_nix_string(&meta.name)
    )?;
    writeln!(
        out,
        "    name = \"{}\";",
        escape_nix_string(&meta.derivation_name())
    )?;
    out.push_str("    src = pkgs.fetchurl {\n");
    writeln!(out, "      url = \"{}\";", escape_nix_string(&meta.url))?;
    writeln!(
        out,
        "      {} = \"{}\";",
        meta.hash_type,
        escape_nix_string(&meta.hash_value)
    )?;
    out.push_str("    };\n");
    out.push_str("    doCheck = commonDoCheck;\n");
    out.push_str("    buildInputs = commonBuildInputs;\n");
    write_dependencies(out, record)?;
    out.push_str("    meta = with pkgs.stdenv.lib; {\n");
    writeln!(
        out,
        "      homepage = \"{}\";",
        escape_nix_string(&meta.homepage)
    )?;
    writeln!(
        out,
        "      license = {};",
        license_expression(&record.resolved_license)
    )?;
    writeln!(
        out,
        "      description = \"{}\";",
        escape_nix_string(&meta.description)
    )?;
    out.push_str("    };\n");
    writeln!(out, "    passthru.top_level = {};", record.is_top_level)?;
    out.push_str("  };\n");
    Ok(())
}

fn write_dependencies(out: &mut String, record: &NormalizedPackageRecord) -> Result<()> {
    if record.resolved_deps.is_empty() {
        out.push_str("    propagatedBuildInputs = [ ];\n");
        return Ok(());
    }

    out.push_str("    propagatedBuildInputs = [\n");
    for dep in &record.resolved_deps {
        writeln!(out, "      self.\"{}\"", escape_nix_string(dep))?;
    }
    out.push_str("    ];\n");
    Ok(())
}

/// Nix expression for the `meta.license` attribute.
#[must_use]
pub fn license_expression(license: &ResolvedLicense) -> String {
    match license {
        ResolvedLicense::Known(known) => known.to_string(),
        ResolvedLicense::Literal(raw) => format!("\"{}\"", escape_nix_string(raw)),
        ResolvedLicense::Undeclared => "\"\"".to_string(),
    }
}

/// Nix expression for `commonBuildInputs`.
#[must_use]
pub fn build_inputs_expression(extra_build_inputs: &[String]) -> String {
    if extra_build_inputs.is_empty() {
        "[]".to_string()
    } else {
        format!("with pkgs; [ {} ]", extra_build_inputs.join(" "))
    }
}

/// Render the entry point that composes generated packages and overrides.
pub fn render_entry_point(params: &RunParameters) -> Result<String> {
    let mut out = String::new();
    write_provenance(&mut out, params, true)?;
    out.push_str(ENTRY_POINT_PRELUDE);
    writeln!(
        out,
        "  pythonPackages = pkgs.{}Packages;",
        params.python_version
    )?;
    writeln!(
        out,
        "  commonBuildInputs = {};",
        build_inputs_expression(&params.extra_build_inputs)
    )?;
    writeln!(out, "  commonDoCheck = {};", params.enable_tests)?;
    out.push('\n');
    out.push_str(ENTRY_POINT_BUILD_ENV);
    writeln!(
        out,
        "  generated = import ./{} {{ inherit pkgs python commonBuildInputs commonDoCheck; }};",
        params.generated_file_name
    )?;
    writeln!(
        out,
        "  overrides = import ./{} {{ inherit pkgs python; }};",
        params.overrides_file_name
    )?;
    out.push('\n');
    out.push_str(ENTRY_POINT_FIXPOINT);
    Ok(out)
}
