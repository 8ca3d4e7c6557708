//! Output assembly and file writing for generated code.
//!
//! This module handles the final phase of code generation: assembling the
//! generated modules, validating and formatting them, and writing them to
//! disk.
//!
//! ## Output Structure
//!
//! ```text
//! src/graphql/
//! ├── mod.rs         # Module declarations and runtime re-exports
//! ├── types.rs       # Object types
//! ├── inputs.rs      # Input types
//! ├── enums.rs       # Enumerations
//! ├── queries.rs     # Query operations
//! └── mutations.rs   # Mutation operations
//! ```
//!
//! ## Safety Guarantees
//!
//! - **Validation**: All generated code is parsed with `syn` before writing
//! - **Formatting**: Output is formatted with `prettyplease` for consistent style
//! - **Atomic writes**: Files are written to a temp file and renamed into place
//! - **Stable output**: Files whose content did not change are not rewritten
//! - **Safe cleanup**: Only files carrying the generated notice are ever deleted

use std::fs;
use std::path::{Path, PathBuf};

use graphgen_define::{OperationKind, SchemaModel};
use proc_macro2::TokenStream;
use serde::Serialize;
use tracing::{debug, info};

use crate::codegen::{
    generate_enums_module, generate_inputs_module, generate_module_root,
    generate_operations_module, generate_types_module,
};
use crate::errors::GeneratorError;
use crate::operation::compile_all;
use crate::selection::SelectionStyle;

/// The first line of every generated file.
pub const GENERATED_NOTICE: &str =
    "// This code was automatically generated by graphgen-gen. Do not edit manually.";

/// Options for one generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GenerateOptions {
    pub selection_style: SelectionStyle,
    /// Print the files instead of writing them.
    pub dry_run: bool,
}

/// One generated, formatted file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// File name relative to the output directory, e.g. `types.rs`.
    pub name: String,
    pub content: String,
}

/// What a generation run did to the output directory.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct GenerationReport {
    pub written: Vec<PathBuf>,
    pub unchanged: Vec<PathBuf>,
    pub removed: Vec<PathBuf>,
}

/// The result of [`write_if_changed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    Unchanged,
}

/// Validates generated code using syn.
///
/// Parses the token stream as a complete Rust file to ensure it's
/// syntactically valid before writing to disk.
///
/// ## Errors
///
/// Returns `GeneratorError::CodeGenError` if the code fails to parse.
pub fn validate_code(tokens: &TokenStream) -> Result<syn::File, GeneratorError> {
    syn::parse2(tokens.clone())
        .map_err(|e| GeneratorError::CodeGenError(format!("Generated code is invalid: {}", e)))
}

/// Formats a parsed file with prettyplease and prepends [`GENERATED_NOTICE`].
pub fn format_code(file: &syn::File) -> String {
    let formatted = prettyplease::unparse(file);
    format!("{GENERATED_NOTICE}\n\n{formatted}")
}

/// Generates every output file for a model.
///
/// ## Errors
///
/// Returns `GeneratorError::CodeGenError` if any generated module is not
/// valid Rust.
pub fn assemble_files(
    model: &SchemaModel,
    options: &GenerateOptions,
) -> Result<Vec<GeneratedFile>, GeneratorError> {
    let operations = compile_all(model, options.selection_style);

    let modules = [
        ("mod.rs", generate_module_root()),
        ("types.rs", generate_types_module(model)),
        ("inputs.rs", generate_inputs_module(model)),
        ("enums.rs", generate_enums_module(model)),
        (
            "queries.rs",
            generate_operations_module(&operations, OperationKind::Query, model),
        ),
        (
            "mutations.rs",
            generate_operations_module(&operations, OperationKind::Mutation, model),
        ),
    ];

    modules
        .into_iter()
        .map(|(name, tokens)| {
            let file = validate_code(&tokens)?;
            Ok(GeneratedFile {
                name: name.to_string(),
                content: format_code(&file),
            })
        })
        .collect()
}

/// Writes content to a file atomically using temp file + rename.
///
/// ## Errors
///
/// Returns `GeneratorError::WriteError` if:
/// - Parent directories cannot be created
/// - The temp file cannot be written
/// - The rename operation fails
pub fn write_atomic(path: &Path, content: &str) -> Result<(), GeneratorError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| GeneratorError::WriteError {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).map_err(|e| GeneratorError::WriteError {
        path: temp_path.display().to_string(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| GeneratorError::WriteError {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// Writes `content` unless the file already holds exactly that content.
///
/// ## Errors
///
/// Returns the errors of [`write_atomic`].
pub fn write_if_changed(path: &Path, content: &str) -> Result<WriteOutcome, GeneratorError> {
    if fs::read_to_string(path).is_ok_and(|existing| existing == content) {
        debug!(path = %path.display(), "Unchanged, skipping write");
        return Ok(WriteOutcome::Unchanged);
    }
    write_atomic(path, content)?;
    Ok(WriteOutcome::Written)
}

/// Deletes generated `.rs` files in `dir` that are not listed in `keep`.
///
/// A file counts as generated only if it starts with [`GENERATED_NOTICE`];
/// hand-written files are never touched. A missing directory is not an error.
///
/// ## Errors
///
/// Returns `GeneratorError::WriteError` if the directory cannot be listed or
/// a stale file cannot be removed.
pub fn cleanup_stale(dir: &Path, keep: &[&str]) -> Result<Vec<PathBuf>, GeneratorError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(dir).map_err(|e| GeneratorError::WriteError {
        path: dir.display().to_string(),
        source: e,
    })?;

    let mut removed = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        let is_rust = path.extension().is_some_and(|ext| ext == "rs");
        let kept = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| keep.contains(&name));
        if !is_rust || kept || !path.is_file() {
            continue;
        }

        let generated = fs::read_to_string(&path)
            .is_ok_and(|content| content.starts_with(GENERATED_NOTICE));
        if !generated {
            continue;
        }

        fs::remove_file(&path).map_err(|e| GeneratorError::WriteError {
            path: path.display().to_string(),
            source: e,
        })?;
        debug!(path = %path.display(), "Removed stale generated file");
        removed.push(path);
    }

    removed.sort();
    Ok(removed)
}

/// Generates the client for `model` and writes it to `output_dir`.
///
/// This is the main entry point for code generation. In dry-run mode every
/// file is printed to stdout and the filesystem is left alone.
///
/// ## Errors
///
/// Returns an error if:
/// - Code generation produces invalid Rust
/// - File writing or stale-file cleanup fails
pub fn generate_and_write(
    model: &SchemaModel,
    output_dir: &Path,
    options: &GenerateOptions,
) -> Result<GenerationReport, GeneratorError> {
    let files = assemble_files(model, options)?;
    let mut report = GenerationReport::default();

    if options.dry_run {
        for file in &files {
            println!("=== {} ===\n{}\n", file.name, file.content);
        }
        return Ok(report);
    }

    for file in &files {
        let path = output_dir.join(&file.name);
        match write_if_changed(&path, &file.content)? {
            WriteOutcome::Written => report.written.push(path),
            WriteOutcome::Unchanged => report.unchanged.push(path),
        }
    }

    let keep: Vec<&str> = files.iter().map(|file| file.name.as_str()).collect();
    report.removed = cleanup_stale(output_dir, &keep)?;

    info!(
        output = %output_dir.display(),
        written = report.written.len(),
        unchanged = report.unchanged.len(),
        removed = report.removed.len(),
        "Generated client"
    );

    Ok(report)
}
