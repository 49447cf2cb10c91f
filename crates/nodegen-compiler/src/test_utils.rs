//! Test utilities for compiling inline schema documents.

use nodegen_core::Colors;

use crate::{CompiledModel, Config, Schema, compile, dump};

/// Compile a JSON document with the default configuration, panicking on errors.
#[track_caller]
pub fn compile_json(json: &str) -> CompiledModel {
    compile_json_with(json, &Config::default())
}

#[track_caller]
pub fn compile_json_with(json: &str, config: &Config) -> CompiledModel {
    let schema = Schema::from_json(json).unwrap_or_else(|err| panic!("invalid document: {err}"));
    compile(schema, config).unwrap_or_else(|err| panic!("expected valid schema: {err}"))
}

/// Uncolored dump of a valid document.
#[track_caller]
pub fn dump_json(json: &str) -> String {
    dump(&compile_json(json), Colors::OFF)
}

/// Error message of an invalid document.
#[track_caller]
pub fn compile_error(json: &str) -> String {
    let result = Schema::from_json(json).and_then(|schema| compile(schema, &Config::default()));
    match result {
        Ok(_) => panic!("expected an invalid schema"),
        Err(err) => err.to_string(),
    }
}
