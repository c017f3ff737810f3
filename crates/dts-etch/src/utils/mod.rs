//! Utilities for dts-etch
//!
//! Declaration files are parsed with deno_ast (SWC).

pub mod swc;

pub use swc::{parse_declaration_file, parse_declaration_source, ParsedModule, SourceInfo};
