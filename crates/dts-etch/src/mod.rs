//! dts-etch: API surface extraction and diffing for declaration files
//!
//! This crate tracks how the public surface of a `.d.ts` package changes
//! across published versions by:
//! - Parsing declaration files using deno_ast/SWC
//! - Reducing each file to a serializable structure of enums, classes,
//!   interfaces, methods, properties and type aliases
//! - Comparing two structures into added/removed/changed records
//! - Rendering change lists as text, JSON or HTML
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ index.d.ts  │───▶│  Structure   │───▶│   stored     │
//! │ (SWC parse) │    │ (Vec<Decl>)  │    │  JSON docs   │
//! └─────────────┘    └──────────────┘    └──────┬───────┘
//!                                               │ old + new
//!                                               ▼
//!                     ┌──────────────┐    ┌──────────────┐
//!                     │ text / JSON  │◀───│  Vec<Change> │
//!                     │    / HTML    │    │              │
//!                     └──────────────┘    └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use dts_etch::{compare_structures, extract_structure};
//!
//! let old = extract_structure("export declare enum Color { RED, GREEN, BLUE }").unwrap();
//! let new = extract_structure("export declare enum Color { RED, GREEN, CYAN }").unwrap();
//!
//! let changes = compare_structures(&old, &new);
//! assert_eq!(changes[0].to_string(), "! Color.BLUE -> Color.CYAN");
//! ```

// Core types
pub mod node;
pub mod params;

// Declaration kinds
pub mod class;
pub mod r#enum;
pub mod function;
pub mod interface;
pub mod property;
pub mod type_alias;

// Parsing and rendering
pub mod diagnostics;
pub mod parser;
pub mod ts_types;
pub mod utils;

// Comparison and reports
pub mod config;
pub mod diff;
#[cfg(feature = "html")]
pub mod html;
pub mod printer;
pub mod version;


// Re-exports for convenience
pub use class::ClassDecl;
pub use diagnostics::{Diagnostic, DiagnosticSeverity, DiagnosticsCollector, EtchError, EtchResult};
pub use function::MethodDecl;
pub use interface::InterfaceDecl;
pub use node::{Declaration, DeclarationKind, Location};
pub use params::ParameterDecl;
pub use property::PropertyDecl;
pub use r#enum::EnumDecl;
pub use type_alias::TypeAliasDecl;

// Extraction
pub use parser::{extract_structure, extract_structure_file, extract_structure_str};
pub use ts_types::render_type_source;

// Comparison
pub use diff::{
    compare_structures, compare_structures_with, Change, ChangeSummary, DiffOptions,
};

// Reports and configuration
pub use config::{EtchConfig, ReportFormat, CONFIG_FILE_NAME};
#[cfg(feature = "html")]
pub use html::HtmlReport;
pub use printer::ChangePrinter;
pub use version::{compare_versions, sort_versions, PackageVersion};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
