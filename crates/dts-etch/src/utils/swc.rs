//! SWC/deno_ast TypeScript parsing utilities
//!
//! This module provides utilities for parsing declaration files using
//! deno_ast (which wraps SWC). It handles:
//! - Parsing `.d.ts` sources in ambient declaration mode
//! - Location tracking for error reporting
//! - Turning keys and entity names into display strings

use crate::diagnostics::{EtchError, EtchResult};
use crate::node::Location;
use deno_ast::swc::ast as swc_ast;
use deno_ast::swc::common::{BytePos, Span, Spanned};
use deno_ast::{MediaType, ModuleSpecifier, ParseParams, ParsedSource, SourcePos, SourceTextInfo};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Path used for sources that did not come from a file
pub const DEFAULT_SOURCE_NAME: &str = "index.d.ts";

/// Information about the source file
#[derive(Debug, Clone)]
pub struct SourceInfo {
    /// The file path
    pub path: PathBuf,
    /// The source text
    pub text: Arc<str>,
    /// Source text info for location lookups
    pub text_info: SourceTextInfo,
}

impl SourceInfo {
    /// Create source info from a file path and content
    pub fn new(path: impl Into<PathBuf>, text: impl Into<Arc<str>>) -> Self {
        let text: Arc<str> = text.into();
        let text_info = SourceTextInfo::new(text.clone());
        Self {
            path: path.into(),
            text,
            text_info,
        }
    }

    /// Convert a byte position to a line and column
    pub fn line_col(&self, pos: BytePos) -> (usize, usize) {
        // Positions handed out by SWC are source positions of this text
        let source_pos = SourcePos::unsafely_from_byte_pos(pos);
        let line_and_col = self.text_info.line_and_column_index(source_pos);
        (line_and_col.line_index + 1, line_and_col.column_index) // 1-indexed line, 0-indexed column
    }

    /// Convert a span to a Location
    pub fn span_to_location(&self, span: Span) -> Location {
        let (line, col) = self.line_col(span.lo);
        Location::new(line, col)
    }
}

/// A parsed declaration module with source information
#[derive(Debug)]
pub struct ParsedModule {
    /// The parsed source from deno_ast
    pub source: ParsedSource,
    /// Source information for location lookups
    pub source_info: SourceInfo,
}

impl ParsedModule {
    /// Get the module AST
    pub fn module(&self) -> EtchResult<&swc_ast::Module> {
        match self.source.program_ref() {
            deno_ast::ProgramRef::Module(m) => Ok(m),
            deno_ast::ProgramRef::Script(_) => {
                Err(EtchError::syntax("expected a module, got a script"))
            }
        }
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.source_info.path
    }

    /// Convert a span to a Location
    pub fn span_to_location(&self, span: Span) -> Location {
        self.source_info.span_to_location(span)
    }

    /// Build an [`EtchError::Unsupported`] for a node
    pub fn unsupported(&self, kind: &str, node: &impl Spanned) -> EtchError {
        let location = self.span_to_location(node.span());
        EtchError::unsupported(kind, location.line, location.col)
    }
}

/// Parse a declaration file from disk
pub fn parse_declaration_file(path: impl AsRef<Path>) -> EtchResult<ParsedModule> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| {
        EtchError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to read {}: {}", path.display(), e),
        ))
    })?;

    parse_declaration_source(path, text)
}

/// Parse declaration source code from a string
///
/// Non-declaration extensions are still parsed as `.d.ts`, so ambient-only
/// syntax is accepted for any input.
pub fn parse_declaration_source(
    path: impl AsRef<Path>,
    source: impl Into<Arc<str>>,
) -> EtchResult<ParsedModule> {
    let path = path.as_ref();
    let source: Arc<str> = source.into();

    let media_type = match MediaType::from_path(path) {
        m @ (MediaType::Dts | MediaType::Dmts | MediaType::Dcts) => m,
        _ => MediaType::Dts,
    };

    let parsed = deno_ast::parse_module(ParseParams {
        specifier: specifier_for(path)?,
        text: source.clone(),
        media_type,
        capture_tokens: false,
        scope_analysis: false,
        maybe_syntax: None,
    })
    .map_err(|e| EtchError::syntax(e.to_string()))?;

    // Recoverable diagnostics still mean the tree is not what was written
    if let Some(diagnostic) = parsed.diagnostics().first() {
        return Err(EtchError::syntax(diagnostic.to_string()));
    }

    let source_info = SourceInfo::new(path, source);

    Ok(ParsedModule {
        source: parsed,
        source_info,
    })
}

/// Build a `file:` specifier; relative paths are rooted at `/`
fn specifier_for(path: &Path) -> EtchResult<ModuleSpecifier> {
    if path.is_absolute() {
        return ModuleSpecifier::from_file_path(path)
            .map_err(|_| EtchError::InvalidPath(path.display().to_string()));
    }
    let relative = path.to_string_lossy().replace('\\', "/");
    ModuleSpecifier::parse(&format!("file:///{}", relative.trim_start_matches("./")))
        .map_err(|_| EtchError::InvalidPath(path.display().to_string()))
}

/// Helper to convert Wtf8Atom to String
pub fn wtf8_to_string(s: &swc_ast::Str) -> String {
    String::from_utf8_lossy(s.value.as_bytes()).into_owned()
}

/// Quote a string key the way stored documents spell it
pub fn quote_key(key: &str) -> String {
    format!("'{}'", key)
}

/// Render a numeric literal, keeping the source spelling when available
pub fn number_text(n: &swc_ast::Number) -> String {
    match &n.raw {
        Some(raw) => raw.to_string(),
        None => n.value.to_string(),
    }
}

/// Format a qualified name (e.g., Namespace.Type)
pub fn format_qualified_name(name: &swc_ast::TsQualifiedName) -> String {
    format!("{}.{}", entity_name(&name.left), name.right.sym)
}

/// Format an entity name (identifier or qualified name)
pub fn entity_name(name: &swc_ast::TsEntityName) -> String {
    match name {
        swc_ast::TsEntityName::Ident(i) => i.sym.to_string(),
        swc_ast::TsEntityName::TsQualifiedName(q) => format_qualified_name(q),
    }
}

/// Dotted name of an identifier or member-access chain (`a.b.C`)
pub fn dotted_name(expr: &swc_ast::Expr) -> Option<String> {
    match expr {
        swc_ast::Expr::Ident(i) => Some(i.sym.to_string()),
        swc_ast::Expr::Member(m) => {
            let obj = dotted_name(&m.obj)?;
            match &m.prop {
                swc_ast::MemberProp::Ident(i) => Some(format!("{}.{}", obj, i.sym)),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Name for a member key given as an expression (interface members)
///
/// Computed member expressions such as `[Symbol.iterator]` keep their
/// brackets; any other computed key is unsupported.
pub fn key_expr_name(parsed: &ParsedModule, key: &swc_ast::Expr) -> EtchResult<String> {
    match key {
        swc_ast::Expr::Ident(i) => Ok(i.sym.to_string()),
        swc_ast::Expr::Lit(swc_ast::Lit::Str(s)) => Ok(quote_key(&wtf8_to_string(s))),
        swc_ast::Expr::Lit(swc_ast::Lit::Num(n)) => Ok(number_text(n)),
        swc_ast::Expr::Member(_) => match dotted_name(key) {
            Some(name) => Ok(format!("[{}]", name)),
            None => Err(parsed.unsupported("computed member key", key)),
        },
        _ => Err(parsed.unsupported("computed key", key)),
    }
}

/// Name for a class member key
pub fn prop_name(parsed: &ParsedModule, name: &swc_ast::PropName) -> EtchResult<String> {
    match name {
        swc_ast::PropName::Ident(i) => Ok(i.sym.to_string()),
        swc_ast::PropName::Str(s) => Ok(quote_key(&wtf8_to_string(s))),
        swc_ast::PropName::Num(n) => Ok(number_text(n)),
        swc_ast::PropName::BigInt(b) => Err(parsed.unsupported("bigint key", b)),
        swc_ast::PropName::Computed(c) => key_expr_name(parsed, &c.expr),
    }
}
