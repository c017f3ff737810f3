//! Structure extraction for dts-etch
//!
//! Walks the top-level items of a parsed declaration file and reduces each
//! one to a [`Declaration`]. The walk is closed-world: any construct without
//! a mapping fails with [`EtchError::Unsupported`] carrying its location,
//! so grammar gaps show up when a structure is generated instead of
//! silently disappearing from it.

use crate::class::ClassDecl;
use crate::diagnostics::EtchResult;
use crate::function::MethodDecl;
use crate::interface::InterfaceDecl;
use crate::node::Declaration;
use crate::params::ParameterDecl;
use crate::property::PropertyDecl;
use crate::r#enum::EnumDecl;
use crate::ts_types::{fn_param_parts, render_type, render_type_ann, rest_param_parts, VOID};
use crate::type_alias::TypeAliasDecl;
use crate::utils::swc::{
    dotted_name, key_expr_name, parse_declaration_file, parse_declaration_source, prop_name,
    wtf8_to_string, ParsedModule, DEFAULT_SOURCE_NAME,
};
use deno_ast::swc::ast as swc_ast;
use std::path::Path;

/// Extract the structure of declaration source text
pub fn extract_structure(source: &str) -> EtchResult<Vec<Declaration>> {
    extract_structure_str(DEFAULT_SOURCE_NAME, source)
}

/// Extract the structure of declaration source text read from `path`
pub fn extract_structure_str(path: impl AsRef<Path>, source: &str) -> EtchResult<Vec<Declaration>> {
    let parsed = parse_declaration_source(path, source)?;
    extract_from_module(&parsed)
}

/// Read and extract the structure of a declaration file
pub fn extract_structure_file(path: impl AsRef<Path>) -> EtchResult<Vec<Declaration>> {
    let parsed = parse_declaration_file(path)?;
    extract_from_module(&parsed)
}

/// Extract declarations from a parsed module, in source order
fn extract_from_module(parsed: &ParsedModule) -> EtchResult<Vec<Declaration>> {
    let module = parsed.module()?;
    let mut declarations = Vec::new();

    for item in &module.body {
        extract_from_item(parsed, item, &mut declarations)?;
    }

    tracing::debug!(
        path = %parsed.path().display(),
        count = declarations.len(),
        "extracted structure"
    );

    Ok(declarations)
}

fn extract_from_item(
    parsed: &ParsedModule,
    item: &swc_ast::ModuleItem,
    out: &mut Vec<Declaration>,
) -> EtchResult<()> {
    match item {
        swc_ast::ModuleItem::ModuleDecl(decl) => extract_from_module_decl(parsed, decl, out),
        swc_ast::ModuleItem::Stmt(swc_ast::Stmt::Decl(decl)) => {
            extract_from_decl(parsed, decl, out)
        }
        swc_ast::ModuleItem::Stmt(swc_ast::Stmt::Empty(_)) => Ok(()),
        swc_ast::ModuleItem::Stmt(stmt) => Err(parsed.unsupported("statement", stmt)),
    }
}

/// Unwrap one level of `export` / `export default`
fn extract_from_module_decl(
    parsed: &ParsedModule,
    decl: &swc_ast::ModuleDecl,
    out: &mut Vec<Declaration>,
) -> EtchResult<()> {
    match decl {
        swc_ast::ModuleDecl::ExportDecl(export) => extract_from_decl(parsed, &export.decl, out),
        swc_ast::ModuleDecl::ExportDefaultDecl(export) => {
            out.push(extract_default_decl(parsed, &export.decl)?);
            Ok(())
        }
        // Imports and exports with nothing to unwrap
        swc_ast::ModuleDecl::Import(_)
        | swc_ast::ModuleDecl::TsImportEquals(_)
        | swc_ast::ModuleDecl::ExportNamed(_)
        | swc_ast::ModuleDecl::ExportAll(_)
        | swc_ast::ModuleDecl::ExportDefaultExpr(_)
        | swc_ast::ModuleDecl::TsExportAssignment(_)
        | swc_ast::ModuleDecl::TsNamespaceExport(_) => Ok(()),
    }
}

fn extract_from_decl(
    parsed: &ParsedModule,
    decl: &swc_ast::Decl,
    out: &mut Vec<Declaration>,
) -> EtchResult<()> {
    match decl {
        swc_ast::Decl::TsEnum(ts_enum) => out.push(extract_enum(ts_enum)?),
        swc_ast::Decl::Class(class_decl) => out.push(extract_class(
            parsed,
            class_decl.ident.sym.to_string(),
            &class_decl.class,
        )?),
        swc_ast::Decl::TsInterface(iface) => out.push(extract_interface(parsed, iface)?),
        swc_ast::Decl::Fn(fn_decl) => out.push(extract_function(
            parsed,
            fn_decl.ident.sym.to_string(),
            &fn_decl.function,
        )?),
        swc_ast::Decl::TsTypeAlias(alias) => out.push(extract_type_alias(parsed, alias)?),
        swc_ast::Decl::Var(var_decl) => {
            for declarator in &var_decl.decls {
                out.push(extract_variable(parsed, declarator)?);
            }
        }
        swc_ast::Decl::TsModule(module) => {
            let kind = match module.global {
                true => "global augmentation",
                false => "namespace",
            };
            return Err(parsed.unsupported(kind, module.as_ref()));
        }
        swc_ast::Decl::Using(using) => {
            return Err(parsed.unsupported("using declaration", using.as_ref()));
        }
    }
    Ok(())
}

fn extract_default_decl(
    parsed: &ParsedModule,
    decl: &swc_ast::DefaultDecl,
) -> EtchResult<Declaration> {
    match decl {
        swc_ast::DefaultDecl::Class(class_expr) => extract_class(
            parsed,
            default_name(class_expr.ident.as_ref()),
            &class_expr.class,
        ),
        swc_ast::DefaultDecl::Fn(fn_expr) => extract_function(
            parsed,
            default_name(fn_expr.ident.as_ref()),
            &fn_expr.function,
        ),
        swc_ast::DefaultDecl::TsInterfaceDecl(iface) => extract_interface(parsed, iface),
    }
}

fn default_name(ident: Option<&swc_ast::Ident>) -> String {
    ident
        .map(|i| i.sym.to_string())
        .unwrap_or_else(|| "default".to_string())
}

fn extract_enum(ts_enum: &swc_ast::TsEnumDecl) -> EtchResult<Declaration> {
    tracing::trace!(name = %ts_enum.id.sym, "enum");

    let values = ts_enum
        .members
        .iter()
        .map(|member| match &member.id {
            swc_ast::TsEnumMemberId::Ident(i) => i.sym.to_string(),
            swc_ast::TsEnumMemberId::Str(s) => wtf8_to_string(s),
        })
        .collect();

    Ok(Declaration::Enum(EnumDecl {
        name: ts_enum.id.sym.to_string(),
        values,
    }))
}

fn extract_class(
    parsed: &ParsedModule,
    name: String,
    class: &swc_ast::Class,
) -> EtchResult<Declaration> {
    tracing::trace!(name = %name, members = class.body.len(), "class");

    let super_class = match &class.super_class {
        Some(expr) => match dotted_name(expr) {
            Some(super_name) => Some(super_name),
            None => return Err(parsed.unsupported("superclass expression", expr.as_ref())),
        },
        None => None,
    };

    let mut properties = Vec::with_capacity(class.body.len());
    for member in &class.body {
        if let Some(decl) = extract_class_member(parsed, member)? {
            properties.push(decl);
        }
    }

    Ok(Declaration::Class(ClassDecl {
        name,
        properties,
        super_class,
    }))
}

/// Map one class member; `None` for empty members (`;`)
fn extract_class_member(
    parsed: &ParsedModule,
    member: &swc_ast::ClassMember,
) -> EtchResult<Option<Declaration>> {
    use swc_ast::ClassMember;

    let decl = match member {
        ClassMember::Constructor(ctor) => {
            let parameters = ctor
                .params
                .iter()
                .map(|param| match param {
                    swc_ast::ParamOrTsParamProp::Param(p) => extract_param(parsed, &p.pat),
                    swc_ast::ParamOrTsParamProp::TsParamProp(prop) => match &prop.param {
                        swc_ast::TsParamPropParam::Ident(i) => ident_param(parsed, i),
                        swc_ast::TsParamPropParam::Assign(a) => extract_param(parsed, &a.left),
                    },
                })
                .collect::<EtchResult<Vec<_>>>()?;
            Declaration::Method(MethodDecl {
                name: prop_name(parsed, &ctor.key)?,
                parameters,
                result: Some(VOID.to_string()),
            })
        }
        ClassMember::Method(method) => {
            let parameters = method
                .function
                .params
                .iter()
                .map(|p| extract_param(parsed, &p.pat))
                .collect::<EtchResult<Vec<_>>>()?;
            Declaration::Method(MethodDecl {
                name: prop_name(parsed, &method.key)?,
                parameters,
                result: Some(render_type_ann(
                    parsed,
                    method.function.return_type.as_deref(),
                )?),
            })
        }
        ClassMember::ClassProp(prop) => Declaration::Property(PropertyDecl {
            name: prop_name(parsed, &prop.key)?,
            property_type: property_type(parsed, prop.type_ann.as_deref(), prop.value.as_deref())?,
        }),
        ClassMember::Empty(_) => return Ok(None),
        ClassMember::PrivateMethod(m) => return Err(parsed.unsupported("private method", m)),
        ClassMember::PrivateProp(p) => return Err(parsed.unsupported("private property", p)),
        ClassMember::TsIndexSignature(s) => return Err(parsed.unsupported("index signature", s)),
        ClassMember::StaticBlock(b) => return Err(parsed.unsupported("static block", b)),
        ClassMember::AutoAccessor(a) => return Err(parsed.unsupported("auto accessor", a)),
    };

    Ok(Some(decl))
}

fn extract_interface(
    parsed: &ParsedModule,
    iface: &swc_ast::TsInterfaceDecl,
) -> EtchResult<Declaration> {
    tracing::trace!(name = %iface.id.sym, members = iface.body.body.len(), "interface");

    let extends = iface
        .extends
        .iter()
        .map(|heritage| {
            dotted_name(&heritage.expr)
                .ok_or_else(|| parsed.unsupported("extends expression", heritage))
        })
        .collect::<EtchResult<Vec<_>>>()?;

    let properties = iface
        .body
        .body
        .iter()
        .map(|member| extract_interface_member(parsed, member))
        .collect::<EtchResult<Vec<_>>>()?;

    Ok(Declaration::Interface(InterfaceDecl {
        name: iface.id.sym.to_string(),
        properties,
        extends,
    }))
}

fn extract_interface_member(
    parsed: &ParsedModule,
    member: &swc_ast::TsTypeElement,
) -> EtchResult<Declaration> {
    use swc_ast::TsTypeElement;

    match member {
        TsTypeElement::TsPropertySignature(prop) => Ok(Declaration::Property(PropertyDecl {
            name: key_expr_name(parsed, &prop.key)?,
            property_type: render_type_ann(parsed, prop.type_ann.as_deref())?,
        })),
        TsTypeElement::TsMethodSignature(method) => {
            let parameters = method
                .params
                .iter()
                .map(|p| {
                    let (name, ty) = fn_param_parts(parsed, p)?;
                    Ok(Declaration::Parameter(ParameterDecl::new(name, ty)))
                })
                .collect::<EtchResult<Vec<_>>>()?;
            Ok(Declaration::Method(MethodDecl {
                name: key_expr_name(parsed, &method.key)?,
                parameters,
                result: Some(render_type_ann(parsed, method.type_ann.as_deref())?),
            }))
        }
        TsTypeElement::TsGetterSignature(getter) => Ok(Declaration::Method(
            MethodDecl::new(key_expr_name(parsed, &getter.key)?)
                .with_result(render_type_ann(parsed, getter.type_ann.as_deref())?),
        )),
        TsTypeElement::TsSetterSignature(setter) => {
            let (name, ty) = fn_param_parts(parsed, &setter.param)?;
            Ok(Declaration::Method(
                MethodDecl::new(key_expr_name(parsed, &setter.key)?)
                    .with_param(Declaration::Parameter(ParameterDecl::new(name, ty)))
                    .with_result(VOID),
            ))
        }
        TsTypeElement::TsCallSignatureDecl(s) => Err(parsed.unsupported("call signature", s)),
        TsTypeElement::TsConstructSignatureDecl(s) => {
            Err(parsed.unsupported("construct signature", s))
        }
        TsTypeElement::TsIndexSignature(s) => Err(parsed.unsupported("index signature", s)),
    }
}

/// Ambient function declaration: parameters only, no result
fn extract_function(
    parsed: &ParsedModule,
    name: String,
    function: &swc_ast::Function,
) -> EtchResult<Declaration> {
    tracing::trace!(name = %name, "function");

    let parameters = function
        .params
        .iter()
        .map(|p| extract_param(parsed, &p.pat))
        .collect::<EtchResult<Vec<_>>>()?;

    Ok(Declaration::Method(MethodDecl {
        parameters,
        ..MethodDecl::new(name)
    }))
}

fn extract_type_alias(
    parsed: &ParsedModule,
    alias: &swc_ast::TsTypeAliasDecl,
) -> EtchResult<Declaration> {
    tracing::trace!(name = %alias.id.sym, "type alias");

    Ok(Declaration::TypeAlias(TypeAliasDecl {
        name: alias.id.sym.to_string(),
        property_type: render_type(parsed, &alias.type_ann)?,
    }))
}

fn extract_variable(
    parsed: &ParsedModule,
    declarator: &swc_ast::VarDeclarator,
) -> EtchResult<Declaration> {
    match &declarator.name {
        swc_ast::Pat::Ident(binding) => {
            tracing::trace!(name = %binding.id.sym, "variable");
            Ok(Declaration::Property(PropertyDecl {
                name: binding.id.sym.to_string(),
                property_type: property_type(
                    parsed,
                    binding.type_ann.as_deref(),
                    declarator.init.as_deref(),
                )?,
            }))
        }
        other => Err(parsed.unsupported("destructured variable", other)),
    }
}

fn extract_param(parsed: &ParsedModule, pat: &swc_ast::Pat) -> EtchResult<Declaration> {
    match pat {
        swc_ast::Pat::Ident(binding) => ident_param(parsed, binding),
        swc_ast::Pat::Rest(rest) => {
            let (name, ty) = rest_param_parts(parsed, rest)?;
            Ok(Declaration::Parameter(ParameterDecl::new(name, ty)))
        }
        swc_ast::Pat::Assign(assign) => extract_param(parsed, &assign.left),
        swc_ast::Pat::Array(_) | swc_ast::Pat::Object(_) => {
            Err(parsed.unsupported("destructured parameter", pat))
        }
        swc_ast::Pat::Invalid(_) | swc_ast::Pat::Expr(_) => {
            Err(parsed.unsupported("parameter", pat))
        }
    }
}

fn ident_param(parsed: &ParsedModule, binding: &swc_ast::BindingIdent) -> EtchResult<Declaration> {
    Ok(Declaration::Parameter(ParameterDecl::new(
        binding.id.sym.to_string(),
        render_type_ann(parsed, binding.type_ann.as_deref())?,
    )))
}

/// Annotated type, or the primitive type of a literal initializer
fn property_type(
    parsed: &ParsedModule,
    ann: Option<&swc_ast::TsTypeAnn>,
    init: Option<&swc_ast::Expr>,
) -> EtchResult<String> {
    match (ann, init) {
        (Some(ann), _) => render_type(parsed, &ann.type_ann),
        (None, Some(init)) => initializer_type(parsed, init),
        (None, None) => Ok(VOID.to_string()),
    }
}

fn initializer_type(parsed: &ParsedModule, init: &swc_ast::Expr) -> EtchResult<String> {
    match init {
        swc_ast::Expr::Lit(swc_ast::Lit::Str(_)) => Ok("string".to_string()),
        swc_ast::Expr::Lit(swc_ast::Lit::Num(_)) => Ok("number".to_string()),
        swc_ast::Expr::Lit(swc_ast::Lit::Bool(_)) => Ok("boolean".to_string()),
        swc_ast::Expr::Unary(unary) => initializer_type(parsed, &unary.arg),
        other => Err(parsed.unsupported("initializer", other)),
    }
}
