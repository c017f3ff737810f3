//! Canonical type rendering
//!
//! Renders SWC type nodes back into a deterministic TypeScript string.
//! The rendered text is what the differencer compares, so two spellings
//! of the same syntax always render identically (`Array< Foo >` and
//! `Array<Foo>` both become `Array<Foo>`), while distinct syntax never
//! collapses (`Foo[]` stays distinct from `Array<Foo>`).

use crate::diagnostics::EtchResult;
use crate::utils::swc::{
    entity_name, key_expr_name, number_text, parse_declaration_source, wtf8_to_string,
    ParsedModule, DEFAULT_SOURCE_NAME,
};
use deno_ast::swc::ast as swc_ast;

/// Type rendered for a missing annotation
pub const VOID: &str = "void";

/// Render a type node to its canonical string
pub fn render_type(parsed: &ParsedModule, ty: &swc_ast::TsType) -> EtchResult<String> {
    use swc_ast::TsType;

    let rendered = match ty {
        TsType::TsKeywordType(kw) => keyword_str(kw.kind).to_string(),
        TsType::TsThisType(_) => "this".to_string(),
        TsType::TsFnOrConstructorType(fn_type) => match fn_type {
            swc_ast::TsFnOrConstructorType::TsFnType(f) => format!(
                "({}) => {}",
                render_fn_params(parsed, &f.params)?,
                render_type(parsed, &f.type_ann.type_ann)?
            ),
            swc_ast::TsFnOrConstructorType::TsConstructorType(c) => format!(
                "{}new ({}) => {}",
                if c.is_abstract { "abstract " } else { "" },
                render_fn_params(parsed, &c.params)?,
                render_type(parsed, &c.type_ann.type_ann)?
            ),
        },
        TsType::TsTypeRef(type_ref) => format!(
            "{}{}",
            entity_name(&type_ref.type_name),
            render_type_args(parsed, type_ref.type_params.as_deref())?
        ),
        TsType::TsTypeQuery(query) => {
            let target = match &query.expr_name {
                swc_ast::TsTypeQueryExpr::TsEntityName(name) => entity_name(name),
                swc_ast::TsTypeQueryExpr::Import(import) => render_import_type(parsed, import)?,
            };
            format!(
                "typeof {}{}",
                target,
                render_type_args(parsed, query.type_args.as_deref())?
            )
        }
        TsType::TsTypeLit(lit) => render_type_literal(parsed, &lit.members)?,
        TsType::TsArrayType(arr) => format!("{}[]", render_type(parsed, &arr.elem_type)?),
        TsType::TsTupleType(tuple) => {
            let elems = tuple
                .elem_types
                .iter()
                .map(|elem| render_tuple_element(parsed, elem))
                .collect::<EtchResult<Vec<_>>>()?;
            format!("[{}]", elems.join(", "))
        }
        TsType::TsOptionalType(opt) => format!("{}?", render_type(parsed, &opt.type_ann)?),
        TsType::TsRestType(rest) => format!("...{}", render_type(parsed, &rest.type_ann)?),
        TsType::TsUnionOrIntersectionType(union_inter) => match union_inter {
            swc_ast::TsUnionOrIntersectionType::TsUnionType(u) => {
                render_joined(parsed, &u.types, " | ")?
            }
            swc_ast::TsUnionOrIntersectionType::TsIntersectionType(i) => {
                render_joined(parsed, &i.types, " & ")?
            }
        },
        TsType::TsConditionalType(cond) => format!(
            "{} extends {} ? {} : {}",
            render_type(parsed, &cond.check_type)?,
            render_type(parsed, &cond.extends_type)?,
            render_type(parsed, &cond.true_type)?,
            render_type(parsed, &cond.false_type)?
        ),
        TsType::TsInferType(infer) => match &infer.type_param.constraint {
            Some(constraint) => format!(
                "infer {} extends {}",
                infer.type_param.name.sym,
                render_type(parsed, constraint)?
            ),
            None => format!("infer {}", infer.type_param.name.sym),
        },
        TsType::TsParenthesizedType(paren) => {
            format!("({})", render_type(parsed, &paren.type_ann)?)
        }
        TsType::TsTypeOperator(op) => format!(
            "{} {}",
            operator_str(op.op),
            render_type(parsed, &op.type_ann)?
        ),
        TsType::TsIndexedAccessType(indexed) => format!(
            "{}{}[{}]",
            if indexed.readonly { "readonly " } else { "" },
            render_type(parsed, &indexed.obj_type)?,
            render_type(parsed, &indexed.index_type)?
        ),
        TsType::TsMappedType(mapped) => render_mapped_type(parsed, mapped)?,
        TsType::TsLitType(lit) => render_literal(parsed, &lit.lit)?,
        TsType::TsTypePredicate(pred) => {
            let param = match &pred.param_name {
                swc_ast::TsThisTypeOrIdent::TsThisType(_) => "this".to_string(),
                swc_ast::TsThisTypeOrIdent::Ident(i) => i.sym.to_string(),
            };
            let asserts = if pred.asserts { "asserts " } else { "" };
            match &pred.type_ann {
                Some(ann) => format!(
                    "{}{} is {}",
                    asserts,
                    param,
                    render_type(parsed, &ann.type_ann)?
                ),
                None => format!("{}{}", asserts, param),
            }
        }
        TsType::TsImportType(import) => render_import_type(parsed, import)?,
    };

    Ok(rendered)
}

/// Render an optional annotation, `void` when absent
pub fn render_type_ann(
    parsed: &ParsedModule,
    ann: Option<&swc_ast::TsTypeAnn>,
) -> EtchResult<String> {
    match ann {
        Some(ann) => render_type(parsed, &ann.type_ann),
        None => Ok(VOID.to_string()),
    }
}

/// Render a standalone type expression such as `Map<string, number[]>`
///
/// The text is parsed as the right-hand side of a type alias.
pub fn render_type_source(type_text: &str) -> EtchResult<String> {
    let source = format!("type __Rendered = {};\n", type_text);
    let parsed = parse_declaration_source(DEFAULT_SOURCE_NAME, source)?;
    let module = parsed.module()?;
    match module.body.first() {
        Some(swc_ast::ModuleItem::Stmt(swc_ast::Stmt::Decl(swc_ast::Decl::TsTypeAlias(alias)))) => {
            render_type(&parsed, &alias.type_ann)
        }
        Some(item) => Err(parsed.unsupported("type expression", item)),
        None => Err(crate::diagnostics::EtchError::syntax("empty type expression")),
    }
}

/// Name and rendered type of a function-type or signature parameter
pub fn fn_param_parts(
    parsed: &ParsedModule,
    param: &swc_ast::TsFnParam,
) -> EtchResult<(String, String)> {
    match param {
        swc_ast::TsFnParam::Ident(i) => Ok((
            i.sym.to_string(),
            render_type_ann(parsed, i.type_ann.as_deref())?,
        )),
        swc_ast::TsFnParam::Rest(rest) => rest_param_parts(parsed, rest),
        swc_ast::TsFnParam::Array(arr) => Err(parsed.unsupported("array binding pattern", arr)),
        swc_ast::TsFnParam::Object(obj) => Err(parsed.unsupported("object binding pattern", obj)),
    }
}

/// Name and rendered type of a rest parameter (`...args: T[]`)
pub fn rest_param_parts(
    parsed: &ParsedModule,
    rest: &swc_ast::RestPat,
) -> EtchResult<(String, String)> {
    match rest.arg.as_ref() {
        swc_ast::Pat::Ident(i) => {
            let ann = rest.type_ann.as_deref().or(i.type_ann.as_deref());
            Ok((format!("...{}", i.sym), render_type_ann(parsed, ann)?))
        }
        other => Err(parsed.unsupported("rest binding pattern", other)),
    }
}

fn render_fn_params(parsed: &ParsedModule, params: &[swc_ast::TsFnParam]) -> EtchResult<String> {
    let rendered = params
        .iter()
        .map(|p| fn_param_parts(parsed, p).map(|(name, ty)| format!("{}: {}", name, ty)))
        .collect::<EtchResult<Vec<_>>>()?;
    Ok(rendered.join(", "))
}

fn render_joined(
    parsed: &ParsedModule,
    types: &[Box<swc_ast::TsType>],
    separator: &str,
) -> EtchResult<String> {
    let rendered = types
        .iter()
        .map(|t| render_type(parsed, t))
        .collect::<EtchResult<Vec<_>>>()?;
    Ok(rendered.join(separator))
}

fn render_type_args(
    parsed: &ParsedModule,
    args: Option<&swc_ast::TsTypeParamInstantiation>,
) -> EtchResult<String> {
    match args {
        Some(args) if !args.params.is_empty() => {
            Ok(format!("<{}>", render_joined(parsed, &args.params, ", ")?))
        }
        _ => Ok(String::new()),
    }
}

fn render_tuple_element(
    parsed: &ParsedModule,
    elem: &swc_ast::TsTupleElement,
) -> EtchResult<String> {
    let ty = render_type(parsed, &elem.ty)?;
    match &elem.label {
        Some(swc_ast::Pat::Ident(label)) => Ok(format!("{}: {}", label.sym, ty)),
        Some(swc_ast::Pat::Rest(rest)) => match rest.arg.as_ref() {
            swc_ast::Pat::Ident(label) => Ok(format!("...{}: {}", label.sym, ty)),
            other => Err(parsed.unsupported("tuple label", other)),
        },
        Some(other) => Err(parsed.unsupported("tuple label", other)),
        None => Ok(ty),
    }
}

fn render_import_type(parsed: &ParsedModule, import: &swc_ast::TsImportType) -> EtchResult<String> {
    let mut rendered = format!("import(\"{}\")", wtf8_to_string(&import.arg));
    if let Some(qualifier) = &import.qualifier {
        rendered.push('.');
        rendered.push_str(&entity_name(qualifier));
    }
    rendered.push_str(&render_type_args(parsed, import.type_args.as_deref())?);
    Ok(rendered)
}

fn render_mapped_type(parsed: &ParsedModule, mapped: &swc_ast::TsMappedType) -> EtchResult<String> {
    let readonly = match mapped.readonly {
        Some(swc_ast::TruePlusMinus::True) => "readonly ",
        Some(swc_ast::TruePlusMinus::Plus) => "+readonly ",
        Some(swc_ast::TruePlusMinus::Minus) => "-readonly ",
        None => "",
    };
    let optional = match mapped.optional {
        Some(swc_ast::TruePlusMinus::True) => "?",
        Some(swc_ast::TruePlusMinus::Plus) => "+?",
        Some(swc_ast::TruePlusMinus::Minus) => "-?",
        None => "",
    };
    let constraint = match &mapped.type_param.constraint {
        Some(c) => format!(" in {}", render_type(parsed, c)?),
        None => String::new(),
    };
    let name_type = match &mapped.name_type {
        Some(n) => format!(" as {}", render_type(parsed, n)?),
        None => String::new(),
    };
    let value = match &mapped.type_ann {
        Some(t) => format!(": {}", render_type(parsed, t)?),
        None => String::new(),
    };
    Ok(format!(
        "{{ {}[{}{}{}]{}{} }}",
        readonly, mapped.type_param.name.sym, constraint, name_type, optional, value
    ))
}

fn render_literal(parsed: &ParsedModule, lit: &swc_ast::TsLit) -> EtchResult<String> {
    let rendered = match lit {
        swc_ast::TsLit::Str(s) => format!("\"{}\"", wtf8_to_string(s)),
        swc_ast::TsLit::Number(n) => number_text(n),
        swc_ast::TsLit::Bool(b) => b.value.to_string(),
        swc_ast::TsLit::BigInt(b) => match &b.raw {
            Some(raw) => raw.to_string(),
            None => format!("{}n", b.value),
        },
        swc_ast::TsLit::Tpl(tpl) => {
            let mut rendered = String::from("`");
            for (i, quasi) in tpl.quasis.iter().enumerate() {
                rendered.push_str(&quasi.raw);
                if let Some(ty) = tpl.types.get(i) {
                    rendered.push_str("${");
                    rendered.push_str(&render_type(parsed, ty)?);
                    rendered.push('}');
                }
            }
            rendered.push('`');
            rendered
        }
    };
    Ok(rendered)
}

/// `{ a: string, 'b-c': number, m(x: T): R }`
fn render_type_literal(
    parsed: &ParsedModule,
    members: &[swc_ast::TsTypeElement],
) -> EtchResult<String> {
    if members.is_empty() {
        return Ok("{}".to_string());
    }
    let rendered = members
        .iter()
        .map(|m| render_type_element(parsed, m))
        .collect::<EtchResult<Vec<_>>>()?;
    Ok(format!("{{ {} }}", rendered.join(", ")))
}

fn render_type_element(
    parsed: &ParsedModule,
    member: &swc_ast::TsTypeElement,
) -> EtchResult<String> {
    use swc_ast::TsTypeElement;

    let rendered = match member {
        TsTypeElement::TsPropertySignature(prop) => format!(
            "{}{}{}: {}",
            if prop.readonly { "readonly " } else { "" },
            key_expr_name(parsed, &prop.key)?,
            if prop.optional { "?" } else { "" },
            render_type_ann(parsed, prop.type_ann.as_deref())?
        ),
        TsTypeElement::TsMethodSignature(method) => format!(
            "{}{}({}): {}",
            key_expr_name(parsed, &method.key)?,
            if method.optional { "?" } else { "" },
            render_fn_params(parsed, &method.params)?,
            render_type_ann(parsed, method.type_ann.as_deref())?
        ),
        TsTypeElement::TsGetterSignature(getter) => format!(
            "get {}(): {}",
            key_expr_name(parsed, &getter.key)?,
            render_type_ann(parsed, getter.type_ann.as_deref())?
        ),
        TsTypeElement::TsSetterSignature(setter) => {
            let (name, ty) = fn_param_parts(parsed, &setter.param)?;
            format!(
                "set {}({}: {})",
                key_expr_name(parsed, &setter.key)?,
                name,
                ty
            )
        }
        TsTypeElement::TsCallSignatureDecl(call) => format!(
            "({}): {}",
            render_fn_params(parsed, &call.params)?,
            render_type_ann(parsed, call.type_ann.as_deref())?
        ),
        TsTypeElement::TsConstructSignatureDecl(ctor) => format!(
            "new ({}): {}",
            render_fn_params(parsed, &ctor.params)?,
            render_type_ann(parsed, ctor.type_ann.as_deref())?
        ),
        TsTypeElement::TsIndexSignature(index) => format!(
            "{}[{}]: {}",
            if index.readonly { "readonly " } else { "" },
            render_fn_params(parsed, &index.params)?,
            render_type_ann(parsed, index.type_ann.as_deref())?
        ),
    };
    Ok(rendered)
}

fn keyword_str(kind: swc_ast::TsKeywordTypeKind) -> &'static str {
    use swc_ast::TsKeywordTypeKind;

    match kind {
        TsKeywordTypeKind::TsAnyKeyword => "any",
        TsKeywordTypeKind::TsUnknownKeyword => "unknown",
        TsKeywordTypeKind::TsNumberKeyword => "number",
        TsKeywordTypeKind::TsObjectKeyword => "object",
        TsKeywordTypeKind::TsBooleanKeyword => "boolean",
        TsKeywordTypeKind::TsBigIntKeyword => "bigint",
        TsKeywordTypeKind::TsStringKeyword => "string",
        TsKeywordTypeKind::TsSymbolKeyword => "symbol",
        TsKeywordTypeKind::TsVoidKeyword => "void",
        TsKeywordTypeKind::TsUndefinedKeyword => "undefined",
        TsKeywordTypeKind::TsNullKeyword => "null",
        TsKeywordTypeKind::TsNeverKeyword => "never",
        TsKeywordTypeKind::TsIntrinsicKeyword => "intrinsic",
    }
}

fn operator_str(op: swc_ast::TsTypeOperatorOp) -> &'static str {
    match op {
        swc_ast::TsTypeOperatorOp::KeyOf => "keyof",
        swc_ast::TsTypeOperatorOp::Unique => "unique",
        swc_ast::TsTypeOperatorOp::ReadOnly => "readonly",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::EtchError;

    fn render(text: &str) -> String {
        render_type_source(text).unwrap()
    }

    #[test]
    fn test_keywords() {
        for kw in [
            "string", "number", "boolean", "null", "undefined", "void", "any", "unknown",
            "never", "object", "bigint", "symbol",
        ] {
            assert_eq!(render(kw), kw);
        }
    }

    #[test]
    fn test_union_and_intersection() {
        assert_eq!(render("string | number"), "string | number");
        assert_eq!(render("A & B & C"), "A & B & C");
    }

    #[test]
    fn test_references() {
        assert_eq!(render("Foo<Bar>"), "Foo<Bar>");
        assert_eq!(render("Map< string,number[] >"), "Map<string, number[]>");
        assert_eq!(render("Ns.Inner.Type"), "Ns.Inner.Type");
    }

    #[test]
    fn test_function_types() {
        assert_eq!(
            render("(p1: string, p2: Entity) => void"),
            "(p1: string, p2: Entity) => void"
        );
        assert_eq!(render("new (x: number) => Foo"), "new (x: number) => Foo");
        assert_eq!(render("(...rest: string[]) => void"), "(...rest: string[]) => void");
    }

    #[test]
    fn test_parenthesized_and_array() {
        assert_eq!(render("(string | number)[]"), "(string | number)[]");
    }

    #[test]
    fn test_literals() {
        assert_eq!(render("'north' | \"south\""), "\"north\" | \"south\"");
        assert_eq!(render("42"), "42");
        assert_eq!(render("-1"), "-1");
        assert_eq!(render("true"), "true");
        assert_eq!(render("`minecraft:${string}`"), "`minecraft:${string}`");
    }

    #[test]
    fn test_type_literal() {
        assert_eq!(
            render("{ x: number; 'block-id'?: string }"),
            "{ x: number, 'block-id'?: string }"
        );
        assert_eq!(render("{}"), "{}");
        assert_eq!(
            render("{ [key: string]: number }"),
            "{ [key: string]: number }"
        );
    }

    #[test]
    fn test_operators_and_queries() {
        assert_eq!(render("keyof T"), "keyof T");
        assert_eq!(render("readonly string[]"), "readonly string[]");
        assert_eq!(render("typeof world"), "typeof world");
        assert_eq!(render("T[K]"), "T[K]");
    }

    #[test]
    fn test_conditional_and_mapped() {
        assert_eq!(
            render("T extends string ? 'a' : never"),
            "T extends string ? \"a\" : never"
        );
        assert_eq!(
            render("T extends Array<infer U> ? U : never"),
            "T extends Array<infer U> ? U : never"
        );
        assert_eq!(
            render("{ readonly [K in keyof T]?: T[K] }"),
            "{ readonly [K in keyof T]?: T[K] }"
        );
    }

    #[test]
    fn test_tuples() {
        assert_eq!(render("[number, string?]"), "[number, string?]");
        assert_eq!(render("[x: number, ...rest: string[]]"), "[x: number, ...rest: string[]]");
    }

    #[test]
    fn test_import_type() {
        assert_eq!(
            render("import('./vec').Vector<number>"),
            "import(\"./vec\").Vector<number>"
        );
    }

    #[test]
    fn test_destructured_fn_param_is_unsupported() {
        let err = render_type_source("({ a }: Options) => void").unwrap_err();
        assert!(matches!(err, EtchError::Unsupported { .. }));
    }
}
