//! Member signature rendering.
//!
//! Turns properties, methods and signals of one class into TypeScript member
//! declarations. Indexed properties expand into accessor methods, overloads
//! get positional suffixes and virtual methods become `protected`.

use crate::config::GeneratorConfig;
use crate::error::CodegenError;
use crate::ts::types::{ImportSet, SIGNAL_TYPE, TypeMapper, VARIANT_TYPE};
use refdecl_schema::types::{DefaultValue, is_identifier};
use refdecl_schema::{ClassDef, MethodDef, ParamDef, PropertyDef, SignalDef};
use std::collections::{HashMap, HashSet};

/// Words that cannot be used as parameter names.
const RESERVED_WORDS: &[&str] = &[
    "arguments",
    "break",
    "case",
    "catch",
    "class",
    "const",
    "continue",
    "debugger",
    "default",
    "delete",
    "do",
    "else",
    "enum",
    "eval",
    "export",
    "extends",
    "false",
    "finally",
    "for",
    "function",
    "if",
    "implements",
    "import",
    "in",
    "instanceof",
    "interface",
    "let",
    "new",
    "null",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "static",
    "super",
    "switch",
    "this",
    "throw",
    "true",
    "try",
    "typeof",
    "var",
    "void",
    "while",
    "with",
    "yield",
];

/// Name of the rest parameter appended to vararg methods.
const VARARGS_PARAM: &str = "varargs";

/// Kind of a rendered member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    /// Plain field.
    Property,
    /// Getter or setter generated from an indexed property.
    Accessor,
    /// Schema method.
    Method,
    /// Signal field.
    Signal,
    /// Flat constant emitted as `static readonly`.
    Constant,
}

impl MemberKind {
    /// Short label used in diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Property => "property",
            Self::Accessor => "accessor",
            Self::Method => "method",
            Self::Signal => "signal",
            Self::Constant => "constant",
        }
    }
}

/// One rendered member declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDecl {
    /// Declared member name, after overload suffixing.
    pub name: String,
    /// What produced the declaration.
    pub kind: MemberKind,
    /// Declaration text without indentation or trailing newline.
    pub text: String,
}

impl MemberDecl {
    fn new(name: String, kind: MemberKind, text: String) -> Self {
        Self { name, kind, text }
    }
}

/// Escapes a parameter name that collides with a reserved word.
#[must_use]
pub fn escape_param_name(name: &str) -> String {
    if RESERVED_WORDS.contains(&name) {
        format!("{name}_")
    } else {
        name.to_string()
    }
}

/// Quotes a member name that is not a plain identifier.
#[must_use]
pub fn quote_member_name(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        format!("\"{name}\"")
    }
}

/// Renders a default value as an inline comment.
#[must_use]
pub fn default_comment(default: &DefaultValue) -> String {
    let text = default.text().replace("*/", "*\\/");
    match default {
        DefaultValue::Literal(_) => format!("/* = {text} */"),
        DefaultValue::Opaque(_) => format!("/* = <engine default: {text}> */"),
    }
}

/// Renders the member declarations of one class.
pub struct SignatureRenderer<'a> {
    mapper: TypeMapper<'a>,
    config: &'a GeneratorConfig,
}

impl<'a> SignatureRenderer<'a> {
    /// Creates a new signature renderer.
    #[must_use]
    pub fn new(mapper: TypeMapper<'a>, config: &'a GeneratorConfig) -> Self {
        Self { mapper, config }
    }

    /// Renders properties, methods and signals of a class in that order.
    ///
    /// # Errors
    /// Returns `CodegenError::UnresolvedReference` for unknown types and
    /// `CodegenError::SignatureInconsistency` for overload conflicts,
    /// misordered parameters or duplicate member names.
    pub fn render_members(
        &self,
        class: &ClassDef,
        imports: &mut ImportSet,
    ) -> Result<Vec<MemberDecl>, CodegenError> {
        let mut decls = Vec::new();

        for property in &class.properties {
            decls.extend(self.render_property(class, property, imports)?);
        }
        decls.extend(self.render_methods(class, imports)?);
        for signal in &class.signals {
            decls.push(self.render_signal(class, signal, imports)?);
        }

        check_unique_names(class, &decls)?;
        Ok(decls)
    }

    /// Renders a property as a field, or as accessors when indexed.
    ///
    /// # Errors
    /// Returns `CodegenError::UnresolvedReference` for unknown types.
    pub fn render_property(
        &self,
        class: &ClassDef,
        property: &PropertyDef,
        imports: &mut ImportSet,
    ) -> Result<Vec<MemberDecl>, CodegenError> {
        let ty = self
            .mapper
            .map_type(&property.type_ref, class, &property.name, imports)?;

        let Some(index) = &property.index else {
            let readonly = if property.is_read_only() { "readonly " } else { "" };
            let text = format!("{readonly}{}: {ty};", quote_member_name(&property.name));
            return Ok(vec![MemberDecl::new(
                property.name.clone(),
                MemberKind::Property,
                text,
            )]);
        };

        let index_ty = self.mapper.map_type(index, class, &property.name, imports)?;
        let getter = format!("get_{}", property.name);
        let mut decls = vec![MemberDecl::new(
            getter.clone(),
            MemberKind::Accessor,
            format!("{}(index: {index_ty}): {ty};", quote_member_name(&getter)),
        )];

        if !property.is_read_only() {
            let setter = format!("set_{}", property.name);
            decls.push(MemberDecl::new(
                setter.clone(),
                MemberKind::Accessor,
                format!(
                    "{}(index: {index_ty}, value: {ty}): void;",
                    quote_member_name(&setter)
                ),
            ));
        }

        Ok(decls)
    }

    /// Renders all methods, grouped by name in first-occurrence order.
    ///
    /// The first method of a group keeps its name; the k-th later one is
    /// suffixed with the configured separator and `k`.
    ///
    /// # Errors
    /// Returns `CodegenError::SignatureInconsistency` if two methods of a
    /// group share static-ness and parameter types.
    pub fn render_methods(
        &self,
        class: &ClassDef,
        imports: &mut ImportSet,
    ) -> Result<Vec<MemberDecl>, CodegenError> {
        let mut decls = Vec::with_capacity(class.methods.len());

        for group in group_overloads(&class.methods) {
            for (position, method) in group.iter().enumerate() {
                if let Some(previous) = group[..position]
                    .iter()
                    .find(|other| same_signature(other, method))
                {
                    return Err(CodegenError::inconsistent(
                        &class.name,
                        &method.name,
                        format!(
                            "overload {position} repeats the parameter types of '{}'",
                            signature_key(previous)
                        ),
                    ));
                }

                let name = if position == 0 {
                    method.name.clone()
                } else {
                    format!(
                        "{}{}{position}",
                        method.name, self.config.overload_separator
                    )
                };
                decls.push(self.render_method(class, method, name, imports)?);
            }
        }

        Ok(decls)
    }

    /// Renders one method under the given declared name.
    ///
    /// # Errors
    /// Returns `CodegenError::SignatureInconsistency` if a required
    /// parameter follows an optional one.
    pub fn render_method(
        &self,
        class: &ClassDef,
        method: &MethodDef,
        name: String,
        imports: &mut ImportSet,
    ) -> Result<MemberDecl, CodegenError> {
        if let Some(param) = method.required_after_optional() {
            return Err(CodegenError::inconsistent(
                &class.name,
                &method.name,
                format!("required parameter '{}' follows an optional one", param.name),
            ));
        }

        let mut params = Vec::with_capacity(method.arity() + 1);
        let mut names = HashSet::with_capacity(method.arity());
        for param in &method.params {
            if !names.insert(escape_param_name(&param.name)) {
                return Err(CodegenError::inconsistent(
                    &class.name,
                    &method.name,
                    format!("parameter '{}' collides after reserved-word escaping", param.name),
                ));
            }
            params.push(self.render_param(class, method, param, imports)?);
        }
        if method.is_vararg {
            if method.params.iter().any(|p| p.name == VARARGS_PARAM) {
                return Err(CodegenError::inconsistent(
                    &class.name,
                    &method.name,
                    format!("parameter '{VARARGS_PARAM}' shadows the rest parameter"),
                ));
            }
            params.push(format!("...{VARARGS_PARAM}: Array<{VARIANT_TYPE}>"));
        }

        let ret = self
            .mapper
            .map_type(&method.return_type, class, &method.name, imports)?;

        let mut text = String::new();
        if method.is_virtual() {
            text.push_str("protected ");
        }
        if method.is_static {
            text.push_str("static ");
        }
        text.push_str(&format!(
            "{}({}): {ret};",
            quote_member_name(&name),
            params.join(", ")
        ));

        Ok(MemberDecl::new(name, MemberKind::Method, text))
    }

    fn render_param(
        &self,
        class: &ClassDef,
        method: &MethodDef,
        param: &ParamDef,
        imports: &mut ImportSet,
    ) -> Result<String, CodegenError> {
        let ty = self
            .mapper
            .map_type(&param.type_ref, class, &method.name, imports)?;
        let name = escape_param_name(&param.name);

        if !param.optional {
            return Ok(format!("{name}: {ty}"));
        }
        Ok(match &param.default {
            Some(default) => format!("{name}?: {ty} {}", default_comment(default)),
            None => format!("{name}?: {ty}"),
        })
    }

    /// Renders a signal as a read-only `Signal<[...]>` field.
    ///
    /// # Errors
    /// Returns `CodegenError::UnresolvedReference` for unknown argument types.
    pub fn render_signal(
        &self,
        class: &ClassDef,
        signal: &SignalDef,
        imports: &mut ImportSet,
    ) -> Result<MemberDecl, CodegenError> {
        let mut args = Vec::with_capacity(signal.params.len());
        for param in &signal.params {
            let ty = self
                .mapper
                .map_type(&param.type_ref, class, &signal.name, imports)?;
            args.push(format!("{}: {ty}", escape_param_name(&param.name)));
        }
        imports.add_prelude(SIGNAL_TYPE);

        let text = format!(
            "readonly {}: {SIGNAL_TYPE}<[{}]>;",
            quote_member_name(&signal.name),
            args.join(", ")
        );
        Ok(MemberDecl::new(signal.name.clone(), MemberKind::Signal, text))
    }
}

/// Groups methods by name, keeping first-occurrence order of names and
/// schema order within each group.
fn group_overloads(methods: &[MethodDef]) -> Vec<Vec<&MethodDef>> {
    let mut groups: Vec<Vec<&MethodDef>> = Vec::new();
    for method in methods {
        match groups.iter_mut().find(|g| g[0].name == method.name) {
            Some(group) => group.push(method),
            None => groups.push(vec![method]),
        }
    }
    groups
}

fn same_signature(a: &MethodDef, b: &MethodDef) -> bool {
    a.is_static == b.is_static
        && a.params.len() == b.params.len()
        && a.params
            .iter()
            .zip(&b.params)
            .all(|(x, y)| x.type_ref == y.type_ref)
}

fn signature_key(method: &MethodDef) -> String {
    let params: Vec<String> = method.params.iter().map(|p| p.type_ref.to_string()).collect();
    format!("{}({})", method.name, params.join(", "))
}

/// Rejects two class-body members sharing a name, flat constants included.
fn check_unique_names(class: &ClassDef, decls: &[MemberDecl]) -> Result<(), CodegenError> {
    let mut seen: HashMap<&str, MemberKind> = HashMap::with_capacity(decls.len());
    if let Some(group) = class.flat_constants() {
        for constant in &group.constants {
            seen.insert(constant.name.as_str(), MemberKind::Constant);
        }
    }

    for decl in decls {
        if let Some(first) = seen.insert(decl.name.as_str(), decl.kind) {
            return Err(CodegenError::inconsistent(
                &class.name,
                &decl.name,
                format!("{} collides with an earlier {}", decl.kind.label(), first.label()),
            ));
        }
    }
    Ok(())
}
