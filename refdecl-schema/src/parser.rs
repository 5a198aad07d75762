//! Reflection schema parser.
//!
//! This module parses the engine's XML class database into the internal
//! schema representation. Parsing is total: any element or attribute value
//! the model cannot represent is rejected here, before code generation starts.

use crate::classes::{
    Access, ClassDef, ConstantDef, MethodDef, ParamDef, PropertyDef, SignalDef, SignalParam,
    Visibility,
};
use crate::error::ParseError;
use crate::types::{DefaultValue, PrimitiveType, Schema, TypeRef};
use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use std::path::Path;

/// Parses a reflection schema from a string.
///
/// # Arguments
/// * `xml` - XML schema content
///
/// # Returns
/// Parsed schema or parse error.
///
/// # Errors
/// Returns `ParseError` if the XML is malformed or contains elements the
/// class model cannot represent.
pub fn parse_schema(xml: &str) -> Result<Schema, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut schema: Option<Schema> = None;
    let mut api_open = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                parse_root_element(&mut reader, e, true, &mut schema, &mut api_open)?;
            }
            Ok(Event::Empty(ref e)) => {
                parse_root_element(&mut reader, e, false, &mut schema, &mut api_open)?;
            }
            Ok(Event::End(_)) => api_open = false,
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    let schema = schema.ok_or_else(|| ParseError::InvalidStructure {
        message: "No api element found".to_string(),
    })?;
    tracing::debug!(
        version = %schema.version,
        classes = schema.classes.len(),
        "parsed reflection schema"
    );
    Ok(schema)
}

/// Parses a reflection schema from a file.
///
/// # Errors
/// Returns `ParseError` if the file cannot be read or parsed.
pub fn parse_schema_file(path: &Path) -> Result<Schema, ParseError> {
    let xml = std::fs::read_to_string(path)?;
    parse_schema(&xml)
}

/// Handles an element at document level: the `api` root or a class in it.
fn parse_root_element(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    has_body: bool,
    schema: &mut Option<Schema>,
    api_open: &mut bool,
) -> Result<(), ParseError> {
    let name_bytes = e.name().as_ref().to_vec();
    let name = std::str::from_utf8(&name_bytes)?;

    match name {
        "api" if schema.is_none() => {
            let mut version = String::new();
            for (key, value) in read_attributes(e)? {
                if key == "version" {
                    version = value;
                }
            }
            *schema = Some(Schema::new(version));
            *api_open = has_body;
        }
        "api" => return Err(ParseError::duplicate("api", "api")),
        "class" if *api_open => {
            let class = parse_class(reader, e, has_body)?;
            if let Some(schema) = schema.as_mut() {
                schema.add_class(class)?;
            }
        }
        "class" => {
            return Err(ParseError::InvalidStructure {
                message: "class element outside of api".to_string(),
            });
        }
        _ => return Err(ParseError::unknown_element(name, "document")),
    }

    Ok(())
}

/// Collects the unescaped attributes of an element in document order.
fn read_attributes(e: &BytesStart<'_>) -> Result<Vec<(String, String)>, ParseError> {
    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
        let raw = std::str::from_utf8(&attr.value)?;
        attributes.push((key, unescape(raw)?.into_owned()));
    }
    Ok(attributes)
}

/// Parses a boolean attribute value.
fn parse_bool(element: &str, attribute: &str, value: &str) -> Result<bool, ParseError> {
    match value {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ParseError::invalid_attr(element, attribute, value)),
    }
}

/// Resolves the type of a member, parameter or return value from its
/// `type` and `enum` attributes. `enum` takes precedence.
fn resolve_type(
    element: &str,
    type_attr: Option<&str>,
    enum_attr: Option<&str>,
    context: &str,
) -> Result<TypeRef, ParseError> {
    if let Some(path) = enum_attr {
        return TypeRef::parse_enum(path)
            .ok_or_else(|| ParseError::invalid_attr(element, "enum", path));
    }
    let text = type_attr.ok_or_else(|| ParseError::missing_attr(element, "type"))?;
    TypeRef::parse(text, context)
}

/// Parses a class definition.
fn parse_class(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    has_body: bool,
) -> Result<ClassDef, ParseError> {
    let mut name = None;
    let mut base = None;
    let mut description = None;
    let mut singleton = false;
    let mut is_abstract = false;

    for (key, value) in read_attributes(e)? {
        match key.as_str() {
            "name" => name = Some(value),
            "inherits" => base = Some(value),
            "description" => description = Some(value),
            "singleton" => singleton = parse_bool("class", "singleton", &value)?,
            "abstract" => is_abstract = parse_bool("class", "abstract", &value)?,
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ParseError::missing_attr("class", "name"))?;
    if !crate::types::is_identifier(&name) {
        return Err(ParseError::invalid_attr("class", "name", name));
    }

    let mut class = ClassDef::new(name);
    class.description = description.filter(|d| !d.trim().is_empty());
    class.singleton = singleton;
    class.is_abstract = is_abstract;
    class.base = match base.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(b) if b.contains(|c: char| c == ',' || c.is_whitespace()) => {
            return Err(ParseError::MultipleInheritance {
                class: class.name.clone(),
                bases: b.to_string(),
            });
        }
        Some(b) => Some(b.to_string()),
    };

    if !has_body {
        return Ok(class);
    }

    let mut buf = Vec::new();
    let mut section: Option<Section> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                section = parse_class_element(reader, e, true, section, &mut class)?;
            }
            Ok(Event::Empty(ref e)) => {
                parse_class_element(reader, e, false, section, &mut class)?;
            }
            Ok(Event::End(_)) => {
                if section.take().is_none() {
                    break;
                }
            }
            Ok(Event::Eof) => return Err(unexpected_eof(&class.name)),
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(class)
}

/// Grouping element inside a class body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Members,
    Methods,
    Constants,
    Signals,
}

impl Section {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "members" => Some(Self::Members),
            "methods" => Some(Self::Methods),
            "constants" => Some(Self::Constants),
            "signals" => Some(Self::Signals),
            _ => None,
        }
    }

    /// Tag of the elements the section holds.
    const fn child_tag(self) -> &'static str {
        match self {
            Self::Members => "member",
            Self::Methods => "method",
            Self::Constants => "constant",
            Self::Signals => "signal",
        }
    }
}

/// Parses one element inside a class body.
///
/// At class level only section elements are accepted; inside a section only
/// that section's child element is. Returns the section the caller is in
/// after the element: a newly opened one when a section start tag was read.
fn parse_class_element(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    has_body: bool,
    section: Option<Section>,
    class: &mut ClassDef,
) -> Result<Option<Section>, ParseError> {
    let name_bytes = e.name().as_ref().to_vec();
    let tag_name = std::str::from_utf8(&name_bytes)?;

    let Some(current) = section else {
        return match Section::from_tag(tag_name) {
            Some(opened) if has_body => Ok(Some(opened)),
            Some(_) => Ok(None),
            None => Err(ParseError::unknown_element(
                tag_name,
                format!("class {}", class.name),
            )),
        };
    };

    if tag_name != current.child_tag() {
        return Err(ParseError::unknown_element(
            tag_name,
            format!("{}s of class {}", current.child_tag(), class.name),
        ));
    }

    match current {
        Section::Members => {
            let property = parse_member(e, &class.name)?;
            class.add_property(property);
            if has_body {
                skip_to_end(reader)?;
            }
        }
        Section::Methods => {
            let method = parse_method(reader, e, has_body, &class.name)?;
            class.add_method(method);
        }
        Section::Constants => {
            let (group, constant) = parse_constant(e)?;
            class.add_constant(group.as_deref(), constant);
            if has_body {
                skip_to_end(reader)?;
            }
        }
        Section::Signals => {
            let signal = parse_signal(reader, e, has_body, &class.name)?;
            class.add_signal(signal);
        }
    }

    Ok(section)
}

/// Parses a member (property) element.
fn parse_member(e: &BytesStart<'_>, class: &str) -> Result<PropertyDef, ParseError> {
    let mut name = None;
    let mut type_attr = None;
    let mut enum_attr = None;
    let mut access = None;
    let mut setter = None;
    let mut indexed = false;
    let mut index_type = None;

    for (key, value) in read_attributes(e)? {
        match key.as_str() {
            "name" => name = Some(value),
            "type" => type_attr = Some(value),
            "enum" => enum_attr = Some(value),
            "access" => {
                access = Some(
                    Access::parse(&value)
                        .ok_or_else(|| ParseError::invalid_attr("member", "access", &value))?,
                )
            }
            "setter" => setter = Some(value),
            "indexed" => indexed = parse_bool("member", "indexed", &value)?,
            "index_type" => index_type = Some(value),
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ParseError::missing_attr("member", "name"))?;
    let context = format!("{class}.{name}");
    let type_ref = resolve_type("member", type_attr.as_deref(), enum_attr.as_deref(), &context)?;
    if type_ref.is_void() {
        return Err(ParseError::invalid_attr("member", "type", "void"));
    }

    // An explicitly empty setter marks a property the engine never assigns.
    let access = access.unwrap_or(match setter.as_deref() {
        Some("") => Access::ReadOnly,
        _ => Access::ReadWrite,
    });

    let mut property = PropertyDef::new(name, type_ref, access);
    if indexed {
        property.index = Some(match index_type {
            Some(text) => TypeRef::parse(&text, &context)?,
            None => TypeRef::Primitive(PrimitiveType::Int),
        });
    } else if let Some(text) = index_type {
        return Err(ParseError::invalid_attr("member", "index_type", text));
    }

    Ok(property)
}

/// Parses a method element with its return and parameter children.
fn parse_method(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    has_body: bool,
    class: &str,
) -> Result<MethodDef, ParseError> {
    let mut name = None;
    let mut qualifiers = String::new();

    for (key, value) in read_attributes(e)? {
        match key.as_str() {
            "name" => name = Some(value),
            "qualifiers" => qualifiers = value,
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ParseError::missing_attr("method", "name"))?;
    let mut method = MethodDef::new(name);

    for qualifier in qualifiers.split_whitespace() {
        match qualifier {
            "static" => method.is_static = true,
            "virtual" => method.visibility = Visibility::Virtual,
            "vararg" => method.is_vararg = true,
            "const" => {}
            other => return Err(ParseError::invalid_attr("method", "qualifiers", other)),
        }
    }

    if !has_body {
        return Ok(method);
    }

    let context = format!("{class}.{}", method.name);
    let mut seen_return = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                parse_method_child(e, &mut method, &mut seen_return, &context)?;
                skip_to_end(reader)?;
            }
            Ok(Event::Empty(ref e)) => {
                parse_method_child(e, &mut method, &mut seen_return, &context)?;
            }
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => return Err(unexpected_eof(&context)),
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(method)
}

/// Parses a `return` or `param` child of a method.
fn parse_method_child(
    e: &BytesStart<'_>,
    method: &mut MethodDef,
    seen_return: &mut bool,
    context: &str,
) -> Result<(), ParseError> {
    let name_bytes = e.name().as_ref().to_vec();
    let tag_name = std::str::from_utf8(&name_bytes)?;
    match tag_name {
        "return" if !*seen_return => {
            let mut type_attr = None;
            let mut enum_attr = None;
            for (key, value) in read_attributes(e)? {
                match key.as_str() {
                    "type" => type_attr = Some(value),
                    "enum" => enum_attr = Some(value),
                    _ => {}
                }
            }
            method.return_type =
                resolve_type("return", type_attr.as_deref(), enum_attr.as_deref(), context)?;
            *seen_return = true;
        }
        "return" => return Err(ParseError::duplicate("return", context)),
        "param" => {
            let param = parse_param(e, context)?;
            method.add_param(param);
        }
        _ => return Err(ParseError::unknown_element(tag_name, context)),
    }
    Ok(())
}

/// Parses a method parameter element.
fn parse_param(e: &BytesStart<'_>, context: &str) -> Result<ParamDef, ParseError> {
    let mut name = None;
    let mut type_attr = None;
    let mut enum_attr = None;
    let mut default = None;
    let mut optional = false;

    for (key, value) in read_attributes(e)? {
        match key.as_str() {
            "name" => name = Some(value),
            "type" => type_attr = Some(value),
            "enum" => enum_attr = Some(value),
            "default" => default = Some(value),
            "optional" => optional = parse_bool("param", "optional", &value)?,
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ParseError::missing_attr("param", "name"))?;
    let type_ref = resolve_type(
        "param",
        type_attr.as_deref(),
        enum_attr.as_deref(),
        &format!("{context}({name})"),
    )?;
    if type_ref.is_void() {
        return Err(ParseError::invalid_attr("param", "type", "void"));
    }

    let mut param = ParamDef::new(name, type_ref);
    match default {
        Some(raw) => param = param.with_default(DefaultValue::classify(&raw)),
        None => param.optional = optional,
    }
    Ok(param)
}

/// Parses a constant element into its group name and value.
fn parse_constant(e: &BytesStart<'_>) -> Result<(Option<String>, ConstantDef), ParseError> {
    let mut name = None;
    let mut value = None;
    let mut group = None;

    for (key, attr_value) in read_attributes(e)? {
        match key.as_str() {
            "name" => name = Some(attr_value),
            "value" => {
                value = Some(
                    attr_value
                        .trim()
                        .parse::<i64>()
                        .map_err(|_| ParseError::invalid_attr("constant", "value", &attr_value))?,
                )
            }
            "enum" => group = Some(attr_value).filter(|g| !g.is_empty()),
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ParseError::missing_attr("constant", "name"))?;
    let value = value.ok_or_else(|| ParseError::missing_attr("constant", "value"))?;
    Ok((group, ConstantDef::new(name, value)))
}

/// Parses a signal element with its parameter children.
fn parse_signal(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    has_body: bool,
    class: &str,
) -> Result<SignalDef, ParseError> {
    let mut name = None;
    for (key, value) in read_attributes(e)? {
        if key == "name" {
            name = Some(value);
        }
    }

    let name = name.ok_or_else(|| ParseError::missing_attr("signal", "name"))?;
    let mut signal = SignalDef::new(name);
    if !has_body {
        return Ok(signal);
    }

    let context = format!("{class}.{}", signal.name);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                signal.params.push(parse_signal_param(e, &context)?);
                skip_to_end(reader)?;
            }
            Ok(Event::Empty(ref e)) => {
                signal.params.push(parse_signal_param(e, &context)?);
            }
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => return Err(unexpected_eof(&context)),
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(signal)
}

/// Parses a signal argument; signal arguments are never optional.
fn parse_signal_param(e: &BytesStart<'_>, context: &str) -> Result<SignalParam, ParseError> {
    let name_bytes = e.name().as_ref().to_vec();
    let tag_name = std::str::from_utf8(&name_bytes)?;
    if tag_name != "param" {
        return Err(ParseError::unknown_element(tag_name, context));
    }
    let param = parse_param(e, context)?;
    if param.optional {
        return Err(ParseError::invalid_attr("param", "default", &param.name));
    }
    Ok(SignalParam {
        name: param.name,
        type_ref: param.type_ref,
    })
}

/// Skips to the end of the current element.
fn skip_to_end(reader: &mut Reader<&[u8]>) -> Result<(), ParseError> {
    let mut buf = Vec::new();
    let mut depth = 1;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Ok(Event::Eof) => {
                return Err(ParseError::InvalidStructure {
                    message: "unexpected end of document".to_string(),
                });
            }
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

fn unexpected_eof(context: &str) -> ParseError {
    ParseError::InvalidStructure {
        message: format!("unexpected end of document inside {context}"),
    }
}
