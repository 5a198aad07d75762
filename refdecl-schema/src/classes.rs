//! Class definitions for reflection schemas.
//!
//! This module contains the data structures representing one reflected
//! class: its properties, methods, enum/constant groups and signals.

use crate::types::{DefaultValue, TypeRef};

/// Reflected class definition.
#[derive(Debug, Clone)]
pub struct ClassDef {
    /// Class name (unique within the schema).
    pub name: String,
    /// Single base class, if any.
    pub base: Option<String>,
    /// Documentation summary, carried verbatim.
    pub description: Option<String>,
    /// Whether the engine keeps exactly one live instance of this class.
    pub singleton: bool,
    /// Whether the class cannot be constructed from script.
    pub is_abstract: bool,
    /// Properties in schema order.
    pub properties: Vec<PropertyDef>,
    /// Methods in schema order.
    pub methods: Vec<MethodDef>,
    /// Enum and constant groups in order of first appearance.
    pub enums: Vec<EnumGroupDef>,
    /// Signals in schema order.
    pub signals: Vec<SignalDef>,
}

impl ClassDef {
    /// Creates a new class definition.
    #[must_use]
    pub fn new(name: String) -> Self {
        Self {
            name,
            base: None,
            description: None,
            singleton: false,
            is_abstract: false,
            properties: Vec::new(),
            methods: Vec::new(),
            enums: Vec::new(),
            signals: Vec::new(),
        }
    }

    /// Adds a property to the class.
    pub fn add_property(&mut self, property: PropertyDef) {
        self.properties.push(property);
    }

    /// Adds a method to the class.
    pub fn add_method(&mut self, method: MethodDef) {
        self.methods.push(method);
    }

    /// Adds a signal to the class.
    pub fn add_signal(&mut self, signal: SignalDef) {
        self.signals.push(signal);
    }

    /// Adds a constant to the group it belongs to, creating the group on
    /// first use. Groups keep the order in which they first appear.
    pub fn add_constant(&mut self, group: Option<&str>, constant: ConstantDef) {
        let existing = self
            .enums
            .iter_mut()
            .find(|g| g.name.as_deref() == group);
        match existing {
            Some(g) => g.constants.push(constant),
            None => {
                let mut g = EnumGroupDef::new(self.name.clone(), group.map(str::to_string));
                g.constants.push(constant);
                self.enums.push(g);
            }
        }
    }

    /// Looks up a named enum group.
    #[must_use]
    pub fn get_enum(&self, name: &str) -> Option<&EnumGroupDef> {
        self.enums.iter().find(|g| g.name.as_deref() == Some(name))
    }

    /// Returns the flat (unnamed) constant group, if any.
    #[must_use]
    pub fn flat_constants(&self) -> Option<&EnumGroupDef> {
        self.enums.iter().find(|g| g.name.is_none())
    }

    /// Returns the named enum groups in order.
    pub fn named_enums(&self) -> impl Iterator<Item = &EnumGroupDef> {
        self.enums.iter().filter(|g| g.name.is_some())
    }
}

/// Property access mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Access {
    /// Read-only.
    ReadOnly,
    /// Readable and writable.
    #[default]
    ReadWrite,
}

impl Access {
    /// Parses an access mode from schema text.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "read-only" | "readonly" | "r" => Some(Self::ReadOnly),
            "read-write" | "readwrite" | "rw" => Some(Self::ReadWrite),
            _ => None,
        }
    }
}

/// Property definition.
#[derive(Debug, Clone)]
pub struct PropertyDef {
    /// Property name.
    pub name: String,
    /// Declared type.
    pub type_ref: TypeRef,
    /// Access mode.
    pub access: Access,
    /// Index argument type when the property is an indexed get/set pair.
    pub index: Option<TypeRef>,
}

impl PropertyDef {
    /// Creates a new plain property.
    #[must_use]
    pub fn new(name: String, type_ref: TypeRef, access: Access) -> Self {
        Self {
            name,
            type_ref,
            access,
            index: None,
        }
    }

    /// Returns true if the property is accessed through an index.
    #[must_use]
    pub fn is_indexed(&self) -> bool {
        self.index.is_some()
    }

    /// Returns true if the property cannot be assigned.
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.access == Access::ReadOnly
    }
}

/// Method visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    /// Callable from script.
    #[default]
    Public,
    /// Engine-internal override point.
    Virtual,
}

/// Method definition.
#[derive(Debug, Clone)]
pub struct MethodDef {
    /// Method name.
    pub name: String,
    /// Parameters in order.
    pub params: Vec<ParamDef>,
    /// Return type.
    pub return_type: TypeRef,
    /// Visibility.
    pub visibility: Visibility,
    /// Whether the method is static.
    pub is_static: bool,
    /// Whether the method accepts extra trailing arguments.
    pub is_vararg: bool,
}

impl MethodDef {
    /// Creates a new public instance method returning void.
    #[must_use]
    pub fn new(name: String) -> Self {
        Self {
            name,
            params: Vec::new(),
            return_type: TypeRef::Void,
            visibility: Visibility::Public,
            is_static: false,
            is_vararg: false,
        }
    }

    /// Adds a parameter.
    pub fn add_param(&mut self, param: ParamDef) {
        self.params.push(param);
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Returns true if the method is an override point.
    #[must_use]
    pub fn is_virtual(&self) -> bool {
        self.visibility == Visibility::Virtual
    }

    /// Returns the first required parameter that follows an optional one.
    #[must_use]
    pub fn required_after_optional(&self) -> Option<&ParamDef> {
        let first_optional = self.params.iter().position(|p| p.optional)?;
        self.params[first_optional..].iter().find(|p| !p.optional)
    }
}

/// Method parameter definition.
#[derive(Debug, Clone)]
pub struct ParamDef {
    /// Parameter name.
    pub name: String,
    /// Parameter type.
    pub type_ref: TypeRef,
    /// Whether the parameter may be omitted.
    pub optional: bool,
    /// Default value, when optional and known.
    pub default: Option<DefaultValue>,
}

impl ParamDef {
    /// Creates a new required parameter.
    #[must_use]
    pub fn new(name: String, type_ref: TypeRef) -> Self {
        Self {
            name,
            type_ref,
            optional: false,
            default: None,
        }
    }

    /// Makes the parameter optional with the given default.
    #[must_use]
    pub fn with_default(mut self, default: DefaultValue) -> Self {
        self.optional = true;
        self.default = Some(default);
        self
    }
}

/// Group of integer constants owned by a class.
#[derive(Debug, Clone)]
pub struct EnumGroupDef {
    /// Owning class name.
    pub owner: String,
    /// Group name; `None` for flat constants.
    pub name: Option<String>,
    /// Constants in order.
    pub constants: Vec<ConstantDef>,
}

impl EnumGroupDef {
    /// Creates an empty group.
    #[must_use]
    pub fn new(owner: String, name: Option<String>) -> Self {
        Self {
            owner,
            name,
            constants: Vec::new(),
        }
    }
}

/// Integer constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantDef {
    /// Constant name.
    pub name: String,
    /// Constant value.
    pub value: i64,
}

impl ConstantDef {
    /// Creates a new constant.
    #[must_use]
    pub fn new(name: String, value: i64) -> Self {
        Self { name, value }
    }
}

/// Signal definition.
#[derive(Debug, Clone)]
pub struct SignalDef {
    /// Signal name.
    pub name: String,
    /// Arguments passed to connected callbacks.
    pub params: Vec<SignalParam>,
}

impl SignalDef {
    /// Creates a signal without arguments.
    #[must_use]
    pub fn new(name: String) -> Self {
        Self {
            name,
            params: Vec::new(),
        }
    }
}

/// Signal argument.
#[derive(Debug, Clone)]
pub struct SignalParam {
    /// Argument name.
    pub name: String,
    /// Argument type.
    pub type_ref: TypeRef,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PrimitiveType;

    fn float() -> TypeRef {
        TypeRef::Primitive(PrimitiveType::Float)
    }

    #[test]
    fn test_add_constant_groups_in_first_appearance_order() {
        let mut class = ClassDef::new("Node".to_string());
        class.add_constant(Some("ProcessMode"), ConstantDef::new("INHERIT".into(), 0));
        class.add_constant(None, ConstantDef::new("NOTIFICATION_READY".into(), 13));
        class.add_constant(Some("ProcessMode"), ConstantDef::new("ALWAYS".into(), 3));

        assert_eq!(class.enums.len(), 2);
        let mode = class.get_enum("ProcessMode").unwrap();
        assert_eq!(mode.owner, "Node");
        assert_eq!(mode.constants.len(), 2);
        assert_eq!(mode.constants[1].value, 3);
        assert_eq!(class.flat_constants().unwrap().constants.len(), 1);
        assert_eq!(class.named_enums().count(), 1);
    }

    #[test]
    fn test_required_after_optional() {
        let mut method = MethodDef::new("play".to_string());
        method.add_param(ParamDef::new("a".into(), float()));
        method.add_param(ParamDef::new("b".into(), float()).with_default(DefaultValue::classify("0")));
        assert!(method.required_after_optional().is_none());

        method.add_param(ParamDef::new("c".into(), float()));
        assert_eq!(method.required_after_optional().unwrap().name, "c");
    }

    #[test]
    fn test_access_parse() {
        assert_eq!(Access::parse("read-only"), Some(Access::ReadOnly));
        assert_eq!(Access::parse("rw"), Some(Access::ReadWrite));
        assert_eq!(Access::parse("write-only"), None);
    }

    #[test]
    fn test_property_flags() {
        let mut prop = PropertyDef::new("bone".into(), float(), Access::ReadOnly);
        assert!(!prop.is_indexed());
        assert!(prop.is_read_only());
        prop.index = Some(TypeRef::Primitive(PrimitiveType::Int));
        assert!(prop.is_indexed());
    }
}
