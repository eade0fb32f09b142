//! Descriptor records for the structural metadata of a program unit.
//!
//! Descriptors are read-only once built and are shared through `Arc`, so the
//! same descriptor can be reachable from several places (a property's getter is
//! also one of its declaring type's methods). Identity of the `Arc` is what
//! element wrappers compare on; descriptors themselves carry no equality.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Accessibility of a declared type or member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Public,
    NonPublic,
}

impl Visibility {
    pub fn is_public(self) -> bool {
        matches!(self, Visibility::Public)
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::NonPublic => write!(f, "non-public"),
        }
    }
}

/// A compiled program unit and the types it declares.
#[derive(Debug)]
pub struct AssemblyInfo {
    pub(crate) name: String,
    pub(crate) types: Vec<Arc<TypeInfo>>,
}

impl AssemblyInfo {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Every type declared in the unit, public or not, in declaration order.
    pub fn types(&self) -> &[Arc<TypeInfo>] {
        &self.types
    }

    /// Looks a type up by simple name or namespace-qualified name.
    pub fn find_type(&self, name: &str) -> Option<&Arc<TypeInfo>> {
        self.types
            .iter()
            .find(|t| t.name == name || t.full_name() == name)
    }
}

/// A type declaration and its members.
///
/// Each member list is kept in declaration order. `methods` holds every
/// declared method including the accessors synthesized for properties and
/// events.
#[derive(Debug)]
pub struct TypeInfo {
    pub(crate) name: String,
    pub(crate) namespace: Option<String>,
    pub(crate) visibility: Visibility,
    pub(crate) fields: Vec<Arc<FieldInfo>>,
    pub(crate) constructors: Vec<Arc<ConstructorInfo>>,
    pub(crate) properties: Vec<Arc<PropertyInfo>>,
    pub(crate) methods: Vec<Arc<MethodInfo>>,
    pub(crate) events: Vec<Arc<EventInfo>>,
}

impl TypeInfo {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn full_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{}.{}", ns, self.name),
            None => self.name.clone(),
        }
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn fields(&self) -> &[Arc<FieldInfo>] {
        &self.fields
    }

    pub fn constructors(&self) -> &[Arc<ConstructorInfo>] {
        &self.constructors
    }

    pub fn properties(&self) -> &[Arc<PropertyInfo>] {
        &self.properties
    }

    pub fn methods(&self) -> &[Arc<MethodInfo>] {
        &self.methods
    }

    pub fn events(&self) -> &[Arc<EventInfo>] {
        &self.events
    }

    pub fn public_fields(&self) -> impl Iterator<Item = &Arc<FieldInfo>> {
        self.fields.iter().filter(|f| f.visibility.is_public())
    }

    pub fn public_constructors(&self) -> impl Iterator<Item = &Arc<ConstructorInfo>> {
        self.constructors.iter().filter(|c| c.visibility.is_public())
    }

    pub fn public_properties(&self) -> impl Iterator<Item = &Arc<PropertyInfo>> {
        self.properties.iter().filter(|p| p.visibility().is_public())
    }

    pub fn public_methods(&self) -> impl Iterator<Item = &Arc<MethodInfo>> {
        self.methods.iter().filter(|m| m.visibility.is_public())
    }

    pub fn public_events(&self) -> impl Iterator<Item = &Arc<EventInfo>> {
        self.events.iter().filter(|e| e.visibility().is_public())
    }

    /// Public methods that are not accessors of a public property.
    ///
    /// Property accessors are reached through the property itself, so they are
    /// left out here to keep a traversal from seeing them twice.
    pub fn plain_methods(&self) -> impl Iterator<Item = &Arc<MethodInfo>> {
        let accessors: Vec<&Arc<MethodInfo>> = self
            .public_properties()
            .flat_map(|p| p.accessors())
            .collect();
        self.public_methods()
            .filter(move |m| !accessors.iter().any(|a| Arc::ptr_eq(*a, *m)))
    }
}

#[derive(Debug)]
pub struct FieldInfo {
    pub(crate) name: String,
    pub(crate) field_type: String,
    pub(crate) visibility: Visibility,
    pub(crate) is_static: bool,
}

impl FieldInfo {
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            visibility: Visibility::Public,
            is_static: false,
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> &str {
        &self.field_type
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }
}

#[derive(Debug)]
pub struct ParameterInfo {
    pub(crate) name: String,
    pub(crate) parameter_type: String,
    pub(crate) position: usize,
}

impl ParameterInfo {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameter_type(&self) -> &str {
        &self.parameter_type
    }

    /// Zero-based position in the declaring member's parameter list.
    pub fn position(&self) -> usize {
        self.position
    }
}

#[derive(Debug)]
pub struct LocalVariableInfo {
    pub(crate) local_type: String,
    pub(crate) index: usize,
    pub(crate) is_pinned: bool,
}

impl LocalVariableInfo {
    pub fn local_type(&self) -> &str {
        &self.local_type
    }

    /// Slot index in the declaring body.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_pinned(&self) -> bool {
        self.is_pinned
    }
}

/// Parameters and local variables shared by methods and constructors.
#[derive(Debug, Default)]
pub(crate) struct Signature {
    pub(crate) parameters: Vec<Arc<ParameterInfo>>,
    pub(crate) locals: Vec<Arc<LocalVariableInfo>>,
}

impl Signature {
    fn push_parameter(&mut self, name: String, parameter_type: String) {
        let position = self.parameters.len();
        self.parameters.push(Arc::new(ParameterInfo { name, parameter_type, position }));
    }

    fn push_local(&mut self, local_type: String, is_pinned: bool) {
        let index = self.locals.len();
        self.locals.push(Arc::new(LocalVariableInfo { local_type, index, is_pinned }));
    }

    fn render_parameters(&self) -> String {
        self.parameters
            .iter()
            .map(|p| format!("{} {}", p.parameter_type, p.name))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug)]
pub struct ConstructorInfo {
    pub(crate) visibility: Visibility,
    pub(crate) is_static: bool,
    pub(crate) signature: Signature,
}

impl ConstructorInfo {
    pub fn new() -> Self {
        Self {
            visibility: Visibility::Public,
            is_static: false,
            signature: Signature::default(),
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn parameter(mut self, name: impl Into<String>, parameter_type: impl Into<String>) -> Self {
        self.signature.push_parameter(name.into(), parameter_type.into());
        self
    }

    pub fn local(mut self, local_type: impl Into<String>) -> Self {
        self.signature.push_local(local_type.into(), false);
        self
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn parameters(&self) -> &[Arc<ParameterInfo>] {
        &self.signature.parameters
    }

    pub fn locals(&self) -> &[Arc<LocalVariableInfo>] {
        &self.signature.locals
    }

    /// Renders `(int size, string label)`.
    pub fn signature(&self) -> String {
        format!("({})", self.signature.render_parameters())
    }
}

impl Default for ConstructorInfo {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct MethodInfo {
    pub(crate) name: String,
    pub(crate) return_type: String,
    pub(crate) visibility: Visibility,
    pub(crate) is_static: bool,
    pub(crate) special_name: bool,
    pub(crate) signature: Signature,
}

impl MethodInfo {
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type: return_type.into(),
            visibility: Visibility::Public,
            is_static: false,
            special_name: false,
            signature: Signature::default(),
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn parameter(mut self, name: impl Into<String>, parameter_type: impl Into<String>) -> Self {
        self.signature.push_parameter(name.into(), parameter_type.into());
        self
    }

    pub fn local(mut self, local_type: impl Into<String>) -> Self {
        self.signature.push_local(local_type.into(), false);
        self
    }

    pub fn pinned_local(mut self, local_type: impl Into<String>) -> Self {
        self.signature.push_local(local_type.into(), true);
        self
    }

    /// Marks a compiler-synthesized accessor.
    pub(crate) fn accessor(mut self) -> Self {
        self.special_name = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn return_type(&self) -> &str {
        &self.return_type
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// True for property and event accessors.
    pub fn is_special_name(&self) -> bool {
        self.special_name
    }

    pub fn parameters(&self) -> &[Arc<ParameterInfo>] {
        &self.signature.parameters
    }

    pub fn locals(&self) -> &[Arc<LocalVariableInfo>] {
        &self.signature.locals
    }

    /// Renders `void Resize(double factor)`.
    pub fn signature(&self) -> String {
        format!("{} {}({})", self.return_type, self.name, self.signature.render_parameters())
    }
}

#[derive(Debug)]
pub struct PropertyInfo {
    pub(crate) name: String,
    pub(crate) property_type: String,
    pub(crate) getter: Option<Arc<MethodInfo>>,
    pub(crate) setter: Option<Arc<MethodInfo>>,
}

impl PropertyInfo {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn property_type(&self) -> &str {
        &self.property_type
    }

    pub fn getter(&self) -> Option<&Arc<MethodInfo>> {
        self.getter.as_ref()
    }

    pub fn setter(&self) -> Option<&Arc<MethodInfo>> {
        self.setter.as_ref()
    }

    /// Getter then setter, whichever exist.
    pub fn accessors(&self) -> impl Iterator<Item = &Arc<MethodInfo>> {
        self.getter.iter().chain(self.setter.iter())
    }

    /// Public when at least one accessor is public.
    pub fn visibility(&self) -> Visibility {
        if self.accessors().any(|a| a.visibility.is_public()) {
            Visibility::Public
        } else {
            Visibility::NonPublic
        }
    }

    pub fn can_read(&self) -> bool {
        self.getter.is_some()
    }

    pub fn can_write(&self) -> bool {
        self.setter.is_some()
    }
}

#[derive(Debug)]
pub struct EventInfo {
    pub(crate) name: String,
    pub(crate) handler_type: String,
    pub(crate) add_method: Arc<MethodInfo>,
    pub(crate) remove_method: Arc<MethodInfo>,
}

impl EventInfo {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handler_type(&self) -> &str {
        &self.handler_type
    }

    pub fn add_method(&self) -> &Arc<MethodInfo> {
        &self.add_method
    }

    pub fn remove_method(&self) -> &Arc<MethodInfo> {
        &self.remove_method
    }

    pub fn visibility(&self) -> Visibility {
        self.add_method.visibility
    }
}
