//! Element wrappers: one immutable node type per kind of structural metadata.
//!
//! An element holds exactly one descriptor handle and compares equal to
//! another element only when both wrap the same handle. Elements are what
//! visitors receive; descriptors stay read-only behind them.

pub mod convert;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::error::{VisitError, VisitResult};
use crate::metadata::{
    AssemblyInfo, ConstructorInfo, EventInfo, FieldInfo, LocalVariableInfo, MethodInfo,
    ParameterInfo, PropertyInfo, TypeInfo,
};

pub use convert::{to_elements, ToElement};

/// Discriminator for the nine node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Assembly,
    Type,
    Field,
    Constructor,
    Property,
    Method,
    Event,
    Parameter,
    LocalVariable,
}

impl ElementKind {
    /// True for kinds the default traversal does not expand.
    pub fn is_leaf(self) -> bool {
        !matches!(self, ElementKind::Assembly | ElementKind::Type)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::Assembly => write!(f, "assembly"),
            ElementKind::Type => write!(f, "type"),
            ElementKind::Field => write!(f, "field"),
            ElementKind::Constructor => write!(f, "constructor"),
            ElementKind::Property => write!(f, "property"),
            ElementKind::Method => write!(f, "method"),
            ElementKind::Event => write!(f, "event"),
            ElementKind::Parameter => write!(f, "parameter"),
            ElementKind::LocalVariable => write!(f, "local variable"),
        }
    }
}

macro_rules! element {
    ($(#[$doc:meta])* $name:ident, $info:ty, $accessor:ident, $param:literal, $kind:expr) => {
        $(#[$doc])*
        #[derive(Clone)]
        pub struct $name {
            $accessor: Arc<$info>,
        }

        impl $name {
            pub const KIND: ElementKind = $kind;

            pub fn new($accessor: Arc<$info>) -> Self {
                Self { $accessor }
            }

            /// Wraps a handle that may be absent.
            pub fn from_handle($accessor: Option<Arc<$info>>) -> VisitResult<Self> {
                $accessor
                    .map(Self::new)
                    .ok_or(VisitError::null_argument($param))
            }

            pub fn $accessor(&self) -> &Arc<$info> {
                &self.$accessor
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                Arc::ptr_eq(&self.$accessor, &other.$accessor)
            }
        }

        impl Eq for $name {}

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                Arc::as_ptr(&self.$accessor).hash(state);
            }
        }

        impl From<Arc<$info>> for $name {
            fn from($accessor: Arc<$info>) -> Self {
                Self::new($accessor)
            }
        }
    };
}

element!(
    /// A program unit.
    AssemblyElement, AssemblyInfo, assembly, "assembly", ElementKind::Assembly
);
element!(TypeElement, TypeInfo, type_info, "type", ElementKind::Type);
element!(FieldInfoElement, FieldInfo, field_info, "field_info", ElementKind::Field);
element!(
    ConstructorInfoElement, ConstructorInfo, constructor_info, "constructor_info",
    ElementKind::Constructor
);
element!(MethodInfoElement, MethodInfo, method_info, "method_info", ElementKind::Method);
element!(PropertyInfoElement, PropertyInfo, property_info, "property_info", ElementKind::Property);
element!(EventInfoElement, EventInfo, event_info, "event_info", ElementKind::Event);
element!(
    ParameterInfoElement, ParameterInfo, parameter_info, "parameter_info",
    ElementKind::Parameter
);
element!(
    LocalVariableInfoElement, LocalVariableInfo, local_variable_info, "local_variable_info",
    ElementKind::LocalVariable
);

impl AssemblyElement {
    /// Every type declared in the assembly, in declaration order.
    pub fn types(&self) -> Vec<TypeElement> {
        to_elements(self.assembly.types())
    }
}

impl TypeElement {
    pub fn fields(&self) -> Vec<FieldInfoElement> {
        self.type_info.public_fields().map(ToElement::to_element).collect()
    }

    pub fn constructors(&self) -> Vec<ConstructorInfoElement> {
        self.type_info.public_constructors().map(ToElement::to_element).collect()
    }

    pub fn properties(&self) -> Vec<PropertyInfoElement> {
        self.type_info.public_properties().map(ToElement::to_element).collect()
    }

    /// Public methods other than property accessors.
    pub fn methods(&self) -> Vec<MethodInfoElement> {
        self.type_info.plain_methods().map(ToElement::to_element).collect()
    }

    pub fn events(&self) -> Vec<EventInfoElement> {
        self.type_info.public_events().map(ToElement::to_element).collect()
    }
}

impl ConstructorInfoElement {
    pub fn parameters(&self) -> Vec<ParameterInfoElement> {
        to_elements(self.constructor_info.parameters())
    }

    pub fn local_variables(&self) -> Vec<LocalVariableInfoElement> {
        to_elements(self.constructor_info.locals())
    }
}

impl MethodInfoElement {
    pub fn parameters(&self) -> Vec<ParameterInfoElement> {
        to_elements(self.method_info.parameters())
    }

    pub fn local_variables(&self) -> Vec<LocalVariableInfoElement> {
        to_elements(self.method_info.locals())
    }
}

impl PropertyInfoElement {
    /// Getter then setter, whichever exist.
    pub fn accessors(&self) -> Vec<MethodInfoElement> {
        self.property_info.accessors().map(ToElement::to_element).collect()
    }
}

impl fmt::Debug for AssemblyElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AssemblyElement({})", self.assembly.name())
    }
}

impl fmt::Debug for TypeElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeElement({})", self.type_info.full_name())
    }
}

impl fmt::Debug for FieldInfoElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldInfoElement({})", self.field_info.name())
    }
}

impl fmt::Debug for ConstructorInfoElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConstructorInfoElement{}", self.constructor_info.signature())
    }
}

impl fmt::Debug for MethodInfoElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MethodInfoElement({})", self.method_info.name())
    }
}

impl fmt::Debug for PropertyInfoElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PropertyInfoElement({})", self.property_info.name())
    }
}

impl fmt::Debug for EventInfoElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventInfoElement({})", self.event_info.name())
    }
}

impl fmt::Debug for ParameterInfoElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ParameterInfoElement({})", self.parameter_info.name())
    }
}

impl fmt::Debug for LocalVariableInfoElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LocalVariableInfoElement(#{} {})",
            self.local_variable_info.index(),
            self.local_variable_info.local_type()
        )
    }
}

/// Any element, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReflectionElement {
    Assembly(AssemblyElement),
    Type(TypeElement),
    Field(FieldInfoElement),
    Constructor(ConstructorInfoElement),
    Property(PropertyInfoElement),
    Method(MethodInfoElement),
    Event(EventInfoElement),
    Parameter(ParameterInfoElement),
    LocalVariable(LocalVariableInfoElement),
}

impl ReflectionElement {
    pub fn kind(&self) -> ElementKind {
        match self {
            ReflectionElement::Assembly(_) => ElementKind::Assembly,
            ReflectionElement::Type(_) => ElementKind::Type,
            ReflectionElement::Field(_) => ElementKind::Field,
            ReflectionElement::Constructor(_) => ElementKind::Constructor,
            ReflectionElement::Property(_) => ElementKind::Property,
            ReflectionElement::Method(_) => ElementKind::Method,
            ReflectionElement::Event(_) => ElementKind::Event,
            ReflectionElement::Parameter(_) => ElementKind::Parameter,
            ReflectionElement::LocalVariable(_) => ElementKind::LocalVariable,
        }
    }
}

macro_rules! into_reflection_element {
    ($($element:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$element> for ReflectionElement {
                fn from(element: $element) -> Self {
                    ReflectionElement::$variant(element)
                }
            }
        )*
    };
}

into_reflection_element! {
    AssemblyElement => Assembly,
    TypeElement => Type,
    FieldInfoElement => Field,
    ConstructorInfoElement => Constructor,
    PropertyInfoElement => Property,
    MethodInfoElement => Method,
    EventInfoElement => Event,
    ParameterInfoElement => Parameter,
    LocalVariableInfoElement => LocalVariable,
}
