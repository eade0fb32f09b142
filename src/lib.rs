pub mod element;
pub mod error;
pub mod logging;
pub mod metadata;
pub mod visitor;

pub use element::{
    AssemblyElement, ConstructorInfoElement, ElementKind, EventInfoElement, FieldInfoElement,
    LocalVariableInfoElement, MethodInfoElement, ParameterInfoElement, PropertyInfoElement,
    ReflectionElement, ToElement, TypeElement,
};
pub use error::{ModelError, VisitError, VisitResult};
pub use visitor::{ReflectionVisitor, VisitorRef, VisitorRefExt};
