//! Nullable entry point for visiting any element or element slice.
//!
//! [`VisitorRefExt::visit`] is the one overloaded `visit` operation: it accepts
//! an optional reference to any [`Visitable`] node, rejects `None` with
//! [`VisitError::InvalidArgument`] naming the argument, and otherwise routes to
//! the matching [`ReflectionVisitor`] method.

use std::sync::Arc;

use tracing::debug;

use super::visitor_trait::{ReflectionVisitor, VisitorRef};
use crate::element::{
    AssemblyElement, ConstructorInfoElement, EventInfoElement, FieldInfoElement,
    LocalVariableInfoElement, MethodInfoElement, ParameterInfoElement, PropertyInfoElement,
    ReflectionElement, TypeElement,
};
use crate::error::{VisitError, VisitResult};

/// A node or slice of nodes that a [`ReflectionVisitor`] can visit.
pub trait Visitable {
    /// Argument name reported when the node is absent.
    const PARAMETER: &'static str;

    fn accept<T>(&self, visitor: VisitorRef<T>) -> VisitResult<VisitorRef<T>>;
}

macro_rules! visitable {
    ($($node:ty, $param:literal => $method:ident;)*) => {
        $(
            impl Visitable for $node {
                const PARAMETER: &'static str = $param;

                fn accept<T>(&self, visitor: VisitorRef<T>) -> VisitResult<VisitorRef<T>> {
                    visitor.$method(self)
                }
            }
        )*
    };
}

visitable! {
    AssemblyElement, "assembly_element" => visit_assembly;
    TypeElement, "type_element" => visit_type;
    FieldInfoElement, "field_info_element" => visit_field;
    ConstructorInfoElement, "constructor_info_element" => visit_constructor;
    PropertyInfoElement, "property_info_element" => visit_property;
    MethodInfoElement, "method_info_element" => visit_method;
    EventInfoElement, "event_info_element" => visit_event;
    ParameterInfoElement, "parameter_info_element" => visit_parameter;
    LocalVariableInfoElement, "local_variable_info_element" => visit_local_variable;
    [AssemblyElement], "assembly_elements" => visit_assemblies;
    [TypeElement], "type_elements" => visit_types;
    [FieldInfoElement], "field_info_elements" => visit_fields;
    [ConstructorInfoElement], "constructor_info_elements" => visit_constructors;
    [PropertyInfoElement], "property_info_elements" => visit_properties;
    [MethodInfoElement], "method_info_elements" => visit_methods;
    [EventInfoElement], "event_info_elements" => visit_events;
    [ParameterInfoElement], "parameter_info_elements" => visit_parameters;
    [LocalVariableInfoElement], "local_variable_info_elements" => visit_local_variables;
}

impl Visitable for ReflectionElement {
    const PARAMETER: &'static str = "element";

    fn accept<T>(&self, visitor: VisitorRef<T>) -> VisitResult<VisitorRef<T>> {
        match self {
            ReflectionElement::Assembly(e) => visitor.visit_assembly(e),
            ReflectionElement::Type(e) => visitor.visit_type(e),
            ReflectionElement::Field(e) => visitor.visit_field(e),
            ReflectionElement::Constructor(e) => visitor.visit_constructor(e),
            ReflectionElement::Property(e) => visitor.visit_property(e),
            ReflectionElement::Method(e) => visitor.visit_method(e),
            ReflectionElement::Event(e) => visitor.visit_event(e),
            ReflectionElement::Parameter(e) => visitor.visit_parameter(e),
            ReflectionElement::LocalVariable(e) => visitor.visit_local_variable(e),
        }
    }
}

pub trait VisitorRefExt<T> {
    /// Visits `node`, failing with `InvalidArgument` when it is `None`.
    ///
    /// # Examples
    /// ```ignore
    /// let next = visitor.visit(Some(&type_element))?;
    /// let next = next.visit(Some(methods.as_slice()))?;
    /// let err = next.visit(None::<&[FieldInfoElement]>).unwrap_err();
    /// assert_eq!(err.param_name(), Some("field_info_elements"));
    /// ```
    fn visit<N>(&self, node: Option<&N>) -> VisitResult<VisitorRef<T>>
    where
        N: Visitable + ?Sized;
}

impl<T> VisitorRefExt<T> for VisitorRef<T> {
    fn visit<N>(&self, node: Option<&N>) -> VisitResult<VisitorRef<T>>
    where
        N: Visitable + ?Sized,
    {
        let Some(node) = node else {
            debug!("Rejecting null '{}'", N::PARAMETER);
            return Err(VisitError::null_argument(N::PARAMETER));
        };
        debug!("Dispatching visit for '{}'", N::PARAMETER);
        node.accept(Arc::clone(self))
    }
}

/// True when both handles point at the same visitor instance.
pub fn same_visitor<T>(a: &VisitorRef<T>, b: &VisitorRef<T>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}
