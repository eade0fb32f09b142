use std::sync::Arc;

use tracing::trace;

use crate::element::{
    AssemblyElement, ConstructorInfoElement, EventInfoElement, FieldInfoElement,
    LocalVariableInfoElement, MethodInfoElement, ParameterInfoElement, PropertyInfoElement,
    TypeElement,
};
use crate::error::VisitResult;

/// Shared handle to a visitor in a traversal chain.
pub type VisitorRef<T> = Arc<dyn ReflectionVisitor<T>>;

impl<T> std::fmt::Debug for dyn ReflectionVisitor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ReflectionVisitor")
    }
}

/// Conversion of a concrete visitor handle into a [`VisitorRef`].
///
/// Implemented for every sized visitor; trait objects carry it in their
/// vtable, which is what lets default methods return `self` as a `VisitorRef`.
pub trait IntoVisitorRef<T> {
    fn into_visitor_ref(self: Arc<Self>) -> VisitorRef<T>;
}

impl<T, V> IntoVisitorRef<T> for V
where
    V: ReflectionVisitor<T> + 'static,
{
    fn into_visitor_ref(self: Arc<Self>) -> VisitorRef<T> {
        self
    }
}

/// Immutable, chainable visitor over structural metadata.
///
/// Each visit takes the visitor by `Arc` and returns the visitor to use for the
/// next step: the receiver itself when nothing changed, or another instance
/// carrying updated state. A visitor is never mutated in place.
///
/// Every method has a default. Leaf kinds return the receiver unchanged;
/// assemblies expand to their types and types expand to their members; slice
/// visits fold left to right over the single-element visit. Implementors
/// override only the kinds they care about, and overrides are picked up inside
/// the default traversal because every step dispatches through the visitor
/// returned by the previous one.
///
/// # Usage
///
/// ```ignore
/// struct MethodNames(rpds::Vector<String>);
///
/// impl ReflectionVisitor<Vec<String>> for MethodNames {
///     fn value(&self) -> VisitResult<Vec<String>> {
///         Ok(self.0.iter().cloned().collect())
///     }
///
///     fn visit_method(self: Arc<Self>, element: &MethodInfoElement) -> VisitResult<VisitorRef<Vec<String>>> {
///         let name = element.method_info().name().to_string();
///         Ok(Arc::new(MethodNames(self.0.push_back(name))))
///     }
/// }
/// ```
pub trait ReflectionVisitor<T>: IntoVisitorRef<T> {
    /// The value accumulated by this visitor.
    ///
    /// Visitors without a meaningful value return
    /// [`VisitError::Unsupported`](crate::error::VisitError::Unsupported).
    fn value(&self) -> VisitResult<T>;

    /// Visits a program unit.
    ///
    /// # Returns
    /// By default, the visitor produced by [`visit_types`](Self::visit_types)
    /// over every type the assembly declares.
    fn visit_assembly(self: Arc<Self>, element: &AssemblyElement) -> VisitResult<VisitorRef<T>> {
        walk_assembly(self, element)
    }

    /// Visits a type.
    ///
    /// # Returns
    /// By default, the visitor produced after threading through the type's
    /// fields, constructors, properties, methods and events, in that order.
    /// See [`walk_type`].
    fn visit_type(self: Arc<Self>, element: &TypeElement) -> VisitResult<VisitorRef<T>> {
        walk_type(self, element)
    }

    fn visit_field(self: Arc<Self>, _element: &FieldInfoElement) -> VisitResult<VisitorRef<T>> {
        Ok(self.into_visitor_ref())
    }

    fn visit_constructor(
        self: Arc<Self>,
        _element: &ConstructorInfoElement,
    ) -> VisitResult<VisitorRef<T>> {
        Ok(self.into_visitor_ref())
    }

    fn visit_property(self: Arc<Self>, _element: &PropertyInfoElement) -> VisitResult<VisitorRef<T>> {
        Ok(self.into_visitor_ref())
    }

    fn visit_method(self: Arc<Self>, _element: &MethodInfoElement) -> VisitResult<VisitorRef<T>> {
        Ok(self.into_visitor_ref())
    }

    fn visit_event(self: Arc<Self>, _element: &EventInfoElement) -> VisitResult<VisitorRef<T>> {
        Ok(self.into_visitor_ref())
    }

    fn visit_parameter(
        self: Arc<Self>,
        _element: &ParameterInfoElement,
    ) -> VisitResult<VisitorRef<T>> {
        Ok(self.into_visitor_ref())
    }

    fn visit_local_variable(
        self: Arc<Self>,
        _element: &LocalVariableInfoElement,
    ) -> VisitResult<VisitorRef<T>> {
        Ok(self.into_visitor_ref())
    }

    fn visit_assemblies(self: Arc<Self>, elements: &[AssemblyElement]) -> VisitResult<VisitorRef<T>> {
        walk_elements(self.into_visitor_ref(), elements, |v, e| v.visit_assembly(e))
    }

    fn visit_types(self: Arc<Self>, elements: &[TypeElement]) -> VisitResult<VisitorRef<T>> {
        walk_elements(self.into_visitor_ref(), elements, |v, e| v.visit_type(e))
    }

    fn visit_fields(self: Arc<Self>, elements: &[FieldInfoElement]) -> VisitResult<VisitorRef<T>> {
        walk_elements(self.into_visitor_ref(), elements, |v, e| v.visit_field(e))
    }

    fn visit_constructors(
        self: Arc<Self>,
        elements: &[ConstructorInfoElement],
    ) -> VisitResult<VisitorRef<T>> {
        walk_elements(self.into_visitor_ref(), elements, |v, e| v.visit_constructor(e))
    }

    fn visit_properties(
        self: Arc<Self>,
        elements: &[PropertyInfoElement],
    ) -> VisitResult<VisitorRef<T>> {
        walk_elements(self.into_visitor_ref(), elements, |v, e| v.visit_property(e))
    }

    fn visit_methods(self: Arc<Self>, elements: &[MethodInfoElement]) -> VisitResult<VisitorRef<T>> {
        walk_elements(self.into_visitor_ref(), elements, |v, e| v.visit_method(e))
    }

    fn visit_events(self: Arc<Self>, elements: &[EventInfoElement]) -> VisitResult<VisitorRef<T>> {
        walk_elements(self.into_visitor_ref(), elements, |v, e| v.visit_event(e))
    }

    fn visit_parameters(
        self: Arc<Self>,
        elements: &[ParameterInfoElement],
    ) -> VisitResult<VisitorRef<T>> {
        walk_elements(self.into_visitor_ref(), elements, |v, e| v.visit_parameter(e))
    }

    fn visit_local_variables(
        self: Arc<Self>,
        elements: &[LocalVariableInfoElement],
    ) -> VisitResult<VisitorRef<T>> {
        walk_elements(self.into_visitor_ref(), elements, |v, e| v.visit_local_variable(e))
    }
}

/// Folds `visitor` over `elements` from left to right.
///
/// Each step calls `visit` on the visitor returned by the previous step, so an
/// overridden single-element visit on any visitor in the chain takes effect.
/// An empty slice returns `visitor` itself. The first error stops the fold and
/// is returned as is.
pub fn walk_elements<T, E, F>(visitor: VisitorRef<T>, elements: &[E], mut visit: F) -> VisitResult<VisitorRef<T>>
where
    F: FnMut(VisitorRef<T>, &E) -> VisitResult<VisitorRef<T>>,
{
    trace!("Folding visitor over {} elements", elements.len());
    elements.iter().try_fold(visitor, |v, e| visit(v, e))
}

/// Default expansion of an assembly: visits its types in declaration order.
pub fn walk_assembly<T, V>(visitor: Arc<V>, element: &AssemblyElement) -> VisitResult<VisitorRef<T>>
where
    V: ReflectionVisitor<T> + ?Sized,
{
    let types = element.types();
    trace!("Expanding assembly '{}' into {} types", element.assembly().name(), types.len());
    visitor.visit_types(&types)
}

/// Default expansion of a type.
///
/// Visits the member slices in the fixed order fields, constructors,
/// properties, methods, events. Each slice is visited by the visitor the
/// previous slice returned. Property accessors are not part of the method
/// slice.
pub fn walk_type<T, V>(visitor: Arc<V>, element: &TypeElement) -> VisitResult<VisitorRef<T>>
where
    V: ReflectionVisitor<T> + ?Sized,
{
    trace!("Expanding type '{}'", element.type_info().full_name());
    let visitor = visitor.visit_fields(&element.fields())?;
    let visitor = visitor.visit_constructors(&element.constructors())?;
    let visitor = visitor.visit_properties(&element.properties())?;
    let visitor = visitor.visit_methods(&element.methods())?;
    visitor.visit_events(&element.events())
}
