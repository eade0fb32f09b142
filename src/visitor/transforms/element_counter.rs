//! Counting visitor.
//!
//! Every visit produces a new counter with one count bumped; the receiver is
//! left untouched, so any intermediate counter in a chain still reports the
//! totals as of that step.

use std::sync::Arc;

use serde::Serialize;

use crate::element::{
    AssemblyElement, ConstructorInfoElement, ElementKind, EventInfoElement, FieldInfoElement,
    LocalVariableInfoElement, MethodInfoElement, ParameterInfoElement, PropertyInfoElement,
    TypeElement,
};
use crate::error::VisitResult;
use crate::visitor::{ReflectionVisitor, VisitorRef, walk_assembly, walk_type};

/// Per-kind totals reported by [`ElementCounter`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ElementCounts {
    pub assemblies: usize,
    pub types: usize,
    pub fields: usize,
    pub constructors: usize,
    pub properties: usize,
    pub methods: usize,
    pub events: usize,
    pub parameters: usize,
    pub local_variables: usize,
}

impl ElementCounts {
    pub fn get(&self, kind: ElementKind) -> usize {
        match kind {
            ElementKind::Assembly => self.assemblies,
            ElementKind::Type => self.types,
            ElementKind::Field => self.fields,
            ElementKind::Constructor => self.constructors,
            ElementKind::Property => self.properties,
            ElementKind::Method => self.methods,
            ElementKind::Event => self.events,
            ElementKind::Parameter => self.parameters,
            ElementKind::LocalVariable => self.local_variables,
        }
    }

    /// Fields, constructors, properties, methods and events.
    pub fn members(&self) -> usize {
        self.fields + self.constructors + self.properties + self.methods + self.events
    }

    fn incremented(mut self, kind: ElementKind) -> Self {
        let slot = match kind {
            ElementKind::Assembly => &mut self.assemblies,
            ElementKind::Type => &mut self.types,
            ElementKind::Field => &mut self.fields,
            ElementKind::Constructor => &mut self.constructors,
            ElementKind::Property => &mut self.properties,
            ElementKind::Method => &mut self.methods,
            ElementKind::Event => &mut self.events,
            ElementKind::Parameter => &mut self.parameters,
            ElementKind::LocalVariable => &mut self.local_variables,
        };
        *slot += 1;
        self
    }
}

/// Counts elements by kind over a traversal.
#[derive(Debug, Clone, Default)]
pub struct ElementCounter {
    counts: ElementCounts,
    /// Also fold over parameters and locals of methods and constructors.
    descend_into_bodies: bool,
}

impl ElementCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A counter that also visits parameters and local variables.
    pub fn with_bodies() -> Self {
        Self {
            counts: ElementCounts::default(),
            descend_into_bodies: true,
        }
    }

    pub fn counts(&self) -> ElementCounts {
        self.counts
    }

    fn bumped(&self, kind: ElementKind) -> Arc<Self> {
        Arc::new(Self {
            counts: self.counts.incremented(kind),
            descend_into_bodies: self.descend_into_bodies,
        })
    }

    fn body(
        &self,
        next: Arc<Self>,
        parameters: Vec<ParameterInfoElement>,
        locals: Vec<LocalVariableInfoElement>,
    ) -> VisitResult<VisitorRef<ElementCounts>> {
        if !self.descend_into_bodies {
            return Ok(next);
        }
        next.visit_parameters(&parameters)?
            .visit_local_variables(&locals)
    }
}

impl ReflectionVisitor<ElementCounts> for ElementCounter {
    fn value(&self) -> VisitResult<ElementCounts> {
        Ok(self.counts)
    }

    fn visit_assembly(self: Arc<Self>, element: &AssemblyElement) -> VisitResult<VisitorRef<ElementCounts>> {
        walk_assembly(self.bumped(ElementKind::Assembly), element)
    }

    fn visit_type(self: Arc<Self>, element: &TypeElement) -> VisitResult<VisitorRef<ElementCounts>> {
        walk_type(self.bumped(ElementKind::Type), element)
    }

    fn visit_field(self: Arc<Self>, _element: &FieldInfoElement) -> VisitResult<VisitorRef<ElementCounts>> {
        Ok(self.bumped(ElementKind::Field))
    }

    fn visit_constructor(
        self: Arc<Self>,
        element: &ConstructorInfoElement,
    ) -> VisitResult<VisitorRef<ElementCounts>> {
        let next = self.bumped(ElementKind::Constructor);
        self.body(next, element.parameters(), element.local_variables())
    }

    fn visit_property(
        self: Arc<Self>,
        _element: &PropertyInfoElement,
    ) -> VisitResult<VisitorRef<ElementCounts>> {
        Ok(self.bumped(ElementKind::Property))
    }

    fn visit_method(self: Arc<Self>, element: &MethodInfoElement) -> VisitResult<VisitorRef<ElementCounts>> {
        let next = self.bumped(ElementKind::Method);
        self.body(next, element.parameters(), element.local_variables())
    }

    fn visit_event(self: Arc<Self>, _element: &EventInfoElement) -> VisitResult<VisitorRef<ElementCounts>> {
        Ok(self.bumped(ElementKind::Event))
    }

    fn visit_parameter(
        self: Arc<Self>,
        _element: &ParameterInfoElement,
    ) -> VisitResult<VisitorRef<ElementCounts>> {
        Ok(self.bumped(ElementKind::Parameter))
    }

    fn visit_local_variable(
        self: Arc<Self>,
        _element: &LocalVariableInfoElement,
    ) -> VisitResult<VisitorRef<ElementCounts>> {
        Ok(self.bumped(ElementKind::LocalVariable))
    }
}
