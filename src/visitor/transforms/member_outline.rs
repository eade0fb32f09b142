//! Outline visitor: renders one indented line per visited assembly, type and
//! member.

use std::sync::Arc;

use archery::ArcK;
use rpds::Vector;

use crate::element::{
    AssemblyElement, ConstructorInfoElement, EventInfoElement, FieldInfoElement,
    MethodInfoElement, PropertyInfoElement, TypeElement,
};
use crate::error::VisitResult;
use crate::visitor::{ReflectionVisitor, VisitorRef, walk_assembly, walk_type};

const INDENT: &str = "  ";

#[derive(Debug, Clone)]
pub struct MemberOutline {
    lines: Vector<String, ArcK>,
}

impl MemberOutline {
    pub fn new() -> Self {
        Self {
            lines: Vector::new_with_ptr_kind(),
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// A new outline with `line` appended; the receiver keeps its lines.
    fn with_line(&self, depth: usize, line: String) -> Arc<Self> {
        Arc::new(Self {
            lines: self.lines.push_back(format!("{}{}", INDENT.repeat(depth), line)),
        })
    }
}

impl Default for MemberOutline {
    fn default() -> Self {
        Self::new()
    }
}

impl ReflectionVisitor<Vec<String>> for MemberOutline {
    fn value(&self) -> VisitResult<Vec<String>> {
        Ok(self.lines.iter().cloned().collect())
    }

    fn visit_assembly(self: Arc<Self>, element: &AssemblyElement) -> VisitResult<VisitorRef<Vec<String>>> {
        let next = self.with_line(0, format!("assembly {}", element.assembly().name()));
        walk_assembly(next, element)
    }

    fn visit_type(self: Arc<Self>, element: &TypeElement) -> VisitResult<VisitorRef<Vec<String>>> {
        let next = self.with_line(1, format!("type {}", element.type_info().full_name()));
        walk_type(next, element)
    }

    fn visit_field(self: Arc<Self>, element: &FieldInfoElement) -> VisitResult<VisitorRef<Vec<String>>> {
        let field = element.field_info();
        let modifier = if field.is_static() { "static " } else { "" };
        Ok(self.with_line(2, format!("field {}{} {}", modifier, field.field_type(), field.name())))
    }

    fn visit_constructor(
        self: Arc<Self>,
        element: &ConstructorInfoElement,
    ) -> VisitResult<VisitorRef<Vec<String>>> {
        let ctor = element.constructor_info();
        let modifier = if ctor.is_static() { "static " } else { "" };
        Ok(self.with_line(2, format!("constructor {}{}", modifier, ctor.signature())))
    }

    fn visit_property(
        self: Arc<Self>,
        element: &PropertyInfoElement,
    ) -> VisitResult<VisitorRef<Vec<String>>> {
        let property = element.property_info();
        let mut accessors = Vec::new();
        if property.can_read() {
            accessors.push("get;");
        }
        if property.can_write() {
            accessors.push("set;");
        }
        Ok(self.with_line(
            2,
            format!(
                "property {} {} {{ {} }}",
                property.property_type(),
                property.name(),
                accessors.join(" ")
            ),
        ))
    }

    fn visit_method(self: Arc<Self>, element: &MethodInfoElement) -> VisitResult<VisitorRef<Vec<String>>> {
        let method = element.method_info();
        let modifier = if method.is_static() { "static " } else { "" };
        Ok(self.with_line(2, format!("method {}{}", modifier, method.signature())))
    }

    fn visit_event(self: Arc<Self>, element: &EventInfoElement) -> VisitResult<VisitorRef<Vec<String>>> {
        let event = element.event_info();
        Ok(self.with_line(2, format!("event {} {}", event.handler_type(), event.name())))
    }
}
