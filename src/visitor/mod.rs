//! Visitor pattern for traversing structural metadata.
//!
//! The [`ReflectionVisitor`] trait provides one method per element kind and per
//! slice of elements. Visitors are immutable: a visit returns the visitor to
//! continue with, and the traversal threads that returned visitor into the
//! next step.
//!
//! # Architecture
//!
//! - `visitor_trait`: the trait, its default traversal, and the `walk_*`
//!   functions overrides use to continue the default traversal
//! - `dispatch`: the nullable `visit` entry point over any element or slice
//! - `transforms`: stock visitors (counting, outlining)
//!
//! # Traversal order
//!
//! An assembly expands to its types in declaration order. A type expands to
//! its fields, constructors, properties, methods and events, in that order,
//! with property accessors left out of the methods. Everything else is a leaf.

mod dispatch;
pub mod transforms;
mod visitor_trait;

pub use dispatch::{same_visitor, Visitable, VisitorRefExt};
pub use visitor_trait::{
    walk_assembly, walk_elements, walk_type, IntoVisitorRef, ReflectionVisitor, VisitorRef,
};
