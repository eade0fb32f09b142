//! Shared fixtures and scripted visitors for the integration tests.

#![allow(dead_code)]

use std::marker::PhantomData;
use std::sync::Arc;

use parking_lot::Mutex;

use metadata_visitor::element::{
    AssemblyElement, ConstructorInfoElement, EventInfoElement, FieldInfoElement,
    LocalVariableInfoElement, MethodInfoElement, ParameterInfoElement, PropertyInfoElement,
    TypeElement,
};
use metadata_visitor::metadata::{
    Accessors, AssemblyInfo, ConstructorInfo, FieldInfo, MethodInfo, TypeInfo, Visibility,
};
use metadata_visitor::visitor::{walk_assembly, walk_elements, walk_type};
use metadata_visitor::{ReflectionVisitor, VisitError, VisitResult, VisitorRef};

// ============================================================================
// Metadata fixtures
// ============================================================================

pub fn type_with_field() -> Arc<TypeInfo> {
    TypeInfo::builder("TypeWithField")
        .namespace("Fixtures")
        .field(FieldInfo::new("Field", "int"))
        .field(FieldInfo::new("OtherField", "string").with_static(true))
        .field(FieldInfo::new("hidden", "int").with_visibility(Visibility::NonPublic))
        .build()
}

pub fn type_with_ctor() -> Arc<TypeInfo> {
    TypeInfo::builder("TypeWithCtor")
        .namespace("Fixtures")
        .constructor(ConstructorInfo::new())
        .constructor(ConstructorInfo::new().parameter("seed", "int").local("int"))
        .constructor(ConstructorInfo::new().with_visibility(Visibility::NonPublic))
        .build()
}

pub fn type_with_property() -> Arc<TypeInfo> {
    TypeInfo::builder("TypeWithProperty")
        .namespace("Fixtures")
        .property("Property", "int", Accessors::READ_WRITE)
        .property("OtherProperty", "string", Accessors::READ_ONLY)
        .property(
            "Secret",
            "string",
            Accessors::new(Some(Visibility::NonPublic), Some(Visibility::NonPublic)),
        )
        .build()
}

/// Two plain methods interleaved with a read/write property and an event.
pub fn type_with_method() -> Arc<TypeInfo> {
    TypeInfo::builder("TypeWithMethod")
        .namespace("Fixtures")
        .method(MethodInfo::new("Method", "void").parameter("x", "int"))
        .property("Value", "int", Accessors::READ_WRITE)
        .method(MethodInfo::new("OtherMethod", "string").with_static(true))
        .method(MethodInfo::new("Hidden", "void").with_visibility(Visibility::NonPublic))
        .event("Changed", "EventHandler")
        .build()
}

pub fn type_with_event() -> Arc<TypeInfo> {
    TypeInfo::builder("TypeWithEvent")
        .namespace("Fixtures")
        .event("Event", "EventHandler")
        .event("OtherEvent", "EventHandler<string>")
        .event_with_visibility("HiddenEvent", "EventHandler", Visibility::NonPublic)
        .build()
}

/// Type `T` with field `F`, constructor `C` and method `M`.
pub fn simple_type() -> Arc<TypeInfo> {
    TypeInfo::builder("T")
        .field(FieldInfo::new("F", "int"))
        .constructor(ConstructorInfo::new())
        .method(MethodInfo::new("M", "void"))
        .build()
}

pub fn fixtures_assembly() -> Arc<AssemblyInfo> {
    AssemblyInfo::builder("Fixtures")
        .add_type(type_with_field())
        .add_type(type_with_ctor())
        .add_type(type_with_property())
        .add_type(type_with_method())
        .add_type(type_with_event())
        .add_type(TypeInfo::builder("Internal").visibility(Visibility::NonPublic).build())
        .build()
}

// ============================================================================
// Visitors
// ============================================================================

/// Visitor whose value is not implemented; every visit uses the defaults.
pub struct PlaceholderVisitor<T>(PhantomData<fn() -> T>);

impl<T> PlaceholderVisitor<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T: 'static> ReflectionVisitor<T> for PlaceholderVisitor<T> {
    fn value(&self) -> VisitResult<T> {
        Err(VisitError::unsupported("PlaceholderVisitor::value"))
    }
}

pub fn placeholder<T: 'static>() -> VisitorRef<T> {
    Arc::new(PlaceholderVisitor::<T>::new())
}

/// Identity of an element or slice, used to match scripted calls.
pub trait CallKey {
    fn call_key(&self) -> String;
}

macro_rules! call_key {
    ($($element:ident => $accessor:ident),* $(,)?) => {
        $(
            impl CallKey for $element {
                fn call_key(&self) -> String {
                    format!("{:p}", Arc::as_ptr(self.$accessor()))
                }
            }

            impl CallKey for [$element] {
                fn call_key(&self) -> String {
                    let keys: Vec<String> = self.iter().map(CallKey::call_key).collect();
                    format!("[{}]", keys.join(","))
                }
            }
        )*
    };
}

call_key! {
    AssemblyElement => assembly,
    TypeElement => type_info,
    FieldInfoElement => field_info,
    ConstructorInfoElement => constructor_info,
    PropertyInfoElement => property_info,
    MethodInfoElement => method_info,
    EventInfoElement => event_info,
    ParameterInfoElement => parameter_info,
    LocalVariableInfoElement => local_variable_info,
}

/// Calls recorded by every scripted visitor sharing the log.
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, entry: String) {
        self.0.lock().push(entry);
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().clone()
    }

    /// Entries recorded by one visitor, without the label prefix.
    pub fn calls_of(&self, label: &str) -> Vec<String> {
        let prefix = format!("{}.", label);
        self.entries()
            .into_iter()
            .filter_map(|e| e.strip_prefix(&prefix).map(str::to_string))
            .collect()
    }

    /// Method names only, in call order, across all visitors.
    pub fn methods(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .map(|e| {
                let call = e.split_once('.').map_or(e.as_str(), |(_, call)| call);
                call.split('(').next().unwrap_or(call).to_string()
            })
            .collect()
    }
}

struct Response {
    method: &'static str,
    key: Option<String>,
    returns: Returns,
}

enum Returns {
    Visitor(VisitorRef<String>),
    Fail(String),
}

/// Scripted stand-in for a partially overridden visitor.
///
/// Each call is logged as `label.method(key)`. A call matching a scripted
/// response returns the scripted visitor (or fails); any other call runs the
/// default behavior.
pub struct ScriptedVisitor {
    label: String,
    log: CallLog,
    responses: Mutex<Vec<Response>>,
}

impl ScriptedVisitor {
    pub fn new(label: &str, log: &CallLog) -> Self {
        Self {
            label: label.to_string(),
            log: log.clone(),
            responses: Mutex::new(Vec::new()),
        }
    }

    /// Returns `next` when `method` is called with exactly `arg`.
    pub fn on<A: CallKey + ?Sized>(self, method: &'static str, arg: &A, next: &VisitorRef<String>) -> Self {
        self.respond(method, Some(arg.call_key()), Returns::Visitor(Arc::clone(next)))
    }

    /// Returns `next` whenever `method` is called.
    pub fn on_any(self, method: &'static str, next: &VisitorRef<String>) -> Self {
        self.respond(method, None, Returns::Visitor(Arc::clone(next)))
    }

    /// Aborts the traversal when `method` is called with exactly `arg`.
    pub fn fail_on<A: CallKey + ?Sized>(self, method: &'static str, arg: &A, reason: &str) -> Self {
        self.respond(method, Some(arg.call_key()), Returns::Fail(reason.to_string()))
    }

    fn respond(self, method: &'static str, key: Option<String>, returns: Returns) -> Self {
        self.responses.lock().push(Response { method, key, returns });
        self
    }

    pub fn into_ref(self) -> VisitorRef<String> {
        Arc::new(self)
    }

    fn scripted(&self, method: &'static str, key: &str) -> Option<VisitResult<VisitorRef<String>>> {
        self.log.push(format!("{}.{}({})", self.label, method, key));
        let responses = self.responses.lock();
        responses
            .iter()
            .find(|r| r.method == method && r.key.as_deref().map_or(true, |k| k == key))
            .map(|r| match &r.returns {
                Returns::Visitor(next) => Ok(Arc::clone(next)),
                Returns::Fail(reason) => Err(VisitError::aborted(reason.clone())),
            })
    }
}

macro_rules! scripted_leaf {
    ($method:ident, $element:ty) => {
        fn $method(self: Arc<Self>, element: &$element) -> VisitResult<VisitorRef<String>> {
            match self.scripted(stringify!($method), &element.call_key()) {
                Some(result) => result,
                None => Ok(self),
            }
        }
    };
}

macro_rules! scripted_fold {
    ($method:ident, $element:ty, $single:ident) => {
        fn $method(self: Arc<Self>, elements: &[$element]) -> VisitResult<VisitorRef<String>> {
            match self.scripted(stringify!($method), &elements.call_key()) {
                Some(result) => result,
                None => {
                    let this: VisitorRef<String> = self;
                    walk_elements(this, elements, |v, e| v.$single(e))
                }
            }
        }
    };
}

impl ReflectionVisitor<String> for ScriptedVisitor {
    fn value(&self) -> VisitResult<String> {
        Ok(self.label.clone())
    }

    fn visit_assembly(self: Arc<Self>, element: &AssemblyElement) -> VisitResult<VisitorRef<String>> {
        match self.scripted("visit_assembly", &element.call_key()) {
            Some(result) => result,
            None => walk_assembly(self, element),
        }
    }

    fn visit_type(self: Arc<Self>, element: &TypeElement) -> VisitResult<VisitorRef<String>> {
        match self.scripted("visit_type", &element.call_key()) {
            Some(result) => result,
            None => walk_type(self, element),
        }
    }

    scripted_leaf!(visit_field, FieldInfoElement);
    scripted_leaf!(visit_constructor, ConstructorInfoElement);
    scripted_leaf!(visit_property, PropertyInfoElement);
    scripted_leaf!(visit_method, MethodInfoElement);
    scripted_leaf!(visit_event, EventInfoElement);
    scripted_leaf!(visit_parameter, ParameterInfoElement);
    scripted_leaf!(visit_local_variable, LocalVariableInfoElement);

    scripted_fold!(visit_assemblies, AssemblyElement, visit_assembly);
    scripted_fold!(visit_types, TypeElement, visit_type);
    scripted_fold!(visit_fields, FieldInfoElement, visit_field);
    scripted_fold!(visit_constructors, ConstructorInfoElement, visit_constructor);
    scripted_fold!(visit_properties, PropertyInfoElement, visit_property);
    scripted_fold!(visit_methods, MethodInfoElement, visit_method);
    scripted_fold!(visit_events, EventInfoElement, visit_event);
    scripted_fold!(visit_parameters, ParameterInfoElement, visit_parameter);
    scripted_fold!(visit_local_variables, LocalVariableInfoElement, visit_local_variable);
}

/// A scripted visitor with no responses, used as a chain terminator.
pub fn terminal(label: &str, log: &CallLog) -> VisitorRef<String> {
    ScriptedVisitor::new(label, log).into_ref()
}
