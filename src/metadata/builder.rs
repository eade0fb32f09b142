//! Fluent construction of type and assembly descriptors.
//!
//! Adding a property or an event synthesizes its accessor methods and appends
//! them to the type's method list at that point, the same place a compiler
//! would emit them.

use std::sync::Arc;

use super::descriptor::{
    AssemblyInfo, ConstructorInfo, EventInfo, FieldInfo, MethodInfo, PropertyInfo, TypeInfo,
    Visibility,
};

/// Which accessors a property declares, and their visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Accessors {
    pub getter: Option<Visibility>,
    pub setter: Option<Visibility>,
}

impl Accessors {
    pub const READ_ONLY: Accessors = Accessors {
        getter: Some(Visibility::Public),
        setter: None,
    };

    pub const WRITE_ONLY: Accessors = Accessors {
        getter: None,
        setter: Some(Visibility::Public),
    };

    pub const READ_WRITE: Accessors = Accessors {
        getter: Some(Visibility::Public),
        setter: Some(Visibility::Public),
    };

    pub fn new(getter: Option<Visibility>, setter: Option<Visibility>) -> Self {
        Self { getter, setter }
    }

    pub fn is_empty(&self) -> bool {
        self.getter.is_none() && self.setter.is_none()
    }
}

#[derive(Debug)]
pub struct TypeBuilder {
    info: TypeInfo,
}

impl TypeBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            info: TypeInfo {
                name: name.into(),
                namespace: None,
                visibility: Visibility::Public,
                fields: Vec::new(),
                constructors: Vec::new(),
                properties: Vec::new(),
                methods: Vec::new(),
                events: Vec::new(),
            },
        }
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.info.namespace = Some(namespace.into());
        self
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.info.visibility = visibility;
        self
    }

    pub fn field(mut self, field: FieldInfo) -> Self {
        self.info.fields.push(Arc::new(field));
        self
    }

    pub fn constructor(mut self, constructor: ConstructorInfo) -> Self {
        self.info.constructors.push(Arc::new(constructor));
        self
    }

    pub fn method(mut self, method: MethodInfo) -> Self {
        self.info.methods.push(Arc::new(method));
        self
    }

    /// Declares a property, synthesizing `get_<name>` and `set_<name>`.
    pub fn property(
        mut self,
        name: impl Into<String>,
        property_type: impl Into<String>,
        accessors: Accessors,
    ) -> Self {
        let name = name.into();
        let property_type = property_type.into();

        let getter = accessors.getter.map(|visibility| {
            self.push_accessor(
                MethodInfo::new(format!("get_{}", name), property_type.clone())
                    .with_visibility(visibility),
            )
        });
        let setter = accessors.setter.map(|visibility| {
            self.push_accessor(
                MethodInfo::new(format!("set_{}", name), "void")
                    .with_visibility(visibility)
                    .parameter("value", property_type.clone()),
            )
        });

        self.info.properties.push(Arc::new(PropertyInfo {
            name,
            property_type,
            getter,
            setter,
        }));
        self
    }

    /// Declares a public event, synthesizing `add_<name>` and `remove_<name>`.
    pub fn event(self, name: impl Into<String>, handler_type: impl Into<String>) -> Self {
        self.event_with_visibility(name, handler_type, Visibility::Public)
    }

    pub fn event_with_visibility(
        mut self,
        name: impl Into<String>,
        handler_type: impl Into<String>,
        visibility: Visibility,
    ) -> Self {
        let name = name.into();
        let handler_type = handler_type.into();

        let add_method = self.push_accessor(
            MethodInfo::new(format!("add_{}", name), "void")
                .with_visibility(visibility)
                .parameter("value", handler_type.clone()),
        );
        let remove_method = self.push_accessor(
            MethodInfo::new(format!("remove_{}", name), "void")
                .with_visibility(visibility)
                .parameter("value", handler_type.clone()),
        );

        self.info.events.push(Arc::new(EventInfo {
            name,
            handler_type,
            add_method,
            remove_method,
        }));
        self
    }

    fn push_accessor(&mut self, method: MethodInfo) -> Arc<MethodInfo> {
        let method = Arc::new(method.accessor());
        self.info.methods.push(Arc::clone(&method));
        method
    }

    pub fn build(self) -> Arc<TypeInfo> {
        Arc::new(self.info)
    }
}

impl TypeInfo {
    pub fn builder(name: impl Into<String>) -> TypeBuilder {
        TypeBuilder::new(name)
    }
}

#[derive(Debug)]
pub struct AssemblyBuilder {
    info: AssemblyInfo,
}

impl AssemblyBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            info: AssemblyInfo {
                name: name.into(),
                types: Vec::new(),
            },
        }
    }

    pub fn add_type(mut self, type_info: Arc<TypeInfo>) -> Self {
        self.info.types.push(type_info);
        self
    }

    pub fn build(self) -> Arc<AssemblyInfo> {
        Arc::new(self.info)
    }
}

impl AssemblyInfo {
    pub fn builder(name: impl Into<String>) -> AssemblyBuilder {
        AssemblyBuilder::new(name)
    }
}
