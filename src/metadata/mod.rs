pub mod builder;
pub mod descriptor;
pub mod loader;

pub use builder::{Accessors, AssemblyBuilder, TypeBuilder};
pub use descriptor::{
    AssemblyInfo, ConstructorInfo, EventInfo, FieldInfo, LocalVariableInfo, MethodInfo,
    ParameterInfo, PropertyInfo, TypeInfo, Visibility,
};
pub use loader::{load_assembly, parse_assembly};
