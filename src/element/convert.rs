//! Conversions from descriptor handles to element wrappers.

use std::sync::Arc;

use super::{
    AssemblyElement, ConstructorInfoElement, EventInfoElement, FieldInfoElement,
    LocalVariableInfoElement, MethodInfoElement, ParameterInfoElement, PropertyInfoElement,
    TypeElement,
};
use crate::metadata::{
    AssemblyInfo, ConstructorInfo, EventInfo, FieldInfo, LocalVariableInfo, MethodInfo,
    ParameterInfo, PropertyInfo, TypeInfo,
};

/// Maps a descriptor handle to the element that wraps it.
pub trait ToElement {
    type Element;

    fn to_element(&self) -> Self::Element;
}

macro_rules! to_element {
    ($($info:ty => $element:ident),* $(,)?) => {
        $(
            impl ToElement for Arc<$info> {
                type Element = $element;

                fn to_element(&self) -> $element {
                    $element::new(Arc::clone(self))
                }
            }
        )*
    };
}

to_element! {
    AssemblyInfo => AssemblyElement,
    TypeInfo => TypeElement,
    FieldInfo => FieldInfoElement,
    ConstructorInfo => ConstructorInfoElement,
    MethodInfo => MethodInfoElement,
    PropertyInfo => PropertyInfoElement,
    EventInfo => EventInfoElement,
    ParameterInfo => ParameterInfoElement,
    LocalVariableInfo => LocalVariableInfoElement,
}

/// Converts every handle in a slice, keeping order.
pub fn to_elements<H: ToElement>(handles: &[H]) -> Vec<H::Element> {
    handles.iter().map(ToElement::to_element).collect()
}
