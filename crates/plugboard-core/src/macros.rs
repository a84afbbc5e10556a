//! Local impl macros for per-kind boilerplate.

/// Implement [`crate::traits::Path`] for a kind.
macro_rules! impl_path {
    ($kind:ty, $path:expr) => {
        impl $crate::traits::Path for $kind {
            const PATH: &'static str = $path;
        }
    };
}

/// Implement [`crate::traits::Entity`] for a kind, naming its key field.
macro_rules! impl_entity {
    ($kind:ty) => {
        impl_entity!($kind, name);
    };
    ($kind:ty, $field:ident) => {
        impl $crate::traits::Entity for $kind {
            fn name(&self) -> &str {
                &self.$field
            }
        }
    };
}

pub(crate) use {impl_entity, impl_path};
