// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

/// Generates a cloneable, thread-safe wrapper around a user-supplied callback.
///
/// The generated type stores the callback in an `Arc<dyn Fn...>` so it can be shared by all
/// clones of a breaker, and implements `Clone` and `Debug`.
///
/// # Syntax
///
/// ```rust,ignore
/// define_fn_wrapper!(TypeName(Fn(arg: ArgType)));
/// ```
///
/// The generated type has:
/// - `new<F>(callback: F) -> Self` where `F: Fn(...) + Send + Sync + 'static`
/// - `call(&self, args...)` to invoke the wrapped callback
macro_rules! define_fn_wrapper {
    ($name:ident(Fn($($param_name:ident: $param_ty:ty),*))) => {
        pub(crate) struct $name(std::sync::Arc<dyn Fn($($param_ty),*) + Send + Sync>);

        impl $name {
            pub(crate) fn new<F>(callback: F) -> Self
            where
                F: Fn($($param_ty),*) + Send + Sync + 'static,
            {
                Self(std::sync::Arc::new(callback))
            }

            pub(crate) fn call(&self, $($param_name: $param_ty),*) {
                (self.0)($($param_name),*);
            }
        }

        impl Clone for $name {
            fn clone(&self) -> Self {
                Self(std::sync::Arc::clone(&self.0))
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($name)).finish()
            }
        }
    };
}

pub(crate) use define_fn_wrapper;
