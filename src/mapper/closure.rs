//! Function values wrapped as mappers.

use super::{GraphMapper, MapResult, ProjectMapper, TargetMapper};
use crate::model::{Graph, Project, Target};

macro_rules! closure_mapper {
    ($(#[$meta:meta])* $wrapper:ident, $mapper:ident, $value:ty) => {
        $(#[$meta])*
        pub struct $wrapper<F> {
            name: String,
            function: F,
        }

        impl<F> $wrapper<F>
        where
            F: Fn($value) -> MapResult<$value>,
        {
            /// Wrap `function` under `name`.
            #[must_use]
            pub fn new(name: impl Into<String>, function: F) -> Self {
                Self {
                    name: name.into(),
                    function,
                }
            }
        }

        impl<F> $mapper for $wrapper<F>
        where
            F: Fn($value) -> MapResult<$value>,
        {
            fn name(&self) -> &str {
                &self.name
            }

            fn map(&self, value: $value) -> MapResult<$value> {
                (self.function)(value)
            }
        }

        impl<F> std::fmt::Debug for $wrapper<F> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($wrapper))
                    .field("name", &self.name)
                    .finish_non_exhaustive()
            }
        }
    };
}

closure_mapper!(
    /// A [`TargetMapper`] backed by a closure.
    TargetMapperFn,
    TargetMapper,
    Target
);
closure_mapper!(
    /// A [`ProjectMapper`] backed by a closure.
    ProjectMapperFn,
    ProjectMapper,
    Project
);
closure_mapper!(
    /// A [`GraphMapper`] backed by a closure.
    GraphMapperFn,
    GraphMapper,
    Graph
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::MapperError;
    use crate::model::{Platform, Product};

    #[test]
    fn closure_name_is_reported() {
        let mapper = TargetMapperFn::new("noop", |target: Target| Ok((target, Vec::new())));
        assert_eq!(TargetMapper::name(&mapper), "noop");
    }

    #[test]
    fn closure_error_is_forwarded() {
        let mapper = TargetMapperFn::new("reject", |target: Target| {
            Err(MapperError::failed("reject", format!("{} refused", target.name)))
        });
        let err = mapper
            .map(Target::new("App", Platform::Ios, Product::App))
            .expect_err("closure fails");
        assert_eq!(err, MapperError::failed("reject", "App refused"));
    }
}
