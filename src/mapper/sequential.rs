//! Composites that apply mappers of one tier in order.

use super::{GraphMapper, MapResult, ProjectMapper, TargetMapper};
use crate::model::{Graph, Project, Target};

macro_rules! sequential_mapper {
    ($(#[$meta:meta])* $composite:ident, $mapper:ident, $value:ty) => {
        $(#[$meta])*
        #[derive(Default)]
        pub struct $composite {
            mappers: Vec<Box<dyn $mapper>>,
        }

        impl $composite {
            /// Compose `mappers`, applied first to last.
            #[must_use]
            pub fn new(mappers: Vec<Box<dyn $mapper>>) -> Self {
                Self { mappers }
            }

            /// Append a mapper to the end of the sequence.
            #[must_use]
            pub fn then(mut self, mapper: impl $mapper + 'static) -> Self {
                self.mappers.push(Box::new(mapper));
                self
            }

            /// Number of composed mappers.
            #[must_use]
            pub const fn len(&self) -> usize {
                self.mappers.len()
            }

            /// Whether the sequence is empty.
            #[must_use]
            pub const fn is_empty(&self) -> bool {
                self.mappers.is_empty()
            }
        }

        impl $mapper for $composite {
            fn map(&self, value: $value) -> MapResult<$value> {
                let mut effects = Vec::new();
                let mut current = value;
                for mapper in &self.mappers {
                    tracing::debug!(mapper = mapper.name(), "applying mapper");
                    let (mapped, produced) = mapper.map(current)?;
                    effects.extend(produced);
                    current = mapped;
                }
                Ok((current, effects))
            }
        }

        impl std::fmt::Debug for $composite {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_list()
                    .entries(self.mappers.iter().map(|mapper| mapper.name()))
                    .finish()
            }
        }
    };
}

sequential_mapper!(
    /// Applies target mappers in order, threading the target through each.
    SequentialTargetMapper,
    TargetMapper,
    Target
);
sequential_mapper!(
    /// Applies project mappers in order, threading the project through each.
    SequentialProjectMapper,
    ProjectMapper,
    Project
);
sequential_mapper!(
    /// Applies graph mappers in order, threading the graph through each.
    SequentialGraphMapper,
    GraphMapper,
    Graph
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::{MapperError, SideEffectDescriptor, TargetMapperFn};
    use crate::model::{Platform, Product};

    fn tagging(tag: &'static str) -> TargetMapperFn<impl Fn(Target) -> MapResult<Target>> {
        TargetMapperFn::new(tag, move |mut target: Target| {
            target.product_name.push_str(tag);
            let effect = SideEffectDescriptor::command([tag]);
            Ok((target, vec![effect]))
        })
    }

    #[test]
    fn applies_mappers_in_order() {
        let sequence = SequentialTargetMapper::default()
            .then(tagging("1"))
            .then(tagging("2"));
        let target = Target::new("App", Platform::Ios, Product::App);
        let (mapped, effects) = sequence.map(target).expect("map");
        assert_eq!(mapped.product_name, "App12");
        assert_eq!(
            effects,
            vec![
                SideEffectDescriptor::command(["1"]),
                SideEffectDescriptor::command(["2"]),
            ]
        );
    }

    #[test]
    fn failure_discards_collected_effects() {
        let failing = TargetMapperFn::new("boom", |_target: Target| {
            Err(MapperError::failed("boom", "nope"))
        });
        let sequence = SequentialTargetMapper::default()
            .then(tagging("1"))
            .then(failing);
        let result = sequence.map(Target::new("App", Platform::Ios, Product::App));
        assert_eq!(result, Err(MapperError::failed("boom", "nope")));
    }

    #[test]
    fn empty_sequence_is_identity() {
        let target = Target::new("App", Platform::Ios, Product::App);
        let (mapped, effects) = SequentialTargetMapper::default()
            .map(target.clone())
            .expect("map");
        assert_eq!(mapped, target);
        assert!(effects.is_empty());
    }
}
