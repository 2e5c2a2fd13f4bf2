//! Validated per-type metadata and the process-wide cache holding it.

use crate::convert::{ConversionRegistry, TypeKey};
use crate::error::FormatError;
use crate::schema::{Arguments, CreatorFn, EmptyFn, FieldDescriptor, McfModel, Schema};
use crate::section::Section;
use moka::sync::Cache;
use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::sync::{Arc, LazyLock};
use tracing::debug;

type ErasedEntity = Arc<dyn Any + Send + Sync>;

/// Built metadata, keyed by entity type. Entries hold no registry, so every
/// mapper profile shares them; they live for the rest of the process.
static ENTITIES: LazyLock<Cache<TypeId, ErasedEntity>> = LazyLock::new(|| Cache::builder().build());

enum Construction<T> {
    Creator(CreatorFn<T>),
    Setters(EmptyFn<T>),
}

/// Sorted, validated field table and the resolved reconstruction strategy for `T`.
pub(crate) struct EntitySerializer<T> {
    entity: &'static str,
    fields: Vec<FieldDescriptor<T>>,
    construction: Construction<T>,
}

impl<T> fmt::Debug for EntitySerializer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let strategy = match self.construction {
            Construction::Creator(_) => "creator",
            Construction::Setters(_) => "setters",
        };
        f.debug_struct("EntitySerializer")
            .field("entity", &self.entity)
            .field("fields", &self.fields)
            .field("construction", &strategy)
            .finish()
    }
}

/// Returns the cached metadata for `T`, building it on first use.
///
/// Concurrent first calls for the same type wait on a single build. A failed
/// build is reported to every waiter and is not remembered.
pub(crate) fn entity<T: McfModel>() -> Result<Arc<EntitySerializer<T>>, FormatError> {
    let erased = ENTITIES
        .try_get_with(TypeId::of::<T>(), || {
            EntitySerializer::<T>::build(T::schema()).map(|built| Arc::new(built) as ErasedEntity)
        })
        .map_err(|err: Arc<FormatError>| (*err).clone())?;

    erased.downcast::<EntitySerializer<T>>().map_err(|_| {
        FormatError::from(format!("metadata cache holds a foreign entry for {}", type_name::<T>()))
    })
}

impl<T: 'static> EntitySerializer<T> {
    pub(crate) fn build(schema: Schema<T>) -> Result<Self, FormatError> {
        let entity = type_name::<T>();
        let Schema { mut fields, mut creators, empty } = schema;

        if fields.is_empty() {
            return Err(FormatError::NoSerializableFields { entity, context: None });
        }

        fields.sort_by_key(|field| field.order);
        if let Some(pair) = fields.windows(2).find(|pair| pair[0].order == pair[1].order) {
            return Err(FormatError::DuplicateOrder {
                entity,
                order: pair[0].order,
                context: None,
            });
        }
        for (expected, field) in (0_u32..).zip(&fields) {
            if field.order != expected {
                return Err(FormatError::NonContiguousOrder {
                    entity,
                    expected,
                    found: field.order,
                    context: None,
                });
            }
        }

        let construction = match (creators.len(), empty) {
            (1, _) => Construction::Creator(creators.remove(0)),
            (0, Some(empty)) => Construction::Setters(empty),
            (0, None) => return Err(FormatError::MissingConstructor { entity, context: None }),
            (count, _) => {
                return Err(FormatError::AmbiguousConstructor { entity, count, context: None });
            },
        };

        debug!(entity, fields = fields.len(), "Built MCF entity metadata");
        Ok(Self { entity, fields, construction })
    }

    pub(crate) fn to_sections(
        &self,
        value: &T,
        registry: &ConversionRegistry,
    ) -> Result<Vec<Section>, FormatError> {
        let text = TypeKey::of::<String>();
        let sections = self
            .fields
            .iter()
            .map(|field| {
                let converted = registry
                    .convert_erased((field.read)(value), field.declared, text)
                    .and_then(|converted| {
                        converted.downcast::<String>().map(|text| *text).map_err(|_| {
                            FormatError::from("string converter produced a foreign type")
                        })
                    })
                    .map_err(|source| self.failure(field.name, source))?;
                Ok(Section::named(field.name, converted))
            })
            .collect::<Result<Vec<_>, FormatError>>()?;

        self.check_count(sections.len())?;
        Ok(sections)
    }

    pub(crate) fn from_sections(
        &self,
        sections: Vec<Section>,
        registry: &ConversionRegistry,
    ) -> Result<T, FormatError> {
        self.check_count(sections.len())?;

        let text = TypeKey::of::<String>();
        let mut values = Vec::with_capacity(self.fields.len());
        for (field, section) in self.fields.iter().zip(sections) {
            let value = registry
                .convert_erased(&section.into_value(), text, field.declared)
                .map_err(|source| self.failure(field.name, source))?;
            values.push((field.name, value));
        }

        match &self.construction {
            Construction::Creator(creator) => creator(&mut Arguments::new(self.entity, values))
                .map_err(|source| self.failure("<creator>", source)),
            Construction::Setters(empty) => {
                let mut entity = empty();
                for (field, (name, value)) in self.fields.iter().zip(values) {
                    let write = field.write.as_ref().ok_or_else(|| {
                        self.failure(name, FormatError::MissingAccessor {
                            entity: self.entity,
                            field: name,
                            context: None,
                        })
                    })?;
                    write(&mut entity, value).map_err(|source| self.failure(name, source))?;
                }
                Ok(entity)
            },
        }
    }

    #[cfg(test)]
    pub(crate) fn fields(&self) -> &[FieldDescriptor<T>] {
        &self.fields
    }

    fn check_count(&self, actual: usize) -> Result<(), FormatError> {
        if actual == self.fields.len() {
            Ok(())
        } else {
            Err(FormatError::SectionCountMismatch {
                entity: self.entity,
                expected: self.fields.len(),
                actual,
                context: None,
            })
        }
    }

    fn failure(&self, field: &'static str, source: FormatError) -> FormatError {
        FormatError::SerializationFailure {
            entity: self.entity,
            field,
            source: Box::new(source),
            context: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile;

    struct Pair {
        left: i32,
        right: String,
    }

    fn pair_schema(orders: [u32; 2]) -> Schema<Pair> {
        Schema::new()
            .field(FieldDescriptor::readonly(orders[0], "left", |p: &Pair| &p.left))
            .field(FieldDescriptor::readonly(orders[1], "right", |p: &Pair| &p.right))
            .creator(|args| Ok(Pair { left: args.take()?, right: args.take()? }))
    }

    #[test]
    fn fields_are_sorted_by_order() {
        let built = EntitySerializer::build(pair_schema([1, 0])).unwrap();
        let names: Vec<_> = built.fields().iter().map(FieldDescriptor::name).collect();
        assert_eq!(names, ["right", "left"]);
    }

    #[test]
    fn orders_must_start_at_zero() {
        let err = EntitySerializer::build(pair_schema([1, 2])).unwrap_err();
        assert!(matches!(err, FormatError::NonContiguousOrder { expected: 0, found: 1, .. }));
    }

    #[test]
    fn duplicate_orders_collide() {
        let err = EntitySerializer::build(pair_schema([0, 0])).unwrap_err();
        assert!(matches!(err, FormatError::DuplicateOrder { order: 0, .. }));
    }

    #[test]
    fn empty_schema_has_no_fields() {
        let err = EntitySerializer::<Pair>::build(Schema::new()).unwrap_err();
        assert!(matches!(err, FormatError::NoSerializableFields { .. }));
    }

    #[test]
    fn construction_must_be_unambiguous() {
        let twice = pair_schema([0, 1]).creator(|_| Err("unused".into()));
        let err = EntitySerializer::build(twice).unwrap_err();
        assert!(matches!(err, FormatError::AmbiguousConstructor { count: 2, .. }));

        let none = Schema::new().field(FieldDescriptor::readonly(0, "left", |p: &Pair| &p.left));
        let err = EntitySerializer::build(none).unwrap_err();
        assert!(matches!(err, FormatError::MissingConstructor { .. }));
    }

    #[test]
    fn creator_wins_over_empty_constructor() {
        let schema = pair_schema([0, 1]).empty(|| Pair { left: 0, right: String::new() });
        let built = EntitySerializer::build(schema).unwrap();
        assert!(matches!(built.construction, Construction::Creator(_)));
    }

    #[test]
    fn sections_round_trip_with_creator() {
        let registry = profile::basic().build();
        let built = EntitySerializer::build(pair_schema([0, 1])).unwrap();

        let sections =
            built.to_sections(&Pair { left: 7, right: "seven".to_owned() }, &registry).unwrap();
        assert_eq!(sections, [Section::named("left", "7"), Section::named("right", "seven")]);

        let restored = built.from_sections(sections, &registry).unwrap();
        assert_eq!((restored.left, restored.right.as_str()), (7, "seven"));
    }

    #[test]
    fn section_count_is_checked_before_conversion() {
        let registry = profile::basic().build();
        let built = EntitySerializer::build(pair_schema([0, 1])).unwrap();

        let Err(err) = built.from_sections(vec![Section::positional("1")], &registry) else {
            panic!("expected a section count mismatch");
        };
        assert!(matches!(err, FormatError::SectionCountMismatch { expected: 2, actual: 1, .. }));
    }
}
