use crate::{PropertyReader, PropertyWriter};
use schemadoc_model::{MappingResult, Schema};
use std::any::TypeId;
use std::collections::{BTreeMap, HashSet, VecDeque};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A record type that maps to a schema-tagged document.
///
/// Implementations describe the schema once and then read or write each
/// field by property name; [`crate::DocumentMapper`] takes care of
/// validation, absence handling and nesting.
///
/// ```ignore
/// impl DocumentClass for Gift {
///     const SCHEMA_NAME: &'static str = "Gift";
///
///     fn schema() -> MappingResult<Schema> {
///         Schema::builder(Self::SCHEMA_NAME)
///             .add_property(PropertyConfig::string("from", Cardinality::Repeated))
///             .build()
///     }
///
///     fn namespace(&self) -> &str { &self.namespace }
///     fn id(&self) -> &str { &self.id }
///
///     fn write_properties(&self, writer: &mut PropertyWriter<'_>) -> MappingResult<()> {
///         writer.put("from", &self.from)
///     }
///
///     fn read_properties(reader: &PropertyReader<'_>) -> MappingResult<Self> {
///         Ok(Self {
///             namespace: reader.namespace().to_string(),
///             id: reader.id().to_string(),
///             from: reader.get("from")?,
///         })
///     }
/// }
/// ```
pub trait DocumentClass: Sized + 'static {
    /// Schema type name; must equal the name of [`DocumentClass::schema`].
    const SCHEMA_NAME: &'static str;

    /// Builds the schema describing this record type.
    fn schema() -> MappingResult<Schema>;

    /// Record types referenced directly through nested-document properties.
    fn direct_dependencies() -> Vec<ClassDescriptor> {
        Vec::new()
    }

    fn namespace(&self) -> &str;

    fn id(&self) -> &str;

    /// Writes every field to its property.
    fn write_properties(&self, writer: &mut PropertyWriter<'_>) -> MappingResult<()>;

    /// Rebuilds a record from a validated document.
    fn read_properties(reader: &PropertyReader<'_>) -> MappingResult<Self>;
}

/// Type-erased description of a [`DocumentClass`] implementation.
///
/// Two descriptors are equal when they describe the same Rust type.
#[derive(Clone, Copy)]
pub struct ClassDescriptor {
    type_id: TypeId,
    type_name: &'static str,
    schema_name: &'static str,
    schema_fn: fn() -> MappingResult<Schema>,
    dependencies_fn: fn() -> Vec<ClassDescriptor>,
}

impl ClassDescriptor {
    #[must_use]
    pub fn of<T: DocumentClass>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            schema_name: T::SCHEMA_NAME,
            schema_fn: T::schema,
            dependencies_fn: T::direct_dependencies,
        }
    }

    #[must_use]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Fully qualified Rust type name.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[must_use]
    pub const fn schema_name(&self) -> &'static str {
        self.schema_name
    }

    /// Builds the described type's schema.
    pub fn schema(&self) -> MappingResult<Schema> {
        (self.schema_fn)()
    }

    #[must_use]
    pub fn direct_dependencies(&self) -> Vec<Self> {
        (self.dependencies_fn)()
    }

    #[must_use]
    pub fn is<T: DocumentClass>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }
}

impl PartialEq for ClassDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for ClassDescriptor {}

impl Hash for ClassDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for ClassDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassDescriptor")
            .field("type_name", &self.type_name)
            .field("schema_name", &self.schema_name)
            .finish()
    }
}

/// Every record type reachable from `root` through nested-document
/// properties, breadth-first, each type once. `root` itself is excluded even
/// when the graph loops back to it.
#[must_use]
pub fn transitive_dependencies(root: ClassDescriptor) -> Vec<ClassDescriptor> {
    let mut seen = HashSet::from([root.type_id]);
    let mut queue: VecDeque<ClassDescriptor> = root.direct_dependencies().into();
    let mut found = Vec::new();
    while let Some(next) = queue.pop_front() {
        if seen.insert(next.type_id) {
            queue.extend(next.direct_dependencies());
            found.push(next);
        }
    }
    found
}

/// Schema names mapped to the record types able to materialize them.
///
/// Passed to [`crate::DocumentMapper::from_generic_document`] so nested
/// documents can be resolved; a nested schema absent from the map fails
/// with [`schemadoc_model::MappingError::MissingDependency`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentClassMap {
    classes: BTreeMap<String, Vec<String>>,
}

impl DocumentClassMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// A map covering `T` and every type it transitively depends on.
    #[must_use]
    pub fn for_class<T: DocumentClass>() -> Self {
        let root = ClassDescriptor::of::<T>();
        let mut map = Self::new();
        for descriptor in std::iter::once(root).chain(transitive_dependencies(root)) {
            map.insert(descriptor.schema_name(), descriptor.type_name());
        }
        map
    }

    /// Records that `type_name` can materialize `schema_name`. Repeated
    /// inserts of the same pair are ignored.
    pub fn insert(&mut self, schema_name: &str, type_name: &str) {
        let names = self.classes.entry(schema_name.to_string()).or_default();
        if !names.iter().any(|n| n == type_name) {
            names.push(type_name.to_string());
        }
    }

    #[must_use]
    pub fn contains_schema(&self, schema_name: &str) -> bool {
        self.classes.contains_key(schema_name)
    }

    /// Type names registered for `schema_name`, in insertion order.
    #[must_use]
    pub fn class_names(&self, schema_name: &str) -> Option<&[String]> {
        self.classes.get(schema_name).map(Vec::as_slice)
    }

    pub fn schema_names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
