//! Record types shared by the mapper tests.

#![allow(dead_code)]

use schemadoc_mapper::{
    Cardinality, ClassDescriptor, DocumentClass, MappingResult, PropertyConfig, PropertyReader,
    PropertyWriter, Schema,
};
use schemadoc_model::{LongIndexing, StringOptions};

/// A gift with only a repeated string field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Gift {
    pub namespace: String,
    pub id: String,
    pub from: Vec<String>,
}

impl DocumentClass for Gift {
    const SCHEMA_NAME: &'static str = "Gift";

    fn schema() -> MappingResult<Schema> {
        Schema::builder(Self::SCHEMA_NAME)
            .add_property(PropertyConfig::string("from", Cardinality::Repeated))
            .build()
    }

    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn write_properties(&self, writer: &mut PropertyWriter<'_>) -> MappingResult<()> {
        writer.put("from", &self.from)
    }

    fn read_properties(reader: &PropertyReader<'_>) -> MappingResult<Self> {
        Ok(Self {
            namespace: reader.namespace().to_string(),
            id: reader.id().to_string(),
            from: reader.get("from")?,
        })
    }
}

/// A person covering every scalar kind and shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Person {
    pub namespace: String,
    pub id: String,
    pub name: String,
    pub age: Option<i64>,
    pub nicknames: Vec<String>,
    pub avatar: Option<Vec<u8>>,
    pub rating: Option<f64>,
    pub verified: Option<bool>,
    pub lucky_numbers: Vec<i64>,
}

impl Person {
    pub fn named(id: &str, name: &str) -> Self {
        Self {
            namespace: "people".into(),
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }
}

pub fn person_schema() -> MappingResult<Schema> {
    Schema::builder("Person")
        .add_property(PropertyConfig::string_with(
            "name",
            Cardinality::Required,
            StringOptions::searchable(),
        ))
        .add_property(PropertyConfig::long_with("age", Cardinality::Optional, LongIndexing::Range))
        .add_property(PropertyConfig::string("nicknames", Cardinality::Repeated))
        .add_property(PropertyConfig::bytes("avatar", Cardinality::Optional))
        .add_property(PropertyConfig::double("rating", Cardinality::Optional))
        .add_property(PropertyConfig::boolean("verified", Cardinality::Optional))
        .add_property(PropertyConfig::long("lucky_numbers", Cardinality::Repeated))
        .build()
}

impl DocumentClass for Person {
    const SCHEMA_NAME: &'static str = "Person";

    fn schema() -> MappingResult<Schema> {
        person_schema()
    }

    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn write_properties(&self, writer: &mut PropertyWriter<'_>) -> MappingResult<()> {
        writer.put("name", &self.name)?;
        writer.put("age", &self.age)?;
        writer.put("nicknames", &self.nicknames)?;
        writer.put("avatar", &self.avatar)?;
        writer.put("rating", &self.rating)?;
        writer.put("verified", &self.verified)?;
        writer.put("lucky_numbers", &self.lucky_numbers)
    }

    fn read_properties(reader: &PropertyReader<'_>) -> MappingResult<Self> {
        Ok(Self {
            namespace: reader.namespace().to_string(),
            id: reader.id().to_string(),
            name: reader.get("name")?,
            age: reader.get("age")?,
            nicknames: reader.get("nicknames")?,
            avatar: reader.get("avatar")?,
            rating: reader.get("rating")?,
            verified: reader.get("verified")?,
            lucky_numbers: reader.get("lucky_numbers")?,
        })
    }
}

/// A present that nests people.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Present {
    pub namespace: String,
    pub id: String,
    pub title: String,
    pub sender: Option<Person>,
    pub recipients: Vec<Person>,
}

impl DocumentClass for Present {
    const SCHEMA_NAME: &'static str = "Present";

    fn schema() -> MappingResult<Schema> {
        Schema::builder(Self::SCHEMA_NAME)
            .add_property(PropertyConfig::string("title", Cardinality::Required))
            .add_property(PropertyConfig::document("sender", "Person", Cardinality::Optional))
            .add_property(PropertyConfig::document_with(
                "recipients",
                "Person",
                Cardinality::Repeated,
                true,
            ))
            .build()
    }

    fn direct_dependencies() -> Vec<ClassDescriptor> {
        vec![ClassDescriptor::of::<Person>()]
    }

    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn write_properties(&self, writer: &mut PropertyWriter<'_>) -> MappingResult<()> {
        writer.put("title", &self.title)?;
        writer.put_document("sender", self.sender.as_ref())?;
        writer.put_documents("recipients", &self.recipients)
    }

    fn read_properties(reader: &PropertyReader<'_>) -> MappingResult<Self> {
        Ok(Self {
            namespace: reader.namespace().to_string(),
            id: reader.id().to_string(),
            title: reader.get("title")?,
            sender: reader.document("sender")?,
            recipients: reader.documents("recipients")?,
        })
    }
}

/// A self-referencing tree node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Category {
    pub namespace: String,
    pub id: String,
    pub label: String,
    pub children: Vec<Category>,
    pub owner: Option<Person>,
}

impl Category {
    pub fn leaf(id: &str) -> Self {
        Self {
            namespace: "tree".into(),
            id: id.into(),
            label: id.to_uppercase(),
            ..Self::default()
        }
    }

    /// A straight chain `depth` levels below the root.
    pub fn chain(depth: usize) -> Self {
        (0..depth).fold(Self::leaf("bottom"), |child, level| Self {
            children: vec![child],
            ..Self::leaf(&format!("level-{level}"))
        })
    }
}

impl DocumentClass for Category {
    const SCHEMA_NAME: &'static str = "Category";

    fn schema() -> MappingResult<Schema> {
        Schema::builder(Self::SCHEMA_NAME)
            .add_property(PropertyConfig::string("label", Cardinality::Required))
            .add_property(PropertyConfig::document("children", "Category", Cardinality::Repeated))
            .add_property(PropertyConfig::document("owner", "Person", Cardinality::Optional))
            .build()
    }

    fn direct_dependencies() -> Vec<ClassDescriptor> {
        vec![
            ClassDescriptor::of::<Category>(),
            ClassDescriptor::of::<Person>(),
        ]
    }

    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn write_properties(&self, writer: &mut PropertyWriter<'_>) -> MappingResult<()> {
        writer.put("label", &self.label)?;
        writer.put_documents("children", &self.children)?;
        writer.put_document("owner", self.owner.as_ref())
    }

    fn read_properties(reader: &PropertyReader<'_>) -> MappingResult<Self> {
        Ok(Self {
            namespace: reader.namespace().to_string(),
            id: reader.id().to_string(),
            label: reader.get("label")?,
            children: reader.documents("children")?,
            owner: reader.document("owner")?,
        })
    }
}

/// Declares the `Person` schema identically to [`Person`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contact {
    pub namespace: String,
    pub id: String,
    pub name: String,
}

impl DocumentClass for Contact {
    const SCHEMA_NAME: &'static str = "Person";

    fn schema() -> MappingResult<Schema> {
        person_schema()
    }

    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn write_properties(&self, writer: &mut PropertyWriter<'_>) -> MappingResult<()> {
        writer.put("name", &self.name)
    }

    fn read_properties(reader: &PropertyReader<'_>) -> MappingResult<Self> {
        Ok(Self {
            namespace: reader.namespace().to_string(),
            id: reader.id().to_string(),
            name: reader.get("name")?,
        })
    }
}

/// Declares a different `Person` schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegacyPerson {
    pub namespace: String,
    pub id: String,
    pub name: Option<String>,
}

impl DocumentClass for LegacyPerson {
    const SCHEMA_NAME: &'static str = "Person";

    fn schema() -> MappingResult<Schema> {
        Schema::builder(Self::SCHEMA_NAME)
            .add_property(PropertyConfig::string("name", Cardinality::Optional))
            .build()
    }

    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn write_properties(&self, writer: &mut PropertyWriter<'_>) -> MappingResult<()> {
        writer.put("name", &self.name)
    }

    fn read_properties(reader: &PropertyReader<'_>) -> MappingResult<Self> {
        Ok(Self {
            namespace: reader.namespace().to_string(),
            id: reader.id().to_string(),
            name: reader.get("name")?,
        })
    }
}

/// Nests [`LegacyPerson`], so registering it next to [`Present`] conflicts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Letter {
    pub namespace: String,
    pub id: String,
    pub author: Option<LegacyPerson>,
}

impl DocumentClass for Letter {
    const SCHEMA_NAME: &'static str = "Letter";

    fn schema() -> MappingResult<Schema> {
        Schema::builder(Self::SCHEMA_NAME)
            .add_property(PropertyConfig::document("author", "Person", Cardinality::Optional))
            .build()
    }

    fn direct_dependencies() -> Vec<ClassDescriptor> {
        vec![ClassDescriptor::of::<LegacyPerson>()]
    }

    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn write_properties(&self, writer: &mut PropertyWriter<'_>) -> MappingResult<()> {
        writer.put_document("author", self.author.as_ref())
    }

    fn read_properties(reader: &PropertyReader<'_>) -> MappingResult<Self> {
        Ok(Self {
            namespace: reader.namespace().to_string(),
            id: reader.id().to_string(),
            author: reader.document("author")?,
        })
    }
}

/// Writes a number into a property declared as string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Counter {
    pub namespace: String,
    pub id: String,
    pub count: i64,
}

impl DocumentClass for Counter {
    const SCHEMA_NAME: &'static str = "Counter";

    fn schema() -> MappingResult<Schema> {
        Schema::builder(Self::SCHEMA_NAME)
            .add_property(PropertyConfig::string("count", Cardinality::Optional))
            .build()
    }

    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn write_properties(&self, writer: &mut PropertyWriter<'_>) -> MappingResult<()> {
        writer.put("count", &self.count)
    }

    fn read_properties(reader: &PropertyReader<'_>) -> MappingResult<Self> {
        Ok(Self {
            namespace: reader.namespace().to_string(),
            id: reader.id().to_string(),
            count: reader.get("count")?,
        })
    }
}

/// Claims one schema name but builds another.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mislabeled {
    pub namespace: String,
    pub id: String,
}

impl DocumentClass for Mislabeled {
    const SCHEMA_NAME: &'static str = "Expected";

    fn schema() -> MappingResult<Schema> {
        Schema::builder("Actual").build()
    }

    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn write_properties(&self, _writer: &mut PropertyWriter<'_>) -> MappingResult<()> {
        Ok(())
    }

    fn read_properties(reader: &PropertyReader<'_>) -> MappingResult<Self> {
        Ok(Self {
            namespace: reader.namespace().to_string(),
            id: reader.id().to_string(),
        })
    }
}

/// Keeps a required field optional on the record side so absence can reach
/// the mapper.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ticket {
    pub namespace: String,
    pub id: String,
    pub code: Option<String>,
    pub seats: Vec<i64>,
}

impl DocumentClass for Ticket {
    const SCHEMA_NAME: &'static str = "Ticket";

    fn schema() -> MappingResult<Schema> {
        Schema::builder(Self::SCHEMA_NAME)
            .add_property(PropertyConfig::string("code", Cardinality::Required))
            .add_property(PropertyConfig::long("seats", Cardinality::Optional))
            .build()
    }

    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn write_properties(&self, writer: &mut PropertyWriter<'_>) -> MappingResult<()> {
        writer.put("code", &self.code)?;
        writer.put("seats", &self.seats)
    }

    fn read_properties(reader: &PropertyReader<'_>) -> MappingResult<Self> {
        Ok(Self {
            namespace: reader.namespace().to_string(),
            id: reader.id().to_string(),
            code: reader.get("code")?,
            seats: reader.get("seats")?,
        })
    }
}

/// Writes its one property twice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Echo {
    pub namespace: String,
    pub id: String,
    pub first: Option<String>,
    pub second: Option<String>,
}

impl DocumentClass for Echo {
    const SCHEMA_NAME: &'static str = "Echo";

    fn schema() -> MappingResult<Schema> {
        Schema::builder(Self::SCHEMA_NAME)
            .add_property(PropertyConfig::string("word", Cardinality::Optional))
            .build()
    }

    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn write_properties(&self, writer: &mut PropertyWriter<'_>) -> MappingResult<()> {
        writer.put("word", &self.first)?;
        writer.put("word", &self.second)
    }

    fn read_properties(reader: &PropertyReader<'_>) -> MappingResult<Self> {
        Ok(Self {
            namespace: reader.namespace().to_string(),
            id: reader.id().to_string(),
            first: reader.get("word")?,
            second: None,
        })
    }
}
