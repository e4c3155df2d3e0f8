//! Conversions between record field types and [`PropertyValues`].
//!
//! Each supported scalar comes in three shapes, which decide how absence is
//! handled:
//! - `T`: a required field; writing always emits one value, reading an
//!   absent property fails.
//! - `Option<T>`: `None` is written as no property and read back from one.
//! - `Vec<T>`: an empty vector is written as no property; an absent
//!   property reads back as an empty vector. Order is preserved both ways.

use schemadoc_model::{PropertyValues, ValueKind};
use thiserror::Error;

/// Why a property could not be converted into a field value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    #[error("no value present")]
    Missing,

    #[error("property holds {found} values")]
    WrongKind { found: ValueKind },

    #[error("{0} values present, expected at most one")]
    TooMany(usize),
}

/// A field type that can be written to a document property.
pub trait IntoPropertyValues {
    /// The values to store, or `None` when the field is absent or empty and
    /// no property should be written.
    fn to_property_values(&self) -> Option<PropertyValues>;
}

/// A field type that can be rebuilt from a document property.
pub trait FromPropertyValues: Sized {
    /// The value kind this field type reads.
    const KIND: ValueKind;

    /// Converts the property's values; `None` when the property is absent.
    fn from_property_values(values: Option<&PropertyValues>) -> Result<Self, ConvertError>;
}

macro_rules! scalar_conversions {
    ($ty:ty, $variant:ident) => {
        impl IntoPropertyValues for $ty {
            fn to_property_values(&self) -> Option<PropertyValues> {
                Some(PropertyValues::$variant(vec![self.clone()]))
            }
        }

        impl IntoPropertyValues for Option<$ty> {
            fn to_property_values(&self) -> Option<PropertyValues> {
                self.as_ref()
                    .map(|value| PropertyValues::$variant(vec![value.clone()]))
            }
        }

        impl IntoPropertyValues for Vec<$ty> {
            fn to_property_values(&self) -> Option<PropertyValues> {
                if self.is_empty() {
                    None
                } else {
                    Some(PropertyValues::$variant(self.clone()))
                }
            }
        }

        impl FromPropertyValues for $ty {
            const KIND: ValueKind = ValueKind::$variant;

            fn from_property_values(values: Option<&PropertyValues>) -> Result<Self, ConvertError> {
                match values {
                    None => Err(ConvertError::Missing),
                    Some(PropertyValues::$variant(v)) => match v.as_slice() {
                        [] => Err(ConvertError::Missing),
                        [one] => Ok(one.clone()),
                        many => Err(ConvertError::TooMany(many.len())),
                    },
                    Some(other) => Err(ConvertError::WrongKind { found: other.kind() }),
                }
            }
        }

        impl FromPropertyValues for Option<$ty> {
            const KIND: ValueKind = ValueKind::$variant;

            fn from_property_values(values: Option<&PropertyValues>) -> Result<Self, ConvertError> {
                match values {
                    None => Ok(None),
                    Some(PropertyValues::$variant(v)) => match v.as_slice() {
                        [] => Ok(None),
                        [one] => Ok(Some(one.clone())),
                        many => Err(ConvertError::TooMany(many.len())),
                    },
                    Some(other) => Err(ConvertError::WrongKind { found: other.kind() }),
                }
            }
        }

        impl FromPropertyValues for Vec<$ty> {
            const KIND: ValueKind = ValueKind::$variant;

            fn from_property_values(values: Option<&PropertyValues>) -> Result<Self, ConvertError> {
                match values {
                    None => Ok(Vec::new()),
                    Some(PropertyValues::$variant(v)) => Ok(v.clone()),
                    Some(other) => Err(ConvertError::WrongKind { found: other.kind() }),
                }
            }
        }
    };
}

scalar_conversions!(String, String);
scalar_conversions!(i64, Long);
scalar_conversions!(f64, Double);
scalar_conversions!(bool, Boolean);
scalar_conversions!(Vec<u8>, Bytes);

impl IntoPropertyValues for str {
    fn to_property_values(&self) -> Option<PropertyValues> {
        Some(PropertyValues::String(vec![self.to_string()]))
    }
}
