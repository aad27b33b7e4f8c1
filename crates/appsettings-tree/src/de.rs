//! Binding configuration sections into Rust types via serde
//!
//! Every leaf in the tree is a string; [`NodeDeserializer`] converts it on
//! demand into whatever the target type asks for:
//!
//! - booleans match `true`/`false` ignoring case;
//! - numbers are parsed after trimming surrounding whitespace;
//! - unit enum variants match their name ignoring case, or their ordinal;
//! - sequences read children in index order (`0`, `1`, ...);
//! - structs match child keys to field names ignoring case and underscores.
//!
//! An empty leaf requested as any non-string scalar fails with
//! [`Error::EmptyValue`] so callers can treat it as "no value". A section
//! requested as a scalar fails with [`Error::UnexpectedSection`].
//!
//! `Option` is resolved before its inner type is known, so an empty leaf
//! bound to any `Option<_>` is `None`, `Option<String>` included. A plain
//! `String` field still receives `""`.
//!
//! ```
//! use appsettings_tree::{ConfigurationBuilder, de::from_node};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Server {
//!     host: String,
//!     port: u16,
//! }
//!
//! let config = ConfigurationBuilder::new()
//!     .add_json_str(r#"{"Server": {"Host": "localhost", "Port": "8080"}}"#)
//!     .build()
//!     .unwrap();
//!
//! let server: Server = from_node(config.node("server").unwrap(), "server").unwrap();
//! assert_eq!(server.host, "localhost");
//! assert_eq!(server.port, 8080);
//! ```

use crate::node::{Node, Slot};
use crate::path::{combine, keys_equal, parse_index};
use crate::{Error, Result};
use serde::de::value::{BorrowedStrDeserializer, StrDeserializer};
use serde::de::{
    DeserializeOwned, DeserializeSeed, IntoDeserializer, MapAccess, SeqAccess, Visitor,
};

/// Deserialize `T` from the node found at `path`.
///
/// `path` is only used for error messages.
pub fn from_node<T: DeserializeOwned>(node: &Node, path: &str) -> Result<T> {
    T::deserialize(NodeDeserializer::new(node, path.to_string())).map_err(|e| e.at(path))
}

/// A serde deserializer reading from one configuration node.
#[derive(Debug, Clone)]
pub struct NodeDeserializer<'de> {
    node: &'de Node,
    path: String,
}

impl<'de> NodeDeserializer<'de> {
    pub fn new(node: &'de Node, path: String) -> Self {
        Self { node, path }
    }

    fn scalar(&self) -> Result<&'de str> {
        match self.node.value() {
            Some(value) => Ok(value),
            None if self.node.is_null() => {
                Err(Error::coercion(&self.path, "expected a value, found null"))
            }
            None => Err(Error::UnexpectedSection {
                key: self.path.clone(),
            }),
        }
    }

    fn non_empty(&self) -> Result<&'de str> {
        let value = self.scalar()?;
        if value.is_empty() {
            return Err(Error::EmptyValue {
                key: self.path.clone(),
            });
        }
        Ok(value)
    }

    fn invalid(&self, value: &str, expected: &str) -> Error {
        Error::coercion(&self.path, format!("'{value}' is not a valid {expected}"))
    }

    fn ensure_section(&self, expected: &str) -> Result<()> {
        if self.node.value().is_some() && self.node.children().is_empty() {
            return Err(Error::coercion(
                &self.path,
                format!("expected {expected}, found a value"),
            ));
        }
        Ok(())
    }

    fn elements(self) -> Elements<'de> {
        Elements {
            path: self.path,
            iter: self.node.elements().into_iter(),
        }
    }

    fn children(self, fields: Option<&'static [&'static str]>) -> Children<'de> {
        Children {
            path: self.path,
            iter: self.node.children().iter(),
            fields,
            current: None,
        }
    }
}

macro_rules! deserialize_number {
    ($($method:ident => $visit:ident($ty:ty),)*) => {
        $(
            fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
                let value = self.non_empty()?;
                let parsed = value
                    .trim()
                    .parse::<$ty>()
                    .map_err(|_| self.invalid(value, stringify!($ty)))?;
                visitor.$visit(parsed)
            }
        )*
    };
}

impl<'de> serde::Deserializer<'de> for NodeDeserializer<'de> {
    type Error = Error;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let node = self.node;
        if !node.children().is_empty() {
            if node.children().iter().all(|c| parse_index(c.key()).is_some()) {
                return visitor.visit_seq(self.elements());
            }
            return visitor.visit_map(self.children(None));
        }
        match node.slot() {
            Slot::Value(v) => visitor.visit_borrowed_str(v),
            Slot::Null => visitor.visit_none(),
            Slot::Unset => visitor.visit_map(self.children(None)),
        }
    }

    fn deserialize_bool<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let value = self.non_empty()?;
        match value.trim() {
            v if v.eq_ignore_ascii_case("true") => visitor.visit_bool(true),
            v if v.eq_ignore_ascii_case("false") => visitor.visit_bool(false),
            _ => Err(self.invalid(value, "bool")),
        }
    }

    deserialize_number! {
        deserialize_i8 => visit_i8(i8),
        deserialize_i16 => visit_i16(i16),
        deserialize_i32 => visit_i32(i32),
        deserialize_i64 => visit_i64(i64),
        deserialize_i128 => visit_i128(i128),
        deserialize_u8 => visit_u8(u8),
        deserialize_u16 => visit_u16(u16),
        deserialize_u32 => visit_u32(u32),
        deserialize_u64 => visit_u64(u64),
        deserialize_u128 => visit_u128(u128),
        deserialize_f32 => visit_f32(f32),
        deserialize_f64 => visit_f64(f64),
    }

    fn deserialize_char<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let value = self.non_empty()?;
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => visitor.visit_char(c),
            _ => Err(self.invalid(value, "char")),
        }
    }

    fn deserialize_str<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_borrowed_str(self.scalar()?)
    }

    fn deserialize_string<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_str(visitor)
    }

    fn deserialize_bytes<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_borrowed_bytes(self.scalar()?.as_bytes())
    }

    fn deserialize_byte_buf<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_bytes(visitor)
    }

    /// Null and empty leaves are `None` for every inner type.
    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let empty = self.node.value() == Some("") && self.node.children().is_empty();
        if self.node.is_null() || empty {
            return visitor.visit_none();
        }
        visitor.visit_some(self)
    }

    fn deserialize_unit<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_unit()
    }

    fn deserialize_unit_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_unit()
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.ensure_section("a sequence")?;
        visitor.visit_seq(self.elements())
    }

    fn deserialize_tuple<V: Visitor<'de>>(self, _len: usize, visitor: V) -> Result<V::Value> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.ensure_section("a section")?;
        visitor.visit_map(self.children(None))
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        self.ensure_section("a section")?;
        visitor.visit_map(self.children(Some(fields)))
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        let value = self.non_empty()?;
        let trimmed = value.trim();

        let variant = variants
            .iter()
            .find(|v| keys_equal(v, trimmed))
            .or_else(|| parse_index(trimmed).and_then(|i| variants.get(i)))
            .ok_or_else(|| self.invalid(value, name))?;

        let variant: StrDeserializer<'_, Error> = variant.into_deserializer();
        visitor.visit_enum(variant)
    }

    fn deserialize_identifier<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_str(visitor)
    }

    fn deserialize_ignored_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_unit()
    }
}

/// Sequence access over a section's children in index order.
struct Elements<'de> {
    path: String,
    iter: std::vec::IntoIter<&'de Node>,
}

impl<'de> SeqAccess<'de> for Elements<'de> {
    type Error = Error;

    fn next_element_seed<T: DeserializeSeed<'de>>(&mut self, seed: T) -> Result<Option<T::Value>> {
        let Some(node) = self.iter.next() else {
            return Ok(None);
        };
        let path = combine(&self.path, node.key());
        seed.deserialize(NodeDeserializer::new(node, path.clone()))
            .map(Some)
            .map_err(|e| e.at(&path))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

/// Map access over a section's children, optionally matching struct fields.
struct Children<'de> {
    path: String,
    iter: std::slice::Iter<'de, Node>,
    fields: Option<&'static [&'static str]>,
    current: Option<&'de Node>,
}

impl<'de> MapAccess<'de> for Children<'de> {
    type Error = Error;

    fn next_key_seed<K: DeserializeSeed<'de>>(&mut self, seed: K) -> Result<Option<K::Value>> {
        let Some(node) = self.iter.next() else {
            return Ok(None);
        };
        self.current = Some(node);

        let key: &'de str = match self.fields.and_then(|fields| match_field(fields, node.key())) {
            Some(field) => field,
            None => node.key(),
        };

        seed.deserialize(BorrowedStrDeserializer::<Error>::new(key))
            .map(Some)
    }

    fn next_value_seed<V: DeserializeSeed<'de>>(&mut self, seed: V) -> Result<V::Value> {
        let node = self
            .current
            .take()
            .ok_or_else(|| Error::coercion(&self.path, "value requested before key"))?;
        let path = combine(&self.path, node.key());
        seed.deserialize(NodeDeserializer::new(node, path.clone()))
            .map_err(|e| e.at(&path))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

/// Find the struct field a configuration key binds to.
///
/// Keys match ignoring case, then ignoring case and underscores so that
/// `MaxRetries` binds to `max_retries`.
fn match_field(fields: &'static [&'static str], key: &str) -> Option<&'static str> {
    fields
        .iter()
        .find(|f| keys_equal(f, key))
        .or_else(|| {
            let wanted = squash(key);
            fields.iter().find(|f| squash(f) == wanted)
        })
        .copied()
}

fn squash(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}
