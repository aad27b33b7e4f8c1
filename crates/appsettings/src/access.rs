//! Typed accessors over a configuration tree
//!
//! Every accessor returns `Ok(None)` when the key is missing or explicitly
//! null, and an error only when a value cannot be converted to the requested
//! type. Values are read fresh from the tree on every call.

use appsettings_tree::de::from_node;
use appsettings_tree::path::combine;
use appsettings_tree::{Configuration, Error, Node, Result};
use serde::de::DeserializeOwned;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Returns a single setting value for `key` converted to `T`.
///
/// Missing keys, nulls and sections yield `Ok(None)`. An empty string yields
/// `Some("")` for `String` but `None` for every other type (numbers,
/// booleans, enums).
///
/// ```
/// use appsettings::{get_value, load};
///
/// let config = load::from_json_string(r#"{"Retries": "3", "Name": ""}"#).unwrap();
///
/// assert_eq!(get_value::<u32>(&config, "retries").unwrap(), Some(3));
/// assert_eq!(get_value::<String>(&config, "name").unwrap(), Some(String::new()));
/// assert_eq!(get_value::<u32>(&config, "missing").unwrap(), None);
/// ```
pub fn get_value<T: DeserializeOwned>(config: &Configuration, key: &str) -> Result<Option<T>> {
    let Some(node) = config.node(key) else {
        return Ok(None);
    };
    if node.value().is_none() {
        return Ok(None);
    }
    convert(node, key)
}

/// Returns the section at `key` as an array of `T` in index order.
pub fn get_array_value<T: DeserializeOwned>(
    config: &Configuration,
    key: &str,
) -> Result<Option<Box<[T]>>> {
    Ok(get_list_value(config, key)?.map(Vec::into_boxed_slice))
}

/// Returns the section at `key` as a list of `T` in index order.
///
/// A section with no children yields an empty list. Elements that convert
/// to "no value" (nulls, empty strings for non-string types) are skipped.
pub fn get_list_value<T: DeserializeOwned>(
    config: &Configuration,
    key: &str,
) -> Result<Option<Vec<T>>> {
    let Some(node) = section(config, key)? else {
        return Ok(None);
    };

    node.elements()
        .into_iter()
        .filter_map(|element| convert_entry(element, &combine(key, element.key())).transpose())
        .collect::<Result<Vec<T>>>()
        .map(Some)
}

/// Returns the section at `key` as a set of distinct `T`.
pub fn get_hash_set_value<T>(config: &Configuration, key: &str) -> Result<Option<HashSet<T>>>
where
    T: DeserializeOwned + Eq + Hash,
{
    Ok(get_list_value(config, key)?.map(|list| list.into_iter().collect()))
}

/// Returns the immediate children of the section at `key` as a map from
/// child key to converted value.
///
/// Only string keys are supported. Each value follows the rules of
/// [`get_value`], so a null child maps to `None`.
pub fn to_dictionary<V: DeserializeOwned>(
    config: &Configuration,
    key: &str,
) -> Result<Option<HashMap<String, Option<V>>>> {
    let Some(node) = section(config, key)? else {
        return Ok(None);
    };

    node.children()
        .iter()
        .map(|child| -> Result<(String, Option<V>)> {
            let value = convert_entry(child, &combine(key, child.key()))?;
            Ok((child.key().to_string(), value))
        })
        .collect::<Result<HashMap<_, _>>>()
        .map(Some)
}

/// Binds the whole section (or value) at `key` into `T`.
///
/// Works for structs, nested collections and anything else implementing
/// `Deserialize`; struct fields match keys ignoring case.
///
/// Unlike [`get_value`], an empty string bound to an `Option<String>` field
/// is `None`; a plain `String` field gets `""`.
pub fn bind<T: DeserializeOwned>(config: &Configuration, key: &str) -> Result<Option<T>> {
    let Some(node) = config.node(key) else {
        return Ok(None);
    };
    if node.is_null() {
        return Ok(None);
    }

    match from_node(node, key) {
        Ok(value) => Ok(Some(value)),
        Err(Error::EmptyValue { key: at }) if at == key => Ok(None),
        Err(Error::EmptyValue { key: at }) => Err(Error::coercion(at, "value is empty")),
        Err(e) => Err(e),
    }
}

/// Resolve `key` as an enumerable section; `None` when missing or null.
fn section<'a>(config: &'a Configuration, key: &str) -> Result<Option<&'a Node>> {
    let Some(node) = config.node(key) else {
        return Ok(None);
    };
    if node.is_null() {
        return Ok(None);
    }
    if !node.is_section() {
        return Err(Error::coercion(key, "expected a section, found a value"));
    }
    Ok(Some(node))
}

/// Convert a collection element or dictionary entry.
///
/// Empty nodes, and sections requested as a scalar, are `None` as in
/// [`get_value`]; sections still bind into structs and collections.
fn convert_entry<T: DeserializeOwned>(node: &Node, key: &str) -> Result<Option<T>> {
    if node.value().is_none() && node.children().is_empty() {
        return Ok(None);
    }
    match convert(node, key) {
        Err(Error::UnexpectedSection { key: at }) if at == key => Ok(None),
        other => other,
    }
}

fn convert<T: DeserializeOwned>(node: &Node, key: &str) -> Result<Option<T>> {
    match from_node(node, key) {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_empty_value() => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Endpoint {
        host: String,
        port: u16,
    }

    #[test]
    fn test_get_value_on_section_is_none() {
        let config = load::from_json_string(r#"{"a": {"b": 1}}"#).unwrap();
        assert_eq!(get_value::<String>(&config, "a").unwrap(), None);
    }

    #[test]
    fn test_list_of_structs() {
        let config = load::from_json_string(
            r#"{"Endpoints": [{"Host": "a", "Port": 1}, {"Host": "b", "Port": "2"}]}"#,
        )
        .unwrap();

        let endpoints = get_list_value::<Endpoint>(&config, "endpoints").unwrap().unwrap();
        assert_eq!(
            endpoints,
            vec![
                Endpoint { host: "a".into(), port: 1 },
                Endpoint { host: "b".into(), port: 2 },
            ]
        );
    }

    #[test]
    fn test_list_skips_empty_elements() {
        let config = load::from_json_string(r#"{"a": [1, "", null, 2]}"#).unwrap();
        assert_eq!(get_list_value::<i32>(&config, "a").unwrap(), Some(vec![1, 2]));
        assert_eq!(
            get_list_value::<String>(&config, "a").unwrap(),
            Some(vec!["1".to_string(), String::new(), "2".to_string()])
        );
    }

    #[test]
    fn test_list_from_value_is_error() {
        let config = load::from_json_string(r#"{"a": "x"}"#).unwrap();
        let err = get_list_value::<String>(&config, "a").unwrap_err();
        assert!(matches!(err, Error::Coercion { ref key, .. } if key == "a"));
    }

    #[test]
    fn test_bind_struct() {
        let config = load::from_json_string(r#"{"Db": {"Host": "h", "Port": "5432"}}"#).unwrap();
        let endpoint = bind::<Endpoint>(&config, "db").unwrap();
        assert_eq!(endpoint, Some(Endpoint { host: "h".into(), port: 5432 }));
        assert_eq!(bind::<Endpoint>(&config, "missing").unwrap(), None);
    }

    #[test]
    fn test_bind_nested_empty_is_error() {
        let config = load::from_json_string(r#"{"Db": {"Host": "h", "Port": ""}}"#).unwrap();
        let err = bind::<Endpoint>(&config, "db").unwrap_err();
        assert!(matches!(err, Error::Coercion { ref key, .. } if key == "db:Port"), "{err}");
    }

    #[test]
    fn test_bind_top_level_empty_is_none() {
        let config = load::from_json_string(r#"{"a": ""}"#).unwrap();
        assert_eq!(bind::<i32>(&config, "a").unwrap(), None);
    }
}
