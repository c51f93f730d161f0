use std::cell::{
    RefCell, RefMut
};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::debug;

use super::managererror::ManagerError;
use super::namedobject::NamedJsonObject;

/// A registry of named objects built from JSON definitions.
pub trait IManager<V> where
    V: Clone {
    fn map(&self) -> RefMut<'_, HashMap<String, V>>;

    fn insert_obj_from_json(&self, json_value: serde_json::Value) -> Result<(), ManagerError>;

    fn get(&self, name: &str) -> Result<V, ManagerError> {
        let map = self.map();
        map.get(name)
            .cloned()
            .ok_or_else(|| ManagerError::map_elem_not_found(name))
    }

    fn contains(&self, name: &str) -> bool {
        self.map().contains_key(name)
    }

    /// Registered names in ascending order.
    fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.map().keys().cloned().collect();
        names.sort();
        names
    }

    fn insert_obj_from_json_vec(&self, json_vec: &[serde_json::Value]) -> Result<(), ManagerError> {
        for j in json_vec.iter() {
            self.insert_obj_from_json(j.clone())?;
        }
        Ok(())
    }

    fn from_reader(&self, file_path: &Path) -> Result<(), ManagerError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let json_value: serde_json::Value = serde_json::from_reader(reader)?;
        if json_value.is_array() {
            let json_array: Vec<serde_json::Value> = ManagerError::from_json_or_json_parse_error(json_value)?;
            self.insert_obj_from_json_vec(&json_array)
        } else {
            self.insert_obj_from_json(json_value)
        }
    }
}


pub struct Manager<V> {
    map_cell: RefCell<HashMap<String, V>>,
    get_obj_from_json: fn(serde_json::Value) -> Result<V, ManagerError>
}


impl<V> Manager<V> where
    V: Clone {
    pub fn new(get_obj_from_json: fn(serde_json::Value) -> Result<V, ManagerError>) -> Manager<V> {
        Manager { map_cell: RefCell::new(HashMap::new()), get_obj_from_json }
    }

    pub fn len(&self) -> usize {
        self.map_cell.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.map_cell.borrow().is_empty()
    }
}

impl<V> IManager<V> for Manager<V> where
    V: Clone {
    fn map(&self) -> RefMut<'_, HashMap<String, V>> {
        self.map_cell.borrow_mut()
    }

    fn insert_obj_from_json(&self, json_value: serde_json::Value) -> Result<(), ManagerError> {
        let named_object: NamedJsonObject = ManagerError::from_json_or_json_parse_error(json_value.clone())?;
        let v = (self.get_obj_from_json)(json_value)?;
        debug!(name = named_object.name(), "registered object");
        // a later definition replaces an earlier one with the same name
        self.map().insert(named_object.name().to_owned(), v);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Deserialize)]
    struct Counter {
        start: u32
    }

    fn counter_from_json(json: serde_json::Value) -> Result<u32, ManagerError> {
        let counter: Counter = ManagerError::from_json_or_json_parse_error(json)?;
        Ok(counter.start)
    }

    #[test]
    fn insert_and_get() {
        let manager = Manager::new(counter_from_json);
        let json = serde_json::json!([
            {"name": "b", "start": 2},
            {"name": "a", "start": 1}
        ]);
        let entries: Vec<serde_json::Value> = serde_json::from_value(json).unwrap();
        manager.insert_obj_from_json_vec(&entries).unwrap();
        assert_eq!(manager.get("a").unwrap(), 1);
        assert_eq!(manager.names(), vec!["a".to_owned(), "b".to_owned()]);
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn missing_name_is_reported() {
        let manager = Manager::new(counter_from_json);
        assert!(matches!(manager.get("x"), Err(ManagerError::NameNotFoundError(name)) if name == "x"));
    }

    #[test]
    fn entry_without_name_is_rejected() {
        let manager = Manager::new(counter_from_json);
        let result = manager.insert_obj_from_json(serde_json::json!({"start": 3}));
        assert!(matches!(result, Err(ManagerError::JsonParseError(_))));
        assert!(manager.is_empty());
    }
}
