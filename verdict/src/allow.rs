use serde_json::Value;

/// Job names exempted from the "must succeed" rule.
///
/// Accepts either a JSON array of strings or a comma-separated list, which
/// is how workflow authors tend to write the action inputs by hand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList {
    names: Vec<String>,
}

impl AllowList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(raw: &str) -> Self {
        let mut list = Self::new();

        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Null) => {}
            Ok(Value::Array(items)) if items.iter().all(Value::is_string) => {
                for item in items.iter().filter_map(Value::as_str) {
                    list.insert(item);
                }
            }
            _ => {
                for item in raw.split(',') {
                    list.insert(item);
                }
            }
        }

        list
    }

    /// Add a name; blank names and repeats are dropped.
    pub fn insert(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() || self.contains(name) {
            return;
        }
        self.names.push(name.to_string());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for AllowList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = Self::new();
        for name in iter {
            list.insert(name.as_ref());
        }
        list
    }
}
