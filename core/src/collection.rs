//! Chainable wrapper over the `data` items of a response.

use std::ops::Index;

use serde_json::Value;

/// Ordered JSON items with map/filter/reduce style helpers.
///
/// ```
/// use serde_json::json;
/// use statamic_rest::Collection;
///
/// let posts = Collection::from(vec![
///     json!({"title": "A", "published": true}),
///     json!({"title": "B", "published": false}),
/// ]);
/// let titles = posts.where_eq("published", true).pluck("title");
/// assert_eq!(titles.into_vec(), vec![json!("A")]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    items: Vec<Value>,
}

impl Collection {
    pub fn new(items: Vec<Value>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn first(&self) -> Option<&Value> {
        self.items.first()
    }

    pub fn last(&self) -> Option<&Value> {
        self.items.last()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    pub fn map<F>(self, f: F) -> Self
    where
        F: FnMut(Value) -> Value,
    {
        self.items.into_iter().map(f).collect()
    }

    pub fn filter<F>(self, mut predicate: F) -> Self
    where
        F: FnMut(&Value) -> bool,
    {
        self.items.into_iter().filter(|v| predicate(v)).collect()
    }

    pub fn reduce<A, F>(self, init: A, f: F) -> A
    where
        F: FnMut(A, Value) -> A,
    {
        self.items.into_iter().fold(init, f)
    }

    /// Value of `key` from every item; items without it yield `null`.
    pub fn pluck(self, key: &str) -> Self {
        self.map(|item| item.get(key).cloned().unwrap_or(Value::Null))
    }

    /// Items whose `key` equals `value`.
    pub fn where_eq(self, key: &str, value: impl Into<Value>) -> Self {
        let value = value.into();
        self.filter(|item| item.get(key) == Some(&value))
    }

    /// Stable sort by the value of `key`. Strings and numbers compare
    /// naturally; items missing the key sort first.
    pub fn sort_by_key(mut self, key: &str) -> Self {
        self.items.sort_by(|a, b| compare(a.get(key), b.get(key)));
        self
    }

    pub fn take(self, n: usize) -> Self {
        self.items.into_iter().take(n).collect()
    }

    pub fn into_vec(self) -> Vec<Value> {
        self.items
    }
}

fn compare(a: Option<&Value>, b: Option<&Value>) -> std::cmp::Ordering {
    use std::cmp::Ordering;

    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

impl From<Vec<Value>> for Collection {
    fn from(items: Vec<Value>) -> Self {
        Self::new(items)
    }
}

impl FromIterator<Value> for Collection {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for Collection {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl Index<usize> for Collection {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        &self.items[index]
    }
}
