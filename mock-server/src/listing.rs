//! Filtering, sorting, field selection and pagination of listings,
//! following the query conventions of the Statamic REST API.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde_json::{json, Map, Value};

/// A filter parameter parsed from `filter[field]` or `filter[field:condition]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: String,
    pub condition: String,
    pub value: String,
}

impl Filter {
    /// Parse a query key/value pair; `None` if the key is not a filter.
    pub fn parse(key: &str, value: &str) -> Option<Self> {
        let inner = key.strip_prefix("filter[")?.strip_suffix(']')?;
        let (field, condition) = match inner.split_once(':') {
            Some((field, condition)) => (field, condition),
            None => (inner, "is"),
        };
        Some(Self {
            field: field.to_string(),
            condition: condition.to_string(),
            value: value.to_string(),
        })
    }

    /// `Err` carries the unsupported condition name.
    pub fn matches(&self, item: &Value) -> Result<bool, String> {
        let field = item.get(&self.field);
        let text = field.map(as_text);
        Ok(match self.condition.as_str() {
            "is" | "equals" => text.as_deref() == Some(self.value.as_str()),
            "not" | "isnt" => text.as_deref() != Some(self.value.as_str()),
            "contains" => text.is_some_and(|t| t.to_lowercase().contains(&self.value.to_lowercase())),
            "in" => text.is_some_and(|t| self.value.split(',').any(|v| v == t)),
            "gt" => compare_number(field, &self.value) == Some(Ordering::Greater),
            "gte" => matches!(compare_number(field, &self.value), Some(Ordering::Greater | Ordering::Equal)),
            "lt" => compare_number(field, &self.value) == Some(Ordering::Less),
            "lte" => matches!(compare_number(field, &self.value), Some(Ordering::Less | Ordering::Equal)),
            other => return Err(other.to_string()),
        })
    }
}

fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn compare_number(field: Option<&Value>, value: &str) -> Option<Ordering> {
    let left = field?.as_f64()?;
    let right: f64 = value.parse().ok()?;
    left.partial_cmp(&right)
}

/// Apply `site`, filters, `sort`, `fields` and `limit`/`page` to `items`.
///
/// Returns the response body, or the message for a 422 when a filter uses
/// an unsupported condition.
pub fn apply(items: &[Value], params: &HashMap<String, String>) -> Result<Value, String> {
    let mut filters: Vec<Filter> = params
        .iter()
        .filter_map(|(k, v)| Filter::parse(k, v))
        .collect();
    filters.sort_by(|a, b| a.field.cmp(&b.field));

    let mut selected = Vec::new();
    for item in items {
        if let Some(site) = params.get("site") {
            if item.get("locale").and_then(Value::as_str) != Some(site.as_str()) {
                continue;
            }
        }
        let mut keep = true;
        for filter in &filters {
            match filter.matches(item) {
                Ok(true) => {}
                Ok(false) => keep = false,
                Err(condition) => return Err(format!("unsupported filter condition `{condition}`")),
            }
        }
        if keep {
            selected.push(item.clone());
        }
    }

    if let Some(sort) = params.get("sort") {
        sort_items(&mut selected, sort);
    }

    let total = selected.len();
    let limit = params
        .get("limit")
        .and_then(|l| l.parse::<usize>().ok())
        .filter(|l| *l > 0);
    let page = params
        .get("page")
        .and_then(|p| p.parse::<usize>().ok())
        .filter(|p| *p > 0)
        .unwrap_or(1);

    let (data, per_page, last_page) = match limit {
        Some(limit) => {
            let start = (page - 1).saturating_mul(limit);
            let data: Vec<Value> = selected.into_iter().skip(start).take(limit).collect();
            (data, limit, total.div_ceil(limit).max(1))
        }
        None => (selected, total, 1),
    };

    let data: Vec<Value> = match params.get("fields") {
        Some(fields) => data.iter().map(|item| select_fields(item, fields)).collect(),
        None => data,
    };

    Ok(json!({
        "data": data,
        "meta": {
            "current_page": page,
            "last_page": last_page,
            "per_page": per_page,
            "total": total,
        },
    }))
}

fn sort_items(items: &mut [Value], sort: &str) {
    let keys: Vec<(&str, bool)> = sort
        .split(',')
        .filter(|k| !k.is_empty())
        .map(|k| match k.strip_prefix('-') {
            Some(field) => (field, true),
            None => (k, false),
        })
        .collect();
    items.sort_by(|a, b| {
        for (field, descending) in &keys {
            let ordering = compare_values(a.get(*field), b.get(*field));
            let ordering = if *descending { ordering.reverse() } else { ordering };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(x), Some(y)) => as_text(x).cmp(&as_text(y)),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Keep only the comma-separated `fields` of a single item.
pub fn select_fields(item: &Value, fields: &str) -> Value {
    let Some(object) = item.as_object() else {
        return item.clone();
    };
    let selected: Map<String, Value> = fields
        .split(',')
        .filter_map(|f| object.get(f).map(|v| (f.to_string(), v.clone())))
        .collect();
    Value::Object(selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn items() -> Vec<Value> {
        vec![
            json!({"id": "a", "title": "Alpha", "views": 10}),
            json!({"id": "b", "title": "Beta", "views": 30}),
            json!({"id": "c", "title": "Gamma", "views": 20}),
        ]
    }

    fn ids(body: &Value) -> Vec<&str> {
        body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["id"].as_str().unwrap())
            .collect()
    }

    #[test]
    fn parses_filter_keys() {
        assert_eq!(
            Filter::parse("filter[title:contains]", "x"),
            Some(Filter {
                field: "title".to_string(),
                condition: "contains".to_string(),
                value: "x".to_string(),
            })
        );
        assert_eq!(Filter::parse("filter[title]", "x").unwrap().condition, "is");
        assert!(Filter::parse("limit", "10").is_none());
    }

    #[test]
    fn filters_by_condition() {
        let body = apply(&items(), &params(&[("filter[views:gt]", "15")])).unwrap();
        assert_eq!(ids(&body), vec!["b", "c"]);
        let body = apply(&items(), &params(&[("filter[title:contains]", "ET")])).unwrap();
        assert_eq!(ids(&body), vec!["b"]);
    }

    #[test]
    fn unsupported_condition_is_rejected() {
        let err = apply(&items(), &params(&[("filter[title:regex]", ".*")])).unwrap_err();
        assert!(err.contains("regex"));
    }

    #[test]
    fn sorts_descending() {
        let body = apply(&items(), &params(&[("sort", "-views")])).unwrap();
        assert_eq!(ids(&body), vec!["b", "c", "a"]);
    }

    #[test]
    fn paginates() {
        let body = apply(&items(), &params(&[("limit", "2"), ("page", "2")])).unwrap();
        assert_eq!(ids(&body), vec!["c"]);
        assert_eq!(body["meta"]["last_page"], 2);
        assert_eq!(body["meta"]["total"], 3);
    }

    #[test]
    fn huge_page_and_limit_yield_an_empty_page() {
        let max = usize::MAX.to_string();
        let body = apply(&items(), &params(&[("limit", max.as_str()), ("page", max.as_str())])).unwrap();
        assert!(ids(&body).is_empty());
        assert_eq!(body["meta"]["total"], 3);
        assert_eq!(body["meta"]["last_page"], 1);
    }

    #[test]
    fn selects_fields() {
        let body = apply(&items(), &params(&[("fields", "id")])).unwrap();
        assert_eq!(body["data"][0], json!({"id": "a"}));
    }
}
