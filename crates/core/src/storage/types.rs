use std::cmp::Ordering;

use serde_json::Value;

/// An ordered, de-duplicated set of relation paths.
///
/// Paths use `.` to address nested relations, e.g. `"tasks_watched.assignee"`
/// eager-loads the assignee of every watched task. The set declared on a
/// service defines what "fully hydrated" means for that entity type;
/// query-level sets are derived from it by merging and prefix-stripping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationSet {
    paths: Vec<String>,
}

impl RelationSet {
    /// Creates a relation set from the given paths, dropping duplicates and
    /// empty entries while preserving first-seen order.
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::default();
        for path in paths {
            set.insert(path.into());
        }
        set
    }

    fn insert(&mut self, path: String) {
        if !path.is_empty() && !self.paths.contains(&path) {
            self.paths.push(path);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Returns true if the exact path is part of this set.
    pub fn contains(&self, path: &str) -> bool {
        self.paths.iter().any(|p| p == path)
    }

    /// Returns true if any path in this set starts at the given top-level
    /// relation name.
    pub fn has_root(&self, name: &str) -> bool {
        self.paths
            .iter()
            .any(|p| p.split('.').next() == Some(name))
    }

    /// Union of both sets: the paths of `self` in order, then any additions
    /// from `other`.
    pub fn merge(&self, other: &RelationSet) -> RelationSet {
        let mut merged = self.clone();
        for path in &other.paths {
            merged.insert(path.clone());
        }
        merged
    }

    /// The sub-paths nested under `prefix`, with the prefix stripped.
    ///
    /// `["tasks_watched", "tasks_watched.assignee"].nested("tasks_watched")`
    /// yields `["assignee"]`.
    pub fn nested(&self, prefix: &str) -> RelationSet {
        let mut nested = Self::default();
        for path in &self.paths {
            if let Some(rest) = path.strip_prefix(prefix) {
                if let Some(sub) = rest.strip_prefix('.') {
                    nested.insert(sub.to_string());
                }
            }
        }
        nested
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }
}

/// A single comparison applied to one field of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Field equals the given JSON value.
    Eq(Value),
    /// String field contains the given substring (case-sensitive).
    Contains(String),
}

/// A conjunction of field conditions.
///
/// Filters are evaluated against the JSON form of a hydrated record. Field
/// paths use `.` to reach into hydrated relations (e.g. `"priority.value"`);
/// a condition on a missing field never matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    conditions: Vec<(String, Condition)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an equality condition.
    pub fn eq(mut self, field: impl Into<String>, value: Value) -> Self {
        self.conditions.push((field.into(), Condition::Eq(value)));
        self
    }

    /// Adds a case-sensitive substring condition.
    pub fn contains(mut self, field: impl Into<String>, needle: impl Into<String>) -> Self {
        self.conditions
            .push((field.into(), Condition::Contains(needle.into())));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Returns true if the record satisfies every condition.
    pub fn matches(&self, record: &Value) -> bool {
        self.conditions.iter().all(|(field, condition)| {
            match (lookup_path(record, field), condition) {
                (Some(actual), Condition::Eq(expected)) => actual == expected,
                (Some(actual), Condition::Contains(needle)) => actual
                    .as_str()
                    .is_some_and(|s| s.contains(needle.as_str())),
                (None, _) => false,
            }
        })
    }
}

/// Sort direction for an ordered read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// An ordering over one field of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub field: String,
    pub direction: Direction,
}

impl Order {
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Ascending,
        }
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Descending,
        }
    }

    /// Compares two records under this ordering.
    pub fn compare(&self, a: &Value, b: &Value) -> Ordering {
        let ordering = compare_values(lookup_path(a, &self.field), lookup_path(b, &self.field));
        match self.direction {
            Direction::Ascending => ordering,
            Direction::Descending => ordering.reverse(),
        }
    }
}

/// Resolves a dotted field path against a JSON record.
fn lookup_path<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(record, |value, segment| value.get(segment))
}

/// Total order over optional JSON scalars.
///
/// Scalars of the same kind compare naturally; otherwise the kind rank
/// decides: absent < null < bool < number < string < everything else.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    fn rank(value: Option<&Value>) -> u8 {
        match value {
            None => 0,
            Some(Value::Null) => 1,
            Some(Value::Bool(_)) => 2,
            Some(Value::Number(_)) => 3,
            Some(Value::String(_)) => 4,
            Some(_) => 5,
        }
    }

    match (a, b) {
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

/// The set of top-level scalar fields retained by a projected read.
///
/// Hydrated relation fields are governed by the query's relation set, not the
/// projection, so a sign-in read can restrict the credential columns it
/// returns while still carrying its hydrated relations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    fields: Vec<String>,
}

impl Projection {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Strips non-selected keys from a JSON object, keeping keys that name a
    /// hydrated relation of the query. Non-objects pass through unchanged.
    pub fn apply(&self, record: Value, relations: &RelationSet) -> Value {
        match record {
            Value::Object(map) => Value::Object(
                map.into_iter()
                    .filter(|(key, _)| {
                        self.fields.iter().any(|f| f == key) || relations.has_root(key)
                    })
                    .collect(),
            ),
            other => other,
        }
    }
}

/// Caller-supplied find options.
///
/// Any present value makes the read cache-bypassing. Relations are merged on
/// top of the service's defaults rather than replacing them, so filtered
/// reads stay fully hydrated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindOptions {
    pub relations: Option<RelationSet>,
    pub filter: Option<Filter>,
    pub order: Option<Order>,
    pub select: Option<Projection>,
}

impl FindOptions {
    pub fn with_relations(mut self, relations: RelationSet) -> Self {
        self.relations = Some(relations);
        self
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_order(mut self, order: Order) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_select(mut self, select: Projection) -> Self {
        self.select = Some(select);
        self
    }

    /// Returns true when no option value is present; only such reads may be
    /// served from the cache.
    pub fn is_empty(&self) -> bool {
        self.relations.is_none()
            && self.filter.is_none()
            && self.order.is_none()
            && self.select.is_none()
    }
}

/// The resolved, store-facing form of a read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub relations: RelationSet,
    pub filter: Option<Filter>,
    pub order: Option<Order>,
    pub select: Option<Projection>,
}

impl Query {
    /// Resolves caller options against a service's default relation set.
    ///
    /// The effective relations are the union of the defaults and any caller
    /// additions; filter, order, and selection come solely from the caller.
    pub fn resolve(defaults: &RelationSet, options: FindOptions) -> Self {
        let relations = match &options.relations {
            Some(extra) => defaults.merge(extra),
            None => defaults.clone(),
        };

        Self {
            relations,
            filter: options.filter,
            order: options.order,
            select: options.select,
        }
    }

    /// Builds a query with an exact relation set, ignoring both the service
    /// defaults and any relations in `options`.
    ///
    /// This is the escape hatch for context-sensitive reads that select their
    /// own hydration shape instead of the entity's fully hydrated form.
    pub fn with_relations(relations: RelationSet, options: FindOptions) -> Self {
        Self {
            relations,
            filter: options.filter,
            order: options.order,
            select: options.select,
        }
    }
}
