//! Name-based aggregation across a tree of nodes.
//!
//! An [`Aggregator`] stores a node's attributes and tracks which of them are
//! contributors. Reading a public name through [`Aggregator::compose`]
//! collects the node's own value for that name plus the same-named value of
//! every contributor, adds them up with [`Value::try_add`], and resolves the
//! sum against the node when it is a pending [`Reference`].
//!
//! # Schema
//!
//! The per-type configuration (kind, ignored names, computed property
//! names) lives in an immutable [`Schema`] shared through `Arc`. Every
//! aggregator copies the property names into its own contributor list at
//! construction, so tracking on one instance never leaks into another.
//!
//! # Names
//!
//! - names starting with `_` are private and never aggregated
//! - ignored names return the node's own value only
//! - every other assigned name becomes a contributor
//!
//! [`Reference`]: super::Reference

use std::borrow::Cow;
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

use super::{Composable, Value};
use crate::error::CompositionError;

/// Per-type aggregation configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Schema {
    kind: Cow<'static, str>,
    ignored: BTreeSet<String>,
    properties: BTreeSet<String>,
}

impl Schema {
    pub fn builder(kind: impl Into<Cow<'static, str>>) -> SchemaBuilder {
        SchemaBuilder {
            schema: Schema {
                kind: kind.into(),
                ignored: BTreeSet::new(),
                properties: BTreeSet::new(),
            },
        }
    }

    /// Name references use to target nodes built from this schema.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignored.contains(name)
    }

    /// True for names the node computes instead of storing.
    pub fn is_property(&self, name: &str) -> bool {
        self.properties.contains(name)
    }

    pub fn properties(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(String::as_str)
    }

    pub fn ignored(&self) -> impl Iterator<Item = &str> {
        self.ignored.iter().map(String::as_str)
    }
}

/// Builder for [`Schema`].
#[derive(Clone, Debug)]
pub struct SchemaBuilder {
    schema: Schema,
}

impl SchemaBuilder {
    /// Excludes `name` from aggregation.
    pub fn ignore(mut self, name: impl Into<String>) -> Self {
        self.schema.ignored.insert(name.into());
        self
    }

    /// Declares a computed attribute answered by [`Composable::property`].
    pub fn property(mut self, name: impl Into<String>) -> Self {
        self.schema.properties.insert(name.into());
        self
    }

    pub fn build(self) -> Schema {
        self.schema
    }
}

fn is_public(name: &str) -> bool {
    !name.starts_with('_')
}

/// Attribute storage and aggregated lookup for one node.
#[derive(Debug)]
pub struct Aggregator {
    schema: std::sync::Arc<Schema>,
    attributes: BTreeMap<String, Value>,
    contributors: Vec<String>,

    /// Names currently being composed on this node.
    reading: RefCell<Vec<String>>,
}

impl Aggregator {
    pub fn new(schema: std::sync::Arc<Schema>) -> Self {
        let contributors = schema.properties().map(str::to_owned).collect();
        Self {
            schema,
            attributes: BTreeMap::new(),
            contributors,
            reading: RefCell::new(Vec::new()),
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn kind(&self) -> &str {
        self.schema.kind()
    }

    /// Names whose values take part in aggregation, in assignment order
    /// after the property names.
    pub fn contributors(&self) -> &[String] {
        &self.contributors
    }

    /// Stored value of `name`, without aggregation.
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.attributes.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Stores an attribute, tracking new public names as contributors.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        if is_public(&name) && !self.schema.is_ignored(&name) && !self.is_tracked(&name) {
            self.contributors.push(name.clone());
        }
        self.attributes.insert(name, value.into());
    }

    /// Removes an attribute and stops aggregating it.
    ///
    /// Property names stay tracked since the node still computes them.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        let removed = self.attributes.remove(name)?;
        if !self.schema.is_property(name) {
            self.contributors.retain(|tracked| tracked != name);
        }
        Some(removed)
    }

    fn is_tracked(&self, name: &str) -> bool {
        self.contributors.iter().any(|tracked| tracked == name)
    }

    /// The node's own value of `name`: its property if it declares one,
    /// else its stored attribute.
    pub fn own(
        &self,
        node: &dyn Composable,
        name: &str,
    ) -> Result<Option<Value>, CompositionError> {
        if self.schema.is_property(name)
            && let Some(value) = node.property(name)?
        {
            return Ok(Some(value));
        }
        Ok(self.attributes.get(name).cloned())
    }

    /// Reads `name` on `node` with aggregation.
    ///
    /// Returns `Ok(None)` when neither the node nor any contributor defines
    /// the name. A sum that is still a reference after resolving against
    /// `node` is returned as-is for an ancestor to resolve.
    ///
    /// # Errors
    ///
    /// - the contributions cannot be added
    /// - resolving the sum failed
    /// - [`CompositionError::CyclicLookup`] if the read re-enters itself
    pub fn compose(
        &self,
        node: &dyn Composable,
        name: &str,
    ) -> Result<Option<Value>, CompositionError> {
        if !is_public(name) || self.schema.is_ignored(name) {
            return self.own(node, name);
        }

        if self.reading.borrow().iter().any(|reading| reading == name) {
            tracing::debug!(name, kind = self.kind(), "rejected cyclic attribute read");
            return Err(CompositionError::CyclicLookup {
                name: name.to_owned(),
                kind: self.kind().to_owned(),
            });
        }

        self.reading.borrow_mut().push(name.to_owned());
        let result = self.aggregate(node, name);
        self.reading.borrow_mut().pop();
        result
    }

    fn aggregate(
        &self,
        node: &dyn Composable,
        name: &str,
    ) -> Result<Option<Value>, CompositionError> {
        let mut values = Vec::new();
        if let Some(value) = self.own(node, name)? {
            values.push(value);
        }
        for holder_name in self.contributors.iter().filter(|other| *other != name) {
            let Some(holder) = self.own(node, holder_name)? else {
                continue;
            };
            if let Some(value) = holder.attribute(name)? {
                values.push(value);
            }
        }

        tracing::trace!(
            name,
            kind = self.kind(),
            candidates = values.len(),
            "aggregating attribute"
        );

        let Some(sum) = reduce(values)? else {
            return Ok(None);
        };

        match sum {
            Value::Reference(reference) => {
                let resolved = reference.resolve(node)?;
                if resolved.is_pending() {
                    tracing::debug!(
                        name,
                        kind = self.kind(),
                        "reference still pending after read"
                    );
                }
                Ok(Some(resolved.into_value()))
            }
            value => Ok(Some(value)),
        }
    }

    /// Sum of the stored value of `name` and the contributions of every
    /// stored contributor, skipping computed properties and leaving
    /// references unresolved.
    ///
    /// Properties use this to build on other aggregated names without
    /// reading themselves.
    pub fn gather(&self, name: &str) -> Result<Option<Value>, CompositionError> {
        let mut values: Vec<Value> = self.attributes.get(name).cloned().into_iter().collect();
        for holder_name in self.contributors.iter().filter(|other| *other != name) {
            if self.schema.is_property(holder_name) {
                continue;
            }
            if let Some(holder) = self.attributes.get(holder_name)
                && let Some(value) = holder.attribute(name)?
            {
                values.push(value);
            }
        }
        reduce(values)
    }
}

fn reduce(values: Vec<Value>) -> Result<Option<Value>, CompositionError> {
    let mut values = values.into_iter();
    let Some(first) = values.next() else {
        return Ok(None);
    };
    values.try_fold(first, |sum, value| sum.try_add(&value)).map(Some)
}

impl Clone for Aggregator {
    fn clone(&self) -> Self {
        Self {
            schema: self.schema.clone(),
            attributes: self.attributes.clone(),
            contributors: self.contributors.clone(),
            reading: RefCell::new(Vec::new()),
        }
    }
}

impl PartialEq for Aggregator {
    fn eq(&self, other: &Self) -> bool {
        self.schema == other.schema && self.attributes == other.attributes
    }
}
