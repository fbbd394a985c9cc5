//! Nodes of an aggregation tree.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use super::{Aggregator, Schema, Value};
use crate::error::CompositionError;

/// Access to the concrete type behind a trait object.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A node that answers attribute reads by name.
///
/// Implementors usually hold an [`Aggregator`] and forward
/// [`lookup`](Composable::lookup) to [`Aggregator::compose`], answering
/// their computed names through [`property`](Composable::property).
pub trait Composable: AsAny + fmt::Debug {
    /// Name matched by [`Target::Kind`](super::Target::Kind).
    fn kind(&self) -> &str;

    /// Reads `name`, or `Ok(None)` if this node and its contributors do
    /// not define it.
    fn lookup(&self, name: &str) -> Result<Option<Value>, CompositionError>;

    /// Value of a computed attribute declared in the node's [`Schema`].
    fn property(&self, _name: &str) -> Result<Option<Value>, CompositionError> {
        Ok(None)
    }

    /// Reads `name`, failing when nothing defines it.
    fn get(&self, name: &str) -> Result<Value, CompositionError> {
        self.lookup(name)?
            .ok_or_else(|| CompositionError::missing(name, self.kind()))
    }
}

/// A node made only of stored attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct Composite {
    aggregator: Aggregator,
}

impl Composite {
    pub fn new(schema: Arc<Schema>) -> Self {
        Self {
            aggregator: Aggregator::new(schema),
        }
    }

    /// A node of `kind` with no ignored names.
    pub fn of_kind(kind: impl Into<std::borrow::Cow<'static, str>>) -> Self {
        Self::new(Arc::new(Schema::builder(kind).build()))
    }

    /// Sets an attribute (builder pattern).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.aggregator.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.aggregator.set(name, value);
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.aggregator.remove(name)
    }

    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }
}

impl Composable for Composite {
    fn kind(&self) -> &str {
        self.aggregator.kind()
    }

    fn lookup(&self, name: &str) -> Result<Option<Value>, CompositionError> {
        self.aggregator.compose(self, name)
    }
}
