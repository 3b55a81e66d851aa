//! Query and deletion criteria.
//!
//! A [`Criteria`] names up to six filter dimensions: a time range, a level
//! set, an origin-service set, a label set and a message-keyword set. Every
//! dimension is optional. Dimensions combine with AND; the values inside a
//! set dimension combine with OR. See [`matches`](crate::matcher::matches).
//!
//! # Empty sets mean "any"
//!
//! Passing an empty collection to a set dimension is the same as not setting
//! it: the dimension places no constraint on the record. It does **not**
//! mean "match nothing". The builder normalizes empty sets away, so
//! `Criteria::builder().labels(Vec::<String>::new()).build()` is equal to
//! [`Criteria::all()`]. Callers that want "match nothing" must not rely on an
//! empty set to express it.

use std::collections::BTreeSet;

use crate::types::LogLevel;

/// Immutable filter specification.
///
/// Build with [`Criteria::builder`]. A default `Criteria` matches every
/// record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    start: Option<i64>,
    end: Option<i64>,
    levels: Option<BTreeSet<LogLevel>>,
    origin_services: Option<BTreeSet<String>>,
    labels: Option<BTreeSet<String>>,
    message_keywords: Option<BTreeSet<String>>,
}

impl Criteria {
    /// Criteria with no constraints; matches every record.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Criteria bounded by an inclusive time range only.
    #[must_use]
    pub fn between(start: i64, end: i64) -> Self {
        Self::builder().start(start).end(end).build()
    }

    /// Creates a builder that starts fully unconstrained.
    #[must_use]
    pub fn builder() -> CriteriaBuilder {
        CriteriaBuilder::default()
    }

    /// Inclusive lower time bound, epoch milliseconds.
    #[must_use]
    pub const fn start(&self) -> Option<i64> {
        self.start
    }

    /// Inclusive upper time bound, epoch milliseconds.
    #[must_use]
    pub const fn end(&self) -> Option<i64> {
        self.end
    }

    /// Accepted levels, if constrained.
    #[must_use]
    pub const fn levels(&self) -> Option<&BTreeSet<LogLevel>> {
        self.levels.as_ref()
    }

    /// Accepted origin services, if constrained.
    #[must_use]
    pub const fn origin_services(&self) -> Option<&BTreeSet<String>> {
        self.origin_services.as_ref()
    }

    /// Labels of which a record must carry at least one, if constrained.
    #[must_use]
    pub const fn labels(&self) -> Option<&BTreeSet<String>> {
        self.labels.as_ref()
    }

    /// Keywords of which at least one must occur in the message, if constrained.
    #[must_use]
    pub const fn message_keywords(&self) -> Option<&BTreeSet<String>> {
        self.message_keywords.as_ref()
    }

    /// Returns true if no dimension is constrained.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        *self == Self::default()
    }
}

/// Builder for [`Criteria`].
///
/// Each setter replaces whatever that dimension held before.
#[derive(Debug, Clone, Default)]
pub struct CriteriaBuilder {
    inner: Criteria,
}

impl CriteriaBuilder {
    /// Sets the inclusive lower time bound.
    #[must_use]
    pub const fn start(mut self, start: i64) -> Self {
        self.inner.start = Some(start);
        self
    }

    /// Sets the inclusive upper time bound.
    #[must_use]
    pub const fn end(mut self, end: i64) -> Self {
        self.inner.end = Some(end);
        self
    }

    /// Sets both time bounds from optional values.
    #[must_use]
    pub const fn time_range(mut self, start: Option<i64>, end: Option<i64>) -> Self {
        self.inner.start = start;
        self.inner.end = end;
        self
    }

    /// Sets the accepted levels. Empty means any level.
    #[must_use]
    pub fn levels(mut self, levels: impl IntoIterator<Item = LogLevel>) -> Self {
        self.inner.levels = non_empty(levels.into_iter().collect());
        self
    }

    /// Sets the accepted origin services. Empty means any origin.
    #[must_use]
    pub fn origin_services<I, S>(mut self, origin_services: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inner.origin_services = non_empty(collect_strings(origin_services));
        self
    }

    /// Sets the label set. Empty means any labels, including none.
    #[must_use]
    pub fn labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inner.labels = non_empty(collect_strings(labels));
        self
    }

    /// Sets the message keywords. Empty means any message.
    #[must_use]
    pub fn message_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inner.message_keywords = non_empty(collect_strings(keywords));
        self
    }

    /// Finishes the criteria.
    #[must_use]
    pub fn build(self) -> Criteria {
        self.inner
    }
}

fn collect_strings<I, S>(values: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values.into_iter().map(Into::into).collect()
}

fn non_empty<T: Ord>(set: BTreeSet<T>) -> Option<BTreeSet<T>> {
    if set.is_empty() { None } else { Some(set) }
}
