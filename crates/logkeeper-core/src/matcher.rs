//! Record/criteria matching.
//!
//! [`matches`] is the single predicate shared by every store and engine, so
//! search and delete always agree on membership.

use crate::criteria::Criteria;
use crate::types::LogRecord;

/// Returns true if `record` satisfies every dimension set in `criteria`.
///
/// - time bounds are inclusive on both sides
/// - a set dimension matches when the record's value is any member of it
/// - labels match when the record carries at least one of the labels
/// - keywords match when any keyword is a case-sensitive substring of the message
#[must_use]
pub fn matches(record: &LogRecord, criteria: &Criteria) -> bool {
    if let Some(start) = criteria.start() {
        if record.timestamp() < start {
            return false;
        }
    }
    if let Some(end) = criteria.end() {
        if record.timestamp() > end {
            return false;
        }
    }

    if let Some(levels) = criteria.levels() {
        if !levels.contains(&record.level()) {
            return false;
        }
    }

    if let Some(origins) = criteria.origin_services() {
        if !origins.contains(record.origin_service()) {
            return false;
        }
    }

    if let Some(labels) = criteria.labels() {
        if labels.is_disjoint(record.labels()) {
            return false;
        }
    }

    if let Some(keywords) = criteria.message_keywords() {
        let message = record.message();
        if !keywords.iter().any(|keyword| message.contains(keyword.as_str())) {
            return false;
        }
    }

    true
}
