//! Per-event field extraction
//!
//! Pulls the values the aggregator needs out of an event's unordered value
//! set according to configurable value names.

use chrono::NaiveDateTime;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{Amount, TransactionEvent};

/// Separator used when several tags of the same kind are present
pub const TAG_SEPARATOR: &str = ", ";

/// Kind of free-form tag attached to an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    Group,
    Entity,
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagKind::Group => write!(f, "group"),
            TagKind::Entity => write!(f, "entity"),
        }
    }
}

/// Names of the event values read by the aggregator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionRules {
    #[serde(default = "default_amount")]
    pub amount: String,

    #[serde(default = "default_balance")]
    pub balance: String,

    #[serde(default = "default_concept")]
    pub concept: String,

    /// Exact name of a single group tag
    #[serde(default = "default_group")]
    pub group: String,

    /// Prefix of repeated group tags ("group.0", "group.1", ...)
    #[serde(default = "default_group_prefix")]
    pub group_prefix: String,

    /// Exact name of a single entity tag
    #[serde(default = "default_entity")]
    pub entity: String,

    /// Prefix of repeated entity tags
    #[serde(default = "default_entity_prefix")]
    pub entity_prefix: String,
}

fn default_amount() -> String {
    "amount".to_string()
}

fn default_balance() -> String {
    "balance".to_string()
}

fn default_concept() -> String {
    "concept".to_string()
}

fn default_group() -> String {
    "group".to_string()
}

fn default_group_prefix() -> String {
    "group.".to_string()
}

fn default_entity() -> String {
    "entity".to_string()
}

fn default_entity_prefix() -> String {
    "entity.".to_string()
}

impl Default for ExtractionRules {
    fn default() -> Self {
        Self {
            amount: default_amount(),
            balance: default_balance(),
            concept: default_concept(),
            group: default_group(),
            group_prefix: default_group_prefix(),
            entity: default_entity(),
            entity_prefix: default_entity_prefix(),
        }
    }
}

impl ExtractionRules {
    /// Value name and prefix used for a tag kind
    pub fn tag_names(&self, kind: TagKind) -> (&str, &str) {
        match kind {
            TagKind::Group => (&self.group, &self.group_prefix),
            TagKind::Entity => (&self.entity, &self.entity_prefix),
        }
    }

    /// Extract the aggregator's view of one event
    pub fn extract<'a>(&self, event: &'a TransactionEvent) -> ExtractedFields<'a> {
        ExtractedFields {
            id: &event.id,
            date: event.start,
            amount: Amount::from_raw(event.value(&self.amount)),
            balance: Amount::from_raw(event.value(&self.balance)),
            concept: event.value(&self.concept),
            groups: self.joined_tags(event, TagKind::Group),
            entities: self.joined_tags(event, TagKind::Entity),
        }
    }

    /// Check whether an event carries the given tag
    pub fn has_tag(&self, event: &TransactionEvent, kind: TagKind, tag: &str) -> bool {
        let (name, prefix) = self.tag_names(kind);
        event.has_tag(name, prefix, tag)
    }

    /// Distinct tags of one kind, in stored order
    pub fn distinct_tags<'a>(&self, event: &'a TransactionEvent, kind: TagKind) -> Vec<&'a str> {
        let (name, prefix) = self.tag_names(kind);
        let mut tags: Vec<&str> = Vec::new();
        for tag in event.tag_values(name, prefix) {
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        tags
    }

    fn joined_tags(&self, event: &TransactionEvent, kind: TagKind) -> String {
        let (name, prefix) = self.tag_names(kind);
        event
            .tag_values(name, prefix)
            .collect::<Vec<_>>()
            .join(TAG_SEPARATOR)
    }
}

/// Values pulled from a single event
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedFields<'a> {
    pub id: &'a str,
    pub date: NaiveDateTime,
    pub amount: Amount,
    pub balance: Amount,
    pub concept: Option<&'a str>,
    /// Group tags joined with ", ", empty when none match
    pub groups: String,
    /// Entity tags joined with ", ", empty when none match
    pub entities: String,
}

impl ExtractedFields<'_> {
    /// Joined tags of one kind
    pub fn tags(&self, kind: TagKind) -> &str {
        match kind {
            TagKind::Group => &self.groups,
            TagKind::Entity => &self.entities,
        }
    }

    /// Running value right before this event was applied
    pub fn balance_before(&self) -> Amount {
        self.balance - self.amount
    }
}
