//! Aggregation modes and the series layout each one produces
//!
//! Every mode follows the same shape: pick the lanes an event feeds, apply a
//! sign policy to its amount, add it to each lane's running total (seeded per
//! the mode's seed policy), and emit points. A lane optionally emits the raw
//! amount and always emits the new running total.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::extract::{ExtractedFields, TagKind};

pub const TRANSACTIONS_INCOMING: &str = "transactions_incoming";
pub const TRANSACTIONS_SPENDING: &str = "transactions_spending";
pub const INCOMING_EVOLUTION: &str = "incoming_evolution";
pub const SPENDING_EVOLUTION: &str = "spending_evolution";
pub const ACCOUNT_EVOLUTION: &str = "account_evolution";
pub const ENTITIES_EVOLUTION: &str = "entities_evolution";
pub const ACCUMULATED_ENTITIES_EVOLUTION: &str = "accumulated_entities_evolution";
pub const GROUPS_EVOLUTION: &str = "groups_evolution";
pub const ACCUMULATED_GROUPS_EVOLUTION: &str = "accumulated_groups_evolution";

/// Id prefix of account evolution points
pub const ACCOUNT_EVOLUTION_ID_PREFIX: &str = "account-evolution-";
/// Id prefix of accumulated tag points
pub const ACCUMULATED_ID_PREFIX: &str = "accumulated-evolution-";

/// Tag key used when an event has no tag of the requested kind
pub const MISSING_TAG_KEY: &str = "None";

/// Which family of series to derive from the events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum, Default)]
#[serde(rename_all = "lowercase")]
pub enum AggregationMode {
    /// Incoming/spending split plus account balance evolution
    #[default]
    Account,
    /// Per-entity absolute amounts and accumulations
    Entity,
    /// Per-group absolute amounts and accumulations
    Group,
}

impl fmt::Display for AggregationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregationMode::Account => write!(f, "account"),
            AggregationMode::Entity => write!(f, "entity"),
            AggregationMode::Group => write!(f, "group"),
        }
    }
}

/// How an event's amount enters the running totals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignPolicy {
    /// Use the signed amount
    Keep,
    /// Use the absolute amount
    Absolute,
}

/// Initial value of a running total when its key is first seen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedPolicy {
    /// `balance - amount` of the first contributing event
    BalanceBeforeEvent,
    /// Zero
    Zero,
}

/// Where a point goes and how it is labelled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesTarget {
    pub series: &'static str,
    pub label: String,
    pub id_prefix: &'static str,
}

impl SeriesTarget {
    fn new(series: &'static str, label: impl Into<String>, id_prefix: &'static str) -> Self {
        Self {
            series,
            label: label.into(),
            id_prefix,
        }
    }
}

/// One running total fed by an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lane {
    /// Accumulator key
    pub key: String,
    /// Series receiving the event's own amount, if any
    pub raw: Option<SeriesTarget>,
    /// Series receiving the updated running total
    pub cumulative: SeriesTarget,
}

impl AggregationMode {
    pub fn sign_policy(&self) -> SignPolicy {
        match self {
            AggregationMode::Account => SignPolicy::Keep,
            AggregationMode::Entity | AggregationMode::Group => SignPolicy::Absolute,
        }
    }

    pub fn seed_policy(&self) -> SeedPolicy {
        match self {
            AggregationMode::Account => SeedPolicy::BalanceBeforeEvent,
            AggregationMode::Entity | AggregationMode::Group => SeedPolicy::Zero,
        }
    }

    /// Tag kind used as grouping key, for tag modes
    pub fn tag_kind(&self) -> Option<TagKind> {
        match self {
            AggregationMode::Account => None,
            AggregationMode::Entity => Some(TagKind::Entity),
            AggregationMode::Group => Some(TagKind::Group),
        }
    }

    /// Label of the tooltip row describing the grouping
    pub fn tooltip_label(&self) -> &'static str {
        match self {
            AggregationMode::Account => "Groups",
            AggregationMode::Entity => "Entity",
            AggregationMode::Group => "Group",
        }
    }

    /// Whether tooltips carry the concept and balance rows
    pub fn tooltip_details(&self) -> bool {
        matches!(self, AggregationMode::Account)
    }

    /// Value shown in the tooltip grouping row
    ///
    /// Account mode shows the event's groups.
    pub fn grouping_value(&self, fields: &ExtractedFields<'_>) -> String {
        tag_key(fields, self.tag_kind().unwrap_or(TagKind::Group))
    }

    /// Lanes an event feeds, in emission order
    pub fn lanes(&self, fields: &ExtractedFields<'_>) -> Vec<Lane> {
        match self {
            AggregationMode::Account => {
                let direction = if fields.amount.is_positive() {
                    Lane {
                        key: "incoming".to_string(),
                        raw: Some(SeriesTarget::new(
                            TRANSACTIONS_INCOMING,
                            "Incoming transactions",
                            "",
                        )),
                        cumulative: SeriesTarget::new(
                            INCOMING_EVOLUTION,
                            "Evolution of incoming",
                            "",
                        ),
                    }
                } else {
                    Lane {
                        key: "spending".to_string(),
                        raw: Some(SeriesTarget::new(
                            TRANSACTIONS_SPENDING,
                            "Spending transactions",
                            "",
                        )),
                        cumulative: SeriesTarget::new(
                            SPENDING_EVOLUTION,
                            "Evolution of spending",
                            "",
                        ),
                    }
                };
                let account = Lane {
                    key: "account".to_string(),
                    raw: None,
                    cumulative: SeriesTarget::new(
                        ACCOUNT_EVOLUTION,
                        "Account evolution",
                        ACCOUNT_EVOLUTION_ID_PREFIX,
                    ),
                };
                vec![direction, account]
            }
            AggregationMode::Entity => vec![tag_lane(
                tag_key(fields, TagKind::Entity),
                ENTITIES_EVOLUTION,
                ACCUMULATED_ENTITIES_EVOLUTION,
            )],
            AggregationMode::Group => vec![tag_lane(
                tag_key(fields, TagKind::Group),
                GROUPS_EVOLUTION,
                ACCUMULATED_GROUPS_EVOLUTION,
            )],
        }
    }
}

fn tag_key(fields: &ExtractedFields<'_>, kind: TagKind) -> String {
    let tags = fields.tags(kind);
    if tags.is_empty() {
        MISSING_TAG_KEY.to_string()
    } else {
        tags.to_string()
    }
}

fn tag_lane(key: String, raw: &'static str, cumulative: &'static str) -> Lane {
    Lane {
        raw: Some(SeriesTarget::new(raw, key.clone(), "")),
        cumulative: SeriesTarget::new(cumulative, key.clone(), ACCUMULATED_ID_PREFIX),
        key,
    }
}
