//! Rule-based tagging by concept
//!
//! Events coming straight from a bank export carry a concept but no group or
//! entity tags. Tagging rules fill those in: a group rule matches a substring
//! of the concept together with the sign of the amount, an entity rule
//! matches any of its strings. Events that already carry tags of a kind are
//! left alone for that kind.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::extract::{ExtractionRules, TagKind};
use crate::models::{Amount, EventValue, TransactionEvent};

/// Group given to an untagged negative movement
pub const SPENDING_NO_GROUP: &str = "Spending no group";
/// Group given to an untagged non-negative movement
pub const INCOME_NO_GROUP: &str = "Income no group";
/// Entity key of movements without any entity
pub const NO_ENTITY: &str = "No entity";

/// Sign an amount must have for a group rule to match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SignCondition {
    #[serde(rename = ">0")]
    Positive,
    #[serde(rename = "<0")]
    Negative,
    #[default]
    #[serde(rename = "any")]
    Any,
}

impl SignCondition {
    /// An unavailable amount only satisfies `Any`
    pub fn matches(&self, amount: Amount) -> bool {
        match self {
            SignCondition::Positive => amount.is_positive(),
            SignCondition::Negative => amount.is_negative(),
            SignCondition::Any => true,
        }
    }
}

/// Concept substring plus sign condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRule {
    #[serde(rename = "match")]
    pub pattern: String,

    #[serde(default)]
    pub amount: SignCondition,
}

impl MatchRule {
    pub fn matches(&self, concept: &str, amount: Amount) -> bool {
        concept.contains(&self.pattern) && self.amount.matches(amount)
    }
}

/// A group and the rules that select it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRule {
    pub name: String,

    #[serde(default)]
    pub rules: Vec<MatchRule>,
}

/// An entity and the concept strings that identify it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRule {
    pub name: String,

    #[serde(default)]
    pub matching_strings: Vec<String>,
}

/// Configured group and entity rules
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggingRules {
    #[serde(default)]
    pub groups: Vec<GroupRule>,

    #[serde(default)]
    pub entities: Vec<EntityRule>,
}

impl TaggingRules {
    /// Check if no rules are configured
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty() && self.entities.is_empty()
    }

    /// Groups matching a movement, in rule order
    ///
    /// A movement matching no group falls back to `Spending no group` when
    /// negative and `Income no group` otherwise. An unavailable amount gets
    /// no fallback.
    pub fn groups_for(&self, concept: &str, amount: Amount) -> Vec<&str> {
        let matched: Vec<&str> = self
            .groups
            .iter()
            .filter(|group| group.rules.iter().any(|rule| rule.matches(concept, amount)))
            .map(|group| group.name.as_str())
            .collect();

        if !matched.is_empty() || !amount.is_available() {
            return matched;
        }
        if amount.is_negative() {
            vec![SPENDING_NO_GROUP]
        } else {
            vec![INCOME_NO_GROUP]
        }
    }

    /// Entities whose strings appear in the concept, in rule order
    pub fn entities_for(&self, concept: &str) -> Vec<&str> {
        self.entities
            .iter()
            .filter(|entity| entity.matching_strings.iter().any(|s| concept.contains(s.as_str())))
            .map(|entity| entity.name.as_str())
            .collect()
    }

    /// Tag events in place and return how many received new tags
    ///
    /// Tags are written under the prefixes of `extraction`, so the
    /// aggregator and the tag filter see them.
    pub fn apply(&self, extraction: &ExtractionRules, events: &mut [TransactionEvent]) -> usize {
        if self.is_empty() {
            return 0;
        }

        let mut tagged = 0;
        for event in events.iter_mut() {
            let fields = extraction.extract(event);
            let concept = fields.concept.unwrap_or_default();

            let mut new_values = Vec::new();
            if !self.groups.is_empty() && fields.tags(TagKind::Group).is_empty() {
                for (i, group) in self.groups_for(concept, fields.amount).into_iter().enumerate() {
                    new_values.push(EventValue::text(format!("{}{}", extraction.group_prefix, i), group));
                }
            }
            if !self.entities.is_empty() && fields.tags(TagKind::Entity).is_empty() {
                for (i, entity) in self.entities_for(concept).into_iter().enumerate() {
                    new_values.push(EventValue::text(format!("{}{}", extraction.entity_prefix, i), entity));
                }
            }

            if !new_values.is_empty() {
                tagged += 1;
                event.values.extend(new_values);
            }
        }

        debug!(tagged, events = events.len(), "tagging rules applied");
        tagged
    }
}
