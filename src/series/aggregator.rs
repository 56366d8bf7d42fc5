//! Series aggregator
//!
//! Turns an ordered list of transaction events into chart series. All modes
//! run through the same routine, parametrized by the mode's lane layout,
//! sign policy and seed policy. Running totals live only for one call.

use std::collections::BTreeMap;

use tracing::debug;

use super::accumulator::Accumulators;
use super::extract::{ExtractedFields, ExtractionRules};
use super::layout::{AggregationMode, SeedPolicy, SignPolicy};
use super::tooltip::TooltipBuilder;
use crate::config::Settings;
use crate::models::{Amount, SeriesCollection, SeriesPoint, TransactionEvent};

/// Output of one aggregation run
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    /// Mode the run used
    pub mode: AggregationMode,
    /// Produced series
    pub series: SeriesCollection,
    /// Final running total per accumulator key
    pub totals: BTreeMap<String, Amount>,
    /// Number of events processed
    pub event_count: usize,
    /// Events whose amount was unavailable
    pub unavailable_count: usize,
}

/// Stateless aggregator; each call owns its own running totals
#[derive(Debug, Clone)]
pub struct SeriesAggregator {
    rules: ExtractionRules,
    tooltips: TooltipBuilder,
}

impl Default for SeriesAggregator {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl SeriesAggregator {
    pub fn new(rules: ExtractionRules, tooltips: TooltipBuilder) -> Self {
        Self { rules, tooltips }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.extraction.clone(),
            TooltipBuilder::new(settings.tooltip.link_base.clone()),
        )
    }

    pub fn rules(&self) -> &ExtractionRules {
        &self.rules
    }

    /// Aggregate events into series
    pub fn aggregate(&self, events: &[TransactionEvent], mode: AggregationMode) -> SeriesCollection {
        self.run(events, mode).series
    }

    /// Aggregate events, also returning the final running totals
    pub fn run(&self, events: &[TransactionEvent], mode: AggregationMode) -> Aggregation {
        let mut accumulators = Accumulators::new();
        let mut series = SeriesCollection::new();
        let mut unavailable_count = 0;

        for event in events {
            let fields = self.rules.extract(event);
            if !fields.amount.is_available() {
                unavailable_count += 1;
                debug!(event = %fields.id, "amount unavailable");
            }
            self.apply(mode, &fields, &mut accumulators, &mut series);
        }

        debug!(
            %mode,
            events = events.len(),
            series = series.len(),
            points = series.point_count(),
            unavailable = unavailable_count,
            "aggregation finished"
        );

        Aggregation {
            mode,
            series,
            totals: accumulators.into_totals(),
            event_count: events.len(),
            unavailable_count,
        }
    }

    fn apply(
        &self,
        mode: AggregationMode,
        fields: &ExtractedFields<'_>,
        accumulators: &mut Accumulators,
        series: &mut SeriesCollection,
    ) {
        let amount = match mode.sign_policy() {
            SignPolicy::Keep => fields.amount,
            SignPolicy::Absolute => fields.amount.abs(),
        };

        for lane in mode.lanes(fields) {
            if let Some(raw) = &lane.raw {
                series.push(
                    raw.series,
                    SeriesPoint {
                        id: format!("{}{}", raw.id_prefix, fields.id),
                        group: raw.label.clone(),
                        x: fields.date,
                        y: amount,
                        tooltip: self.tooltips.build(mode, fields, fields.amount),
                    },
                );
            }

            let seed = || match mode.seed_policy() {
                SeedPolicy::BalanceBeforeEvent => fields.balance_before(),
                SeedPolicy::Zero => Amount::zero(),
            };
            let total = accumulators.accumulate(&lane.key, seed, amount);

            let target = lane.cumulative;
            series.push(
                target.series,
                SeriesPoint {
                    id: format!("{}{}", target.id_prefix, fields.id),
                    group: target.label,
                    x: fields.date,
                    y: total,
                    tooltip: self.tooltips.build(mode, fields, total),
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventValue;
    use crate::series::layout::*;
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    fn at(day: i64) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
            + Duration::days(day)
    }

    fn movement(id: &str, day: i64, amount: &str, balance: &str) -> TransactionEvent {
        TransactionEvent::new(id, at(day))
            .with_value(EventValue::double("amount", amount))
            .with_value(EventValue::double("balance", balance))
    }

    fn tagged(id: &str, day: i64, amount: &str, name: &str, tag: &str) -> TransactionEvent {
        TransactionEvent::new(id, at(day))
            .with_value(EventValue::double("amount", amount))
            .with_value(EventValue::text(name, tag))
    }

    fn ys(collection: &SeriesCollection, name: &str) -> Vec<Amount> {
        collection
            .get(name)
            .unwrap_or_default()
            .iter()
            .map(|p| p.y)
            .collect()
    }

    #[test]
    fn test_empty_input() {
        let aggregator = SeriesAggregator::default();
        for mode in [AggregationMode::Account, AggregationMode::Entity, AggregationMode::Group] {
            let run = aggregator.run(&[], mode);
            assert!(run.series.is_empty());
            assert!(run.totals.is_empty());
            assert_eq!(run.event_count, 0);
        }
    }

    #[test]
    fn test_account_example() {
        let events = vec![
            movement("e1", 0, "100", "1100"),
            movement("e2", 1, "-30", "1070"),
        ];
        let series = SeriesAggregator::default().aggregate(&events, AggregationMode::Account);

        assert_eq!(ys(&series, INCOMING_EVOLUTION), vec![Amount::from_units(1100)]);
        assert_eq!(ys(&series, SPENDING_EVOLUTION), vec![Amount::from_units(1070)]);
        assert_eq!(
            ys(&series, ACCOUNT_EVOLUTION),
            vec![Amount::from_units(1100), Amount::from_units(1070)]
        );
        assert_eq!(ys(&series, TRANSACTIONS_INCOMING), vec![Amount::from_units(100)]);
        assert_eq!(ys(&series, TRANSACTIONS_SPENDING), vec![Amount::from_units(-30)]);

        let ids: Vec<_> = series
            .get(ACCOUNT_EVOLUTION)
            .unwrap()
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["account-evolution-e1", "account-evolution-e2"]);

        let incoming = &series.get(TRANSACTIONS_INCOMING).unwrap()[0];
        assert_eq!(incoming.id, "e1");
        assert_eq!(incoming.group, "Incoming transactions");
        assert_eq!(incoming.x, at(0));
        assert_eq!(series.get(SPENDING_EVOLUTION).unwrap()[0].group, "Evolution of spending");
    }

    #[test]
    fn test_key_absence_when_no_incoming() {
        let events = vec![
            movement("e1", 0, "-10", "90"),
            movement("e2", 1, "0", "90"),
        ];
        let series = SeriesAggregator::default().aggregate(&events, AggregationMode::Account);

        assert!(!series.contains(TRANSACTIONS_INCOMING));
        assert!(!series.contains(INCOMING_EVOLUTION));
        assert_eq!(series.get(TRANSACTIONS_SPENDING).unwrap().len(), 2);
        assert_eq!(series.len(), 3);
    }

    #[test]
    fn test_account_properties() {
        let amounts = ["250.75", "-12.30", "-0.45", "1000", "-999.99", "0", "3.10"];
        let mut balance = Amount::parse("500");
        let mut events = Vec::new();
        for (i, amount) in amounts.iter().enumerate() {
            balance += Amount::parse(amount);
            events.push(movement(&format!("e{}", i), i as i64, amount, &balance.to_string()));
        }

        let series = SeriesAggregator::default().aggregate(&events, AggregationMode::Account);

        let raw = series.get(TRANSACTIONS_INCOMING).map_or(0, <[_]>::len)
            + series.get(TRANSACTIONS_SPENDING).map_or(0, <[_]>::len);
        assert_eq!(raw, events.len());

        let account = series.get(ACCOUNT_EVOLUTION).unwrap();
        assert_eq!(account.len(), events.len());

        let sum: Amount = amounts.iter().map(|a| Amount::parse(a)).sum();
        assert_eq!(account.last().unwrap().y, Amount::parse("500") + sum);
        assert_eq!(account.last().unwrap().y, balance);
    }

    #[test]
    fn test_group_example() {
        let events = vec![
            tagged("a", 0, "-50", "group", "food"),
            tagged("b", 1, "-20", "group", "food"),
            tagged("c", 2, "10", "group", "rent"),
        ];
        let run = SeriesAggregator::default().run(&events, AggregationMode::Group);

        let accumulated = run.series.get(ACCUMULATED_GROUPS_EVOLUTION).unwrap();
        let pairs: Vec<_> = accumulated
            .iter()
            .map(|p| (p.group.as_str(), p.y))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("food", Amount::from_units(50)),
                ("food", Amount::from_units(70)),
                ("rent", Amount::from_units(10)),
            ]
        );
        assert_eq!(accumulated[0].id, "accumulated-evolution-a");

        assert_eq!(
            ys(&run.series, GROUPS_EVOLUTION),
            vec![Amount::from_units(50), Amount::from_units(20), Amount::from_units(10)]
        );
        assert_eq!(run.totals.get("food"), Some(&Amount::from_units(70)));
        assert!(!run.series.contains(ENTITIES_EVOLUTION));
    }

    #[test]
    fn test_entity_totals_match_absolute_sum() {
        let events = vec![
            tagged("a", 0, "-12.5", "entity", "Shop"),
            tagged("b", 1, "300", "entity", "Employer"),
            tagged("c", 2, "-7.25", "entity.0", "Shop"),
            TransactionEvent::new("d", at(3)).with_value(EventValue::double("amount", "-4")),
        ];
        let run = SeriesAggregator::default().run(&events, AggregationMode::Entity);

        let total: Amount = run.totals.values().copied().sum();
        assert_eq!(total, Amount::parse("323.75"));
        assert_eq!(run.totals.get("None"), Some(&Amount::from_units(4)));

        let mut last: BTreeMap<&str, Amount> = BTreeMap::new();
        for point in run.series.get(ACCUMULATED_ENTITIES_EVOLUTION).unwrap() {
            if let Some(previous) = last.get(point.group.as_str()) {
                assert!(point.y.value().unwrap() >= previous.value().unwrap());
            }
            last.insert(point.group.as_str(), point.y);
        }
    }

    #[test]
    fn test_unavailable_amount_fails_soft() {
        let events = vec![
            movement("e1", 0, "100", "1100"),
            movement("e2", 1, "oops", "1100"),
            movement("e3", 2, "-10", "1090"),
        ];
        let run = SeriesAggregator::default().run(&events, AggregationMode::Account);

        assert_eq!(run.unavailable_count, 1);
        let account = ys(&run.series, ACCOUNT_EVOLUTION);
        assert_eq!(account.len(), 3);
        assert_eq!(account[0], Amount::from_units(1100));
        assert_eq!(account[1], Amount::Unavailable);
        assert_eq!(account[2], Amount::Unavailable);

        // The unavailable amount is not positive, so it counts as spending.
        assert_eq!(ys(&run.series, TRANSACTIONS_SPENDING)[0], Amount::Unavailable);
        assert_eq!(run.series.get(INCOMING_EVOLUTION).unwrap().len(), 1);
    }

    #[test]
    fn test_unavailable_amount_sticks_to_its_tag() {
        for (mode, name, raw, accumulated) in [
            (AggregationMode::Group, "group", GROUPS_EVOLUTION, ACCUMULATED_GROUPS_EVOLUTION),
            (AggregationMode::Entity, "entity.0", ENTITIES_EVOLUTION, ACCUMULATED_ENTITIES_EVOLUTION),
        ] {
            let events = vec![
                tagged("a", 0, "oops", name, "food"),
                tagged("b", 1, "-5", name, "food"),
                tagged("c", 2, "-3", name, "rent"),
            ];
            let run = SeriesAggregator::default().run(&events, mode);

            assert_eq!(run.unavailable_count, 1);
            assert_eq!(run.totals.get("food"), Some(&Amount::Unavailable));
            assert_eq!(run.totals.get("rent"), Some(&Amount::from_units(3)));
            assert_eq!(
                ys(&run.series, raw),
                vec![Amount::Unavailable, Amount::from_units(5), Amount::from_units(3)]
            );
            assert_eq!(
                ys(&run.series, accumulated),
                vec![Amount::Unavailable, Amount::Unavailable, Amount::from_units(3)]
            );
        }
    }

    #[test]
    fn test_missing_first_balance_leaves_raw_points_known() {
        let events = vec![
            TransactionEvent::new("e1", at(0)).with_value(EventValue::double("amount", "100")),
            movement("e2", 1, "-30", "1070"),
        ];
        let run = SeriesAggregator::default().run(&events, AggregationMode::Account);

        assert_eq!(run.unavailable_count, 0);
        assert_eq!(ys(&run.series, TRANSACTIONS_INCOMING), vec![Amount::from_units(100)]);
        assert_eq!(ys(&run.series, TRANSACTIONS_SPENDING), vec![Amount::from_units(-30)]);
        assert_eq!(ys(&run.series, INCOMING_EVOLUTION), vec![Amount::Unavailable]);
        assert_eq!(
            ys(&run.series, ACCOUNT_EVOLUTION),
            vec![Amount::Unavailable, Amount::Unavailable]
        );
        // Spending is seeded from its own first event
        assert_eq!(ys(&run.series, SPENDING_EVOLUTION), vec![Amount::from_units(1070)]);
    }

    #[test]
    fn test_rerun_is_identical() {
        let events = vec![
            movement("e1", 0, "100", "1100"),
            movement("e2", 1, "-30", "1070"),
        ];
        let aggregator = SeriesAggregator::default();
        let first = aggregator.run(&events, AggregationMode::Account);
        let second = aggregator.run(&events, AggregationMode::Account);
        assert_eq!(first, second);
    }

    #[test]
    fn test_input_order_is_kept() {
        let events = vec![
            movement("late", 5, "1", "11"),
            movement("early", 0, "1", "12"),
        ];
        let series = SeriesAggregator::default().aggregate(&events, AggregationMode::Account);
        let ids: Vec<_> = series
            .get(TRANSACTIONS_INCOMING)
            .unwrap()
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["late", "early"]);
    }
}
