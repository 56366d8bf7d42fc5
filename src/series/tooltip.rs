//! HTML tooltips attached to chart points
//!
//! Tooltips are a fixed-shape table. Row labels and order are consumed by
//! existing chart pages and must not change.

use std::fmt::Write as _;

use super::extract::ExtractedFields;
use super::layout::AggregationMode;
use crate::models::Amount;

/// Placeholder rendered for a missing optional value
const MISSING_VALUE: &str = "None";

/// Builds tooltips for one aggregation run
#[derive(Debug, Clone)]
pub struct TooltipBuilder {
    link_base: String,
}

impl TooltipBuilder {
    pub fn new(link_base: impl Into<String>) -> Self {
        Self {
            link_base: link_base.into(),
        }
    }

    /// Tooltip for a point of `mode` showing `amount`
    ///
    /// Account mode tooltips carry `ID, Date, Groups, Amount, Concept,
    /// Balance`; tag modes carry `ID, Date, Entity|Group, Amount`.
    pub fn build(&self, mode: AggregationMode, fields: &ExtractedFields<'_>, amount: Amount) -> String {
        let mut rows = vec![
            ("Date", fields.date.to_string()),
            (mode.tooltip_label(), mode.grouping_value(fields)),
            ("Amount", amount.to_string()),
        ];

        if mode.tooltip_details() {
            rows.push(("Concept", fields.concept.unwrap_or(MISSING_VALUE).to_string()));
            let balance = if fields.balance.is_available() {
                fields.balance.to_string()
            } else {
                MISSING_VALUE.to_string()
            };
            rows.push(("Balance", balance));
        }

        self.render(fields.id, &rows)
    }

    fn render(&self, id: &str, rows: &[(&str, String)]) -> String {
        let mut out = String::from("<table border='1'>");
        let _ = write!(
            out,
            "<tr><td>ID</td><td><a href='{}{}'>{}</a></td></tr>",
            self.link_base, id, id
        );
        for (label, value) in rows {
            let _ = write!(out, "<tr><td>{}</td><td>{}</td></tr>", label, value);
        }
        out.push_str("</table>");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fields() -> ExtractedFields<'static> {
        ExtractedFields {
            id: "e1",
            date: NaiveDate::from_ymd_opt(2025, 1, 10)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
            amount: Amount::from_units(-30),
            balance: Amount::from_units(1070),
            concept: Some("Bakery"),
            groups: "food, daily".to_string(),
            entities: String::new(),
        }
    }

    #[test]
    fn test_account_tooltip_shape() {
        let builder = TooltipBuilder::new("/events/");
        let tooltip = builder.build(AggregationMode::Account, &fields(), Amount::from_units(1070));

        assert_eq!(
            tooltip,
            "<table border='1'>\
             <tr><td>ID</td><td><a href='/events/e1'>e1</a></td></tr>\
             <tr><td>Date</td><td>2025-01-10 09:30:00</td></tr>\
             <tr><td>Groups</td><td>food, daily</td></tr>\
             <tr><td>Amount</td><td>1070</td></tr>\
             <tr><td>Concept</td><td>Bakery</td></tr>\
             <tr><td>Balance</td><td>1070</td></tr>\
             </table>"
        );
    }

    #[test]
    fn test_tag_tooltip_shape() {
        let builder = TooltipBuilder::new("/events/");
        let tooltip = builder.build(AggregationMode::Entity, &fields(), Amount::from_units(30));

        assert!(tooltip.contains("<tr><td>Entity</td><td>None</td></tr>"));
        assert!(tooltip.contains("<tr><td>Amount</td><td>30</td></tr>"));
        assert!(!tooltip.contains("Concept"));
        assert!(!tooltip.contains("Balance"));

        let labels: Vec<_> = ["ID", "Date", "Entity", "Amount"]
            .iter()
            .map(|l| tooltip.find(&format!("<td>{}</td>", l)).unwrap())
            .collect();
        assert!(labels.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_missing_values() {
        let mut f = fields();
        f.concept = None;
        f.balance = Amount::Unavailable;
        f.groups = String::new();
        let tooltip = TooltipBuilder::new("/").build(AggregationMode::Account, &f, Amount::Unavailable);

        assert!(tooltip.contains("<tr><td>Groups</td><td>None</td></tr>"));
        assert!(tooltip.contains("<tr><td>Amount</td><td>NaN</td></tr>"));
        assert!(tooltip.contains("<tr><td>Concept</td><td>None</td></tr>"));
        assert!(tooltip.contains("<tr><td>Balance</td><td>None</td></tr>"));
    }
}
