//! Top Category Insight
//!
//! Names the expense category with the highest total over the analyzed
//! period, with its average per active month.

use serde_json::json;

use crate::aggregate::group_by_category;
use crate::models::TransactionType;
use crate::Result;

use super::engine::{AnalysisContext, Insight};
use super::types::{Finding, FindingKind, InsightType};

pub struct TopCategoryInsight;

impl TopCategoryInsight {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TopCategoryInsight {
    fn default() -> Self {
        Self::new()
    }
}

impl Insight for TopCategoryInsight {
    fn id(&self) -> InsightType {
        InsightType::TopCategory
    }

    fn name(&self) -> &'static str {
        "Top Category"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Finding>> {
        let patterns = group_by_category(ctx.transactions, TransactionType::Expense);
        let Some(top) = patterns.first() else {
            return Ok(vec![]);
        };

        let finding = Finding::new(
            self.id(),
            FindingKind::Info,
            "Top expense category",
            format!(
                "{}: {} (on average {}/month)",
                top.name,
                ctx.money(top.total),
                ctx.money(top.average)
            ),
        )
        .with_data(json!({
            "category": top.name,
            "total": top.total,
            "average": top.average,
            "months": top.distinct_months,
        }));

        Ok(vec![finding])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, expense, income};

    #[test]
    fn test_names_largest_category() {
        let txs = vec![
            expense(200.0, "Jedzenie", date(2024, 1, 10)),
            expense(150.0, "Jedzenie", date(2024, 2, 10)),
            expense(300.0, "Transport", date(2024, 2, 12)),
        ];
        let ctx = AnalysisContext::new(&txs, date(2024, 2, 20));
        let findings = TopCategoryInsight::new().analyze(&ctx).unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, FindingKind::Info);
        assert_eq!(
            findings[0].description,
            "Jedzenie: 350 zł (on average 175 zł/month)"
        );
    }

    #[test]
    fn test_no_expenses_no_finding() {
        let txs = vec![income(1000.0, "Wynagrodzenie", date(2024, 1, 5))];
        let ctx = AnalysisContext::new(&txs, date(2024, 1, 20));
        assert!(TopCategoryInsight::new().analyze(&ctx).unwrap().is_empty());
    }
}
