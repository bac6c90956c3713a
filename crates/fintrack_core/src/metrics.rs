//! Dashboard metrics engine.
//!
//! Transforms one user's raw ledger aggregates into the derived financial
//! summary shown on the dashboard: totals, the remaining-balance percentage,
//! the rule-based commentary messages, and the 50/30/20 recommendation.
//! All functions are pure; persistence and rendering live elsewhere.

use crate::domain::{FinancialSummary, SavingStatus, StatusColor};

/// Raw per-user aggregates the engine consumes, already scoped to one user.
#[derive(Debug, Clone, Default)]
pub struct MetricsInput {
    pub total_income: f64,
    pub total_expense: f64,
    /// Sum of the savings ledger.
    pub actual_savings: f64,
    /// The expense category with the largest summed amount, if any.
    pub top_expense_category: Option<(String, f64)>,
}

/// Rounds to 2 decimal places.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Computes the full financial summary from raw aggregates.
///
/// Threshold tables are applied in a fixed order and compare against the
/// *rounded* balance percentage, so a value that rounds to exactly 10.00
/// lands in the `[10, 20)` bucket rather than `< 10`.
///
/// `saving_status` and `ai_message` are classified by two separate,
/// overlapping bucket tables. They look similar but do not agree at every
/// percentage and must stay independent.
#[must_use]
pub fn summarize(input: &MetricsInput) -> FinancialSummary {
    let total_income = input.total_income;
    let total_expense = input.total_expense;

    let balance = total_income - total_expense;

    let balance_percentage = if total_income > 0.0 {
        round2(balance / total_income * 100.0)
    } else {
        0.0
    };

    let saving_status = classify_saving_status(balance_percentage);
    let (ai_message, ai_color) = classify_balance(total_income, balance_percentage);

    let category_message = match &input.top_expense_category {
        Some((category, amount)) => format!(
            "You spend most on {} (₹{}). Consider reducing it.",
            category, amount
        ),
        None => "No expense data available yet.".to_string(),
    };

    let expense_ratio = if total_income > 0.0 {
        total_expense / total_income * 100.0
    } else {
        0.0
    };
    let expense_alert = classify_expense_ratio(expense_ratio).to_string();

    let recommended_needs = round2(total_income * 0.50);
    let recommended_wants = round2(total_income * 0.30);
    let recommended_savings = round2(total_income * 0.20);

    let actual_savings = input.actual_savings;
    let (savings_compare_msg, savings_compare_color) =
        compare_savings(total_income, actual_savings, recommended_savings);

    FinancialSummary {
        total_income,
        total_expense,
        balance,
        balance_percentage,
        saving_status,
        ai_message,
        ai_color,
        category_message,
        expense_alert,
        recommended_needs,
        recommended_wants,
        recommended_savings,
        actual_savings,
        savings_compare_msg,
        savings_compare_color,
    }
}

/// Buckets the rounded balance percentage into a saving-habit grade.
///
/// Buckets are closed on the lower end, non-overlapping, and exhaustive:
/// `<10` Poor, `[10,20)` Average, `[20,30)` Good, `>=30` Excellent.
#[must_use]
pub fn classify_saving_status(balance_percentage: f64) -> SavingStatus {
    if balance_percentage < 10.0 {
        SavingStatus::Poor
    } else if balance_percentage < 20.0 {
        SavingStatus::Average
    } else if balance_percentage < 30.0 {
        SavingStatus::Good
    } else {
        SavingStatus::Excellent
    }
}

/// Picks the headline commentary message and its color.
///
/// This ladder overlaps the saving-status buckets but is NOT the same
/// partition (e.g. 15% is an Average saver yet gets the info-colored
/// "moderate" message). Evaluated strictly in this order.
fn classify_balance(total_income: f64, balance_percentage: f64) -> (String, StatusColor) {
    if total_income == 0.0 {
        (
            "Start adding income to activate AI analysis.".to_string(),
            StatusColor::Secondary,
        )
    } else if balance_percentage < 0.0 {
        (
            "🚨 Your expenses exceed your income. Immediate financial control is needed."
                .to_string(),
            StatusColor::Danger,
        )
    } else if balance_percentage < 10.0 {
        (
            "⚠ Your remaining balance is very low. You are close to overspending.".to_string(),
            StatusColor::Warning,
        )
    } else if balance_percentage < 30.0 {
        (
            "🙂 Your balance is moderate, but better expense control can improve it.".to_string(),
            StatusColor::Info,
        )
    } else if balance_percentage < 50.0 {
        (
            "💪 Good job! You are maintaining a healthy remaining balance.".to_string(),
            StatusColor::Primary,
        )
    } else {
        (
            "🏆 Excellent! You have strong financial control and a high remaining balance."
                .to_string(),
            StatusColor::Success,
        )
    }
}

/// Grades the expense-to-income ratio. The ratio is compared raw, not rounded.
fn classify_expense_ratio(expense_ratio: f64) -> &'static str {
    if expense_ratio > 100.0 {
        "🚨 You are spending more than your income!"
    } else if expense_ratio > 80.0 {
        "⚠ Warning: You are close to overspending."
    } else {
        "✅ Your spending is under control."
    }
}

/// Compares actual savings against the 50/30/20 recommendation.
fn compare_savings(
    total_income: f64,
    actual_savings: f64,
    recommended_savings: f64,
) -> (String, StatusColor) {
    if total_income == 0.0 {
        (
            "Add income to activate savings analysis.".to_string(),
            StatusColor::Secondary,
        )
    } else if actual_savings > recommended_savings {
        let extra_saved = round2(actual_savings - recommended_savings);
        (
            format!(
                "🔥 You saved ₹{} more than recommended. Excellent discipline!",
                extra_saved
            ),
            StatusColor::Success,
        )
    } else if actual_savings == recommended_savings {
        (
            "🎯 Perfect! You saved exactly as recommended.".to_string(),
            StatusColor::Info,
        )
    } else if actual_savings < 0.0 {
        (
            "🚨 You are in deficit. Spending exceeds income.".to_string(),
            StatusColor::Danger,
        )
    } else {
        let less_saved = round2(recommended_savings - actual_savings);
        (
            format!(
                "⚠ You saved ₹{} less than recommended. Try increasing savings.",
                less_saved
            ),
            StatusColor::Warning,
        )
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;

    fn input(income: f64, expense: f64, savings: f64) -> MetricsInput {
        MetricsInput {
            total_income: income,
            total_expense: expense,
            actual_savings: savings,
            top_expense_category: None,
        }
    }

    #[test]
    fn balance_is_exact_difference() {
        let summary = summarize(&input(1000.0, 850.0, 0.0));
        assert_eq!(summary.balance, 150.0);
        assert_eq!(summary.balance, summary.total_income - summary.total_expense);
    }

    #[test]
    fn average_saver_scenario() {
        // income=1000, expense=850 -> 15% remaining
        let summary = summarize(&input(1000.0, 850.0, 0.0));
        assert_eq!(summary.balance_percentage, 15.0);
        assert_eq!(summary.saving_status, SavingStatus::Average);
        // The commentary ladder disagrees with the saving grade here: 15%
        // falls in its `<30` bucket and is info-colored.
        assert_eq!(summary.ai_color, StatusColor::Info);
        // expense_ratio = 85 -> warning band
        assert_eq!(summary.expense_alert, "⚠ Warning: You are close to overspending.");
    }

    #[test]
    fn zero_income_uses_activation_prompts() {
        let summary = summarize(&input(0.0, 0.0, 0.0));
        assert_eq!(summary.balance_percentage, 0.0);
        assert_eq!(summary.ai_message, "Start adding income to activate AI analysis.");
        assert_eq!(summary.ai_color, StatusColor::Secondary);
        assert_eq!(summary.savings_compare_msg, "Add income to activate savings analysis.");
        assert_eq!(summary.savings_compare_color, StatusColor::Secondary);
        assert_eq!(summary.expense_alert, "✅ Your spending is under control.");
    }

    #[test]
    fn zero_income_with_expenses_still_neutral() {
        // Division guards: expenses without income must not produce a ratio.
        let summary = summarize(&input(0.0, 300.0, 0.0));
        assert_eq!(summary.balance, -300.0);
        assert_eq!(summary.balance_percentage, 0.0);
        assert_eq!(summary.ai_color, StatusColor::Secondary);
        assert_eq!(summary.expense_alert, "✅ Your spending is under control.");
    }

    #[test]
    fn saving_status_boundaries_are_closed_below() {
        // Exactly 10, 20, 30 map to the next-higher bucket.
        assert_eq!(classify_saving_status(9.99), SavingStatus::Poor);
        assert_eq!(classify_saving_status(10.0), SavingStatus::Average);
        assert_eq!(classify_saving_status(19.99), SavingStatus::Average);
        assert_eq!(classify_saving_status(20.0), SavingStatus::Good);
        assert_eq!(classify_saving_status(29.99), SavingStatus::Good);
        assert_eq!(classify_saving_status(30.0), SavingStatus::Excellent);
    }

    #[test]
    fn rounding_happens_before_bucketing() {
        // 99.95/1000 = 9.995% rounds to 10.0 and must land in Average.
        let summary = summarize(&input(1000.0, 900.05, 0.0));
        assert_eq!(summary.balance_percentage, 10.0);
        assert_eq!(summary.saving_status, SavingStatus::Average);
    }

    #[test]
    fn overspending_is_danger_on_both_ladders() {
        let summary = summarize(&input(1000.0, 1200.0, 0.0));
        assert!(summary.balance_percentage < 0.0);
        assert_eq!(summary.saving_status, SavingStatus::Poor);
        assert_eq!(summary.ai_color, StatusColor::Danger);
        assert_eq!(summary.expense_alert, "🚨 You are spending more than your income!");
    }

    #[test]
    fn fifty_percent_remaining_is_success() {
        let summary = summarize(&input(1000.0, 500.0, 0.0));
        assert_eq!(summary.balance_percentage, 50.0);
        assert_eq!(summary.saving_status, SavingStatus::Excellent);
        assert_eq!(summary.ai_color, StatusColor::Success);
    }

    #[test]
    fn recommended_split_sums_to_income() {
        for income in [0.0, 500.0, 1000.0, 1234.56, 99999.99] {
            let summary = summarize(&input(income, 0.0, 0.0));
            let total = summary.recommended_needs
                + summary.recommended_wants
                + summary.recommended_savings;
            assert!((total - income).abs() < 0.02, "income {income}: split sums to {total}");
        }
    }

    #[test]
    fn recommended_split_follows_50_30_20() {
        let summary = summarize(&input(1000.0, 0.0, 0.0));
        assert_eq!(summary.recommended_needs, 500.0);
        assert_eq!(summary.recommended_wants, 300.0);
        assert_eq!(summary.recommended_savings, 200.0);
    }

    #[test]
    fn exact_recommended_savings_is_perfect_match() {
        // income=500 -> recommended savings 100; saving exactly 100 is the
        // info-colored exact-match message.
        let summary = summarize(&input(500.0, 0.0, 100.0));
        assert_eq!(summary.recommended_savings, 100.0);
        assert_eq!(summary.savings_compare_msg, "🎯 Perfect! You saved exactly as recommended.");
        assert_eq!(summary.savings_compare_color, StatusColor::Info);
    }

    #[test]
    fn surplus_savings_states_the_surplus() {
        let summary = summarize(&input(500.0, 0.0, 150.0));
        assert_eq!(summary.savings_compare_color, StatusColor::Success);
        assert!(summary.savings_compare_msg.contains("₹50"));
    }

    #[test]
    fn shortfall_savings_states_the_shortfall() {
        let summary = summarize(&input(500.0, 0.0, 60.0));
        assert_eq!(summary.savings_compare_color, StatusColor::Warning);
        assert!(summary.savings_compare_msg.contains("₹40"));
    }

    #[test]
    fn negative_savings_is_deficit() {
        let summary = summarize(&input(500.0, 0.0, -25.0));
        assert_eq!(summary.savings_compare_color, StatusColor::Danger);
        assert_eq!(summary.savings_compare_msg, "🚨 You are in deficit. Spending exceeds income.");
    }

    #[test]
    fn top_category_is_named_in_message() {
        let summary = summarize(&MetricsInput {
            total_income: 1000.0,
            total_expense: 400.0,
            actual_savings: 0.0,
            top_expense_category: Some(("Food".to_string(), 250.5)),
        });
        assert_eq!(
            summary.category_message,
            "You spend most on Food (₹250.5). Consider reducing it."
        );
    }

    #[test]
    fn no_expenses_yields_no_data_message() {
        let summary = summarize(&input(1000.0, 0.0, 0.0));
        assert_eq!(summary.category_message, "No expense data available yet.");
    }

    #[test]
    fn round2_rounds_to_two_decimals() {
        assert_eq!(round2(10.006), 10.01);
        assert_eq!(round2(33.333), 33.33);
        assert_eq!(round2(-10.006), -10.01);
    }
}
