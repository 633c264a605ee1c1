//! Expense analysis: breakdown, savings feasibility, and a ranked action
//! plan.
//!
//! The endpoint accepts two body shapes: expenses nested under an
//! `expenses` object, or expense-like numeric fields at the root. The
//! nested object takes precedence whenever it is present; root-level
//! scanning is only the fallback. Reserved fields (`savings_goal`,
//! `income`, `monthly_income`) are never treated as expenses.

use serde::Serialize;
use serde_json::{json, Map, Value};

const RESERVED_FIELDS: [&str; 3] = ["savings_goal", "income", "monthly_income"];

/// One expense category share in the breakdown, largest first.
#[derive(Debug, Clone, Serialize)]
pub struct BreakdownEntry {
    pub category: String,
    pub amount: f64,
    pub percent: f64,
}

pub fn analyze_finances(data: &Map<String, Value>) -> Value {
    let expenses = resolve_expenses(data);

    let savings_goal = data.get("savings_goal").and_then(to_f64).unwrap_or(0.0);
    let monthly_income = data
        .get("income")
        .or_else(|| data.get("monthly_income"))
        .and_then(to_f64);

    // Only positive amounts count as spending.
    let cleaned: Vec<(String, f64)> = expenses
        .into_iter()
        .filter_map(|(name, value)| (value > 0.0).then_some((name, value)))
        .collect();
    let total_spent: f64 = cleaned.iter().map(|(_, v)| v).sum();

    if total_spent == 0.0 {
        return json!({
            "risk_level": "unknown",
            "summary": {
                "total_spent": 0,
                "savings_goal": round2(savings_goal),
                "monthly_income": monthly_income.map(round2),
            },
            "key_insights": [
                "No expenses detected. Send expenses at root or under `expenses:{...}`."
            ],
            "breakdown": [],
            "action_plan": [{
                "priority": 1,
                "action": "Send your monthly expenses (e.g. rent, food, transport, subscriptions).",
                "expected_impact": "Enables real analysis"
            }]
        });
    }

    let required_income = (savings_goal > 0.0).then(|| total_spent + savings_goal);
    let disposable = monthly_income.map(|income| income - total_spent);
    let savings_feasible = disposable.map(|d| d >= savings_goal);

    let mut breakdown: Vec<BreakdownEntry> = cleaned
        .iter()
        .map(|(category, amount)| BreakdownEntry {
            category: category.clone(),
            amount: round2(*amount),
            percent: round1(amount / total_spent * 100.0),
        })
        .collect();
    breakdown.sort_by(|a, b| b.amount.partial_cmp(&a.amount).unwrap_or(std::cmp::Ordering::Equal));

    let mut insights: Vec<String> = Vec::new();
    let mut actions: Vec<Value> = Vec::new();

    if let Some(top) = breakdown.first() {
        if top.percent >= 40.0 {
            insights.push(format!(
                "'{}' is {}% of your spending (very dominant).",
                top.category, top.percent
            ));
            actions.push(json!({
                "priority": 1,
                "action": format!("Try reducing '{}' by 10-15%", top.category),
                "expected_impact": format!(
                    "Save about {} to {} / month",
                    round2(top.amount * 0.10),
                    round2(top.amount * 0.15)
                )
            }));
        }
    }

    if let Some((_, subscriptions)) = cleaned.iter().find(|(name, _)| name == "subscriptions") {
        let share = subscriptions / total_spent * 100.0;
        if share >= 10.0 {
            insights.push(format!(
                "Subscriptions are {}% of your spending.",
                round1(share)
            ));
            actions.push(json!({
                "priority": 2,
                "action": "Cancel/downgrade unused subscriptions (audit list)",
                "expected_impact": format!(
                    "Save about {} / month (typical)",
                    round2(subscriptions * 0.2)
                )
            }));
        }
    }

    if savings_goal > 0.0 {
        match (monthly_income, disposable, savings_feasible) {
            (None, _, _) => {
                insights.push(format!(
                    "To save {} / month, you need income = {} / month.",
                    round2(savings_goal),
                    round2(required_income.unwrap_or(0.0))
                ));
                actions.push(json!({
                    "priority": 3,
                    "action": "Add `monthly_income` to get feasibility + exact gap",
                    "expected_impact": "Accurate risk scoring + plan"
                }));
            }
            (Some(income), Some(d), Some(false)) => {
                let gap = savings_goal - d;
                insights.push(format!(
                    "With income {}, you're short by {} to hit your savings goal.",
                    round2(income),
                    round2(gap)
                ));
                actions.push(json!({
                    "priority": 0,
                    "action": format!(
                        "Reduce spending by at least {} or lower savings goal",
                        round2(gap)
                    ),
                    "expected_impact": "Makes the plan feasible"
                }));
            }
            _ => {}
        }
    }

    let risk_level = match (monthly_income, disposable, savings_feasible) {
        (None, _, _) => {
            if savings_goal > 0.0 {
                "medium"
            } else {
                "low"
            }
        }
        (Some(_), Some(d), feasible) => {
            if d < 0.0 || (savings_goal > 0.0 && feasible == Some(false)) {
                "high"
            } else if savings_goal > 0.0 && d < savings_goal * 1.2 {
                "medium"
            } else {
                "low"
            }
        }
        _ => "low",
    };

    if actions.is_empty() {
        actions.push(json!({
            "priority": 5,
            "action": "Automate savings transfer on payday",
            "expected_impact": "Consistency and less overspending"
        }));
    }
    actions.sort_by_key(|a| a["priority"].as_i64().unwrap_or(i64::MAX));

    json!({
        "risk_level": risk_level,
        "summary": {
            "monthly_income": monthly_income.map(round2),
            "total_spent": round2(total_spent),
            "savings_goal": round2(savings_goal),
            "required_income_for_goal": required_income.map(round2),
            "disposable_after_expenses": disposable.map(round2),
        },
        "breakdown": breakdown,
        "key_insights": insights,
        "action_plan": actions,
    })
}

/// Pick the expense map: a nested `expenses` object wins; otherwise every
/// numeric-looking root field that is not reserved.
fn resolve_expenses(data: &Map<String, Value>) -> Vec<(String, f64)> {
    if let Some(Value::Object(nested)) = data.get("expenses") {
        return nested
            .iter()
            .map(|(k, v)| (k.clone(), to_f64(v).unwrap_or(0.0)))
            .collect();
    }

    data.iter()
        .filter(|(key, _)| !RESERVED_FIELDS.contains(&key.as_str()))
        .filter_map(|(key, value)| to_f64(value).map(|v| (key.clone(), v)))
        .collect()
}

fn to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
