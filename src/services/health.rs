//! Rule-based burnout risk scoring.
//!
//! Pure conditional arithmetic over the reported sleep, stress, hydration,
//! and exercise figures. Thresholds follow common wellness guidance; the
//! output is a risk level, per-factor assessments, and ranked
//! recommendations.

use serde::{Deserialize, Serialize};

/// Request body for the health analyzer. Missing fields score as zero.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HealthInput {
    pub sleep_hours: f64,
    pub water_intake_liters: f64,
    pub exercise_minutes: f64,
    pub stress_level: String,
}

impl Default for HealthInput {
    fn default() -> Self {
        Self {
            sleep_hours: 0.0,
            water_intake_liters: 0.0,
            exercise_minutes: 0.0,
            stress_level: "unknown".to_string(),
        }
    }
}

/// Per-factor assessment strings.
#[derive(Debug, Clone, Serialize)]
pub struct RiskFactors {
    pub sleep: String,
    pub stress: String,
    pub hydration: String,
    pub exercise: String,
}

/// Full analyzer output.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub burnout_risk: String,
    pub risk_factors: RiskFactors,
    pub recommendations: Vec<String>,
    pub priority_action: String,
}

pub fn analyze_health(input: HealthInput) -> HealthReport {
    let mut score = 0u32;

    let sleep = if input.sleep_hours < 6.0 {
        score += 3;
        "critically low"
    } else if input.sleep_hours < 7.0 {
        score += 2;
        "below recommended minimum"
    } else {
        "adequate"
    };

    let stress = match input.stress_level.as_str() {
        "high" => {
            score += 3;
            "high stress reported"
        }
        "medium" => {
            score += 1;
            "moderate stress"
        }
        _ => "low stress",
    };

    let hydration = if input.water_intake_liters < 1.5 {
        score += 2;
        "low hydration"
    } else if input.water_intake_liters < 2.0 {
        score += 1;
        "slightly low hydration"
    } else {
        "good hydration"
    };

    let exercise = if input.exercise_minutes < 10.0 {
        score += 2;
        "very low activity"
    } else if input.exercise_minutes < 30.0 {
        "light activity"
    } else {
        "good activity level"
    };

    let burnout_risk = if score >= 7 {
        "high"
    } else if score >= 4 {
        "medium"
    } else {
        "low"
    };

    let mut recommendations = Vec::new();
    if input.sleep_hours < 7.0 {
        recommendations.push("Increase sleep to 7-8 hours per night".to_string());
    }
    if input.stress_level == "high" {
        recommendations
            .push("Add daily stress-reduction activities (10-15 minutes)".to_string());
    }
    if input.water_intake_liters < 2.0 {
        recommendations.push("Increase water intake to 2-2.5 liters per day".to_string());
    }
    if input.exercise_minutes < 30.0 {
        recommendations
            .push("Aim for at least 30 minutes of light exercise per day".to_string());
    }

    let priority_action = recommendations
        .first()
        .cloned()
        .unwrap_or_else(|| "Maintain current habits".to_string());

    HealthReport {
        burnout_risk: burnout_risk.to_string(),
        risk_factors: RiskFactors {
            sleep: sleep.to_string(),
            stress: stress.to_string(),
            hydration: hydration.to_string(),
            exercise: exercise.to_string(),
        },
        recommendations,
        priority_action,
    }
}
