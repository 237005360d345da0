//! Advice service - short coaching text from the day's numbers
//!
//! Two producers share one async trait: a scripted rule-based advisor and an
//! Ollama-backed one. Neither ever fails; the LLM advisor degrades to a fixed
//! fallback line when the endpoint is unreachable or returns garbage.

use crate::config::AdviceConfig;
use async_trait::async_trait;
use nutritrack_shared::{summarize_trend, MacroGoal, Nutrients, TrendDay};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Returned whenever generated advice is unavailable
pub const FALLBACK_ADVICE: &str =
    "Keep your meals balanced and listen to your body. You've got this!";

/// Numeric input for daily advice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviceRequest {
    pub consumed: Nutrients,
    pub goal: MacroGoal,
    /// Newest first
    pub recent_foods: Vec<String>,
}

impl AdviceRequest {
    pub fn remaining_calories(&self) -> i32 {
        self.goal.calories.saturating_sub(self.consumed.calories)
    }
}

/// Produces advice text; implementations must not fail
#[async_trait]
pub trait AdviceProducer: Send + Sync {
    async fn daily_advice(&self, request: &AdviceRequest) -> String;
    async fn trend_advice(&self, days: &[TrendDay]) -> String;
}

/// Pick the producer selected by configuration
pub fn advisor_from_config(config: &AdviceConfig) -> Box<dyn AdviceProducer> {
    if config.enabled {
        Box::new(OllamaAdvisor::new(config))
    } else {
        Box::new(RuleBasedAdvisor)
    }
}

/// Scripted advice from thresholds on the numeric summary
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedAdvisor;

impl RuleBasedAdvisor {
    fn daily_text(request: &AdviceRequest) -> String {
        let goal = &request.goal;
        let consumed = &request.consumed;
        let remaining = request.remaining_calories();

        if request.recent_foods.is_empty() && consumed.calories == 0 {
            return "Nothing logged yet today. A protein-rich breakfast is a good way to start."
                .to_string();
        }

        if remaining <= 0 {
            return format!(
                "You've reached today's {} kcal target. If you're still hungry, pick low-density vegetables such as broccoli or leafy greens.",
                goal.calories
            );
        }

        let protein_ratio = if goal.protein > 0 {
            consumed.protein / goal.protein as f64
        } else {
            1.0
        };
        let calorie_ratio = if goal.calories > 0 {
            consumed.calories as f64 / goal.calories as f64
        } else {
            1.0
        };

        if protein_ratio < calorie_ratio * 0.75 {
            return format!(
                "Protein is lagging at {:.1} / {} g. Add a lean source like chicken breast, shrimp or tofu to your next meal.",
                consumed.protein, goal.protein
            );
        }

        if (remaining as f64) < goal.calories as f64 * 0.1 {
            return format!(
                "Only {} kcal left today. Lean on vegetables and lean protein to finish on target.",
                remaining
            );
        }

        format!(
            "Good balance so far with {} kcal still available. Keep it steady!",
            remaining
        )
    }

    fn trend_text(days: &[TrendDay]) -> String {
        let summary = summarize_trend(days);
        if summary.days_logged == 0 {
            return "No meals logged this week yet. Logging consistently makes the weekly picture meaningful."
                .to_string();
        }

        let mut text = format!(
            "You logged {} of {} days, averaging {:.0} kcal against a {} kcal goal.",
            summary.days_logged,
            summary.days,
            summary.logged_average_calories,
            summary.calorie_goal
        );
        if summary.days_over_goal > 0 {
            text.push_str(&format!(
                " {} day(s) went over target; plan lighter dinners after heavy lunches.",
                summary.days_over_goal
            ));
        }
        if summary.logged_average_protein < summary.protein_goal as f64 * 0.8 {
            text.push_str(&format!(
                " Protein averaged {:.0} g, below the {} g goal.",
                summary.logged_average_protein, summary.protein_goal
            ));
        }
        text
    }
}

#[async_trait]
impl AdviceProducer for RuleBasedAdvisor {
    async fn daily_advice(&self, request: &AdviceRequest) -> String {
        Self::daily_text(request)
    }

    async fn trend_advice(&self, days: &[TrendDay]) -> String {
        Self::trend_text(days)
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Advice generated by a local Ollama model
#[derive(Debug, Clone)]
pub struct OllamaAdvisor {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaAdvisor {
    pub fn new(config: &AdviceConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "Failed to build HTTP client, using defaults");
                reqwest::Client::new()
            });

        Self {
            client,
            base_url: config.ollama_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        }
    }

    fn daily_prompt(request: &AdviceRequest) -> String {
        let consumed = &request.consumed;
        let goal = &request.goal;
        let recent = if request.recent_foods.is_empty() {
            "nothing yet".to_string()
        } else {
            request.recent_foods.join(", ")
        };

        format!(
            "Here is my nutrition intake so far today:\n\
             - Calories: {} / goal {} kcal\n\
             - Protein: {:.1} / {} g\n\
             - Fat: {:.1} / {} g\n\
             - Carbs: {:.1} / {} g\n\
             Recently eaten: {}\n\n\
             Give a short, professional and encouraging piece of nutrition advice (under 60 words). \
             If protein is low, stress topping it up; if calories are close to the limit, suggest low-density vegetables.",
            consumed.calories,
            goal.calories,
            consumed.protein,
            goal.protein,
            consumed.fat,
            goal.fat,
            consumed.carbs,
            goal.carbs,
            recent
        )
    }

    fn trend_prompt(days: &[TrendDay]) -> String {
        let lines: Vec<String> = days
            .iter()
            .map(|d| {
                format!(
                    "- {}: {} / {} kcal, protein {:.0} / {} g",
                    d.date, d.calories, d.goal, d.protein, d.protein_goal
                )
            })
            .collect();

        format!(
            "Here is my calorie and protein intake for the last {} days:\n{}\n\n\
             Summarize the trend in two sentences and give one concrete suggestion for next week.",
            days.len(),
            lines.join("\n")
        )
    }

    async fn generate(&self, prompt: String) -> Result<String, reqwest::Error> {
        let url = format!("{}/api/generate", self.base_url);
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let response: GenerateResponse = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response.response.trim().to_string())
    }

    async fn generate_or_fallback(&self, prompt: String) -> String {
        match self.generate(prompt).await {
            Ok(text) if !text.is_empty() => {
                debug!(model = %self.model, chars = text.len(), "Generated advice");
                text
            }
            Ok(_) => {
                warn!(model = %self.model, "Advice model returned an empty response");
                FALLBACK_ADVICE.to_string()
            }
            Err(e) => {
                warn!(error = %e, model = %self.model, "Advice generation failed");
                FALLBACK_ADVICE.to_string()
            }
        }
    }
}

#[async_trait]
impl AdviceProducer for OllamaAdvisor {
    async fn daily_advice(&self, request: &AdviceRequest) -> String {
        self.generate_or_fallback(Self::daily_prompt(request)).await
    }

    async fn trend_advice(&self, days: &[TrendDay]) -> String {
        self.generate_or_fallback(Self::trend_prompt(days)).await
    }
}
