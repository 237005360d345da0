//! Recommendation ranker
//!
//! Scores the catalog by nutrient density toward the largest unmet macro
//! gap. This is a heuristic, not an optimizer.

use crate::goals::{Macro, MacroGoal};
use crate::models::{FoodItem, Nutrients};
use serde::{Deserialize, Serialize};

/// Default number of recommendations
pub const DEFAULT_TOP_N: usize = 3;

/// Below this remaining gap (grams) a macro counts as nearly satisfied,
/// paired with the divisor of its score penalty
const PROTEIN_DAMPENER: (f64, f64) = (10.0, 10.0);
const FAT_DAMPENER: (f64, f64) = (5.0, 5.0);
const CARBS_DAMPENER: (f64, f64) = (15.0, 10.0);

/// Remaining amounts until the goal is met; negative when exceeded
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutrientGaps {
    pub calories: i32,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

impl NutrientGaps {
    pub fn between(goal: &MacroGoal, consumed: &Nutrients) -> Self {
        Self {
            calories: goal.calories.saturating_sub(consumed.calories),
            protein: goal.protein as f64 - consumed.protein,
            fat: goal.fat as f64 - consumed.fat,
            carbs: goal.carbs as f64 - consumed.carbs,
        }
    }

    pub fn grams(&self, nutrient: Macro) -> f64 {
        match nutrient {
            Macro::Protein => self.protein,
            Macro::Fat => self.fat,
            Macro::Carbs => self.carbs,
        }
    }

    /// Largest macro gap; ties go to the earlier of protein, fat, carbs
    pub fn largest(&self) -> Macro {
        Macro::ALL
            .into_iter()
            .fold(Macro::Protein, |best, candidate| {
                if self.grams(candidate) > self.grams(best) {
                    candidate
                } else {
                    best
                }
            })
    }
}

/// Why a food was recommended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationReason {
    RichInProtein,
    HealthyFats,
    Energy,
}

impl RecommendationReason {
    pub fn for_macro(nutrient: Macro) -> Self {
        match nutrient {
            Macro::Protein => RecommendationReason::RichInProtein,
            Macro::Fat => RecommendationReason::HealthyFats,
            Macro::Carbs => RecommendationReason::Energy,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RecommendationReason::RichInProtein => "Rich in protein",
            RecommendationReason::HealthyFats => "Healthy fats",
            RecommendationReason::Energy => "Good energy source",
        }
    }
}

/// A scored catalog item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedFood {
    pub food_id: String,
    pub name: String,
    pub icon: String,
    pub score: f64,
    pub target: Macro,
    pub reason: RecommendationReason,
}

fn per_100g(food: &FoodItem, nutrient: Macro) -> f64 {
    match nutrient {
        Macro::Protein => food.protein,
        Macro::Fat => food.fat,
        Macro::Carbs => food.carbs,
    }
}

/// Density of `target` per kcal (x100), dampened for nearly met macros
pub fn score_food(food: &FoodItem, target: Macro, gaps: &NutrientGaps) -> f64 {
    let calories = if food.calories == 0.0 { 1.0 } else { food.calories };
    let mut score = per_100g(food, target) / calories * 100.0;

    for (nutrient, (threshold, divisor)) in [
        (Macro::Protein, PROTEIN_DAMPENER),
        (Macro::Fat, FAT_DAMPENER),
        (Macro::Carbs, CARBS_DAMPENER),
    ] {
        if gaps.grams(nutrient) < threshold {
            score -= per_100g(food, nutrient) / divisor;
        }
    }

    score
}

/// Top `top_n` foods for the neediest macro; empty once calories are met
pub fn rank_recommendations(
    catalog: &[FoodItem],
    consumed: &Nutrients,
    goal: &MacroGoal,
    top_n: usize,
) -> Vec<RankedFood> {
    let gaps = NutrientGaps::between(goal, consumed);
    if gaps.calories <= 0 {
        return Vec::new();
    }

    let target = gaps.largest();
    let reason = RecommendationReason::for_macro(target);

    let mut ranked: Vec<RankedFood> = catalog
        .iter()
        .map(|food| RankedFood {
            food_id: food.id.clone(),
            name: food.name.clone(),
            icon: food.display_icon().to_string(),
            score: score_food(food, target, &gaps),
            target,
            reason,
        })
        .collect();

    // Stable: equal scores keep catalog order
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked.truncate(top_n);
    ranked
}
