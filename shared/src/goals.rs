//! Goal deriver
//!
//! Turns a calorie target into a structured macro goal and reconciles
//! calories back from hand-edited macros.
//!
//! Energy factors: protein 4 kcal/g, carbohydrates 4 kcal/g, fat 9 kcal/g.

use crate::energy::{total_daily_energy_expenditure, Profile};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
pub const KCAL_PER_GRAM_CARBS: f64 = 4.0;
pub const KCAL_PER_GRAM_FAT: f64 = 9.0;

/// The three tracked macronutrients
///
/// Declaration order is the tie-break priority used when ranking gaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Macro {
    Protein,
    Fat,
    Carbs,
}

impl Macro {
    pub const ALL: [Macro; 3] = [Macro::Protein, Macro::Fat, Macro::Carbs];

    /// Energy density in kcal per gram
    pub fn kcal_per_gram(&self) -> f64 {
        match self {
            Macro::Protein => KCAL_PER_GRAM_PROTEIN,
            Macro::Fat => KCAL_PER_GRAM_FAT,
            Macro::Carbs => KCAL_PER_GRAM_CARBS,
        }
    }
}

impl fmt::Display for Macro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Macro::Protein => "protein",
            Macro::Fat => "fat",
            Macro::Carbs => "carbs",
        };
        write!(f, "{}", name)
    }
}

/// Daily calorie and macro targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroGoal {
    /// kcal
    pub calories: i32,
    /// grams
    pub protein: i32,
    /// grams
    pub carbs: i32,
    /// grams
    pub fat: i32,
}

impl MacroGoal {
    /// Target grams for a single macro
    pub fn grams(&self, nutrient: Macro) -> i32 {
        match nutrient {
            Macro::Protein => self.protein,
            Macro::Fat => self.fat,
            Macro::Carbs => self.carbs,
        }
    }

    /// Manual macro edit: the other two macros stay untouched and calories
    /// are reconciled from the resulting grams.
    pub fn with_macro(&self, nutrient: Macro, grams: i32) -> MacroGoal {
        let mut goal = *self;
        match nutrient {
            Macro::Protein => goal.protein = grams,
            Macro::Fat => goal.fat = grams,
            Macro::Carbs => goal.carbs = grams,
        }
        goal.calories = reconcile_calories_from_macros(
            goal.protein as f64,
            goal.carbs as f64,
            goal.fat as f64,
        );
        goal
    }

    /// Manual calories edit: macros are not back-derived.
    pub fn with_calories(&self, calories: i32) -> MacroGoal {
        MacroGoal { calories, ..*self }
    }
}

impl Default for MacroGoal {
    fn default() -> Self {
        goals_for_profile(&Profile::default())
    }
}

/// Share of energy per macro
///
/// Ratios are not required to sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroSplit {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// 30% protein, 40% carbs, 30% fat by energy
pub const DEFAULT_SPLIT: MacroSplit = MacroSplit {
    protein: 0.30,
    carbs: 0.40,
    fat: 0.30,
};

/// Named macro distributions offered alongside the default split
///
/// Ratios are protein / carbs / fat shares of calories. Balanced is the
/// 30/40/30 default. HighProtein and LowCarb move calories toward protein
/// or fat; Endurance moves them toward carbs, after common sports-nutrition
/// goal splits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MacroPreset {
    #[default]
    Balanced,
    HighProtein,
    LowCarb,
    Endurance,
}

impl MacroPreset {
    pub fn split(&self) -> MacroSplit {
        match self {
            MacroPreset::Balanced => DEFAULT_SPLIT,
            MacroPreset::HighProtein => MacroSplit {
                protein: 0.40,
                carbs: 0.35,
                fat: 0.25,
            },
            MacroPreset::LowCarb => MacroSplit {
                protein: 0.35,
                carbs: 0.20,
                fat: 0.45,
            },
            MacroPreset::Endurance => MacroSplit {
                protein: 0.20,
                carbs: 0.55,
                fat: 0.25,
            },
        }
    }
}

/// Derive goals from a calorie target using the default 30/40/30 split
pub fn derive_goals_from_calories(calories: f64) -> MacroGoal {
    let split = DEFAULT_SPLIT;
    derive_goals_from_preset(calories, split.protein, split.carbs, split.fat)
}

/// Derive goals from a calorie target with caller-supplied ratios
///
/// Calories are rounded first; each macro is then rounded independently.
pub fn derive_goals_from_preset(
    current_calories: f64,
    protein_ratio: f64,
    carb_ratio: f64,
    fat_ratio: f64,
) -> MacroGoal {
    let calories = current_calories.round();
    MacroGoal {
        calories: calories as i32,
        protein: (calories * protein_ratio / KCAL_PER_GRAM_PROTEIN).round() as i32,
        carbs: (calories * carb_ratio / KCAL_PER_GRAM_CARBS).round() as i32,
        fat: (calories * fat_ratio / KCAL_PER_GRAM_FAT).round() as i32,
    }
}

/// Exact energy sum of the three macros, rounded to whole kcal
pub fn reconcile_calories_from_macros(protein: f64, carbs: f64, fat: f64) -> i32 {
    (protein * KCAL_PER_GRAM_PROTEIN + carbs * KCAL_PER_GRAM_CARBS + fat * KCAL_PER_GRAM_FAT)
        .round() as i32
}

/// Goals recomputed from a profile's TDEE with the default split
pub fn goals_for_profile(profile: &Profile) -> MacroGoal {
    derive_goals_from_calories(total_daily_energy_expenditure(profile) as f64)
}
