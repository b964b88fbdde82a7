use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_COOKING_TIME: u32 = 30;
pub const DEFAULT_PREP_TIME: u32 = 15;
pub const DEFAULT_SERVINGS: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        MealType::ALL
            .into_iter()
            .find(|m| m.as_str() == wanted)
            .ok_or_else(|| format!("unknown meal type '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single dish suggestion, as returned to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub meal_type: MealType,
    pub cooking_time: u32,
    pub prep_time: u32,
    pub servings: u32,
    pub difficulty: Difficulty,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub description: String,
    pub needs_extra_ingredients: bool,
    pub extra_ingredients: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedMeal {
    pub name: String,
    pub description: String,
    pub cooking_time: u32,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
}

/// One full day of meals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    pub breakfast: PlannedMeal,
    pub lunch: PlannedMeal,
    pub dinner: PlannedMeal,
    pub total_cooking_time: u32,
    pub shopping_list: Vec<String>,
    pub plan_name: String,
    pub plan_description: String,
}

pub const MEAL_SLOTS: [&str; 3] = ["breakfast", "lunch", "dinner"];

/// Name and description assigned to a plan by its position in a batch.
pub const PLAN_PROFILES: [(&str, &str); 3] = [
    ("Comfort Food Plan", "Hearty and satisfying meals"),
    ("Quick & Easy Plan", "Fast cooking, great taste"),
    ("Traditional Plan", "Classic Indian flavors"),
];

pub fn plan_profile(index: usize) -> (String, String) {
    match PLAN_PROFILES.get(index) {
        Some((name, description)) => (name.to_string(), description.to_string()),
        None => (format!("Plan {}", index + 1), "Delicious meal plan".to_string()),
    }
}

/// How a derived plan rewrites each meal slot of its base plan.
#[derive(Debug, Clone, Copy)]
pub struct PlanVariation {
    pub plan_name: &'static str,
    pub plan_description: &'static str,
    /// (name prefix, cooking minutes) for breakfast, lunch and dinner.
    pub slots: [(&'static str, u32); 3],
}

impl PlanVariation {
    pub fn total_cooking_time(&self) -> u32 {
        self.slots.iter().map(|(_, minutes)| minutes).sum()
    }
}

pub const PLAN_VARIATIONS: [PlanVariation; 2] = [
    PlanVariation {
        plan_name: "Quick & Easy Plan",
        plan_description: "Fast cooking, great taste",
        slots: [("Quick", 15), ("Easy", 20), ("Simple", 25)],
    },
    PlanVariation {
        plan_name: "Traditional Plan",
        plan_description: "Classic Indian flavors",
        slots: [("Traditional", 25), ("Classic", 35), ("Authentic", 40)],
    },
];

/// Variation for the plan at `position` (1 or 2) in a batch derived from one base plan.
pub fn variation_for_position(position: usize) -> &'static PlanVariation {
    PLAN_VARIATIONS
        .get(position.saturating_sub(1))
        .unwrap_or(&PLAN_VARIATIONS[0])
}

impl PlannedMeal {
    fn varied(&self, prefix: &str, minutes: u32) -> PlannedMeal {
        PlannedMeal {
            name: format!("{} {}", prefix, self.name),
            cooking_time: minutes,
            ..self.clone()
        }
    }
}

impl DayPlan {
    pub fn meals(&self) -> [&PlannedMeal; 3] {
        [&self.breakfast, &self.lunch, &self.dinner]
    }

    pub fn with_variation(&self, variation: &PlanVariation) -> DayPlan {
        let [(b_prefix, b_min), (l_prefix, l_min), (d_prefix, d_min)] = variation.slots;
        DayPlan {
            breakfast: self.breakfast.varied(b_prefix, b_min),
            lunch: self.lunch.varied(l_prefix, l_min),
            dinner: self.dinner.varied(d_prefix, d_min),
            total_cooking_time: variation.total_cooking_time(),
            shopping_list: self.shopping_list.clone(),
            plan_name: variation.plan_name.to_string(),
            plan_description: variation.plan_description.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_recipe_serializes_with_camel_case_keys() {
        let recipe = Recipe {
            id: "recipe-1".to_string(),
            name: "Aloo Gobi".to_string(),
            meal_type: MealType::Lunch,
            cooking_time: 25,
            prep_time: 10,
            servings: 4,
            difficulty: Difficulty::Easy,
            ingredients: vec!["Potato - 2 cups".to_string()],
            steps: vec!["Heat oil in a pan".to_string()],
            description: "Dry curry".to_string(),
            needs_extra_ingredients: false,
            extra_ingredients: vec![],
        };
        let value = serde_json::to_value(&recipe).unwrap();
        assert_eq!(value["mealType"], json!("lunch"));
        assert_eq!(value["cookingTime"], json!(25));
        assert_eq!(value["needsExtraIngredients"], json!(false));
        assert_eq!(value["difficulty"], json!("easy"));
    }

    fn meal(name: &str, minutes: u32) -> PlannedMeal {
        PlannedMeal {
            name: name.to_string(),
            description: "d".to_string(),
            cooking_time: minutes,
            ingredients: vec!["Rice - 1 cup".to_string()],
            steps: vec!["Cook".to_string()],
        }
    }

    #[test]
    fn test_variation_prefixes_names_and_resets_times() {
        let base = DayPlan {
            breakfast: meal("Poha", 20),
            lunch: meal("Rajma", 30),
            dinner: meal("Khichdi", 30),
            total_cooking_time: 80,
            shopping_list: vec!["Rajma".to_string()],
            plan_name: "Comfort Food Plan".to_string(),
            plan_description: "Hearty and satisfying meals".to_string(),
        };

        let traditional = base.with_variation(variation_for_position(2));
        assert_eq!(traditional.breakfast.name, "Traditional Poha");
        assert_eq!(traditional.lunch.name, "Classic Rajma");
        assert_eq!(traditional.dinner.cooking_time, 40);
        assert_eq!(traditional.total_cooking_time, 100);
        assert_eq!(traditional.plan_name, "Traditional Plan");
        assert_eq!(traditional.shopping_list, base.shopping_list);

        assert_eq!(base.with_variation(variation_for_position(1)).total_cooking_time, 60);
    }

    #[test]
    fn test_plan_profile_overflow_is_generic() {
        assert_eq!(plan_profile(0).0, "Comfort Food Plan");
        assert_eq!(plan_profile(4), ("Plan 5".to_string(), "Delicious meal plan".to_string()));
    }

    #[test]
    fn test_meal_type_parses_case_insensitively() {
        assert_eq!("Dinner".parse::<MealType>().unwrap(), MealType::Dinner);
        assert_eq!(" snack ".parse::<MealType>().unwrap(), MealType::Snack);
        assert!("brunch".parse::<MealType>().is_err());
    }
}
