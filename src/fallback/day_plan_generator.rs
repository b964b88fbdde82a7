use crate::recipe_model::{plan_profile, variation_for_position, DayPlan, PlannedMeal};

const GENERIC_MAIN: &str = "Vegetable";

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn base_plan(main: &str) -> DayPlan {
    let (plan_name, plan_description) = plan_profile(0);
    DayPlan {
        breakfast: PlannedMeal {
            name: format!("{} Paratha", main),
            description: "Easy stuffed bread".to_string(),
            cooking_time: 20,
            ingredients: vec![
                "Wheat flour - 2 cups".to_string(),
                format!("{} - 1 cup", main),
                "Salt - as needed".to_string(),
                "Oil - for cooking".to_string(),
            ],
            steps: strings(&["Mix flour with water", "Make filling", "Roll and stuff", "Cook on pan", "Serve hot"]),
        },
        lunch: PlannedMeal {
            name: format!("{} Rice", main),
            description: "Simple rice dish".to_string(),
            cooking_time: 25,
            ingredients: vec![
                "Rice - 1 cup".to_string(),
                format!("{} - 1 cup", main),
                "Onion - 1 piece".to_string(),
                "Salt - as needed".to_string(),
            ],
            steps: strings(&["Wash rice", "Heat oil", "Add ingredients", "Cook together", "Serve hot"]),
        },
        dinner: PlannedMeal {
            name: format!("{} Curry", main),
            description: "Tasty curry".to_string(),
            cooking_time: 30,
            ingredients: vec![
                format!("{} - 2 cups", main),
                "Onion - 2 pieces".to_string(),
                "Tomato - 2 pieces".to_string(),
                "Spices - as needed".to_string(),
            ],
            steps: strings(&[
                "Heat oil",
                "Add onions",
                "Add tomatoes",
                "Add spices",
                "Add main ingredient",
                "Cook well",
                "Serve",
            ]),
        },
        total_cooking_time: 75,
        shopping_list: strings(&["Wheat flour", "Rice", "Onions", "Tomatoes"]),
        plan_name,
        plan_description,
    }
}

/// Three offline plans built around the first ingredient: a base plan plus its two fixed
/// variations.
pub fn generate_fallback_day_plans(ingredients: &[String]) -> Vec<DayPlan> {
    let main = ingredients
        .first()
        .map(String::as_str)
        .filter(|name| !name.trim().is_empty())
        .unwrap_or(GENERIC_MAIN);

    let base = base_plan(main.trim());
    let quick = base.with_variation(variation_for_position(1));
    let traditional = base.with_variation(variation_for_position(2));
    tracing::debug!(main, "generated fallback day plans");
    vec![base, quick, traditional]
}
