//! Strict, non-coercive gate between cleaned model output and the typed domain model.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use thiserror::Error;

use crate::prompt_builder::DAY_PLAN_COUNT;
use crate::recipe_model::{DayPlan, Recipe};

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("shape mismatch: {0}")]
    Shape(#[from] serde_json::Error),
    #[error("{field} must be positive (item {index})")]
    NonPositive { field: &'static str, index: usize },
    #[error("duplicate recipe id '{0}'")]
    DuplicateId(String),
    #[error("recipe {index} lists extra ingredients but does not need any")]
    UnexpectedExtras { index: usize },
    #[error("expected {expected} day plans, got {found}")]
    PlanCount { expected: usize, found: usize },
    #[error("duplicate plan name '{0}'")]
    DuplicatePlanName(String),
}

#[derive(Deserialize)]
struct RecipeBatch {
    recipes: Vec<Recipe>,
}

fn ensure_positive(value: u32, field: &'static str, index: usize) -> Result<(), ValidationError> {
    if value == 0 {
        return Err(ValidationError::NonPositive { field, index });
    }
    Ok(())
}

pub fn validate_recipes(payload: &Value) -> Result<Vec<Recipe>, ValidationError> {
    let batch = RecipeBatch::deserialize(payload)?;

    let mut ids = HashSet::new();
    for (index, recipe) in batch.recipes.iter().enumerate() {
        ensure_positive(recipe.cooking_time, "cookingTime", index)?;
        ensure_positive(recipe.prep_time, "prepTime", index)?;
        ensure_positive(recipe.servings, "servings", index)?;
        if !recipe.needs_extra_ingredients && !recipe.extra_ingredients.is_empty() {
            return Err(ValidationError::UnexpectedExtras { index });
        }
        if !ids.insert(recipe.id.as_str()) {
            return Err(ValidationError::DuplicateId(recipe.id.clone()));
        }
    }
    Ok(batch.recipes)
}

pub fn validate_day_plans(payload: &Value) -> Result<Vec<DayPlan>, ValidationError> {
    let plans = Vec::<DayPlan>::deserialize(payload)?;
    if plans.len() != DAY_PLAN_COUNT {
        return Err(ValidationError::PlanCount {
            expected: DAY_PLAN_COUNT,
            found: plans.len(),
        });
    }

    let mut names = HashSet::new();
    for (index, plan) in plans.iter().enumerate() {
        ensure_positive(plan.total_cooking_time, "totalCookingTime", index)?;
        for meal in plan.meals() {
            ensure_positive(meal.cooking_time, "cookingTime", index)?;
        }
        if !names.insert(plan.plan_name.as_str()) {
            return Err(ValidationError::DuplicatePlanName(plan.plan_name.clone()));
        }
    }
    Ok(plans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe_model::{Difficulty, MealType};
    use serde_json::json;

    fn recipe_json(id: &str) -> Value {
        json!({
            "id": id,
            "name": "Jeera Rice",
            "mealType": "lunch",
            "cookingTime": 20,
            "prepTime": 10,
            "servings": 4,
            "difficulty": "easy",
            "ingredients": ["Basmati rice - 1 cup"],
            "steps": ["Wash rice", "Boil"],
            "description": "Cumin rice",
            "needsExtraIngredients": false,
            "extraIngredients": []
        })
    }

    fn meal_json(name: &str) -> Value {
        json!({"name": name, "description": "d", "cookingTime": 20, "ingredients": ["x"], "steps": ["y"]})
    }

    fn plan_json(name: &str) -> Value {
        json!({
            "breakfast": meal_json("Poha"),
            "lunch": meal_json("Rajma"),
            "dinner": meal_json("Khichdi"),
            "totalCookingTime": 60,
            "shoppingList": [],
            "planName": name,
            "planDescription": "desc"
        })
    }

    #[test]
    fn test_well_formed_batch_is_accepted() {
        let recipes = validate_recipes(&json!({"recipes": [recipe_json("a"), recipe_json("b")]})).unwrap();
        assert_eq!(recipes.len(), 2);
        assert_eq!(recipes[0].meal_type, MealType::Lunch);
        assert_eq!(recipes[1].difficulty, Difficulty::Easy);
    }

    #[test]
    fn test_enum_outside_closed_set_is_rejected() {
        let mut recipe = recipe_json("a");
        recipe["mealType"] = json!("brunch");
        assert!(matches!(
            validate_recipes(&json!({"recipes": [recipe]})),
            Err(ValidationError::Shape(_))
        ));
    }

    #[test]
    fn test_wrong_primitive_kind_is_rejected() {
        let mut recipe = recipe_json("a");
        recipe["cookingTime"] = json!("20");
        assert!(validate_recipes(&json!({"recipes": [recipe]})).is_err());

        let mut recipe = recipe_json("a");
        recipe.as_object_mut().unwrap().remove("description");
        assert!(validate_recipes(&json!({"recipes": [recipe]})).is_err());
    }

    #[test]
    fn test_invariants_are_enforced() {
        let mut recipe = recipe_json("a");
        recipe["servings"] = json!(0);
        assert!(matches!(
            validate_recipes(&json!({"recipes": [recipe]})),
            Err(ValidationError::NonPositive { field: "servings", index: 0 })
        ));

        assert!(matches!(
            validate_recipes(&json!({"recipes": [recipe_json("a"), recipe_json("a")]})),
            Err(ValidationError::DuplicateId(_))
        ));

        let mut recipe = recipe_json("a");
        recipe["extraIngredients"] = json!(["Saffron"]);
        assert!(matches!(
            validate_recipes(&json!({"recipes": [recipe]})),
            Err(ValidationError::UnexpectedExtras { index: 0 })
        ));
    }

    #[test]
    fn test_day_plans_need_three_distinct_names() {
        let ok = json!([plan_json("A"), plan_json("B"), plan_json("C")]);
        assert_eq!(validate_day_plans(&ok).unwrap().len(), 3);

        let short = json!([plan_json("A"), plan_json("B")]);
        assert!(matches!(
            validate_day_plans(&short),
            Err(ValidationError::PlanCount { expected: 3, found: 2 })
        ));

        let dupes = json!([plan_json("A"), plan_json("B"), plan_json("A")]);
        assert!(matches!(validate_day_plans(&dupes), Err(ValidationError::DuplicatePlanName(_))));
    }
}
