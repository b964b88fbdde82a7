//! Best-effort repair of untrusted model output before strict validation.
//!
//! Everything here works on `serde_json::Value` and only ever coerces fields toward the shape the
//! validator expects. Nothing is rejected here except payloads too broken to repair.

use serde_json::{json, Map, Value};

use crate::error::PipelineError;
use crate::prompt_builder::DAY_PLAN_COUNT;
use crate::recipe_model::{
    plan_profile, variation_for_position, Difficulty, MealType, PlanVariation, DEFAULT_COOKING_TIME,
    DEFAULT_PREP_TIME, DEFAULT_SERVINGS, MEAL_SLOTS,
};

const DEFAULT_MEAL_TYPE: MealType = MealType::Lunch;
const DEFAULT_DIFFICULTY: Difficulty = Difficulty::Easy;

const MEAL_COOKING_TIME: u32 = 20;
const PLAN_TOTAL_COOKING_TIME: u32 = 60;
const PLACEHOLDER_INGREDIENT: &str = "Basic ingredients";
const PLACEHOLDER_STEP: &str = "Simple cooking steps";

/// Leading-integer parse in the spirit of `parseInt`: optional sign, then digits.
fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(digits.len());
    let parsed = digits[..end].parse::<i64>().ok()?;
    Some(if negative { -parsed } else { parsed })
}

/// Coerces a number or numeric string to a positive integer; anything else yields `default`.
pub fn coerce_positive_int(value: Option<&Value>, default: u32) -> u32 {
    let parsed = match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Some(Value::String(s)) => parse_leading_int(s),
        _ => None,
    };
    parsed
        .filter(|&n| n > 0)
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(default)
}

/// JavaScript-style truthiness, which is what models emitting `"true"` or `1` expect.
pub fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// First `|`-separated member found in `valid`, else `default`.
fn pick_enum<T: Copy>(value: Option<&Value>, valid: &[T], as_str: fn(&T) -> &'static str, default: T) -> T {
    let Some(Value::String(raw)) = value else {
        return default;
    };
    raw.split('|')
        .map(|part| part.trim().to_lowercase())
        .find_map(|part| valid.iter().copied().find(|v| as_str(v) == part))
        .unwrap_or(default)
}

fn array_or(value: Option<&Value>, default: Vec<Value>) -> Value {
    match value {
        Some(Value::Array(items)) => Value::Array(items.clone()),
        _ => Value::Array(default),
    }
}

fn non_empty_string(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn clean_recipe(recipe: &mut Map<String, Value>) {
    let meal_type = pick_enum(recipe.get("mealType"), &MealType::ALL, MealType::as_str, DEFAULT_MEAL_TYPE);
    let difficulty = pick_enum(
        recipe.get("difficulty"),
        &Difficulty::ALL,
        Difficulty::as_str,
        DEFAULT_DIFFICULTY,
    );
    recipe.insert("mealType".into(), json!(meal_type.as_str()));
    recipe.insert("difficulty".into(), json!(difficulty.as_str()));

    for (key, default) in [
        ("cookingTime", DEFAULT_COOKING_TIME),
        ("prepTime", DEFAULT_PREP_TIME),
        ("servings", DEFAULT_SERVINGS),
    ] {
        let coerced = coerce_positive_int(recipe.get(key), default);
        recipe.insert(key.into(), json!(coerced));
    }

    for key in ["ingredients", "steps", "extraIngredients"] {
        let coerced = array_or(recipe.get(key), Vec::new());
        recipe.insert(key.into(), coerced);
    }

    let needs_extra = truthy(recipe.get("needsExtraIngredients"));
    recipe.insert("needsExtraIngredients".into(), json!(needs_extra));
    if !needs_extra {
        recipe.insert("extraIngredients".into(), json!([]));
    }
}

/// Repairs a `{ "recipes": [...] }` payload in place. Without a recipes array nothing is repaired.
pub fn clean_recipe_payload(mut payload: Value) -> Result<Value, PipelineError> {
    let Some(Value::Array(recipes)) = payload.get_mut("recipes") else {
        return Err(PipelineError::MissingRecipesArray);
    };
    for recipe in recipes.iter_mut() {
        if let Value::Object(fields) = recipe {
            clean_recipe(fields);
        }
    }
    Ok(payload)
}

fn placeholder_meal(name: String, description: String) -> Value {
    json!({
        "name": name,
        "description": description,
        "cookingTime": MEAL_COOKING_TIME,
        "ingredients": [PLACEHOLDER_INGREDIENT],
        "steps": [PLACEHOLDER_STEP],
    })
}

fn clean_meal(value: Option<&Value>, slot: &str) -> Value {
    match value {
        Some(Value::String(name)) if !name.trim().is_empty() => {
            placeholder_meal(name.clone(), format!("Simple {} dish", slot))
        }
        Some(Value::Object(fields)) => {
            let mut meal = fields.clone();
            let name = non_empty_string(fields.get("name")).unwrap_or_else(|| format!("Simple {}", slot));
            let description = non_empty_string(fields.get("description"))
                .unwrap_or_else(|| format!("Easy {} recipe", slot));
            meal.insert("name".into(), json!(name));
            meal.insert("description".into(), json!(description));
            meal.insert(
                "cookingTime".into(),
                json!(coerce_positive_int(fields.get("cookingTime"), MEAL_COOKING_TIME)),
            );
            meal.insert(
                "ingredients".into(),
                array_or(fields.get("ingredients"), vec![json!(PLACEHOLDER_INGREDIENT)]),
            );
            meal.insert("steps".into(), array_or(fields.get("steps"), vec![json!(PLACEHOLDER_STEP)]));
            Value::Object(meal)
        }
        _ => {
            let mut title = slot.to_string();
            if let Some(first) = title.get_mut(0..1) {
                first.make_ascii_uppercase();
            }
            placeholder_meal(format!("Simple {}", title), format!("Easy {} recipe", slot))
        }
    }
}

fn clean_single_plan(plan: &Value, index: usize) -> Value {
    let mut cleaned = match plan {
        Value::Object(fields) => fields.clone(),
        _ => Map::new(),
    };
    for slot in MEAL_SLOTS {
        let meal = clean_meal(cleaned.get(slot), slot);
        cleaned.insert(slot.into(), meal);
    }
    let total = coerce_positive_int(cleaned.get("totalCookingTime"), PLAN_TOTAL_COOKING_TIME);
    cleaned.insert("totalCookingTime".into(), json!(total));
    let shopping_list = array_or(cleaned.get("shoppingList"), Vec::new());
    cleaned.insert("shoppingList".into(), shopping_list);

    let (name, description) = plan_profile(index);
    cleaned.insert("planName".into(), json!(name));
    cleaned.insert("planDescription".into(), json!(description));
    Value::Object(cleaned)
}

fn apply_variation(base: &Value, variation: &PlanVariation) -> Value {
    let mut derived = base.clone();
    for (slot, (prefix, minutes)) in MEAL_SLOTS.iter().zip(variation.slots) {
        if let Some(Value::Object(meal)) = derived.get_mut(*slot) {
            let base_name = meal.get("name").and_then(Value::as_str).unwrap_or_default().to_string();
            meal.insert("name".into(), json!(format!("{} {}", prefix, base_name)));
            meal.insert("cookingTime".into(), json!(minutes));
        }
    }
    if let Value::Object(fields) = &mut derived {
        fields.insert("totalCookingTime".into(), json!(variation.total_cooking_time()));
        fields.insert("planName".into(), json!(variation.plan_name));
        fields.insert("planDescription".into(), json!(variation.plan_description));
    }
    derived
}

/// Reconciles a day-plan payload into an array of at least three cleaned plans.
///
/// A `plans` array is cleaned element by element; a bare plan object is cleaned and then
/// extended with the two fixed variations. Short `plans` arrays are padded the same way.
pub fn clean_day_plan_payload(payload: Value) -> Result<Value, PipelineError> {
    if !payload.is_object() {
        return Err(PipelineError::UnexpectedShape(format!(
            "expected a JSON object, got {}",
            json_kind(&payload)
        )));
    }

    let mut cleaned: Vec<Value> = match payload.get("plans") {
        Some(Value::Array(plans)) if plans.is_empty() => return Err(PipelineError::NoPlans),
        Some(Value::Array(plans)) => plans
            .iter()
            .enumerate()
            .map(|(index, plan)| clean_single_plan(plan, index))
            .collect(),
        _ => vec![clean_single_plan(&payload, 0)],
    };

    for position in cleaned.len()..DAY_PLAN_COUNT {
        let derived = apply_variation(&cleaned[0], variation_for_position(position));
        cleaned.push(derived);
    }
    Ok(Value::Array(cleaned))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cleaned_recipe(recipe: Value) -> Value {
        let payload = clean_recipe_payload(json!({ "recipes": [recipe] })).unwrap();
        payload["recipes"][0].clone()
    }

    #[test]
    fn test_multi_valued_meal_type_takes_first_valid() {
        assert_eq!(cleaned_recipe(json!({"mealType": "lunch|dinner"}))["mealType"], "lunch");
        assert_eq!(cleaned_recipe(json!({"mealType": "brunch | Dinner"}))["mealType"], "dinner");
        assert_eq!(cleaned_recipe(json!({"mealType": "brunch|elevenses"}))["mealType"], "lunch");
        assert_eq!(cleaned_recipe(json!({}))["mealType"], "lunch");
    }

    #[test]
    fn test_difficulty_defaults_to_easy() {
        assert_eq!(cleaned_recipe(json!({"difficulty": "medium|hard"}))["difficulty"], "medium");
        assert_eq!(cleaned_recipe(json!({"difficulty": 3}))["difficulty"], "easy");
    }

    #[test]
    fn test_numeric_fields_fall_back_to_defaults() {
        let recipe = cleaned_recipe(json!({
            "cookingTime": "abc",
            "prepTime": "12 minutes",
            "servings": -2,
        }));
        assert_eq!(recipe["cookingTime"], 30);
        assert_eq!(recipe["prepTime"], 12);
        assert_eq!(recipe["servings"], 4);

        let recipe = cleaned_recipe(json!({"cookingTime": 27.8, "prepTime": 0}));
        assert_eq!(recipe["cookingTime"], 27);
        assert_eq!(recipe["prepTime"], 15);
    }

    #[test]
    fn test_lists_and_flags_are_coerced() {
        let recipe = cleaned_recipe(json!({
            "ingredients": "Potato",
            "steps": null,
            "needsExtraIngredients": "yes",
            "extraIngredients": ["Cashews - 10"],
        }));
        assert_eq!(recipe["ingredients"], json!([]));
        assert_eq!(recipe["steps"], json!([]));
        assert_eq!(recipe["needsExtraIngredients"], true);
        assert_eq!(recipe["extraIngredients"], json!(["Cashews - 10"]));

        let recipe = cleaned_recipe(json!({"needsExtraIngredients": 0, "extraIngredients": ["Saffron"]}));
        assert_eq!(recipe["needsExtraIngredients"], false);
        assert_eq!(recipe["extraIngredients"], json!([]));
    }

    #[test]
    fn test_missing_recipes_array_is_rejected_without_repair() {
        assert!(matches!(
            clean_recipe_payload(json!({"dishes": []})),
            Err(PipelineError::MissingRecipesArray)
        ));
        assert!(matches!(
            clean_recipe_payload(json!({"recipes": {"name": "Dal"}})),
            Err(PipelineError::MissingRecipesArray)
        ));
    }

    #[test]
    fn test_single_plan_gets_two_variations() {
        let payload = json!({
            "breakfast": {"name": "Poha", "description": "Flattened rice", "cookingTime": 15,
                          "ingredients": ["Poha - 1 cup"], "steps": ["Rinse", "Temper"]},
            "lunch": "Rajma Chawal",
            "totalCookingTime": "75",
        });
        let plans = clean_day_plan_payload(payload).unwrap();
        let plans = plans.as_array().unwrap();
        assert_eq!(plans.len(), 3);

        assert_eq!(plans[0]["planName"], "Comfort Food Plan");
        assert_eq!(plans[0]["totalCookingTime"], 75);
        assert_eq!(plans[0]["lunch"]["name"], "Rajma Chawal");
        assert_eq!(plans[0]["lunch"]["description"], "Simple lunch dish");
        assert_eq!(plans[0]["dinner"]["name"], "Simple Dinner");
        assert_eq!(plans[0]["dinner"]["steps"], json!(["Simple cooking steps"]));

        assert_eq!(plans[1]["planName"], "Quick & Easy Plan");
        assert_eq!(plans[1]["breakfast"]["name"], "Quick Poha");
        assert_eq!(plans[1]["breakfast"]["cookingTime"], 15);
        assert_eq!(plans[1]["totalCookingTime"], 60);

        assert_eq!(plans[2]["planName"], "Traditional Plan");
        assert_eq!(plans[2]["dinner"]["name"], "Authentic Simple Dinner");
        assert_eq!(plans[2]["totalCookingTime"], 100);
    }

    #[test]
    fn test_plans_array_is_named_by_position() {
        let plan = json!({"breakfast": {"name": "Idli"}, "lunch": {}, "dinner": {}});
        let payload = json!({ "plans": [plan.clone(), plan.clone(), plan.clone(), plan] });
        let plans = clean_day_plan_payload(payload).unwrap();
        let names: Vec<&str> = plans
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["planName"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Comfort Food Plan", "Quick & Easy Plan", "Traditional Plan", "Plan 4"]);
        assert_eq!(plans[0]["breakfast"]["description"], "Easy breakfast recipe");
        assert_eq!(plans[0]["lunch"]["ingredients"], json!(["Basic ingredients"]));
    }

    #[test]
    fn test_short_plans_array_is_padded_to_three() {
        let payload = json!({ "plans": [{"breakfast": "Upma"}] });
        let plans = clean_day_plan_payload(payload).unwrap();
        let plans = plans.as_array().unwrap();
        assert_eq!(plans.len(), 3);
        assert_eq!(plans[2]["breakfast"]["name"], "Traditional Upma");
    }

    #[test]
    fn test_unrepairable_day_plan_payloads() {
        assert!(matches!(clean_day_plan_payload(json!({"plans": []})), Err(PipelineError::NoPlans)));
        assert!(matches!(
            clean_day_plan_payload(json!([1, 2])),
            Err(PipelineError::UnexpectedShape(_))
        ));
    }

    #[test]
    fn test_truthiness_matches_javascript() {
        assert!(!truthy(None));
        assert!(!truthy(Some(&json!(""))));
        assert!(truthy(Some(&json!("false"))));
        assert!(truthy(Some(&json!([]))));
        assert!(!truthy(Some(&json!(0.0))));
    }
}
