//! Natural-language instructions sent to the model. Pure string templating.

use crate::api_connection::TextGenerationRequest;
use crate::recipe_model::MealType;

pub const RECIPE_COUNT: usize = 6;
pub const DAY_PLAN_COUNT: usize = 3;

pub const RECIPE_SYSTEM_PROMPT: &str = "You are a JSON-generating assistant. Return ONLY valid JSON with no additional text. Your response must be parseable by JSON.parse(). Use very simple English for cooking steps.";
pub const DAY_PLAN_SYSTEM_PROMPT: &str = "You are a helpful assistant that creates 3 different Indian meal plans. Always return 3 unique plans with different dishes.";
pub const COOKING_ASSISTANT_SYSTEM_PROMPT: &str = "You are a helpful cooking assistant specializing in Indian cuisine. Provide detailed, helpful responses about cooking, recipes, ingredients, and techniques.";

const RECIPE_MAX_TOKENS: u32 = 8000;
const RECIPE_TEMPERATURE: f32 = 0.9;
const DAY_PLAN_MAX_TOKENS: u32 = 6000;
const ASK_MAX_TOKENS: u32 = 8000;
const ASK_TEMPERATURE: f32 = 0.7;

pub fn recipe_prompt(
    ingredients: &[String],
    include_extra: bool,
    meal_type: Option<MealType>,
    seed: u32,
) -> String {
    let extra_rule = if include_extra {
        "- You MAY suggest a few extra ingredients; list them in \"extraIngredients\" and set \"needsExtraIngredients\" to true"
    } else {
        "- Use ONLY the given ingredients plus basic pantry spices; set \"needsExtraIngredients\" to false"
    };
    let meal_rule = match meal_type {
        Some(meal) => format!("- Every recipe must be a {} dish (\"mealType\": \"{}\")\n", meal, meal),
        None => String::new(),
    };

    format!(
        r#"
You are an expert Indian chef with 20 years of experience. Create exactly {count} unique, authentic Indian recipes using these ingredients: "{ingredients}".

REQUIREMENTS:
- Generate EXACTLY {count} different recipes
- Use authentic Indian dish names (like "Aloo Gobi", "Dal Tadka", "Jeera Rice")
- Each recipe must have 8-12 detailed cooking steps in VERY SIMPLE ENGLISH
- Use proper Indian measurements and cooking techniques
- Include realistic cooking times and difficulty levels
- Focus on traditional Indian home cooking
- Be creative and varied - don't repeat similar dishes
- Keep cooking steps very simple and easy to understand
{extra_rule}
{meal_rule}
IMPORTANT: Return ONLY valid JSON with no additional text. The response must be parseable by JSON.parse().

Recipe Structure (JSON format):
{{
  "recipes": [
    {{
      "id": "recipe-{seed}-1",
      "name": "Authentic Indian Dish Name",
      "mealType": "lunch",
      "cookingTime": 25,
      "prepTime": 10,
      "servings": 4,
      "difficulty": "easy",
      "ingredients": ["Ingredient 1 - 1 cup", "Ingredient 2 - 2 tablespoons"],
      "steps": ["Heat oil in pan", "Add cumin seeds", "Add onions and cook"],
      "description": "Traditional Indian dish description",
      "needsExtraIngredients": false,
      "extraIngredients": []
    }}
  ]
}}

CRITICAL: Return ONLY the JSON object above with {count} recipes. No explanations or additional text.
"#,
        count = RECIPE_COUNT,
        ingredients = ingredients.join(", "),
        extra_rule = extra_rule,
        meal_rule = meal_rule,
        seed = seed,
    )
}

pub fn day_plan_prompt(ingredients: &[String], seed: u32) -> String {
    format!(
        r#"
Create {count} different Indian meal plans for one day using these ingredients: "{ingredients}".

IMPORTANT RULES:
- Create {count} DIFFERENT complete day plans
- Use VERY SIMPLE English words
- Each meal should have 5-7 easy steps
- Use simple measurements like "1 cup", "2 spoons"
- Give proper Indian dish names
- Make each plan unique and different

Your response must be valid JSON:
{{
  "plans": [
    {{
      "id": "plan-{seed}-1",
      "planName": "Comfort Food Plan",
      "planDescription": "Hearty and satisfying meals",
      "breakfast": {{
        "name": "Dish Name",
        "description": "Simple description",
        "cookingTime": 20,
        "ingredients": ["Item 1 - 1 cup", "Item 2 - 2 spoons"],
        "steps": ["Step 1", "Step 2", "Step 3"]
      }},
      "lunch": {{
        "name": "Dish Name",
        "description": "Simple description",
        "cookingTime": 25,
        "ingredients": ["Item 1 - 1 cup"],
        "steps": ["Step 1", "Step 2"]
      }},
      "dinner": {{
        "name": "Dish Name",
        "description": "Simple description",
        "cookingTime": 30,
        "ingredients": ["Item 1 - 1 cup"],
        "steps": ["Step 1", "Step 2"]
      }},
      "totalCookingTime": 75,
      "shoppingList": ["Extra item 1", "Extra item 2"]
    }},
    {{
      "id": "plan-{seed}-2",
      "planName": "Quick & Easy Plan",
      "planDescription": "Fast cooking, great taste",
      "breakfast": {{ ... }},
      "lunch": {{ ... }},
      "dinner": {{ ... }},
      "totalCookingTime": 60,
      "shoppingList": ["Extra item 1"]
    }},
    {{
      "id": "plan-{seed}-3",
      "planName": "Traditional Plan",
      "planDescription": "Classic Indian flavors",
      "breakfast": {{ ... }},
      "lunch": {{ ... }},
      "dinner": {{ ... }},
      "totalCookingTime": 90,
      "shoppingList": ["Extra item 1", "Extra item 2"]
    }}
  ]
}}

CRITICAL: Create {count} completely different meal plans with different dishes for each plan.
"#,
        count = DAY_PLAN_COUNT,
        ingredients = ingredients.join(", "),
        seed = seed,
    )
}

pub fn recipe_request(prompt: String) -> TextGenerationRequest {
    TextGenerationRequest {
        prompt,
        system: RECIPE_SYSTEM_PROMPT.to_string(),
        max_tokens: RECIPE_MAX_TOKENS,
        temperature: Some(RECIPE_TEMPERATURE),
    }
}

pub fn day_plan_request(prompt: String) -> TextGenerationRequest {
    TextGenerationRequest {
        prompt,
        system: DAY_PLAN_SYSTEM_PROMPT.to_string(),
        max_tokens: DAY_PLAN_MAX_TOKENS,
        temperature: None,
    }
}

pub fn question_request(question: &str) -> TextGenerationRequest {
    TextGenerationRequest {
        prompt: question.to_string(),
        system: COOKING_ASSISTANT_SYSTEM_PROMPT.to_string(),
        max_tokens: ASK_MAX_TOKENS,
        temperature: Some(ASK_TEMPERATURE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_recipe_prompt_embeds_ingredients_and_seed() {
        let prompt = recipe_prompt(&names(&["Potato", "Onion"]), false, None, 4242);
        assert!(prompt.contains("\"Potato, Onion\""));
        assert!(prompt.contains("recipe-4242-1"));
        assert!(prompt.contains("EXACTLY 6 different recipes"));
        assert!(prompt.contains("\"needsExtraIngredients\" to false"));
        assert!(!prompt.contains("Every recipe must be"));
    }

    #[test]
    fn test_recipe_prompt_mentions_meal_filter_and_extras() {
        let prompt = recipe_prompt(&names(&["Rice"]), true, Some(MealType::Dinner), 1);
        assert!(prompt.contains("Every recipe must be a dinner dish"));
        assert!(prompt.contains("MAY suggest a few extra ingredients"));
    }

    #[test]
    fn test_day_plan_prompt_asks_for_three_plans() {
        let prompt = day_plan_prompt(&names(&["Paneer"]), 7);
        assert!(prompt.contains("Create 3 different Indian meal plans"));
        assert!(prompt.contains("plan-7-3"));
        assert!(prompt.contains("\"Paneer\""));
    }

    #[test]
    fn test_request_parameters_per_kind() {
        let recipes = recipe_request("p".to_string());
        assert_eq!(recipes.max_tokens, 8000);
        assert_eq!(recipes.temperature, Some(0.9));

        let plans = day_plan_request("p".to_string());
        assert_eq!(plans.max_tokens, 6000);
        assert_eq!(plans.temperature, None);

        let question = question_request("How do I temper dal?");
        assert_eq!(question.temperature, Some(0.7));
        assert_eq!(question.system, COOKING_ASSISTANT_SYSTEM_PROMPT);
    }
}
