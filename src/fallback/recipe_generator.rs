use chrono::Utc;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

use super::dish_catalog::{
    complexity, cooking_steps, dishes_for, meal_hint, DishFamily, MealHint, COMMON_INGREDIENTS,
    EXTRA_INGREDIENTS, REGIONAL_DISHES,
};
use super::sampling::{distinct, pick_excluding, pick_several};
use crate::ingredient_parser::with_filler_ingredients;
use crate::prompt_builder::RECIPE_COUNT;
use crate::recipe_model::{Difficulty, MealType, Recipe};

const MIN_STEPS: usize = 8;
const GENERIC_MAIN: &str = "Potato";

#[derive(Debug, Clone, Copy)]
pub struct FallbackOptions {
    pub include_extra: bool,
    /// Forces every generated recipe into this category.
    pub meal_type: Option<MealType>,
    pub target_count: usize,
}

impl Default for FallbackOptions {
    fn default() -> Self {
        Self {
            include_extra: false,
            meal_type: None,
            target_count: RECIPE_COUNT,
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn candidate_dishes<R: Rng + ?Sized>(main: &str, rng: &mut R) -> Vec<String> {
    let mut pool: Vec<String> = match dishes_for(main) {
        Some(dishes) => dishes.iter().map(|d| d.to_string()).collect(),
        None => vec![format!("{} Curry", capitalize(main))],
    };
    if let Some((_, regional)) = REGIONAL_DISHES.choose(rng) {
        pool.extend(regional.iter().map(|d| d.to_string()));
    }

    distinct(pool.iter().map(String::as_str))
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn pick_meal_type<R: Rng + ?Sized>(dish_name: &str, forced: Option<MealType>, rng: &mut R) -> MealType {
    if let Some(meal_type) = forced {
        return meal_type;
    }
    match meal_hint(dish_name) {
        Some(MealHint::Breakfast) => MealType::Breakfast,
        Some(MealHint::LunchOrDinner) => *[MealType::Lunch, MealType::Dinner]
            .choose(rng)
            .unwrap_or(&MealType::Lunch),
        Some(MealHint::Snack) => MealType::Snack,
        None => *MealType::ALL.choose(rng).unwrap_or(&MealType::Lunch),
    }
}

fn build_recipe<R: Rng + ?Sized>(
    index: usize,
    main: &str,
    dish_name: &str,
    opts: &FallbackOptions,
    rng: &mut R,
) -> Recipe {
    let difficulty = *Difficulty::ALL.choose(rng).unwrap_or(&Difficulty::Easy);
    let limits = complexity(difficulty);
    let cooking_time = rng.gen_range(limits.cook_time.0..limits.cook_time.1);
    let prep_time = rng.gen_range(limits.prep_time.0..limits.prep_time.1);
    let step_count = rng.gen_range(limits.steps.0..limits.steps.1);

    let family = DishFamily::of(dish_name);
    let main_display = capitalize(main);

    let mut ingredients = vec![format!("{} - 2 cups", main_display)];
    ingredients.extend(family.staples().iter().map(|s| s.to_string()));
    ingredients.extend(pick_several(COMMON_INGREDIENTS, 6, 8, rng));

    let extra_ingredients = if opts.include_extra {
        pick_several(EXTRA_INGREDIENTS, 2, 4, rng)
    } else {
        Vec::new()
    };

    let mut steps = cooking_steps(main, family);
    steps.truncate(step_count.max(MIN_STEPS));

    Recipe {
        id: format!(
            "recipe-{}-{}-{}",
            Utc::now().timestamp_millis(),
            index,
            rng.gen_range(0..10_000)
        ),
        name: dish_name.to_string(),
        meal_type: pick_meal_type(dish_name, opts.meal_type, rng),
        cooking_time,
        prep_time,
        servings: rng.gen_range(2..=5),
        difficulty,
        ingredients,
        steps,
        description: format!(
            "Delicious {} made with {} and traditional Indian spices",
            dish_name.to_lowercase(),
            main.to_lowercase()
        ),
        needs_extra_ingredients: !extra_ingredients.is_empty(),
        extra_ingredients,
    }
}

/// Synthesizes `target_count` plausible recipes without touching the network.
///
/// Main ingredients rotate through the (filler-padded) list. Dish names are not repeated
/// unless a main ingredient's candidate pool is exhausted.
pub fn generate_fallback_recipes<R: Rng + ?Sized>(
    ingredients: &[String],
    opts: &FallbackOptions,
    rng: &mut R,
) -> Vec<Recipe> {
    let mut mains = with_filler_ingredients(ingredients);
    if mains.is_empty() {
        mains.push(GENERIC_MAIN.to_string());
    }

    let mut used_names: HashSet<String> = HashSet::new();
    let mut recipes = Vec::with_capacity(opts.target_count);

    for index in 0..opts.target_count {
        let main = &mains[index % mains.len()];
        let pool = candidate_dishes(main, rng);
        let pool_refs: Vec<&str> = pool.iter().map(String::as_str).collect();
        let dish_name = pick_excluding(&pool_refs, &used_names, rng)
            .map(str::to_string)
            .unwrap_or_else(|| format!("{} Curry", capitalize(main)));

        let recipe = build_recipe(index, main, &dish_name, opts, rng);
        used_names.insert(recipe.name.clone());
        recipes.push(recipe);
    }

    tracing::debug!(
        count = recipes.len(),
        meal_type = ?opts.meal_type,
        "generated fallback recipes"
    );
    recipes
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ingredients(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_single_ingredient_yields_full_batch() {
        let mut rng = StdRng::seed_from_u64(42);
        let recipes = generate_fallback_recipes(&ingredients(&["Potato"]), &FallbackOptions::default(), &mut rng);
        assert_eq!(recipes.len(), 6);
        for recipe in &recipes {
            assert!(recipe.steps.len() >= 8, "{} has {} steps", recipe.name, recipe.steps.len());
            assert!(!recipe.ingredients.is_empty());
            assert!((2..=5).contains(&recipe.servings));
            assert!(!recipe.needs_extra_ingredients);
            assert!(recipe.extra_ingredients.is_empty());
        }
        assert_eq!(recipes[0].ingredients[0], "Potato - 2 cups");
    }

    #[test]
    fn test_times_follow_difficulty_ranges() {
        let mut rng = StdRng::seed_from_u64(9);
        let opts = FallbackOptions {
            target_count: 40,
            ..FallbackOptions::default()
        };
        for recipe in generate_fallback_recipes(&ingredients(&["Rice", "Dal"]), &opts, &mut rng) {
            let limits = complexity(recipe.difficulty);
            assert!((limits.cook_time.0..limits.cook_time.1).contains(&recipe.cooking_time));
            assert!((limits.prep_time.0..limits.prep_time.1).contains(&recipe.prep_time));
        }
    }

    #[test]
    fn test_names_are_unique_while_pool_lasts() {
        let mut rng = StdRng::seed_from_u64(1);
        let recipes = generate_fallback_recipes(
            &ingredients(&["Paneer", "Rice", "Dal"]),
            &FallbackOptions::default(),
            &mut rng,
        );
        let names: HashSet<_> = recipes.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names.len(), recipes.len());
    }

    #[test]
    fn test_extras_only_when_requested() {
        let mut rng = StdRng::seed_from_u64(5);
        let opts = FallbackOptions {
            include_extra: true,
            ..FallbackOptions::default()
        };
        for recipe in generate_fallback_recipes(&ingredients(&["Chicken"]), &opts, &mut rng) {
            assert!(recipe.needs_extra_ingredients);
            assert!((2..=4).contains(&recipe.extra_ingredients.len()));
        }
    }

    #[test]
    fn test_meal_type_filter_is_forced() {
        let mut rng = StdRng::seed_from_u64(11);
        let opts = FallbackOptions {
            meal_type: Some(MealType::Snack),
            target_count: 8,
            ..FallbackOptions::default()
        };
        let recipes = generate_fallback_recipes(&ingredients(&["Rice"]), &opts, &mut rng);
        assert_eq!(recipes.len(), 8);
        assert!(recipes.iter().all(|r| r.meal_type == MealType::Snack));
    }

    #[test]
    fn test_unknown_ingredient_gets_curry_candidate_and_empty_input_still_works() {
        let mut rng = StdRng::seed_from_u64(2);
        let pool = candidate_dishes("karela", &mut rng);
        assert_eq!(pool[0], "Karela Curry");

        let recipes = generate_fallback_recipes(&[], &FallbackOptions::default(), &mut rng);
        assert_eq!(recipes.len(), 6);
    }
}
