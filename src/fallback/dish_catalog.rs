//! Static knowledge base for offline recipe synthesis.

use crate::recipe_model::Difficulty;

/// Authentic dishes keyed by ingredient category.
pub const DISHES_BY_INGREDIENT: &[(&str, &[&str])] = &[
    ("potato", &["Aloo Gobi", "Aloo Paratha", "Aloo Tikki", "Aloo Matar", "Bombay Potato", "Aloo Baingan", "Aloo Palak"]),
    ("onion", &["Pyaz Ki Sabzi", "Onion Pakoda", "Onion Curry", "Pyaz Ka Paratha", "Onion Bhaji", "Onion Raita"]),
    ("tomato", &["Tamatar Ki Sabzi", "Tomato Rice", "Tomato Curry", "Tamatar Ka Shorba", "Tomato Chutney", "Tomato Soup"]),
    ("rice", &["Jeera Rice", "Vegetable Pulao", "Lemon Rice", "Coconut Rice", "Biryani", "Curd Rice", "Tamarind Rice"]),
    ("dal", &["Dal Tadka", "Dal Fry", "Moong Dal", "Masoor Dal", "Chana Dal", "Dal Makhani", "Sambar", "Rasam"]),
    ("paneer", &["Paneer Butter Masala", "Palak Paneer", "Paneer Tikka", "Matar Paneer", "Kadai Paneer", "Shahi Paneer"]),
    ("chicken", &["Chicken Curry", "Butter Chicken", "Chicken Biryani", "Tandoori Chicken", "Chicken Tikka", "Chicken Korma"]),
    ("vegetables", &["Mixed Vegetable Curry", "Sabzi", "Vegetable Pulao", "Bhindi Masala", "Baingan Bharta", "Aloo Gobi"]),
    ("bread", &["Roti", "Naan", "Paratha", "Puri", "Bhatura", "Kulcha", "Roomali Roti"]),
    ("yogurt", &["Raita", "Kadhi", "Lassi", "Dahi Bhalla", "Shrikhand", "Chaas"]),
    ("lentils", &["Dal Tadka", "Sambar", "Rasam", "Khichdi", "Vada", "Idli", "Dosa"]),
    ("flour", &["Roti", "Paratha", "Puri", "Bhatura", "Naan", "Halwa", "Ladoo"]),
    ("milk", &["Kheer", "Rabri", "Basundi", "Kulfi", "Payasam", "Rasmalai"]),
    ("fruits", &["Fruit Chaat", "Mango Lassi", "Aamras", "Fruit Cream", "Fruit Custard", "Fruit Salad"]),
    ("nuts", &["Badam Milk", "Kaju Katli", "Badam Halwa", "Pista Kulfi", "Chikki", "Gajak"]),
    ("spices", &["Garam Masala", "Biryani", "Curry", "Masala Chai", "Tadka Dal", "Spiced Rice"]),
];

pub const REGIONAL_DISHES: &[(&str, &[&str])] = &[
    ("north", &["Chole Bhature", "Rajma Chawal", "Kadhi Pakora", "Butter Chicken", "Paneer Tikka", "Aloo Paratha"]),
    ("south", &["Dosa", "Idli Sambar", "Uttapam", "Rasam", "Appam", "Pongal", "Bisi Bele Bath"]),
    ("east", &["Macher Jhol", "Rasgulla", "Mishti Doi", "Luchi Aloor Dom", "Pitha", "Chingri Malai Curry"]),
    ("west", &["Dhokla", "Pav Bhaji", "Vada Pav", "Puran Poli", "Modak", "Shrikhand", "Undhiyu"]),
    ("street", &["Pani Puri", "Bhel Puri", "Samosa", "Kachori", "Jalebi", "Chaat", "Dabeli", "Vada Pav"]),
];

pub const COMMON_INGREDIENTS: &[&str] = &[
    "Onion - 1 large",
    "Tomato - 2 medium",
    "Ginger garlic paste - 1 tablespoon",
    "Green chilies - 2-3 pieces",
    "Cumin seeds - 1 teaspoon",
    "Mustard seeds - 1/2 teaspoon",
    "Turmeric powder - 1/2 teaspoon",
    "Red chili powder - 1 teaspoon",
    "Coriander powder - 1 teaspoon",
    "Garam masala - 1/2 teaspoon",
    "Salt - to taste",
    "Oil - 2 tablespoons",
    "Fresh coriander - for garnish",
    "Curry leaves - 8-10",
    "Asafoetida - a pinch",
    "Cardamom - 2-3 pods",
    "Cinnamon - 1 inch stick",
    "Cloves - 2-3",
    "Bay leaf - 1-2",
    "Black pepper - 1/2 teaspoon",
    "Ghee - 1 tablespoon",
    "Lemon juice - 1 teaspoon",
    "Yogurt - 1/4 cup",
    "Coconut - 2 tablespoons grated",
];

pub const EXTRA_INGREDIENTS: &[&str] = &[
    "Cashews - 10-12 pieces",
    "Coconut milk - 1/2 cup",
    "Yogurt - 1/4 cup",
    "Lemon juice - 1 tablespoon",
    "Mint leaves - few sprigs",
    "Curry leaves - 8-10 pieces",
    "Fennel seeds - 1/2 teaspoon",
    "Cinnamon stick - 1 inch",
    "Cardamom - 2-3 pods",
    "Cloves - 2-3 pieces",
    "Saffron - a pinch",
    "Rose water - 1 teaspoon",
    "Kewra water - 1/2 teaspoon",
    "Dried fenugreek leaves - 1 teaspoon",
    "Poppy seeds - 1 teaspoon",
];

const RICE_KEYWORDS: [&str; 3] = ["Rice", "Pulao", "Biryani"];

/// Broad dish families that pull in their own staples and preparation steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DishFamily {
    Rice,
    Dal,
    Paneer,
    Paratha,
    Other,
}

impl DishFamily {
    pub fn of(dish_name: &str) -> Self {
        if RICE_KEYWORDS.iter().any(|k| dish_name.contains(k)) {
            DishFamily::Rice
        } else if dish_name.contains("Dal") {
            DishFamily::Dal
        } else if dish_name.contains("Paneer") {
            DishFamily::Paneer
        } else if dish_name.contains("Paratha") {
            DishFamily::Paratha
        } else {
            DishFamily::Other
        }
    }

    pub fn staples(&self) -> &'static [&'static str] {
        match self {
            DishFamily::Rice => &["Basmati rice - 1 cup", "Water - 2 cups", "Bay leaves - 2 pieces"],
            DishFamily::Dal => &["Lentils - 1 cup", "Water - 3 cups", "Asafoetida - pinch"],
            DishFamily::Paneer => &["Paneer - 200g", "Cream - 2 tablespoons"],
            DishFamily::Paratha => &["Wheat flour - 2 cups", "Water - as needed", "Ghee - for cooking"],
            DishFamily::Other => &[],
        }
    }

    pub fn prep_steps(&self) -> &'static [&'static str] {
        match self {
            DishFamily::Rice => &["Wash rice and soak for 20 minutes", "Drain the water from rice"],
            DishFamily::Dal => &["Wash lentils 3-4 times", "Soak lentils for 15 minutes"],
            _ => &[],
        }
    }
}

/// Keyword-derived meal category. `None` means no natural fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MealHint {
    Breakfast,
    LunchOrDinner,
    Snack,
}

pub fn meal_hint(dish_name: &str) -> Option<MealHint> {
    let has_any = |keywords: &[&str]| keywords.iter().any(|k| dish_name.contains(k));
    if has_any(&["Paratha", "Poha", "Upma"][..]) {
        Some(MealHint::Breakfast)
    } else if has_any(&RICE_KEYWORDS[..]) {
        Some(MealHint::LunchOrDinner)
    } else if has_any(&["Pakoda", "Tikka", "Samosa"][..]) {
        Some(MealHint::Snack)
    } else {
        None
    }
}

/// Half-open ranges for cooking minutes, prep minutes and step count.
#[derive(Debug, Clone, Copy)]
pub struct Complexity {
    pub cook_time: (u32, u32),
    pub prep_time: (u32, u32),
    pub steps: (usize, usize),
}

pub fn complexity(difficulty: Difficulty) -> Complexity {
    match difficulty {
        Difficulty::Easy => Complexity {
            cook_time: (15, 25),
            prep_time: (5, 15),
            steps: (6, 10),
        },
        Difficulty::Medium => Complexity {
            cook_time: (25, 40),
            prep_time: (10, 20),
            steps: (8, 12),
        },
        Difficulty::Hard => Complexity {
            cook_time: (40, 60),
            prep_time: (15, 30),
            steps: (10, 15),
        },
    }
}

/// Dishes for an ingredient: exact category match first, then a category named inside it
/// (so "Wheat Flour" finds "flour").
pub fn dishes_for(ingredient: &str) -> Option<&'static [&'static str]> {
    let wanted = ingredient.trim().to_lowercase();
    DISHES_BY_INGREDIENT
        .iter()
        .find(|(category, _)| *category == wanted)
        .or_else(|| {
            DISHES_BY_INGREDIENT
                .iter()
                .find(|(category, _)| wanted.split_whitespace().any(|word| word == *category))
        })
        .map(|(_, dishes)| *dishes)
}

pub fn cooking_steps(main_ingredient: &str, family: DishFamily) -> Vec<String> {
    let mut steps: Vec<String> = family.prep_steps().iter().map(|s| s.to_string()).collect();
    steps.extend(
        [
            "Heat oil in a pan",
            "Add cumin seeds and let them sizzle",
            "Add chopped onions and cook until golden",
            "Add ginger garlic paste and cook for 1 minute",
            "Add chopped tomatoes and cook until soft",
            "Add turmeric, red chili powder, and salt",
            "Mix all spices well",
        ]
        .iter()
        .map(|s| s.to_string()),
    );
    steps.push(format!("Add {} and mix gently", main_ingredient.to_lowercase()));
    steps.extend(
        [
            "Add a little water if needed",
            "Cover and cook on low heat",
            "Cook until tender",
            "Add garam masala and mix",
            "Taste and add more salt if needed",
            "Garnish with fresh coriander",
            "Serve hot with rice or roti",
        ]
        .iter()
        .map(|s| s.to_string()),
    );
    steps
}
