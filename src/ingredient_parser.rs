use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static TOKEN_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,\s]+").expect("separator pattern is valid"));

/// Ingredients added ahead of fallback generation when the user gave fewer than three.
pub const FILLER_INGREDIENTS: [&str; 3] = ["Onion", "Tomato", "Spices"];

pub const MIN_INGREDIENTS: usize = 3;

/// Maps a lower-cased token (English or transliterated Hindi) to its canonical English name.
fn canonical_name(token: &str) -> Option<&'static str> {
    let name = match token {
        "aloo" | "aaloo" | "alu" | "potato" => "Potato",
        "pyaz" | "pyaaz" | "onion" => "Onion",
        "tamatar" | "tamaatar" | "tomato" => "Tomato",
        "chawal" | "rice" => "Rice",
        "atta" | "flour" => "Wheat Flour",
        "daal" | "dal" | "lentils" => "Lentils",
        "sabzi" | "vegetables" => "Vegetables",
        "masala" | "spices" => "Spices",
        "namak" | "salt" => "Salt",
        "tel" | "oil" => "Oil",
        "pani" | "water" => "Water",
        "doodh" | "milk" => "Milk",
        "dahi" | "yogurt" => "Yogurt",
        "ghee" => "Clarified Butter",
        "krela" | "karela" => "Karela",
        "bhindi" | "okra" => "Okra",
        "shimla" => "Bell Pepper",
        "adrak" | "ginger" => "Ginger",
        "lehsun" | "garlic" => "Garlic",
        "palak" | "spinach" => "Spinach",
        "matar" | "peas" => "Peas",
        "gobi" | "cauliflower" => "Cauliflower",
        "baingan" | "eggplant" => "Eggplant",
        _ => return None,
    };
    Some(name)
}

fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Turns free text like "aloo, pyaz tamatar" into unique canonical names, first-seen order kept.
pub fn normalize_ingredients(input: &str) -> Vec<String> {
    let lowered = input.to_lowercase();
    let mut seen = HashSet::new();

    TOKEN_SEPARATORS
        .split(&lowered)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter_map(|token| match canonical_name(token) {
            Some(name) => Some(name.to_string()),
            None if token.chars().count() > 2 => Some(capitalize(token)),
            None => None,
        })
        .filter(|name| seen.insert(name.to_lowercase()))
        .collect()
}

/// Pads a short list with the filler ingredients. Only the fallback path uses this.
pub fn with_filler_ingredients(ingredients: &[String]) -> Vec<String> {
    let mut padded = ingredients.to_vec();
    if padded.len() >= MIN_INGREDIENTS {
        return padded;
    }
    for filler in FILLER_INGREDIENTS {
        if !padded.iter().any(|i| i.eq_ignore_ascii_case(filler)) {
            padded.push(filler.to_string());
        }
    }
    padded
}
