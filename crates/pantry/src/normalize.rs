use std::collections::HashMap;
use std::sync::LazyLock;

use grocer_shared::Pantry;

/// Surface variants mapped to the base name they are stored under
static SYNONYMS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("tomatoes", "tomato"),
        ("cherry tomatoes", "tomato"),
        ("potatoes", "potato"),
        ("onions", "onion"),
        ("yellow onion", "onion"),
        ("yellow onions", "onion"),
        ("scallions", "green onion"),
        ("scallion", "green onion"),
        ("spring onions", "green onion"),
        ("green onions", "green onion"),
        ("garlic cloves", "garlic"),
        ("garlic clove", "garlic"),
        ("cloves of garlic", "garlic"),
        ("clove of garlic", "garlic"),
        ("eggs", "egg"),
        ("large eggs", "egg"),
        ("apples", "apple"),
        ("bananas", "banana"),
        ("carrots", "carrot"),
        ("lemons", "lemon"),
        ("limes", "lime"),
        ("mushrooms", "mushroom"),
        ("bell peppers", "bell pepper"),
        ("peppers", "bell pepper"),
        ("beef mince", "ground beef"),
        ("minced beef", "ground beef"),
        ("mince", "ground beef"),
        ("chicken breasts", "chicken breast"),
        ("spaghetti", "pasta"),
        ("penne", "pasta"),
        ("penne pasta", "pasta"),
        ("white rice", "rice"),
        ("extra virgin olive oil", "olive oil"),
        ("parmigiano-reggiano", "parmesan cheese"),
        ("parmesan", "parmesan cheese"),
        ("unsalted butter", "butter"),
        ("whole milk", "milk"),
    ])
});

/// Canonical form of an ingredient name.
///
/// Lowercases, trims and collapses inner whitespace, then maps known variants
/// ("tomatoes", "garlic cloves", "beef mince") to their base name. Names not in
/// the table come back lowercased and trimmed only.
pub fn normalize(name: &str) -> String {
    let cleaned = name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    match SYNONYMS.get(cleaned.as_str()) {
        Some(base) => (*base).to_owned(),
        None => cleaned,
    }
}

/// Looks `name` up in the pantry, tolerating spelling variants.
///
/// Tries the raw name as a key, then the normalized name as a key, then any
/// key whose normalized form equals the normalized name. The first hit wins;
/// ties follow the pantry's iteration order.
pub fn available(name: &str, pantry: &Pantry) -> (bool, u32) {
    if let Some(quantity) = pantry.get(name) {
        return (true, *quantity);
    }

    let wanted = normalize(name);
    if let Some(quantity) = pantry.get(&wanted) {
        return (true, *quantity);
    }

    pantry
        .iter()
        .find(|(key, _)| normalize(key) == wanted)
        .map(|(_, quantity)| (true, *quantity))
        .unwrap_or((false, 0))
}
