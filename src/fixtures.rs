//! Canned recipes served by the mock analysis backend and the display preview.

use crate::model::{Difficulty, Ingredient, Recipe};

/// Example prompts offered next to the description field
pub const EXAMPLE_PROMPTS: [&str; 5] = [
    "Nasi Gudeg with jackfruit",
    "Rendang beef curry",
    "Gado-gado salad",
    "Sate ayam skewers",
    "Soto ayam soup",
];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Returned by the mock for every image request
pub fn nasi_gudeg_jogja() -> Recipe {
    Recipe {
        name: "Nasi Gudeg Jogja".to_string(),
        description: "Sweet and savory jackfruit stew served with rice, a signature dish from Yogyakarta".to_string(),
        origin: "Yogyakarta, Central Java".to_string(),
        cooking_time: "2-3 hours".to_string(),
        servings: 4,
        difficulty: Difficulty::Medium,
        ingredients: vec![
            Ingredient::new("Young jackfruit", "1 kg").with_notes("fresh or canned"),
            Ingredient::new("Coconut milk", "500ml"),
            Ingredient::new("Palm sugar", "150g"),
            Ingredient::new("Bay leaves", "3 pieces"),
            Ingredient::new("Galangal", "2 cm").with_notes("bruised"),
            Ingredient::new("Lemongrass", "2 stalks"),
            Ingredient::new("Tamarind water", "3 tbsp"),
            Ingredient::new("Salt", "1 tsp"),
        ],
        instructions: strings(&[
            "Clean and cut young jackfruit into bite-sized pieces.",
            "Boil jackfruit in water for 30 minutes to remove latex, then drain.",
            "In a pot, combine coconut milk, palm sugar, bay leaves, galangal, and lemongrass.",
            "Add jackfruit pieces and simmer on low heat for 1-2 hours until tender.",
            "Add tamarind water and salt, continue cooking until sauce thickens.",
            "Serve hot with steamed rice, boiled eggs, and krecek (beef skin crackers).",
        ]),
        history: "Gudeg is the iconic dish of Yogyakarta, often called 'Jogja's soul food.' Legend says it was created in the Sultan's palace during the Mataram Kingdom era. The sweet taste represents the gentle nature of Yogyakarta people, while the slow cooking process reflects the Javanese philosophy of patience and harmony.".to_string(),
        interesting_facts: strings(&[
            "Gudeg is traditionally cooked in a clay pot called 'kendil' which gives it a distinctive earthy flavor.",
            "The dish gets sweeter the longer it's cooked, with some vendors cooking it for up to 12 hours.",
            "Different regions have variations - Gudeg Solo is less sweet than Yogyakarta's version.",
        ]),
        nutritional_highlights: Some(strings(&["High Fiber", "Vitamin C", "Plant-based Protein"])),
    }
}

/// Returned by the mock for every text request
pub fn sate_ayam_madura() -> Recipe {
    Recipe {
        name: "Sate Ayam Madura".to_string(),
        description: "Grilled chicken skewers with sweet peanut sauce, a beloved street food from Madura Island".to_string(),
        origin: "Madura Island, East Java".to_string(),
        cooking_time: "45 minutes".to_string(),
        servings: 4,
        difficulty: Difficulty::Easy,
        ingredients: vec![
            Ingredient::new("Chicken thigh", "500g").with_notes("cut into cubes"),
            Ingredient::new("Peanuts", "200g").with_notes("roasted"),
            Ingredient::new("Palm sugar", "3 tbsp"),
            Ingredient::new("Tamarind paste", "1 tbsp"),
            Ingredient::new("Chili peppers", "2-3 pieces"),
            Ingredient::new("Garlic", "3 cloves"),
            Ingredient::new("Shallots", "2 pieces"),
            Ingredient::new("Sweet soy sauce", "3 tbsp"),
        ],
        instructions: strings(&[
            "Soak bamboo skewers in water for 30 minutes to prevent burning.",
            "Thread chicken cubes onto skewers, leaving small gaps between pieces.",
            "Grind roasted peanuts, chilies, garlic, and shallots into a smooth paste.",
            "Mix paste with palm sugar, tamarind, sweet soy sauce, and water to make sauce.",
            "Grill chicken skewers over charcoal fire, turning frequently for 15-20 minutes.",
            "Brush with peanut sauce while grilling for the last 5 minutes.",
            "Serve hot with remaining peanut sauce, rice cakes, and pickled vegetables.",
        ]),
        history: "Sate originated from Arab and Indian traders who brought kebab techniques to Indonesia. The Madurese people perfected this dish, creating the signature sweet peanut sauce that defines Indonesian sate. It spread throughout Java and became one of Indonesia's most recognizable dishes worldwide.".to_string(),
        interesting_facts: strings(&[
            "There are over 20 different types of sate across Indonesia, each with regional variations.",
            "The word 'sate' comes from the Hokkien Chinese word 'sa tae' meaning three pieces.",
            "Traditional sate is grilled over coconut shell charcoal for the best flavor.",
        ]),
        nutritional_highlights: Some(strings(&["High Protein", "Healthy Fats", "B Vitamins"])),
    }
}

/// Showcase recipe used to preview the display without running an analysis
pub fn rendang_daging_sapi() -> Recipe {
    Recipe {
        name: "Rendang Daging Sapi".to_string(),
        description: "Rich and tender beef slow-cooked in aromatic spices and coconut milk from West Sumatra".to_string(),
        origin: "West Sumatra, Indonesia".to_string(),
        cooking_time: "3-4 hours".to_string(),
        servings: 6,
        difficulty: Difficulty::Medium,
        ingredients: vec![
            Ingredient::new("Beef chuck roast", "2 kg").with_notes("cut into chunks"),
            Ingredient::new("Coconut milk", "800ml").with_notes("thick variety"),
            Ingredient::new("Galangal", "3 cm").with_notes("fresh, sliced"),
            Ingredient::new("Lemongrass", "3 stalks").with_notes("bruised"),
            Ingredient::new("Kaffir lime leaves", "6 leaves"),
            Ingredient::new("Tamarind paste", "2 tbsp"),
            Ingredient::new("Palm sugar", "2 tbsp"),
            Ingredient::new("Red chilies", "8-10").with_notes("dried, soaked"),
            Ingredient::new("Shallots", "8 pieces"),
            Ingredient::new("Garlic cloves", "6 pieces"),
            Ingredient::new("Ginger", "3 cm").with_notes("fresh"),
            Ingredient::new("Turmeric", "2 cm").with_notes("fresh"),
            Ingredient::new("Candlenuts", "4 pieces"),
        ],
        instructions: strings(&[
            "Blend chilies, shallots, garlic, ginger, turmeric, and candlenuts into a smooth paste using a food processor or traditional stone mortar (cobek).",
            "Heat oil in a heavy-bottomed pot and fry the spice paste over medium heat for 10-15 minutes until fragrant and oil separates.",
            "Add beef chunks and stir-fry until meat changes color and is well-coated with spices, about 15-20 minutes.",
            "Pour in coconut milk, add galangal, lemongrass, lime leaves, tamarind paste, and palm sugar. Bring to a boil.",
            "Reduce heat to low and simmer uncovered, stirring occasionally, for 2-3 hours until the sauce thickens and darkens.",
            "Continue cooking while stirring frequently until the oil separates and the meat becomes tender and dark brown.",
            "Taste and adjust seasoning with salt if needed. The rendang is ready when it's almost dry with a rich, dark color.",
            "Let it rest for 10 minutes before serving. Rendang tastes even better the next day as flavors develop further.",
        ]),
        history: "Rendang originated from the Minangkabau ethnic group of Indonesia, particularly from West Sumatra. This iconic dish was created as a way to preserve meat without refrigeration in the tropical climate. The slow-cooking process and rich spice blend naturally preserve the meat, making it last for weeks. Rendang was traditionally prepared for special occasions and long journeys. The dish spread throughout Indonesia and Malaysia through Minangkabau migration and trade. In 2011, CNN ranked Rendang as the world's most delicious food, bringing international recognition to this Indonesian culinary masterpiece.".to_string(),
        interesting_facts: strings(&[
            "Rendang can last up to 4 weeks at room temperature due to its preservation method, making it perfect for long sea voyages in ancient times.",
            "The darker the rendang, the longer it has been cooked - the ultimate rendang should be almost black and dry, known as 'rendang kering'.",
            "UNESCO recognized rendang as an Intangible Cultural Heritage, acknowledging its cultural significance to the Minangkabau people.",
            "There are over 50 different types of rendang in Minangkabau cuisine, including rendang ayam (chicken), rendang jengkol (stink beans), and rendang paru (beef lung).",
            "The traditional cooking method uses a 'dandang' (traditional pot) and must be stirred with a wooden spatula called 'sudip' to prevent sticking.",
        ]),
        nutritional_highlights: Some(strings(&[
            "High in Protein",
            "Rich in Iron",
            "Contains Antioxidants",
            "Healthy Fats from Coconut",
            "Anti-inflammatory Spices",
        ])),
    }
}
