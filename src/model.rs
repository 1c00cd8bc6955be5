use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AnalysisError;

/// How demanding a recipe is to cook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Difficulty {
    type Error = AnalysisError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl FromStr for Difficulty {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(AnalysisError::MalformedResponse(format!(
                "unknown difficulty '{}'",
                other
            ))),
        }
    }
}

/// A single line of the ingredient list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    /// Free-text quantity such as "500g" or "2-3 pieces"
    pub amount: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, amount: impl Into<String>) -> Self {
        Ingredient {
            name: name.into(),
            amount: amount.into(),
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// A generated recipe together with its cultural background.
///
/// Field names follow the camelCase wire contract shared with analysis
/// backends. Once produced by an analysis a recipe is only ever read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub name: String,
    pub description: String,
    pub origin: String,
    /// Free-text duration, e.g. "2-3 hours"
    pub cooking_time: String,
    pub servings: u32,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    pub history: String,
    #[serde(default)]
    pub interesting_facts: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutritional_highlights: Option<Vec<String>>,
}

impl Recipe {
    /// Check the invariants every recipe handed to the display must hold
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.name.trim().is_empty() {
            return Err(AnalysisError::MalformedResponse(
                "recipe name is empty".to_string(),
            ));
        }
        if self.servings == 0 {
            return Err(AnalysisError::MalformedResponse(
                "servings must be greater than zero".to_string(),
            ));
        }
        if self.instructions.is_empty() {
            return Err(AnalysisError::MalformedResponse(format!(
                "recipe '{}' has no instructions",
                self.name
            )));
        }
        Ok(())
    }

    /// True when the nutrition section should be shown
    pub fn has_nutritional_highlights(&self) -> bool {
        self.nutritional_highlights
            .as_ref()
            .is_some_and(|highlights| !highlights.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_recipe() -> Recipe {
        Recipe {
            name: "Es Teler".to_string(),
            description: "Fruit cocktail with coconut".to_string(),
            origin: "Jakarta".to_string(),
            cooking_time: "15 minutes".to_string(),
            servings: 2,
            difficulty: Difficulty::Easy,
            ingredients: vec![Ingredient::new("Avocado", "1 piece").with_notes("ripe")],
            instructions: vec!["Combine everything over shaved ice.".to_string()],
            history: "A street dessert.".to_string(),
            interesting_facts: Vec::new(),
            nutritional_highlights: None,
        }
    }

    #[test]
    fn test_validate_accepts_minimal_recipe() {
        assert!(minimal_recipe().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_broken_recipes() {
        let mut recipe = minimal_recipe();
        recipe.name = "   ".to_string();
        assert!(recipe.validate().is_err());

        let mut recipe = minimal_recipe();
        recipe.servings = 0;
        assert!(recipe.validate().is_err());

        let mut recipe = minimal_recipe();
        recipe.instructions.clear();
        let err = recipe.validate().unwrap_err();
        assert!(err.to_string().contains("no instructions"));
    }

    #[test]
    fn test_nutrition_gating() {
        let mut recipe = minimal_recipe();
        assert!(!recipe.has_nutritional_highlights());

        recipe.nutritional_highlights = Some(Vec::new());
        assert!(!recipe.has_nutritional_highlights());

        recipe.nutritional_highlights = Some(vec!["Vitamin C".to_string()]);
        assert!(recipe.has_nutritional_highlights());
    }

    #[test]
    fn test_camel_case_wire_names() {
        let json = serde_json::to_value(minimal_recipe()).unwrap();
        assert_eq!(json["cookingTime"], "15 minutes");
        assert!(json.get("interestingFacts").is_some());
        assert!(json.get("nutritionalHighlights").is_none());
        assert_eq!(json["ingredients"][0]["notes"], "ripe");
    }

    #[test]
    fn test_deserialize_backend_json() {
        let json = r#"{
            "name": "Soto Ayam",
            "description": "Turmeric chicken soup",
            "origin": "Java",
            "cookingTime": "1 hour",
            "servings": 4,
            "difficulty": "medium",
            "ingredients": [{"name": "Chicken", "amount": "1 kg"}],
            "instructions": ["Boil the chicken."],
            "history": "Found all over the archipelago."
        }"#;

        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.difficulty, Difficulty::Medium);
        assert!(recipe.interesting_facts.is_empty());
        assert!(recipe.nutritional_highlights.is_none());
        assert!(recipe.ingredients[0].notes.is_none());
    }

    #[test]
    fn test_difficulty_from_json_ignores_case_and_padding() {
        for (raw, expected) in [
            (r#""Medium ""#, Difficulty::Medium),
            (r#""mEDIUM""#, Difficulty::Medium),
            (r#""HARD""#, Difficulty::Hard),
            (r#""easy""#, Difficulty::Easy),
        ] {
            assert_eq!(serde_json::from_str::<Difficulty>(raw).unwrap(), expected);
        }
        assert!(serde_json::from_str::<Difficulty>(r#""extreme""#).is_err());
        assert_eq!(serde_json::to_string(&Difficulty::Hard).unwrap(), r#""Hard""#);
    }

    #[test]
    fn test_difficulty_parsing() {
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert_eq!(" easy ".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert!("extreme".parse::<Difficulty>().is_err());
        assert_eq!(Difficulty::Medium.to_string(), "Medium");
    }
}
