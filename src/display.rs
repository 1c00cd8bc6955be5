//! Recipe rendering.
//!
//! Everything here is a pure function of its inputs: the same recipe and
//! theme always produce the same output, and recipes are only borrowed.

use html_escape::encode_text;
use std::fmt::Write as _;

use crate::model::{Difficulty, Ingredient, Recipe};
use crate::theme::Theme;

pub const EMPTY_TITLE: &str = "No Recipe Generated Yet";
pub const EMPTY_DESCRIPTION: &str = "Upload an image or describe a dish to discover authentic Indonesian recipes with detailed cultural insights.";

/// A block of the recipe view, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    EmptyState,
    Header,
    Ingredients,
    Instructions,
    History,
    InterestingFacts,
    NutritionalHighlights,
}

impl Section {
    pub fn title(&self) -> &'static str {
        match self {
            Section::EmptyState => EMPTY_TITLE,
            Section::Header => "Recipe",
            Section::Ingredients => "Ingredients",
            Section::Instructions => "Cooking Instructions",
            Section::History => "History & Cultural Background",
            Section::InterestingFacts => "Interesting Facts",
            Section::NutritionalHighlights => "Nutritional Highlights",
        }
    }
}

/// Sections shown for the current recipe, or the empty state when there is none
pub fn sections(recipe: Option<&Recipe>) -> Vec<Section> {
    let Some(recipe) = recipe else {
        return vec![Section::EmptyState];
    };

    let mut sections = vec![
        Section::Header,
        Section::Ingredients,
        Section::Instructions,
        Section::History,
        Section::InterestingFacts,
    ];
    if recipe.has_nutritional_highlights() {
        sections.push(Section::NutritionalHighlights);
    }
    sections
}

fn difficulty_class(difficulty: Difficulty, theme: Theme) -> &'static str {
    match (difficulty, theme) {
        (Difficulty::Easy, Theme::Light) => "bg-green-100 text-green-800",
        (Difficulty::Easy, Theme::Dark) => "bg-green-900 text-green-200",
        (Difficulty::Medium, Theme::Light) => "bg-yellow-100 text-yellow-800",
        (Difficulty::Medium, Theme::Dark) => "bg-yellow-900 text-yellow-200",
        (Difficulty::Hard, Theme::Light) => "bg-red-100 text-red-800",
        (Difficulty::Hard, Theme::Dark) => "bg-red-900 text-red-200",
    }
}

/// Render the recipe panel as an HTML fragment
pub fn render_html(recipe: Option<&Recipe>, theme: Theme) -> String {
    let mut out = String::new();

    for section in sections(recipe) {
        match (section, recipe) {
            (Section::EmptyState, _) | (_, None) => {
                let _ = write!(
                    out,
                    "<section class=\"recipe-empty\" data-testid=\"recipe-empty\"><h3>{}</h3><p>{}</p></section>",
                    EMPTY_TITLE, EMPTY_DESCRIPTION
                );
            }
            (Section::Header, Some(recipe)) => {
                let _ = write!(
                    out,
                    "<section class=\"recipe-header\"><h2 data-testid=\"text-recipe-name\">{}</h2><p data-testid=\"text-recipe-description\">{}</p><span class=\"badge {}\" data-testid=\"badge-difficulty\">{}</span><ul class=\"recipe-meta\"><li data-testid=\"div-cooking-time\">{}</li><li data-testid=\"div-servings\">{} servings</li><li data-testid=\"div-origin\">{}</li></ul></section>",
                    encode_text(&recipe.name),
                    encode_text(&recipe.description),
                    difficulty_class(recipe.difficulty, theme),
                    recipe.difficulty,
                    encode_text(&recipe.cooking_time),
                    recipe.servings,
                    encode_text(&recipe.origin),
                );
            }
            (Section::Ingredients, Some(recipe)) => {
                let _ = write!(out, "<section class=\"recipe-ingredients\"><h3>{}</h3><div class=\"grid-2\">", section.title());
                for (index, ingredient) in recipe.ingredients.iter().enumerate() {
                    let _ = write!(
                        out,
                        "<div data-testid=\"div-ingredient-{}\"><span class=\"name\">{}</span><span class=\"amount\">{}</span>",
                        index,
                        encode_text(&ingredient.name),
                        encode_text(&ingredient.amount),
                    );
                    if let Some(notes) = &ingredient.notes {
                        let _ = write!(out, "<small>{}</small>", encode_text(notes));
                    }
                    out.push_str("</div>");
                }
                out.push_str("</div></section>");
            }
            (Section::Instructions, Some(recipe)) => {
                let _ = write!(out, "<section class=\"recipe-instructions\"><h3>{}</h3><ol>", section.title());
                for (index, step) in recipe.instructions.iter().enumerate() {
                    let _ = write!(
                        out,
                        "<li value=\"{}\" data-testid=\"div-instruction-{}\">{}</li>",
                        index + 1,
                        index,
                        encode_text(step)
                    );
                }
                out.push_str("</ol></section>");
            }
            (Section::History, Some(recipe)) => {
                let _ = write!(
                    out,
                    "<section class=\"recipe-history\"><h3>{}</h3><p data-testid=\"text-history-content\">{}</p></section>",
                    encode_text(section.title()),
                    encode_text(&recipe.history)
                );
            }
            (Section::InterestingFacts, Some(recipe)) => {
                let _ = write!(out, "<section class=\"recipe-facts\"><h3>{}</h3><ul>", section.title());
                for (index, fact) in recipe.interesting_facts.iter().enumerate() {
                    let _ = write!(out, "<li data-testid=\"div-fact-{}\">{}</li>", index, encode_text(fact));
                }
                out.push_str("</ul></section>");
            }
            (Section::NutritionalHighlights, Some(recipe)) => {
                let _ = write!(out, "<section class=\"recipe-nutrition\"><h3>{}</h3><div class=\"badges\">", section.title());
                for (index, highlight) in recipe
                    .nutritional_highlights
                    .iter()
                    .flatten()
                    .enumerate()
                {
                    let _ = write!(
                        out,
                        "<span class=\"badge outline\" data-testid=\"badge-nutrition-{}\">{}</span>",
                        index,
                        encode_text(highlight)
                    );
                }
                out.push_str("</div></section>");
            }
        }
    }

    out
}

fn ingredient_cell(ingredient: &Ingredient) -> String {
    match &ingredient.notes {
        Some(notes) => format!("{} - {} ({})", ingredient.name, ingredient.amount, notes),
        None => format!("{} - {}", ingredient.name, ingredient.amount),
    }
}

/// Render the recipe panel as plain text for terminals
pub fn render_text(recipe: Option<&Recipe>) -> String {
    let mut out = String::new();

    for section in sections(recipe) {
        match (section, recipe) {
            (Section::EmptyState, _) | (_, None) => {
                let _ = writeln!(out, "{}\n{}", EMPTY_TITLE, EMPTY_DESCRIPTION);
            }
            (Section::Header, Some(recipe)) => {
                let _ = writeln!(out, "{} [{}]", recipe.name, recipe.difficulty);
                let _ = writeln!(out, "{}", recipe.description);
                let _ = writeln!(
                    out,
                    "Time: {} | Servings: {} | Origin: {}",
                    recipe.cooking_time, recipe.servings, recipe.origin
                );
            }
            (Section::Ingredients, Some(recipe)) => {
                let _ = writeln!(out, "\n{}", section.title());
                let cells: Vec<String> = recipe.ingredients.iter().map(ingredient_cell).collect();
                let width = cells
                    .iter()
                    .step_by(2)
                    .map(|cell| cell.chars().count())
                    .max()
                    .unwrap_or(0);
                for row in cells.chunks(2) {
                    match row {
                        [left, right] => {
                            let pad = width - left.chars().count();
                            let _ = writeln!(out, "  {}{}    {}", left, " ".repeat(pad), right);
                        }
                        [left] => {
                            let _ = writeln!(out, "  {}", left);
                        }
                        _ => {}
                    }
                }
            }
            (Section::Instructions, Some(recipe)) => {
                let _ = writeln!(out, "\n{}", section.title());
                for (index, step) in recipe.instructions.iter().enumerate() {
                    let _ = writeln!(out, "  {}. {}", index + 1, step);
                }
            }
            (Section::History, Some(recipe)) => {
                let _ = writeln!(out, "\n{}\n  {}", section.title(), recipe.history);
            }
            (Section::InterestingFacts, Some(recipe)) => {
                let _ = writeln!(out, "\n{}", section.title());
                for fact in &recipe.interesting_facts {
                    let _ = writeln!(out, "  * {}", fact);
                }
            }
            (Section::NutritionalHighlights, Some(recipe)) => {
                let highlights = recipe.nutritional_highlights.as_deref().unwrap_or_default();
                let _ = writeln!(out, "\n{}\n  {}", section.title(), highlights.join(" | "));
            }
        }
    }

    out
}
