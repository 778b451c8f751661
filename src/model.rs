use serde::{Deserialize, Serialize};

/// The provider addresses ingredient/measure pairs by positional index 1..=20.
pub const INGREDIENT_SLOTS: usize = 20;

/// One positional (ingredient, measure) slot of a recipe.
///
/// Either half may be absent or blank; a slot only contributes to the
/// ingredient list when its ingredient survives trimming.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngredientSlot {
    pub ingredient: Option<String>,
    pub measure: Option<String>,
}

/// A trimmed, presentable ingredient entry derived from a slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Ingredient {
    pub name: String,
    /// Empty string when the provider left the measure blank.
    pub measure: String,
}

/// A single dish record from the data provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub category: String,
    /// Cuisine/origin tag, e.g. "Italian".
    pub area: String,
    /// Free text; steps are newline-delimited.
    pub instructions: String,
    pub thumbnail: Option<String>,
    /// Comma-delimited tag list, verbatim from the provider.
    pub tags: Option<String>,
    pub source: Option<String>,
    pub youtube: Option<String>,
    /// Ordered (ingredient, measure) slots, positions 1..=20.
    #[serde(default)]
    pub slots: Vec<IngredientSlot>,
}

impl Recipe {
    /// Enumerates the ingredient slots in order, skipping any slot whose
    /// ingredient is absent or blank after trimming. A non-empty measure on a
    /// blank-ingredient slot does not rescue it.
    pub fn ingredients(&self) -> Vec<Ingredient> {
        self.slots
            .iter()
            .filter_map(|slot| {
                let name = slot.ingredient.as_deref().unwrap_or("").trim();
                if name.is_empty() {
                    return None;
                }
                Some(Ingredient {
                    name: name.to_string(),
                    measure: slot.measure.as_deref().unwrap_or("").trim().to_string(),
                })
            })
            .collect()
    }

    /// Splits the instructions text into numbered steps: one step per line,
    /// trimmed, blank lines discarded.
    pub fn instruction_steps(&self) -> Vec<String> {
        self.instructions
            .split('\n')
            .map(|line| line.trim_end_matches('\r').trim())
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Splits the comma-delimited tag list into trimmed, non-empty tags.
    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// A named grouping of recipes provided by the upstream dataset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Category {
    #[serde(rename = "idCategory")]
    pub id: String,
    #[serde(rename = "strCategory")]
    pub name: String,
    #[serde(rename = "strCategoryThumb")]
    pub thumbnail: String,
    #[serde(rename = "strCategoryDescription")]
    pub description: String,
}
