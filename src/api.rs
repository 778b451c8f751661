use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;
use url::Url;

use crate::config::Config;
use crate::error::Error;
use crate::model::{Category, INGREDIENT_SLOTS, IngredientSlot, Recipe};

/// Typed queries against the recipe provider, routed through the gateway.
pub struct Client {
    http: reqwest::Client,
    gateway: Url,
}

impl Client {
    /// Create a client targeting the configured gateway
    pub fn new(config: &Config) -> Result<Self, Error> {
        let gateway = Url::parse(&config.gateway_url)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self { http, gateway })
    }

    /// Search recipes by free text. The query is trimmed first; an empty
    /// trimmed query is still sent and yields the provider's broad default
    /// set. A `meals: null` response is normalized to an empty list.
    pub async fn search_recipes(&self, query: &str) -> Result<Vec<Recipe>, Error> {
        let trimmed = query.trim();
        let mut endpoint = String::from("/search.php?s=");
        endpoint.extend(url::form_urlencoded::byte_serialize(trimmed.as_bytes()));

        let response: SearchResponse = self.fetch_json(&endpoint).await?;
        Ok(recipes_from(response))
    }

    /// Fetch the provider's category list, unmodified.
    pub async fn list_categories(&self) -> Result<Vec<Category>, Error> {
        let response: CategoriesResponse = self.fetch_json("/categories.php").await?;
        Ok(response.categories)
    }

    /// Issue `GET <gateway>/api/meals?endpoint=<path>` and decode the body.
    async fn fetch_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, Error> {
        let mut url = self.gateway.join("api/meals")?;
        url.query_pairs_mut().append_pair("endpoint", endpoint);

        ::log::debug!("Fetching {}", url);
        let response = self.http.get(url).send().await?.error_for_status()?;

        Ok(response.json::<T>().await?)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    /// The provider reports "no matches" as a literal null collection
    meals: Option<Vec<MealRecord>>,
}

#[derive(Debug, Deserialize)]
struct CategoriesResponse {
    categories: Vec<Category>,
}

/// One meal object in the provider's wire format. The 20 positional
/// `strIngredientN` / `strMeasureN` fields land in `extra` and are folded
/// into ordered slots during conversion.
#[derive(Debug, Deserialize)]
struct MealRecord {
    #[serde(rename = "idMeal")]
    id: String,
    #[serde(rename = "strMeal")]
    name: String,
    #[serde(rename = "strCategory", default)]
    category: Option<String>,
    #[serde(rename = "strArea", default)]
    area: Option<String>,
    #[serde(rename = "strInstructions", default)]
    instructions: Option<String>,
    #[serde(rename = "strMealThumb", default)]
    thumbnail: Option<String>,
    #[serde(rename = "strTags", default)]
    tags: Option<String>,
    #[serde(rename = "strSource", default)]
    source: Option<String>,
    #[serde(rename = "strYoutube", default)]
    youtube: Option<String>,
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

fn recipes_from(response: SearchResponse) -> Vec<Recipe> {
    response
        .meals
        .unwrap_or_default()
        .into_iter()
        .map(Recipe::from)
        .collect()
}

impl From<MealRecord> for Recipe {
    fn from(record: MealRecord) -> Self {
        let slots = (1..=INGREDIENT_SLOTS)
            .map(|index| IngredientSlot {
                ingredient: string_field(&record.extra, &format!("strIngredient{index}")),
                measure: string_field(&record.extra, &format!("strMeasure{index}")),
            })
            .collect();

        Self {
            id: record.id,
            name: record.name,
            category: record.category.unwrap_or_default(),
            area: record.area.unwrap_or_default(),
            instructions: record.instructions.unwrap_or_default(),
            thumbnail: non_empty(record.thumbnail),
            tags: non_empty(record.tags),
            source: non_empty(record.source),
            youtube: non_empty(record.youtube),
            slots,
        }
    }
}

fn string_field(fields: &BTreeMap<String, Value>, key: &str) -> Option<String> {
    fields.get(key).and_then(Value::as_str).map(str::to_string)
}

/// The provider uses both null and "" for absent optional fields
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
