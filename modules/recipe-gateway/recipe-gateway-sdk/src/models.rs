//! Recipe and analysis models.
//!
//! Field names follow the JSON contract the web client already speaks
//! (`dishName`, `Fácil`/`Médio`/`Difícil`).

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Preparation difficulty as rendered to the user.
///
/// Labels outside the three known ones are kept verbatim in [`Difficulty::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Other(String),
}

impl Difficulty {
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Easy => "Fácil",
            Self::Medium => "Médio",
            Self::Hard => "Difícil",
            Self::Other(label) => label,
        }
    }
}

impl From<String> for Difficulty {
    fn from(label: String) -> Self {
        match label.trim().to_lowercase().as_str() {
            "fácil" | "facil" => Self::Easy,
            "médio" | "medio" => Self::Medium,
            "difícil" | "dificil" => Self::Hard,
            _ => Self::Other(label),
        }
    }
}

impl From<Difficulty> for String {
    fn from(d: Difficulty) -> Self {
        match d {
            Difficulty::Other(label) => label,
            known => known.label().to_owned(),
        }
    }
}

/// Quantity as the model writes it: `4`, `350.5` or `"4 porções"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(Number),
    Text(String),
}

impl From<u32> for Amount {
    fn from(n: u32) -> Self {
        Self::Number(n.into())
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => fmt::Display::fmt(n, f),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A structured recipe.
///
/// Only `name`, `ingredients` and `steps` are required. Everything else is
/// carried as the model sent it, including keys this type does not know.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<Amount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<Amount>,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tips: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Which recognition task governs prompt selection and output schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisKind {
    /// Identify visible ingredients and build a recipe from them.
    Fridge,
    /// Identify a finished dish and reconstruct its recipe.
    Dish,
}

impl AnalysisKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fridge => "fridge",
            Self::Dish => "dish",
        }
    }
}

/// Image sent for analysis: either a `data:` URI or bare base64.
#[derive(Clone, PartialEq, Eq)]
pub struct ImagePayload(String);

impl ImagePayload {
    const DEFAULT_MIME: &'static str = "image/jpeg";

    /// Wrap a client-supplied string (data URI or bare base64).
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Data URI for the upstream `image_url` part. Bare base64 is assumed JPEG.
    #[must_use]
    pub fn to_data_uri(&self) -> Cow<'_, str> {
        if self.0.starts_with("data:") {
            Cow::Borrowed(&self.0)
        } else {
            Cow::Owned(format!("data:{};base64,{}", Self::DEFAULT_MIME, self.0))
        }
    }
}

impl std::fmt::Debug for ImagePayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImagePayload")
            .field("len", &self.0.len())
            .finish()
    }
}

/// Successful image analysis.
///
/// `ingredients` is only set for [`AnalysisKind::Fridge`]; `dish_name` and
/// `confidence` only for [`AnalysisKind::Dish`], and only when the model sent them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOutcome {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dish_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<String>,
    pub recipe: Recipe,
}
