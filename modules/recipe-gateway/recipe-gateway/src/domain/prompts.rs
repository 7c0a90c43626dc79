//! Prompt texts sent to the model. User-facing copy is Brazilian Portuguese.

use recipe_gateway_sdk::{AnalysisKind, Difficulty, Recipe};

const RECIPE_SCHEMA: &str = r#"  "recipe": {
    "name": "Nome da Receita",
    "time": "XX min",
    "difficulty": "Fácil" | "Médio" | "Difícil",
    "servings": número,
    "calories": número estimado,
    "ingredients": ["quantidade ingrediente 1", "quantidade ingrediente 2", ...],
    "steps": ["Passo 1", "Passo 2", ...]
  }"#;

const FRIDGE_INTRO: &str = "Você é um chef especialista em identificar ingredientes e criar receitas deliciosas.
Analise a imagem e identifique todos os ingredientes visíveis.
Depois, crie uma receita completa usando esses ingredientes.";

const DISH_INTRO: &str = "Você é um chef especialista em identificar pratos e recriar receitas.
Analise a imagem e identifique o prato mostrado.
Forneça a receita completa para replicar esse prato.";

const FRIDGE_USER_TEXT: &str =
    "Analise esta foto de ingredientes e crie uma receita saudável e deliciosa.";

const DISH_USER_TEXT: &str =
    "Identifique este prato e forneça a receita completa para prepará-lo.";

/// System prompt for an image analysis, including the JSON schema to answer in.
pub fn system_prompt(kind: AnalysisKind) -> String {
    match kind {
        AnalysisKind::Fridge => format!(
            "{FRIDGE_INTRO}\n\nResponda SEMPRE em JSON válido com este formato exato:\n{{\n  \"ingredients\": [\"ingrediente 1\", \"ingrediente 2\", ...],\n{RECIPE_SCHEMA}\n}}"
        ),
        AnalysisKind::Dish => format!(
            "{DISH_INTRO}\n\nResponda SEMPRE em JSON válido com este formato exato:\n{{\n  \"dishName\": \"Nome do prato identificado\",\n  \"confidence\": \"alta\" | \"média\" | \"baixa\",\n{RECIPE_SCHEMA}\n}}"
        ),
    }
}

pub fn user_text(kind: AnalysisKind) -> &'static str {
    match kind {
        AnalysisKind::Fridge => FRIDGE_USER_TEXT,
        AnalysisKind::Dish => DISH_USER_TEXT,
    }
}

const NOT_INFORMED: &str = "não informado";

/// Single user prompt asking for a modified version of `recipe`.
pub fn modify_prompt(recipe: &Recipe, instruction: &str) -> String {
    let description = recipe.description.as_deref().unwrap_or("");
    let time = recipe.time.as_deref().unwrap_or(NOT_INFORMED);
    let difficulty = recipe
        .difficulty
        .as_ref()
        .map_or(NOT_INFORMED, Difficulty::label);
    let calories = recipe
        .calories
        .as_ref()
        .map_or_else(|| NOT_INFORMED.to_owned(), ToString::to_string);
    let servings = recipe
        .servings
        .as_ref()
        .map_or_else(|| NOT_INFORMED.to_owned(), ToString::to_string);
    let tips = recipe
        .tips
        .as_deref()
        .map(|t| format!("Dicas: {t}\n"))
        .unwrap_or_default();

    format!(
        r#"Você é um chef profissional brasileiro. O usuário quer modificar a seguinte receita:

RECEITA ATUAL:
Nome: {name}
Descrição: {description}
Tempo: {time}
Calorias: {calories}
Porções: {servings}
Dificuldade: {difficulty}
Ingredientes: {ingredients}
Passos: {steps}
{tips}
MODIFICAÇÃO SOLICITADA: "{instruction}"

Crie uma NOVA versão da receita aplicando a modificação. Mantenha o espírito da receita original, mas adapte conforme solicitado.

Responda APENAS com um JSON válido neste formato:
{{
  "name": "Nome da receita modificada",
  "description": "Descrição breve (max 2 linhas)",
  "time": "X min",
  "calories": número,
  "servings": número,
  "difficulty": "Fácil" ou "Médio" ou "Difícil",
  "ingredients": ["ingrediente 1", "ingrediente 2", ...],
  "steps": ["Passo 1", "Passo 2", ...],
  "tips": "Dica opcional"
}}"#,
        name = recipe.name,
        ingredients = recipe.ingredients.join(", "),
        steps = recipe.steps.join(" | "),
    )
}
