use tracing::{debug, info, instrument, warn};

use crate::ai::prompts::portion_prompt;
use crate::ai::{PortionReply, TextGenerator};
use crate::models::{Recommendation, RecommendationSource, SelectedMeal, UserProfile};
use crate::planner::calculations::{
    nutrition_targets, portion_lines, round_to_step, rounded_quantities, scale_factor,
    scaled_quantities, selection_totals,
};
use crate::planner::constants::{DEFAULT_AI_EXPLANATION, GRAM_STEP, ROUNDED_FALLBACK_EXPLANATION};

/// Settings the orchestrator passes through to the model.
#[derive(Debug, Clone)]
pub struct AiSettings {
    pub model: String,
    pub menu_model: String,
    pub response_language: String,
}

/// Ask the model to re-balance a selection's quantities.
///
/// Always returns a usable recommendation: a reply that cannot be read keeps
/// the current quantities snapped to the grid, and a failed call scales them
/// linearly toward the calorie target.
#[instrument(skip_all, fields(meals = selection.len()))]
pub async fn recommend_portions(
    generator: &dyn TextGenerator,
    settings: &AiSettings,
    profile: &UserProfile,
    selection: &[SelectedMeal],
) -> Recommendation {
    let targets = nutrition_targets(profile);
    let current = selection_totals(selection);
    let prompt = portion_prompt(
        profile,
        &targets,
        selection,
        &current,
        &settings.response_language,
    );
    debug!(prompt_len = prompt.len(), "Built portion prompt");

    let text = match generator.generate_json(&settings.model, &prompt).await {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "Portion recommendation call failed, scaling quantities");
            let factor = scale_factor(targets.daily_calories, current.calories);
            let explanation = format!(
                "Simple scaling: {:.2}x to reach {:.0} calories (rounded to {}g increments)",
                factor, targets.daily_calories, GRAM_STEP
            );
            return Recommendation::new(
                portion_lines(selection, &scaled_quantities(selection, factor)),
                explanation,
                RecommendationSource::ScaledFallback,
            );
        }
    };

    match PortionReply::parse(&text, selection.len()) {
        Ok(reply) => {
            let quantities: Vec<f64> = match reply.quantities {
                Some(raw) => selection
                    .iter()
                    .zip(raw)
                    .map(|(s, q)| round_to_step(q, s.meal.unit.step()))
                    .collect(),
                None => rounded_quantities(selection),
            };
            debug!(?quantities, "Parsed portion reply");
            info!("Portion recommendation generated");
            Recommendation::new(
                portion_lines(selection, &quantities),
                reply
                    .explanation
                    .unwrap_or_else(|| DEFAULT_AI_EXPLANATION.to_string()),
                RecommendationSource::Ai,
            )
        }
        Err(e) => {
            warn!(error = %e, "Unusable portion reply, rounding current quantities");
            Recommendation::new(
                portion_lines(selection, &rounded_quantities(selection)),
                ROUNDED_FALLBACK_EXPLANATION.to_string(),
                RecommendationSource::RoundedFallback,
            )
        }
    }
}
