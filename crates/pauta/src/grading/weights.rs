//! Canonical component set and weight lookup for one resolved model.

use std::collections::HashMap;

use super::codes::{CodeAliasTable, ComponentCode};
use super::domain::EvaluationModel;

pub const DEFAULT_WEIGHT: f64 = 1.0;

#[derive(Debug, thiserror::Error)]
pub enum WeightConfigError {
    /// A NaN weight can only come from corrupted configuration; it must
    /// never leak into a composite.
    #[error("component '{code}' has a non-numeric weight")]
    NonNumericWeight { code: ComponentCode },
}

/// Normalized view of an evaluation model: active codes in first-seen order
/// plus a weight lookup. Rebuilt per resolved model; holds no external state.
#[derive(Debug, Clone)]
pub struct ComponentWeightIndex {
    active_codes: Vec<ComponentCode>,
    weights: HashMap<ComponentCode, f64>,
}

impl ComponentWeightIndex {
    pub fn build(model: &EvaluationModel) -> Result<Self, WeightConfigError> {
        Self::build_with_aliases(model, &CodeAliasTable::builtin())
    }

    pub fn build_with_aliases(
        model: &EvaluationModel,
        aliases: &CodeAliasTable,
    ) -> Result<Self, WeightConfigError> {
        let mut active_codes = Vec::with_capacity(model.components.len());
        let mut weights = HashMap::with_capacity(model.components.len());

        for component in &model.components {
            let Some(code) = aliases.normalize(&component.code) else {
                continue;
            };
            if weights.contains_key(&code) {
                // First spelling of a code wins; later duplicates are noise.
                continue;
            }

            let weight = match component.weight {
                Some(w) if w.is_nan() => {
                    return Err(WeightConfigError::NonNumericWeight { code })
                }
                Some(w) if w > 0.0 => w,
                _ => DEFAULT_WEIGHT,
            };

            active_codes.push(code.clone());
            weights.insert(code, weight);
        }

        Ok(Self {
            active_codes,
            weights,
        })
    }

    /// Assemble an index from raw parts, bypassing normalization. Only for
    /// exercising degenerate weight configurations in tests.
    #[cfg(test)]
    pub(crate) fn from_parts(
        active_codes: Vec<ComponentCode>,
        weights: HashMap<ComponentCode, f64>,
    ) -> Self {
        Self {
            active_codes,
            weights,
        }
    }

    pub fn active_codes(&self) -> &[ComponentCode] {
        &self.active_codes
    }

    pub fn is_active(&self, code: &ComponentCode) -> bool {
        self.weights.contains_key(code)
    }

    /// Weight for an active code. Codes missing from the map weigh 1, never
    /// 0: a zero default would silently drop the component from composites.
    pub fn weight_of(&self, code: &ComponentCode) -> f64 {
        self.weights.get(code).copied().unwrap_or(DEFAULT_WEIGHT)
    }
}
