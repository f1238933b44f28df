//! Smoothed negative-log-probability cost model.

use std::collections::HashMap;

const FREQUENCY_FLOOR: f64 = 5.0;
const NO_FREQUENCY_DEFAULT_COST: f32 = 10.0;
const NO_FREQUENCY_UNKNOWN_COST: f32 = 20.0;

pub struct CostModel {
    pub default_cost: f32,
    pub unknown_cost: f32,
    costs: HashMap<String, f32>,
}

impl CostModel {
    /// Builds the fallback model used when no frequency file is supplied:
    /// every dictionary word costs `default_cost`, unknown fragments cost `unknown_cost`.
    pub fn without_frequencies() -> Self {
        CostModel {
            default_cost: NO_FREQUENCY_DEFAULT_COST,
            unknown_cost: NO_FREQUENCY_UNKNOWN_COST,
            costs: HashMap::new(),
        }
    }

    /// Builds costs from observed word counts. `variants_of` maps a source
    /// dictionary entry to the orthographic variants generated for it, so a
    /// variant absent from `frequencies` inherits its source's cost.
    pub fn from_frequencies(
        frequencies: &HashMap<String, f64>,
        variants_of: impl Fn(&str) -> Vec<String>,
    ) -> Self {
        let mut effective: HashMap<String, f64> = HashMap::new();
        let mut total = 0.0f64;

        for (word, &count) in frequencies {
            let eff = count.max(FREQUENCY_FLOOR);
            effective.insert(word.clone(), eff);
            total += eff;

            for variant in variants_of(word) {
                effective.entry(variant).or_insert(eff);
            }
        }

        if total <= 0.0 {
            return Self::without_frequencies();
        }

        let min_prob = FREQUENCY_FLOOR / total;
        let default_cost = -min_prob.log10() as f32;
        let unknown_cost = default_cost + 5.0;

        let costs = effective
            .into_iter()
            .filter_map(|(word, eff)| {
                let prob = eff / total;
                (prob > 0.0).then(|| (word, -prob.log10() as f32))
            })
            .collect();

        CostModel {
            default_cost,
            unknown_cost,
            costs,
        }
    }

    /// Cost for a word known to be in the dictionary: its frequency-derived
    /// cost if present, else `default_cost`.
    pub fn cost_for(&self, word: &str) -> f32 {
        self.costs.get(word).copied().unwrap_or(self.default_cost)
    }

    pub fn frequency_count(&self) -> usize {
        self.costs.len()
    }
}
