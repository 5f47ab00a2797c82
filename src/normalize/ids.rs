use crate::model::Provenance;
use chrono::Utc;

/// Builds entity ids for one response batch.
///
/// Every id starts with the provenance prefix (`generated` or `fallback`)
/// and carries a six-digit coarse timestamp; the index or day number keeps
/// ids unique inside the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdStamp {
    provenance: Provenance,
    timestamp: String,
}

impl IdStamp {
    pub fn now(provenance: Provenance) -> Self {
        Self::at(provenance, Utc::now().timestamp_millis())
    }

    pub fn at(provenance: Provenance, epoch_millis: i64) -> Self {
        IdStamp {
            provenance,
            timestamp: format!("{:06}", epoch_millis.rem_euclid(1_000_000)),
        }
    }

    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    /// `index` is 0-based; ids are 1-based
    pub fn recipe(&self, index: usize) -> String {
        format!(
            "{}-recipe-{}-{}",
            self.provenance.id_prefix(),
            self.timestamp,
            index + 1
        )
    }

    pub fn meal(&self, slot: &str, day: usize) -> String {
        format!(
            "{}-{}-{}-day{}",
            self.provenance.id_prefix(),
            slot,
            self.timestamp,
            day
        )
    }

    pub fn snack(&self, day: usize, index: usize) -> String {
        format!("{}-{}", self.meal("snack", day), index + 1)
    }

    pub fn meal_plan(&self) -> String {
        format!("{}-meal-plan-{}", self.provenance.id_prefix(), self.timestamp)
    }

    pub fn modified(&self, base_id: &str) -> String {
        format!(
            "{}-modified-{}-{}",
            self.provenance.id_prefix(),
            base_id,
            self.timestamp
        )
    }
}
