//! Appliance catalog entries, per-appliance loads, and the editable load list.
//!
//! The sizing engine assumes already-valid inputs. [`ApplianceList`] is the
//! input layer that keeps them valid: quantities never drop below 1, hours
//! stay within `[0.1, 24]`, and wattage never goes negative.

use serde::{Deserialize, Serialize};

/// Default usage assigned to a newly added appliance (hours per day).
pub const DEFAULT_HOURS_PER_DAY: f64 = 4.0;
/// Minimum usage accepted for an appliance (hours per day).
pub const MIN_HOURS_PER_DAY: f64 = 0.1;
/// Maximum usage accepted for an appliance (hours per day).
pub const MAX_HOURS_PER_DAY: f64 = 24.0;
/// Category assigned to custom appliances with a blank category.
pub const DEFAULT_CUSTOM_CATEGORY: &str = "Other";

/// A reference catalog entry used to seed new loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplianceSpec {
    pub id: String,
    pub name: String,
    /// Free-form grouping label.
    pub category: String,
    pub default_watts: f64,
}

impl ApplianceSpec {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        default_watts: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            default_watts,
        }
    }
}

/// One appliance the user has added, with its usage pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplianceLoad {
    pub id: String,
    pub name: String,
    pub category: String,
    /// Number of identical units (>= 1).
    pub quantity: u32,
    /// User override of the rated power (W).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watts_actual: Option<f64>,
    /// Catalog rated power used when no override is set (W).
    pub default_watts: f64,
    /// Daily usage (hours, in `[0.1, 24]`).
    pub hours_per_day: f64,
}

impl ApplianceLoad {
    /// Creates a load from a catalog entry with quantity 1 and default hours.
    pub fn from_spec(spec: &ApplianceSpec) -> Self {
        Self {
            id: spec.id.clone(),
            name: spec.name.clone(),
            category: spec.category.clone(),
            quantity: 1,
            watts_actual: Some(spec.default_watts),
            default_watts: spec.default_watts,
            hours_per_day: DEFAULT_HOURS_PER_DAY,
        }
    }

    /// Rated power in use: the override if set, otherwise the catalog default.
    pub fn effective_watts(&self) -> f64 {
        self.watts_actual.unwrap_or(self.default_watts)
    }

    /// Daily energy of this load: `quantity * watts * hours` (Wh).
    pub fn daily_energy_wh(&self) -> f64 {
        f64::from(self.quantity) * self.effective_watts() * self.hours_per_day
    }
}

/// Daily energy share of one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub daily_wh: f64,
}

/// Ordered, editable list of appliance loads.
#[derive(Debug, Clone, Default)]
pub struct ApplianceList {
    loads: Vec<ApplianceLoad>,
    next_custom_id: u32,
}

impl ApplianceList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps existing loads, e.g. ones restored by the caller.
    pub fn from_loads(loads: Vec<ApplianceLoad>) -> Self {
        let next_custom_id = loads
            .iter()
            .filter_map(|l| l.id.strip_prefix("custom_")?.parse::<u32>().ok())
            .max()
            .map_or(0, |n| n.wrapping_add(1));
        Self {
            loads,
            next_custom_id,
        }
    }

    pub fn loads(&self) -> &[ApplianceLoad] {
        &self.loads
    }

    pub fn into_loads(self) -> Vec<ApplianceLoad> {
        self.loads
    }

    pub fn len(&self) -> usize {
        self.loads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loads.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ApplianceLoad> {
        self.loads.iter().find(|l| l.id == id)
    }

    /// Adds a catalog appliance, or bumps the quantity if it is already listed.
    pub fn add_from_catalog(&mut self, spec: &ApplianceSpec) {
        if let Some(existing) = self.find_mut(&spec.id) {
            existing.quantity = existing.quantity.saturating_add(1);
            return;
        }
        self.loads.push(ApplianceLoad::from_spec(spec));
    }

    /// Adds a user-defined appliance and returns its generated id.
    ///
    /// Returns `None` if the name is blank.
    pub fn add_custom(&mut self, name: &str, watts: f64, category: &str) -> Option<String> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let category = match category.trim() {
            "" => DEFAULT_CUSTOM_CATEGORY,
            c => c,
        };
        let id = self.take_custom_id();

        let watts = if watts.is_finite() { watts.max(0.0) } else { 0.0 };
        let spec = ApplianceSpec::new(id.clone(), name, category, watts);
        self.add_from_catalog(&spec);
        Some(id)
    }

    /// Removes a load. Returns `true` if it was present.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.loads.len();
        self.loads.retain(|l| l.id != id);
        self.loads.len() != before
    }

    /// Changes the quantity by `delta`, never going below 1.
    pub fn adjust_quantity(&mut self, id: &str, delta: i64) {
        if let Some(load) = self.find_mut(id) {
            let next = (i64::from(load.quantity) + delta).clamp(1, i64::from(u32::MAX));
            load.quantity = u32::try_from(next).unwrap_or(1);
        }
    }

    /// Sets daily usage, clamped to `[0.1, 24]`. Non-finite values are ignored.
    pub fn set_hours(&mut self, id: &str, hours: f64) {
        if !hours.is_finite() {
            return;
        }
        if let Some(load) = self.find_mut(id) {
            load.hours_per_day = hours.clamp(MIN_HOURS_PER_DAY, MAX_HOURS_PER_DAY);
        }
    }

    /// Overrides rated power, clamped to >= 0. Non-finite values are ignored.
    pub fn set_watts(&mut self, id: &str, watts: f64) {
        if !watts.is_finite() {
            return;
        }
        if let Some(load) = self.find_mut(id) {
            load.watts_actual = Some(watts.max(0.0));
        }
    }

    /// Daily energy per category, sorted by descending consumption.
    pub fn category_breakdown(&self) -> Vec<CategoryShare> {
        category_breakdown(&self.loads)
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut ApplianceLoad> {
        self.loads.iter_mut().find(|l| l.id == id)
    }

    /// Next `custom_{n}` id not already in the list. The counter wraps.
    fn take_custom_id(&mut self) -> String {
        loop {
            let id = format!("custom_{}", self.next_custom_id);
            self.next_custom_id = self.next_custom_id.wrapping_add(1);
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

/// Groups loads by category and sums their daily energy.
///
/// Categories keep first-seen order among equal totals.
pub fn category_breakdown(loads: &[ApplianceLoad]) -> Vec<CategoryShare> {
    let mut shares: Vec<CategoryShare> = Vec::new();
    for load in loads {
        let wh = load.daily_energy_wh();
        match shares.iter_mut().find(|s| s.category == load.category) {
            Some(share) => share.daily_wh += wh,
            None => shares.push(CategoryShare {
                category: load.category.clone(),
                daily_wh: wh,
            }),
        }
    }
    shares.sort_by(|a, b| b.daily_wh.total_cmp(&a.daily_wh));
    shares
}
