//! Inventory ledger — remaining stock per interceptor type.
//!
//! The ledger is the single authority on what can still be fired. The
//! check-then-decrement in `try_expend` is one `&mut self` call, so it
//! is atomic relative to every other consumer in this process.

use std::collections::BTreeMap;

use bulwark_core::state::StockView;

/// Remaining interceptor stock, keyed by type name.
#[derive(Debug, Clone, Default)]
pub struct InventoryLedger {
    stock: BTreeMap<String, u32>,
}

impl InventoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a register manifest's arsenal map.
    pub fn from_arsenal<I>(arsenal: I) -> Self
    where
        I: IntoIterator<Item = (String, u32)>,
    {
        Self {
            stock: arsenal.into_iter().collect(),
        }
    }

    /// Types with stock remaining, in planning priority order:
    /// descending count, then ascending name. The name tie-break makes
    /// planning deterministic when counts are equal.
    pub fn types_by_priority(&self) -> Vec<(String, u32)> {
        let mut types: Vec<(String, u32)> = self
            .stock
            .iter()
            .filter(|(_, &count)| count > 0)
            .map(|(name, &count)| (name.clone(), count))
            .collect();
        types.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        types
    }

    /// Re-check stock and decrement by exactly one. Returns false, and
    /// changes nothing, when the type is missing or already at zero.
    pub fn try_expend(&mut self, name: &str) -> bool {
        match self.stock.get_mut(name) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        }
    }

    pub fn remaining(&self, name: &str) -> u32 {
        self.stock.get(name).copied().unwrap_or(0)
    }

    pub fn total_remaining(&self) -> u32 {
        self.stock.values().sum()
    }

    /// Ledger-wide depletion: no type has stock left.
    pub fn is_depleted(&self) -> bool {
        self.total_remaining() == 0
    }

    pub fn views(&self) -> Vec<StockView> {
        self.stock
            .iter()
            .map(|(name, &remaining)| StockView {
                name: name.clone(),
                remaining,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_orders_by_count_then_name() {
        let ledger = InventoryLedger::from_arsenal([
            ("Tomahawk".to_string(), 4),
            ("Patriot".to_string(), 10),
            ("Atlas".to_string(), 4),
            ("Trident".to_string(), 0),
        ]);
        let order: Vec<String> = ledger
            .types_by_priority()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        // Zero-stock types are excluded; equal counts break ties by name.
        assert_eq!(order, vec!["Patriot", "Atlas", "Tomahawk"]);
    }

    #[test]
    fn test_expend_decrements_and_floors_at_zero() {
        let mut ledger = InventoryLedger::from_arsenal([("Patriot".to_string(), 2)]);
        assert!(ledger.try_expend("Patriot"));
        assert!(ledger.try_expend("Patriot"));
        assert_eq!(ledger.remaining("Patriot"), 0);
        // The re-check refuses to go negative.
        assert!(!ledger.try_expend("Patriot"));
        assert_eq!(ledger.remaining("Patriot"), 0);
        assert!(!ledger.try_expend("Unknown"));
    }

    #[test]
    fn test_depletion_is_ledger_wide() {
        let mut ledger = InventoryLedger::from_arsenal([
            ("Patriot".to_string(), 1),
            ("Tomahawk".to_string(), 1),
        ]);
        assert!(!ledger.is_depleted());
        ledger.try_expend("Patriot");
        assert!(!ledger.is_depleted());
        ledger.try_expend("Tomahawk");
        assert!(ledger.is_depleted());
        assert_eq!(ledger.total_remaining(), 0);
    }
}
