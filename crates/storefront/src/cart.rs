//! Cart collaborator.
//!
//! Pages only ever append lines; persistence and checkout belong to whatever
//! implements [`Cart`].

use stitchhouse_core::{CartLine, Price};

/// Something that accepts cart lines.
pub trait Cart {
    fn add_line(&mut self, line: CartLine);
}

/// In-memory cart. Adding an id that is already present bumps its quantity.
#[derive(Debug, Default, Clone)]
pub struct MemoryCart {
    lines: Vec<CartLine>,
}

impl MemoryCart {
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Remove a line entirely. Returns whether it was present.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.id != id);
        self.lines.len() != before
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Cart for MemoryCart {
    fn add_line(&mut self, line: CartLine) {
        if let Some(existing) = self.lines.iter_mut().find(|l| l.id == line.id) {
            existing.quantity = existing.quantity.saturating_add(line.quantity);
            tracing::debug!(id = %existing.id, quantity = existing.quantity, "cart quantity bumped");
            return;
        }
        tracing::debug!(id = %line.id, "cart line added");
        self.lines.push(line);
    }
}

#[cfg(test)]
mod tests {
    use stitchhouse_core::PackageTier;

    use super::*;

    #[test]
    fn test_repeat_add_bumps_quantity() {
        let mut cart = MemoryCart::new();
        cart.add_line(CartLine::from_package(PackageTier::Basic, "logo-design"));
        cart.add_line(CartLine::from_package(PackageTier::Basic, "logo-design"));
        cart.add_line(CartLine::from_package(PackageTier::Enterprise, "logo-design"));

        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.subtotal(), Price::from_dollars(299 * 2 + 999));
    }

    #[test]
    fn test_remove() {
        let mut cart = MemoryCart::new();
        cart.add_line(CartLine::from_package(PackageTier::Premium, "embroidery"));
        assert!(cart.remove("embroidery-premium"));
        assert!(!cart.remove("embroidery-premium"));
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Price::ZERO);
    }
}
