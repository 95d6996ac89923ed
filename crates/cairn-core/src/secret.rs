//! Secret model: the normalized entries a prover draws witnesses from
//!
//! Every secret source (mnemonic, encrypted storage, raw exponent,
//! DH-tuple data) is reduced to [`SecretEntry`] values before a prover
//! is built. [`SecretSet`] is the ordered, frozen collection the prover
//! owns for its lifetime.

use crate::error::Result;
use crate::group::{GroupElement, SecretExponent};

/// Knowledge of x such that `element = g^x` for the fixed generator g
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DlogSecret {
    x: SecretExponent,
}

impl DlogSecret {
    pub fn new(x: SecretExponent) -> Self {
        Self { x }
    }

    /// The secret exponent
    pub fn exponent(&self) -> &SecretExponent {
        &self.x
    }

    /// The public image `g^x` this secret proves knowledge for
    pub fn public_image(&self) -> Result<GroupElement> {
        GroupElement::generator().exp(&self.x)
    }
}

/// Knowledge of x for a Diffie-Hellman tuple (g, h, u, v)
///
/// The tuple satisfies h = g^y, u = g^x, v = g^(xy) for some y that this
/// layer never sees. Swapping the middle elements swaps the witness
/// roles: (g, h, u, v, x) and (g, u, h, v, y) describe the same public
/// tuple. The algebraic relation is not checked here; the proof
/// interpreter owns that at proof time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DhTupleSecret {
    pub g: GroupElement,
    pub h: GroupElement,
    pub u: GroupElement,
    pub v: GroupElement,
    x: SecretExponent,
}

impl DhTupleSecret {
    pub fn new(
        g: GroupElement,
        h: GroupElement,
        u: GroupElement,
        v: GroupElement,
        x: SecretExponent,
    ) -> Self {
        Self { g, h, u, v, x }
    }

    /// The secret exponent
    pub fn exponent(&self) -> &SecretExponent {
        &self.x
    }
}

/// One normalized secret, regardless of its original source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretEntry {
    Dlog(DlogSecret),
    DhTuple(DhTupleSecret),
}

/// Ordered collection of secrets owned by a prover
///
/// Grows monotonically while a builder accumulates sources, then is
/// frozen by move at prover construction. Duplicates are allowed; order
/// is the order sources were configured in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecretSet {
    entries: Vec<SecretEntry>,
}

impl SecretSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: SecretEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[SecretEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SecretEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exponent(fill: u8) -> SecretExponent {
        let mut bytes = [0u8; 32];
        bytes[31] = fill;
        SecretExponent::from_bytes(bytes).unwrap()
    }

    #[test]
    fn test_public_image_is_generator_power() {
        let secret = DlogSecret::new(exponent(5));
        let expected = GroupElement::generator().exp(&exponent(5)).unwrap();
        assert_eq!(secret.public_image().unwrap(), expected);
    }

    #[test]
    fn test_dh_tuple_accepts_swapped_witness() {
        // Build a genuine tuple h = g^y, u = g^x, v = g^(xy)
        let g = GroupElement::generator();
        let x = exponent(3);
        let y = exponent(11);
        let h = g.exp(&y).unwrap();
        let u = g.exp(&x).unwrap();
        let v = u.exp(&y).unwrap();

        // Both witness orderings are representable secrets
        let with_x = DhTupleSecret::new(g, h, u, v, x);
        let with_y = DhTupleSecret::new(g, u, h, v, y);
        assert_eq!(with_x.v, with_y.v);
        assert_ne!(with_x.exponent(), with_y.exponent());
    }

    #[test]
    fn test_dh_tuple_relation_not_enforced() {
        // Unrelated elements are accepted; consistency is the proof
        // interpreter's concern.
        let g = GroupElement::generator();
        let h = g.exp(&exponent(2)).unwrap();
        let u = g.exp(&exponent(3)).unwrap();
        let v = g.exp(&exponent(4)).unwrap();
        let _ = DhTupleSecret::new(g, h, u, v, exponent(9));
    }

    #[test]
    fn test_secret_set_preserves_order_and_duplicates() {
        let mut set = SecretSet::new();
        let first = SecretEntry::Dlog(DlogSecret::new(exponent(1)));
        let second = SecretEntry::Dlog(DlogSecret::new(exponent(2)));
        set.push(first.clone());
        set.push(second.clone());
        set.push(first.clone());

        assert_eq!(set.len(), 3);
        assert_eq!(set.entries()[0], first);
        assert_eq!(set.entries()[1], second);
        assert_eq!(set.entries()[2], first);
    }
}
