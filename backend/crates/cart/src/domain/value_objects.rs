//! Domain Value Objects
//!
//! Immutable value types for the cart domain.

/// Largest quantity a single cart line may hold
pub const MAX_QUANTITY: u32 = 999;

/// Quantity of one product in a cart (1..=MAX_QUANTITY)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Quantity(u32);

impl Quantity {
    pub const ONE: Quantity = Quantity(1);
    pub const MIN: u32 = 1;
    pub const MAX: u32 = MAX_QUANTITY;

    pub fn new(value: u32) -> Option<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Sum of two quantities, `None` past MAX_QUANTITY
    pub fn checked_add(self, other: Quantity) -> Option<Self> {
        self.0.checked_add(other.0).and_then(Self::new)
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl From<Quantity> for u32 {
    fn from(q: Quantity) -> Self {
        q.0
    }
}

impl From<Quantity> for i32 {
    fn from(q: Quantity) -> Self {
        // MAX_QUANTITY fits comfortably in i32
        q.0 as i32
    }
}

/// Page of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: u32,
    pub offset: u32,
}
