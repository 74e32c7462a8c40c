//! Buying verdict derived from a product's average rating.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Qualitative buying recommendation for one product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Verdict {
    StrongBuy,
    Mixed,
    Avoid,
}

impl Verdict {
    /// Classify an average rating: >= 4.0 is StrongBuy, <= 2.5 is Avoid,
    /// the open interval between them is Mixed.
    pub fn from_average_rating(average_rating: f64) -> Self {
        if average_rating >= 4.0 {
            Verdict::StrongBuy
        } else if average_rating <= 2.5 {
            Verdict::Avoid
        } else {
            Verdict::Mixed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strong_buy_boundary() {
        assert_eq!(Verdict::from_average_rating(4.0), Verdict::StrongBuy);
        assert_eq!(Verdict::from_average_rating(4.8), Verdict::StrongBuy);
        assert_eq!(Verdict::from_average_rating(3.99), Verdict::Mixed);
    }

    #[test]
    fn test_avoid_boundary() {
        assert_eq!(Verdict::from_average_rating(2.5), Verdict::Avoid);
        assert_eq!(Verdict::from_average_rating(1.0), Verdict::Avoid);
        assert_eq!(Verdict::from_average_rating(2.51), Verdict::Mixed);
    }

    #[test]
    fn test_mixed_interval() {
        assert_eq!(Verdict::from_average_rating(3.2), Verdict::Mixed);
        assert_eq!(Verdict::from_average_rating(3.0), Verdict::Mixed);
    }
}
