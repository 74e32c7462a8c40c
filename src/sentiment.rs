//! Rating-based sentiment classification.
//!
//! Each review's star rating maps onto a three-way sentiment label plus a
//! signed score that feeds the per-product sentiment meter. Classification
//! is a function of the rating alone; the review text is never consulted.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Sentiment label derived from a review's star rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Classify a star rating: >= 4 is Positive, exactly 3 is Neutral,
    /// everything else is Negative. Ratings outside the 1-5 scale fall
    /// through the same thresholds without clamping.
    pub fn from_rating(rating: f64) -> Self {
        if rating >= 4.0 {
            Sentiment::Positive
        } else if rating == 3.0 {
            Sentiment::Neutral
        } else {
            Sentiment::Negative
        }
    }

    /// Signed score for the sentiment meter: +1, 0 or -1.
    pub fn score(self) -> i32 {
        match self {
            Sentiment::Positive => 1,
            Sentiment::Neutral => 0,
            Sentiment::Negative => -1,
        }
    }
}

/// Per-product sentiment tallies backing the breakdown chart.
#[derive(Debug, Default, Clone, Serialize, ToSchema)]
pub struct SentimentBreakdown {
    pub positive: u64,
    pub neutral: u64,
    pub negative: u64,
}

impl SentimentBreakdown {
    /// Count one classified review.
    pub fn record(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Neutral => self.neutral += 1,
            Sentiment::Negative => self.negative += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.positive + self.neutral + self.negative
    }

    /// Share of one label in percent (0.0 for an empty tally).
    pub fn percent(&self, count: u64) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        count as f64 / total as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_threshold_is_closed_at_four() {
        assert_eq!(Sentiment::from_rating(4.0), Sentiment::Positive);
        assert_eq!(Sentiment::from_rating(3.999), Sentiment::Negative);
        assert_eq!(Sentiment::from_rating(4.5), Sentiment::Positive);
        assert_eq!(Sentiment::from_rating(5.0), Sentiment::Positive);
    }

    #[test]
    fn test_neutral_only_at_exactly_three() {
        assert_eq!(Sentiment::from_rating(3.0), Sentiment::Neutral);
        assert_eq!(Sentiment::from_rating(2.999), Sentiment::Negative);
        assert_eq!(Sentiment::from_rating(3.001), Sentiment::Negative);
    }

    #[test]
    fn test_low_ratings_are_negative() {
        assert_eq!(Sentiment::from_rating(1.0), Sentiment::Negative);
        assert_eq!(Sentiment::from_rating(2.0), Sentiment::Negative);
    }

    #[test]
    fn test_out_of_range_ratings_still_classify() {
        assert_eq!(Sentiment::from_rating(6.0), Sentiment::Positive);
        assert_eq!(Sentiment::from_rating(0.0), Sentiment::Negative);
        assert_eq!(Sentiment::from_rating(-1.0), Sentiment::Negative);
    }

    #[test]
    fn test_scores() {
        assert_eq!(Sentiment::Positive.score(), 1);
        assert_eq!(Sentiment::Neutral.score(), 0);
        assert_eq!(Sentiment::Negative.score(), -1);
    }

    #[test]
    fn test_breakdown_counts_and_percentages() {
        let mut breakdown = SentimentBreakdown::default();
        breakdown.record(Sentiment::Positive);
        breakdown.record(Sentiment::Positive);
        breakdown.record(Sentiment::Neutral);
        breakdown.record(Sentiment::Negative);

        assert_eq!(breakdown.positive, 2);
        assert_eq!(breakdown.neutral, 1);
        assert_eq!(breakdown.negative, 1);
        assert_eq!(breakdown.total(), 4);
        assert_eq!(breakdown.percent(breakdown.positive), 50.0);
        assert_eq!(breakdown.percent(breakdown.neutral), 25.0);
    }

    #[test]
    fn test_empty_breakdown_has_zero_percentages() {
        let breakdown = SentimentBreakdown::default();
        assert_eq!(breakdown.total(), 0);
        assert_eq!(breakdown.percent(breakdown.positive), 0.0);
    }
}
