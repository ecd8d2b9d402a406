//! The prioritization scoring formula.

/// Compute a feature's priority score from its four ratings.
///
/// The score is the product of impact, confidence, and alignment divided by
/// effort, rounded to one decimal place. Ratings are expected in 1-5; the
/// store validates ranges before calling this, but a zero effort still maps
/// to a zero score rather than a division error.
pub fn calc_score(impact: i64, confidence: i64, alignment: i64, effort: i64) -> f64 {
    if effort == 0 {
        return 0.0;
    }
    let raw = (impact * confidence * alignment) as f64 / effort as f64;
    (raw * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_effort_maps_to_zero_score() {
        assert_eq!(calc_score(5, 5, 5, 0), 0.0);
        assert_eq!(calc_score(1, 1, 1, 0), 0.0);
    }

    #[test]
    fn matches_formula_over_full_rating_grid() {
        for impact in 1..=5 {
            for confidence in 1..=5 {
                for alignment in 1..=5 {
                    for effort in 1..=5 {
                        let expected = ((impact * confidence * alignment) as f64 / effort as f64
                            * 10.0)
                            .round()
                            / 10.0;
                        assert_eq!(calc_score(impact, confidence, alignment, effort), expected);
                    }
                }
            }
        }
    }

    #[test]
    fn rounds_to_one_decimal() {
        // 4*3*4/5 = 9.6 exactly
        assert_eq!(calc_score(4, 3, 4, 5), 9.6);
        // 3*4*2/3 = 8.0
        assert_eq!(calc_score(3, 4, 2, 3), 8.0);
        // 5*5*5/3 = 41.666... -> 41.7
        assert_eq!(calc_score(5, 5, 5, 3), 41.7);
    }

    #[test]
    fn worked_examples_from_the_scoring_model() {
        // 5*4*5 = 100, /4 = 25
        assert_eq!(calc_score(5, 4, 5, 4), 25.0);
        // 2*5*5 = 50, /2 = 25
        assert_eq!(calc_score(2, 5, 5, 2), 25.0);
    }
}
