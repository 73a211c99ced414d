use crate::inference::error::PredictionError;
use shared::{Confidence, Label};

pub const DECISION_THRESHOLD: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub label: Label,
    pub confidence: Confidence,
}

/// Maps a classifier score in [0, 1] to a label. Scores at the threshold
/// count as positive.
pub fn decide(score: f32) -> Result<Decision, PredictionError> {
    if !score.is_finite() || !(0.0..=1.0).contains(&score) {
        return Err(PredictionError::InvalidScore(score));
    }

    let score = f64::from(score);
    let (label, probability) = if score >= f64::from(DECISION_THRESHOLD) {
        (Label::FalseSmut, score)
    } else {
        (Label::FsAbsent, 1.0 - score)
    };

    Ok(Decision {
        label,
        confidence: Confidence(round_to_hundredths(probability * 100.0)),
    })
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worked_examples() {
        let d = decide(0.95).unwrap();
        assert_eq!(d.label, Label::FalseSmut);
        assert_eq!(d.confidence, Confidence(95.0));

        let d = decide(0.2).unwrap();
        assert_eq!(d.label, Label::FsAbsent);
        assert_eq!(d.confidence, Confidence(80.0));

        let d = decide(0.5).unwrap();
        assert_eq!(d.label, Label::FalseSmut);
        assert_eq!(d.confidence, Confidence(50.0));
    }

    #[test]
    fn just_below_threshold_is_negative() {
        let d = decide(0.499).unwrap();
        assert_eq!(d.label, Label::FsAbsent);
        assert_eq!(d.confidence, Confidence(50.1));
    }

    #[test]
    fn confidence_stays_between_fifty_and_hundred() {
        for i in 0..=1000 {
            let score = i as f32 / 1000.0;
            let d = decide(score).unwrap();
            assert!(
                (50.0..=100.0).contains(&d.confidence.0),
                "score {score} gave {}",
                d.confidence
            );
        }
        assert_eq!(decide(1.0).unwrap().confidence, Confidence(100.0));
        assert_eq!(decide(0.0).unwrap().confidence, Confidence(100.0));
    }

    #[test]
    fn confidence_grows_away_from_the_boundary() {
        let upward = [0.5, 0.6, 0.7, 0.8, 0.9, 0.99, 1.0];
        for pair in upward.windows(2) {
            let a = decide(pair[0]).unwrap();
            let b = decide(pair[1]).unwrap();
            assert_eq!(b.label, Label::FalseSmut);
            assert!(b.confidence.0 > a.confidence.0);
        }

        let downward = [0.49, 0.4, 0.3, 0.2, 0.1, 0.01, 0.0];
        for pair in downward.windows(2) {
            let a = decide(pair[0]).unwrap();
            let b = decide(pair[1]).unwrap();
            assert_eq!(b.label, Label::FsAbsent);
            assert!(b.confidence.0 > a.confidence.0);
        }
    }

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(decide(0.87654).unwrap().confidence, Confidence(87.65));
        assert_eq!(decide(0.12344).unwrap().confidence, Confidence(87.66));
    }

    #[test]
    fn out_of_range_scores_are_errors() {
        for score in [f32::NAN, f32::INFINITY, -0.01, 1.01] {
            assert!(matches!(
                decide(score),
                Err(PredictionError::InvalidScore(_))
            ));
        }
    }
}
