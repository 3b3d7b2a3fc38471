use palmist_common::analysis::Interpreted;
use palmist_common::palm::{FeatureScore, FingerScore, MountScore};
use palmist_common::reading::HIGH_THRESHOLD;

use crate::content;

/// Builds the sentence list for a line.
///
/// Strength and clarity add their sentence only above `0.7`. Length always
/// adds exactly one sentence: the long one above `0.7`, the short one
/// otherwise.
pub fn interpret_line(line: &FeatureScore) -> String {
    let sentences = content::line_sentences(line.kind);
    let mut parts = Vec::with_capacity(3);
    if line.strength > HIGH_THRESHOLD {
        parts.push(sentences.strong);
    }
    if line.clarity > HIGH_THRESHOLD {
        parts.push(sentences.clear);
    }
    parts.push(if line.length > HIGH_THRESHOLD {
        sentences.long
    } else {
        sentences.short
    });
    parts.join(" ")
}

pub fn interpret_mount(mount: &MountScore) -> String {
    content::mount_interpretation(mount.kind).to_string()
}

pub fn interpret_finger(finger: &FingerScore) -> String {
    content::finger_interpretation(finger.kind).to_string()
}

pub(crate) fn attach<T>(score: T, interpret: impl Fn(&T) -> String) -> Interpreted<T> {
    let interpretation = interpret(&score);
    Interpreted {
        score,
        interpretation,
    }
}

#[cfg(test)]
mod tests {
    use palmist_common::palm::{FingerKind, LineKind, MountKind};

    use super::*;

    fn heart(strength: f64, clarity: f64, length: f64) -> FeatureScore {
        FeatureScore {
            kind: LineKind::Heart,
            strength,
            clarity,
            length,
            traits: Vec::new(),
        }
    }

    #[test]
    fn strong_clear_short_heart_line() {
        let text = interpret_line(&heart(0.8, 0.75, 0.3));
        let sentences = content::line_sentences(LineKind::Heart);
        assert_eq!(
            text,
            format!("{} {} {}", sentences.strong, sentences.clear, sentences.short)
        );
    }

    #[test]
    fn boundary_value_is_not_high() {
        let sentences = content::line_sentences(LineKind::Heart);
        assert_eq!(interpret_line(&heart(0.7, 0.7, 0.7)), sentences.short);
        assert_eq!(interpret_line(&heart(0.5, 0.5, 0.71)), sentences.long);
    }

    #[test]
    fn interpretation_is_pure() {
        let line = heart(0.9, 0.2, 0.9);
        assert_eq!(interpret_line(&line), interpret_line(&line));
    }

    #[test]
    fn mount_and_finger_texts_ignore_scores() {
        let low = MountScore {
            kind: MountKind::Saturn,
            influence: 0.0,
            meanings: Vec::new(),
        };
        let high = MountScore {
            influence: 1.0,
            ..low.clone()
        };
        assert_eq!(interpret_mount(&low), interpret_mount(&high));

        let finger = FingerScore {
            kind: FingerKind::Ring,
            overall_score: 0.6,
            meanings: Vec::new(),
        };
        assert_eq!(interpret_finger(&finger), "البنصر تدل على الإبداع والفن والجمال.");
    }
}
