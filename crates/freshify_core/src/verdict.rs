//! Maps a predicted label onto a verdict and its presentation.

/// sRGB colour without alpha; the GUI converts it into its own colour type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Colours used to render a verdict card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: Rgb,
    pub border: Rgb,
    /// Colour of the label itself.
    pub text: Rgb,
    /// Colour of the advisory line.
    pub accent: Rgb,
}

const GREEN: Theme = Theme {
    background: Rgb(0xf0, 0xfd, 0xf4),
    border: Rgb(0xbb, 0xf7, 0xd0),
    text: Rgb(0x15, 0x80, 0x3d),
    accent: Rgb(0x16, 0xa3, 0x4a),
};

const RED: Theme = Theme {
    background: Rgb(0xfe, 0xf2, 0xf2),
    border: Rgb(0xfe, 0xca, 0xca),
    text: Rgb(0xb9, 0x1c, 0x1c),
    accent: Rgb(0xdc, 0x26, 0x26),
};

const NEUTRAL: Theme = Theme {
    background: Rgb(0xef, 0xf6, 0xff),
    border: Rgb(0xe0, 0xe7, 0xff),
    text: Rgb(0x1f, 0x29, 0x37),
    accent: Rgb(0x1f, 0x29, 0x37),
};

/// Closed set of outcomes a label can be interpreted as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Fresh,
    Spoiled,
    /// Label matched no known keyword.
    Unknown,
}

impl Verdict {
    /// Case-insensitive keyword match. "fresh" is checked first, so a label
    /// mentioning both is `Fresh`.
    pub fn classify(label: &str) -> Self {
        let lower = label.to_lowercase();
        if lower.contains("fresh") {
            Verdict::Fresh
        } else if lower.contains("rotten") || lower.contains("spoiled") {
            Verdict::Spoiled
        } else {
            Verdict::Unknown
        }
    }

    pub fn theme(self) -> Theme {
        match self {
            Verdict::Fresh => GREEN,
            Verdict::Spoiled => RED,
            Verdict::Unknown => NEUTRAL,
        }
    }

    pub fn advisory(self) -> Option<&'static str> {
        match self {
            Verdict::Fresh => Some("✓ This item appears to be fresh and safe to consume"),
            Verdict::Spoiled => Some("⚠ This item may not be safe to consume"),
            Verdict::Unknown => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Fresh Apple", Verdict::Fresh)]
    #[case("freshbanana", Verdict::Fresh)]
    #[case("ROTTEN ORANGE", Verdict::Spoiled)]
    #[case("Spoiled milk", Verdict::Spoiled)]
    #[case("not fresh, rotten", Verdict::Fresh)]
    #[case("Banana", Verdict::Unknown)]
    #[case("", Verdict::Unknown)]
    fn classifies_by_keyword(#[case] label: &str, #[case] expected: Verdict) {
        assert_eq!(Verdict::classify(label), expected);
    }

    #[test]
    fn fresh_is_green_with_safe_advisory() {
        let verdict = Verdict::classify("Fresh Apple");
        assert_eq!(verdict.theme(), GREEN);
        assert!(verdict.advisory().unwrap().contains("safe to consume"));
    }

    #[test]
    fn spoiled_is_red_with_warning() {
        for label in ["rottenapples", "Spoiled Tomato"] {
            let verdict = Verdict::classify(label);
            assert_eq!(verdict.theme(), RED);
            assert_eq!(
                verdict.advisory(),
                Some("⚠ This item may not be safe to consume")
            );
        }
    }

    #[test]
    fn other_labels_are_neutral_without_advisory() {
        let verdict = Verdict::classify("Mango");
        assert_eq!(verdict.theme(), NEUTRAL);
        assert_eq!(verdict.advisory(), None);
    }
}
