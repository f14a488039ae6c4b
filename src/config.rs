pub const DEFAULT_QUESTION_COUNT: u8 = 10;
pub const MIN_QUESTION_COUNT: u8 = 1;
pub const MAX_QUESTION_COUNT: u8 = 50;

/// One round's settings. Built by the configuration prompts, passed by value
/// into a quiz session, never mutated afterwards.
#[derive(Debug, Clone)]
pub struct QuizConfig {
    pub question_count: u8,
    pub category: String,
    pub difficulty: Difficulty,
    pub question_type: QuestionType,
    pub timer: TimerDuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    Any,
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn to_string(&self) -> String {
        let string = match self {
            Self::Any => "Any Difficulty",
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        };
        string.to_string()
    }

    pub fn from_string(input: &str) -> Option<Difficulty> {
        match input {
            "Any Difficulty" => Some(Self::Any),
            "Easy" => Some(Self::Easy),
            "Medium" => Some(Self::Medium),
            "Hard" => Some(Self::Hard),
            _ => None,
        }
    }

    /// `Any` sends no filter; concrete values are lowercase on the wire.
    pub fn api_param(&self) -> Option<&'static str> {
        match self {
            Self::Any => None,
            Self::Easy => Some("easy"),
            Self::Medium => Some("medium"),
            Self::Hard => Some("hard"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuestionType {
    #[default]
    Any,
    MultipleChoice,
    TrueOrFalse,
}

impl QuestionType {
    pub fn to_string(&self) -> String {
        let string = match self {
            Self::Any => "Any Type",
            Self::MultipleChoice => "Multiple Choice",
            Self::TrueOrFalse => "True or False",
        };
        string.to_string()
    }

    pub fn from_string(input: &str) -> Option<QuestionType> {
        match input {
            "Any Type" => Some(Self::Any),
            "Multiple Choice" => Some(Self::MultipleChoice),
            "True or False" => Some(Self::TrueOrFalse),
            _ => None,
        }
    }

    pub fn api_param(&self) -> Option<&'static str> {
        match self {
            Self::Any => None,
            Self::MultipleChoice => Some("multiple"),
            Self::TrueOrFalse => Some("boolean"),
        }
    }
}

/// The fixed set of selectable countdown lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerDuration {
    #[default]
    Seconds30,
    Seconds60,
    Seconds120,
    Seconds300,
    OneHour,
}

impl TimerDuration {
    pub const ALL: [TimerDuration; 5] = [
        Self::Seconds30,
        Self::Seconds60,
        Self::Seconds120,
        Self::Seconds300,
        Self::OneHour,
    ];

    pub fn seconds(&self) -> u32 {
        match self {
            Self::Seconds30 => 30,
            Self::Seconds60 => 60,
            Self::Seconds120 => 120,
            Self::Seconds300 => 300,
            Self::OneHour => 3600,
        }
    }

    pub fn to_string(&self) -> String {
        let string = match self {
            Self::Seconds30 => "30 seconds",
            Self::Seconds60 => "60 seconds",
            Self::Seconds120 => "120 seconds",
            Self::Seconds300 => "300 seconds",
            Self::OneHour => "1 hour",
        };
        string.to_string()
    }

    pub fn from_string(input: &str) -> Option<TimerDuration> {
        match input {
            "30 seconds" => Some(Self::Seconds30),
            "60 seconds" => Some(Self::Seconds60),
            "120 seconds" => Some(Self::Seconds120),
            "300 seconds" => Some(Self::Seconds300),
            "1 hour" => Some(Self::OneHour),
            _ => None,
        }
    }
}

/// Normalizes raw question-count input: non-digit characters are dropped,
/// empty or zero falls back to the default, and the result is clamped to
/// [1, 50]. Bad input is corrected, never rejected.
pub fn normalize_question_count(input: &str) -> u8 {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
    let parsed = digits.parse::<u32>().unwrap_or(0);
    if parsed == 0 {
        return DEFAULT_QUESTION_COUNT;
    }
    parsed.clamp(MIN_QUESTION_COUNT as u32, MAX_QUESTION_COUNT as u32) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_counts_normalize_to_default() {
        assert_eq!(normalize_question_count(""), 10);
        assert_eq!(normalize_question_count("0"), 10);
        assert_eq!(normalize_question_count("abc"), 10);
    }

    #[test]
    fn counts_are_clamped_and_filtered() {
        assert_eq!(normalize_question_count("75"), 50);
        assert_eq!(normalize_question_count("1"), 1);
        assert_eq!(normalize_question_count("50"), 50);
        // stray characters are filtered out as typed
        assert_eq!(normalize_question_count("2x5"), 25);
    }

    #[test]
    fn difficulty_wire_params() {
        assert_eq!(Difficulty::Any.api_param(), None);
        assert_eq!(Difficulty::Easy.api_param(), Some("easy"));
        assert_eq!(Difficulty::Medium.api_param(), Some("medium"));
        assert_eq!(Difficulty::Hard.api_param(), Some("hard"));
        assert_eq!(Difficulty::default(), Difficulty::Medium);
    }

    #[test]
    fn question_type_wire_params() {
        assert_eq!(QuestionType::Any.api_param(), None);
        assert_eq!(QuestionType::MultipleChoice.api_param(), Some("multiple"));
        assert_eq!(QuestionType::TrueOrFalse.api_param(), Some("boolean"));
    }

    #[test]
    fn timer_durations_round_trip_their_labels() {
        for duration in TimerDuration::ALL {
            assert_eq!(
                TimerDuration::from_string(&duration.to_string()),
                Some(duration)
            );
        }
        assert_eq!(TimerDuration::OneHour.seconds(), 3600);
        assert_eq!(TimerDuration::Seconds30.seconds(), 30);
    }
}
