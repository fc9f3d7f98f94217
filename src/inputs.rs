use crate::timer::TimerConfig;

/// Longest text a duration field accepts.
const MAX_FIELD_LEN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Hours,
    Minutes,
    Seconds,
}

impl Field {
    pub fn next(self) -> Self {
        match self {
            Field::Hours => Field::Minutes,
            Field::Minutes => Field::Seconds,
            Field::Seconds => Field::Hours,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Hours => "hours",
            Field::Minutes => "minutes",
            Field::Seconds => "seconds",
        }
    }
}

/// Lenient integer parse: the leading digits are used, anything else is 0.
pub fn parse_field(text: &str) -> u64 {
    let digits: String = text
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

/// The three duration fields as the user typed them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigInputs {
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
    enabled: bool,
}

impl ConfigInputs {
    pub fn new(config: &TimerConfig) -> Self {
        let mut inputs = Self {
            enabled: true,
            ..Self::default()
        };
        inputs.set(config);
        inputs
    }

    pub fn set(&mut self, config: &TimerConfig) {
        self.hours = config.hours.to_string();
        self.minutes = config.minutes.to_string();
        self.seconds = config.seconds.to_string();
    }

    pub fn timer_config(&self) -> TimerConfig {
        TimerConfig::new(
            parse_field(&self.hours),
            parse_field(&self.minutes),
            parse_field(&self.seconds),
        )
    }

    pub fn total_seconds(&self) -> u64 {
        self.timer_config().total_seconds()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Hours => &self.hours,
            Field::Minutes => &self.minutes,
            Field::Seconds => &self.seconds,
        }
    }

    fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Hours => &mut self.hours,
            Field::Minutes => &mut self.minutes,
            Field::Seconds => &mut self.seconds,
        }
    }

    /// Append a character to `field`. Returns false when the inputs are
    /// disabled or the field is full.
    pub fn push(&mut self, field: Field, c: char) -> bool {
        if !self.enabled {
            return false;
        }
        let text = self.get_mut(field);
        if text.chars().count() >= MAX_FIELD_LEN {
            return false;
        }
        text.push(c);
        true
    }

    pub fn backspace(&mut self, field: Field) -> bool {
        if !self.enabled {
            return false;
        }
        self.get_mut(field).pop().is_some()
    }
}
