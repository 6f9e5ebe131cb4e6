use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{
    de::Error as _,
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::error::UnknownFieldError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Integer,
    Decimal,
}

/// Closed interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricRange {
    pub min: f64,
    pub max: f64,
}

impl MetricRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// NaN and infinities are never contained.
    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }
}

macro_rules! metric_fields {
    ($($variant:ident => $wire:literal, $label:literal, $default:expr, ($min:expr, $max:expr), $kind:ident;)+) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum MetricField {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl MetricField {
            pub const ALL: &'static [MetricField] = &[$(MetricField::$variant),+];

            pub fn wire_name(self) -> &'static str {
                match self {
                    $(MetricField::$variant => $wire,)+
                }
            }

            pub fn label(self) -> &'static str {
                match self {
                    $(MetricField::$variant => $label,)+
                }
            }

            pub fn default_value(self) -> f64 {
                match self {
                    $(MetricField::$variant => $default,)+
                }
            }

            pub fn range(self) -> MetricRange {
                match self {
                    $(MetricField::$variant => MetricRange::new($min, $max),)+
                }
            }

            pub fn kind(self) -> MetricKind {
                match self {
                    $(MetricField::$variant => MetricKind::$kind,)+
                }
            }
        }
    };
}

metric_fields! {
    Age => "Age", "Age", 25.0, (18.0, 80.0), Integer;
    SleepHours => "Sleep_Hours", "Sleep Hours", 7.5, (4.0, 12.0), Decimal;
    ScreenTime => "Screen_Time", "Screen Time (hours)", 6.0, (0.0, 24.0), Decimal;
    StressLevel => "Stress_Level", "Stress Level", 5.0, (1.0, 10.0), Integer;
    NoiseExposure => "Noise_Exposure", "Noise Exposure", 3.0, (1.0, 10.0), Integer;
    SocialInteraction => "Social_Interaction", "Social Interaction", 6.0, (1.0, 10.0), Integer;
    WorkHours => "Work_Hours", "Work Hours", 8.0, (0.0, 16.0), Decimal;
    ExerciseHours => "Exercise_Hours", "Exercise Hours", 1.0, (0.0, 8.0), Decimal;
    CaffeineIntake => "Caffeine_Intake", "Caffeine Intake (cups)", 2.0, (0.0, 10.0), Decimal;
    MultitaskingHabit => "Multitasking_Habit", "Multitasking Habit", 4.0, (1.0, 10.0), Integer;
    AnxietyScore => "Anxiety_Score", "Anxiety Score", 4.0, (1.0, 10.0), Integer;
    DepressionScore => "Depression_Score", "Depression Score", 3.0, (1.0, 10.0), Integer;
    SensorySensitivity => "Sensory_Sensitivity", "Sensory Sensitivity", 4.0, (1.0, 10.0), Integer;
    MeditationHabit => "Meditation_Habit", "Meditation Habit", 3.0, (1.0, 10.0), Integer;
    OverthinkingScore => "Overthinking_Score", "Overthinking Score", 5.0, (1.0, 10.0), Integer;
    IrritabilityScore => "Irritability_Score", "Irritability Score", 4.0, (1.0, 10.0), Integer;
    HeadacheFrequency => "Headache_Frequency", "Headache Frequency", 2.0, (1.0, 10.0), Integer;
    SleepQuality => "Sleep_Quality", "Sleep Quality", 7.0, (1.0, 10.0), Integer;
    TechUsageHours => "Tech_Usage_Hours", "Tech Usage Hours", 8.0, (0.0, 24.0), Decimal;
    Overstimulated => "Overstimulated", "Overstimulated", 4.0, (1.0, 10.0), Integer;
}

impl fmt::Display for MetricField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for MetricField {
    type Err = UnknownFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        MetricField::ALL
            .iter()
            .copied()
            .find(|field| field.wire_name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownFieldError(wanted.to_string()))
    }
}

/// One value per [`MetricField`]; every field is always present.
#[derive(Debug, Clone, PartialEq)]
pub struct InputMetrics {
    values: BTreeMap<MetricField, f64>,
}

impl Default for InputMetrics {
    fn default() -> Self {
        Self {
            values: MetricField::ALL
                .iter()
                .map(|field| (*field, field.default_value()))
                .collect(),
        }
    }
}

impl InputMetrics {
    pub fn get(&self, field: MetricField) -> f64 {
        self.values
            .get(&field)
            .copied()
            .unwrap_or_else(|| field.default_value())
    }

    /// Returns a copy with `field` replaced. Integer-valued fields are truncated.
    pub fn with(&self, field: MetricField, value: f64) -> Self {
        let value = match field.kind() {
            MetricKind::Integer => value.trunc(),
            MetricKind::Decimal => value,
        };
        let mut next = self.clone();
        next.values.insert(field, value);
        next
    }

    pub fn iter(&self) -> impl Iterator<Item = (MetricField, f64)> + '_ {
        self.values.iter().map(|(field, value)| (*field, *value))
    }
}

impl Serialize for InputMetrics {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (field, value) in &self.values {
            match field.kind() {
                MetricKind::Integer if value.is_finite() => {
                    map.serialize_entry(field, &(*value as i64))?
                }
                _ => map.serialize_entry(field, value)?,
            }
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for InputMetrics {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values = BTreeMap::<MetricField, f64>::deserialize(deserializer)?;
        if let Some(missing) = MetricField::ALL
            .iter()
            .find(|field| !values.contains_key(field))
        {
            return Err(D::Error::custom(format!(
                "missing metric field `{}`",
                missing.wire_name()
            )));
        }
        Ok(Self { values })
    }
}
