//! Typed prediction request
//!
//! The HTTP body is loosely typed JSON. [`WorkoutRequest::from_json`] checks that every
//! required field is present before looking at any value, then coerces each one.

use crate::error::{PredictionError, Result};
use crate::schema::{
    AGE, AGE_GROUP, BMI, EXPERIENCE_LEVEL, FAT_PERCENTAGE, GENDER, REQUIRED_FIELDS,
    SESSION_DURATION_MINUTES, TYPE_OF_EXERCISE, WORKOUT_FREQUENCY,
};
use serde_json::{Map, Value};

/// One validated request
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutRequest {
    pub age: f64,
    pub gender: String,
    pub bmi: f64,
    pub fat_percentage: f64,
    pub session_duration_minutes: f64,
    /// Sent as `Workout_Frequency`; the model knows it as `Workout_Frequency (days/week)`
    pub workout_frequency: f64,
    pub experience_level: f64,
    pub type_of_exercise: String,
    pub age_group: String,
}

impl WorkoutRequest {
    /// Build a request from a JSON object body
    pub fn from_json(value: &Value) -> Result<Self> {
        let fields = value.as_object().ok_or_else(|| {
            PredictionError::InvalidBody(format!("expected a JSON object, got {}", json_type(value)))
        })?;

        if let Some(missing) = REQUIRED_FIELDS.iter().find(|f| is_absent(fields, f)) {
            return Err(PredictionError::MissingField(missing.to_string()));
        }

        Ok(Self {
            age: numeric(fields, AGE)?,
            gender: categorical(fields, GENDER)?,
            bmi: numeric(fields, BMI)?,
            fat_percentage: numeric(fields, FAT_PERCENTAGE)?,
            session_duration_minutes: numeric(fields, SESSION_DURATION_MINUTES)?,
            workout_frequency: numeric(fields, WORKOUT_FREQUENCY)?,
            experience_level: numeric(fields, EXPERIENCE_LEVEL)?,
            type_of_exercise: categorical(fields, TYPE_OF_EXERCISE)?,
            age_group: categorical(fields, AGE_GROUP)?,
        })
    }
}

fn is_absent(fields: &Map<String, Value>, name: &str) -> bool {
    matches!(fields.get(name), None | Some(Value::Null))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn field<'a>(fields: &'a Map<String, Value>, name: &str) -> Result<&'a Value> {
    fields
        .get(name)
        .ok_or_else(|| PredictionError::MissingField(name.to_string()))
}

/// Accepts JSON numbers and numeric strings
fn numeric(fields: &Map<String, Value>, name: &str) -> Result<f64> {
    let malformed = |reason: String| PredictionError::MalformedValue {
        field: name.to_string(),
        reason,
    };

    let parsed = match field(fields, name)? {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| malformed(format!("{} is not representable as a float", n)))?,
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| malformed(format!("could not convert string to float: {:?}", s)))?,
        other => return Err(malformed(format!("expected a number, got {}", json_type(other)))),
    };

    if !parsed.is_finite() {
        return Err(malformed(format!("{} is not a finite number", parsed)));
    }
    Ok(parsed)
}

/// Only strings can be in a trained vocabulary; anything else is an unknown category
fn categorical(fields: &Map<String, Value>, name: &str) -> Result<String> {
    match field(fields, name)? {
        Value::String(s) => Ok(s.clone()),
        other => Err(PredictionError::UnknownCategory {
            field: name.to_string(),
            value: other.to_string(),
        }),
    }
}
