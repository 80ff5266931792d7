//! Feature schema the persisted model was trained on
//!
//! The classifier and scaler expect exactly [`N_FEATURES`] values in the order of
//! [`FEATURE_NAMES`]. Changing either silently breaks every prediction.

/// Request field names
pub const AGE: &str = "Age";
pub const GENDER: &str = "Gender";
pub const BMI: &str = "BMI";
pub const FAT_PERCENTAGE: &str = "Fat_Percentage";
pub const SESSION_DURATION_MINUTES: &str = "Session_Duration_Minutes";
pub const WORKOUT_FREQUENCY: &str = "Workout_Frequency";
pub const EXPERIENCE_LEVEL: &str = "Experience_Level";
pub const TYPE_OF_EXERCISE: &str = "Type_of_Exercise";
pub const AGE_GROUP: &str = "Age_Group";

/// Name the model uses for the request's `Workout_Frequency`
pub const WORKOUT_FREQUENCY_MODEL: &str = "Workout_Frequency (days/week)";

/// Output label field
pub const WORKOUT_LABEL: &str = "Workout_Label";

/// Every field a request must carry, in validation order
pub const REQUIRED_FIELDS: [&str; 9] = [
    AGE,
    GENDER,
    BMI,
    FAT_PERCENTAGE,
    SESSION_DURATION_MINUTES,
    WORKOUT_FREQUENCY,
    EXPERIENCE_LEVEL,
    TYPE_OF_EXERCISE,
    AGE_GROUP,
];

/// Categorical inputs plus the output label; each has a label encoder
pub const ENCODED_FIELDS: [&str; 4] = [GENDER, TYPE_OF_EXERCISE, AGE_GROUP, WORKOUT_LABEL];

pub const N_FEATURES: usize = 9;

/// Column order of the feature vector
pub const FEATURE_NAMES: [&str; N_FEATURES] = [
    AGE,
    GENDER,
    BMI,
    FAT_PERCENTAGE,
    SESSION_DURATION_MINUTES,
    WORKOUT_FREQUENCY_MODEL,
    EXPERIENCE_LEVEL,
    TYPE_OF_EXERCISE,
    AGE_GROUP,
];

/// Weight applied to the encoded exercise type at training time. Not configurable.
pub const TYPE_OF_EXERCISE_WEIGHT: f64 = 0.2;

/// Number of ranked entries in a response
pub const TOP_K: usize = 3;
