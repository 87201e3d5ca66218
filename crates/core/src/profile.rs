//! Feature assembly: request fields to the classifier's input row.
//!
//! A `HealthProfile` holds the twenty attributes collected by the assessment form. Every one
//! is optional on input and falls back to a documented default. `feature_vector` lays them
//! out in the trained column order, inserting the `Stroke` column that the form never asks
//! for.

use crate::constants::{FEATURE_COLUMNS, FEATURE_COUNT};
use crate::input::Fields;
use crate::CardioResult;
use std::collections::HashMap;

/// Value of the `Stroke` column. The model was trained with it, the UI does not collect it.
pub const STROKE_PLACEHOLDER: f64 = 0.0;

/// Health attributes for one assessment. Lives for a single request.
#[derive(Clone, Debug, PartialEq)]
pub struct HealthProfile {
    pub high_bp: f64,
    pub high_chol: f64,
    pub chol_check: f64,
    pub bmi: f64,
    pub smoker: f64,
    pub diabetes: f64,
    pub phys_activity: f64,
    pub fruits: f64,
    pub veggies: f64,
    pub heavy_alcohol: f64,
    pub any_healthcare: f64,
    pub no_doctor_cost: f64,
    /// Self-rated general health, 1 (excellent) to 5 (poor).
    pub gen_health: f64,
    pub mental_health_days: f64,
    pub physical_health_days: f64,
    pub diff_walk: f64,
    pub sex: f64,
    pub age: f64,
    pub education: f64,
    pub income: f64,
}

impl Default for HealthProfile {
    fn default() -> Self {
        Self {
            high_bp: 0.0,
            high_chol: 0.0,
            chol_check: 1.0,
            bmi: 25.0,
            smoker: 0.0,
            diabetes: 0.0,
            phys_activity: 1.0,
            fruits: 1.0,
            veggies: 1.0,
            heavy_alcohol: 0.0,
            any_healthcare: 1.0,
            no_doctor_cost: 0.0,
            gen_health: 3.0,
            mental_health_days: 0.0,
            physical_health_days: 0.0,
            diff_walk: 0.0,
            sex: 0.0,
            age: 30.0,
            education: 4.0,
            income: 5.0,
        }
    }
}

impl HealthProfile {
    /// Assemble a profile from named request fields.
    ///
    /// Absent fields take their defaults. The first value that fails to convert aborts the
    /// whole assembly.
    ///
    /// # Errors
    /// Returns `CardioError::InvalidInput` naming the offending field.
    pub fn from_fields(fields: Fields<'_>) -> CardioResult<Self> {
        let d = Self::default();
        Ok(Self {
            high_bp: fields.float_or("highbp", d.high_bp)?,
            high_chol: fields.float_or("highchol", d.high_chol)?,
            chol_check: fields.float_or("cholcheck", d.chol_check)?,
            bmi: fields.float_or("bmi", d.bmi)?,
            smoker: fields.float_or("smoker", d.smoker)?,
            diabetes: fields.float_or("diabetes", d.diabetes)?,
            phys_activity: fields.float_or("physactivity", d.phys_activity)?,
            fruits: fields.float_or("fruits", d.fruits)?,
            veggies: fields.float_or("veggies", d.veggies)?,
            heavy_alcohol: fields.float_or("hvyalcoholconsump", d.heavy_alcohol)?,
            any_healthcare: fields.float_or("anyhealthcare", d.any_healthcare)?,
            no_doctor_cost: fields.float_or("nodocbccost", d.no_doctor_cost)?,
            gen_health: fields.float_or("genhlth", d.gen_health)?,
            mental_health_days: fields.float_or("menthlth", d.mental_health_days)?,
            physical_health_days: fields.float_or("physhlth", d.physical_health_days)?,
            diff_walk: fields.float_or("diffwalk", d.diff_walk)?,
            sex: fields.float_or("sex", d.sex)?,
            age: fields.float_or("age", d.age)?,
            education: fields.float_or("education", d.education)?,
            income: fields.float_or("income", d.income)?,
        })
    }

    /// Assemble a profile from URL-encoded form values.
    pub fn from_form(form: &HashMap<String, String>) -> CardioResult<Self> {
        Self::from_fields(Fields::Form(form))
    }

    /// Assemble a profile from a JSON object body.
    pub fn from_json(body: &serde_json::Value) -> CardioResult<Self> {
        Self::from_fields(Fields::from_json(body)?)
    }

    /// The classifier input row in trained column order.
    pub fn feature_vector(&self) -> FeatureVector {
        FeatureVector([
            self.high_bp,
            self.high_chol,
            self.chol_check,
            self.bmi,
            self.smoker,
            STROKE_PLACEHOLDER,
            self.diabetes,
            self.phys_activity,
            self.fruits,
            self.veggies,
            self.heavy_alcohol,
            self.any_healthcare,
            self.no_doctor_cost,
            self.gen_health,
            self.mental_health_days,
            self.physical_health_days,
            self.diff_walk,
            self.sex,
            self.age,
            self.education,
            self.income,
        ])
    }
}

/// Fixed-order numeric row matching `FEATURE_COLUMNS`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Look up a value by trained column name.
    pub fn get(&self, column: &str) -> Option<f64> {
        column_index(column).map(|i| self.0[i])
    }
}

/// Position of a column in the trained schema.
pub fn column_index(column: &str) -> Option<usize> {
    FEATURE_COLUMNS.iter().position(|c| *c == column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CardioError;
    use serde_json::json;

    #[test]
    fn all_fields_omitted_yields_default_vector() {
        let profile = HealthProfile::from_form(&HashMap::new()).expect("defaults");
        let expected = [
            0.0, 0.0, 1.0, 25.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 0.0, 1.0, 0.0, 3.0, 0.0, 0.0,
            0.0, 0.0, 30.0, 4.0, 5.0,
        ];
        assert_eq!(profile.feature_vector().as_slice(), &expected);
    }

    #[test]
    fn stroke_column_is_fixed_even_if_submitted() {
        let form = HashMap::from([
            ("stroke".to_string(), "1".to_string()),
            ("Stroke".to_string(), "1".to_string()),
        ]);
        let vector = HealthProfile::from_form(&form).unwrap().feature_vector();
        assert_eq!(vector.get("Stroke"), Some(0.0));
    }

    #[test]
    fn submitted_values_land_in_their_columns() {
        let form = HashMap::from([
            ("age".to_string(), "9".to_string()),
            ("income".to_string(), "8".to_string()),
            ("hvyalcoholconsump".to_string(), "1".to_string()),
            ("bmi".to_string(), "31.2".to_string()),
        ]);
        let vector = HealthProfile::from_form(&form).unwrap().feature_vector();
        assert_eq!(vector.get("Age"), Some(9.0));
        assert_eq!(vector.get("Income"), Some(8.0));
        assert_eq!(vector.get("HvyAlcoholConsump"), Some(1.0));
        assert_eq!(vector.get("BMI"), Some(31.2));
        assert_eq!(vector.as_slice()[3], 31.2);
    }

    #[test]
    fn malformed_value_fails_whole_assembly() {
        let form = HashMap::from([
            ("age".to_string(), "forty".to_string()),
            ("bmi".to_string(), "22".to_string()),
        ]);
        let err = HealthProfile::from_form(&form).expect_err("non-numeric age");
        match err {
            CardioError::InvalidInput { field, value } => {
                assert_eq!(field, "age");
                assert_eq!(value, "forty");
            }
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn json_profile_accepts_numbers_and_strings() {
        let body = json!({"age": 50, "genhlth": "4", "smoker": true});
        let profile = HealthProfile::from_json(&body).unwrap();
        assert_eq!(profile.age, 50.0);
        assert_eq!(profile.gen_health, 4.0);
        assert_eq!(profile.smoker, 1.0);
    }

    #[test]
    fn column_index_follows_schema() {
        assert_eq!(column_index("HighBP"), Some(0));
        assert_eq!(column_index("Stroke"), Some(5));
        assert_eq!(column_index("Income"), Some(20));
        assert_eq!(column_index("Cholesterol"), None);
    }
}
