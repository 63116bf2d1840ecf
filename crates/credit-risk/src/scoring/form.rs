use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{ApplicantProfile, EducationLevel};

/// Raw prediction form as the browser submits it: every field is free text.
///
/// JSON numbers and booleans are accepted and kept as their text; `null` reads as empty.
/// Only a subset feeds the score; the rest is collected so the form can round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicantForm {
    #[serde(deserialize_with = "deserialize_text")]
    pub gender: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub own_car: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub own_realty: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub income: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub credit_amount: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub annuity: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub children: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub family_status: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub housing_type: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub education: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub occupation: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub age: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub employment_days: String,
}

impl Default for ApplicantForm {
    fn default() -> Self {
        Self {
            gender: "M".to_string(),
            own_car: "N".to_string(),
            own_realty: "Y".to_string(),
            income: String::new(),
            credit_amount: String::new(),
            annuity: String::new(),
            children: "0".to_string(),
            family_status: "Married".to_string(),
            housing_type: "House / apartment".to_string(),
            education: EducationLevel::HigherEducation.label().to_string(),
            occupation: "Laborers".to_string(),
            age: String::new(),
            employment_days: String::new(),
        }
    }
}

impl ApplicantForm {
    /// Converts the submission, coercing anything unreadable to zero.
    pub fn to_profile(&self) -> ApplicantProfile {
        let education_level = match EducationLevel::from_label(&self.education) {
            Some(level) => level,
            None => {
                debug!(label = %self.education, "unrecognised education label");
                EducationLevel::IncompleteHigher
            }
        };

        ApplicantProfile {
            annual_income: lenient_decimal(&self.income),
            credit_amount: lenient_decimal(&self.credit_amount),
            age: lenient_decimal(&self.age),
            employment_days: lenient_decimal(&self.employment_days),
            education_level,
            owns_car: owns(&self.own_car),
            owns_realty: owns(&self.own_realty),
            number_of_children: lenient_count(&self.children),
        }
    }
}

impl From<&ApplicantForm> for ApplicantProfile {
    fn from(form: &ApplicantForm) -> Self {
        form.to_profile()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FormValue {
    Text(String),
    Integer(i64),
    Unsigned(u64),
    Decimal(f64),
    Flag(bool),
}

fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<FormValue>::deserialize(deserializer)?;
    Ok(match value {
        None => String::new(),
        Some(FormValue::Text(text)) => text,
        Some(FormValue::Integer(number)) => number.to_string(),
        Some(FormValue::Unsigned(number)) => number.to_string(),
        Some(FormValue::Decimal(number)) => number.to_string(),
        Some(FormValue::Flag(true)) => "Y".to_string(),
        Some(FormValue::Flag(false)) => "N".to_string(),
    })
}

fn owns(answer: &str) -> bool {
    !answer.trim().eq_ignore_ascii_case("n")
}

/// Reads the longest decimal prefix (`"1500abc"` is 1500). No prefix, or a non-finite
/// value, yields zero.
pub fn lenient_decimal(raw: &str) -> f64 {
    let text = raw.trim_start();
    let bytes = text.as_bytes();
    let mut pos = 0;

    let negative = match bytes.first() {
        Some(b'-') => {
            pos += 1;
            true
        }
        Some(b'+') => {
            pos += 1;
            false
        }
        _ => false,
    };

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let int_digits = &text[int_start..pos];

    let mut frac_digits = "";
    if pos < bytes.len() && bytes[pos] == b'.' {
        let frac_start = pos + 1;
        let mut end = frac_start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        frac_digits = &text[frac_start..end];
        if !int_digits.is_empty() || !frac_digits.is_empty() {
            pos = end;
        }
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return 0.0;
    }

    let mut exponent = String::new();
    if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
        let mut end = pos + 1;
        let mut exp = String::from("e");
        if end < bytes.len() && (bytes[end] == b'-' || bytes[end] == b'+') {
            exp.push(bytes[end] as char);
            end += 1;
        }
        let digits_start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end > digits_start {
            exp.push_str(&text[digits_start..end]);
            exponent = exp;
        }
    }

    let canonical = format!(
        "{}{}.{}{}",
        if negative { "-" } else { "" },
        if int_digits.is_empty() { "0" } else { int_digits },
        if frac_digits.is_empty() { "0" } else { frac_digits },
        exponent
    );

    match canonical.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Reads the leading integer (`"2.9"` is 2, `"0xA"` is 10). Negative or unreadable input
/// yields zero.
pub fn lenient_count(raw: &str) -> u32 {
    let text = raw.trim_start();
    let unsigned = match text.strip_prefix('-') {
        Some(_) => return 0,
        None => text.strip_prefix('+').unwrap_or(text),
    };

    let hex = unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"));
    let (digits, radix) = match hex {
        Some(rest) => (rest, 16),
        None => (unsigned, 10),
    };

    digits
        .chars()
        .map_while(|digit| digit.to_digit(radix))
        .fold(0u32, |acc, digit| {
            acc.saturating_mul(radix).saturating_add(digit)
        })
}
