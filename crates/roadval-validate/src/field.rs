//! Single-value type checks.
//!
//! A pure predicate over one [`Value`] and its [`FieldDefinition`]. Empty
//! values always pass; whether a column must be filled is a required-column
//! concern.

use roadval_model::{FieldDefinition, FieldKind, Value, format_numeric};

/// Earliest year accepted by calendar-year fields.
pub const MIN_SURVEY_YEAR: f64 = 1900.0;

const YES_NO_STRICT: &[&str] = &["yes", "no", "true", "false", "1", "0"];
const YES_NO_LENIENT: &[&str] = &[
    "yes", "no", "true", "false", "1", "0", "y", "n", "on", "off",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldCheck {
    Valid,
    Invalid(String),
}

impl FieldCheck {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Empty for valid values.
    pub fn message(&self) -> &str {
        match self {
            Self::Valid => "",
            Self::Invalid(message) => message,
        }
    }

    fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}

/// Checks `value` against `field`. `current_year` bounds calendar-year fields.
pub fn check(value: &Value, field: &FieldDefinition, current_year: i32) -> FieldCheck {
    if value.is_empty() {
        return FieldCheck::Valid;
    }
    match field.kind {
        FieldKind::Text => check_text(value, field),
        FieldKind::Number => check_number(value, field, current_year),
        FieldKind::YesNo => check_yes_no(
            value,
            YES_NO_STRICT,
            "Value must be Yes/No, True/False, or 0/1",
        ),
        FieldKind::LenientYesNo => {
            check_yes_no(value, YES_NO_LENIENT, "Value must be Yes/No (boolean)")
        }
    }
}

fn check_text(value: &Value, field: &FieldDefinition) -> FieldCheck {
    let text = value.canonical();
    if let Some(max) = field.max_length {
        if text.chars().count() > max {
            return FieldCheck::invalid(format!("Text too long (max {max} characters)"));
        }
    }
    if let Some(allowed) = &field.valid_values {
        if !allowed.iter().any(|v| v == &text) {
            return FieldCheck::invalid(format!(
                "Invalid value. Must be one of: {}",
                allowed.join(", ")
            ));
        }
    }
    FieldCheck::Valid
}

fn check_number(value: &Value, field: &FieldDefinition, current_year: i32) -> FieldCheck {
    let Some(number) = value.as_number() else {
        if field.calendar_year {
            return FieldCheck::invalid("Enter a valid year");
        }
        return FieldCheck::invalid(format!(
            "Value must be numeric, got '{}'",
            value.canonical()
        ));
    };

    if field.calendar_year {
        let in_window = number.fract() == 0.0
            && number >= MIN_SURVEY_YEAR
            && number <= f64::from(current_year);
        return if in_window {
            FieldCheck::Valid
        } else {
            FieldCheck::invalid("Enter a valid year")
        };
    }

    if let Some([min, max]) = field.range {
        if number < min || number > max {
            return FieldCheck::invalid(format!(
                "Value must be between {} and {}",
                format_numeric(min),
                format_numeric(max)
            ));
        }
    }
    FieldCheck::Valid
}

fn check_yes_no(value: &Value, accepted: &[&str], expectation: &str) -> FieldCheck {
    let ok = match value {
        Value::Bool(_) => true,
        Value::Number(n) => *n == 0.0 || *n == 1.0,
        Value::Text(text) => {
            let lowered = text.trim().to_lowercase();
            accepted.contains(&lowered.as_str())
        }
        Value::Null => true,
    };
    if ok {
        FieldCheck::Valid
    } else {
        FieldCheck::invalid(format!("{expectation}, got '{}'", value.canonical()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YEAR: i32 = 2024;

    fn number(min: f64, max: f64) -> FieldDefinition {
        FieldDefinition::new("Wall_Rebuild_m", FieldKind::Number).with_range(min, max)
    }

    #[test]
    fn empty_values_always_pass() {
        let def = number(0.0, 10.0);
        assert!(check(&Value::Null, &def, YEAR).is_valid());
        assert!(check(&Value::text("  "), &def, YEAR).is_valid());
    }

    #[test]
    fn number_range_messages() {
        let def = number(0.0, f64::INFINITY);
        assert_eq!(
            check(&Value::text("-1"), &def, YEAR).message(),
            "Value must be between 0 and inf"
        );
        assert!(check(&Value::text("0"), &def, YEAR).is_valid());
        assert_eq!(
            check(&Value::text("12a"), &def, YEAR).message(),
            "Value must be numeric, got '12a'"
        );
    }

    #[test]
    fn calendar_year_window() {
        let def = FieldDefinition::new("Year", FieldKind::Number).calendar_year();
        assert!(check(&Value::text("1900"), &def, YEAR).is_valid());
        assert!(check(&Value::text("2024"), &def, YEAR).is_valid());
        for bad in ["1899", "2025", "2023.5", "-3", "soon"] {
            assert_eq!(
                check(&Value::text(bad), &def, YEAR),
                FieldCheck::Invalid("Enter a valid year".to_string()),
                "{bad}"
            );
        }
    }

    #[test]
    fn calendar_year_ignores_declared_range() {
        let mut def = FieldDefinition::new("Year", FieldKind::Number).with_range(2000.0, 2001.0);
        def.calendar_year = true;
        assert!(check(&Value::text("1950"), &def, YEAR).is_valid());
    }

    #[test]
    fn text_constraints() {
        let def = FieldDefinition::new("Hemis_NS", FieldKind::Text)
            .with_valid_values(&["N", "S"])
            .with_max_length(1);
        assert!(check(&Value::text(" S "), &def, YEAR).is_valid());
        assert_eq!(
            check(&Value::text("E"), &def, YEAR).message(),
            "Invalid value. Must be one of: N, S"
        );
        assert_eq!(
            check(&Value::text("North"), &def, YEAR).message(),
            "Text too long (max 1 characters)"
        );
        let free = FieldDefinition::new("Link_Name", FieldKind::Text);
        assert!(check(&Value::Number(12.0), &free, YEAR).is_valid());
    }

    #[test]
    fn yes_no_variants() {
        let strict = FieldDefinition::new("MarketDay", FieldKind::YesNo);
        let lenient = FieldDefinition::new("Roughness", FieldKind::LenientYesNo);
        for ok in ["Yes", " no ", "TRUE", "false", "1", "0"] {
            assert!(check(&Value::text(ok), &strict, YEAR).is_valid(), "{ok}");
        }
        assert!(check(&Value::Bool(false), &strict, YEAR).is_valid());
        assert!(check(&Value::Number(1.0), &strict, YEAR).is_valid());
        assert_eq!(
            check(&Value::text("on"), &strict, YEAR).message(),
            "Value must be Yes/No, True/False, or 0/1, got 'on'"
        );
        assert!(check(&Value::text("on"), &lenient, YEAR).is_valid());
        assert!(check(&Value::text("Y"), &lenient, YEAR).is_valid());
        assert_eq!(
            check(&Value::Number(2.0), &lenient, YEAR).message(),
            "Value must be Yes/No (boolean), got '2'"
        );
    }
}
