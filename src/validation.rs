use regex_lite::Regex;
use static_init::dynamic;

use crate::constants::{
    DIAMETER_RANGE, NAME_MAX_CHARS, NAME_MIN_CHARS, NO_OF_SLICES_RANGE, SLICES_OF_BREAD_RANGE,
    SPICINESS_SCALE_RANGE,
};
use crate::data_types::form_data_types::{DishFormInput, ValidatedInput, ValidatedVariant};
use crate::data_types::{DishType, FormField};
use crate::errors::{FieldErrors, ValidationError};

/// Checks raw form input against the schema of the selected dish type.
///
/// Base fields are always checked. Variant fields are only checked (and
/// coerced) when the discriminator names that variant; the other variants'
/// inputs are ignored. All violations are reported at once.
pub fn validate(raw: &DishFormInput) -> Result<ValidatedInput, FieldErrors> {
    let mut errors = FieldErrors::default();

    let name = raw.name.as_str();
    let name_len = name.chars().count();
    if name_len < NAME_MIN_CHARS {
        errors.push(
            FormField::Name,
            ValidationError::TooShort {
                min: NAME_MIN_CHARS,
            },
        );
    } else if name_len > NAME_MAX_CHARS {
        errors.push(
            FormField::Name,
            ValidationError::TooLong {
                max: NAME_MAX_CHARS,
            },
        );
    }

    let preparation_time = raw.preparation_time.as_str();
    if preparation_time.is_empty() {
        errors.push(FormField::PreparationTime, ValidationError::Required);
    }

    let variant = match raw.dish_type.parse::<DishType>() {
        Ok(dish_type) => validate_variant(dish_type, raw, &mut errors),
        Err(e) => {
            errors.push(FormField::Type, e);
            None
        }
    };

    match variant {
        Some(variant) if errors.is_empty() => Ok(ValidatedInput {
            name: name.to_string(),
            preparation_time: preparation_time.to_string(),
            variant,
        }),
        _ => {
            log::debug!("Form rejected: {}", errors);
            Err(errors)
        }
    }
}

fn validate_variant(
    dish_type: DishType,
    raw: &DishFormInput,
    errors: &mut FieldErrors,
) -> Option<ValidatedVariant> {
    match dish_type {
        DishType::Soup => {
            let spiciness_scale = check_field(
                raw,
                FormField::SpicinessScale,
                NumberKind::Integer,
                SPICINESS_SCALE_RANGE,
                errors,
            );
            Some(ValidatedVariant::Soup {
                spiciness_scale: spiciness_scale? as u8,
            })
        }
        DishType::Pizza => {
            let no_of_slices = check_field(
                raw,
                FormField::NoOfSlices,
                NumberKind::Integer,
                NO_OF_SLICES_RANGE,
                errors,
            );
            let diameter = check_field(
                raw,
                FormField::Diameter,
                NumberKind::Decimal,
                DIAMETER_RANGE,
                errors,
            );
            Some(ValidatedVariant::Pizza {
                no_of_slices: no_of_slices? as u8,
                diameter: diameter?,
            })
        }
        DishType::Sandwich => {
            let slices_of_bread = check_field(
                raw,
                FormField::SlicesOfBread,
                NumberKind::Integer,
                SLICES_OF_BREAD_RANGE,
                errors,
            );
            Some(ValidatedVariant::Sandwich {
                slices_of_bread: slices_of_bread? as u8,
            })
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum NumberKind {
    Integer,
    Decimal,
}

fn check_field(
    raw: &DishFormInput,
    field: FormField,
    kind: NumberKind,
    range: (f64, f64),
    errors: &mut FieldErrors,
) -> Option<f64> {
    match coerce_number(raw.get(field), kind).and_then(|n| check_range(n, range)) {
        Ok(n) => Some(n),
        Err(e) => {
            errors.push(field, e);
            None
        }
    }
}

/// Turns a number input into a number. Empty input is `Required`, anything
/// that isn't a plain decimal literal is `NotANumber`.
pub fn coerce_number(input: &str, kind: NumberKind) -> Result<f64, ValidationError> {
    #[dynamic]
    static RE: Regex = Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?$").unwrap();

    let input = input.trim();
    if input.is_empty() {
        return Err(ValidationError::Required);
    }
    if !RE.is_match(input) {
        return Err(ValidationError::NotANumber(input.to_string()));
    }

    let n = input
        .parse::<f64>()
        .map_err(|_| ValidationError::NotANumber(input.to_string()))?;
    if !n.is_finite() {
        return Err(ValidationError::NotANumber(input.to_string()));
    }
    if kind == NumberKind::Integer && n.fract() != 0.0 {
        return Err(ValidationError::NotAnInteger);
    }

    Ok(n)
}

fn check_range(n: f64, (min, max): (f64, f64)) -> Result<f64, ValidationError> {
    if n < min {
        Err(ValidationError::BelowMinimum { min })
    } else if n > max {
        Err(ValidationError::AboveMaximum { max })
    } else {
        Ok(n)
    }
}
