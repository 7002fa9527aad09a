use serde::{Deserialize, Deserializer, Serialize};

use super::{DishType, FormField};
use crate::constants::{DEFAULT_NUMBER_INPUT, DEFAULT_PREPARATION_TIME};

/// Raw order form state. Every field is kept as the user typed it; the
/// discriminator may be empty and all variant fields are always present.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DishFormInput {
    #[serde(deserialize_with = "string_or_number")]
    pub name: String,
    #[serde(deserialize_with = "string_or_number")]
    pub preparation_time: String,
    #[serde(rename = "type", deserialize_with = "string_or_number")]
    pub dish_type: String,
    #[serde(deserialize_with = "string_or_number")]
    pub no_of_slices: String,
    #[serde(deserialize_with = "string_or_number")]
    pub diameter: String,
    #[serde(deserialize_with = "string_or_number")]
    pub spiciness_scale: String,
    #[serde(deserialize_with = "string_or_number")]
    pub slices_of_bread: String,
}

impl Default for DishFormInput {
    fn default() -> Self {
        DishFormInput {
            name: String::new(),
            preparation_time: DEFAULT_PREPARATION_TIME.to_string(),
            dish_type: String::new(),
            no_of_slices: DEFAULT_NUMBER_INPUT.to_string(),
            diameter: DEFAULT_NUMBER_INPUT.to_string(),
            spiciness_scale: DEFAULT_NUMBER_INPUT.to_string(),
            slices_of_bread: DEFAULT_NUMBER_INPUT.to_string(),
        }
    }
}

impl DishFormInput {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::PreparationTime => &self.preparation_time,
            FormField::Type => &self.dish_type,
            FormField::NoOfSlices => &self.no_of_slices,
            FormField::Diameter => &self.diameter,
            FormField::SpicinessScale => &self.spiciness_scale,
            FormField::SlicesOfBread => &self.slices_of_bread,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::Name => &mut self.name,
            FormField::PreparationTime => &mut self.preparation_time,
            FormField::Type => &mut self.dish_type,
            FormField::NoOfSlices => &mut self.no_of_slices,
            FormField::Diameter => &mut self.diameter,
            FormField::SpicinessScale => &mut self.spiciness_scale,
            FormField::SlicesOfBread => &mut self.slices_of_bread,
        };
        *slot = value.into();
    }

    /// The selected dish type, if the discriminator holds a known value
    pub fn selected_type(&self) -> Option<DishType> {
        self.dish_type.parse().ok()
    }
}

/// Form input that passed the schema; numbers are coerced but the shape is
/// still the form's, not the backend's.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedInput {
    pub name: String,
    pub preparation_time: String,
    pub variant: ValidatedVariant,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValidatedVariant {
    Soup { spiciness_scale: u8 },
    Pizza { no_of_slices: u8, diameter: f64 },
    Sandwich { slices_of_bread: u8 },
}

impl ValidatedInput {
    pub fn dish_type(&self) -> DishType {
        match self.variant {
            ValidatedVariant::Soup { .. } => DishType::Soup,
            ValidatedVariant::Pizza { .. } => DishType::Pizza,
            ValidatedVariant::Sandwich { .. } => DishType::Sandwich,
        }
    }
}

// number inputs may arrive as JSON numbers or strings, null means empty
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Num(serde_json::Number),
        Null(()),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s,
        Raw::Num(n) => n.to_string(),
        Raw::Null(()) => String::new(),
    })
}
