pub mod dish_data_types;
pub mod form_data_types;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DishType {
    Soup,
    Pizza,
    Sandwich,
}

impl DishType {
    pub const ALL: [DishType; 3] = [DishType::Pizza, DishType::Soup, DishType::Sandwich];

    pub fn as_str(&self) -> &'static str {
        match self {
            DishType::Soup => "soup",
            DishType::Pizza => "pizza",
            DishType::Sandwich => "sandwich",
        }
    }
}

impl fmt::Display for DishType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DishType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Err(ValidationError::MissingDiscriminator),
            "soup" => Ok(DishType::Soup),
            "pizza" => Ok(DishType::Pizza),
            "sandwich" => Ok(DishType::Sandwich),
            other => Err(ValidationError::UnknownDiscriminator(other.to_string())),
        }
    }
}

/// Fields of the order form, in the order they are rendered.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormField {
    Name,
    PreparationTime,
    Type,
    NoOfSlices,
    Diameter,
    SpicinessScale,
    SlicesOfBread,
}

impl FormField {
    pub const ALL: [FormField; 7] = [
        FormField::Name,
        FormField::PreparationTime,
        FormField::Type,
        FormField::NoOfSlices,
        FormField::Diameter,
        FormField::SpicinessScale,
        FormField::SlicesOfBread,
    ];

    /// Key of the field in form JSON (camelCase, unlike the wire format)
    pub fn form_key(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::PreparationTime => "preparationTime",
            FormField::Type => "type",
            FormField::NoOfSlices => "noOfSlices",
            FormField::Diameter => "diameter",
            FormField::SpicinessScale => "spicinessScale",
            FormField::SlicesOfBread => "slicesOfBread",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Dish Name",
            FormField::PreparationTime => "Preparation time",
            FormField::Type => "Food Type",
            FormField::NoOfSlices => "Number of slices",
            FormField::Diameter => "Diameter",
            FormField::SpicinessScale => "Spiciness scale",
            FormField::SlicesOfBread => "Slices of bread",
        }
    }

    pub fn helper_text(&self) -> &'static str {
        match self {
            FormField::Name => "What do you call it?",
            FormField::PreparationTime => "How long does it take to make?",
            FormField::Type => "What's your food type?",
            FormField::NoOfSlices => "How many slices?",
            FormField::Diameter => "How big is it?",
            FormField::SpicinessScale => "How spicy is it?",
            FormField::SlicesOfBread => "How many slices of bread?",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.form_key())
    }
}
