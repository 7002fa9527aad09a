use serde::{Deserialize, Serialize, Serializer};

use super::DishType;

/// Backend representation of a dish, serialized as `{"type": "...", ...}`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Dish {
    Soup(Soup),
    Pizza(Pizza),
    Sandwich(Sandwich),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Soup {
    pub name: String,
    pub preparation_time: String,
    pub spiciness_scale: u8,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Pizza {
    pub name: String,
    pub preparation_time: String,
    pub no_of_slices: u8,
    #[serde(serialize_with = "serialize_number")]
    pub diameter: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Sandwich {
    pub name: String,
    pub preparation_time: String,
    pub slices_of_bread: u8,
}

impl Dish {
    pub fn dish_type(&self) -> DishType {
        match self {
            Dish::Soup(_) => DishType::Soup,
            Dish::Pizza(_) => DishType::Pizza,
            Dish::Sandwich(_) => DishType::Sandwich,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Dish::Soup(s) => &s.name,
            Dish::Pizza(p) => &p.name,
            Dish::Sandwich(s) => &s.name,
        }
    }
}

// whole numbers go out as JSON integers (`30`, not `30.0`)
fn serialize_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}
