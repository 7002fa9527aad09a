use crate::data_types::dish_data_types::{Dish, Pizza, Sandwich, Soup};
use crate::data_types::form_data_types::{ValidatedInput, ValidatedVariant};

pub fn map_dish(data: ValidatedInput) -> Dish {
    let ValidatedInput {
        name,
        preparation_time,
        variant,
    } = data;

    match variant {
        ValidatedVariant::Soup { spiciness_scale } => Dish::Soup(Soup {
            name,
            preparation_time,
            spiciness_scale,
        }),
        ValidatedVariant::Pizza {
            no_of_slices,
            diameter,
        } => Dish::Pizza(Pizza {
            name,
            preparation_time,
            no_of_slices,
            diameter,
        }),
        ValidatedVariant::Sandwich { slices_of_bread } => Dish::Sandwich(Sandwich {
            name,
            preparation_time,
            slices_of_bread,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::form_data_types::DishFormInput;
    use crate::validation::validate;
    use serde_json::{json, Value};

    fn keys(v: &Value) -> Vec<&str> {
        let mut keys: Vec<&str> = v.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        keys.sort_unstable();
        keys
    }

    #[test]
    fn margherita_maps_to_wire_shape() {
        let raw: DishFormInput = serde_json::from_value(json!({
            "type": "pizza",
            "name": "Margherita",
            "preparationTime": "00:20:00",
            "noOfSlices": 8,
            "diameter": 30
        }))
        .unwrap();

        let dish = map_dish(validate(&raw).unwrap());

        assert_eq!(
            serde_json::to_value(&dish).unwrap(),
            json!({
                "type": "pizza",
                "name": "Margherita",
                "preparation_time": "00:20:00",
                "no_of_slices": 8,
                "diameter": 30
            })
        );
    }

    #[test]
    fn soup_has_exactly_the_wire_fields() {
        let dish = map_dish(ValidatedInput {
            name: "Tomato".into(),
            preparation_time: "00:30:00".into(),
            variant: ValidatedVariant::Soup { spiciness_scale: 3 },
        });
        let v = serde_json::to_value(&dish).unwrap();

        assert_eq!(
            keys(&v),
            vec!["name", "preparation_time", "spiciness_scale", "type"]
        );
        assert_eq!(v["type"], "soup");
        assert_eq!(v["spiciness_scale"], 3);
    }

    #[test]
    fn sandwich_has_exactly_the_wire_fields() {
        let dish = map_dish(ValidatedInput {
            name: "Club".into(),
            preparation_time: "00:05:00".into(),
            variant: ValidatedVariant::Sandwich { slices_of_bread: 3 },
        });
        let v = serde_json::to_value(&dish).unwrap();

        assert_eq!(
            keys(&v),
            vec!["name", "preparation_time", "slices_of_bread", "type"]
        );
        assert_eq!(v["type"], "sandwich");
    }

    #[test]
    fn pizza_has_exactly_the_wire_fields() {
        let dish = map_dish(ValidatedInput {
            name: "Funghi".into(),
            preparation_time: "00:12:00".into(),
            variant: ValidatedVariant::Pizza {
                no_of_slices: 6,
                diameter: 32.5,
            },
        });
        let v = serde_json::to_value(&dish).unwrap();

        assert_eq!(
            keys(&v),
            vec![
                "diameter",
                "name",
                "no_of_slices",
                "preparation_time",
                "type"
            ]
        );
    }
}
