use std::time::Duration;

pub const DISHES_PATH: &str = "/dishes";
pub const DEFAULT_ORIGIN: &str = "http://localhost:3000";

pub const NAME_MIN_CHARS: usize = 3;
pub const NAME_MAX_CHARS: usize = 255;

// (min, max), inclusive
pub const SPICINESS_SCALE_RANGE: (f64, f64) = (1.0, 10.0);
pub const NO_OF_SLICES_RANGE: (f64, f64) = (1.0, 12.0);
pub const DIAMETER_RANGE: (f64, f64) = (1.0, 100.0);
pub const SLICES_OF_BREAD_RANGE: (f64, f64) = (1.0, 20.0);

pub const DEFAULT_PREPARATION_TIME: &str = "00:00:00";
pub const DEFAULT_NUMBER_INPUT: &str = "0";

pub const TOAST_DURATION: Duration = Duration::from_millis(9000);
pub const SUCCESS_TITLE: &str = "Dish added";
pub const SUCCESS_MSG: &str = "Your dish was added successfully";
pub const ERROR_TITLE: &str = "Error";
pub const DEFAULT_ERROR_MSG: &str = "Something went wrong while adding your dish";
pub const SELECT_TYPE_MSG: &str = "Select a food type";
