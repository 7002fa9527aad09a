use std::env;

use pretty_env_logger::env_logger::DEFAULT_FILTER_ENV;

use crate::data_types::FormField;
use crate::errors::FieldErrors;
use crate::order_form::{Notifier, Toast, ToastStatus};

pub fn logger_init(module_path: &str) {
    let level = if env::var(DEFAULT_FILTER_ENV).unwrap_or_default() == "debug" {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    pretty_env_logger::formatted_timed_builder()
        .filter_level(log::LevelFilter::Info)
        .filter_module(module_path, level)
        .filter_module("foodie_rs", level)
        .init();
}

/// Prints notifications to the terminal
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, toast: Toast) {
        match toast.status {
            ToastStatus::Success => println!("✔ {}: {}", toast.title, toast.description),
            ToastStatus::Error => eprintln!("✘ {}: {}", toast.title, toast.description),
        }
    }
}

/// One line per invalid field, labelled the way the form labels it
pub fn format_field_errors(errors: &FieldErrors) -> String {
    let mut msg = String::new();
    for field in FormField::ALL {
        for error in errors.for_field(field) {
            msg += &format!(" • {} ({}): {}\n", field.label(), field.form_key(), error);
        }
    }
    msg
}
