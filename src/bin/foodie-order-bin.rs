use std::{fs, path::PathBuf, sync::Arc};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::log_enabled;

use foodie_rs::data_backend::{ClientConfig, DishClient, DishMutation};
use foodie_rs::data_types::form_data_types::DishFormInput;
use foodie_rs::data_types::{DishType, FormField};
use foodie_rs::order_form::{relevant_fields, OrderForm, SubmitOutcome};
use foodie_rs::shared_main::{format_field_errors, logger_init, TerminalNotifier};

/// Order dishes from the Foodie kitchen backend.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Base URL of the dish backend, requests go to <BASE_URL>/dishes{n}Empty: relative to --origin
    #[arg(long, env = "BASE_URL", default_value = "")]
    base_url: String,
    /// Origin used when no base URL is set
    #[arg(long, env = "FOODIE_ORIGIN", default_value = foodie_rs::constants::DEFAULT_ORIGIN)]
    origin: String,
    /// Enable verbose logging{n}[SETS env: RUST_LOG=debug]
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a dish and post it to the backend
    Submit(SubmitArgs),
    /// List the form fields for a dish type
    Fields {
        #[arg(long = "type", value_parser = parse_dish_type)]
        dish_type: Option<DishType>,
    },
}

#[derive(Args, Debug)]
struct SubmitArgs {
    /// Read the form from a JSON file (camelCase keys, as the web form sends them)
    #[arg(long, conflicts_with_all = [
        "name",
        "preparation_time",
        "dish_type",
        "no_of_slices",
        "diameter",
        "spiciness_scale",
        "slices_of_bread",
    ])]
    form: Option<PathBuf>,
    #[arg(long)]
    name: Option<String>,
    /// Time of day, e.g. 00:20:00
    #[arg(long)]
    preparation_time: Option<String>,
    /// soup, pizza or sandwich
    #[arg(long = "type")]
    dish_type: Option<String>,
    #[arg(long)]
    no_of_slices: Option<String>,
    #[arg(long)]
    diameter: Option<String>,
    #[arg(long)]
    spiciness_scale: Option<String>,
    #[arg(long)]
    slices_of_bread: Option<String>,
}

impl SubmitArgs {
    fn into_form(self) -> Result<DishFormInput> {
        if let Some(path) = self.form {
            let txt = fs::read_to_string(&path)
                .with_context(|| format!("reading form file {}", path.display()))?;
            return serde_json::from_str(&txt)
                .with_context(|| format!("parsing form file {}", path.display()));
        }

        let mut form = DishFormInput::default();
        let fields = [
            (FormField::Name, self.name),
            (FormField::PreparationTime, self.preparation_time),
            (FormField::Type, self.dish_type),
            (FormField::NoOfSlices, self.no_of_slices),
            (FormField::Diameter, self.diameter),
            (FormField::SpicinessScale, self.spiciness_scale),
            (FormField::SlicesOfBread, self.slices_of_bread),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                form.set(field, value);
            }
        }
        Ok(form)
    }
}

fn parse_dish_type(s: &str) -> Result<DishType, String> {
    s.parse::<DishType>().map_err(|e| e.to_string())
}


#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        std::env::set_var("RUST_LOG", "debug");
    }

    logger_init(module_path!());

    if !(log_enabled!(log::Level::Debug) || log_enabled!(log::Level::Trace)) {
        log::info!("Enable verbose logging for request timings");
    }

    match cli.command {
        Command::Fields { dish_type } => {
            for field in relevant_fields(dish_type) {
                println!(
                    "{:<16} {:<18} {}",
                    field.form_key(),
                    field.label(),
                    field.helper_text()
                );
            }
            if dish_type.is_none() {
                let types: Vec<&str> = DishType::ALL.iter().map(DishType::as_str).collect();
                println!("\nFood types: {}", types.join(", "));
            }
        }
        Command::Submit(args) => {
            let config = ClientConfig {
                base_url: cli.base_url,
                origin: cli.origin,
            };
            let client = DishClient::new(&config)?;
            log::info!("Posting dishes to {}", client.endpoint());

            let mutation = Arc::new(DishMutation::new(client));
            let form = OrderForm::new(mutation, TerminalNotifier);
            form.fill(args.into_form()?);

            match form.submit().await {
                SubmitOutcome::Submitted(body) => {
                    if !body.is_null() {
                        println!("{}", serde_json::to_string_pretty(&body)?);
                    }
                }
                SubmitOutcome::Rejected(errors) => {
                    eprint!("Invalid dish:\n{}", format_field_errors(&errors));
                    std::process::exit(2);
                }
                SubmitOutcome::Failed(_) => std::process::exit(1),
                SubmitOutcome::Busy => bail!("order form is still busy with another submission"),
            }
        }
    }

    Ok(())
}
