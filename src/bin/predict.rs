//! Command-line front-end for the progression predictor.
//!
//! Collects the ten measurements from flags (prompting on stdin for any that
//! are missing) and prints the predicted score with its interpretation, either
//! through a running server or with a locally loaded model.
//!
//! # Usage
//! ```sh
//! cargo run --bin predict -- remote --url http://127.0.0.1:8000 --age 59 --sex 2 ...
//! cargo run --bin predict -- offline --model-path models/diabetes_model.json
//! ```

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use diabetes_predictor::config::{ModelEnvConfig, ModelFormat};
use diabetes_predictor::domain::ml::{FEATURE_ORDER, Feature};
use diabetes_predictor::infrastructure::core::HttpClientFactory;
use diabetes_predictor::interfaces::client::{
    OfflineClient, PatientForm, RemoteClient, render_result,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{Level, error};
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about = "Predict diabetes progression", long_about = None)]
struct Cli {
    #[command(subcommand)]
    mode: Mode,

    #[command(flatten)]
    features: FeatureArgs,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Ask a running prediction server
    Remote {
        /// Base URL of the prediction server
        #[arg(long, env = "PREDICTOR_URL", default_value = "http://127.0.0.1:8000")]
        url: String,

        /// Retries for transient failures
        #[arg(long, default_value_t = 3)]
        retries: u32,
    },
    /// Load the model locally and predict in-process
    Offline {
        /// Path to the estimator artifact
        #[arg(long, env = "MODEL_PATH", default_value = "models/diabetes_model.json")]
        model_path: PathBuf,

        /// linear, random_forest or onnx (default: from extension)
        #[arg(long)]
        model_format: Option<String>,
    },
}

/// Raw entries; parsed together so every invalid field is reported at once
#[derive(Args, Debug, Default)]
struct FeatureArgs {
    #[arg(long, global = true, allow_hyphen_values = true)]
    age: Option<String>,
    #[arg(long, global = true, allow_hyphen_values = true)]
    sex: Option<String>,
    #[arg(long, global = true, allow_hyphen_values = true)]
    bmi: Option<String>,
    /// Blood pressure
    #[arg(long, global = true, allow_hyphen_values = true)]
    bp: Option<String>,
    #[arg(long, global = true, allow_hyphen_values = true)]
    s1: Option<String>,
    #[arg(long, global = true, allow_hyphen_values = true)]
    s2: Option<String>,
    #[arg(long, global = true, allow_hyphen_values = true)]
    s3: Option<String>,
    #[arg(long, global = true, allow_hyphen_values = true)]
    s4: Option<String>,
    #[arg(long, global = true, allow_hyphen_values = true)]
    s5: Option<String>,
    #[arg(long, global = true, allow_hyphen_values = true)]
    s6: Option<String>,
}

impl FeatureArgs {
    fn entry(&self, feature: Feature) -> Option<&String> {
        match feature {
            Feature::Age => self.age.as_ref(),
            Feature::Sex => self.sex.as_ref(),
            Feature::Bmi => self.bmi.as_ref(),
            Feature::BloodPressure => self.bp.as_ref(),
            Feature::S1 => self.s1.as_ref(),
            Feature::S2 => self.s2.as_ref(),
            Feature::S3 => self.s3.as_ref(),
            Feature::S4 => self.s4.as_ref(),
            Feature::S5 => self.s5.as_ref(),
            Feature::S6 => self.s6.as_ref(),
        }
    }

    fn to_form(&self) -> PatientForm {
        let mut form = PatientForm::new();
        for feature in FEATURE_ORDER {
            if let Some(raw) = self.entry(feature) {
                form.set(feature, raw.clone());
            }
        }
        form
    }
}

/// Prompts for every entry the flags did not provide
fn prompt_missing(form: &mut PatientForm) -> Result<()> {
    let missing = form.missing();
    if missing.is_empty() {
        return Ok(());
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stdout = io::stdout();
    for feature in missing {
        write!(stdout, "Enter {} (numeric): ", feature.label().to_lowercase())?;
        stdout.flush()?;
        let line = lines.next().transpose()?.unwrap_or_default();
        form.set(feature, line);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::WARN.into()))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    let mut form = cli.features.to_form();
    prompt_missing(&mut form)?;

    let outcome = match form.parse() {
        Ok(record) => match cli.mode {
            Mode::Remote { url, retries } => {
                let client = RemoteClient::with_client(
                    url,
                    HttpClientFactory::create_client_with_retries(retries),
                );
                client.predict(&record).await
            }
            Mode::Offline {
                model_path,
                model_format,
            } => {
                let mut config = ModelEnvConfig::for_path(model_path);
                if let Some(raw) = model_format {
                    config.format = ModelFormat::from_str(&raw)?;
                }
                OfflineClient::load(&config).and_then(|client| client.predict(&record))
            }
        },
        Err(e) => Err(e),
    };

    match outcome {
        Ok(result) => {
            println!("{}", render_result(&result));
            Ok(())
        }
        Err(e) => {
            error!("Prediction failed: {}", e);
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
