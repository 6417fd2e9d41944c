//! Command-line front end for the estimator.
//!
//! Runs the same yield model and soil scorer as the HTTP service, without a
//! server or any history.
//!
//! # Usage
//!
//! ```bash
//! # Estimate yield for a field
//! cargo run --bin advisor -- predict --crop maize --area 2 --soil loamy --rain 520 --temp 26 --irrigation 5
//!
//! # Reproducible estimate with the varietal table
//! cargo run --bin advisor -- predict --crop rice --area 1 --rain 900 --temp 28 --preset varietal --seed 7
//!
//! # Score a soil sample
//! cargo run --bin advisor -- soil --n 40 --p 18 --k 120 --ph 6.3 --om 1.0
//!
//! # Fertilizer rules only
//! cargo run --bin advisor -- recommend --n 12 --p 10 --k 90 --ph 5.2
//! ```
//!
//! # Environment Variables
//!
//! Read through [`Config`], as for the server:
//!
//! - `YIELD_PRESET` / `SOIL_PRESET`: default tables when `--preset` is omitted
//! - `JITTER_SEED`: default seed when `--seed` is omitted

use yield_advisor::config::Config;
use yield_advisor::domain::entities::{
    Confidence, SoilSample, SoilType, YieldEstimate, YieldInputs,
};
use yield_advisor::domain::estimator::estimate;
use yield_advisor::domain::jitter::SeededJitter;
use yield_advisor::domain::presets::{SoilPreset, YieldPreset, round_half_up};
use yield_advisor::domain::soil_scorer;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::*;

/// CLI tool for yield estimates and soil advisories.
#[derive(Parser)]
#[command(name = "advisor")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Estimate yield for a field
    Predict(PredictArgs),

    /// Score a soil sample and list advisories
    Soil {
        #[command(flatten)]
        sample: SampleArgs,

        /// Scoring table (nutrient_balance, ph_band)
        #[arg(long)]
        preset: Option<SoilPreset>,
    },

    /// Show the fertilizer rules that fire for a soil sample
    Recommend {
        #[command(flatten)]
        sample: SampleArgs,
    },
}

#[derive(Args)]
struct PredictArgs {
    /// Crop name (e.g., maize, wheat, rice)
    #[arg(short, long, default_value = "")]
    crop: String,

    /// Field area in hectares
    #[arg(short, long)]
    area: f64,

    /// Soil category (loamy, sandy, clay)
    #[arg(short, long, default_value = "")]
    soil: String,

    /// Seasonal rainfall in mm
    #[arg(long, default_value_t = 0.0)]
    rain: f64,

    /// Mean temperature in °C
    #[arg(long, default_value_t = 0.0)]
    temp: f64,

    /// Irrigation level, 0-10
    #[arg(short, long, default_value_t = 0)]
    irrigation: u32,

    /// Soil pH
    #[arg(long)]
    ph: Option<f64>,

    /// Organic carbon in %
    #[arg(long)]
    organic_carbon: Option<f64>,

    /// Previous season yield in kg/ha
    #[arg(long)]
    prior_yield: Option<f64>,

    /// Yield table (baseline, varietal)
    #[arg(long)]
    preset: Option<YieldPreset>,

    /// Jitter seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Print every factor of the estimate
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Args)]
struct SampleArgs {
    /// Nitrogen (mg/kg)
    #[arg(long)]
    n: f64,

    /// Phosphorus (mg/kg)
    #[arg(long)]
    p: f64,

    /// Potassium (mg/kg)
    #[arg(long)]
    k: f64,

    /// Soil pH
    #[arg(long)]
    ph: f64,

    /// Organic matter in %, 0 when omitted (as over HTTP)
    #[arg(long, default_value_t = 0.0)]
    om: f64,
}

impl SampleArgs {
    fn to_sample(&self) -> SoilSample {
        SoilSample::new(self.n, self.p, self.k, self.ph, self.om)
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Commands::Predict(args) => handle_predict(args, &config)?,
        Commands::Soil { sample, preset } => {
            handle_soil(&sample, preset.unwrap_or(config.soil_preset))?
        }
        Commands::Recommend { sample } => handle_recommend(&sample),
    }

    Ok(())
}

/// Command-line values win over `YIELD_PRESET` and `JITTER_SEED`.
fn resolve_yield_settings(args: &PredictArgs, config: &Config) -> (YieldPreset, Option<u64>) {
    (
        args.preset.unwrap_or(config.yield_preset),
        args.seed.or(config.jitter_seed),
    )
}

/// Runs the yield estimator and prints the result.
fn handle_predict(args: PredictArgs, config: &Config) -> Result<()> {
    let (preset, seed) = resolve_yield_settings(&args, config);

    let inputs = YieldInputs::new(
        args.crop.as_str(),
        args.area,
        SoilType::from_label(&args.soil),
        args.rain,
        args.temp,
        args.irrigation,
    )
    .with_soil_ph(args.ph)
    .with_organic_carbon(args.organic_carbon)
    .with_prior_yield(args.prior_yield);

    let mut jitter = match seed {
        Some(seed) => SeededJitter::from_seed(seed),
        None => SeededJitter::from_entropy(),
    };

    let result = estimate(&inputs, &preset.constants(), &mut jitter)?;

    println!("{}", "🌾 Yield Estimate".bold().cyan());
    println!();
    println!(
        "  Crop:        {}",
        if inputs.crop.trim().is_empty() {
            "(default)".dimmed().to_string()
        } else {
            inputs.crop.clone()
        }
    );
    println!("  Preset:      {}", preset.to_string().yellow());
    println!(
        "  Per hectare: {} kg/ha",
        round_half_up(result.yield_per_hectare).to_string().green().bold()
    );
    println!(
        "  Total:       {} kg",
        round_half_up(result.total_yield).to_string().green().bold()
    );
    println!("  Confidence:  {}", confidence_label(&result));

    if args.verbose {
        print_factors(&result);
    }

    println!();
    println!("{}", "Recommendations:".bold());
    for text in &result.recommendations {
        println!("  • {}", text);
    }

    Ok(())
}

fn confidence_label(result: &YieldEstimate) -> ColoredString {
    let label = result.confidence.as_str();
    match result.confidence {
        Confidence::Good => label.green(),
        Confidence::Moderate => label.yellow(),
    }
}

fn print_factors(result: &YieldEstimate) {
    let f = &result.factors;
    println!();
    println!("{}", "Factors:".bold());
    println!("  {:<15} {:>10.1}", "base yield", f.base_yield);
    println!("  {:<15} {:>10.4}", "soil", f.soil);
    println!("  {:<15} {:>10.4}", "rainfall", f.rainfall);
    println!("  {:<15} {:>10.4}", "temperature", f.temperature);
    println!("  {:<15} {:>10.4}", "irrigation", f.irrigation);
    match f.fertility {
        Some(v) => println!("  {:<15} {:>10.4}", "fertility", v),
        None => println!("  {:<15} {:>10}", "fertility", "-".dimmed()),
    }
    println!("  {:<15} {:>10.4}", "variety", f.variety);
    println!("  {:<15} {:>10.4}", "weather jitter", f.weather_jitter);
    println!("  {:<15} {:>10.4}", "small area", f.small_area);
}

/// Scores a soil sample and prints the advisories.
fn handle_soil(args: &SampleArgs, preset: SoilPreset) -> Result<()> {
    let result = soil_scorer::score(&args.to_sample(), &preset.constants())?;

    let score = result.score.to_string();
    let score = match result.score {
        70.. => score.green(),
        40..=69 => score.yellow(),
        _ => score.red(),
    };

    println!("{}", "🧪 Soil Analysis".bold().cyan());
    println!();
    println!("  Preset: {}", preset.to_string().yellow());
    println!("  Score:  {} / 100", score.bold());
    println!();
    println!("{}", "Advisory:".bold());
    for text in result.advisory_texts() {
        println!("  • {}", text);
    }

    Ok(())
}

/// Prints the fertilizer rule table for a soil sample.
fn handle_recommend(args: &SampleArgs) {
    println!("{}", "🧾 Fertilizer Recommendations".bold().cyan());
    println!();

    for advisory in soil_scorer::recommend(&args.to_sample()) {
        println!(
            "  {:<20} {}",
            advisory.rule.as_str().bright_white().bold(),
            advisory.text
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            listen_addr: "0.0.0.0:3000".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            yield_preset: YieldPreset::Varietal,
            soil_preset: SoilPreset::PhBand,
            jitter_seed: Some(42),
            recent_capacity: 5,
            rate_limit_per_second: 2,
            rate_limit_burst: 100,
        }
    }

    fn predict_args(extra: &[&str]) -> PredictArgs {
        let mut argv = vec!["advisor", "predict", "--area", "2"];
        argv.extend_from_slice(extra);
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Predict(args) => args,
            _ => panic!("expected predict"),
        }
    }

    #[test]
    fn test_yield_settings_fall_back_to_config() {
        let (preset, seed) = resolve_yield_settings(&predict_args(&[]), &config());

        assert_eq!(preset, YieldPreset::Varietal);
        assert_eq!(seed, Some(42));
    }

    #[test]
    fn test_yield_settings_flags_win() {
        let args = predict_args(&["--preset", "baseline", "--seed", "7"]);

        let (preset, seed) = resolve_yield_settings(&args, &config());

        assert_eq!(preset, YieldPreset::Baseline);
        assert_eq!(seed, Some(7));
    }

    #[test]
    fn test_soil_readings_are_required() {
        assert!(Cli::try_parse_from(["advisor", "soil", "--n", "40", "--p", "18"]).is_err());
        assert!(
            Cli::try_parse_from(["advisor", "recommend", "--n", "40", "--p", "18", "--k", "120"])
                .is_err()
        );

        let cli = Cli::try_parse_from([
            "advisor", "soil", "--n", "40", "--p", "18", "--k", "120", "--ph", "6.3",
        ])
        .unwrap();
        match cli.command {
            Commands::Soil { sample, preset } => {
                assert_eq!(sample.om, 0.0);
                assert_eq!(preset, None);
            }
            _ => panic!("expected soil"),
        }
    }
}
