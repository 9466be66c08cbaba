//! `simulate` and `personas` command handlers.

use std::path::PathBuf;

use clap::Args;
use serde_json::json;

use redaccel_core::AppConfig;
use redaccel_feedback::{
    project_revenue, FeedbackSimulator, MrrEstimate, Persona, ProductContext, ScaledFeedback,
};

#[derive(Debug, Args)]
pub struct SimulateArgs {
    /// Product name
    #[arg(long)]
    pub name: String,

    /// One-paragraph product description
    #[arg(long)]
    pub description: String,

    /// Product feature (repeatable)
    #[arg(long = "feature", required = true)]
    pub features: Vec<String>,

    /// Pricing summary shown to personas
    #[arg(long)]
    pub pricing: Option<String>,

    /// Target audience shown to personas
    #[arg(long)]
    pub audience: Option<String>,

    /// Persona key to simulate (repeatable; default all)
    #[arg(long = "persona")]
    pub personas: Vec<Persona>,

    /// Observations per persona
    #[arg(long, default_value_t = 2)]
    pub per_persona: usize,

    /// Population to scale the sample to (default from config)
    #[arg(long)]
    pub target_population: Option<u64>,

    /// Addressable market size for revenue projection
    #[arg(long, default_value_t = 10_000)]
    pub market_size: u64,

    /// Pricing tiers YAML file (default from config)
    #[arg(long)]
    pub pricing_file: Option<PathBuf>,

    /// Use this base conversion rate (0-1) instead of one derived from intent
    #[arg(long)]
    pub conversion_rate: Option<f64>,

    /// Print JSON instead of a summary
    #[arg(long)]
    pub json: bool,
}

/// Simulate feedback, scale it and project revenue.
///
/// When every observation fails the feedback summary is still printed and
/// the revenue projection is skipped.
///
/// # Errors
///
/// Returns an error if the API key is missing, the pricing file cannot be
/// loaded, the product is invalid, or the projection inputs are invalid.
pub(crate) async fn run_simulate(config: &AppConfig, args: &SimulateArgs) -> anyhow::Result<()> {
    let pricing_path = args.pricing_file.as_ref().unwrap_or(&config.pricing_path);
    let tiers = redaccel_core::load_pricing_tiers(pricing_path)?;

    let product = ProductContext {
        name: args.name.clone(),
        description: args.description.clone(),
        features: args.features.clone(),
        pricing: args.pricing.clone(),
        target_audience: args.audience.clone(),
    };
    let target = args.target_population.unwrap_or(config.target_population);

    let simulator = FeedbackSimulator::from_config(config)?;
    let feedback = simulator
        .aggregate_and_scale(&product, &args.personas, args.per_persona, target)
        .await?;

    let estimate = if feedback.is_empty() {
        tracing::warn!("no feedback collected; skipping revenue projection");
        None
    } else {
        Some(project_revenue(
            &feedback,
            &tiers,
            args.market_size,
            args.conversion_rate,
        )?)
    };

    if args.json {
        let arr = estimate.as_ref().map(MrrEstimate::to_arr);
        let out = json!({
            "feedback": feedback,
            "mrr": estimate,
            "arr": arr,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print_feedback(&feedback);
        if let Some(estimate) = &estimate {
            print_estimate(estimate);
        }
    }
    Ok(())
}

fn print_feedback(feedback: &ScaledFeedback) {
    let agg = &feedback.feedback;
    if feedback.is_empty() {
        println!("no feedback collected");
        return;
    }

    println!(
        "{} simulated users from {} observations (x{:.1})",
        agg.total_observations, feedback.original_sample_size, feedback.scale_factor
    );
    println!("mean purchase intent: {:.1}", agg.mean_purchase_intent);
    println!(
        "sentiment: {:.1}% positive, {:.1}% neutral, {:.1}% negative",
        agg.sentiment_percentages.positive,
        agg.sentiment_percentages.neutral,
        agg.sentiment_percentages.negative
    );

    println!("\nby persona:");
    for (persona, stats) in &agg.cohorts {
        println!(
            "  {:<18} {:>6} users  intent {:>5.1}  +{} ={} -{}",
            persona.definition().name,
            stats.count,
            stats.mean_purchase_intent,
            stats.sentiment.positive,
            stats.sentiment.neutral,
            stats.sentiment.negative
        );
    }

    print_list("key insights", &agg.key_insights);
    print_list("recommendations", &agg.recommendations);
}

fn print_list(title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("\n{title}:");
    for item in items {
        println!("  - {item}");
    }
}

fn print_estimate(estimate: &MrrEstimate) {
    println!(
        "\nprojected MRR: ${:.2} from {:.0} conversions ({:.2}% of {})",
        estimate.total_mrr,
        estimate.total_conversions,
        estimate.conversion_rate_percent,
        estimate.target_market_size
    );
    for tier in &estimate.tiers {
        println!(
            "  {:<12} ${:>8.2} x {:>6.0} = ${:.2}",
            tier.tier, tier.price, tier.conversions, tier.mrr
        );
    }
    let growth = &estimate.growth;
    println!(
        "growth: month 1 ${:.2}, month 3 ${:.2}, month 6 ${:.2}, month 12 ${:.2}",
        growth.month_1, growth.month_3, growth.month_6, growth.month_12
    );
    println!("projected ARR: ${:.2}", estimate.to_arr().annual);
    println!(
        "confidence: {:.1}/100 (sample of {})",
        estimate.confidence_score, estimate.sample_size
    );
}

/// Print the fixed persona catalog.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub(crate) fn run_personas(json: bool) -> anyhow::Result<()> {
    let catalog: Vec<_> = Persona::ALL.iter().map(|p| p.definition()).collect();
    if json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }
    for def in catalog {
        println!(
            "{:<18} {}  (purchase probability {:.2}, price sensitivity {:?})",
            def.persona.key(),
            def.name,
            def.purchase_probability,
            def.price_sensitivity
        );
        println!("    {}", def.description);
        println!("    traits: {}", def.traits.join(", "));
    }
    Ok(())
}
