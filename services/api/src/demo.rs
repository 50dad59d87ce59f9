use crate::infra::{build_service, parse_option};
use clap::Args;
use snapchoice::config::AppConfig;
use snapchoice::error::AppError;
use snapchoice::telemetry;
use snapchoice::workflows::decision::scoring::format_score;
use snapchoice::workflows::decision::{
    Decision, DecisionService, HistoryEntry, KeyValueStore, OptionInput, RankedResult,
};

#[derive(Args, Debug)]
pub(crate) struct DecisionInputArgs {
    /// What the decision is about
    #[arg(long, default_value = "")]
    pub(crate) context: String,
    /// Option as NAME:URGENCY:IMPORTANCE:DIFFICULTY (repeat up to five times)
    #[arg(
        long = "option",
        value_parser = parse_option,
        required_unless_present = "token",
        conflicts_with = "token"
    )]
    pub(crate) options: Vec<OptionInput>,
    /// Load the inputs from a share token instead
    #[arg(long)]
    pub(crate) token: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct RestoreArgs {
    /// Share token (with or without the leading '#')
    #[arg(long)]
    pub(crate) token: String,
}

pub(crate) fn run_recommend(args: DecisionInputArgs) -> Result<(), AppError> {
    let config = load_config()?;
    let service = build_service(&config);
    let decision = decision_from_args(&service, args)?;

    let result = service.recommend(&decision)?;
    render_recommendation(&result);
    Ok(())
}

pub(crate) fn run_share(args: DecisionInputArgs) -> Result<(), AppError> {
    let config = load_config()?;
    let service = build_service(&config);
    let decision = decision_from_args(&service, args)?;

    let shared = service.share(&decision)?;
    println!("{}", shared.url);
    Ok(())
}

pub(crate) fn run_restore(args: RestoreArgs) -> Result<(), AppError> {
    let config = load_config()?;
    let service = build_service(&config);

    let restored = service.restore(Some(&args.token));
    if let Some(message) = restored.outcome.message() {
        println!("{message}");
    }
    render_decision(&restored.decision);
    Ok(())
}

pub(crate) fn run_history() -> Result<(), AppError> {
    let config = load_config()?;
    let service = build_service(&config);

    let entries = service.history()?;
    if entries.is_empty() {
        println!("No decisions recorded yet.");
        return Ok(());
    }

    println!("Recent decisions");
    for entry in &entries {
        println!("{}", history_line(entry));
    }
    Ok(())
}

pub(crate) fn run_demo() -> Result<(), AppError> {
    let config = load_config()?;
    let service = build_service(&config);

    println!("SnapChoice demo");
    let decision = service.example();
    println!("Example scenario loaded!");
    render_decision(&decision);

    let result = service.recommend(&decision)?;
    println!();
    render_recommendation(&result);

    match service.share(&decision) {
        Ok(shared) => println!("\nShare link: {}", shared.url),
        Err(err) => println!("\nShare link unavailable: {err}"),
    }
    Ok(())
}

fn load_config() -> Result<AppConfig, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    Ok(config)
}

fn decision_from_args<S: KeyValueStore>(
    service: &DecisionService<S>,
    args: DecisionInputArgs,
) -> Result<Decision, AppError> {
    let DecisionInputArgs {
        context,
        options,
        token,
    } = args;

    match token {
        Some(token) => Ok(service.load_shared(&token)?),
        None => Ok(Decision::new(context, options)),
    }
}

fn render_decision(decision: &Decision) {
    let context = if decision.context.trim().is_empty() {
        "(no context)"
    } else {
        decision.context.as_str()
    };
    println!("Decision: {context}");
    for (index, option) in decision.options.iter().enumerate() {
        let name = if option.name.trim().is_empty() {
            "(unnamed)"
        } else {
            option.name.as_str()
        };
        println!("  {}. {name}", index + 1);
    }
}

fn render_recommendation(result: &RankedResult) {
    for advisory in &result.advisories {
        println!("! {}", advisory.message());
    }

    if let Some(winner) = result.winner() {
        println!(
            "Recommendation: {} (Score: {} / 10)",
            winner.name,
            format_score(winner.score)
        );
    }
    println!("Confidence: {}%", result.confidence);
    println!("{}", result.reasoning);

    println!(
        "\n{:<4}{:<32}{:>9}{:>12}{:>12}{:>8}",
        "#", "Option", "Urgency", "Importance", "Difficulty", "Score"
    );
    for (index, option) in result.options.iter().enumerate() {
        println!(
            "{:<4}{:<32}{:>9}{:>12}{:>12}{:>8}",
            index + 1,
            truncate(&option.name, 30),
            option.urgency.value(),
            option.importance.value(),
            option.difficulty.value(),
            format_score(option.score)
        );
    }
}

fn history_line(entry: &HistoryEntry) -> String {
    format!(
        "  {}  {}  Winner: {} ({})",
        entry.timestamp.format("%Y-%m-%d"),
        entry.context,
        entry.winner,
        format_score(entry.score)
    )
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
