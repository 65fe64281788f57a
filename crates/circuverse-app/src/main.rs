use anyhow::Context;
use circuverse_client::{AnalysisClient, ApiConfig, StatsClient};
use circuverse_engine::{SequenceEngine, SequenceTiming, WasteAnalyzer};
use circuverse_media::{AudioService, MediaDirector, Narrator, NullBackend};
use circuverse_model::Phase;
use circuverse_scene::{CityVariant, SceneRegistry};
use circuverse_test_utils::StubAnalyzer;
use clap::{value_parser, Arg, ArgAction, Command};
use std::sync::Arc;

const DEMO_INPUT: &str =
    "City plastic waste problem - transform into sustainable urban infrastructure";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Command::new("circuverse")
        .version(circuverse_engine::VERSION)
        .about("Circular economy transformation engine")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("run")
                .about("Run one waste transformation sequence")
                .arg(
                    Arg::new("input")
                        .long("input")
                        .default_value(DEMO_INPUT)
                        .help("Waste scenario to analyze and transform"),
                )
                .arg(
                    Arg::new("offline")
                        .long("offline")
                        .action(ArgAction::SetTrue)
                        .help("Use the built-in keyword analyzer instead of the hosted model"),
                )
                .arg(
                    Arg::new("scan-delay-ms")
                        .long("scan-delay-ms")
                        .default_value("1500")
                        .value_parser(value_parser!(u64))
                        .help("Dwell before the AI scan phase, in milliseconds"),
                )
                .arg(
                    Arg::new("transform-delay-ms")
                        .long("transform-delay-ms")
                        .default_value("2000")
                        .value_parser(value_parser!(u64))
                        .help("Dwell on the transform phase, in milliseconds"),
                )
                .arg(
                    Arg::new("build-delay-ms")
                        .long("build-delay-ms")
                        .default_value("2000")
                        .value_parser(value_parser!(u64))
                        .help("Dwell on the build phase, in milliseconds"),
                )
                .arg(
                    Arg::new("city-variant")
                        .long("city-variant")
                        .default_value("classic")
                        .help("City scene variant: classic, enhanced or galaxy"),
                ),
        )
        .subcommand(
            Command::new("stats")
                .about("Fetch global aggregate statistics")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(
            Command::new("narrate")
                .about("Print the narration script for a phase")
                .arg(
                    Arg::new("phase")
                        .long("phase")
                        .default_value("0")
                        .value_parser(value_parser!(i64))
                        .help("Phase index 0-4 (out-of-range values are clamped)"),
                ),
        );

    match cli.get_matches().subcommand() {
        Some(("run", args)) => {
            let input = args.get_one::<String>("input").cloned().unwrap_or_default();
            let offline = args.get_flag("offline");
            let scan = *args.get_one::<u64>("scan-delay-ms").unwrap_or(&1500);
            let transform = *args.get_one::<u64>("transform-delay-ms").unwrap_or(&2000);
            let build = *args.get_one::<u64>("build-delay-ms").unwrap_or(&2000);
            let variant = args
                .get_one::<String>("city-variant")
                .map(|v| CityVariant::parse(v))
                .unwrap_or_default();

            run_sequence(
                &input,
                offline,
                SequenceTiming::from_millis(scan, transform, build),
                variant,
            )
            .await
        }
        Some(("stats", args)) => fetch_stats(args.get_flag("json")).await,
        Some(("narrate", args)) => {
            let index = *args.get_one::<i64>("phase").unwrap_or(&0);
            print_narration(Phase::from_index(index));
            Ok(())
        }
        _ => Ok(()),
    }
}

async fn run_sequence(
    input: &str,
    offline: bool,
    timing: SequenceTiming,
    variant: CityVariant,
) -> anyhow::Result<()> {
    tracing::info!(offline, "starting transformation run");
    let analyzer: Arc<dyn WasteAnalyzer> = if offline {
        Arc::new(StubAnalyzer::new())
    } else {
        Arc::new(AnalysisClient::from_env().context("building analysis client")?)
    };

    let engine = SequenceEngine::new(analyzer).with_timing(timing);

    let audio = Arc::new(AudioService::new(Arc::new(NullBackend)));
    audio.init();
    let mut director = MediaDirector::new(audio, Arc::new(Narrator::new()));
    director.attach(engine.controller().subscribe());

    let mut rx = engine.controller().subscribe();
    let printer = tokio::spawn(async move {
        let mut last = rx.borrow_and_update().phase;
        println!("[{}] {} - {}", last.index(), last.label(), last.description());
        while rx.changed().await.is_ok() {
            let phase = rx.borrow_and_update().phase;
            if phase != last {
                last = phase;
                println!("[{}] {} - {}", phase.index(), phase.label(), phase.description());
            }
        }
    });

    let report = engine.run(input).await.context("transformation run")?;
    printer.abort();
    director.detach();

    println!();
    if let Some(error) = &report.analysis_error {
        tracing::warn!(error = %error, "analysis degraded, sequence completed without data");
        println!("Analysis unavailable: {error}");
    }
    if let Some(analysis) = &report.analysis {
        println!("Analysis:");
        for line in analysis.summary_lines() {
            println!("  {line}");
        }
    }

    println!();
    println!("Scenes at {}:", Phase::Sustainable.label());
    let registry = SceneRegistry::with_defaults(variant);
    for (name, state) in registry.render_all(Phase::Sustainable, report.analysis.as_ref()) {
        println!(
            "  {name:<10} visible={} stage={:?} intensity={:.2}",
            state.visible, state.stage, state.intensity
        );
        for overlay in &state.overlays {
            println!("             overlay: {overlay}");
        }
        for detail in &state.detail {
            println!("             {detail}");
        }
    }

    println!();
    println!(
        "Sequence complete: {} phases in {:.1}s",
        report.phases.len(),
        report.elapsed.as_secs_f64()
    );
    Ok(())
}

async fn fetch_stats(json: bool) -> anyhow::Result<()> {
    let client = StatsClient::new(ApiConfig::from_env()).context("building stats client")?;
    let stats = client.fetch().await.context("fetching stats")?;
    tracing::info!(submissions = stats.total_submissions, "stats fetched");

    if json {
        println!("{}", serde_json::to_string_pretty(&stats).context("serializing stats")?);
        return Ok(());
    }

    println!("Global Statistics");
    println!("=================");
    println!("Total submissions: {}", stats.total_submissions);
    println!("CO2 saved:         {:.0} kg", stats.total_co2_saved);
    println!("Energy saved:      {:.0} kWh", stats.total_energy_saved);
    println!("Avg circularity:   {:.0}", stats.avg_circular_score);
    if !stats.top_waste_type.is_empty() {
        println!("Top waste type:    {}", stats.top_waste_type);
    }
    if !stats.waste_type_distribution.is_empty() {
        println!();
        println!("Waste type distribution:");
        for share in &stats.waste_type_distribution {
            println!("  {:<30} {:>5}  {:.1}%", share.name, share.count, share.percentage);
        }
    }
    Ok(())
}

fn print_narration(phase: Phase) {
    let narrator = Narrator::new();
    let step = narrator.script_for(phase);
    println!("[{}] {}", phase.index(), step.title);
    println!();
    println!("{}", step.text);
}
