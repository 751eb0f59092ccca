use clap::{Arg, Command};
use std::sync::Arc;
use std::time::Duration;
use terminex::{
    BatchRunner, CsvTermLoader, GoogleWebEngine, MockEngine, MockMode, TranslationEngine,
    Translator,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("terminex")
        .version("0.1.0")
        .about("Terminology-controlled machine translation CLI")
        .arg(
            Arg::new("target")
                .help("Target language code (e.g., twi, fr, de)")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("text")
                .help("Text to translate (omit when using --batch-file)")
                .index(2),
        )
        .arg(
            Arg::new("source")
                .long("source")
                .short('s')
                .help("Source language code, or 'auto' (default: en)")
                .default_value("en"),
        )
        .arg(
            Arg::new("domain")
                .long("domain")
                .short('d')
                .help("Terminology domain to enforce (e.g., agric, science)"),
        )
        .arg(
            Arg::new("terminology")
                .long("terminology")
                .short('t')
                .help("Terminology CSV file; scope inferred from the filename")
                .action(clap::ArgAction::Append),
        )
        .arg(
            Arg::new("pivot")
                .long("pivot")
                .help("Route every translation through this pivot language"),
        )
        .arg(
            Arg::new("batch-file")
                .long("batch-file")
                .short('b')
                .help("File with one input text per line, translated as a batch"),
        )
        .arg(
            Arg::new("pacing-ms")
                .long("pacing-ms")
                .help("Delay between batch calls in milliseconds (default: 500)")
                .default_value("500"),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .help("Per-call timeout in seconds (default: 30)")
                .default_value("30"),
        )
        .arg(
            Arg::new("mock")
                .long("mock")
                .short('m')
                .help("Use the mock engine instead of the real endpoint")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Show the intermediate pipeline stages")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let target = matches.get_one::<String>("target").unwrap();
    let source = matches.get_one::<String>("source").unwrap();
    let domain = matches.get_one::<String>("domain").map(|s| s.as_str());
    let verbose = matches.get_flag("verbose");
    let timeout_secs: u64 = matches.get_one::<String>("timeout").unwrap().parse()?;
    let pacing_ms: u64 = matches.get_one::<String>("pacing-ms").unwrap().parse()?;

    let engine: Arc<dyn TranslationEngine> = if matches.get_flag("mock") {
        Arc::new(MockEngine::new(MockMode::Identity))
    } else {
        Arc::new(GoogleWebEngine::new()?)
    };

    let mut builder = Translator::builder()
        .engine(engine)
        .timeout(Duration::from_secs(timeout_secs));

    if let Some(paths) = matches.get_many::<String>("terminology") {
        for path in paths {
            let loader = CsvTermLoader::from_filename(path)?;
            builder = builder.load_store(&loader)?;
        }
    }
    if let Some(pivot) = matches.get_one::<String>("pivot") {
        builder = builder.pivot(pivot);
    }

    let translator = builder.build()?;

    if verbose {
        eprintln!("{} → {} (domain: {})", source, target, domain.unwrap_or("-"));
        for (d, l) in translator.available_pairs() {
            eprintln!("terminology loaded: ({}, {})", d.unwrap_or("-"), l);
        }
    }

    if let Some(batch_path) = matches.get_one::<String>("batch-file") {
        let content = std::fs::read_to_string(batch_path)?;
        let texts: Vec<String> = content
            .lines()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .map(|l| l.to_string())
            .collect();

        if verbose {
            eprintln!("batch of {} inputs", texts.len());
        }

        let items = BatchRunner::with_pacing(Duration::from_millis(pacing_ms))
            .run(&translator, &texts, target, source, domain)
            .await;
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    let text = matches
        .get_one::<String>("text")
        .ok_or("Provide a text to translate, or --batch-file")?;

    let result = translator.translate(text, target, source, domain).await?;

    if verbose {
        eprintln!("preprocessed: {}", result.preprocessed_text);
        eprintln!("engine output: {}", result.raw_engine_output);
        if let Some(intermediate) = &result.pivot_intermediate_text {
            eprintln!("pivot intermediate: {}", intermediate);
        }
        for warning in &result.warnings {
            eprintln!("warning: {}", warning);
        }
    }

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
