use clap::Parser;
use ip2temp::utils::error::{ErrorSeverity, HistogramError};
use ip2temp::utils::{logger, validation::Validate};
use ip2temp::{
    CliConfig, Diagnostics, GeoIpClient, HistogramEngine, HistogramPipeline, IpExtractor, Job,
    LocalStorage, OpenWeatherClient, TomlConfig,
};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = CliConfig::parse();

    if let Err(e) = logger::init_logger(cli.verbose, cli.json_logs) {
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("Starting ip2temp");
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(cli).await {
        tracing::error!(
            "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low | ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}

async fn run(cli: CliConfig) -> Result<(), HistogramError> {
    cli.validate()?;
    let settings: TomlConfig = cli.settings()?;
    settings.validate()?;

    let client = settings.http_client()?;
    let locator = GeoIpClient::new(client.clone(), settings.geoip.endpoint.clone());
    let forecaster = OpenWeatherClient::new(
        client,
        settings.forecast.endpoint.clone(),
        settings.forecast.api_key.clone(),
    )
    .with_days(settings.forecast.days);
    let extractor = IpExtractor::new(settings.extract.fallback_field)?;

    let job = Job {
        input_path: cli.infile,
        output_path: cli.outfile,
        buckets: cli.buckets,
    };
    let pipeline =
        HistogramPipeline::new(LocalStorage::default(), locator, forecaster, extractor, job);
    let engine = HistogramEngine::new(pipeline);

    let mut diagnostics = Diagnostics::new();
    let report = engine.run(&mut diagnostics).await?;

    println!("✅ Histogram written to {}", report.output_path);
    println!(
        "📊 {} buckets, {} temperatures from {} addresses",
        report.histogram.buckets.len(),
        report.histogram.total_count(),
        report.addresses
    );
    Ok(())
}
