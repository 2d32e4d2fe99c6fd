use std::sync::Arc;

use tokio::io::BufReader;

use usecase_survey::cli::{self, ConsoleNavigator, ConsoleNotifier};
use usecase_survey::config::SurveyConfig;
use usecase_survey::survey::{
    HttpReportTransport, LocationState, NavigationContext, SurveyDeps, SurveySession,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = SurveyConfig::from_env().map_err(usecase_survey::error::Error::from)?;

    // Navigation state as handed over by registration, e.g.
    //   SURVEY_LOCATION_STATE='{"fromRegister":true,"email":"a@b.com","firstname":"Ada","firstAdmin":true}'
    let context = match std::env::var("SURVEY_LOCATION_STATE") {
        Ok(raw) => {
            let state: LocationState = serde_json::from_str(&raw).unwrap_or_else(|e| {
                eprintln!("Error: SURVEY_LOCATION_STATE is not valid JSON: {}", e);
                std::process::exit(1);
            });
            NavigationContext::new(state)
        }
        Err(_) => NavigationContext::empty(),
    };

    eprintln!("📝 Usecase survey v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Analytics: {}", config.analytics_url);
    eprintln!("   Timeout: {}s\n", config.report_timeout.as_secs());

    let transport = HttpReportTransport::new(&config).map_err(usecase_survey::error::Error::from)?;
    let navigator = Arc::new(ConsoleNavigator::new());
    let deps = SurveyDeps {
        transport: Arc::new(transport),
        navigator: navigator.clone(),
        notifier: Arc::new(ConsoleNotifier),
    };

    let mut session = SurveySession::mount(context, &config, deps);
    let submitted = cli::run(&mut session, BufReader::new(tokio::io::stdin())).await?;

    // The terminal has no next screen; give the report its timeout before
    // unmounting, which cancels whatever is still outstanding.
    if submitted {
        if let Some(report) = session.take_report() {
            let _ = tokio::time::timeout(config.report_timeout, report.join()).await;
        }
    }
    session.teardown();

    if let Some(location) = navigator.location() {
        tracing::info!(location = %location, "Survey closed");
    }

    Ok(())
}
