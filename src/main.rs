use anyhow::Context;
use clap::Parser;
use credlens::app::pages::business;
use credlens::utils::error::ErrorCategory;
use credlens::utils::{logger, validation::Validate};
use credlens::{
    nav_entries, AppContext, CliConfig, Command, DashboardError, Document, HttpScoreService,
    NavigationOutcome, Page, Routable, Router,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => fail(&e),
    };

    let level = Some(config.logging.level.as_str());
    if config.logging.format == "json" {
        logger::init_json_logger(cli.verbose, level);
    } else {
        logger::init_cli_logger(cli.verbose, level);
    }

    tracing::info!("Starting credlens CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        fail(&e);
    }

    let service = match HttpScoreService::new(&config) {
        Ok(service) => service,
        Err(e) => {
            tracing::error!("❌ Score service client could not be built: {}", e);
            fail(&e)
        }
    };
    tracing::info!("Score service endpoint: {}", service.endpoint());

    let default_page = config.ui.default_page.clone();
    let ctx = AppContext::new(Document::new(nav_entries()), Arc::new(service), config);
    let router: Router<Page> = Router::new(ctx.clone());

    match cli.command {
        Command::Render { page, output } => {
            let hash = page.unwrap_or(default_page);
            if let NavigationOutcome::Failed { error, .. } = router.on_hash_change(&hash).await {
                tracing::error!("❌ Page failed to render: {}", error);
            }

            let html = ctx.doc().to_html()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, html)
                        .with_context(|| format!("failed to write {}", path))?;
                    println!("✅ Rendered '{}' to {}", hash, path);
                }
                None => print!("{}", html),
            }
        }
        Command::Analyze {
            revenue,
            transactions,
            payment_delay,
            activity_freq,
        } => {
            router.navigate(Page::Business.key()).await;
            {
                let mut doc = ctx.doc();
                doc.set_field(business::REVENUE, revenue);
                doc.set_field(business::TRANSACTIONS, transactions);
                doc.set_field(business::PAYMENT_DELAY, payment_delay);
                doc.set_field(business::ACTIVITY_FREQ, activity_freq);
            }

            if ctx.dispatch(business::FORM_ID, "submit").await == 0 {
                anyhow::bail!("analysis form is not wired");
            }

            let doc = ctx.doc();
            if let Some(alert) = doc.alerts().last() {
                eprintln!("❌ {}", alert);
                std::process::exit(exit_code(ErrorCategory::Network));
            }
            match doc.fragment(business::RESULT_ID) {
                Some(result) => {
                    tracing::info!("✅ Analysis completed successfully!");
                    println!("{}", result);
                }
                None => anyhow::bail!("analysis produced no result"),
            }
        }
    }

    Ok(())
}

fn exit_code(category: ErrorCategory) -> i32 {
    match category {
        ErrorCategory::Configuration => 2,
        ErrorCategory::Network => 3,
        ErrorCategory::Data | ErrorCategory::Page | ErrorCategory::System => 1,
    }
}

fn fail(e: &DashboardError) -> ! {
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(exit_code(e.category()));
}
