use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    config::{load_settings, normalize_base_url},
    Dashboard, DashboardApi, HttpGateway, PredictError, Tab,
};
use shared::protocol::Acceptance;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod render;

#[derive(Parser, Debug)]
#[command(about = "Daily routine productivity predictions from the command line")]
struct Args {
    /// Overrides dashboard.toml and API_BASE_URL.
    #[arg(long, global = true)]
    api_base_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show whether the prediction model is loaded.
    Status,
    /// Query the service health endpoint.
    Health,
    /// Show aggregate feedback statistics.
    Stats,
    /// Request a prediction for today's metrics.
    Predict {
        /// Metric override, e.g. `--set Sleep_Hours=6.5`; repeatable.
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        set: Vec<String>,
    },
    /// Predict, then submit feedback on the result.
    Feedback {
        #[arg(long)]
        accepted: Acceptance,
        #[arg(long)]
        final_score: f64,
        #[arg(long, default_value = "")]
        comment: String,
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        set: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    let args = Args::parse();

    let mut settings = load_settings().context("failed to load dashboard settings")?;
    if let Some(url) = &args.api_base_url {
        settings.api_base_url = normalize_base_url(url)?;
    }
    info!(api_base_url = %settings.api_base_url, "using prediction service");

    let api: Arc<dyn DashboardApi> = Arc::new(HttpGateway::new(settings.api_base_url));
    let dashboard = Dashboard::new(api);

    match args.command {
        Command::Status => {
            let _ = dashboard.check_model_status().await;
            let state = dashboard.snapshot();
            println!("{}", render::header(&state));
            if let Some(error) = &state.model_status.error {
                println!("Status check failed: {error}");
            }
        }
        Command::Health => {
            let body = dashboard.health().await.context("health check failed")?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        Command::Stats => {
            let _ = dashboard.refresh_stats().await;
            print!("{}", render::stats(&dashboard.snapshot()));
        }
        Command::Predict { set } => {
            dashboard.activate().await;
            apply_overrides(&dashboard, &set)?;
            run_prediction(&dashboard).await?;
        }
        Command::Feedback {
            accepted,
            final_score,
            comment,
            set,
        } => {
            dashboard.activate().await;
            apply_overrides(&dashboard, &set)?;
            run_prediction(&dashboard).await?;

            dashboard.select_tab(Tab::Feedback);
            dashboard.set_acceptance(Some(accepted));
            dashboard.set_final_score(final_score);
            dashboard.set_user_feedback(comment);
            dashboard
                .submit_feedback()
                .await
                .context("Failed to submit feedback")?;

            let state = dashboard.snapshot();
            if let Some(notice) = &state.feedback.notice {
                println!("\n{notice}\n");
            }
            print!("{}", render::stats(&state));
        }
    }

    Ok(())
}

fn apply_overrides(dashboard: &Dashboard, assignments: &[String]) -> Result<()> {
    for raw in assignments {
        let (field, value) = render::parse_assignment(raw)?;
        dashboard.update_field(field, value);
    }
    Ok(())
}

async fn run_prediction(dashboard: &Dashboard) -> Result<()> {
    let result = dashboard.predict().await;
    let state = dashboard.snapshot();
    println!("{}\n", render::header(&state));

    match result {
        Ok(_) => {
            dashboard.select_tab(Tab::Results);
            print!("{}", render::results(&state));
            Ok(())
        }
        Err(PredictError::Invalid(_)) => {
            print!("Input rejected:\n{}", render::validation_errors(&state));
            anyhow::bail!("input metrics failed validation")
        }
        Err(err) => Err(err).context("Prediction failed"),
    }
}
