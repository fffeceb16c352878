use chrono::Utc;
use dotenvy::dotenv;
use paybob::{
    config::{self, database, profile},
    core::{balance, category, group, seed, summary, user},
    errors::Result,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, non-fatal since env vars can be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the application configuration
    let app_config = config::load_app_configuration()
        .inspect_err(|e| error!("Failed to load application configuration: {e}"))?;

    // 4. Open the store and make sure the schema exists
    let db = database::create_connection(&database::get_database_url())
        .await
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    database::create_tables(&db)
        .await
        .inspect(|()| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {e}"))?;

    // 5. Profile user and first-run sample data
    let me = user::ensure_profile_user(&db, &profile::get_profile()).await?;
    seed::seed_sample_data(&db, &app_config.seed)
        .await
        .inspect_err(|e| error!("Failed to seed sample data: {e}"))?;

    // 6. Report the current state
    let balances = balance::get_all_balances(&db).await?;
    let groups = group::get_all_groups(&db).await?;
    let now = Utc::now();

    let totals = summary::derive_dashboard_totals(&balances);
    info!(
        user = %me.name,
        owed_to_me = %summary::format_amount(totals.total_owed_to_me),
        owed_by_me = %summary::format_amount(totals.total_owed_by_me),
        net = %summary::format_net(totals.net),
        "Dashboard"
    );

    for person in summary::people_view(summary::derive_person_summaries(&balances), "") {
        info!(
            name = %person.name,
            net = %summary::format_net(person.net_balance),
            active = person.active_balances,
            "Person"
        );
    }

    let stats = summary::profile_stats(&balances, &groups, now);
    info!(
        categories = ?category::derive_categories(&balances, &app_config.categories),
        active_groups = stats.active_groups,
        settled = stats.settled_balances,
        overdue = stats.overdue_balances,
        "Overview"
    );

    Ok(())
}
