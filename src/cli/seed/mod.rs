//! Seed command - inserts the demo data set

use tracing::{info, warn};

use super::{bootstrap, SeedArgs};
use crate::config::LogFormat;

/// Insert `teamA`/`teamB` and `count` members into the configured store
pub async fn run(args: SeedArgs) -> anyhow::Result<()> {
    let config = bootstrap();

    if config.storage.backend.eq_ignore_ascii_case("memory") {
        warn!("Seeding the memory backend; data is dropped when this command exits");
    }

    let state = crate::create_app_state_with_config(&config).await?;
    let summary = state.member_service.seed_demo(args.count).await?;

    info!(
        teams = summary.teams,
        members = summary.members,
        "Seed complete"
    );

    if config.logging.format == LogFormat::Pretty {
        println!(
            "Created {} team(s) and {} member(s)",
            summary.teams, summary.members
        );
    }

    Ok(())
}
