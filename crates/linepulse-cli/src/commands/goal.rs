use clap::Subcommand;
use linepulse_core::GoalConfig;

#[derive(Subcommand)]
pub enum GoalAction {
    /// Show configured monthly goals
    Get,
    /// Set monthly goals (omitted values are left unchanged)
    Set {
        /// Target lines added per month
        #[arg(long)]
        additions: Option<i64>,
        /// Target active hours per month
        #[arg(long)]
        hours: Option<i64>,
    },
    /// Clear both goals
    Clear,
}

pub fn run(action: GoalAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        GoalAction::Get => {
            let config = GoalConfig::load_or_default();
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        GoalAction::Set { additions, hours } => {
            let mut config = GoalConfig::load_or_default();
            if let Some(additions) = additions {
                config.monthly_additions = Some(additions);
            }
            if let Some(hours) = hours {
                config.monthly_hours = Some(hours);
            }
            config.save()?;
            println!("ok");
        }
        GoalAction::Clear => {
            let config = GoalConfig::default();
            config.save()?;
            println!("ok");
        }
    }
    Ok(())
}
