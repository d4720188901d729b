//! Command definitions and handlers.

use clap::Subcommand;
use finwise_client::{ApiClient, BudgetFilter};
use finwise_core::budget::{CategoryQuery, PeriodType};
use finwise_core::wizard::{CategoryOption, Navigate};
use finwise_shared::types::{BudgetId, PageWindow};
use tokio::io::BufReader;

use crate::interactive;
use crate::prompt::{Prompt, parse_period};
use crate::render;

/// Top-level commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Budget commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// List your expense categories
    Categories,
}

/// Budget subcommands.
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Create a budget with the interactive wizard
    Create,

    /// List budgets, newest first
    List {
        /// Only budgets of this period type (monthly, weekly, yearly)
        #[arg(short = 't', long = "type", value_parser = parse_period)]
        budget_type: Option<PeriodType>,
        /// Number of budgets to show
        #[arg(short, long, default_value = "10")]
        limit: u32,
        /// Include inactive budgets
        #[arg(long)]
        all: bool,
    },

    /// Compare allocations with actual spending
    VsActual {
        /// Budget ID
        budget_id: BudgetId,
    },
}

/// Runs a command. Returns where the user should end up.
pub async fn run(command: Commands, client: &ApiClient) -> anyhow::Result<Navigate> {
    match command {
        Commands::Budget(BudgetCommands::Create) => {
            let mut prompt = Prompt::new(BufReader::new(tokio::io::stdin()));
            let nav = interactive::create_budget(client, &mut prompt).await?;
            if nav == Navigate::BudgetList {
                println!();
                list_budgets(client, &BudgetFilter::default()).await?;
            }
            Ok(nav)
        }
        Commands::Budget(BudgetCommands::List {
            budget_type,
            limit,
            all,
        }) => {
            let filter = BudgetFilter {
                budget_type,
                is_active: (!all).then_some(true),
                window: PageWindow::first(limit),
                ..BudgetFilter::default()
            };
            list_budgets(client, &filter).await?;
            Ok(Navigate::Stay)
        }
        Commands::Budget(BudgetCommands::VsActual { budget_id }) => {
            let rows = client.budget_vs_actual(budget_id).await?;
            print!("{}", render::vs_actual_table(&rows));
            Ok(Navigate::Stay)
        }
        Commands::Categories => {
            let categories = client
                .list_categories(&CategoryQuery::expense_picker())
                .await?;
            print!(
                "{}",
                render::category_options(&CategoryOption::list(&categories))
            );
            Ok(Navigate::Stay)
        }
    }
}

async fn list_budgets(client: &ApiClient, filter: &BudgetFilter) -> anyhow::Result<()> {
    let budgets = client.list_budgets(filter).await?;
    print!("{}", render::budget_table(&budgets));
    Ok(())
}
