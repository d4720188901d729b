//! Interactive budget creation.

use chrono::Utc;
use finwise_client::ApiClient;
use finwise_core::budget::{AddAllocation, CategoryType, PeriodType};
use finwise_core::wizard::{BudgetWizard, CategoryOption, Effect, Navigate};
use finwise_shared::types::Money;
use tokio::io::AsyncBufRead;
use tracing::debug;

use crate::prompt::{
    CommandError, HELP, LoopCommand, Prompt, parse_category_type, parse_date, parse_period,
};
use crate::render;

/// Runs the wizard until the user submits, cancels, or the session ends.
pub async fn create_budget<R>(
    client: &ApiClient,
    prompt: &mut Prompt<R>,
) -> anyhow::Result<Navigate>
where
    R: AsyncBufRead + Unpin,
{
    let mut wizard = BudgetWizard::new();

    println!("Create New Budget");
    println!("Step 1 of 2: Basic Info");
    if !read_basics(&mut wizard, prompt).await? {
        return Ok(wizard.cancel());
    }

    if wizard.next(client).await? == Navigate::Login {
        return Ok(Navigate::Login);
    }
    println!("\nStep 2 of 2: Categories");
    print!("{}", render::category_options(&wizard.category_options()?));
    println!("{HELP}");

    loop {
        let Some(line) = prompt.ask("budget> ").await? else {
            return Ok(wizard.cancel());
        };
        let command = match line.parse::<LoopCommand>() {
            Ok(command) => command,
            Err(CommandError::Empty) => continue,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };
        debug!(?command, "Wizard command");

        match command {
            LoopCommand::Add { category, amount } => {
                let selection = category.map(|c| pick(&wizard, &c));
                match wizard.add_allocation(selection.as_deref(), amount)? {
                    AddAllocation::Added(_) => {
                        print!("{}", render::totals(&wizard.summary()));
                    }
                    AddAllocation::Ignored => {
                        println!("Pick a category from the list first (type `list`).");
                    }
                }
            }
            LoopCommand::Remove(index) => match wizard.remove_allocation(index)? {
                Some(removed) => {
                    println!("Removed {}", removed.display_name);
                    print!("{}", render::totals(&wizard.summary()));
                }
                None => println!("There is no allocation #{}", index + 1),
            },
            LoopCommand::NewCategory => {
                let effect = new_category(&mut wizard, client, prompt).await?;
                if let Some(nav) = show(&effect) {
                    return Ok(nav);
                }
                print!("{}", render::category_options(&wizard.category_options()?));
            }
            LoopCommand::Categories => {
                print!("{}", render::category_options(&wizard.category_options()?));
            }
            LoopCommand::Summary => {
                print!(
                    "{}",
                    render::allocations(wizard.allocations(), &wizard.summary())
                );
            }
            LoopCommand::Submit => {
                println!("Creating budget...");
                let effect = wizard.submit(client).await?;
                if let Some(nav) = show(&effect) {
                    return Ok(nav);
                }
            }
            LoopCommand::Cancel => return Ok(wizard.cancel()),
            LoopCommand::Help => println!("{HELP}"),
        }
    }
}

/// Fills in the basics. Returns false if input ended early.
async fn read_basics<R>(wizard: &mut BudgetWizard, prompt: &mut Prompt<R>) -> anyhow::Result<bool>
where
    R: AsyncBufRead + Unpin,
{
    let Some(name) = prompt.ask("Budget name: ").await? else {
        return Ok(false);
    };
    let Some(period_type) = prompt
        .ask_parsed(
            "Budget period [monthly/weekly/yearly] (monthly): ",
            PeriodType::Monthly,
            parse_period,
        )
        .await?
    else {
        return Ok(false);
    };
    let Some(total_amount) = prompt
        .ask_parsed("Total amount (0.00): ", Money::ZERO, Money::parse_non_negative)
        .await?
    else {
        return Ok(false);
    };
    let today = Utc::now().date_naive();
    let Some(period_start) = prompt
        .ask_parsed(&format!("Start date ({today}): "), today, parse_date)
        .await?
    else {
        return Ok(false);
    };
    let Some(period_end) = prompt
        .ask_parsed("End date (optional): ", None, |s| parse_date(s).map(Some))
        .await?
    else {
        return Ok(false);
    };

    let draft = wizard.basics_mut()?;
    draft.name = name;
    draft.period_type = period_type;
    draft.total_amount = total_amount;
    draft.period_start = period_start;
    draft.period_end = period_end;
    Ok(true)
}

async fn new_category<R>(
    wizard: &mut BudgetWizard,
    client: &ApiClient,
    prompt: &mut Prompt<R>,
) -> anyhow::Result<Effect>
where
    R: AsyncBufRead + Unpin,
{
    wizard.open_new_category_form()?;
    let answers = match prompt.ask("Category name: ").await? {
        Some(name) => prompt
            .ask_parsed(
                "Category type [expense/income] (expense): ",
                CategoryType::Expense,
                parse_category_type,
            )
            .await?
            .map(|category_type| (name, category_type)),
        None => None,
    };
    let Some((name, category_type)) = answers else {
        wizard.close_new_category_form()?;
        return Ok(Effect::default());
    };

    let form = wizard.new_category_form_mut()?;
    form.name = name;
    form.category_type = category_type;
    Ok(wizard.create_category(client).await?)
}

/// Maps a picker number to its category; other input passes through.
fn pick(wizard: &BudgetWizard, selection: &str) -> String {
    let Ok(options) = wizard.category_options() else {
        return selection.to_string();
    };
    selection
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| options.get(i))
        .and_then(|option| match option {
            CategoryOption::Category(category) => Some(category.category_id.to_string()),
            CategoryOption::Placeholder => None,
        })
        .unwrap_or_else(|| selection.to_string())
}

/// Prints the alert. Returns where to go if the wizard is finished.
fn show(effect: &Effect) -> Option<Navigate> {
    if let Some(alert) = &effect.alert {
        println!("{}", render::alert(alert));
    }
    (effect.navigate != Navigate::Stay).then_some(effect.navigate)
}
