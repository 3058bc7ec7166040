//! Subcommand handlers. Each one runs a single session or resource call and
//! prints the result as plain text.

use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use tracing::warn;
use wealthflow_core::models::{AccountCreate, TransactionFilter};
use wealthflow_core::{SessionStore, Transport};

use crate::config::Config;
use crate::format::{
    format_amount, format_date, format_money, format_optional, format_percent, truncate_string,
};
use crate::TransactionArgs;

fn prompt_line(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn prompt_password(label: &str) -> Result<String> {
    let password = rpassword::prompt_password(label)?;
    Ok(password)
}

/// Transport for commands that only make sense signed in.
fn signed_in(session: &SessionStore) -> Result<&Transport> {
    if !session.current().is_authenticated() {
        bail!("Not signed in. Run `wealthflow login` first.");
    }
    Ok(session.transport())
}

fn remember_email(config: &mut Config, email: &str) {
    config.last_email = Some(email.to_string());
    if let Err(e) = config.save() {
        warn!(error = %e, "Failed to save config");
    }
}

pub async fn login(
    session: &SessionStore,
    config: &mut Config,
    email: Option<String>,
) -> Result<()> {
    let email = match email.or_else(|| config.last_email.clone()) {
        Some(email) => email,
        None => prompt_line("Email: ")?,
    };
    if email.is_empty() {
        bail!("Email required");
    }
    let password = prompt_password(&format!("Password for {}: ", email))?;
    if password.is_empty() {
        bail!("Password required");
    }

    let user = session.login(&email, &password).await.context("Login failed")?;
    remember_email(config, &email);
    println!("Signed in as {}.", user.display_name());
    Ok(())
}

pub async fn register(
    session: &SessionStore,
    config: &mut Config,
    email: String,
    name: Option<String>,
) -> Result<()> {
    let password = prompt_password("Choose a password: ")?;
    if password.is_empty() {
        bail!("Password required");
    }
    if prompt_password("Repeat password: ")? != password {
        bail!("Passwords do not match");
    }

    let user = session
        .register(&email, &password, name.as_deref())
        .await
        .context("Registration failed")?;
    remember_email(config, &email);
    println!("Welcome, {}! You are signed in.", user.display_name());
    Ok(())
}

pub fn whoami(session: &SessionStore) -> Result<()> {
    match session.current().user() {
        Some(user) => {
            println!("{} <{}>", user.display_name(), user.email);
            if let Some(tier) = &user.subscription_tier {
                println!("Plan: {}", tier);
            }
        }
        None => println!("Not signed in."),
    }
    Ok(())
}

pub async fn accounts(session: &SessionStore) -> Result<()> {
    let accounts = signed_in(session)?.accounts().list().await?;
    if accounts.is_empty() {
        println!("No accounts yet. Add one with `wealthflow add-account`.");
        return Ok(());
    }
    println!("{:>5}  {:<28} {:<14} {:>18}", "ID", "NAME", "TYPE", "BALANCE");
    for a in &accounts {
        println!(
            "{:>5}  {:<28} {:<14} {:>18}",
            a.id,
            truncate_string(&a.account_name, 28),
            a.account_type,
            format_money(a.balance, &a.currency)
        );
    }
    Ok(())
}

pub async fn categories(session: &SessionStore) -> Result<()> {
    let categories = signed_in(session)?.categories().list().await?;
    println!("{:>5}  {:<3} {:<24} {:<10} {}", "ID", "", "NAME", "TYPE", "OWNER");
    for c in &categories {
        println!(
            "{:>5}  {:<3} {:<24} {:<10} {}",
            c.id,
            format_optional(&c.icon, ""),
            truncate_string(&c.name, 24),
            c.category_type,
            if c.is_system { "system" } else { "custom" }
        );
    }
    Ok(())
}

pub async fn transactions(session: &SessionStore, args: &TransactionArgs) -> Result<()> {
    let filter = TransactionFilter {
        skip: args.skip,
        limit: args.limit,
        start_date: args.from,
        end_date: args.to,
        account_id: args.account,
        category_id: args.category,
    };
    let txns = signed_in(session)?.transactions().list(&filter).await?;
    if txns.is_empty() {
        println!("No transactions match.");
        return Ok(());
    }
    println!("{:>6}  {:<12} {:<32} {:<8} {:>12}", "ID", "DATE", "DESCRIPTION", "TYPE", "AMOUNT");
    for t in &txns {
        let description = match &t.merchant {
            Some(m) if !m.is_empty() => format!("{} ({})", t.description, m),
            _ => t.description.clone(),
        };
        println!(
            "{:>6}  {:<12} {:<32} {:<8} {:>12}",
            t.id,
            format_date(&t.transaction_date),
            truncate_string(&description, 32),
            t.transaction_type,
            format_amount(t.amount)
        );
    }
    Ok(())
}

pub async fn budgets(session: &SessionStore) -> Result<()> {
    let budgets = signed_in(session)?.budgets().list().await?;
    if budgets.is_empty() {
        println!("No budgets.");
        return Ok(());
    }
    println!(
        "{:>5}  {:>8} {:<10} {:>12} {:>12} {:>12} {:>7}  {}",
        "ID", "CATEGORY", "PERIOD", "BUDGET", "SPENT", "LEFT", "USED", "STATUS"
    );
    for b in &budgets {
        println!(
            "{:>5}  {:>8} {:<10} {:>12} {:>12} {:>12} {:>7}  {}",
            b.budget.id,
            b.budget.category_id,
            b.budget.period,
            format_amount(b.budget.amount),
            format_amount(b.spent),
            format_amount(b.remaining),
            format_percent(b.percentage),
            b.status
        );
    }
    Ok(())
}

pub async fn goals(session: &SessionStore) -> Result<()> {
    let goals = signed_in(session)?.savings_goals().list().await?;
    if goals.is_empty() {
        println!("No savings goals.");
        return Ok(());
    }
    for g in &goals {
        let deadline = g.goal.deadline.as_deref().map(format_date);
        println!(
            "{} {}  {} / {} ({})  deadline: {}",
            format_optional(&g.goal.icon, "*"),
            g.goal.goal_name,
            format_amount(g.goal.current_amount),
            format_amount(g.goal.target_amount),
            format_percent(g.progress_percentage),
            format_optional(&deadline, "none")
        );
    }
    Ok(())
}

pub async fn investments(session: &SessionStore, summary: bool) -> Result<()> {
    let api = signed_in(session)?.investments();
    if summary {
        let s = api.summary().await?;
        println!("Invested:      {}", format_amount(s.total_invested));
        println!("Current value: {}", format_amount(s.current_value));
        println!(
            "Profit/loss:   {} ({})",
            format_amount(s.total_profit_loss),
            format_percent(s.roi_percentage)
        );
        let mut by_type: Vec<_> = s.investments_by_type.iter().collect();
        by_type.sort_by(|a, b| a.0.cmp(b.0));
        for (asset_type, totals) in by_type {
            println!(
                "  {:<14} {:>3} held  {:>14}",
                asset_type,
                totals.count,
                format_amount(totals.total_value)
            );
        }
        return Ok(());
    }

    let holdings = api.list().await?;
    if holdings.is_empty() {
        println!("No investments.");
        return Ok(());
    }
    println!(
        "{:>5}  {:<8} {:<12} {:>10} {:>14} {:>14} {:>8}",
        "ID", "SYMBOL", "TYPE", "QTY", "COST", "VALUE", "ROI"
    );
    for h in &holdings {
        println!(
            "{:>5}  {:<8} {:<12} {:>10} {:>14} {:>14} {:>8}",
            h.investment.id,
            h.investment.symbol,
            h.investment.asset_type,
            h.investment.quantity,
            format_amount(h.total_cost),
            format_amount(h.current_value),
            format_percent(h.roi_percentage)
        );
    }
    Ok(())
}

pub async fn dashboard(session: &SessionStore) -> Result<()> {
    let api = signed_in(session)?;
    let dashboard_api = api.dashboard();
    let insights_api = api.insights();
    let (summary, insights) =
        futures::try_join!(dashboard_api.summary(), insights_api.list())?;

    println!(
        "Balance {} across {} accounts, {} transactions",
        format_amount(summary.total_balance),
        summary.total_accounts,
        summary.total_transactions
    );
    println!(
        "Budgets {} spent of {} ({} left)",
        format_amount(summary.total_spent),
        format_amount(summary.total_budget),
        format_amount(summary.budget_remaining)
    );

    if !summary.expense_by_category.is_empty() {
        println!("\nSpending by category:");
        for e in &summary.expense_by_category {
            println!(
                "  {} {:<20} {:>12}",
                e.category_icon,
                e.category_name,
                format_amount(e.total)
            );
        }
    }
    if !summary.recent_transactions.is_empty() {
        println!("\nRecent:");
        for t in &summary.recent_transactions {
            println!(
                "  {:<12} {:<32} {:>12}",
                format_date(&t.transaction_date),
                truncate_string(&t.description, 32),
                format_amount(t.amount)
            );
        }
    }
    if !insights.is_empty() {
        println!();
        for i in &insights {
            println!("{} {}: {}", i.icon, i.title, i.message);
        }
    }
    Ok(())
}

pub async fn insights(session: &SessionStore) -> Result<()> {
    let insights = signed_in(session)?.insights().list().await?;
    if insights.is_empty() {
        println!("Nothing to report yet.");
    }
    for i in &insights {
        println!("[{}] {} {}\n    {}", i.kind, i.icon, i.title, i.message);
    }
    Ok(())
}

pub async fn add_account(
    session: &SessionStore,
    name: String,
    account_type: String,
    balance: Option<f64>,
    currency: Option<String>,
) -> Result<()> {
    let request = AccountCreate {
        account_name: name,
        account_type,
        balance,
        currency,
    };
    let account = signed_in(session)?.accounts().create(&request).await?;
    println!(
        "Created account {} \"{}\" with balance {}.",
        account.id,
        account.account_name,
        format_money(account.balance, &account.currency)
    );
    Ok(())
}
