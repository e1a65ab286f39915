//! Console tables for the menu and the run summary

use brigade_core::application::RunSummary;
use brigade_core::domain::{Menu, WorkItem};
use colored::Colorize;
use std::fmt::Write;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct MenuRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Dish")]
    name: String,
    #[tabled(rename = "Prep (min)")]
    prep: u32,
    #[tabled(rename = "Eat (min)")]
    eat: u32,
}

#[derive(Tabled)]
struct ServerRow {
    #[tabled(rename = "Server")]
    server: u32,
    #[tabled(rename = "Served")]
    processed: usize,
    #[tabled(rename = "Failed")]
    failed: usize,
}

#[derive(Tabled)]
struct OrderRow {
    #[tabled(rename = "Client")]
    client: u32,
    #[tabled(rename = "Item")]
    item: u32,
    #[tabled(rename = "Priority")]
    priority: i32,
    #[tabled(rename = "Ticket")]
    ticket: String,
}

pub fn menu_table(menu: &Menu) -> String {
    let rows = menu.items().iter().map(|item| MenuRow {
        id: item.id,
        name: item.name.clone(),
        prep: item.prep_minutes,
        eat: item.eat_minutes,
    });
    format!("{}\n{}", "Menu".bold(), Table::new(rows))
}

pub fn summary_tables(summary: &RunSummary) -> String {
    let mut out = String::new();

    let orders = summary.receipts.iter().map(|r| OrderRow {
        client: r.producer_id,
        item: r.item_id,
        priority: r.priority,
        ticket: r.ticket.clone(),
    });
    let _ = writeln!(out, "{}\n{}", "Orders placed".bold(), Table::new(orders));

    let servers = summary.consumers.iter().map(|c| ServerRow {
        server: c.consumer_id,
        processed: c.processed,
        failed: c.failed.len(),
    });
    let _ = writeln!(out, "{}\n{}", "Servers".bold(), Table::new(servers));

    for rejection in &summary.rejected {
        let _ = writeln!(
            out,
            "{} client {} (item {}): {}",
            "rejected".yellow(),
            rejection.producer_id,
            rejection.item_id,
            rejection.reason
        );
    }
    out.push_str(&abandoned_lines(&summary.abandoned));

    let _ = write!(
        out,
        "{} {} served, {} failed, {} rejected, {} abandoned, queue high-water mark {}",
        "Total:".bold(),
        summary.total_processed().to_string().green(),
        summary.total_failed(),
        summary.rejected.len(),
        summary.abandoned.len(),
        summary.stats.high_water_mark
    );
    out
}

/// One line per order dropped by an abort
pub fn abandoned_lines(items: &[WorkItem]) -> String {
    let mut out = String::new();
    for item in items {
        let _ = writeln!(
            out,
            "{} client {} (item {}, priority {}, ticket {})",
            "abandoned".red(),
            item.producer_id(),
            item.item_id(),
            item.priority(),
            item.ticket()
        );
    }
    out
}
