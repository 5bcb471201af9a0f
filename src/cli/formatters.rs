//! Output formatting module for CLI display
//!
//! Keeps presentation separate from the calculation: everything here takes
//! a finished [`Calculation`] and renders it as a table or JSON.

use colored::Colorize;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Style},
    Table, Tabled,
};

use selic::calculator::Calculation;
use selic::export::SaveOutcome;
use selic::reports::SummaryRow;
use selic::utils::format_currency;
use selic::window::WindowResult;

/// Render a calculation as JSON
pub fn format_calculation_json(calc: &Calculation) -> String {
    #[derive(Serialize)]
    struct JsonWindow<'a> {
        #[serde(flatten)]
        window: &'a WindowResult,
        gain: Decimal,
    }

    #[derive(Serialize)]
    struct JsonCalculation<'a> {
        start_date: String,
        end_date: String,
        capital: Decimal,
        frequency: String,
        best_window: Option<JsonWindow<'a>>,
        rows: &'a [SummaryRow],
    }

    let capital = calc.request.capital;
    let report = JsonCalculation {
        start_date: calc.request.start_date.to_string(),
        end_date: calc.request.end_date.to_string(),
        capital,
        frequency: calc.request.frequency.to_string(),
        best_window: calc.window.as_ref().map(|w| JsonWindow {
            window: w,
            gain: w.gain(capital),
        }),
        rows: &calc.rows,
    };

    serde_json::to_string_pretty(&report)
        .unwrap_or_else(|e| format!(r#"{{"error": "JSON serialization failed: {}"}}"#, e))
}

/// Best-window sentence, or a note that the series was too short
pub fn format_best_window(window: Option<&WindowResult>, record_count: usize) -> String {
    match window {
        Some(w) => format!(
            "\nThe best day to invest is {}, with an amount earned of {} after {} days ({} to {})\n",
            w.start_date.to_string().bold(),
            w.earned_value.round_dp(2).to_string().green(),
            w.length,
            w.start_date,
            w.end_date
        ),
        None => format!(
            "\n{} Not enough data for a best-window search ({} records)\n",
            "ℹ".blue().bold(),
            record_count
        ),
    }
}

/// Render a calculation as a terminal table with a summary footer
pub fn format_calculation_table(calc: &Calculation) -> String {
    let mut output = String::new();

    output.push_str(&format_best_window(calc.window.as_ref(), calc.raw.len()));
    output.push_str(&format!(
        "\n{} Selic compounding - {} to {} ({})\n\n",
        "📈".cyan().bold(),
        calc.request.start_date,
        calc.request.end_date,
        calc.request.frequency
    ));

    #[derive(Tabled)]
    struct Row {
        #[tabled(rename = "Date")]
        date: String,
        #[tabled(rename = "Capital")]
        capital: String,
        #[tabled(rename = "Amount earned")]
        earned: String,
    }

    let rows: Vec<Row> = calc
        .rows
        .iter()
        .map(|r| Row {
            date: r.date.format("%d/%m/%Y").to_string(),
            capital: format_currency(r.capital),
            earned: colored_amount(r.amount_earned),
        })
        .collect();

    let mut table = Table::new(&rows);
    table.with(Style::modern());
    table.modify(Columns::new(1..), Alignment::right());
    output.push_str(&table.to_string());

    if let Some(last) = calc.rows.last() {
        output.push_str(&format!("\n\n{} Summary", "━".repeat(60).bright_black()));
        output.push_str(&format!(
            "\n{:<20} {}",
            "Initial capital:".bold(),
            format_currency(calc.request.capital)
        ));
        output.push_str(&format!(
            "\n{:<20} {}",
            "Final capital:".bold(),
            format_currency(last.capital)
        ));
        output.push_str(&format!(
            "\n{:<20} {}\n",
            "Amount earned:".bold(),
            colored_amount(last.amount_earned)
        ));
    }

    for outcome in &calc.saved {
        output.push_str(&format_save_outcome(outcome));
    }

    output
}

fn colored_amount(value: Decimal) -> String {
    if value >= Decimal::ZERO {
        format_currency(value).green().to_string()
    } else {
        format_currency(value).red().to_string()
    }
}

pub fn format_save_outcome(outcome: &SaveOutcome) -> String {
    match outcome {
        SaveOutcome::Written(path) => format!(
            "{} Path to csv output: {}\n",
            "✓".green().bold(),
            path.display()
        ),
        SaveOutcome::Skipped(path) => format!(
            "{} File already exists, ignoring: {}\n",
            "ℹ".blue().bold(),
            path.display()
        ),
    }
}
