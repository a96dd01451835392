//! Questions command - list the calculator sliders

use crate::output::{format_count, print_json, OutputFormat, Status};
use anyhow::Result;
use bankkaro_api_client::{CalculatorCategory, SpendingQuestion};
use owo_colors::OwoColorize;

/// Run questions command; needs no network
pub fn run(category: CalculatorCategory, format: OutputFormat) -> Result<()> {
    let questions: Vec<&SpendingQuestion> = category.questions().collect();

    if format == OutputFormat::Json {
        return print_json(&questions);
    }

    Status::header(&format!("Calculator questions: {category}"));
    println!(
        "  {:<38} {:<12} {:>10} {:>14}",
        "Key".dimmed(),
        "Step".dimmed(),
        "Default".dimmed(),
        "Range".dimmed()
    );
    println!("  {}", "─".repeat(78).dimmed());

    for q in &questions {
        println!(
            "  {:<38} {:<12} {:>10} {:>14}",
            q.key.bold(),
            q.step,
            q.default_value,
            format!("{}–{}", q.min, q.max)
        );
        println!("    {}", q.label.dimmed());
    }

    println!();
    Status::success(&format_count(questions.len(), "question", "questions"));
    Ok(())
}
