use contract_bench::config::{DEFAULT_API_ENDPOINT, DEFAULT_RESOURCE_ID};
use contract_bench::core::pipeline::field_text;
use contract_bench::utils::{logger, validation::validate_range};
use contract_bench::{CliConfig, LocalStorage, Record, SearchEngine, SearchPipeline};
use std::collections::BTreeSet;
use std::io::{self, Write};

const DEFAULT_KEYWORD: &str = "interpretation";
const DEFAULT_MAX_RECORDS: usize = 200;
const MAX_CELL_WIDTH: usize = 28;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logger::init_cli_logger(false);

    println!("Contract Benchmarking");
    println!("=====================");

    loop {
        let prompt_text = format!("Keyword [{}] (q to quit): ", DEFAULT_KEYWORD);
        let Some(input) = prompt(&prompt_text)? else {
            break;
        };
        if input == "q" {
            break;
        }
        let keyword = if input.is_empty() {
            DEFAULT_KEYWORD.to_string()
        } else {
            input
        };

        let Some(max_records) = prompt_max_records()? else {
            break;
        };

        let config = CliConfig {
            keyword,
            max_records,
            output: None,
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            resource_id: DEFAULT_RESOURCE_ID.to_string(),
            verbose: false,
            monitor: false,
        };

        let storage = LocalStorage::new();
        let pipeline = SearchPipeline::new(storage, config);
        let engine = SearchEngine::new(pipeline);

        println!("Fetching data...");
        match engine.run().await {
            Ok(outcome) => match &outcome.report.summary {
                Some(summary) => {
                    println!("Fetched {} records", summary.frequency);
                    println!("Average contract value: {:.2}", summary.average_value);
                    println!("Top vendors:");
                    for (vendor, count) in &summary.top_vendors {
                        println!("  {}: {}", vendor, count);
                    }
                    println!();
                    render_table(&outcome.report.records);
                }
                None => println!("No records found"),
            },
            Err(e) => {
                eprintln!("❌ {}", e.user_friendly_message());
                eprintln!("💡 {}", e.recovery_suggestion());
            }
        }
        println!();
    }

    Ok(())
}

fn prompt(text: &str) -> io::Result<Option<String>> {
    print!("{}", text);
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(None); // EOF
    }
    Ok(Some(line.trim().to_string()))
}

fn prompt_max_records() -> io::Result<Option<usize>> {
    loop {
        let prompt_text = format!("Max records (100-1000) [{}]: ", DEFAULT_MAX_RECORDS);
        let Some(input) = prompt(&prompt_text)? else {
            return Ok(None);
        };
        if input.is_empty() {
            return Ok(Some(DEFAULT_MAX_RECORDS));
        }
        match input.parse::<usize>() {
            Ok(value) => match validate_range("max_records", value, 100, 1000) {
                Ok(()) => return Ok(Some(value)),
                Err(e) => println!("{}", e.user_friendly_message()),
            },
            Err(_) => println!("Please enter a number between 100 and 1000"),
        }
    }
}

/// Print the full record set as a fixed-width table, one column per field
/// name seen across the records.
fn render_table(records: &[Record]) {
    let mut columns: BTreeSet<&str> = BTreeSet::new();
    for record in records {
        for key in record.data.keys() {
            columns.insert(key);
        }
    }
    let columns: Vec<&str> = columns.into_iter().collect();
    if columns.is_empty() {
        return;
    }

    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|col| clip(field_text(record.data.get(*col))))
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = columns
        .iter()
        .map(|c| clip(c.to_string()).chars().count())
        .collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(col, width)| format!("{:<width$}", clip(col.to_string()), width = *width))
        .collect();
    println!("{}", header.join("  "));
    println!(
        "{}",
        widths
            .iter()
            .map(|width| "-".repeat(*width))
            .collect::<Vec<_>>()
            .join("  ")
    );
    for row in &rows {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect();
        println!("{}", line.join("  "));
    }
}

fn clip(text: String) -> String {
    if text.chars().count() > MAX_CELL_WIDTH {
        let clipped: String = text.chars().take(MAX_CELL_WIDTH - 2).collect();
        format!("{}..", clipped)
    } else {
        text
    }
}
