//! Plain-text rendering of captured events

use std::collections::HashMap;

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use qelves_core::{EventStore, NetworkEvent, OperationType};

const ANONYMOUS: &str = "(anonymous)";

/// Print the store's visible events as a table, or as JSON
pub fn print_view(store: &EventStore, json: bool) -> Result<()> {
    if json {
        let events: Vec<&NetworkEvent> = store.filtered().collect();
        println!("{}", serde_json::to_string_pretty(&events)?);
        return Ok(());
    }

    let batches = batch_sizes(store.events());
    let positions: HashMap<&str, usize> = store
        .events()
        .iter()
        .enumerate()
        .map(|(index, event)| (event.id.as_str(), index + 1))
        .collect();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("#").fg(Color::Cyan),
        Cell::new("Type").fg(Color::Cyan),
        Cell::new("Operation").fg(Color::Cyan),
        Cell::new("Status").fg(Color::Cyan),
        Cell::new("Time").fg(Color::Cyan),
        Cell::new("Size").fg(Color::Cyan),
        Cell::new("Batch").fg(Color::Cyan),
    ]);

    let mut shown = 0;
    for event in store.filtered() {
        shown += 1;
        table.add_row(vec![
            Cell::new(positions.get(event.id.as_str()).copied().unwrap_or_default()),
            Cell::new(event.operation_type()).fg(type_color(event.operation_type())),
            Cell::new(display_name(event)),
            Cell::new(format_status(event.status)),
            Cell::new(format_duration(event.duration)),
            Cell::new(format_size(event.response_size)),
            Cell::new(batch_marker(event, &batches)),
        ]);
    }

    if shown == 0 {
        if store.is_empty() {
            println!("No GraphQL operations captured.");
        } else {
            println!("No operations match the current filter.");
        }
        return Ok(());
    }

    println!("{table}");
    Ok(())
}

/// Multi-line detail view of one event
pub fn print_details(position: usize, event: &NetworkEvent, batch_size: usize) -> Result<()> {
    println!(
        "#{position} {} ({})",
        display_name(event),
        event.operation_type()
    );
    println!("Request:  {} {}", event.method, event.url);
    println!("Id:       {}", event.id);
    println!("Status:   {}", format_status(event.status));
    println!("Time:     {}", format_duration(event.duration));
    println!("Size:     {}", format_size(event.response_size));
    if let Some(index) = event.batch_index {
        println!(
            "Batch:    {}/{} of request {}",
            index + 1,
            batch_size,
            event.request_id
        );
    }

    if let Some(query) = &event.graphql.query {
        println!("\nQuery:\n{query}");
    }
    if let Some(variables) = &event.graphql.variables {
        println!("\nVariables:\n{}", serde_json::to_string_pretty(variables)?);
    }
    if let Some(extensions) = &event.graphql.extensions {
        println!("\nExtensions:\n{}", serde_json::to_string_pretty(extensions)?);
    }

    println!("\nResponse:");
    match (&event.response_body_json, &event.response_body_raw) {
        (Some(json), _) => println!("{}", serde_json::to_string_pretty(json)?),
        (None, Some(raw)) => println!("{raw}"),
        (None, None) => println!("(no body)"),
    }

    println!("\ncURL:\n{}", qelves_core::to_curl(event));
    Ok(())
}

/// Number of batched events per request id
pub fn batch_sizes(events: &[NetworkEvent]) -> HashMap<&str, usize> {
    let mut sizes = HashMap::new();
    for event in events.iter().filter(|event| event.is_batched) {
        *sizes.entry(event.request_id.as_str()).or_insert(0) += 1;
    }
    sizes
}

fn batch_marker(event: &NetworkEvent, batches: &HashMap<&str, usize>) -> String {
    match event.batch_index {
        Some(index) => format!(
            "[{}/{}]",
            index + 1,
            batches.get(event.request_id.as_str()).copied().unwrap_or(1)
        ),
        None => String::new(),
    }
}

fn display_name(event: &NetworkEvent) -> &str {
    event.operation_name().unwrap_or(ANONYMOUS)
}

fn type_color(operation_type: OperationType) -> Color {
    match operation_type {
        OperationType::Query => Color::Green,
        OperationType::Mutation => Color::Yellow,
        OperationType::Subscription => Color::Magenta,
        OperationType::Persisted => Color::Blue,
        OperationType::Unknown => Color::Grey,
    }
}

fn format_status(status: Option<u16>) -> String {
    status.map_or_else(|| "-".to_string(), |status| status.to_string())
}

fn format_duration(ms: f64) -> String {
    if ms >= 1000.0 {
        format!("{:.2} s", ms / 1000.0)
    } else {
        format!("{} ms", ms.round() as u64)
    }
}

fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    let size = bytes as f64;
    if size >= KB * KB {
        format!("{:.1} MB", size / (KB * KB))
    } else if size >= KB {
        format!("{:.1} KB", size / KB)
    } else {
        format!("{bytes} B")
    }
}
