//! Update record display for CLI output.

use themeup_core::{ManualInstructions, UpdateRecord};

/// Print a short summary of an update record, under an optional heading.
pub fn display_update_summary(heading: Option<&str>, record: &UpdateRecord) {
    if let Some(heading) = heading {
        println!("{heading}");
    }
    println!("  Version:   {}", record.version);
    println!("  Title:     {}", record.title);
    if let Some(description) = record.description.as_deref().filter(|d| !d.is_empty()) {
        println!("  Notes:     {description}");
    }
    println!("  Channel:   {}", record.channel);
    println!("  Published: {}", record.created_at.format("%Y-%m-%d %H:%M UTC"));
    println!("  Package:   {}", record.package_url);
}

/// Print the manual install path.
pub fn display_instructions(instructions: &ManualInstructions) {
    println!("Manual install of version {}", instructions.version);
    println!("  Package: {}", instructions.package_url);
    println!();
    for (i, step) in instructions.steps.iter().enumerate() {
        println!("  {}. {step}", i + 1);
    }
}
