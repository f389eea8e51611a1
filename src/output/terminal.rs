// Colored terminal output for alert and detection tables.
//
// This module handles all terminal-specific formatting: colors, tables,
// summaries. The main.rs display paths delegate here.

use colored::{ColoredString, Colorize};

use crate::model::{DisasterAlert, ImageDetection, UrgencyLevel};

use super::truncate_chars;

/// Display a ranked alert list in the terminal.
pub fn display_alerts(alerts: &[DisasterAlert]) {
    if alerts.is_empty() {
        println!("No alerts cleared the publication filter.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Disaster Alerts ({}) ===", alerts.len()).bold()
    );
    println!();

    // Header
    println!(
        "  {:>4}  {:<12} {:<22} {:>5}  {:>4}  {:>7}  {:<10}  {:>10}",
        "Rank".dimmed(),
        "Type".dimmed(),
        "Location".dimmed(),
        "Conf".dimmed(),
        "Sev".dimmed(),
        "Reports".dimmed(),
        "Urgency".dimmed(),
        "Pop. est.".dimmed(),
    );
    println!("  {}", "-".repeat(86).dimmed());

    for (i, alert) in alerts.iter().enumerate() {
        println!(
            "  {:>4}. {:<12} {:<22} {:>5.2}  {:>4}  {:>7}  {:<10}  {:>10}",
            i + 1,
            alert.disaster_type.as_str(),
            truncate_chars(&alert.location_name, 20),
            alert.confidence,
            alert.severity,
            alert.report_count,
            colorize_urgency(alert.urgency_level),
            alert.affected_population,
        );
    }

    println!();

    let critical = alerts
        .iter()
        .filter(|a| a.urgency_level == UrgencyLevel::Critical)
        .count();
    if critical > 0 {
        println!(
            "  {} alert(s) at {} urgency",
            critical,
            "critical".red().bold()
        );
        println!();
    }
}

/// Display per-image detection records.
pub fn display_detections(detections: &[(String, ImageDetection)]) {
    if detections.is_empty() {
        println!("No images produced a detection.");
        return;
    }

    for (label, d) in detections {
        println!("\n{}", format!("=== {label} ===").bold());
        println!("  Type:        {}", d.disaster_type.as_str());
        println!("  Confidence:  {:.2}", d.confidence);
        println!("  Severity:    {}", d.severity);
        println!("  Area:        {:.2}", d.affected_area);
        println!(
            "  Coordinates: {:.8}, {:.8}",
            d.coordinates.lat, d.coordinates.lng
        );
        println!(
            "  Indices:     veg {:.4}  water {:.4}  damage {:.4}  fire {:.4}",
            d.vegetation_index, d.water_index, d.building_damage_index, d.fire_intensity_index
        );
    }
    println!();
}

fn colorize_urgency(urgency: UrgencyLevel) -> ColoredString {
    match urgency {
        UrgencyLevel::Critical => urgency.as_str().red().bold(),
        UrgencyLevel::High => urgency.as_str().yellow(),
        UrgencyLevel::Medium => urgency.as_str().cyan(),
        UrgencyLevel::Low => urgency.as_str().dimmed(),
    }
}
