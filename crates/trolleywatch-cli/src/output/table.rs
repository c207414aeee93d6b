use trolleywatch_core::aggregate::RegionMean;
use trolleywatch_core::thresholds::ThresholdReport;

pub fn print_report(report: &ThresholdReport) {
    print_boundaries(report);

    println!("=== Inferred thresholds by hospital ===\n");
    println!("  {:<50} {:>8} {:>8}", "Hospital", "Amber @", "Red @");
    for estimate in &report.estimates {
        println!(
            "  {:<50} {:>8} {:>8}",
            estimate.hospital,
            fmt_threshold(estimate.amber_threshold),
            fmt_threshold(estimate.red_threshold)
        );
    }
    println!();

    println!("=== Threshold distribution ===\n");
    if report.amber_distribution.is_empty() && report.red_distribution.is_empty() {
        println!("  No thresholds determined yet.");
    }
    if !report.amber_distribution.is_empty() {
        println!("  Amber:");
        for (threshold, hospitals) in &report.amber_distribution {
            println!("    {threshold:>4}: {hospitals} hospitals");
        }
    }
    if !report.red_distribution.is_empty() {
        println!("  Red:");
        for (threshold, hospitals) in &report.red_distribution {
            println!("    {threshold:>4}: {hospitals} hospitals");
        }
    }
}

pub fn print_boundaries(report: &ThresholdReport) {
    println!("=== Proven boundaries (1-unit transitions) ===\n");

    if report.exact_boundaries.is_empty() {
        println!("  No exact 1-unit boundaries found; more observations needed.\n");
        return;
    }

    let mut transitions: Vec<String> = Vec::new();
    for boundary in &report.exact_boundaries {
        let label = boundary.transition();
        if !transitions.contains(&label) {
            transitions.push(label);
        }
    }

    for label in &transitions {
        println!("  {label} transitions:");
        for boundary in report
            .exact_boundaries
            .iter()
            .filter(|b| b.transition() == *label)
        {
            println!(
                "    {}: {} ({}) → {} ({})",
                boundary.hospital,
                boundary.from_value,
                boundary.from_date,
                boundary.to_value,
                boundary.to_date
            );
        }
    }
    println!();
}

pub fn print_regions(means: &[RegionMean]) {
    if means.is_empty() {
        println!("No regional aggregates found.");
        return;
    }
    println!("  {:<40} {:>12} {:>6}", "Region", "Mean total", "Days");
    for mean in means {
        println!(
            "  {:<40} {:>12.2} {:>6}",
            mean.region, mean.mean_total, mean.observations
        );
    }
}

fn fmt_threshold(value: Option<u32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "?".into())
}
