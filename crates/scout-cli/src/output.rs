//! Terminal output formatting.

use colored::{ColoredString, Colorize};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use scout_core::dashboard::AgentStatus;
use scout_core::discovery::DatasetResult;
use scout_core::matching::MatchResult;
use scout_core::present::{confidence_class, initials, visible_tags, ScoreBand};

/// Get terminal width from `COLUMNS`, defaulting to 80.
fn term_width() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|w| *w >= 40)
        .unwrap_or(80)
}

/// Truncate a string respecting visual width.
fn truncate_visual(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut result = String::new();
    let mut current_width = 0;
    for ch in s.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width + ch_width > max_width - 2 {
            break;
        }
        result.push(ch);
        current_width += ch_width;
    }
    result.push_str("..");
    result
}

/// Greedy word wrap by visual width.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let needed = UnicodeWidthStr::width(line.as_str()) + usize::from(!line.is_empty()) + UnicodeWidthStr::width(word);
        if needed > width && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

fn print_wrapped(text: &str, indent: usize) {
    let width = term_width().saturating_sub(indent).max(20);
    for line in wrap(text, width) {
        println!("{}{}", " ".repeat(indent), line);
    }
}

fn score_colored(score: u8) -> ColoredString {
    let label = format!("{:>3}%", score);
    match ScoreBand::of(score) {
        ScoreBand::High => label.green().bold(),
        ScoreBand::Medium => label.yellow().bold(),
        ScoreBand::Low => label.red().bold(),
    }
}

fn section(title: &str) {
    println!("{}", title.bold());
    println!("{}", "─".repeat(term_width().min(60)).dimmed());
}

/// Print a labelled form value.
pub fn print_field(label: &str, value: &str) {
    let value = if value.trim().is_empty() { "-".dimmed() } else { value.normal() };
    println!("  {:<12} {}", format!("{}:", label).dimmed(), value);
}

fn print_steps(steps: &[String]) {
    if steps.is_empty() {
        return;
    }
    println!("     {}", "Next steps".bold());
    for (i, step) in steps.iter().enumerate() {
        println!("       {}. {}", i + 1, step);
    }
}

/// Print match cards.
pub fn print_matches(result: &MatchResult) {
    if !result.intent_summary.is_empty() {
        section("Intent");
        print_wrapped(&result.intent_summary, 2);
        println!();
    }
    if !result.overall_analysis.is_empty() {
        section("Analysis");
        print_wrapped(&result.overall_analysis, 2);
        println!();
    }

    if result.matches.is_empty() {
        println!("{}", "No matches found.".dimmed());
        return;
    }

    section(&format!("Matches ({} of {})", result.matches.len(), result.total_matches));
    let name_width = term_width().saturating_sub(16);
    for item in &result.matches {
        println!(
            "{} {} {}",
            score_colored(item.compatibility_score),
            format!("[{}]", initials(&item.name)).cyan(),
            truncate_visual(&item.name, name_width).bold()
        );
        if !item.title_or_role.is_empty() {
            println!("     {}", truncate_visual(&item.title_or_role, name_width).dimmed());
        }

        let (tags, more) = visible_tags(&item.shared_interests);
        if !tags.is_empty() {
            let mut line = tags.join(" · ");
            if more > 0 {
                line.push_str(&format!(" +{} more", more));
            }
            println!("     {}", line.blue());
        }
        if !item.reasoning.is_empty() {
            print_wrapped(&item.reasoning, 5);
        }
        print_steps(&item.next_steps);
        if !item.confidence_level.is_empty() {
            let label = format!("{} confidence", item.confidence_level);
            let label = match confidence_class(&item.confidence_level) {
                "high" => label.green(),
                "medium" => label.yellow(),
                _ => label.dimmed(),
            };
            println!("     {}", label);
        }
        println!();
    }
}

/// Print dataset cards.
pub fn print_datasets(result: &DatasetResult) {
    if !result.research_landscape_summary.is_empty() {
        section("Research landscape");
        print_wrapped(&result.research_landscape_summary, 2);
        println!();
    }

    if result.has_metadata() {
        let meta = &result.search_metadata;
        print_field("Query", &meta.query_used);
        print_field("Sources", &meta.sources_searched.join(", "));
        print_field("Filters", &meta.filters_applied);
        println!();
    }

    if result.datasets.is_empty() {
        println!("{}", "No datasets found.".dimmed());
        return;
    }

    section(&format!("Datasets ({} of {})", result.datasets.len(), result.total_results));
    let title_width = term_width().saturating_sub(6);
    for item in &result.datasets {
        println!("{} {}", score_colored(item.relevance_score), truncate_visual(&item.title, title_width).bold());

        let mut origin: Vec<&str> = Vec::new();
        for part in [&item.source, &item.source_type, &item.year] {
            if !part.is_empty() {
                origin.push(part);
            }
        }
        if !origin.is_empty() {
            println!("     {}", origin.join(" · ").dimmed());
        }
        if !item.authors.is_empty() {
            println!("     {}", truncate_visual(&item.authors.join(", "), title_width));
        }
        if !item.contextual_summary.is_empty() {
            print_wrapped(&item.contextual_summary, 5);
        }
        print_steps(&item.next_steps);
        if !item.access_link.is_empty() {
            println!("     {}", item.access_link.underline().cyan());
        }
        println!();
    }
}

/// Print the agent registry.
pub fn print_agents(agents: &[AgentStatus]) {
    println!("{:<26} {:<34} {:<10}", "ID", "Name", "Role");
    println!("{}", "─".repeat(72));
    for agent in agents {
        let role = match agent.profile.role {
            scout_core::agent::AgentRole::Primary => "primary".cyan(),
            scout_core::agent::AgentRole::SubAgent => "sub-agent".dimmed(),
        };
        println!("{:<26} {:<34} {}", agent.profile.id, truncate_visual(agent.profile.name, 32), role);
        println!("{:<26} {}", "", agent.profile.purpose.dimmed());
    }
}
