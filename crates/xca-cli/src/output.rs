//! Terminal output formatting.

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use xca_core::{SyncResult, SyncStatus};
use xca_graph::{AggregateResult, GraphCounts};

const ID_WIDTH: usize = 14;
const NAME_WIDTH: usize = 22;
const LIST_WIDTH: usize = 40;

/// Print sync counters and any write warnings.
pub fn print_sync_result(result: &SyncResult) {
    let heading = match result.status() {
        SyncStatus::Complete => "Sync complete:".green().bold(),
        SyncStatus::Partial => "Sync partially complete:".yellow().bold(),
    };
    println!("{}", heading);
    println!("  Users created: {}", result.users_created);
    println!("  Users updated: {}", result.users_updated);
    println!("  Vertices created: {}", result.vertices_created);
    println!("  Edges created: {}", result.edges_created);

    if !result.warnings.is_empty() {
        println!("\n{} ({}):", "Warnings".yellow().bold(), result.warnings.len());
        for warning in &result.warnings {
            println!("  {} {}", "!".yellow(), warning);
        }
    }
}

/// Print the combined user view as a table.
pub fn print_users_table(result: &AggregateResult) {
    if result.users.is_empty() {
        println!("{}", "No users found.".dimmed());
    } else {
        println!(
            "{} {} {} {}",
            pad_right("ID", ID_WIDTH),
            pad_right("Name", NAME_WIDTH),
            pad_right("Followers", LIST_WIDTH),
            "Following"
        );
        println!("{}", "─".repeat(ID_WIDTH + NAME_WIDTH + 2 * LIST_WIDTH + 3));

        for user in &result.users {
            let name = format!("{} {}", user.first_name, user.last_name);
            println!(
                "{} {} {} {}",
                pad_right(&truncate_visual(&user.id, ID_WIDTH), ID_WIDTH).cyan(),
                pad_right(&truncate_visual(&name, NAME_WIDTH), NAME_WIDTH),
                pad_right(&truncate_visual(&id_list(&user.followers), LIST_WIDTH), LIST_WIDTH),
                truncate_visual(&id_list(&user.following), LIST_WIDTH)
            );
        }
    }

    if !result.skipped.is_empty() {
        println!("\n{} ({}):", "Skipped".red().bold(), result.skipped.len());
        for skipped in &result.skipped {
            println!("  {} {}: {}", "✗".red(), skipped.user_id, skipped.reason.dimmed());
        }
    }
}

/// Print followers and following for one user.
pub fn print_follows(user_id: &str, followers: &[String], following: &[String]) {
    println!("{}", user_id.cyan().bold());
    println!("  {} ({}): {}", "Followers".bold(), followers.len(), id_list(followers));
    println!("  {} ({}): {}", "Following".bold(), following.len(), id_list(following));
}

/// Print store counts.
pub fn print_status(users: u64, counts: &GraphCounts) {
    println!("{}", "XCA Status".bold());
    println!("{}", "─".repeat(40));
    println!("  User documents: {}", users.to_string().cyan());
    println!("  Vertices:       {}", counts.vertices.to_string().cyan());
    println!("  Edges:          {}", counts.edges.to_string().cyan());

    if users as usize != counts.vertices {
        println!(
            "  {}",
            "Document and vertex counts differ; the stores are out of step.".yellow()
        );
    }
    println!("{}", "─".repeat(40));
}

fn id_list(ids: &[String]) -> String {
    if ids.is_empty() {
        "-".to_string()
    } else {
        ids.join(", ")
    }
}

/// Pad a plain string to a given visual width (right-padded).
fn pad_right(s: &str, width: usize) -> String {
    let visual = UnicodeWidthStr::width(s);
    if visual >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visual))
    }
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
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width + ch_width > max_width - 2 {
            break;
        }
        result.push(ch);
        current_width += ch_width;
    }
    result.push_str("..");
    result
}
