//! Resource catalog commands

use colored::Colorize;
use mathstar::query::ResourceFilter;
use mathstar::search::resource_fields;
use mathstar::{fuzzy_search, Resource, WindowedList};
use serde_json::json;
use std::borrow::Borrow;
use tracing::warn;

use super::{parse_level, rating_stars, split_highlights, truncate, AppContext};

/// Resource catalog subcommands
#[derive(Debug, Clone, clap::Subcommand)]
pub enum ResourceCommand {
    /// Page through every resource (duplicates merged)
    List {
        /// Page number, starting at 1
        #[arg(long, default_value = "1")]
        page: usize,

        /// Rows per page (defaults to [window] page_rows)
        #[arg(long)]
        page_rows: Option<usize>,
    },

    /// Substring search over name, description and category
    Search {
        /// Search text
        query: String,
    },

    /// Typo-tolerant ranked search
    Find {
        /// Search text
        query: String,

        /// Maximum results
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// List categories, or resources in categories matching NAME
    Category {
        /// Category text, matched as a case-insensitive substring
        name: Option<String>,
    },

    /// Resources rated at or above a threshold
    Top {
        /// Inclusive threshold (defaults to [query] top_rated_threshold)
        #[arg(long)]
        min_rating: Option<f64>,
    },

    /// Aggregate statistics
    Stats {
        /// Count every table entry, including ids listed in several tables
        #[arg(long)]
        raw: bool,
    },

    /// Combined filter, best rated first
    Filter {
        /// Restrict to one source table
        #[arg(long)]
        section: Option<String>,

        /// Category substring
        #[arg(long)]
        category: Option<String>,

        /// Inclusive minimum rating
        #[arg(long)]
        min_rating: Option<f64>,

        /// Substring over name, description and category
        #[arg(long)]
        search: Option<String>,
    },

    /// Recommendations for a learner level
    Recommend {
        /// beginner, intermediate, advanced or professional
        level: String,

        /// Maximum results (defaults to [recommendations] default_limit)
        #[arg(long)]
        limit: Option<usize>,

        /// Keyword matches only, without the rating floor
        #[arg(long)]
        basic: bool,
    },
}

pub fn cmd_resources(ctx: &AppContext, command: ResourceCommand) -> anyhow::Result<()> {
    match command {
        ResourceCommand::List { page, page_rows } => cmd_list(ctx, page, page_rows),
        ResourceCommand::Search { query } => cmd_search(ctx, &query),
        ResourceCommand::Find { query, limit } => cmd_find(ctx, &query, limit),
        ResourceCommand::Category { name } => cmd_category(ctx, name.as_deref()),
        ResourceCommand::Top { min_rating } => cmd_top(ctx, min_rating),
        ResourceCommand::Stats { raw } => cmd_stats(ctx, raw),
        ResourceCommand::Filter {
            section,
            category,
            min_rating,
            search,
        } => {
            let mut filter = ResourceFilter::new();
            if let Some(section) = section {
                filter = filter.with_section(section);
            }
            if let Some(category) = category {
                filter = filter.with_category(category);
            }
            if let Some(min_rating) = min_rating {
                filter = filter.with_min_rating(min_rating);
            }
            if let Some(search) = search {
                filter = filter.with_search(search);
            }
            cmd_filter(ctx, &filter)
        }
        ResourceCommand::Recommend {
            level,
            limit,
            basic,
        } => cmd_recommend(ctx, &level, limit, basic),
    }
}

fn print_header(title: &str) {
    println!("{}", title.bright_cyan().bold());
    println!("{}", "═".repeat(72).dimmed());
    println!();
}

fn print_resource_row(resource: &Resource) {
    println!(
        "  {:>4}  {:28} {:18} {} {:.1}",
        resource.id.to_string().dimmed(),
        truncate(&resource.name, 28).yellow(),
        truncate(&resource.category, 18),
        rating_stars(resource.rating).bright_yellow(),
        resource.rating
    );
}

fn print_resources<R: Borrow<Resource> + serde::Serialize>(
    ctx: &AppContext,
    title: &str,
    resources: &[R],
) -> anyhow::Result<()> {
    if ctx.format.is_json() {
        println!("{}", serde_json::to_string_pretty(resources)?);
        return Ok(());
    }

    print_header(title);
    if resources.is_empty() {
        println!("  {}", "No matching resources".dimmed());
    }
    for resource in resources {
        print_resource_row(Borrow::<Resource>::borrow(resource));
    }
    println!();
    println!("Total: {} resources", resources.len());
    Ok(())
}

fn cmd_list(ctx: &AppContext, page: usize, page_rows: Option<usize>) -> anyhow::Result<()> {
    let all = ctx.service.all_resources();
    let rows = page_rows.unwrap_or(ctx.config.window.page_rows).max(1);
    let pages = all.len().div_ceil(rows).max(1);
    if page == 0 || page > pages {
        warn!(page, pages, "Requested page out of range, clamping");
    }
    let page = page.clamp(1, pages);

    // One row per terminal line
    let mut window =
        WindowedList::new(all.as_slice(), 1.0, rows as f64).with_overscan(ctx.config.window.overscan);
    window.scroll_to(((page - 1) * rows) as f64);
    let rendered: Vec<_> = window.visible().collect();

    if ctx.format.is_json() {
        let out = json!({
            "page": page,
            "pages": pages,
            "total": all.len(),
            "rows": rendered,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    print_header(&format!("📚 Math Resources (page {}/{})", page, pages));
    for row in &rendered {
        print_resource_row(row.content);
    }
    println!();
    match (rendered.first(), rendered.last()) {
        (Some(first), Some(last)) => println!(
            "Rows {}-{} of {}",
            first.index + 1,
            last.index + 1,
            all.len()
        ),
        _ => println!("No resources"),
    }
    if page < pages {
        println!("{}", format!("Use --page {} for more", page + 1).dimmed());
    }
    Ok(())
}

fn cmd_search(ctx: &AppContext, query: &str) -> anyhow::Result<()> {
    let results = ctx.service.catalog().search(query);
    print_resources(ctx, &format!("🔍 Resources mentioning \"{}\"", query), &results)
}

fn cmd_find(ctx: &AppContext, query: &str, limit: usize) -> anyhow::Result<()> {
    let all = ctx.service.all_resources();
    let mut hits = fuzzy_search(all.as_slice(), &resource_fields(), query);
    hits.truncate(limit);

    if ctx.format.is_json() {
        let out: Vec<_> = hits
            .iter()
            .map(|h| json!({ "resource": h.item, "score": h.score, "matches": h.matches }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    print_header(&format!("🔎 Best matches for \"{}\"", query));
    if hits.is_empty() {
        println!("  {}", "No matching resources".dimmed());
    }
    for hit in &hits {
        let name_ranges = hit
            .matches
            .iter()
            .find(|m| m.key == "name")
            .map(|m| m.ranges.as_slice())
            .unwrap_or(&[]);
        let name: String = split_highlights(&hit.item.name, name_ranges)
            .into_iter()
            .map(|(run, marked)| {
                if marked {
                    run.bright_green().bold().to_string()
                } else {
                    run
                }
            })
            .collect();
        println!(
            "  {:>6.2}  {}  {}",
            hit.score,
            name,
            hit.item.category.dimmed()
        );
    }
    println!();
    println!("Total: {} matches", hits.len());
    Ok(())
}

fn cmd_category(ctx: &AppContext, name: Option<&str>) -> anyhow::Result<()> {
    let catalog = ctx.service.catalog();
    let Some(name) = name else {
        let stats = ctx.service.stats();
        if ctx.format.is_json() {
            println!("{}", serde_json::to_string_pretty(&stats.category_stats)?);
            return Ok(());
        }
        print_header("📂 Categories");
        for cat in &stats.category_stats {
            let avg = cat
                .avg_rating
                .map(|a| format!("{:.2}", a))
                .unwrap_or_else(|| "-".to_string());
            println!("  {:24} {:>3} resources  avg {}", cat.name.yellow(), cat.count, avg);
        }
        println!();
        println!("Total: {} categories", stats.total_categories);
        return Ok(());
    };

    let results = catalog.by_category(name);
    print_resources(ctx, &format!("📂 Category \"{}\"", name), &results)
}

fn cmd_top(ctx: &AppContext, min_rating: Option<f64>) -> anyhow::Result<()> {
    let threshold = min_rating.unwrap_or(ctx.config.query.top_rated_threshold);
    let results = ctx.service.catalog().top_rated(threshold);
    print_resources(ctx, &format!("⭐ Rated {:.1} and above", threshold), &results)
}

fn cmd_stats(ctx: &AppContext, raw: bool) -> anyhow::Result<()> {
    let stats = if raw {
        ctx.service.catalog().stats()
    } else {
        (*ctx.service.stats()).clone()
    };

    if ctx.format.is_json() {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    print_header("📊 Catalog Statistics");
    println!("Resources:      {}", stats.total_resources.to_string().green());
    println!("Categories:     {}", stats.total_categories.to_string().green());
    println!("Average rating: {}", stats.average_rating_display().green());
    println!();
    for cat in &stats.category_stats {
        let avg = cat
            .avg_rating
            .map(|a| format!("{:.2}", a))
            .unwrap_or_else(|| "-".to_string());
        println!("  {:24} {:>3}  {}", cat.name, cat.count, avg.dimmed());
    }
    Ok(())
}

fn cmd_filter(ctx: &AppContext, filter: &ResourceFilter) -> anyhow::Result<()> {
    let results = ctx.service.filtered(filter);
    print_resources(ctx, "🧮 Filtered Resources", results.as_slice())
}

fn cmd_recommend(
    ctx: &AppContext,
    level: &str,
    limit: Option<usize>,
    basic: bool,
) -> anyhow::Result<()> {
    let level = parse_level(level)?;
    let title = format!("🎯 Recommended for {}", level.display_name());

    if basic {
        let results = ctx.service.catalog().recommended(level);
        let limit = limit.unwrap_or(results.len());
        return print_resources(ctx, &title, &results[..limit.min(results.len())]);
    }

    let limit = limit.unwrap_or(ctx.config.recommendations.default_limit);
    let results = ctx.service.recommendations(level, limit);
    print_resources(ctx, &title, results.as_slice())
}
