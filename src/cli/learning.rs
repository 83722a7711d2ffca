//! Glossary, learning path and preference commands

use anyhow::Context;
use colored::Colorize;
use mathstar::{LearningPaths, PreferenceStore, Symbol, SymbolGlossary, Theme};
use serde_json::json;

use super::{parse_level, parse_symbol_category, progress_bar, AppContext};

/// Learning subcommands
#[derive(Debug, Clone, clap::Subcommand)]
pub enum LearningCommand {
    /// Browse or search the symbol glossary
    Symbols {
        /// Search text (glyph, name, LaTeX command or meaning)
        query: Option<String>,

        /// Restrict to one category (e.g. calculus, set_theory)
        #[arg(long)]
        category: Option<String>,

        /// Show only favorite symbols
        #[arg(long)]
        favorites: bool,

        /// List categories with symbol counts
        #[arg(long)]
        categories: bool,
    },

    /// Show learning paths with recorded progress
    Paths {
        /// Path id to show in detail
        id: Option<String>,

        /// Restrict to one level
        #[arg(long)]
        level: Option<String>,
    },

    /// Toggle a symbol as favorite
    Favorite {
        /// Symbol id
        id: u32,
    },

    /// Show or record progress on a learning path
    Progress {
        /// Path id
        path_id: String,

        /// Completion percent (0-100)
        percent: Option<u8>,
    },

    /// Show or change the color theme (light, dark, toggle)
    Theme {
        /// New theme, or "toggle"
        value: Option<String>,
    },
}

pub fn cmd_learning(ctx: &AppContext, command: LearningCommand) -> anyhow::Result<()> {
    match command {
        LearningCommand::Symbols {
            query,
            category,
            favorites,
            categories,
        } => cmd_symbols(ctx, query.as_deref(), category.as_deref(), favorites, categories),
        LearningCommand::Paths { id, level } => cmd_paths(ctx, id.as_deref(), level.as_deref()),
        LearningCommand::Favorite { id } => cmd_favorite(ctx, id),
        LearningCommand::Progress { path_id, percent } => cmd_progress(ctx, &path_id, percent),
        LearningCommand::Theme { value } => cmd_theme(ctx, value.as_deref()),
    }
}

fn save(store: &PreferenceStore) -> anyhow::Result<()> {
    store
        .save()
        .with_context(|| format!("failed to save preferences: {}", store.path().display()))
}

fn print_symbol_row(symbol: &Symbol, favorite: bool) {
    let marker = if favorite { "♥".bright_red() } else { " ".normal() };
    println!(
        "  {} {:>3}  {:6} {:24} {:18} {}",
        marker,
        symbol.id.to_string().dimmed(),
        symbol.symbol.bright_yellow(),
        symbol.name,
        symbol.latex.cyan(),
        symbol.meaning.dimmed()
    );
}

fn cmd_symbols(
    ctx: &AppContext,
    query: Option<&str>,
    category: Option<&str>,
    favorites_only: bool,
    categories: bool,
) -> anyhow::Result<()> {
    let glossary = SymbolGlossary::standard();

    if categories {
        let counts = glossary.categories();
        if ctx.format.is_json() {
            let out: Vec<_> = counts
                .iter()
                .map(|(c, n)| json!({ "category": c, "name": c.display_name(), "count": n }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&out)?);
            return Ok(());
        }
        println!("{}", "📂 Symbol Categories".bright_cyan().bold());
        println!("{}", "═".repeat(60).dimmed());
        println!();
        for (category, count) in &counts {
            println!("  {:28} {}", category.display_name().yellow(), count);
        }
        println!();
        println!("Total: {} symbols", glossary.len());
        return Ok(());
    }

    let store = ctx.open_prefs()?;
    let favorite_ids = store.favorites();
    let category = category.map(parse_symbol_category).transpose()?;

    let mut symbols: Vec<&Symbol> = match query {
        Some(q) => glossary.search(q).into_iter().map(|h| h.item).collect(),
        None => glossary.all().iter().collect(),
    };
    if let Some(category) = category {
        symbols.retain(|s| s.category == category);
    }
    if favorites_only {
        let favorites = glossary.favorites(&favorite_ids);
        symbols.retain(|s| favorites.iter().any(|f| f.id == s.id));
    }

    if ctx.format.is_json() {
        println!("{}", serde_json::to_string_pretty(&symbols)?);
        return Ok(());
    }

    println!("{}", "∑ Math Symbols".bright_cyan().bold());
    println!("{}", "═".repeat(60).dimmed());
    println!();
    if symbols.is_empty() {
        println!("  {}", "No matching symbols".dimmed());
    }
    for symbol in &symbols {
        print_symbol_row(symbol, favorite_ids.contains(&symbol.id));
    }
    println!();
    println!("Total: {} symbols", symbols.len());
    Ok(())
}

fn cmd_paths(ctx: &AppContext, id: Option<&str>, level: Option<&str>) -> anyhow::Result<()> {
    let paths = LearningPaths::standard();
    let store = ctx.open_prefs()?;

    if let Some(id) = id {
        let path = paths
            .get(id)
            .ok_or_else(|| anyhow::anyhow!("Learning path '{}' not found", id))?;
        let percent = store.progress(&path.id);

        if ctx.format.is_json() {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({ "path": path, "percent": percent }))?
            );
            return Ok(());
        }

        println!("{}", format!("🧭 {}", path.title).bright_cyan().bold());
        println!("{}", "═".repeat(60).dimmed());
        println!();
        println!("ID:          {}", path.id.yellow());
        println!("Level:       {}", path.level.display_name());
        println!("Description: {}", path.description);
        println!("Estimated:   {} hours", path.estimated_hours);
        println!("Progress:    {} {}%", progress_bar(percent, 20), percent);
        println!();
        println!("Topics:");
        for (i, topic) in path.topics.iter().enumerate() {
            println!("  {}. {}", (i + 1).to_string().bright_blue(), topic);
        }
        return Ok(());
    }

    let level = level.map(parse_level).transpose()?;
    let rows: Vec<_> = paths
        .with_progress(&store)
        .into_iter()
        .filter(|row| level.map_or(true, |l| row.path.level == l))
        .collect();

    if ctx.format.is_json() {
        let out = json!({
            "paths": rows,
            "overall": paths.overall_progress(&store),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{}", "🧭 Learning Paths".bright_cyan().bold());
    println!("{}", "═".repeat(60).dimmed());
    println!();
    for row in &rows {
        println!(
            "  {:22} {:14} {} {:>3}%",
            row.path.id.yellow(),
            row.path.level.display_name(),
            progress_bar(row.percent, 20),
            row.percent
        );
    }
    println!();
    println!("Overall: {:.0}% complete", paths.overall_progress(&store));
    Ok(())
}

fn cmd_favorite(ctx: &AppContext, id: u32) -> anyhow::Result<()> {
    let glossary = SymbolGlossary::standard();
    let symbol = glossary
        .get(id)
        .ok_or_else(|| anyhow::anyhow!("Symbol {} not found in glossary", id))?;

    let mut store = ctx.open_prefs()?;
    let now_favorite = store.toggle_favorite(id)?;
    save(&store)?;

    if ctx.format.is_json() {
        let out = json!({ "symbol": symbol, "favorite": now_favorite });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if now_favorite {
        println!("{} Added {} {} to favorites", "♥".bright_red(), symbol.symbol, symbol.name);
    } else {
        println!("{} Removed {} {} from favorites", "○".dimmed(), symbol.symbol, symbol.name);
    }
    Ok(())
}

fn cmd_progress(ctx: &AppContext, path_id: &str, percent: Option<u8>) -> anyhow::Result<()> {
    let paths = LearningPaths::standard();
    let path = paths
        .get(path_id)
        .ok_or_else(|| anyhow::anyhow!("Learning path '{}' not found", path_id))?;
    let mut store = ctx.open_prefs()?;

    if let Some(percent) = percent {
        store.set_progress(&path.id, percent)?;
        save(&store)?;
        if !ctx.format.is_json() {
            println!("{} Recorded progress for {}", "✓".bright_green(), path.title);
        }
    }

    let current = store.progress(&path.id);
    if ctx.format.is_json() {
        let out = json!({ "path_id": path.id, "title": path.title, "percent": current });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }
    println!("  {} {} {}%", path.title, progress_bar(current, 20), current);
    Ok(())
}

fn cmd_theme(ctx: &AppContext, value: Option<&str>) -> anyhow::Result<()> {
    let mut store = ctx.open_prefs()?;

    let theme = match value {
        None => store.theme(),
        Some(v) if v.eq_ignore_ascii_case("toggle") => {
            let theme = store.toggle_theme();
            save(&store)?;
            theme
        }
        Some(v) => {
            let theme: Theme = v.parse()?;
            store.set_theme(theme);
            save(&store)?;
            theme
        }
    };

    if ctx.format.is_json() {
        println!("{}", serde_json::to_string_pretty(&json!({ "theme": theme }))?);
        return Ok(());
    }

    println!("Theme: {}", theme.to_string().bright_yellow());
    Ok(())
}
