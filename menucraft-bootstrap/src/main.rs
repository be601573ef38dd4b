use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use menucraft_application::MenuEngine;
use menucraft_bootstrap::AppContext;
use menucraft_domain::{MenuFileName, PlaceholderRegistry, SlotPosition, Viewer};
use menucraft_infrastructure::{
    strip_colors, ConsoleServer, ConsoleViewer, ConsoleViewerDirectory, ConsoleWindowHost,
    TickScheduler,
};

#[derive(Parser, Debug)]
#[command(name = "menucraft")]
#[command(about = "Declarative inventory menu engine", long_about = None)]
struct Args {
    /// Path to config file
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load every menu and report configuration errors
    Check,
    /// List loaded menus and their open triggers
    List,
    /// Render a menu to the terminal the way a viewer would see it
    Render {
        /// Menu file name, with or without the .yml extension
        menu: String,
        /// Viewer name used for placeholder resolution
        #[arg(long, default_value = "Console")]
        viewer: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    if let Some(config) = args.config {
        std::env::set_var("MENUCRAFT_CONFIG", config);
    }

    let context = AppContext::new().await?;
    match args.command {
        Command::Check => check(&context),
        Command::List => list(&context),
        Command::Render { menu, viewer } => render(&context, &menu, &viewer),
    }
}

fn check(context: &AppContext) -> Result<()> {
    if context.last_errors.is_empty() {
        println!(
            "{} menu(s) loaded, no configuration errors",
            context.registry.len()
        );
        return Ok(());
    }
    println!(
        "{} menu(s) loaded with {} configuration error(s):",
        context.registry.len(),
        context.last_errors.len()
    );
    for (index, error) in context.last_errors.iter().enumerate() {
        println!("{}) {error}", index + 1);
    }
    std::process::exit(1);
}

fn list(context: &AppContext) -> Result<()> {
    if context.registry.is_empty() {
        println!("no menus loaded from {}", context.config.menus_dir);
        return Ok(());
    }
    for file_name in context.registry.file_names() {
        let Some(menu) = context.registry.lookup_by_file_name(file_name.as_str()) else {
            continue;
        };
        println!(
            "{} - \"{}\" ({}x{})",
            file_name,
            strip_colors(menu.title().original()),
            menu.row_count(),
            menu.column_count()
        );
        if !menu.open_commands().is_empty() {
            println!("  commands: {}", menu.open_commands().join(", "));
        }
        if let Some(trigger) = menu.open_item() {
            println!("  open with item: {}", trigger.material);
        }
    }
    Ok(())
}

fn render(context: &AppContext, menu: &str, viewer_name: &str) -> Result<()> {
    let directory = Arc::new(ConsoleViewerDirectory::new());
    let viewer: Arc<dyn Viewer> = Arc::new(ConsoleViewer::new(viewer_name));
    directory.register(Arc::clone(&viewer));
    let host = Arc::new(ConsoleWindowHost::new());

    let mut engine = MenuEngine::new(
        Arc::clone(&context.registry),
        PlaceholderRegistry::new(),
        directory,
        Arc::new(ConsoleServer::new()),
        Arc::clone(&host) as Arc<dyn menucraft_domain::WindowHost>,
        Arc::new(TickScheduler::new()),
        Arc::clone(&context.metrics),
        context.config.anti_click_spam_delay_ms,
    );

    let file_name = MenuFileName::with_yaml_extension(menu);
    let Some(window) = engine.open_menu_by_name(viewer.id(), file_name.as_str())? else {
        println!("the menu refused to open (permission or open actions)");
        return Ok(());
    };
    let Some(open) = host.window(window) else {
        println!("the menu closed before it could be rendered");
        return Ok(());
    };

    println!("{} ({}x9)", strip_colors(&open.title), open.rows);
    for (index, item) in open.items.iter().enumerate() {
        let Some(item) = item else {
            continue;
        };
        let position = SlotPosition::from_slot_index(index);
        let label = item
            .name
            .as_deref()
            .map(strip_colors)
            .unwrap_or_else(|| item.material.to_string());
        println!(
            "  [{},{}] {} ({} x{})",
            position.row + 1,
            position.column + 1,
            label,
            item.material,
            item.amount
        );
        for line in &item.lore {
            println!("        {}", strip_colors(line));
        }
    }
    Ok(())
}
