use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, error};
use std::path::PathBuf;
use std::process::ExitCode;

use recipe_nusantara::fixtures::{self, EXAMPLE_PROMPTS};
use recipe_nusantara::{display, AppError, AppShell, ImageFile, Provider, Recipe};

#[derive(Parser)]
#[command(name = "recipe-nusantara", version, about = "Generate Indonesian recipes from a photo or a description")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze a dish description or a food photo
    Generate {
        /// Describe the dish
        #[arg(long, conflicts_with = "image", required_unless_present = "image")]
        text: Option<String>,
        /// Path to a food photo
        #[arg(long)]
        image: Option<PathBuf>,
        /// Analysis backend (mock, openai); defaults to the configured one
        #[arg(long)]
        provider: Option<String>,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
        /// Write the result to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Render the showcase recipe without running an analysis
    Preview {
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Show or toggle the stored light/dark preference
    Theme {
        #[arg(value_enum, default_value_t = ThemeAction::Show)]
        action: ThemeAction,
    },
    /// List the example prompts
    Examples,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Html,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum ThemeAction {
    Show,
    Toggle,
}

fn render(shell: &AppShell, recipe: Option<&Recipe>, format: Format) -> Result<String, AppError> {
    Ok(match format {
        Format::Text => display::render_text(recipe),
        Format::Html => shell.render_page(),
        Format::Json => serde_json::to_string_pretty(&recipe)?,
    })
}

async fn emit(content: String, output: Option<PathBuf>) -> Result<(), AppError> {
    match output {
        Some(path) => {
            tokio::fs::write(&path, content).await?;
            debug!("Wrote {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<ExitCode, AppError> {
    match cli.command {
        Command::Generate {
            text,
            image,
            provider,
            format,
            output,
        } => {
            let mut builder = AppShell::builder();
            if let Some(name) = provider {
                let provider = Provider::from_name(&name).ok_or_else(|| {
                    AppError::BuilderError(format!("Unknown provider: {}", name))
                })?;
                builder = builder.provider(provider);
            }
            let mut shell = builder.build()?;

            if let Some(path) = image {
                let file = ImageFile::load(&path).await?;
                if !shell.select_image(file) {
                    eprintln!("{} is not an image file, nothing to analyze", path.display());
                    return Ok(ExitCode::FAILURE);
                }
                shell.analyze_image().await;
            } else if let Some(text) = text {
                shell.set_text(text);
                if !shell.input().can_generate(shell.is_loading()) {
                    eprintln!("Describe a dish first, the description is empty");
                    return Ok(ExitCode::FAILURE);
                }
                shell.generate_recipe().await;
            }

            if let Some(notice) = shell.notice() {
                eprintln!("{}", notice.message());
                return Ok(ExitCode::FAILURE);
            }

            let content = render(&shell, shell.current_recipe(), format)?;
            emit(content, output).await?;
        }
        Command::Preview { format, output } => {
            let shell = AppShell::builder().provider(Provider::Mock).build()?;
            let recipe = fixtures::rendang_daging_sapi();
            let content = match format {
                Format::Html => display::render_html(Some(&recipe), shell.theme()),
                _ => render(&shell, Some(&recipe), format)?,
            };
            emit(content, output).await?;
        }
        Command::Theme { action } => {
            let mut shell = AppShell::builder().provider(Provider::Mock).build()?;
            let theme = match action {
                ThemeAction::Show => shell.theme(),
                ThemeAction::Toggle => shell.toggle_theme(),
            };
            println!("{}", theme);
        }
        Command::Examples => {
            for (index, prompt) in EXAMPLE_PROMPTS.iter().enumerate() {
                println!("{}. {}", index + 1, prompt);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    match run(Cli::parse()).await {
        Ok(code) => code,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
