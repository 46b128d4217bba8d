//! Storyboard CLI binary.
//!
//! This binary provides command-line access to the storyboard generator:
//! - Write a script from a story idea
//! - Render scene images through the generation queue
//! - Edit, browse and export saved stories

use clap::Parser;
use std::process::ExitCode;

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    use cli::{
        AppContext, Cli, Commands, create_story, export_story, handle_edit_command,
        handle_history_command, init_logging, list_styles, regenerate_scene, render_story,
    };

    // Pick up GEMINI_API_KEY from a local .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose, cli.json_logs) {
        eprintln!("Failed to initialise logging: {}", e);
        return ExitCode::FAILURE;
    }

    if let Commands::Styles = cli.command {
        list_styles();
        return ExitCode::SUCCESS;
    }

    let ctx = match AppContext::load(cli.config.as_deref()) {
        Ok(ctx) => ctx,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            eprintln!("Error: {}", e.user_message());
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::Create {
            idea,
            frames,
            style,
            render,
        } => create_story(&ctx, &idea, frames, &style, render).await,

        Commands::Render { id } => render_story(&ctx, &id).await,

        Commands::Regenerate { id, scene, prompt } => {
            regenerate_scene(&ctx, &id, scene, prompt.as_deref()).await
        }

        Commands::Edit(edit_cmd) => handle_edit_command(&ctx, edit_cmd).await,

        Commands::History(history_cmd) => handle_history_command(&ctx, history_cmd).await,

        Commands::Export { id, format, output } => {
            export_story(&ctx, &id, format, output.as_deref()).await
        }

        Commands::Styles => {
            list_styles();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = %e, "Command failed");
            eprintln!("Error: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}
