//! changelog-ai - CLI entry point.

use std::io::{IsTerminal, Read};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use changelog_ai::changelog::write_changelog;
use changelog_ai::config::WEBHOOK_URL_ENV_VAR;
use changelog_ai::git::{
    DEFAULT_TAGS_LIMIT, TagRecord, filter_by_date, is_repository, select_recent,
};
use changelog_ai::notify::Notifier;
use changelog_ai::{
    ChangelogRequest, GitSource, HttpCompleter, IgnoreRules, Mode, Provider, ProviderConfig,
    VcsSource, WeComNotifier, generate_changelog,
};

/// Generate release notes between two git refs, optionally summarized by AI.
#[derive(Parser, Debug)]
#[command(name = "changelog-ai")]
#[command(about = "Generate release notes between two git refs, optionally summarized by AI")]
#[command(version)]
struct Cli {
    /// Start ref (tag, commit hash, or branch)
    from: Option<String>,

    /// End ref (tag, commit hash, or branch)
    to: Option<String>,

    /// List available tags
    #[arg(short, long)]
    list: bool,

    /// Only list tags whose date contains this text (e.g. 2024-01)
    #[arg(short, long)]
    date: Option<String>,

    /// Number of tags to list
    #[arg(long, default_value_t = DEFAULT_TAGS_LIMIT)]
    limit: usize,

    /// Compare the most recent N tags (oldest of them to newest)
    #[arg(short, long, value_name = "N")]
    recent: Option<usize>,

    /// Write the changelog to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Show commit hashes and extra progress details
    #[arg(short, long)]
    verbose: bool,

    /// Summarize changes with an AI provider
    #[arg(long)]
    ai: bool,

    /// AI provider: gemini, openai, or deepseek
    #[arg(long, default_value_t = Provider::Gemini)]
    provider: Provider,

    /// Print the raw git data and AI prompt without calling the AI
    #[arg(long)]
    dry_run: bool,

    /// Send the changelog to a WeCom group webhook
    #[arg(long)]
    webhook: bool,

    /// WeCom webhook URL
    #[arg(long, env = WEBHOOK_URL_ENV_VAR, hide_env_values = true)]
    webhook_url: Option<String>,

    /// Send an existing changelog to the webhook without analysing the repository
    #[arg(long)]
    notify: bool,

    /// Changelog file for --notify (reads stdin when omitted)
    #[arg(short, long, requires = "notify")]
    input: Option<PathBuf>,

    /// Extra glob of files to leave out of the diff (repeatable)
    #[arg(long = "ignore", value_name = "GLOB")]
    ignore: Vec<String>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("changelog_ai=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Existing environment variables win over .env entries
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing();

    if cli.notify {
        return send_existing_changelog(&cli).await;
    }

    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    if !is_repository(&cwd) {
        bail!("Current directory is not a Git repository");
    }
    let source = GitSource::open(&cwd).context("Failed to open git repository")?;

    if cli.list {
        return list_tags(&source, cli.date.as_deref(), cli.limit);
    }

    let (from_ref, to_ref) = match (cli.recent, &cli.from, &cli.to) {
        (Some(count), _, _) => {
            let tags = source.list_tags().context("Failed to list tags")?;
            let (from, to) = select_recent(&tags, count)?;
            eprintln!("📌 Selected tags: {} → {}", from.name, to.name);
            (from.name.clone(), to.name.clone())
        }
        (None, Some(from), Some(to)) => (from.clone(), to.clone()),
        _ => {
            Cli::command().print_help()?;
            println!("\n💡 Quick start:");
            println!("   changelog-ai --list");
            println!("   changelog-ai --recent 2 --ai");
            return Ok(());
        }
    };

    for reference in [&from_ref, &to_ref] {
        if !source.ref_exists(reference) {
            bail!(
                "Reference '{}' not found. Use --list to see available tags",
                reference
            );
        }
    }

    // --dry-run wins over --ai
    let mode = if cli.dry_run {
        Mode::DryRun
    } else if cli.ai {
        Mode::Ai
    } else {
        Mode::Basic
    };

    let request = ChangelogRequest {
        from_ref,
        to_ref,
        mode,
        verbose: cli.verbose,
        provider: ProviderConfig::from_env(cli.provider),
        ignore: IgnoreRules::with_defaults(&cli.ignore)?,
    };

    let completer = HttpCompleter::from_env();
    let changelog = generate_changelog(&source, &completer, &request, &mut std::io::stderr())
        .await
        .context("Generation failed")?;

    if let Some(path) = &cli.output {
        write_changelog(path, &changelog)?;
        eprintln!("✅ Changelog saved to: {}", path.display());
    } else {
        // stdout carries only the document so it can be redirected
        println!("{}", changelog);
    }

    if cli.webhook {
        // The changelog already exists, so delivery problems are reported but not fatal
        match cli.webhook_url.as_deref() {
            Some(url) if !url.trim().is_empty() => {
                eprintln!("📤 Sending changelog to WeCom...");
                match WeComNotifier::with_default_timeout(url) {
                    Ok(notifier) => match notifier.deliver(&changelog).await {
                        Ok(()) => eprintln!("✅ Message sent successfully"),
                        Err(e) => eprintln!("❌ Failed to send: {}", e),
                    },
                    Err(e) => eprintln!("❌ Failed to send: {}", e),
                }
            }
            _ => {
                eprintln!("⚠️ Webhook URL not configured");
                eprintln!(
                    "   Set {} environment variable or use --webhook-url",
                    WEBHOOK_URL_ENV_VAR
                );
            }
        }
    }

    eprintln!("🎉 Generation complete!");
    Ok(())
}

/// Print the tag table.
fn list_tags(source: &GitSource, date: Option<&str>, limit: usize) -> Result<()> {
    let mut tags: Vec<TagRecord> = source.list_tags().context("Failed to list tags")?;

    if tags.is_empty() {
        println!("❌ No tags found");
        return Ok(());
    }

    if let Some(fragment) = date {
        tags = filter_by_date(&tags, fragment);
        if tags.is_empty() {
            println!("❌ No tags found with date containing '{}'", fragment);
            return Ok(());
        }
    }

    let shown = limit.min(tags.len());
    println!(
        "\n📋 Available tags (total {}, showing latest {}):\n",
        tags.len(),
        shown
    );
    println!("{:<6}{:<50}{:<20}", "No.", "Tag Name", "Date");
    println!("{}", "-".repeat(76));
    for (i, tag) in tags.iter().take(limit).enumerate() {
        println!("{:<6}{:<50}{:<20}", i + 1, tag.name, tag.date);
    }

    println!("\n💡 Usage:");
    println!("   changelog-ai <tag1> <tag2>");
    println!("   changelog-ai --recent 2        # Basic mode");
    println!("   changelog-ai --recent 2 --ai   # AI-powered mode");

    Ok(())
}

/// Deliver an existing changelog (file or piped stdin) to the webhook.
async fn send_existing_changelog(cli: &Cli) -> Result<()> {
    let url = cli.webhook_url.clone().unwrap_or_default();
    let notifier = WeComNotifier::with_default_timeout(url)?;

    let changelog = match &cli.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display()))?,
        None => {
            let mut stdin = std::io::stdin();
            if stdin.is_terminal() {
                bail!(
                    "No input provided. Use --input to specify a file, or pipe content via stdin \
                     (e.g. cat CHANGELOG.md | changelog-ai --notify)"
                );
            }
            let mut buffer = String::new();
            stdin
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            buffer
        }
    };

    if changelog.trim().is_empty() {
        bail!("Empty changelog content");
    }

    println!("📤 Sending changelog to WeCom...");
    if cli.verbose {
        let preview: String = notifier.url().chars().take(50).collect();
        println!("   Webhook URL: {}...", preview);
        println!("   Content length: {} characters", changelog.chars().count());
    }

    notifier
        .deliver(&changelog)
        .await
        .context("Failed to send changelog")?;
    println!("✅ Message sent successfully");

    Ok(())
}
