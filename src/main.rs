use anyhow::{bail, Context, Result};
use gb4_wiki_gen::{
    cli::{Cli, Commands, UploadOpts},
    render::{equip_page, kit_page, mission_page, recipes, suit_page, BatchReport, Page},
    wiki::{publish_pages, WikiClient},
    Registry, DATA_SOURCES,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse_args();
    let registry =
        Registry::load(&cli.data_dir, DATA_SOURCES).context("failed to load data tables")?;

    match cli.command {
        Commands::Suit {
            suit_id,
            all,
            upload,
        } => {
            let pages = match (suit_id, all) {
                (Some(id), false) => vec![suit_page::page(&registry, &id, &upload.namespace)?],
                (None, true) => drain_report(suit_page::all_pages(&registry, &upload.namespace)?),
                _ => bail!("pass a suit id or --all, not both"),
            };
            emit(pages, &upload)?;
        }

        Commands::Kit {
            kit_id,
            all,
            upload,
        } => {
            let pages = match (kit_id, all) {
                (Some(id), false) => vec![kit_page::page(&registry, &id, &upload.namespace)?],
                (None, true) => drain_report(kit_page::all_pages(&registry, &upload.namespace)?),
                _ => bail!("pass a kit id or --all, not both"),
            };
            emit(pages, &upload)?;
        }

        Commands::Equip { upload } => {
            let pages = drain_report(equip_page::all_pages(&registry, &upload.namespace)?);
            emit(pages, &upload)?;
        }

        Commands::DerivesInto { part_id } => {
            let listing = recipes::derives_into_listing(&registry, &part_id)?;
            if listing.is_empty() {
                println!("No recipes consume {part_id}");
            } else {
                println!("{listing}");
            }
        }

        Commands::Missions => {
            print!("{}", mission_page::missions_listing(&registry)?);
        }

        Commands::MissionRewards { upload } => {
            let page = mission_page::rewards_page(&registry, &upload.namespace)?;
            emit(vec![page], &upload)?;
        }

        Commands::ListTables => {
            println!("Registered tables:\n");
            for name in registry.table_names() {
                println!("  {name}");
            }
        }
    }

    Ok(())
}

/// Log a batch's per-item failures and keep the rendered pages.
fn drain_report(report: BatchReport) -> Vec<Page> {
    for (id, err) in &report.failures {
        tracing::warn!(%id, error = %err, "item failed to render");
    }
    if !report.failures.is_empty() {
        tracing::warn!(
            rendered = report.pages.len(),
            failed = report.failures.len(),
            "batch finished with failures"
        );
    }
    report.pages
}

/// Print pages to stdout, or publish them when upload is requested.
fn emit(pages: Vec<Page>, opts: &UploadOpts) -> Result<()> {
    if pages.is_empty() {
        println!("No pages rendered.");
        return Ok(());
    }

    if opts.upload {
        let (Some(username), Some(password)) = (&opts.username, &opts.password) else {
            bail!("--upload requires --username and --password");
        };
        let client = WikiClient::new(&opts.wiki_url)?;
        client
            .bot_login(username, password)
            .context("wiki login failed")?;
        let report = publish_pages(&client, &pages, opts.jobs)?;

        println!("Published {} pages", report.published.len());
        for title in &report.published {
            println!("  {title}");
        }
        if !report.failed.is_empty() {
            println!("Failed {} pages", report.failed.len());
            for (title, error) in &report.failed {
                println!("  {title}: {error}");
            }
        }
    } else {
        for page in &pages {
            println!("{}", page.title);
            println!("{}", page.content);
        }
    }

    Ok(())
}
