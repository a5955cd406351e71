use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gb4-wiki-gen")]
#[command(version, about = "Generate wiki pages from extracted Gundam Breaker 4 data tables")]
pub struct Cli {
    /// Directory containing the extracted game data (the GB4/ tree)
    pub data_dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct UploadOpts {
    /// Publish rendered pages through the wiki edit API
    #[arg(long)]
    pub upload: bool,

    /// Bot account name for the wiki login
    #[arg(long)]
    pub username: Option<String>,

    /// Bot account password
    #[arg(long)]
    pub password: Option<String>,

    /// Base URL of the wiki's script path
    #[arg(long, default_value = "https://gundambreaker.miraheze.org/w/")]
    pub wiki_url: String,

    /// Namespace prefix for generated pages
    #[arg(long, default_value = "Generated")]
    pub namespace: String,

    /// Number of concurrent publish workers
    #[arg(long, default_value_t = 4)]
    pub jobs: usize,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a suit page, or all suit pages with --all
    Suit {
        /// Suit id, e.g. HG_1790
        suit_id: Option<String>,

        /// Render every suit with a display name
        #[arg(long)]
        all: bool,

        #[command(flatten)]
        upload: UploadOpts,
    },

    /// Render a kit page, or all kit pages with --all
    Kit {
        /// Gunpla box id
        kit_id: Option<String>,

        /// Render every kit with a display name
        #[arg(long)]
        all: bool,

        #[command(flatten)]
        upload: UploadOpts,
    },

    /// Render every collected equipment page
    Equip {
        #[command(flatten)]
        upload: UploadOpts,
    },

    /// List the synthesis recipes that consume a part
    DerivesInto {
        /// Part id, e.g. a head or leg part
        part_id: String,
    },

    /// List missions grouped by operation
    Missions,

    /// Render the mission rewards page
    MissionRewards {
        #[command(flatten)]
        upload: UploadOpts,
    },

    /// List all registered table names
    ListTables,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
