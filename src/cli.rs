use anyhow::{anyhow, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use isa_application::prelude as flows;
use isa_core::{
    entities::*,
    gateways::wiki::{OAuthCredentials, OAuthToken},
    usecases,
};
use isa_db_sqlite::Connections;
use isa_gateways::mediawiki::MediaWiki;
use std::{fs, path::PathBuf};

use crate::config::Config;

#[derive(Debug, Parser)]
#[command(name = "isa", version, about = "Campaign backend for structured data on Wikimedia Commons")]
pub struct Args {
    /// Configuration file [default: isa.toml]
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the embedded database migrations
    Migrate,
    /// Create a new campaign
    CreateCampaign(CreateCampaignArgs),
    /// Print whether a campaign is open or closed
    CampaignStatus {
        #[arg(long)]
        campaign_id: CampaignId,
    },
    /// Print the names of all media files of a campaign
    CampaignImages {
        #[arg(long)]
        campaign_id: CampaignId,
    },
    /// Write the statistics of a campaign into CSV files
    ExportStats {
        #[arg(long)]
        campaign_id: CampaignId,
        /// [default: the configured output directory]
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },
    /// Edit a media file and record the contribution
    SubmitEdit(SubmitEditArgs),
}

#[derive(Debug, ClapArgs)]
pub struct CreateCampaignArgs {
    #[arg(long)]
    name: String,
    /// Username of the campaign manager
    #[arg(long)]
    manager: String,
    /// Category with the media files of the campaign (repeatable)
    #[arg(long = "category", value_name = "NAME", required = true)]
    categories: Vec<String>,
    /// Levels of sub-categories to include
    #[arg(
        long,
        default_value_t = 0,
        value_parser = clap::value_parser!(u32).range(..=i64::from(usecases::MAX_CATEGORY_DEPTH))
    )]
    depth: u32,
    /// [default: today]
    #[arg(long, value_name = "YYYY-MM-DD")]
    start_date: Option<String>,
    #[arg(long, value_name = "YYYY-MM-DD")]
    end_date: Option<String>,
    #[arg(long, default_value = "")]
    description: String,
}

#[derive(Debug, ClapArgs)]
pub struct SubmitEditArgs {
    #[arg(long)]
    campaign_id: CampaignId,
    #[arg(long)]
    username: String,
    #[arg(long, default_value = "en")]
    pref_lang: String,
    /// Country code of the contributor
    #[arg(long, default_value = "")]
    country: String,
    /// Title of the media file, e.g. "File:Black cat.jpg"
    #[arg(long)]
    title: String,
    #[arg(long, env = "ISA_ACCESS_KEY", hide_env_values = true)]
    access_key: String,
    #[arg(long, env = "ISA_ACCESS_SECRET", hide_env_values = true)]
    access_secret: String,
    #[command(subcommand)]
    edit: EditCommand,
}

#[derive(Debug, Subcommand)]
enum EditCommand {
    /// Add a depicts statement
    AddDepicts {
        /// Media id of the file, e.g. M1234
        #[arg(long)]
        media_id: String,
        /// Wikidata item, e.g. Q146
        #[arg(long)]
        item: String,
        #[arg(long)]
        prominent: bool,
    },
    /// Remove a depicts statement
    RemoveDepicts {
        #[arg(long)]
        claim_id: String,
        #[arg(long)]
        item: String,
        #[arg(long)]
        prominent: bool,
    },
    /// Set the caption in a language
    SetCaption {
        #[arg(long)]
        media_id: String,
        #[arg(long)]
        language: String,
        #[arg(long)]
        text: String,
    },
}

impl From<EditCommand> for usecases::MediaEdit {
    fn from(from: EditCommand) -> Self {
        match from {
            EditCommand::AddDepicts {
                media_id,
                item,
                prominent,
            } => Self::AddDepicts {
                media_id,
                item,
                prominent,
            },
            EditCommand::RemoveDepicts {
                claim_id,
                item,
                prominent,
            } => Self::RemoveDepicts {
                claim_id,
                item,
                prominent,
            },
            EditCommand::SetCaption {
                media_id,
                language,
                text,
            } => Self::SetCaption {
                media_id,
                language,
                text,
            },
        }
    }
}

fn parse_date(date: &str) -> Result<CalendarDate> {
    Ok(CalendarDate::parse(date)?)
}

fn mediawiki(cfg: &Config) -> Result<MediaWiki> {
    MediaWiki::new(&cfg.wiki.api_url, cfg.wiki.request_timeout)
}

fn create_campaign(connections: &Connections, args: CreateCampaignArgs) -> Result<()> {
    let CreateCampaignArgs {
        name,
        manager,
        categories,
        depth,
        start_date,
        end_date,
        description,
    } = args;
    let categories: Vec<_> = categories
        .iter()
        .map(|name| CampaignCategory {
            depth,
            ..usecases::build_category_object(name)
        })
        .collect();
    let new_campaign = usecases::NewCampaign {
        name,
        image: None,
        categories: usecases::encode_campaign_categories(&categories)?,
        start_date: start_date
            .as_deref()
            .map(parse_date)
            .transpose()?
            .unwrap_or_else(CalendarDate::today),
        end_date: end_date.as_deref().map(parse_date).transpose()?,
        short_description: description.clone(),
        long_description: description,
        campaign_type: None,
        depicts_metadata: true,
        captions_metadata: true,
    };
    let campaign = connections
        .exclusive()?
        .transaction(|conn| usecases::create_campaign(conn, new_campaign, &manager))?;
    println!("{}", campaign.id);
    Ok(())
}

fn submit_edit(connections: &Connections, cfg: &Config, args: SubmitEditArgs) -> Result<()> {
    let SubmitEditArgs {
        campaign_id,
        username,
        pref_lang,
        country,
        title,
        access_key,
        access_secret,
        edit,
    } = args;
    let consumer = cfg
        .wiki
        .consumer
        .clone()
        .ok_or_else(|| anyhow!("No OAuth consumer configured"))?;
    let file = usecases::file_name_from_title(&title)?;
    let user = connections
        .exclusive()?
        .transaction(|conn| usecases::login_user(conn, &username, &pref_lang))?;
    let ctx = usecases::EditContext {
        username: user.username,
        credentials: OAuthCredentials {
            consumer,
            access: OAuthToken::new(access_key, access_secret),
        },
        country,
    };
    let rev_id = flows::submit_edit(
        connections,
        &mediawiki(cfg)?,
        &ctx,
        campaign_id,
        &file,
        &edit.into(),
    )?;
    println!("{rev_id}");
    Ok(())
}

pub fn run(cfg: Config, command: Command) -> Result<()> {
    let connections = Connections::init(&cfg.db.conn_sqlite, cfg.db.conn_pool_size)?;
    isa_db_sqlite::run_embedded_database_migrations(connections.exclusive()?)?;

    match command {
        Command::Migrate => {}
        Command::CreateCampaign(args) => create_campaign(&connections, args)?,
        Command::CampaignStatus { campaign_id } => {
            let campaign = usecases::get_campaign(&connections.shared()?, campaign_id)?;
            println!("{}", if campaign.closed { "closed" } else { "open" });
        }
        Command::CampaignImages { campaign_id } => {
            let campaign = usecases::get_campaign(&connections.shared()?, campaign_id)?;
            let images = usecases::campaign_images(
                &mediawiki(&cfg)?,
                &campaign,
                &cfg.images.allowed_extensions,
            )?;
            for image in images {
                println!("{image}");
            }
        }
        Command::ExportStats {
            campaign_id,
            output_dir,
        } => {
            let output_dir = output_dir.unwrap_or(cfg.stats.output_dir);
            fs::create_dir_all(&output_dir)?;
            let files = flows::export_campaign_stats(&connections, campaign_id, &output_dir)?;
            println!("{}", files.country_stats);
            println!("{}", files.contributor_stats);
            println!("{}", files.all_stats);
        }
        Command::SubmitEdit(args) => submit_edit(&connections, &cfg, args)?,
    }
    Ok(())
}
