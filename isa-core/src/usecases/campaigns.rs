use super::{
    campaign_content::{campaign_categories, encode_campaign_categories},
    campaign_status::refresh_campaign_status,
    prelude::*,
};
use crate::util::validate::{AutoCorrect as _, Validate as _};

#[rustfmt::skip]
#[derive(Debug, Clone)]
pub struct NewCampaign {
    pub name              : String,
    pub image             : Option<String>,
    /// JSON encoded list of category objects
    pub categories        : String,
    pub start_date        : CalendarDate,
    pub end_date          : Option<CalendarDate>,
    pub short_description : String,
    pub long_description  : String,
    pub campaign_type     : Option<bool>,
    pub depicts_metadata  : bool,
    pub captions_metadata : bool,
}

fn prepare_campaign(
    id: CampaignId,
    new: NewCampaign,
    manager: String,
    creation_date: Option<CalendarDate>,
    today: CalendarDate,
) -> Result<Campaign> {
    let NewCampaign {
        name,
        image,
        categories,
        start_date,
        end_date,
        short_description,
        long_description,
        campaign_type,
        depicts_metadata,
        captions_metadata,
    } = new;
    let categories = encode_campaign_categories(&campaign_categories(Some(&categories))?)?;
    let campaign = Campaign {
        id,
        name,
        image,
        categories,
        start_date,
        end_date,
        manager,
        closed: false,
        short_description,
        long_description,
        creation_date,
        campaign_type,
        depicts_metadata,
        captions_metadata,
    }
    .auto_correct();
    campaign.validate()?;
    Ok(refresh_campaign_status(campaign, today))
}

pub fn create_campaign<R>(repo: &R, new: NewCampaign, manager: &str) -> Result<Campaign>
where
    R: CampaignRepo,
{
    let manager = manager.trim();
    if manager.is_empty() {
        return Err(Error::Username);
    }
    let today = CalendarDate::today();
    let mut campaign = prepare_campaign(
        CampaignId::new(0),
        new,
        manager.to_owned(),
        Some(today),
        today,
    )?;
    campaign.id = repo.create_campaign(&campaign)?;
    log::info!(
        "Created campaign '{}' ({}) managed by {}",
        campaign.name,
        campaign.id,
        campaign.manager
    );
    Ok(campaign)
}

/// Replaces the contents of a campaign.
///
/// Only the manager of the campaign is allowed to do this.
pub fn update_campaign<R>(
    repo: &R,
    id: CampaignId,
    update: NewCampaign,
    username: &str,
) -> Result<Campaign>
where
    R: CampaignRepo,
{
    let old = repo.get_campaign(id)?;
    if old.manager != username.trim() {
        log::warn!(
            "{username} is not allowed to update campaign {id} of {}",
            old.manager
        );
        return Err(Error::Forbidden);
    }
    let campaign = prepare_campaign(
        id,
        update,
        old.manager,
        old.creation_date,
        CalendarDate::today(),
    )?;
    repo.update_campaign(&campaign)?;
    Ok(campaign)
}

pub fn get_campaign<R>(repo: &R, id: CampaignId) -> Result<Campaign>
where
    R: CampaignRepo,
{
    let campaign = repo.get_campaign(id)?;
    Ok(refresh_campaign_status(campaign, CalendarDate::today()))
}

pub fn all_campaigns<R>(repo: &R) -> Result<Vec<Campaign>>
where
    R: CampaignRepo,
{
    let today = CalendarDate::today();
    Ok(repo
        .all_campaigns()?
        .into_iter()
        .map(|campaign| refresh_campaign_status(campaign, today))
        .collect())
}
