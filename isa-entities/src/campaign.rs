use crate::{id::CampaignId, time::CalendarDate};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Campaign {
    pub id: CampaignId,
    pub name: String,
    /// Cover image (file name on the wiki)
    pub image: Option<String>,
    /// JSON encoded list of [`CampaignCategory`] objects
    pub categories: String,
    pub start_date: CalendarDate,
    pub end_date: Option<CalendarDate>,
    /// Username of the campaign manager
    pub manager: String,
    /// `true` if the campaign is closed.
    ///
    /// The stored value might be outdated and needs to be
    /// recomputed from the end date on every read.
    pub closed: bool,
    pub short_description: String,
    pub long_description: String,
    pub creation_date: Option<CalendarDate>,
    pub campaign_type: Option<bool>,
    pub depicts_metadata: bool,
    pub captions_metadata: bool,
}

/// A wiki category whose members are the media files of a campaign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignCategory {
    pub name: String,
    /// How many levels of sub-categories are included.
    pub depth: u32,
}

impl CampaignCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            depth: 0,
        }
    }
}
