use crate::{gateways::wiki, repositories, util::validate::CampaignInvalidation};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unknown country code: {0}")]
    CountryNotFound(String),
    #[error("Malformed campaign categories: {0}")]
    Categories(#[source] serde_json::Error),
    #[error("Media title without namespace: {0}")]
    MalformedTitle(String),
    #[error("The campaign name is empty")]
    CampaignName,
    #[error("The campaign name must not contain a path")]
    CampaignNameWithPath,
    #[error("The end date is before the start")]
    EndDateBeforeStart,
    #[error("The campaign is closed")]
    CampaignClosed,
    #[error("The username is empty")]
    Username,
    #[error("This is not allowed")]
    Forbidden,
    #[error("Unable to encode the claim: {0}")]
    Claim(#[source] serde_json::Error),
    #[error(transparent)]
    Wiki(#[from] wiki::Error),
    #[error(transparent)]
    Repo(#[from] repositories::Error),
}

impl From<CampaignInvalidation> for Error {
    fn from(err: CampaignInvalidation) -> Self {
        match err {
            CampaignInvalidation::Name => Self::CampaignName,
            CampaignInvalidation::NameWithPath => Self::CampaignNameWithPath,
            CampaignInvalidation::EndDateBeforeStart => Self::EndDateBeforeStart,
        }
    }
}
