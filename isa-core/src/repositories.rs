// Low-level database access traits.
// Each repository is responsible for a single entity.
// Related entities are only referenced by their id and
// never modified or loaded by another repository.

use crate::entities::*;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The requested object could not be found")]
    NotFound,
    #[error("The object already exists")]
    AlreadyExists,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

type Result<T> = std::result::Result<T, Error>;

pub trait UserRepo {
    /// Stores a new user with zero contributions.
    ///
    /// The `id` and `contributions` of the given user are ignored.
    fn create_user(&self, user: &User) -> Result<UserId>;
    fn update_user_pref_lang(&self, id: UserId, pref_lang: &str) -> Result<()>;
    fn increment_user_contributions(&self, id: UserId) -> Result<()>;

    fn get_user(&self, id: UserId) -> Result<User>;
    fn get_user_by_name(&self, username: &str) -> Result<User>;
    fn try_get_user_by_name(&self, username: &str) -> Result<Option<User>>;

    fn count_users(&self) -> Result<usize>;
}

pub trait CampaignRepo {
    /// Stores a new campaign.
    ///
    /// The `id` of the given campaign is ignored.
    fn create_campaign(&self, campaign: &Campaign) -> Result<CampaignId>;
    fn update_campaign(&self, campaign: &Campaign) -> Result<()>;

    fn get_campaign(&self, id: CampaignId) -> Result<Campaign>;
    fn all_campaigns(&self) -> Result<Vec<Campaign>>;

    fn count_campaigns(&self) -> Result<usize>;
}

pub trait ContributionRepo {
    fn create_contribution(&self, contribution: &Contribution) -> Result<ContributionId>;

    // In the order of insertion
    fn load_contributions_of_campaign(&self, campaign_id: CampaignId)
        -> Result<Vec<Contribution>>;

    fn count_contributions_of_campaign(&self, campaign_id: CampaignId) -> Result<usize>;
}
