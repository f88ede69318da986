mod authorize_edit;
mod campaign_content;
mod campaign_stats;
mod campaign_status;
mod campaigns;
mod category_tree;
mod country;
mod error;
mod login;
mod media;
mod record_contribution;
mod submit_edit;


pub use self::{
    authorize_edit::*, campaign_content::*, campaign_stats::*, campaign_status::*, campaigns::*,
    category_tree::*, country::*, error::Error, login::*, media::*, record_contribution::*,
    submit_edit::*,
};

mod prelude {
    pub use super::error::Error;
    pub type Result<T> = std::result::Result<T, Error>;
    pub use crate::{
        entities::*,
        gateways::wiki::{
            CategoryMember, CategoryMemberType, CategoryMembersGateway, CategoryMembersResponse,
            EditFormParams, EditToken, OAuthCredentials, OAuthToken, WikiEditGateway,
        },
        repositories::{Error as RepoError, *},
    };
    pub use super::authorize_edit::EditSession;
}
