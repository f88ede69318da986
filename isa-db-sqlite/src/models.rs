#![allow(clippy::extra_unused_lifetimes)]

// NOTE:
// All dates are stored as ISO 8601 text, i.e. `YYYY-MM-DD`.

use super::schema::*;

#[derive(Insertable)]
#[diesel(table_name = user)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub pref_lang: &'a str,
    pub contributions: i64,
}

#[derive(Queryable)]
pub struct UserEntity {
    pub id: i64,
    pub username: String,
    pub pref_lang: String,
    pub contributions: i64,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = campaign)]
#[diesel(treat_none_as_null = true)]
pub struct NewCampaign<'a> {
    pub campaign_name: &'a str,
    pub campaign_image: Option<&'a str>,
    pub categories: &'a str,
    pub start_date: String,
    pub end_date: Option<String>,
    pub manager: &'a str,
    pub status: bool,
    pub short_description: &'a str,
    pub long_description: &'a str,
    pub creation_date: Option<String>,
    pub campaign_type: Option<bool>,
    pub depicts_metadata: bool,
    pub captions_metadata: bool,
}

#[derive(Queryable)]
pub struct CampaignEntity {
    pub id: i64,
    pub campaign_name: String,
    pub campaign_image: Option<String>,
    pub categories: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub manager: String,
    pub status: bool,
    pub short_description: String,
    pub long_description: String,
    pub creation_date: Option<String>,
    pub campaign_type: Option<bool>,
    pub depicts_metadata: bool,
    pub captions_metadata: bool,
}

#[derive(Insertable)]
#[diesel(table_name = contribution)]
pub struct NewContribution<'a> {
    pub user_id: i64,
    pub campaign_id: i64,
    pub file: &'a str,
    pub edit_type: &'a str,
    pub edit_action: &'a str,
    pub country: &'a str,
    pub edit_content: String,
}

#[derive(Queryable)]
pub struct ContributionEntity {
    pub id: i64,
    pub user_id: i64,
    pub campaign_id: i64,
    pub file: String,
    pub edit_type: String,
    pub edit_action: String,
    pub country: String,
    pub edit_content: String,
}
