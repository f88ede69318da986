use super::{campaigns::get_campaign, prelude::*};

/// Appends a contribution after a successful edit and counts
/// it for the contributing user.
pub fn record_contribution<R>(repo: &R, contribution: &Contribution) -> Result<ContributionId>
where
    R: CampaignRepo + ContributionRepo + UserRepo,
{
    let campaign = get_campaign(repo, contribution.campaign_id)?;
    if campaign.closed {
        return Err(Error::CampaignClosed);
    }
    // Fails if the user doesn't exist
    repo.get_user(contribution.user_id)?;
    let id = repo.create_contribution(contribution)?;
    repo.increment_user_contributions(contribution.user_id)?;
    log::debug!(
        "Recorded contribution {id}: {} {} of {} in campaign {}",
        contribution.edit_action,
        contribution.edit_type,
        contribution.file,
        campaign.id
    );
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::{
        super::{login_user, tests::MockDb},
        *,
    };
    use isa_entities::builders::Builder as _;

    #[test]
    fn record_and_count() {
        let db = MockDb::default();
        let user = login_user(&db, "Alice", "en").unwrap();
        let campaign_id = db
            .create_campaign(&Campaign::build().name("Cats").finish())
            .unwrap();
        let contribution = Contribution::build()
            .user_id(user.id.value())
            .campaign_id(campaign_id.value())
            .caption("en", "A cat")
            .finish();
        record_contribution(&db, &contribution).unwrap();
        record_contribution(&db, &contribution).unwrap();
        assert_eq!(2, db.count_contributions_of_campaign(campaign_id).unwrap());
        assert_eq!(2, db.get_user(user.id).unwrap().contributions);
        assert_eq!(
            vec![contribution.clone(), contribution],
            db.load_contributions_of_campaign(campaign_id).unwrap()
        );
    }

    #[test]
    fn reject_contributions_to_closed_campaigns() {
        let db = MockDb::default();
        let user = login_user(&db, "Alice", "en").unwrap();
        let campaign_id = db
            .create_campaign(
                &Campaign::build()
                    .name("Past")
                    .start_date("2019-01-01")
                    .end_date(Some("2020-01-01"))
                    .finish(),
            )
            .unwrap();
        let contribution = Contribution::build()
            .user_id(user.id.value())
            .campaign_id(campaign_id.value())
            .finish();
        assert!(matches!(
            record_contribution(&db, &contribution),
            Err(Error::CampaignClosed)
        ));
        assert_eq!(0, db.get_user(user.id).unwrap().contributions);
    }

    #[test]
    fn reject_unknown_references() {
        let db = MockDb::default();
        let campaign_id = db
            .create_campaign(&Campaign::build().name("Cats").finish())
            .unwrap();
        let contribution = Contribution::build()
            .user_id(99)
            .campaign_id(campaign_id.value())
            .finish();
        assert!(matches!(
            record_contribution(&db, &contribution),
            Err(Error::Repo(RepoError::NotFound))
        ));
        let contribution = Contribution::build().campaign_id(99).finish();
        assert!(matches!(
            record_contribution(&db, &contribution),
            Err(Error::Repo(RepoError::NotFound))
        ));
        assert_eq!(0, db.count_contributions_of_campaign(campaign_id).unwrap());
    }
}
