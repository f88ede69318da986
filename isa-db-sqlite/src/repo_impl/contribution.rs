use super::*;

impl ContributionRepo for DbReadOnly<'_> {
    fn create_contribution(&self, _contribution: &Contribution) -> Result<ContributionId> {
        Err(read_only_violation())
    }

    fn load_contributions_of_campaign(&self, campaign_id: CampaignId) -> Result<Vec<Contribution>> {
        load_contributions_of_campaign(&mut self.conn.borrow_mut(), campaign_id)
    }
    fn count_contributions_of_campaign(&self, campaign_id: CampaignId) -> Result<usize> {
        count_contributions_of_campaign(&mut self.conn.borrow_mut(), campaign_id)
    }
}

impl ContributionRepo for DbReadWrite<'_> {
    fn create_contribution(&self, contribution: &Contribution) -> Result<ContributionId> {
        create_contribution(&mut self.conn.borrow_mut(), contribution)
    }

    fn load_contributions_of_campaign(&self, campaign_id: CampaignId) -> Result<Vec<Contribution>> {
        load_contributions_of_campaign(&mut self.conn.borrow_mut(), campaign_id)
    }
    fn count_contributions_of_campaign(&self, campaign_id: CampaignId) -> Result<usize> {
        count_contributions_of_campaign(&mut self.conn.borrow_mut(), campaign_id)
    }
}

impl ContributionRepo for DbConnection<'_> {
    fn create_contribution(&self, contribution: &Contribution) -> Result<ContributionId> {
        create_contribution(&mut self.conn.borrow_mut(), contribution)
    }

    fn load_contributions_of_campaign(&self, campaign_id: CampaignId) -> Result<Vec<Contribution>> {
        load_contributions_of_campaign(&mut self.conn.borrow_mut(), campaign_id)
    }
    fn count_contributions_of_campaign(&self, campaign_id: CampaignId) -> Result<usize> {
        count_contributions_of_campaign(&mut self.conn.borrow_mut(), campaign_id)
    }
}

fn load_contribution(entity: models::ContributionEntity) -> Result<Contribution> {
    let models::ContributionEntity {
        id,
        user_id,
        campaign_id,
        file,
        edit_type,
        edit_action,
        country,
        edit_content,
    } = entity;
    let edit_type = edit_type
        .parse::<EditType>()
        .map_err(|_| anyhow!("Invalid edit type of contribution {id}: {edit_type}"))?;
    let edit_action = edit_action
        .parse::<EditAction>()
        .map_err(|_| anyhow!("Invalid edit action of contribution {id}: {edit_action}"))?;
    let edit_content = EditContent::decode(edit_type, &edit_content)
        .map_err(|err| anyhow!("Invalid edit content of contribution {id}: {err}"))?;
    Ok(Contribution {
        user_id: user_id.into(),
        campaign_id: campaign_id.into(),
        file: FileName::new_unchecked(file),
        edit_type,
        edit_action,
        country,
        edit_content,
    })
}

fn create_contribution(conn: &mut SqliteConnection, c: &Contribution) -> Result<ContributionId> {
    if c.edit_type != c.edit_content.edit_type() {
        return Err(anyhow!(
            "Edit type {} doesn't match the edit content",
            c.edit_type
        )
        .into());
    }
    let new_contribution = models::NewContribution {
        user_id: c.user_id.value(),
        campaign_id: c.campaign_id.value(),
        file: c.file.as_str(),
        edit_type: c.edit_type.as_ref(),
        edit_action: c.edit_action.as_ref(),
        country: &c.country,
        edit_content: c.edit_content.encode(),
    };
    diesel::insert_into(schema::contribution::table)
        .values(&new_contribution)
        .execute(conn)
        .map_err(|err| {
            log::warn!(
                "Failed to insert contribution of user {} into campaign {}: {err}",
                c.user_id,
                c.campaign_id
            );
            from_diesel_err(err)
        })?;
    load_last_insert_rowid(conn).map(Into::into)
}

fn load_contributions_of_campaign(
    conn: &mut SqliteConnection,
    campaign_id: CampaignId,
) -> Result<Vec<Contribution>> {
    use schema::contribution::dsl;
    dsl::contribution
        .filter(dsl::campaign_id.eq(campaign_id.value()))
        .order_by(dsl::id)
        .load::<models::ContributionEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_contribution)
        .collect()
}

fn count_contributions_of_campaign(
    conn: &mut SqliteConnection,
    campaign_id: CampaignId,
) -> Result<usize> {
    use schema::contribution::dsl;
    Ok(count_to_usize(
        dsl::contribution
            .select(diesel::dsl::count(dsl::id))
            .filter(dsl::campaign_id.eq(campaign_id.value()))
            .first::<i64>(conn)
            .map_err(from_diesel_err)?,
    ))
}
