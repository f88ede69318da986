use super::*;

impl CampaignRepo for DbReadOnly<'_> {
    fn create_campaign(&self, _campaign: &Campaign) -> Result<CampaignId> {
        Err(read_only_violation())
    }
    fn update_campaign(&self, _campaign: &Campaign) -> Result<()> {
        Err(read_only_violation())
    }

    fn get_campaign(&self, id: CampaignId) -> Result<Campaign> {
        get_campaign(&mut self.conn.borrow_mut(), id)
    }
    fn all_campaigns(&self) -> Result<Vec<Campaign>> {
        all_campaigns(&mut self.conn.borrow_mut())
    }
    fn count_campaigns(&self) -> Result<usize> {
        count_campaigns(&mut self.conn.borrow_mut())
    }
}

impl CampaignRepo for DbReadWrite<'_> {
    fn create_campaign(&self, campaign: &Campaign) -> Result<CampaignId> {
        create_campaign(&mut self.conn.borrow_mut(), campaign)
    }
    fn update_campaign(&self, campaign: &Campaign) -> Result<()> {
        update_campaign(&mut self.conn.borrow_mut(), campaign)
    }

    fn get_campaign(&self, id: CampaignId) -> Result<Campaign> {
        get_campaign(&mut self.conn.borrow_mut(), id)
    }
    fn all_campaigns(&self) -> Result<Vec<Campaign>> {
        all_campaigns(&mut self.conn.borrow_mut())
    }
    fn count_campaigns(&self) -> Result<usize> {
        count_campaigns(&mut self.conn.borrow_mut())
    }
}

impl CampaignRepo for DbConnection<'_> {
    fn create_campaign(&self, campaign: &Campaign) -> Result<CampaignId> {
        create_campaign(&mut self.conn.borrow_mut(), campaign)
    }
    fn update_campaign(&self, campaign: &Campaign) -> Result<()> {
        update_campaign(&mut self.conn.borrow_mut(), campaign)
    }

    fn get_campaign(&self, id: CampaignId) -> Result<Campaign> {
        get_campaign(&mut self.conn.borrow_mut(), id)
    }
    fn all_campaigns(&self) -> Result<Vec<Campaign>> {
        all_campaigns(&mut self.conn.borrow_mut())
    }
    fn count_campaigns(&self) -> Result<usize> {
        count_campaigns(&mut self.conn.borrow_mut())
    }
}

impl<'a> From<&'a Campaign> for models::NewCampaign<'a> {
    fn from(c: &'a Campaign) -> Self {
        let Campaign {
            id: _,
            name,
            image,
            categories,
            start_date,
            end_date,
            manager,
            closed,
            short_description,
            long_description,
            creation_date,
            campaign_type,
            depicts_metadata,
            captions_metadata,
        } = c;
        Self {
            campaign_name: name,
            campaign_image: image.as_deref(),
            categories,
            start_date: start_date.to_string(),
            end_date: end_date.map(|d| d.to_string()),
            manager,
            status: *closed,
            short_description,
            long_description,
            creation_date: creation_date.map(|d| d.to_string()),
            campaign_type: *campaign_type,
            depicts_metadata: *depicts_metadata,
            captions_metadata: *captions_metadata,
        }
    }
}

fn load_campaign(entity: models::CampaignEntity) -> Result<Campaign> {
    let models::CampaignEntity {
        id,
        campaign_name,
        campaign_image,
        categories,
        start_date,
        end_date,
        manager,
        status,
        short_description,
        long_description,
        creation_date,
        campaign_type,
        depicts_metadata,
        captions_metadata,
    } = entity;
    Ok(Campaign {
        id: id.into(),
        name: campaign_name,
        image: campaign_image,
        categories,
        start_date: parse_date(&start_date)?,
        end_date: end_date.as_deref().map(parse_date).transpose()?,
        manager,
        closed: status,
        short_description,
        long_description,
        creation_date: creation_date.as_deref().map(parse_date).transpose()?,
        campaign_type,
        depicts_metadata,
        captions_metadata,
    })
}

fn create_campaign(conn: &mut SqliteConnection, c: &Campaign) -> Result<CampaignId> {
    let new_campaign = models::NewCampaign::from(c);
    diesel::insert_into(schema::campaign::table)
        .values(&new_campaign)
        .execute(conn)
        .map_err(from_diesel_err)?;
    load_last_insert_rowid(conn).map(Into::into)
}

fn update_campaign(conn: &mut SqliteConnection, c: &Campaign) -> Result<()> {
    use schema::campaign::dsl;
    let changes = models::NewCampaign::from(c);
    let count = diesel::update(dsl::campaign.filter(dsl::id.eq(c.id.value())))
        .set(&changes)
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    Ok(())
}

fn get_campaign(conn: &mut SqliteConnection, id: CampaignId) -> Result<Campaign> {
    use schema::campaign::dsl;
    let entity = dsl::campaign
        .filter(dsl::id.eq(id.value()))
        .first::<models::CampaignEntity>(conn)
        .map_err(from_diesel_err)?;
    load_campaign(entity)
}

fn all_campaigns(conn: &mut SqliteConnection) -> Result<Vec<Campaign>> {
    use schema::campaign::dsl;
    dsl::campaign
        .order_by(dsl::id)
        .load::<models::CampaignEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_campaign)
        .collect()
}

fn count_campaigns(conn: &mut SqliteConnection) -> Result<usize> {
    use schema::campaign::dsl;
    Ok(count_to_usize(
        dsl::campaign
            .select(diesel::dsl::count(dsl::id))
            .first::<i64>(conn)
            .map_err(from_diesel_err)?,
    ))
}
