use super::*;

fn contributor_id(
    connections: &sqlite::Connections,
    username: &str,
    campaign_id: CampaignId,
) -> Result<UserId> {
    let db = connections.shared()?;
    let campaign = usecases::get_campaign(&db, campaign_id)?;
    if campaign.closed {
        info!("Rejecting edit by {username}: campaign {campaign_id} is closed");
        return Err(usecases::Error::CampaignClosed.into());
    }
    Ok(usecases::get_user_by_name(&db, username)?.id)
}

/// Performs an edit of a media file on behalf of a campaign
/// participant and records it as a contribution to the campaign.
///
/// Nothing is recorded if the wiki rejects the edit.
pub fn submit_edit<G>(
    connections: &sqlite::Connections,
    wiki: &G,
    ctx: &usecases::EditContext,
    campaign_id: CampaignId,
    file: &FileName,
    edit: &usecases::MediaEdit,
) -> Result<RevisionId>
where
    G: WikiEditGateway,
{
    let user_id = contributor_id(connections, &ctx.username, campaign_id)?;

    let session = usecases::authorize_edit(wiki, &ctx.credentials)?;
    let rev_id = usecases::submit_edit(wiki, &session, &ctx.username, &edit.edit_params())?;

    let edit_content = edit.edit_content();
    let contribution = Contribution {
        user_id,
        campaign_id,
        file: file.clone(),
        edit_type: edit_content.edit_type(),
        edit_action: edit.edit_action(),
        country: ctx.country.clone(),
        edit_content,
    };
    // The edit has already been applied and can't be undone
    // if recording fails.
    connections
        .exclusive()?
        .transaction(|conn| usecases::record_contribution(conn, &contribution))
        .inspect_err(|err| {
            error!(
                "Failed to record revision {rev_id} of {file} by {}: {err}",
                ctx.username
            );
        })?;
    Ok(rev_id)
}
