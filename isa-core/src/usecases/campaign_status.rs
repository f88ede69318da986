use super::prelude::*;

/// Checks if a campaign has ended before the given day.
///
/// A missing or unparsable end date never closes a campaign.
pub fn is_campaign_closed(end_date: Option<&str>, today: CalendarDate) -> bool {
    let end_date = end_date.and_then(|date| CalendarDate::parse(date).ok());
    campaign_closed_at(end_date, today)
}

/// A campaign is closed on the day after its end date.
pub fn campaign_closed_at(end_date: Option<CalendarDate>, today: CalendarDate) -> bool {
    end_date.map(|end| end < today).unwrap_or(false)
}

/// Recomputes the stored status of a campaign.
pub(crate) fn refresh_campaign_status(mut campaign: Campaign, today: CalendarDate) -> Campaign {
    campaign.closed = campaign_closed_at(campaign.end_date, today);
    campaign
}
