use super::*;
use std::{
    fs::File,
    io,
    path::{Component, Path},
};
use usecases::{
    StatsRecord, ALL_STATS_FIELDS, CONTRIBUTOR_STATS_FIELDS, COUNTRY_STATS_FIELDS,
};

pub const COUNTRY_STATS_SUFFIX: &str = "_country_stats.csv";
pub const CONTRIBUTOR_STATS_SUFFIX: &str = "_stats.csv";
pub const ALL_STATS_SUFFIX: &str = "_all_stats.csv";

/// Names of the files written by [`export_campaign_stats`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsFiles {
    pub country_stats: String,
    pub contributor_stats: String,
    pub all_stats: String,
}

pub fn stats_file_name(campaign_name: &str, suffix: &str) -> String {
    format!("{}{suffix}", campaign_name.replace(' ', "_"))
}

/// Writes `rows` as CSV with a header line into `dir`
/// and returns the name of the file.
///
/// An existing file is overwritten. Fields that a row
/// doesn't provide are left empty. The file name must
/// not point outside of `dir`.
pub fn write_stats_csv<R>(
    dir: &Path,
    campaign_name: &str,
    suffix: &str,
    fields: &[&str],
    rows: &[R],
) -> Result<String>
where
    R: StatsRecord,
{
    let file_name = stats_file_name(campaign_name, suffix);
    let mut components = Path::new(&file_name).components();
    if !matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) {
        warn!("Refusing to write statistics into {file_name}");
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Invalid statistics file name: {file_name}"),
        )
        .into());
    }
    let path = dir.join(&file_name);
    let file = File::create(&path).inspect_err(|err| {
        warn!("Unable to create {}: {err}", path.display());
    })?;
    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(fields)?;
    for row in rows {
        writer.write_record(
            fields
                .iter()
                .map(|field| row.value_of(field).unwrap_or_default()),
        )?;
    }
    writer.flush()?;
    debug!("Wrote {} rows into {}", rows.len(), path.display());
    Ok(file_name)
}

/// Writes the country, contributor and contribution
/// statistics of a campaign into `dir`.
pub fn export_campaign_stats(
    connections: &sqlite::Connections,
    campaign_id: CampaignId,
    dir: &Path,
) -> Result<StatsFiles> {
    let (campaign, records) = {
        let db = connections.shared()?;
        let campaign = usecases::get_campaign(&db, campaign_id)?;
        let records = usecases::campaign_contribution_records(&db, campaign_id)?;
        (campaign, records)
    };
    let name = &campaign.name;
    let country_stats = write_stats_csv(
        dir,
        name,
        COUNTRY_STATS_SUFFIX,
        &COUNTRY_STATS_FIELDS,
        &usecases::country_stats(&records),
    )?;
    let contributor_stats = write_stats_csv(
        dir,
        name,
        CONTRIBUTOR_STATS_SUFFIX,
        &CONTRIBUTOR_STATS_FIELDS,
        &usecases::contributor_stats(&records),
    )?;
    let all_stats = write_stats_csv(dir, name, ALL_STATS_SUFFIX, &ALL_STATS_FIELDS, &records)?;
    info!(
        "Exported statistics of {} contributions to campaign '{name}'",
        records.len()
    );
    Ok(StatsFiles {
        country_stats,
        contributor_stats,
        all_stats,
    })
}
