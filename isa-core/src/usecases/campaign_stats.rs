use std::collections::{hash_map::Entry, BTreeMap, HashMap, HashSet};

use super::{country::country_name_from_code, prelude::*};

pub const ALL_STATS_FIELDS: [&str; 9] = [
    "username",
    "file",
    "edit_type",
    "edit_action",
    "country",
    "depict_item",
    "depict_prominent",
    "caption_text",
    "caption_language",
];

pub const COUNTRY_STATS_FIELDS: [&str; 3] = ["country", "contributors", "contributions"];

pub const CONTRIBUTOR_STATS_FIELDS: [&str; 5] = [
    "username",
    "images_improved",
    "depicts",
    "captions",
    "contributions",
];

/// A row of a statistics report that is addressed by field names.
pub trait StatsRecord {
    /// The textual value of a field or `None` if the
    /// record doesn't have such a field.
    fn value_of(&self, field: &str) -> Option<String>;
}

/// A single contribution flattened into report columns.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributionRecord {
    pub username         : String,
    pub file             : String,
    pub edit_type        : EditType,
    pub edit_action      : EditAction,
    pub country          : String,
    pub depict_item      : Option<String>,
    pub depict_prominent : Option<bool>,
    pub caption_text     : Option<String>,
    pub caption_language : Option<String>,
}

impl ContributionRecord {
    pub fn new(username: String, contribution: Contribution) -> Self {
        let Contribution {
            file,
            edit_type,
            edit_action,
            country,
            edit_content,
            ..
        } = contribution;
        let mut record = Self {
            username,
            file: file.into_string(),
            edit_type,
            edit_action,
            country,
            depict_item: None,
            depict_prominent: None,
            caption_text: None,
            caption_language: None,
        };
        match edit_content {
            EditContent::Depicts { item, prominent } => {
                record.depict_item = Some(item);
                record.depict_prominent = Some(prominent);
            }
            EditContent::Caption { language, text } => {
                record.caption_text = Some(text);
                record.caption_language = Some(language);
            }
        }
        record
    }
}

impl StatsRecord for ContributionRecord {
    fn value_of(&self, field: &str) -> Option<String> {
        let value = match field {
            "username" => self.username.clone(),
            "file" => self.file.clone(),
            "edit_type" => self.edit_type.to_string(),
            "edit_action" => self.edit_action.to_string(),
            "country" => self.country.clone(),
            "depict_item" => self.depict_item.clone().unwrap_or_default(),
            "depict_prominent" => self
                .depict_prominent
                .map(|p| p.to_string())
                .unwrap_or_default(),
            "caption_text" => self.caption_text.clone().unwrap_or_default(),
            "caption_language" => self.caption_language.clone().unwrap_or_default(),
            _ => return None,
        };
        Some(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryStats {
    /// Display name of the country
    pub country: String,
    pub contributors: usize,
    pub contributions: usize,
}

impl StatsRecord for CountryStats {
    fn value_of(&self, field: &str) -> Option<String> {
        match field {
            "country" => Some(self.country.clone()),
            "contributors" => Some(self.contributors.to_string()),
            "contributions" => Some(self.contributions.to_string()),
            _ => None,
        }
    }
}

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributorStats {
    pub username        : String,
    /// Number of distinct files
    pub images_improved : usize,
    pub depicts         : usize,
    pub captions        : usize,
    pub contributions   : usize,
}

impl StatsRecord for ContributorStats {
    fn value_of(&self, field: &str) -> Option<String> {
        let value = match field {
            "username" => self.username.clone(),
            "images_improved" => self.images_improved.to_string(),
            "depicts" => self.depicts.to_string(),
            "captions" => self.captions.to_string(),
            "contributions" => self.contributions.to_string(),
            _ => return None,
        };
        Some(value)
    }
}

/// Loads all contributions of a campaign as flat records
/// in the order of their insertion.
pub fn campaign_contribution_records<R>(
    repo: &R,
    campaign_id: CampaignId,
) -> Result<Vec<ContributionRecord>>
where
    R: ContributionRepo + UserRepo,
{
    let contributions = repo.load_contributions_of_campaign(campaign_id)?;
    let mut usernames: HashMap<UserId, String> = HashMap::new();
    let mut records = Vec::with_capacity(contributions.len());
    for contribution in contributions {
        let username = match usernames.entry(contribution.user_id) {
            Entry::Occupied(entry) => entry.get().clone(),
            Entry::Vacant(entry) => entry
                .insert(repo.get_user(contribution.user_id)?.username)
                .clone(),
        };
        records.push(ContributionRecord::new(username, contribution));
    }
    Ok(records)
}

fn country_display_name(code: &str) -> String {
    if code.trim().is_empty() {
        return String::new();
    }
    country_name_from_code(code)
        .map(ToOwned::to_owned)
        .unwrap_or_else(|_| {
            log::debug!("Reporting unknown country code '{code}' as is");
            code.to_owned()
        })
}

/// Number of contributors and contributions per country,
/// the most active countries first.
pub fn country_stats(records: &[ContributionRecord]) -> Vec<CountryStats> {
    let mut by_country: BTreeMap<String, (HashSet<&str>, usize)> = BTreeMap::new();
    for record in records {
        let (contributors, contributions) = by_country
            .entry(country_display_name(&record.country))
            .or_default();
        contributors.insert(&record.username);
        *contributions += 1;
    }
    let mut stats: Vec<_> = by_country
        .into_iter()
        .map(|(country, (contributors, contributions))| CountryStats {
            country,
            contributors: contributors.len(),
            contributions,
        })
        .collect();
    stats.sort_by(|a, b| {
        b.contributions
            .cmp(&a.contributions)
            .then_with(|| a.country.cmp(&b.country))
    });
    stats
}

/// Activity per contributor, the most active contributors first.
pub fn contributor_stats(records: &[ContributionRecord]) -> Vec<ContributorStats> {
    let mut by_username: BTreeMap<&str, (HashSet<&str>, usize, usize)> = BTreeMap::new();
    for record in records {
        let (files, depicts, captions) = by_username.entry(&record.username).or_default();
        files.insert(&record.file);
        match record.edit_type {
            EditType::Depicts => *depicts += 1,
            EditType::Caption => *captions += 1,
        }
    }
    let mut stats: Vec<_> = by_username
        .into_iter()
        .map(|(username, (files, depicts, captions))| ContributorStats {
            username: username.to_owned(),
            images_improved: files.len(),
            depicts,
            captions,
            contributions: depicts + captions,
        })
        .collect();
    stats.sort_by(|a, b| {
        b.contributions
            .cmp(&a.contributions)
            .then_with(|| a.username.cmp(&b.username))
    });
    stats
}

#[cfg(test)]
mod tests {
    use super::{
        super::{login_user, tests::MockDb},
        *,
    };
    use isa_entities::builders::Builder as _;

    fn record(username: &str, file: &str, country: &str, content: EditContent) -> ContributionRecord {
        ContributionRecord {
            username: username.into(),
            file: file.into(),
            edit_type: content.edit_type(),
            edit_action: EditAction::Add,
            country: country.into(),
            depict_item: None,
            depict_prominent: None,
            caption_text: None,
            caption_language: None,
        }
    }

    fn depicts() -> EditContent {
        EditContent::Depicts {
            item: "Q1".into(),
            prominent: false,
        }
    }

    fn caption() -> EditContent {
        EditContent::Caption {
            language: "en".into(),
            text: "A cat".into(),
        }
    }

    #[test]
    fn flatten_contributions() {
        let depicts = ContributionRecord::new(
            "Alice".into(),
            Contribution::build()
                .file("Cat.jpg")
                .country("FR")
                .depicts("Q146", true)
                .finish(),
        );
        assert_eq!(Some("Q146".to_string()), depicts.value_of("depict_item"));
        assert_eq!(Some("true".to_string()), depicts.value_of("depict_prominent"));
        assert_eq!(Some(String::new()), depicts.value_of("caption_text"));
        assert_eq!(Some("depicts".to_string()), depicts.value_of("edit_type"));
        assert_eq!(None, depicts.value_of("unknown"));

        let caption = ContributionRecord::new(
            "Alice".into(),
            Contribution::build().caption("de", "Eine Katze").finish(),
        );
        assert_eq!(Some("Eine Katze".to_string()), caption.value_of("caption_text"));
        assert_eq!(Some("de".to_string()), caption.value_of("caption_language"));
        assert_eq!(Some(String::new()), caption.value_of("depict_prominent"));
        for field in ALL_STATS_FIELDS {
            assert!(caption.value_of(field).is_some(), "{field}");
        }
    }

    #[test]
    fn load_records_of_a_campaign() {
        let db = MockDb::default();
        let alice = login_user(&db, "Alice", "en").unwrap();
        let bob = login_user(&db, "Bob", "en").unwrap();
        let cats = db.create_campaign(&Campaign::build().name("Cats").finish()).unwrap();
        let dogs = db.create_campaign(&Campaign::build().name("Dogs").finish()).unwrap();
        for (user, campaign, file) in [
            (&alice, cats, "A.jpg"),
            (&bob, dogs, "B.jpg"),
            (&bob, cats, "C.jpg"),
        ] {
            db.create_contribution(
                &Contribution::build()
                    .user_id(user.id.value())
                    .campaign_id(campaign.value())
                    .file(file)
                    .finish(),
            )
            .unwrap();
        }
        let records = campaign_contribution_records(&db, cats).unwrap();
        assert_eq!(2, records.len());
        assert_eq!(("Alice", "A.jpg"), (records[0].username.as_str(), records[0].file.as_str()));
        assert_eq!(("Bob", "C.jpg"), (records[1].username.as_str(), records[1].file.as_str()));
    }

    #[test]
    fn aggregate_countries() {
        let records = [
            record("Alice", "A.jpg", "FR", depicts()),
            record("Bob", "A.jpg", "fr", caption()),
            record("Alice", "B.jpg", "FR", caption()),
            record("Carol", "C.jpg", "DE", depicts()),
            record("Dave", "D.jpg", "", depicts()),
            record("Eve", "E.jpg", "XX", depicts()),
        ];
        let stats = country_stats(&records);
        assert_eq!(4, stats.len());
        assert_eq!(
            CountryStats {
                country: "France".into(),
                contributors: 2,
                contributions: 3,
            },
            stats[0]
        );
        // Ties are ordered by name
        let names: Vec<_> = stats[1..].iter().map(|s| s.country.as_str()).collect();
        assert_eq!(3, names.len());
        assert_eq!("", names[0]);
        assert!(names[1].contains("Germany"));
        assert_eq!("XX", names[2]);
    }

    #[test]
    fn aggregate_contributors() {
        let records = [
            record("Bob", "A.jpg", "", depicts()),
            record("Alice", "A.jpg", "", depicts()),
            record("Alice", "A.jpg", "", caption()),
            record("Alice", "B.jpg", "", caption()),
        ];
        let stats = contributor_stats(&records);
        assert_eq!(
            vec![
                ContributorStats {
                    username: "Alice".into(),
                    images_improved: 2,
                    depicts: 1,
                    captions: 2,
                    contributions: 3,
                },
                ContributorStats {
                    username: "Bob".into(),
                    images_improved: 1,
                    depicts: 1,
                    captions: 0,
                    contributions: 1,
                },
            ],
            stats
        );
        assert_eq!(Some("2".to_string()), stats[0].value_of("images_improved"));
    }
}
