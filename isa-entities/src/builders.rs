pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub use self::{campaign_builder::*, contribution_builder::*};

pub mod campaign_builder {

    use super::*;
    use crate::{campaign::*, id::*, time::*};

    #[derive(Debug)]
    pub struct CampaignBuild {
        campaign: Campaign,
    }

    impl CampaignBuild {
        pub fn id(mut self, id: i64) -> Self {
            self.campaign.id = id.into();
            self
        }
        pub fn name(mut self, name: &str) -> Self {
            self.campaign.name = name.into();
            self
        }
        pub fn manager(mut self, manager: &str) -> Self {
            self.campaign.manager = manager.into();
            self
        }
        pub fn categories(mut self, json: &str) -> Self {
            self.campaign.categories = json.into();
            self
        }
        pub fn start_date(mut self, date: &str) -> Self {
            self.campaign.start_date = CalendarDate::parse(date).unwrap();
            self
        }
        pub fn end_date(mut self, date: Option<&str>) -> Self {
            self.campaign.end_date = date.map(|d| CalendarDate::parse(d).unwrap());
            self
        }
        pub fn depicts_metadata(mut self, enabled: bool) -> Self {
            self.campaign.depicts_metadata = enabled;
            self
        }
        pub fn captions_metadata(mut self, enabled: bool) -> Self {
            self.campaign.captions_metadata = enabled;
            self
        }
        pub fn finish(self) -> Campaign {
            self.campaign
        }
    }

    impl Builder for Campaign {
        type Build = CampaignBuild;
        fn build() -> CampaignBuild {
            CampaignBuild {
                campaign: Campaign {
                    id: CampaignId::new(1),
                    name: "".into(),
                    image: None,
                    categories: "[]".into(),
                    start_date: CalendarDate::parse("2020-01-01").unwrap(),
                    end_date: None,
                    manager: "".into(),
                    closed: false,
                    short_description: "".into(),
                    long_description: "".into(),
                    creation_date: None,
                    campaign_type: None,
                    depicts_metadata: true,
                    captions_metadata: true,
                },
            }
        }
    }
}

pub mod contribution_builder {

    use super::*;
    use crate::{contribution::*, id::*, media::*};

    #[derive(Debug)]
    pub struct ContributionBuild {
        contribution: Contribution,
    }

    impl ContributionBuild {
        pub fn user_id(mut self, id: i64) -> Self {
            self.contribution.user_id = id.into();
            self
        }
        pub fn campaign_id(mut self, id: i64) -> Self {
            self.contribution.campaign_id = id.into();
            self
        }
        pub fn file(mut self, file: &str) -> Self {
            self.contribution.file = FileName::new_unchecked(file.into());
            self
        }
        pub fn country(mut self, country: &str) -> Self {
            self.contribution.country = country.into();
            self
        }
        pub fn action(mut self, action: EditAction) -> Self {
            self.contribution.edit_action = action;
            self
        }
        pub fn depicts(mut self, item: &str, prominent: bool) -> Self {
            self.contribution.edit_type = EditType::Depicts;
            self.contribution.edit_content = EditContent::Depicts {
                item: item.into(),
                prominent,
            };
            self
        }
        pub fn caption(mut self, language: &str, text: &str) -> Self {
            self.contribution.edit_type = EditType::Caption;
            self.contribution.edit_content = EditContent::Caption {
                language: language.into(),
                text: text.into(),
            };
            self
        }
        pub fn finish(self) -> Contribution {
            self.contribution
        }
    }

    impl Builder for Contribution {
        type Build = ContributionBuild;
        fn build() -> Self::Build {
            ContributionBuild {
                contribution: Contribution {
                    user_id: UserId::new(1),
                    campaign_id: CampaignId::new(1),
                    file: FileName::new_unchecked("Example.jpg".into()),
                    edit_type: EditType::Depicts,
                    edit_action: EditAction::Add,
                    country: "".into(),
                    edit_content: EditContent::Depicts {
                        item: "Q1".into(),
                        prominent: false,
                    },
                },
            }
        }
    }

    #[test]
    fn caption_sets_edit_type() {
        let c = Contribution::build().caption("en", "A cat").finish();
        assert_eq!(EditType::Caption, c.edit_type);
        assert_eq!(c.edit_type, c.edit_content.edit_type());
    }
}
