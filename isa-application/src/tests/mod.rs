pub mod prelude {
    use std::cell::{Cell, RefCell};

    pub use isa_core::{
        entities::*,
        gateways::wiki::{self, EditFormParams, EditToken, OAuthCredentials, OAuthToken},
        repositories::{Error as RepoError, *},
        usecases,
    };

    pub mod sqlite {
        pub use super::super::super::sqlite::*;
    }

    pub use crate::{error::AppError, prelude as flows};

    pub fn depicts(item: &str) -> EditContent {
        EditContent::Depicts {
            item: item.into(),
            prominent: false,
        }
    }

    pub fn caption(language: &str, text: &str) -> EditContent {
        EditContent::Caption {
            language: language.into(),
            text: text.into(),
        }
    }

    pub fn edit_context(username: &str, country: &str) -> usecases::EditContext {
        usecases::EditContext {
            username: username.into(),
            credentials: OAuthCredentials {
                consumer: OAuthToken::new("consumer-key", "consumer-secret"),
                access: OAuthToken::new("access-key", "access-secret"),
            },
            country: country.into(),
        }
    }

    #[derive(Default)]
    pub struct DummyWiki {
        pub fail_authorization: Cell<bool>,
        pub omit_revision: Cell<bool>,
        pub posted: RefCell<Vec<EditFormParams>>,
    }

    impl DummyWiki {
        pub const REVISION: u64 = 815;
    }

    impl wiki::WikiEditGateway for DummyWiki {
        fn fetch_csrf_token(
            &self,
            _: &OAuthCredentials,
        ) -> std::result::Result<EditToken, wiki::Error> {
            if self.fail_authorization.get() {
                return Err(wiki::Error::Auth("invalid consumer".into()));
            }
            Ok(EditToken::new("0123456789abcdef+\\"))
        }

        fn post_edit(
            &self,
            _: &OAuthCredentials,
            params: &EditFormParams,
        ) -> std::result::Result<Option<RevisionId>, wiki::Error> {
            self.posted.borrow_mut().push(params.clone());
            if self.omit_revision.get() {
                return Ok(None);
            }
            Ok(Some(RevisionId::from(Self::REVISION)))
        }
    }

    pub struct BackendFixture {
        pub db_connections: sqlite::Connections,
    }

    impl BackendFixture {
        pub fn new() -> Self {
            let _ = env_logger::builder().is_test(true).try_init();
            let db_connections = sqlite::Connections::init(":memory:", 1).unwrap();
            isa_db_sqlite::run_embedded_database_migrations(db_connections.exclusive().unwrap())
                .unwrap();
            Self { db_connections }
        }

        pub fn create_campaign(&self, name: &str, end_date: Option<CalendarDate>) -> CampaignId {
            let new_campaign = usecases::NewCampaign {
                name: name.into(),
                image: None,
                categories: r#"[{"name":"Cats"}]"#.into(),
                start_date: CalendarDate::parse("2019-01-01").unwrap(),
                end_date,
                short_description: "".into(),
                long_description: "".into(),
                campaign_type: None,
                depicts_metadata: true,
                captions_metadata: true,
            };
            self.db_connections
                .exclusive()
                .unwrap()
                .transaction(|conn| usecases::create_campaign(conn, new_campaign, "Manager"))
                .unwrap()
                .id
        }

        pub fn login(&self, username: &str) -> UserId {
            self.db_connections
                .exclusive()
                .unwrap()
                .transaction(|conn| usecases::login_user(conn, username, "en"))
                .unwrap()
                .id
        }

        pub fn record(
            &self,
            user_id: UserId,
            campaign_id: CampaignId,
            file: &str,
            country: &str,
            edit_content: EditContent,
        ) -> ContributionId {
            let contribution = Contribution {
                user_id,
                campaign_id,
                file: FileName::new_unchecked(file.into()),
                edit_type: edit_content.edit_type(),
                edit_action: EditAction::Add,
                country: country.into(),
                edit_content,
            };
            self.db_connections
                .exclusive()
                .unwrap()
                .transaction(|conn| usecases::record_contribution(conn, &contribution))
                .unwrap()
        }
    }
}
