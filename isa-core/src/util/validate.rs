use isa_entities::campaign::Campaign;
use thiserror::Error;

pub trait Validate {
    type Error;
    fn validate(&self) -> Result<(), Self::Error>;
}

pub trait AutoCorrect {
    fn auto_correct(self) -> Self;
}

#[derive(Debug, Error)]
pub enum CampaignInvalidation {
    #[error("Empty campaign name")]
    Name,
    #[error("The campaign name contains a path separator or '..'")]
    NameWithPath,
    #[error("The end date is before the start")]
    EndDateBeforeStart,
}

impl Validate for Campaign {
    type Error = CampaignInvalidation;
    fn validate(&self) -> Result<(), Self::Error> {
        if self.name.trim().is_empty() {
            return Err(Self::Error::Name);
        }
        if !is_valid_file_name_stem(&self.name) {
            return Err(Self::Error::NameWithPath);
        }
        if let Some(end_date) = self.end_date {
            if end_date < self.start_date {
                return Err(Self::Error::EndDateBeforeStart);
            }
        }
        Ok(())
    }
}

impl AutoCorrect for Campaign {
    fn auto_correct(mut self) -> Self {
        self.name = self.name.trim().to_owned();
        self.manager = self.manager.trim().to_owned();
        self.image = self
            .image
            .map(|image| image.trim().to_owned())
            .filter(|image| !image.is_empty());
        self
    }
}

/// Campaign names are used as prefixes of exported file names.
pub fn is_valid_file_name_stem(name: &str) -> bool {
    !name.contains(['/', '\\']) && !name.contains("..")
}

pub fn is_valid_username(username: &str) -> bool {
    !username.trim().is_empty()
}
