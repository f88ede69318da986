use strum::{AsRefStr, Display, EnumString};
use thiserror::Error;

use crate::{
    id::{CampaignId, UserId},
    media::FileName,
};

/// A single recorded edit.
///
/// Contributions are appended once after the edit has been
/// accepted by the wiki and are never modified afterwards.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contribution {
    pub user_id      : UserId,
    pub campaign_id  : CampaignId,
    pub file         : FileName,
    pub edit_type    : EditType,
    pub edit_action  : EditAction,
    /// ISO 3166-1 alpha-2 code or empty if unknown
    pub country      : String,
    pub edit_content : EditContent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum EditType {
    Depicts,
    Caption,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum EditAction {
    Add,
    Remove,
}

/// The payload of an edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditContent {
    Depicts { item: String, prominent: bool },
    Caption { language: String, text: String },
}

#[derive(Debug, Error)]
pub enum EditContentParseError {
    #[error("Invalid prominence flag: {0}")]
    Prominence(String),
    #[error("Missing caption language")]
    CaptionLanguage,
}

const SEPARATOR: char = '|';

impl EditContent {
    pub const fn edit_type(&self) -> EditType {
        match self {
            Self::Depicts { .. } => EditType::Depicts,
            Self::Caption { .. } => EditType::Caption,
        }
    }

    /// Encodes the content into a single line of text.
    ///
    /// Depicts statements are encoded as `<item>|<prominent>`
    /// and captions as `<language>|<text>`.
    pub fn encode(&self) -> String {
        match self {
            Self::Depicts { item, prominent } => format!("{item}{SEPARATOR}{prominent}"),
            Self::Caption { language, text } => format!("{language}{SEPARATOR}{text}"),
        }
    }

    pub fn decode(edit_type: EditType, encoded: &str) -> Result<Self, EditContentParseError> {
        let (head, tail) = match encoded.split_once(SEPARATOR) {
            Some((head, tail)) => (head, Some(tail)),
            None => (encoded, None),
        };
        match edit_type {
            EditType::Depicts => {
                let prominent = match tail.map(str::trim) {
                    None | Some("") => false,
                    Some(flag) => flag
                        .parse()
                        .map_err(|_| EditContentParseError::Prominence(flag.to_owned()))?,
                };
                Ok(Self::Depicts {
                    item: head.to_owned(),
                    prominent,
                })
            }
            EditType::Caption => {
                let text = tail.ok_or(EditContentParseError::CaptionLanguage)?;
                Ok(Self::Caption {
                    language: head.to_owned(),
                    text: text.to_owned(),
                })
            }
        }
    }
}
