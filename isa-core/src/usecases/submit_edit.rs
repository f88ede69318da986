use serde::Serialize as _;
use serde_json::{json, ser::Formatter, Value};
use std::io;
use uuid::Uuid;

use super::prelude::*;

const DEPICTS_PROPERTY: &str = "P180";

/// The action specific parameters of an edit request.
#[derive(Debug, Clone, PartialEq)]
pub enum EditParams {
    /// `wbsetclaim`
    SetClaim { claim: Value },
    /// `wbremoveclaims` with the GUID of the claim
    RemoveClaims { claim: String },
    /// `wbsetlabel`, i.e. a caption of a media file
    SetLabel {
        id: String,
        language: String,
        value: String,
    },
}

impl EditParams {
    pub const fn action(&self) -> &'static str {
        match self {
            Self::SetClaim { .. } => "wbsetclaim",
            Self::RemoveClaims { .. } => "wbremoveclaims",
            Self::SetLabel { .. } => "wbsetlabel",
        }
    }
}

/// A structured edit of a single media file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaEdit {
    AddDepicts {
        /// Entity id of the media file, e.g. `M12345`
        media_id: String,
        item: String,
        prominent: bool,
    },
    RemoveDepicts {
        claim_id: String,
        item: String,
        prominent: bool,
    },
    SetCaption {
        media_id: String,
        language: String,
        text: String,
    },
}

impl MediaEdit {
    pub fn edit_params(&self) -> EditParams {
        match self {
            Self::AddDepicts {
                media_id,
                item,
                prominent,
            } => EditParams::SetClaim {
                claim: depicts_claim(media_id, item, *prominent),
            },
            Self::RemoveDepicts { claim_id, .. } => EditParams::RemoveClaims {
                claim: claim_id.clone(),
            },
            Self::SetCaption {
                media_id,
                language,
                text,
            } => EditParams::SetLabel {
                id: media_id.clone(),
                language: language.clone(),
                value: text.clone(),
            },
        }
    }

    pub const fn edit_action(&self) -> EditAction {
        match self {
            Self::AddDepicts { .. } | Self::SetCaption { .. } => EditAction::Add,
            Self::RemoveDepicts { .. } => EditAction::Remove,
        }
    }

    pub fn edit_content(&self) -> EditContent {
        match self {
            Self::AddDepicts {
                item, prominent, ..
            }
            | Self::RemoveDepicts {
                item, prominent, ..
            } => EditContent::Depicts {
                item: item.clone(),
                prominent: *prominent,
            },
            Self::SetCaption { language, text, .. } => EditContent::Caption {
                language: language.clone(),
                text: text.clone(),
            },
        }
    }
}

/// A new "depicts" statement for a media file.
pub fn depicts_claim(media_id: &str, item: &str, prominent: bool) -> Value {
    let rank = if prominent { "preferred" } else { "normal" };
    json!({
        "id": format!("{media_id}${}", Uuid::new_v4()),
        "type": "statement",
        "mainsnak": {
            "snaktype": "value",
            "property": DEPICTS_PROPERTY,
            "datavalue": {
                "type": "wikibase-entityid",
                "value": {
                    "entity-type": "item",
                    "id": item,
                },
            },
        },
        "rank": rank,
    })
}

/// Writes JSON with `", "` and `": "` as separators,
/// i.e. `{"id": "Q1", "rank": "normal"}`.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

/// Encodes a claim as the JSON string that is expected by `wbsetclaim`.
pub fn encode_claim(claim: &Value) -> Result<String> {
    let mut buf = Vec::with_capacity(128);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
    claim.serialize(&mut ser).map_err(Error::Claim)?;
    // serde_json only writes valid UTF-8
    String::from_utf8(buf).map_err(|err| Error::Claim(serde::ser::Error::custom(err)))
}

/// Assembles the form parameters of an edit request.
///
/// The claim of `wbsetclaim` is sent as a JSON encoded string.
pub fn edit_form_params(
    token: &EditToken,
    username: &str,
    params: &EditParams,
) -> Result<EditFormParams> {
    let mut form: EditFormParams = vec![("action", params.action().to_owned())];
    match params {
        EditParams::SetClaim { claim } => {
            form.push(("claim", encode_claim(claim)?));
        }
        EditParams::RemoveClaims { claim } => {
            form.push(("claim", claim.clone()));
        }
        EditParams::SetLabel {
            id,
            language,
            value,
        } => {
            form.push(("id", id.clone()));
            form.push(("language", language.clone()));
            form.push(("value", value.clone()));
        }
    }
    form.push(("format", "json".to_owned()));
    form.push(("token", token.as_str().to_owned()));
    form.push(("formatversion", "1".to_owned()));
    form.push(("summary", format!("{username}@ISA")));
    Ok(form)
}

/// Performs an edit and returns the id of the new revision.
pub fn submit_edit<G>(
    gateway: &G,
    session: &EditSession,
    username: &str,
    params: &EditParams,
) -> Result<RevisionId>
where
    G: WikiEditGateway,
{
    let form = edit_form_params(&session.token, username, params)?;
    log::debug!("Submitting {} on behalf of {username}", params.action());
    let rev_id = gateway
        .post_edit(&session.credentials, &form)?
        .ok_or(crate::gateways::wiki::Error::EditIncomplete)?;
    log::info!("{} by {username} created revision {rev_id}", params.action());
    Ok(rev_id)
}

#[cfg(test)]
mod tests {
    use super::{
        super::{authorize_edit, tests::DummyWiki},
        *,
    };
    use crate::gateways::wiki;

    fn value_of<'a>(form: &'a EditFormParams, key: &str) -> Option<&'a str> {
        form.iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn encode_claim_as_json_string() {
        let params = EditParams::SetClaim {
            claim: json!({"id": "Q1"}),
        };
        let form = edit_form_params(&EditToken::new("t+\\"), "Alice", &params).unwrap();
        assert_eq!(Some("wbsetclaim"), value_of(&form, "action"));
        let claim = value_of(&form, "claim").unwrap();
        assert_eq!(r#"{"id": "Q1"}"#, claim);
        // The claim is a string within the whole payload
        let payload: serde_json::Map<String, Value> = form
            .iter()
            .map(|(k, v)| ((*k).to_owned(), Value::String(v.clone())))
            .collect();
        assert!(payload["claim"].is_string());
        assert_eq!(
            json!({"id": "Q1"}),
            serde_json::from_str::<Value>(payload["claim"].as_str().unwrap()).unwrap()
        );
    }

    #[test]
    fn encode_nested_claims_with_spaced_separators() {
        let claim = json!({
            "id": "M1$x",
            "mainsnak": {"property": "P180", "qualifiers": [1, 2]},
            "rank": "normal",
        });
        assert_eq!(
            r#"{"id": "M1$x", "mainsnak": {"property": "P180", "qualifiers": [1, 2]}, "rank": "normal"}"#,
            encode_claim(&claim).unwrap()
        );
        assert_eq!("[]", encode_claim(&json!([])).unwrap());
        assert_eq!("{}", encode_claim(&json!({})).unwrap());
    }

    #[test]
    fn add_fixed_fields() {
        let params = EditParams::RemoveClaims {
            claim: "M1$abc".into(),
        };
        let form = edit_form_params(&EditToken::new("token"), "Alice", &params).unwrap();
        assert_eq!(Some("wbremoveclaims"), value_of(&form, "action"));
        assert_eq!(Some("M1$abc"), value_of(&form, "claim"));
        assert_eq!(Some("json"), value_of(&form, "format"));
        assert_eq!(Some("token"), value_of(&form, "token"));
        assert_eq!(Some("1"), value_of(&form, "formatversion"));
        assert_eq!(Some("Alice@ISA"), value_of(&form, "summary"));
    }

    #[test]
    fn caption_params() {
        let edit = MediaEdit::SetCaption {
            media_id: "M7".into(),
            language: "fr".into(),
            text: "Un chat".into(),
        };
        let form =
            edit_form_params(&EditToken::new("token"), "Bob", &edit.edit_params()).unwrap();
        assert_eq!(Some("wbsetlabel"), value_of(&form, "action"));
        assert_eq!(Some("M7"), value_of(&form, "id"));
        assert_eq!(Some("fr"), value_of(&form, "language"));
        assert_eq!(Some("Un chat"), value_of(&form, "value"));
        assert_eq!(None, value_of(&form, "claim"));
        assert_eq!(EditType::Caption, edit.edit_content().edit_type());
    }

    #[test]
    fn depicts_claim_structure() {
        let claim = depicts_claim("M42", "Q146", true);
        assert_eq!("preferred", claim["rank"]);
        assert_eq!("P180", claim["mainsnak"]["property"]);
        assert_eq!("Q146", claim["mainsnak"]["datavalue"]["value"]["id"]);
        assert!(claim["id"].as_str().unwrap().starts_with("M42$"));
        assert_eq!("normal", depicts_claim("M42", "Q146", false)["rank"]);
    }

    #[test]
    fn submit_returns_revision_id() {
        let wiki = DummyWiki::default();
        let session = authorize_edit(&wiki, &DummyWiki::credentials()).unwrap();
        let edit = MediaEdit::AddDepicts {
            media_id: "M1".into(),
            item: "Q1".into(),
            prominent: false,
        };
        let rev_id = submit_edit(&wiki, &session, "Alice", &edit.edit_params()).unwrap();
        assert_eq!(RevisionId::from(DummyWiki::REVISION), rev_id);
        let posted = wiki.posted.borrow();
        assert_eq!(1, posted.len());
        assert_eq!(Some(DummyWiki::TOKEN), value_of(&posted[0], "token"));
    }

    #[test]
    fn missing_revision_id_is_an_error() {
        let wiki = DummyWiki::default();
        wiki.omit_revision.set(true);
        let session = authorize_edit(&wiki, &DummyWiki::credentials()).unwrap();
        let params = EditParams::RemoveClaims {
            claim: "M1$abc".into(),
        };
        assert!(matches!(
            submit_edit(&wiki, &session, "Alice", &params),
            Err(Error::Wiki(wiki::Error::EditIncomplete))
        ));
    }
}
