use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::prelude::*;

const DEPICT_FIELD_SEPARATOR: char = '|';

#[derive(Debug, Deserialize)]
struct CategoryObject {
    name: String,
    // Older clients submitted the depth as a string
    #[serde(default)]
    depth: Value,
}

#[derive(Debug, Serialize)]
struct CategoryObjectRef<'a> {
    name: &'a str,
    depth: u32,
}

/// Sub-categories below this level are never included.
pub const MAX_CATEGORY_DEPTH: u32 = 10;

fn parse_depth(depth: &Value) -> u32 {
    let depth = match depth {
        Value::Number(n) => n.as_u64().unwrap_or_default(),
        Value::String(s) => s.trim().parse().unwrap_or_default(),
        _ => 0,
    };
    u32::try_from(depth)
        .unwrap_or(MAX_CATEGORY_DEPTH)
        .min(MAX_CATEGORY_DEPTH)
}

fn decode_category_objects(json: Option<&str>) -> Result<Vec<CategoryObject>> {
    let json = match json.map(str::trim) {
        None | Some("") => return Ok(vec![]),
        Some(json) => json,
    };
    let objects: Option<Vec<CategoryObject>> =
        serde_json::from_str(json).map_err(Error::Categories)?;
    Ok(objects.unwrap_or_default())
}

/// Decodes the names of the JSON encoded campaign categories.
///
/// A missing, empty or `null` value results in an empty list.
pub fn campaign_category_names(json: Option<&str>) -> Result<Vec<String>> {
    Ok(decode_category_objects(json)?
        .into_iter()
        .map(|CategoryObject { name, .. }| name)
        .collect())
}

pub fn campaign_categories(json: Option<&str>) -> Result<Vec<CampaignCategory>> {
    Ok(decode_category_objects(json)?
        .into_iter()
        .map(|CategoryObject { name, depth }| CampaignCategory {
            name,
            depth: parse_depth(&depth),
        })
        .collect())
}

pub fn encode_campaign_categories(categories: &[CampaignCategory]) -> Result<String> {
    let objects: Vec<_> = categories
        .iter()
        .map(|CampaignCategory { name, depth }| CategoryObjectRef {
            name,
            depth: *depth,
        })
        .collect();
    serde_json::to_string(&objects).map_err(Error::Categories)
}

pub fn build_category_object(name: &str) -> CampaignCategory {
    CampaignCategory::new(name)
}

/// Splits submitted depict values like `Q42|true` into their fields.
pub fn decode_depicts<I, S>(raw: I) -> Vec<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter()
        .map(|depict| {
            depict
                .as_ref()
                .split(DEPICT_FIELD_SEPARATOR)
                .map(ToOwned::to_owned)
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_category_names() {
        assert_eq!(
            vec!["Cats".to_string(), "Dogs".to_string()],
            campaign_category_names(Some(r#"[{"name":"Cats"},{"name":"Dogs"}]"#)).unwrap()
        );
    }

    #[test]
    fn decode_missing_categories() {
        assert!(campaign_category_names(None).unwrap().is_empty());
        assert!(campaign_category_names(Some("")).unwrap().is_empty());
        assert!(campaign_category_names(Some("null")).unwrap().is_empty());
        assert!(campaign_category_names(Some("[]")).unwrap().is_empty());
    }

    #[test]
    fn decode_malformed_categories() {
        assert!(matches!(
            campaign_category_names(Some(r#"[{"name":"Cats""#)),
            Err(Error::Categories(_))
        ));
        assert!(matches!(
            campaign_category_names(Some(r#"[{"title":"Cats"}]"#)),
            Err(Error::Categories(_))
        ));
    }

    #[test]
    fn decode_categories_with_depth() {
        let categories = campaign_categories(Some(
            r#"[{"name":"Cats","depth":2},{"name":"Dogs","depth":"1"},{"name":"Birds"}]"#,
        ))
        .unwrap();
        assert_eq!(
            vec![
                CampaignCategory {
                    name: "Cats".into(),
                    depth: 2
                },
                CampaignCategory {
                    name: "Dogs".into(),
                    depth: 1
                },
                CampaignCategory::new("Birds"),
            ],
            categories
        );
    }

    #[test]
    fn limit_depth_of_categories() {
        let categories = campaign_categories(Some(
            r#"[{"name":"Cats","depth":4294967296},{"name":"Dogs","depth":"11"},{"name":"Birds","depth":10}]"#,
        ))
        .unwrap();
        assert!(categories
            .iter()
            .all(|category| category.depth == MAX_CATEGORY_DEPTH));
    }

    #[test]
    fn encode_and_decode_categories() {
        let json = encode_campaign_categories(&[
            build_category_object("Cats"),
            build_category_object("Dogs"),
        ])
        .unwrap();
        assert_eq!(r#"[{"name":"Cats","depth":0},{"name":"Dogs","depth":0}]"#, json);
        assert_eq!(
            vec!["Cats".to_string(), "Dogs".to_string()],
            campaign_category_names(Some(&json)).unwrap()
        );
    }

    #[test]
    fn new_category_object_has_zero_depth() {
        let category = build_category_object("Lighthouses");
        assert_eq!("Lighthouses", category.name);
        assert_eq!(0, category.depth);
    }

    #[test]
    fn split_depicts() {
        assert_eq!(
            vec![vec!["Q1", "true"], vec!["Q2", "false"]],
            decode_depicts(["Q1|true", "Q2|false"])
        );
        assert!(decode_depicts(Vec::<String>::new()).is_empty());
    }
}
