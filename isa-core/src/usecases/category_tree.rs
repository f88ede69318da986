use std::collections::HashMap;

use itertools::Itertools as _;

use super::{
    campaign_content::{campaign_categories, MAX_CATEGORY_DEPTH},
    media::file_names_from_titles,
    prelude::*,
};

pub const CATEGORY_NAMESPACE: &str = "Category:";

pub const DEFAULT_ALLOWED_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "svg"];

fn category_title(name: &str) -> String {
    if name.starts_with(CATEGORY_NAMESPACE) {
        name.to_owned()
    } else {
        format!("{CATEGORY_NAMESPACE}{name}")
    }
}

fn member_type(member: &CategoryMember) -> CategoryMemberType {
    member.member_type.unwrap_or_else(|| {
        if member.title.starts_with(CATEGORY_NAMESPACE) {
            CategoryMemberType::Subcat
        } else {
            CategoryMemberType::File
        }
    })
}

fn has_allowed_extension<S: AsRef<str>>(title: &str, allowed_extensions: &[S]) -> bool {
    let extension = title.rsplit('.').next().unwrap_or_default().to_lowercase();
    allowed_extensions
        .iter()
        .any(|allowed| allowed.as_ref().eq_ignore_ascii_case(&extension))
}

/// Loads all members of a category by following the continuation.
pub fn all_category_members<G>(gateway: &G, category_title: &str) -> Result<Vec<CategoryMember>>
where
    G: CategoryMembersGateway,
{
    let mut members = Vec::new();
    let mut continue_from: Option<String> = None;
    loop {
        log::debug!(
            "Loading members of {category_title} (continue from {:?})",
            continue_from
        );
        let page = gateway.category_members(category_title, continue_from.as_deref())?;
        continue_from = page.continue_from().map(ToOwned::to_owned);
        members.extend(page.query.categorymembers);
        if continue_from.is_none() {
            break;
        }
    }
    Ok(members)
}

struct CategoryTreeWalk<'a, G> {
    gateway: &'a G,
    // Largest remaining depth of each walked category
    walked: HashMap<String, u32>,
    subcategories: HashMap<String, Vec<String>>,
    file_titles: Vec<String>,
}

impl<G> CategoryTreeWalk<'_, G>
where
    G: CategoryMembersGateway,
{
    fn walk(&mut self, category_title: &str, depth: u32) -> Result<()> {
        if self
            .walked
            .get(category_title)
            .is_some_and(|walked_depth| *walked_depth >= depth)
        {
            log::debug!("Skipping already processed category {category_title}");
            return Ok(());
        }
        self.walked.insert(category_title.to_owned(), depth);
        let subcategories = match self.subcategories.get(category_title) {
            Some(subcategories) => subcategories.clone(),
            None => {
                let mut subcategories = Vec::new();
                for member in all_category_members(self.gateway, category_title)? {
                    match member_type(&member) {
                        CategoryMemberType::File => self.file_titles.push(member.title),
                        CategoryMemberType::Subcat => subcategories.push(member.title),
                        CategoryMemberType::Page => {}
                    }
                }
                self.subcategories
                    .insert(category_title.to_owned(), subcategories.clone());
                subcategories
            }
        };
        if depth > 0 {
            for subcategory in &subcategories {
                self.walk(subcategory, depth - 1)?;
            }
        }
        Ok(())
    }
}

/// Collects the titles of all media files in the given category trees.
///
/// Sub-categories are included up to the depth of each category,
/// but never deeper than [`MAX_CATEGORY_DEPTH`]. The members of every
/// category are requested only once. A category that is reached again
/// with a larger remaining depth is descended further. The resulting
/// titles are unique and restricted to the allowed file extensions.
pub fn category_tree_file_titles<G, S>(
    gateway: &G,
    categories: &[CampaignCategory],
    allowed_extensions: &[S],
) -> Result<Vec<String>>
where
    G: CategoryMembersGateway,
    S: AsRef<str>,
{
    let mut walk = CategoryTreeWalk {
        gateway,
        walked: HashMap::new(),
        subcategories: HashMap::new(),
        file_titles: Vec::new(),
    };
    for CampaignCategory { name, depth } in categories {
        walk.walk(&category_title(name), (*depth).min(MAX_CATEGORY_DEPTH))?;
    }
    let titles: Vec<_> = walk
        .file_titles
        .into_iter()
        .unique()
        .filter(|title| has_allowed_extension(title, allowed_extensions))
        .collect();
    log::debug!(
        "Found {} media files in {} categories",
        titles.len(),
        walk.walked.len()
    );
    Ok(titles)
}

/// The canonical names of all media files of a campaign.
pub fn campaign_images<G, S>(
    gateway: &G,
    campaign: &Campaign,
    allowed_extensions: &[S],
) -> Result<Vec<FileName>>
where
    G: CategoryMembersGateway,
    S: AsRef<str>,
{
    let categories = campaign_categories(Some(&campaign.categories))?;
    let titles = category_tree_file_titles(gateway, &categories, allowed_extensions)?;
    file_names_from_titles(titles)
}
