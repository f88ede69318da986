use super::prelude::*;

const NAMESPACE_SEPARATOR: char = ':';

/// Collects the titles of all category members in the order
/// of the given response pages.
pub fn category_member_titles(pages: &[CategoryMembersResponse]) -> Vec<String> {
    pages
        .iter()
        .flat_map(|page| page.query.categorymembers.iter())
        .map(|member| member.title.clone())
        .collect()
}

/// Converts a namespaced title like `File:My Photo.jpg` into
/// the canonical file name `My_Photo.jpg`.
pub fn file_name_from_title(title: &str) -> Result<FileName> {
    let (_, name) = title
        .split_once(NAMESPACE_SEPARATOR)
        .ok_or_else(|| Error::MalformedTitle(title.to_owned()))?;
    Ok(FileName::new_unchecked(name.replace(' ', "_")))
}

pub fn file_names_from_titles<I, S>(titles: I) -> Result<Vec<FileName>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    titles
        .into_iter()
        .map(|title| file_name_from_title(title.as_ref()))
        .collect()
}

/// All canonical file names of the given response pages.
pub fn file_names_from_pages(pages: &[CategoryMembersResponse]) -> Result<Vec<FileName>> {
    file_names_from_titles(category_member_titles(pages))
}
