use super::prelude::*;
use crate::util::validate;

/// Returns the user with the given name, creating it on the
/// first login.
///
/// The preferred language is updated on every login.
pub fn login_user<R>(repo: &R, username: &str, pref_lang: &str) -> Result<User>
where
    R: UserRepo,
{
    let username = username.trim();
    if !validate::is_valid_username(username) {
        return Err(Error::Username);
    }
    let pref_lang = pref_lang.trim();
    if let Some(mut user) = repo.try_get_user_by_name(username)? {
        if user.pref_lang != pref_lang {
            log::debug!("Updating preferred language of {username} to '{pref_lang}'");
            repo.update_user_pref_lang(user.id, pref_lang)?;
            user.pref_lang = pref_lang.to_owned();
        }
        return Ok(user);
    }
    let mut user = User {
        id: UserId::new(0),
        username: username.to_owned(),
        pref_lang: pref_lang.to_owned(),
        contributions: 0,
    };
    log::debug!("Creating new user: username = {username}");
    user.id = repo.create_user(&user)?;
    Ok(user)
}

pub fn get_user_by_name<R>(repo: &R, username: &str) -> Result<User>
where
    R: UserRepo,
{
    Ok(repo.get_user_by_name(username.trim())?)
}
