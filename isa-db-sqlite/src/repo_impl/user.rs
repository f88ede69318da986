use super::*;

impl UserRepo for DbReadOnly<'_> {
    fn create_user(&self, _user: &User) -> Result<UserId> {
        Err(read_only_violation())
    }
    fn update_user_pref_lang(&self, _id: UserId, _pref_lang: &str) -> Result<()> {
        Err(read_only_violation())
    }
    fn increment_user_contributions(&self, _id: UserId) -> Result<()> {
        Err(read_only_violation())
    }

    fn get_user(&self, id: UserId) -> Result<User> {
        get_user(&mut self.conn.borrow_mut(), id)
    }
    fn get_user_by_name(&self, username: &str) -> Result<User> {
        get_user_by_name(&mut self.conn.borrow_mut(), username)
    }
    fn try_get_user_by_name(&self, username: &str) -> Result<Option<User>> {
        try_get_user_by_name(&mut self.conn.borrow_mut(), username)
    }
    fn count_users(&self) -> Result<usize> {
        count_users(&mut self.conn.borrow_mut())
    }
}

impl UserRepo for DbReadWrite<'_> {
    fn create_user(&self, user: &User) -> Result<UserId> {
        create_user(&mut self.conn.borrow_mut(), user)
    }
    fn update_user_pref_lang(&self, id: UserId, pref_lang: &str) -> Result<()> {
        update_user_pref_lang(&mut self.conn.borrow_mut(), id, pref_lang)
    }
    fn increment_user_contributions(&self, id: UserId) -> Result<()> {
        increment_user_contributions(&mut self.conn.borrow_mut(), id)
    }

    fn get_user(&self, id: UserId) -> Result<User> {
        get_user(&mut self.conn.borrow_mut(), id)
    }
    fn get_user_by_name(&self, username: &str) -> Result<User> {
        get_user_by_name(&mut self.conn.borrow_mut(), username)
    }
    fn try_get_user_by_name(&self, username: &str) -> Result<Option<User>> {
        try_get_user_by_name(&mut self.conn.borrow_mut(), username)
    }
    fn count_users(&self) -> Result<usize> {
        count_users(&mut self.conn.borrow_mut())
    }
}

impl UserRepo for DbConnection<'_> {
    fn create_user(&self, user: &User) -> Result<UserId> {
        create_user(&mut self.conn.borrow_mut(), user)
    }
    fn update_user_pref_lang(&self, id: UserId, pref_lang: &str) -> Result<()> {
        update_user_pref_lang(&mut self.conn.borrow_mut(), id, pref_lang)
    }
    fn increment_user_contributions(&self, id: UserId) -> Result<()> {
        increment_user_contributions(&mut self.conn.borrow_mut(), id)
    }

    fn get_user(&self, id: UserId) -> Result<User> {
        get_user(&mut self.conn.borrow_mut(), id)
    }
    fn get_user_by_name(&self, username: &str) -> Result<User> {
        get_user_by_name(&mut self.conn.borrow_mut(), username)
    }
    fn try_get_user_by_name(&self, username: &str) -> Result<Option<User>> {
        try_get_user_by_name(&mut self.conn.borrow_mut(), username)
    }
    fn count_users(&self) -> Result<usize> {
        count_users(&mut self.conn.borrow_mut())
    }
}

impl From<models::UserEntity> for User {
    fn from(from: models::UserEntity) -> Self {
        let models::UserEntity {
            id,
            username,
            pref_lang,
            contributions,
        } = from;
        Self {
            id: id.into(),
            username,
            pref_lang,
            contributions: u64::try_from(contributions).unwrap_or_default(),
        }
    }
}

fn create_user(conn: &mut SqliteConnection, u: &User) -> Result<UserId> {
    let new_user = models::NewUser {
        username: &u.username,
        pref_lang: &u.pref_lang,
        contributions: 0,
    };
    diesel::insert_into(schema::user::table)
        .values(&new_user)
        .execute(conn)
        .map_err(from_diesel_err)?;
    load_last_insert_rowid(conn).map(Into::into)
}

fn update_user_pref_lang(conn: &mut SqliteConnection, id: UserId, pref_lang: &str) -> Result<()> {
    use schema::user::dsl;
    let count = diesel::update(dsl::user.filter(dsl::id.eq(id.value())))
        .set(dsl::pref_lang.eq(pref_lang))
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    Ok(())
}

fn increment_user_contributions(conn: &mut SqliteConnection, id: UserId) -> Result<()> {
    use schema::user::dsl;
    let count = diesel::update(dsl::user.filter(dsl::id.eq(id.value())))
        .set(dsl::contributions.eq(dsl::contributions + 1_i64))
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    Ok(())
}

fn get_user(conn: &mut SqliteConnection, id: UserId) -> Result<User> {
    use schema::user::dsl;
    Ok(dsl::user
        .filter(dsl::id.eq(id.value()))
        .first::<models::UserEntity>(conn)
        .map_err(from_diesel_err)?
        .into())
}

fn get_user_by_name(conn: &mut SqliteConnection, username: &str) -> Result<User> {
    try_get_user_by_name(conn, username)?.ok_or(repo::Error::NotFound)
}

fn try_get_user_by_name(conn: &mut SqliteConnection, username: &str) -> Result<Option<User>> {
    use schema::user::dsl;
    Ok(dsl::user
        .filter(dsl::username.eq(username))
        .first::<models::UserEntity>(conn)
        .optional()
        .map_err(from_diesel_err)?
        .map(Into::into))
}

fn count_users(conn: &mut SqliteConnection) -> Result<usize> {
    use schema::user::dsl;
    Ok(count_to_usize(
        dsl::user
            .select(diesel::dsl::count(dsl::id))
            .first::<i64>(conn)
            .map_err(from_diesel_err)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::in_memory_connections;

    fn new_user(username: &str) -> User {
        User {
            id: UserId::new(0),
            username: username.into(),
            pref_lang: "en".into(),
            contributions: 42,
        }
    }

    #[test]
    fn create_and_load_users() {
        let connections = in_memory_connections();
        let db = connections.exclusive().unwrap();
        let alice = db.create_user(&new_user("Alice")).unwrap();
        let bob = db.create_user(&new_user("Bob")).unwrap();
        assert_ne!(alice, bob);
        assert_eq!(2, db.count_users().unwrap());

        let user = db.get_user(alice).unwrap();
        assert_eq!("Alice", user.username);
        assert_eq!(0, user.contributions);
        assert_eq!(bob, db.get_user_by_name("Bob").unwrap().id);
        assert!(db.try_get_user_by_name("Carol").unwrap().is_none());
        assert!(matches!(
            db.get_user(UserId::new(99)),
            Err(repo::Error::NotFound)
        ));
    }

    #[test]
    fn usernames_are_unique() {
        let connections = in_memory_connections();
        let db = connections.exclusive().unwrap();
        db.create_user(&new_user("Alice")).unwrap();
        assert!(matches!(
            db.create_user(&new_user("Alice")),
            Err(repo::Error::AlreadyExists)
        ));
    }

    #[test]
    fn update_users() {
        let connections = in_memory_connections();
        let id = connections
            .exclusive()
            .unwrap()
            .create_user(&new_user("Alice"))
            .unwrap();
        {
            let db = connections.exclusive().unwrap();
            db.update_user_pref_lang(id, "de").unwrap();
            db.increment_user_contributions(id).unwrap();
            db.increment_user_contributions(id).unwrap();
            assert!(matches!(
                db.increment_user_contributions(UserId::new(99)),
                Err(repo::Error::NotFound)
            ));
        }
        let db = connections.shared().unwrap();
        let user = db.get_user(id).unwrap();
        assert_eq!("de", user.pref_lang);
        assert_eq!(2, user.contributions);
        assert!(db.create_user(&new_user("Bob")).is_err());
    }
}
