use diesel::prelude::*;

use crate::domain::user::{NewUser as DomainNewUser, User as DomainUser};
use crate::models::user::{NewUser as DbNewUser, UpdateUser as DbUpdateUser, User as DbUser};
use crate::pagination::Pagination;
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, UserReader, UserWriter};

impl UserReader for DieselRepository {
    fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<DomainUser>> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let user = users::table
            .filter(users::id.eq(id))
            .first::<DbUser>(&mut conn)
            .optional()?;

        Ok(user.map(Into::into))
    }

    fn list_users_by_ids(&self, ids: &[i32]) -> RepositoryResult<Vec<DomainUser>> {
        use crate::schema::users;

        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.conn()?;
        let db_users = users::table
            .filter(users::id.eq_any(ids))
            .order(users::id.asc())
            .load::<DbUser>(&mut conn)?;

        Ok(db_users.into_iter().map(Into::into).collect())
    }

    fn list_users(&self, pagination: Pagination) -> RepositoryResult<(usize, Vec<DomainUser>)> {
        use crate::schema::users;

        let mut conn = self.conn()?;

        let total = users::table.count().get_result::<i64>(&mut conn)? as usize;
        let db_users = users::table
            .order(users::id.asc())
            .offset(pagination.offset())
            .limit(pagination.limit())
            .load::<DbUser>(&mut conn)?;

        Ok((total, db_users.into_iter().map(Into::into).collect()))
    }
}

impl UserWriter for DieselRepository {
    fn upsert_user(&self, new_user: &DomainNewUser) -> RepositoryResult<DomainUser> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let insertable = DbNewUser::from(new_user);
        let changes = DbUpdateUser::from_new_user(new_user, chrono::Utc::now().naive_utc());

        let user = diesel::insert_into(users::table)
            .values(&insertable)
            .on_conflict(users::sub)
            .do_update()
            .set(&changes)
            .get_result::<DbUser>(&mut conn)?;

        Ok(user.into())
    }
}
