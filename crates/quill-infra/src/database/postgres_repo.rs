//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{ColumnTrait, EntityTrait, Order, QueryFilter, QueryOrder, QuerySelect};
use uuid::Uuid;

use quill_core::domain::{BlogPost, BlogQuery, BlogState, SortField, SortOrder, User};
use quill_core::error::RepoError;
use quill_core::ports::{BlogRepository, UserRepository};

use super::entity::blog::{self, Entity as BlogEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL blog repository.
pub type PostgresBlogRepository = PostgresBaseRepository<BlogEntity>;

/// Mask an email address so it can be logged without PII.
fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let masked_local = match local.chars().next() {
                Some(first) if local.chars().count() > 1 => format!("{first}***"),
                _ => "***".to_string(),
            };
            format!("{masked_local}@{domain}")
        }
        None => "***".to_string(),
    }
}

/// `ILIKE` pattern matching `needle` anywhere, with wildcards escaped.
fn contains_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// True when any element of the `tags` array matches the pattern.
fn any_tag_matches(needle: &str) -> SimpleExpr {
    Expr::cust_with_values(
        r#"EXISTS (SELECT 1 FROM unnest("blogs"."tags") AS tag WHERE tag ILIKE $1)"#,
        [contains_pattern(needle)],
    )
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl BlogRepository for PostgresBlogRepository {
    async fn find_by_title(&self, title: &str) -> Result<Option<BlogPost>, RepoError> {
        let result = BlogEntity::find()
            .filter(blog::Column::Title.eq(title))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_page(&self, query: &BlogQuery) -> Result<Vec<BlogPost>, RepoError> {
        let mut select = BlogEntity::find();

        if let Some(state) = query.state {
            select = select.filter(blog::Column::State.eq(blog::State::from(state)));
        }
        if let Some(author) = &query.author {
            select = select.filter(Expr::col(blog::Column::Author).ilike(contains_pattern(author)));
        }
        if let Some(title) = &query.title {
            select = select.filter(Expr::col(blog::Column::Title).ilike(contains_pattern(title)));
        }
        if let Some(tags) = &query.tags {
            select = select.filter(any_tag_matches(tags));
        }
        if let Some(cursor) = query.cursor {
            select = select.filter(blog::Column::Id.gt(cursor));
        }

        let column = match query.sort {
            SortField::ReadCount => blog::Column::ReadCount,
            SortField::ReadTime => blog::Column::ReadTime,
            SortField::CreatedAt => blog::Column::CreatedAt,
        };
        let order = match query.order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        };

        let rows = select
            .order_by(column, order.clone())
            .order_by(blog::Column::Id, order)
            .limit(query.limit)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        tracing::debug!(count = rows.len(), "Blog page fetched");
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn increment_read_count(&self, id: Uuid) -> Result<Option<BlogPost>, RepoError> {
        // Single UPDATE ... RETURNING so concurrent readers never lose an increment.
        let updated = BlogEntity::update_many()
            .col_expr(
                blog::Column::ReadCount,
                Expr::col(blog::Column::ReadCount).add(1),
            )
            .filter(blog::Column::Id.eq(id))
            .filter(blog::Column::State.eq(blog::State::from(BlogState::Published)))
            .exec_with_returning(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(updated.into_iter().next().map(Into::into))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("ada@example.com"), "a***@example.com");
        assert_eq!(mask_email("a@example.com"), "***@example.com");
        assert_eq!(mask_email("nobody"), "***");
    }

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("rust"), "%rust%");
        assert_eq!(contains_pattern("100%_"), "%100\\%\\_%");
    }
}
