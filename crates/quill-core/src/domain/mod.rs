//! Domain entities - the core business objects.

mod blog;
mod query;
mod user;

pub use blog::{BlogEdit, BlogPost, BlogState, EDITABLE_FIELDS, NewBlog, read_time};
pub use query::{BlogQuery, ListBlogsParams, PAGE_SIZE, Page, Scope, SortField, SortOrder};
pub use user::{Role, User};
