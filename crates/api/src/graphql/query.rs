use async_graphql::{Context, Object, Result, ResultExt};
use quill_core::types::DbId;

use super::types::ArticleObject;
use crate::services::articles;
use crate::state::AppState;

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Every article with nested comments and votes.
    async fn articles(&self, ctx: &Context<'_>) -> Result<Vec<ArticleObject>> {
        let state = ctx.data::<AppState>()?;
        let articles = articles::list(state).await.extend()?;
        Ok(articles.into_iter().map(ArticleObject::from).collect())
    }

    /// One article, or null when it does not exist.
    async fn article(&self, ctx: &Context<'_>, id: DbId) -> Result<Option<ArticleObject>> {
        let state = ctx.data::<AppState>()?;
        let article = articles::get(state, id).await.extend()?;
        Ok(article.map(ArticleObject::from))
    }
}
