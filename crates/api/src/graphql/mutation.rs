use async_graphql::{Context, Object, Result, ResultExt};
use quill_core::types::DbId;
use quill_core::voter::VoterIp;
use quill_db::models::article::{CreateArticle, UpdateArticle};

use super::require_user;
use super::types::{ArticleObject, CommentObject};
use crate::services::{articles, auth, comments, votes};
use crate::state::AppState;

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Returns a bearer token, or null on bad credentials.
    async fn login(
        &self,
        ctx: &Context<'_>,
        username: String,
        password: String,
    ) -> Result<Option<String>> {
        let state = ctx.data::<AppState>()?;
        auth::login(state, &username, &password).await.extend()
    }

    async fn create_article(
        &self,
        ctx: &Context<'_>,
        title: String,
        perex: String,
        content: String,
    ) -> Result<ArticleObject> {
        let state = ctx.data::<AppState>()?;
        let user = require_user(ctx)?;
        let input = CreateArticle {
            title,
            perex,
            content,
        };
        let article = articles::create(state, user, &input).await.extend()?;
        Ok(article.into())
    }

    /// Null when the article does not exist or belongs to someone else.
    async fn update_article(
        &self,
        ctx: &Context<'_>,
        id: DbId,
        title: Option<String>,
        perex: Option<String>,
        content: Option<String>,
    ) -> Result<Option<ArticleObject>> {
        let state = ctx.data::<AppState>()?;
        let user = require_user(ctx)?;
        let input = UpdateArticle {
            title,
            perex,
            content,
        };
        let article = articles::update(state, user, id, &input).await.extend()?;
        Ok(article.map(ArticleObject::from))
    }

    async fn delete_article(&self, ctx: &Context<'_>, id: DbId) -> Result<bool> {
        let state = ctx.data::<AppState>()?;
        let user = require_user(ctx)?;
        articles::delete(state, user, id).await.extend()
    }

    async fn add_comment(
        &self,
        ctx: &Context<'_>,
        article_id: DbId,
        content: String,
    ) -> Result<CommentObject> {
        let state = ctx.data::<AppState>()?;
        let user = require_user(ctx)?;
        let comment = comments::add(state, user, article_id, content).await.extend()?;
        Ok(comment.into())
    }

    /// Null when the comment does not exist.
    async fn vote_comment(
        &self,
        ctx: &Context<'_>,
        comment_id: DbId,
        value: i64,
    ) -> Result<Option<CommentObject>> {
        let state = ctx.data::<AppState>()?;
        let voter = ctx.data::<VoterIp>()?;
        let comment = votes::cast(state, comment_id, value, voter).await.extend()?;
        Ok(comment.map(CommentObject::from))
    }
}
