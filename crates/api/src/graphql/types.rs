//! GraphQL output types.

use async_graphql::SimpleObject;
use quill_core::types::{DbId, Timestamp};
use quill_db::models::article::{Article, ArticleDetail};
use quill_db::models::comment::CommentDetail;
use quill_db::models::vote::Vote;

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Vote")]
pub struct VoteObject {
    pub id: DbId,
    pub value: i64,
    pub ip_address: String,
    pub comment_id: DbId,
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Comment")]
pub struct CommentObject {
    pub id: DbId,
    pub content: String,
    pub timestamp: Timestamp,
    pub article_id: DbId,
    pub user_id: DbId,
    pub votes: Vec<VoteObject>,
    /// Sum of the vote values.
    pub score: i64,
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Article")]
pub struct ArticleObject {
    pub id: DbId,
    pub title: String,
    pub perex: String,
    pub content: String,
    pub timestamp: Timestamp,
    pub user_id: DbId,
    pub comments: Vec<CommentObject>,
}

impl From<Vote> for VoteObject {
    fn from(vote: Vote) -> Self {
        Self {
            id: vote.id,
            value: vote.value,
            ip_address: vote.ip_address,
            comment_id: vote.comment_id,
        }
    }
}

impl From<CommentDetail> for CommentObject {
    fn from(detail: CommentDetail) -> Self {
        let CommentDetail {
            comment,
            votes,
            score,
        } = detail;
        Self {
            id: comment.id,
            content: comment.content,
            timestamp: comment.timestamp,
            article_id: comment.article_id,
            user_id: comment.user_id,
            votes: votes.into_iter().map(VoteObject::from).collect(),
            score,
        }
    }
}

impl From<Article> for ArticleObject {
    fn from(article: Article) -> Self {
        Self {
            id: article.id,
            title: article.title,
            perex: article.perex,
            content: article.content,
            timestamp: article.timestamp,
            user_id: article.user_id,
            comments: Vec::new(),
        }
    }
}

impl From<ArticleDetail> for ArticleObject {
    fn from(detail: ArticleDetail) -> Self {
        let mut object = ArticleObject::from(detail.article);
        object.comments = detail.comments.into_iter().map(CommentObject::from).collect();
        object
    }
}
